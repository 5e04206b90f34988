//! Depgraph core — multi-language import-resolution and structural-delta
//! engine. No CLI, no process I/O: everything here is a pure function of
//! bytes handed in through a [`content_reader::ContentReader`].

pub mod content_reader;
pub mod delta;
pub mod error;
pub mod graph;
pub mod languages;
pub mod path_util;
pub mod record;
pub mod registry;
pub mod render;
