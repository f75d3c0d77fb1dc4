// Adapters layer: concrete implementations for external systems (dataset sources).

pub mod source;

pub use source::{source_from_config, FileSource, HttpSource};
