//! Putting build results on disk.

pub mod writer;

pub use writer::write_outputs;
