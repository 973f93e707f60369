//! Output sinks
//!
//! - [`FilesystemSink`] - one directory, atomic per-table writes
//! - [`MemorySink`] - in-process map for dry runs and tests

pub mod factory;
pub mod filesystem;
pub mod memory;
pub mod traits;

pub use factory::create_sink;
pub use filesystem::FilesystemSink;
pub use memory::MemorySink;
pub use traits::{OutputSink, SinkResult};
