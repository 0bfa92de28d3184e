//! Executor module for file operations

pub mod read;
pub mod write;

pub use read::{read_text, require_file};
pub use write::write_file_atomic;
