//! Record-level heap-file operations: `insert_tuple`/`delete_tuple` and a
//! tuple scanner, all driven through a [`buffer::BufferPool`].

mod error;
mod file;
pub mod tuple;

pub use error::HeapError;
pub use file::HeapFile;
