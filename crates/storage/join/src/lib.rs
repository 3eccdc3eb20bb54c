//! Equi-join operators over heap files: one-pass hash, nested-loop block
//! hash, and grace hash, all driven through a shared [`buffer::BufferPool`].

mod common;
mod error;
mod grace;
mod nested_loop;
mod one_pass;
mod schema;

pub use common::JoinStats;
pub use error::JoinError;
pub use grace::{FileIdAllocator, GraceHashJoin};
pub use nested_loop::NestedLoopBlockHashJoin;
pub use one_pass::OnePassJoin;
pub use schema::result_schema;
