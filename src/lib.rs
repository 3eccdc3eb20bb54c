//! # trdb
//!
//! The teaching storage core: slotted pages, a clock-policy buffer pool,
//! heap-file record operations, and three equi-join operators, tied
//! together by a small catalog and a line-oriented statement driver.
//!
//! The storage engine itself lives in the `page`, `file`, `buffer`,
//! `catalog`, `heap`, and `join` crates under `crates/storage`. This crate
//! hosts the ambient pieces that turn them into a runnable server:
//! [`config`] (TOML configuration), [`engine_environment`] (session setup
//! and logging), and [`repl`] (the statement parser and dispatcher).

pub mod config;
pub mod engine_environment;
pub mod error;
pub mod repl;
