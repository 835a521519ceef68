// src/tests/mod.rs

//! Tests for _walalib_.
//!
//! Tests are placed at `src/tests/`, inside the `walalib`. This is a
//! reasonable trade-off of separation and access: tests placed at
//! top-level path `tests/` do not have crate-internal visibility, and
//! several of these tests exercise crate-internal helpers.

pub mod common;

pub mod accesslog_tests;
pub mod stats_tests;
