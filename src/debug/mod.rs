// src/debug/mod.rs

//! The `debug` module is macros for printing errors and warnings.

pub mod printers;
