// src/printer/mod.rs

//! The `printer` module formats the accumulated statistics into the final
//! human-readable report and persists it.

pub mod report;
