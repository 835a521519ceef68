// src/data/mod.rs

//! The `data` modules define the parsed value types: datetimes recognized
//! from user-passed filter strings and log-line timestamp fields
//! ([`datetime`]), one structurally valid access-log line ([`accesslog`]),
//! and the per-run statistics accumulator ([`stats`]).
//!
//! [`datetime`]: crate::data::datetime
//! [`accesslog`]: crate::data::accesslog
//! [`stats`]: crate::data::stats

pub mod accesslog;
pub mod datetime;
pub mod stats;
