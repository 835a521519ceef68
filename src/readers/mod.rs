// src/readers/mod.rs

//! The `readers` modules turn a user-passed locator into streams of log
//! lines and drive those streams through the statistics accumulator:
//! [`sourceresolver`] discovers the sources, [`linereader`] opens one
//! source as a line iterator, [`analyzer`] runs the whole pipeline.
//!
//! [`sourceresolver`]: crate::readers::sourceresolver
//! [`linereader`]: crate::readers::linereader
//! [`analyzer`]: crate::readers::analyzer

pub mod analyzer;
pub mod linereader;
pub mod sourceresolver;
