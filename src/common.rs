// src/common.rs
//
// common imports, type aliases, and other globals (avoids circular imports)

/// `F`ake `Path` or `F`ile `Path`; files and URLs are both named by one.
pub type FPath = String;
pub type FPaths = Vec<FPath>;

/// A count of anything.
pub type Count = u64;

/// A response body size in bytes.
pub type ResponseSize = u64;
