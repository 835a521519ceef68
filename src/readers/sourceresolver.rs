// src/readers/sourceresolver.rs

//! Turn a user-passed locator into zero or more concrete log sources.
//!
//! A locator that parses as a URL with a host is one source by itself.
//! Anything else is a glob pattern: the directory tree under the pattern's
//! wildcard-free prefix is walked once, and every regular file whose path
//! matches becomes a source, in the order the walk visits it (directory
//! traversal order, deliberately not sorted).
//!
//! Discovery failures degrade to "zero sources found" plus a diagnostic
//! on stderr; they never abort the run.

use std::path::Path;

use crate::common::FPath;
use crate::{e_err, e_wrn};

use ::glob::{MatchOptions, Pattern};
use ::si_trace_print::{defn, defo, defx};
use ::url::Url;
use ::walkdir::WalkDir;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// LogSource
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SourceKind {
    /// A local regular file.
    File,
    /// A remote log fetched over HTTP GET.
    Url,
}

/// One resolved source of log lines and the name it is reported under.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LogSource {
    /// Resolved file path, or the original URL string.
    pub name: FPath,
    pub kind: SourceKind,
}

/// Does the locator parse as a well-formed URL?
///
/// `Url::parse` alone is too permissive here: a relative path like
/// `logs/access.log` fails, but `C:/logs` would parse as a URL with
/// scheme `c`. Requiring a host rules those out.
pub fn is_url(locator: &str) -> bool {
    match Url::parse(locator) {
        Ok(url) => url.has_host(),
        Err(_) => false,
    }
}

/// The directory to walk for a glob pattern: everything up to the first
/// path component containing a wildcard. A pattern without wildcards is
/// returned as given (walking a plain file path visits that file).
pub fn walk_root(pattern: &str) -> FPath {
    if !pattern.contains(['*', '?']) {
        return pattern.to_string();
    }
    let wildcard_free: Vec<&str> = pattern
        .split('/')
        .take_while(|component| !component.contains(['*', '?']))
        .collect();
    let root: FPath = wildcard_free.join("/");
    if root.is_empty() {
        return FPath::from(if pattern.starts_with('/') { "/" } else { "." });
    }

    root
}

/// Resolve `locator` to the ordered list of sources it names.
pub fn resolve_sources(locator: &str) -> Vec<LogSource> {
    defn!("({:?})", locator);
    if is_url(locator) {
        defx!("URL source {:?}", locator);
        return vec![LogSource {
            name: locator.to_string(),
            kind: SourceKind::Url,
        }];
    }

    let pattern: Pattern = match Pattern::new(locator) {
        Ok(pattern) => pattern,
        Err(err) => {
            e_err!("invalid glob pattern {:?}: {}", locator, err);
            defx!("return empty (bad pattern)");
            return Vec::new();
        }
    };

    // `*` and `?` must not cross a path separator; `**` still recurses.
    let match_options = MatchOptions {
        require_literal_separator: true,
        ..MatchOptions::new()
    };

    let root: FPath = walk_root(locator);
    defo!("walk_root {:?}", root);
    if !Path::new(&root).exists() {
        e_wrn!("log path {:?} does not exist", root);
        defx!("return empty (missing root)");
        return Vec::new();
    }

    let mut sources: Vec<LogSource> = Vec::new();
    for entry in WalkDir::new(&root).follow_links(true) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                defo!("Err({:?})", err);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        if pattern.matches_path_with(entry.path(), match_options) {
            defo!("matched {:?}", entry.path());
            sources.push(LogSource {
                name: entry.path().to_string_lossy().into_owned(),
                kind: SourceKind::File,
            });
        }
    }
    if sources.is_empty() {
        e_wrn!("no files matched pattern {:?}", locator);
    }
    defx!("return {} sources", sources.len());

    sources
}
