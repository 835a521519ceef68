// src/readers/linereader.rs

//! Open one [`LogSource`] as an iterator of lines.
//!
//! The iterator owns the underlying handle (file descriptor or HTTP
//! response body), so the handle is released on every exit path when the
//! iterator is dropped. Opening can fail; the caller decides whether
//! that is fatal (here it never is; the analyzer warns and moves to the
//! next source). A read error mid-stream quietly ends the iterator.
//!
//! [`LogSource`]: crate::readers::sourceresolver::LogSource

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::time::Duration;

use crate::e_wrn;
use crate::readers::sourceresolver::{LogSource, SourceKind};

use ::anyhow::Context;
use ::si_trace_print::{defn, defx};

/// Bound on the whole HTTP fetch; a remote source must not block the run
/// indefinitely.
pub const URL_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// LineReader
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A scoped line stream over one open source.
pub struct LineReader {
    lines: std::io::Lines<Box<dyn BufRead>>,
}

impl LineReader {
    /// Open `source` for line-by-line reading. For a URL this performs
    /// the GET (bounded by [`URL_FETCH_TIMEOUT`]) and fails on network
    /// errors and non-2xx statuses.
    pub fn open(source: &LogSource) -> anyhow::Result<LineReader> {
        defn!("({:?})", source);
        let reader: Box<dyn BufRead> = match source.kind {
            SourceKind::File => {
                let file: File = File::open(&source.name)
                    .with_context(|| format!("cannot open file {:?}", source.name))?;
                Box::new(BufReader::new(file))
            }
            SourceKind::Url => {
                let client = reqwest::blocking::Client::builder()
                    .timeout(URL_FETCH_TIMEOUT)
                    .build()
                    .context("cannot build HTTP client")?;
                let response = client
                    .get(&source.name)
                    .send()
                    .and_then(|response| response.error_for_status())
                    .with_context(|| format!("cannot fetch {:?}", source.name))?;
                Box::new(BufReader::new(response))
            }
        };
        defx!("opened {:?}", source.name);

        Ok(LineReader {
            lines: reader.lines(),
        })
    }
}

impl Iterator for LineReader {
    type Item = String;

    /// A read error ends the source; the lines before it still count.
    fn next(&mut self) -> Option<String> {
        match self.lines.next()? {
            Ok(line) => Some(line),
            Err(err) => {
                e_wrn!("read error, dropping rest of source: {}", err);
                None
            }
        }
    }
}
