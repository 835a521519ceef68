// src/readers/analyzer.rs

//! Drive the whole pipeline for one analysis run: resolve the locator,
//! stream every source line by line, parse, filter, accumulate.
//!
//! Sources are processed strictly one at a time: one source's lines are
//! drained into the shared [`CollectedStats`] before the next source is
//! opened, so memory use is bounded by one line, however many sources
//! the locator names.
//!
//! [`CollectedStats`]: crate::data::stats::CollectedStats

use crate::common::FPaths;
use crate::data::accesslog::AccessLogEntry;
use crate::data::datetime::{dt_pass_filters, DateTimeLOpt};
use crate::data::stats::CollectedStats;
use crate::e_wrn;
use crate::readers::linereader::LineReader;
use crate::readers::sourceresolver::{resolve_sources, LogSource};

use ::regex::Regex;
use ::si_trace_print::{defn, defo, defx};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// agent filter
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A user-agent filter: glob-style, `*` matches any character sequence.
///
/// An entry passes when its full user-agent string matches the translated
/// pattern, or equals the filter string literally. The double check
/// tolerates both glob and literal use of the same argument.
#[derive(Debug)]
pub struct AgentFilter {
    literal: String,
    regex: Regex,
}

impl AgentFilter {
    pub fn new(pattern: &str) -> AgentFilter {
        AgentFilter {
            literal: pattern.to_string(),
            regex: glob_to_regex(pattern),
        }
    }

    pub fn passes(
        &self,
        user_agent: &str,
    ) -> bool {
        self.regex.is_match(user_agent) || user_agent == self.literal
    }
}

/// Translate a glob-style pattern to an anchored regex: segments between
/// `*` are matched literally (regex metacharacters escaped), each `*`
/// becomes `.*`.
fn glob_to_regex(pattern: &str) -> Regex {
    let mut translated = String::with_capacity(pattern.len() + 8);
    translated.push('^');
    for (index, segment) in pattern.split('*').enumerate() {
        if index > 0 {
            translated.push_str(".*");
        }
        translated.push_str(&regex::escape(segment));
    }
    translated.push('$');

    // built entirely from escaped text and `.*`; cannot fail to compile
    Regex::new(&translated).unwrap()
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// LogAnalyzer
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// One analysis run. Remembers which sources were actually consumed so
/// the report can list them.
#[derive(Debug, Default)]
pub struct LogAnalyzer {
    processed_files: FPaths,
}

impl LogAnalyzer {
    pub fn new() -> LogAnalyzer {
        LogAnalyzer::default()
    }

    /// Display names of the sources consumed, in discovery order.
    pub fn processed_files(&self) -> &FPaths {
        &self.processed_files
    }

    /// Stream every source named by `locator`, keep the entries inside
    /// the inclusive `[dt_after, dt_before]` range (a `None` bound is
    /// unbounded) whose user agent passes `agent_filter`, and accumulate
    /// them. Unparseable lines are skipped silently and counted nowhere.
    pub fn analyze(
        &mut self,
        locator: &str,
        dt_after: &DateTimeLOpt,
        dt_before: &DateTimeLOpt,
        agent_filter: Option<&str>,
    ) -> CollectedStats {
        defn!("({:?}, {:?}, {:?}, {:?})", locator, dt_after, dt_before, agent_filter);
        let agent_filter: Option<AgentFilter> = agent_filter.map(AgentFilter::new);
        let mut stats = CollectedStats::new();

        let sources: Vec<LogSource> = resolve_sources(locator);
        for source in &sources {
            self.processed_files.push(source.name.clone());
            let reader: LineReader = match LineReader::open(source) {
                Ok(reader) => reader,
                Err(err) => {
                    e_wrn!("skipping source {:?}: {:#}", source.name, err);
                    continue;
                }
            };
            defo!("streaming {:?}", source.name);
            for line in reader {
                let entry: AccessLogEntry = match AccessLogEntry::parse(&line) {
                    Some(entry) => entry,
                    None => continue,
                };
                if !dt_pass_filters(&entry.timestamp, dt_after, dt_before) {
                    continue;
                }
                if let Some(filter) = &agent_filter {
                    if !filter.passes(&entry.user_agent) {
                        continue;
                    }
                }
                stats.account(&entry);
            }
        }
        stats.finalize();
        defx!("total_requests={}", stats.total_requests);

        stats
    }
}
