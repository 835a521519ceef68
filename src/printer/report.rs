// src/printer/report.rs

//! Render [`CollectedStats`] as a Markdown or AsciiDoc report and write
//! it to `log_report.md`/`log_report.adoc` in the working directory.
//!
//! Content is identical across the two styles modulo markup syntax: a
//! "General Information" section, a "Requested resources" table, and a
//! "Response codes" table, the tables ordered by descending count. The
//! relative order of equal counts follows map iteration order and is not
//! deterministic.
//!
//! [`CollectedStats`]: crate::data::stats::CollectedStats

use std::fmt::Write as _;
use std::fs;

use crate::common::{Count, FPath, FPaths};
use crate::data::datetime::DateTimeLOpt;
use crate::data::stats::{CollectedStats, FrequencyMap};
use crate::e_wrn;

use ::si_trace_print::defñ;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// markup tokens and lookup tables
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Report file name stem; the style supplies the extension.
pub const LOG_REPORT_FILE_NAME: &str = "log_report";

const SECTION_GENERAL: &str = "General Information";
const SECTION_RESOURCES: &str = "Requested resources";
const SECTION_CODES: &str = "Response codes";

/// Placeholder for an absent datetime bound.
const NO_BOUND: &str = "-";

const MD_HEADER: &str = "###";
const MD_SEPARATOR_2: &str = "| :--------: | :--------: |";
const MD_SEPARATOR_3: &str = "| :--------: | :--------: | :--------: |";

const ADOC_HEADER: &str = "===";
const ADOC_TABLE: &str = "|===";

/// Status-code class names by numeric lower bound, highest first.
/// Codes below every bound (including unparseable ones) fall through to
/// the last entry.
const RESPONSE_CODE_CLASSES: [(u32, &str); 5] = [
    (500, "Server error responses"),
    (400, "Client error responses"),
    (300, "Redirection messages"),
    (200, "Successful responses"),
    (100, "Informational responses"),
];

/// Human-readable class of one status code, by numeric-range lookup.
pub fn response_code_name(code: &str) -> &'static str {
    let numeric: u32 = code.parse().unwrap_or(0);
    for (threshold, name) in RESPONSE_CODE_CLASSES.iter() {
        if numeric >= *threshold {
            return name;
        }
    }

    RESPONSE_CODE_CLASSES[RESPONSE_CODE_CLASSES.len() - 1].1
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// ReportStyle
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ReportStyle {
    #[default]
    Markdown,
    AsciiDoc,
}

impl ReportStyle {
    pub const fn extension(self) -> &'static str {
        match self {
            ReportStyle::Markdown => ".md",
            ReportStyle::AsciiDoc => ".adoc",
        }
    }

    /// `log_report.md` or `log_report.adoc`.
    pub fn output_path(self) -> FPath {
        let mut path = FPath::from(LOG_REPORT_FILE_NAME);
        path.push_str(self.extension());

        path
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// rendering
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Frequency map entries ordered by descending count. Equal counts keep
/// map iteration order (not deterministic).
fn sorted_by_count_desc(map: &FrequencyMap) -> Vec<(&String, Count)> {
    let mut entries: Vec<(&String, Count)> = map
        .iter()
        .map(|(key, count)| (key, *count))
        .collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1));

    entries
}

/// Key with the maximum count, or the empty string for an empty map.
/// Ties fall to whichever entry the max-selection sees last.
fn most_frequent(map: &FrequencyMap) -> String {
    map.iter()
        .max_by_key(|(_, count)| **count)
        .map(|(key, _)| key.clone())
        .unwrap_or_default()
}

fn display_bound(dt: &DateTimeLOpt) -> String {
    match dt {
        Some(dt) => dt.format("%Y-%m-%dT%H:%M:%S").to_string(),
        None => NO_BOUND.to_string(),
    }
}

/// Render the full report text in the requested style.
pub fn render(
    source_names: &FPaths,
    stats: &CollectedStats,
    dt_after: &DateTimeLOpt,
    dt_before: &DateTimeLOpt,
    style: ReportStyle,
) -> String {
    defñ!("({:?}, {:?})", source_names, style);
    match style {
        ReportStyle::Markdown => render_markdown(source_names, stats, dt_after, dt_before),
        ReportStyle::AsciiDoc => render_asciidoc(source_names, stats, dt_after, dt_before),
    }
}

// `write!` into a `String` cannot fail; `let _ =` keeps the lines short.

fn render_markdown(
    source_names: &FPaths,
    stats: &CollectedStats,
    dt_after: &DateTimeLOpt,
    dt_before: &DateTimeLOpt,
) -> String {
    let mut out = String::with_capacity(1024);
    let _ = writeln!(out, "{} {}", MD_HEADER, SECTION_GENERAL);
    let _ = writeln!(out);
    let _ = writeln!(out, "| Metrics | Value |");
    let _ = writeln!(out, "{}", MD_SEPARATOR_2);
    let _ = writeln!(out, "| File(-s) | `{}` |", source_names.join(", "));
    let _ = writeln!(out, "| From date | {} |", display_bound(dt_after));
    let _ = writeln!(out, "| To date | {} |", display_bound(dt_before));
    let _ = writeln!(out, "| Number of requests | {} |", stats.total_requests);
    let _ = writeln!(out, "| Average response size | {} b |", stats.average_response_size());
    let _ = writeln!(out, "| 95p answer size | {:.2} b |", stats.percentile);
    let _ = writeln!(out, "| Most frequent IP | {} |", most_frequent(&stats.ips));
    let _ = writeln!(out, "| Most frequent user | {} |", most_frequent(&stats.users));
    let _ = writeln!(out);

    let _ = writeln!(out, "{} {}", MD_HEADER, SECTION_RESOURCES);
    let _ = writeln!(out);
    let _ = writeln!(out, "| Resource | Amount |");
    let _ = writeln!(out, "{}", MD_SEPARATOR_2);
    for (resource, count) in sorted_by_count_desc(&stats.resource_frequency) {
        let _ = writeln!(out, "| {} | {} |", resource, count);
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "{} {}", MD_HEADER, SECTION_CODES);
    let _ = writeln!(out);
    let _ = writeln!(out, "| Code | Name | Amount |");
    let _ = writeln!(out, "{}", MD_SEPARATOR_3);
    for (code, count) in sorted_by_count_desc(&stats.response_codes) {
        let _ = writeln!(out, "| {} | {} | {} |", code, response_code_name(code), count);
    }

    out
}

fn render_asciidoc(
    source_names: &FPaths,
    stats: &CollectedStats,
    dt_after: &DateTimeLOpt,
    dt_before: &DateTimeLOpt,
) -> String {
    let mut out = String::with_capacity(1024);
    let _ = writeln!(out, "{} {}", ADOC_HEADER, SECTION_GENERAL);
    let _ = writeln!(out, "{}", ADOC_TABLE);
    let _ = writeln!(out, "| Metrics | Value");
    let _ = writeln!(out);
    let _ = writeln!(out, "| File(-s) | {}", source_names.join(", "));
    let _ = writeln!(out, "| From date | {}", display_bound(dt_after));
    let _ = writeln!(out, "| To date | {}", display_bound(dt_before));
    let _ = writeln!(out, "| Number of requests | {}", stats.total_requests);
    let _ = writeln!(out, "| Average response size | {} b", stats.average_response_size());
    let _ = writeln!(out, "| 95p answer size | {:.2} b", stats.percentile);
    let _ = writeln!(out, "| Most frequent IP | {}", most_frequent(&stats.ips));
    let _ = writeln!(out, "| Most frequent user | {}", most_frequent(&stats.users));
    let _ = writeln!(out, "{}", ADOC_TABLE);
    let _ = writeln!(out);

    let _ = writeln!(out, "{} {}", ADOC_HEADER, SECTION_RESOURCES);
    let _ = writeln!(out, "{}", ADOC_TABLE);
    let _ = writeln!(out, "| Resource | Amount");
    let _ = writeln!(out);
    for (resource, count) in sorted_by_count_desc(&stats.resource_frequency) {
        let _ = writeln!(out, "| {} | {}", resource, count);
    }
    let _ = writeln!(out, "{}", ADOC_TABLE);
    let _ = writeln!(out);

    let _ = writeln!(out, "{} {}", ADOC_HEADER, SECTION_CODES);
    let _ = writeln!(out, "{}", ADOC_TABLE);
    let _ = writeln!(out, "| Code | Name | Amount");
    let _ = writeln!(out);
    for (code, count) in sorted_by_count_desc(&stats.response_codes) {
        let _ = writeln!(out, "| {} | {} | {}", code, response_code_name(code), count);
    }
    let _ = writeln!(out, "{}", ADOC_TABLE);

    out
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// persistence
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Write the rendered report, overwriting any previous run's file.
/// A write failure is a warning, not a failed run; the statistics were
/// still computed.
pub fn write_report(
    text: &str,
    style: ReportStyle,
) -> Option<FPath> {
    let path: FPath = style.output_path();
    match fs::write(&path, text) {
        Ok(()) => Some(path),
        Err(err) => {
            e_wrn!("cannot write report {:?}: {}", path, err);
            None
        }
    }
}
