// src/data/accesslog.rs

//! One parsed access-log line and the fixed grammar that recognizes it.
//!
//! The grammar is the nginx/Apache "combined" form:
//!
//! ```text
//! ADDR - USER [TIMESTAMP] "METHOD PATH PROTOCOL" CODE SIZE "REFERER" "USER_AGENT"
//! ```
//!
//! Parsing is lenient: a line that does not match the grammar, or whose
//! timestamp or size field cannot be parsed, yields `None`. Callers skip
//! such a line silently; it is never an error and never counted.

use crate::common::ResponseSize;
use crate::data::datetime::{datetime_sniff_parse, DateTimeL};

use ::lazy_static::lazy_static;
use ::regex::Regex;
use ::si_trace_print::defñ;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// AccessLogEntry
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// The combined-log grammar as one anchored regular expression.
///
/// Capture groups, in order: remote address, remote user, timestamp,
/// request line, status code, body bytes sent, referer, user agent.
pub const ACCESSLOG_PATTERN: &str = concat!(
    r#"^(\S+) - (\S+) \[([^\]]+)\] "#,
    r#""([^"]+)" (\d{3}) (\d+) "#,
    r#""([^"]*)" "([^"]*)"$"#,
);

lazy_static! {
    static ref ACCESSLOG_REGEX: Regex = Regex::new(ACCESSLOG_PATTERN).unwrap();
}

/// One structurally valid access-log line reduced to the fields the
/// aggregation cares about. Created per line, consumed immediately.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccessLogEntry {
    pub ip: String,
    pub user: String,
    /// Request path; the second whitespace-separated token of the quoted
    /// request group (method and protocol are discarded).
    pub resource: String,
    pub response_code: String,
    pub response_size: ResponseSize,
    /// Wall-clock timestamp of the request, used only for range filtering.
    pub timestamp: DateTimeL,
    /// Verbatim `User-Agent` header, used only for agent filtering.
    pub user_agent: String,
}

impl AccessLogEntry {
    /// Parse one log line. `None` means the line is skipped: it did not
    /// match the grammar, had no request path token, or carried an
    /// unparseable timestamp or size.
    pub fn parse(line: &str) -> Option<AccessLogEntry> {
        defñ!("({:?})", line);
        let captures = ACCESSLOG_REGEX.captures(line)?;
        let timestamp: DateTimeL = datetime_sniff_parse(&captures[3])?;
        let resource: &str = captures[4]
            .split_whitespace()
            .nth(1)?;
        let response_size: ResponseSize = captures[6].parse().ok()?;

        Some(AccessLogEntry {
            ip: captures[1].to_string(),
            user: captures[2].to_string(),
            resource: resource.to_string(),
            response_code: captures[5].to_string(),
            response_size,
            timestamp,
            user_agent: captures[8].to_string(),
        })
    }
}
