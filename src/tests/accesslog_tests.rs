// src/tests/accesslog_tests.rs

//! tests for `accesslog.rs` parsing

use crate::data::accesslog::{AccessLogEntry, ACCESSLOG_PATTERN};
use crate::data::datetime::ymdhms;
use crate::tests::common::{NGINX_10_LINES, NGINX_LINE};

use ::regex::Regex;
use ::test_case::test_case;

#[test]
fn test_parse_well_formed_line() {
    let entry = AccessLogEntry::parse(NGINX_LINE).unwrap();
    assert_eq!(entry.ip, "93.180.71.3");
    assert_eq!(entry.user, "-");
    assert_eq!(entry.resource, "/downloads/product_1");
    assert_eq!(entry.response_code, "304");
    assert_eq!(entry.response_size, 0);
    assert_eq!(entry.timestamp, ymdhms(2015, 5, 17, 8, 5, 32));
    assert_eq!(entry.user_agent, "Debian APT-HTTP/1.3 (0.8.16~exp12ubuntu10.21)");
}

#[test]
fn test_parse_named_user() {
    let line = "217.168.17.5 - usr [16/May/2011:08:05:32 +0000] \
\"GET /downloads/product_1 HTTP/1.1\" 200 490 \"-\" \"Debian APT-HTTP/1.3 (0.8.16~exp12ubuntu10.21)\"";
    let entry = AccessLogEntry::parse(line).unwrap();
    assert_eq!(entry.user, "usr");
    assert_eq!(entry.response_size, 490);
}

#[test]
fn test_parse_every_fixture_line() {
    for line in NGINX_10_LINES.lines() {
        assert!(AccessLogEntry::parse(line).is_some(), "rejected: {}", line);
    }
}

/// Parsing then re-deriving (ip, user, resource, code, size) round-trips
/// the same five fields extracted independently by a reference regex.
#[test]
fn test_fields_roundtrip_against_reference_regex() {
    let reference = Regex::new(ACCESSLOG_PATTERN).unwrap();
    for line in NGINX_10_LINES.lines() {
        let entry = AccessLogEntry::parse(line).unwrap();
        let captures = reference.captures(line).unwrap();
        assert_eq!(entry.ip, &captures[1]);
        assert_eq!(entry.user, &captures[2]);
        assert_eq!(
            entry.resource,
            captures[4].split_whitespace().nth(1).unwrap(),
        );
        assert_eq!(entry.response_code, &captures[5]);
        assert_eq!(entry.response_size.to_string(), &captures[6]);
    }
}

// lines that must be silently skipped

#[test_case(""; "empty line")]
#[test_case("completely unrelated text")]
#[test_case("93.180.71.3 - - 17/May/2015:08:05:32 +0000 \"GET /x HTTP/1.1\" 304 0 \"-\" \"ua\""; "timestamp not bracketed")]
#[test_case("93.180.71.3 - - [17/May/2015:08:05:32 +0000] \"GET /x HTTP/1.1\" 304 0 \"-\""; "missing user agent group")]
#[test_case("93.180.71.3 - - [17/May/2015:08:05:32 +0000] \"GET /x HTTP/1.1\" 30 0 \"-\" \"ua\""; "two digit status")]
#[test_case("93.180.71.3 - - [17/May/2015:08:05:32 +0000] \"GET /x HTTP/1.1\" 304 -1 \"-\" \"ua\""; "negative size")]
#[test_case("93.180.71.3 - - [17/May/2015:08:05:32 +0000] \"GET /x HTTP/1.1\" 304 99999999999999999999999 \"-\" \"ua\""; "size overflows")]
#[test_case("93.180.71.3 - - [not a timestamp] \"GET /x HTTP/1.1\" 304 0 \"-\" \"ua\""; "unparseable timestamp")]
#[test_case("93.180.71.3 - - [32/May/2015:08:05:32 +0000] \"GET /x HTTP/1.1\" 304 0 \"-\" \"ua\""; "impossible day in timestamp")]
#[test_case("93.180.71.3 - - [17/May/2015:08:05:32 +0000] \"GET\" 304 0 \"-\" \"ua\""; "request group has no path token")]
fn test_parse_rejected(line: &str) {
    assert_eq!(AccessLogEntry::parse(line), None);
}
