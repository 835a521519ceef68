// src/tests/stats_tests.rs

//! tests for `stats.rs`: the accumulator and `percentile95`

use crate::data::accesslog::AccessLogEntry;
use crate::data::stats::{percentile95, CollectedStats};
use crate::tests::common::NGINX_10_LINES;

use ::test_case::test_case;

// percentile95: nearest-rank, index = ceil(0.95 × n) − 1 of the sorted copy

#[test]
fn test_percentile95_empty_is_zero() {
    assert_eq!(percentile95(&[]), 0.0);
}

#[test_case(&[7], 7.0; "single value")]
#[test_case(&[1, 2], 2.0; "two values take the maximum")]
#[test_case(&[10, 20, 30, 40, 50, 60, 70, 80, 90, 100], 100.0; "ten values take index nine")]
#[test_case(&[100, 90, 80, 70, 60, 50, 40, 30, 20, 10], 100.0; "input order is irrelevant")]
#[test_case(
    &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20],
    19.0;
    "twenty values take index eighteen"
)]
#[test_case(&[5, 5, 5, 5], 5.0; "all equal")]
fn test_percentile95(
    sizes: &[u64],
    expect: f64,
) {
    assert_eq!(percentile95(sizes), expect);
}

#[test]
fn test_percentile95_does_not_reorder_input() {
    let sizes = vec![3, 1, 2];
    percentile95(&sizes);
    assert_eq!(sizes, vec![3, 1, 2]);
}

// accumulator invariants

fn stats_of_fixture() -> CollectedStats {
    let mut stats = CollectedStats::new();
    for line in NGINX_10_LINES.lines() {
        let entry = AccessLogEntry::parse(line).unwrap();
        stats.account(&entry);
    }
    stats.finalize();

    stats
}

#[test]
fn test_account_invariants() {
    let stats = stats_of_fixture();
    assert_eq!(stats.total_requests, 10);
    assert_eq!(
        stats.total_requests,
        stats.resource_frequency.values().sum::<u64>(),
    );
    assert_eq!(
        stats.total_requests,
        stats.response_codes.values().sum::<u64>(),
    );
    assert_eq!(stats.total_requests, stats.ips.values().sum::<u64>());
    assert_eq!(stats.total_requests, stats.users.values().sum::<u64>());
    assert_eq!(
        stats.total_response_size,
        stats.response_sizes.iter().sum::<u64>(),
    );
}

#[test]
fn test_response_sizes_keep_encounter_order() {
    let stats = stats_of_fixture();
    assert_eq!(
        stats.response_sizes,
        vec![0, 490, 85, 120, 150, 200, 230, 300, 333, 404],
    );
}

#[test]
fn test_finalize_sets_percentile() {
    let stats = stats_of_fixture();
    assert_eq!(stats.percentile, 490.0);
}

#[test]
fn test_average_response_size_truncates() {
    let stats = stats_of_fixture();
    // 2312 / 10
    assert_eq!(stats.average_response_size(), 231);
}

#[test]
fn test_average_response_size_empty_is_zero() {
    let stats = CollectedStats::new();
    assert_eq!(stats.average_response_size(), 0);
}
