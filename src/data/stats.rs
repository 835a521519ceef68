// src/data/stats.rs

//! The per-run statistics accumulator and the 95th-percentile
//! computation over response sizes.

use std::collections::HashMap;

use crate::common::{Count, ResponseSize};
use crate::data::accesslog::AccessLogEntry;

use ::si_trace_print::defñ;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// CollectedStats
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Frequency map keyed by one log field value.
pub type FrequencyMap = HashMap<String, Count>;

/// Statistics accumulated over one analysis run. Mutated monotonically by
/// [`account`] while sources stream, then sealed by one [`finalize`] call.
///
/// Invariant: `total_requests` equals the sum of values of each frequency
/// map, and `total_response_size` equals the sum of `response_sizes`;
/// every accounted entry contributes exactly one key to each map and one
/// element to the list.
///
/// [`account`]: CollectedStats::account
/// [`finalize`]: CollectedStats::finalize
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CollectedStats {
    pub total_requests: Count,
    pub resource_frequency: FrequencyMap,
    pub response_codes: FrequencyMap,
    pub total_response_size: u64,
    /// Every accounted size, in encounter order.
    pub response_sizes: Vec<ResponseSize>,
    pub ips: FrequencyMap,
    pub users: FrequencyMap,
    /// 95th-percentile response size; `0.0` until [`finalize`] runs.
    ///
    /// [`finalize`]: CollectedStats::finalize
    pub percentile: f64,
}

impl CollectedStats {
    pub fn new() -> CollectedStats {
        CollectedStats::default()
    }

    /// Count one filter-passing entry into every accumulator.
    pub fn account(
        &mut self,
        entry: &AccessLogEntry,
    ) {
        defñ!("({:?})", entry);
        self.total_requests += 1;
        *self
            .resource_frequency
            .entry(entry.resource.clone())
            .or_insert(0) += 1;
        *self
            .response_codes
            .entry(entry.response_code.clone())
            .or_insert(0) += 1;
        *self.ips.entry(entry.ip.clone()).or_insert(0) += 1;
        *self.users.entry(entry.user.clone()).or_insert(0) += 1;
        self.total_response_size += entry.response_size;
        self.response_sizes.push(entry.response_size);
    }

    /// Compute the percentile once, after every source is drained.
    pub fn finalize(&mut self) {
        self.percentile = percentile95(&self.response_sizes);
    }

    /// Integer-truncating mean response size; `0` when nothing was counted.
    pub fn average_response_size(&self) -> u64 {
        if self.total_requests == 0 {
            return 0;
        }

        self.total_response_size / self.total_requests
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// percentile
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

const PERCENTILE: f64 = 0.95;

/// Nearest-rank 95th percentile: sort a copy ascending, return the value
/// at index `ceil(0.95 × n) − 1`. Empty input yields `0.0`. No
/// interpolation; the index formula is part of the output contract.
pub fn percentile95(sizes: &[ResponseSize]) -> f64 {
    if sizes.is_empty() {
        return 0.0;
    }
    let mut sorted: Vec<ResponseSize> = sizes.to_vec();
    sorted.sort_unstable();
    let index: usize = (PERCENTILE * sorted.len() as f64).ceil() as usize - 1;

    sorted[index] as f64
}
