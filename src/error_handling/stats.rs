//! Admission statistics tracking.
//!
//! This module provides thread-safe counters for admission decisions,
//! shared between request handlers and the status server.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use crate::geofence::{AdmissionDecision, ReasonCode};

/// Thread-safe admission statistics tracker.
///
/// Tracks decisions per reason code plus resolver timeouts and faults using
/// atomic counters. All reason codes are initialized to zero on creation.
///
/// # Thread Safety
///
/// This struct is thread-safe and can be shared across multiple tasks using `Arc`.
pub struct AdmissionStats {
    decisions: HashMap<ReasonCode, AtomicUsize>,
    resolver_timeouts: AtomicUsize,
    resolver_faults: AtomicUsize,
}

impl AdmissionStats {
    pub fn new() -> Self {
        let mut decisions = HashMap::new();
        for reason in ReasonCode::iter() {
            decisions.insert(reason, AtomicUsize::new(0));
        }

        AdmissionStats {
            decisions,
            resolver_timeouts: AtomicUsize::new(0),
            resolver_faults: AtomicUsize::new(0),
        }
    }

    /// Counts one decision under its reason code.
    pub fn record(&self, decision: &AdmissionDecision) {
        if let Some(counter) = self.decisions.get(&decision.reason()) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment decision counter for {:?} which is not in the map. \
                 This indicates a bug in AdmissionStats initialization.",
                decision.reason()
            );
        }
    }

    /// Counts an evaluation abandoned because the resolver exceeded its budget.
    pub fn record_timeout(&self) {
        self.resolver_timeouts.fetch_add(1, Ordering::Relaxed);
    }

    /// Counts an evaluation whose resolver returned an error or panicked.
    pub fn record_fault(&self) {
        self.resolver_faults.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get_count(&self, reason: ReasonCode) -> usize {
        self.decisions
            .get(&reason)
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    /// Reads every decision counter once.
    ///
    /// Totals derived from one snapshot stay consistent with each other while
    /// other tasks keep recording.
    pub fn snapshot(&self) -> DecisionCounts {
        DecisionCounts {
            within_range: self.get_count(ReasonCode::WithinRange),
            out_of_range: self.get_count(ReasonCode::OutOfRange),
            unresolvable_location: self.get_count(ReasonCode::UnresolvableLocation),
        }
    }

    pub fn total(&self) -> usize {
        self.snapshot().total()
    }

    pub fn allowed(&self) -> usize {
        self.get_count(ReasonCode::WithinRange)
    }

    pub fn denied(&self) -> usize {
        self.snapshot().denied()
    }

    pub fn resolver_timeouts(&self) -> usize {
        self.resolver_timeouts.load(Ordering::Relaxed)
    }

    pub fn resolver_faults(&self) -> usize {
        self.resolver_faults.load(Ordering::Relaxed)
    }
}

/// Decision counts read at one point in time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecisionCounts {
    pub within_range: usize,
    pub out_of_range: usize,
    pub unresolvable_location: usize,
}

impl DecisionCounts {
    pub fn get(&self, reason: ReasonCode) -> usize {
        match reason {
            ReasonCode::WithinRange => self.within_range,
            ReasonCode::OutOfRange => self.out_of_range,
            ReasonCode::UnresolvableLocation => self.unresolvable_location,
        }
    }

    pub fn total(&self) -> usize {
        self.within_range + self.out_of_range + self.unresolvable_location
    }

    pub fn allowed(&self) -> usize {
        self.within_range
    }

    pub fn denied(&self) -> usize {
        self.out_of_range + self.unresolvable_location
    }
}

impl Default for AdmissionStats {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_admission_stats_initialization() {
        let stats = AdmissionStats::new();
        for reason in ReasonCode::iter() {
            assert_eq!(stats.get_count(reason), 0);
        }
        assert_eq!(stats.total(), 0);
        assert_eq!(stats.resolver_timeouts(), 0);
        assert_eq!(stats.resolver_faults(), 0);
    }

    #[test]
    fn test_admission_stats_record() {
        let stats = AdmissionStats::new();
        stats.record(&AdmissionDecision::from_distance(10.0, 50.0));
        stats.record(&AdmissionDecision::from_distance(60.0, 50.0));
        stats.record(&AdmissionDecision::from_distance(70.0, 50.0));
        stats.record(&AdmissionDecision::unresolvable());

        assert_eq!(stats.get_count(ReasonCode::WithinRange), 1);
        assert_eq!(stats.get_count(ReasonCode::OutOfRange), 2);
        assert_eq!(stats.get_count(ReasonCode::UnresolvableLocation), 1);
        assert_eq!(stats.total(), 4);
        assert_eq!(stats.allowed(), 1);
        assert_eq!(stats.denied(), 3);
    }

    #[test]
    fn test_admission_stats_timeouts_and_faults() {
        let stats = AdmissionStats::new();
        stats.record_timeout();
        stats.record_timeout();
        stats.record_fault();
        assert_eq!(stats.resolver_timeouts(), 2);
        assert_eq!(stats.resolver_faults(), 1);
        // Timeouts and faults are tracked apart from decisions
        assert_eq!(stats.total(), 0);
    }

    #[test]
    fn test_admission_stats_concurrent_updates() {
        let stats = Arc::new(AdmissionStats::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let stats = Arc::clone(&stats);
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        stats.record(&AdmissionDecision::unresolvable());
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(stats.get_count(ReasonCode::UnresolvableLocation), 800);
    }

    #[test]
    fn test_denied_never_underflows_while_admits_are_recorded() {
        let stats = Arc::new(AdmissionStats::new());
        let writer = {
            let stats = Arc::clone(&stats);
            std::thread::spawn(move || {
                for _ in 0..200_000 {
                    stats.record(&AdmissionDecision::from_distance(1.0, 50.0));
                }
            })
        };

        while !writer.is_finished() {
            assert_eq!(stats.denied(), 0);
            let snapshot = stats.snapshot();
            assert_eq!(snapshot.total(), snapshot.allowed() + snapshot.denied());
        }
        writer.join().unwrap();

        assert_eq!(stats.denied(), 0);
        assert_eq!(stats.allowed(), 200_000);
    }

    #[test]
    fn test_snapshot_counts() {
        let stats = AdmissionStats::new();
        stats.record(&AdmissionDecision::from_distance(1.0, 50.0));
        stats.record(&AdmissionDecision::from_distance(90.0, 50.0));
        stats.record(&AdmissionDecision::unresolvable());
        stats.record(&AdmissionDecision::unresolvable());

        let snapshot = stats.snapshot();
        for reason in ReasonCode::iter() {
            assert_eq!(snapshot.get(reason), stats.get_count(reason));
        }
        assert_eq!(snapshot.total(), 4);
        assert_eq!(snapshot.allowed(), 1);
        assert_eq!(snapshot.denied(), 3);
    }
}
