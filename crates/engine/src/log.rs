//! Append-only verification log with explicit retention

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use verigate_errors::{ConfigError, Error};
use verigate_types::{LogStats, RetentionPolicy, VerificationRecord};

/// Upper bound on the buffer allocated up front for a bounded log
const PREALLOCATE_LIMIT: usize = 1024;

#[derive(Debug)]
struct LogState {
    records: VecDeque<VerificationRecord>,
    next_sequence: u64,
    stats: LogStats,
}

/// Result of a single append
#[derive(Debug, Clone)]
pub struct Appended {
    /// The record as stored, sequence number filled in
    pub record: VerificationRecord,
    /// Sequence number of the record the ring buffer dropped, if any
    pub evicted: Option<u64>,
}

/// Thread-safe verification log.
///
/// Appends and sequence assignment happen under one lock, so log order and
/// sequence order always agree. Readers get owned copies.
#[derive(Debug)]
pub struct VerificationLog {
    policy: RetentionPolicy,
    state: Mutex<LogState>,
}

impl VerificationLog {
    /// Create an empty log
    ///
    /// # Errors
    ///
    /// Returns an error if the policy is bounded with zero capacity.
    pub fn new(policy: RetentionPolicy) -> Result<Self, Error> {
        let records = match policy {
            RetentionPolicy::Unbounded => VecDeque::new(),
            RetentionPolicy::Bounded { capacity: 0 } => {
                return Err(ConfigError::InvalidValue {
                    field: "log_capacity".to_string(),
                    value: "0".to_string(),
                }
                .into())
            }
            RetentionPolicy::Bounded { capacity } => {
                VecDeque::with_capacity(capacity.min(PREALLOCATE_LIMIT))
            }
        };

        Ok(Self {
            policy,
            state: Mutex::new(LogState {
                records,
                next_sequence: 0,
                stats: LogStats::default(),
            }),
        })
    }

    // Records are pushed whole, so a panic elsewhere cannot leave one half-written.
    fn lock(&self) -> MutexGuard<'_, LogState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Store a record, assigning its sequence number
    pub fn append(&self, mut record: VerificationRecord) -> Appended {
        let mut state = self.lock();

        record.sequence = state.next_sequence;
        state.next_sequence += 1;

        let stats = &mut state.stats;
        stats.total += 1;
        if record.verified {
            stats.verified += 1;
        } else {
            stats.rejected += 1;
        }
        if !record.source_verified {
            stats.untrusted_source += 1;
        }
        if record.is_flagged() {
            stats.flagged_content += 1;
        }

        let mut evicted = None;
        if let Some(capacity) = self.policy.capacity() {
            while state.records.len() >= capacity {
                if let Some(oldest) = state.records.pop_front() {
                    state.stats.evicted += 1;
                    evicted = Some(oldest.sequence);
                }
            }
        }

        state.records.push_back(record.clone());
        Appended { record, evicted }
    }

    #[must_use]
    pub fn policy(&self) -> RetentionPolicy {
        self.policy
    }

    /// Number of records currently retained
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().records.is_empty()
    }

    /// Number of records ever appended, evicted ones included
    #[must_use]
    pub fn total_appended(&self) -> u64 {
        self.lock().next_sequence
    }

    /// Copy of the retained records, oldest first
    #[must_use]
    pub fn snapshot(&self) -> Vec<VerificationRecord> {
        self.lock().records.iter().cloned().collect()
    }

    #[must_use]
    pub fn stats(&self) -> LogStats {
        self.lock().stats
    }

    /// Most recent record
    #[must_use]
    pub fn latest(&self) -> Option<VerificationRecord> {
        self.lock().records.back().cloned()
    }

    /// Retained records whose content hashed to `fingerprint`
    #[must_use]
    pub fn find_by_fingerprint(&self, fingerprint: &str) -> Vec<VerificationRecord> {
        self.lock()
            .records
            .iter()
            .filter(|r| r.content_fingerprint.eq_ignore_ascii_case(fingerprint))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn record(fingerprint: &str, verified: bool) -> VerificationRecord {
        VerificationRecord {
            sequence: u64::MAX,
            content_fingerprint: fingerprint.to_string(),
            source: "https://docs.anthropic.com".to_string(),
            timestamp: Utc::now(),
            verified,
            source_verified: true,
            violations: if verified {
                vec![]
            } else {
                vec!["Potential hallucination: agi.*integration".to_string()]
            },
        }
    }

    #[test]
    fn test_sequence_assigned_in_order() {
        let log = VerificationLog::new(RetentionPolicy::Unbounded).unwrap();
        let a = log.append(record("aa", true));
        let b = log.append(record("bb", false));
        assert_eq!(a.record.sequence, 0);
        assert_eq!(b.record.sequence, 1);
        assert_eq!(log.len(), 2);
        assert_eq!(log.total_appended(), 2);
    }

    #[test]
    fn test_ring_buffer_evicts_oldest() {
        let log = VerificationLog::new(RetentionPolicy::Bounded { capacity: 2 }).unwrap();
        assert!(log.append(record("a", true)).evicted.is_none());
        assert!(log.append(record("b", true)).evicted.is_none());
        let third = log.append(record("c", true));
        assert_eq!(third.evicted, Some(0));

        let kept: Vec<_> = log
            .snapshot()
            .into_iter()
            .map(|r| r.content_fingerprint)
            .collect();
        assert_eq!(kept, vec!["b", "c"]);
        assert_eq!(log.total_appended(), 3);
        assert_eq!(log.stats().evicted, 1);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert!(VerificationLog::new(RetentionPolicy::Bounded { capacity: 0 }).is_err());
    }

    #[test]
    fn test_stats_and_lookup() {
        let log = VerificationLog::new(RetentionPolicy::default()).unwrap();
        log.append(record("ABCD", true));
        log.append(record("abcd", false));
        log.append(record("ffff", true));

        let stats = log.stats();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.verified, 2);
        assert_eq!(stats.rejected, 1);
        assert_eq!(stats.flagged_content, 1);
        assert_eq!(stats.untrusted_source, 0);

        assert_eq!(log.find_by_fingerprint("abcd").len(), 2);
        assert_eq!(log.latest().map(|r| r.sequence), Some(2));
    }
}
