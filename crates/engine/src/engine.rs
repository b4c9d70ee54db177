//! Verification engine

use chrono::Utc;
use verigate_config::Config;
use verigate_errors::{ConfigError, Error};
use verigate_events::{EventEmitter, EventSender, VerificationEvent};
use verigate_hash::{fingerprint_hex, FingerprintAlgorithm};
use verigate_types::{violation_description, LogStats, RetentionPolicy, VerificationRecord};

use crate::log::VerificationLog;
use crate::registry::TrustedSourceRegistry;
use crate::ruleset::PatternRuleset;

/// Content verification engine.
///
/// Holds the trusted source registry and pattern ruleset, both fixed at
/// construction, and owns the verification log. `verify` takes `&self`,
/// so one engine can be shared across threads behind an `Arc`.
#[derive(Debug)]
pub struct VerificationEngine {
    registry: TrustedSourceRegistry,
    ruleset: PatternRuleset,
    algorithm: FingerprintAlgorithm,
    log: VerificationLog,
    tx: Option<EventSender>,
}

impl EventEmitter for VerificationEngine {
    fn event_sender(&self) -> Option<&EventSender> {
        self.tx.as_ref()
    }
}

impl VerificationEngine {
    /// Create an engine with the default fingerprint algorithm and no
    /// event channel
    ///
    /// # Errors
    ///
    /// Returns an error if the retention policy is invalid.
    pub fn new(
        registry: TrustedSourceRegistry,
        ruleset: PatternRuleset,
        retention: RetentionPolicy,
    ) -> Result<Self, Error> {
        Self::builder()
            .with_registry(registry)
            .with_ruleset(ruleset)
            .with_retention(retention)
            .build()
    }

    #[must_use]
    pub fn builder() -> VerificationEngineBuilder {
        VerificationEngineBuilder::new()
    }

    /// Build an engine from loaded configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configured sources, patterns or retention
    /// settings are invalid.
    pub fn from_config(config: &Config, tx: Option<EventSender>) -> Result<Self, Error> {
        let registry = TrustedSourceRegistry::new(config.sources.clone())?;
        let ruleset = PatternRuleset::new(config.patterns.rules.iter().cloned())?;

        let mut builder = Self::builder()
            .with_registry(registry)
            .with_ruleset(ruleset)
            .with_retention(config.retention()?)
            .with_fingerprint_algorithm(config.engine.fingerprint);
        if let Some(tx) = tx {
            builder = builder.with_event_sender(tx);
        }
        builder.build()
    }

    /// Engine with the built-in sources and patterns
    ///
    /// # Errors
    ///
    /// Returns an error only if the built-in tables are invalid.
    pub fn with_defaults() -> Result<Self, Error> {
        Self::from_config(&Config::default(), None)
    }

    /// Verify one piece of content against its claimed source and log the
    /// result.
    ///
    /// Every pattern is evaluated; the source check runs regardless of
    /// pattern hits. The returned record carries the sequence number it was
    /// logged under.
    pub fn verify(&self, content: &str, source: &str) -> VerificationRecord {
        let content_fingerprint = fingerprint_hex(self.algorithm, content);

        let violations: Vec<String> = self
            .ruleset
            .matches(content)
            .into_iter()
            .map(violation_description)
            .collect();

        let source_match = self.registry.matches(source);
        let source_verified = source_match.is_some();

        if let Some(m) = source_match {
            tracing::trace!(
                category = m.category,
                identifier = m.identifier,
                direction = ?m.direction,
                "source matched registry"
            );
        }

        let record = VerificationRecord {
            // assigned by the log
            sequence: 0,
            content_fingerprint,
            source: source.to_string(),
            timestamp: Utc::now(),
            verified: source_verified && violations.is_empty(),
            source_verified,
            violations,
        };

        let appended = self.log.append(record);
        let record = appended.record;

        if let Some(sequence) = appended.evicted {
            self.emit_verification(VerificationEvent::RecordEvicted { sequence });
        }

        tracing::debug!(
            sequence = record.sequence,
            fingerprint = %record.content_fingerprint,
            verified = record.verified,
            source_verified = record.source_verified,
            violations = record.violations.len(),
            "content verified"
        );

        self.emit_verification(VerificationEvent::Completed {
            sequence: record.sequence,
            fingerprint: record.content_fingerprint.clone(),
            source: record.source.clone(),
            verified: record.verified,
            source_verified: record.source_verified,
            violations: record.violations.len(),
        });

        record
    }

    /// Verify `(content, source)` pairs in order. Each item is logged as its
    /// own record; other threads may interleave their own records between
    /// them.
    pub fn verify_batch<'a, I>(&self, items: I) -> Vec<VerificationRecord>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let items: Vec<_> = items.into_iter().collect();
        self.emit_verification(VerificationEvent::BatchStarted { items: items.len() });

        let records: Vec<_> = items
            .into_iter()
            .map(|(content, source)| self.verify(content, source))
            .collect();

        self.emit_verification(VerificationEvent::BatchCompleted {
            items: records.len(),
            verified: records.iter().filter(|r| r.verified).count(),
        });

        records
    }

    /// Copy of the retained log, oldest first
    #[must_use]
    pub fn log_snapshot(&self) -> Vec<VerificationRecord> {
        self.log.snapshot()
    }

    #[must_use]
    pub fn log_len(&self) -> usize {
        self.log.len()
    }

    #[must_use]
    pub fn log_stats(&self) -> LogStats {
        self.log.stats()
    }

    #[must_use]
    pub fn log(&self) -> &VerificationLog {
        &self.log
    }

    #[must_use]
    pub fn registry(&self) -> &TrustedSourceRegistry {
        &self.registry
    }

    #[must_use]
    pub fn ruleset(&self) -> &PatternRuleset {
        &self.ruleset
    }

    #[must_use]
    pub fn fingerprint_algorithm(&self) -> FingerprintAlgorithm {
        self.algorithm
    }
}

/// Builder for [`VerificationEngine`]
#[derive(Debug, Default)]
pub struct VerificationEngineBuilder {
    registry: Option<TrustedSourceRegistry>,
    ruleset: Option<PatternRuleset>,
    retention: RetentionPolicy,
    algorithm: FingerprintAlgorithm,
    tx: Option<EventSender>,
}

impl VerificationEngineBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_registry(mut self, registry: TrustedSourceRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    #[must_use]
    pub fn with_ruleset(mut self, ruleset: PatternRuleset) -> Self {
        self.ruleset = Some(ruleset);
        self
    }

    /// Set log retention (default: unbounded)
    #[must_use]
    pub fn with_retention(mut self, retention: RetentionPolicy) -> Self {
        self.retention = retention;
        self
    }

    #[must_use]
    pub fn with_fingerprint_algorithm(mut self, algorithm: FingerprintAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Set event sender
    #[must_use]
    pub fn with_event_sender(mut self, tx: EventSender) -> Self {
        self.tx = Some(tx);
        self
    }

    /// Build the engine
    ///
    /// # Errors
    ///
    /// Returns an error if the registry or ruleset is missing, or the
    /// retention policy is invalid.
    pub fn build(self) -> Result<VerificationEngine, Error> {
        let registry = self.registry.ok_or_else(|| ConfigError::MissingField {
            field: "registry".to_string(),
        })?;

        let ruleset = self.ruleset.ok_or_else(|| ConfigError::MissingField {
            field: "ruleset".to_string(),
        })?;

        let log = VerificationLog::new(self.retention)?;

        let engine = VerificationEngine {
            registry,
            ruleset,
            algorithm: self.algorithm,
            log,
            tx: self.tx,
        };

        tracing::info!(
            categories = engine.registry.category_count(),
            identifiers = engine.registry.len(),
            rules = engine.ruleset.len(),
            retention = %self.retention,
            fingerprint = engine.algorithm.as_str(),
            "verification engine ready"
        );
        engine.emit_verification(VerificationEvent::EngineReady {
            categories: engine.registry.category_count(),
            identifiers: engine.registry.len(),
            rules: engine.ruleset.len(),
            retention: self.retention,
        });
        if engine.ruleset.is_empty() {
            engine.emit_warning("no red-flag patterns configured; only the source is checked");
        }

        Ok(engine)
    }
}
