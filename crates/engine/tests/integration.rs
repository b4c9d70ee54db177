//! Integration tests for the verification engine

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::sync::Arc;

    use verigate_config::Config;
    use verigate_engine::*;
    use verigate_events::{channel, AppEvent, EventLevel, GeneralEvent, VerificationEvent};

    fn default_engine() -> VerificationEngine {
        VerificationEngine::with_defaults().unwrap()
    }

    #[test]
    fn test_flagged_content_from_trusted_source() {
        let engine = default_engine();
        let record = engine.verify(
            "This uses quantum consciousness breakthroughs",
            "https://docs.anthropic.com",
        );
        assert!(!record.verified);
        assert!(record.source_verified);
        assert_eq!(
            record.violations,
            vec!["Potential hallucination: quantum.*consciousness".to_string()]
        );
    }

    #[test]
    fn test_clean_content_from_trusted_source() {
        let engine = default_engine();
        let record = engine.verify(
            "Standard REST API usage example",
            "https://platform.openai.com/docs",
        );
        assert!(record.verified);
        assert!(record.violations.is_empty());
    }

    #[test]
    fn test_clean_content_from_untrusted_source() {
        let engine = default_engine();
        let record = engine.verify(
            "Standard REST API usage example",
            "https://totally-fake-blog.example",
        );
        assert!(!record.verified);
        assert!(!record.source_verified);
        assert!(record.violations.is_empty());
    }

    #[test]
    fn test_empty_content_from_trusted_source() {
        let engine = default_engine();
        let record = engine.verify("", "https://docs.llamaindex.ai");
        assert!(record.verified);
        assert_eq!(
            record.content_fingerprint,
            "af1349b9f5f9a1a6a0404dea36dcc9499bcb25c9adc112b7cc9a93cae41f3262"
        );
    }

    #[test]
    fn test_record_is_logged_as_returned() {
        let engine = default_engine();
        let record = engine.verify("agi integration", "https://github.com/huggingface/transformers");
        let snapshot = engine.log_snapshot();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0], record);
        assert!(record.timestamp_iso().ends_with('Z'));
        assert_eq!(
            engine.log().find_by_fingerprint(&record.content_fingerprint),
            vec![record]
        );
    }

    #[test]
    fn test_concurrent_appends_are_serialised() {
        const THREADS: u64 = 8;
        const PER_THREAD: u64 = 50;

        let engine = Arc::new(default_engine());

        std::thread::scope(|scope| {
            for t in 0..THREADS {
                let engine = Arc::clone(&engine);
                scope.spawn(move || {
                    for i in 0..PER_THREAD {
                        engine.verify(&format!("thread {t} item {i}"), "https://docs.anthropic.com");
                    }
                });
            }
        });

        let snapshot = engine.log_snapshot();
        assert_eq!(snapshot.len() as u64, THREADS * PER_THREAD);

        // log order is sequence order, with no gaps or repeats
        let sequences: Vec<u64> = snapshot.iter().map(|r| r.sequence).collect();
        let expected: Vec<u64> = (0..THREADS * PER_THREAD).collect();
        assert_eq!(sequences, expected);

        let fingerprints: BTreeSet<_> = snapshot.iter().map(|r| &r.content_fingerprint).collect();
        assert_eq!(fingerprints.len() as u64, THREADS * PER_THREAD);
    }

    #[test]
    fn test_default_engine_keeps_every_record() {
        let engine = default_engine();
        assert_eq!(engine.log().policy(), RetentionPolicy::Unbounded);

        let calls = 10_001;
        for i in 0..calls {
            engine.verify(&format!("item {i}"), "https://docs.anthropic.com");
        }

        assert_eq!(engine.log_len(), calls);
        assert_eq!(engine.log_stats().evicted, 0);
        assert_eq!(engine.log_snapshot()[0].sequence, 0);
    }

    #[test]
    fn test_ring_retention_from_config() {
        let mut config = Config::default();
        config.engine.log_capacity = Some(3);
        let engine = VerificationEngine::from_config(&config, None).unwrap();

        for i in 0..5 {
            engine.verify(&format!("item {i}"), "https://docs.anthropic.com");
        }

        let kept: Vec<u64> = engine.log_snapshot().iter().map(|r| r.sequence).collect();
        assert_eq!(kept, vec![2, 3, 4]);
        assert_eq!(engine.log().total_appended(), 5);
        assert_eq!(engine.log_stats().evicted, 2);
    }

    #[test]
    fn test_custom_tables() {
        let registry =
            TrustedSourceRegistry::from_pairs([("internal", vec!["wiki.corp.example"])]).unwrap();
        let ruleset = PatternRuleset::new(["perpetual.*motion"]).unwrap();
        let engine = VerificationEngine::new(registry, ruleset, RetentionPolicy::Unbounded).unwrap();

        assert!(engine.verify("how pumps work", "https://wiki.corp.example/pumps").verified);
        let flagged = engine.verify("a Perpetual Motion machine", "wiki.corp.example");
        assert_eq!(
            flagged.violations,
            vec!["Potential hallucination: perpetual.*motion".to_string()]
        );
        // default patterns are not in play
        assert!(engine.verify("quantum consciousness", "wiki.corp.example").verified);
    }

    #[tokio::test]
    async fn test_events_are_emitted() {
        let (tx, mut rx) = channel();
        let engine = VerificationEngine::from_config(&Config::default(), Some(tx)).unwrap();

        let ready = rx.recv().await.unwrap();
        assert!(matches!(
            ready.event,
            AppEvent::Verification(VerificationEvent::EngineReady { rules: 4, .. })
        ));

        let record = engine.verify("parallel universe travel", "https://docs.anthropic.com");
        let completed = rx.recv().await.unwrap();
        match completed.event {
            AppEvent::Verification(VerificationEvent::Completed {
                sequence,
                verified,
                violations,
                ..
            }) => {
                assert_eq!(sequence, record.sequence);
                assert!(!verified);
                assert_eq!(violations, 1);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_ruleset_emits_warning() {
        let (tx, mut rx) = channel();
        let mut config = Config::default();
        config.patterns.rules.clear();
        let engine = VerificationEngine::from_config(&config, Some(tx)).unwrap();

        let ready = rx.recv().await.unwrap();
        assert!(matches!(
            ready.event,
            AppEvent::Verification(VerificationEvent::EngineReady { rules: 0, .. })
        ));
        let warning = rx.recv().await.unwrap();
        assert!(matches!(
            warning.event,
            AppEvent::General(GeneralEvent::Warning { ref message }) if message.contains("patterns")
        ));
        assert_eq!(warning.meta.level, EventLevel::Warn);

        assert!(engine.verify("quantum consciousness", "https://docs.anthropic.com").verified);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn flagged_content_never_verifies(
                prefix in "[a-z ]{0,20}",
                middle in "[a-z ]{0,20}",
                suffix in "[a-z ]{0,20}",
            ) {
                let engine = default_engine();
                let content = format!("{prefix}Quantum{middle}CONSCIOUSNESS{suffix}");
                let record = engine.verify(&content, "https://docs.anthropic.com");
                prop_assert!(!record.verified);
                prop_assert!(record
                    .violations
                    .contains(&"Potential hallucination: quantum.*consciousness".to_string()));
            }

            #[test]
            fn unrelated_source_never_verifies(content in ".{0,64}", source in "[0-9]{1,20}") {
                let engine = default_engine();
                let record = engine.verify(&content, &source);
                prop_assert!(!record.source_verified);
                prop_assert!(!record.verified);
            }

            #[test]
            fn fingerprint_depends_only_on_content(
                content in ".{0,128}",
                a in "[a-z]{0,10}",
                b in "[a-z]{0,10}",
            ) {
                let engine = default_engine();
                let first = engine.verify(&content, &a);
                let second = engine.verify(&content, &b);
                prop_assert_eq!(first.content_fingerprint, second.content_fingerprint);
            }

            #[test]
            fn every_call_is_logged(n in 0usize..40) {
                let registry = TrustedSourceRegistry::from_pairs([("docs", vec!["x"])]).unwrap();
                let ruleset = PatternRuleset::new(Vec::<String>::new()).unwrap();
                let engine =
                    VerificationEngine::new(registry, ruleset, RetentionPolicy::Unbounded).unwrap();
                for i in 0..n {
                    engine.verify(&i.to_string(), "x");
                }
                prop_assert_eq!(engine.log_len(), n);
                prop_assert_eq!(engine.log_stats().verified, n as u64);
            }
        }
    }
}
