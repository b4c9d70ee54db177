//! Suspicious-content pattern rules

use std::collections::HashSet;

use regex::{Regex, RegexBuilder};
use verigate_errors::{Error, RulesetError};

/// A single compiled rule. Keeps the source text for violation messages.
#[derive(Debug, Clone)]
pub struct PatternRule {
    pattern: String,
    regex: Regex,
}

impl PatternRule {
    /// Compile a case-insensitive rule
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern is not a valid regular expression.
    pub fn new(pattern: impl Into<String>) -> Result<Self, Error> {
        let pattern = pattern.into();
        let regex = RegexBuilder::new(&pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| RulesetError::InvalidPattern {
                pattern: pattern.clone(),
                message: e.to_string(),
            })?;
        Ok(Self { pattern, regex })
    }

    /// Pattern text as configured
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    #[must_use]
    pub fn is_match(&self, content: &str) -> bool {
        self.regex.is_match(content)
    }
}

/// Ordered set of red-flag rules. Every rule is evaluated on every call.
#[derive(Debug, Clone)]
pub struct PatternRuleset {
    rules: Vec<PatternRule>,
}

impl PatternRuleset {
    /// Compile all rules up front so bad patterns fail at construction.
    ///
    /// # Errors
    ///
    /// Returns an error on the first empty, duplicate or malformed pattern.
    pub fn new<I, S>(patterns: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut rules = Vec::new();
        let mut seen = HashSet::new();

        for (index, pattern) in patterns.into_iter().enumerate() {
            let pattern = pattern.into();
            if pattern.is_empty() {
                return Err(RulesetError::EmptyPattern { index }.into());
            }
            if !seen.insert(pattern.clone()) {
                return Err(RulesetError::DuplicatePattern { pattern }.into());
            }
            rules.push(PatternRule::new(pattern)?);
        }

        if rules.is_empty() {
            tracing::warn!("pattern ruleset is empty; only source provenance will be checked");
        }

        Ok(Self { rules })
    }

    /// Patterns that match `content`, in ruleset order
    #[must_use]
    pub fn matches(&self, content: &str) -> Vec<&str> {
        self.rules
            .iter()
            .filter(|rule| rule.is_match(content))
            .map(PatternRule::pattern)
            .collect()
    }

    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(PatternRule::pattern)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn ruleset() -> PatternRuleset {
        PatternRuleset::new([
            "quantum.*consciousness",
            "agi.*integration",
            "parallel.*universe",
            "202[6-9].*breakthrough",
        ])
        .unwrap()
    }

    #[test]
    fn test_case_insensitive_match() {
        assert_eq!(
            ruleset().matches("QUANTUM Consciousness is here"),
            vec!["quantum.*consciousness"]
        );
    }

    #[test]
    fn test_all_rules_checked_in_order() {
        let rs = ruleset();
        let hits = rs.matches("A 2027 breakthrough: AGI integration via quantum consciousness");
        assert_eq!(
            hits,
            vec![
                "quantum.*consciousness",
                "agi.*integration",
                "202[6-9].*breakthrough"
            ]
        );
    }

    #[test]
    fn test_rule_order_only_changes_violation_order() {
        let patterns = [
            "quantum.*consciousness",
            "agi.*integration",
            "parallel.*universe",
            "202[6-9].*breakthrough",
        ];
        let forward = PatternRuleset::new(patterns).unwrap();
        let reversed = PatternRuleset::new(patterns.iter().rev().copied()).unwrap();

        let content = "In 2026 a breakthrough in AGI integration opened a parallel universe";
        let forward_hits = forward.matches(content);
        let mut reversed_hits = reversed.matches(content);
        assert_eq!(forward_hits.len(), 3);

        assert_eq!(
            forward_hits.iter().collect::<BTreeSet<_>>(),
            reversed_hits.iter().collect::<BTreeSet<_>>()
        );

        reversed_hits.reverse();
        assert_eq!(forward_hits, reversed_hits);
    }

    #[test]
    fn test_order_of_terms_matters_within_a_rule() {
        assert!(ruleset().matches("consciousness before quantum").is_empty());
    }

    #[test]
    fn test_dot_does_not_cross_newlines() {
        assert!(ruleset().matches("parallel\nuniverse").is_empty());
    }

    #[test]
    fn test_empty_content_matches_nothing() {
        assert!(ruleset().matches("").is_empty());
    }

    #[test]
    fn test_invalid_pattern_fails_fast() {
        let err = PatternRuleset::new(["ok", "(unclosed"]).unwrap_err();
        match err {
            Error::Ruleset(RulesetError::InvalidPattern { pattern, .. }) => {
                assert_eq!(pattern, "(unclosed");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_empty_and_duplicate_patterns_rejected() {
        assert!(matches!(
            PatternRuleset::new(["a", ""]).unwrap_err(),
            Error::Ruleset(RulesetError::EmptyPattern { index: 1 })
        ));
        assert!(matches!(
            PatternRuleset::new(["a", "a"]).unwrap_err(),
            Error::Ruleset(RulesetError::DuplicatePattern { .. })
        ));
    }

    #[test]
    fn test_empty_ruleset_allowed() {
        let rs = PatternRuleset::new(Vec::<String>::new()).unwrap();
        assert!(rs.is_empty());
        assert!(rs.matches("quantum consciousness").is_empty());
    }
}
