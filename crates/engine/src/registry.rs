//! Trusted source registry

use std::collections::{BTreeMap, HashMap};

use verigate_errors::{Error, RegistryError};

/// Which side of the containment check matched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchDirection {
    /// The registered identifier occurs inside the submitted source
    IdentifierInSource,
    /// The submitted source occurs inside the registered identifier
    SourceInIdentifier,
}

/// The registry entry that vouched for a source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceMatch<'a> {
    pub category: &'a str,
    pub identifier: &'a str,
    pub direction: MatchDirection,
}

/// Fixed allow-list of source identifiers grouped by category.
///
/// A source is trusted when any identifier contains it or is contained by
/// it. Containment is plain, case-sensitive substring search in both
/// directions, so an empty source is trusted and short fragments such as
/// `"docs"` match. Callers relying on tighter provenance must check
/// [`SourceMatch::direction`] themselves.
#[derive(Debug, Clone)]
pub struct TrustedSourceRegistry {
    categories: BTreeMap<String, Vec<String>>,
}

impl TrustedSourceRegistry {
    /// Build a registry, rejecting anything that would make provenance
    /// ambiguous or trust every source.
    ///
    /// # Errors
    ///
    /// Returns an error if there are no identifiers at all, a category name
    /// or identifier is empty, or an identifier is listed more than once.
    pub fn new(categories: BTreeMap<String, Vec<String>>) -> Result<Self, Error> {
        let mut seen: HashMap<&str, &str> = HashMap::new();

        for (category, identifiers) in &categories {
            if category.is_empty() {
                return Err(RegistryError::EmptyCategory.into());
            }
            for identifier in identifiers {
                if identifier.is_empty() {
                    return Err(RegistryError::EmptyIdentifier {
                        category: category.clone(),
                    }
                    .into());
                }
                if let Some(first) = seen.insert(identifier, category) {
                    return Err(RegistryError::DuplicateIdentifier {
                        identifier: identifier.clone(),
                        first_category: first.to_string(),
                        second_category: category.clone(),
                    }
                    .into());
                }
            }
        }

        if seen.is_empty() {
            return Err(RegistryError::Empty.into());
        }

        Ok(Self { categories })
    }

    /// Convenience constructor from `(category, identifiers)` pairs
    ///
    /// # Errors
    ///
    /// Same conditions as [`TrustedSourceRegistry::new`]. A category given
    /// twice has its identifiers appended in order.
    pub fn from_pairs<I, C, S>(pairs: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = (C, Vec<S>)>,
        C: Into<String>,
        S: Into<String>,
    {
        let mut categories: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (category, identifiers) in pairs {
            categories
                .entry(category.into())
                .or_default()
                .extend(identifiers.into_iter().map(Into::into));
        }
        Self::new(categories)
    }

    /// Find the first registered identifier related to `source` by
    /// containment, scanning categories in name order.
    #[must_use]
    pub fn matches(&self, source: &str) -> Option<SourceMatch<'_>> {
        self.iter().find_map(|(category, identifier)| {
            let direction = if source.contains(identifier) {
                MatchDirection::IdentifierInSource
            } else if identifier.contains(source) {
                MatchDirection::SourceInIdentifier
            } else {
                return None;
            };
            Some(SourceMatch {
                category,
                identifier,
                direction,
            })
        })
    }

    #[must_use]
    pub fn is_trusted(&self, source: &str) -> bool {
        self.matches(source).is_some()
    }

    /// Category names in order
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    /// Identifiers registered under `category`
    #[must_use]
    pub fn identifiers(&self, category: &str) -> Option<&[String]> {
        self.categories.get(category).map(Vec::as_slice)
    }

    /// Category an exact identifier is registered under
    #[must_use]
    pub fn category_of(&self, identifier: &str) -> Option<&str> {
        self.iter()
            .find(|(_, id)| *id == identifier)
            .map(|(category, _)| category)
    }

    /// All `(category, identifier)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.categories.iter().flat_map(|(category, identifiers)| {
            identifiers
                .iter()
                .map(move |identifier| (category.as_str(), identifier.as_str()))
        })
    }

    /// Number of registered identifiers
    #[must_use]
    pub fn len(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }

    /// Always false for a constructed registry
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn category_count(&self) -> usize {
        self.categories.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> TrustedSourceRegistry {
        TrustedSourceRegistry::from_pairs([
            (
                "official_docs",
                vec!["https://docs.anthropic.com", "https://platform.openai.com/docs"],
            ),
            (
                "reputable_repos",
                vec!["https://github.com/huggingface/transformers"],
            ),
        ])
        .unwrap()
    }

    #[test]
    fn test_exact_identifier_is_trusted() {
        let reg = registry();
        let m = reg.matches("https://docs.anthropic.com").map(|m| m.category);
        assert_eq!(m, Some("official_docs"));
    }

    #[test]
    fn test_longer_source_contains_identifier() {
        let reg = registry();
        let m = reg
            .matches("https://docs.anthropic.com/en/api/messages")
            .unwrap();
        assert_eq!(m.identifier, "https://docs.anthropic.com");
        assert_eq!(m.direction, MatchDirection::IdentifierInSource);
    }

    #[test]
    fn test_shorter_source_inside_identifier() {
        let reg = registry();
        let m = reg.matches("github.com/huggingface").unwrap();
        assert_eq!(m.category, "reputable_repos");
        assert_eq!(m.direction, MatchDirection::SourceInIdentifier);
    }

    #[test]
    fn test_permissive_edges_are_kept() {
        let reg = registry();
        // empty source is a substring of every identifier
        assert!(reg.is_trusted(""));
        // accidental overlap still counts
        assert!(reg.is_trusted("docs"));
        // containment is case-sensitive
        assert!(!reg.is_trusted("HTTPS://DOCS.ANTHROPIC.COM"));
        assert!(!reg.is_trusted("https://totally-fake-blog.example"));
    }

    #[test]
    fn test_duplicate_across_categories_rejected() {
        let err = TrustedSourceRegistry::from_pairs([
            ("a", vec!["https://x.example"]),
            ("b", vec!["https://x.example"]),
        ])
        .unwrap_err();
        assert!(matches!(
            err,
            Error::Registry(RegistryError::DuplicateIdentifier { .. })
        ));
    }

    #[test]
    fn test_empty_inputs_rejected() {
        let empty: Vec<(&str, Vec<&str>)> = vec![];
        assert!(matches!(
            TrustedSourceRegistry::from_pairs(empty).unwrap_err(),
            Error::Registry(RegistryError::Empty)
        ));
        assert!(matches!(
            TrustedSourceRegistry::from_pairs([("docs", Vec::<&str>::new())]).unwrap_err(),
            Error::Registry(RegistryError::Empty)
        ));
        assert!(matches!(
            TrustedSourceRegistry::from_pairs([("docs", vec![""])]).unwrap_err(),
            Error::Registry(RegistryError::EmptyIdentifier { .. })
        ));
        assert!(matches!(
            TrustedSourceRegistry::from_pairs([("", vec!["https://x.example"])]).unwrap_err(),
            Error::Registry(RegistryError::EmptyCategory)
        ));
    }

    #[test]
    fn test_accessors() {
        let reg = registry();
        assert_eq!(reg.len(), 3);
        assert_eq!(reg.category_count(), 2);
        assert_eq!(
            reg.categories().collect::<Vec<_>>(),
            vec!["official_docs", "reputable_repos"]
        );
        assert_eq!(
            reg.category_of("https://platform.openai.com/docs"),
            Some("official_docs")
        );
        assert_eq!(reg.identifiers("official_docs").map(<[String]>::len), Some(2));
        assert!(reg.identifiers("blogs").is_none());
    }
}
