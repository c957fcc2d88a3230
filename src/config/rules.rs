//! Ignore rules: which field paths are left out of a comparison.

use once_cell::sync::Lazy;
use regex::Regex;

use super::ConfigError;

/// Exact paths ignored when no configuration says otherwise.
pub const DEFAULT_IGNORE_FIELDS: &[&str] = &[
    "id",
    "selfLink",
    "creationTimestamp",
    "lastModifiedTimestamp",
    "fingerprint",
    "kind",
    "etag",
];

/// Patterns ignored when no configuration says otherwise.
pub const DEFAULT_IGNORE_PATTERNS: &[&str] = &[".*Timestamp$", ".*Fingerprint$"];

static DEFAULT_RULES: Lazy<RuleSet> = Lazy::new(|| RuleSet {
    fields: DEFAULT_IGNORE_FIELDS.iter().map(|f| f.to_string()).collect(),
    patterns: DEFAULT_IGNORE_PATTERNS
        .iter()
        .map(|p| IgnorePattern {
            source: p.to_string(),
            regex: Regex::new(p).expect("built-in ignore pattern is valid"),
        })
        .collect(),
});

#[derive(Debug, Clone)]
struct IgnorePattern {
    source: String,
    regex: Regex,
}

/// RuleSet decides whether a difference at a given path is suppressed.
///
/// A path is ignored when it equals one of the exact fields, or when any
/// pattern matches somewhere in it. Patterns are compiled once, when the
/// rule set is built, so a `RuleSet` is immutable and can be shared freely.
#[derive(Debug, Clone)]
pub struct RuleSet {
    fields: Vec<String>,
    patterns: Vec<IgnorePattern>,
}

impl RuleSet {
    /// Builds a rule set, compiling every pattern.
    pub fn new<F, P>(fields: F, patterns: P) -> Result<Self, ConfigError>
    where
        F: IntoIterator,
        F::Item: Into<String>,
        P: IntoIterator,
        P::Item: Into<String>,
    {
        let patterns = patterns
            .into_iter()
            .map(|p| {
                let source = p.into();
                Regex::new(&source)
                    .map(|regex| IgnorePattern {
                        source: source.clone(),
                        regex,
                    })
                    .map_err(|e| ConfigError::Pattern {
                        pattern: source,
                        source: e,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(RuleSet {
            fields: fields.into_iter().map(Into::into).collect(),
            patterns,
        })
    }

    /// The built-in rule set covering volatile identity and bookkeeping fields.
    pub fn defaults() -> Self {
        DEFAULT_RULES.clone()
    }

    /// A rule set that ignores nothing.
    pub fn empty() -> Self {
        RuleSet {
            fields: Vec::new(),
            patterns: Vec::new(),
        }
    }

    /// Returns a copy with additional exact paths appended.
    pub fn with_fields<I>(&self, extra: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let mut rules = self.clone();
        rules.fields.extend(extra.into_iter().map(Into::into));
        rules
    }

    /// Returns true if differences at `path` are suppressed.
    pub fn should_ignore(&self, path: &str) -> bool {
        self.fields.iter().any(|field| field == path)
            || self.patterns.iter().any(|p| p.regex.is_match(path))
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// The pattern sources, in declaration order.
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(|p| p.source.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.patterns.is_empty()
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_cover_volatile_fields() {
        let rules = RuleSet::defaults();
        for field in ["id", "selfLink", "creationTimestamp", "fingerprint", "etag"] {
            assert!(rules.should_ignore(field), "{} should be ignored", field);
        }
        assert!(!rules.should_ignore("name"));
        assert!(!rules.should_ignore("zone"));
    }

    #[test]
    fn test_exact_match_only_for_fields() {
        let rules = RuleSet::new(["metadata.name"], Vec::<String>::new()).unwrap();
        assert!(rules.should_ignore("metadata.name"));
        assert!(!rules.should_ignore("metadata"));
        assert!(!rules.should_ignore("metadata.name.first"));
        assert!(!rules.should_ignore("name"));
    }

    #[test]
    fn test_patterns_match_nested_paths() {
        let rules = RuleSet::defaults();
        assert!(rules.should_ignore("metadata.lastStartTimestamp"));
        assert!(rules.should_ignore("disks[0].labelFingerprint"));
        assert!(!rules.should_ignore("timestampFormat"));
    }

    #[test]
    fn test_invalid_pattern_is_rejected() {
        let err = RuleSet::new(Vec::<String>::new(), ["(unclosed"]).unwrap_err();
        assert!(matches!(err, ConfigError::Pattern { ref pattern, .. } if pattern == "(unclosed"));
    }

    #[test]
    fn test_with_fields_leaves_original_untouched() {
        let base = RuleSet::defaults();
        let extended = base.with_fields(["name", "selfLink"]);

        assert!(extended.should_ignore("name"));
        assert!(!base.should_ignore("name"));
        assert_eq!(extended.fields().len(), base.fields().len() + 2);
    }

    #[test]
    fn test_empty_rules_ignore_nothing() {
        let rules = RuleSet::empty();
        assert!(rules.is_empty());
        assert!(!rules.should_ignore("id"));
        assert!(!rules.should_ignore(""));
    }
}
