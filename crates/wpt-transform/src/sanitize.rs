//! URL sanitization rules.
//!
//! Own-hosted URLs carry volatile tracking values (build versions, hash codes,
//! timestamps) that make otherwise identical requests look distinct. Each rule
//! masks one of them with a fixed placeholder; rules run in list order and
//! each replaces its first match only.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Result, TransformError};

/// `(name, pattern, replacement)` for the built-in rules, in application order.
///
/// Word boundaries and digits are ASCII-only (`(?-u:\b)`, `[0-9]`), so a
/// non-ASCII letter next to a key counts as a boundary and non-ASCII digits
/// are never masked.
const DEFAULT_RULE_SPECS: &[(&str, &str, &str)] = &[
    // sv=25.5
    ("software-version", r"(?-u:\b)sv=[0-9]{2}\.[0-9](?-u:\b)", "sv=XX.X"),
    // hash=1049016115
    ("hash", r"(?-u:\b)hash=-?[0-9]+(?-u:\b)", "hash=XXX"),
    // hc=1811645095
    ("hash-code", r"(?-u:\b)hc=-?[0-9]+(?-u:\b)", "hc=XXX"),
    // /_sv-25.5/
    ("software-version-path", r"/_sv-[0-9]{2}\.[0-9]/", "/_sv-XX.X/"),
    // /_hc-510823158/
    ("hash-code-path", r"/_hc--?[0-9]+/", "/_hc-XXX/"),
    // GP=10%2f27%2f2012+10%3a03%3a28+PM
    ("gp-timestamp", r"(?-u:\b)GP=[0-9%+af]+(?:AM|PM)(?-u:\b)", "GP=XXXX-XX-XX"),
    // GPS=2605388866
    ("gps", r"(?-u:\b)GPS=[0-9]+(?-u:\b)", "GPS=XXX"),
    // timestamp=2605388866
    ("timestamp", r"(?-u:\b)timestamp=[0-9]+(?-u:\b)", "timestamp=XXX"),
    // ts=2605388866
    ("ts", r"(?-u:\b)ts=[0-9]+(?-u:\b)", "timestamp=XXX"),
    // /?_=1368324013206/
    ("cache-buster", r"/\?_=[0-9]+/", "?_=XXX"),
];

static DEFAULT_RULES: LazyLock<SanitizeRules> = LazyLock::new(|| {
    SanitizeRules::from_specs(DEFAULT_RULE_SPECS).expect("built-in sanitize rules compile")
});

/// One pattern → placeholder replacement.
#[derive(Debug, Clone)]
pub struct SanitizeRule {
    name: String,
    pattern: Regex,
    replacement: String,
}

impl SanitizeRule {
    /// # Errors
    ///
    /// Returns [`TransformError::InvalidRule`] if `pattern` does not compile.
    pub fn new(
        name: impl Into<String>,
        pattern: &str,
        replacement: impl Into<String>,
    ) -> Result<Self> {
        let name = name.into();
        let pattern = Regex::new(pattern).map_err(|source| TransformError::InvalidRule {
            name: name.clone(),
            source,
        })?;
        Ok(Self {
            name,
            pattern,
            replacement: replacement.into(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Replace the first match in `url`.
    pub fn apply<'u>(&self, url: &'u str) -> Cow<'u, str> {
        self.pattern.replace(url, self.replacement.as_str())
    }
}

/// Ordered list of rules applied to the same string in sequence.
#[derive(Debug, Clone)]
pub struct SanitizeRules {
    rules: Vec<SanitizeRule>,
}

impl SanitizeRules {
    /// Compile `(name, pattern, replacement)` triples.
    ///
    /// # Errors
    ///
    /// Returns the first rule that fails to compile.
    pub fn from_specs<N, P, R>(specs: &[(N, P, R)]) -> Result<Self>
    where
        N: AsRef<str>,
        P: AsRef<str>,
        R: AsRef<str>,
    {
        let rules = specs
            .iter()
            .map(|(name, pattern, replacement)| {
                SanitizeRule::new(name.as_ref(), pattern.as_ref(), replacement.as_ref())
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rules })
    }

    pub fn rules(&self) -> &[SanitizeRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn apply(&self, url: &str) -> String {
        let mut current = url.to_string();
        for rule in &self.rules {
            let replaced = match rule.apply(&current) {
                Cow::Borrowed(_) => None,
                Cow::Owned(replaced) => Some(replaced),
            };
            if let Some(replaced) = replaced {
                current = replaced;
            }
        }
        current
    }
}

impl Default for SanitizeRules {
    fn default() -> Self {
        DEFAULT_RULES.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(name: &str) -> SanitizeRule {
        SanitizeRules::default()
            .rules()
            .iter()
            .find(|rule| rule.name() == name)
            .cloned()
            .expect("rule exists")
    }

    #[test]
    fn test_default_rule_order() {
        let names: Vec<&str> = DEFAULT_RULE_SPECS.iter().map(|(name, _, _)| *name).collect();
        let rules = SanitizeRules::default();
        let built: Vec<&str> = rules.rules().iter().map(SanitizeRule::name).collect();
        assert_eq!(built, names);
        assert_eq!(rules.len(), 10);
    }

    #[test]
    fn test_software_version() {
        let rule = rule("software-version");
        assert_eq!(rule.apply("/a?sv=25.5&x=1"), "/a?sv=XX.X&x=1");
        assert_eq!(rule.apply("/a?sv=25.55"), "/a?sv=25.55");
        assert_eq!(rule.apply("/a?csv=25.5"), "/a?csv=25.5");
    }

    #[test]
    fn test_hash_and_hash_code() {
        assert_eq!(rule("hash").apply("?hash=-1049016115"), "?hash=XXX");
        assert_eq!(rule("hash-code").apply("?a=1&hc=1811645095"), "?a=1&hc=XXX");
        assert_eq!(rule("hash").apply("?hash=abc"), "?hash=abc");
    }

    #[test]
    fn test_path_segments() {
        assert_eq!(
            rule("software-version-path").apply("/static/_sv-25.5/app.js"),
            "/static/_sv-XX.X/app.js"
        );
        assert_eq!(
            rule("hash-code-path").apply("/static/_hc--510823158/app.js"),
            "/static/_hc-XXX/app.js"
        );
        assert_eq!(
            rule("hash-code-path").apply("/static/_hc-510823158/app.js"),
            "/static/_hc-XXX/app.js"
        );
    }

    #[test]
    fn test_gp_timestamp() {
        assert_eq!(
            rule("gp-timestamp").apply("/p?GP=10%2f27%2f2012+10%3a03%3a28+PM&z=1"),
            "/p?GP=XXXX-XX-XX&z=1"
        );
    }

    #[test]
    fn test_timestamps() {
        assert_eq!(rule("gps").apply("?GPS=2605388866"), "?GPS=XXX");
        assert_eq!(rule("timestamp").apply("?timestamp=2605388866"), "?timestamp=XXX");
        assert_eq!(rule("ts").apply("?ts=2605388866"), "?timestamp=XXX");
    }

    #[test]
    fn test_boundaries_and_digits_are_ascii() {
        assert_eq!(rule("software-version").apply("/x?ésv=25.5"), "/x?ésv=XX.X");
        assert_eq!(rule("hash").apply("/x?hash=١٢٣"), "/x?hash=١٢٣");
        assert_eq!(rule("ts").apply("/x?ts=٤٥"), "/x?ts=٤٥");
    }

    #[test]
    fn test_cache_buster() {
        assert_eq!(rule("cache-buster").apply("/x/?_=1368324013206/y"), "/x?_=XXXy");
    }

    #[test]
    fn test_only_first_match_replaced() {
        assert_eq!(rule("hash").apply("?hash=1&hash=2"), "?hash=XXX&hash=2");
    }

    #[test]
    fn test_chain() {
        let rules = SanitizeRules::default();
        assert_eq!(
            rules.apply("http://www.vistaprint.com/page?hash=1049016115&sv=25.5"),
            "http://www.vistaprint.com/page?hash=XXX&sv=XX.X"
        );
        assert_eq!(rules.apply("http://x/plain"), "http://x/plain");
    }

    #[test]
    fn test_invalid_rule() {
        let err = SanitizeRule::new("broken", "(", "x").unwrap_err();
        assert!(matches!(err, TransformError::InvalidRule { name, .. } if name == "broken"));
    }
}
