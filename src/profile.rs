//! Standard profiles: header rules and cross-reference patterns per standard.
//!
//! A [`ProfileRegistry`] is built once at start-up and handed to the
//! [`Processor`](crate::Processor); nothing here is global state.

use crate::error::Result;
use regex::{Captures, Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// The project-management standards the engine knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StandardType {
    /// PMBOK Guide (7th edition).
    Pmbok,
    /// PRINCE2.
    Prince2,
    /// ISO 21500 / 21502.
    Iso,
    /// Anything else.
    Unknown,
}

impl StandardType {
    /// All standard types, UNKNOWN last.
    pub const ALL: [StandardType; 4] = [
        StandardType::Pmbok,
        StandardType::Prince2,
        StandardType::Iso,
        StandardType::Unknown,
    ];

    /// The upper-case label used in JSON output.
    pub fn as_str(&self) -> &'static str {
        match self {
            StandardType::Pmbok => "PMBOK",
            StandardType::Prince2 => "PRINCE2",
            StandardType::Iso => "ISO",
            StandardType::Unknown => "UNKNOWN",
        }
    }

    /// Lower-case label used for section ids and output directories.
    pub fn slug(&self) -> String {
        self.as_str().to_lowercase()
    }

    /// Lower-case keywords that identify the document title line.
    pub fn title_keywords(&self) -> &'static [&'static str] {
        match self {
            StandardType::Pmbok => &["pmbok"],
            StandardType::Prince2 => &["prince2"],
            StandardType::Iso => &["iso", "21502"],
            StandardType::Unknown => &[],
        }
    }

    /// Extraction challenge that is inherent to the standard's organization.
    pub fn inherent_challenge(&self) -> Option<&'static str> {
        match self {
            StandardType::Pmbok => Some("Performance domain cross-references need mapping"),
            StandardType::Prince2 => Some("Process-theme relationships need preservation"),
            StandardType::Iso => Some("Hierarchical clause structure must be maintained"),
            StandardType::Unknown => None,
        }
    }
}

impl fmt::Display for StandardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a header rule recognises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    NumberedSection,
    Chapter,
    Appendix,
    ProcessCode,
    Clause,
    Annex,
    Bibliography,
}

/// A regex match reduced to its captures.
///
/// `primary` is the first capture group, or the whole match when the
/// pattern has no groups. `secondary` is the second group if it took part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternMatch {
    pub primary: String,
    pub secondary: Option<String>,
}

impl PatternMatch {
    /// Reduce a set of captures.
    pub fn from_captures(caps: &Captures<'_>) -> Self {
        let primary = caps
            .get(1)
            .or_else(|| caps.get(0))
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();
        let secondary = caps.get(2).map(|m| m.as_str().to_string());
        Self { primary, secondary }
    }
}

/// A header pattern and the kind of heading it identifies.
#[derive(Debug, Clone)]
pub struct HeaderRule {
    pub kind: PatternKind,
    pub pattern: Regex,
}

/// Static rule set for one standard.
#[derive(Debug, Clone)]
pub struct StandardProfile {
    /// Standard this profile describes
    pub standard: StandardType,

    /// Organizational pattern label (e.g. "domain_based")
    pub organizational_pattern: String,

    /// Vocabulary typical for the standard
    pub key_identifiers: Vec<String>,

    /// Header rules, tried in order
    pub header_rules: Vec<HeaderRule>,

    /// Cross-reference patterns, compiled case-insensitive
    pub cross_reference_patterns: Vec<Regex>,
}

impl StandardProfile {
    /// Create a profile without any rules.
    pub fn new(standard: StandardType, organizational_pattern: impl Into<String>) -> Self {
        Self {
            standard,
            organizational_pattern: organizational_pattern.into(),
            key_identifiers: Vec::new(),
            header_rules: Vec::new(),
            cross_reference_patterns: Vec::new(),
        }
    }

    /// The empty fallback profile for unrecognised documents.
    pub fn unknown() -> Self {
        Self::new(StandardType::Unknown, "unknown")
    }

    /// Set the key identifiers.
    pub fn with_key_identifiers<I, S>(mut self, identifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.key_identifiers = identifiers.into_iter().map(Into::into).collect();
        self
    }

    /// Append a header rule.
    pub fn with_header_rule(mut self, pattern: &str, kind: PatternKind) -> Result<Self> {
        self.header_rules.push(HeaderRule {
            kind,
            pattern: Regex::new(pattern)?,
        });
        Ok(self)
    }

    /// Append a cross-reference pattern. Matching is case-insensitive.
    pub fn with_cross_reference(mut self, pattern: &str) -> Result<Self> {
        let regex = RegexBuilder::new(pattern).case_insensitive(true).build()?;
        self.cross_reference_patterns.push(regex);
        Ok(self)
    }

    /// Match a section title against the header rules. First rule wins.
    pub fn match_header(&self, title: &str) -> Option<(PatternKind, PatternMatch)> {
        self.header_rules.iter().find_map(|rule| {
            rule.pattern
                .captures(title)
                .map(|caps| (rule.kind, PatternMatch::from_captures(&caps)))
        })
    }

    /// Every cross-reference match in `text`, pattern by pattern.
    pub fn cross_reference_matches<'a>(
        &'a self,
        text: &'a str,
    ) -> impl Iterator<Item = PatternMatch> + 'a {
        self.cross_reference_patterns.iter().flat_map(move |re| {
            re.captures_iter(text)
                .map(|caps| PatternMatch::from_captures(&caps))
        })
    }

    fn pmbok() -> Result<Self> {
        Self::new(StandardType::Pmbok, "domain_based")
            .with_key_identifiers(["performance domain", "principle", "project delivery"])
            .with_header_rule(r"^(\d+\.?\d*)\s+(.+)$", PatternKind::NumberedSection)?
            .with_header_rule(r"^(Chapter\s+\d+)[\s:]?(.*)$", PatternKind::Chapter)?
            .with_header_rule(r"^(Appendix\s+[A-Z])[\s:]?(.*)$", PatternKind::Appendix)?
            .with_cross_reference(r"Section\s+(\d+\.?\d*)")?
            .with_cross_reference(r"Chapter\s+(\d+)")?
            .with_cross_reference(r"Appendix\s+([A-Z])")?
            .with_cross_reference(r"Figure\s+(\d+[.-]\d*)")?
            .with_cross_reference(r"Table\s+(\d+[.-]\d*)")
    }

    fn prince2() -> Result<Self> {
        Self::new(StandardType::Prince2, "process_theme_principle")
            .with_key_identifiers(["process", "theme", "principle", "technique"])
            .with_header_rule(r"^(\d+\.?\d*)\s+(.+)$", PatternKind::NumberedSection)?
            .with_header_rule(r"^([A-Z]\d+)[\s:]?(.*)$", PatternKind::ProcessCode)?
            .with_header_rule(r"^(Appendix\s+[A-Z])[\s:]?(.*)$", PatternKind::Appendix)?
            .with_cross_reference(r"Section\s+(\d+\.?\d*)")?
            .with_cross_reference(r"Process\s+([A-Z]\d+)")?
            .with_cross_reference(r"Theme\s+([A-Z]\d+)")?
            .with_cross_reference(r"Figure\s+(\d+[.-]\d*)")?
            .with_cross_reference(r"Table\s+(\d+[.-]\d*)")
    }

    fn iso() -> Result<Self> {
        Self::new(StandardType::Iso, "hierarchical_clauses")
            .with_key_identifiers(["clause", "normative", "informative"])
            .with_header_rule(r"^(\d+\.?\d*)\s+(.+)$", PatternKind::Clause)?
            .with_header_rule(r"^(Annex\s+[A-Z])[\s:]?(.*)$", PatternKind::Annex)?
            .with_header_rule(r"^(Bibliography)$", PatternKind::Bibliography)?
            .with_cross_reference(r"Clause\s+(\d+\.?\d*)")?
            .with_cross_reference(r"Annex\s+([A-Z])")?
            .with_cross_reference(r"Figure\s+(\d+)")?
            .with_cross_reference(r"Table\s+(\d+)")
    }
}

/// Immutable mapping from standard type to profile.
#[derive(Debug, Clone)]
pub struct ProfileRegistry {
    profiles: HashMap<StandardType, StandardProfile>,
    fallback: StandardProfile,
}

impl ProfileRegistry {
    /// Registry holding only the empty UNKNOWN profile.
    pub fn empty() -> Self {
        Self {
            profiles: HashMap::new(),
            fallback: StandardProfile::unknown(),
        }
    }

    /// Registry with the PMBOK, PRINCE2 and ISO profiles.
    pub fn builtin() -> Result<Self> {
        let mut registry = Self::empty();
        registry.register(StandardProfile::pmbok()?);
        registry.register(StandardProfile::prince2()?);
        registry.register(StandardProfile::iso()?);
        Ok(registry)
    }

    /// Register a profile, replacing any existing one for its standard.
    pub fn register(&mut self, profile: StandardProfile) {
        if profile.standard == StandardType::Unknown {
            self.fallback = profile;
        } else {
            self.profiles.insert(profile.standard, profile);
        }
    }

    /// Profile for a standard type. Unregistered types get the UNKNOWN profile.
    pub fn profile_for(&self, standard: StandardType) -> &StandardProfile {
        self.profiles.get(&standard).unwrap_or(&self.fallback)
    }

    /// Check whether a dedicated profile exists for the standard.
    pub fn contains(&self, standard: StandardType) -> bool {
        self.profiles.contains_key(&standard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_type_labels() {
        assert_eq!(StandardType::Prince2.as_str(), "PRINCE2");
        assert_eq!(StandardType::Iso.slug(), "iso");
        assert_eq!(StandardType::Unknown.to_string(), "UNKNOWN");
        assert_eq!(
            serde_json::to_string(&StandardType::Prince2).unwrap(),
            "\"PRINCE2\""
        );
    }

    #[test]
    fn test_builtin_profiles() {
        let registry = ProfileRegistry::builtin().unwrap();
        assert!(registry.contains(StandardType::Pmbok));
        assert_eq!(
            registry.profile_for(StandardType::Prince2).organizational_pattern,
            "process_theme_principle"
        );
        assert_eq!(
            registry.profile_for(StandardType::Iso).cross_reference_patterns.len(),
            4
        );
    }

    #[test]
    fn test_unknown_profile_is_empty() {
        let registry = ProfileRegistry::builtin().unwrap();
        let profile = registry.profile_for(StandardType::Unknown);
        assert_eq!(profile.standard, StandardType::Unknown);
        assert_eq!(profile.organizational_pattern, "unknown");
        assert!(profile.header_rules.is_empty());
        assert!(profile.cross_reference_patterns.is_empty());
    }

    #[test]
    fn test_every_standard_has_a_profile() {
        let registry = ProfileRegistry::builtin().unwrap();
        for standard in StandardType::ALL {
            let profile = registry.profile_for(standard);
            assert_eq!(profile.standard, standard);
            assert_eq!(
                profile.key_identifiers.is_empty(),
                standard == StandardType::Unknown
            );
        }
        assert_eq!(
            registry.profile_for(StandardType::Iso).key_identifiers,
            vec!["clause", "normative", "informative"]
        );
    }

    #[test]
    fn test_unregistered_standard_falls_back() {
        let registry = ProfileRegistry::empty();
        assert_eq!(
            registry.profile_for(StandardType::Pmbok).standard,
            StandardType::Unknown
        );
    }

    #[test]
    fn test_match_header_first_rule_wins() {
        let registry = ProfileRegistry::builtin().unwrap();
        let iso = registry.profile_for(StandardType::Iso);

        let (kind, m) = iso.match_header("4.2 Governance").unwrap();
        assert_eq!(kind, PatternKind::Clause);
        assert_eq!(m.primary, "4.2");
        assert_eq!(m.secondary.as_deref(), Some("Governance"));

        let (kind, m) = iso.match_header("Annex A: Processes").unwrap();
        assert_eq!(kind, PatternKind::Annex);
        assert_eq!(m.primary, "Annex A");

        let (kind, m) = iso.match_header("Bibliography").unwrap();
        assert_eq!(kind, PatternKind::Bibliography);
        assert_eq!(m.secondary, None);

        assert!(iso.match_header("Foreword").is_none());
    }

    #[test]
    fn test_cross_reference_matches_case_insensitive() {
        let registry = ProfileRegistry::builtin().unwrap();
        let pmbok = registry.profile_for(StandardType::Pmbok);
        let found: Vec<String> = pmbok
            .cross_reference_matches("see SECTION 2.3 and appendix X")
            .map(|m| m.primary)
            .collect();
        assert_eq!(found, vec!["2.3".to_string(), "X".to_string()]);
    }

    #[test]
    fn test_pattern_match_without_groups() {
        let re = Regex::new(r"Clause \d+").unwrap();
        let caps = re.captures("see Clause 7").unwrap();
        let m = PatternMatch::from_captures(&caps);
        assert_eq!(m.primary, "Clause 7");
        assert_eq!(m.secondary, None);
    }

    #[test]
    fn test_register_custom_profile() {
        let mut registry = ProfileRegistry::builtin().unwrap();
        let custom = StandardProfile::new(StandardType::Pmbok, "custom")
            .with_cross_reference(r"Domain\s+(\d+)")
            .unwrap();
        registry.register(custom);
        assert_eq!(
            registry.profile_for(StandardType::Pmbok).organizational_pattern,
            "custom"
        );
    }

    #[test]
    fn test_invalid_pattern_is_error() {
        let result =
            StandardProfile::new(StandardType::Iso, "x").with_header_rule("(", PatternKind::Clause);
        assert!(result.is_err());
    }
}
