//! Pattern catalog: clause types, risk patterns, and required-clause checklists.
//!
//! The catalog is constructed once from a [`CatalogSpec`] (either the built-in
//! Turkish tables or a JSON document), validated, and then only read. Every
//! pipeline component takes it by reference; there is no global lookup.
//!
//! # Ordering contract
//!
//! Clause types keep the order they have in the [`CatalogSpec`]. Paragraph matching is a
//! single ordered scan that returns the first clause type whose rules match,
//! so an entry's position (its `priority`) decides ties. Reordering entries
//! changes analysis output.

mod builtin;

use std::collections::HashSet;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::CatalogError;
use crate::model::{FlagType, MainCategory, Severity};
use crate::text;

// ── Spec (deserialisable, unvalidated) ──

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogSpec {
    pub version: String,
    pub default_document_type: String,
    pub clause_types: Vec<ClauseTypeSpec>,
    pub risk_patterns: Vec<RiskPatternSpec>,
    pub document_types: Vec<DocumentTypeSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClauseTypeSpec {
    pub id: String,
    pub category: String,
    pub title: String,
    #[serde(default)]
    pub patterns: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub severity: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskPatternSpec {
    pub id: String,
    pub flag_type: String,
    pub severity: String,
    pub description: String,
    pub recommendation: String,
    #[serde(default)]
    pub patterns: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentTypeSpec {
    pub id: String,
    pub title: String,
    pub required: Vec<String>,
}

// ── Validated catalog ──

/// Text prepared for rule matching: its Turkish fold, computed once and
/// shared by every rule.
pub struct Haystack {
    pub folded: String,
}

impl Haystack {
    pub fn new(text: &str) -> Self {
        Self {
            folded: text::fold(text),
        }
    }
}

/// A single match rule. Both kinds run against the folded text: regexes are
/// written in Turkish lowercase, keywords are folded when compiled.
#[derive(Debug, Clone)]
pub enum MatchRule {
    Pattern(Regex),
    Keyword(String),
}

impl MatchRule {
    pub fn is_match(&self, haystack: &Haystack) -> bool {
        match self {
            Self::Pattern(re) => re.is_match(&haystack.folded),
            Self::Keyword(k) => haystack.folded.contains(k.as_str()),
        }
    }
}

/// Non-empty list of rules; matches if any rule matches.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<MatchRule>,
}

impl RuleSet {
    fn compile(
        entry: &str,
        patterns: &[String],
        keywords: &[String],
    ) -> Result<Self, CatalogError> {
        let mut rules = Vec::with_capacity(patterns.len() + keywords.len());
        for p in patterns {
            let re = Regex::new(p).map_err(|source| CatalogError::InvalidPattern {
                entry: entry.to_string(),
                pattern: p.clone(),
                source,
            })?;
            rules.push(MatchRule::Pattern(re));
        }
        for k in keywords {
            if k.trim().is_empty() {
                return Err(CatalogError::EmptyKeyword(entry.to_string()));
            }
            rules.push(MatchRule::Keyword(text::fold(k)));
        }
        Ok(Self { rules })
    }

    pub fn is_match(&self, haystack: &Haystack) -> bool {
        self.rules.iter().any(|r| r.is_match(haystack))
    }

    /// Patterns first, then keywords, each in declaration order.
    pub fn rules(&self) -> &[MatchRule] {
        &self.rules
    }

    pub(crate) fn len(&self) -> usize {
        self.rules.len()
    }
}

#[derive(Debug, Clone)]
pub struct ClauseTypeDefinition {
    pub id: String,
    pub category: MainCategory,
    pub title: String,
    pub rules: RuleSet,
    /// Set when the clause type is risky in itself.
    pub severity: Option<Severity>,
    /// Position in the catalog; lower wins.
    pub priority: usize,
}

#[derive(Debug, Clone)]
pub struct RiskPattern {
    pub id: String,
    pub flag_type: FlagType,
    pub severity: Severity,
    pub description: String,
    pub recommendation: String,
    pub rules: RuleSet,
}

#[derive(Debug, Clone)]
pub struct DocumentTypeDefinition {
    pub id: String,
    pub title: String,
    /// Required clause type ids, in checklist order.
    pub required: Vec<String>,
}

/// Counts for logging and the `catalog` CLI command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogSummary {
    pub version: String,
    pub clause_types: usize,
    pub risk_patterns: usize,
    pub document_types: usize,
    pub rules: usize,
}

#[derive(Debug, Clone)]
pub struct Catalog {
    version: String,
    clause_types: Vec<ClauseTypeDefinition>,
    risk_patterns: Vec<RiskPattern>,
    document_types: Vec<DocumentTypeDefinition>,
    default_document_type: String,
}

impl Catalog {
    /// The built-in Turkish contract catalog.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_spec(builtin::spec())
    }

    /// Parse and validate a catalog from JSON.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let spec: CatalogSpec = serde_json::from_str(json)?;
        Self::from_spec(spec)
    }

    /// Validate a spec and compile its rules. Any malformed entry is an error.
    pub fn from_spec(spec: CatalogSpec) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        let mut clause_types = Vec::with_capacity(spec.clause_types.len());
        for (priority, ct) in spec.clause_types.into_iter().enumerate() {
            if !seen.insert(ct.id.clone()) {
                return Err(CatalogError::DuplicateClauseType(ct.id));
            }
            let category =
                MainCategory::parse(&ct.category).ok_or_else(|| CatalogError::UnknownCategory {
                    clause_type: ct.id.clone(),
                    category: ct.category.clone(),
                })?;
            if ct.patterns.is_empty() && ct.keywords.is_empty() {
                return Err(CatalogError::EmptyRules(ct.id));
            }
            let severity = match &ct.severity {
                None => None,
                Some(s) => Some(Severity::parse(s).ok_or_else(|| {
                    CatalogError::UnknownSeverity {
                        entry: ct.id.clone(),
                        severity: s.clone(),
                    }
                })?),
            };
            let rules = RuleSet::compile(&ct.id, &ct.patterns, &ct.keywords)?;
            clause_types.push(ClauseTypeDefinition {
                id: ct.id,
                category,
                title: ct.title,
                rules,
                severity,
                priority,
            });
        }

        let mut seen = HashSet::new();
        let mut risk_patterns = Vec::with_capacity(spec.risk_patterns.len());
        for rp in spec.risk_patterns {
            if !seen.insert(rp.id.clone()) {
                return Err(CatalogError::DuplicateRiskPattern(rp.id));
            }
            let flag_type =
                FlagType::parse(&rp.flag_type).ok_or_else(|| CatalogError::UnknownFlagType {
                    entry: rp.id.clone(),
                    flag_type: rp.flag_type.clone(),
                })?;
            let severity =
                Severity::parse(&rp.severity).ok_or_else(|| CatalogError::UnknownSeverity {
                    entry: rp.id.clone(),
                    severity: rp.severity.clone(),
                })?;
            if rp.patterns.is_empty() && rp.keywords.is_empty() {
                return Err(CatalogError::EmptyRiskRules(rp.id));
            }
            let rules = RuleSet::compile(&rp.id, &rp.patterns, &rp.keywords)?;
            risk_patterns.push(RiskPattern {
                id: rp.id,
                flag_type,
                severity,
                description: rp.description,
                recommendation: rp.recommendation,
                rules,
            });
        }

        let mut seen = HashSet::new();
        let mut document_types = Vec::with_capacity(spec.document_types.len());
        for dt in spec.document_types {
            if !seen.insert(dt.id.clone()) {
                return Err(CatalogError::DuplicateDocumentType(dt.id));
            }
            if let Some(unknown) = dt
                .required
                .iter()
                .find(|r| !clause_types.iter().any(|ct| &ct.id == *r))
            {
                return Err(CatalogError::UnknownRequiredClause {
                    document_type: dt.id.clone(),
                    clause_type: unknown.clone(),
                });
            }
            document_types.push(DocumentTypeDefinition {
                id: dt.id,
                title: dt.title,
                required: dt.required,
            });
        }

        if !document_types
            .iter()
            .any(|d| d.id == spec.default_document_type)
        {
            return Err(CatalogError::UnknownDefaultDocumentType(
                spec.default_document_type,
            ));
        }

        let catalog = Self {
            version: spec.version,
            clause_types,
            risk_patterns,
            document_types,
            default_document_type: spec.default_document_type,
        };
        let s = catalog.summary();
        info!(
            version = %s.version,
            clause_types = s.clause_types,
            risk_patterns = s.risk_patterns,
            document_types = s.document_types,
            "loaded pattern catalog"
        );
        Ok(catalog)
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Clause types in priority order.
    pub fn clause_types(&self) -> &[ClauseTypeDefinition] {
        &self.clause_types
    }

    pub fn clause_type(&self, id: &str) -> Option<&ClauseTypeDefinition> {
        self.clause_types.iter().find(|ct| ct.id == id)
    }

    /// First clause type (in catalog order) whose rules match.
    pub fn first_match(&self, haystack: &Haystack) -> Option<&ClauseTypeDefinition> {
        self.clause_types.iter().find(|ct| ct.rules.is_match(haystack))
    }

    pub fn risk_patterns(&self) -> &[RiskPattern] {
        &self.risk_patterns
    }

    pub fn document_types(&self) -> &[DocumentTypeDefinition] {
        &self.document_types
    }

    pub fn default_document_type(&self) -> &DocumentTypeDefinition {
        // from_spec guarantees the default exists.
        self.document_types
            .iter()
            .find(|d| d.id == self.default_document_type)
            .unwrap_or(&self.document_types[0])
    }

    /// Look up a document type, falling back to the default for unknown ids.
    pub fn resolve_document_type(&self, id: &str) -> &DocumentTypeDefinition {
        self.document_types
            .iter()
            .find(|d| d.id == id)
            .unwrap_or_else(|| self.default_document_type())
    }

    /// Required clause types for a document type, in checklist order.
    pub fn required_clauses(&self, document_type: &str) -> Vec<&ClauseTypeDefinition> {
        self.resolve_document_type(document_type)
            .required
            .iter()
            .filter_map(|id| self.clause_type(id))
            .collect()
    }

    pub fn summary(&self) -> CatalogSummary {
        let rules = self.clause_types.iter().map(|c| c.rules.len()).sum::<usize>()
            + self.risk_patterns.iter().map(|r| r.rules.len()).sum::<usize>();
        CatalogSummary {
            version: self.version.clone(),
            clause_types: self.clause_types.len(),
            risk_patterns: self.risk_patterns.len(),
            document_types: self.document_types.len(),
            rules,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clause(id: &str, category: &str, keywords: &[&str]) -> ClauseTypeSpec {
        ClauseTypeSpec {
            id: id.into(),
            category: category.into(),
            title: id.to_uppercase(),
            patterns: vec![],
            keywords: keywords.iter().map(|s| s.to_string()).collect(),
            severity: None,
        }
    }

    fn minimal_spec() -> CatalogSpec {
        CatalogSpec {
            version: "test".into(),
            default_document_type: "genel".into(),
            clause_types: vec![
                clause("odeme", "financial_terms", &["ödeme"]),
                clause("fesih", "termination", &["fesih"]),
            ],
            risk_patterns: vec![RiskPatternSpec {
                id: "sinirsiz".into(),
                flag_type: "high_risk".into(),
                severity: "critical".into(),
                description: "d".into(),
                recommendation: "r".into(),
                patterns: vec![],
                keywords: vec!["sınırsız".into()],
            }],
            document_types: vec![DocumentTypeSpec {
                id: "genel".into(),
                title: "Genel".into(),
                required: vec!["odeme".into(), "fesih".into()],
            }],
        }
    }

    #[test]
    fn minimal_spec_loads() {
        let catalog = Catalog::from_spec(minimal_spec()).unwrap();
        let s = catalog.summary();
        assert_eq!(s.clause_types, 2);
        assert_eq!(s.risk_patterns, 1);
        assert_eq!(s.rules, 3);
        assert_eq!(catalog.clause_types()[1].priority, 1);
    }

    #[test]
    fn empty_rule_list_is_rejected() {
        let mut spec = minimal_spec();
        spec.clause_types.push(clause("bos", "general", &[]));
        let err = Catalog::from_spec(spec).unwrap_err();
        assert!(matches!(err, CatalogError::EmptyRules(id) if id == "bos"));
    }

    #[test]
    fn unknown_category_is_rejected() {
        let mut spec = minimal_spec();
        spec.clause_types.push(clause("x", "financial", &["x"]));
        let err = Catalog::from_spec(spec).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::UnknownCategory { category, .. } if category == "financial"
        ));
    }

    #[test]
    fn invalid_regex_is_rejected() {
        let mut spec = minimal_spec();
        spec.clause_types[0].patterns.push("(unclosed".into());
        let err = Catalog::from_spec(spec).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidPattern { .. }));
    }

    #[test]
    fn blank_keyword_is_rejected() {
        let mut spec = minimal_spec();
        spec.clause_types[0].keywords.push("  ".into());
        assert!(matches!(
            Catalog::from_spec(spec),
            Err(CatalogError::EmptyKeyword(_))
        ));
    }

    #[test]
    fn empty_risk_rules_rejected() {
        let mut spec = minimal_spec();
        spec.risk_patterns[0].keywords.clear();
        assert!(matches!(
            Catalog::from_spec(spec),
            Err(CatalogError::EmptyRiskRules(_))
        ));
    }

    #[test]
    fn unknown_flag_type_and_severity_rejected() {
        let mut spec = minimal_spec();
        spec.risk_patterns[0].flag_type = "scary".into();
        assert!(matches!(
            Catalog::from_spec(spec),
            Err(CatalogError::UnknownFlagType { .. })
        ));

        let mut spec = minimal_spec();
        spec.risk_patterns[0].severity = "extreme".into();
        assert!(matches!(
            Catalog::from_spec(spec),
            Err(CatalogError::UnknownSeverity { .. })
        ));
    }

    #[test]
    fn duplicates_rejected() {
        let mut spec = minimal_spec();
        spec.clause_types.push(clause("odeme", "financial_terms", &["bedel"]));
        assert!(matches!(
            Catalog::from_spec(spec),
            Err(CatalogError::DuplicateClauseType(_))
        ));
    }

    #[test]
    fn required_clause_must_exist() {
        let mut spec = minimal_spec();
        spec.document_types[0].required.push("hayalet".into());
        assert!(matches!(
            Catalog::from_spec(spec),
            Err(CatalogError::UnknownRequiredClause { clause_type, .. }) if clause_type == "hayalet"
        ));
    }

    #[test]
    fn default_document_type_must_exist() {
        let mut spec = minimal_spec();
        spec.default_document_type = "yok".into();
        assert!(matches!(
            Catalog::from_spec(spec),
            Err(CatalogError::UnknownDefaultDocumentType(_))
        ));
    }

    #[test]
    fn first_match_follows_catalog_order() {
        let catalog = Catalog::from_spec(minimal_spec()).unwrap();
        let haystack = Haystack::new("Fesih halinde ÖDEME derhal yapılır.");
        assert_eq!(catalog.first_match(&haystack).unwrap().id, "odeme");

        let mut spec = minimal_spec();
        spec.clause_types.reverse();
        let reversed = Catalog::from_spec(spec).unwrap();
        assert_eq!(reversed.first_match(&haystack).unwrap().id, "fesih");
    }

    #[test]
    fn pattern_rules_ignore_turkish_case() {
        let mut spec = minimal_spec();
        spec.clause_types[1].patterns.push(r"haftalık\s+\d+\s+saat".into());
        let catalog = Catalog::from_spec(spec).unwrap();
        let rules = catalog.clause_type("fesih").unwrap().rules.rules();
        assert!(matches!(rules[0], MatchRule::Pattern(_)));
        for text in ["haftalık 45 saat", "Haftalık 45 Saat", "HAFTALIK 45 SAAT"] {
            assert!(rules[0].is_match(&Haystack::new(text)), "{text}");
        }
        assert!(!rules[0].is_match(&Haystack::new("HAFTALİK 45 SAAT")));
    }

    #[test]
    fn no_match_returns_none() {
        let catalog = Catalog::from_spec(minimal_spec()).unwrap();
        assert!(catalog.first_match(&Haystack::new("Hava bugün güzel.")).is_none());
    }

    #[test]
    fn unknown_document_type_resolves_to_default() {
        let catalog = Catalog::from_spec(minimal_spec()).unwrap();
        assert_eq!(catalog.resolve_document_type("nope").id, "genel");
        let titles: Vec<_> = catalog
            .required_clauses("nope")
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(titles, vec!["odeme", "fesih"]);
    }

    #[test]
    fn json_roundtrip_of_spec() {
        let json = serde_json::to_string(&minimal_spec()).unwrap();
        let catalog = Catalog::from_json(&json).unwrap();
        assert_eq!(catalog.version(), "test");
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            Catalog::from_json("{ not json"),
            Err(CatalogError::Json(_))
        ));
    }
}
