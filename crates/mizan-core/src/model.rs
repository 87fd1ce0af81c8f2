//! Value types produced by the analysis pipeline.
//!
//! Everything here is plain, serialisable data. Nothing is mutated after the
//! analysis call that produced it returns.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── Categories and severities ──

/// Coarse grouping of clause types. Fixed enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MainCategory {
    PartyInfo,
    SubjectMatter,
    RightsObligations,
    FinancialTerms,
    TermDuration,
    Liability,
    Confidentiality,
    IntellectualProperty,
    Termination,
    DisputeResolution,
    General,
    Special,
}

impl MainCategory {
    pub const ALL: [MainCategory; 12] = [
        Self::PartyInfo,
        Self::SubjectMatter,
        Self::RightsObligations,
        Self::FinancialTerms,
        Self::TermDuration,
        Self::Liability,
        Self::Confidentiality,
        Self::IntellectualProperty,
        Self::Termination,
        Self::DisputeResolution,
        Self::General,
        Self::Special,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PartyInfo => "party_info",
            Self::SubjectMatter => "subject_matter",
            Self::RightsObligations => "rights_obligations",
            Self::FinancialTerms => "financial_terms",
            Self::TermDuration => "term_duration",
            Self::Liability => "liability",
            Self::Confidentiality => "confidentiality",
            Self::IntellectualProperty => "intellectual_property",
            Self::Termination => "termination",
            Self::DisputeResolution => "dispute_resolution",
            Self::General => "general",
            Self::Special => "special",
        }
    }

    /// Parse a catalog category identifier. `None` for unknown values.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }

    /// Turkish display label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::PartyInfo => "Taraf Bilgileri",
            Self::SubjectMatter => "Sözleşme Konusu",
            Self::RightsObligations => "Hak ve Yükümlülükler",
            Self::FinancialTerms => "Mali Hükümler",
            Self::TermDuration => "Süre ve Vade",
            Self::Liability => "Sorumluluk",
            Self::Confidentiality => "Gizlilik",
            Self::IntellectualProperty => "Fikri Mülkiyet",
            Self::Termination => "Fesih",
            Self::DisputeResolution => "Uyuşmazlık Çözümü",
            Self::General => "Genel Hükümler",
            Self::Special => "Özel Hükümler",
        }
    }
}

impl fmt::Display for MainCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Flag severity, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            "critical" => Some(Self::Critical),
            _ => None,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of issue a [`RiskFlag`] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlagType {
    HighRisk,
    Unusual,
    Missing,
    Conflict,
    Ambiguous,
}

impl FlagType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HighRisk => "high_risk",
            Self::Unusual => "unusual",
            Self::Missing => "missing",
            Self::Conflict => "conflict",
            Self::Ambiguous => "ambiguous",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "high_risk" => Some(Self::HighRisk),
            "unusual" => Some(Self::Unusual),
            "missing" => Some(Self::Missing),
            "conflict" => Some(Self::Conflict),
            "ambiguous" => Some(Self::Ambiguous),
            _ => None,
        }
    }
}

/// Discrete risk level.
///
/// Documents only ever band into `low..=critical`; `minimal` is used by the
/// weighted-factor assessments for factors and categories with no exposure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Minimal,
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Minimal => "minimal",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Spans and entities ──

/// Location of a paragraph in the source document.
///
/// Offsets count chars (not bytes) from the start of the document; `line` is
/// 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextSpan {
    pub start: usize,
    pub end: usize,
    pub line: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Amount,
    Percentage,
    Date,
    Duration,
    Party,
    Location,
    Reference,
}

impl EntityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Amount => "amount",
            Self::Percentage => "percentage",
            Self::Date => "date",
            Self::Duration => "duration",
            Self::Party => "party",
            Self::Location => "location",
            Self::Reference => "reference",
        }
    }
}

/// Normalised form of an entity's raw text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NormalizedValue {
    Text { value: String },
    Money { value: String, currency: String },
    Duration { count: String, unit: String },
}

impl NormalizedValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text {
            value: value.into(),
        }
    }
}

impl fmt::Display for NormalizedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text { value } => f.write_str(value),
            Self::Money { value, currency } => write!(f, "{value} {currency}"),
            Self::Duration { count, unit } => write!(f, "{count} {unit}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedEntity {
    pub entity_type: EntityType,
    pub raw: String,
    pub normalized: NormalizedValue,
    /// Char offset of the first char, relative to the document.
    pub start: usize,
    /// Char offset one past the last char, relative to the document.
    pub end: usize,
    pub confidence: f32,
}

// ── Obligations and rights ──

/// Phrasing family an obligation was detected through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObligationKind {
    Affirmative,
    Prohibition,
    Mandatory,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedObligation {
    pub kind: ObligationKind,
    pub obligor: String,
    pub obligee: String,
    pub action: String,
    pub condition: Option<String>,
    pub deadline: Option<String>,
    pub is_conditional: bool,
    pub is_periodic: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedRight {
    pub holder: String,
    pub right: String,
    pub is_exclusive: bool,
    pub is_transferable: bool,
    pub limitations: Option<String>,
}

// ── Flags and clauses ──

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskFlag {
    pub flag_type: FlagType,
    pub severity: Severity,
    pub description: String,
    pub recommendation: String,
    /// Owning clause; `None` for document-level flags such as missing clauses.
    pub clause_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedClause {
    pub id: String,
    pub clause_type: String,
    /// Always the catalog category of `clause_type`.
    pub category: MainCategory,
    pub title: String,
    pub content: String,
    pub span: TextSpan,
    pub confidence: f32,
    pub entities: Vec<ExtractedEntity>,
    pub obligations: Vec<ExtractedObligation>,
    pub rights: Vec<ExtractedRight>,
    pub risk_flags: Vec<RiskFlag>,
    pub related_clauses: Vec<String>,
}

// ── Document-level result ──

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionSummary {
    pub total_clauses: usize,
    pub total_entities: usize,
    pub total_obligations: usize,
    pub total_rights: usize,
    pub total_flags: usize,
    pub by_category: BTreeMap<MainCategory, usize>,
    /// 0–100.
    pub risk_score: u32,
    pub risk_level: RiskLevel,
    /// Titles of required clause types that were not observed.
    pub missing_clauses: Vec<String>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub id: String,
    /// Resolved document type (unknown inputs resolve to the catalog default).
    pub document_type: String,
    pub catalog_version: String,
    pub analyzed_at: DateTime<Utc>,
    /// Set when the input exceeded the configured size bound.
    pub truncated: bool,
    pub clauses: Vec<ExtractedClause>,
    /// Flags with no owning clause (missing required clauses).
    pub document_flags: Vec<RiskFlag>,
    pub summary: ExtractionSummary,
}

impl ExtractionResult {
    /// Every flag in the document: clause flags in clause order, then
    /// document-level flags.
    pub fn all_flags(&self) -> impl Iterator<Item = &RiskFlag> {
        self.clauses
            .iter()
            .flat_map(|c| c.risk_flags.iter())
            .chain(self.document_flags.iter())
    }

    pub fn clause(&self, id: &str) -> Option<&ExtractedClause> {
        self.clauses.iter().find(|c| c.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_parse_roundtrips_identifiers() {
        for c in MainCategory::ALL {
            assert_eq!(MainCategory::parse(c.as_str()), Some(c));
        }
        assert_eq!(MainCategory::parse("financial"), None);
    }

    #[test]
    fn severity_ordering() {
        assert!(Severity::Critical > Severity::High);
        assert!(Severity::High > Severity::Medium);
        assert!(Severity::Medium > Severity::Low);
    }

    #[test]
    fn flag_serialises_snake_case() {
        let flag = RiskFlag {
            flag_type: FlagType::HighRisk,
            severity: Severity::Critical,
            description: "Sınırsız sorumluluk".into(),
            recommendation: "Sorumluluğu sınırlayın".into(),
            clause_id: None,
        };
        let json = serde_json::to_string(&flag).unwrap();
        assert!(json.contains("\"high_risk\""));
        assert!(json.contains("\"critical\""));
        assert!(json.contains("\"clause_id\":null"));
    }

    #[test]
    fn duration_value_json_shape() {
        let v = NormalizedValue::Duration {
            count: "180".into(),
            unit: "gün".into(),
        };
        let json = serde_json::to_string(&v).unwrap();
        let parsed: NormalizedValue = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, v);
        assert!(json.contains("\"kind\":\"duration\""));
        assert_eq!(v.to_string(), "180 gün");
    }

    #[test]
    fn category_histogram_keys_serialise_as_strings() {
        let mut by_category = BTreeMap::new();
        by_category.insert(MainCategory::FinancialTerms, 2usize);
        let json = serde_json::to_string(&by_category).unwrap();
        assert_eq!(json, r#"{"financial_terms":2}"#);
    }
}
