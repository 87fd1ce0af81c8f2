//! Weighted-factor risk assessments for contracts, cases, and compliance.
//!
//! Each assessment is a list of [`RiskFactor`]s scored 0–100 with a declared
//! weight. The overall score is the weight-renormalised mean, so weights do
//! not have to sum to one.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use mizan_core::ids::{Clock, IdGenerator, SystemClock, TimestampIds};
use mizan_core::model::{ExtractionResult, FlagType, MainCategory, RiskLevel, Severity};

use crate::scoring::{factor_level, mean, weighted_mean};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskCategory {
    Legal,
    Financial,
    Procedural,
    Evidentiary,
    Temporal,
    Contractual,
    Regulatory,
    Operational,
}

impl RiskCategory {
    pub const ALL: [RiskCategory; 8] = [
        Self::Legal,
        Self::Financial,
        Self::Procedural,
        Self::Evidentiary,
        Self::Temporal,
        Self::Contractual,
        Self::Regulatory,
        Self::Operational,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Legal => "legal",
            Self::Financial => "financial",
            Self::Procedural => "procedural",
            Self::Evidentiary => "evidentiary",
            Self::Temporal => "temporal",
            Self::Contractual => "contractual",
            Self::Regulatory => "regulatory",
            Self::Operational => "operational",
        }
    }
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentKind {
    Contract,
    Case,
    Compliance,
}

impl AssessmentKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Contract => "Sözleşme",
            Self::Case => "Dava",
            Self::Compliance => "Uyum",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskFactor {
    pub name: String,
    pub category: RiskCategory,
    pub weight: f64,
    /// 0–100.
    pub score: f64,
    pub level: RiskLevel,
    pub description: String,
    pub mitigations: Vec<String>,
}

impl RiskFactor {
    /// Build a factor; the score is clamped to 0–100 and the level derived
    /// from it.
    pub fn new(
        name: impl Into<String>,
        category: RiskCategory,
        weight: f64,
        score: f64,
        description: impl Into<String>,
        mitigations: Vec<String>,
    ) -> Self {
        let score = score.clamp(0.0, 100.0);
        Self {
            name: name.into(),
            category,
            weight: weight.max(0.0),
            score,
            level: factor_level(score),
            description: description.into(),
            mitigations,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub score: f64,
    pub level: RiskLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub id: String,
    pub kind: AssessmentKind,
    pub overall_score: f64,
    pub overall_level: RiskLevel,
    /// Highest score first; equal scores keep their input order.
    pub factors: Vec<RiskFactor>,
    /// Every category, including those no factor touches (score 0).
    pub category_breakdown: BTreeMap<RiskCategory, CategoryScore>,
    pub summary: String,
    pub recommendations: Vec<String>,
    pub assessed_at: DateTime<Utc>,
}

/// Litigation inputs for [`RiskAssessor::assess_case`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaseProfile {
    /// 0–1.
    pub evidence_strength: f64,
    /// 0–1.
    pub precedent_support: f64,
    /// Negative once the limitation period has passed.
    pub days_until_limitation: Option<i64>,
    pub procedural_issues: u32,
    /// In TRY.
    pub claim_amount: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceStatus {
    Met,
    Partial,
    Unmet,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceRequirement {
    pub name: String,
    pub category: RiskCategory,
    pub weight: f64,
    pub status: ComplianceStatus,
    #[serde(default)]
    pub mitigation: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComplianceProfile {
    pub requirements: Vec<ComplianceRequirement>,
}

pub struct RiskAssessor {
    ids: Box<dyn IdGenerator>,
    clock: Box<dyn Clock>,
}

impl Default for RiskAssessor {
    fn default() -> Self {
        Self::new()
    }
}

impl RiskAssessor {
    pub fn new() -> Self {
        Self {
            ids: Box::new(TimestampIds::new()),
            clock: Box::new(SystemClock),
        }
    }

    pub fn with_ids(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Score a contract from its extraction result.
    pub fn assess_contract(&self, result: &ExtractionResult) -> RiskAssessment {
        let clause_flags: Vec<_> = result.clauses.iter().flat_map(|c| &c.risk_flags).collect();
        let count = |sev: Severity| {
            clause_flags
                .iter()
                .filter(|f| f.flag_type != FlagType::Ambiguous && f.severity == sev)
                .count() as f64
        };
        let ambiguous = clause_flags
            .iter()
            .filter(|f| f.flag_type == FlagType::Ambiguous)
            .count() as f64;
        let missing = result.summary.missing_clauses.len() as f64;

        let financial: Vec<_> = result
            .clauses
            .iter()
            .filter(|c| c.category == MainCategory::FinancialTerms)
            .collect();
        let mut exposure = if financial.is_empty() { 70.0 } else { 20.0 };
        if financial.iter().any(|c| !c.risk_flags.is_empty()) {
            exposure += 25.0;
        }

        let obligations: Vec<_> = result.clauses.iter().flat_map(|c| &c.obligations).collect();
        let conditional = if obligations.is_empty() {
            0.0
        } else {
            obligations.iter().filter(|o| o.is_conditional).count() as f64 * 100.0
                / obligations.len() as f64
        };

        let factors = vec![
            RiskFactor::new(
                "Eksik zorunlu maddeler",
                RiskCategory::Contractual,
                0.25,
                missing * 15.0,
                format!("{} zorunlu madde bulunamadı.", missing as usize),
                vec!["Eksik zorunlu maddeleri sözleşmeye ekleyin.".into()],
            ),
            RiskFactor::new(
                "Riskli hükümler",
                RiskCategory::Legal,
                0.30,
                count(Severity::Critical) * 40.0
                    + count(Severity::High) * 20.0
                    + count(Severity::Medium) * 8.0,
                format!(
                    "{} kritik, {} yüksek, {} orta seviye bulgu.",
                    count(Severity::Critical),
                    count(Severity::High),
                    count(Severity::Medium)
                ),
                vec![
                    "Kritik ve yüksek riskli hükümleri yeniden müzakere edin.".into(),
                    "Sözleşmeyi bir avukata inceletin.".into(),
                ],
            ),
            RiskFactor::new(
                "Belirsiz ifadeler",
                RiskCategory::Contractual,
                0.10,
                ambiguous * 25.0,
                format!("{} belirsiz ifade tespit edildi.", ambiguous as usize),
                vec!["Yoruma açık ifadeleri somut süre ve tutarlarla değiştirin.".into()],
            ),
            RiskFactor::new(
                "Mali yükümlülükler",
                RiskCategory::Financial,
                0.20,
                exposure,
                if financial.is_empty() {
                    "Ücret veya ödeme koşulları düzenlenmemiş.".to_string()
                } else {
                    format!("{} mali hüküm bulundu.", financial.len())
                },
                vec!["Ödeme tutarı, vadesi ve gecikme sonuçlarını açıkça yazın.".into()],
            ),
            RiskFactor::new(
                "Koşullu yükümlülükler",
                RiskCategory::Contractual,
                0.15,
                conditional,
                format!(
                    "{} yükümlülükten koşullu olanların oranı %{conditional:.0}.",
                    obligations.len()
                ),
                vec!["Koşulların ne zaman gerçekleşmiş sayılacağını tanımlayın.".into()],
            ),
        ];
        self.assemble(AssessmentKind::Contract, factors)
    }

    /// Score litigation risk for a case.
    pub fn assess_case(&self, profile: &CaseProfile) -> RiskAssessment {
        let evidence = profile.evidence_strength.clamp(0.0, 1.0);
        let precedent = profile.precedent_support.clamp(0.0, 1.0);
        let temporal = match profile.days_until_limitation {
            None => 30.0,
            Some(d) if d < 0 => 100.0,
            Some(d) if d < 30 => 80.0,
            Some(d) if d < 90 => 50.0,
            Some(_) => 10.0,
        };
        let financial = match profile.claim_amount {
            Some(a) if a > 1_000_000.0 => 70.0,
            Some(a) if a > 100_000.0 => 40.0,
            _ => 15.0,
        };

        let factors = vec![
            RiskFactor::new(
                "Delil durumu",
                RiskCategory::Evidentiary,
                0.30,
                (1.0 - evidence) * 100.0,
                format!("Delil gücü {:.0}%.", evidence * 100.0),
                vec![
                    "Eksik delilleri toplayın; tanık ve bilirkişi imkanlarını değerlendirin.".into(),
                ],
            ),
            RiskFactor::new(
                "Zamanaşımı",
                RiskCategory::Temporal,
                0.20,
                temporal,
                match profile.days_until_limitation {
                    None => "Zamanaşımı süresi bilinmiyor.".to_string(),
                    Some(d) if d < 0 => "Zamanaşımı süresi dolmuş.".to_string(),
                    Some(d) => format!("Zamanaşımına {d} gün kaldı."),
                },
                vec!["Zamanaşımını kesecek işlemleri gecikmeden yapın.".into()],
            ),
            RiskFactor::new(
                "İçtihat desteği",
                RiskCategory::Legal,
                0.25,
                (1.0 - precedent) * 100.0,
                format!("İçtihat desteği {:.0}%.", precedent * 100.0),
                vec!["Yargıtay ve bölge adliye kararlarını araştırın.".into()],
            ),
            RiskFactor::new(
                "Usul sorunları",
                RiskCategory::Procedural,
                0.15,
                profile.procedural_issues as f64 * 25.0,
                format!("{} usul sorunu.", profile.procedural_issues),
                vec!["Görev, yetki ve dava şartlarını yeniden kontrol edin.".into()],
            ),
            RiskFactor::new(
                "Dava değeri",
                RiskCategory::Financial,
                0.10,
                financial,
                match profile.claim_amount {
                    Some(a) => format!("Talep tutarı {a:.2} TL."),
                    None => "Talep tutarı belirtilmemiş.".to_string(),
                },
                vec!["Yargılama giderleri ve vekalet ücreti riskini hesaplayın.".into()],
            ),
        ];
        self.assemble(AssessmentKind::Case, factors)
    }

    /// Score regulatory compliance from a requirement checklist.
    pub fn assess_compliance(&self, profile: &ComplianceProfile) -> RiskAssessment {
        let factors = profile
            .requirements
            .iter()
            .map(|r| {
                let (score, description) = match r.status {
                    ComplianceStatus::Met => (0.0, "Karşılanıyor."),
                    ComplianceStatus::Partial => (50.0, "Kısmen karşılanıyor."),
                    ComplianceStatus::Unmet => (100.0, "Karşılanmıyor."),
                };
                RiskFactor::new(
                    &r.name,
                    r.category,
                    r.weight,
                    score,
                    description,
                    r.mitigation.iter().cloned().collect(),
                )
            })
            .collect();
        self.assemble(AssessmentKind::Compliance, factors)
    }

    /// Combine factors into an assessment.
    pub fn assemble(&self, kind: AssessmentKind, mut factors: Vec<RiskFactor>) -> RiskAssessment {
        let overall_score = weighted_mean(factors.iter().map(|f| (f.score, f.weight)));
        let overall_level = factor_level(overall_score);

        let category_breakdown = RiskCategory::ALL
            .into_iter()
            .map(|cat| {
                let score = mean(factors.iter().filter(|f| f.category == cat).map(|f| f.score));
                (
                    cat,
                    CategoryScore {
                        score,
                        level: factor_level(score),
                    },
                )
            })
            .collect();

        factors.sort_by(|a, b| b.score.total_cmp(&a.score));

        let mut seen = HashSet::new();
        let recommendations: Vec<String> = factors
            .iter()
            .filter(|f| f.level >= RiskLevel::Medium)
            .flat_map(|f| f.mitigations.iter())
            .filter(|m| seen.insert(m.as_str()))
            .cloned()
            .collect();

        let elevated = factors.iter().filter(|f| f.level >= RiskLevel::High).count();
        let summary = format!(
            "{} risk değerlendirmesi: genel puan {overall_score:.1}/100 ({overall_level}); {} faktör, {elevated} yüksek öncelikli.",
            kind.label(),
            factors.len(),
        );
        debug!(
            kind = kind.label(),
            score = overall_score,
            level = %overall_level,
            "risk assessment"
        );

        RiskAssessment {
            id: self.ids.next_id("assessment"),
            kind,
            overall_score,
            overall_level,
            factors,
            category_breakdown,
            summary,
            recommendations,
            assessed_at: self.clock.now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::Analyzer;
    use mizan_core::catalog::Catalog;
    use mizan_core::ids::{FixedClock, SequentialIds};

    fn assessor() -> RiskAssessor {
        let t = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        RiskAssessor::new()
            .with_ids(SequentialIds::new())
            .with_clock(FixedClock(t))
    }

    fn factor(cat: RiskCategory, weight: f64, score: f64, mitigation: &str) -> RiskFactor {
        RiskFactor::new("f", cat, weight, score, "", vec![mitigation.into()])
    }

    #[test]
    fn overall_is_renormalised_weighted_mean() {
        let a = assessor().assemble(
            AssessmentKind::Case,
            vec![
                factor(RiskCategory::Legal, 3.0, 80.0, "a"),
                factor(RiskCategory::Financial, 1.0, 0.0, "b"),
            ],
        );
        assert_eq!(a.overall_score, 60.0);
        assert_eq!(a.overall_level, RiskLevel::High);
    }

    #[test]
    fn zero_weights_give_zero() {
        let a = assessor().assemble(
            AssessmentKind::Case,
            vec![factor(RiskCategory::Legal, 0.0, 90.0, "a")],
        );
        assert_eq!(a.overall_score, 0.0);
        assert_eq!(a.overall_level, RiskLevel::Minimal);
    }

    #[test]
    fn breakdown_covers_every_category() {
        let a = assessor().assemble(
            AssessmentKind::Case,
            vec![
                factor(RiskCategory::Legal, 1.0, 40.0, "a"),
                factor(RiskCategory::Legal, 1.0, 60.0, "b"),
            ],
        );
        assert_eq!(a.category_breakdown.len(), RiskCategory::ALL.len());
        assert_eq!(a.category_breakdown[&RiskCategory::Legal].score, 50.0);
        assert_eq!(a.category_breakdown[&RiskCategory::Legal].level, RiskLevel::Medium);
        let absent = a.category_breakdown[&RiskCategory::Operational];
        assert_eq!(absent.score, 0.0);
        assert_eq!(absent.level, RiskLevel::Minimal);
    }

    #[test]
    fn factors_sorted_stably_and_recommendations_filtered() {
        let a = assessor().assemble(
            AssessmentKind::Compliance,
            vec![
                RiskFactor::new("first", RiskCategory::Legal, 1.0, 50.0, "", vec!["x".into()]),
                RiskFactor::new("low", RiskCategory::Legal, 1.0, 10.0, "", vec!["ignored".into()]),
                RiskFactor::new("second", RiskCategory::Legal, 1.0, 50.0, "", vec!["x".into()]),
                RiskFactor::new("top", RiskCategory::Legal, 1.0, 90.0, "", vec!["y".into()]),
            ],
        );
        let names: Vec<_> = a.factors.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["top", "first", "second", "low"]);
        assert_eq!(a.recommendations, vec!["y".to_string(), "x".to_string()]);
    }

    #[test]
    fn factor_scores_are_clamped() {
        let f = RiskFactor::new("f", RiskCategory::Legal, 1.0, 250.0, "", vec![]);
        assert_eq!(f.score, 100.0);
        assert_eq!(f.level, RiskLevel::Critical);
    }

    #[test]
    fn case_assessment() {
        let profile = CaseProfile {
            evidence_strength: 0.25,
            precedent_support: 0.5,
            days_until_limitation: Some(10),
            procedural_issues: 1,
            claim_amount: Some(2_000_000.0),
        };
        let a = assessor().assess_case(&profile);
        assert_eq!(a.kind, AssessmentKind::Case);
        assert_eq!(a.factors.len(), 5);
        assert_eq!(a.factors[0].category, RiskCategory::Temporal);
        assert_eq!(a.factors[1].category, RiskCategory::Evidentiary);
        // 0.3*75 + 0.2*80 + 0.25*50 + 0.15*25 + 0.1*70 = 61.75
        assert!((a.overall_score - 61.75).abs() < 1e-9);
        assert_eq!(a.overall_level, RiskLevel::High);
    }

    #[test]
    fn expired_limitation_is_critical() {
        let profile = CaseProfile {
            days_until_limitation: Some(-1),
            ..CaseProfile::default()
        };
        let a = assessor().assess_case(&profile);
        let temporal = a
            .factors
            .iter()
            .find(|f| f.category == RiskCategory::Temporal)
            .unwrap();
        assert_eq!(temporal.score, 100.0);
        assert_eq!(temporal.level, RiskLevel::Critical);
    }

    #[test]
    fn compliance_assessment() {
        let profile: ComplianceProfile = serde_json::from_str(
            r#"{"requirements": [
                {"name": "KVKK aydınlatma metni", "category": "regulatory", "weight": 2.0, "status": "unmet",
                 "mitigation": "Aydınlatma metnini yayımlayın."},
                {"name": "VERBİS kaydı", "category": "regulatory", "weight": 1.0, "status": "partial"},
                {"name": "İSG eğitimi", "category": "operational", "weight": 1.0, "status": "met"}
            ]}"#,
        )
        .unwrap();
        let a = assessor().assess_compliance(&profile);
        assert_eq!(a.overall_score, 62.5);
        assert_eq!(a.recommendations, vec!["Aydınlatma metnini yayımlayın.".to_string()]);
        assert_eq!(a.category_breakdown[&RiskCategory::Regulatory].score, 75.0);
    }

    #[test]
    fn empty_compliance_profile() {
        let a = assessor().assess_compliance(&ComplianceProfile::default());
        assert!(a.factors.is_empty());
        assert_eq!(a.overall_score, 0.0);
        assert_eq!(a.overall_level, RiskLevel::Minimal);
    }

    #[test]
    fn contract_assessment_from_extraction() {
        let catalog = Catalog::builtin().unwrap();
        let result = Analyzer::new(&catalog).analyze(
            "Taraflar arasında iş sözleşmesi akdedilmiştir.\n\nSınırsız sorumluluk kabul edilmiştir.",
            "is_sozlesmesi",
        );
        let a = assessor().assess_contract(&result);
        assert_eq!(a.kind, AssessmentKind::Contract);
        let legal = a
            .factors
            .iter()
            .find(|f| f.category == RiskCategory::Legal)
            .unwrap();
        assert_eq!(legal.score, 40.0);
        let financial = a
            .factors
            .iter()
            .find(|f| f.category == RiskCategory::Financial)
            .unwrap();
        assert_eq!(financial.score, 70.0);
        // 6 missing required clauses.
        assert_eq!(a.factors[0].name, "Eksik zorunlu maddeler");
        assert_eq!(a.factors[0].score, 90.0);
    }
}
