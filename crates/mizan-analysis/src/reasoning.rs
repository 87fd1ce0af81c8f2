//! Explainable reasoning: a fixed four-step trace over caller-supplied
//! evidence, with a decomposed confidence score.
//!
//! This is bookkeeping over evidence metadata, not legal inference. Steps
//! group the evidence by source type; confidence is computed from relevance,
//! source type, verification, and the uncertainty and counter-argument
//! penalties.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use mizan_core::ids::{Clock, IdGenerator, SystemClock, TimestampIds};

use crate::scoring::mean;

/// Confidence assigned to a step that has no usable evidence.
pub const DEFAULT_STEP_CONFIDENCE: f64 = 0.3;

const W_QUALITY: f64 = 0.30;
const W_QUANTITY: f64 = 0.15;
const W_SOURCE: f64 = 0.25;
const W_COHERENCE: f64 = 0.20;
const W_PRECEDENT: f64 = 0.10;

const PENALTY_HIGH_UNCERTAINTY: f64 = 0.15;
const PENALTY_MEDIUM_UNCERTAINTY: f64 = 0.05;
const PENALTY_STRONG_COUNTER: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceType {
    Statute,
    Regulation,
    CaseLaw,
    Doctrine,
    Custom,
    Comparative,
    ExpertOpinion,
}

impl EvidenceType {
    /// Fixed reliability of the source type, 0–1.
    pub fn reliability(&self) -> f64 {
        match self {
            Self::Statute => 1.0,
            Self::Regulation => 0.9,
            Self::CaseLaw => 0.85,
            Self::Doctrine => 0.7,
            Self::ExpertOpinion => 0.6,
            Self::Comparative => 0.5,
            Self::Custom => 0.5,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Statute => "statute",
            Self::Regulation => "regulation",
            Self::CaseLaw => "case_law",
            Self::Doctrine => "doctrine",
            Self::Custom => "custom",
            Self::Comparative => "comparative",
            Self::ExpertOpinion => "expert_opinion",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReliabilityLevel {
    High,
    Medium,
    Low,
}

impl ReliabilityLevel {
    pub fn weight(&self) -> f64 {
        match self {
            Self::High => 1.0,
            Self::Medium => 0.7,
            Self::Low => 0.4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evidence {
    pub evidence_type: EvidenceType,
    /// Citation, e.g. `TBK m.344` or `Yargıtay 3. HD 2021/1234`.
    pub source: String,
    #[serde(default)]
    pub content: String,
    /// 0–1.
    pub relevance: f64,
    pub reliability: ReliabilityLevel,
    #[serde(default)]
    pub verified: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasoningType {
    Deductive,
    Inductive,
    Analogical,
    Teleological,
    Systematic,
}

impl ReasoningType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Deductive => "deductive",
            Self::Inductive => "inductive",
            Self::Analogical => "analogical",
            Self::Teleological => "teleological",
            Self::Systematic => "systematic",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReasoningStep {
    /// 1-based.
    pub order: usize,
    pub reasoning_type: ReasoningType,
    pub premise: String,
    pub inference: String,
    pub conclusion: String,
    pub evidence: Vec<Evidence>,
    pub confidence: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Impact {
    High,
    Medium,
    Low,
}

impl Impact {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UncertaintyFactor {
    pub description: String,
    pub impact: Impact,
}

impl UncertaintyFactor {
    fn new(description: &str, impact: Impact) -> Self {
        Self {
            description: description.to_string(),
            impact,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArgumentStrength {
    Strong,
    Moderate,
    Weak,
}

impl ArgumentStrength {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Strong => "strong",
            Self::Moderate => "moderate",
            Self::Weak => "weak",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CounterArgument {
    pub argument: String,
    pub strength: ArgumentStrength,
    #[serde(default)]
    pub rebuttal: Option<String>,
}

/// Everything the caller knows about the question.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReasoningContext {
    pub question: String,
    pub legal_area: String,
    pub jurisdiction: String,
    pub key_facts: Vec<String>,
    pub evidence: Vec<Evidence>,
    pub counter_arguments: Vec<CounterArgument>,
    pub known_uncertainties: Vec<UncertaintyFactor>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceLevel {
    VeryLow,
    Low,
    Medium,
    High,
    VeryHigh,
}

impl ConfidenceLevel {
    pub fn from_score(score: f64) -> Self {
        if score >= 0.9 {
            Self::VeryHigh
        } else if score >= 0.75 {
            Self::High
        } else if score >= 0.5 {
            Self::Medium
        } else if score >= 0.25 {
            Self::Low
        } else {
            Self::VeryLow
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::VeryLow => "very_low",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::VeryHigh => "very_high",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::VeryLow => "çok düşük",
            Self::Low => "düşük",
            Self::Medium => "orta",
            Self::High => "yüksek",
            Self::VeryHigh => "çok yüksek",
        }
    }
}

/// The five weighted components, the penalties, and the clamped result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceBreakdown {
    pub evidence_quality: f64,
    pub evidence_quantity: f64,
    pub source_reliability: f64,
    pub reasoning_coherence: f64,
    pub precedent_alignment: f64,
    pub uncertainty_penalty: f64,
    pub counter_argument_penalty: f64,
    /// 0–1.
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplainableResult {
    pub id: String,
    pub question: String,
    pub conclusion: String,
    pub steps: Vec<ReasoningStep>,
    pub uncertainties: Vec<UncertaintyFactor>,
    pub counter_arguments: Vec<CounterArgument>,
    pub confidence: ConfidenceBreakdown,
    pub confidence_level: ConfidenceLevel,
    pub generated_at: DateTime<Utc>,
}

/// Reliability-weighted mean relevance; [`DEFAULT_STEP_CONFIDENCE`] when
/// there is nothing to weigh.
pub fn step_confidence(evidence: &[Evidence]) -> f64 {
    let (num, den) = evidence.iter().fold((0.0, 0.0), |(n, d), e| {
        let w = e.reliability.weight();
        (n + e.relevance.clamp(0.0, 1.0) * w, d + w)
    });
    if den > 0.0 {
        num / den
    } else {
        DEFAULT_STEP_CONFIDENCE
    }
}

/// Combine evidence, steps, uncertainties, and counter-arguments into a
/// confidence score in `0..=1`. Empty inputs contribute zero.
pub fn score_confidence(
    evidence: &[Evidence],
    steps: &[ReasoningStep],
    uncertainties: &[UncertaintyFactor],
    counter_arguments: &[CounterArgument],
) -> ConfidenceBreakdown {
    let n = evidence.len() as f64;
    let ratio = |pred: &dyn Fn(&Evidence) -> bool| {
        if evidence.is_empty() {
            0.0
        } else {
            evidence.iter().filter(|e| pred(e)).count() as f64 / n
        }
    };

    let evidence_quality = mean(
        evidence
            .iter()
            .map(|e| e.relevance.clamp(0.0, 1.0) * e.evidence_type.reliability()),
    );
    let evidence_quantity = (n / 5.0).min(1.0);
    let verified = ratio(&|e| e.verified);
    let authoritative =
        ratio(&|e| matches!(e.evidence_type, EvidenceType::Statute | EvidenceType::CaseLaw));
    let source_reliability = if evidence.is_empty() {
        0.0
    } else {
        (verified + authoritative) / 2.0
    };
    let reasoning_coherence = mean(steps.iter().map(|s| s.confidence));
    let case_law = evidence
        .iter()
        .filter(|e| e.evidence_type == EvidenceType::CaseLaw)
        .count() as f64;
    let precedent_alignment = (case_law / 2.0).min(1.0);

    let uncertainty_penalty = uncertainties
        .iter()
        .map(|u| match u.impact {
            Impact::High => PENALTY_HIGH_UNCERTAINTY,
            Impact::Medium => PENALTY_MEDIUM_UNCERTAINTY,
            Impact::Low => 0.0,
        })
        .sum::<f64>();
    let counter_argument_penalty = counter_arguments
        .iter()
        .filter(|c| c.strength == ArgumentStrength::Strong)
        .count() as f64
        * PENALTY_STRONG_COUNTER;

    let base = W_QUALITY * evidence_quality
        + W_QUANTITY * evidence_quantity
        + W_SOURCE * source_reliability
        + W_COHERENCE * reasoning_coherence
        + W_PRECEDENT * precedent_alignment;

    ConfidenceBreakdown {
        evidence_quality,
        evidence_quantity,
        source_reliability,
        reasoning_coherence,
        precedent_alignment,
        uncertainty_penalty,
        counter_argument_penalty,
        score: (base - uncertainty_penalty - counter_argument_penalty).clamp(0.0, 1.0),
    }
}

/// Uncertainties implied by the shape of the context itself.
pub fn derive_uncertainties(ctx: &ReasoningContext) -> Vec<UncertaintyFactor> {
    let ev = &ctx.evidence;
    let has = |t: &[EvidenceType]| ev.iter().any(|e| t.contains(&e.evidence_type));
    let mut out = Vec::new();

    if ev.is_empty() {
        out.push(UncertaintyFactor::new("Hiç delil sunulmadı.", Impact::High));
    }
    if ctx.key_facts.is_empty() {
        out.push(UncertaintyFactor::new("Somut olay bilgisi eksik.", Impact::High));
    }
    if !has(&[EvidenceType::Statute, EvidenceType::Regulation]) {
        out.push(UncertaintyFactor::new(
            "Uygulanacak mevzuat hükmü belirtilmedi.",
            Impact::Medium,
        ));
    }
    if !has(&[EvidenceType::CaseLaw]) {
        out.push(UncertaintyFactor::new(
            "Destekleyici yargı kararı bulunmuyor.",
            Impact::Medium,
        ));
    }
    if !ev.is_empty() {
        let unverified = ev.iter().filter(|e| !e.verified).count();
        if unverified * 2 > ev.len() {
            out.push(UncertaintyFactor::new(
                "Delillerin çoğu doğrulanmamış.",
                Impact::Medium,
            ));
        }
        if mean(ev.iter().map(|e| e.relevance)) < 0.4 {
            out.push(UncertaintyFactor::new(
                "Delillerin konuyla ilgisi zayıf.",
                Impact::Low,
            ));
        }
    }
    out
}

pub struct ExplainableReasoner {
    ids: Box<dyn IdGenerator>,
    clock: Box<dyn Clock>,
}

impl Default for ExplainableReasoner {
    fn default() -> Self {
        Self::new()
    }
}

impl ExplainableReasoner {
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

    /// Build the reasoning trace and score it.
    pub fn explain(&self, ctx: &ReasoningContext) -> ExplainableResult {
        let steps = build_steps(ctx);

        let mut uncertainties = derive_uncertainties(ctx);
        uncertainties.extend(ctx.known_uncertainties.iter().cloned());

        let confidence = score_confidence(
            &ctx.evidence,
            &steps,
            &uncertainties,
            &ctx.counter_arguments,
        );
        let confidence_level = ConfidenceLevel::from_score(confidence.score);
        debug!(
            score = confidence.score,
            level = confidence_level.as_str(),
            steps = steps.len(),
            "explainable reasoning"
        );

        let conclusion = format!(
            "{} delil ve {} olgu ışığında, \"{}\" sorusuna ilişkin değerlendirme {} güven düzeyindedir.",
            ctx.evidence.len(),
            ctx.key_facts.len(),
            ctx.question,
            confidence_level.label()
        );

        ExplainableResult {
            id: self.ids.next_id("reasoning"),
            question: ctx.question.clone(),
            conclusion,
            steps,
            uncertainties,
            counter_arguments: ctx.counter_arguments.clone(),
            confidence,
            confidence_level,
            generated_at: self.clock.now(),
        }
    }
}

fn sources(evidence: &[Evidence]) -> String {
    evidence
        .iter()
        .map(|e| e.source.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn of_types(ctx: &ReasoningContext, types: &[EvidenceType]) -> Vec<Evidence> {
    ctx.evidence
        .iter()
        .filter(|e| types.contains(&e.evidence_type))
        .cloned()
        .collect()
}

fn step(
    order: usize,
    reasoning_type: ReasoningType,
    premise: String,
    inference: String,
    conclusion: String,
    evidence: Vec<Evidence>,
) -> ReasoningStep {
    ReasoningStep {
        order,
        reasoning_type,
        premise,
        inference,
        conclusion,
        confidence: step_confidence(&evidence),
        evidence,
    }
}

fn build_steps(ctx: &ReasoningContext) -> Vec<ReasoningStep> {
    let area = if ctx.legal_area.is_empty() {
        "ilgili hukuk"
    } else {
        ctx.legal_area.as_str()
    };

    let legislation = of_types(ctx, &[EvidenceType::Statute, EvidenceType::Regulation]);
    let case_law = of_types(ctx, &[EvidenceType::CaseLaw]);
    let secondary = of_types(
        ctx,
        &[
            EvidenceType::Doctrine,
            EvidenceType::ExpertOpinion,
            EvidenceType::Comparative,
            EvidenceType::Custom,
        ],
    );

    let legislation_step = step(
        1,
        ReasoningType::Deductive,
        if legislation.is_empty() {
            "Doğrudan uygulanabilir mevzuat hükmü sunulmadı.".to_string()
        } else {
            format!("Uygulanacak mevzuat: {}.", sources(&legislation))
        },
        format!("Olay, {area} alanındaki yasal düzenlemeler çerçevesinde değerlendirilir."),
        if legislation.is_empty() {
            "Mevzuat dayanağı belirsiz kalmaktadır.".to_string()
        } else {
            "Yasal çerçeve belirlenmiştir.".to_string()
        },
        legislation,
    );

    let case_law_step = step(
        2,
        ReasoningType::Analogical,
        if case_law.is_empty() {
            "Emsal karar sunulmadı.".to_string()
        } else {
            format!("İlgili yargı kararları: {}.", sources(&case_law))
        },
        "Benzer uyuşmazlıklarda verilen kararlar kıyas yoluyla olaya uygulanır.".to_string(),
        if case_law.is_empty() {
            "İçtihat desteği bulunmamaktadır.".to_string()
        } else {
            format!("{} emsal karar yorumu desteklemektedir.", case_law.len())
        },
        case_law,
    );

    let secondary_step = step(
        3,
        ReasoningType::Systematic,
        if secondary.is_empty() {
            "Doktrin veya uzman görüşü sunulmadı.".to_string()
        } else {
            format!("Yardımcı kaynaklar: {}.", sources(&secondary))
        },
        "Hükümler, hukuk sistemi içindeki yerleri ve öğretideki yorumlarıyla birlikte okunur."
            .to_string(),
        if secondary.is_empty() {
            "Yardımcı kaynaklarla teyit yapılamamıştır.".to_string()
        } else {
            "Öğreti ve uzman görüşleri yorumu desteklemektedir.".to_string()
        },
        secondary,
    );

    let facts = if ctx.key_facts.is_empty() {
        "Somut olay bilgisi sunulmadı.".to_string()
    } else {
        format!("Olgular: {}.", ctx.key_facts.join("; "))
    };
    let conclusion_step = step(
        4,
        ReasoningType::Teleological,
        facts,
        "Mevzuat, içtihat ve öğreti birlikte normun amacı doğrultusunda olaya uygulanır."
            .to_string(),
        if ctx.jurisdiction.is_empty() {
            "Değerlendirme sunulan kaynaklarla sınırlıdır.".to_string()
        } else {
            format!(
                "Değerlendirme {} hukuku ve sunulan kaynaklarla sınırlıdır.",
                ctx.jurisdiction
            )
        },
        ctx.evidence.clone(),
    );

    vec![legislation_step, case_law_step, secondary_step, conclusion_step]
}

#[cfg(test)]
mod tests {
    use super::*;
    use mizan_core::ids::{FixedClock, SequentialIds};

    fn ev(
        t: EvidenceType,
        relevance: f64,
        reliability: ReliabilityLevel,
        verified: bool,
    ) -> Evidence {
        Evidence {
            evidence_type: t,
            source: format!("{}-kaynak", t.as_str()),
            content: String::new(),
            relevance,
            reliability,
            verified,
        }
    }

    fn reasoner() -> ExplainableReasoner {
        let t = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        ExplainableReasoner::new()
            .with_ids(SequentialIds::new())
            .with_clock(FixedClock(t))
    }

    fn strong_context() -> ReasoningContext {
        ReasoningContext {
            question: "Kiracı tahliye edilebilir mi?".into(),
            legal_area: "kira hukuku".into(),
            jurisdiction: "Türk".into(),
            key_facts: vec!["Kira bedeli üç aydır ödenmiyor.".into()],
            evidence: vec![
                ev(EvidenceType::Statute, 1.0, ReliabilityLevel::High, true),
                ev(EvidenceType::Statute, 1.0, ReliabilityLevel::High, true),
                ev(EvidenceType::CaseLaw, 0.9, ReliabilityLevel::High, true),
                ev(EvidenceType::CaseLaw, 0.9, ReliabilityLevel::High, true),
                ev(EvidenceType::Doctrine, 0.8, ReliabilityLevel::Medium, true),
            ],
            ..ReasoningContext::default()
        }
    }

    #[test]
    fn step_confidence_is_reliability_weighted() {
        let evidence = [
            ev(EvidenceType::Statute, 0.8, ReliabilityLevel::High, true),
            ev(EvidenceType::Doctrine, 0.4, ReliabilityLevel::Low, true),
        ];
        let c = step_confidence(&evidence);
        assert!((c - 0.96 / 1.4).abs() < 1e-9);
        assert_eq!(step_confidence(&[]), DEFAULT_STEP_CONFIDENCE);
    }

    #[test]
    fn empty_inputs_score_zero_components() {
        let b = score_confidence(&[], &[], &[], &[]);
        assert_eq!(b.evidence_quality, 0.0);
        assert_eq!(b.evidence_quantity, 0.0);
        assert_eq!(b.source_reliability, 0.0);
        assert_eq!(b.reasoning_coherence, 0.0);
        assert_eq!(b.precedent_alignment, 0.0);
        assert_eq!(b.score, 0.0);
    }

    #[test]
    fn score_is_clamped_at_zero() {
        let uncertainties: Vec<_> = (0..5)
            .map(|_| UncertaintyFactor::new("x", Impact::High))
            .collect();
        let counters = vec![
            CounterArgument {
                argument: "a".into(),
                strength: ArgumentStrength::Strong,
                rebuttal: None,
            };
            3
        ];
        let b = score_confidence(&[], &[], &uncertainties, &counters);
        assert_eq!(b.score, 0.0);
        assert!((b.uncertainty_penalty - 0.75).abs() < 1e-9);
        assert!((b.counter_argument_penalty - 0.15).abs() < 1e-9);
    }

    #[test]
    fn empty_context_is_very_low() {
        let result = reasoner().explain(&ReasoningContext::default());
        assert_eq!(result.steps.len(), 4);
        assert!(
            result
                .steps
                .iter()
                .all(|s| s.confidence == DEFAULT_STEP_CONFIDENCE)
        );
        assert_eq!(result.confidence.score, 0.0);
        assert_eq!(result.confidence_level, ConfidenceLevel::VeryLow);
        let high = result
            .uncertainties
            .iter()
            .filter(|u| u.impact == Impact::High)
            .count();
        assert_eq!(high, 2);
    }

    #[test]
    fn well_supported_context_scores_high() {
        let result = reasoner().explain(&strong_context());
        assert!(result.uncertainties.is_empty());
        assert!(result.confidence.score > 0.85 && result.confidence.score <= 1.0);
        assert!(result.confidence_level >= ConfidenceLevel::High);
        assert_eq!(result.confidence.evidence_quantity, 1.0);
        assert_eq!(result.confidence.precedent_alignment, 1.0);
        let orders: Vec<_> = result.steps.iter().map(|s| s.order).collect();
        assert_eq!(orders, vec![1, 2, 3, 4]);
        assert_eq!(result.steps[0].evidence.len(), 2);
        assert_eq!(result.steps[1].reasoning_type, ReasoningType::Analogical);
        assert_eq!(result.steps[3].evidence.len(), 5);
    }

    #[test]
    fn strong_counter_argument_costs_five_points() {
        let base = reasoner().explain(&strong_context());
        let mut ctx = strong_context();
        ctx.counter_arguments.push(CounterArgument {
            argument: "Kiracı ödeme yaptığını iddia ediyor.".into(),
            strength: ArgumentStrength::Strong,
            rebuttal: Some("Banka kayıtları aksini gösteriyor.".into()),
        });
        ctx.counter_arguments.push(CounterArgument {
            argument: "Zayıf itiraz.".into(),
            strength: ArgumentStrength::Weak,
            rebuttal: None,
        });
        let countered = reasoner().explain(&ctx);
        assert!((base.confidence.score - countered.confidence.score - 0.05).abs() < 1e-9);
    }

    #[test]
    fn caller_uncertainties_are_merged() {
        let mut ctx = strong_context();
        ctx.known_uncertainties.push(UncertaintyFactor::new(
            "Tebligatın usulüne uygunluğu tartışmalı.",
            Impact::Medium,
        ));
        let result = reasoner().explain(&ctx);
        assert_eq!(result.uncertainties.len(), 1);
        assert!((result.confidence.uncertainty_penalty - 0.05).abs() < 1e-9);
    }

    #[test]
    fn derived_uncertainties_for_weak_evidence() {
        let ctx = ReasoningContext {
            key_facts: vec!["olgu".into()],
            evidence: vec![
                ev(EvidenceType::Doctrine, 0.2, ReliabilityLevel::Low, false),
                ev(EvidenceType::Custom, 0.3, ReliabilityLevel::Low, false),
            ],
            ..ReasoningContext::default()
        };
        let impacts: Vec<_> = derive_uncertainties(&ctx).iter().map(|u| u.impact).collect();
        assert_eq!(
            impacts,
            vec![Impact::Medium, Impact::Medium, Impact::Medium, Impact::Low]
        );
    }

    #[test]
    fn level_bands() {
        assert_eq!(ConfidenceLevel::from_score(0.9), ConfidenceLevel::VeryHigh);
        assert_eq!(ConfidenceLevel::from_score(0.75), ConfidenceLevel::High);
        assert_eq!(ConfidenceLevel::from_score(0.5), ConfidenceLevel::Medium);
        assert_eq!(ConfidenceLevel::from_score(0.25), ConfidenceLevel::Low);
        assert_eq!(ConfidenceLevel::from_score(0.249), ConfidenceLevel::VeryLow);
    }

    #[test]
    fn context_deserialises_with_defaults() {
        let ctx: ReasoningContext = serde_json::from_str(
            r#"{"question": "Fesih geçerli mi?",
                "evidence": [{"evidence_type": "case_law", "source": "Yargıtay 9. HD",
                              "relevance": 0.7, "reliability": "high"}]}"#,
        )
        .unwrap();
        assert_eq!(ctx.evidence[0].evidence_type, EvidenceType::CaseLaw);
        assert!(!ctx.evidence[0].verified);
        assert!(ctx.key_facts.is_empty());
    }
}
