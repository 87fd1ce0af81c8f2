//! Plain-text reports for analysis results.
//!
//! Renders results as grouped, human-readable cards with an aligned label
//! column. Rendering is read-only: nothing here recomputes or adjusts a
//! score.

use mizan_core::model::{ExtractedClause, ExtractionResult};

use crate::assessment::RiskAssessment;
use crate::reasoning::ExplainableResult;

const MAX_LIST_ITEMS: usize = 10;
const MAX_EXCERPT_CHARS: usize = 60;

/// Accumulates a report one section at a time.
#[derive(Default)]
struct Card {
    out: String,
}

impl Card {
    fn title(&mut self, title: &str) {
        self.out.push_str(&format!("=== {title} ===\n\n"));
    }

    fn section(&mut self, header: &str) {
        self.out.push_str(&format!("{header}\n"));
    }

    fn field(&mut self, label: &str, value: impl std::fmt::Display) {
        self.out.push_str(&format!("  {label:<26} {value}\n"));
    }

    fn line(&mut self, indent: usize, text: impl std::fmt::Display) {
        self.out
            .push_str(&format!("{:indent$}{text}\n", "", indent = indent));
    }

    /// Bulleted list capped at [`MAX_LIST_ITEMS`].
    fn list<'a>(&mut self, items: impl ExactSizeIterator<Item = &'a str>) {
        let len = items.len();
        for item in items.take(MAX_LIST_ITEMS) {
            self.line(4, format!("- {item}"));
        }
        if len > MAX_LIST_ITEMS {
            self.line(4, format!("... and {} more", len - MAX_LIST_ITEMS));
        }
    }

    fn blank(&mut self) {
        self.out.push('\n');
    }

    fn finish(self) -> String {
        self.out
    }
}

fn excerpt(text: &str) -> String {
    let flat: String = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() > MAX_EXCERPT_CHARS {
        let cut: String = flat.chars().take(MAX_EXCERPT_CHARS - 3).collect();
        format!("{cut}...")
    } else {
        flat
    }
}

fn render_clause(card: &mut Card, result: &ExtractionResult, clause: &ExtractedClause) {
    card.line(
        2,
        format!(
            "[{}] {} ({}, satır {})",
            clause.id,
            clause.title,
            clause.category.label(),
            clause.span.line
        ),
    );
    card.line(6, excerpt(&clause.content));
    if !clause.entities.is_empty() {
        let entities: Vec<String> = clause
            .entities
            .iter()
            .map(|e| format!("{}={}", e.entity_type.as_str(), e.normalized))
            .collect();
        card.line(6, format!("varlıklar: {}", entities.join(", ")));
    }
    for o in &clause.obligations {
        card.line(
            6,
            format!("yükümlülük: {} → {}: {}", o.obligor, o.obligee, excerpt(&o.action)),
        );
    }
    for r in &clause.rights {
        card.line(6, format!("hak: {}: {}", r.holder, excerpt(&r.right)));
    }
    for f in &clause.risk_flags {
        card.line(
            6,
            format!(
                "! {} [{}] {}",
                f.flag_type.as_str(),
                f.severity.as_str(),
                f.description
            ),
        );
    }
    if !clause.related_clauses.is_empty() {
        let related: Vec<String> = clause
            .related_clauses
            .iter()
            .map(|id| match result.clause(id) {
                Some(other) => format!("{id} ({})", other.title),
                None => id.clone(),
            })
            .collect();
        card.line(6, format!("ilgili: {}", related.join(", ")));
    }
}

pub fn render_extraction(result: &ExtractionResult) -> String {
    let s = &result.summary;
    let mut card = Card::default();
    card.title(&format!("Sözleşme Analizi {}", result.id));

    card.section("Belge");
    card.field("document_type", &result.document_type);
    card.field("catalog_version", &result.catalog_version);
    card.field("analyzed_at", result.analyzed_at.format("%Y-%m-%d %H:%M:%S UTC"));
    if result.truncated {
        card.field("truncated", "yes");
    }
    card.blank();

    card.section("Özet");
    card.field("risk_score", s.risk_score);
    card.field("risk_level", s.risk_level);
    card.field("clauses", s.total_clauses);
    card.field("entities", s.total_entities);
    card.field("obligations", s.total_obligations);
    card.field("rights", s.total_rights);
    card.field("flags", s.total_flags);
    for (category, count) in &s.by_category {
        card.field(category.label(), count);
    }
    card.blank();

    card.section(&format!("Maddeler ({})", result.clauses.len()));
    for clause in &result.clauses {
        render_clause(&mut card, result, clause);
    }
    card.blank();

    if !s.missing_clauses.is_empty() {
        card.section(&format!("Eksik Maddeler ({})", s.missing_clauses.len()));
        card.list(s.missing_clauses.iter().map(String::as_str));
        card.blank();
    }

    if !s.recommendations.is_empty() {
        card.section(&format!("Öneriler ({})", s.recommendations.len()));
        card.list(s.recommendations.iter().map(String::as_str));
        card.blank();
    }

    card.finish()
}

pub fn render_assessment(assessment: &RiskAssessment) -> String {
    let mut card = Card::default();
    card.title(&format!(
        "{} Risk Değerlendirmesi {}",
        assessment.kind.label(),
        assessment.id
    ));

    card.section("Genel");
    card.field("overall_score", format!("{:.1}", assessment.overall_score));
    card.field("overall_level", assessment.overall_level);
    card.field(
        "assessed_at",
        assessment.assessed_at.format("%Y-%m-%d %H:%M:%S UTC"),
    );
    card.line(2, &assessment.summary);
    card.blank();

    card.section(&format!("Faktörler ({})", assessment.factors.len()));
    for f in &assessment.factors {
        card.field(
            &f.name,
            format!("{:>5.1}  {:<9} {}", f.score, f.level.as_str(), f.category),
        );
        card.line(4, &f.description);
    }
    card.blank();

    card.section("Kategoriler");
    for (category, cs) in &assessment.category_breakdown {
        card.field(
            category.as_str(),
            format!("{:>5.1}  {}", cs.score, cs.level.as_str()),
        );
    }
    card.blank();

    if !assessment.recommendations.is_empty() {
        card.section(&format!("Öneriler ({})", assessment.recommendations.len()));
        card.list(assessment.recommendations.iter().map(String::as_str));
        card.blank();
    }

    card.finish()
}

pub fn render_explainable(result: &ExplainableResult) -> String {
    let c = &result.confidence;
    let mut card = Card::default();
    card.title(&format!("Gerekçeli Değerlendirme {}", result.id));

    card.section("Soru");
    card.line(2, &result.question);
    card.blank();

    card.section("Güven");
    card.field("score", format!("{:.2}", c.score));
    card.field("level", result.confidence_level.as_str());
    card.field("evidence_quality", format!("{:.2}", c.evidence_quality));
    card.field("evidence_quantity", format!("{:.2}", c.evidence_quantity));
    card.field("source_reliability", format!("{:.2}", c.source_reliability));
    card.field("reasoning_coherence", format!("{:.2}", c.reasoning_coherence));
    card.field("precedent_alignment", format!("{:.2}", c.precedent_alignment));
    card.field("uncertainty_penalty", format!("-{:.2}", c.uncertainty_penalty));
    card.field(
        "counter_argument_penalty",
        format!("-{:.2}", c.counter_argument_penalty),
    );
    card.blank();

    card.section(&format!("Adımlar ({})", result.steps.len()));
    for step in &result.steps {
        card.line(
            2,
            format!(
                "{}. {} (güven {:.2}, {} delil)",
                step.order,
                step.reasoning_type.as_str(),
                step.confidence,
                step.evidence.len()
            ),
        );
        card.line(6, format!("öncül: {}", step.premise));
        card.line(6, format!("çıkarım: {}", step.inference));
        card.line(6, format!("sonuç: {}", step.conclusion));
    }
    card.blank();

    if !result.uncertainties.is_empty() {
        card.section(&format!("Belirsizlikler ({})", result.uncertainties.len()));
        for u in &result.uncertainties {
            card.line(4, format!("- [{}] {}", u.impact.as_str(), u.description));
        }
        card.blank();
    }

    if !result.counter_arguments.is_empty() {
        card.section(&format!("Karşı Argümanlar ({})", result.counter_arguments.len()));
        for ca in &result.counter_arguments {
            card.line(4, format!("- [{}] {}", ca.strength.as_str(), ca.argument));
            if let Some(rebuttal) = &ca.rebuttal {
                card.line(8, format!("cevap: {rebuttal}"));
            }
        }
        card.blank();
    }

    card.section("Sonuç");
    card.line(2, &result.conclusion);

    card.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use mizan_core::catalog::Catalog;
    use mizan_core::ids::{FixedClock, SequentialIds};

    use crate::analyzer::Analyzer;
    use crate::assessment::RiskAssessor;
    use crate::reasoning::{
        ArgumentStrength, CounterArgument, ExplainableReasoner, ReasoningContext,
    };

    fn clock() -> FixedClock {
        FixedClock(DateTime::from_timestamp(1_700_000_000, 0).unwrap())
    }

    const DOC: &str = "Taraflar arasında iş sözleşmesi aşağıdaki şartlarla akdedilmiştir.\n\n\
        Fazla çalışma haftalık 45 saati aşan çalışmalardır.\n\n\
        Sınırsız sorumluluk kabul edilmiştir.";

    #[test]
    fn extraction_report_has_sections() {
        let catalog = Catalog::builtin().unwrap();
        let result = Analyzer::new(&catalog)
            .with_ids(SequentialIds::new())
            .with_clock(clock())
            .analyze(DOC, "is_sozlesmesi");
        let text = render_extraction(&result);
        assert!(text.starts_with("=== Sözleşme Analizi "));
        assert!(text.contains("Özet\n"));
        assert!(text.contains(&format!("  {:<26} {}", "risk_score", result.summary.risk_score)));
        assert!(text.contains("Eksik Maddeler"));
        assert!(text.contains("! high_risk [critical]"));
        assert!(text.contains("2023-11-14 22:13:20 UTC"));
    }

    #[test]
    fn related_clauses_show_titles() {
        let catalog = Catalog::builtin().unwrap();
        let doc = "Taraflardan her biri haklı nedenle sözleşmeyi feshedebilir.\n\n\
                   Sözleşmeye aykırılık halinde cezai şart olarak 50.000 TL ödenir; fesih hakkı saklıdır.";
        let result = Analyzer::new(&catalog)
            .with_ids(SequentialIds::new())
            .analyze(doc, "genel");
        let text = render_extraction(&result);
        let (fesih, cezai) = (&result.clauses[0], &result.clauses[1]);
        assert!(text.contains(&format!("ilgili: {} (Cezai Şart)", cezai.id)));
        assert!(text.contains(&format!("ilgili: {} (Fesih)", fesih.id)));
    }

    #[test]
    fn rendering_does_not_touch_scores() {
        let catalog = Catalog::builtin().unwrap();
        let result = Analyzer::new(&catalog)
            .with_ids(SequentialIds::new())
            .with_clock(clock())
            .analyze(DOC, "is_sozlesmesi");
        let before = result.clone();
        let _ = render_extraction(&result);
        assert_eq!(before, result);
    }

    #[test]
    fn assessment_report_lists_every_category() {
        let catalog = Catalog::builtin().unwrap();
        let result = Analyzer::new(&catalog).analyze(DOC, "is_sozlesmesi");
        let assessment = RiskAssessor::new()
            .with_ids(SequentialIds::new())
            .with_clock(clock())
            .assess_contract(&result);
        let text = render_assessment(&assessment);
        assert!(text.contains("Sözleşme Risk Değerlendirmesi"));
        for category in crate::assessment::RiskCategory::ALL {
            assert!(text.contains(&format!("  {:<26} ", category.as_str())));
        }
    }

    #[test]
    fn explainable_report_shows_steps_and_conclusion() {
        let result = ExplainableReasoner::new()
            .with_ids(SequentialIds::new())
            .with_clock(clock())
            .explain(&ReasoningContext {
                question: "Fesih geçerli mi?".into(),
                counter_arguments: vec![CounterArgument {
                    argument: "Bildirim süresine uyulmadı.".into(),
                    strength: ArgumentStrength::Strong,
                    rebuttal: None,
                }],
                ..ReasoningContext::default()
            });
        let text = render_explainable(&result);
        assert!(text.contains("Adımlar (4)"));
        assert!(text.contains("1. deductive (güven"));
        assert!(text.contains("Belirsizlikler"));
        assert!(text.contains("- [high] Hiç delil sunulmadı."));
        assert!(text.contains("- [strong] Bildirim süresine uyulmadı."));
        assert!(text.trim_end().ends_with(&result.conclusion));
    }

    #[test]
    fn long_lists_are_capped() {
        let mut card = Card::default();
        let items: Vec<String> = (0..13).map(|i| format!("öğe {i}")).collect();
        card.list(items.iter().map(String::as_str));
        let text = card.finish();
        assert_eq!(text.lines().count(), MAX_LIST_ITEMS + 1);
        assert!(text.ends_with("... and 3 more\n"));
    }

    #[test]
    fn excerpts_are_flattened_and_cut() {
        assert_eq!(excerpt("a\n  b"), "a b");
        let long = "ş".repeat(100);
        let cut = excerpt(&long);
        assert_eq!(cut.chars().count(), MAX_EXCERPT_CHARS);
        assert!(cut.ends_with("..."));
    }
}
