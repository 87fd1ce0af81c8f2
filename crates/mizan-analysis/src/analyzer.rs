//! Document analysis entry point: segment, extract, flag, score, summarise.

use std::collections::{BTreeMap, HashSet};

use tracing::{info, warn};

use mizan_core::catalog::{Catalog, Haystack};
use mizan_core::config::AnalyzerConfig;
use mizan_core::ids::{Clock, IdGenerator, SystemClock, TimestampIds};
use mizan_core::model::{ExtractedClause, ExtractionResult, ExtractionSummary, RiskFlag};
use mizan_core::text;

use crate::entities::EntityExtractor;
use crate::obligations::ObligationExtractor;
use crate::risk::{MissingClauses, RiskDetector, missing_remediation};
use crate::scoring::FlagTally;
use crate::segmenter::{self, ClauseMatch};

/// Runs the full extraction pipeline against a borrowed catalog.
///
/// The analyzer holds no per-document state; `analyze` can be called any
/// number of times and identical inputs produce identical results apart from
/// ids and timestamps.
pub struct Analyzer<'c> {
    catalog: &'c Catalog,
    config: AnalyzerConfig,
    entities: EntityExtractor,
    obligations: ObligationExtractor,
    ids: Box<dyn IdGenerator>,
    clock: Box<dyn Clock>,
}

impl<'c> Analyzer<'c> {
    /// Default config, timestamp ids, and the system clock.
    pub fn new(catalog: &'c Catalog) -> Self {
        Self {
            catalog,
            config: AnalyzerConfig::default(),
            entities: EntityExtractor::new(),
            obligations: ObligationExtractor::new(),
            ids: Box::new(TimestampIds::new()),
            clock: Box::new(SystemClock),
        }
    }

    pub fn with_config(mut self, config: AnalyzerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_ids(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Analyse `document` as an instance of `document_type`.
    ///
    /// Unknown document types fall back to the catalog default. Empty or
    /// whitespace-only input yields no clauses and no flags; the summary
    /// still lists every required clause as missing.
    pub fn analyze(&self, document: &str, document_type: &str) -> ExtractionResult {
        let (document, truncated) =
            text::truncate_chars(document, self.config.max_document_chars);
        if truncated {
            warn!(
                max_chars = self.config.max_document_chars,
                "document exceeds size bound, truncated"
            );
        }

        let doc_type = self.catalog.resolve_document_type(document_type);
        let detector = RiskDetector::new(self.catalog);

        if document.trim().is_empty() {
            let missing = detector.missing_clauses(&doc_type.id, &HashSet::new());
            return self.finish(
                doc_type.id.clone(),
                truncated,
                Vec::new(),
                MissingClauses {
                    titles: missing.titles,
                    flags: Vec::new(),
                },
            );
        }

        let mut clauses: Vec<ExtractedClause> = segmenter::match_paragraphs(self.catalog, document)
            .into_iter()
            .map(|m| self.build_clause(&detector, m))
            .collect();

        let related = segmenter::related_clauses(&clauses);
        for (clause, rel) in clauses.iter_mut().zip(related) {
            clause.related_clauses = rel;
        }

        let observed: HashSet<&str> = clauses.iter().map(|c| c.clause_type.as_str()).collect();
        let missing = detector.missing_clauses(&doc_type.id, &observed);

        self.finish(doc_type.id.clone(), truncated, clauses, missing)
    }

    fn build_clause(&self, detector: &RiskDetector<'_>, m: ClauseMatch<'_, '_>) -> ExtractedClause {
        let id = self.ids.next_id("clause");
        let content = m.paragraph.text;
        let haystack = Haystack::new(content);
        ExtractedClause {
            risk_flags: detector.clause_flags(&id, m.clause_type, &haystack),
            entities: self.entities.extract(content, m.paragraph.span.start),
            obligations: self.obligations.obligations(content),
            rights: self.obligations.rights(content),
            clause_type: m.clause_type.id.clone(),
            category: m.clause_type.category,
            title: m.clause_type.title.clone(),
            content: content.to_string(),
            span: m.paragraph.span,
            confidence: self.config.match_confidence,
            related_clauses: Vec::new(),
            id,
        }
    }

    fn finish(
        &self,
        document_type: String,
        truncated: bool,
        clauses: Vec<ExtractedClause>,
        missing: MissingClauses,
    ) -> ExtractionResult {
        let summary = summarize(&clauses, &missing.flags, missing.titles);
        info!(
            document_type = %document_type,
            clauses = summary.total_clauses,
            flags = summary.total_flags,
            risk_score = summary.risk_score,
            risk_level = %summary.risk_level,
            "analysed document"
        );
        ExtractionResult {
            id: self.ids.next_id("analysis"),
            document_type,
            catalog_version: self.catalog.version().to_string(),
            analyzed_at: self.clock.now(),
            truncated,
            clauses,
            document_flags: missing.flags,
            summary,
        }
    }
}

/// Aggregate clause and document flags into a summary. Pure.
pub fn summarize(
    clauses: &[ExtractedClause],
    document_flags: &[RiskFlag],
    missing_clauses: Vec<String>,
) -> ExtractionSummary {
    let all_flags = || {
        clauses
            .iter()
            .flat_map(|c| c.risk_flags.iter())
            .chain(document_flags.iter())
    };

    let mut by_category = BTreeMap::new();
    for c in clauses {
        *by_category.entry(c.category).or_insert(0) += 1;
    }

    let tally = FlagTally::from_flags(all_flags());
    // Empty input has titles but no flags; remediation comes from the titles.
    let remediation: Vec<String> = missing_clauses
        .iter()
        .map(|title| missing_remediation(title))
        .collect();
    let recommendations = dedup(
        all_flags()
            .map(|f| f.recommendation.as_str())
            .chain(remediation.iter().map(String::as_str)),
    );

    ExtractionSummary {
        total_clauses: clauses.len(),
        total_entities: clauses.iter().map(|c| c.entities.len()).sum(),
        total_obligations: clauses.iter().map(|c| c.obligations.len()).sum(),
        total_rights: clauses.iter().map(|c| c.rights.len()).sum(),
        total_flags: all_flags().count(),
        by_category,
        risk_score: tally.score(),
        risk_level: tally.level(),
        missing_clauses,
        recommendations,
    }
}

/// First occurrence of each string, in order.
fn dedup<'a>(items: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .filter(|s| seen.insert(*s))
        .map(str::to_string)
        .collect()
}
