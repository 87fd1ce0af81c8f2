//! Risk flag detection.
//!
//! Content risks come from the catalog's risk-pattern table and are tested
//! against each clause independently of its clause type. Structural risks
//! (required clauses that never showed up) are a set difference computed once
//! per document. The two sources share nothing but the [`RiskFlag`] shape.

use std::collections::HashSet;

use mizan_core::catalog::{Catalog, ClauseTypeDefinition, Haystack};
use mizan_core::model::{FlagType, RiskFlag, Severity};

pub struct RiskDetector<'c> {
    catalog: &'c Catalog,
}

/// Required clauses absent from a document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MissingClauses {
    /// Titles in checklist order.
    pub titles: Vec<String>,
    pub flags: Vec<RiskFlag>,
}

impl<'c> RiskDetector<'c> {
    pub fn new(catalog: &'c Catalog) -> Self {
        Self { catalog }
    }

    /// Flags for one clause: the clause type's inherent risk (if any), then
    /// one flag per matching risk pattern in catalog order.
    pub fn clause_flags(
        &self,
        clause_id: &str,
        clause_type: &ClauseTypeDefinition,
        haystack: &Haystack,
    ) -> Vec<RiskFlag> {
        let inherent = clause_type.severity.map(|severity| RiskFlag {
            flag_type: FlagType::HighRisk,
            severity,
            description: format!(
                "'{}' hükmü bulunuyor; kapsamı ve tutarı dikkatle incelenmeli.",
                clause_type.title
            ),
            recommendation: format!(
                "'{}' hükmünün ölçülü ve karşılıklı olduğundan emin olun.",
                clause_type.title
            ),
            clause_id: Some(clause_id.to_string()),
        });

        let patterns = self
            .catalog
            .risk_patterns()
            .iter()
            .filter(|rp| rp.rules.is_match(haystack))
            .map(|rp| RiskFlag {
                flag_type: rp.flag_type,
                severity: rp.severity,
                description: rp.description.clone(),
                recommendation: rp.recommendation.clone(),
                clause_id: Some(clause_id.to_string()),
            });

        inherent.into_iter().chain(patterns).collect()
    }

    /// One `missing` flag per required clause type not in `observed`.
    pub fn missing_clauses(
        &self,
        document_type: &str,
        observed: &HashSet<&str>,
    ) -> MissingClauses {
        let absent: Vec<&ClauseTypeDefinition> = self
            .catalog
            .required_clauses(document_type)
            .into_iter()
            .filter(|ct| !observed.contains(ct.id.as_str()))
            .collect();

        MissingClauses {
            titles: absent.iter().map(|ct| ct.title.clone()).collect(),
            flags: absent
                .iter()
                .map(|ct| RiskFlag {
                    flag_type: FlagType::Missing,
                    severity: Severity::Medium,
                    description: format!("Zorunlu '{}' maddesi bulunamadı.", ct.title),
                    recommendation: missing_remediation(&ct.title),
                    clause_id: None,
                })
                .collect(),
        }
    }
}

/// Remediation text for a missing clause title.
pub fn missing_remediation(title: &str) -> String {
    format!("'{title}' maddesi eklenmelidir.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn critical_flag_for_unlimited_liability() {
        let catalog = Catalog::builtin().unwrap();
        let detector = RiskDetector::new(&catalog);
        let ct = catalog.clause_type("sorumluluk").unwrap();
        let flags = detector.clause_flags(
            "clause-1",
            ct,
            &Haystack::new("Sınırsız sorumluluk kabul edilmiştir."),
        );
        assert_eq!(flags.len(), 1);
        assert_eq!(flags[0].severity, Severity::Critical);
        assert_eq!(flags[0].flag_type, FlagType::HighRisk);
        assert_eq!(flags[0].clause_id.as_deref(), Some("clause-1"));
    }

    #[test]
    fn multiple_patterns_accumulate() {
        let catalog = Catalog::builtin().unwrap();
        let detector = RiskDetector::new(&catalog);
        let ct = catalog.clause_type("fesih").unwrap();
        let flags = detector.clause_flags(
            "c",
            ct,
            &Haystack::new(
                "İşveren sözleşmeyi herhangi bir gerekçe göstermeksizin feshedebilir; bildirim makul süre içinde yapılır.",
            ),
        );
        let types: Vec<_> = flags.iter().map(|f| f.flag_type).collect();
        assert_eq!(types, vec![FlagType::HighRisk, FlagType::Ambiguous]);
    }

    #[test]
    fn inherent_severity_comes_first() {
        let catalog = Catalog::builtin().unwrap();
        let detector = RiskDetector::new(&catalog);
        let ct = catalog.clause_type("cezai_sart").unwrap();
        let flags = detector.clause_flags(
            "c",
            ct,
            &Haystack::new("Cezai şart olarak 12 aylık ücret tutarı ödenir."),
        );
        assert_eq!(flags.len(), 2);
        assert_eq!(flags[0].severity, Severity::Medium);
        assert!(flags[0].description.contains("Cezai Şart"));
        assert_eq!(flags[1].severity, Severity::High);
    }

    #[test]
    fn clean_clause_has_no_flags() {
        let catalog = Catalog::builtin().unwrap();
        let detector = RiskDetector::new(&catalog);
        let ct = catalog.clause_type("teslim").unwrap();
        assert!(
            detector
                .clause_flags("c", ct, &Haystack::new("Mal 10 gün içinde teslim edilir."))
                .is_empty()
        );
    }

    #[test]
    fn uppercase_clauses_keep_their_flags() {
        let catalog = Catalog::builtin().unwrap();
        let detector = RiskDetector::new(&catalog);
        let cases = [
            ("DENEME SÜRESİ 4 AY OLARAK BELİRLENMİŞTİR.", "deneme_suresi", 1),
            ("FAZLA ÇALIŞMA KARŞILIĞI ÜCRETE DAHİLDİR.", "fazla_calisma", 1),
            ("REKABET YASAĞI 5 YIL SÜREYLE GEÇERLİDİR.", "rekabet_yasagi", 2),
        ];
        for (text, clause_type, expected) in cases {
            let haystack = Haystack::new(text);
            let ct = catalog.first_match(&haystack).unwrap();
            assert_eq!(ct.id, clause_type, "{text}");
            let flags = detector.clause_flags("c", ct, &haystack);
            assert_eq!(flags.len(), expected, "{text}");
            assert!(flags.iter().any(|f| f.severity == Severity::High), "{text}");
        }
    }

    #[test]
    fn missing_is_a_set_difference() {
        let catalog = Catalog::builtin().unwrap();
        let detector = RiskDetector::new(&catalog);
        let observed: HashSet<&str> = ["taraf_tanimlama", "ucret_odeme", "fesih"].into();
        let missing = detector.missing_clauses("is_sozlesmesi", &observed);
        let expected: Vec<String> = catalog
            .required_clauses("is_sozlesmesi")
            .iter()
            .filter(|ct| !observed.contains(ct.id.as_str()))
            .map(|ct| ct.title.clone())
            .collect();
        assert_eq!(missing.titles, expected);
        assert_eq!(missing.flags.len(), expected.len());
        assert!(missing.flags.iter().all(|f| {
            f.flag_type == FlagType::Missing
                && f.severity == Severity::Medium
                && f.clause_id.is_none()
        }));
        assert!(missing.titles.contains(&"Uyuşmazlıkların Çözümü".to_string()));
    }

    #[test]
    fn nothing_missing_when_all_observed() {
        let catalog = Catalog::builtin().unwrap();
        let detector = RiskDetector::new(&catalog);
        let observed: HashSet<&str> = catalog
            .required_clauses("genel")
            .iter()
            .map(|ct| ct.id.as_str())
            .collect();
        assert_eq!(
            detector.missing_clauses("genel", &observed),
            MissingClauses::default()
        );
    }
}
