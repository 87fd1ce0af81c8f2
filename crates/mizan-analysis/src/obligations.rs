//! Obligation and right detection over a clause's sentences.
//!
//! Three phrasing families each contribute obligations independently: a
//! sentence that both commits (`yükümlüdür`) and forbids (`açıklayamaz`)
//! yields two obligations. Conditional and periodic markers are clause-level;
//! so are exclusivity and non-transferability markers for rights.

use regex::Regex;

use mizan_core::model::{ExtractedObligation, ExtractedRight, ObligationKind};
use mizan_core::text;

use crate::entities::{canonical_role, counterpart, party_alternation};

pub const UNSPECIFIED_PARTY: &str = "Belirtilmemiş";

const AFFIRMATIVE: &[&str] = &["yükümlüdür", "zorundadır", "borçludur", "taahhüt eder", "üstlenir"];

const PROHIBITION: &[&str] = &[
    "yasaktır",
    "yapamaz",
    "edemez",
    "veremez",
    "açıklayamaz",
    "devredemez",
    "kullanamaz",
];

const MANDATORY: &[&str] = &["zorunludur", "şarttır", "gerekir", "gerekmektedir", "mecburdur"];

const CONDITIONAL: &[&str] = &["halinde", "durumunda", "takdirde", "şartıyla", "koşuluyla", "eğer"];

const PERIODIC: &[&str] = &[
    "her ay",
    "aylık",
    "yıllık",
    "her yıl",
    "haftalık",
    "her hafta",
    "düzenli olarak",
    "periyodik",
];

const RIGHT: &[&str] = &[
    "hakkına sahiptir",
    "hakkı vardır",
    "hakkı saklıdır",
    "talep edebilir",
    "yetkilidir",
    "feshedebilir",
    "kullanabilir",
];

const EXCLUSIVE: &[&str] = &["münhasır", "tek başına", "yalnızca", "inhisari"];

const NON_TRANSFERABLE: &[&str] = &["devredilemez", "devredemez", "devir yasaktır"];

const LIMITATION: &[&str] = &["sınırlı", "kapsamında", "hariç"];

const FAMILIES: &[(ObligationKind, &[&str])] = &[
    (ObligationKind::Affirmative, AFFIRMATIVE),
    (ObligationKind::Prohibition, PROHIBITION),
    (ObligationKind::Mandatory, MANDATORY),
];

fn contains_any(folded: &str, markers: &[&str]) -> bool {
    markers.iter().any(|m| folded.contains(m))
}

const DEADLINE_UNITS: &[&str] = &["iş günü", "gün", "hafta", "ay", "yıl"];

const DEADLINE_ANCHORS: &[&str] = &["içinde", "içerisinde", "önce", "sonra"];

/// `30 gün içinde` or `en geç ...`, matched on the original text in any
/// Turkish casing.
fn deadline_pattern() -> String {
    let alternation = |words: &[&str]| {
        words
            .iter()
            .map(|w| text::insensitive_pattern(w))
            .collect::<Vec<_>>()
            .join("|")
    };
    format!(
        r"\b\d+\s*(?:{})\s+(?:{})|\b{}\s+[^,;.]+",
        alternation(DEADLINE_UNITS),
        alternation(DEADLINE_ANCHORS),
        text::insensitive_pattern("en geç"),
    )
}

/// A sentence with its Turkish fold, computed once.
struct Sentence<'a> {
    text: &'a str,
    folded: String,
}

pub struct ObligationExtractor {
    boundary: Regex,
    party: Regex,
    deadline: Regex,
}

impl Default for ObligationExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ObligationExtractor {
    pub fn new() -> Self {
        Self {
            boundary: Regex::new(r"[.;!?](?:\s+|$)|\n+").expect("static sentence regex"),
            party: Regex::new(&format!(r"\b(?:{})", party_alternation()))
                .expect("party roles build a valid regex"),
            deadline: Regex::new(&deadline_pattern()).expect("static deadline regex"),
        }
    }

    fn sentences<'a>(&self, text: &'a str) -> Vec<Sentence<'a>> {
        self.boundary
            .split(text)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| Sentence {
                text: s,
                folded: text::fold(s),
            })
            .collect()
    }

    /// Distinct party roles in order of first appearance.
    fn roles(&self, sentence: &str) -> Vec<&'static str> {
        let mut roles = Vec::new();
        for m in self.party.find_iter(sentence) {
            if let Some(role) = canonical_role(m.as_str()) {
                if !roles.contains(&role) {
                    roles.push(role);
                }
            }
        }
        roles
    }

    /// Every obligation phrasing in `text`, in sentence order.
    pub fn obligations(&self, text: &str) -> Vec<ExtractedObligation> {
        let clause_folded = text::fold(text);
        let is_conditional = contains_any(&clause_folded, CONDITIONAL);
        let is_periodic = contains_any(&clause_folded, PERIODIC);

        self.sentences(text)
            .iter()
            .flat_map(|s| {
                FAMILIES
                    .iter()
                    .filter(|(_, markers)| contains_any(&s.folded, markers))
                    .map(|(kind, _)| {
                        let roles = self.roles(s.text);
                        let obligor = roles.first().copied();
                        let obligee = roles
                            .get(1)
                            .copied()
                            .or_else(|| obligor.and_then(counterpart));
                        ExtractedObligation {
                            kind: *kind,
                            obligor: obligor.unwrap_or(UNSPECIFIED_PARTY).to_string(),
                            obligee: obligee.unwrap_or(UNSPECIFIED_PARTY).to_string(),
                            action: s.text.to_string(),
                            condition: condition_prefix(s),
                            deadline: self
                                .deadline
                                .find(s.text)
                                .map(|m| m.as_str().trim().to_string()),
                            is_conditional,
                            is_periodic,
                        }
                    })
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    /// Every right phrasing in `text`, in sentence order.
    pub fn rights(&self, text: &str) -> Vec<ExtractedRight> {
        let clause_folded = text::fold(text);
        let is_exclusive = contains_any(&clause_folded, EXCLUSIVE);
        let is_transferable = !contains_any(&clause_folded, NON_TRANSFERABLE);
        let sentences = self.sentences(text);
        let clause_limitation = sentences
            .iter()
            .find(|s| contains_any(&s.folded, LIMITATION))
            .map(|s| s.text.to_string());

        sentences
            .iter()
            .filter(|s| contains_any(&s.folded, RIGHT))
            .map(|s| ExtractedRight {
                holder: self
                    .roles(s.text)
                    .first()
                    .copied()
                    .unwrap_or(UNSPECIFIED_PARTY)
                    .to_string(),
                right: s.text.to_string(),
                is_exclusive,
                is_transferable,
                limitations: clause_limitation.clone(),
            })
            .collect()
    }
}

/// Sentence prefix up to and including the earliest conditional marker.
fn condition_prefix(s: &Sentence<'_>) -> Option<String> {
    let (byte_idx, marker) = CONDITIONAL
        .iter()
        .filter_map(|m| s.folded.find(m).map(|i| (i, *m)))
        .min_by_key(|(i, _)| *i)?;
    // Folding is char-for-char, so folded char positions index the original.
    let end = text::char_offset(&s.folded, byte_idx) + marker.chars().count();
    Some(text::prefix_chars(s.text, end).trim().to_string())
}
