//! Typed entity extraction: amounts, percentages, dates, durations, parties,
//! court locations, and statute/article references.
//!
//! Every extractor is a compiled regex run over the original paragraph text.
//! Offsets are reported in chars relative to the whole document.

use chrono::NaiveDate;
use regex::{Captures, Regex};

use mizan_core::model::{EntityType, ExtractedEntity, NormalizedValue};
use mizan_core::text;

/// Party roles recognised in contract text, each paired with its usual
/// counterpart. Folded Turkish.
pub const PARTY_ROLES: &[(&str, &str)] = &[
    ("kiraya veren", "kiracı"),
    ("kiracı", "kiraya veren"),
    ("hizmet veren", "hizmet alan"),
    ("hizmet alan", "hizmet veren"),
    ("iş sahibi", "yüklenici"),
    ("yüklenici", "iş sahibi"),
    ("işveren", "işçi"),
    ("işçi", "işveren"),
    ("satıcı", "alıcı"),
    ("alıcı", "satıcı"),
    ("taraflar", "taraflar"),
];

const MONTHS: &[&str] = &[
    "ocak", "şubat", "mart", "nisan", "mayıs", "haziran", "temmuz", "ağustos", "eylül", "ekim",
    "kasım", "aralık",
];

/// Regex alternation matching any party role regardless of Turkish casing.
/// Longer roles come first so `kiraya veren` wins over shorter overlaps.
pub(crate) fn party_alternation() -> String {
    let mut roles: Vec<&str> = PARTY_ROLES.iter().map(|(r, _)| *r).collect();
    roles.sort_by_key(|r| std::cmp::Reverse(r.chars().count()));
    roles
        .iter()
        .map(|r| text::insensitive_pattern(r))
        .collect::<Vec<_>>()
        .join("|")
}

/// Map matched party text back to its canonical (folded) role.
pub(crate) fn canonical_role(raw: &str) -> Option<&'static str> {
    let folded = text::fold(raw);
    let collapsed = folded.split_whitespace().collect::<Vec<_>>().join(" ");
    PARTY_ROLES
        .iter()
        .map(|(r, _)| *r)
        .find(|r| collapsed == *r)
}

/// The usual counterpart of a role, if the role is known.
pub(crate) fn counterpart(role: &str) -> Option<&'static str> {
    PARTY_ROLES
        .iter()
        .find(|(r, _)| *r == role)
        .map(|(_, c)| *c)
}

pub struct EntityExtractor {
    amount: Regex,
    percentage: Regex,
    numeric_date: Regex,
    named_date: Regex,
    duration: Regex,
    party: Regex,
    location: Regex,
    law_ref: Regex,
    article_ref: Regex,
}

impl Default for EntityExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityExtractor {
    pub fn new() -> Self {
        let amount = Regex::new(
            r"\b(\d{1,3}(?:\.\d{3})+|\d+)(?:,(\d{1,2}))?\s*(TL|₺|TRY|USD|EUR|€|\$|Türk\s+Lirası|[Ll]ira|[Dd]olar|[Aa]vro|[Ee]uro)",
        )
        .expect("static amount regex");
        let percentage = Regex::new(
            r"%\s?(\d+(?:[.,]\d+)?)|\b(\d+(?:[.,]\d+)?)\s?%|\b[yY](?:üzde|ÜZDE)\s+(\d+(?:[.,]\d+)?)",
        )
        .expect("static percentage regex");
        let numeric_date = Regex::new(r"\b(\d{1,2})[./](\d{1,2})[./](\d{4})\b")
            .expect("static date regex");
        let named_date = Regex::new(
            r"\b(\d{1,2})\s+(Ocak|Şubat|Mart|Nisan|Mayıs|Haziran|Temmuz|Ağustos|Eylül|Ekim|Kasım|Aralık)\s+(\d{4})\b",
        )
        .expect("static named date regex");
        // Unit plus an optional inflection; "2 ayrı" is not a duration.
        let duration = Regex::new(
            r"\b(\d{1,3})\s+(iş\s+günü|gün|hafta|ay|yıl|saat)(?:l[ıiuü]k|d[ıiuü]r|[dt][ae]n?|[ıiuü](?:n[ıiuüae]?)?|[ae])?\b",
        )
        .expect("static duration regex");
        let party = Regex::new(&format!(r"\b(?:{})", party_alternation()))
            .expect("party roles build a valid regex");
        let location = Regex::new(
            r"\b(\p{Lu}\p{Ll}+)\s+(?:\([^)]*\)\s+)?(?:Mahkemeleri|Mahkemesi|İcra\s+Daireleri|İcra\s+Müdürlükleri)",
        )
        .expect("static location regex");
        let law_ref = Regex::new(r"\b(\d{3,5})\s+[sS]ayılı").expect("static law reference regex");
        let article_ref = Regex::new(r"\b(?:[mM]adde|MADDE|[mM]d\.|[mM]\.)\s*(\d+)")
            .expect("static article reference regex");
        Self {
            amount,
            percentage,
            numeric_date,
            named_date,
            duration,
            party,
            location,
            law_ref,
            article_ref,
        }
    }

    /// Extract every entity in `text`. `base` is the char offset of `text`
    /// within the document. Results are sorted by start offset.
    pub fn extract(&self, text: &str, base: usize) -> Vec<ExtractedEntity> {
        let mut out = Vec::new();

        self.collect(&mut out, text, base, &self.amount, EntityType::Amount, 0.9, |c| {
            let integer = c[1].replace('.', "");
            let value = match c.get(2) {
                Some(dec) => format!("{integer}.{}", dec.as_str()),
                None => integer,
            };
            NormalizedValue::Money {
                value,
                currency: currency_code(&c[3]).to_string(),
            }
        });

        self.collect(&mut out, text, base, &self.percentage, EntityType::Percentage, 0.95, |c| {
            let digits = c
                .get(1)
                .or_else(|| c.get(2))
                .or_else(|| c.get(3))
                .map(|m| m.as_str())
                .unwrap_or_default();
            NormalizedValue::text(digits.replace(',', "."))
        });

        self.collect(&mut out, text, base, &self.numeric_date, EntityType::Date, 0.9, |c| {
            iso_date(&c[3], &c[2], &c[1]).unwrap_or_else(|| NormalizedValue::text(&c[0]))
        });

        self.collect(&mut out, text, base, &self.named_date, EntityType::Date, 0.9, |c| {
            let month = month_number(&c[2]).map(|m| m.to_string());
            month
                .and_then(|m| iso_date(&c[3], &m, &c[1]))
                .unwrap_or_else(|| NormalizedValue::text(&c[0]))
        });

        self.collect(&mut out, text, base, &self.duration, EntityType::Duration, 0.85, |c| {
            NormalizedValue::Duration {
                count: c[1].to_string(),
                unit: c[2].split_whitespace().collect::<Vec<_>>().join(" "),
            }
        });

        self.collect(&mut out, text, base, &self.party, EntityType::Party, 0.7, |c| {
            NormalizedValue::text(canonical_role(&c[0]).unwrap_or_default())
        });

        self.collect(&mut out, text, base, &self.location, EntityType::Location, 0.75, |c| {
            NormalizedValue::text(&c[1])
        });

        self.collect(&mut out, text, base, &self.law_ref, EntityType::Reference, 0.9, |c| {
            NormalizedValue::text(format!("{} sayılı", &c[1]))
        });

        self.collect(&mut out, text, base, &self.article_ref, EntityType::Reference, 0.9, |c| {
            NormalizedValue::text(format!("m.{}", &c[1]))
        });

        out.sort_by(|a, b| a.start.cmp(&b.start).then(a.entity_type.cmp(&b.entity_type)));
        out
    }

    #[allow(clippy::too_many_arguments)]
    fn collect(
        &self,
        out: &mut Vec<ExtractedEntity>,
        text: &str,
        base: usize,
        re: &Regex,
        entity_type: EntityType,
        confidence: f32,
        normalize: impl Fn(&Captures<'_>) -> NormalizedValue,
    ) {
        for caps in re.captures_iter(text) {
            let Some(m) = caps.get(0) else { continue };
            let start = base + text::char_offset(text, m.start());
            out.push(ExtractedEntity {
                entity_type,
                raw: m.as_str().to_string(),
                normalized: normalize(&caps),
                start,
                end: start + m.as_str().chars().count(),
                confidence,
            });
        }
    }
}

fn currency_code(raw: &str) -> &'static str {
    match text::fold(raw).as_str() {
        "usd" | "$" | "dolar" => "USD",
        "eur" | "€" | "avro" | "euro" => "EUR",
        _ => "TRY",
    }
}

fn month_number(name: &str) -> Option<u32> {
    let folded = text::fold(name);
    MONTHS
        .iter()
        .position(|m| *m == folded)
        .map(|i| i as u32 + 1)
}

/// ISO-8601 date if the parts form a real calendar date.
fn iso_date(year: &str, month: &str, day: &str) -> Option<NormalizedValue> {
    let date = NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)?;
    Some(NormalizedValue::text(date.format("%Y-%m-%d").to_string()))
}
