//! Built-in Turkish contract catalog.
//!
//! # Priority order
//!
//! Clause types are listed in match priority. The order encodes how
//! overlapping vocabulary is resolved:
//!
//! - specific headings (parties, subject, scope) before anything else
//! - confidentiality / IP / non-compete before liability, since those
//!   paragraphs usually mention damages
//! - probation, overtime and annual leave before wages, since they mention
//!   `ücret`
//! - penalty and deposit before termination, termination before wages
//! - liability and the generic rights/obligations bucket near the end
//!
//! Every rule is written folded (Turkish lowercase) and runs against folded
//! text, so `ı`/`i` in a rule also match `I`/`İ` in the document.

use super::{CatalogSpec, ClauseTypeSpec, DocumentTypeSpec, RiskPatternSpec};

pub const VERSION: &str = "2024.1";
pub const DEFAULT_DOCUMENT_TYPE: &str = "genel";

struct ClauseRow {
    id: &'static str,
    category: &'static str,
    title: &'static str,
    patterns: &'static [&'static str],
    keywords: &'static [&'static str],
    severity: Option<&'static str>,
}

struct RiskRow {
    id: &'static str,
    flag_type: &'static str,
    severity: &'static str,
    description: &'static str,
    recommendation: &'static str,
    patterns: &'static [&'static str],
    keywords: &'static [&'static str],
}

const CLAUSE_TYPES: &[ClauseRow] = &[
    ClauseRow {
        id: "taraf_tanimlama",
        category: "party_info",
        title: "Taraflar",
        patterns: &[
            r"taraflar\s+arasında\s+(?:\S+\s+){0,3}sözleşmesi\b",
            r"(?m)^\s*(?:madde\s*\d+\s*[-–.:]?\s*)?taraflar\s*:?\s*$",
        ],
        keywords: &[
            "olarak anılacaktır",
            "adresinde mukim",
            "adresinde yerleşik",
            "bundan böyle",
        ],
        severity: None,
    },
    ClauseRow {
        id: "sozlesme_konusu",
        category: "subject_matter",
        title: "Sözleşmenin Konusu",
        patterns: &[],
        keywords: &[
            "sözleşmenin konusu",
            "sözleşmenin amacı",
            "işbu sözleşmenin konusunu",
        ],
        severity: None,
    },
    ClauseRow {
        id: "hizmet_kapsami",
        category: "subject_matter",
        title: "İşin / Hizmetin Kapsamı",
        patterns: &[],
        keywords: &["hizmetin kapsamı", "hizmet kapsamı", "iş tanımı", "görev tanımı"],
        severity: None,
    },
    ClauseRow {
        id: "gizlilik",
        category: "confidentiality",
        title: "Gizlilik",
        patterns: &[],
        keywords: &["gizlilik", "gizli bilgi", "ticari sır", "sır saklama"],
        severity: None,
    },
    ClauseRow {
        id: "fikri_mulkiyet",
        category: "intellectual_property",
        title: "Fikri Mülkiyet Hakları",
        patterns: &[],
        keywords: &[
            "fikri mülkiyet",
            "telif hakk",
            "fikir ve sanat eserleri",
            "patent",
            "marka hakk",
        ],
        severity: None,
    },
    ClauseRow {
        id: "rekabet_yasagi",
        category: "special",
        title: "Rekabet Yasağı",
        patterns: &[],
        keywords: &["rekabet yasağı", "rekabet etmeme", "rekabet etmeyeceğini"],
        severity: Some("medium"),
    },
    ClauseRow {
        id: "deneme_suresi",
        category: "term_duration",
        title: "Deneme Süresi",
        patterns: &[],
        keywords: &["deneme süresi"],
        severity: None,
    },
    ClauseRow {
        id: "fazla_calisma",
        category: "financial_terms",
        title: "Fazla Çalışma",
        patterns: &[],
        keywords: &["fazla çalışma", "fazla mesai", "fazla sürelerle çalışma"],
        severity: None,
    },
    ClauseRow {
        id: "yillik_izin",
        category: "rights_obligations",
        title: "Yıllık İzin",
        patterns: &[],
        keywords: &["yıllık izin", "yıllık ücretli izin"],
        severity: None,
    },
    ClauseRow {
        id: "cezai_sart",
        category: "liability",
        title: "Cezai Şart",
        patterns: &[],
        keywords: &["cezai şart"],
        severity: Some("medium"),
    },
    ClauseRow {
        id: "depozito",
        category: "financial_terms",
        title: "Depozito ve Teminat",
        patterns: &[],
        keywords: &["depozito", "güvence bedeli", "teminat bedeli", "kesin teminat"],
        severity: None,
    },
    ClauseRow {
        id: "fesih",
        category: "termination",
        title: "Fesih",
        patterns: &[],
        keywords: &[
            "fesih",
            "feshi",
            "feshedebilir",
            "feshedilebilir",
            "sona erer",
            "ihbar süresi",
            "ihbar öneli",
        ],
        severity: None,
    },
    ClauseRow {
        id: "ucret_odeme",
        category: "financial_terms",
        title: "Ücret ve Ödeme Koşulları",
        patterns: &[r"(?:aylık|brüt|net)\s+(?:\S+\s+)?\d[\d.]*(?:,\d+)?\s*(?:tl|₺)"],
        keywords: &[
            "ücret",
            "maaş",
            "bedeli",
            "ödeme tarihi",
            "ödeme şekli",
            "ödeme koşulları",
            "ödemeler",
            "banka hesabına",
        ],
        severity: None,
    },
    ClauseRow {
        id: "calisma_suresi",
        category: "term_duration",
        title: "Çalışma Süresi",
        patterns: &[r"haftalık\s+\d+\s+saat"],
        keywords: &[
            "çalışma süresi",
            "haftalık çalışma",
            "çalışma saatleri",
            "mesai saatleri",
        ],
        severity: None,
    },
    ClauseRow {
        id: "sozlesme_suresi",
        category: "term_duration",
        title: "Sözleşmenin Süresi",
        patterns: &[r"süresi\s+\d+\s+(?:ay|yıl)"],
        keywords: &[
            "sözleşmenin süresi",
            "sözleşme süresi",
            "belirsiz süreli",
            "belirli süreli",
            "kira süresi",
        ],
        severity: None,
    },
    ClauseRow {
        id: "teslim",
        category: "rights_obligations",
        title: "Teslim",
        patterns: &[],
        keywords: &["teslim"],
        severity: None,
    },
    ClauseRow {
        id: "mucbir_sebep",
        category: "general",
        title: "Mücbir Sebepler",
        patterns: &[],
        keywords: &["mücbir sebep", "force majeure", "doğal afet"],
        severity: None,
    },
    ClauseRow {
        id: "uyusmazlik_cozumu",
        category: "dispute_resolution",
        title: "Uyuşmazlıkların Çözümü",
        patterns: &[],
        keywords: &[
            "uyuşmazlık",
            "ihtilaf",
            "mahkemeleri",
            "icra daireleri",
            "tahkim",
            "arabulucu",
        ],
        severity: None,
    },
    ClauseRow {
        id: "garanti",
        category: "liability",
        title: "Garanti ve Ayıp",
        patterns: &[],
        keywords: &["garanti", "ayıplı", "ayıp ihbarı", "ayıptan sorumlu"],
        severity: None,
    },
    ClauseRow {
        id: "sorumluluk",
        category: "liability",
        title: "Sorumluluk ve Tazminat",
        patterns: &[],
        keywords: &["sorumluluk", "sorumlu", "tazmin", "zarar"],
        severity: None,
    },
    ClauseRow {
        id: "hak_ve_yukumlulukler",
        category: "rights_obligations",
        title: "Tarafların Hak ve Yükümlülükleri",
        patterns: &[],
        keywords: &[
            "yükümlülük",
            "yükümlüdür",
            "hak ve borç",
            "borçludur",
            "zorundadır",
            "yasaktır",
            "hakkına sahiptir",
        ],
        severity: None,
    },
    ClauseRow {
        id: "tebligat",
        category: "general",
        title: "Tebligat Adresleri",
        patterns: &[],
        keywords: &["tebligat", "tebliğ", "bildirim adres"],
        severity: None,
    },
    ClauseRow {
        id: "yururluk",
        category: "general",
        title: "Yürürlük",
        patterns: &[],
        keywords: &["yürürlüğe girer", "nüsha", "imza altına"],
        severity: None,
    },
];

const RISK_PATTERNS: &[RiskRow] = &[
    RiskRow {
        id: "sinirsiz_sorumluluk",
        flag_type: "high_risk",
        severity: "critical",
        description: "Sınırsız sorumluluk öngörülmüş.",
        recommendation: "Sorumluluğu sözleşme bedeli veya belirli bir azami tutarla sınırlandırın.",
        patterns: &[r"herhangi\s+bir\s+(?:üst\s+)?sınır\s+olmaksızın\s+sorumlu"],
        keywords: &[
            "sınırsız sorumluluk",
            "sınırsız olarak sorumlu",
            "sorumluluğu sınırsız",
        ],
    },
    RiskRow {
        id: "tek_tarafli_fesih",
        flag_type: "high_risk",
        severity: "high",
        description: "Tek taraflı ve gerekçesiz fesih yetkisi tanınmış.",
        recommendation: "Fesih hakkını karşılıklı hale getirin ve haklı nedenleri sayın.",
        patterns: &[],
        keywords: &[
            "tek taraflı olarak feshedebilir",
            "tek taraflı fesih",
            "gerekçe göstermeksizin feshedebilir",
            "herhangi bir gerekçe göstermeksizin",
        ],
    },
    RiskRow {
        id: "tek_tarafli_degisiklik",
        flag_type: "high_risk",
        severity: "high",
        description: "Bir tarafa sözleşme koşullarını tek taraflı değiştirme yetkisi verilmiş.",
        recommendation: "Esaslı değişikliklerin yazılı onayla yapılacağını şart koşun.",
        patterns: &[],
        keywords: &[
            "tek taraflı olarak değiştir",
            "dilediği zaman değiştir",
            "tek taraflı değişiklik",
        ],
    },
    RiskRow {
        id: "haklardan_feragat",
        flag_type: "high_risk",
        severity: "high",
        description: "Kapsamlı hak veya dava hakkından feragat içeriyor.",
        recommendation: "Feragatin kapsamını daraltın; emredici haklardan feragat geçersizdir.",
        patterns: &[],
        keywords: &[
            "tüm haklarından feragat",
            "dava hakkından feragat",
            "her türlü talep hakkından feragat",
        ],
    },
    RiskRow {
        id: "fazla_calisma_ucrete_dahil",
        flag_type: "high_risk",
        severity: "high",
        description: "Fazla çalışma karşılığının ücrete dahil edildiği veya ödenmeyeceği belirtilmiş (İş Kanunu m.41).",
        recommendation: "Yıllık 270 saati aşmayacak şekilde sınırlandırın ve fazla çalışma ücretini ayrıca düzenleyin.",
        patterns: &[r"fazla\s+(?:çalışma|mesai)[^.]*ücret\S*\s+dahil"],
        keywords: &["fazla çalışma ücreti ödenmez"],
    },
    RiskRow {
        id: "deneme_suresi_asimi",
        flag_type: "unusual",
        severity: "high",
        description: "Deneme süresi iki ayı aşıyor (İş Kanunu m.15).",
        recommendation: "Deneme süresini en fazla iki ay olarak belirleyin.",
        patterns: &[r"deneme\s+süresi[^.]*?\b(?:[3-9]|[1-9]\d+)\s*(?:\(\S+\)\s*)?ay"],
        keywords: &[],
    },
    RiskRow {
        id: "rekabet_yasagi_suresi",
        flag_type: "unusual",
        severity: "high",
        description: "Rekabet yasağı süresiz veya iki yılı aşan bir süre için öngörülmüş (TBK m.444).",
        recommendation: "Rekabet yasağını yer, zaman ve iş türü bakımından sınırlandırın; süre iki yılı aşmamalı.",
        patterns: &[
            r"rekabet[^.]*?(?:süresiz|süre\s+sınırı\s+olmaksızın|\b(?:[3-9]|[1-9]\d+)\s*yıl)",
            r"\b(?:[3-9]|[1-9]\d+)\s*yıl[^.]*?rekabet",
        ],
        keywords: &[],
    },
    RiskRow {
        id: "asiri_cezai_sart",
        flag_type: "unusual",
        severity: "high",
        description: "Cezai şart tutarı olağanın üzerinde görünüyor.",
        recommendation: "Cezai şartı fahiş olmayacak düzeye indirin; hakim indirim yetkisine sahiptir (TBK m.182).",
        patterns: &[r"cezai\s+şart[^.]*?\b\d+\s*(?:katı|maaş|aylık\s+ücret)"],
        keywords: &[],
    },
    RiskRow {
        id: "yuksek_gecikme_faizi",
        flag_type: "unusual",
        severity: "medium",
        description: "Gecikme faizi oranı yüksek.",
        recommendation: "Gecikme faizini yasal veya ticari temerrüt faizi oranına çekin.",
        patterns: &[
            r"(?:gecikme|temerrüt)\s+faiz\S*[^.]*?%\s*[1-9]\d",
            r"%\s*[1-9]\d(?:[.,]\d+)?\s+(?:oranında\s+)?(?:gecikme|temerrüt)\s+faiz",
        ],
        keywords: &[],
    },
    RiskRow {
        id: "otomatik_yenileme",
        flag_type: "unusual",
        severity: "medium",
        description: "Sözleşme kendiliğinden yenileniyor.",
        recommendation: "Yenileme için yazılı bildirim ve makul bir fesih penceresi öngörün.",
        patterns: &[],
        keywords: &[
            "kendiliğinden yenilenir",
            "kendiliğinden uzar",
            "otomatik olarak yenilenir",
            "aynı şartlarla uzar",
            "aynı koşullarla uzar",
        ],
    },
    RiskRow {
        id: "yabanci_yetki",
        flag_type: "unusual",
        severity: "medium",
        description: "Yabancı mahkeme, yabancı hukuk veya yurt dışı tahkim seçilmiş.",
        recommendation: "Türk mahkemelerinin yetkisini ve Türk hukukunun uygulanmasını değerlendirin.",
        patterns: &[],
        keywords: &[
            "yabancı mahkeme",
            "yurt dışı tahkim",
            "londra mahkemeleri",
            "yabancı hukuk",
        ],
    },
    RiskRow {
        id: "celiski_kurali",
        flag_type: "conflict",
        severity: "low",
        description: "Hükümler arasında çelişki ihtimali öngörülmüş.",
        recommendation: "Belgeler arasındaki öncelik sırasını açıkça belirtin.",
        patterns: &[],
        keywords: &["çelişki halinde", "çelişmesi halinde", "çelişki durumunda"],
    },
    RiskRow {
        id: "belirsiz_ifade",
        flag_type: "ambiguous",
        severity: "low",
        description: "Belirsiz veya yoruma açık ifade kullanılmış.",
        recommendation: "Süre, tutar ve koşulları somut olarak tanımlayın.",
        patterns: &[],
        keywords: &[
            "makul süre",
            "gerektiğinde",
            "uygun görülen",
            "uygun gördüğü",
            "ve benzeri",
            "vb.",
        ],
    },
];

const DOCUMENT_TYPES: &[(&str, &str, &[&str])] = &[
    (
        "genel",
        "Genel Sözleşme",
        &["taraf_tanimlama", "sozlesme_konusu", "uyusmazlik_cozumu"],
    ),
    (
        "is_sozlesmesi",
        "İş Sözleşmesi",
        &[
            "taraf_tanimlama",
            "hizmet_kapsami",
            "ucret_odeme",
            "calisma_suresi",
            "yillik_izin",
            "fesih",
            "uyusmazlik_cozumu",
        ],
    ),
    (
        "kira_sozlesmesi",
        "Kira Sözleşmesi",
        &[
            "taraf_tanimlama",
            "sozlesme_konusu",
            "ucret_odeme",
            "sozlesme_suresi",
            "depozito",
            "fesih",
            "uyusmazlik_cozumu",
        ],
    ),
    (
        "satis_sozlesmesi",
        "Satış Sözleşmesi",
        &[
            "taraf_tanimlama",
            "sozlesme_konusu",
            "ucret_odeme",
            "teslim",
            "garanti",
            "uyusmazlik_cozumu",
        ],
    ),
    (
        "hizmet_sozlesmesi",
        "Hizmet Sözleşmesi",
        &[
            "taraf_tanimlama",
            "hizmet_kapsami",
            "ucret_odeme",
            "sozlesme_suresi",
            "gizlilik",
            "fesih",
            "uyusmazlik_cozumu",
        ],
    ),
    (
        "gizlilik_sozlesmesi",
        "Gizlilik Sözleşmesi",
        &[
            "taraf_tanimlama",
            "gizlilik",
            "sozlesme_suresi",
            "cezai_sart",
            "uyusmazlik_cozumu",
        ],
    ),
];

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub(super) fn spec() -> CatalogSpec {
    CatalogSpec {
        version: VERSION.to_string(),
        default_document_type: DEFAULT_DOCUMENT_TYPE.to_string(),
        clause_types: CLAUSE_TYPES
            .iter()
            .map(|r| ClauseTypeSpec {
                id: r.id.to_string(),
                category: r.category.to_string(),
                title: r.title.to_string(),
                patterns: strings(r.patterns),
                keywords: strings(r.keywords),
                severity: r.severity.map(str::to_string),
            })
            .collect(),
        risk_patterns: RISK_PATTERNS
            .iter()
            .map(|r| RiskPatternSpec {
                id: r.id.to_string(),
                flag_type: r.flag_type.to_string(),
                severity: r.severity.to_string(),
                description: r.description.to_string(),
                recommendation: r.recommendation.to_string(),
                patterns: strings(r.patterns),
                keywords: strings(r.keywords),
            })
            .collect(),
        document_types: DOCUMENT_TYPES
            .iter()
            .map(|(id, title, required)| DocumentTypeSpec {
                id: id.to_string(),
                title: title.to_string(),
                required: strings(required),
            })
            .collect(),
    }
}
