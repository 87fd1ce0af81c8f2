//! Document risk scoring and the weighted-mean helpers shared by the
//! assessments.
//!
//! # Document banding
//!
//! Bands are evaluated top to bottom and the first that applies wins:
//!
//! | level      | condition                                      |
//! |------------|------------------------------------------------|
//! | `critical` | any critical flag, or score ≥ 70               |
//! | `high`     | more than one high flag, or score ≥ 40         |
//! | `medium`   | any high flag, or score ≥ 20                   |
//! | `low`      | otherwise                                      |
//!
//! A single high flag therefore yields `medium`, not `high`, unless the
//! score alone reaches 40.

use mizan_core::model::{RiskFlag, RiskLevel, Severity};

pub const MAX_SCORE: u32 = 100;

/// Points a flag of this severity adds to the document score.
pub fn severity_points(severity: Severity) -> u32 {
    match severity {
        Severity::Critical => 25,
        Severity::High => 15,
        Severity::Medium => 5,
        Severity::Low => 1,
    }
}

/// Flag counts per severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlagTally {
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl FlagTally {
    pub fn from_flags<'a>(flags: impl IntoIterator<Item = &'a RiskFlag>) -> Self {
        flags.into_iter().fold(Self::default(), |mut t, f| {
            match f.severity {
                Severity::Critical => t.critical += 1,
                Severity::High => t.high += 1,
                Severity::Medium => t.medium += 1,
                Severity::Low => t.low += 1,
            }
            t
        })
    }

    /// Additive score clamped to `0..=100`.
    pub fn score(&self) -> u32 {
        let raw = self.critical as u64 * severity_points(Severity::Critical) as u64
            + self.high as u64 * severity_points(Severity::High) as u64
            + self.medium as u64 * severity_points(Severity::Medium) as u64
            + self.low as u64 * severity_points(Severity::Low) as u64;
        raw.min(MAX_SCORE as u64) as u32
    }

    pub fn level(&self) -> RiskLevel {
        band_document(self.score(), self.critical, self.high)
    }
}

/// Document risk level from a score and the critical/high flag counts.
pub fn band_document(score: u32, critical: usize, high: usize) -> RiskLevel {
    if critical > 0 || score >= 70 {
        RiskLevel::Critical
    } else if high > 1 || score >= 40 {
        RiskLevel::High
    } else if high > 0 || score >= 20 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

/// Level for a 0–100 factor or category score.
pub fn factor_level(score: f64) -> RiskLevel {
    if score >= 80.0 {
        RiskLevel::Critical
    } else if score >= 60.0 {
        RiskLevel::High
    } else if score >= 40.0 {
        RiskLevel::Medium
    } else if score >= 20.0 {
        RiskLevel::Low
    } else {
        RiskLevel::Minimal
    }
}

/// Σ(score × weight) / Σweight. Zero when the weights sum to zero.
pub fn weighted_mean(items: impl IntoIterator<Item = (f64, f64)>) -> f64 {
    let (num, den) = items
        .into_iter()
        .fold((0.0, 0.0), |(n, d), (score, weight)| (n + score * weight, d + weight));
    if den > 0.0 { num / den } else { 0.0 }
}

/// Arithmetic mean; zero for an empty input.
pub fn mean(values: impl IntoIterator<Item = f64>) -> f64 {
    let (sum, n) = values
        .into_iter()
        .fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 { 0.0 } else { sum / n as f64 }
}
