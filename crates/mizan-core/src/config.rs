use serde::{Deserialize, Serialize};

/// Tunables for the document analysis pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Inputs longer than this are truncated before segmentation.
    pub max_document_chars: usize,
    /// Confidence assigned to every catalog hit.
    pub match_confidence: f32,
}

impl AnalyzerConfig {
    pub const DEFAULT_MAX_DOCUMENT_CHARS: usize = 200_000;
    pub const DEFAULT_MATCH_CONFIDENCE: f32 = 0.85;
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            max_document_chars: Self::DEFAULT_MAX_DOCUMENT_CHARS,
            match_confidence: Self::DEFAULT_MATCH_CONFIDENCE,
        }
    }
}
