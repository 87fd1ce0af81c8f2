pub mod analyzer;
pub mod assessment;
pub mod entities;
pub mod obligations;
pub mod reasoning;
pub mod report;
pub mod risk;
pub mod scoring;
pub mod segmenter;

pub use analyzer::Analyzer;
pub use assessment::{
    AssessmentKind, CaseProfile, ComplianceProfile, ComplianceRequirement, ComplianceStatus,
    RiskAssessment, RiskAssessor, RiskCategory, RiskFactor,
};
pub use entities::EntityExtractor;
pub use obligations::ObligationExtractor;
pub use reasoning::{
    ConfidenceBreakdown, ConfidenceLevel, Evidence, EvidenceType, ExplainableReasoner,
    ExplainableResult, ReasoningContext,
};
pub use report::{render_assessment, render_explainable, render_extraction};
pub use risk::RiskDetector;
