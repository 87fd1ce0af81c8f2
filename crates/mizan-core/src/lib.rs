pub mod catalog;
pub mod config;
pub mod error;
pub mod ids;
pub mod model;
pub mod text;

pub use catalog::{
    Catalog, CatalogSpec, CatalogSummary, ClauseTypeDefinition, Haystack, RiskPattern,
};
pub use config::AnalyzerConfig;
pub use error::CatalogError;
pub use ids::{Clock, FixedClock, IdGenerator, SequentialIds, SystemClock, TimestampIds};
pub use model::{
    EntityType, ExtractedClause, ExtractedEntity, ExtractedObligation, ExtractedRight,
    ExtractionResult, ExtractionSummary, FlagType, MainCategory, NormalizedValue, ObligationKind,
    RiskFlag, RiskLevel, Severity, TextSpan,
};
