use thiserror::Error;

/// Catalog validation failure. Any of these aborts catalog loading.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("clause type {0:?} has no match rules")]
    EmptyRules(String),

    #[error("risk pattern {0:?} has no match rules")]
    EmptyRiskRules(String),

    #[error("{0:?} has an empty keyword")]
    EmptyKeyword(String),

    #[error("clause type {clause_type:?} has unknown category {category:?}")]
    UnknownCategory {
        clause_type: String,
        category: String,
    },

    #[error("{entry:?} has unknown severity {severity:?}")]
    UnknownSeverity { entry: String, severity: String },

    #[error("risk pattern {entry:?} has unknown flag type {flag_type:?}")]
    UnknownFlagType { entry: String, flag_type: String },

    #[error("{entry:?} has invalid pattern {pattern:?}: {source}")]
    InvalidPattern {
        entry: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("duplicate clause type {0:?}")]
    DuplicateClauseType(String),

    #[error("duplicate risk pattern {0:?}")]
    DuplicateRiskPattern(String),

    #[error("duplicate document type {0:?}")]
    DuplicateDocumentType(String),

    #[error("document type {document_type:?} requires unknown clause type {clause_type:?}")]
    UnknownRequiredClause {
        document_type: String,
        clause_type: String,
    },

    #[error("default document type {0:?} is not defined")]
    UnknownDefaultDocumentType(String),

    #[error("catalog JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
