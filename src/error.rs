use thiserror::Error;

// ---------------------------------------------------------------------------
// Configuration errors (build-time validation, never raised by `simulate`)
// ---------------------------------------------------------------------------

/// Problems found while validating a rocket configuration against a catalog.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("stage '{stage}' references unknown component '{component}'")]
    UnknownComponent { stage: String, component: String },

    #[error("component '{component}' has invalid {field}: {value}")]
    InvalidQuantity {
        component: String,
        field: &'static str,
        value: f64,
    },
}

/// Failure to load a scenario file.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to read scenario: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed scenario JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid scenario: {0}")]
    Invalid(#[from] ConfigError),
}
