use thiserror::Error;

/// Errors raised while parsing placement input or menu configuration.
#[derive(Debug, Error)]
pub enum PlacementError {
    #[error("unknown placement style: {0}")]
    UnknownPlacement(String),

    #[error("invalid menu config: {field} {reason}")]
    InvalidConfig {
        field: &'static str,
        reason: &'static str,
    },

    #[error("menu config JSON failed: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PlacementError>;
