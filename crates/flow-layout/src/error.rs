use thiserror::Error;

/// Errors at the JSON boundary
///
/// Layout itself never fails, graph problems are handled by fallbacks.
#[derive(Debug, Error)]
pub enum FlowLayoutError {
    /// The input is not an object or lacks a required list
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    /// A field is present but does not have the expected shape
    #[error("invalid flow description: {0}")]
    Json(#[from] serde_json::Error),
}
