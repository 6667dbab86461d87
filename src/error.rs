use thiserror::Error;

/// Errors the engine reports to its caller.
///
/// Everything else that can go wrong with a circuit (dangling wire
/// endpoints, out-of-range pin indices, non-converging cycles) is not an
/// error: evaluation degrades those to `false` and always completes.
#[derive(Debug, Error)]
pub enum CircuitError {
    /// A component type tag outside the fixed set {AND, OR, NOT, TIMER, LAMP}.
    #[error("unknown component type {0:?}")]
    InvalidType(String),

    /// A circuit document that is not valid JSON.
    #[error("malformed circuit document: {0}")]
    Parse(#[from] serde_json::Error),
}
