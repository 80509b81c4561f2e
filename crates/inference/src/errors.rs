use thiserror::Error;

/// Unified failure type for provider calls.
///
/// The provider reports failures two ways: a structured `error` value inside
/// an otherwise-delivered response envelope, and a failed HTTP exchange.
/// Both collapse into this one type so callers have a single branch point.
#[derive(Error, Debug)]
pub enum InferenceError {
    /// The provider answered but reported a failure in its envelope.
    #[error("{message}")]
    Provider { message: String },

    /// The HTTP exchange with the provider failed (network, decode).
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// The provider reported success but the envelope carried no output.
    #[error("provider returned no detection output")]
    MissingOutput,
}
