pub mod client;
pub mod errors;
pub mod types;

// Re-export commonly used types for convenience
pub use client::{DetectionProvider, ModelClient};
pub use errors::InferenceError;
pub use types::{BoundingBox, Detection};
