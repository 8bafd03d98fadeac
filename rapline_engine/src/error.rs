// Error types for the edges of the engine.
//
// Extraction itself never fails: malformed structure drops content and short
// tails simply produce no unit. Errors only arise when loading a
// `RhymeConfig` (see `config.rs`) and when talking to an external verifier
// (see `verify.rs`). The CLI wraps both in `anyhow` context.

use thiserror::Error;

/// Failure to load or validate a `RhymeConfig`.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The JSON could not be decoded into a config.
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A field holds a value the engine cannot run with.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Failure reported by a `RhymeVerifier` for one batch of candidates.
#[derive(Error, Debug)]
pub enum VerifyError {
    /// The collaborator could not be reached or produced no response.
    #[error("verifier unavailable: {0}")]
    Unavailable(String),

    /// The response could not be decoded into verdicts.
    #[error("malformed verifier response: {0}")]
    MalformedResponse(String),

    /// The collaborator refused the batch.
    #[error("verifier rejected batch: {0}")]
    Rejected(String),
}
