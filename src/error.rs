//! Error taxonomy for HMAC generation
//!
//! Generation can only fail for one of two reasons: the requested
//! algorithm cannot be resolved by anything available, or the external
//! provider was consulted and came back with garbage. Both surface as a
//! failed result, never as a process fault, and there is no retry
//! policy: the computation is deterministic, so only switching
//! algorithms or providers can change the outcome.

use crate::hash::Algorithm;

/// Failure to produce an HMAC.
#[derive(Debug, thiserror::Error)]
pub enum HmacError {
    /// No in-process primitive exists for the algorithm and no external
    /// provider is configured.
    #[error("no implementation available for {algorithm}: not built in and no external provider configured")]
    Resolution { algorithm: Algorithm },

    /// The external provider was invoked but failed.
    #[error("external provider failed for {algorithm}: {source}")]
    Provider {
        algorithm: Algorithm,
        #[source]
        source: ProviderError,
    },
}

/// Failure inside an external hash provider.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The provider process could not be spawned or its pipes failed.
    #[error("failed to run provider command: {0}")]
    Io(#[from] std::io::Error),

    /// The provider ran longer than the configured deadline.
    #[error("provider timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// The key cannot be handed to the provider without altering it.
    #[error("key cannot be passed to the provider: {0}")]
    UnsupportedKey(String),

    /// The provider exited unsuccessfully or produced empty output.
    #[error("provider produced no usable output: {0}")]
    EmptyOutput(String),

    /// The provider produced output that does not parse as a hex digest
    /// of the expected width.
    #[error("provider output is not a {expected_len}-character hex digest: {output:?}")]
    MalformedOutput { output: String, expected_len: usize },
}
