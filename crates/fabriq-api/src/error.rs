use thiserror::Error;

/// Top-level error type for the `fabriq-api` crate.
///
/// Covers every failure mode of the session layer: configuration,
/// authentication, transport, and response decoding. `fabriq-core`
/// wraps these when surfacing walker failures.
#[derive(Debug, Error)]
pub enum Error {
    // ── Configuration ───────────────────────────────────────────────
    /// A required connection field is missing. No request is attempted.
    #[error("Missing required connection field: {field}")]
    Configuration { field: String },

    /// The orchestrator endpoint could not be parsed. Fatal at client
    /// construction -- there is nothing to talk to.
    #[error("Invalid orchestrator URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ── Authentication ──────────────────────────────────────────────
    /// Login failed (bad credentials, or the response carried no token).
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// An authenticated request was attempted with no valid cached
    /// session. Callers must refresh via `ensure_session` first.
    #[error("Session token missing or expired -- re-authentication required")]
    AuthExpired,

    /// The named login domain is not known to the orchestrator.
    #[error("Login domain '{domain}' not found on the orchestrator")]
    DomainNotFound { domain: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout).
    /// Surfaced unmodified; nothing is retried.
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    // ── Data ────────────────────────────────────────────────────────
    /// A body that should have been JSON wasn't. Carries the raw body
    /// for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    /// The server returned no body where one was required.
    #[error("Empty response body from {path}")]
    EmptyResponse { path: String },
}
