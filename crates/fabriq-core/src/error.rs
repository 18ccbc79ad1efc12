use thiserror::Error;

/// Failures surfaced by the schema-tree walkers.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Session-layer failure, surfaced unmodified.
    #[error(transparent)]
    Api(#[from] fabriq_api::Error),

    /// A slash-delimited object reference did not match the expected
    /// grammar. Raised instead of silently emitting truncated fields.
    #[error("Malformed reference '{reference}': {reason}")]
    MalformedReference { reference: String, reason: String },

    /// A wire node failed to decode into its typed shape.
    #[error("Failed to decode {context}: {source}")]
    Decode {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}
