//! CLI error types with miette diagnostics.
//!
//! Maps session-layer and walker errors into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use fabriq_core::CoreError;

/// Exit codes.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not reach the orchestrator")]
    #[diagnostic(
        code(fabriq::connection_failed),
        help(
            "Check that the orchestrator is running and accessible.\n\
             For self-signed certificates, pass --insecure (-k)."
        )
    )]
    ConnectionFailed {
        #[source]
        source: fabriq_api::Error,
    },

    // ── Authentication ───────────────────────────────────────────────

    #[error("Authentication failed")]
    #[diagnostic(
        code(fabriq::auth_failed),
        help(
            "Verify the username, password, and login domain.\n\
             On Nexus Dashboard the domain is usually 'DefaultAuth'."
        )
    )]
    AuthFailed {
        #[source]
        source: fabriq_api::Error,
    },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Missing configuration value for '{field}'")]
    #[diagnostic(
        code(fabriq::missing_config),
        help(
            "Provide --{field}, set FABRIQ_{field_env}, or add '{field}'\n\
             to fabriq.toml."
        )
    )]
    MissingConfig { field: String, field_env: String },

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(fabriq::validation))]
    Validation { field: String, reason: String },

    #[error(transparent)]
    #[diagnostic(code(fabriq::config))]
    Config(Box<figment::Error>),

    // ── API / walker ─────────────────────────────────────────────────

    #[error("Orchestrator request failed")]
    #[diagnostic(code(fabriq::api_error))]
    Api {
        #[source]
        source: fabriq_api::Error,
    },

    #[error("Listing failed")]
    #[diagnostic(
        code(fabriq::listing_failed),
        help("The schema document did not match the expected shape; run with -vv to see the path.")
    )]
    Listing {
        #[source]
        source: CoreError,
    },
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl From<fabriq_api::Error> for CliError {
    fn from(err: fabriq_api::Error) -> Self {
        use fabriq_api::Error;
        match err {
            Error::Authentication { .. } | Error::AuthExpired | Error::DomainNotFound { .. } => {
                Self::AuthFailed { source: err }
            }
            Error::Transport(_) => Self::ConnectionFailed { source: err },
            Error::Configuration { ref field } => Self::MissingConfig {
                field_env: field.to_uppercase(),
                field: field.clone(),
            },
            _ => Self::Api { source: err },
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Api(api) => api.into(),
            other => Self::Listing { source: other },
        }
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } => exit_code::AUTH,
            Self::MissingConfig { .. } | Self::Validation { .. } | Self::Config(_) => {
                exit_code::USAGE
            }
            _ => exit_code::GENERAL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_variants_map_to_the_auth_exit_code() {
        for err in [
            fabriq_api::Error::AuthExpired,
            fabriq_api::Error::Authentication {
                message: "rejected".into(),
            },
            fabriq_api::Error::DomainNotFound {
                domain: "Other".into(),
            },
        ] {
            let cli: CliError = err.into();
            assert!(matches!(cli, CliError::AuthFailed { .. }), "got: {cli:?}");
            assert_eq!(cli.exit_code(), exit_code::AUTH);
        }
    }

    #[test]
    fn missing_connection_field_maps_to_a_usage_error() {
        let cli: CliError = fabriq_api::Error::Configuration {
            field: "user".into(),
        }
        .into();
        assert!(
            matches!(cli, CliError::MissingConfig { ref field, ref field_env }
                if field == "user" && field_env == "USER"),
            "got: {cli:?}"
        );
        assert_eq!(cli.exit_code(), exit_code::USAGE);
    }

    #[test]
    fn walker_failures_keep_the_general_exit_code() {
        let cli: CliError = fabriq_core::CoreError::MalformedReference {
            reference: "schemas/s1".into(),
            reason: "expected 6 segments, found 2".into(),
        }
        .into();
        assert!(matches!(cli, CliError::Listing { .. }), "got: {cli:?}");
        assert_eq!(cli.exit_code(), exit_code::GENERAL);
    }
}
