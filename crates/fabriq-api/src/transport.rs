// Shared transport configuration for building reqwest::Client instances.
//
// The orchestrator client only ever needs one HTTP client, but keeping
// TLS, proxy, and timeout settings in a dedicated config struct keeps
// `Client::new` focused on session mechanics.

use std::time::Duration;

use url::Url;

use crate::error::Error;

/// Default per-request timeout. The NGINX fronting an orchestrator
/// cluster times out at 90 seconds; we sit just above it.
pub const DEFAULT_TIMEOUT_SECS: u64 = 100;

/// TLS verification mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TlsMode {
    /// Use the system certificate store.
    #[default]
    System,
    /// Accept any certificate (for lab clusters with self-signed certs).
    DangerAcceptInvalid,
}

/// Shared transport configuration for building the HTTP client.
///
/// Orchestrator front ends negotiate TLS 1.2 at best. rustls exposes
/// neither TLS 1.1 nor the legacy CBC suites, so the protocol is
/// capped at TLS 1.2 with rustls' vetted suite set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    pub tls: TlsMode,
    pub proxy: Option<Url>,
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            tls: TlsMode::System,
            proxy: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        let mut builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .max_tls_version(reqwest::tls::Version::TLS_1_2)
            .user_agent(concat!("fabriq/", env!("CARGO_PKG_VERSION")));

        if self.tls == TlsMode::DangerAcceptInvalid {
            builder = builder.danger_accept_invalid_certs(true);
        }

        if let Some(ref proxy) = self.proxy {
            builder = builder.proxy(reqwest::Proxy::all(proxy.as_str())?);
        }

        builder.build().map_err(Error::Transport)
    }
}
