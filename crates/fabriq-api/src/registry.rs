// Process-wide client registry.
//
// The host runtime may invoke listings repeatedly against the same
// orchestrator; constructing a client (and re-authenticating) per call
// would be wasteful. The registry caches one client per distinct
// connection configuration behind a single lock, so concurrent lookups
// never race a replacement and two different configurations never
// clobber each other.

use std::collections::HashMap;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::sync::{Arc, Mutex, OnceLock};

use secrecy::{ExposeSecret, SecretString};

use crate::auth::Platform;
use crate::client::{Client, ConnectionSettings};
use crate::error::Error;
use crate::transport::TlsMode;

/// Cache key covering the full connection configuration, not just the
/// base URL. The password enters the key as a digest only, so no plain
/// copy of the secret outlives the hashing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct RegistryKey {
    base_url: String,
    username: String,
    password_digest: u64,
    login_domain: String,
    platform: Platform,
    tls: TlsMode,
    proxy: Option<String>,
    timeout_secs: u64,
}

impl RegistryKey {
    fn from_settings(settings: &ConnectionSettings) -> Self {
        Self {
            base_url: settings.base_url.clone(),
            username: settings.username.clone(),
            password_digest: digest_secret(&settings.password),
            login_domain: settings.login_domain.clone(),
            platform: settings.platform,
            tls: settings.transport.tls,
            proxy: settings.transport.proxy.as_ref().map(|u| u.to_string()),
            timeout_secs: settings.transport.timeout.as_secs(),
        }
    }
}

fn digest_secret(secret: &SecretString) -> u64 {
    let mut hasher = DefaultHasher::new();
    secret.expose_secret().hash(&mut hasher);
    hasher.finish()
}

/// Synchronized cache of [`Client`] instances keyed by configuration.
#[derive(Default)]
pub struct ClientRegistry {
    clients: Mutex<HashMap<RegistryKey, Arc<Client>>>,
}

impl ClientRegistry {
    /// The process-wide registry.
    pub fn global() -> &'static Self {
        static REGISTRY: OnceLock<ClientRegistry> = OnceLock::new();
        REGISTRY.get_or_init(ClientRegistry::default)
    }

    /// Return the cached client for these settings, constructing one on
    /// first use. Identical settings always yield the same instance;
    /// any differing field yields a fresh client.
    pub fn get_or_create(&self, settings: &ConnectionSettings) -> Result<Arc<Client>, Error> {
        let key = RegistryKey::from_settings(settings);
        let mut clients = self.clients.lock().unwrap_or_else(std::sync::PoisonError::into_inner);

        if let Some(client) = clients.get(&key) {
            tracing::debug!(url = %settings.base_url, "reusing cached client");
            return Ok(Arc::clone(client));
        }

        tracing::debug!(url = %settings.base_url, "constructing new client");
        let client = Arc::new(Client::new(settings)?);
        clients.insert(key, Arc::clone(&client));
        Ok(client)
    }
}
