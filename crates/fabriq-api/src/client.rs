// Orchestrator HTTP client
//
// Wraps `reqwest::Client` with platform-aware path rewriting, bearer
// session management, and JSON body decoding. Resource access goes
// through `ServiceManager`; this module owns transport and session
// mechanics only.

use reqwest::{Method, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::{Value, json};
use tokio::sync::Mutex;
use tracing::debug;
use url::Url;

use crate::auth::{Platform, Session};
use crate::error::Error;
use crate::service::ServiceManager;
use crate::transport::TransportConfig;

/// A parsed JSON response document.
pub type Document = Value;

/// Everything needed to construct a [`Client`].
///
/// The registry caches clients keyed by the whole of this struct, so
/// two connections differing in any field get distinct clients.
#[derive(Debug, Clone)]
pub struct ConnectionSettings {
    pub base_url: String,
    pub username: String,
    pub password: SecretString,
    pub login_domain: String,
    pub platform: Platform,
    pub transport: TransportConfig,
}

/// Read-only client for a multi-site fabric orchestrator.
///
/// Owns the HTTP transport and the cached [`Session`]. The session
/// lives behind a `tokio::sync::Mutex` so concurrent callers never
/// race a token refresh: one login flight at a time, everyone else
/// waits and reuses the fresh token.
pub struct Client {
    http: reqwest::Client,
    base_url: Url,
    platform: Platform,
    username: String,
    password: SecretString,
    login_domain: String,
    session: Mutex<Option<Session>>,
}

impl Client {
    /// Construct a client from connection settings.
    ///
    /// Fails with [`Error::InvalidUrl`] on an unparseable endpoint and
    /// [`Error::Configuration`] on missing credentials -- both are
    /// unrecoverable before any request is made.
    pub fn new(settings: &ConnectionSettings) -> Result<Self, Error> {
        if settings.username.is_empty() {
            return Err(Error::Configuration {
                field: "user".into(),
            });
        }
        let base_url = Url::parse(&settings.base_url)?;
        let http = settings.transport.build_client()?;

        Ok(Self {
            http,
            base_url,
            platform: settings.platform,
            username: settings.username.clone(),
            password: settings.password.clone(),
            login_domain: settings.login_domain.clone(),
            session: Mutex::new(None),
        })
    }

    /// The orchestrator base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The configured platform variant.
    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Borrow a [`ServiceManager`] façade bound to this client.
    pub fn service(&self) -> ServiceManager<'_> {
        ServiceManager::new(self)
    }

    // ── Session management ───────────────────────────────────────────

    /// Log in and replace the cached session unconditionally.
    pub async fn authenticate(&self) -> Result<(), Error> {
        let mut guard = self.session.lock().await;
        *guard = Some(self.login().await?);
        Ok(())
    }

    /// Make sure a valid session is cached, logging in only if the
    /// current token is missing or past expiry.
    ///
    /// The session lock is held across the login, so two callers
    /// hitting an expired token trigger exactly one refresh.
    pub async fn ensure_session(&self) -> Result<(), Error> {
        let mut guard = self.session.lock().await;
        if guard.as_ref().is_none_or(|s| !s.is_valid()) {
            *guard = Some(self.login().await?);
        }
        Ok(())
    }

    /// Install an externally obtained session (or a fabricated one).
    pub async fn install_session(&self, session: Session) {
        *self.session.lock().await = Some(session);
    }

    async fn login(&self) -> Result<Session, Error> {
        let path = self.platform.login_path();
        debug!(platform = %self.platform, "logging in at {path}");

        let payload = match self.platform {
            Platform::Nd => json!({
                "userName": self.username,
                "userPasswd": self.password.expose_secret(),
                "domain": self.login_domain,
            }),
            Platform::Mso => {
                let domain_id = self.resolve_domain_id(&self.login_domain).await?;
                json!({
                    "username": self.username,
                    "password": self.password.expose_secret(),
                    "domainId": domain_id,
                })
            }
        };

        let req = self.request(Method::POST, path, Some(&payload), false).await?;
        let (doc, status) = self.execute(req).await?;
        let doc = doc.ok_or_else(|| Error::EmptyResponse { path: path.into() })?;

        // A rejected login answers with no token, an empty string, or a
        // stub object instead of the opaque token string.
        let token = doc.get("token").and_then(Value::as_str).unwrap_or_default();
        if token.is_empty() || token == "{}" {
            return Err(Error::Authentication {
                message: format!("login rejected (HTTP {status}): response carried no token"),
            });
        }

        debug!("login successful");
        Ok(Session::new(token.to_owned()))
    }

    /// Resolve a human-readable login domain to its internal id.
    ///
    /// Only the standalone (Mso) login flow needs this; Nd sends the
    /// domain name as-is.
    pub async fn resolve_domain_id(&self, domain: &str) -> Result<String, Error> {
        let path = "/api/v1/auth/login-domains";
        let req = self.request(Method::GET, path, None, false).await?;
        let (doc, _) = self.execute(req).await?;
        let doc = doc.ok_or_else(|| Error::EmptyResponse { path: path.into() })?;

        let listing: LoginDomains =
            serde_json::from_value(doc).map_err(|e| Error::Deserialization {
                message: format!("GET {path}: {e}"),
                body: String::new(),
            })?;

        listing
            .domains
            .into_iter()
            .find(|d| d.name == domain)
            .map(|d| d.id)
            .ok_or_else(|| Error::DomainNotFound {
                domain: domain.to_owned(),
            })
    }

    // ── Request construction & execution ─────────────────────────────

    /// Build a request against the orchestrator.
    ///
    /// Applies the platform path rewrite, resolves the path against the
    /// base URL, attaches `body` as JSON for non-GET/DELETE methods,
    /// and injects the bearer token when `authenticated`. Fails with
    /// [`Error::AuthExpired`] if no valid session is cached -- the
    /// refresh trigger is the caller's responsibility.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        authenticated: bool,
    ) -> Result<reqwest::Request, Error> {
        let effective = self.platform.effective_path(path);
        let url = self.base_url.join(&effective)?;

        let mut builder = self.http.request(method.clone(), url);
        if method != Method::GET && method != Method::DELETE {
            if let Some(body) = body {
                builder = builder.json(body);
            }
        }

        if authenticated {
            let guard = self.session.lock().await;
            match guard.as_ref() {
                Some(session) if session.is_valid() => {
                    builder = builder.bearer_auth(session.token());
                }
                // Never send a stale token.
                _ => return Err(Error::AuthExpired),
            }
        }

        builder.build().map_err(Error::Transport)
    }

    /// Send a request and decode the response body.
    ///
    /// DELETE requests and `204 No Content` short-circuit to `None`.
    /// Otherwise the full body is read and parsed as JSON; an empty or
    /// `null` body also yields `None` (callers that require a document
    /// turn that into [`Error::EmptyResponse`]). Transport failures
    /// surface unmodified -- there is no retry.
    pub async fn execute(
        &self,
        req: reqwest::Request,
    ) -> Result<(Option<Document>, StatusCode), Error> {
        let method = req.method().clone();
        let url = req.url().clone();
        debug!("{method} {url}");

        let resp = self.http.execute(req).await.map_err(Error::Transport)?;
        let status = resp.status();
        let body = resp.text().await.map_err(Error::Transport)?;

        if method == Method::DELETE || status == StatusCode::NO_CONTENT {
            return Ok((None, status));
        }

        let trimmed = body.trim();
        if trimmed.is_empty() || trimmed == "null" {
            return Ok((None, status));
        }

        let doc = serde_json::from_str(trimmed).map_err(|e| Error::Deserialization {
            message: format!("{method} {url}: {e}"),
            body: body.clone(),
        })?;
        Ok((Some(doc), status))
    }
}

// ── Login-domain listing (wire shape) ───────────────────────────────

#[derive(Debug, Deserialize)]
struct LoginDomains {
    #[serde(default)]
    domains: Vec<LoginDomain>,
}

#[derive(Debug, Deserialize)]
struct LoginDomain {
    name: String,
    id: String,
}
