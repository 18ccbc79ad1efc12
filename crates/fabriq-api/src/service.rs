// Authenticated resource-access façade.
//
// Listings never touch `Client::request` directly; they go through
// this thin wrapper, which guarantees a valid session, performs the
// GET, and enforces the non-empty-body contract.

use reqwest::Method;
use tracing::debug;

use crate::client::{Client, Document};
use crate::error::Error;

/// Prefix under which the standard resource tree lives.
pub const API_PREFIX: &str = "/api/v1";

/// Authenticated GET access to the orchestrator resource tree.
///
/// Holds a non-owning reference to its [`Client`]; cheap to construct
/// per call via [`Client::service`].
pub struct ServiceManager<'a> {
    client: &'a Client,
}

impl<'a> ServiceManager<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Fetch a resource by distinguished name under the API prefix,
    /// following the `.json` path convention.
    pub async fn get(&self, dn: &str) -> Result<Document, Error> {
        self.fetch(&format!("{API_PREFIX}/{dn}.json")).await
    }

    /// Fetch a caller-supplied path verbatim.
    ///
    /// Used for endpoints outside the `dn.json` convention: the
    /// list-identity index and per-schema detail documents.
    pub async fn get_by_url(&self, path: &str) -> Result<Document, Error> {
        self.fetch(path).await
    }

    async fn fetch(&self, path: &str) -> Result<Document, Error> {
        self.client.ensure_session().await?;

        let req = self.client.request(Method::GET, path, None, true).await?;
        let (doc, status) = self.client.execute(req).await?;
        debug!("GET {path} -> {status}");

        let doc = doc.ok_or_else(|| Error::EmptyResponse { path: path.into() })?;
        check_for_errors(&doc)?;
        Ok(doc)
    }
}

/// Inspect a response document for a server-reported error envelope.
///
/// The orchestrator reports most failures through HTTP status codes;
/// this hook exists for deployments that wrap errors in the body. It
/// currently passes everything through.
pub fn check_for_errors(_doc: &Document) -> Result<(), Error> {
    Ok(())
}
