//! Async read-only client for multi-site fabric orchestrators
//! (Cisco Nexus Dashboard Orchestrator and standalone MSO).
//!
//! The crate owns the session layer only:
//!
//! - **[`Client`]** -- transport, platform-aware path construction,
//!   bearer-token acquisition and expiry, request execution.
//! - **[`ClientRegistry`]** -- synchronized process-wide cache of
//!   clients keyed by full connection configuration.
//! - **[`ServiceManager`]** -- authenticated-GET façade used by the
//!   resource walkers in `fabriq-core`.
//!
//! Responses are surfaced as untyped [`Document`]s; typed decoding of
//! the schema tree happens one layer up.

pub mod auth;
pub mod client;
pub mod error;
pub mod registry;
pub mod service;
pub mod transport;

pub use auth::{DEFAULT_LOGIN_DOMAIN, Platform, Session, TOKEN_LIFETIME};
pub use client::{Client, ConnectionSettings, Document};
pub use error::Error;
pub use registry::ClientRegistry;
pub use service::{API_PREFIX, ServiceManager};
pub use transport::{DEFAULT_TIMEOUT_SECS, TlsMode, TransportConfig};
