//! Flattening layer over the orchestrator schema tree.
//!
//! [`SchemaLister`] walks the nested schema documents served by
//! `fabriq-api` and emits flat, typed entity records with synthesized
//! composite ids. The walk itself is a single generic descent
//! ([`walk::descend`]); each listing is just a chain of collection
//! names plus a leaf decoder.

pub mod error;
pub mod lister;
pub mod records;
pub mod refpath;
pub mod sink;
pub mod walk;
pub mod wire;

pub use error::CoreError;
pub use lister::SchemaLister;
pub use records::{
    SchemaTemplate, SiteAnpEpgStaticPort, TemplateAnp, TemplateAnpEpg, TemplateBd, TemplateVrf,
};
pub use refpath::{EpgRef, ObjectRef, PortPath, parse_epg_ref, parse_object_ref, parse_port_path};
pub use sink::{FnSink, RowSink};
