// Typed wire shapes for schema documents.
//
// Each struct decodes one node of the nested schema tree at the JSON
// boundary. Only the fields the listings project are declared; the
// orchestrator sends plenty more, all ignored.

use std::fmt;

use serde::Deserialize;

use fabriq_api::Document;

use crate::error::CoreError;

/// Decode a wire node into its typed shape, labelling failures with
/// the node kind for diagnosability.
pub fn decode<T: serde::de::DeserializeOwned>(
    context: &str,
    node: &Document,
) -> Result<T, CoreError> {
    serde_json::from_value(node.clone()).map_err(|e| CoreError::Decode {
        context: context.to_owned(),
        source: e,
    })
}

/// `GET /api/v1/schemas/list-identity` -- every schema by id, with the
/// template index inlined.
#[derive(Debug, Deserialize)]
pub struct SchemaIdentity {
    #[serde(default)]
    pub schemas: Vec<SchemaRef>,
}

#[derive(Debug, Deserialize)]
pub struct SchemaRef {
    pub id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateAttrs {
    pub name: String,
    pub display_name: Option<String>,
    pub tenant_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnpAttrs {
    pub name: String,
    pub display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VrfAttrs {
    pub name: String,
    pub display_name: Option<String>,
    #[serde(rename = "l3MCast")]
    pub l3_multicast: Option<bool>,
    pub vz_any_enabled: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BdAttrs {
    pub name: String,
    pub display_name: Option<String>,
    pub vrf_ref: Option<String>,
    pub l2_unknown_unicast: Option<String>,
    pub intersite_bum_traffic_allow: Option<bool>,
    pub optimize_wan_bandwidth: Option<bool>,
    pub l2_stretch: Option<bool>,
    #[serde(rename = "l3MCast")]
    pub l3_multicast: Option<bool>,
    pub arp_flood: Option<bool>,
    pub unicast_routing: Option<bool>,
    #[serde(rename = "v6unkMcastAct")]
    pub v6_unknown_multicast: Option<String>,
    pub multi_dst_pkt_act: Option<String>,
    pub unk_mcast_act: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EpgAttrs {
    pub name: String,
    pub display_name: Option<String>,
    pub bd_ref: Option<String>,
    pub vrf_ref: Option<String>,
    #[serde(rename = "uSegEpg")]
    pub useg_epg: Option<bool>,
    pub intra_epg: Option<String>,
    #[serde(rename = "mCastSource")]
    pub mcast_source: Option<bool>,
    pub proxy_arp: Option<bool>,
    pub preferred_group: Option<bool>,
}

/// A site association inside a schema. Carries the same anp/epg
/// nesting as templates, holding site-local overrides.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteAttrs {
    pub site_id: String,
    pub template_name: String,
}

/// A site-local endpoint group, pointing back at its template-level
/// definition.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteEpgAttrs {
    pub epg_ref: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaticPortAttrs {
    #[serde(rename = "type")]
    pub path_type: String,
    pub path: String,
    pub port_encap_vlan: Option<u32>,
    pub mode: Option<String>,
    pub deployment_immediacy: Option<String>,
    pub micro_seg_vlan: Option<u32>,
    pub fex: Option<NumOrString>,
}

/// Some orchestrator builds send fex ids as numbers, others as
/// strings. Normalize at the boundary.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum NumOrString {
    Num(u64),
    Str(String),
}

impl fmt::Display for NumOrString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Num(n) => write!(f, "{n}"),
            Self::Str(s) => write!(f, "{s}"),
        }
    }
}
