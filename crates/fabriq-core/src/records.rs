// Flat entity records.
//
// One record per leaf of a listing, each carrying a synthesized
// composite id: the '/'-joined chain of ancestor keys down to the
// leaf's own name. The id is never stored server-side -- it exists
// purely to give every emitted row a deterministic identity.

use serde::Serialize;

use crate::error::CoreError;
use crate::refpath::{parse_epg_ref, parse_object_ref, parse_port_path};
use crate::wire::{
    AnpAttrs, BdAttrs, EpgAttrs, SiteAttrs, StaticPortAttrs, TemplateAttrs, VrfAttrs,
};

/// A template within a schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaTemplate {
    pub id: String,
    pub schema_id: String,
    pub tenant_id: Option<String>,
    pub name: String,
    pub display_name: Option<String>,
}

impl SchemaTemplate {
    pub fn from_wire(schema_id: &str, attrs: TemplateAttrs) -> Self {
        Self {
            id: format!("{schema_id}/template/{}", attrs.name),
            schema_id: schema_id.to_owned(),
            tenant_id: attrs.tenant_id,
            name: attrs.name,
            display_name: attrs.display_name,
        }
    }
}

/// An application network profile within a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateAnp {
    pub id: String,
    pub schema_id: String,
    pub template_name: String,
    pub name: String,
    pub display_name: Option<String>,
}

impl TemplateAnp {
    pub fn from_wire(schema_id: &str, template: &str, attrs: AnpAttrs) -> Self {
        Self {
            id: format!("{schema_id}/template/{template}/anp/{}", attrs.name),
            schema_id: schema_id.to_owned(),
            template_name: template.to_owned(),
            name: attrs.name,
            display_name: attrs.display_name,
        }
    }
}

/// A VRF within a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateVrf {
    pub id: String,
    pub schema_id: String,
    pub template_name: String,
    pub name: String,
    pub display_name: Option<String>,
    pub layer3_multicast: Option<bool>,
    pub vzany: Option<bool>,
}

impl TemplateVrf {
    pub fn from_wire(schema_id: &str, template: &str, attrs: VrfAttrs) -> Self {
        Self {
            id: format!("{schema_id}/template/{template}/vrf/{}", attrs.name),
            schema_id: schema_id.to_owned(),
            template_name: template.to_owned(),
            name: attrs.name,
            display_name: attrs.display_name,
            layer3_multicast: attrs.l3_multicast,
            vzany: attrs.vz_any_enabled,
        }
    }
}

/// A bridge domain within a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateBd {
    pub id: String,
    pub schema_id: String,
    pub template_name: String,
    pub name: String,
    pub display_name: Option<String>,
    pub vrf_name: Option<String>,
    pub vrf_schema_id: Option<String>,
    pub vrf_template_name: Option<String>,
    pub layer2_unknown_unicast: Option<String>,
    pub intersite_bum_traffic: Option<bool>,
    pub optimize_wan_bandwidth: Option<bool>,
    pub layer2_stretch: Option<bool>,
    pub layer3_multicast: Option<bool>,
    pub arp_flooding: Option<bool>,
    pub unicast_routing: Option<bool>,
    pub ipv6_unknown_multicast_flooding: Option<String>,
    pub multi_destination_flooding: Option<String>,
    pub unknown_multicast_flooding: Option<String>,
}

impl TemplateBd {
    pub fn from_wire(schema_id: &str, template: &str, attrs: BdAttrs) -> Result<Self, CoreError> {
        let vrf = attrs
            .vrf_ref
            .as_deref()
            .filter(|r| !r.is_empty())
            .map(|r| parse_object_ref(r, "vrfs"))
            .transpose()?;

        Ok(Self {
            id: format!("{schema_id}/template/{template}/bd/{}", attrs.name),
            schema_id: schema_id.to_owned(),
            template_name: template.to_owned(),
            name: attrs.name,
            display_name: attrs.display_name,
            vrf_name: vrf.as_ref().map(|r| r.name.clone()),
            vrf_schema_id: vrf.as_ref().map(|r| r.schema_id.clone()),
            vrf_template_name: vrf.map(|r| r.template),
            layer2_unknown_unicast: attrs.l2_unknown_unicast,
            intersite_bum_traffic: attrs.intersite_bum_traffic_allow,
            optimize_wan_bandwidth: attrs.optimize_wan_bandwidth,
            layer2_stretch: attrs.l2_stretch,
            layer3_multicast: attrs.l3_multicast,
            arp_flooding: attrs.arp_flood,
            unicast_routing: attrs.unicast_routing,
            ipv6_unknown_multicast_flooding: attrs.v6_unknown_multicast,
            multi_destination_flooding: attrs
                .multi_dst_pkt_act
                .map(|raw| map_multi_destination(&raw)),
            unknown_multicast_flooding: attrs.unk_mcast_act,
        })
    }
}

/// Translate the wire vocabulary for multi-destination flooding into
/// the configuration vocabulary. Unrecognized values pass through.
fn map_multi_destination(raw: &str) -> String {
    match raw {
        "bd-flood" => "flood_in_bd".to_owned(),
        "encap-flood" => "flood_in_encap".to_owned(),
        other => other.to_owned(),
    }
}

/// An endpoint group within an application network profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateAnpEpg {
    pub id: String,
    pub schema_id: String,
    pub template_name: String,
    pub anp_name: String,
    pub name: String,
    pub display_name: Option<String>,
    pub bd_name: Option<String>,
    pub bd_schema_id: Option<String>,
    pub bd_template_name: Option<String>,
    pub vrf_name: Option<String>,
    pub vrf_schema_id: Option<String>,
    pub vrf_template_name: Option<String>,
    pub useg_epg: Option<bool>,
    pub intra_epg: Option<String>,
    pub intersite_multicast_source: Option<bool>,
    pub proxy_arp: Option<bool>,
    pub preferred_group: Option<bool>,
}

impl TemplateAnpEpg {
    pub fn from_wire(
        schema_id: &str,
        template: &str,
        anp: &str,
        attrs: EpgAttrs,
    ) -> Result<Self, CoreError> {
        let bd = attrs
            .bd_ref
            .as_deref()
            .filter(|r| !r.is_empty())
            .map(|r| parse_object_ref(r, "bds"))
            .transpose()?;
        let vrf = attrs
            .vrf_ref
            .as_deref()
            .filter(|r| !r.is_empty())
            .map(|r| parse_object_ref(r, "vrfs"))
            .transpose()?;

        Ok(Self {
            id: format!("{schema_id}/template/{template}/anp/{anp}/epg/{}", attrs.name),
            schema_id: schema_id.to_owned(),
            template_name: template.to_owned(),
            anp_name: anp.to_owned(),
            name: attrs.name,
            display_name: attrs.display_name,
            bd_name: bd.as_ref().map(|r| r.name.clone()),
            bd_schema_id: bd.as_ref().map(|r| r.schema_id.clone()),
            bd_template_name: bd.map(|r| r.template),
            vrf_name: vrf.as_ref().map(|r| r.name.clone()),
            vrf_schema_id: vrf.as_ref().map(|r| r.schema_id.clone()),
            vrf_template_name: vrf.map(|r| r.template),
            useg_epg: attrs.useg_epg,
            intra_epg: attrs.intra_epg,
            intersite_multicast_source: attrs.mcast_source,
            proxy_arp: attrs.proxy_arp,
            preferred_group: attrs.preferred_group,
        })
    }
}

/// A static port binding under a site-local endpoint group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteAnpEpgStaticPort {
    pub id: String,
    pub schema_id: String,
    pub site_id: String,
    pub template_name: String,
    pub anp_name: String,
    pub epg_name: String,
    pub path_type: String,
    pub pod: String,
    pub leaf: String,
    pub path: String,
    pub mode: Option<String>,
    pub deployment_immediacy: Option<String>,
    pub vlan: Option<u32>,
    pub micro_seg_vlan: Option<u32>,
    pub fex: Option<String>,
}

impl SiteAnpEpgStaticPort {
    pub fn from_wire(
        schema_id: &str,
        site: &SiteAttrs,
        epg_ref: &str,
        attrs: StaticPortAttrs,
    ) -> Result<Self, CoreError> {
        let epg = parse_epg_ref(epg_ref)?;
        let port = parse_port_path(&attrs.path)?;
        let fex = attrs.fex.map(|f| f.to_string());

        let id = format!(
            "{schema_id}/site/{}/template/{}/anp/{}/epg/{}/staticPortPod/{}/staticPortLeaf/{}/pathType/{}/fex/{}/path/{}",
            site.site_id,
            site.template_name,
            epg.anp,
            epg.name,
            port.pod,
            port.leaf,
            attrs.path_type,
            fex.as_deref().unwrap_or_default(),
            port.interface,
        );

        Ok(Self {
            id,
            schema_id: schema_id.to_owned(),
            site_id: site.site_id.clone(),
            template_name: site.template_name.clone(),
            anp_name: epg.anp,
            epg_name: epg.name,
            path_type: attrs.path_type,
            pod: port.pod,
            leaf: port.leaf,
            path: port.interface,
            mode: attrs.mode,
            deployment_immediacy: attrs.deployment_immediacy,
            vlan: attrs.port_encap_vlan,
            micro_seg_vlan: attrs.micro_seg_vlan,
            fex,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composite_id_round_trips_ancestor_keys() {
        let record = TemplateAnp::from_wire(
            "5f2a",
            "Template1",
            AnpAttrs {
                name: "ANP1".into(),
                display_name: None,
            },
        );
        assert_eq!(record.id, "5f2a/template/Template1/anp/ANP1");

        let parts: Vec<&str> = record.id.split('/').collect();
        assert_eq!(parts, [
            record.schema_id.as_str(),
            "template",
            record.template_name.as_str(),
            "anp",
            record.name.as_str(),
        ]);
    }

    #[test]
    fn bd_maps_multi_destination_vocabulary() {
        let attrs = |act: &str| BdAttrs {
            name: "BD1".into(),
            display_name: None,
            vrf_ref: None,
            l2_unknown_unicast: None,
            intersite_bum_traffic_allow: None,
            optimize_wan_bandwidth: None,
            l2_stretch: None,
            l3_multicast: None,
            arp_flood: None,
            unicast_routing: None,
            v6_unknown_multicast: None,
            multi_dst_pkt_act: Some(act.into()),
            unk_mcast_act: None,
        };

        for (wire, mapped) in [
            ("bd-flood", "flood_in_bd"),
            ("encap-flood", "flood_in_encap"),
            ("drop", "drop"),
        ] {
            let bd = TemplateBd::from_wire("s1", "T1", attrs(wire)).expect("bd");
            assert_eq!(bd.multi_destination_flooding.as_deref(), Some(mapped));
        }
    }

    #[test]
    fn epg_with_malformed_bd_ref_is_an_error() {
        let attrs = EpgAttrs {
            name: "Web".into(),
            display_name: None,
            bd_ref: Some("/schemas/s1/templates".into()),
            vrf_ref: None,
            useg_epg: None,
            intra_epg: None,
            mcast_source: None,
            proxy_arp: None,
            preferred_group: None,
        };
        let result = TemplateAnpEpg::from_wire("s1", "T1", "A1", attrs);
        assert!(matches!(result, Err(CoreError::MalformedReference { .. })));
    }
}
