//! Listing command handlers.
//!
//! Each handler runs one schema-tree listing, collects the records,
//! and renders them in the selected output format.

use tabled::Tabled;

use fabriq_api::Client;
use fabriq_core::{
    SchemaLister, SchemaTemplate, SiteAnpEpgStaticPort, TemplateAnp, TemplateAnpEpg, TemplateBd,
    TemplateVrf,
};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

fn opt(value: Option<&str>) -> String {
    value.unwrap_or_default().to_owned()
}

fn flag(value: Option<bool>) -> String {
    value.map(|b| b.to_string()).unwrap_or_default()
}

// ── Templates ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct TemplateRow {
    #[tabled(rename = "Schema")]
    schema: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Display Name")]
    display_name: String,
    #[tabled(rename = "Tenant")]
    tenant: String,
}

impl From<&SchemaTemplate> for TemplateRow {
    fn from(t: &SchemaTemplate) -> Self {
        Self {
            schema: t.schema_id.clone(),
            name: t.name.clone(),
            display_name: opt(t.display_name.as_deref()),
            tenant: opt(t.tenant_id.as_deref()),
        }
    }
}

pub async fn templates(client: &Client, global: &GlobalOpts) -> Result<(), CliError> {
    let mut rows: Vec<SchemaTemplate> = Vec::new();
    SchemaLister::new(client).schema_templates(&mut rows).await?;
    let out = output::render_list(&global.output, &rows, |r| TemplateRow::from(r), |t| t.id.clone());
    output::print_output(&out, global.quiet);
    Ok(())
}

// ── ANPs ────────────────────────────────────────────────────────────

#[derive(Tabled)]
struct AnpRow {
    #[tabled(rename = "Schema")]
    schema: String,
    #[tabled(rename = "Template")]
    template: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Display Name")]
    display_name: String,
}

impl From<&TemplateAnp> for AnpRow {
    fn from(a: &TemplateAnp) -> Self {
        Self {
            schema: a.schema_id.clone(),
            template: a.template_name.clone(),
            name: a.name.clone(),
            display_name: opt(a.display_name.as_deref()),
        }
    }
}

pub async fn anps(client: &Client, global: &GlobalOpts) -> Result<(), CliError> {
    let mut rows: Vec<TemplateAnp> = Vec::new();
    SchemaLister::new(client).template_anps(&mut rows).await?;
    let out = output::render_list(&global.output, &rows, |r| AnpRow::from(r), |a| a.id.clone());
    output::print_output(&out, global.quiet);
    Ok(())
}

// ── VRFs ────────────────────────────────────────────────────────────

#[derive(Tabled)]
struct VrfRow {
    #[tabled(rename = "Schema")]
    schema: String,
    #[tabled(rename = "Template")]
    template: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "L3 Multicast")]
    l3_multicast: String,
    #[tabled(rename = "vzAny")]
    vzany: String,
}

impl From<&TemplateVrf> for VrfRow {
    fn from(v: &TemplateVrf) -> Self {
        Self {
            schema: v.schema_id.clone(),
            template: v.template_name.clone(),
            name: v.name.clone(),
            l3_multicast: flag(v.layer3_multicast),
            vzany: flag(v.vzany),
        }
    }
}

pub async fn vrfs(client: &Client, global: &GlobalOpts) -> Result<(), CliError> {
    let mut rows: Vec<TemplateVrf> = Vec::new();
    SchemaLister::new(client).template_vrfs(&mut rows).await?;
    let out = output::render_list(&global.output, &rows, |r| VrfRow::from(r), |v| v.id.clone());
    output::print_output(&out, global.quiet);
    Ok(())
}

// ── Bridge domains ──────────────────────────────────────────────────

#[derive(Tabled)]
struct BdRow {
    #[tabled(rename = "Schema")]
    schema: String,
    #[tabled(rename = "Template")]
    template: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "VRF")]
    vrf: String,
    #[tabled(rename = "L2 Stretch")]
    l2_stretch: String,
    #[tabled(rename = "Multi-Dest Flooding")]
    multi_dest: String,
}

impl From<&TemplateBd> for BdRow {
    fn from(b: &TemplateBd) -> Self {
        Self {
            schema: b.schema_id.clone(),
            template: b.template_name.clone(),
            name: b.name.clone(),
            vrf: opt(b.vrf_name.as_deref()),
            l2_stretch: flag(b.layer2_stretch),
            multi_dest: opt(b.multi_destination_flooding.as_deref()),
        }
    }
}

pub async fn bds(client: &Client, global: &GlobalOpts) -> Result<(), CliError> {
    let mut rows: Vec<TemplateBd> = Vec::new();
    SchemaLister::new(client).template_bds(&mut rows).await?;
    let out = output::render_list(&global.output, &rows, |r| BdRow::from(r), |b| b.id.clone());
    output::print_output(&out, global.quiet);
    Ok(())
}

// ── EPGs ────────────────────────────────────────────────────────────

#[derive(Tabled)]
struct EpgRow {
    #[tabled(rename = "Schema")]
    schema: String,
    #[tabled(rename = "Template")]
    template: String,
    #[tabled(rename = "ANP")]
    anp: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "BD")]
    bd: String,
    #[tabled(rename = "VRF")]
    vrf: String,
    #[tabled(rename = "Preferred Group")]
    preferred_group: String,
}

impl From<&TemplateAnpEpg> for EpgRow {
    fn from(e: &TemplateAnpEpg) -> Self {
        Self {
            schema: e.schema_id.clone(),
            template: e.template_name.clone(),
            anp: e.anp_name.clone(),
            name: e.name.clone(),
            bd: opt(e.bd_name.as_deref()),
            vrf: opt(e.vrf_name.as_deref()),
            preferred_group: flag(e.preferred_group),
        }
    }
}

pub async fn epgs(client: &Client, global: &GlobalOpts) -> Result<(), CliError> {
    let mut rows: Vec<TemplateAnpEpg> = Vec::new();
    SchemaLister::new(client).template_anp_epgs(&mut rows).await?;
    let out = output::render_list(&global.output, &rows, |r| EpgRow::from(r), |e| e.id.clone());
    output::print_output(&out, global.quiet);
    Ok(())
}

// ── Static ports ────────────────────────────────────────────────────

#[derive(Tabled)]
struct StaticPortRow {
    #[tabled(rename = "Schema")]
    schema: String,
    #[tabled(rename = "Site")]
    site: String,
    #[tabled(rename = "EPG")]
    epg: String,
    #[tabled(rename = "Type")]
    path_type: String,
    #[tabled(rename = "Pod")]
    pod: String,
    #[tabled(rename = "Leaf")]
    leaf: String,
    #[tabled(rename = "Path")]
    path: String,
    #[tabled(rename = "VLAN")]
    vlan: String,
}

impl From<&SiteAnpEpgStaticPort> for StaticPortRow {
    fn from(p: &SiteAnpEpgStaticPort) -> Self {
        Self {
            schema: p.schema_id.clone(),
            site: p.site_id.clone(),
            epg: format!("{}/{}", p.anp_name, p.epg_name),
            path_type: p.path_type.clone(),
            pod: p.pod.clone(),
            leaf: p.leaf.clone(),
            path: p.path.clone(),
            vlan: p.vlan.map(|v| v.to_string()).unwrap_or_default(),
        }
    }
}

pub async fn static_ports(client: &Client, global: &GlobalOpts) -> Result<(), CliError> {
    let mut rows: Vec<SiteAnpEpgStaticPort> = Vec::new();
    SchemaLister::new(client)
        .site_anp_epg_static_ports(&mut rows)
        .await?;
    let out = output::render_list(&global.output, &rows, |r| StaticPortRow::from(r), |p| p.id.clone());
    output::print_output(&out, global.quiet);
    Ok(())
}
