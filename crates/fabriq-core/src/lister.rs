// Schema-tree listings.
//
// Every listing follows the same shape: fetch the schema index, fetch
// each schema document, descend a named chain of nested collections,
// decode the leaf and its ancestors, emit one flat record per leaf.

use fabriq_api::{API_PREFIX, Client, Document};
use tracing::debug;

use crate::error::CoreError;
use crate::records::{
    SchemaTemplate, SiteAnpEpgStaticPort, TemplateAnp, TemplateAnpEpg, TemplateBd, TemplateVrf,
};
use crate::sink::RowSink;
use crate::walk::descend;
use crate::wire::{
    self, AnpAttrs, BdAttrs, EpgAttrs, SchemaIdentity, SchemaRef, SiteAttrs, SiteEpgAttrs,
    StaticPortAttrs, TemplateAttrs, VrfAttrs,
};

/// Lists flattened entity records from the orchestrator schema tree.
///
/// Rows stream to the caller's [`RowSink`] as soon as each one is
/// built. Nothing is cached between calls; re-running a listing
/// re-fetches the index and every schema document.
pub struct SchemaLister<'a> {
    client: &'a Client,
}

impl<'a> SchemaLister<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Every template across all schemas.
    ///
    /// The index document inlines the template list, so this listing
    /// needs no per-schema fetch.
    pub async fn schema_templates(
        &self,
        sink: &mut dyn RowSink<SchemaTemplate>,
    ) -> Result<(), CoreError> {
        let identity = self.identity().await?;
        descend(&identity, &["schemas", "templates"], &mut |ancestors, leaf| {
            let [schema_node] = ancestors else {
                return Ok(());
            };
            let schema: SchemaRef = wire::decode("schema", schema_node)?;
            let attrs: TemplateAttrs = wire::decode("template", leaf)?;
            sink.emit(SchemaTemplate::from_wire(&schema.id, attrs));
            Ok(())
        })
    }

    /// Every application network profile across all schemas.
    pub async fn template_anps(
        &self,
        sink: &mut dyn RowSink<TemplateAnp>,
    ) -> Result<(), CoreError> {
        for schema_id in self.schema_ids().await? {
            let doc = self.schema_detail(&schema_id).await?;
            descend(&doc, &["templates", "anps"], &mut |ancestors, leaf| {
                let [template_node] = ancestors else {
                    return Ok(());
                };
                let template: TemplateAttrs = wire::decode("template", template_node)?;
                let attrs: AnpAttrs = wire::decode("anp", leaf)?;
                sink.emit(TemplateAnp::from_wire(&schema_id, &template.name, attrs));
                Ok(())
            })?;
        }
        Ok(())
    }

    /// Every VRF across all schemas.
    pub async fn template_vrfs(
        &self,
        sink: &mut dyn RowSink<TemplateVrf>,
    ) -> Result<(), CoreError> {
        for schema_id in self.schema_ids().await? {
            let doc = self.schema_detail(&schema_id).await?;
            descend(&doc, &["templates", "vrfs"], &mut |ancestors, leaf| {
                let [template_node] = ancestors else {
                    return Ok(());
                };
                let template: TemplateAttrs = wire::decode("template", template_node)?;
                let attrs: VrfAttrs = wire::decode("vrf", leaf)?;
                sink.emit(TemplateVrf::from_wire(&schema_id, &template.name, attrs));
                Ok(())
            })?;
        }
        Ok(())
    }

    /// Every bridge domain across all schemas.
    pub async fn template_bds(&self, sink: &mut dyn RowSink<TemplateBd>) -> Result<(), CoreError> {
        for schema_id in self.schema_ids().await? {
            let doc = self.schema_detail(&schema_id).await?;
            descend(&doc, &["templates", "bds"], &mut |ancestors, leaf| {
                let [template_node] = ancestors else {
                    return Ok(());
                };
                let template: TemplateAttrs = wire::decode("template", template_node)?;
                let attrs: BdAttrs = wire::decode("bd", leaf)?;
                sink.emit(TemplateBd::from_wire(&schema_id, &template.name, attrs)?);
                Ok(())
            })?;
        }
        Ok(())
    }

    /// Every endpoint group across all schemas.
    pub async fn template_anp_epgs(
        &self,
        sink: &mut dyn RowSink<TemplateAnpEpg>,
    ) -> Result<(), CoreError> {
        for schema_id in self.schema_ids().await? {
            let doc = self.schema_detail(&schema_id).await?;
            descend(&doc, &["templates", "anps", "epgs"], &mut |ancestors, leaf| {
                let [template_node, anp_node] = ancestors else {
                    return Ok(());
                };
                let template: TemplateAttrs = wire::decode("template", template_node)?;
                let anp: AnpAttrs = wire::decode("anp", anp_node)?;
                let attrs: EpgAttrs = wire::decode("epg", leaf)?;
                sink.emit(TemplateAnpEpg::from_wire(
                    &schema_id,
                    &template.name,
                    &anp.name,
                    attrs,
                )?);
                Ok(())
            })?;
        }
        Ok(())
    }

    /// Every static port binding under site-local endpoint groups.
    pub async fn site_anp_epg_static_ports(
        &self,
        sink: &mut dyn RowSink<SiteAnpEpgStaticPort>,
    ) -> Result<(), CoreError> {
        for schema_id in self.schema_ids().await? {
            let doc = self.schema_detail(&schema_id).await?;
            descend(
                &doc,
                &["sites", "anps", "epgs", "staticPorts"],
                &mut |ancestors, leaf| {
                    let [site_node, _anp_node, epg_node] = ancestors else {
                        return Ok(());
                    };
                    let site: SiteAttrs = wire::decode("site", site_node)?;
                    let epg: SiteEpgAttrs = wire::decode("site epg", epg_node)?;
                    let attrs: StaticPortAttrs = wire::decode("static port", leaf)?;
                    sink.emit(SiteAnpEpgStaticPort::from_wire(
                        &schema_id,
                        &site,
                        &epg.epg_ref,
                        attrs,
                    )?);
                    Ok(())
                },
            )?;
        }
        Ok(())
    }

    /// Fetch the schema index document.
    async fn identity(&self) -> Result<Document, CoreError> {
        let path = format!("{API_PREFIX}/schemas/list-identity");
        Ok(self.client.service().get_by_url(&path).await?)
    }

    /// The ids of every schema the orchestrator knows about.
    async fn schema_ids(&self) -> Result<Vec<String>, CoreError> {
        let identity: SchemaIdentity = wire::decode("schema index", &self.identity().await?)?;
        debug!(count = identity.schemas.len(), "schema index fetched");
        Ok(identity.schemas.into_iter().map(|s| s.id).collect())
    }

    /// Fetch one full schema document by id.
    async fn schema_detail(&self, id: &str) -> Result<Document, CoreError> {
        let path = format!("{API_PREFIX}/schemas/{id}");
        Ok(self.client.service().get_by_url(&path).await?)
    }
}
