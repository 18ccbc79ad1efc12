#![allow(clippy::unwrap_used)]
// End-to-end listing tests against a mocked orchestrator.

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use fabriq_api::{
    Client, ConnectionSettings, DEFAULT_LOGIN_DOMAIN, Platform, TransportConfig,
};
use fabriq_core::{CoreError, SchemaLister};

// ── Helpers ─────────────────────────────────────────────────────────

async fn client(server: &MockServer) -> Client {
    Client::new(&ConnectionSettings {
        base_url: server.uri(),
        username: "admin".into(),
        password: "hunter2".to_owned().into(),
        login_domain: DEFAULT_LOGIN_DOMAIN.into(),
        platform: Platform::Nd,
        transport: TransportConfig::default(),
    })
    .unwrap()
}

async fn mount_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "tok-123" })))
        .mount(server)
        .await;
}

async fn mount_identity(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/mso/api/v1/schemas/list-identity"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn mount_schema(server: &MockServer, id: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!("/mso/api/v1/schemas/{id}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

fn identity_fixture() -> serde_json::Value {
    json!({
        "schemas": [
            {
                "id": "s1",
                "displayName": "Prod",
                "templates": [
                    { "name": "Template1", "displayName": "Template 1", "tenantId": "t-99" },
                    { "name": "Template2" },
                ],
            },
        ],
    })
}

fn schema_fixture() -> serde_json::Value {
    json!({
        "id": "s1",
        "templates": [
            {
                "name": "Template1",
                "tenantId": "t-99",
                "anps": [
                    {
                        "name": "ANP1",
                        "displayName": "App profile",
                        "epgs": [
                            {
                                "name": "Web",
                                "displayName": "Web tier",
                                "bdRef": "/schemas/s1/templates/Template1/bds/BD1",
                                "vrfRef": "schemas/s1/templates/Template1/vrfs/VRF1",
                                "uSegEpg": false,
                                "proxyArp": true,
                                "preferredGroup": false,
                            },
                        ],
                    },
                ],
                "vrfs": [
                    { "name": "VRF1", "l3MCast": false, "vzAnyEnabled": true },
                ],
                "bds": [
                    {
                        "name": "BD1",
                        "vrfRef": "/schemas/s1/templates/Template1/vrfs/VRF1",
                        "l2UnknownUnicast": "proxy",
                        "l2Stretch": true,
                        "arpFlood": false,
                        "multiDstPktAct": "bd-flood",
                    },
                ],
            },
            { "name": "Template2" },
        ],
        "sites": [
            {
                "siteId": "site-1",
                "templateName": "Template1",
                "anps": [
                    {
                        "anpRef": "/schemas/s1/templates/Template1/anps/ANP1",
                        "epgs": [
                            {
                                "epgRef": "/schemas/s1/templates/Template1/anps/ANP1/epgs/Web",
                                "staticPorts": [
                                    {
                                        "type": "port",
                                        "path": "topology/pod-1/paths-101/pathep-[eth1/33]",
                                        "portEncapVlan": 100,
                                        "mode": "regular",
                                        "deploymentImmediacy": "lazy",
                                        "fex": 105,
                                    },
                                    {
                                        "type": "vpc",
                                        "path": "topology/pod-1/protpaths-101-102/pathep-[vpc_pg_web]",
                                        "portEncapVlan": 200,
                                    },
                                ],
                            },
                        ],
                    },
                ],
            },
        ],
    })
}

// ── Listings ────────────────────────────────────────────────────────

#[tokio::test]
async fn templates_come_from_the_index_document() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    mount_identity(&server, identity_fixture()).await;

    let client = client(&server).await;
    let mut rows = Vec::new();
    SchemaLister::new(&client)
        .schema_templates(&mut rows)
        .await
        .unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].id, "s1/template/Template1");
    assert_eq!(rows[0].tenant_id.as_deref(), Some("t-99"));
    assert_eq!(rows[0].display_name.as_deref(), Some("Template 1"));
    assert_eq!(rows[1].id, "s1/template/Template2");
    assert_eq!(rows[1].display_name, None);
}

#[tokio::test]
async fn epgs_carry_parsed_bd_and_vrf_references() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    mount_identity(&server, identity_fixture()).await;
    mount_schema(&server, "s1", schema_fixture()).await;

    let client = client(&server).await;
    let mut rows = Vec::new();
    SchemaLister::new(&client)
        .template_anp_epgs(&mut rows)
        .await
        .unwrap();

    assert_eq!(rows.len(), 1);
    let epg = &rows[0];
    assert_eq!(epg.id, "s1/template/Template1/anp/ANP1/epg/Web");
    assert_eq!(epg.bd_name.as_deref(), Some("BD1"));
    assert_eq!(epg.bd_schema_id.as_deref(), Some("s1"));
    assert_eq!(epg.bd_template_name.as_deref(), Some("Template1"));
    // Bare (no leading slash) references parse the same as slashed ones.
    assert_eq!(epg.vrf_name.as_deref(), Some("VRF1"));
    assert_eq!(epg.proxy_arp, Some(true));
}

#[tokio::test]
async fn bds_map_multi_destination_flooding_vocabulary() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    mount_identity(&server, identity_fixture()).await;
    mount_schema(&server, "s1", schema_fixture()).await;

    let client = client(&server).await;
    let mut rows = Vec::new();
    SchemaLister::new(&client).template_bds(&mut rows).await.unwrap();

    assert_eq!(rows.len(), 1);
    let bd = &rows[0];
    assert_eq!(bd.id, "s1/template/Template1/bd/BD1");
    assert_eq!(bd.vrf_name.as_deref(), Some("VRF1"));
    assert_eq!(bd.multi_destination_flooding.as_deref(), Some("flood_in_bd"));
    assert_eq!(bd.layer2_stretch, Some(true));
}

#[tokio::test]
async fn vrfs_and_anps_list_per_template() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    mount_identity(&server, identity_fixture()).await;
    mount_schema(&server, "s1", schema_fixture()).await;

    let client = client(&server).await;

    let mut vrfs = Vec::new();
    SchemaLister::new(&client).template_vrfs(&mut vrfs).await.unwrap();
    assert_eq!(vrfs.len(), 1);
    assert_eq!(vrfs[0].id, "s1/template/Template1/vrf/VRF1");
    assert_eq!(vrfs[0].vzany, Some(true));

    let mut anps = Vec::new();
    SchemaLister::new(&client).template_anps(&mut anps).await.unwrap();
    assert_eq!(anps.len(), 1);
    assert_eq!(anps[0].id, "s1/template/Template1/anp/ANP1");
}

#[tokio::test]
async fn static_ports_resolve_epg_ref_and_port_path() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    mount_identity(&server, identity_fixture()).await;
    mount_schema(&server, "s1", schema_fixture()).await;

    let client = client(&server).await;
    let mut rows = Vec::new();
    SchemaLister::new(&client)
        .site_anp_epg_static_ports(&mut rows)
        .await
        .unwrap();

    assert_eq!(rows.len(), 2);

    let port = &rows[0];
    assert_eq!(port.anp_name, "ANP1");
    assert_eq!(port.epg_name, "Web");
    assert_eq!(port.pod, "pod-1");
    assert_eq!(port.leaf, "101");
    assert_eq!(port.path, "eth1/33");
    assert_eq!(port.fex.as_deref(), Some("105"));
    assert_eq!(
        port.id,
        "s1/site/site-1/template/Template1/anp/ANP1/epg/Web\
         /staticPortPod/pod-1/staticPortLeaf/101/pathType/port/fex/105/path/eth1/33"
    );

    let vpc = &rows[1];
    assert_eq!(vpc.path_type, "vpc");
    assert_eq!(vpc.leaf, "101-102");
    assert_eq!(vpc.fex, None);
}

#[tokio::test]
async fn listings_are_idempotent_against_an_unchanged_backend() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    mount_identity(&server, identity_fixture()).await;
    mount_schema(&server, "s1", schema_fixture()).await;

    let client = client(&server).await;
    let lister = SchemaLister::new(&client);

    let mut first = Vec::new();
    lister.template_anp_epgs(&mut first).await.unwrap();
    let mut second = Vec::new();
    lister.template_anp_epgs(&mut second).await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn malformed_reference_fails_structurally_instead_of_panicking() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    mount_identity(&server, identity_fixture()).await;
    mount_schema(
        &server,
        "s1",
        json!({
            "templates": [
                {
                    "name": "Template1",
                    "anps": [
                        {
                            "name": "ANP1",
                            "epgs": [
                                { "name": "Web", "bdRef": "/schemas/s1/templates" },
                            ],
                        },
                    ],
                },
            ],
        }),
    )
    .await;

    let client = client(&server).await;
    let mut rows = Vec::new();
    let result = SchemaLister::new(&client).template_anp_epgs(&mut rows).await;
    assert!(
        matches!(result, Err(CoreError::MalformedReference { .. })),
        "got: {result:?}"
    );
}

#[tokio::test]
async fn schemas_without_the_requested_collection_yield_no_rows() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    mount_identity(&server, identity_fixture()).await;
    mount_schema(&server, "s1", json!({ "templates": [ { "name": "T1" } ] })).await;

    let client = client(&server).await;
    let mut rows = Vec::new();
    SchemaLister::new(&client).template_bds(&mut rows).await.unwrap();
    assert!(rows.is_empty());
}
