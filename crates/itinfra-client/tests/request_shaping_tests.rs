//! Tests for validation and request shaping, using a recording invoker.
//!
//! Every failing validation must leave the invoker untouched; successful
//! calls must produce the expected URL, method and body.

mod common;

use chrono::{TimeZone, Utc};
use common::{recording_client, recording_client_with_page_size, service_path, RecordingInvoker, USER};
use itinfra_client::{
    AssetManagerClient, AssetProperties, CapabilityManagerClient, ClientError,
    ConnectionManagerClient, ContactMethodProperties, ContactMethodType, EffectiveDates,
    EmbeddedConnectionProperties, EndpointManagerClient, ExternalSource, HttpMethod,
    ItProfileManagerClient, ProcessContainmentProperties, ProcessManagerClient, ProcessStatus,
};
use serde_json::json;

const ROOT: &str = "https://localhost:9443";

fn url(suffix: &str) -> String {
    format!("{}{}", ROOT, service_path(suffix))
}

fn assert_invalid(result: itinfra_client::Result<impl std::fmt::Debug>, expected_parameter: &str) {
    match result {
        Err(ClientError::InvalidParameter { parameter, .. }) => {
            assert_eq!(parameter, expected_parameter)
        }
        other => panic!("Expected InvalidParameter, got: {:?}", other),
    }
}

fn named_asset(name: &str) -> AssetProperties {
    AssetProperties {
        qualified_name: Some(name.to_string()),
        ..Default::default()
    }
}

// ============================================================================
// Validation Before I/O
// ============================================================================

#[tokio::test]
async fn test_blank_guid_never_reaches_server() {
    let invoker = RecordingInvoker::ok();
    let client = AssetManagerClient::from_base(recording_client(invoker.clone()));

    for guid in ["", "   "] {
        let result = client.remove_asset(USER, &ExternalSource::local(), guid).await;
        assert_invalid(result, "assetGUID");
    }
    assert_eq!(invoker.count(), 0);
}

#[tokio::test]
async fn test_blank_guid_rejected_by_dedicated_operations() {
    let invoker = RecordingInvoker::ok();
    let base = recording_client(invoker.clone());
    let processes = ProcessManagerClient::from_base(base.clone());
    let profiles = ItProfileManagerClient::from_base(base.clone());
    let capabilities = CapabilityManagerClient::from_base(base.clone());
    let source = ExternalSource::local();
    let contact = ContactMethodProperties {
        name: None,
        contact_type: None,
        contact_method_type: ContactMethodType::Email,
        contact_method_service: None,
        contact_method_value: "ops@example.com".to_string(),
        effective_from: None,
        effective_to: None,
    };

    for guid in ["", "   "] {
        assert_invalid(
            processes
                .update_process_status(USER, &source, guid, ProcessStatus::Active)
                .await,
            "processGUID",
        );
        assert_invalid(
            processes.get_process_parent(USER, guid, None).await,
            "processGUID",
        );
        assert_invalid(
            processes.get_sub_processes(USER, guid, None, 0, 10).await,
            "processGUID",
        );
        assert_invalid(
            profiles
                .add_contact_method(USER, &source, guid, &contact)
                .await,
            "itProfileGUID",
        );
        assert_invalid(
            profiles
                .link_asset_to_profile(USER, &source, false, guid, "a1", EffectiveDates::always())
                .await,
            "itProfileGUID",
        );
        assert_invalid(
            profiles
                .link_asset_to_profile(USER, &source, false, "prof1", guid, EffectiveDates::always())
                .await,
            "assetGUID",
        );
        assert_invalid(
            capabilities
                .deploy_software_capability(
                    USER,
                    &source,
                    false,
                    guid,
                    "host1",
                    None,
                    EffectiveDates::always(),
                )
                .await,
            "capabilityGUID",
        );
        assert_invalid(
            capabilities
                .deploy_software_capability(
                    USER,
                    &source,
                    false,
                    "cap1",
                    guid,
                    None,
                    EffectiveDates::always(),
                )
                .await,
            "hostingAssetGUID",
        );
        assert_invalid(base.get_out_topic_connection(USER, guid).await, "callerId");
    }
    assert_eq!(invoker.count(), 0);
}

#[tokio::test]
async fn test_blank_user_id_rejected() {
    let invoker = RecordingInvoker::ok();
    let client = AssetManagerClient::from_base(recording_client(invoker.clone()));

    let result = client.get_asset_by_guid(" ", "a1").await;
    assert_invalid(result, "userId");
    assert_eq!(invoker.count(), 0);
}

#[tokio::test]
async fn test_create_requires_qualified_name() {
    let invoker = RecordingInvoker::ok();
    let client = AssetManagerClient::from_base(recording_client(invoker.clone()));

    let result = client
        .create_asset(USER, &ExternalSource::local(), false, &AssetProperties::default())
        .await;
    assert_invalid(result, "qualifiedName");

    let result = client
        .create_asset(USER, &ExternalSource::local(), false, &named_asset(""))
        .await;
    assert_invalid(result, "qualifiedName");
    assert_eq!(invoker.count(), 0);
}

#[tokio::test]
async fn test_merge_update_skips_qualified_name_check() {
    let invoker = RecordingInvoker::ok();
    let client = AssetManagerClient::from_base(recording_client(invoker.clone()));
    let properties = AssetProperties {
        display_name: Some("renamed".to_string()),
        ..Default::default()
    };

    client
        .update_asset(USER, &ExternalSource::local(), "a1", true, &properties)
        .await
        .unwrap();
    assert_eq!(invoker.count(), 1);
    assert_eq!(invoker.last().url, url("assets/a1?isMergeUpdate=true"));

    let result = client
        .update_asset(USER, &ExternalSource::local(), "a1", false, &properties)
        .await;
    assert_invalid(result, "qualifiedName");
    assert_eq!(invoker.count(), 1);
}

#[tokio::test]
async fn test_paging_limits() {
    let invoker = RecordingInvoker::ok();
    let client = AssetManagerClient::from_base(recording_client(invoker.clone()));

    assert_invalid(client.find_assets(USER, ".*", None, -1, 10).await, "startFrom");
    assert_invalid(client.find_assets(USER, ".*", None, 0, -1).await, "pageSize");
    assert_invalid(client.find_assets(USER, ".*", None, 0, 101).await, "pageSize");
    assert_eq!(invoker.count(), 0);

    client.find_assets(USER, ".*", None, 0, 100).await.unwrap();
    assert!(invoker.last().url.ends_with("startFrom=0&pageSize=100"));

    // Zero asks for the configured maximum.
    client.find_assets(USER, ".*", None, 20, 0).await.unwrap();
    assert!(invoker.last().url.ends_with("startFrom=20&pageSize=100"));
}

#[tokio::test]
async fn test_unbounded_page_size() {
    let invoker = RecordingInvoker::ok();
    let client = AssetManagerClient::from_base(recording_client_with_page_size(invoker.clone(), 0));

    client.find_assets(USER, ".*", None, 0, 5000).await.unwrap();
    assert!(invoker.last().url.ends_with("pageSize=5000"));
}

#[tokio::test]
async fn test_blank_search_string_rejected() {
    let invoker = RecordingInvoker::ok();
    let client = AssetManagerClient::from_base(recording_client(invoker.clone()));

    assert_invalid(client.find_assets(USER, "", None, 0, 10).await, "searchString");
    assert_invalid(client.get_assets_by_name(USER, " ", None, 0, 10).await, "name");
    assert_eq!(invoker.count(), 0);
}

#[tokio::test]
async fn test_blank_relationship_type_rejected() {
    let invoker = RecordingInvoker::ok();
    let client = AssetManagerClient::from_base(recording_client(invoker.clone()));

    let result = client
        .setup_related_asset(
            USER,
            &ExternalSource::local(),
            false,
            "",
            "a1",
            "a2",
            None,
            EffectiveDates::always(),
        )
        .await;
    assert_invalid(result, "relationshipTypeName");
    assert_eq!(invoker.count(), 0);
}

// ============================================================================
// Request Shaping
// ============================================================================

#[tokio::test]
async fn test_create_asset_request() {
    let invoker = RecordingInvoker::new(json!({"relatedHTTPCode": 200, "guid": "new-guid"}));
    let client = AssetManagerClient::from_base(recording_client(invoker.clone()));

    let guid = client
        .create_asset(
            USER,
            &ExternalSource::new("src-guid", "src"),
            true,
            &named_asset("host:wks-001"),
        )
        .await
        .unwrap();

    assert_eq!(guid, "new-guid");
    let request = invoker.last();
    assert_eq!(request.operation, "createAsset");
    assert_eq!(request.method, HttpMethod::Post);
    assert_eq!(request.url, url("assets?infrastructureManagerIsHome=true"));
    assert_eq!(
        request.body,
        Some(json!({
            "externalSourceGUID": "src-guid",
            "externalSourceName": "src",
            "qualifiedName": "host:wks-001"
        }))
    );
}

#[tokio::test]
async fn test_find_omits_absent_effective_time() {
    let invoker = RecordingInvoker::ok();
    let client = AssetManagerClient::from_base(recording_client(invoker.clone()));

    client.find_assets(USER, "a b", None, 0, 10).await.unwrap();
    let body = invoker.last().body.unwrap();
    assert_eq!(
        body,
        json!({"searchString": "a b", "searchStringParameterName": "searchString"})
    );

    let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    client.find_assets(USER, "a b", Some(at), 0, 10).await.unwrap();
    let body = invoker.last().body.unwrap();
    assert_eq!(body["effectiveTime"], json!(at.timestamp_millis()));
}

#[tokio::test]
async fn test_classify_asset_request() {
    let invoker = RecordingInvoker::ok();
    let client = AssetManagerClient::from_base(recording_client(invoker.clone()));
    let from = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();

    client
        .classify_asset(
            USER,
            &ExternalSource::local(),
            "a1",
            "Confidentiality",
            EffectiveDates::between(Some(from), None),
            None,
        )
        .await
        .unwrap();

    let request = invoker.last();
    assert_eq!(request.url, url("assets/a1/classifications/Confidentiality"));
    assert_eq!(
        request.body,
        Some(json!({
            "externalSourceGUID": null,
            "externalSourceName": null,
            "effectiveFrom": from.timestamp_millis()
        }))
    );
}

#[tokio::test]
async fn test_deploy_software_capability_request() {
    let invoker = RecordingInvoker::ok();
    let client = CapabilityManagerClient::from_base(recording_client(invoker.clone()));

    client
        .deploy_software_capability(
            USER,
            &ExternalSource::local(),
            true,
            "cap1",
            "host1",
            None,
            EffectiveDates::always(),
        )
        .await
        .unwrap();

    assert_eq!(
        invoker.last().url,
        url("software-capabilities/cap1/relationships/SupportedSoftwareCapability/host1?infrastructureManagerIsHome=true")
    );
}

#[tokio::test]
async fn test_setup_embedded_connection_request() {
    let invoker = RecordingInvoker::ok();
    let client = ConnectionManagerClient::from_base(recording_client(invoker.clone()));

    client
        .setup_embedded_connection(
            USER,
            &ExternalSource::local(),
            false,
            "vc1",
            "c2",
            &EmbeddedConnectionProperties {
                position: 1,
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let request = invoker.last();
    assert_eq!(
        request.url,
        url("connections/vc1/relationships/EmbeddedConnection/c2?infrastructureManagerIsHome=false")
    );
    assert_eq!(request.body.unwrap()["properties"], json!({"position": 1}));

    assert_invalid(
        client
            .clear_embedded_connection(USER, &ExternalSource::local(), "vc1", "")
            .await,
        "embeddedConnectionGUID",
    );
}

#[tokio::test]
async fn test_endpoints_by_network_address_request() {
    let invoker = RecordingInvoker::ok();
    let client = EndpointManagerClient::from_base(recording_client(invoker.clone()));

    client
        .get_endpoints_by_network_address(USER, "https://wks-001:9443", None, 0, 10)
        .await
        .unwrap();

    let request = invoker.last();
    assert_eq!(
        request.url,
        url("endpoints/by-network-address?startFrom=0&pageSize=10")
    );
    assert_eq!(
        request.body,
        Some(json!({
            "name": "https://wks-001:9443",
            "nameParameterName": "networkAddress"
        }))
    );
}

#[tokio::test]
async fn test_it_profile_by_user_id_request() {
    let invoker = RecordingInvoker::new(json!({
        "relatedHTTPCode": 200,
        "element": {
            "elementHeader": {"guid": "prof1", "type": {"typeName": "ITProfile"}},
            "properties": {"qualifiedName": "profile:engine1"},
            "userIdentities": [{
                "elementHeader": {"guid": "id1", "type": {"typeName": "UserIdentity"}},
                "properties": {"userId": "engine@host"}
            }]
        }
    }));
    let client = ItProfileManagerClient::from_base(recording_client(invoker.clone()));

    let profile = client
        .get_it_profile_by_user_id(USER, "engine@host")
        .await
        .unwrap();

    let request = invoker.last();
    assert_eq!(request.method, HttpMethod::Get);
    assert_eq!(request.url, url("it-profiles/user-ids/engine%40host"));
    assert_eq!(profile.element_header.guid, "prof1");
    assert_eq!(profile.user_identities.len(), 1);
    assert!(profile.contact_methods.is_empty());
}

#[tokio::test]
async fn test_add_contact_method_requires_value() {
    let invoker = RecordingInvoker::new(json!({"guid": "cm1"}));
    let client = ItProfileManagerClient::from_base(recording_client(invoker.clone()));
    let mut properties = ContactMethodProperties {
        name: None,
        contact_type: None,
        contact_method_type: ContactMethodType::Email,
        contact_method_service: None,
        contact_method_value: " ".to_string(),
        effective_from: None,
        effective_to: None,
    };

    let result = client
        .add_contact_method(USER, &ExternalSource::local(), "prof1", &properties)
        .await;
    assert_invalid(result, "contactMethodValue");
    assert_eq!(invoker.count(), 0);

    properties.contact_method_value = "ops@example.com".to_string();
    let guid = client
        .add_contact_method(USER, &ExternalSource::local(), "prof1", &properties)
        .await
        .unwrap();
    assert_eq!(guid, "cm1");
    assert_eq!(invoker.last().url, url("it-profiles/prof1/contact-methods"));
    assert_eq!(
        invoker.last().body.unwrap()["contactMethodType"],
        json!("EMAIL")
    );
}

#[tokio::test]
async fn test_process_status_and_parent_requests() {
    let invoker = RecordingInvoker::ok();
    let client = ProcessManagerClient::from_base(recording_client(invoker.clone()));

    client
        .update_process_status(USER, &ExternalSource::local(), "p1", ProcessStatus::Active)
        .await
        .unwrap();
    let request = invoker.last();
    assert_eq!(request.url, url("processes/p1/status"));
    assert_eq!(
        request.body,
        Some(json!({
            "externalSourceGUID": null,
            "externalSourceName": null,
            "processStatus": "ACTIVE"
        }))
    );

    client
        .setup_process_parent(
            USER,
            &ExternalSource::local(),
            false,
            "parent",
            "child",
            &ProcessContainmentProperties::default(),
            EffectiveDates::always(),
        )
        .await
        .unwrap();
    let request = invoker.last();
    assert_eq!(
        request.url,
        url("processes/parent/relationships/ProcessHierarchy/child?infrastructureManagerIsHome=false")
    );
    assert_eq!(
        request.body.unwrap()["properties"],
        json!({"containmentType": "OWNED"})
    );

    // A top-level process has no parent.
    let parent = client.get_process_parent(USER, "parent", None).await.unwrap();
    assert!(parent.is_none());
    assert_eq!(invoker.last().url, url("processes/parent/parent/retrieve"));
}

#[tokio::test]
async fn test_lineage_walks_both_directions() {
    let invoker = RecordingInvoker::ok();
    let client = ProcessManagerClient::from_base(recording_client(invoker.clone()));

    client
        .get_control_flow_next_steps(USER, "s1", None, 0, 10)
        .await
        .unwrap();
    assert_eq!(
        invoker.last().url,
        url("control-flows/current-steps/s1/next-steps/retrieve?startFrom=0&pageSize=10")
    );

    client
        .get_control_flow_previous_steps(USER, "s2", None, 0, 10)
        .await
        .unwrap();
    assert_eq!(
        invoker.last().url,
        url("control-flows/next-steps/s2/current-steps/retrieve?startFrom=0&pageSize=10")
    );
    assert_invalid(
        client
            .get_control_flow_previous_steps(USER, " ", None, 0, 10)
            .await,
        "nextStepGUID",
    );

    client
        .get_process_callers(USER, "p2", None, 5, 10)
        .await
        .unwrap();
    assert_eq!(
        invoker.last().url,
        url("process-calls/called/p2/callers/retrieve?startFrom=5&pageSize=10")
    );

    client
        .clear_lineage_mapping(USER, &ExternalSource::local(), "lm1")
        .await
        .unwrap();
    assert_eq!(invoker.last().url, url("lineage-mappings/lm1/remove"));

    assert_invalid(
        client
            .get_data_flow(USER, "p1", "", None, None)
            .await,
        "dataConsumerGUID",
    );
}
