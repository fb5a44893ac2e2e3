// Integration tests for `TableClient` using wiremock.
#![allow(clippy::unwrap_used)]

use pretty_assertions::assert_eq;
use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use poolguard_api::store::{InventoryRow, NewMeasurement, ScheduleRow};
use poolguard_api::{Error, TableClient, TransportConfig};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, TableClient) {
    let server = MockServer::start().await;
    let client = TableClient::from_reqwest(&server.uri(), reqwest::Client::new()).unwrap();
    (server, client)
}

fn chlorine_row() -> InventoryRow {
    InventoryRow {
        id: "1".into(),
        name: "Granular Chlorine".into(),
        quantity: 5.0,
        target_quantity: 10.0,
        unit: "kg".into(),
    }
}

// ── Happy-path tests ────────────────────────────────────────────────

#[tokio::test]
async fn test_list_inventory() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/inventory"))
        .and(query_param("select", "*"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "1", "name": "Granular Chlorine", "quantity": 5.5, "target_quantity": 15, "unit": "kg" },
            { "id": 2, "name": "Muriatic Acid", "quantity": 12, "target_quantity": 20, "unit": "L" }
        ])))
        .mount(&server)
        .await;

    let rows = client.list_inventory().await.unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].name, "Granular Chlorine");
    assert_eq!(rows[0].quantity, 5.5);
    assert_eq!(rows[1].id, "2");
    assert_eq!(rows[1].unit, "L");
}

#[tokio::test]
async fn test_api_key_headers_are_sent() {
    let server = MockServer::start().await;
    let key = SecretString::from("anon-key-123".to_string());
    let client =
        TableClient::from_api_key(&server.uri(), &key, &TransportConfig::default()).unwrap();

    Mock::given(method("GET"))
        .and(path("/rest/v1/schedule"))
        .and(header("apikey", "anon-key-123"))
        .and(header("authorization", "Bearer anon-key-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let rows = client.list_schedule().await.unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn test_recent_measurements_are_ordered_and_limited() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/measurements"))
        .and(query_param("order", "created_at.desc"))
        .and(query_param("limit", "7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 11, "ph": 7.8, "chlorine": 1.0, "water_state": "cloudy", "created_at": "2025-03-02T10:00:00Z" },
            { "id": 10, "ph": 8.2, "chlorine": 0.5, "water_state": "green", "created_at": "2025-03-01T10:00:00Z" }
        ])))
        .mount(&server)
        .await;

    let rows = client.list_recent_measurements(7).await.unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].water_state, "cloudy");
    assert_eq!(rows[1].id.as_deref(), Some("10"));
}

#[tokio::test]
async fn test_insert_measurement_requests_representation() {
    let (server, client) = setup().await;
    let taken_at = "2025-03-02T10:00:00Z".parse().unwrap();

    Mock::given(method("POST"))
        .and(path("/rest/v1/measurements"))
        .and(header("prefer", "return=representation"))
        .and(body_json(json!({
            "ph": 7.4,
            "chlorine": 1.5,
            "water_state": "clear",
            "created_at": "2025-03-02T10:00:00Z"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([
            { "id": 99, "ph": 7.4, "chlorine": 1.5, "water_state": "clear", "created_at": "2025-03-02T10:00:00Z" }
        ])))
        .mount(&server)
        .await;

    let created = client
        .insert_measurement(&NewMeasurement {
            ph: 7.4,
            chlorine: 1.5,
            water_state: "clear".into(),
            created_at: taken_at,
        })
        .await
        .unwrap();

    assert_eq!(created.unwrap().id.as_deref(), Some("99"));
}

#[tokio::test]
async fn test_insert_task_returns_created_row() {
    let (server, client) = setup().await;

    let row = ScheduleRow {
        id: "custom-1".into(),
        task: "Backwash filter".into(),
        frequency: "biweekly".into(),
        category: "mechanical".into(),
        completed: false,
    };

    Mock::given(method("POST"))
        .and(path("/rest/v1/schedule"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([
            { "id": "custom-1", "task": "Backwash filter", "frequency": "biweekly", "category": "mechanical", "completed": false }
        ])))
        .mount(&server)
        .await;

    let created = client.insert_task(&row).await.unwrap();
    assert_eq!(created, row);
}

#[tokio::test]
async fn test_update_task_completed_filters_by_id() {
    let (server, client) = setup().await;

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/schedule"))
        .and(query_param("id", "eq.t3"))
        .and(body_json(json!({ "completed": true })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client.update_task_completed("t3", true).await.unwrap();
}

#[tokio::test]
async fn test_upsert_inventory_merges_duplicates() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/inventory"))
        .and(header("prefer", "resolution=merge-duplicates,return=minimal"))
        .and(body_json(json!({
            "id": "1",
            "name": "Granular Chlorine",
            "quantity": 5.0,
            "target_quantity": 10.0,
            "unit": "kg"
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    client.upsert_inventory_item(&chlorine_row()).await.unwrap();
}

#[tokio::test]
async fn test_delete_task_and_item() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/rest/v1/schedule"))
        .and(query_param("id", "eq.t1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/rest/v1/inventory"))
        .and(query_param("id", "eq.4"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client.delete_task("t1").await.unwrap();
    client.delete_inventory_item("4").await.unwrap();
}

#[tokio::test]
async fn test_list_maintenance_logs() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/maintenance_logs"))
        .and(query_param("order", "date.desc"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": "1",
                "date": "2025-03-01T00:00:00Z",
                "actions": ["Vacuum floor", "Backwash"],
                "chemicals_added": [{ "name": "Chlorine", "amount": 0.5, "unit": "kg" }]
            }
        ])))
        .mount(&server)
        .await;

    let logs = client.list_maintenance_logs(10).await.unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].actions, vec!["Vacuum floor", "Backwash"]);
    assert_eq!(logs[0].chemicals_added[0].amount, 0.5);
}

// ── Error tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_store_error_body_is_parsed() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/inventory"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "code": "42P01",
            "message": "relation \"public.inventory\" does not exist"
        })))
        .mount(&server)
        .await;

    let err = client.list_inventory().await.unwrap_err();

    assert_eq!(err.api_error_code(), Some("42P01"));
    match err {
        Error::Store { message, status, .. } => {
            assert_eq!(status, 404);
            assert!(message.contains("does not exist"));
        }
        other => panic!("expected Store error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unauthorized_maps_to_authentication() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/schedule"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Invalid API key"))
        .mount(&server)
        .await;

    let err = client.list_schedule().await.unwrap_err();
    assert!(matches!(err, Error::Authentication { .. }));
}

#[tokio::test]
async fn test_malformed_rows_are_deserialization_errors() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/inventory"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[{\"id\": \"1\"}]"))
        .mount(&server)
        .await;

    let err = client.list_inventory().await.unwrap_err();
    assert!(matches!(err, Error::Deserialization { .. }));
}

#[tokio::test]
async fn test_unreachable_store_is_a_transport_error() {
    // Nothing listens on this port once the server is dropped.
    let uri = {
        let server = MockServer::start().await;
        server.uri()
    };
    let client = TableClient::from_reqwest(&uri, reqwest::Client::new()).unwrap();

    let err = client.list_inventory().await.unwrap_err();
    assert!(
        matches!(err, Error::Transport(_) | Error::Timeout { .. }),
        "expected a transport error, got {err:?}"
    );
}
