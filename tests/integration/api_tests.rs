//! API integration tests
//!
//! These run against a live server with a migrated database and an admin
//! account, e.g.:
//!
//! ```text
//! itam-server create-admin --email admin@example.com --name Admin --password admin-password
//! itam-server serve
//! cargo test --test api_tests -- --ignored
//! ```
//!
//! Override the defaults with ITAM_TEST_URL, ITAM_TEST_EMAIL and
//! ITAM_TEST_PASSWORD.

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

fn base_url() -> String {
    std::env::var("ITAM_TEST_URL").unwrap_or_else(|_| "http://localhost:8080/api/v1".to_string())
}

fn admin_credentials() -> Value {
    json!({
        "email": std::env::var("ITAM_TEST_EMAIL").unwrap_or_else(|_| "admin@example.com".to_string()),
        "password": std::env::var("ITAM_TEST_PASSWORD").unwrap_or_else(|_| "admin-password".to_string()),
    })
}

/// Suffix that keeps names, tags and emails unique across runs
fn unique() -> String {
    chrono::Utc::now().timestamp_micros().to_string()
}

/// Helper to get an authenticated token
async fn get_auth_token(client: &Client) -> String {
    let response = client
        .post(format!("{}/login", base_url()))
        .json(&admin_credentials())
        .send()
        .await
        .expect("Failed to send login request");

    let body: Value = response.json().await.expect("Failed to parse login response");
    body["token"].as_str().expect("No token in response").to_string()
}

async fn post(client: &Client, token: &str, path: &str, body: Value) -> (StatusCode, Value) {
    let response = client
        .post(format!("{}{}", base_url(), path))
        .bearer_auth(token)
        .json(&body)
        .send()
        .await
        .expect("Failed to send request");
    let status = response.status();
    (status, response.json().await.unwrap_or(Value::Null))
}

async fn get(client: &Client, token: &str, path: &str) -> (StatusCode, Value) {
    let response = client
        .get(format!("{}{}", base_url(), path))
        .bearer_auth(token)
        .send()
        .await
        .expect("Failed to send request");
    let status = response.status();
    (status, response.json().await.unwrap_or(Value::Null))
}

async fn put(client: &Client, token: &str, path: &str, body: Value) -> (StatusCode, Value) {
    let response = client
        .put(format!("{}{}", base_url(), path))
        .bearer_auth(token)
        .json(&body)
        .send()
        .await
        .expect("Failed to send request");
    let status = response.status();
    (status, response.json().await.unwrap_or(Value::Null))
}

async fn delete(client: &Client, token: &str, path: &str) -> StatusCode {
    client
        .delete(format!("{}{}", base_url(), path))
        .bearer_auth(token)
        .send()
        .await
        .expect("Failed to send request")
        .status()
}

async fn history(client: &Client, token: &str, asset_id: i64) -> Vec<Value> {
    let (status, body) = get(client, token, &format!("/assets/{}/history", asset_id)).await;
    assert_eq!(status, StatusCode::OK);
    body.as_array().expect("history list").clone()
}

async fn status_id(client: &Client, token: &str, name: &str) -> i64 {
    let (_, body) = get(client, token, "/status-labels?per_page=100").await;
    body["items"]
        .as_array()
        .expect("status label list")
        .iter()
        .find(|label| label["name"] == name)
        .and_then(|label| label["id"].as_i64())
        .unwrap_or_else(|| panic!("status label {} not seeded", name))
}

/// Ids of a freshly created asset and the master data behind it
struct ReadyAsset {
    id: i64,
    category_id: i64,
    manufacturer_id: i64,
    model_id: i64,
}

/// Creates category, manufacturer and model, then a ready-to-deploy asset
async fn create_ready_asset(client: &Client, token: &str) -> ReadyAsset {
    let suffix = unique();

    let (status, category) = post(client, token, "/categories", json!({ "name": format!("Laptops {}", suffix) })).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, manufacturer) =
        post(client, token, "/manufacturers", json!({ "name": format!("Lenovo {}", suffix) })).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, model) = post(
        client,
        token,
        "/device-models",
        json!({
            "name": format!("ThinkPad T14 {}", suffix),
            "model_number": format!("20W0-{}", suffix),
            "manufacturer_id": manufacturer["data"]["id"],
            "category_id": category["data"]["id"],
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let ready = status_id(client, token, "Ready to Deploy").await;
    let (status, asset) = post(
        client,
        token,
        "/assets",
        json!({
            "asset_tag": format!("LPT-{}", suffix),
            "serial": format!("SN-{}", suffix),
            "model_id": model["data"]["id"],
            "status_id": ready,
            "purchase_date": "2024-01-15",
            "purchase_cost": "1500.00",
            "useful_life_months": 36,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "asset create failed: {}", asset);
    ReadyAsset {
        id: asset["data"]["id"].as_i64().expect("asset id"),
        category_id: category["data"]["id"].as_i64().expect("category id"),
        manufacturer_id: manufacturer["data"]["id"].as_i64().expect("manufacturer id"),
        model_id: model["data"]["id"].as_i64().expect("model id"),
    }
}

async fn create_supplier(client: &Client, token: &str) -> i64 {
    let (status, supplier) = post(
        client,
        token,
        "/suppliers",
        json!({ "name": format!("Repair Shop {}", unique()), "phone": "+1 (555) 010-2000" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "supplier create failed: {}", supplier);
    supplier["data"]["id"].as_i64().expect("supplier id")
}

async fn create_end_user(client: &Client, token: &str) -> i64 {
    let suffix = unique();
    let (status, user) = post(
        client,
        token,
        "/users",
        json!({
            "name": format!("Jane {}", suffix),
            "email": format!("jane.{}@example.com", suffix),
            "password": "long-enough-password",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "user create failed: {}", user);
    user["data"]["id"].as_i64().expect("user id")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", base_url()))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_login() {
    let client = Client::new();

    let response = client
        .post(format!("{}/login", base_url()))
        .json(&admin_credentials())
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["token"].is_string());
    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(body["user"]["role"], "admin");
    assert!(body["user"].get("password").is_none());
}

#[tokio::test]
#[ignore]
async fn test_login_invalid_credentials() {
    let client = Client::new();

    let response = client
        .post(format!("{}/login", base_url()))
        .json(&json!({ "email": "admin@example.com", "password": "definitely-wrong" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore]
async fn test_me_returns_current_user() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let (status, body) = get(&client, &token, "/me").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], admin_credentials()["email"]);
}

#[tokio::test]
#[ignore]
async fn test_unauthorized_access() {
    let client = Client::new();

    let response = client
        .get(format!("{}/assets", base_url()))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore]
async fn test_category_in_use_cannot_be_deleted() {
    let client = Client::new();
    let token = get_auth_token(&client).await;
    let asset = create_ready_asset(&client, &token).await;

    let status = delete(&client, &token, &format!("/categories/{}", asset.category_id)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
#[ignore]
async fn test_manufacturer_and_model_in_use_cannot_be_deleted() {
    let client = Client::new();
    let token = get_auth_token(&client).await;
    let asset = create_ready_asset(&client, &token).await;

    let status = delete(&client, &token, &format!("/manufacturers/{}", asset.manufacturer_id)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let status = delete(&client, &token, &format!("/device-models/{}", asset.model_id)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
#[ignore]
async fn test_status_label_in_use_cannot_be_deleted() {
    let client = Client::new();
    let token = get_auth_token(&client).await;
    let asset = create_ready_asset(&client, &token).await;

    let (status, label) = post(
        &client,
        &token,
        "/status-labels",
        json!({ "name": format!("Awaiting Parts {}", unique()), "kind": "pending" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let label_id = label["data"]["id"].as_i64().expect("label id");

    let (status, _) = put(&client, &token, &format!("/assets/{}", asset.id), json!({ "status_id": label_id })).await;
    assert_eq!(status, StatusCode::OK);

    let status = delete(&client, &token, &format!("/status-labels/{}", label_id)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let ready = status_id(&client, &token, "Ready to Deploy").await;
    let status = delete(&client, &token, &format!("/status-labels/{}", ready)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
#[ignore]
async fn test_supplier_with_maintenance_cannot_be_deleted() {
    let client = Client::new();
    let token = get_auth_token(&client).await;
    let asset = create_ready_asset(&client, &token).await;
    let supplier_id = create_supplier(&client, &token).await;

    let (status, _) = post(
        &client,
        &token,
        "/maintenances",
        json!({ "asset_id": asset.id, "supplier_id": supplier_id, "start_date": "2025-03-01" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let status = delete(&client, &token, &format!("/suppliers/{}", supplier_id)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
#[ignore]
async fn test_department_and_location_with_members_cannot_be_deleted() {
    let client = Client::new();
    let token = get_auth_token(&client).await;
    let suffix = unique();

    let (status, department) =
        post(&client, &token, "/departments", json!({ "name": format!("Finance {}", suffix) })).await;
    assert_eq!(status, StatusCode::CREATED);
    let department_id = department["data"]["id"].as_i64().expect("department id");

    let (status, site) = post(&client, &token, "/locations", json!({ "name": format!("HQ {}", suffix) })).await;
    assert_eq!(status, StatusCode::CREATED);
    let site_id = site["data"]["id"].as_i64().expect("location id");

    let (status, floor) = post(
        &client,
        &token,
        "/locations",
        json!({ "name": format!("HQ Floor 2 {}", suffix), "parent_id": site_id }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let floor_id = floor["data"]["id"].as_i64().expect("location id");

    let (status, _) = post(
        &client,
        &token,
        "/users",
        json!({
            "name": format!("Sam {}", suffix),
            "email": format!("sam.{}@example.com", suffix),
            "password": "long-enough-password",
            "department_id": department_id,
            "location_id": floor_id,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let status = delete(&client, &token, &format!("/departments/{}", department_id)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    // Parent with a child location
    let status = delete(&client, &token, &format!("/locations/{}", site_id)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    // Location with a member
    let status = delete(&client, &token, &format!("/locations/{}", floor_id)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
#[ignore]
async fn test_checkout_then_checkin() {
    let client = Client::new();
    let token = get_auth_token(&client).await;
    let asset_id = create_ready_asset(&client, &token).await.id;
    let user_id = create_end_user(&client, &token).await;

    let (status, body) = post(
        &client,
        &token,
        "/assets/checkout",
        json!({ "asset_id": asset_id, "user_id": user_id, "note": "New starter" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "checkout failed: {}", body);
    assert_eq!(body["data"]["assigned_to"], user_id);
    assert_eq!(body["data"]["status_name"], "Deployed");

    let ready = status_id(&client, &token, "Ready to Deploy").await;
    let (status, body) = post(
        &client,
        &token,
        "/assets/checkin",
        json!({ "asset_id": asset_id, "status_id": ready }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "checkin failed: {}", body);
    assert!(body["data"]["assigned_to"].is_null());

    let (status, history) = get(&client, &token, &format!("/assets/{}/history", asset_id)).await;
    assert_eq!(status, StatusCode::OK);
    let entries = history.as_array().expect("history list");
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["action_type"], "checkin");
    assert_eq!(entries[0]["user_id"], user_id);
    assert_eq!(entries[1]["action_type"], "checkout");

    let checkout_id = entries[1]["id"].as_i64().expect("history id");
    let (status, handover) = get(
        &client,
        &token,
        &format!("/assets/checkout/{}/handover", checkout_id),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(handover["history_id"], checkout_id);

    let (status, legacy) = get(
        &client,
        &token,
        &format!("/assets/checkout/{}/pdf", checkout_id),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(legacy, handover);
}

#[tokio::test]
#[ignore]
async fn test_checkout_of_assigned_asset_is_rejected() {
    let client = Client::new();
    let token = get_auth_token(&client).await;
    let asset_id = create_ready_asset(&client, &token).await.id;
    let first = create_end_user(&client, &token).await;
    let second = create_end_user(&client, &token).await;

    let (status, _) = post(
        &client,
        &token,
        "/assets/checkout",
        json!({ "asset_id": asset_id, "user_id": first }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = post(
        &client,
        &token,
        "/assets/checkout",
        json!({ "asset_id": asset_id, "user_id": second }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "RuleViolation");

    let (_, asset) = get(&client, &token, &format!("/assets/{}", asset_id)).await;
    assert_eq!(asset["assigned_to"], first);
    assert_eq!(history(&client, &token, asset_id).await.len(), 1);
}

#[tokio::test]
#[ignore]
async fn test_checkout_of_non_deployable_asset_changes_nothing() {
    let client = Client::new();
    let token = get_auth_token(&client).await;
    let asset_id = create_ready_asset(&client, &token).await.id;
    let user_id = create_end_user(&client, &token).await;

    let broken = status_id(&client, &token, "Broken").await;
    let (status, _) = put(&client, &token, &format!("/assets/{}", asset_id), json!({ "status_id": broken })).await;
    assert_eq!(status, StatusCode::OK);
    let (_, before) = get(&client, &token, &format!("/assets/{}", asset_id)).await;

    let (status, body) = post(
        &client,
        &token,
        "/assets/checkout",
        json!({ "asset_id": asset_id, "user_id": user_id }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "RuleViolation");

    let (_, after) = get(&client, &token, &format!("/assets/{}", asset_id)).await;
    assert_eq!(after, before);
    assert!(after["assigned_to"].is_null());
    assert!(history(&client, &token, asset_id).await.is_empty());
}

#[tokio::test]
#[ignore]
async fn test_checkin_of_unassigned_asset_is_rejected() {
    let client = Client::new();
    let token = get_auth_token(&client).await;
    let asset_id = create_ready_asset(&client, &token).await.id;

    let ready = status_id(&client, &token, "Ready to Deploy").await;
    let (status, body) = post(
        &client,
        &token,
        "/assets/checkin",
        json!({ "asset_id": asset_id, "status_id": ready }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "RuleViolation");
    assert!(history(&client, &token, asset_id).await.is_empty());
}

#[tokio::test]
#[ignore]
async fn test_checked_out_asset_keeps_deployed_status() {
    let client = Client::new();
    let token = get_auth_token(&client).await;
    let asset_id = create_ready_asset(&client, &token).await.id;
    let user_id = create_end_user(&client, &token).await;

    let (status, _) = post(
        &client,
        &token,
        "/assets/checkout",
        json!({ "asset_id": asset_id, "user_id": user_id }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // A plain update cannot release the asset
    let ready = status_id(&client, &token, "Ready to Deploy").await;
    let (status, _) = put(&client, &token, &format!("/assets/{}", asset_id), json!({ "status_id": ready })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    // Checkin cannot leave it unassigned but deployed
    let deployed = status_id(&client, &token, "Deployed").await;
    let (status, _) = post(
        &client,
        &token,
        "/assets/checkin",
        json!({ "asset_id": asset_id, "status_id": deployed }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (_, asset) = get(&client, &token, &format!("/assets/{}", asset_id)).await;
    assert_eq!(asset["assigned_to"], user_id);
    assert_eq!(asset["status_kind"], "deployed");
    assert_eq!(history(&client, &token, asset_id).await.len(), 1);
}

#[tokio::test]
#[ignore]
async fn test_cost_change_revalues_asset() {
    let client = Client::new();
    let token = get_auth_token(&client).await;
    let suffix = unique();
    let template = create_ready_asset(&client, &token).await;
    let ready = status_id(&client, &token, "Ready to Deploy").await;

    // Undated asset: never picked up by depreciation
    let (status, asset) = post(
        &client,
        &token,
        "/assets",
        json!({
            "asset_tag": format!("MON-{}", suffix),
            "serial": format!("MSN-{}", suffix),
            "model_id": template.model_id,
            "status_id": ready,
            "purchase_cost": "1000.00",
            "residual_value": "100.00",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let asset_id = asset["data"]["id"].as_i64().expect("asset id");

    let (status, body) = put(
        &client,
        &token,
        &format!("/assets/{}", asset_id),
        json!({ "purchase_cost": "500.00" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["current_value"], "500.00");
}

#[tokio::test]
#[ignore]
async fn test_maintenance_moves_status_and_records_history() {
    let client = Client::new();
    let token = get_auth_token(&client).await;
    let asset_id = create_ready_asset(&client, &token).await.id;
    let supplier_id = create_supplier(&client, &token).await;

    let (status, maintenance) = post(
        &client,
        &token,
        "/maintenances",
        json!({
            "asset_id": asset_id,
            "supplier_id": supplier_id,
            "start_date": "2025-03-01",
            "notes": "Battery swap",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "maintenance start failed: {}", maintenance);
    let maintenance_id = maintenance["data"]["id"].as_i64().expect("maintenance id");

    let (_, asset) = get(&client, &token, &format!("/assets/{}", asset_id)).await;
    assert_eq!(asset["status_name"], "In Maintenance");
    let entries = history(&client, &token, asset_id).await;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["action_type"], "maintenance");

    let (status, _) = put(
        &client,
        &token,
        &format!("/maintenances/{}", maintenance_id),
        json!({ "completion_date": "2025-03-04", "cost": "89.90" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, asset) = get(&client, &token, &format!("/assets/{}", asset_id)).await;
    assert_eq!(asset["status_name"], "Ready to Deploy");
    let entries = history(&client, &token, asset_id).await;
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["action_type"], "maintenance");

    // Editing a completed record does not move the asset again
    let (status, _) = put(
        &client,
        &token,
        &format!("/maintenances/{}", maintenance_id),
        json!({ "completion_date": "2025-03-05" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(history(&client, &token, asset_id).await.len(), 2);
}

#[tokio::test]
#[ignore]
async fn test_completed_maintenance_on_assigned_asset_keeps_it_deployed() {
    let client = Client::new();
    let token = get_auth_token(&client).await;
    let asset_id = create_ready_asset(&client, &token).await.id;
    let user_id = create_end_user(&client, &token).await;
    let supplier_id = create_supplier(&client, &token).await;

    let (status, _) = post(
        &client,
        &token,
        "/assets/checkout",
        json!({ "asset_id": asset_id, "user_id": user_id }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = post(
        &client,
        &token,
        "/maintenances",
        json!({
            "asset_id": asset_id,
            "supplier_id": supplier_id,
            "start_date": "2025-03-01",
            "completion_date": "2025-03-01",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, asset) = get(&client, &token, &format!("/assets/{}", asset_id)).await;
    assert_eq!(asset["assigned_to"], user_id);
    assert_eq!(asset["status_kind"], "deployed");
    let entries = history(&client, &token, asset_id).await;
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["action_type"], "maintenance");
    assert_eq!(entries[0]["user_id"], user_id);
}

#[tokio::test]
#[ignore]
async fn test_dashboard_stats() {
    let client = Client::new();
    let token = get_auth_token(&client).await;
    create_ready_asset(&client, &token).await;

    let (status, body) = get(&client, &token, "/dashboard-stats").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["total_assets"].as_i64().unwrap_or(0) >= 1);
    assert!(body["assets_by_status"].is_array());
    assert!(body["recent_activity"].as_array().map_or(false, |a| a.len() <= 5));
}
