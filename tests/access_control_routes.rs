mod common;

use axum::http::StatusCode;
use common::{create, internal_error, memory_app, send};
use serde_json::{json, Value};

/// Building → access point → user → access log, returned as (building, access point, user, log).
async fn site(app: &axum::Router) -> (Value, Value, Value, Value) {
    let building = create(app, "/api/buildings", json!({"name": "Test Building"})).await;
    let point = create(
        app,
        "/api/access-points",
        json!({"name": "Main Entrance", "buildingId": building["id"]}),
    )
    .await;
    let user = create(app, "/api/users", json!({"name": "test user for access log"})).await;
    let log = create(
        app,
        "/api/access-logs",
        json!({
            "accessStatus": "Granted",
            "accessType": "Entry",
            "userId": user["id"],
            "accessPointId": point["id"],
        }),
    )
    .await;
    (building, point, user, log)
}

#[tokio::test]
async fn building_crud() {
    let app = memory_app();
    let building = create(&app, "/api/buildings", json!({"name": "Test Building"})).await;
    let uri = format!("/api/buildings/{}", building["id"].as_str().unwrap());

    let (status, body) = send(&app, "PUT", &uri, Some(json!({"name": "Updated Building"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Updated Building");

    let (status, body) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Building deleted successfully"}));

    let (status, body) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Building not found"}));
}

#[tokio::test]
async fn access_log_crud() {
    let app = memory_app();
    let (_, point, user, log) = site(&app).await;
    assert_eq!(log["accessStatus"], "Granted");
    assert_eq!(log["userId"], user["id"]);
    assert_eq!(log["accessPointId"], point["id"]);

    let uri = format!("/api/access-logs/{}", log["id"].as_str().unwrap());
    let (status, body) = send(&app, "PUT", &uri, Some(json!({"accessStatus": "Denied"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["accessStatus"], "Denied");
    assert_eq!(body["accessType"], "Entry");

    let (status, body) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Access log deleted successfully"}));

    let (status, body) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Access log not found"}));
}

#[tokio::test]
async fn unknown_access_point_message() {
    let app = memory_app();
    let (status, body) = send(&app, "GET", "/api/access-points/none", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Access point not found"}));
}

#[tokio::test]
async fn invalid_access_status_is_rejected_by_the_store() {
    let app = memory_app();
    let (_, _, _, log) = site(&app).await;
    let uri = format!("/api/access-logs/{}", log["id"].as_str().unwrap());

    let (status, body) = send(&app, "PUT", &uri, Some(json!({"accessStatus": "Maybe"}))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, internal_error());

    let (_, unchanged) = send(&app, "GET", &uri, None).await;
    assert_eq!(unchanged["accessStatus"], "Granted");
}

#[tokio::test]
async fn dangling_references_are_rejected() {
    let app = memory_app();
    let (status, body) = send(
        &app,
        "POST",
        "/api/access-points",
        Some(json!({"name": "Side Door", "buildingId": "no-such-building"})),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, internal_error());

    let (_, point, _, _) = site(&app).await;
    let (status, _) = send(
        &app,
        "POST",
        "/api/access-logs",
        Some(json!({
            "accessStatus": "Denied",
            "accessType": "Entry",
            "userId": "no-such-user",
            "accessPointId": point["id"],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn deleting_a_referenced_building_is_restricted() {
    let app = memory_app();
    let (building, point, user, log) = site(&app).await;
    let building_uri = format!("/api/buildings/{}", building["id"].as_str().unwrap());

    let (status, body) = send(&app, "DELETE", &building_uri, None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, internal_error());
    let (status, _) = send(&app, "GET", &building_uri, None).await;
    assert_eq!(status, StatusCode::OK);

    // The user is referenced by the log too.
    let user_uri = format!("/api/users/{}", user["id"].as_str().unwrap());
    let (status, _) = send(&app, "DELETE", &user_uri, None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    // Removing dependents first lets every delete through.
    for uri in [
        format!("/api/access-logs/{}", log["id"].as_str().unwrap()),
        format!("/api/access-points/{}", point["id"].as_str().unwrap()),
        building_uri.clone(),
        user_uri.clone(),
    ] {
        let (status, _) = send(&app, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::OK, "DELETE {}", uri);
    }
}

#[tokio::test]
async fn user_nested_reads_follow_access_logs() {
    let app = memory_app();
    let (building, point, user, log) = site(&app).await;
    create(&app, "/api/buildings", json!({"name": "Never Visited"})).await;
    // A second visit to the same building must not duplicate it.
    create(
        &app,
        "/api/access-logs",
        json!({
            "accessStatus": "Denied",
            "accessType": "Exit",
            "userId": user["id"],
            "accessPointId": point["id"],
        }),
    )
    .await;
    let id = user["id"].as_str().unwrap();

    let (status, body) = send(&app, "GET", &format!("/api/users/{}/buildings", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], user["id"]);
    assert_eq!(body["buildings"], json!([building]));

    let (status, body) = send(&app, "GET", &format!("/api/users/{}/access-logs", id), None).await;
    assert_eq!(status, StatusCode::OK);
    let logs = body["accessLogs"].as_array().unwrap();
    assert_eq!(logs.len(), 2);
    assert_eq!(logs[0], log);
    assert_eq!(logs[1]["accessType"], "Exit");
}

#[tokio::test]
async fn list_counts_track_creates_and_deletes() {
    let app = memory_app();
    let mut ids = Vec::new();
    for name in ["A", "B", "C"] {
        let b = create(&app, "/api/buildings", json!({"name": name})).await;
        ids.push(b["id"].as_str().unwrap().to_string());
    }
    send(&app, "DELETE", &format!("/api/buildings/{}", ids[1]), None).await;

    let (_, body) = send(&app, "GET", "/api/buildings", None).await;
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["A", "C"]);
}
