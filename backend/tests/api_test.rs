mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{app, go_basics, send};

#[tokio::test]
async fn test_root_answers_liveness_string() {
    let app = app(None).await;
    let (status, body) = send(&app, "GET", "/", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!("Welcome to the API!"));

    let (status, _) = send(&app, "GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_create_course_applies_defaults() {
    let app = app(None).await;

    let (status, body) = send(&app, "POST", "/courses", Some(go_basics()), None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body["_id"].as_str().is_some_and(|id| !id.is_empty()));
    assert_eq!(body["categoryPriority"], "Medium priority");
    assert_eq!(body["importantStatus"], "Normal");
    assert_eq!(body["status"], "Not Started Yet");
    assert_eq!(body["notes"], json!([]));
    assert_eq!(body["durationInHours"].as_f64(), Some(4.0));
    assert!(body["dateAdded"].is_string());

    let id = body["_id"].as_str().expect("id");
    let (status, fetched) = send(&app, "GET", &format!("/courses/{}", id), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["_id"], body["_id"]);
    assert_eq!(fetched["status"], "Not Started Yet");
}

#[tokio::test]
async fn test_create_course_reports_all_violations() {
    let app = app(None).await;

    let (status, body) = send(
        &app,
        "POST",
        "/courses",
        Some(json!({ "durationInHours": -1, "status": "Someday" })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let fields: Vec<&str> = body["fields"]
        .as_array()
        .expect("fields array")
        .iter()
        .filter_map(|f| f["field"].as_str())
        .collect();
    assert_eq!(fields, vec!["no", "name", "category", "status", "durationInHours"]);

    let (_, listed) = send(&app, "GET", "/courses", None, None).await;
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn test_missing_course_is_not_found() {
    let app = app(None).await;

    let (status, body) = send(&app, "GET", "/courses/nope", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Not Found");

    let (status, _) = send(&app, "PUT", "/courses/nope", Some(json!({ "name": "x" })), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", "/courses/nope", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_put_is_partial_merge() {
    let app = app(None).await;
    let (_, created) = send(&app, "POST", "/courses", Some(go_basics()), None).await;
    let id = created["_id"].as_str().expect("id");
    let (_, before) = send(&app, "GET", &format!("/courses/{}", id), None, None).await;

    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/courses/{}", id),
        Some(json!({ "status": "In Progress", "dateAdded": "1999-01-01T00:00:00Z" })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "In Progress");
    assert_eq!(updated["name"], "Go Basics");
    assert_eq!(updated["category"], "Backend");
    assert_eq!(updated["dateAdded"], before["dateAdded"]);

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/courses/{}", id),
        Some(json!({ "importantStatus": "Very" })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["fields"][0]["field"], "importantStatus");
}

#[tokio::test]
async fn test_delete_course_removes_it_and_its_notes() {
    let app = app(None).await;
    let (_, created) = send(&app, "POST", "/courses", Some(go_basics()), None).await;
    let id = created["_id"].as_str().expect("id");

    let (status, _) = send(
        &app,
        "POST",
        &format!("/courses/{}/notes", id),
        Some(json!({ "question": "Q", "answer": "A" })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, "DELETE", &format!("/courses/{}", id), None, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, serde_json::Value::Null);

    let (status, _) = send(&app, "GET", &format!("/courses/{}/notes", id), None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, notes) = send(&app, "GET", "/notes", None, None).await;
    assert_eq!(notes, json!([]));
}

#[tokio::test]
async fn test_notes_are_appended_in_order() {
    let app = app(None).await;
    let (_, created) = send(&app, "POST", "/courses", Some(go_basics()), None).await;
    let id = created["_id"].as_str().expect("id");

    let (status, course) = send(
        &app,
        "POST",
        &format!("/courses/{}/notes", id),
        Some(json!({ "question": "What is a slice?", "answer": "A view into an array" })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(course["notes"].as_array().map(Vec::len), Some(1));
    assert!(course["notes"][0]["createdAt"].is_string());

    let (status, _) = send(
        &app,
        "POST",
        "/notes",
        Some(json!({ "courseId": id, "question": "What is a map?", "answer": "A hash table" })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, notes) = send(&app, "GET", &format!("/courses/{}/notes", id), None, None).await;
    assert_eq!(notes[0]["question"], "What is a slice?");
    assert_eq!(notes[1]["question"], "What is a map?");

    let (_, all) = send(&app, "GET", "/notes", None, None).await;
    assert_eq!(all.as_array().map(Vec::len), Some(2));
    assert_eq!(all[1]["courseId"], id);
    assert_eq!(all[1]["courseName"], "Go Basics");
}

#[tokio::test]
async fn test_note_validation_and_missing_parent() {
    let app = app(None).await;

    let (status, body) = send(&app, "POST", "/notes", Some(json!({ "question": "Q" })), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let fields: Vec<&str> = body["fields"]
        .as_array()
        .expect("fields array")
        .iter()
        .filter_map(|f| f["field"].as_str())
        .collect();
    assert_eq!(fields, vec!["answer", "courseId"]);

    let (status, _) = send(
        &app,
        "POST",
        "/courses/ghost/notes",
        Some(json!({ "question": "Q", "answer": "A" })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_main_category_metadata() {
    let app = app(None).await;
    for (no, name, category, sub) in [
        (1, "Go Basics", "Backend", "Go"),
        (2, "React", "Frontend", "React"),
        (3, "Rust", "Backend", "Rust"),
    ] {
        let body = json!({
            "no": no,
            "name": name,
            "category": category,
            "subCategory": sub,
            "durationInHours": 2
        });
        let (status, _) = send(&app, "POST", "/courses", Some(body), None).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = send(&app, "GET", "/main-category", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["category"], "Backend");
    assert_eq!(body[0]["subCategories"], json!(["Go", "Rust"]));
    assert_eq!(body[0]["courseCount"], 2);
    assert_eq!(body[1]["category"], "Frontend");
}

#[tokio::test]
async fn test_project_crud_round_trip() {
    let app = app(None).await;

    let (status, created) = send(
        &app,
        "POST",
        "/project",
        Some(json!({
            "title": "Portfolio",
            "description": "Personal site",
            "category": "Web",
            "subCategory": "Frontend",
            "tech": ["React", "Tailwind"],
            "link": "https://example.com/repo",
            "liveDemo": "https://example.com"
        })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["_id"].as_str().expect("id");

    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/project/{}", id),
        Some(json!({ "title": "Portfolio v2" })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "Portfolio v2");
    assert_eq!(updated["tech"], json!(["React", "Tailwind"]));

    let (_, listed) = send(&app, "GET", "/project", None, None).await;
    assert_eq!(listed, json!([updated]));

    let (status, _) = send(&app, "DELETE", &format!("/project/{}", id), None, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, "GET", &format!("/project/{}", id), None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, "POST", "/project", Some(json!({})), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["fields"][0]["field"], "title");
}

#[tokio::test]
async fn test_token_guards_only_mutations() {
    let app = app(Some("s3cret")).await;

    let (status, _) = send(&app, "GET", "/courses", None, None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, "POST", "/courses", Some(go_basics()), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "401 Unauthorized");

    let (status, _) = send(&app, "POST", "/courses", Some(go_basics()), Some("wrong")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, "POST", "/courses", Some(go_basics()), Some("s3cret")).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = app(None).await;
    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/courses")
        .header(axum::http::header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from("{\"no\": 1,"))
        .expect("build request");

    let response = tower::ServiceExt::oneshot(app, request)
        .await
        .expect("router is infallible");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    let body: serde_json::Value = serde_json::from_slice(&bytes).expect("json error body");
    assert_eq!(body["error"], "400 Bad Request");
}
