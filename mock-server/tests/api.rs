use axum::http::{self, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use mock_server::{app, Placement, Stats, Student};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

/// Send one request through a clone of `app`, sharing its store.
async fn send(app: &Router, request: Request<String>) -> axum::response::Response {
    app.clone().oneshot(request).await.unwrap()
}

async fn seed(app: &Router) {
    let students = [
        r#"{"name":"John Doe","email":"john@example.com","cgpa":8.1,"skills":["Python","SQL"],"placed":true}"#,
        r#"{"name":"Aarav Menon","email":"aarav@example.com","cgpa":9.0,"skills":["Python","FastAPI","ML"]}"#,
        r#"{"name":"Riya Sharma","email":"riya.sharma@example.com","cgpa":9.3,"skills":["React","Node.js"]}"#,
        r#"{"name":"Vikram Rao","email":"vikram.rao@example.com","skills":["C++","DSA"]}"#,
    ];
    for body in students {
        let resp = send(app, json_request("POST", "/students", body)).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }
}

// --- students ---

#[tokio::test]
async fn list_students_empty() {
    let resp = app().oneshot(get("/students")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let students: Vec<Student> = body_json(resp).await;
    assert!(students.is_empty());
}

#[tokio::test]
async fn create_student_returns_id() {
    let resp = app()
        .oneshot(json_request(
            "POST",
            "/students",
            r#"{"name":"Neha Iyer","email":"neha.iyer@example.com"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let ack: serde_json::Value = body_json(resp).await;
    assert_eq!(ack, serde_json::json!({ "id": 1 }));
}

#[tokio::test]
async fn create_student_missing_email_returns_422() {
    let resp = app()
        .oneshot(json_request("POST", "/students", r#"{"name":"No email"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        resp.headers()[http::header::CONTENT_TYPE],
        "application/json"
    );
    let body: serde_json::Value = body_json(resp).await;
    let detail = body["detail"].as_str().unwrap();
    assert!(detail.contains("missing field `email`"), "{detail}");
}

#[tokio::test]
async fn create_student_malformed_json_returns_400_detail() {
    let resp = app()
        .oneshot(json_request("POST", "/students", r#"{"name":"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = body_json(resp).await;
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn list_students_bad_query_returns_400_detail() {
    let resp = app().oneshot(get("/students?min_cgpa=high")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = body_json(resp).await;
    assert!(body["detail"].as_str().unwrap().contains("min_cgpa"));
}

#[tokio::test]
async fn get_student_not_found_has_detail() {
    let resp = app().oneshot(get("/students/99")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["detail"], "Student not found");
}

#[tokio::test]
async fn get_student_bad_id_returns_400() {
    let resp = app().oneshot(get("/students/not-a-number")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = body_json(resp).await;
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn list_students_filters() {
    let app = app();
    seed(&app).await;

    let names = |students: Vec<Student>| students.into_iter().map(|s| s.name).collect::<Vec<_>>();

    let resp = send(&app, get("/students?search=python")).await;
    assert_eq!(names(body_json(resp).await), vec!["John Doe", "Aarav Menon"]);

    let resp = send(&app, get("/students?min_cgpa=9")).await;
    assert_eq!(names(body_json(resp).await), vec!["Aarav Menon", "Riya Sharma"]);

    let resp = send(&app, get("/students?skill=c%2B%2B")).await;
    assert_eq!(names(body_json(resp).await), vec!["Vikram Rao"]);

    let resp = send(&app, get("/students?limit=2&offset=1")).await;
    assert_eq!(names(body_json(resp).await), vec!["Aarav Menon", "Riya Sharma"]);
}

#[tokio::test]
async fn update_and_delete_student() {
    let app = app();
    seed(&app).await;

    let resp = send(&app, json_request("PUT", "/students/4", r#"{"cgpa":7.5,"placed":true}"#)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let ack: serde_json::Value = body_json(resp).await;
    assert_eq!(ack["status"], "updated");

    let student: Student = body_json(send(&app, get("/students/4")).await).await;
    assert_eq!(student.cgpa, Some(7.5));
    assert!(student.placed);
    assert_eq!(student.name, "Vikram Rao");

    let resp = send(
        &app,
        Request::builder()
            .method("DELETE")
            .uri("/students/4")
            .body(String::new())
            .unwrap(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = send(&app, get("/students/4")).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- placements ---

#[tokio::test]
async fn placement_lifecycle() {
    let app = app();
    seed(&app).await;

    let resp = send(
        &app,
        json_request(
            "POST",
            "/placements",
            r#"{"student_id":1,"company":"Google","role":"Software Engineer","package":4200000,"status":"applied"}"#,
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let ack: serde_json::Value = body_json(resp).await;
    assert_eq!(ack["id"], 1);
    assert!(ack["placed_date"].is_string());

    let resp = send(&app, json_request("PATCH", "/placements/1", r#"{"status":"offered"}"#)).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let placements: Vec<Placement> = body_json(send(&app, get("/students/1/placements")).await).await;
    assert_eq!(placements.len(), 1);
    assert_eq!(placements[0].company, "Google");

    let resp = send(&app, get("/placements?company=google&status=offered")).await;
    let placements: Vec<Placement> = body_json(resp).await;
    assert_eq!(placements.len(), 1);

    let resp = send(&app, get("/placements?status=joined")).await;
    let placements: Vec<Placement> = body_json(resp).await;
    assert!(placements.is_empty());
}

#[tokio::test]
async fn patch_with_unknown_status_returns_422() {
    let resp = app()
        .oneshot(json_request("PATCH", "/placements/1", r#"{"status":"hired"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = body_json(resp).await;
    assert!(body["detail"].as_str().unwrap().contains("hired"));
}

#[tokio::test]
async fn patch_missing_placement_returns_404() {
    let resp = app()
        .oneshot(json_request("PATCH", "/placements/5", r#"{"status":"joined"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = body_bytes(resp).await;
    assert_eq!(&body[..], br#"{"detail":"Placement not found"}"#);
}

#[tokio::test]
async fn placements_for_unknown_student_returns_404() {
    let resp = app().oneshot(get("/students/3/placements")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- stats ---

#[tokio::test]
async fn stats_rate_matches_counts() {
    let app = app();
    seed(&app).await;

    let stats: Stats = body_json(send(&app, get("/stats")).await).await;
    assert_eq!(stats.total_students, 4);
    assert_eq!(stats.placed_count, 1);
    assert_eq!(stats.placement_rate, 25.0);
    assert_eq!(stats.skill_demand["Python"], 2);
}
