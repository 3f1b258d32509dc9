use super::*;
use crate::database::seed_if_empty;
use crate::database::test_utils::{insert_department, setup_test_db};
use crate::server::static_ui::BUILTIN_SHELL;
use crate::services::avatar::AVATAR_PALETTE;
use reqwest::StatusCode;
use sea_orm::ConnectionTrait;
use serde_json::{Value, json};
use std::time::Duration;
use tempfile::TempDir;

struct TestServer {
    base_url: String,
    db: DatabaseConnection,
    client: reqwest::Client,
    _tmp_dir: TempDir,
}

impl TestServer {
    async fn start() -> Self {
        let (tmp_dir, db) = setup_test_db().await;
        let state = AppState {
            db: db.clone(),
            static_dir: tmp_dir.path().join("public"),
        };
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, build_router(state)).await.unwrap();
        });
        Self {
            base_url: format!("http://{addr}"),
            db,
            client: reqwest::Client::new(),
            _tmp_dir: tmp_dir,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json(&self, path: &str) -> (StatusCode, Value) {
        let resp = self.client.get(self.url(path)).send().await.unwrap();
        let status = resp.status();
        (status, resp.json().await.unwrap())
    }

    async fn post_json(&self, path: &str, body: Value) -> (StatusCode, Value) {
        let resp = self
            .client
            .post(self.url(path))
            .json(&body)
            .send()
            .await
            .unwrap();
        let status = resp.status();
        (status, resp.json().await.unwrap())
    }
}

fn student_body(code: &str, dept: Option<i32>) -> Value {
    json!({
        "student_id": code,
        "first_name": "John",
        "last_name": "Doe",
        "email": "john@example.edu",
        "department_id": dept,
        "class_year": 2027,
    })
}

#[tokio::test]
async fn test_create_student_over_http() {
    let server = TestServer::start().await;
    let dept = insert_department(&server.db, "Computer Science").await;

    let (status, body) = server
        .post_json("/api/students", student_body("H1", Some(dept)))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["id"].as_i64().is_some());
    assert!(body["message"].is_string());

    let (_, recent) = server.get_json("/api/enrollments/recent").await;
    let row = &recent["data"][0];
    assert_eq!(row["student_id"], "H1");
    assert_eq!(row["avatar_initials"], "JD");
    assert_eq!(row["status"], "Pending");
    assert_eq!(row["class_year"], "2027");
    assert_eq!(row["department_name"], "Computer Science");
    let color = row["avatar_color"].as_str().unwrap();
    assert!(AVATAR_PALETTE.contains(&color));
}

#[tokio::test]
async fn test_create_student_from_form() {
    let server = TestServer::start().await;
    let dept = insert_department(&server.db, "Mathematics").await;
    let dept_str = dept.to_string();

    let resp = server
        .client
        .post(server.url("/api/students"))
        .form(&[
            ("student_id", "F1"),
            ("first_name", "Ada"),
            ("last_name", "Lovelace"),
            ("email", "ada@example.edu"),
            ("department_id", dept_str.as_str()),
            ("class_year", "Senior"),
        ])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let (_, recent) = server.get_json("/api/enrollments/recent").await;
    assert_eq!(recent["data"][0]["avatar_initials"], "AL");
    assert_eq!(recent["data"][0]["department_id"], dept);
}

#[tokio::test]
async fn test_duplicate_student_id_returns_500() {
    let server = TestServer::start().await;

    let (status, _) = server.post_json("/api/students", student_body("DUP", None)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = server.post_json("/api/students", student_body("DUP", None)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].is_string());

    let (_, recent) = server.get_json("/api/enrollments/recent").await;
    assert_eq!(recent["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_missing_student_id_is_store_error() {
    let server = TestServer::start().await;
    let (status, body) = server
        .post_json("/api/students", json!({ "first_name": "NoCode" }))
        .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].is_string());

    let (_, recent) = server.get_json("/api/enrollments/recent").await;
    assert!(recent["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_undecodable_body_is_bad_request() {
    let server = TestServer::start().await;
    let resp = server
        .client
        .post(server.url("/api/students"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_create_faculty_over_http() {
    let server = TestServer::start().await;
    let (status, body) = server
        .post_json(
            "/api/faculty",
            json!({
                "first_name": "Grace",
                "last_name": "Hopper",
                "email": "hopper@example.edu",
                "department_id": null,
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["id"].as_i64().is_some());

    let (_, stats) = server.get_json("/api/stats").await;
    assert_eq!(stats["faculty_staff"], 1);
}

#[tokio::test]
async fn test_stats_after_seed() {
    let server = TestServer::start().await;
    seed_if_empty(&server.db).await.unwrap();

    let (status, stats) = server.get_json("/api/stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["total_students"], 1);
    assert_eq!(stats["active_courses"], 1);
    assert_eq!(stats["faculty_staff"], 2);
    assert!(stats["fee_collection"].is_string());
}

#[tokio::test]
async fn test_stats_failure_is_500() {
    let server = TestServer::start().await;
    server
        .db
        .execute_unprepared("DROP TABLE faculty")
        .await
        .expect("Failed to drop faculty table");

    let (status, body) = server.get_json("/api/stats").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].is_string());
    assert!(body.get("total_students").is_none());
}

#[tokio::test]
async fn test_trailing_slash_matches_api_routes() {
    let server = TestServer::start().await;
    seed_if_empty(&server.db).await.unwrap();

    let (status, stats) = server.get_json("/api/stats/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["faculty_staff"], 2);

    let (status, recent) = server.get_json("/api/enrollments/recent/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(recent["data"][0]["student_id"], "STU001");

    let (status, body) = server.post_json("/api/students/", student_body("TS1", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["id"].as_i64().is_some());

    let (status, _) = server.get_json("/api/students/").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_recent_enrollments_window() {
    let server = TestServer::start().await;
    for i in 0..6 {
        server
            .post_json("/api/students", student_body(&format!("W{i}"), None))
            .await;
    }

    let (status, recent) = server.get_json("/api/enrollments/recent").await;
    assert_eq!(status, StatusCode::OK);
    let rows = recent["data"].as_array().unwrap();
    assert_eq!(rows.len(), 5);
    assert_eq!(rows[0]["student_id"], "W5");
    assert_eq!(rows[4]["student_id"], "W1");
    assert!(rows.iter().all(|r| r["department_name"].is_null()));
}

#[tokio::test]
async fn test_list_departments() {
    let server = TestServer::start().await;
    seed_if_empty(&server.db).await.unwrap();

    let (status, body) = server.get_json("/api/departments").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 4);
    assert_eq!(body["data"][0]["name"], "Computer Science");
}

#[tokio::test]
async fn test_unknown_api_route_is_404() {
    let server = TestServer::start().await;

    for path in ["/api/unknown", "/api", "/api/students/42"] {
        let (status, body) = server.get_json(path).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "path {path}");
        assert_eq!(body["error"], "API route not found");
    }

    // Known path, wrong method
    let (status, body) = server.get_json("/api/students").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "API route not found");
}

#[tokio::test]
async fn test_front_end_routes_get_shell() {
    let server = TestServer::start().await;

    for path in ["/", "/dashboard", "/students/new"] {
        let resp = server.client.get(server.url(path)).send().await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK, "path {path}");
        assert_eq!(resp.text().await.unwrap(), BUILTIN_SHELL);
    }
}

#[tokio::test]
async fn test_shutdown_waits_when_signal_unavailable() {
    let broken = async { Err(std::io::Error::other("no signal handler")) };
    let waited = tokio::time::timeout(Duration::from_millis(50), shutdown_on(broken)).await;
    assert!(waited.is_err(), "shutdown must not fire without a signal");

    let fired = tokio::time::timeout(Duration::from_millis(50), shutdown_on(async { Ok(()) })).await;
    assert!(fired.is_ok());
}
