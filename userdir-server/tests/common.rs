use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use userdir_core::models::NewUser;
use userdir_server::{database::ServerDatabase, router, AppState};

/// Creates a new in-memory test sqlite database and runs migrations.
///
/// A single connection keeps every query on the same in-memory database.
#[allow(dead_code)]
pub async fn setup_test_db() -> Arc<ServerDatabase> {
    let db = ServerDatabase::new("sqlite::memory:", 1).await.unwrap();
    db.run_migrations().await.unwrap();
    Arc::new(db)
}

/// Opens a file-backed database inside `dir` with a multi-connection pool, so
/// concurrent transactions really contend for the write lock.
#[allow(dead_code)]
pub async fn setup_file_db(dir: &tempfile::TempDir, max_connections: u32) -> Arc<ServerDatabase> {
    let url = format!("sqlite://{}", dir.path().join("userdir.db").display());
    let db = ServerDatabase::new(&url, max_connections).await.unwrap();
    db.run_migrations().await.unwrap();
    Arc::new(db)
}

#[allow(dead_code)]
pub async fn setup_test_app(total_on_page: u32) -> (Router, Arc<ServerDatabase>) {
    let db = setup_test_db().await;
    let app = router(Arc::new(AppState {
        db: db.clone(),
        total_on_page,
    }));
    (app, db)
}

#[allow(dead_code)]
pub fn make_new_user(user_name: &str, locations: &[&str]) -> NewUser {
    NewUser {
        first_name: "A".to_string(),
        last_name: "B".to_string(),
        user_name: user_name.to_string(),
        password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
        role: "member".to_string(),
        age: 30,
        locations: locations.iter().map(|name| name.to_string()).collect(),
    }
}

#[allow(dead_code)]
pub fn create_body(user_name: &str, locations: &[&str]) -> Value {
    json!({
        "first_name": "A",
        "last_name": "B",
        "user_name": user_name,
        "password": "x",
        "role": "member",
        "age": 30,
        "locations": locations
    })
}

/// Inserts ads authored by the user, standing in for the ads service.
#[allow(dead_code)]
pub async fn insert_ads(db: &ServerDatabase, author_id: i64, count: usize) {
    for i in 0..count {
        sqlx::query("INSERT INTO ads (author_id, name) VALUES (?1, ?2)")
            .bind(author_id)
            .bind(format!("ad {}", i))
            .execute(&db.pool)
            .await
            .unwrap();
    }
}

/// Sends one request through the router and decodes the JSON response body.
#[allow(dead_code)]
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };

    (status, value)
}
