#![allow(dead_code)]

use axum::{Router, routing::get};
use axum_test::TestServer;
use book_catalog::api::handlers::health_handler;
use book_catalog::api::routes::api_routes;
use book_catalog::state::AppState;
use serde_json::{Value, json};
use sqlx::PgPool;

/// State backed by a fresh in-memory catalog.
pub fn create_test_state() -> AppState {
    AppState::in_memory()
}

/// State backed by the pool handed out by `#[sqlx::test]`.
pub fn create_pg_state(pool: PgPool) -> AppState {
    AppState::with_pool(pool)
}

/// `/health` plus the full `/api` tree over `state`.
pub fn make_server_with(state: AppState) -> TestServer {
    let app = Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api_routes())
        .with_state(state);
    TestServer::new(app).unwrap()
}

pub fn make_server() -> TestServer {
    make_server_with(create_test_state())
}

/// Creates an author through the API and returns its id.
pub async fn create_test_author(server: &TestServer, name: &str, email: &str) -> i64 {
    let response = server
        .post("/api/authors")
        .json(&json!({ "name": name, "email": email }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()["id"].as_i64().unwrap()
}

/// Creates a book through the API and returns its id.
pub async fn create_test_book(server: &TestServer, body: Value) -> i64 {
    let response = server.post("/api/books").json(&body).await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()["id"].as_i64().unwrap()
}

/// Two authors with three books between them.
///
/// | title                       | author  | year | genre             | pages |
/// |-----------------------------|---------|------|-------------------|-------|
/// | Cien años de soledad        | García  | 1967 | Realismo mágico   | 471   |
/// | El amor en los tiempos...   | García  | 1985 | Novela            | 368   |
/// | La ciudad y los perros      | Vargas  | 1963 | Novela            | 343   |
pub async fn seed_catalog(server: &TestServer) -> (i64, i64) {
    let garcia = create_test_author(server, "Gabriel García Márquez", "ggm@example.com").await;
    let vargas = create_test_author(server, "Mario Vargas Llosa", "mvll@example.com").await;

    create_test_book(
        server,
        json!({
            "title": "Cien años de soledad",
            "authorId": garcia,
            "isbn": "978-0307474728",
            "publishedYear": 1967,
            "genre": "Realismo mágico",
            "pages": 471
        }),
    )
    .await;
    create_test_book(
        server,
        json!({
            "title": "El amor en los tiempos del cólera",
            "authorId": garcia,
            "publishedYear": 1985,
            "genre": "Novela",
            "pages": 368
        }),
    )
    .await;
    create_test_book(
        server,
        json!({
            "title": "La ciudad y los perros",
            "authorId": vargas,
            "publishedYear": 1963,
            "genre": "Novela",
            "pages": 343
        }),
    )
    .await;

    (garcia, vargas)
}
