//! Shared fixtures for integration tests.
//! #[allow(dead_code)] because each test file compiles common/ separately.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::Utc;
use movie_ratings::api::{AppState, create_router};
use movie_ratings::database::{self, movies, setup, users};
use movie_ratings::domain::{Demographics, Movie, NewMovie, NewUser, User};
use serde_json::Value;
use std::sync::Arc;
use tempfile::TempDir;
use tokio::net::TcpListener;
use tower::ServiceExt;

#[allow(dead_code)]
pub struct TestServer {
    pub router: Router,
    pub state: Arc<AppState>,
    _temp_dir: TempDir,
}

#[allow(dead_code)]
impl TestServer {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("ratings.db");

        let pool = database::create_pool(db_path.to_str().expect("utf-8 temp path"))
            .expect("Failed to create pool");
        {
            let mut conn = pool.get().expect("Failed to get connection");
            setup::initialize(&mut conn).expect("Failed to create schema");
        }

        let state = Arc::new(AppState::new(pool));
        let router = create_router(state.clone());

        Self {
            router,
            state,
            _temp_dir: temp_dir,
        }
    }

    pub fn seed_movie(&self, title: &str) -> Movie {
        let mut conn = self.state.pool.get().unwrap();
        let movie = NewMovie {
            title: title.to_string(),
            release_year: None,
        };
        movies::insert_movie(&mut conn, &movie, Utc::now()).unwrap()
    }

    pub fn seed_user(&self, username: &str, demographics: Demographics) -> User {
        let mut conn = self.state.pool.get().unwrap();
        let user = NewUser {
            username: username.to_string(),
            demographics,
        };
        users::insert_user(&mut conn, &user, Utc::now()).unwrap()
    }
}

#[allow(dead_code)]
pub fn demographics(age: i32, gender: &str, continent: &str, country: &str) -> Demographics {
    Demographics {
        age: Some(age),
        gender: Some(gender.to_string()),
        continent: Some(continent.to_string()),
        country: Some(country.to_string()),
    }
}

#[allow(dead_code)]
pub async fn json_request(
    router: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);

    let body = match body {
        Some(v) => {
            builder = builder.header("Content-Type", "application/json");
            Body::from(serde_json::to_vec(&v).unwrap())
        }
        None => Body::empty(),
    };

    let request = builder.body(body).unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();

    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body_json = if body_bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
    };

    (status, body_json)
}

/// Serve `router` on an ephemeral local port and return its base URL
#[allow(dead_code)]
pub async fn spawn(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(movie_ratings::services::serve_on(listener, router));

    format!("http://{}", addr)
}
