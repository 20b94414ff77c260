mod common;

use async_trait::async_trait;
use axum::http::StatusCode;
use serde_json::json;
use std::sync::Arc;
use urlshrt::domain::entities::{Link, NewLink, Stats};
use urlshrt::domain::repositories::LinkRepository;
use urlshrt::error::AppError;

/// Store that is never reachable.
struct UnreachableRepository;

fn unreachable() -> AppError {
    AppError::internal("Storage is down", json!({}))
}

#[async_trait]
impl LinkRepository for UnreachableRepository {
    async fn create(&self, _new_link: NewLink) -> Result<Link, AppError> {
        Err(unreachable())
    }

    async fn create_batch(&self, _new_links: Vec<NewLink>) -> Result<(), AppError> {
        Err(unreachable())
    }

    async fn find_by_code(&self, _code: &str) -> Result<Option<Link>, AppError> {
        Err(unreachable())
    }

    async fn find_by_original_url(&self, _original_url: &str) -> Result<Option<Link>, AppError> {
        Err(unreachable())
    }

    async fn list_by_owner(&self, _owner_id: &str) -> Result<Vec<Link>, AppError> {
        Err(unreachable())
    }

    async fn delete_batch(&self, _codes: &[String], _owner_id: &str) -> Result<u64, AppError> {
        Err(unreachable())
    }

    async fn stats(&self) -> Result<Stats, AppError> {
        Err(unreachable())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Err(unreachable())
    }
}

#[tokio::test]
async fn test_ping_ok() {
    let server = common::create_test_server(common::create_test_state(None));

    server.get("/ping").await.assert_status_ok();
}

#[tokio::test]
async fn test_ping_store_down() {
    let state = common::create_test_state_with(Arc::new(UnreachableRepository), None);
    let server = common::create_test_server(state);

    let response = server.get("/ping").await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_redirect_store_down() {
    let state = common::create_test_state_with(Arc::new(UnreachableRepository), None);
    let server = common::create_test_server(state);

    let response = server.get("/abc").await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_unknown_route_is_bad_request() {
    let server = common::create_test_server(common::create_test_state(None));

    let response = server.get("/api/unknown/route").await;

    response.assert_status_bad_request();
}
