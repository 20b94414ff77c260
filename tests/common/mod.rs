#![allow(dead_code)]

use axum_test::TestServer;
use std::sync::Arc;
use urlshrt::application::services::LinkService;
use urlshrt::domain::repositories::LinkRepository;
use urlshrt::infrastructure::persistence::MemoryLinkRepository;
use urlshrt::routes::app_router;
use urlshrt::state::AppState;

pub const BASE_URL: &str = "http://localhost:8080";

/// Short code of `http://a.example`.
pub const CODE_A: &str = "aee7dad94e";
/// Short code of `https://example.com`.
pub const CODE_EXAMPLE: &str = "100680ad54";

pub fn create_test_state(trusted_subnet: Option<&str>) -> AppState {
    let link_repository: Arc<dyn LinkRepository> = Arc::new(MemoryLinkRepository::new());
    create_test_state_with(link_repository, trusted_subnet)
}

pub fn create_test_state_with(
    link_repository: Arc<dyn LinkRepository>,
    trusted_subnet: Option<&str>,
) -> AppState {
    let link_service = LinkService::new(link_repository, BASE_URL);
    let trusted_subnet = trusted_subnet.map(|cidr| cidr.parse().unwrap());

    AppState::new(Arc::new(link_service), trusted_subnet)
}

pub fn create_test_server(state: AppState) -> TestServer {
    TestServer::new(app_router(state)).unwrap()
}

pub fn short_url(code: &str) -> String {
    format!("{BASE_URL}/{code}")
}

pub fn new_link(code: &str, original_url: &str, owner_id: &str) -> urlshrt::domain::entities::NewLink {
    urlshrt::domain::entities::NewLink {
        id: format!("id-{code}"),
        code: code.to_string(),
        original_url: original_url.to_string(),
        owner_id: owner_id.to_string(),
    }
}

/// Storage contract checks shared by every repository implementation.
pub async fn assert_repository_contract(repo: &dyn LinkRepository) {
    let link = repo
        .create(new_link("code1", "https://one.example", "u1"))
        .await
        .unwrap();
    assert_eq!(link.code, "code1");
    assert!(!link.is_deleted);

    let err = repo
        .create(new_link("code9", "https://one.example", "u2"))
        .await
        .unwrap_err();
    assert!(err.is_conflict());

    repo.create_batch(vec![
        new_link("code2", "https://two.example", "u1"),
        new_link("code3", "https://three.example", "u2"),
    ])
    .await
    .unwrap();

    let found = repo.find_by_code("code2").await.unwrap().unwrap();
    assert_eq!(found.original_url, "https://two.example");
    assert!(repo.find_by_code("missing").await.unwrap().is_none());

    let by_original = repo
        .find_by_original_url("https://three.example")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_original.code, "code3");
    assert!(
        repo.find_by_original_url("https://none.example")
            .await
            .unwrap()
            .is_none()
    );

    let owned: Vec<String> = repo
        .list_by_owner("u1")
        .await
        .unwrap()
        .into_iter()
        .map(|l| l.code)
        .collect();
    assert_eq!(owned, ["code1", "code2"]);

    let deleted = repo
        .delete_batch(
            &["code1".to_string(), "code3".to_string(), "missing".to_string()],
            "u1",
        )
        .await
        .unwrap();
    assert_eq!(deleted, 1);
    assert!(repo.find_by_code("code1").await.unwrap().unwrap().is_deleted);
    assert!(!repo.find_by_code("code3").await.unwrap().unwrap().is_deleted);

    let again = repo
        .delete_batch(&["code1".to_string()], "u1")
        .await
        .unwrap();
    assert_eq!(again, 0);

    let stats = repo.stats().await.unwrap();
    assert_eq!(stats.url_count, 3);
    assert_eq!(stats.user_count, 2);

    repo.ping().await.unwrap();
}
