mod common;

use urlshrt::domain::repositories::LinkRepository;
use urlshrt::infrastructure::persistence::MemoryLinkRepository;

#[tokio::test]
async fn test_memory_repository_contract() {
    let repo = MemoryLinkRepository::new();

    common::assert_repository_contract(&repo).await;
}

#[tokio::test]
async fn test_batch_conflict_stores_nothing() {
    let repo = MemoryLinkRepository::new();
    repo.create(common::new_link("code1", "https://one.example", "u1"))
        .await
        .unwrap();

    let err = repo
        .create_batch(vec![
            common::new_link("code2", "https://two.example", "u1"),
            common::new_link("code1", "https://one.example", "u1"),
        ])
        .await
        .unwrap_err();

    assert!(err.is_conflict());
    assert!(repo.find_by_code("code2").await.unwrap().is_none());
}

#[tokio::test]
async fn test_empty_repository_stats() {
    let repo = MemoryLinkRepository::new();

    let stats = repo.stats().await.unwrap();

    assert_eq!(stats.url_count, 0);
    assert_eq!(stats.user_count, 0);
    assert!(repo.list_by_owner("u1").await.unwrap().is_empty());
}
