//! Tests for the state manager

use super::*;
use pretty_assertions::assert_eq;

#[tokio::test]
async fn test_in_memory_bookmarks() {
    let manager = StateManager::in_memory();
    assert!(manager.is_in_memory());
    assert!(manager.get_bookmark("submissions").await.is_none());

    manager
        .set_bookmark("submissions", "2025-05-01T00:00:00.000Z".to_string())
        .await
        .unwrap();

    assert_eq!(
        manager.get_bookmark("submissions").await.as_deref(),
        Some("2025-05-01T00:00:00.000Z")
    );
}

#[tokio::test]
async fn test_from_json() {
    let manager = StateManager::from_json(
        r#"{"streams": {"submissions": {"bookmark": "2025-04-01T00:00:00.000Z"}}}"#,
    )
    .unwrap();

    assert_eq!(
        manager.get_bookmark("submissions").await.as_deref(),
        Some("2025-04-01T00:00:00.000Z")
    );
}

#[tokio::test]
async fn test_from_json_invalid() {
    let err = StateManager::from_json("{not json").unwrap_err();
    assert!(matches!(err, crate::error::Error::State { .. }));
}

#[tokio::test]
async fn test_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");

    let manager = StateManager::from_file(&path).unwrap();
    manager
        .set_bookmark("submissions", "2025-05-01T00:00:00.000Z".to_string())
        .await
        .unwrap();
    manager
        .set_partition_bookmark("submissions", "frm_a", "2025-05-02T00:00:00.000Z".to_string())
        .await
        .unwrap();

    // A fresh manager sees the persisted state
    let reloaded = StateManager::from_file(&path).unwrap();
    assert_eq!(
        reloaded.get_bookmark("submissions").await.as_deref(),
        Some("2025-05-01T00:00:00.000Z")
    );
    assert_eq!(
        reloaded
            .get_partition_bookmark("submissions", "frm_a")
            .await
            .as_deref(),
        Some("2025-05-02T00:00:00.000Z")
    );
}

#[tokio::test]
async fn test_save_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.json");

    let manager = StateManager::in_memory();
    manager
        .set_bookmark("submissions", "b1".to_string())
        .await
        .unwrap();
    manager.save_to_file(&path).await.unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    let state: State = serde_json::from_str(&contents).unwrap();
    assert_eq!(state.get_bookmark("submissions"), Some("b1"));
}

#[tokio::test]
async fn test_partition_completion() {
    let manager = StateManager::in_memory();

    assert!(!manager.is_partition_completed("questions", "frm_a").await);
    manager
        .mark_partition_completed("questions", "frm_a")
        .await
        .unwrap();
    assert!(manager.is_partition_completed("questions", "frm_a").await);

    manager.reset_partition_completion("questions").await.unwrap();
    assert!(!manager.is_partition_completed("questions", "frm_a").await);
}

#[tokio::test]
async fn test_to_value() {
    let manager = StateManager::in_memory();
    manager
        .set_bookmark("submissions", "b1".to_string())
        .await
        .unwrap();

    let value = manager.to_value().await.unwrap();
    assert_eq!(value["streams"]["submissions"]["bookmark"], "b1");
}

#[tokio::test]
async fn test_clone_shares_state() {
    let manager = StateManager::in_memory();
    let clone = manager.clone();

    manager
        .set_bookmark("submissions", "b1".to_string())
        .await
        .unwrap();
    assert_eq!(clone.get_bookmark("submissions").await.as_deref(), Some("b1"));
}
