use anyhow::Result;
use std::sync::Arc;

use hotel_booking_bot::profile::{PaymentType, UserProfile};
use hotel_booking_bot::storage::{
    MemoryStore, StateAccessor, StateKey, StateScope, StateStore, StoreError,
};

fn profile_accessor(store: Arc<MemoryStore>) -> StateAccessor<UserProfile> {
    StateAccessor::new(store, StateScope::User, "UserProfile")
}

#[tokio::test]
async fn test_missing_record_reads_as_default() -> Result<()> {
    let store = Arc::new(MemoryStore::new());
    let profiles = profile_accessor(Arc::clone(&store));

    let profile = profiles.get("42").await?;
    assert_eq!(profile.version, 0);
    assert_eq!(profile.value, UserProfile::default());
    assert!(store.is_empty().await);

    Ok(())
}

#[tokio::test]
async fn test_accessor_round_trip_and_versions() -> Result<()> {
    let store = Arc::new(MemoryStore::new());
    let profiles = profile_accessor(Arc::clone(&store));

    let profile = UserProfile {
        name: "Ada".to_string(),
        age: 36,
        payment_type: Some(PaymentType::Money),
        ..Default::default()
    };

    assert_eq!(profiles.set("42", &profile, Some(0)).await?, 1);
    let stored = profiles.get("42").await?;
    assert_eq!(stored.version, 1);
    assert_eq!(stored.value, profile);

    // Raw record keeps the camelCase field names
    let record = store
        .read(&StateKey::new(StateScope::User, "42", "UserProfile"))
        .await?
        .expect("record should exist");
    assert_eq!(record.data["paymentType"], "Money");
    assert_eq!(store.len().await, 1);

    Ok(())
}

#[tokio::test]
async fn test_stale_version_is_rejected() -> Result<()> {
    let store = Arc::new(MemoryStore::new());
    let profiles = profile_accessor(Arc::clone(&store));

    let first = profiles.get("7").await?;
    let second = profiles.get("7").await?;

    profiles.set("7", &first.value, Some(first.version)).await?;
    let result = profiles.set("7", &second.value, Some(second.version)).await;

    assert!(matches!(result, Err(StoreError::VersionConflict { .. })));

    // Unconditional writes always go through
    assert_eq!(profiles.set("7", &second.value, None).await?, 2);

    Ok(())
}

#[tokio::test]
async fn test_corrupt_record_reports_serialization_error() -> Result<()> {
    let store = Arc::new(MemoryStore::new());
    let key = StateKey::new(StateScope::User, "9", "UserProfile");
    store.write(&key, serde_json::json!({ "age": "old" }), None).await?;

    let profiles = profile_accessor(Arc::clone(&store));
    let result = profiles.get("9").await;
    assert!(matches!(result, Err(StoreError::Serialization { .. })));

    Ok(())
}

#[tokio::test]
async fn test_writes_stamp_update_time() -> Result<()> {
    let store = MemoryStore::new();
    let key = StateKey::new(StateScope::Conversation, "5", "DialogState");

    let before = chrono::Utc::now();
    store.write(&key, serde_json::json!({ "n": 1 }), None).await?;
    let first = store.read(&key).await?.expect("record should exist");
    assert!(first.updated_at >= before);

    store.write(&key, serde_json::json!({ "n": 2 }), Some(1)).await?;
    let second = store.read(&key).await?.expect("record should exist");
    assert_eq!(second.version, 2);
    assert!(second.updated_at >= first.updated_at);

    Ok(())
}
