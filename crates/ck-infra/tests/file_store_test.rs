use ck_core::ports::KeyValueStorePort;
use ck_core::StorageError;
use ck_infra::FileKeyValueStore;
use serde_json::json;
use tempfile::TempDir;

#[tokio::test]
async fn test_missing_file_reads_as_empty() {
    let dir = TempDir::new().unwrap();
    let store = FileKeyValueStore::new(dir.path().join("store.json"));
    assert_eq!(store.get("clipboardHistory").await.unwrap(), None);
}

#[tokio::test]
async fn test_values_survive_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("store.json");

    let store = FileKeyValueStore::new(&path);
    store.set("tags", json!(["work"])).await.unwrap();
    store.set("settings", json!({ "maxItems": 5 })).await.unwrap();

    let reopened = FileKeyValueStore::new(&path);
    assert_eq!(reopened.get("tags").await.unwrap(), Some(json!(["work"])));
    assert_eq!(
        reopened.get("settings").await.unwrap(),
        Some(json!({ "maxItems": 5 }))
    );
    assert!(!path.with_extension("json.tmp").exists());
}

#[tokio::test]
async fn test_overwrite_replaces_only_that_key() {
    let dir = TempDir::new().unwrap();
    let store = FileKeyValueStore::new(dir.path().join("store.json"));
    store.set("a", json!(1)).await.unwrap();
    store.set("b", json!(2)).await.unwrap();
    store.set("a", json!(3)).await.unwrap();

    assert_eq!(store.get("a").await.unwrap(), Some(json!(3)));
    assert_eq!(store.get("b").await.unwrap(), Some(json!(2)));
}

#[tokio::test]
async fn test_corrupt_file_is_a_read_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("store.json");
    std::fs::write(&path, "[1, 2, 3]").unwrap();

    let store = FileKeyValueStore::new(&path);
    let err = store.get("tags").await.unwrap_err();
    assert!(matches!(err, StorageError::Read { ref key, .. } if key == "tags"));

    let err = store.set("tags", json!([])).await.unwrap_err();
    assert!(matches!(err, StorageError::Write { .. }));
}
