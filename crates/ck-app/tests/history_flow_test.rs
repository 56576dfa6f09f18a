//! End-to-end flows through [`App`] over a file-backed store.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use ck_app::{App, AppDeps, NewEntry};
use ck_core::ports::{ClockPort, SystemClipboardPort};
use ck_core::{ClipboardError, Entry, ExportFormat, FilterSelector, Settings};
use ck_infra::FileKeyValueStore;
use tempfile::TempDir;

struct StepClock(AtomicI64);

impl ClockPort for StepClock {
    fn now_ms(&self) -> i64 {
        self.0.fetch_add(1, Ordering::SeqCst)
    }
}

struct DeniedClipboard;

#[async_trait]
impl SystemClipboardPort for DeniedClipboard {
    async fn read_text(&self) -> Result<String, ClipboardError> {
        Err(ClipboardError::PermissionDenied("host refused".into()))
    }

    async fn write_text(&self, _text: &str) -> Result<(), ClipboardError> {
        Err(ClipboardError::PermissionDenied("host refused".into()))
    }
}

fn app_at(dir: &TempDir) -> App {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();

    App::new(AppDeps {
        store: Arc::new(FileKeyValueStore::new(dir.path().join("store.json"))),
        clock: Arc::new(StepClock(AtomicI64::new(1_000))),
        clipboard: Arc::new(DeniedClipboard),
    })
}

fn assert_pinned_first(entries: &[Entry]) {
    let first_unpinned = entries.iter().position(|e| !e.pinned).unwrap_or(entries.len());
    assert!(
        entries[first_unpinned..].iter().all(|e| !e.pinned),
        "pinned entry found after an unpinned one"
    );
}

#[tokio::test]
async fn test_history_survives_restart() {
    let dir = TempDir::new().unwrap();
    {
        let app = app_at(&dir);
        app.history.save(NewEntry::new("first", 1)).await;
        app.history.save(NewEntry::new("second", 2)).await;
        app.history.toggle_favorite(1).await;
        app.history.add_tags(2, &["work".to_string()]).await;
    }

    let app = app_at(&dir);
    let entries = app.history.load().await;
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].text, "second");
    assert!(entries[0].has_tag("work"));
    assert!(entries[1].favorite);
    assert!(app.tags().catalog().await.contains("work"));
}

#[tokio::test]
async fn test_capacity_and_pin_invariants_hold_across_saves() {
    let dir = TempDir::new().unwrap();
    let app = app_at(&dir);
    let settings = Settings {
        max_items: 5,
        ..Settings::default()
    };
    assert!(app.settings().update(settings).await);

    for i in 0..20i64 {
        assert!(app.history.save(NewEntry::new(format!("item {i}"), i)).await);
        if i % 6 == 0 {
            app.history.toggle_pin(i).await;
        }
        let entries = app.history.load().await;
        assert!(entries.len() <= 5);
        assert_pinned_first(&entries);
    }

    let entries = app.history.load().await;
    let pinned: Vec<&str> = entries
        .iter()
        .filter(|e| e.pinned)
        .map(|e| e.text.as_str())
        .collect();
    assert_eq!(pinned, vec!["item 18", "item 12", "item 6", "item 0"]);
    assert_eq!(entries.len(), 5);
    assert_eq!(entries[4].text, "item 19");
}

#[tokio::test]
async fn test_browse_favorites_only() {
    let dir = TempDir::new().unwrap();
    let app = app_at(&dir);
    app.history.save(NewEntry::new("x", 1).favorite(true)).await;
    app.history.save(NewEntry::new("y", 2)).await;
    app.history.save(NewEntry::new("z", 3)).await;

    let page = app.browse.execute("", &FilterSelector::Favorites, 1).await;
    let texts: Vec<&str> = page.page.items.iter().map(|e| e.text.as_str()).collect();
    assert_eq!(texts, vec!["x"]);
}

#[tokio::test]
async fn test_json_export_imports_into_fresh_store() {
    let source_dir = TempDir::new().unwrap();
    let source = app_at(&source_dir);
    source.history.save(NewEntry::new("fn x() {}", 10)).await;
    source.history.save(NewEntry::new("me@example.com", 20).favorite(true)).await;
    let json = source.transfer.export(ExportFormat::Json).await.unwrap();

    let target_dir = TempDir::new().unwrap();
    let target = app_at(&target_dir);
    let report = target.transfer.import(&json).await.unwrap();
    assert_eq!(report.imported, 2);
    assert_eq!(target.history.load().await, source.history.load().await);
}

#[tokio::test]
async fn test_clipboard_permission_error_reaches_caller() {
    let dir = TempDir::new().unwrap();
    let app = app_at(&dir);
    assert!(matches!(
        app.capture.execute().await,
        Err(ClipboardError::PermissionDenied(_))
    ));

    app.history.save(NewEntry::new("keep me", 1)).await;
    assert!(matches!(
        app.copy.execute(1).await,
        Err(ClipboardError::PermissionDenied(_))
    ));
    assert_eq!(app.history.load().await[0].timestamp, 1);
}

#[tokio::test]
async fn test_remove_tag_globally_through_app() {
    let dir = TempDir::new().unwrap();
    let app = app_at(&dir);
    app.history.save(NewEntry::new("a", 1)).await;
    app.history.add_tags(1, &["temp".to_string()]).await;

    assert!(app.tags().remove_tag_globally("temp").await);
    assert!(!app.history.find(1).await.unwrap().has_tag("temp"));
    assert!(!app.tags().catalog().await.contains("temp"));
}
