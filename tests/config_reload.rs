//! Hot reload of the rule file.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::time::Duration;

use nested_route::config::watcher::ConfigWatcher;
use nested_route::UrlManager;
use tokio::sync::mpsc::UnboundedReceiver;

const INITIAL_RULES: &str = r#"
[[rules]]
kind = "static"
route = "site/index"
pattern = "home"
"#;

/// Append in a single write so the watcher never sees a half-written file.
fn append(path: &Path, text: &str) {
    let mut file = OpenOptions::new().append(true).open(path).unwrap();
    file.write_all(text.as_bytes()).unwrap();
    file.sync_all().unwrap();
}

/// Wait for a manager with `rules` rules, skipping earlier snapshots.
async fn wait_for_rules(updates: &mut UnboundedReceiver<UrlManager>, rules: usize) -> bool {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(10);
    loop {
        match tokio::time::timeout_at(deadline, updates.recv()).await {
            Ok(Some(manager)) if manager.len() == rules => return true,
            Ok(Some(_)) => continue,
            Ok(None) | Err(_) => return false,
        }
    }
}

#[tokio::test]
async fn test_file_change_publishes_rebuilt_manager() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rules.toml");
    std::fs::write(&path, INITIAL_RULES).unwrap();

    let (watcher, mut updates) = ConfigWatcher::new(&path);
    let _watcher = watcher.run().unwrap();
    tokio::time::sleep(Duration::from_millis(200)).await;

    append(
        &path,
        r#"
[[rules]]
kind = "nested"
route = "site/category"
nested_key = "path"
friendly_alias = "cat"
"#,
    );

    assert!(
        wait_for_rules(&mut updates, 2).await,
        "no manager with the new rule arrived"
    );
}

#[tokio::test]
async fn test_invalid_change_publishes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rules.toml");
    std::fs::write(&path, INITIAL_RULES).unwrap();

    let (watcher, mut updates) = ConfigWatcher::new(&path);
    let _watcher = watcher.run().unwrap();
    tokio::time::sleep(Duration::from_millis(200)).await;

    // Missing `route` and `nested_key`
    append(&path, "\n[[rules]]\nkind = \"nested\"\n");

    let received = tokio::time::timeout(Duration::from_secs(2), updates.recv()).await;
    assert!(received.is_err(), "an invalid rule file must not be published");
}
