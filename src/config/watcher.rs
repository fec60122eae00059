//! Rule file watcher for hot reload.

use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::{load_config, ConfigError};
use crate::routing::UrlManager;

/// Monitors the rule file and publishes freshly built managers.
pub struct ConfigWatcher {
    path: PathBuf,
    update_tx: mpsc::UnboundedSender<UrlManager>,
}

impl ConfigWatcher {
    /// Create a new ConfigWatcher.
    ///
    /// Returns the watcher and a receiver for rebuilt managers.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<UrlManager>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        (
            Self {
                path: path.to_path_buf(),
                update_tx,
            },
            update_rx,
        )
    }

    /// Start watching the file in a background thread.
    ///
    /// The returned watcher must be kept alive for as long as reloads are
    /// wanted.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let tx = self.update_tx;
        let path = self.path.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) if event.kind.is_modify() || event.kind.is_create() => {
                    tracing::info!(path = ?path, "Rule file change detected, reloading");
                    match reload(&path) {
                        Ok(manager) => {
                            tracing::info!(rules = manager.len(), "Rules rebuilt");
                            publish(&tx, manager);
                        }
                        Err(e) => {
                            tracing::error!(error = %e, "Failed to reload rules, keeping current set");
                        }
                    }
                }
                Ok(_) => {}
                Err(e) => tracing::error!(error = ?e, "Watch error"),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&self.path, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.path, "Rule watcher started");
        Ok(watcher)
    }
}

/// Hand a rebuilt manager to the owner. Returns false once the receiver
/// is gone.
fn publish(tx: &mpsc::UnboundedSender<UrlManager>, manager: UrlManager) -> bool {
    match tx.send(manager) {
        Ok(()) => true,
        Err(_) => {
            tracing::warn!("Rule receiver closed, dropping rebuilt rules");
            false
        }
    }
}

/// Load, validate and compile the rule file.
pub fn reload(path: &Path) -> Result<UrlManager, ConfigError> {
    let config = load_config(path)?;
    UrlManager::from_config(&config)
}
