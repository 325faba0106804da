//! File system watcher for watch mode

use notify::{Config, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver};
use std::time::Duration;

const DEBOUNCE_MS: u64 = 300;

/// Watches a report file or directory and emits changed `.xml` paths
pub struct ReportWatcher {
    _watcher: RecommendedWatcher,
    receiver: Receiver<notify::Result<notify::Event>>,
    /// Set when a single file is watched; other files in its directory are ignored
    only: Option<PathBuf>,
}

fn is_create_or_modify(kind: &EventKind) -> bool {
    matches!(kind, EventKind::Create(_) | EventKind::Modify(_))
}

impl ReportWatcher {
    /// Start watching the given path (file or directory)
    pub fn watch(path: &Path) -> notify::Result<Self> {
        let (tx, rx) = channel();
        let mut watcher = RecommendedWatcher::new(
            move |res| {
                let _ = tx.send(res);
            },
            Config::default().with_poll_interval(Duration::from_millis(DEBOUNCE_MS)),
        )?;

        let only = if path.is_dir() {
            watcher.watch(path, RecursiveMode::Recursive)?;
            None
        } else {
            let parent = match path.parent() {
                Some(p) if !p.as_os_str().is_empty() => p,
                _ => Path::new("."),
            };
            watcher.watch(parent, RecursiveMode::NonRecursive)?;
            Some(path.file_name().map(PathBuf::from).unwrap_or_default())
        };

        Ok(Self {
            _watcher: watcher,
            receiver: rx,
            only,
        })
    }

    /// Check if the path is a report document we care about
    pub fn is_report_file(p: &Path) -> bool {
        let Some(name) = p.file_name().and_then(|n| n.to_str()) else {
            return false;
        };
        !name.starts_with('.')
            && p
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("xml"))
    }

    fn wanted(&self, p: &Path) -> bool {
        match &self.only {
            Some(name) => p.file_name() == Some(name.as_os_str()),
            None => Self::is_report_file(p),
        }
    }

    /// Collect report paths from an event
    fn paths_from_event(&self, event: &notify::Event) -> Vec<PathBuf> {
        if !is_create_or_modify(&event.kind) {
            return vec![];
        }
        event
            .paths
            .iter()
            .filter(|p| self.wanted(p))
            .cloned()
            .collect()
    }

    /// Wait for the next batch of changes. Blocks until at least one change, then drains for DEBOUNCE_MS.
    pub fn next_changes(&self) -> Vec<PathBuf> {
        let mut all = HashSet::new();

        match self.receiver.recv_timeout(Duration::from_secs(3600)) {
            Ok(Ok(event)) => all.extend(self.paths_from_event(&event)),
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "Watch error");
                return vec![];
            }
            Err(_) => return vec![],
        }

        std::thread::sleep(Duration::from_millis(DEBOUNCE_MS));
        while let Ok(ev) = self.receiver.try_recv() {
            if let Ok(event) = ev {
                all.extend(self.paths_from_event(&event));
            }
        }

        let mut changed: Vec<PathBuf> = all.into_iter().collect();
        changed.sort();
        changed
    }
}
