use std::path::{Path, PathBuf};
use std::sync::mpsc;

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use crate::io::discovery::{METADATA_FILE, PLAN_FILE};

/// Events sent from the file watcher to the TUI event loop.
#[derive(Debug)]
pub enum FileEvent {
    /// One or more track files changed on disk.
    Changed(Vec<PathBuf>),
}

/// Whether a changed path should trigger a reload
pub fn is_track_file(path: &Path) -> bool {
    matches!(
        path.file_name().and_then(|n| n.to_str()),
        Some(METADATA_FILE) | Some(PLAN_FILE)
    )
}

/// A file system watcher for the `conductor/` directory.
pub struct ConductorWatcher {
    _watcher: RecommendedWatcher,
    rx: mpsc::Receiver<FileEvent>,
}

impl ConductorWatcher {
    /// Start watching the given `conductor/` directory.
    /// Returns a `ConductorWatcher` whose `poll()` method should be called each tick.
    pub fn start(conductor_dir: &Path) -> Result<Self, notify::Error> {
        let (tx, rx) = mpsc::channel();
        // Events carry absolute, resolved paths
        let root = conductor_dir
            .canonicalize()
            .unwrap_or_else(|_| conductor_dir.to_path_buf());

        let mut watcher = RecommendedWatcher::new(
            move |result: Result<Event, notify::Error>| {
                let event = match result {
                    Ok(e) => e,
                    Err(_) => return,
                };

                match event.kind {
                    EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_) => {}
                    _ => return,
                }

                let relevant: Vec<PathBuf> = event
                    .paths
                    .into_iter()
                    .filter(|p| p.starts_with(&root) && is_track_file(p))
                    .collect();

                if !relevant.is_empty() {
                    let _ = tx.send(FileEvent::Changed(relevant));
                }
            },
            Config::default(),
        )?;

        watcher.watch(conductor_dir, RecursiveMode::Recursive)?;
        Ok(ConductorWatcher {
            _watcher: watcher,
            rx,
        })
    }

    /// Non-blocking poll for pending file events.
    /// Returns all queued events (may be empty).
    pub fn poll(&self) -> Vec<FileEvent> {
        let mut events = Vec::new();
        while let Ok(evt) = self.rx.try_recv() {
            events.push(evt);
        }
        events
    }
}
