//! Watches open image files and reports when they change on disk.
//!
//! Parent directories are watched rather than the files themselves, since
//! many editors and scanners replace a file by renaming a new one over it.

use eframe::egui;
use notify::event::ModifyKind;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};

pub struct ImageWatcher {
    changed_rx: Receiver<PathBuf>,
    /// The watcher must be kept alive for events to fire
    _watcher: RecommendedWatcher,
}

impl ImageWatcher {
    /// Starts watching `paths`.
    ///
    /// Returns `None` if no watcher could be created or none of the directories can be watched.
    pub fn new(ctx: egui::Context, paths: &[PathBuf]) -> Option<Self> {
        let watched: HashSet<PathBuf> = paths.iter().filter_map(|p| p.canonicalize().ok()).collect();
        if watched.is_empty() {
            return None;
        }

        let (changed_tx, changed_rx) = mpsc::channel();
        let files = watched.clone();
        let mut watcher = notify::recommended_watcher(move |res: Result<Event, notify::Error>| {
            let event = match res {
                Ok(event) => event,
                Err(err) => {
                    log::warn!("Image watcher error: {err}");
                    return;
                }
            };

            if !is_content_change(&event.kind) {
                return;
            }

            for path in event.paths {
                if files.contains(&path) {
                    let _ = changed_tx.send(path);
                    ctx.request_repaint();
                }
            }
        })
        .map_err(|err| log::warn!("Failed to create image watcher: {err}"))
        .ok()?;

        let dirs: HashSet<&Path> = watched.iter().filter_map(|p| p.parent()).collect();
        let mut watching = 0;
        for dir in dirs {
            match watcher.watch(dir, RecursiveMode::NonRecursive) {
                Ok(()) => {
                    log::info!("Watching for image changes in {}", dir.display());
                    watching += 1;
                }
                Err(err) => log::warn!("Cannot watch {}: {err}", dir.display()),
            }
        }

        (watching > 0).then_some(Self {
            changed_rx,
            _watcher: watcher,
        })
    }

    /// Drains pending change notifications, one entry per changed file.
    pub fn poll(&mut self) -> HashSet<PathBuf> {
        let mut changed = HashSet::new();
        loop {
            match self.changed_rx.try_recv() {
                Ok(path) => {
                    changed.insert(path);
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    log::warn!("Image watcher channel disconnected");
                    break;
                }
            }
        }
        changed
    }
}

/// New or rewritten file contents. Metadata-only changes (`chmod`, `touch`) are ignored.
fn is_content_change(kind: &EventKind) -> bool {
    matches!(
        kind,
        EventKind::Create(_) | EventKind::Modify(ModifyKind::Data(_) | ModifyKind::Name(_))
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{CreateKind, DataChange, MetadataKind, RenameMode};

    #[test]
    fn content_changes_trigger_reload() {
        assert!(is_content_change(&EventKind::Create(CreateKind::File)));
        assert!(is_content_change(&EventKind::Modify(ModifyKind::Data(
            DataChange::Content
        ))));
        assert!(is_content_change(&EventKind::Modify(ModifyKind::Name(
            RenameMode::To
        ))));
    }

    #[test]
    fn metadata_changes_are_ignored() {
        assert!(!is_content_change(&EventKind::Modify(ModifyKind::Metadata(
            MetadataKind::Permissions
        ))));
        assert!(!is_content_change(&EventKind::Modify(ModifyKind::Metadata(
            MetadataKind::WriteTime
        ))));
        assert!(!is_content_change(&EventKind::Access(
            notify::event::AccessKind::Any
        )));
    }
}
