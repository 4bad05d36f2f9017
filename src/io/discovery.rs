use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::model::metadata::TrackEntry;
use crate::model::track::{Track, TrackSource};
use crate::ops::track_ops::build_all;
use crate::parse::parse_metadata;

/// Name of the directory holding all Conductor data under the project root
pub const CONDUCTOR_DIR: &str = "conductor";
pub const METADATA_FILE: &str = "metadata.json";
pub const PLAN_FILE: &str = "plan.md";

/// Read every track directory under `conductor/tracks/` and
/// `conductor/archive/`.
///
/// A missing source directory contributes nothing. An entry whose
/// `metadata.json` is missing or invalid is skipped with a warning. An
/// unreadable `plan.md` yields `plan: None`.
pub fn discover_entries(base: &Path) -> Vec<TrackEntry> {
    let mut entries = Vec::new();
    for source in [TrackSource::Active, TrackSource::Archived] {
        let dir = base.join(CONDUCTOR_DIR).join(source.dir_name());
        let read_dir = match fs::read_dir(&dir) {
            Ok(rd) => rd,
            Err(e) => {
                debug!(path = %dir.display(), error = %e, "track directory not readable");
                continue;
            }
        };

        for dir_entry in read_dir.flatten() {
            let path = dir_entry.path();
            if !path.is_dir() {
                continue;
            }
            let dir_name = dir_entry.file_name().to_string_lossy().into_owned();

            let meta_path = path.join(METADATA_FILE);
            let bytes = match fs::read(&meta_path) {
                Ok(b) => b,
                Err(e) => {
                    warn!(path = %meta_path.display(), error = %e, "skipping track: metadata unreadable");
                    continue;
                }
            };
            let metadata = match parse_metadata(&bytes) {
                Ok(m) => m,
                Err(e) => {
                    warn!(path = %meta_path.display(), error = %e, "skipping track: metadata invalid");
                    continue;
                }
            };

            let plan = fs::read(path.join(PLAN_FILE))
                .ok()
                .map(|b| String::from_utf8_lossy(&b).into_owned());

            entries.push(TrackEntry {
                dir_name,
                source,
                metadata,
                plan,
            });
        }
    }
    entries
}

/// Discover and build a full, sorted snapshot of tracks
pub fn load_tracks(base: &Path) -> Vec<Track> {
    let entries = discover_entries(base);
    let tracks = build_all(&entries);
    debug!(count = tracks.len(), "loaded tracks");
    tracks
}
