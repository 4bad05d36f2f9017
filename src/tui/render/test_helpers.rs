use std::path::PathBuf;

use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::model::{Track, TrackEntry, TrackMetadata, TrackSource, ViewerConfig};
use crate::ops::track_ops::build_all;
use crate::tui::app::App;

pub const TERM_W: u16 = 100;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// Render the whole app at the given size
pub fn render_app(app: &App, w: u16, h: u16) -> String {
    render_to_string(w, h, |frame, _area| super::render(frame, app))
}

/// An app over the given snapshot, positioned on the tracks screen
pub fn app_with_tracks(tracks: Vec<Track>) -> App {
    let mut app = App::new(PathBuf::from("/tmp/test-conductor"), &ViewerConfig::default());
    app.apply_snapshot(tracks);
    app
}

/// Build a track the same way discovery does
pub fn track_from(dir: &str, source: TrackSource, meta_json: &str, plan: Option<&str>) -> Track {
    let metadata: TrackMetadata =
        crate::parse::parse_metadata(meta_json.as_bytes()).unwrap();
    let entry = TrackEntry {
        dir_name: dir.to_string(),
        source,
        metadata,
        plan: plan.map(str::to_string),
    };
    build_all([&entry]).remove(0)
}

/// Two active tracks and one archived
pub fn sample_tracks() -> Vec<Track> {
    vec![
        track_from(
            "auth_20250101",
            TrackSource::Active,
            r#"{"track_id":"auth_20250101","type":"feature","status":"in_progress","description":"Add login flow"}"#,
            Some(SAMPLE_PLAN_MD),
        ),
        track_from(
            "bugfix_20250102",
            TrackSource::Active,
            r#"{"track_id":"bugfix_20250102","type":"bug","status":"new","description":"Fix crash on empty input"}"#,
            None,
        ),
        track_from(
            "legacy_20240101",
            TrackSource::Archived,
            r#"{"track_id":"legacy_20240101","type":"chore","status":"completed","description":"Old cleanup"}"#,
            None,
        ),
    ]
}

pub const SAMPLE_PLAN_MD: &str = "\
# Plan

## Phase 1: Setup [checkpoint: abc1234]

- [x] Task: Create module `deadbeef`
    - [x] Write skeleton
    - [ ] Add docs
- [ ] Task: Wire routes

## Phase 2: Polish

- [ ] Task: Tidy up
";
