use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::io::config_io::{ConfigError, read_config};
use crate::io::discovery::{CONDUCTOR_DIR, load_tracks};
use crate::io::log::init_logging;
use crate::io::watcher::ConductorWatcher;
use crate::model::{Track, ViewerConfig};
use crate::ops::track_ops::sort_tracks;

use super::input::{self, Action};
use super::nav::{NavEvent, Navigator, Screen, Transition};
use super::refresh::RefreshSchedule;
use super::render;
use super::theme::Theme;

/// Longest the loop blocks waiting for a key
const TICK: Duration = Duration::from_millis(250);

/// Errors that stop the viewer before or while it runs
#[derive(Debug, Error)]
pub enum AppError {
    #[error("terminal: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("could not open log file {path}: {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Startup settings from the command line. `None` defers to `tui.toml`.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Directory containing `conductor/`; the working directory when unset
    pub project_dir: Option<PathBuf>,
    /// List archived tracks from the start
    pub show_archived: bool,
    pub interval: Option<Duration>,
    pub log_file: Option<PathBuf>,
}

/// Main application state
pub struct App {
    /// Directory containing `conductor/`
    pub base: PathBuf,
    /// Latest snapshot, active tracks first
    pub tracks: Vec<Track>,
    pub nav: Navigator,
    pub show_archived: bool,
    pub theme: Theme,
    pub should_quit: bool,
}

/// The tracks the navigator indexes into. `tracks` must be in
/// [`sort_tracks`] order so active ones come first.
fn visible(tracks: &[Track], show_archived: bool) -> &[Track] {
    if show_archived {
        tracks
    } else {
        &tracks[..tracks.partition_point(|t| !t.is_archived())]
    }
}

impl App {
    pub fn new(base: PathBuf, config: &ViewerConfig) -> Self {
        App {
            base,
            tracks: Vec::new(),
            nav: Navigator::new(),
            show_archived: config.show_archived,
            theme: Theme::from_config(&config.ui),
            should_quit: false,
        }
    }

    /// Tracks currently listed on the tracks screen
    pub fn visible_tracks(&self) -> &[Track] {
        visible(&self.tracks, self.show_archived)
    }

    /// Replace the snapshot and re-fit the navigation stack to it. The
    /// snapshot is put in display order first.
    pub fn apply_snapshot(&mut self, mut tracks: Vec<Track>) {
        sort_tracks(&mut tracks);
        self.tracks = tracks;
        let shown = visible(&self.tracks, self.show_archived);
        if self.nav.reclamp(shown) {
            debug!(stack = ?self.nav.stack(), "navigation re-clamped to new snapshot");
        }
    }

    /// Reload every track from disk
    pub fn refresh(&mut self) {
        let tracks = load_tracks(&self.base);
        debug!(count = tracks.len(), "refreshed snapshot");
        self.apply_snapshot(tracks);
    }

    /// Apply one decoded key action
    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::Nav(event) => self.navigate(event),
            Action::ToggleArchived => {
                self.show_archived = !self.show_archived;
                self.nav.reset();
                info!(show_archived = self.show_archived, "toggled archived tracks");
            }
            Action::Refresh => self.refresh(),
            Action::Interrupt => {
                if self.nav.unwind() {
                    debug!("unwound to tracks screen");
                }
                self.navigate(NavEvent::RequestQuit);
            }
        }
    }

    fn navigate(&mut self, event: NavEvent) {
        let shown = visible(&self.tracks, self.show_archived);
        match self.nav.apply(event, shown) {
            Transition::Quit => self.should_quit = true,
            Transition::Changed if matches!(event, NavEvent::MoveScroll(_)) => {
                let max = self.detail_subtask_count().saturating_sub(1);
                self.nav.limit_scroll(max);
            }
            Transition::Changed | Transition::Unchanged => {}
        }
    }

    /// Subtasks of the task on the detail screen, 0 elsewhere
    fn detail_subtask_count(&self) -> usize {
        let Screen::Detail {
            track, phase, task, ..
        } = *self.nav.current()
        else {
            return 0;
        };
        self.visible_tracks()
            .get(track)
            .and_then(|t| t.phase(phase))
            .and_then(|p| p.task(task))
            .map_or(0, |t| t.subtasks.len())
    }
}

/// Resolve settings, then run the viewer until the user quits
pub fn run(options: RunOptions) -> Result<(), AppError> {
    let base = match options.project_dir {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    let mut config = read_config(&base)?;
    if options.show_archived {
        config.show_archived = true;
    }
    let log_file = options.log_file.or_else(|| config.log_file.clone());
    init_logging(log_file.as_deref()).map_err(|source| AppError::LogFile {
        path: log_file.clone().unwrap_or_default(),
        source,
    })?;

    let interval = options
        .interval
        .unwrap_or(Duration::from_millis(config.refresh_interval_ms));
    info!(base = %base.display(), interval_ms = interval.as_millis() as u64, "starting");

    let mut app = App::new(base, &config);
    app.refresh();

    let watcher = start_watcher(&app.base);
    let mut schedule = RefreshSchedule::new(interval);
    schedule.start(Instant::now());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app, &mut schedule, watcher.as_ref());
    schedule.cancel();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("stopped");
    result.map_err(AppError::from)
}

fn start_watcher(base: &Path) -> Option<ConductorWatcher> {
    let dir = base.join(CONDUCTOR_DIR);
    match ConductorWatcher::start(&dir) {
        Ok(w) => Some(w),
        Err(e) => {
            warn!(dir = %dir.display(), error = %e, "file watcher unavailable, using timer only");
            None
        }
    }
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    schedule: &mut RefreshSchedule,
    watcher: Option<&ConductorWatcher>,
) -> io::Result<()> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        let wait = schedule
            .time_until_due(Instant::now())
            .map_or(TICK, |due| due.min(TICK));
        if event::poll(wait)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        if app.should_quit {
            schedule.cancel();
            break;
        }

        let files_changed = watcher.is_some_and(|w| !w.poll().is_empty());
        let now = Instant::now();
        if files_changed || schedule.is_due(now) {
            app.refresh();
            schedule.mark_refreshed(now);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Phase, Subtask, Task, TrackSource};

    fn track(id: &str, source: TrackSource, subtasks: usize) -> Track {
        Track {
            id: id.into(),
            kind: "feature".into(),
            status: "new".into(),
            description: String::new(),
            source,
            created_at: None,
            updated_at: None,
            phases: vec![Phase {
                number: 1,
                name: "Setup".into(),
                checkpoint: None,
                tasks: vec![Task {
                    name: "Do it".into(),
                    completed: false,
                    commit: None,
                    subtasks: (0..subtasks)
                        .map(|i| Subtask {
                            name: format!("step {}", i),
                            completed: false,
                        })
                        .collect(),
                }],
            }],
        }
    }

    fn app_with(tracks: Vec<Track>) -> App {
        let mut app = App::new(PathBuf::from("/nonexistent"), &ViewerConfig::default());
        app.apply_snapshot(tracks);
        app
    }

    fn sample() -> Vec<Track> {
        vec![
            track("a", TrackSource::Active, 2),
            track("b", TrackSource::Active, 0),
            track("old", TrackSource::Archived, 0),
        ]
    }

    #[test]
    fn test_archived_hidden_by_default() {
        let app = app_with(sample());
        let ids: Vec<&str> = app.visible_tracks().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_toggle_archived_resets_navigation() {
        let mut app = app_with(sample());
        app.dispatch(Action::Nav(NavEvent::MoveCursor(1)));
        app.dispatch(Action::Nav(NavEvent::Confirm));
        assert_eq!(app.nav.depth(), 2);

        app.dispatch(Action::ToggleArchived);
        assert!(app.show_archived);
        assert_eq!(app.nav.stack(), &[Screen::Tracks { cursor: 0 }]);
        assert_eq!(app.visible_tracks().len(), 3);
    }

    #[test]
    fn test_cursor_limited_to_visible_tracks() {
        let mut app = app_with(sample());
        app.dispatch(Action::Nav(NavEvent::MoveCursor(10)));
        assert_eq!(app.nav.current(), &Screen::Tracks { cursor: 1 });
    }

    #[test]
    fn test_unsorted_snapshot_hides_every_archived_track() {
        let app = app_with(vec![
            track("old", TrackSource::Archived, 0),
            track("b", TrackSource::Active, 0),
            track("a", TrackSource::Active, 0),
        ]);
        let ids: Vec<&str> = app.visible_tracks().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_interrupt_asks_to_quit_from_any_screen() {
        let mut app = app_with(sample());
        app.dispatch(Action::Nav(NavEvent::MoveCursor(1)));
        app.dispatch(Action::Nav(NavEvent::Confirm));
        app.dispatch(Action::Nav(NavEvent::Confirm));
        assert_eq!(app.nav.depth(), 3);

        app.dispatch(Action::Interrupt);
        assert_eq!(
            app.nav.stack(),
            &[Screen::Tracks { cursor: 1 }, Screen::QuitConfirm]
        );
        assert!(!app.should_quit);

        app.dispatch(Action::Nav(NavEvent::ConfirmQuit(true)));
        assert!(app.should_quit);
    }

    #[test]
    fn test_snapshot_reclamps() {
        let mut app = app_with(sample());
        app.dispatch(Action::Nav(NavEvent::MoveCursor(1)));
        app.apply_snapshot(vec![track("a", TrackSource::Active, 0)]);
        assert_eq!(app.nav.current(), &Screen::Tracks { cursor: 0 });
    }

    #[test]
    fn test_confirmed_quit_sets_flag() {
        let mut app = app_with(sample());
        app.dispatch(Action::Nav(NavEvent::RequestQuit));
        assert!(!app.should_quit);
        app.dispatch(Action::Nav(NavEvent::ConfirmQuit(true)));
        assert!(app.should_quit);
    }

    #[test]
    fn test_detail_scroll_is_capped() {
        let mut app = app_with(sample());
        for _ in 0..3 {
            app.dispatch(Action::Nav(NavEvent::Confirm));
        }
        assert!(matches!(app.nav.current(), Screen::Detail { .. }));
        app.dispatch(Action::Nav(NavEvent::MoveScroll(isize::MAX)));
        assert!(matches!(app.nav.current(), Screen::Detail { scroll: 1, .. }));
    }

    #[test]
    fn test_refresh_on_missing_base_is_empty() {
        let mut app = app_with(sample());
        app.dispatch(Action::Refresh);
        assert!(app.tracks.is_empty());
        assert_eq!(app.nav.current(), &Screen::Tracks { cursor: 0 });
    }
}
