pub mod detail_view;
pub mod phases_view;
pub mod quit_confirm;
pub mod tasks_view;
pub mod tracks_view;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::util::unicode::{display_width, pad_to_width, truncate_to_width};
use crate::util::viewport::Viewport;

use super::app::App;
use super::nav::Screen;
use super::theme::Theme;

pub const TITLE: &str = "Conductor TUI";

/// Everything a screen contributes: breadcrumbs and hint for the header,
/// body lines, and the footer key help.
pub struct Page<'a> {
    pub crumbs: Vec<String>,
    pub hint: &'static str,
    pub body: Vec<Line<'a>>,
    pub footer: String,
}

impl Page<'_> {
    /// Shown when the active screen points at data that no longer exists
    fn stale() -> Self {
        Page {
            crumbs: Vec::new(),
            hint: "[Esc] Back",
            body: Vec::new(),
            footer: "[Esc] Back".into(),
        }
    }
}

/// Main render function: header, the active screen's body, footer
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let screen = *app.nav.current();

    if screen == Screen::QuitConfirm {
        quit_confirm::render_quit_confirm(frame, app, area);
        return;
    }

    // Layout: header (2 rows) | content | footer (1 row)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    let body_height = chunks[1].height as usize;
    let tracks = app.visible_tracks();
    let page = match screen {
        Screen::Tracks { cursor } => Some(tracks_view::tracks_page(
            app,
            cursor,
            body_height,
            area.width,
        )),
        Screen::Phases { track, cursor } => tracks
            .get(track)
            .map(|t| phases_view::phases_page(&app.theme, t, cursor, body_height, area.width)),
        Screen::Tasks {
            track,
            phase,
            cursor,
        } => tracks.get(track).and_then(|t| {
            t.phase(phase).map(|p| {
                tasks_view::tasks_page(&app.theme, t, p, cursor, body_height, area.width)
            })
        }),
        Screen::Detail {
            track,
            phase,
            task,
            scroll,
        } => tracks.get(track).and_then(|t| {
            let p = t.phase(phase)?;
            let k = p.task(task)?;
            Some(detail_view::detail_page(
                &app.theme,
                t,
                p,
                k,
                scroll,
                body_height,
                area.width,
            ))
        }),
        Screen::QuitConfirm => None,
    }
    .unwrap_or_else(Page::stale);

    render_header(frame, &app.theme, &page, chunks[0]);
    frame.render_widget(Paragraph::new(page.body), chunks[1]);
    let footer = Line::from(Span::styled(
        format!(" {}", page.footer),
        Style::default().fg(app.theme.dim),
    ));
    frame.render_widget(Paragraph::new(footer), chunks[2]);
}

/// Title, version and breadcrumbs on the left, hint on the right, then a rule
fn render_header(frame: &mut Frame, theme: &Theme, page: &Page, area: Rect) {
    let width = area.width as usize;
    let dim = Style::default().fg(theme.dim);

    let mut spans = vec![
        Span::raw(" "),
        Span::styled(
            TITLE,
            Style::default()
                .fg(theme.header)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(concat!(" v", env!("CARGO_PKG_VERSION")), dim),
    ];
    for crumb in &page.crumbs {
        spans.push(Span::styled(" > ", dim));
        spans.push(Span::styled(
            crumb.clone(),
            Style::default().fg(theme.text_bright),
        ));
    }

    let used: usize = spans.iter().map(|s| display_width(&s.content)).sum();
    let gap = width
        .saturating_sub(used + display_width(page.hint) + 1)
        .max(1);
    spans.push(Span::raw(" ".repeat(gap)));
    spans.push(Span::styled(page.hint, dim));

    let rule = format!(" {}", "\u{2500}".repeat(width.saturating_sub(4)));
    let lines = vec![
        Line::from(spans),
        Line::from(Span::styled(rule, Style::default().fg(theme.separator))),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

/// Fixed-width column: truncated to leave a two-cell gap, then padded
pub(super) fn cell(s: &str, width: usize) -> String {
    pad_to_width(&truncate_to_width(s, width.saturating_sub(2)), width)
}

/// Cursor marker and base style for a list row
pub(super) fn row_prefix(theme: &Theme, selected: bool) -> (Span<'static>, Style) {
    if selected {
        (
            Span::styled("> ", Style::default().fg(theme.highlight)),
            Style::default().add_modifier(Modifier::BOLD),
        )
    } else {
        (Span::raw("  "), Style::default())
    }
}

pub(super) fn more_above(theme: &Theme, vp: &Viewport, indent: &str) -> Option<Line<'static>> {
    (vp.more_above > 0).then(|| {
        Line::from(Span::styled(
            format!("{}\u{2191} {} more above", indent, vp.more_above),
            Style::default().fg(theme.dim),
        ))
    })
}

pub(super) fn more_below(theme: &Theme, vp: &Viewport, indent: &str) -> Option<Line<'static>> {
    (vp.more_below > 0).then(|| {
        Line::from(Span::styled(
            format!("{}\u{2193} {} more below", indent, vp.more_below),
            Style::default().fg(theme.dim),
        ))
    })
}

/// Dimmed column header row
pub(super) fn column_header(theme: &Theme, text: String) -> Line<'static> {
    Line::from(Span::styled(
        format!("  {}", text),
        Style::default().fg(theme.dim),
    ))
}
