use ratatui::style::Style;
use ratatui::text::{Line, Span};

use crate::model::Track;
use crate::tui::app::App;
use crate::tui::theme::Theme;
use crate::util::unicode::{pad_to_width, truncate_to_width};
use crate::util::viewport::calc_viewport;

use super::{Page, cell, column_header, more_above, more_below, row_prefix};

const ID_W: usize = 28;
const TYPE_W: usize = 10;
const STATUS_W: usize = 14;
const PHASES_W: usize = 8;
/// Prefix plus the fixed columns
const FIXED_W: usize = 2 + ID_W + TYPE_W + STATUS_W + PHASES_W;

/// The tracks overview: one row per visible track
pub fn tracks_page<'a>(app: &App, cursor: usize, height: usize, width: u16) -> Page<'a> {
    let theme = &app.theme;
    let tracks = app.visible_tracks();
    let archive_hint = if app.show_archived { "Hide" } else { "Show" };
    let mut body = Vec::new();

    if tracks.is_empty() {
        body.push(Line::from(Span::styled(
            " No tracks found.",
            Style::default().fg(theme.dim),
        )));
        return Page {
            crumbs: Vec::new(),
            hint: "[q] Quit",
            body,
            footer: format!("[a] {} archived  [r] Refresh  [q] Quit", archive_hint),
        };
    }

    body.push(column_header(
        theme,
        format!(
            "{}{}{}{}Description",
            pad_to_width("Track ID", ID_W),
            pad_to_width("Type", TYPE_W),
            pad_to_width("Status", STATUS_W),
            pad_to_width("Phases", PHASES_W),
        ),
    ));

    let desc_w = (width as usize).saturating_sub(FIXED_W).max(8);
    let vp = calc_viewport(tracks.len(), cursor, height.saturating_sub(1));
    body.extend(more_above(theme, &vp, "  "));
    for (idx, track) in tracks.iter().enumerate().take(vp.end).skip(vp.start) {
        body.push(track_row(theme, track, idx == cursor, desc_w));
    }
    body.extend(more_below(theme, &vp, "  "));

    Page {
        crumbs: Vec::new(),
        hint: "[q] Quit",
        body,
        footer: format!(
            "[\u{2191}\u{2193}] Navigate  [Enter] Phases  [a] {} archived  [r] Refresh  [q] Quit",
            archive_hint
        ),
    }
}

fn track_row<'a>(theme: &Theme, track: &Track, selected: bool, desc_w: usize) -> Line<'a> {
    let (prefix, style) = row_prefix(theme, selected);
    let tag = if track.is_archived() { " *" } else { "" };
    let status = format!("{}{}", track.status, tag);

    Line::from(vec![
        prefix,
        Span::styled(cell(&track.id, ID_W), style),
        Span::styled(cell(&track.kind, TYPE_W), style),
        Span::styled(
            pad_to_width(&status, STATUS_W),
            style.fg(theme.status_color(&track.status)),
        ),
        Span::styled(pad_to_width(&track.phases.len().to_string(), PHASES_W), style),
        Span::styled(truncate_to_width(&track.description, desc_w), style),
    ])
}
