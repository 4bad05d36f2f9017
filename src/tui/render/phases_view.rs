use chrono::{DateTime, Utc};
use ratatui::style::Style;
use ratatui::text::{Line, Span};

use crate::model::Track;
use crate::ops::track_ops::{completed_tasks, phase_status};
use crate::tui::theme::Theme;
use crate::util::unicode::truncate_to_width;
use crate::util::viewport::calc_viewport;

use super::{Page, cell, column_header, more_above, more_below, row_prefix};

const NUM_W: usize = 4;
const NAME_W: usize = 34;
const TASKS_W: usize = 10;

/// Phases of one track with task progress
pub fn phases_page<'a>(
    theme: &Theme,
    track: &Track,
    cursor: usize,
    height: usize,
    width: u16,
) -> Page<'a> {
    let mut body = vec![
        Line::from(Span::styled(
            format!(
                " {}",
                truncate_to_width(&track.description, (width as usize).saturating_sub(2))
            ),
            Style::default().fg(theme.dim),
        )),
        column_header(
            theme,
            format!(
                "{}{}{}Status",
                cell("#", NUM_W),
                cell("Phase", NAME_W),
                cell("Tasks", TASKS_W)
            ),
        ),
    ];

    let mut fixed = 2;
    if let Some(dates) = dates_line(track.created_at, track.updated_at) {
        body.insert(1, Line::from(Span::styled(dates, Style::default().fg(theme.dim))));
        fixed += 1;
    }

    let vp = calc_viewport(track.phases.len(), cursor, height.saturating_sub(fixed));
    body.extend(more_above(theme, &vp, "  "));
    for (idx, phase) in track
        .phases
        .iter()
        .enumerate()
        .take(vp.end)
        .skip(vp.start)
    {
        let (prefix, style) = row_prefix(theme, idx == cursor);
        let status = phase_status(phase);
        body.push(Line::from(vec![
            prefix,
            Span::styled(cell(&phase.number.to_string(), NUM_W), style),
            Span::styled(cell(&phase.name, NAME_W), style),
            Span::styled(
                cell(
                    &format!("{}/{}", completed_tasks(phase), phase.tasks.len()),
                    TASKS_W,
                ),
                style,
            ),
            Span::styled(
                status.as_str(),
                style.fg(theme.status_color(status.as_str())),
            ),
        ]));
    }
    body.extend(more_below(theme, &vp, "  "));

    Page {
        crumbs: vec![track.id.clone()],
        hint: "[Esc] Back",
        body,
        footer: "[\u{2191}\u{2193}] Navigate  [Enter] View tasks  [Esc] Back".into(),
    }
}

fn dates_line(created: Option<DateTime<Utc>>, updated: Option<DateTime<Utc>>) -> Option<String> {
    let fmt = |label: &str, at: DateTime<Utc>| format!("{}: {}", label, at.format("%Y-%m-%d %H:%M"));
    let parts: Vec<String> = [("Created", created), ("Updated", updated)]
        .into_iter()
        .filter_map(|(label, at)| at.map(|at| fmt(label, at)))
        .collect();
    (!parts.is_empty()).then(|| format!(" {}", parts.join("   ")))
}

#[cfg(test)]
mod tests {
    use crate::tui::input::Action;
    use crate::tui::nav::NavEvent;
    use crate::tui::render::test_helpers::*;
    use insta::assert_snapshot;

    #[test]
    fn phases_with_progress() {
        let mut app = app_with_tracks(sample_tracks());
        app.dispatch(Action::Nav(NavEvent::Confirm));
        let output = render_app(&app, TERM_W, TERM_H);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[2], " Add login flow");
        assert_snapshot!(lines[3].trim(), @"#   Phase                             Tasks     Status");
        assert_snapshot!(
            lines[4],
            @"> 1   Setup                             1/2       in_progress"
        );
        assert_eq!(
            lines[5],
            "  2   Polish                            0/1       pending"
        );
    }

    #[test]
    fn timestamps_shown_when_known() {
        let track = track_from(
            "dated",
            crate::model::TrackSource::Active,
            r#"{"description":"Dated","created_at":"2025-01-01T10:00:00Z","updated_at":"not a date"}"#,
            Some(SAMPLE_PLAN_MD),
        );
        let mut app = app_with_tracks(vec![track]);
        app.dispatch(Action::Nav(NavEvent::Confirm));
        let output = render_app(&app, TERM_W, TERM_H);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[2], " Dated");
        assert_eq!(lines[3], " Created: 2025-01-01 10:00");
        assert!(lines[4].trim().starts_with("#   Phase"));
    }

    #[test]
    fn track_without_plan_has_no_rows() {
        let mut app = app_with_tracks(sample_tracks());
        app.dispatch(Action::Nav(NavEvent::MoveCursor(1)));
        app.dispatch(Action::Nav(NavEvent::Confirm));
        let output = render_app(&app, TERM_W, TERM_H);
        let lines: Vec<&str> = output.lines().collect();
        assert!(lines[0].contains("> bugfix_20250102"));
        assert_eq!(lines[2], " Fix crash on empty input");
        assert_eq!(lines[4], "");
    }
}
