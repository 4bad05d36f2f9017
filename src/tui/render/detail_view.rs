use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use crate::model::{Phase, Task, Track};
use crate::ops::track_ops::task_status;
use crate::tui::theme::Theme;
use crate::util::unicode::truncate_to_width;
use crate::util::viewport::Viewport;

use super::{Page, more_above, more_below};

/// Lines above the sub-task list: name, status, blank, list title
const PREAMBLE: usize = 4;
const SUB_INDENT: &str = "    ";

/// Window over `total` sub-tasks starting at `scroll`, clamped so at least
/// one item shows, with a row reserved for each indicator that is needed.
fn scroll_window(total: usize, scroll: usize, rows: usize) -> Viewport {
    let start = scroll.min(total.saturating_sub(1));
    let mut room = rows.saturating_sub((start > 0) as usize).max(1);
    if start + room < total {
        room = room.saturating_sub(1).max(1);
    }
    let end = (start + room).min(total);
    Viewport {
        start,
        end,
        more_above: start,
        more_below: total - end,
    }
}

/// Everything known about one task, with its sub-tasks scrolled to `scroll`
pub fn detail_page<'a>(
    theme: &Theme,
    track: &Track,
    phase: &Phase,
    task: &Task,
    scroll: usize,
    height: usize,
    width: u16,
) -> Page<'a> {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let status = task_status(task);
    let width = width as usize;

    let mut status_line = vec![
        Span::raw(" Status: "),
        Span::styled(status, Style::default().fg(theme.status_color(status))),
    ];
    if let Some(commit) = &task.commit {
        status_line.push(Span::raw("          Commit: "));
        status_line.push(Span::styled(commit.clone(), bold));
    }

    let mut body = vec![
        Line::from(vec![
            Span::raw(" "),
            Span::styled("Task: ", bold),
            Span::raw(truncate_to_width(&task.name, width.saturating_sub(8))),
        ]),
        Line::from(status_line),
        Line::from(""),
    ];

    if task.subtasks.is_empty() {
        body.push(Line::from(Span::styled(
            " No sub-tasks.",
            Style::default().fg(theme.dim),
        )));
    } else {
        body.push(Line::from(Span::styled(
            format!(" Sub-tasks: ({})", task.subtasks.len()),
            bold,
        )));
        let vp = scroll_window(
            task.subtasks.len(),
            scroll,
            height.saturating_sub(PREAMBLE),
        );
        body.extend(more_above(theme, &vp, SUB_INDENT));
        for sub in &task.subtasks[vp.start..vp.end] {
            let check = if sub.completed {
                Span::styled("[x]", Style::default().fg(theme.green))
            } else {
                Span::raw("[ ]")
            };
            body.push(Line::from(vec![
                Span::raw(SUB_INDENT),
                check,
                Span::raw(" "),
                Span::raw(truncate_to_width(&sub.name, width.saturating_sub(9))),
            ]));
        }
        body.extend(more_below(theme, &vp, SUB_INDENT));
    }

    let footer = if task.subtasks.is_empty() {
        "[Esc] Back"
    } else {
        "[\u{2191}\u{2193}] Scroll  [Esc] Back"
    };

    Page {
        crumbs: vec![
            truncate_to_width(&track.id, 16),
            format!("Phase {}", phase.number),
            format!("Task: {}", truncate_to_width(&task.name, 30)),
        ],
        hint: "[Esc] Back",
        body,
        footer: footer.into(),
    }
}
