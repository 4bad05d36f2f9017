use ratatui::style::Style;
use ratatui::text::{Line, Span};

use crate::model::{Phase, Task, Track};
use crate::ops::track_ops::completed_subtasks;
use crate::tui::theme::Theme;
use crate::util::unicode::truncate_to_width;
use crate::util::viewport::calc_viewport;

use super::{Page, cell, column_header, more_above, more_below, row_prefix};

const NUM_W: usize = 4;
const NAME_W: usize = 36;
const SUBS_W: usize = 8;
const STATUS_W: usize = 10;

/// Short status word used in the task list
fn list_status(task: &Task) -> &'static str {
    if task.completed { "done" } else { "pending" }
}

/// Tasks of one phase with sub-task progress and commit
pub fn tasks_page<'a>(
    theme: &Theme,
    track: &Track,
    phase: &Phase,
    cursor: usize,
    height: usize,
    width: u16,
) -> Page<'a> {
    let mut body = vec![
        Line::from(Span::styled(
            format!(
                " {}",
                truncate_to_width(&phase.name, (width as usize).saturating_sub(2))
            ),
            Style::default().fg(theme.dim),
        )),
        column_header(
            theme,
            format!(
                "{}{}{}{}Commit",
                cell("#", NUM_W),
                cell("Task", NAME_W),
                cell("Subs", SUBS_W),
                cell("Status", STATUS_W)
            ),
        ),
    ];

    let vp = calc_viewport(phase.tasks.len(), cursor, height.saturating_sub(2));
    body.extend(more_above(theme, &vp, "  "));
    for (idx, task) in phase
        .tasks
        .iter()
        .enumerate()
        .take(vp.end)
        .skip(vp.start)
    {
        let (prefix, style) = row_prefix(theme, idx == cursor);
        let status = list_status(task);
        body.push(Line::from(vec![
            prefix,
            Span::styled(cell(&(idx + 1).to_string(), NUM_W), style),
            Span::styled(cell(&task.name, NAME_W), style),
            Span::styled(
                cell(
                    &format!("{}/{}", completed_subtasks(task), task.subtasks.len()),
                    SUBS_W,
                ),
                style,
            ),
            Span::styled(cell(status, STATUS_W), style.fg(theme.status_color(status))),
            Span::styled(task.commit.as_deref().unwrap_or("\u{2014}").to_string(), style),
        ]));
    }
    body.extend(more_below(theme, &vp, "  "));

    Page {
        crumbs: vec![
            truncate_to_width(&track.id, 20),
            format!("Phase {}", phase.number),
        ],
        hint: "[Esc] Back",
        body,
        footer: "[\u{2191}\u{2193}] Navigate  [Enter] View detail  [Esc] Back".into(),
    }
}
