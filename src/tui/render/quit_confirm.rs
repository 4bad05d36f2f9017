use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;
use crate::util::unicode::display_width;

const PROMPT: &str = "Quit Conductor TUI? ";
const CHOICES: &str = "[y/n]";

/// Full-screen quit prompt, centered
pub fn render_quit_confirm(frame: &mut Frame, app: &App, area: Rect) {
    let width = area.width as usize;
    let mid = area.height as usize / 2;
    let pad = width.saturating_sub(display_width(PROMPT) + display_width(CHOICES)) / 2;

    let mut lines: Vec<Line> = vec![Line::from(""); mid];
    lines.push(Line::from(vec![
        Span::raw(" ".repeat(pad)),
        Span::styled(PROMPT, Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(CHOICES, Style::default().fg(app.theme.dim)),
    ]));
    frame.render_widget(Paragraph::new(lines), area);
}

#[cfg(test)]
mod tests {
    use crate::tui::input::Action;
    use crate::tui::nav::NavEvent;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn quit_prompt_is_centered() {
        let mut app = app_with_tracks(sample_tracks());
        app.dispatch(Action::Nav(NavEvent::RequestQuit));
        let output = render_app(&app, 45, 6);
        assert_eq!(output, "\n\n\n          Quit Conductor TUI? [y/n]");
    }
}
