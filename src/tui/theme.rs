use ratatui::style::Color;

use crate::model::UiConfig;

/// Parsed color theme for the TUI
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub text: Color,
    pub text_bright: Color,
    pub highlight: Color,
    pub dim: Color,
    pub header: Color,
    pub separator: Color,
    pub red: Color,
    pub yellow: Color,
    pub green: Color,
    pub cyan: Color,
    pub magenta: Color,
    pub blue: Color,
    pub gray: Color,
    pub selection_bg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            text: Color::Reset,
            text_bright: Color::White,
            highlight: Color::Rgb(0xFB, 0x41, 0x96),
            dim: Color::DarkGray,
            header: Color::Rgb(0x44, 0xDD, 0xFF),
            separator: Color::DarkGray,
            red: Color::Red,
            yellow: Color::Yellow,
            green: Color::Green,
            cyan: Color::Cyan,
            magenta: Color::Magenta,
            blue: Color::Blue,
            gray: Color::Gray,
            selection_bg: Color::Rgb(0x3D, 0x14, 0x38),
        }
    }
}

/// Parse a hex color string like "#FF4444" into an RGB Color
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

impl Theme {
    /// Create a theme from the `[ui.colors]` table, falling back to defaults.
    /// Unknown slot names and malformed colors are ignored.
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::default();

        for (key, value) in &ui.colors {
            let Some(color) = parse_hex_color(value) else {
                tracing::warn!(slot = %key, value = %value, "ignoring malformed color");
                continue;
            };
            match key.as_str() {
                "text" => theme.text = color,
                "text_bright" => theme.text_bright = color,
                "highlight" => theme.highlight = color,
                "dim" => theme.dim = color,
                "header" => theme.header = color,
                "separator" => theme.separator = color,
                "red" => theme.red = color,
                "yellow" => theme.yellow = color,
                "green" => theme.green = color,
                "cyan" => theme.cyan = color,
                "magenta" => theme.magenta = color,
                "blue" => theme.blue = color,
                "gray" => theme.gray = color,
                "selection_bg" => theme.selection_bg = color,
                _ => {}
            }
        }

        theme
    }

    /// Color for a track, phase or task status word
    pub fn status_color(&self, status: &str) -> Color {
        match status {
            "completed" | "done" => self.green,
            "in_progress" | "doing" => self.yellow,
            "pending" | "todo" => self.cyan,
            "new" => self.magenta,
            "review" => self.blue,
            "blocked" => self.red,
            "archived" => self.gray,
            _ => self.text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(
            parse_hex_color("#FF4444"),
            Some(Color::Rgb(0xFF, 0x44, 0x44))
        );
        assert_eq!(parse_hex_color("FF4444"), None); // missing #
        assert_eq!(parse_hex_color("#FF44"), None); // too short
        assert_eq!(parse_hex_color("#ZZZZZZ"), None);
        assert_eq!(parse_hex_color("#ééé"), None);
    }

    #[test]
    fn test_from_config_overrides() {
        let mut ui = UiConfig::default();
        ui.colors.insert("highlight".into(), "#000000".into());
        ui.colors.insert("green".into(), "not-a-color".into());
        ui.colors.insert("nonsense".into(), "#112233".into());

        let theme = Theme::from_config(&ui);
        assert_eq!(theme.highlight, Color::Rgb(0, 0, 0));
        assert_eq!(theme.green, Theme::default().green);
        assert_eq!(theme.cyan, Color::Cyan);
    }

    #[test]
    fn test_status_color() {
        let theme = Theme::default();
        assert_eq!(theme.status_color("completed"), theme.green);
        assert_eq!(theme.status_color("done"), theme.green);
        assert_eq!(theme.status_color("in_progress"), theme.yellow);
        assert_eq!(theme.status_color("doing"), theme.yellow);
        assert_eq!(theme.status_color("pending"), theme.cyan);
        assert_eq!(theme.status_color("new"), theme.magenta);
        assert_eq!(theme.status_color("review"), theme.blue);
        assert_eq!(theme.status_color("blocked"), theme.red);
        assert_eq!(theme.status_color("archived"), theme.gray);
        assert_eq!(theme.status_color("whatever"), theme.text);
        assert_eq!(theme.status_color("empty"), theme.text);
    }
}
