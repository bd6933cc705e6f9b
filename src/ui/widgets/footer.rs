//! Footer widget with context-aware keybinding hints

use crate::app::App;
use crate::{constants, theme};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Render dashboard footer with context-aware shortcuts
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    render_hints(frame, area, &hints_for(app));
}

/// Key hints for whatever view currently has focus.
fn hints_for(app: &App) -> Vec<(&'static str, &'static str)> {
    if app.action_menu.is_some() {
        return vec![("↑↓", "Move"), ("Enter", "Run"), ("Esc", "Close")];
    }

    if app.show_config {
        return vec![("↑↓", "Scroll"), ("g", "Top"), ("G", "End"), ("Esc", "Close")];
    }

    vec![
        ("↑↓", "Product"),
        ("Enter", "Open"),
        ("1-6", "Open #"),
        ("r", "Refresh"),
        ("x", "Actions"),
        ("c", "Config"),
        ("q", "Quit"),
    ]
}

fn render_hints(frame: &mut Frame, area: Rect, hints: &[(&str, &str)]) {
    let [hints_area, brand_area] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(16)]).areas(area);

    let mut hint_spans = vec![Span::raw(" ")];
    let mut current_width = 1;
    let max_width = usize::from(hints_area.width);

    for (i, (key, action)) in hints.iter().enumerate() {
        // " │ " separator precedes every hint but the first
        let sep_width = if i > 0 { 3 } else { 0 };
        let item_width = key.chars().count() + 1 + action.len() + sep_width;

        if current_width + item_width > max_width {
            break;
        }

        if i > 0 {
            hint_spans.push(Span::styled(
                " │ ",
                Style::default().fg(Color::Rgb(50, 50, 50)),
            ));
        }
        hint_spans.push(Span::styled(
            *key,
            Style::default()
                .fg(theme::ACCENT_PRIMARY)
                .add_modifier(Modifier::BOLD),
        ));
        hint_spans.push(Span::raw(" "));
        hint_spans.push(Span::styled(*action, Style::default().fg(Color::DarkGray)));

        current_width += item_width;
    }
    frame.render_widget(Paragraph::new(Line::from(hint_spans)), hints_area);

    let branding = Line::from(Span::styled(
        format!("{} v{} ", constants::APP_NAME, constants::APP_VERSION),
        Style::default().fg(theme::NORD_POLAR_NIGHT_4),
    ));
    frame.render_widget(
        Paragraph::new(branding).alignment(Alignment::Right),
        brand_area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_hints_follow_focus() {
        let mut app = App::new(Config::default(), std::path::PathBuf::from("/tmp"));
        assert!(hints_for(&app).contains(&("r", "Refresh")));

        app.show_config = true;
        assert!(hints_for(&app).contains(&("G", "End")));

        app.action_menu = Some(ratatui::widgets::ListState::default());
        assert_eq!(hints_for(&app)[1], ("Enter", "Run"));
    }
}
