//! Effective configuration viewer overlay

use crate::app::App;
use crate::config::Config;
use crate::theme;
use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};

/// Render the config viewer overlay
pub fn render(frame: &mut Frame, app: &App) {
    let area = centered_rect(70, 70, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::BORDER_FOCUSED))
        .title(" Configuration ")
        .title_bottom(Line::from(" [Esc] Close  [↑/↓] Scroll ").centered());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [path_area, content_area] =
        Layout::vertical([Constraint::Length(2), Constraint::Min(1)]).areas(inner);

    let config_path = Config::path(&app.config_dir);
    let source = if config_path.is_file() {
        "file + flags"
    } else {
        "defaults + flags"
    };
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("Path: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                config_path.display().to_string(),
                Style::default().fg(theme::TEXT_SECONDARY),
            ),
            Span::styled(format!(" ({source})"), Style::default().fg(Color::DarkGray)),
        ])),
        path_area,
    );

    let lines: Vec<Line> = app
        .config_lines()
        .iter()
        .map(|l| highlight_toml_line(l))
        .collect();
    let total_lines = lines.len();

    frame.render_widget(
        Paragraph::new(lines).scroll((app.config_scroll, 0)),
        content_area,
    );

    let scrollbar = Scrollbar::default()
        .orientation(ScrollbarOrientation::VerticalRight)
        .begin_symbol(Some("↑"))
        .end_symbol(Some("↓"))
        .style(Style::default().fg(theme::NORD_POLAR_NIGHT_4))
        .thumb_style(Style::default().fg(theme::ACCENT_PRIMARY));
    let mut scrollbar_state =
        ScrollbarState::new(total_lines.saturating_sub(usize::from(content_area.height)))
            .position(usize::from(app.config_scroll));

    let scroll_area = Rect {
        x: area.right().saturating_sub(1),
        y: content_area.y,
        width: 1,
        height: content_area.height,
    };
    frame.render_stateful_widget(scrollbar, scroll_area, &mut scrollbar_state);
}

/// Color a TOML line: section headers, keys and values.
fn highlight_toml_line(line: &str) -> Line<'static> {
    let trimmed = line.trim();

    if trimmed.starts_with('#') {
        return Line::from(Span::styled(
            line.to_string(),
            Style::default().fg(Color::DarkGray),
        ));
    }

    if trimmed.starts_with('[') && trimmed.ends_with(']') {
        return Line::from(Span::styled(
            line.to_string(),
            Style::default()
                .fg(theme::NORD_YELLOW)
                .add_modifier(Modifier::BOLD),
        ));
    }

    if let Some((key, value)) = line.split_once('=') {
        let value_color = if value.trim_start().starts_with('"') {
            theme::NORD_GREEN
        } else {
            theme::NORD_ORANGE
        };
        return Line::from(vec![
            Span::styled(key.to_string(), Style::default().fg(theme::NORD_FROST_2)),
            Span::styled("=", Style::default().fg(Color::DarkGray)),
            Span::styled(value.to_string(), Style::default().fg(value_color)),
        ]);
    }

    Line::from(Span::styled(
        line.to_string(),
        Style::default().fg(theme::TEXT_PRIMARY),
    ))
}

/// Create a centered rectangle
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::vertical([Constraint::Percentage(percent_y)]).flex(Flex::Center);
    let horizontal = Layout::horizontal([Constraint::Percentage(percent_x)]).flex(Flex::Center);

    let [area] = vertical.areas(area);
    let [area] = horizontal.areas(area);
    area
}
