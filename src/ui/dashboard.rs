//! Main dashboard view.

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use super::widgets::footer;
use crate::app::App;
use crate::core::products::PRODUCTS;
use crate::core::spc::{OutlookLayer, RiskReading};
use crate::state::{format_age, Reading};
use crate::{constants, theme};

pub fn render(frame: &mut Frame, app: &mut App) {
    let [header_area, readings_area, lower_area, footer_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(8),
        Constraint::Min(6),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    render_header(frame, app, header_area);

    let [daycast_area, categorical_area, risks_area] = Layout::horizontal([
        Constraint::Percentage(28),
        Constraint::Percentage(36),
        Constraint::Percentage(36),
    ])
    .areas(readings_area);
    render_daycast(frame, app, daycast_area);
    render_categorical(frame, app, categorical_area);
    render_risks(frame, app, risks_area);

    let [products_area, activity_area] =
        Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)])
            .areas(lower_area);
    render_products(frame, app, products_area);
    render_activity(frame, app, activity_area);

    footer::render(frame, app, footer_area);
}

fn panel(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::BORDER_DEFAULT))
        .title(Span::styled(
            title,
            Style::default()
                .fg(theme::ACCENT_SECONDARY)
                .add_modifier(Modifier::BOLD),
        ))
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let loc = &app.config.location;

    let status = if app.refreshing {
        Span::styled(
            format!("● {}", constants::MSG_FETCHING),
            Style::default().fg(theme::WARNING),
        )
    } else if let Some(at) = app.last_cycle {
        Span::styled(
            format!("● Updated {} ago", format_age(at.elapsed())),
            Style::default().fg(theme::SUCCESS),
        )
    } else {
        Span::styled("● Waiting", Style::default().fg(theme::TEXT_SECONDARY))
    };

    let line = Line::from(vec![
        Span::styled(
            constants::APP_NAME.to_uppercase(),
            Style::default()
                .fg(theme::ACCENT_PRIMARY)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" │ ", Style::default().fg(theme::BORDER_DEFAULT)),
        Span::styled(
            loc.name.as_str(),
            Style::default()
                .fg(theme::TEXT_PRIMARY)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {}  {}", loc.coordinates(), loc.station),
            Style::default().fg(theme::TEXT_SECONDARY),
        ),
        Span::raw("   "),
        status,
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::BORDER_DEFAULT))
        .title_bottom(
            Line::from(Span::styled(
                format!(" {} ", constants::APP_SUMMARY),
                Style::default().fg(theme::TEXT_SECONDARY),
            ))
            .right_aligned(),
        );
    frame.render_widget(Paragraph::new(line).block(block), area);
}

/// Suffix like ` (12m old)` for stale readings, empty otherwise.
fn staleness<T>(app: &App, reading: &Reading<T>) -> Option<String> {
    reading
        .is_stale(app.refresh_interval())
        .then(|| format!(" ({} old)", format_age(reading.age())))
}

fn error_line(app: &App, source: &str) -> Option<Line<'static>> {
    app.source_errors.get(source).map(|msg| {
        Line::from(Span::styled(
            format!("⚠ {msg}"),
            Style::default().fg(theme::ERROR),
        ))
    })
}

fn render_daycast(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines = Vec::new();

    if let Some(ref reading) = app.daycast {
        let stale = staleness(app, reading);
        let color = |c| if stale.is_some() { theme::STALE } else { c };
        lines.push(Line::from(vec![
            Span::styled("High ", Style::default().fg(theme::TEXT_SECONDARY)),
            Span::styled(
                format!("{}°F", reading.value.high_f),
                Style::default()
                    .fg(color(theme::NORD_ORANGE))
                    .add_modifier(Modifier::BOLD),
            ),
        ]));
        lines.push(Line::from(vec![
            Span::styled("Low  ", Style::default().fg(theme::TEXT_SECONDARY)),
            Span::styled(
                format!("{}°F", reading.value.low_f),
                Style::default().fg(color(theme::NORD_FROST_3)),
            ),
        ]));
        if let Some(suffix) = stale {
            lines.push(Line::from(Span::styled(
                suffix.trim().to_string(),
                Style::default().fg(theme::STALE),
            )));
        }
    } else {
        lines.push(Line::from(Span::styled(
            format!("High {}", constants::MSG_NO_DATA),
            Style::default().fg(theme::TEXT_SECONDARY),
        )));
        lines.push(Line::from(Span::styled(
            format!("Low  {}", constants::MSG_NO_DATA),
            Style::default().fg(theme::TEXT_SECONDARY),
        )));
    }

    lines.push(Line::from(Span::styled(
        format!("NBM {}", app.config.location.station),
        Style::default().fg(theme::TEXT_SECONDARY),
    )));
    lines.extend(error_line(app, "daycast"));

    frame.render_widget(
        Paragraph::new(lines)
            .block(panel(constants::TITLE_DAYCAST))
            .wrap(Wrap { trim: true }),
        area,
    );
}

/// Label span for one layer, dimmed when stale.
fn risk_span(app: &App, layer: OutlookLayer) -> Span<'static> {
    match app.risks.get(&layer) {
        Some(reading) => {
            let stale = staleness(app, reading);
            let color = if stale.is_some() {
                theme::STALE
            } else {
                theme::risk_color(reading.value)
            };
            Span::styled(
                format!("{}{}", reading.value.label(), stale.unwrap_or_default()),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )
        }
        None => Span::styled(
            constants::MSG_NO_DATA,
            Style::default().fg(theme::TEXT_SECONDARY),
        ),
    }
}

fn render_categorical(frame: &mut Frame, app: &App, area: Rect) {
    let layer = OutlookLayer::Day1Categorical;
    let mut lines = vec![Line::from(risk_span(app, layer))];

    if let Some(Reading {
        value: RiskReading::Categorical(risk),
        ..
    }) = app.risks.get(&layer)
    {
        lines.push(Line::from(Span::styled(
            risk.description(),
            Style::default().fg(theme::TEXT_PRIMARY),
        )));
    }
    lines.extend(error_line(app, layer.common_name()));

    frame.render_widget(
        Paragraph::new(lines)
            .block(panel(constants::TITLE_CATEGORICAL))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
}

fn render_risks(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines = Vec::new();
    for layer in OutlookLayer::ALL
        .into_iter()
        .filter(|l| l.is_probabilistic())
    {
        lines.push(Line::from(vec![
            Span::styled(
                format!("{:<9}", layer.title()),
                Style::default().fg(theme::TEXT_SECONDARY),
            ),
            risk_span(app, layer),
        ]));
        lines.extend(error_line(app, layer.common_name()));
    }

    frame.render_widget(
        Paragraph::new(lines)
            .block(panel(constants::TITLE_RISKS))
            .wrap(Wrap { trim: true }),
        area,
    );
}

fn render_products(frame: &mut Frame, app: &mut App, area: Rect) {
    let items: Vec<ListItem> = PRODUCTS
        .iter()
        .enumerate()
        .map(|(i, product)| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{} ", i + 1),
                    Style::default().fg(theme::ACCENT_PRIMARY),
                ),
                Span::styled(
                    format!("{} ", product.center),
                    Style::default().fg(theme::TEXT_SECONDARY),
                ),
                Span::styled(product.title, Style::default().fg(theme::TEXT_PRIMARY)),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(panel(constants::TITLE_PRODUCTS))
        .highlight_style(
            Style::default()
                .bg(theme::ROW_SELECTED_BG)
                .fg(theme::ROW_SELECTED_FG)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");
    frame.render_stateful_widget(list, area, &mut app.product_list_state);
}

fn render_activity(frame: &mut Frame, app: &App, area: Rect) {
    let visible = usize::from(area.height.saturating_sub(2));
    let lines: Vec<Line> = app
        .logs
        .iter()
        .skip(app.logs.len().saturating_sub(visible))
        .map(|entry| {
            let color = if entry.starts_with("ERROR") {
                theme::ERROR
            } else if entry.starts_with("SUCCESS") {
                theme::SUCCESS
            } else if entry.starts_with("INIT") {
                theme::ACCENT_SECONDARY
            } else {
                theme::TEXT_PRIMARY
            };
            Line::from(Span::styled(entry.clone(), Style::default().fg(color)))
        })
        .collect();

    frame.render_widget(
        Paragraph::new(lines).block(panel(constants::TITLE_ACTIVITY)),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::core::feed::FeedUpdate;
    use crate::core::spc::CategoricalRisk;
    use ratatui::buffer::{Buffer, Cell};
    use ratatui::{backend::TestBackend, Terminal};
    use std::time::{Duration, Instant};

    /// Foreground color of the first cell of `text` on screen.
    fn color_of(buffer: &Buffer, text: &str) -> Option<ratatui::style::Color> {
        let chars: Vec<String> = text.chars().map(String::from).collect();
        let width = buffer.area.width;
        for y in 0..buffer.area.height {
            for x in 0..width {
                let fits = usize::from(width - x) >= chars.len();
                if fits
                    && chars.iter().enumerate().all(|(i, ch)| {
                        buffer[(x + u16::try_from(i).unwrap(), y)].symbol() == ch
                    })
                {
                    return Some(buffer[(x, y)].fg);
                }
            }
        }
        None
    }

    fn draw_buffer(app: &mut App) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(110, 30)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        terminal.backend().buffer().clone()
    }

    fn draw(app: &mut App) -> String {
        let buffer = draw_buffer(app);
        buffer
            .content()
            .chunks(usize::from(buffer.area.width))
            .map(|row| row.iter().map(Cell::symbol).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_renders_placeholders_before_first_fetch() {
        let mut app = App::new(Config::default(), std::path::PathBuf::from("/tmp"));
        let screen = draw(&mut app);
        assert!(screen.contains("Huntsville, AL"));
        assert!(screen.contains("Daycast"));
        assert!(screen.contains(constants::MSG_NO_DATA));
        assert!(screen.contains("Waiting"));
    }

    #[test]
    fn test_renders_readings() {
        let mut app = App::new(Config::default(), std::path::PathBuf::from("/tmp"));
        app.handle_feed(FeedUpdate::Risk(
            OutlookLayer::Day1Categorical,
            RiskReading::Categorical(CategoricalRisk::Enhanced),
        ));
        app.handle_feed(FeedUpdate::Risk(
            OutlookLayer::Day1Tornado,
            RiskReading::Probability(10),
        ));
        app.handle_feed(FeedUpdate::Daycast(crate::core::nbm::Daycast {
            high_f: 81,
            low_f: 60,
        }));

        let screen = draw(&mut app);
        assert!(screen.contains("ENH"));
        assert!(screen.contains("10%"));
        assert!(screen.contains("81°F"));
        assert!(screen.contains("60°F"));
    }

    #[test]
    fn test_stale_readings_are_dimmed_with_age() {
        let Some(then) = Instant::now().checked_sub(Duration::from_secs(1200)) else {
            return;
        };
        let mut app = App::new(Config::default(), std::path::PathBuf::from("/tmp"));
        app.risks.insert(
            OutlookLayer::Day1Categorical,
            Reading::at(RiskReading::Categorical(CategoricalRisk::Enhanced), then),
        );
        app.risks.insert(
            OutlookLayer::Day1Tornado,
            Reading::now(RiskReading::Probability(10)),
        );
        app.daycast = Some(Reading::at(
            crate::core::nbm::Daycast {
                high_f: 81,
                low_f: 60,
            },
            then,
        ));

        let buffer = draw_buffer(&mut app);
        let screen = draw(&mut app);
        assert!(screen.contains("ENH (20m old)"));
        assert!(screen.contains("(20m old)"));
        assert_eq!(color_of(&buffer, "ENH"), Some(theme::STALE));
        assert_eq!(color_of(&buffer, "81°F"), Some(theme::STALE));

        let fresh = RiskReading::Probability(10);
        assert!(!screen.contains("10% ("));
        assert_eq!(color_of(&buffer, "10%"), Some(theme::risk_color(fresh)));
    }
}
