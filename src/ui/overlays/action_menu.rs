//! Popup listing the dashboard actions (refresh, open a product, config, quit).

use crate::message::ActionMenuItem;
use crate::theme;
use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState},
    Frame,
};

const MAX_WIDTH: u16 = 60;
const MAX_HEIGHT: u16 = 16;
const FOOTER: &str = " [Enter] Run  [Esc] Close ";

pub fn render(
    frame: &mut Frame,
    items: &[ActionMenuItem],
    list_state: &mut ListState,
    title: &str,
) {
    let (width, height) = menu_size(items, title);
    let area = popup_area(width, height, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::BORDER_FOCUSED))
        .title(format!(" {title} "))
        .title_bottom(Line::from(FOOTER).centered());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows: Vec<ListItem> = items.iter().map(row).collect();
    let list = List::new(rows)
        .highlight_style(
            Style::default()
                .bg(theme::ROW_SELECTED_BG)
                .fg(theme::ROW_SELECTED_FG)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");
    frame.render_stateful_widget(list, inner, list_state);
}

fn row(item: &ActionMenuItem) -> ListItem<'static> {
    ListItem::new(Line::from(vec![
        Span::styled(
            format!(" {} ", item.key),
            Style::default()
                .fg(theme::ACCENT_PRIMARY)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(item.label, Style::default().fg(theme::TEXT_PRIMARY)),
    ]))
}

/// Outer size that fits the widest row, the title and the footer.
fn menu_size(items: &[ActionMenuItem], title: &str) -> (u16, u16) {
    // highlight symbol (2) + padded key + gap (1) + label, inside two borders
    let widest_row = items
        .iter()
        .map(|i| i.key.chars().count() + 2 + i.label.chars().count() + 3)
        .max()
        .unwrap_or(0);
    let content = widest_row
        .max(title.chars().count() + 2)
        .max(FOOTER.chars().count());
    let width = u16::try_from(content + 2).map_or(MAX_WIDTH, |w| w.min(MAX_WIDTH));
    let height = u16::try_from(items.len() + 2).map_or(MAX_HEIGHT, |h| h.min(MAX_HEIGHT));
    (width, height)
}

fn popup_area(width: u16, height: u16, area: Rect) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);
    popup
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::action_menu_items;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_menu_fits_every_row() {
        let items = action_menu_items();
        let (width, height) = menu_size(&items, "Actions");
        let longest = items.iter().map(|i| i.label.len()).max().unwrap();
        assert!(usize::from(width) > longest + 4);
        assert!(width <= MAX_WIDTH);
        assert_eq!(usize::from(height), (items.len() + 2).min(16));
    }

    #[test]
    fn test_popup_is_centered() {
        let area = popup_area(20, 6, Rect::new(0, 0, 100, 30));
        assert_eq!(area, Rect::new(40, 12, 20, 6));
    }

    #[test]
    fn test_renders_items_and_footer() {
        let items = action_menu_items();
        let mut state = ListState::default().with_selected(Some(0));
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal
            .draw(|frame| render(frame, &items, &mut state, "Actions"))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let screen: String = buffer
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect();
        assert!(screen.contains("Actions"));
        assert!(screen.contains(items[0].label));
        assert!(screen.contains("[Enter] Run"));
    }
}
