//! UI rendering module

mod dashboard;
mod overlays;
mod widgets;

use crate::app::App;
use ratatui::Frame;

/// Main render function - dispatches to appropriate view
pub fn render(frame: &mut Frame, app: &mut App) {
    dashboard::render(frame, app);

    if app.show_config {
        overlays::config_viewer::render(frame, app);
    }

    if let Some(mut state) = app.action_menu.take() {
        overlays::action_menu::render(
            frame,
            &app.action_items,
            &mut state,
            crate::constants::TITLE_ACTIONS,
        );
        app.action_menu = Some(state);
    }

    if app.toast.is_some() {
        overlays::toast::render(frame, app);
    }
}
