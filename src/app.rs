//! Application state and input handling for the dashboard.
//!
//! Rendering lives in [`crate::ui`]; this module only mutates state in
//! response to key presses, ticks and feed updates, which keeps it testable
//! without a terminal.

use std::collections::{HashMap, VecDeque};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::widgets::ListState;

use crate::config::Config;
use crate::constants;
use crate::core::feed::{FeedHandle, FeedUpdate};
use crate::core::nbm::Daycast;
use crate::core::products::{self, Product, PRODUCTS};
use crate::core::spc::{OutlookLayer, RiskReading};
use crate::message::{self, Action, ActionMenuItem};
use crate::state::{Reading, Toast, ToastType};

/// Function used to launch the browser for a product.
pub type Opener = fn(&Product) -> std::io::Result<()>;

pub struct App {
    pub config: Config,
    pub config_dir: PathBuf,
    pub should_quit: bool,

    /// Last good reading per outlook layer.
    pub risks: HashMap<OutlookLayer, Reading<RiskReading>>,
    /// Last good daycast.
    pub daycast: Option<Reading<Daycast>>,
    /// Most recent error per source, cleared on the next success.
    pub source_errors: HashMap<&'static str, String>,
    /// A refresh cycle is in flight.
    pub refreshing: bool,
    pub last_cycle: Option<Instant>,

    /// In-app activity log, newest last.
    pub logs: VecDeque<String>,
    pub toast: Option<Toast>,

    pub product_list_state: ListState,
    pub show_config: bool,
    pub config_scroll: u16,
    pub action_menu: Option<ListState>,
    pub action_items: Vec<ActionMenuItem>,

    feed: Option<FeedHandle>,
    opener: Opener,
}

impl App {
    pub fn new(config: Config, config_dir: PathBuf) -> Self {
        let mut app = Self {
            config,
            config_dir,
            should_quit: false,
            risks: HashMap::new(),
            daycast: None,
            source_errors: HashMap::new(),
            refreshing: false,
            last_cycle: None,
            logs: VecDeque::with_capacity(constants::MAX_LOG_ENTRIES),
            toast: None,
            product_list_state: ListState::default().with_selected(Some(0)),
            show_config: false,
            config_scroll: 0,
            action_menu: None,
            action_items: message::action_menu_items(),
            feed: None,
            opener: products::open,
        };
        app.log(
            constants::MSG_INIT
                .replacen("{}", constants::APP_NAME, 1)
                .replacen("{}", constants::APP_VERSION, 1),
        );
        app.log(format!(
            "INIT: Location {} ({}), station {}",
            app.config.location.name,
            app.config.location.coordinates(),
            app.config.location.station
        ));
        app
    }

    /// Attaches the running feed worker so refresh requests reach it.
    pub fn attach_feed(&mut self, feed: FeedHandle) {
        self.feed = Some(feed);
        self.log(constants::MSG_READY);
    }

    #[cfg(test)]
    fn with_opener(mut self, opener: Opener) -> Self {
        self.opener = opener;
        self
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.config.refresh_secs)
    }

    /// Appends to the activity log, dropping the oldest entry when full.
    pub fn log(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!(target: "meso::activity", "{message}");
        if self.logs.len() >= constants::MAX_LOG_ENTRIES {
            self.logs.pop_front();
        }
        self.logs.push_back(message);
    }

    pub fn show_toast(&mut self, message: impl Into<String>, toast_type: ToastType) {
        self.toast = Some(Toast::new(message, toast_type));
    }

    /// Periodic housekeeping.
    pub fn on_tick(&mut self) {
        if self.toast.as_ref().is_some_and(Toast::is_expired) {
            self.toast = None;
        }
    }

    /// Applies a message from the feed worker.
    pub fn handle_feed(&mut self, update: FeedUpdate) {
        match update {
            FeedUpdate::CycleStarted => {
                self.refreshing = true;
                self.log(format!("FEED: {}", constants::MSG_REFRESHING));
            }
            FeedUpdate::Risk(layer, reading) => {
                self.source_errors.remove(layer.common_name());
                match self.risks.get(&layer).map(|prev| prev.value) {
                    Some(prev) if prev == reading => {}
                    Some(prev) if reading > prev => {
                        self.log(format!(
                            "FEED: {layer} outlook raised to {reading} (was {prev})"
                        ));
                    }
                    _ => self.log(format!("FEED: {layer} outlook is {reading}")),
                }
                self.risks.insert(layer, Reading::now(reading));
            }
            FeedUpdate::Daycast(daycast) => {
                self.source_errors.remove("daycast");
                self.log(format!(
                    "FEED: Daycast high {}°F, low {}°F",
                    daycast.high_f, daycast.low_f
                ));
                self.daycast = Some(Reading::now(daycast));
            }
            FeedUpdate::Error { source, message } => {
                self.log(format!("ERROR: {source}: {message}"));
                self.source_errors.insert(source, message);
            }
            FeedUpdate::CycleComplete { ok, failed } => {
                self.refreshing = false;
                self.last_cycle = Some(Instant::now());
                self.log(format!("FEED: Cycle complete ({ok} ok, {failed} failed)"));
                if ok == 0 && failed > 0 {
                    self.show_toast("All feeds failed. Check your network.", ToastType::Error);
                } else if failed > 0 {
                    self.show_toast(
                        format!("{failed} feed(s) failed to update"),
                        ToastType::Warning,
                    );
                }
            }
        }
    }

    /// Dispatches a key press to the active view.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        if self.action_menu.is_some() {
            self.handle_action_menu_key(key.code);
        } else if self.show_config {
            self.handle_config_key(key.code);
        } else {
            self.handle_dashboard_key(key.code);
        }
    }

    fn handle_dashboard_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('r') => self.dispatch(Action::Refresh),
            KeyCode::Char('c') => self.dispatch(Action::ToggleConfig),
            KeyCode::Char('x') => {
                self.action_menu = Some(ListState::default().with_selected(Some(0)));
            }
            KeyCode::Down | KeyCode::Char('j') => self.select_product(1),
            KeyCode::Up | KeyCode::Char('k') => self.select_product(-1),
            KeyCode::Enter | KeyCode::Char('o') => {
                if let Some(idx) = self.product_list_state.selected() {
                    self.dispatch(Action::OpenProduct(idx));
                }
            }
            KeyCode::Char(c @ '1'..='9') => {
                let idx = c
                    .to_digit(10)
                    .and_then(|d| usize::try_from(d - 1).ok())
                    .filter(|&i| i < PRODUCTS.len());
                if let Some(idx) = idx {
                    self.product_list_state.select(Some(idx));
                    self.dispatch(Action::OpenProduct(idx));
                }
            }
            _ => {}
        }
    }

    fn handle_config_key(&mut self, code: KeyCode) {
        let max_scroll = u16::try_from(self.config_lines().len().saturating_sub(1))
            .unwrap_or(u16::MAX);
        match code {
            KeyCode::Esc | KeyCode::Char('c' | 'q') => self.show_config = false,
            KeyCode::Down | KeyCode::Char('j') => {
                self.config_scroll = (self.config_scroll + 1).min(max_scroll);
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.config_scroll = self.config_scroll.saturating_sub(1);
            }
            KeyCode::Char('g') => self.config_scroll = 0,
            KeyCode::Char('G') => self.config_scroll = max_scroll,
            _ => {}
        }
    }

    fn handle_action_menu_key(&mut self, code: KeyCode) {
        let len = self.action_items.len();
        let Some(state) = self.action_menu.as_mut() else {
            return;
        };
        match code {
            KeyCode::Esc | KeyCode::Char('x' | 'q') => self.action_menu = None,
            KeyCode::Down | KeyCode::Char('j') => {
                let next = state.selected().map_or(0, |i| (i + 1) % len);
                state.select(Some(next));
            }
            KeyCode::Up | KeyCode::Char('k') => {
                let prev = state.selected().map_or(0, |i| (i + len - 1) % len);
                state.select(Some(prev));
            }
            KeyCode::Enter => {
                let action = state
                    .selected()
                    .and_then(|i| self.action_items.get(i))
                    .map(|item| item.action);
                self.action_menu = None;
                if let Some(action) = action {
                    self.dispatch(action);
                }
            }
            _ => {}
        }
    }

    fn select_product(&mut self, delta: isize) {
        let len = PRODUCTS.len();
        let current = self.product_list_state.selected().unwrap_or(0);
        let next = current.saturating_add_signed(delta).min(len - 1);
        self.product_list_state.select(Some(next));
    }

    /// Performs a user action.
    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::Refresh => {
                if let Some(ref feed) = self.feed {
                    feed.refresh_now();
                }
                self.show_toast(constants::MSG_REFRESHING, ToastType::Info);
            }
            Action::OpenProduct(idx) => {
                let Some(product) = PRODUCTS.get(idx) else {
                    return;
                };
                match (self.opener)(product) {
                    Ok(()) => {
                        self.log(format!("OPEN: {} ({})", product.title, product.url));
                        self.show_toast(
                            format!("{}{}", constants::MSG_OPENED, product.title),
                            ToastType::Success,
                        );
                    }
                    Err(e) => {
                        self.log(format!("ERROR: {}{e}", constants::MSG_OPEN_FAILED));
                        self.show_toast(
                            format!("{}{e}", constants::MSG_OPEN_FAILED),
                            ToastType::Error,
                        );
                    }
                }
            }
            Action::ToggleConfig => {
                self.show_config = !self.show_config;
                self.config_scroll = 0;
            }
            Action::Quit => self.should_quit = true,
        }
    }

    /// The effective configuration rendered as TOML, for the config viewer.
    pub fn config_lines(&self) -> Vec<String> {
        match toml::to_string_pretty(&self.config) {
            Ok(text) => text.lines().map(str::to_string).collect(),
            Err(e) => vec![format!("Error rendering config: {e}")],
        }
    }
}
