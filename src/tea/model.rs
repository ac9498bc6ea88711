//! Application model following TEA pattern
//!
//! Holds every piece of admin panel state. Only `update` mutates it; the
//! renderer reads it.

use crate::catalog::{Product, ProductId, ProductListViewModel};
use crate::config::AppConfig;
use crate::theme::Theme;
use crate::ui::product_form::ProductForm;
use crate::ui::toast::ToastManager;
use chrono::{DateTime, Local};
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Main application model containing all state
#[derive(Debug, Clone)]
pub struct Model {
    /// Application lifecycle state
    pub app_state: AppState,

    /// Which surface currently receives key input
    pub mode: ViewMode,

    /// Product set plus search, sort and page state
    pub catalog: ProductListViewModel,

    /// Search text exactly as typed
    pub search_input: String,

    /// Selected row on the current page
    pub selected_row: usize,

    /// Product shown in the detail overlay
    pub detail: Option<ProductId>,

    /// Open create/edit form
    pub form: Option<ProductForm>,

    /// Dismissible error banner
    pub banner: Option<String>,

    /// Blocking notice that must be acknowledged
    pub notice: Option<String>,

    /// Transient notifications
    pub toasts: ToastManager,

    /// Auto-refresh state
    pub refresh: RefreshState,

    /// Page sizes offered by `+`/`-`
    pub page_size_options: Vec<usize>,

    /// Where CSV exports are written
    pub export_dir: PathBuf,

    /// Theme settings
    pub theme: Theme,
}

/// Application lifecycle state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Whether the application should quit
    pub should_quit: bool,

    /// Terminal dimensions
    pub terminal_size: (u16, u16),

    /// Last tick time for periodic updates
    pub last_tick: Instant,
}

impl Default for AppState {
    fn default() -> Self {
        let now = Instant::now();
        Self {
            should_quit: false,
            terminal_size: (80, 24),
            last_tick: now,
        }
    }
}

/// Input focus of the panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// Table navigation
    Browse,
    /// Typing into the search box
    Search,
    /// Product detail overlay
    Detail,
    /// Create or edit form
    Form,
    /// Key binding overlay
    Help,
}

/// Periodic refresh bookkeeping
#[derive(Debug, Clone)]
pub struct RefreshState {
    /// Timer is running; set while the panel is mounted
    pub active: bool,

    /// Timer paused by the user
    pub paused: bool,

    pub interval: Duration,

    /// When the last fetch was issued
    pub last_fetch: Option<Instant>,

    /// When a fetch was last applied, for display
    pub last_updated: Option<DateTime<Local>>,

    /// Fetches issued but not yet answered
    pub in_flight: usize,

    /// The most recent fetch failed
    pub last_failed: bool,
}

impl RefreshState {
    pub fn new(interval: Duration) -> Self {
        Self {
            active: false,
            paused: false,
            interval,
            last_fetch: None,
            last_updated: None,
            in_flight: 0,
            last_failed: false,
        }
    }

    /// Whether the timer should issue a fetch at `now`
    pub fn is_due(&self, now: Instant) -> bool {
        if !self.active || self.paused {
            return false;
        }
        match self.last_fetch {
            Some(last) => now.saturating_duration_since(last) >= self.interval,
            None => true,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }
}

impl Model {
    /// Create a model from configuration
    pub fn new(config: &AppConfig) -> Self {
        Self {
            app_state: AppState::default(),
            mode: ViewMode::Browse,
            catalog: ProductListViewModel::new(config.page_size),
            search_input: String::new(),
            selected_row: 0,
            detail: None,
            form: None,
            banner: None,
            notice: None,
            toasts: ToastManager::new(),
            refresh: RefreshState::new(config.refresh_interval()),
            page_size_options: config.page_sizes(),
            export_dir: config.export_directory(),
            theme: Theme::by_name(&config.theme),
        }
    }

    /// Product under the row cursor
    pub fn selected_product(&self) -> Option<&Product> {
        self.catalog.product_on_page(self.selected_row)
    }

    /// Product shown in the detail overlay, if it is still in the set
    pub fn detail_product(&self) -> Option<&Product> {
        self.detail.and_then(|id| self.catalog.product(id))
    }

    /// Keep the row cursor on the current page
    pub fn clamp_selection(&mut self) {
        let rows = self.catalog.view().page.len();
        self.selected_row = self.selected_row.min(rows.saturating_sub(1));
    }

    /// Mode to fall back to when a form or overlay closes
    pub fn base_mode(&self) -> ViewMode {
        if self.detail.is_some() {
            ViewMode::Detail
        } else {
            ViewMode::Browse
        }
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new(&AppConfig::default())
    }
}
