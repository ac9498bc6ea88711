//! Central message type for the admin panel following the TEA pattern
//!
//! Key presses, timer ticks and the results of API calls all flow through
//! this message system so that every state change happens in `update`.

use crate::api::ApiError;
use crate::catalog::{FetchTicket, Product, ProductDraft, SortKey};
use std::path::PathBuf;

/// Main application message type
#[derive(Debug, Clone)]
pub enum Message {
    /// System-level messages
    System(SystemMessage),

    /// UI interaction messages
    UI(UIMessage),

    /// Catalog data and API messages
    Catalog(CatalogMessage),
}

/// System-level messages for application lifecycle
#[derive(Debug, Clone)]
pub enum SystemMessage {
    /// Application should quit
    Quit,

    /// Resize terminal
    Resize(u16, u16),

    /// Tick for periodic updates
    Tick,

    /// Panel became visible: fetch now and start the refresh timer
    StartAutoRefresh,

    /// Panel is going away: stop the refresh timer
    StopAutoRefresh,

    /// Pause or resume the refresh timer
    ToggleAutoRefresh,
}

/// UI-related messages for interface interactions
#[derive(Debug, Clone)]
pub enum UIMessage {
    /// Show/hide help overlay
    ToggleHelp,

    /// Move the row selection down
    SelectNext,

    /// Move the row selection up
    SelectPrevious,

    /// Open the detail overlay for the selected row
    OpenDetail,

    /// Close whatever overlay is open
    CloseOverlay,

    /// Hide the error banner
    DismissBanner,

    /// Acknowledge the blocking notice
    AcknowledgeNotice,

    /// Focus the search input
    BeginSearch,

    /// Leave the search input, keeping the query
    EndSearch,

    /// Search query changed
    SearchChanged(String),

    /// Clear search
    SearchClear,

    /// Character typed into the focused form field
    FormInput(char),

    /// Delete the last character of the focused form field
    FormBackspace,

    /// Focus the next form field
    FormNextField,

    /// Focus the previous form field
    FormPreviousField,

    /// Cycle the category selector; `true` moves forward
    FormCycleCategory(bool),

    /// Submit the open form
    FormSubmit,

    /// Close the form without saving
    FormCancel,
}

/// Catalog data messages
#[derive(Debug, Clone)]
pub enum CatalogMessage {
    /// Request a fresh product list
    Refresh,

    /// Product list arrived for the fetch with this ticket
    ProductsLoaded {
        ticket: FetchTicket,
        products: Vec<Product>,
    },

    /// Fetch with this ticket failed
    LoadFailed { ticket: FetchTicket, error: ApiError },

    /// Sort by a column, flipping the direction when it is already active
    SortBy(SortKey),

    /// Switch to the next larger page size
    NextPageSize,

    /// Switch to the next smaller page size
    PreviousPageSize,

    /// Jump to a 1-based page
    GoToPage(usize),
    NextPage,
    PreviousPage,
    FirstPage,
    LastPage,

    /// Open the edit form for the selected product
    StartEdit,

    /// Open the create form
    StartCreate,

    /// Server acknowledged an update
    ProductUpdated(Product),

    /// Update request failed
    UpdateFailed(ApiError),

    /// Server acknowledged a create
    ProductCreated { product: Product, draft: ProductDraft },

    /// Create request failed
    CreateFailed(ApiError),

    /// Export the displayed products to CSV
    Export,

    /// Export written to `path` with `count` rows
    Exported { path: PathBuf, count: usize },

    /// Export could not be written
    ExportFailed(String),
}

/// Toast notification levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

impl From<SystemMessage> for Message {
    fn from(msg: SystemMessage) -> Self {
        Message::System(msg)
    }
}

impl From<UIMessage> for Message {
    fn from(msg: UIMessage) -> Self {
        Message::UI(msg)
    }
}

impl From<CatalogMessage> for Message {
    fn from(msg: CatalogMessage) -> Self {
        Message::Catalog(msg)
    }
}
