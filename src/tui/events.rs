/// Events flowing through the Elm-architecture event loop.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Periodic tick: poll fetches, expire notifications.
    Tick,
    /// Raw terminal input (keyboard/mouse/resize).
    Input(crossterm::event::Event),
    /// A resolved action to execute.
    Action(Action),
    /// Notification to display to the user.
    Notification(Notification),
    /// Request to quit the application.
    Quit,
}

/// High-level actions dispatched by the input mapper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // Focus
    FocusSearch,
    FocusResults,
    ToggleFocus,

    // Search
    Submit(String),

    // Server pages
    LoadNextPage,
    LoadPrevPage,

    // Local pages
    PageNext,
    PagePrev,
    PageFirst,
    PageLast,

    // Detail modal
    OpenDetail(usize),
    CloseDetail,

    // Address bar
    EditLocation,
    HistoryBack,
    HistoryForward,

    // Overlays
    ShowHelp,
    CloseHelp,

    Quit,
}

/// Which pane has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Focus {
    Search,
    Results,
}

impl Focus {
    pub fn label(self) -> &'static str {
        match self {
            Focus::Search => "Search",
            Focus::Results => "Results",
        }
    }

    pub fn toggle(self) -> Focus {
        match self {
            Focus::Search => Focus::Results,
            Focus::Results => Focus::Search,
        }
    }
}

/// Notification level for the overlay system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A timed notification shown in the overlay.
#[derive(Debug, Clone)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub level: NotificationLevel,
    /// Ticks remaining before auto-dismiss.
    pub ttl_ticks: u32,
}
