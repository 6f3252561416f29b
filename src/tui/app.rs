use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};
use tokio::sync::mpsc;

use super::events::{Action, AppEvent, Focus, Notification, NotificationLevel};
use super::layout::{self, centered_rect, AppLayout};
use super::theme;
use super::views::address_bar::{AddressBarState, AddressResult};
use super::views::detail_modal::{DetailModalState, ModalResult};
use super::views::results::{PageMove, ResultsResult, ResultsState, ResultsView};
use super::views::search::{SearchResult, SearchState};
use crate::core::api::{Movie, PageSource};
use crate::core::pagination::{CursorPagination, Location, Navigator, UrlPagination};

/// Terminal size assumed until the first real measurement.
const DEFAULT_AREA: Rect = Rect {
    x: 0,
    y: 0,
    width: 80,
    height: 24,
};

/// Central application state (Elm architecture).
pub struct AppState {
    /// Whether the app is still running.
    pub running: bool,
    /// Pane with keyboard focus.
    pub focus: Focus,
    /// Search pane state.
    pub search: SearchState,
    /// Result grid state.
    pub results: ResultsState,
    /// Server pages, walked with `next` / `previous` cursors.
    pub recommendations: CursorPagination<Movie>,
    /// Local pages over the fetched items, mirrored into the location.
    pub pages: UrlPagination,
    /// Address bar history.
    pub navigator: Navigator,
    /// Query the current results belong to.
    active_query: Option<String>,
    /// Detail modal (Some when open).
    pub detail: Option<DetailModalState>,
    /// Address bar editor (Some when open).
    pub address_bar: Option<AddressBarState>,
    /// Whether the help modal is open.
    pub show_help: bool,
    /// Active notifications (max 3 visible).
    pub notifications: Vec<Notification>,
    /// Monotonic counter for notification IDs.
    notification_counter: u64,
    /// Poster host prefix.
    image_base: String,
    /// Last known terminal area, for mouse hit-testing.
    area: Rect,
    /// Receiver for app events.
    event_rx: mpsc::UnboundedReceiver<AppEvent>,
    /// Sender handed out to whoever needs to reach the loop.
    event_tx: mpsc::UnboundedSender<AppEvent>,
}

impl AppState {
    pub fn new(
        source: Arc<dyn PageSource<Movie>>,
        location: Location,
        image_base: String,
        event_rx: mpsc::UnboundedReceiver<AppEvent>,
        event_tx: mpsc::UnboundedSender<AppEvent>,
    ) -> Self {
        let capacity = layout::grid_capacity(AppLayout::compute(DEFAULT_AREA).results);
        Self {
            running: true,
            focus: Focus::Search,
            search: SearchState::new(),
            results: ResultsState::new(),
            recommendations: CursorPagination::new(source),
            pages: UrlPagination::new(capacity, 1, &location),
            navigator: Navigator::new(location),
            active_query: None,
            detail: None,
            address_bar: None,
            show_help: false,
            notifications: Vec::new(),
            notification_counter: 0,
            image_base,
            area: DEFAULT_AREA,
            event_rx,
            event_tx,
        }
    }

    pub fn event_sender(&self) -> mpsc::UnboundedSender<AppEvent> {
        self.event_tx.clone()
    }

    pub fn active_query(&self) -> Option<&str> {
        self.active_query.as_deref()
    }

    /// Items on the visible local page.
    pub fn visible_items(&self) -> &[Movie] {
        self.pages.paginate(self.recommendations.items())
    }

    /// Act on the initial location (run its query, if any).
    pub fn start(&mut self) {
        let location = self.navigator.current().clone();
        log::info!("Starting at {location}");
        self.apply_location(location);
    }

    // ── Elm event loop ──────────────────────────────────────────────────

    /// Main event loop: render → select → update → loop.
    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        tick_rate: Duration,
    ) -> io::Result<()> {
        let mut tick_interval = tokio::time::interval(tick_rate);
        let mut event_stream = EventStream::new();

        let size = terminal.size()?;
        self.resize(Rect::new(0, 0, size.width, size.height));
        self.start();

        while self.running {
            // Render
            terminal.draw(|frame| self.render(frame))?;

            // Select next event
            tokio::select! {
                _ = tick_interval.tick() => {
                    self.on_tick();
                }
                Some(event) = self.event_rx.recv() => {
                    self.handle_event(event);
                }
                Some(Ok(crossterm_event)) = event_stream.next() => {
                    self.handle_event(AppEvent::Input(crossterm_event));
                }
            }
        }

        Ok(())
    }

    // ── Event handling ──────────────────────────────────────────────────

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Input(crossterm_event) => self.handle_input(crossterm_event),
            AppEvent::Action(action) => self.handle_action(action),
            AppEvent::Tick => self.on_tick(),
            AppEvent::Notification(notification) => {
                self.push_notification(notification.message, notification.level);
            }
            AppEvent::Quit => {
                self.running = false;
            }
        }
    }

    fn handle_input(&mut self, event: Event) {
        if is_force_quit(&event) {
            self.handle_action(Action::Quit);
            return;
        }

        if let Event::Resize(width, height) = event {
            self.resize(Rect::new(0, 0, width, height));
            return;
        }

        // Priority 1: Help modal
        if self.show_help {
            if let Some(action) = self.map_help_input(&event) {
                self.handle_action(action);
            }
            return;
        }

        // Priority 2: Address bar
        if let Some(ref mut bar) = self.address_bar {
            match bar.handle_input(&event) {
                AddressResult::Consumed => {}
                AddressResult::Apply(location) => {
                    self.address_bar = None;
                    self.navigate_to(location);
                }
                AddressResult::Cancel => self.address_bar = None,
            }
            return;
        }

        // Priority 3: Detail modal
        if let Some(ref mut detail) = self.detail {
            match detail.handle_input(&event, self.area) {
                ModalResult::Consumed => return,
                ModalResult::Close => {
                    self.handle_action(Action::CloseDetail);
                    return;
                }
                // Backdrop wheel falls through to the (suspended) grid.
                ModalResult::Ignored => {}
            }
        }

        // Priority 4: Focused pane
        if self.dispatch_pane_input(&event) {
            return;
        }

        // Priority 5: Global keybindings
        if let Some(action) = self.map_input_to_action(&event) {
            self.handle_action(action);
        }
    }

    /// Route input to the search or results pane. Returns true if consumed.
    fn dispatch_pane_input(&mut self, event: &Event) -> bool {
        let layout = AppLayout::compute(self.area);

        if let Event::Mouse(mouse) = event {
            if self.detail.is_none()
                && layout::contains(layout.search, mouse.column, mouse.row)
            {
                if matches!(mouse.kind, crossterm::event::MouseEventKind::Down(_)) {
                    self.handle_action(Action::FocusSearch);
                }
                return true;
            }
        } else if self.focus == Focus::Search {
            return match self.search.handle_input(event, self.recommendations.is_loading()) {
                SearchResult::Consumed => true,
                SearchResult::Submit(query) => {
                    self.handle_action(Action::Submit(query));
                    true
                }
                SearchResult::Ignored => false,
            };
        }

        let count = self.visible_items().len();
        let action = match self.results.handle_input(event, &layout, count) {
            ResultsResult::Consumed => return true,
            ResultsResult::Ignored => return false,
            ResultsResult::Open(index) => Action::OpenDetail(index),
            ResultsResult::LoadNext => Action::LoadNextPage,
            ResultsResult::LoadPrevious => Action::LoadPrevPage,
            ResultsResult::Page(PageMove::Next) => Action::PageNext,
            ResultsResult::Page(PageMove::Prev) => Action::PagePrev,
            ResultsResult::Page(PageMove::First) => Action::PageFirst,
            ResultsResult::Page(PageMove::Last) => Action::PageLast,
        };
        if matches!(event, Event::Mouse(_)) {
            self.focus = Focus::Results;
        }
        self.handle_action(action);
        true
    }

    // ── Input mapping ───────────────────────────────────────────────────

    /// Map help modal input to action.
    fn map_help_input(&self, event: &Event) -> Option<Action> {
        let Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return None;
        };
        match code {
            KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => Some(Action::CloseHelp),
            _ => None,
        }
    }

    fn map_input_to_action(&self, event: &Event) -> Option<Action> {
        let Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return None;
        };

        // Global keybindings (active when no overlay or pane consumes)
        match (*modifiers, *code) {
            // Ctrl+L → edit location
            (KeyModifiers::CONTROL, KeyCode::Char('l')) => Some(Action::EditLocation),
            // Alt+←/→ → history
            (KeyModifiers::ALT, KeyCode::Left) => Some(Action::HistoryBack),
            (KeyModifiers::ALT, KeyCode::Right) => Some(Action::HistoryForward),
            (KeyModifiers::NONE | KeyModifiers::SHIFT, _) => match code {
                KeyCode::Tab | KeyCode::BackTab => Some(Action::ToggleFocus),
                KeyCode::Esc => Some(Action::FocusResults),
                KeyCode::Char('/') | KeyCode::Char('i') => Some(Action::FocusSearch),
                KeyCode::Char('?') => Some(Action::ShowHelp),
                KeyCode::Char('q') => Some(Action::Quit),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::FocusSearch => self.focus = Focus::Search,
            Action::FocusResults => self.focus = Focus::Results,
            Action::ToggleFocus => self.focus = self.focus.toggle(),
            Action::Submit(query) => self.submit_search(query),
            Action::LoadNextPage => {
                if self.recommendations.load_next() {
                    self.on_server_page_requested();
                }
            }
            Action::LoadPrevPage => {
                if self.recommendations.load_previous() {
                    self.on_server_page_requested();
                }
            }
            Action::PageNext => self.move_page(PageMove::Next),
            Action::PagePrev => self.move_page(PageMove::Prev),
            Action::PageFirst => self.move_page(PageMove::First),
            Action::PageLast => self.move_page(PageMove::Last),
            Action::OpenDetail(index) => self.open_detail(index),
            Action::CloseDetail => self.detail = None,
            Action::EditLocation => {
                self.address_bar = Some(AddressBarState::new(self.navigator.current()));
            }
            Action::HistoryBack => match self.navigator.back().cloned() {
                Some(location) => self.apply_location(location),
                None => self.push_notification("No earlier location".into(), NotificationLevel::Info),
            },
            Action::HistoryForward => match self.navigator.forward().cloned() {
                Some(location) => self.apply_location(location),
                None => self.push_notification("No later location".into(), NotificationLevel::Info),
            },
            Action::ShowHelp => self.show_help = true,
            Action::CloseHelp => self.show_help = false,
        }
    }

    // ── Search and navigation ───────────────────────────────────────────

    /// A query typed by the user: record it in the location and fetch.
    fn submit_search(&mut self, query: String) {
        if query.trim().is_empty() || self.recommendations.is_loading() {
            return;
        }
        let location = self.navigator.current().with_search_query(&query);
        self.navigator.push(location);
        self.pages.sync(self.navigator.current());
        self.start_search(query);
        self.focus = Focus::Results;
    }

    fn start_search(&mut self, query: String) {
        log::info!("Searching recommendations for {query:?}");
        self.detail = None;
        self.results.reset_selection();
        self.recommendations.submit_query(&query);
        self.active_query = Some(query);
    }

    /// Push a location typed into the address bar, then follow it.
    fn navigate_to(&mut self, location: Location) {
        if self.navigator.push(location) {
            let current = self.navigator.current().clone();
            self.apply_location(current);
        }
    }

    /// Bring the view in line with `location`: rerun its query if it
    /// differs from the one on screen, then move to its page.
    fn apply_location(&mut self, location: Location) {
        match location.search_query() {
            Some(query) if self.active_query.as_deref() != Some(query.as_str()) => {
                self.search.set_text(&query);
                self.start_search(query);
            }
            None if self.active_query.is_some() => {
                self.active_query = None;
                self.detail = None;
                self.search.set_text("");
                self.recommendations.reset();
            }
            _ => {}
        }
        self.pages.sync(&location);
        self.reconcile_location();
    }

    fn move_page(&mut self, direction: PageMove) {
        let before = self.pages.current_page();
        let nav = &mut self.navigator;
        match direction {
            PageMove::Next => self.pages.next_page(nav),
            PageMove::Prev => self.pages.prev_page(nav),
            PageMove::First => self.pages.first_page(nav),
            PageMove::Last => self.pages.last_page(nav),
        };
        if self.pages.current_page() != before {
            self.results.reset_selection();
        }
    }

    /// A cursor fetch started: the grid goes back to local page 1.
    fn on_server_page_requested(&mut self) {
        self.results.reset_selection();
        self.pages.first_page(&mut self.navigator);
    }

    fn open_detail(&mut self, index: usize) {
        let Some(movie) = self.visible_items().get(index).cloned() else {
            return;
        };
        log::debug!("Opening detail for {:?}", movie.title);
        let suspension = self.results.scroll_gate().suspend();
        self.detail = Some(DetailModalState::new(movie, &self.image_base, suspension));
    }

    fn resize(&mut self, area: Rect) {
        self.area = area;
        let capacity = layout::grid_capacity(AppLayout::compute(area).results);
        if capacity != self.pages.state().items_per_page() {
            log::debug!("Grid capacity -> {capacity}");
            self.pages.set_items_per_page(capacity);
            self.reconcile_location();
        }
    }

    /// Fold freshly fetched results into the local pager.
    fn on_page_loaded(&mut self) {
        let total = self.recommendations.items().len();
        match self.recommendations.error() {
            Some(error) => log::warn!("Recommendation fetch failed: {error}"),
            None => log::info!("Loaded {total} recommendations"),
        }
        self.pages.set_total_items(total);
        self.reconcile_location();
    }

    /// Follow the location's page, and rewrite it when it names a page
    /// that does not exist. Skipped while nothing is loaded, so a deep
    /// link survives until its results arrive.
    fn reconcile_location(&mut self) {
        if self.recommendations.is_loading() || self.recommendations.items().is_empty() {
            self.pages.sync(self.navigator.current());
        } else {
            self.pages.reconcile(&mut self.navigator);
        }
        self.results.clamp_selection(self.visible_items().len());
    }

    /// Wait for the in-flight fetch and apply it.
    #[cfg(test)]
    pub async fn settle(&mut self) {
        if self.recommendations.settle().await {
            self.on_page_loaded();
        }
    }

    // ── Notifications ───────────────────────────────────────────────────

    /// Push a notification (dedup by message, max 3).
    pub fn push_notification(&mut self, message: String, level: NotificationLevel) {
        if self.notifications.iter().any(|n| n.message == message) {
            return;
        }

        self.notification_counter += 1;
        self.notifications.push(Notification {
            id: self.notification_counter,
            message,
            level,
            ttl_ticks: 100,
        });

        while self.notifications.len() > 3 {
            self.notifications.remove(0);
        }
    }

    /// Tick: decrement notification TTLs, dismiss expired, poll fetches.
    fn on_tick(&mut self) {
        for n in &mut self.notifications {
            n.ttl_ticks = n.ttl_ticks.saturating_sub(1);
        }
        self.notifications.retain(|n| n.ttl_ticks > 0);

        if self.recommendations.poll() {
            self.on_page_loaded();
        }
    }

    // ── Rendering ───────────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let layout = AppLayout::compute(area);
        let loading = self.recommendations.is_loading();
        let overlay_open = self.detail.is_some() || self.address_bar.is_some() || self.show_help;

        self.render_header(frame, layout.header);
        self.search.render(
            frame,
            layout.search,
            self.focus == Focus::Search && !overlay_open,
            loading,
        );

        let view = ResultsView {
            items: self.visible_items(),
            total: self.recommendations.items().len(),
            loading,
            error: self.recommendations.error(),
            searched: self.active_query.is_some(),
            has_next: self.recommendations.has_next_page(),
            has_prev: self.recommendations.has_prev_page(),
            page: self.pages.current_page(),
            total_pages: self.pages.total_pages(),
            summary: self.pages.summary(),
            focused: self.focus == Focus::Results,
        };
        self.results.render(frame, &layout, &view);

        self.render_status_bar(frame, layout.status);

        // Overlays
        self.render_notifications(frame, area);

        if let Some(ref detail) = self.detail {
            detail.render(frame, area);
        }

        if let Some(ref bar) = self.address_bar {
            bar.render(frame, area);
        }

        if self.show_help {
            self.render_help_modal(frame, area);
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let header = Line::from(vec![
            Span::styled(" 🎬 CineMatch ", theme::title()),
            Span::styled("Describe a movie, get recommendations", theme::muted()),
        ]);
        frame.render_widget(Paragraph::new(header), area);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let activity = if self.recommendations.is_loading() {
            Span::styled(" FETCHING ", theme::loading_badge())
        } else {
            Span::raw("")
        };

        let status = Line::from(vec![
            Span::styled(" CINEMATCH ", theme::brand_badge()),
            Span::raw(" "),
            activity,
            Span::raw(" "),
            Span::styled(
                self.focus.label(),
                Style::default()
                    .fg(theme::SCREEN_GLOW)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" │ "),
            Span::styled(self.navigator.current().to_string(), theme::muted()),
            Span::raw(" │ "),
            Span::styled("Tab", theme::key_hint()),
            Span::raw(":focus "),
            Span::styled("Ctrl+L", theme::key_hint()),
            Span::raw(":location "),
            Span::styled("?", theme::key_hint()),
            Span::raw(":help "),
            Span::styled("q", theme::key_hint()),
            Span::raw(":quit"),
        ]);

        frame.render_widget(Paragraph::new(status), area);
    }

    fn render_notifications(&self, frame: &mut Frame, area: Rect) {
        if self.notifications.is_empty() {
            return;
        }

        let max_width = 50.min(area.width.saturating_sub(2));
        let height = self.notifications.len() as u16;
        let x = area.width.saturating_sub(max_width + 1);
        let y = 1;

        let notification_area = Rect::new(x, y, max_width, height).intersection(area);

        let lines: Vec<Line> = self
            .notifications
            .iter()
            .map(|n| {
                let (prefix, color) = match n.level {
                    NotificationLevel::Info => ("ℹ", theme::INFO),
                    NotificationLevel::Success => ("✓", theme::SUCCESS),
                    NotificationLevel::Warning => ("⚠", theme::WARNING),
                    NotificationLevel::Error => ("✗", theme::ERROR),
                };
                Line::from(vec![
                    Span::styled(format!(" {prefix} "), Style::default().fg(color).add_modifier(Modifier::BOLD)),
                    Span::raw(&n.message),
                ])
            })
            .collect();

        frame.render_widget(Clear, notification_area);
        frame.render_widget(Paragraph::new(lines), notification_area);
    }

    fn render_help_modal(&self, frame: &mut Frame, area: Rect) {
        let modal = centered_rect(60, 80, area);

        let keybindings = vec![
            ("Global:", ""),
            ("q", "Quit (outside text input)"),
            ("Ctrl+C", "Force quit"),
            ("?", "Toggle this help"),
            ("Tab", "Switch search / results"),
            ("/ or i", "Focus search"),
            ("Ctrl+L", "Edit location"),
            ("Alt+← / Alt+→", "Back / forward"),
            ("", ""),
            ("Search:", ""),
            ("Enter", "Send query"),
            ("Shift+Enter", "New line"),
            ("Esc", "Focus results"),
            ("", ""),
            ("Results:", ""),
            ("←↓↑→ / hjkl", "Move selection"),
            ("Enter / click", "Open details"),
            ("n / p", "Next / previous server page"),
            ("] / [", "Next / previous page"),
            ("g / G", "First / last page"),
            ("wheel", "Change page"),
            ("", ""),
            ("Details:", ""),
            ("Esc / q / click outside", "Close"),
            ("j/k", "Scroll"),
        ];

        let mut lines = vec![
            Line::raw(""),
            Line::from(Span::styled(
                " Keybindings",
                Style::default()
                    .fg(theme::MARQUEE)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::raw(""),
        ];

        for (key, desc) in &keybindings {
            if key.is_empty() {
                lines.push(Line::raw(""));
            } else if desc.is_empty() {
                lines.push(Line::from(Span::styled(
                    format!("  {key}"),
                    Style::default()
                        .fg(theme::MARQUEE)
                        .add_modifier(Modifier::BOLD),
                )));
            } else {
                lines.push(Line::from(vec![
                    Span::raw("  "),
                    Span::styled(
                        format!("{:<26}", key),
                        theme::key_hint().add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(*desc),
                ]));
            }
        }

        lines.push(Line::raw(""));
        lines.push(Line::from(vec![
            Span::raw("  Press "),
            Span::styled("?", theme::key_hint().add_modifier(Modifier::BOLD)),
            Span::raw(" or "),
            Span::styled("Esc", theme::key_hint().add_modifier(Modifier::BOLD)),
            Span::raw(" to close"),
        ]));

        let block = Block::default()
            .title(" Help ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::MARQUEE));

        frame.render_widget(Clear, modal);
        frame.render_widget(Paragraph::new(lines).block(block), modal);
    }
}

fn is_force_quit(event: &Event) -> bool {
    matches!(
        event,
        Event::Key(KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Press,
            ..
        })
    )
}
