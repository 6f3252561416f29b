use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{
        DisableMouseCapture, EnableMouseCapture, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use cinematch::config::AppConfig;
use cinematch::core::api::RecommendationClient;
use cinematch::core::logging::{self, StartupError};
use cinematch::core::pagination::Location;
use cinematch::tui::app::AppState;
use cinematch::tui::events::{AppEvent, Notification, NotificationLevel};

#[derive(Parser, Debug)]
#[command(name = "cinematch")]
#[command(version, about = "Browse movie recommendations in the terminal", long_about = None)]
struct Args {
    /// Search to run on startup.
    query: Option<String>,

    /// Config file (default: ~/.config/cinematch/config.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Recommendation service root, e.g. http://localhost:8000.
    #[arg(long)]
    base_url: Option<String>,

    /// Results requested per server page.
    #[arg(long)]
    page_size: Option<u32>,

    /// Start at this location, e.g. "?query=noir&page=2".
    #[arg(short, long, conflicts_with = "query")]
    location: Option<String>,
}

impl Args {
    /// Command-line flags override file and environment settings.
    fn apply(&self, config: &mut AppConfig) {
        if let Some(ref base_url) = self.base_url {
            config.api.base_url = base_url.clone();
        }
        if let Some(page_size) = self.page_size {
            config.api.page_size = page_size;
        }
    }

    fn initial_location(&self) -> Result<Location, StartupError> {
        if let Some(ref raw) = self.location {
            return Location::parse(raw).map_err(|e| {
                StartupError::new(format!("Invalid location {raw:?}: {e}"))
                    .with_help("Use a cinematch:// URL or a relative form like ?query=noir&page=2")
            });
        }
        Ok(match self.query {
            Some(ref query) if !query.trim().is_empty() => {
                Location::home().with_search_query(query)
            }
            _ => Location::home(),
        })
    }
}

type Tui = Terminal<CrosstermBackend<io::Stdout>>;

#[tokio::main]
async fn main() -> miette::Result<()> {
    let args = Args::parse();

    let config_path = args.config.clone().unwrap_or_else(AppConfig::config_path);
    let (mut config, config_error) = match AppConfig::load_from(&config_path) {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };
    args.apply(&mut config);

    // Initialize logging
    let _log_guard = logging::init_tui(&config.data_dir(), config.data.log_filter.as_deref());
    log::info!("CineMatch v{} starting", cinematch::VERSION);
    log::info!("Config file: {}", config_path.display());

    let location = args.initial_location()?;
    let client = RecommendationClient::new(&config.api).map_err(|e| {
        StartupError::new(format!("Cannot create recommendation client: {e}"))
            .with_help("Check api.base_url in config.toml, CINEMATCH_API__BASE_URL, or --base-url")
    })?;
    log::info!("Recommendation service: {}", client.base_url());

    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let mut app = AppState::new(
        Arc::new(client),
        location,
        config.images.base_url.clone(),
        event_rx,
        event_tx,
    );

    if let Some(e) = config_error {
        log::warn!("{e}, using defaults");
        let _ = app.event_sender().send(AppEvent::Notification(Notification {
            id: 0,
            message: "Config invalid, using defaults (see log)".into(),
            level: NotificationLevel::Warning,
            ttl_ticks: 100,
        }));
    }

    // Setup terminal
    let (mut terminal, mode) = setup_terminal(config.tui.mouse_enabled)
        .map_err(|e| StartupError::new(format!("Failed to set up terminal: {e}")))?;
    install_panic_hook(mode);

    // Run the app
    let tick_rate = Duration::from_millis(config.tui.tick_rate_ms.max(1));
    let result = app.run(&mut terminal, tick_rate).await;

    // Restore terminal
    restore_terminal(&mut terminal, mode)
        .map_err(|e| StartupError::new(format!("Failed to restore terminal: {e}")))?;

    result.map_err(|e| StartupError::new(format!("Terminal error: {e}")))?;
    log::info!("CineMatch exiting");
    Ok(())
}

/// Terminal features switched on at startup, to switch off again on exit.
#[derive(Debug, Clone, Copy)]
struct TerminalMode {
    mouse: bool,
    keyboard_enhanced: bool,
}

fn setup_terminal(mouse: bool) -> io::Result<(Tui, TerminalMode)> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    if mouse {
        execute!(stdout, EnableMouseCapture)?;
    }
    // Needed to tell Shift+Enter from Enter.
    let keyboard_enhanced = supports_keyboard_enhancement().unwrap_or(false);
    if keyboard_enhanced {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
        )?;
    }
    let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    Ok((
        terminal,
        TerminalMode {
            mouse,
            keyboard_enhanced,
        },
    ))
}

fn restore_terminal(terminal: &mut Tui, mode: TerminalMode) -> io::Result<()> {
    leave_terminal(terminal.backend_mut(), mode)?;
    terminal.show_cursor()
}

fn leave_terminal(out: &mut impl io::Write, mode: TerminalMode) -> io::Result<()> {
    disable_raw_mode()?;
    if mode.keyboard_enhanced {
        execute!(out, PopKeyboardEnhancementFlags)?;
    }
    if mode.mouse {
        execute!(out, DisableMouseCapture)?;
    }
    execute!(out, LeaveAlternateScreen)
}

/// Put the terminal back before the default hook prints the panic.
fn install_panic_hook(mode: TerminalMode) {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = leave_terminal(&mut io::stdout(), mode);
        default_hook(info);
    }));
}
