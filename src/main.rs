mod accounts;
mod aircraft;
mod app;
mod config;
mod event;
mod flight;
mod store;
mod ui;

use std::fs::OpenOptions;
use std::io;
use std::sync::Mutex;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::Terminal;
use tracing::{error, info};

use accounts::AccountService;
use app::App;
use event::{Event, EventHandler};
use store::{AccountRepository, JsonFileStore};

/// The terminal belongs to the UI, so logs go to a file.
fn init_tracing() -> io::Result<()> {
    let path = config::log_file();
    let file = OpenOptions::new().create(true).append(true).open(&path)?;
    let writer = Mutex::new(file);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    if config::json_logs() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(writer)
            .with_ansi(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(writer)
            .with_ansi(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        error!(%info, ?backtrace, "panic");
    }));
    Ok(())
}

fn run<B: Backend, R: AccountRepository>(
    terminal: &mut Terminal<B>,
    app: &mut App<R>,
    events: &EventHandler,
) -> io::Result<()> {
    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        match events.next()? {
            Event::Tick => app.on_tick(),
            Event::Key(key) => app.on_key(key),
            Event::Mouse(mouse) => app.on_mouse(mouse),
            Event::Flight(outcome) => app.on_flight_outcome(outcome),
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn main() -> io::Result<()> {
    // Load .env locally; safe to ignore when not present.
    let _ = dotenvy::dotenv();
    init_tracing()?;

    let store = JsonFileStore::open(config::data_file());
    info!(path = %store.path().display(), "using account store");
    let mut accounts = AccountService::new(store);
    if let Some((user, password)) = config::admin_credentials() {
        if let Err(e) = accounts.bootstrap_admin(&user, &password) {
            error!(error = %e, "could not create administrator");
        }
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let event_handler = EventHandler::new(config::tick_rate_ms());
    let mut app = App::new(accounts, event_handler.sender());

    let result = run(&mut terminal, &mut app, &event_handler);
    if let Err(e) = &result {
        error!(error = %e, "main loop failed");
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    info!("shutdown");
    result
}
