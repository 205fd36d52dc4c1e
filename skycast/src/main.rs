//! skycast - terminal weather dashboard
//!
//! # Usage
//!
//! ```sh
//! # Against a local API server
//! skycast --api-url http://localhost:3000/api
//!
//! # Add the current position at start-up
//! skycast --lat 42.96 --lon -85.67 --units imperial
//! ```

use std::cell::RefCell;
use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::KeyEventKind,
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Frame, Terminal, backend::CrosstermBackend, layout::Rect};
use skycast::components::{Component, Dashboard, DashboardProps};
use skycast::state::SPINNER_TICK_MS;
use skycast::{Action, AppState, EffectHandler, reducer, startup_actions};
use skycast_core::config::{DEFAULT_API_BASE, default_data_dir};
use skycast_core::{
    ApiClient, Cadence, Config, LocalStore, LocationQuery, MeasureUnits, PersistedState, Surface,
};
use tracing_subscriber::EnvFilter;
use tui_dispatch::{
    EffectRuntime, EffectStoreWithMiddleware, EventKind, EventOutcome, LoggingMiddleware,
    RenderContext,
};

const DEFAULT_LOG_FILTER: &str = "skycast=info,skycast_core=info";

/// Terminal weather dashboard
#[derive(Parser, Debug)]
#[command(name = "skycast", version)]
#[command(about = "Saved locations, current conditions and a 5-day forecast in your terminal")]
struct Args {
    /// Base URL of the location/weather API
    #[arg(long, default_value = DEFAULT_API_BASE)]
    api_url: String,

    /// Directory for saved locations and the log file
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Latitude of the current position, resolved and selected at start-up
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Longitude of the current position
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    lon: Option<f64>,

    /// Unit system (standard, metric, imperial); overrides the saved preference
    #[arg(long)]
    units: Option<MeasureUnits>,

    /// Seconds between silent data refreshes
    #[arg(long, default_value_t = 300)]
    refresh_secs: u64,

    /// Log file (default: <data-dir>/skycast.log)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Args {
    fn config(&self) -> Config {
        Config {
            api_base: self.api_url.trim_end_matches('/').to_string(),
            data_dir: self.data_dir.clone().unwrap_or_else(default_data_dir),
            cadence: Cadence {
                refresh: Duration::from_secs(self.refresh_secs),
                ..Cadence::default()
            },
        }
    }
}

fn init_logging(path: &Path) -> io::Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();
    let config = args.config();
    if let Err(e) = config.validate() {
        eprintln!("Error: {e}");
        std::process::exit(2);
    }

    let log_file = args
        .log_file
        .clone()
        .unwrap_or_else(|| config.data_dir.join("skycast.log"));
    if let Err(e) = init_logging(&log_file) {
        eprintln!("Error: could not open log file {}: {e}", log_file.display());
        std::process::exit(1);
    }
    tracing::info!(api = %config.api_base, data_dir = %config.data_dir.display(), "starting");

    let storage = LocalStore::new(&config.data_dir);
    let state = AppState::restore(&PersistedState::load(&storage));
    let geolocation = args
        .lat
        .zip(args.lon)
        .map(|(lat, lon)| LocationQuery::Coordinates { lat, lon });
    let startup = startup_actions(&state, args.units, geolocation);

    // ===== Terminal setup =====
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, config, storage, state, startup).await;

    // ===== Cleanup =====
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        tracing::error!(error = %e, "terminal error");
    }
    result
}

/// Root UI: the dashboard and the overlays it owns.
struct SkycastUi {
    dashboard: Dashboard,
}

impl SkycastUi {
    fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState, ctx: RenderContext) {
        let props = DashboardProps {
            state,
            is_focused: ctx.is_focused(),
        };
        self.dashboard.render(frame, area, props);
    }

    fn map_event(&mut self, event: &EventKind, state: &AppState) -> EventOutcome<Action> {
        match event {
            EventKind::Resize(..) => return EventOutcome::needs_render(),
            EventKind::Key(key) if key.kind != KeyEventKind::Press => {
                return EventOutcome::ignored();
            }
            _ => {}
        }
        let props = DashboardProps {
            state,
            is_focused: true,
        };
        EventOutcome::from_actions(self.dashboard.handle_event(event, props))
    }
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    config: Config,
    storage: LocalStore,
    state: AppState,
    startup: Vec<Action>,
) -> io::Result<()> {
    let store = EffectStoreWithMiddleware::new(state, reducer, LoggingMiddleware::new());
    let mut runtime = EffectRuntime::from_store(store);

    let cadence = config.cadence;
    for surface in Surface::ALL {
        let page_period = match surface {
            Surface::Current => cadence.current_page,
            Surface::Extended => cadence.extended_page,
        };
        runtime
            .subscriptions()
            .interval(format!("page.{surface}"), page_period, move || {
                Action::PageAdvance(surface)
            })
            .interval(format!("refresh.{surface}"), cadence.refresh, move || {
                Action::RefreshTick(surface)
            });
    }
    runtime
        .subscriptions()
        .interval("spinner", Duration::from_millis(SPINNER_TICK_MS), || {
            Action::SpinnerTick
        });

    for action in startup {
        runtime.enqueue(action);
    }

    let mut handler = EffectHandler::new(ApiClient::new(config.api_base), storage);
    let ui = RefCell::new(SkycastUi {
        dashboard: Dashboard::new(),
    });

    runtime
        .run(
            terminal,
            |frame, area, state, render_ctx| {
                ui.borrow_mut().render(frame, area, state, render_ctx);
            },
            |event, state| ui.borrow_mut().map_event(event, state),
            |action| matches!(action, Action::Quit),
            |effect, ctx| handler.handle(effect, ctx),
        )
        .await
}
