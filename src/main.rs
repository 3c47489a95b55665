use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use crossterm::{
    event::Event,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style},
    widgets::Paragraph,
    Terminal,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use nocwatch::app::{write_export, App, View};
use nocwatch::config::Settings;
use nocwatch::data::duration::parse_whole_seconds;
use nocwatch::data::{DataStore, Filters, ViewOptions};
use nocwatch::session::Session;
use nocwatch::ui::{self, Theme};
use nocwatch::events;

#[derive(Parser, Debug)]
#[command(name = "nocwatch")]
#[command(about = "Terminal dashboard for network node health")]
struct Args {
    /// Node metadata CSV [default: network_nodes_metadata.csv]
    #[arg(short, long)]
    nodes: Option<PathBuf>,

    /// Performance history CSV [default: network_performance_data.csv]
    #[arg(short, long)]
    performance: Option<PathBuf>,

    /// Settings file (TOML). Defaults to nocwatch.toml when present
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Auto-refresh interval in whole seconds (e.g., "180s", "3m")
    #[arg(short, long)]
    refresh: Option<String>,

    /// Seed for the telemetry simulator
    #[arg(long)]
    seed: Option<u64>,

    /// Run one refresh cycle, write the view to a JSON file and exit
    #[arg(short, long)]
    export: Option<PathBuf>,

    /// Write logs to this file while the dashboard is running
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args)?;

    let settings = resolve_settings(&args)?;
    let store = load_store(&settings).context("Failed to load data files")?;

    let session = match settings.seed {
        Some(seed) => Session::with_seed(store, settings.thresholds.clone(), seed),
        None => Session::new(store, settings.thresholds.clone()),
    };

    // Handle export mode (non-interactive)
    if let Some(export_path) = args.export {
        return export_to_file(session, &export_path);
    }

    let app = App::new(session, settings.refresh_interval(), Theme::auto_detect());
    run_tui(app)
}

/// Logs go to stderr in export mode and to `--log-file` in TUI mode, where
/// stdout belongs to the terminal UI. Without a log file the TUI logs nothing.
fn init_logging(args: &Args) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if args.export.is_some() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();
    } else if let Some(ref path) = args.log_file {
        let file = File::create(path)
            .with_context(|| format!("Failed to create log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    }
    Ok(())
}

/// Layer CLI flags over the file and environment settings.
fn resolve_settings(args: &Args) -> Result<Settings> {
    let mut settings = Settings::load(args.config.as_deref())?;

    if let Some(ref nodes) = args.nodes {
        settings.nodes_path = nodes.clone();
    }
    if let Some(ref performance) = args.performance {
        settings.performance_path = performance.clone();
    }
    if let Some(ref refresh) = args.refresh {
        settings.refresh_secs = parse_whole_seconds(refresh)?;
    }
    if args.seed.is_some() {
        settings.seed = args.seed;
    }

    settings.validate()?;
    info!(
        nodes = %settings.nodes_path.display(),
        performance = %settings.performance_path.display(),
        refresh_secs = settings.refresh_secs,
        "Settings resolved"
    );
    Ok(settings)
}

/// Load both datasets before the terminal enters raw mode.
fn load_store(settings: &Settings) -> Result<DataStore> {
    let rt = tokio::runtime::Runtime::new()?;
    let store = rt
        .block_on(DataStore::load(&settings.nodes_path, &settings.performance_path))
        .map_err(|e| {
            error!(error = %e, "Dataset load failed");
            e
        })?;
    Ok(store)
}

/// Run the TUI until the user quits
fn run_tui(mut app: App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic);
    }));

    app.start(Instant::now());

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    // Minimum terminal size for usable display
    const MIN_WIDTH: u16 = 60;
    const MIN_HEIGHT: u16 = 12;

    while app.running {
        terminal.draw(|frame| {
            let area = frame.area();

            if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
                let msg = format!(
                    "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
                    area.width, area.height, MIN_WIDTH, MIN_HEIGHT
                );
                let paragraph = Paragraph::new(msg)
                    .alignment(Alignment::Center)
                    .style(Style::default().fg(Color::Yellow));
                let centered = Rect::new(0, (area.height / 2).saturating_sub(2), area.width, 5)
                    .intersection(area);
                frame.render_widget(paragraph, centered);
                return;
            }

            let chunks = Layout::vertical([
                Constraint::Length(1), // Header bar
                Constraint::Length(1), // Tabs
                Constraint::Min(8),    // Content
                Constraint::Length(1), // Status bar
            ])
            .split(area);

            ui::common::render_header(frame, app, chunks[0]);
            ui::common::render_tabs(frame, app, chunks[1]);

            match app.current_view {
                View::Overview => ui::overview::render(frame, app, chunks[2]),
                View::Map => ui::map::render(frame, app, chunks[2]),
                View::Charts => ui::charts::render(frame, app, chunks[2]),
                View::Maintenance => ui::maintenance::render(frame, app, chunks[2]),
            }

            ui::common::render_status_bar(frame, app, chunks[3]);

            if app.show_help {
                ui::common::render_help(frame, app, area);
            }
        })?;

        // Poll for events with a short timeout
        if let Some(Event::Key(key)) = events::poll_event(Duration::from_millis(100))? {
            events::handle_key_event(app, key);
        }

        app.on_tick(Instant::now());
    }

    Ok(())
}

/// Run one cycle and export the resulting view as JSON
fn export_to_file(mut session: Session, export_path: &std::path::Path) -> Result<()> {
    let (_, view) = session.refresh(&Filters::default(), ViewOptions::default(), Utc::now());
    write_export(&view, export_path)?;

    println!("Exported dashboard view to: {}", export_path.display());
    Ok(())
}
