use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, warn, Level};

use metric_dashboard::app::{export_layout, App};
use metric_dashboard::ui::{self, Theme};
use metric_dashboard::{
    events, BuiltinDashboard, DashboardDef, FileSource, Layout, ReaderSource, Snapshot,
    SnapshotSource,
};

#[derive(Parser, Debug)]
#[command(name = "metric-dashboard")]
#[command(about = "Plot series derived from a newline-delimited JSON metrics log")]
struct Args {
    /// Metrics log, one JSON snapshot per line ("-" reads stdin)
    input: PathBuf,

    /// Built-in dashboard to show
    #[arg(short, long, value_enum, default_value_t = BuiltinDashboard::Overview)]
    dashboard: BuiltinDashboard,

    /// Custom dashboard definition (TOML, JSON or YAML)
    #[arg(short, long, conflicts_with = "dashboard")]
    config: Option<PathBuf>,

    /// Write the assembled layout to a JSON file and exit
    #[arg(short, long)]
    export: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let def = match &args.config {
        Some(path) => DashboardDef::from_file(path)
            .with_context(|| format!("Failed to load dashboard {}", path.display()))?,
        None => args
            .dashboard
            .definition()
            .with_context(|| format!("Invalid built-in dashboard {}", args.dashboard))?,
    };

    let mut source = open_source(&args.input);
    let snapshots = source
        .load()
        .with_context(|| format!("Failed to read {}", source.description()))?;
    if snapshots.is_empty() {
        warn!(source = source.description(), "no snapshots; every series is empty");
    }
    info!(
        source = source.description(),
        ticks = snapshots.len(),
        metrics = snapshots.first().map_or(0, Snapshot::metric_count),
        "loaded snapshots"
    );

    let layout = def
        .build(&snapshots)
        .with_context(|| format!("Failed to build dashboard {}", def.title))?;

    // Handle export mode (non-interactive)
    if let Some(export_path) = args.export {
        export_layout(
            &layout,
            &def.title,
            source.description(),
            snapshots.len(),
            &export_path,
        )?;
        println!("Exported layout to: {}", export_path.display());
        return Ok(());
    }

    run_tui(layout, &def.title, source.description(), snapshots.len())
}

/// Log to stderr; WARN unless raised with `-v`.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn open_source(input: &Path) -> Box<dyn SnapshotSource> {
    if input == Path::new("-") {
        Box::new(ReaderSource::new(io::stdin().lock(), "stdin"))
    } else {
        Box::new(FileSource::new(input))
    }
}

/// Run the TUI over an assembled layout
fn run_tui(layout: Layout, title: &str, source: &str, ticks: usize) -> Result<()> {
    // Detect before raw mode; the luminance query talks to the terminal itself
    let theme = Theme::auto_detect();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic);
    }));

    let mut app = App::new(layout, title, source, ticks, theme);

    // Run the main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    while app.running {
        terminal.draw(|frame| ui::draw(frame, app))?;

        // Poll for events with a short timeout
        if let Some(event) = events::poll_event(Duration::from_millis(250))? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::Mouse(mouse) => events::handle_mouse_event(app, mouse),
                // Terminal will redraw on next iteration
                _ => {}
            }
        }
    }

    Ok(())
}
