use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;
use tracing_subscriber::EnvFilter;

use remote_connect_four::config::AppConfig;
use remote_connect_four::remote::{HttpMoveSource, MoveSource, RandomMoveSource};
use remote_connect_four::ui::{headless, App};

/// Play Connect Four against a remote move-suggestion service.
#[derive(Parser)]
#[command(name = "remote-connect-four", about = "Connect Four against a remote opponent")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "connect_four.toml")]
    config: PathBuf,

    /// Override the move service base URL
    #[arg(long)]
    endpoint: Option<String>,

    /// Play against a local random opponent instead of the move service
    #[arg(long)]
    offline: bool,

    /// Read moves from stdin line by line instead of opening the TUI
    #[arg(long)]
    headless: bool,

    /// Where to write logs (the TUI owns the terminal)
    #[arg(long, default_value = "remote-connect-four.log")]
    log_file: PathBuf,

    /// Print a config file with all defaults and exit
    #[arg(long)]
    print_default_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_default_config {
        print!("{}", AppConfig::default_toml()?);
        return Ok(());
    }

    init_logging(&cli.log_file)?;

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    if let Some(endpoint) = cli.endpoint {
        config.remote.base_url = endpoint;
        config.validate().context("validating --endpoint")?;
    }

    let source: Arc<dyn MoveSource> = if cli.offline {
        Arc::new(RandomMoveSource::new())
    } else {
        Arc::new(HttpMoveSource::new(&config.remote).context("building HTTP client")?)
    };
    info!(source = source.name(), endpoint = %config.remote.endpoint(), "starting");

    let runtime = tokio::runtime::Runtime::new().context("starting async runtime")?;

    if cli.headless {
        let stdin = io::stdin();
        headless::run_headless(stdin.lock(), io::stdout(), source.as_ref(), runtime.handle())?;
        return Ok(());
    }

    let poll_interval = Duration::from_millis(config.ui.poll_interval_ms);
    run_tui(App::new(source, runtime.handle().clone(), poll_interval))?;
    Ok(())
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("creating log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn run_tui(mut app: App) -> io::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore terminal — always runs, even on error
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    res
}
