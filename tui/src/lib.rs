// Forbid accidental stdout/stderr writes in the *library* portion of the TUI.
// Startup errors opt out locally via `allow` before the terminal is taken over.
#![deny(clippy::print_stdout, clippy::print_stderr)]
use std::fs::OpenOptions;

use app::App;
use config::Config;
use config::ConfigOverrides;
use guide::Guide;
use tracing_appender::non_blocking;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

mod app;
mod app_event;
mod app_event_sender;
mod cli;
pub mod clipboard;
pub mod config;
pub mod guide;
mod guide_view;
pub mod print;
mod tui;
mod util {
    pub mod buffer;
}

pub use cli::Cli;

pub async fn run_main(cli: Cli) -> std::io::Result<()> {
    let overrides = ConfigOverrides {
        clipboard: cli.clipboard,
        guide: cli.guide.clone(),
    };

    #[allow(clippy::print_stderr)]
    let config = match Config::load_with_overrides(overrides) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error loading configuration: {err}");
            std::process::exit(1);
        }
    };

    #[allow(clippy::print_stderr)]
    let guide = match Guide::load(config.guide.as_deref()) {
        Ok(guide) => guide,
        Err(err) => {
            eprintln!("Error loading guide: {err}");
            std::process::exit(1);
        }
    };

    if cli.print {
        let mut stdout = std::io::stdout().lock();
        return print::write_guide(&guide, &mut stdout);
    }

    let log_dir = config.log_dir();
    std::fs::create_dir_all(&log_dir)?;
    // Open (or create) the log file, appending to it.
    let mut log_file_opts = OpenOptions::new();
    log_file_opts.create(true).append(true);

    // Ensure the file is only readable and writable by the current user.
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        log_file_opts.mode(0o600);
    }

    let log_file = log_file_opts.open(log_dir.join("setup-guide-tui.log"))?;

    // Wrap file in non-blocking writer.
    let (non_blocking, _guard) = non_blocking(log_file);

    let default_filter = if cli.debug {
        "setup_guide_tui=info"
    } else {
        "setup_guide_tui=warn"
    };

    // use RUST_LOG env var, defaulting based on debug flag.
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_target(false)
        .with_filter(env_filter);

    let _ = tracing_subscriber::registry().with(file_layer).try_init();

    tracing::info!(
        clipboard = ?config.clipboard,
        sections = guide.sections.len(),
        "starting setup guide"
    );

    run_ratatui_app(&cli, &config, &guide)
        .map_err(|err| std::io::Error::other(err.to_string()))
}

fn run_ratatui_app(
    cli: &Cli,
    config: &Config,
    guide: &Guide,
) -> color_eyre::Result<()> {
    color_eyre::install()?;

    // Forward panic reports through tracing, then chain to the previous hook
    // so users still get the color-eyre report after the terminal is restored.
    let prev_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        tracing::error!("panic: {info}");
        prev_hook(info);
    }));

    let mut terminal = tui::init(config)?;
    let mut app = App::new(guide, config.clipboard, cli.expand.as_deref());
    let app_result = app.run(&mut terminal);

    if let Err(err) = tui::restore(config.alternate_screen) {
        tracing::warn!("failed to restore terminal: {err}");
    }
    app_result
}
