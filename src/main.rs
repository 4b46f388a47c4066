use std::fs::OpenOptions;
use std::io;
use std::process::ExitCode;
use std::sync::Mutex;

use crossterm::{
    execute,
    terminal::{LeaveAlternateScreen, disable_raw_mode},
};
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use pricechart::config::{AppConfig, fetch_config};
use pricechart::models::WindowStatus;
use pricechart::pipeline::WindowPipeline;
use pricechart::presentation::{self, CURRENCY};
use pricechart::tui::event::{spawn_event_reader, spawn_state_forwarder, spawn_tick_timer, update};
use pricechart::tui::{Action, App, Tui, is_interactive, render, restore_terminal, setup_terminal};
use pricechart::{ChartError, source};

/// Interval between UI ticks.
const TICK_MS: u64 = 250;

#[tokio::main]
async fn main() -> Result<ExitCode, ChartError> {
    let app_config = fetch_config()?;
    let interactive = is_interactive();
    init_logging(&app_config, interactive)?;

    let source = source::from_config(&app_config)?;
    let pipeline = WindowPipeline::new(source, app_config.default_range.clone());
    info!(
        source = app_config.source.name(),
        symbol = %app_config.symbol,
        "Starting pricechart"
    );

    if interactive {
        run_tui(&app_config, &pipeline).await?;
        Ok(ExitCode::SUCCESS)
    } else {
        run_headless(&app_config, &pipeline).await
    }
}

/// Logs to stderr when headless. The TUI owns the terminal, so there logs go
/// to `PRICECHART_LOG_FILE` or nowhere.
fn init_logging(config: &AppConfig, interactive: bool) -> Result<(), ChartError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if !interactive {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();
        return Ok(());
    }

    if let Some(path) = &config.log_file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| ChartError::Io(format!("failed to open {}: {e}", path.display())))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    }
    Ok(())
}

/// Loads the default range once and prints the headline.
async fn run_headless(
    config: &AppConfig,
    pipeline: &WindowPipeline,
) -> Result<ExitCode, ChartError> {
    let window = pipeline.load_window(config.default_range.clone()).await?;
    let state = pipeline.snapshot();

    println!("{} · {}", config.symbol, window.range());
    match window.status() {
        WindowStatus::Failed => {
            eprintln!("{}", window.error().unwrap_or_default());
            Ok(ExitCode::FAILURE)
        }
        _ => {
            let headline = presentation::headline(&state.metrics);
            println!("{} {CURRENCY}  {}", headline.price, headline.change);
            match presentation::chart_message(&window) {
                Some(message) => println!("{message}"),
                None => println!("{} samples", window.samples().len()),
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn run_tui(config: &AppConfig, pipeline: &WindowPipeline) -> Result<(), ChartError> {
    let mut terminal = setup_terminal()?;

    // Restore the terminal before a panic message is printed.
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, crossterm::cursor::Show);
        original_hook(info);
    }));

    let result = run_loop(&mut terminal, config, pipeline).await;

    // Always restore, even if the loop returned an error.
    let _ = std::panic::take_hook();
    restore_terminal(&mut terminal)?;
    result
}

async fn run_loop(
    terminal: &mut Tui,
    config: &AppConfig,
    pipeline: &WindowPipeline,
) -> Result<(), ChartError> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    spawn_event_reader(tx.clone());
    spawn_tick_timer(tx.clone(), TICK_MS);
    spawn_state_forwarder(pipeline.subscribe(), tx);

    let mut app = App::new(
        config.symbol.clone(),
        config.source.name(),
        pipeline.snapshot(),
    );
    app.settings = settings(config);

    pipeline.select_range(config.default_range.label())?;

    while !app.should_quit {
        terminal
            .draw(|frame| render(frame, &app))
            .map_err(|e| ChartError::Io(format!("failed to draw: {e}")))?;

        let Some(message) = rx.recv().await else {
            break;
        };

        let Some(action) = update(&mut app, message) else {
            continue;
        };
        let started = match action {
            Action::SelectRange(label) => pipeline.select_range(&label),
            Action::Retry => pipeline.retry(),
        };
        if let Err(e) = started {
            app.show_error(e.to_string());
        }
    }

    Ok(())
}

/// Key/value pairs for the settings view.
fn settings(config: &AppConfig) -> Vec<(&'static str, String)> {
    vec![
        ("Source", config.source.name().to_string()),
        ("Symbol", config.symbol.clone()),
        ("Default range", config.default_range.to_string()),
        (
            "Start price",
            presentation::format_price(config.synthetic.start_price),
        ),
        (
            "Latency",
            format!("{} ms", config.synthetic.latency.as_millis()),
        ),
        ("Kraken URL", config.kraken.rest_url.clone()),
        ("Timeout", format!("{} s", config.kraken.timeout.as_secs())),
        (
            "Log file",
            config
                .log_file
                .as_ref()
                .map_or_else(|| "disabled".to_string(), |p| p.display().to_string()),
        ),
    ]
}
