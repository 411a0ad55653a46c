use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use color_eyre::Result;
use sysmon::app::{App, Step};
use sysmon::config::{self, load_config, load_config_from_path};
use sysmon::event::{EventHandler, TICK_RATE};
use sysmon::ui;

/// Gap between the priming sample and the first displayed one.
const PRIME_DELAY: Duration = Duration::from_millis(100);

#[derive(Parser)]
#[command(
    name = "sysmon",
    version,
    about = "Live terminal process monitor ranked by CPU and memory"
)]
struct Cli {
    /// Path to config file
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => load_config_from_path(path),
        None => load_config(),
    };

    #[cfg(feature = "perf-tracing")]
    {
        if let Some(path) = &config.general.trace_file {
            sysmon::trace::init_tracing_json(path)?;
        }
    }

    // ratatui::init also installs a panic hook that restores the terminal
    let mut terminal = ratatui::init();
    let result = run(&mut terminal, config).await;

    ratatui::restore();

    result
}

async fn run(terminal: &mut ratatui::DefaultTerminal, config: config::Config) -> Result<()> {
    let mut app = App::new(config);
    let mut events = EventHandler::new(TICK_RATE);

    tokio::time::sleep(PRIME_DELAY).await;
    app.refresh_data();
    terminal.draw(|frame| ui::draw(frame, &app))?;

    loop {
        // The dialog owns input until it resolves; no ticks while it is open.
        let event = if app.is_prompting() {
            events.next_input().await
        } else {
            events.next().await
        };
        let Some(event) = event else {
            break;
        };

        match app.on_event(event) {
            Step::Quit => break,
            Step::RedrawOnly => {}
            Step::Refresh { clear } => {
                if clear {
                    terminal.clear()?;
                }
                app.refresh_data();
            }
        }
        terminal.draw(|frame| ui::draw(frame, &app))?;
    }

    Ok(())
}
