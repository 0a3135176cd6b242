mod actions;
mod app;
mod logging;
mod ui;

use std::io::{self, Stdout};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context as _, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use url::Url;

use crate::actions::execute_action;
use crate::app::App;
use zephyr_core::{NotificationSender, RecordSink, Submitter};
use zephyr_notify::NotifyClient;
use zephyr_store::{paths, Store};

#[derive(Debug, Parser)]
#[command(name = "zephyr-tui", version, about = "Zephyr coach signup form")]
struct Args {
    #[arg(long)]
    db_path: Option<PathBuf>,
    #[arg(long)]
    config: Option<PathBuf>,
    /// Notify endpoint base URL (overrides notify.endpoint_url)
    #[arg(long)]
    endpoint_url: Option<Url>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = zephyr_config::load(args.config).with_context(|| "load config")?;
    let db_path = paths::resolve_db_path(args.db_path.or(config.db_path.clone()))
        .with_context(|| "resolve database path")?;
    logging::init(&db_path)?;

    let store = Store::open(&db_path)
        .with_context(|| format!("open database {}", db_path.display()))?;
    store.migrate()?;

    let endpoint = args.endpoint_url.unwrap_or(config.notify.endpoint_url);
    let submitter = Submitter::new(&store, NotifyClient::new(&endpoint)?);

    let mut app = App::new();
    let mut terminal = TerminalGuard::new()?;
    run_app(&mut terminal, &submitter, &mut app)
}

fn run_app<S, N>(
    terminal: &mut TerminalGuard,
    submitter: &Submitter<S, N>,
    app: &mut App,
) -> Result<()>
where
    S: RecordSink,
    N: NotificationSender,
{
    let tick_rate = Duration::from_millis(200);
    let mut last_tick = Instant::now();

    loop {
        while let Some(action) = app.next_action() {
            execute_action(app, submitter, action);
        }

        terminal.terminal_mut().draw(|frame| ui::draw(frame, app))?;

        if app.should_quit {
            break;
        }

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::from_secs(0));
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key);
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }
    }

    Ok(())
}

struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalGuard {
    fn new() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let _ = restore_terminal();
            original_hook(info);
        }));

        Ok(Self { terminal })
    }

    fn terminal_mut(&mut self) -> &mut Terminal<CrosstermBackend<Stdout>> {
        &mut self.terminal
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = restore_terminal();
    }
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}
