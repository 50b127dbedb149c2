mod app;
mod config;
mod effects;
mod http;
mod logging;
mod screens;
mod view;

use std::io;
use std::time::Instant;

use clap::Parser;
use color_eyre::eyre::WrapErr;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::prelude::*;
use tracing::{error, info};

use app::{App, FRAME};
use config::Config;
use http::HttpTransport;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let config = Config::parse();
    logging::init(&config.log_file)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .thread_name("howmanyouts-net")
        .enable_all()
        .build()?;
    let (transport, replies) = HttpTransport::new(&config, runtime.handle().clone())
        .wrap_err("failed to build HTTP client")?;
    info!(server = %config.server, "client starting");

    let mut app = App::new(Box::new(transport), replies, config.server.as_str());
    if let Some(name) = &config.name {
        app.set_player_name(name);
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        error!(error = %e, "client exited with error");
    }
    runtime.shutdown_background();
    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> color_eyre::Result<()> {
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|frame| {
            app.render(frame);
        })?;

        if event::poll(FRAME)? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind == KeyEventKind::Press && app.handle_key(key) {
                        break;
                    }
                }
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                _ => {}
            }
        }

        let now = Instant::now();
        app.tick(now - last_tick);
        last_tick = now;
    }

    info!("client quitting");
    Ok(())
}
