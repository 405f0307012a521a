mod app;
mod event;
mod view;

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self as ct_event, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use log::info;
use ratatui::prelude::*;

pub use app::{App, FormDefaults, FormField, Header, TaskForm};
use event::KeyAction;

/// Run the interactive task list until the user quits.
pub fn run(app: &mut App, tick_rate: Duration) -> Result<()> {
    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    info!("session started");
    let result = run_loop(&mut terminal, app, tick_rate);

    // Restore the terminal even if the loop failed.
    terminal::disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!(
        "session ended with {} task(s), {} completed",
        app.store.len(),
        app.store.completed_count()
    );
    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    tick_rate: Duration,
) -> Result<()> {
    loop {
        terminal.draw(|frame| view::render(frame, app))?;

        if !ct_event::poll(tick_rate)? {
            continue;
        }
        if let Event::Key(key) = ct_event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match event::handle_key(app, key) {
                KeyAction::Quit => return Ok(()),
                KeyAction::Submit => app.submit_add(),
                KeyAction::Continue => {}
            }
        }
    }
}
