mod input;
mod render;

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use anyhow::Context;
use crossterm::{
    cursor,
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use tracing::info;

use crate::docker::ContainerRuntime;
use crate::docker_controller::Dashboard;
use crate::model::StatusMessage;
use crate::view::Presenter;

pub use input::{handle_key, InputResult};

/// How often the loop wakes up to check for a shutdown signal. The runtime
/// is only queried in response to key presses.
const INPUT_POLL: Duration = Duration::from_millis(100);

/// Restore the terminal to normal mode. Safe to call multiple times.
pub fn restore_terminal() {
    let _ = execute!(io::stdout(), cursor::Show, LeaveAlternateScreen);
    let _ = disable_raw_mode();
}

/// Interactive session: the dashboard plus terminal bookkeeping.
pub struct App<R: ContainerRuntime> {
    pub dashboard: Dashboard<R>,
}

impl<R: ContainerRuntime> App<R> {
    pub fn new(dashboard: Dashboard<R>) -> Self {
        Self { dashboard }
    }

    /// Full refresh; a listing failure becomes the status line.
    pub fn refresh(&mut self) {
        if let Err(e) = self.dashboard.refresh() {
            self.dashboard.status_message = Some(StatusMessage::Error(format!("Error: {}", e)));
        }
    }
}

/// Run the dashboard until the user quits or `should_quit` is raised.
/// The first listing happens before the terminal is taken over, so a
/// missing daemon is reported as a plain error. Returns the runtime for
/// disposal.
pub fn run<R: ContainerRuntime>(mut dashboard: Dashboard<R>, should_quit: Arc<AtomicBool>) -> anyhow::Result<R> {
    dashboard.refresh().context("failed to list containers")?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, cursor::Hide, Clear(ClearType::All))?;

    let mut app = App::new(dashboard);
    let outcome = event_loop(&mut app, &should_quit);

    restore_terminal();
    outcome?;
    info!("dashboard closed");
    Ok(app.dashboard.into_runtime())
}

fn event_loop<R: ContainerRuntime>(app: &mut App<R>, should_quit: &AtomicBool) -> io::Result<()> {
    let mut needs_render = true;

    loop {
        if should_quit.load(Ordering::Relaxed) {
            return Ok(());
        }

        if needs_render {
            if !Presenter::render_size_guard()? {
                render::render(app)?;
            }
            needs_render = false;
        }

        if event::poll(INPUT_POLL)? {
            match event::read()? {
                Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                    match handle_key(app, key_event) {
                        Some(InputResult::Quit) => return Ok(()),
                        Some(InputResult::Consumed) => needs_render = true,
                        None => {}
                    }
                }
                Event::Resize(_, _) => needs_render = true,
                _ => {}
            }
        }
    }
}
