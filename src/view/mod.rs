mod shared;
mod header;
mod containers;

use std::io::{self, Write};
use crossterm::{
    cursor, execute, queue,
    style::{Color, ResetColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};

use crate::docker::ContainerRuntime;
use crate::docker_controller::Dashboard;

pub use containers::{layout_lines, status_color, viewport_start, LineKind, ScreenLine};
pub use shared::{capitalize, clip, truncate_str};

pub struct Presenter;

/// Minimum terminal dimensions for usable rendering.
pub const MIN_COLS: u16 = 60;
pub const MIN_ROWS: u16 = 10;

const FOOTER_HELP: &str = "q: Quit | ↑/↓: Navigate | ←/→: Collapse/Expand | Enter/L: Logs | S: Start | T: Stop | R: Restart | +/-: Log height | F5/u: Refresh";

impl Presenter {
    /// Check if the terminal is large enough. If not, render a "too small"
    /// message and return `true` (meaning "skip normal rendering").
    pub fn render_size_guard() -> io::Result<bool> {
        let (cols, rows) = terminal::size()?;
        if cols < MIN_COLS || rows < MIN_ROWS {
            let mut out = io::stdout();
            execute!(out, Clear(ClearType::All), cursor::MoveTo(0, 0))?;
            let msg = format!(
                "Terminal too small ({}x{}). Resize to at least {}x{}.",
                cols, rows, MIN_COLS, MIN_ROWS
            );
            let y = rows / 2;
            let x = cols.saturating_sub(msg.len() as u16) / 2;
            queue!(out, cursor::MoveTo(x, y), SetForegroundColor(Color::Yellow))?;
            write!(out, "{}", msg)?;
            queue!(out, ResetColor)?;
            out.flush()?;
            return Ok(true);
        }
        Ok(false)
    }

    /// Draw the whole dashboard for a terminal of `cols` x `rows`.
    pub fn render_dashboard<R: ContainerRuntime>(
        out: &mut impl Write,
        dashboard: &Dashboard<R>,
        cols: u16,
        rows: u16,
    ) -> io::Result<()> {
        queue!(out, Clear(ClearType::All), cursor::MoveTo(0, 0))?;

        let refreshed_at = dashboard
            .last_refresh
            .map(|t| t.format("%H:%M:%S").to_string())
            .unwrap_or_else(|| "...".to_string());
        header::render_header(out, cols, &refreshed_at)?;

        // section title + status line + footer
        let area = rows.saturating_sub(header::HEADER_ROWS + 3) as usize;
        containers::render_containers(out, dashboard, header::HEADER_ROWS, area, cols as usize)?;

        if let Some(msg) = &dashboard.status_message {
            let color = if msg.is_error() { Color::Red } else { Color::Yellow };
            queue!(out, cursor::MoveTo(0, rows.saturating_sub(2)), SetForegroundColor(color))?;
            write!(out, "  {}", clip(msg.text(), (cols as usize).saturating_sub(2)))?;
            queue!(out, ResetColor)?;
        }

        queue!(
            out,
            cursor::MoveTo(1, rows.saturating_sub(1)),
            SetForegroundColor(Color::DarkGrey),
            crossterm::style::Print(clip(FOOTER_HELP, (cols as usize).saturating_sub(1))),
            ResetColor
        )?;

        out.flush()?;
        Ok(())
    }
}
