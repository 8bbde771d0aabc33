use std::io::{self, Write};
use crossterm::{
    cursor, queue,
    style::{Attribute, Color, ResetColor, SetAttribute, SetForegroundColor},
};

pub const HEADER_ROWS: u16 = 3;

pub fn render_header(out: &mut impl Write, width: u16, refreshed_at: &str) -> io::Result<()> {
    queue!(out, cursor::MoveTo(0, 0), SetAttribute(Attribute::Bold))?;
    write!(out, "  Docker Service Manager")?;
    queue!(out, SetAttribute(Attribute::Reset))?;

    // Right-align the refresh time
    let time_str = format!("dockboard - {} ", refreshed_at);
    let col = (width as usize).saturating_sub(time_str.chars().count());
    queue!(out, cursor::MoveTo(col as u16, 0), SetForegroundColor(Color::DarkGrey))?;
    write!(out, "{}", time_str)?;
    queue!(out, ResetColor)?;
    write!(out, "\r\n")?;

    queue!(out, SetForegroundColor(Color::DarkGrey))?;
    write!(out, "  Manage your Docker containers visually\r\n")?;
    write!(out, "{}\r\n", "─".repeat(width as usize))?;
    queue!(out, ResetColor)?;

    Ok(())
}
