use std::io::{self, Write};
use crossterm::{queue, style::{Color, SetForegroundColor, SetBackgroundColor, ResetColor}};

/// Truncate a string to at most `max_len` characters (not bytes), appending "..."
/// if truncated. Safe for multi-byte UTF-8.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_len {
        s.to_string()
    } else {
        let keep = max_len.saturating_sub(3);
        let truncated: String = s.chars().take(keep).collect();
        format!("{}...", truncated)
    }
}

/// Cut a line to at most `max_chars` characters without splitting a code point.
pub fn clip(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}

pub fn capitalize(s: &str) -> String {
    let mut c = s.chars();
    match c.next() {
        None => String::new(),
        Some(f) => f.to_uppercase().to_string() + c.as_str(),
    }
}

pub fn writeln(out: &mut impl Write, text: &str) -> io::Result<()> {
    write!(out, "{}\r\n", text)
}

pub fn write_colored(out: &mut impl Write, text: &str, color: Color, selected: bool) -> io::Result<()> {
    if selected {
        queue!(out, SetBackgroundColor(Color::DarkGrey))?;
    }
    queue!(out, SetForegroundColor(color))?;
    write!(out, "{}\r\n", text)?;
    queue!(out, ResetColor)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_str_short_string() {
        assert_eq!(truncate_str("hello", 10), "hello");
    }

    #[test]
    fn truncate_str_long_string() {
        assert_eq!(truncate_str("hello world", 8), "hello...");
    }

    #[test]
    fn truncate_str_utf8() {
        assert_eq!(truncate_str("café", 4), "café");
        assert_eq!(truncate_str("hello世界", 6), "hel...");
    }

    #[test]
    fn clip_counts_chars() {
        assert_eq!(clip("hello", 10), "hello");
        assert_eq!(clip("hello", 3), "hel");
        assert_eq!(clip("日本語テキスト", 3), "日本語");
        assert_eq!(clip("", 3), "");
    }

    #[test]
    fn capitalize_first_letter() {
        assert_eq!(capitalize("running"), "Running");
        assert_eq!(capitalize(""), "");
    }
}
