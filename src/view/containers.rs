use std::io::{self, Write};
use crossterm::{cursor, queue, style::{Attribute, Color, SetAttribute}};

use crate::docker::ContainerRuntime;
use crate::docker_controller::Dashboard;
use crate::model::{available_actions, ContainerStatus, ContainerSummary, DashboardRow};
use super::shared::{capitalize, clip, truncate_str, write_colored, writeln};

/// How a screen line is drawn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LineKind {
    GroupHeader,
    Container(ContainerStatus),
    LogFrame,
    LogText,
    Notice,
}

/// One terminal line of the container list. `row` links it to the selectable
/// row it belongs to; log pane lines carry `None` and follow their container.
#[derive(Clone, Debug)]
pub struct ScreenLine {
    pub text: String,
    pub kind: LineKind,
    pub row: Option<usize>,
}

impl ScreenLine {
    fn new(text: String, kind: LineKind, row: Option<usize>) -> Self {
        Self { text, kind, row }
    }
}

/// Lay out groups, containers and open log panes as plain lines.
pub fn layout_lines<R: ContainerRuntime>(dashboard: &Dashboard<R>) -> Vec<ScreenLine> {
    let mut lines = Vec::new();

    if dashboard.groups.is_empty() {
        lines.push(ScreenLine::new("  No containers found.".into(), LineKind::Notice, None));
        return lines;
    }

    for (idx, row) in dashboard.rows.iter().enumerate() {
        match *row {
            DashboardRow::GroupHeader { group } => {
                let g = &dashboard.groups[group];
                let marker = if dashboard.session.is_collapsed(&g.key) { '▸' } else { '▾' };
                lines.push(ScreenLine::new(
                    format!("  {} {} ({})", marker, g.key, g.containers.len()),
                    LineKind::GroupHeader,
                    Some(idx),
                ));
            }
            DashboardRow::Container { group, member } => {
                let c = &dashboard.groups[group].containers[member];
                let logs_open = dashboard.session.logs_visible(&c.id);
                lines.push(ScreenLine::new(
                    container_line(c, logs_open),
                    LineKind::Container(c.status.clone()),
                    Some(idx),
                ));
                if logs_open {
                    let text = dashboard.logs_for(&c.id).unwrap_or("");
                    push_log_pane(&mut lines, &c.name, text, dashboard.session.log_pane_height);
                }
            }
        }
    }

    lines
}

fn container_line(c: &ContainerSummary, logs_open: bool) -> String {
    let mut hints: Vec<String> = available_actions(&c.status)
        .iter()
        .map(|a| format!("[{}] {}", a.key(), a.label()))
        .collect();
    hints.push(if logs_open { "[L] Hide Logs".into() } else { "[L] Show Logs".into() });

    format!("    {:<24} {:<30} {:<10} {}",
        truncate_str(&c.name, 24),
        truncate_str(&c.image, 30),
        capitalize(c.status.as_str()),
        hints.join("  "),
    )
}

/// Read-only pane of fixed height showing the newest lines of `text`.
fn push_log_pane(lines: &mut Vec<ScreenLine>, name: &str, text: &str, height: usize) {
    lines.push(ScreenLine::new(format!("      ┌─ Logs: {} ", name), LineKind::LogFrame, None));

    let body: Vec<&str> = text.lines().collect();
    let start = body.len().saturating_sub(height);
    let mut shown = 0;
    if body.is_empty() {
        lines.push(ScreenLine::new("      │ (no output)".into(), LineKind::LogText, None));
        shown = 1;
    }
    for l in &body[start..] {
        let l = l.trim_end_matches('\r').replace('\t', "    ");
        lines.push(ScreenLine::new(format!("      │ {}", l), LineKind::LogText, None));
        shown += 1;
    }
    for _ in shown..height {
        lines.push(ScreenLine::new("      │".into(), LineKind::LogText, None));
    }

    lines.push(ScreenLine::new("      └─".into(), LineKind::LogFrame, None));
}

/// First line to draw so the selected row and its log pane fit in `area` lines.
pub fn viewport_start(lines: &[ScreenLine], selected: usize, area: usize) -> usize {
    let Some(first) = lines.iter().position(|l| l.row == Some(selected)) else { return 0 };
    let mut last = first;
    while last + 1 < lines.len() && lines[last + 1].row.is_none() {
        last += 1;
    }
    if last < area {
        0
    } else {
        (last + 1 - area).min(first)
    }
}

pub fn render_containers<R: ContainerRuntime>(
    out: &mut impl Write,
    dashboard: &Dashboard<R>,
    top: u16,
    area: usize,
    width: usize,
) -> io::Result<()> {
    queue!(out, cursor::MoveTo(0, top))?;

    queue!(out, SetAttribute(Attribute::Bold))?;
    write!(out, "  Docker Containers ({})", dashboard.container_count())?;
    queue!(out, SetAttribute(Attribute::Reset))?;
    write!(out, "\r\n")?;

    let lines = layout_lines(dashboard);
    let selected = dashboard.session.selected_index;
    let start = viewport_start(&lines, selected, area);

    for line in lines.iter().skip(start).take(area) {
        let text = clip(&line.text, width);
        let is_selected = line.row == Some(selected);
        match &line.kind {
            LineKind::GroupHeader => {
                queue!(out, SetAttribute(Attribute::Bold))?;
                write_colored(out, text, Color::White, is_selected)?;
                queue!(out, SetAttribute(Attribute::Reset))?;
            }
            LineKind::Container(status) => {
                write_colored(out, text, status_color(status), is_selected)?;
            }
            LineKind::LogFrame => write_colored(out, text, Color::DarkGrey, false)?,
            LineKind::LogText => write_colored(out, text, Color::Grey, false)?,
            LineKind::Notice => writeln(out, text)?,
        }
    }

    Ok(())
}

pub fn status_color(status: &ContainerStatus) -> Color {
    match status {
        ContainerStatus::Running => Color::Green,
        ContainerStatus::Exited => Color::Red,
        ContainerStatus::Paused => Color::Yellow,
        ContainerStatus::Other(_) => Color::DarkGrey,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docker_controller::DEFAULT_TAIL_LINES;
    use crate::testing::{container, FakeRuntime};

    fn dashboard(containers: Vec<ContainerSummary>) -> Dashboard<FakeRuntime> {
        let mut d = Dashboard::new(FakeRuntime::with_containers(containers), DEFAULT_TAIL_LINES);
        d.refresh().unwrap();
        d
    }

    fn texts(lines: &[ScreenLine]) -> Vec<&str> {
        lines.iter().map(|l| l.text.as_str()).collect()
    }

    #[test]
    fn running_container_offers_stop_and_restart() {
        let d = dashboard(vec![container("1", "web", "nginx:latest", ContainerStatus::Running)]);
        let lines = layout_lines(&d);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text, "  ▾ nginx (1)");
        assert!(lines[1].text.contains("web"));
        assert!(lines[1].text.contains("Running"));
        assert!(lines[1].text.contains("[T] Stop"));
        assert!(lines[1].text.contains("[R] Restart"));
        assert!(!lines[1].text.contains("Start"));
        assert!(lines[1].text.contains("[L] Show Logs"));
    }

    #[test]
    fn exited_container_offers_start_only() {
        let d = dashboard(vec![container("1", "db", "postgres:16", ContainerStatus::Exited)]);
        let lines = layout_lines(&d);
        let line = &lines[1];
        assert!(line.text.contains("[S] Start"));
        assert!(!line.text.contains("Stop"));
        assert_eq!(line.kind, LineKind::Container(ContainerStatus::Exited));
    }

    #[test]
    fn empty_listing_shows_notice() {
        let d = dashboard(vec![]);
        assert_eq!(texts(&layout_lines(&d)), vec!["  No containers found."]);
    }

    #[test]
    fn open_log_pane_has_fixed_height() {
        let mut d = dashboard(vec![container("1", "web", "nginx:latest", ContainerStatus::Running)]);
        d.runtime().set_logs("1", "one\ntwo\n");
        d.toggle_logs("1").unwrap();
        d.session.log_pane_height = 4;

        let lines = layout_lines(&d);
        // header, container, frame, 4 body lines, frame
        assert_eq!(lines.len(), 8);
        assert!(lines[1].text.contains("[L] Hide Logs"));
        assert_eq!(lines[2].text, "      ┌─ Logs: web ");
        assert_eq!(lines[3].text, "      │ one");
        assert_eq!(lines[4].text, "      │ two");
        assert_eq!(lines[5].text, "      │");
        assert!(lines[2..].iter().all(|l| l.row.is_none()));
    }

    #[test]
    fn log_pane_keeps_newest_lines() {
        let mut d = dashboard(vec![container("1", "web", "nginx:latest", ContainerStatus::Running)]);
        let text: String = (0..50).map(|i| format!("line {}\n", i)).collect();
        d.runtime().set_logs("1", &text);
        d.toggle_logs("1").unwrap();
        d.session.log_pane_height = 3;

        let lines = layout_lines(&d);
        assert_eq!(lines[3].text, "      │ line 47");
        assert_eq!(lines[5].text, "      │ line 49");
    }

    #[test]
    fn empty_logs_say_so() {
        let mut d = dashboard(vec![container("1", "web", "nginx:latest", ContainerStatus::Running)]);
        d.toggle_logs("1").unwrap();
        let lines = layout_lines(&d);
        assert_eq!(lines[3].text, "      │ (no output)");
    }

    #[test]
    fn viewport_keeps_selected_pane_visible() {
        let mut d = dashboard(
            (0..10)
                .map(|i| container(&i.to_string(), &format!("c{}", i), "app:1", ContainerStatus::Running))
                .collect(),
        );
        d.session.log_pane_height = 3;
        d.toggle_logs("9").unwrap();
        let lines = layout_lines(&d);
        // 1 header + 10 containers + 5 pane lines
        assert_eq!(lines.len(), 16);

        assert_eq!(viewport_start(&lines, 0, 8), 0);
        // last container is row 10 at line 10; its pane ends at line 15
        assert_eq!(viewport_start(&lines, 10, 8), 8);
        // a tiny area never scrolls past the selected line itself
        assert_eq!(viewport_start(&lines, 10, 2), 10);
    }

    #[test]
    fn status_colors() {
        assert_eq!(status_color(&ContainerStatus::Running), Color::Green);
        assert_eq!(status_color(&ContainerStatus::Exited), Color::Red);
        assert_eq!(status_color(&ContainerStatus::Paused), Color::Yellow);
        assert_eq!(status_color(&ContainerStatus::Other("dead".into())), Color::DarkGrey);
    }

    #[test]
    fn render_writes_into_buffer() {
        let d = dashboard(vec![container("1", "web", "nginx:latest", ContainerStatus::Running)]);
        let mut buf: Vec<u8> = Vec::new();
        render_containers(&mut buf, &d, 3, 10, 120).unwrap();
        let s = String::from_utf8_lossy(&buf);
        assert!(s.contains("Docker Containers (1)"));
        assert!(s.contains("nginx (1)"));
    }
}
