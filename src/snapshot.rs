//! Non-interactive listing printed by `--once`.

use std::fmt::Write;

use crate::model::{available_actions, Group};
use crate::view::{capitalize, truncate_str};

/// Grouped listing as aligned plain text.
pub fn render_text(groups: &[Group]) -> String {
    let mut out = String::new();
    if groups.is_empty() {
        out.push_str("No containers found.\n");
        return out;
    }

    for group in groups {
        let _ = writeln!(out, "{} ({})", group.key, group.containers.len());
        for c in &group.containers {
            let actions: Vec<&str> = available_actions(&c.status).iter().map(|a| a.label()).collect();
            let _ = writeln!(out, "  {:<14} {:<24} {:<30} {:<10} {}",
                c.short_id(),
                truncate_str(&c.name, 24),
                truncate_str(&c.image, 30),
                capitalize(c.status.as_str()),
                actions.join("/"),
            );
        }
    }
    out
}

/// Grouped listing as pretty-printed JSON.
pub fn render_json(groups: &[Group]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(groups)
}
