use std::collections::{HashMap, HashSet};

pub const DEFAULT_LOG_PANE_HEIGHT: usize = 12;
pub const MIN_LOG_PANE_HEIGHT: usize = 3;
pub const MAX_LOG_PANE_HEIGHT: usize = 40;

/// UI state that lives for one dashboard session. Nothing here is persisted.
pub struct SessionState {
    pub selected_index: usize,
    pub total_rows: usize,
    pub log_pane_height: usize,
    logs_visible: HashMap<String, bool>,
    collapsed_groups: HashSet<String>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            selected_index: 0,
            total_rows: 0,
            log_pane_height: DEFAULT_LOG_PANE_HEIGHT,
            logs_visible: HashMap::new(),
            collapsed_groups: HashSet::new(),
        }
    }
}

impl SessionState {
    pub fn logs_visible(&self, container_id: &str) -> bool {
        self.logs_visible.get(container_id).copied().unwrap_or(false)
    }

    /// Flip the log pane flag for a container and return the new value.
    pub fn toggle_logs(&mut self, container_id: &str) -> bool {
        let flag = self.logs_visible.entry(container_id.to_string()).or_insert(false);
        *flag = !*flag;
        *flag
    }

    pub fn is_collapsed(&self, group_key: &str) -> bool {
        self.collapsed_groups.contains(group_key)
    }

    pub fn toggle_group(&mut self, group_key: &str) {
        if !self.collapsed_groups.remove(group_key) {
            self.collapsed_groups.insert(group_key.to_string());
        }
    }

    pub fn grow_log_pane(&mut self) -> bool {
        self.resize_log_pane(self.log_pane_height + 1)
    }

    pub fn shrink_log_pane(&mut self) -> bool {
        self.resize_log_pane(self.log_pane_height.saturating_sub(1))
    }

    fn resize_log_pane(&mut self, height: usize) -> bool {
        let height = height.clamp(MIN_LOG_PANE_HEIGHT, MAX_LOG_PANE_HEIGHT);
        let changed = height != self.log_pane_height;
        self.log_pane_height = height;
        changed
    }

    /// Keep the cursor inside `0..total_rows` after the row set changed.
    pub fn set_total_rows(&mut self, total: usize) {
        self.total_rows = total;
        if self.selected_index >= total {
            self.selected_index = total.saturating_sub(1);
        }
    }
}
