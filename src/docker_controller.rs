use std::collections::HashMap;

use chrono::{DateTime, Local};
use tracing::{debug, error, info};

use crate::docker::ContainerRuntime;
use crate::error::RuntimeError;
use crate::model::{
    build_rows, group_containers, ContainerAction, ContainerSummary, DashboardRow, Group,
    SessionState, StatusMessage,
};

/// Lines fetched for an open log pane unless overridden on the command line.
pub const DEFAULT_TAIL_LINES: usize = 200;

/// Owns the runtime client and the session state. Every refresh re-reads the
/// full listing; nothing is kept from the previous one except session toggles.
pub struct Dashboard<R: ContainerRuntime> {
    runtime: R,
    tail_lines: usize,
    pub groups: Vec<Group>,
    pub rows: Vec<DashboardRow>,
    pub logs: HashMap<String, String>,
    pub session: SessionState,
    pub status_message: Option<StatusMessage>,
    pub last_refresh: Option<DateTime<Local>>,
}

impl<R: ContainerRuntime> Dashboard<R> {
    pub fn new(runtime: R, tail_lines: usize) -> Self {
        Self {
            runtime,
            tail_lines,
            groups: Vec::new(),
            rows: Vec::new(),
            logs: HashMap::new(),
            session: SessionState::default(),
            status_message: None,
            last_refresh: None,
        }
    }

    /// Hand the runtime back for disposal.
    pub fn into_runtime(self) -> R {
        self.runtime
    }

    pub fn runtime(&self) -> &R {
        &self.runtime
    }

    pub fn tail_lines(&self) -> usize {
        self.tail_lines
    }

    pub fn container_count(&self) -> usize {
        self.groups.iter().map(|g| g.containers.len()).sum()
    }

    /// Re-list containers, regroup, and fetch logs for every open log pane.
    pub fn refresh(&mut self) -> Result<(), RuntimeError> {
        let containers = match self.runtime.list_containers() {
            Ok(c) => c,
            Err(e) => {
                self.groups.clear();
                self.logs.clear();
                self.rebuild_rows();
                return Err(e);
            }
        };

        self.groups = group_containers(containers);
        self.rebuild_rows();

        self.logs.clear();
        let visible: Vec<String> = self
            .groups
            .iter()
            .flat_map(|g| g.containers.iter())
            .filter(|c| self.session.logs_visible(&c.id))
            .map(|c| c.id.clone())
            .collect();
        for id in visible {
            let text = self.runtime.get_logs(&id, self.tail_lines);
            self.logs.insert(id, text);
        }

        self.last_refresh = Some(Local::now());
        debug!(
            groups = self.groups.len(),
            containers = self.container_count(),
            log_panes = self.logs.len(),
            "dashboard refreshed"
        );
        Ok(())
    }

    /// Flip a container's log pane, then refresh so its content is fetched.
    pub fn toggle_logs(&mut self, container_id: &str) -> Result<bool, RuntimeError> {
        let visible = self.session.toggle_logs(container_id);
        self.refresh()?;
        Ok(visible)
    }

    pub fn toggle_group(&mut self, group_key: &str) {
        self.session.toggle_group(group_key);
        self.rebuild_rows();
    }

    /// Run a mutating action, then refresh regardless of its outcome.
    /// The action's own error takes precedence over a refresh error.
    pub fn apply(&mut self, action: ContainerAction, container_id: &str) -> Result<(), RuntimeError> {
        info!(container = container_id, action = action.label(), "container action");
        let result = match action {
            ContainerAction::Start => self.runtime.start(container_id),
            ContainerAction::Stop => self.runtime.stop(container_id),
            ContainerAction::Restart => self.runtime.restart(container_id),
        };
        if let Err(ref e) = result {
            error!(container = container_id, action = action.label(), error = %e, "container action failed");
        }

        let refreshed = self.refresh();
        result?;
        refreshed
    }

    pub fn selected_row(&self) -> Option<DashboardRow> {
        self.rows.get(self.session.selected_index).copied()
    }

    pub fn selected_group(&self) -> Option<&Group> {
        match self.selected_row()? {
            DashboardRow::GroupHeader { group } => self.groups.get(group),
            DashboardRow::Container { .. } => None,
        }
    }

    pub fn selected_container(&self) -> Option<&ContainerSummary> {
        match self.selected_row()? {
            DashboardRow::Container { group, member } => {
                self.groups.get(group)?.containers.get(member)
            }
            DashboardRow::GroupHeader { .. } => None,
        }
    }

    pub fn logs_for(&self, container_id: &str) -> Option<&str> {
        self.logs.get(container_id).map(String::as_str)
    }

    fn rebuild_rows(&mut self) {
        self.rows = build_rows(&self.groups, &self.session);
        self.session.set_total_rows(self.rows.len());
    }
}
