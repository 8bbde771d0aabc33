use std::fmt;

use serde::Serialize;

/// Container state as reported by the runtime. Only the states the dashboard
/// reacts to get their own variant; the rest keep the raw string.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum ContainerStatus {
    Running,
    Exited,
    Paused,
    Other(String),
}

impl ContainerStatus {
    pub fn from_state(state: &str) -> Self {
        match state.trim().to_ascii_lowercase().as_str() {
            "running" => ContainerStatus::Running,
            "exited" => ContainerStatus::Exited,
            "paused" => ContainerStatus::Paused,
            "" => ContainerStatus::Other("unknown".to_string()),
            other => ContainerStatus::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ContainerStatus::Running => "running",
            ContainerStatus::Exited => "exited",
            ContainerStatus::Paused => "paused",
            ContainerStatus::Other(raw) => raw,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, ContainerStatus::Running)
    }
}

impl fmt::Display for ContainerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<ContainerStatus> for String {
    fn from(status: ContainerStatus) -> Self {
        status.as_str().to_string()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ContainerSummary {
    pub id: String,     // full container ID
    pub name: String,   // first name, leading '/' stripped
    pub image: String,  // image reference, or a short digest label
    pub status: ContainerStatus,
}

impl ContainerSummary {
    pub fn short_id(&self) -> &str {
        let end = self.id.char_indices().nth(12).map(|(i, _)| i).unwrap_or(self.id.len());
        &self.id[..end]
    }
}

/// Mutating operations a user can trigger on one container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContainerAction {
    Start,
    Stop,
    Restart,
}

impl ContainerAction {
    pub fn label(&self) -> &'static str {
        match self {
            ContainerAction::Start => "Start",
            ContainerAction::Stop => "Stop",
            ContainerAction::Restart => "Restart",
        }
    }

    pub fn key(&self) -> char {
        match self {
            ContainerAction::Start => 'S',
            ContainerAction::Stop => 'T',
            ContainerAction::Restart => 'R',
        }
    }

    pub fn past_tense(&self) -> &'static str {
        match self {
            ContainerAction::Start => "Started",
            ContainerAction::Stop => "Stopped",
            ContainerAction::Restart => "Restarted",
        }
    }
}

/// Actions offered for a container in the given state.
pub fn available_actions(status: &ContainerStatus) -> &'static [ContainerAction] {
    if status.is_running() {
        &[ContainerAction::Stop, ContainerAction::Restart]
    } else {
        &[ContainerAction::Start]
    }
}
