// Re-export all model types from submodules.

pub use container::{available_actions, ContainerAction, ContainerStatus, ContainerSummary};
pub use group::{build_rows, group_containers, group_key, DashboardRow, Group};
pub use session::{
    SessionState, DEFAULT_LOG_PANE_HEIGHT, MAX_LOG_PANE_HEIGHT, MIN_LOG_PANE_HEIGHT,
};
pub use status::StatusMessage;

mod container;
mod group;
mod session;
mod status;
