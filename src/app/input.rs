use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::docker::ContainerRuntime;
use crate::model::{available_actions, ContainerAction, DashboardRow, StatusMessage};

use super::App;

/// Result of handling a key: Quit the app, or key was consumed (needs render).
pub enum InputResult {
    Quit,
    Consumed,
}

/// Handle a key event. Log toggles, actions and explicit refreshes re-read
/// the runtime; cursor movement only redraws. Returns `None` when the key
/// was not handled.
pub fn handle_key<R: ContainerRuntime>(app: &mut App<R>, key_event: KeyEvent) -> Option<InputResult> {
    let KeyEvent { code, modifiers, .. } = key_event;

    if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
        return Some(InputResult::Quit);
    }

    match code {
        KeyCode::Char('q') | KeyCode::Esc => Some(InputResult::Quit),
        KeyCode::Up | KeyCode::Char('k') => {
            let session = &mut app.dashboard.session;
            if session.selected_index > 0 {
                session.selected_index -= 1;
                return Some(InputResult::Consumed);
            }
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            let session = &mut app.dashboard.session;
            if session.selected_index + 1 < session.total_rows {
                session.selected_index += 1;
                return Some(InputResult::Consumed);
            }
            None
        }
        KeyCode::Left => collapse_selected(app),
        KeyCode::Right => {
            let key = app.dashboard.selected_group()?.key.clone();
            if app.dashboard.session.is_collapsed(&key) {
                app.dashboard.toggle_group(&key);
                return Some(InputResult::Consumed);
            }
            None
        }
        KeyCode::Enter => {
            if let Some(group) = app.dashboard.selected_group() {
                let key = group.key.clone();
                app.dashboard.toggle_group(&key);
                return Some(InputResult::Consumed);
            }
            toggle_selected_logs(app)
        }
        KeyCode::Char('l') | KeyCode::Char('L') => toggle_selected_logs(app),
        KeyCode::Char('S') => run_action(app, ContainerAction::Start),
        KeyCode::Char('T') => run_action(app, ContainerAction::Stop),
        KeyCode::Char('R') => run_action(app, ContainerAction::Restart),
        KeyCode::Char('+') | KeyCode::Char('=') => {
            app.dashboard.session.grow_log_pane().then_some(InputResult::Consumed)
        }
        KeyCode::Char('-') => {
            app.dashboard.session.shrink_log_pane().then_some(InputResult::Consumed)
        }
        KeyCode::F(5) | KeyCode::Char('u') => {
            app.dashboard.status_message = None;
            app.refresh();
            Some(InputResult::Consumed)
        }
        _ => None,
    }
}

/// Collapse the selected group; on a container row, jump to and collapse
/// its group.
fn collapse_selected<R: ContainerRuntime>(app: &mut App<R>) -> Option<InputResult> {
    let (group, header_index) = match app.dashboard.selected_row()? {
        DashboardRow::GroupHeader { group } => (group, app.dashboard.session.selected_index),
        DashboardRow::Container { group, .. } => {
            let idx = app
                .dashboard
                .rows
                .iter()
                .position(|r| *r == DashboardRow::GroupHeader { group })?;
            (group, idx)
        }
    };
    let key = app.dashboard.groups.get(group)?.key.clone();
    if app.dashboard.session.is_collapsed(&key) {
        return None;
    }
    app.dashboard.session.selected_index = header_index;
    app.dashboard.toggle_group(&key);
    Some(InputResult::Consumed)
}

fn toggle_selected_logs<R: ContainerRuntime>(app: &mut App<R>) -> Option<InputResult> {
    let id = app.dashboard.selected_container()?.id.clone();
    app.dashboard.status_message = match app.dashboard.toggle_logs(&id) {
        Ok(_) => None,
        Err(e) => Some(StatusMessage::Error(format!("Error: {}", e))),
    };
    Some(InputResult::Consumed)
}

/// Keys for actions that are not offered for the container's state are ignored.
fn run_action<R: ContainerRuntime>(app: &mut App<R>, action: ContainerAction) -> Option<InputResult> {
    let c = app.dashboard.selected_container()?.clone();
    if !available_actions(&c.status).contains(&action) {
        return None;
    }

    let message = match app.dashboard.apply(action, &c.id) {
        Ok(()) => StatusMessage::Info(format!("{} {}", action.past_tense(), c.name)),
        Err(e) => StatusMessage::Error(format!("Error: {} {} failed: {}", action.label(), c.name, e)),
    };
    app.dashboard.status_message = Some(message);
    Some(InputResult::Consumed)
}
