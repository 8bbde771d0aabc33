//! In-memory runtime used by unit tests.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use crate::docker::{not_modified_is_ok, ContainerRuntime};
use crate::error::RuntimeError;
use crate::model::{ContainerStatus, ContainerSummary};

pub fn container(id: &str, name: &str, image: &str, status: ContainerStatus) -> ContainerSummary {
    ContainerSummary {
        id: id.into(),
        name: name.into(),
        image: image.into(),
        status,
    }
}

fn no_such_container(id: &str) -> RuntimeError {
    RuntimeError::Api(bollard::errors::Error::DockerResponseServerError {
        status_code: 404,
        message: format!("No such container: {}", id),
    })
}

/// Mimics the engine: actions mutate container state and every call is recorded.
#[derive(Default)]
pub struct FakeRuntime {
    containers: RefCell<Vec<ContainerSummary>>,
    logs: RefCell<HashMap<String, String>>,
    calls: RefCell<Vec<String>>,
    failing_logs: RefCell<HashSet<String>>,
    unavailable: RefCell<bool>,
}

impl FakeRuntime {
    pub fn with_containers(containers: Vec<ContainerSummary>) -> Self {
        Self {
            containers: RefCell::new(containers),
            ..Default::default()
        }
    }

    pub fn set_logs(&self, id: &str, text: &str) {
        self.logs.borrow_mut().insert(id.to_string(), text.to_string());
    }

    /// Make log fetches for `id` fail as if the container vanished.
    pub fn fail_logs(&self, id: &str) {
        self.failing_logs.borrow_mut().insert(id.to_string());
    }

    pub fn set_unavailable(&self, down: bool) {
        *self.unavailable.borrow_mut() = down;
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.calls.borrow().iter().filter(|c| c.starts_with(prefix)).count()
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }

    fn set_status(&self, id: &str, status: ContainerStatus) -> Result<(), RuntimeError> {
        let mut containers = self.containers.borrow_mut();
        let c = containers
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| no_such_container(id))?;
        c.status = status;
        Ok(())
    }

    /// Start and stop answer 304 when the container is already there, as
    /// the engine does; the reply goes through the client's own mapping.
    fn transition(&self, id: &str, status: ContainerStatus) -> Result<(), RuntimeError> {
        let current = self
            .containers
            .borrow()
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.status.clone());
        if current.as_ref() == Some(&status) {
            return not_modified_is_ok(Err(bollard::errors::Error::DockerResponseServerError {
                status_code: 304,
                message: String::new(),
            }));
        }
        self.set_status(id, status)
    }
}

impl ContainerRuntime for FakeRuntime {
    fn list_containers(&self) -> Result<Vec<ContainerSummary>, RuntimeError> {
        self.record("list".into());
        if *self.unavailable.borrow() {
            return Err(RuntimeError::Unavailable("connection refused".into()));
        }
        Ok(self.containers.borrow().clone())
    }

    fn fetch_logs(&self, container_id: &str, tail_lines: usize) -> Result<String, RuntimeError> {
        self.record(format!("logs {} {}", container_id, tail_lines));
        let listed = self.containers.borrow().iter().any(|c| c.id == container_id);
        if !listed || self.failing_logs.borrow().contains(container_id) {
            return Err(no_such_container(container_id));
        }
        Ok(self.logs.borrow().get(container_id).cloned().unwrap_or_default())
    }

    fn start(&self, container_id: &str) -> Result<(), RuntimeError> {
        self.record(format!("start {}", container_id));
        self.transition(container_id, ContainerStatus::Running)
    }

    fn stop(&self, container_id: &str) -> Result<(), RuntimeError> {
        self.record(format!("stop {}", container_id));
        self.transition(container_id, ContainerStatus::Exited)
    }

    fn restart(&self, container_id: &str) -> Result<(), RuntimeError> {
        self.record(format!("restart {}", container_id));
        self.set_status(container_id, ContainerStatus::Running)
    }
}
