use std::collections::HashMap;

use bollard::Docker;
use bollard::container::{
    ListContainersOptions, LogOutput, LogsOptions, RestartContainerOptions,
    StopContainerOptions,
};
use bollard::image::ListImagesOptions;
use bollard::models::{ContainerSummary as DockerSummary, ImageSummary};
use futures_util::StreamExt;
use tokio::runtime::{Builder, Runtime};
use tracing::{debug, info, warn};

use crate::error::RuntimeError;
use crate::model::{ContainerStatus, ContainerSummary};

/// Seconds Docker waits for a graceful stop before killing the container.
const STOP_GRACE_SECS: i64 = 10;

/// Blocking view of a container runtime. Every call is one request/response;
/// state is never cached between calls and no transition is validated locally.
pub trait ContainerRuntime {
    /// All containers, running and stopped.
    fn list_containers(&self) -> Result<Vec<ContainerSummary>, RuntimeError>;

    /// Last `tail_lines` lines of combined stdout/stderr.
    fn fetch_logs(&self, container_id: &str, tail_lines: usize) -> Result<String, RuntimeError>;

    fn start(&self, container_id: &str) -> Result<(), RuntimeError>;

    fn stop(&self, container_id: &str) -> Result<(), RuntimeError>;

    fn restart(&self, container_id: &str) -> Result<(), RuntimeError>;

    /// Like [`fetch_logs`](Self::fetch_logs), but a failure is turned into a
    /// readable message that is displayed in place of the logs.
    fn get_logs(&self, container_id: &str, tail_lines: usize) -> String {
        match self.fetch_logs(container_id, tail_lines) {
            Ok(logs) => logs,
            Err(e) => {
                warn!(container = container_id, error = %e, "log fetch failed");
                format!("Error fetching logs: {}", e)
            }
        }
    }
}

/// Wrapper around bollard's Docker client driven by a private
/// current-thread tokio runtime.
pub struct DockerClient {
    client: Docker,
    rt: Runtime,
}

impl DockerClient {
    /// Connect to the local Docker daemon and verify it answers a ping.
    pub fn connect() -> Result<Self, RuntimeError> {
        let rt = Builder::new_current_thread().enable_all().build()?;

        let client = {
            let _guard = rt.enter();
            Docker::connect_with_local_defaults()
                .map_err(|e| RuntimeError::Unavailable(e.to_string()))?
        };

        rt.block_on(client.ping())
            .map_err(|e| RuntimeError::Unavailable(e.to_string()))?;

        info!("connected to docker daemon");
        Ok(Self { client, rt })
    }

    /// Dispose of the connection and its runtime.
    pub fn close(self) {
        drop(self.client);
        self.rt.shutdown_background();
        debug!("docker client closed");
    }

    async fn collect_logs(&self, container_id: &str, tail_lines: usize) -> Result<String, RuntimeError> {
        let options: LogsOptions<String> = LogsOptions {
            stdout: true,
            stderr: true,
            follow: false,
            timestamps: false,
            tail: tail_lines.to_string(),
            ..Default::default()
        };

        let mut stream = Box::pin(self.client.logs(container_id, Some(options)));
        let mut buf: Vec<u8> = Vec::new();
        while let Some(result) = stream.next().await {
            match result.map_err(classify)? {
                LogOutput::StdOut { message }
                | LogOutput::StdErr { message }
                | LogOutput::Console { message } => buf.extend_from_slice(&message),
                LogOutput::StdIn { .. } => continue,
            }
        }
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

impl ContainerRuntime for DockerClient {
    fn list_containers(&self) -> Result<Vec<ContainerSummary>, RuntimeError> {
        let options: ListContainersOptions<String> = ListContainersOptions {
            all: true,
            ..Default::default()
        };

        let summaries = self
            .rt
            .block_on(self.client.list_containers(Some(options)))
            .map_err(classify)?;

        // Untagged lookups fall back to the reference the container was created with.
        let tags = match self
            .rt
            .block_on(self.client.list_images(Some(ListImagesOptions::<String>::default())))
        {
            Ok(images) => first_tags(&images),
            Err(e) => {
                warn!(error = %e, "image listing failed, using container image references");
                HashMap::new()
            }
        };

        debug!(count = summaries.len(), images = tags.len(), "listed containers");
        Ok(summaries.iter().map(|s| summary_to_container(s, &tags)).collect())
    }

    fn fetch_logs(&self, container_id: &str, tail_lines: usize) -> Result<String, RuntimeError> {
        self.rt.block_on(self.collect_logs(container_id, tail_lines))
    }

    fn start(&self, container_id: &str) -> Result<(), RuntimeError> {
        let result = self.rt
            .block_on(self.client.start_container::<String>(container_id, None));
        not_modified_is_ok(result)
    }

    fn stop(&self, container_id: &str) -> Result<(), RuntimeError> {
        let options = StopContainerOptions { t: STOP_GRACE_SECS };
        let result = self
            .rt
            .block_on(self.client.stop_container(container_id, Some(options)));
        not_modified_is_ok(result)
    }

    fn restart(&self, container_id: &str) -> Result<(), RuntimeError> {
        let options = RestartContainerOptions { t: STOP_GRACE_SECS as isize };
        self.rt
            .block_on(self.client.restart_container(container_id, Some(options)))
            .map_err(classify)
    }
}

// --- Free helper functions ---

/// Server-side rejections stay API errors; anything else means the engine
/// could not be reached.
fn classify(err: bollard::errors::Error) -> RuntimeError {
    match err {
        e @ bollard::errors::Error::DockerResponseServerError { .. } => RuntimeError::Api(e),
        e => RuntimeError::Unavailable(e.to_string()),
    }
}

/// The engine answers 304 when a container is already in the requested
/// state; that is not a failure.
pub(crate) fn not_modified_is_ok(result: Result<(), bollard::errors::Error>) -> Result<(), RuntimeError> {
    match result {
        Err(bollard::errors::Error::DockerResponseServerError { status_code: 304, .. }) => {
            debug!("container already in requested state");
            Ok(())
        }
        other => other.map_err(classify),
    }
}

/// Image ID to its first repository tag, skipping untagged images.
fn first_tags(images: &[ImageSummary]) -> HashMap<String, String> {
    images
        .iter()
        .filter_map(|img| {
            let tag = img.repo_tags.iter().find(|t| t.as_str() != "<none>:<none>")?;
            Some((img.id.clone(), tag.clone()))
        })
        .collect()
}

fn summary_to_container(s: &DockerSummary, tags: &HashMap<String, String>) -> ContainerSummary {
    let id = s.id.clone().unwrap_or_default();

    let name = s
        .names
        .as_ref()
        .and_then(|n| n.first())
        .map(|n| n.trim_start_matches('/').to_string())
        .unwrap_or_else(|| id.chars().take(12).collect());

    let tagged = s.image_id.as_ref().and_then(|id| tags.get(id));
    let image = match tagged {
        Some(tag) => tag.clone(),
        None => image_label(s.image.as_deref()),
    };
    let status = ContainerStatus::from_state(s.state.as_deref().unwrap_or_default());

    ContainerSummary { id, name, image, status }
}

/// Image reference for display. Bare digests are shortened to 12 hex chars.
fn image_label(image: Option<&str>) -> String {
    match image.map(str::trim) {
        None | Some("") => "<none>".to_string(),
        Some(img) if img.starts_with("sha256:") => img.chars().take("sha256:".len() + 12).collect(),
        Some(img) => img.to_string(),
    }
}
