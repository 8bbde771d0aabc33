use std::io::Write;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use anyhow::Context;
use clap::Parser;
use signal_hook::consts::{SIGHUP, SIGTERM};
use tracing::info;

use dockboard::app;
use dockboard::cli::Cli;
use dockboard::docker::DockerClient;
use dockboard::docker_controller::Dashboard;
use dockboard::logging::{self, LogTarget};
use dockboard::snapshot;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let target = match (&cli.log_file, cli.once) {
        (Some(path), _) => LogTarget::File(path.as_path()),
        (None, true) => LogTarget::Stderr,
        (None, false) => LogTarget::Off,
    };
    let _log_guard = logging::init(target)?;

    let client = DockerClient::connect().context("cannot reach the Docker daemon")?;

    if cli.once {
        let mut dashboard = Dashboard::new(client, cli.tail);
        dashboard.refresh().context("failed to list containers")?;
        let output = if cli.json {
            snapshot::render_json(&dashboard.groups)? + "\n"
        } else {
            snapshot::render_text(&dashboard.groups)
        };
        std::io::stdout().write_all(output.as_bytes())?;
        dashboard.into_runtime().close();
        return Ok(());
    }

    let should_quit = Arc::new(AtomicBool::new(false));
    signal_hook::flag::register(SIGTERM, Arc::clone(&should_quit))?;
    signal_hook::flag::register(SIGHUP, Arc::clone(&should_quit))?;

    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        app::restore_terminal();
        default_hook(info);
    }));

    info!(tail = cli.tail, "starting dashboard");
    let client = app::run(Dashboard::new(client, cli.tail), should_quit)?;
    client.close();
    Ok(())
}
