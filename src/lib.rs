//! Dockboard — a terminal dashboard for the Docker containers on one host.
//!
//! This library exposes the core modules for use by the binary and by tests.

pub mod app;
pub mod cli;
pub mod docker;
pub mod docker_controller;
pub mod error;
pub mod logging;
pub mod model;
pub mod snapshot;
pub mod view;

#[cfg(test)]
mod testing;
