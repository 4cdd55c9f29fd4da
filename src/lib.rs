//! salontrack - salon records and service category insights
//!
//! One JSON document holds staff, services, appointments and clients.
//! The same store backs the REST server, the CLI and the TUI.

pub mod cli;
pub mod config;
pub mod format;
pub mod logging;
pub mod server;
pub mod services;
pub mod tui;
pub mod types;
