pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;
pub mod web;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::TomlConfig;
pub use crate::core::{dashboard::Dashboard, dataset::load_table, LaunchTable};
pub use utils::error::{DashError, Result};
pub use web::{WebServer, WebServerConfig};
