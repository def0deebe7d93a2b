pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::app::{build_monitor, build_monitor_with_sender};
pub use crate::config::{cli::LocalStorage, toml_config::MonitorConfig};
pub use crate::core::monitor::{MonitorSettings, PassOutcome, PassSummary, PriceMonitor};
pub use crate::utils::error::{FetchError, MonitorError, Result};
