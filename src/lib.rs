pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::CliArgs;

pub use crate::config::{smtp::SmtpConfig, WatchConfig};
pub use crate::core::{
    extractor::QtyFieldExtractor, fetcher::HttpPageSource, notifier::SmtpNotifier,
    watcher::Watcher,
};
pub use crate::utils::error::{Result, WatchError};
