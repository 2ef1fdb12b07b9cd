pub mod extractor;
pub mod fetcher;
pub mod notifier;
pub mod watcher;

pub use crate::domain::model::{CycleOutcome, Notification};
pub use crate::domain::ports::{Notifier, PageSource, QuantityExtractor};
pub use crate::utils::error::Result;
