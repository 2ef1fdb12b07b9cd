use crate::domain::model::Notification;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Supplies the raw page content for one cycle.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch(&self) -> Result<String>;
}

pub trait QuantityExtractor: Send + Sync {
    fn extract(&self, content: &str) -> Result<u64>;
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, message: &Notification) -> Result<()>;
}
