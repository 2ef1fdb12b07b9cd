use crate::core::{CycleOutcome, Notification, Notifier, PageSource, QuantityExtractor};
use crate::utils::error::Result;
use std::time::Duration;

pub const NOTIFY_SUBJECT: &str = "TOEFL iBT AVAILABLE";

pub fn availability_notification(recipient: &str, quantity: u64, url: &str) -> Notification {
    Notification {
        recipient: recipient.to_string(),
        subject: NOTIFY_SUBJECT.to_string(),
        body: format!(
            "Good news!\n\nTOEFL iBT capacity is now {}.\n\n{}",
            quantity, url
        ),
    }
}

/// Wall-clock time of the next check, or `None` when it is past what chrono can represent.
fn next_check_at(interval: Duration) -> Option<chrono::DateTime<chrono::Local>> {
    let delta = chrono::Duration::from_std(interval).ok()?;
    chrono::Local::now().checked_add_signed(delta)
}

/// Drives fetch → extract → notify once per interval.
pub struct Watcher<S: PageSource, E: QuantityExtractor, N: Notifier> {
    source: S,
    extractor: E,
    notifier: N,
    check_url: String,
    recipient: String,
    interval: Duration,
}

impl<S: PageSource, E: QuantityExtractor, N: Notifier> Watcher<S, E, N> {
    pub fn new(
        source: S,
        extractor: E,
        notifier: N,
        check_url: impl Into<String>,
        recipient: impl Into<String>,
        interval: Duration,
    ) -> Self {
        Self {
            source,
            extractor,
            notifier,
            check_url: check_url.into(),
            recipient: recipient.into(),
            interval,
        }
    }

    /// One check. Notifies at most once, and only for a positive quantity.
    pub async fn run_cycle(&self) -> Result<CycleOutcome> {
        let content = self.source.fetch().await?;
        let quantity = self.extractor.extract(&content)?;
        tracing::info!("TOEFL iBT Qty: {}", quantity);

        if quantity == 0 {
            return Ok(CycleOutcome::Unavailable);
        }

        let notification = availability_notification(&self.recipient, quantity, &self.check_url);
        self.notifier.notify(&notification).await?;
        tracing::info!("📧 Notification email sent to {}", self.recipient);

        Ok(CycleOutcome::Notified { quantity })
    }

    /// Runs a cycle and logs whatever happened. Never propagates cycle errors.
    async fn run_logged_cycle(&self) -> Option<CycleOutcome> {
        match self.run_cycle().await {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                tracing::error!("❌ Check failed ({:?}): {}", e.category(), e);
                tracing::debug!("💡 {}", e.recovery_suggestion());
                None
            }
        }
    }

    async fn sleep_until_next_check(&self) {
        match next_check_at(self.interval) {
            Some(next) => tracing::debug!("Next check at {}", next.format("%Y-%m-%d %H:%M:%S")),
            None => tracing::debug!("Next check in {:?}", self.interval),
        }
        tokio::time::sleep(self.interval).await;
    }

    /// Runs `cycles` checks, sleeping the interval after each, and returns the per-cycle results.
    pub async fn run_cycles(&self, cycles: usize) -> Vec<Option<CycleOutcome>> {
        let mut outcomes = Vec::with_capacity(cycles);
        for i in 0..cycles {
            outcomes.push(self.run_logged_cycle().await);
            if i + 1 < cycles {
                self.sleep_until_next_check().await;
            }
        }
        outcomes
    }

    pub async fn run(&self) {
        tracing::info!(
            "🚀 TOEFL iBT watcher started (every {:?}): {}",
            self.interval,
            self.check_url
        );
        loop {
            self.run_logged_cycle().await;
            self.sleep_until_next_check().await;
        }
    }
}
