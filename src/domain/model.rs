/// One outgoing email. Built fresh for every send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

/// Result of a cycle that got as far as reading the quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    Unavailable,
    Notified { quantity: u64 },
}
