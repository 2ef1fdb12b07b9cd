use crate::core::QuantityExtractor;
use crate::utils::error::{Result, WatchError};
use regex::Regex;

/// The TOEFL (iBT) label, then the nearest `<input ... id="Qty" ... value='N'>` after it.
const QTY_PATTERN: &str = r#"TOEFL\s*\(iBT\)[\s\S]*?<input[^>]+id="Qty"[^>]+value='(\d+)'"#;

#[derive(Debug, Clone)]
pub struct QtyFieldExtractor {
    pattern: Regex,
}

impl QtyFieldExtractor {
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(QTY_PATTERN).expect("quantity pattern is a valid regex"),
        }
    }
}

impl Default for QtyFieldExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl QuantityExtractor for QtyFieldExtractor {
    fn extract(&self, content: &str) -> Result<u64> {
        let digits = self
            .pattern
            .captures(content)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
            .ok_or(WatchError::QuantityNotFound)?;

        digits
            .parse::<u64>()
            .map_err(|source| WatchError::MalformedQuantity {
                value: digits.to_string(),
                source,
            })
    }
}
