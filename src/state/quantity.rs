use std::collections::HashMap;

use super::data::ProductId;

/// Consumed quantities keyed by product id.
///
/// Products without an entry have quantity zero. The map is independent of
/// which products are currently visible.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuantityMap {
    entries: HashMap<ProductId, u32>,
}

impl QuantityMap {
    /// Quantity for `id`, zero if never set
    pub fn get(&self, id: &ProductId) -> u32 {
        self.entries.get(id).copied().unwrap_or(0)
    }

    /// Return a new map where only `id` is replaced by the parsed `raw` value.
    ///
    /// Non-numeric input becomes zero and negative input clamps to zero.
    pub fn with_raw(&self, id: &ProductId, raw: &str) -> QuantityMap {
        self.with_quantity(id, parse_quantity(raw))
    }

    /// Return a new map where only `id` is replaced by `quantity`
    pub fn with_quantity(&self, id: &ProductId, quantity: u32) -> QuantityMap {
        let mut next = self.clone();
        if quantity == 0 {
            next.entries.remove(id);
        } else {
            next.entries.insert(id.clone(), quantity);
        }
        next
    }
}

/// Parse user input as a non-negative integer quantity.
///
/// Reads an optional sign and the leading run of digits, ignoring
/// surrounding whitespace and anything after the digits ("12abc" is 12,
/// "3.7" is 3). No digits means zero, a negative value clamps to zero and
/// values past `u32::MAX` saturate.
pub fn parse_quantity(raw: &str) -> u32 {
    let trimmed = raw.trim();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let mut value: u32 = 0;
    let mut seen_digit = false;
    for c in digits.chars() {
        let Some(digit) = c.to_digit(10) else { break };
        seen_digit = true;
        value = value.saturating_mul(10).saturating_add(digit);
    }

    if !seen_digit || negative {
        0
    } else {
        value
    }
}
