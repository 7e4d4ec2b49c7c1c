use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::product::Sku;
use crate::nudges::NudgeType;

/// One basket line: SKU plus positive quantity. The basket is an
/// unordered multiset keyed by SKU; callers normalize duplicate lines.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasketItem {
    pub sku: Sku,
    pub qty: u32,
}

/// A scanned product. The session scan log is append-only.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanEvent {
    pub sku: Sku,
    pub timestamp: DateTime<Utc>,
}

impl ScanEvent {
    pub fn now(sku: Sku) -> Self {
        Self { sku, timestamp: Utc::now() }
    }
}

/// Per-trip session state. Created empty at session start, mutated only by
/// the nudge engine and caller basket edits, discarded when the trip ends.
/// No persistence across sessions.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SessionContext {
    pub basket: Vec<BasketItem>,
    pub scans: Vec<ScanEvent>,
    /// Ids of candidates already served, for the no-repeat rule.
    pub nudge_history: Vec<String>,
    /// Scan count at the moment the last nudge was served.
    pub last_nudge_scan_index: Option<usize>,
    /// Type of the last served nudge, for same-type de-prioritization.
    pub last_nudge_type: Option<NudgeType>,
    /// Optional wall-clock hint ("HH:MM") for the store/time rule.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_of_day: Option<String>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_time_of_day(mut self, time: impl Into<String>) -> Self {
        self.time_of_day = Some(time.into());
        self
    }

    /// Add `qty` of a SKU, merging into an existing line when present.
    pub fn add_to_basket(&mut self, sku: Sku, qty: u32) {
        if let Some(line) = self.basket.iter_mut().find(|line| line.sku == sku) {
            line.qty += qty;
        } else {
            self.basket.push(BasketItem { sku, qty });
        }
    }

    /// Remove up to `qty` of a SKU; the line disappears when it hits zero.
    pub fn remove_from_basket(&mut self, sku: &Sku, qty: u32) {
        if let Some(position) = self.basket.iter().position(|line| &line.sku == sku) {
            let line = &mut self.basket[position];
            line.qty = line.qty.saturating_sub(qty);
            if line.qty == 0 {
                self.basket.remove(position);
            }
        }
    }

    pub fn last_scan(&self) -> Option<&ScanEvent> {
        self.scans.last()
    }

    pub fn basket_skus(&self) -> impl Iterator<Item = &Sku> {
        self.basket.iter().map(|line| &line.sku)
    }

    pub fn basket_contains(&self, sku: &Sku) -> bool {
        self.basket.iter().any(|line| &line.sku == sku)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_merges_existing_lines() {
        let mut session = SessionContext::new();
        session.add_to_basket(Sku::new("a"), 1);
        session.add_to_basket(Sku::new("a"), 2);
        assert_eq!(session.basket.len(), 1);
        assert_eq!(session.basket[0].qty, 3);
    }

    #[test]
    fn remove_drops_emptied_lines() {
        let mut session = SessionContext::new();
        session.add_to_basket(Sku::new("a"), 2);
        session.remove_from_basket(&Sku::new("a"), 1);
        assert_eq!(session.basket[0].qty, 1);
        session.remove_from_basket(&Sku::new("a"), 5);
        assert!(session.basket.is_empty());
    }
}
