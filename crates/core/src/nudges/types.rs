//! Candidate types shared by the generator, ranker, throttle, and the
//! remote reranking boundary.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::product::Product;

/// Closed set of nudge kinds. Rules map one-to-one onto these.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NudgeType {
    Complement,
    Multibuy,
    Substitute,
    Mission,
    TradeUp,
    StockUp,
    HoldOff,
    LoyaltyPoints,
    Store,
}

impl NudgeType {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Complement => "complement",
            Self::Multibuy => "multibuy",
            Self::Substitute => "substitute",
            Self::Mission => "mission",
            Self::TradeUp => "trade-up",
            Self::StockUp => "stock-up",
            Self::HoldOff => "hold-off",
            Self::LoyaltyPoints => "loyalty points",
            Self::Store => "store",
        }
    }
}

/// A generated, not-yet-served nudge proposal. Ephemeral: recomputed on
/// every scan, never persisted, and never mutated after creation except
/// for the ranker's score annotation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NudgeCandidate {
    /// Unique per generation; never reused within a session.
    pub id: String,
    #[serde(rename = "type")]
    pub nudge_type: NudgeType,
    pub title: String,
    pub reason: String,
    /// Involved products, 1..N, already dietary-filtered by the rule.
    pub products: Vec<Product>,
    /// Monetary saving, always >= 0.
    pub savings: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl NudgeCandidate {
    pub fn new(
        nudge_type: NudgeType,
        title: impl Into<String>,
        reason: impl Into<String>,
        products: Vec<Product>,
        savings: Decimal,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            nudge_type,
            title: title.into(),
            reason: reason.into(),
            products,
            savings: savings.max(Decimal::ZERO),
            score: None,
        }
    }
}
