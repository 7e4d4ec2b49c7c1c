//! Deterministic candidate scoring and ranking.
//!
//! The constants here were tuned by trial against demo sessions, so they
//! live in a named, overridable config rather than being derived.

use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use super::types::{NudgeCandidate, NudgeType};
use crate::domain::profile::{UserProfile, ValueBias};

/// Base weight per candidate type; the fixed priority table.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypeWeights {
    pub complement: f64,
    pub multibuy: f64,
    pub loyalty_points: f64,
    pub substitute: f64,
    pub mission: f64,
    pub trade_up: f64,
    pub stock_up: f64,
    pub store: f64,
    pub hold_off: f64,
}

impl Default for TypeWeights {
    fn default() -> Self {
        Self {
            complement: 7.0,
            multibuy: 6.0,
            loyalty_points: 4.0,
            substitute: 3.0,
            mission: 2.0,
            trade_up: 2.0,
            stock_up: 1.0,
            store: 1.0,
            hold_off: 0.0,
        }
    }
}

impl TypeWeights {
    pub fn for_type(&self, nudge_type: NudgeType) -> f64 {
        match nudge_type {
            NudgeType::Complement => self.complement,
            NudgeType::Multibuy => self.multibuy,
            NudgeType::LoyaltyPoints => self.loyalty_points,
            NudgeType::Substitute => self.substitute,
            NudgeType::Mission => self.mission,
            NudgeType::TradeUp => self.trade_up,
            NudgeType::StockUp => self.stock_up,
            NudgeType::Store => self.store,
            NudgeType::HoldOff => self.hold_off,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub type_weights: TypeWeights,
    /// Savings contribute `min(savings_cap, savings * savings_multiplier)`.
    pub savings_cap: f64,
    pub savings_multiplier: f64,
    /// Loyalty point bonuses are scaled and capped so that base weight
    /// plus cap stays below the complement and multibuy base weights:
    /// points can never dominate the type priority.
    pub points_cap: f64,
    pub points_scale: f64,
    pub points_scale_value_bias: f64,
    /// Value-bias shoppers get this on substitute and multibuy candidates.
    pub value_bias_bonus: f64,
    /// Bundles larger than this lose a point per extra product.
    pub bundle_size_allowance: usize,
    /// Subtracted from candidates sharing the previously served type.
    pub same_type_penalty: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            type_weights: TypeWeights::default(),
            savings_cap: 10.0,
            savings_multiplier: 2.0,
            points_cap: 2.0,
            points_scale: 0.02,
            points_scale_value_bias: 0.03,
            value_bias_bonus: 3.0,
            bundle_size_allowance: 2,
            same_type_penalty: 2.0,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Ranker {
    config: ScoringConfig,
}

impl Ranker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ScoringConfig) -> Self {
        Self { config }
    }

    /// Annotate every candidate with its score and sort best-first.
    /// The sort is stable, so ties keep generation order.
    pub fn rank(
        &self,
        mut candidates: Vec<NudgeCandidate>,
        profile: &UserProfile,
    ) -> Vec<NudgeCandidate> {
        for candidate in &mut candidates {
            candidate.score = Some(self.score(candidate, profile));
        }
        sort_by_score(&mut candidates);
        candidates
    }

    /// De-prioritize candidates sharing the previously served nudge type,
    /// then restore best-first order.
    pub fn apply_same_type_penalty(
        &self,
        mut candidates: Vec<NudgeCandidate>,
        previous: NudgeType,
    ) -> Vec<NudgeCandidate> {
        for candidate in &mut candidates {
            if candidate.nudge_type == previous {
                candidate.score =
                    Some(candidate.score.unwrap_or(0.0) - self.config.same_type_penalty);
            }
        }
        sort_by_score(&mut candidates);
        candidates
    }

    fn score(&self, candidate: &NudgeCandidate, profile: &UserProfile) -> f64 {
        let config = &self.config;
        let mut score = config.type_weights.for_type(candidate.nudge_type);

        let savings = candidate.savings.to_f64().unwrap_or(0.0);
        score += (savings * config.savings_multiplier).min(config.savings_cap);

        if candidate.nudge_type == NudgeType::LoyaltyPoints {
            let points = candidate
                .products
                .first()
                .and_then(|product| product.loyalty_bonus)
                .unwrap_or(0) as f64;
            let scale = if profile.value_bias == ValueBias::Value {
                config.points_scale_value_bias
            } else {
                config.points_scale
            };
            score += (points * scale).min(config.points_cap);
        }

        if profile.value_bias == ValueBias::Value
            && matches!(candidate.nudge_type, NudgeType::Substitute | NudgeType::Multibuy)
        {
            score += config.value_bias_bonus;
        }

        // Diversity: large bundles should not crowd out a focused nudge.
        let excess = candidate.products.len().saturating_sub(config.bundle_size_allowance);
        score -= excess as f64;

        score
    }
}

fn sort_by_score(candidates: &mut [NudgeCandidate]) {
    candidates.sort_by(|a, b| {
        b.score
            .unwrap_or(0.0)
            .partial_cmp(&a.score.unwrap_or(0.0))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::domain::product::{BrandTier, Product, Sku};

    fn product(loyalty_bonus: Option<u32>) -> Product {
        Product {
            sku: Sku::new("p"),
            name: "P".to_owned(),
            brand: "B".to_owned(),
            brand_tier: BrandTier::Standard,
            price: Decimal::ONE,
            diet_tags: vec![],
            tags: vec![],
            category: "food".to_owned(),
            sub_category: "misc".to_owned(),
            promo: None,
            perishable_days: None,
            loyalty_bonus,
        }
    }

    fn candidate(nudge_type: NudgeType, savings: Decimal, products: usize) -> NudgeCandidate {
        NudgeCandidate::new(
            nudge_type,
            "t",
            "r",
            std::iter::repeat_with(|| product(None)).take(products).collect(),
            savings,
        )
    }

    fn profile(bias: ValueBias) -> UserProfile {
        UserProfile::new("u", bias)
    }

    #[test]
    fn complement_outranks_lower_priority_types_at_equal_savings() {
        let ranker = Ranker::new();
        let ranked = ranker.rank(
            vec![
                candidate(NudgeType::StockUp, Decimal::ZERO, 1),
                candidate(NudgeType::Complement, Decimal::ZERO, 1),
                candidate(NudgeType::Multibuy, Decimal::ZERO, 1),
            ],
            &profile(ValueBias::Balanced),
        );
        assert_eq!(ranked[0].nudge_type, NudgeType::Complement);
        assert_eq!(ranked[1].nudge_type, NudgeType::Multibuy);
        assert_eq!(ranked[2].nudge_type, NudgeType::StockUp);
    }

    #[test]
    fn savings_contribution_is_capped() {
        let ranker = Ranker::new();
        let modest = ranker.rank(
            vec![candidate(NudgeType::Substitute, Decimal::new(200, 2), 1)],
            &profile(ValueBias::Balanced),
        );
        let huge = ranker.rank(
            vec![candidate(NudgeType::Substitute, Decimal::new(9900, 2), 1)],
            &profile(ValueBias::Balanced),
        );
        assert_eq!(modest[0].score, Some(3.0 + 4.0));
        // 99.00 * 2 caps at 10.
        assert_eq!(huge[0].score, Some(3.0 + 10.0));
    }

    #[test]
    fn value_bias_boosts_substitute_and_multibuy() {
        let ranker = Ranker::new();
        let ranked = ranker.rank(
            vec![
                candidate(NudgeType::Substitute, Decimal::ZERO, 1),
                candidate(NudgeType::Mission, Decimal::ZERO, 1),
            ],
            &profile(ValueBias::Value),
        );
        assert_eq!(ranked[0].nudge_type, NudgeType::Substitute);
        assert_eq!(ranked[0].score, Some(6.0));
        assert_eq!(ranked[1].score, Some(2.0));
    }

    #[test]
    fn loyalty_points_are_scaled_and_capped() {
        let ranker = Ranker::new();
        let mut loyal = candidate(NudgeType::LoyaltyPoints, Decimal::ZERO, 0);
        loyal.products = vec![product(Some(75))];
        let ranked = ranker.rank(vec![loyal], &profile(ValueBias::Balanced));
        // 4.0 base + 75 * 0.02, under the cap
        assert_eq!(ranked[0].score, Some(4.0 + 1.5));

        let mut maxed = candidate(NudgeType::LoyaltyPoints, Decimal::ZERO, 0);
        maxed.products = vec![product(Some(10_000))];
        let ranked = ranker.rank(vec![maxed], &profile(ValueBias::Value));
        assert_eq!(ranked[0].score, Some(4.0 + 2.0));
    }

    #[test]
    fn capped_loyalty_points_stay_below_higher_base_weights() {
        let ranker = Ranker::new();
        let mut maxed = candidate(NudgeType::LoyaltyPoints, Decimal::ZERO, 0);
        maxed.products = vec![product(Some(10_000))];
        let ranked = ranker.rank(
            vec![maxed, candidate(NudgeType::Complement, Decimal::ZERO, 1)],
            &profile(ValueBias::Value),
        );
        // Even a max-bonus loyalty candidate cannot outrank a complement
        // with no savings at all.
        assert_eq!(ranked[0].nudge_type, NudgeType::Complement);
        assert!(ranked[1].score < ranked[0].score);
    }

    #[test]
    fn large_bundles_lose_points() {
        let ranker = Ranker::new();
        let ranked = ranker.rank(
            vec![candidate(NudgeType::Complement, Decimal::ZERO, 4)],
            &profile(ValueBias::Balanced),
        );
        assert_eq!(ranked[0].score, Some(7.0 - 2.0));
    }

    #[test]
    fn ties_keep_generation_order() {
        let ranker = Ranker::new();
        let first = candidate(NudgeType::Mission, Decimal::ZERO, 1);
        let second = candidate(NudgeType::TradeUp, Decimal::ZERO, 1);
        let first_id = first.id.clone();
        let ranked = ranker.rank(vec![first, second], &profile(ValueBias::Balanced));
        assert_eq!(ranked[0].score, ranked[1].score);
        assert_eq!(ranked[0].id, first_id);
    }

    #[test]
    fn same_type_penalty_reorders() {
        let ranker = Ranker::new();
        let ranked = ranker.rank(
            vec![
                candidate(NudgeType::Complement, Decimal::ZERO, 1),
                candidate(NudgeType::Multibuy, Decimal::ZERO, 1),
            ],
            &profile(ValueBias::Balanced),
        );
        let reranked = ranker.apply_same_type_penalty(ranked, NudgeType::Complement);
        assert_eq!(reranked[0].nudge_type, NudgeType::Multibuy);
        assert_eq!(reranked[1].score, Some(5.0));
    }
}
