//! Rule-based candidate generation.
//!
//! Each rule is an independent pure function over session, profile, and
//! basket facts; the generator invokes them in a fixed, documented order
//! and concatenates their output without deduplication. The ranker and
//! throttle handle downstream reduction.
//!
//! Every rule applies the shared dietary predicate (`UserProfile::allows`)
//! before a product can enter a candidate: no candidate ever surfaces a
//! product the profile excludes.

use std::collections::HashSet;

use rust_decimal::Decimal;
use tracing::debug;

use super::types::{NudgeCandidate, NudgeType};
use crate::basket::BasketAnalyzer;
use crate::catalog::CatalogStore;
use crate::domain::product::{BrandTier, Product, Sku};
use crate::domain::profile::{UserProfile, ValueBias};
use crate::domain::session::SessionContext;

/// Mission candidates reference at most this many missing products.
const MISSION_PRODUCT_CAP: usize = 3;
/// Hold-off fires once this many perishable units are in the basket.
const HOLDOFF_PERISHABLE_QTY: u32 = 3;
/// "Short shelf life" cut-off in days for the hold-off rule.
const HOLDOFF_SOON_DAYS: u32 = 3;
/// Hold-off candidates reference at most this many basket perishables.
const HOLDOFF_PRODUCT_CAP: usize = 2;
/// Morning window (inclusive hours) for the store/time rule.
const MORNING_WINDOW: (u32, u32) = (7, 10);
/// Value-bias substitutes must undercut the original by at least 10%.
const VALUE_BIAS_PRICE_RATIO: Decimal = Decimal::from_parts(90, 0, 0, false, 2);

pub struct CandidateGenerator<'a> {
    catalog: &'a CatalogStore,
    analyzer: BasketAnalyzer<'a>,
}

impl<'a> CandidateGenerator<'a> {
    pub fn new(catalog: &'a CatalogStore) -> Self {
        Self { catalog, analyzer: BasketAnalyzer::new(catalog) }
    }

    /// Run every rule against the current session state. Output order is
    /// the fixed rule order; within the ranker, ties keep this order.
    pub fn generate(&self, session: &SessionContext, profile: &UserProfile) -> Vec<NudgeCandidate> {
        let basket_skus: HashSet<&Sku> =
            session.basket_skus().map(|sku| self.catalog.canonical(sku)).collect();
        let last_scan = session.last_scan().map(|event| event.sku.clone());

        let mut candidates = Vec::new();
        if let Some(last) = &last_scan {
            candidates.extend(self.complement(last, profile, &basket_skus));
            candidates.extend(self.substitute(last, profile, &basket_skus));
            candidates.extend(self.trade_up(last, profile, &basket_skus));
        }
        candidates.extend(self.multibuy(session, profile, last_scan.as_ref()));
        candidates.extend(self.mission(profile, &basket_skus));
        candidates.extend(self.hold_off(session, profile));
        candidates.extend(self.stock_up(profile, &basket_skus));
        candidates.extend(self.store_time(session, profile));
        candidates.extend(self.loyalty_points(profile, &basket_skus));

        debug!(count = candidates.len(), "generated nudge candidates");
        candidates
    }

    fn in_basket(&self, basket_skus: &HashSet<&Sku>, product: &Product) -> bool {
        basket_skus.contains(&product.sku)
    }

    /// Complement: bundle the last scan's fixed complement list, minus
    /// basket members, dietary-filtered. Savings sum loyalty discounts.
    fn complement(
        &self,
        last: &Sku,
        profile: &UserProfile,
        basket_skus: &HashSet<&Sku>,
    ) -> Option<NudgeCandidate> {
        let products: Vec<Product> = self
            .catalog
            .complements_of(last)
            .iter()
            .filter_map(|sku| self.catalog.lookup(sku))
            .filter(|product| !self.in_basket(basket_skus, product))
            .filter(|product| profile.allows(product))
            .cloned()
            .collect();
        if products.is_empty() {
            return None;
        }
        let savings: Decimal = products.iter().map(Product::loyalty_saving).sum();
        Some(NudgeCandidate::new(
            NudgeType::Complement,
            "Perfect pairing",
            "Add the missing piece to complete your meal.",
            products,
            savings,
        ))
    }

    /// Substitute within the scanned product's sub-category, steered by the
    /// profile's value bias; the cheapest effective price wins.
    fn substitute(
        &self,
        last: &Sku,
        profile: &UserProfile,
        basket_skus: &HashSet<&Sku>,
    ) -> Option<NudgeCandidate> {
        let original = self.catalog.lookup(last)?;
        let loyalty_undercuts = |option: &Product| {
            option
                .promo
                .as_ref()
                .and_then(|promo| promo.points_price())
                .is_some_and(|points| points < original.price)
        };

        let best = self
            .catalog
            .products()
            .filter(|option| option.sku != original.sku)
            .filter(|option| option.sub_category == original.sub_category)
            .filter(|option| !self.in_basket(basket_skus, option))
            .filter(|option| profile.allows(option))
            .filter(|option| match profile.value_bias {
                ValueBias::Value => {
                    loyalty_undercuts(option)
                        || option.price <= original.price * VALUE_BIAS_PRICE_RATIO
                }
                ValueBias::Premium => {
                    option.price > original.price && option.brand_tier != BrandTier::Budget
                }
                ValueBias::Balanced => {
                    option.price <= original.price || loyalty_undercuts(option)
                }
            })
            .min_by(|a, b| {
                a.effective_price()
                    .cmp(&b.effective_price())
                    .then_with(|| a.sku.cmp(&b.sku))
            })?;

        let saving = (original.price - best.effective_price()).max(Decimal::ZERO);
        Some(NudgeCandidate::new(
            NudgeType::Substitute,
            "Smart swap",
            "Switch to save without compromise.",
            vec![best.clone()],
            saving,
        ))
    }

    /// Trade-up: the priciest premium-range alternative in the same
    /// category. An upsell, so savings stay at zero.
    fn trade_up(
        &self,
        last: &Sku,
        profile: &UserProfile,
        basket_skus: &HashSet<&Sku>,
    ) -> Option<NudgeCandidate> {
        let base = self.catalog.lookup(last)?;
        let best = self
            .catalog
            .products()
            .filter(|option| option.sku != base.sku)
            .filter(|option| option.category == base.category)
            .filter(|option| option.price > base.price)
            .filter(|option| option.brand_tier == BrandTier::Premium)
            .filter(|option| !self.in_basket(basket_skus, option))
            .filter(|option| profile.allows(option))
            .max_by(|a, b| a.price.cmp(&b.price).then_with(|| b.sku.cmp(&a.sku)))?;

        Some(NudgeCandidate::new(
            NudgeType::TradeUp,
            "Treat yourself",
            format!("Upgrade to {} for a little extra.", best.name),
            vec![best.clone()],
            Decimal::ZERO,
        ))
    }

    /// Multibuy: one candidate per group that is exactly one item short.
    /// Prefer the group member matching the last scan, else the cheapest
    /// compliant member.
    fn multibuy(
        &self,
        session: &SessionContext,
        profile: &UserProfile,
        last_scan: Option<&Sku>,
    ) -> Vec<NudgeCandidate> {
        let last_canonical = last_scan.map(|sku| self.catalog.canonical(sku));
        let mut candidates = Vec::new();
        for gap in self.analyzer.one_away_from_multibuy(&session.basket) {
            let members = self.catalog.multibuy_group_members(&gap.group_id);
            let compliant: Vec<&&Product> =
                members.iter().filter(|member| profile.allows(member)).collect();
            let pick = compliant
                .iter()
                .find(|member| Some(&member.sku) == last_canonical)
                .or_else(|| {
                    compliant.iter().min_by(|a, b| {
                        a.price.cmp(&b.price).then_with(|| a.sku.cmp(&b.sku))
                    })
                });
            let Some(product) = pick else { continue };

            candidates.push(NudgeCandidate::new(
                NudgeType::Multibuy,
                "Almost there",
                format!("Add 1 more to unlock {:.2} in savings.", gap.potential_saving),
                vec![(**product).clone()],
                gap.potential_saving,
            ));
        }
        candidates
    }

    /// Mission: recipes that are started but unfinished suggest the
    /// missing compliant items, capped at three.
    fn mission(&self, profile: &UserProfile, basket_skus: &HashSet<&Sku>) -> Vec<NudgeCandidate> {
        let mut candidates = Vec::new();
        for (name, required) in self.catalog.mission_recipes() {
            let present = required.iter().filter(|sku| basket_skus.contains(sku)).count();
            if present == 0 || present == required.len() {
                continue;
            }
            let missing: Vec<Product> = required
                .iter()
                .filter(|sku| !basket_skus.contains(sku))
                .filter_map(|sku| self.catalog.lookup(sku))
                .filter(|product| profile.allows(product))
                .take(MISSION_PRODUCT_CAP)
                .cloned()
                .collect();
            if missing.is_empty() {
                continue;
            }
            let savings: Decimal = missing.iter().map(Product::loyalty_saving).sum();
            candidates.push(NudgeCandidate::new(
                NudgeType::Mission,
                "Finish your recipe",
                format!("Complete {} with these picks.", name.replace('_', " ")),
                missing,
                savings,
            ));
        }
        candidates
    }

    /// Hold-off: the only rule that discourages a purchase. Fires when the
    /// basket already carries enough perishables and at least one is close
    /// to expiry.
    fn hold_off(&self, session: &SessionContext, profile: &UserProfile) -> Option<NudgeCandidate> {
        let expanded = self.analyzer.expand(&session.basket);
        let perishables: Vec<&&Product> =
            expanded.iter().filter(|product| product.perishable_days.is_some()).collect();
        let total_qty = perishables.len() as u32;
        let soon_expiring = perishables
            .iter()
            .any(|product| product.perishable_days.is_some_and(|days| days <= HOLDOFF_SOON_DAYS));
        if total_qty < HOLDOFF_PERISHABLE_QTY || !soon_expiring {
            return None;
        }

        // Reference distinct basket perishables the profile can see.
        let mut seen = HashSet::new();
        let products: Vec<Product> = perishables
            .iter()
            .filter(|product| seen.insert(&product.sku))
            .filter(|product| profile.allows(product))
            .take(HOLDOFF_PRODUCT_CAP)
            .map(|product| (**product).clone())
            .collect();
        if products.is_empty() {
            return None;
        }

        Some(NudgeCandidate::new(
            NudgeType::HoldOff,
            "Quick heads up",
            "You already have items expiring soon; avoid overbuying.",
            products,
            Decimal::ZERO,
        ))
    }

    /// Stock-up: a designated small pack in the basket suggests its bulk
    /// counterpart.
    fn stock_up(
        &self,
        profile: &UserProfile,
        basket_skus: &HashSet<&Sku>,
    ) -> Vec<NudgeCandidate> {
        let mut candidates = Vec::new();
        let mut small_packs: Vec<&&Sku> = basket_skus.iter().collect();
        small_packs.sort();
        for small in small_packs {
            let Some(bulk) = self.catalog.bulk_pack_for(small) else { continue };
            let Some(product) = self.catalog.lookup(bulk) else { continue };
            if self.in_basket(basket_skus, product) || !profile.allows(product) {
                continue;
            }
            candidates.push(NudgeCandidate::new(
                NudgeType::StockUp,
                "Stock up",
                "Bigger pack, fewer trips.",
                vec![product.clone()],
                Decimal::ZERO,
            ));
        }
        candidates
    }

    /// Store/time: the fixed breakfast bundle during the morning window.
    fn store_time(
        &self,
        session: &SessionContext,
        profile: &UserProfile,
    ) -> Option<NudgeCandidate> {
        let hour = session
            .time_of_day
            .as_deref()
            .and_then(|time| time.split(':').next())
            .and_then(|hour| hour.parse::<u32>().ok())?;
        if hour < MORNING_WINDOW.0 || hour > MORNING_WINDOW.1 {
            return None;
        }
        let products: Vec<Product> = self
            .catalog
            .breakfast_bundle()
            .iter()
            .filter_map(|sku| self.catalog.lookup(sku))
            .filter(|product| profile.allows(product))
            .take(MISSION_PRODUCT_CAP)
            .cloned()
            .collect();
        if products.is_empty() {
            return None;
        }
        Some(NudgeCandidate::new(
            NudgeType::Store,
            "Morning picks",
            "Fuel up with these breakfast favourites.",
            products,
            Decimal::ZERO,
        ))
    }

    /// Loyalty points: for value-minded shoppers, the highest point bonus
    /// in the catalog that is not already in the basket. The value is the
    /// points themselves, carried on the product for the ranker to read.
    fn loyalty_points(
        &self,
        profile: &UserProfile,
        basket_skus: &HashSet<&Sku>,
    ) -> Option<NudgeCandidate> {
        if !matches!(profile.value_bias, ValueBias::Value | ValueBias::Balanced) {
            return None;
        }
        let best = self
            .catalog
            .products()
            .filter(|product| product.loyalty_bonus.unwrap_or(0) > 0)
            .filter(|product| !self.in_basket(basket_skus, product))
            .filter(|product| profile.allows(product))
            .max_by(|a, b| {
                a.loyalty_bonus
                    .cmp(&b.loyalty_bonus)
                    .then_with(|| b.sku.cmp(&a.sku))
            })?;
        let bonus = best.loyalty_bonus.unwrap_or(0);
        Some(NudgeCandidate::new(
            NudgeType::LoyaltyPoints,
            format!("{bonus} bonus points await"),
            format!("Add {} to your basket.", best.name),
            vec![best.clone()],
            Decimal::ZERO,
        ))
    }
}
