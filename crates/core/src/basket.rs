//! Basket-level facts derived from raw basket lines: the expanded product
//! list, per-group multibuy counts, and "one item away" gap detection.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::CatalogStore;
use crate::domain::product::{Product, PromoMeta};
use crate::domain::session::BasketItem;

/// Used when a multibuy promo carries no usable threshold.
pub const DEFAULT_MULTIBUY_THRESHOLD: u32 = 2;

/// A multibuy group in the basket that is exactly one item short of the
/// next full set.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MultibuyGap {
    pub group_id: String,
    pub needed: u32,
    pub potential_saving: Decimal,
}

pub struct BasketAnalyzer<'a> {
    catalog: &'a CatalogStore,
}

impl<'a> BasketAnalyzer<'a> {
    pub fn new(catalog: &'a CatalogStore) -> Self {
        Self { catalog }
    }

    /// Each SKU's product record repeated `qty` times. Unknown SKUs are
    /// silently excluded, not an error.
    pub fn expand(&self, basket: &[BasketItem]) -> Vec<&'a Product> {
        basket
            .iter()
            .filter_map(|line| self.catalog.lookup(&line.sku).map(|product| (product, line.qty)))
            .flat_map(|(product, qty)| std::iter::repeat(product).take(qty as usize))
            .collect()
    }

    /// Count of expanded products whose active multibuy promo has the
    /// given group id.
    pub fn count_in_group(&self, basket: &[BasketItem], group_id: &str) -> usize {
        self.expand(basket)
            .iter()
            .filter(|product| {
                product.promo.as_ref().and_then(PromoMeta::multibuy_group) == Some(group_id)
            })
            .count()
    }

    /// For every multibuy group represented in the basket, report the gap
    /// only when exactly one more item completes a set. Two or more items
    /// short is not worth a nudge.
    ///
    /// Saving estimate: average unit price of the group's basket members
    /// times the threshold is the regular cost of a full set; the group's
    /// minimum deal price replaces it when lower. Rounded to 2 dp.
    pub fn one_away_from_multibuy(&self, basket: &[BasketItem]) -> Vec<MultibuyGap> {
        struct GroupTally {
            count: u32,
            threshold: u32,
            prices: Vec<Decimal>,
            deal_price: Decimal,
        }

        // BTreeMap keeps group output order stable across runs.
        let mut groups: BTreeMap<String, GroupTally> = BTreeMap::new();
        for product in self.expand(basket) {
            let Some(PromoMeta::Multibuy { group_id, threshold, deal_price }) =
                product.promo.as_ref()
            else {
                continue;
            };
            let threshold =
                if *threshold == 0 { DEFAULT_MULTIBUY_THRESHOLD } else { *threshold };
            let tally = groups.entry(group_id.clone()).or_insert(GroupTally {
                count: 0,
                threshold,
                prices: Vec::new(),
                deal_price: *deal_price,
            });
            tally.count += 1;
            tally.prices.push(product.price);
            // Prefer the smallest deal price when it varies across members.
            if *deal_price > Decimal::ZERO
                && (tally.deal_price == Decimal::ZERO || *deal_price < tally.deal_price)
            {
                tally.deal_price = *deal_price;
            }
        }

        let mut gaps = Vec::new();
        for (group_id, tally) in groups {
            let remainder = tally.count % tally.threshold;
            if remainder == 0 {
                continue;
            }
            let needed = tally.threshold - remainder;
            if needed != 1 {
                continue;
            }

            let avg_price = if tally.prices.is_empty() {
                Decimal::ZERO
            } else {
                tally.prices.iter().copied().sum::<Decimal>()
                    / Decimal::from(tally.prices.len() as u64)
            };
            let regular_cost = avg_price * Decimal::from(tally.threshold);
            let deal_cost = if tally.deal_price > Decimal::ZERO && tally.deal_price < regular_cost
            {
                tally.deal_price
            } else {
                regular_cost
            };
            let saving = (regular_cost - deal_cost).max(Decimal::ZERO).round_dp(2);

            gaps.push(MultibuyGap { group_id, needed, potential_saving: saving });
        }
        gaps
    }
}
