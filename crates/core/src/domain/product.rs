use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Stock-keeping unit identifier, the primary catalog key.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Sku(pub String);

impl Sku {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Sku {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DietTag {
    Vegetarian,
    Vegan,
    Halal,
    Kosher,
    GlutenFree,
}

/// Where a brand sits in the range ladder. Drives the premium-bias
/// substitute filter and the trade-up rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrandTier {
    Budget,
    Standard,
    Premium,
}

/// Active promotion on a product. At most one per product.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PromoMeta {
    /// Group deal: buy `threshold` across the group for `deal_price` total.
    Multibuy { group_id: String, threshold: u32, deal_price: Decimal },
    /// Straight discount, optionally grouped for display.
    PriceDrop {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        group_id: Option<String>,
        value: Decimal,
    },
    /// Discounted price when paying with the loyalty points card.
    Loyalty { points_price: Decimal, in_stock: bool },
}

impl PromoMeta {
    pub fn multibuy_group(&self) -> Option<&str> {
        match self {
            Self::Multibuy { group_id, .. } => Some(group_id),
            _ => None,
        }
    }

    /// Points-card price, if this promo carries one.
    pub fn points_price(&self) -> Option<Decimal> {
        match self {
            Self::Loyalty { points_price, .. } => Some(*points_price),
            _ => None,
        }
    }
}

/// Immutable catalog record. Owned by the catalog store once loaded.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub sku: Sku,
    pub name: String,
    pub brand: String,
    pub brand_tier: BrandTier,
    pub price: Decimal,
    pub diet_tags: Vec<DietTag>,
    /// Free-form tags; allergen matching reads these.
    pub tags: Vec<String>,
    pub category: String,
    pub sub_category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promo: Option<PromoMeta>,
    /// Approximate days until expiry, for the hold-off heuristic.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub perishable_days: Option<u32>,
    /// Bonus points earned when bought, read by the loyalty rule and ranker.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loyalty_bonus: Option<u32>,
}

impl Product {
    /// List price unless a points-card price undercuts it.
    pub fn effective_price(&self) -> Decimal {
        self.promo
            .as_ref()
            .and_then(PromoMeta::points_price)
            .filter(|points| *points < self.price)
            .unwrap_or(self.price)
    }

    /// Saving a loyalty-price promo yields against the list price, if any.
    pub fn loyalty_saving(&self) -> Decimal {
        match self.promo.as_ref().and_then(PromoMeta::points_price) {
            Some(points) if points < self.price => self.price - points,
            _ => Decimal::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product_with_promo(price: Decimal, promo: Option<PromoMeta>) -> Product {
        Product {
            sku: Sku::new("test-sku"),
            name: "Test".to_owned(),
            brand: "Brand".to_owned(),
            brand_tier: BrandTier::Standard,
            price,
            diet_tags: vec![],
            tags: vec![],
            category: "food".to_owned(),
            sub_category: "misc".to_owned(),
            promo,
            perishable_days: None,
            loyalty_bonus: None,
        }
    }

    #[test]
    fn effective_price_prefers_lower_points_price() {
        let product = product_with_promo(
            Decimal::new(300, 2),
            Some(PromoMeta::Loyalty { points_price: Decimal::new(250, 2), in_stock: true }),
        );
        assert_eq!(product.effective_price(), Decimal::new(250, 2));
        assert_eq!(product.loyalty_saving(), Decimal::new(50, 2));
    }

    #[test]
    fn effective_price_ignores_points_price_above_list() {
        let product = product_with_promo(
            Decimal::new(200, 2),
            Some(PromoMeta::Loyalty { points_price: Decimal::new(250, 2), in_stock: true }),
        );
        assert_eq!(product.effective_price(), Decimal::new(200, 2));
        assert_eq!(product.loyalty_saving(), Decimal::ZERO);
    }
}
