use serde::{Deserialize, Serialize};

use super::product::{DietTag, Product};

/// Shopper preference steering the substitute rule between cheaper,
/// equivalent, and premium alternatives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueBias {
    Value,
    Balanced,
    Premium,
}

/// Shopper profile. Immutable input to every decision; the core never
/// mutates it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    /// Every tag listed here must be present on a product for it to pass.
    pub diet_tags: Vec<DietTag>,
    pub avoid_brands: Vec<String>,
    /// Allergen tags; a product carrying any of these is excluded.
    pub allergies: Vec<String>,
    pub value_bias: ValueBias,
}

impl UserProfile {
    pub fn new(id: impl Into<String>, value_bias: ValueBias) -> Self {
        Self {
            id: id.into(),
            diet_tags: Vec::new(),
            avoid_brands: Vec::new(),
            allergies: Vec::new(),
            value_bias,
        }
    }

    pub fn with_diet_tags(mut self, tags: Vec<DietTag>) -> Self {
        self.diet_tags = tags;
        self
    }

    pub fn with_avoid_brands(mut self, brands: Vec<String>) -> Self {
        self.avoid_brands = brands;
        self
    }

    pub fn with_allergies(mut self, allergies: Vec<String>) -> Self {
        self.allergies = allergies;
        self
    }

    /// Dietary-compliance predicate shared by every rule module: all diet
    /// tags present, brand not avoided, no allergen tag on the product.
    pub fn allows(&self, product: &Product) -> bool {
        let diet_ok = self.diet_tags.iter().all(|tag| product.diet_tags.contains(tag));
        let brand_ok = !self.avoid_brands.iter().any(|brand| brand == &product.brand);
        let allergy_ok =
            !self.allergies.iter().any(|allergen| product.tags.iter().any(|tag| tag == allergen));
        diet_ok && brand_ok && allergy_ok
    }
}
