//! Deterministic seed dataset for the in-memory catalog.
//!
//! Prices are stored as integer pence and converted to `Decimal` at build
//! time. The set is small but covers every rule's trigger surface: fixed
//! complements, a multibuy group, loyalty prices and point bonuses,
//! perishables, a bulk-pack pair, and a premium range for trade-ups.

use crate::domain::product::{BrandTier, DietTag};

#[derive(Clone, Copy, Debug)]
pub(super) enum PromoSeed {
    Multibuy { group: &'static str, threshold: u32, deal_pence: i64 },
    PriceDrop { pence: i64 },
    Loyalty { points_pence: i64 },
}

#[derive(Clone, Copy, Debug)]
pub(super) struct ProductSeed {
    pub sku: &'static str,
    pub name: &'static str,
    pub brand: &'static str,
    pub tier: BrandTier,
    pub price_pence: i64,
    pub diet: &'static [DietTag],
    pub tags: &'static [&'static str],
    pub category: &'static str,
    pub sub_category: &'static str,
    pub promo: Option<PromoSeed>,
    pub perishable_days: Option<u32>,
    pub loyalty_bonus: Option<u32>,
}

const VEG: &[DietTag] = &[DietTag::Vegetarian];
const VEGAN: &[DietTag] = &[DietTag::Vegetarian, DietTag::Vegan];
const VEGAN_GF: &[DietTag] = &[DietTag::Vegetarian, DietTag::Vegan, DietTag::GlutenFree];

pub(super) const PRODUCT_SEEDS: &[ProductSeed] = &[
    ProductSeed {
        sku: "pasta-500g",
        name: "Penne Pasta 500g",
        brand: "Harvest Mills",
        tier: BrandTier::Standard,
        price_pence: 125,
        diet: VEGAN,
        tags: &["gluten"],
        category: "food",
        sub_category: "pasta",
        promo: None,
        perishable_days: None,
        loyalty_bonus: None,
    },
    ProductSeed {
        sku: "spaghetti-500g",
        name: "Spaghetti 500g",
        brand: "Savers Own",
        tier: BrandTier::Budget,
        price_pence: 95,
        diet: VEGAN,
        tags: &["gluten"],
        category: "food",
        sub_category: "pasta",
        promo: None,
        perishable_days: None,
        loyalty_bonus: None,
    },
    ProductSeed {
        sku: "rigatoni-bronze-500g",
        name: "Bronze-Cut Rigatoni 500g",
        brand: "Maestro Reserve",
        tier: BrandTier::Premium,
        price_pence: 280,
        diet: VEGAN,
        tags: &["gluten"],
        category: "food",
        sub_category: "pasta",
        promo: None,
        perishable_days: None,
        loyalty_bonus: None,
    },
    ProductSeed {
        sku: "pasta-sauce-350g",
        name: "Tomato & Basil Sauce 350g",
        brand: "Harvest Mills",
        tier: BrandTier::Standard,
        price_pence: 180,
        diet: VEGAN,
        tags: &[],
        category: "food",
        sub_category: "sauces",
        promo: Some(PromoSeed::Loyalty { points_pence: 150 }),
        perishable_days: None,
        loyalty_bonus: None,
    },
    ProductSeed {
        sku: "parmesan-180g",
        name: "Parmesan Wedge 180g",
        brand: "Alpina",
        tier: BrandTier::Standard,
        price_pence: 250,
        diet: VEG,
        tags: &["milk"],
        category: "food",
        sub_category: "cheese",
        promo: None,
        perishable_days: Some(21),
        loyalty_bonus: None,
    },
    ProductSeed {
        sku: "falafel-200g",
        name: "Falafel Bites 200g",
        brand: "Levant Kitchen",
        tier: BrandTier::Standard,
        price_pence: 200,
        diet: VEGAN,
        tags: &["sesame"],
        category: "food",
        sub_category: "chilled snacks",
        promo: Some(PromoSeed::Multibuy { group: "mezze-2-for-3", threshold: 2, deal_pence: 300 }),
        perishable_days: Some(4),
        loyalty_bonus: None,
    },
    ProductSeed {
        sku: "houmous-200g",
        name: "Classic Houmous 200g",
        brand: "Levant Kitchen",
        tier: BrandTier::Standard,
        price_pence: 150,
        diet: VEGAN,
        tags: &["sesame"],
        category: "food",
        sub_category: "chilled snacks",
        promo: Some(PromoSeed::Multibuy { group: "mezze-2-for-3", threshold: 2, deal_pence: 300 }),
        perishable_days: Some(3),
        loyalty_bonus: None,
    },
    ProductSeed {
        sku: "flatbread-250g",
        name: "Stonebaked Flatbread 250g",
        brand: "Levant Kitchen",
        tier: BrandTier::Standard,
        price_pence: 90,
        diet: VEGAN,
        tags: &["gluten"],
        category: "food",
        sub_category: "bakery",
        promo: None,
        perishable_days: Some(5),
        loyalty_bonus: None,
    },
    ProductSeed {
        sku: "whole-chicken-1kg",
        name: "Whole Chicken 1kg",
        brand: "Glenside Farm",
        tier: BrandTier::Standard,
        price_pence: 450,
        diet: &[],
        tags: &[],
        category: "food",
        sub_category: "meat",
        promo: None,
        perishable_days: Some(2),
        loyalty_bonus: None,
    },
    ProductSeed {
        sku: "gravy-granules-200g",
        name: "Gravy Granules 200g",
        brand: "Hearthside",
        tier: BrandTier::Standard,
        price_pence: 120,
        diet: VEG,
        tags: &["gluten"],
        category: "food",
        sub_category: "cooking",
        promo: None,
        perishable_days: None,
        loyalty_bonus: None,
    },
    ProductSeed {
        sku: "carrots-1kg",
        name: "Carrots 1kg",
        brand: "Fresh Fields",
        tier: BrandTier::Standard,
        price_pence: 60,
        diet: VEGAN_GF,
        tags: &[],
        category: "food",
        sub_category: "vegetables",
        promo: None,
        perishable_days: Some(7),
        loyalty_bonus: None,
    },
    ProductSeed {
        sku: "cereal-500g",
        name: "Malted Wheats 500g",
        brand: "SunriseCo",
        tier: BrandTier::Standard,
        price_pence: 220,
        diet: VEGAN,
        tags: &["gluten"],
        category: "food",
        sub_category: "breakfast",
        promo: Some(PromoSeed::PriceDrop { pence: 40 }),
        perishable_days: None,
        loyalty_bonus: None,
    },
    ProductSeed {
        sku: "milk-1l",
        name: "Semi-Skimmed Milk 1L",
        brand: "Meadow Dairy",
        tier: BrandTier::Standard,
        price_pence: 110,
        diet: VEG,
        tags: &["milk"],
        category: "food",
        sub_category: "dairy",
        promo: None,
        perishable_days: Some(5),
        loyalty_bonus: None,
    },
    ProductSeed {
        sku: "oat-drink-1l",
        name: "Oat Drink 1L",
        brand: "Verdo",
        tier: BrandTier::Standard,
        price_pence: 170,
        diet: VEGAN,
        tags: &["oats"],
        category: "food",
        sub_category: "dairy",
        promo: None,
        perishable_days: Some(9),
        loyalty_bonus: None,
    },
    ProductSeed {
        sku: "orange-juice-1l",
        name: "Orange Juice 1L",
        brand: "SunriseCo",
        tier: BrandTier::Standard,
        price_pence: 190,
        diet: VEGAN_GF,
        tags: &[],
        category: "food",
        sub_category: "juice",
        promo: Some(PromoSeed::Loyalty { points_pence: 160 }),
        perishable_days: Some(10),
        loyalty_bonus: None,
    },
    ProductSeed {
        sku: "dark-chocolate-90g",
        name: "Dark Chocolate 90g",
        brand: "Cocoa Luxe",
        tier: BrandTier::Premium,
        price_pence: 210,
        diet: VEGAN,
        tags: &[],
        category: "food",
        sub_category: "confectionery",
        promo: None,
        perishable_days: None,
        loyalty_bonus: Some(150),
    },
    ProductSeed {
        sku: "ground-coffee-227g",
        name: "Ground Coffee 227g",
        brand: "Roastery Co",
        tier: BrandTier::Standard,
        price_pence: 350,
        diet: VEGAN_GF,
        tags: &[],
        category: "food",
        sub_category: "hot drinks",
        promo: None,
        perishable_days: None,
        loyalty_bonus: Some(80),
    },
    ProductSeed {
        sku: "toilet-tissue-9-roll",
        name: "Toilet Tissue 9 Roll",
        brand: "ComfortSoft",
        tier: BrandTier::Standard,
        price_pence: 400,
        diet: &[],
        tags: &[],
        category: "household",
        sub_category: "paper",
        promo: None,
        perishable_days: None,
        loyalty_bonus: None,
    },
    ProductSeed {
        sku: "toilet-tissue-12-roll",
        name: "Toilet Tissue 12 Roll",
        brand: "ComfortSoft",
        tier: BrandTier::Standard,
        price_pence: 520,
        diet: &[],
        tags: &[],
        category: "household",
        sub_category: "paper",
        promo: None,
        perishable_days: None,
        loyalty_bonus: None,
    },
];

/// Fixed complement lists keyed by the scanned SKU.
pub(super) const COMPLEMENT_SEEDS: &[(&str, &[&str])] = &[
    ("pasta-500g", &["pasta-sauce-350g", "parmesan-180g"]),
    ("spaghetti-500g", &["pasta-sauce-350g", "parmesan-180g"]),
    ("whole-chicken-1kg", &["gravy-granules-200g", "carrots-1kg"]),
    ("falafel-200g", &["houmous-200g", "flatbread-250g"]),
    ("cereal-500g", &["milk-1l"]),
];

/// Named recipe missions: a mission fires only when partially complete.
pub(super) const MISSION_SEEDS: &[(&str, &[&str])] = &[
    ("pasta_night", &["pasta-500g", "pasta-sauce-350g", "parmesan-180g"]),
    ("roast_dinner", &["whole-chicken-1kg", "carrots-1kg", "gravy-granules-200g"]),
    ("mezze_spread", &["falafel-200g", "houmous-200g", "flatbread-250g"]),
];

/// Breakfast bundle served by the store/time rule during the morning window.
pub(super) const BREAKFAST_BUNDLE: &[&str] = &["cereal-500g", "milk-1l", "orange-juice-1l"];

/// Small pack in the basket suggests the matching bulk pack.
pub(super) const BULK_PAIRS: &[(&str, &str)] = &[("toilet-tissue-9-roll", "toilet-tissue-12-roll")];

/// Back-compat alias entries applied at store construction; the decision
/// pipeline only ever sees canonical SKUs.
pub(super) const ALIAS_SEEDS: &[(&str, &str)] = &[
    ("pasta-penne", "pasta-500g"),
    ("pasta-sauce", "pasta-sauce-350g"),
    ("falafel", "falafel-200g"),
    ("houmous", "houmous-200g"),
    ("carrots", "carrots-1kg"),
    ("gravy", "gravy-granules-200g"),
    ("chicken-breast", "whole-chicken-1kg"),
];
