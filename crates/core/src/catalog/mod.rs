//! Read-only catalog store: SKU → product, fixed complement lists, and
//! mission recipes. Loaded once before any session starts; safe to share
//! across sessions behind an `Arc`.

mod data;

use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;

use crate::domain::product::{Product, PromoMeta, Sku};
use crate::errors::CatalogError;

use data::{
    ProductSeed, PromoSeed, ALIAS_SEEDS, BREAKFAST_BUNDLE, BULK_PAIRS, COMPLEMENT_SEEDS,
    MISSION_SEEDS, PRODUCT_SEEDS,
};

pub struct CatalogStore {
    products: HashMap<Sku, Product>,
    /// Back-compat alias keys resolving to canonical SKUs. Applied at
    /// lookup only; the pipeline never iterates aliases.
    aliases: HashMap<Sku, Sku>,
    complements: HashMap<Sku, Vec<Sku>>,
    missions: BTreeMap<String, Vec<Sku>>,
    breakfast_bundle: Vec<Sku>,
    bulk_pairs: HashMap<Sku, Sku>,
}

impl CatalogStore {
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    /// Build the store from the deterministic seed dataset.
    pub fn seeded() -> Self {
        let mut builder = CatalogBuilder::default();
        for seed in PRODUCT_SEEDS {
            builder = builder.product(seed_to_product(seed));
        }
        for (sku, list) in COMPLEMENT_SEEDS {
            builder = builder
                .complements(Sku::new(*sku), list.iter().map(|target| Sku::new(*target)).collect());
        }
        for (name, skus) in MISSION_SEEDS {
            builder =
                builder.mission(*name, skus.iter().map(|target| Sku::new(*target)).collect());
        }
        builder = builder
            .breakfast_bundle(BREAKFAST_BUNDLE.iter().map(|target| Sku::new(*target)).collect());
        for (small, bulk) in BULK_PAIRS {
            builder = builder.bulk_pair(Sku::new(*small), Sku::new(*bulk));
        }
        for (alias, target) in ALIAS_SEEDS {
            builder = builder.alias(Sku::new(*alias), Sku::new(*target));
        }
        builder.build().expect("seed catalog is internally consistent")
    }

    /// Resolve an alias to its canonical SKU, or pass the key through.
    pub fn canonical<'a>(&'a self, sku: &'a Sku) -> &'a Sku {
        self.aliases.get(sku).unwrap_or(sku)
    }

    pub fn lookup(&self, sku: &Sku) -> Option<&Product> {
        self.products.get(self.canonical(sku))
    }

    pub fn complements_of(&self, sku: &Sku) -> &[Sku] {
        self.complements.get(self.canonical(sku)).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn mission_recipes(&self) -> impl Iterator<Item = (&str, &[Sku])> {
        self.missions.iter().map(|(name, skus)| (name.as_str(), skus.as_slice()))
    }

    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }

    pub fn breakfast_bundle(&self) -> &[Sku] {
        &self.breakfast_bundle
    }

    pub fn bulk_pack_for(&self, small: &Sku) -> Option<&Sku> {
        self.bulk_pairs.get(self.canonical(small))
    }

    /// All members of a multibuy promo group, in stable SKU order so the
    /// cheapest-member tie-break is deterministic.
    pub fn multibuy_group_members(&self, group_id: &str) -> Vec<&Product> {
        let mut members: Vec<&Product> = self
            .products
            .values()
            .filter(|product| {
                product.promo.as_ref().and_then(PromoMeta::multibuy_group) == Some(group_id)
            })
            .collect();
        members.sort_by(|a, b| a.sku.cmp(&b.sku));
        members
    }
}

fn seed_to_product(seed: &ProductSeed) -> Product {
    let promo = seed.promo.as_ref().map(|promo| match promo {
        PromoSeed::Multibuy { group, threshold, deal_pence } => PromoMeta::Multibuy {
            group_id: (*group).to_owned(),
            threshold: *threshold,
            deal_price: Decimal::new(*deal_pence, 2),
        },
        PromoSeed::PriceDrop { pence } => {
            PromoMeta::PriceDrop { group_id: None, value: Decimal::new(*pence, 2) }
        }
        PromoSeed::Loyalty { points_pence } => {
            PromoMeta::Loyalty { points_price: Decimal::new(*points_pence, 2), in_stock: true }
        }
    });

    Product {
        sku: Sku::new(seed.sku),
        name: seed.name.to_owned(),
        brand: seed.brand.to_owned(),
        brand_tier: seed.tier,
        price: Decimal::new(seed.price_pence, 2),
        diet_tags: seed.diet.to_vec(),
        tags: seed.tags.iter().map(|tag| (*tag).to_owned()).collect(),
        category: seed.category.to_owned(),
        sub_category: seed.sub_category.to_owned(),
        promo,
        perishable_days: seed.perishable_days,
        loyalty_bonus: seed.loyalty_bonus,
    }
}

#[derive(Default)]
pub struct CatalogBuilder {
    products: Vec<Product>,
    aliases: Vec<(Sku, Sku)>,
    complements: Vec<(Sku, Vec<Sku>)>,
    missions: Vec<(String, Vec<Sku>)>,
    breakfast_bundle: Vec<Sku>,
    bulk_pairs: Vec<(Sku, Sku)>,
}

impl CatalogBuilder {
    pub fn product(mut self, product: Product) -> Self {
        self.products.push(product);
        self
    }

    pub fn alias(mut self, alias: Sku, target: Sku) -> Self {
        self.aliases.push((alias, target));
        self
    }

    pub fn complements(mut self, sku: Sku, list: Vec<Sku>) -> Self {
        self.complements.push((sku, list));
        self
    }

    pub fn mission(mut self, name: impl Into<String>, skus: Vec<Sku>) -> Self {
        self.missions.push((name.into(), skus));
        self
    }

    pub fn breakfast_bundle(mut self, skus: Vec<Sku>) -> Self {
        self.breakfast_bundle = skus;
        self
    }

    pub fn bulk_pair(mut self, small: Sku, bulk: Sku) -> Self {
        self.bulk_pairs.push((small, bulk));
        self
    }

    pub fn build(self) -> Result<CatalogStore, CatalogError> {
        let mut products = HashMap::with_capacity(self.products.len());
        for product in self.products {
            let sku = product.sku.clone();
            if products.insert(sku.clone(), product).is_some() {
                return Err(CatalogError::DuplicateSku(sku));
            }
        }

        let mut aliases = HashMap::with_capacity(self.aliases.len());
        for (alias, target) in self.aliases {
            if products.contains_key(&alias) {
                return Err(CatalogError::AliasShadowsSku(alias));
            }
            if !products.contains_key(&target) {
                return Err(CatalogError::UnknownAliasTarget { alias, target });
            }
            aliases.insert(alias, target);
        }

        let complements = self.complements.into_iter().collect();
        let missions = self.missions.into_iter().collect();
        let bulk_pairs = self.bulk_pairs.into_iter().collect();

        Ok(CatalogStore {
            products,
            aliases,
            complements,
            missions,
            breakfast_bundle: self.breakfast_bundle,
            bulk_pairs,
        })
    }
}
