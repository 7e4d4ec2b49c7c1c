use cartwise_core::{CatalogStore, Product, PromoMeta};

pub fn run() -> String {
    let catalog = CatalogStore::seeded();

    let mut products: Vec<&Product> = catalog.products().collect();
    products.sort_by(|a, b| a.sku.cmp(&b.sku));

    let mut lines = vec![format!("seeded catalog ({} products):", products.len())];
    for product in products {
        lines.push(render_product(product));
    }

    lines.push("missions:".to_string());
    for (name, skus) in catalog.mission_recipes() {
        let skus: Vec<&str> = skus.iter().map(|sku| sku.as_str()).collect();
        lines.push(format!("  - {name}: [{}]", skus.join(", ")));
    }

    lines.join("\n")
}

fn render_product(product: &Product) -> String {
    let mut line = format!(
        "- {} | {} | {}/{} | {:?} | {}",
        product.sku,
        product.name,
        product.category,
        product.sub_category,
        product.brand_tier,
        product.price,
    );
    if !product.diet_tags.is_empty() {
        let tags: Vec<String> =
            product.diet_tags.iter().map(|tag| format!("{tag:?}").to_lowercase()).collect();
        line.push_str(&format!(" | diet: {}", tags.join(",")));
    }
    if let Some(promo) = &product.promo {
        line.push_str(&format!(" | promo: {}", render_promo(promo)));
    }
    if let Some(days) = product.perishable_days {
        line.push_str(&format!(" | perishable {days}d"));
    }
    if let Some(bonus) = product.loyalty_bonus {
        line.push_str(&format!(" | +{bonus} pts"));
    }
    line
}

fn render_promo(promo: &PromoMeta) -> String {
    match promo {
        PromoMeta::Multibuy { group_id, threshold, deal_price } => {
            format!("multibuy {group_id} ({threshold} for {deal_price})")
        }
        PromoMeta::PriceDrop { value, .. } => format!("price drop {value}"),
        PromoMeta::Loyalty { points_price, in_stock } => {
            if *in_stock {
                format!("loyalty price {points_price}")
            } else {
                format!("loyalty price {points_price} (out of stock)")
            }
        }
    }
}
