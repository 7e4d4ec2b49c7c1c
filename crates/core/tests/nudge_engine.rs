//! End-to-end pipeline properties: dietary safety, throttle spacing,
//! no-repeat, multibuy trigger boundary, and reranker fallback.

use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;

use cartwise_core::{
    BrandTier, CatalogStore, DietTag, NudgeCandidate, NudgeEngine, NudgeType, Product, PromoMeta,
    RerankOutcome, RerankRequest, Reranker, ScanEvent, SessionContext, Sku, UserProfile, ValueBias,
};

fn engine() -> NudgeEngine {
    NudgeEngine::new(Arc::new(CatalogStore::seeded()))
}

fn balanced_vegetarian() -> UserProfile {
    UserProfile::new("u1", ValueBias::Balanced).with_diet_tags(vec![DietTag::Vegetarian])
}

fn scan(session: &mut SessionContext, engine: &NudgeEngine, sku: &str) -> Option<NudgeCandidate> {
    engine.process_scan(session, &balanced_vegetarian(), ScanEvent::now(Sku::new(sku)))
}

#[test]
fn complement_nudge_after_scanning_pasta() {
    let engine = engine();
    let mut session = SessionContext::new();
    session.add_to_basket(Sku::new("pasta-penne"), 1);

    let nudge = scan(&mut session, &engine, "pasta-penne").expect("a nudge is served");
    assert_eq!(nudge.nudge_type, NudgeType::Complement);
    assert!(nudge.score.is_some());
    assert_eq!(session.nudge_history.len(), 1);
    assert_eq!(session.last_nudge_scan_index, Some(1));
}

#[test]
fn throttle_allows_one_nudge_per_three_scans() {
    let engine = engine();
    let mut session = SessionContext::new();
    session.add_to_basket(Sku::new("pasta-penne"), 1);

    let first = scan(&mut session, &engine, "pasta-penne");
    let second = scan(&mut session, &engine, "flatbread-250g");
    let third = scan(&mut session, &engine, "houmous-200g");
    let fourth = scan(&mut session, &engine, "falafel-200g");

    assert!(first.is_some());
    assert!(second.is_none());
    assert!(third.is_none());
    assert!(fourth.is_some());
}

#[test]
fn vegan_profile_only_ever_sees_vegan_products() {
    let engine = engine();
    let profile = UserProfile::new("u2", ValueBias::Balanced).with_diet_tags(vec![DietTag::Vegan]);
    let mut session = SessionContext::new();
    session.add_to_basket(Sku::new("chicken-breast"), 1);

    let nudge = engine
        .process_scan(&mut session, &profile, ScanEvent::now(Sku::new("chicken-breast")))
        .expect("a nudge is served");
    // The chicken's complement list holds vegetarian-only gravy and vegan
    // carrots; only the latter may appear.
    assert!(nudge.products.iter().all(|product| product.diet_tags.contains(&DietTag::Vegan)));
}

#[test]
fn one_away_basket_yields_multibuy_with_two_decimal_saving() {
    let engine = engine();
    let mut session = SessionContext::new();
    session.add_to_basket(Sku::new("falafel-200g"), 1);

    let nudge = scan(&mut session, &engine, "falafel-200g").expect("a nudge is served");
    assert_eq!(nudge.nudge_type, NudgeType::Multibuy);
    assert!(nudge.savings > Decimal::ZERO);
    assert_eq!(nudge.savings, nudge.savings.round_dp(2));
}

fn multibuy_product(sku: &str, pence: i64) -> Product {
    Product {
        sku: Sku::new(sku),
        name: sku.to_owned(),
        brand: "TestCo".to_owned(),
        brand_tier: BrandTier::Standard,
        price: Decimal::new(pence, 2),
        diet_tags: vec![],
        tags: vec![],
        category: "food".to_owned(),
        sub_category: "test".to_owned(),
        promo: Some(PromoMeta::Multibuy {
            group_id: "three-for-five".to_owned(),
            threshold: 3,
            deal_price: Decimal::new(500, 2),
        }),
        perishable_days: None,
        loyalty_bonus: None,
    }
}

#[test]
fn multibuy_fires_at_exactly_one_short_of_threshold() {
    let catalog = CatalogStore::builder()
        .product(multibuy_product("snack-a", 200))
        .product(multibuy_product("snack-b", 210))
        .product(multibuy_product("snack-c", 190))
        .build()
        .unwrap();
    let engine = NudgeEngine::new(Arc::new(catalog));
    let profile = UserProfile::new("u3", ValueBias::Balanced);

    let serve = |count: u32| {
        let mut session = SessionContext::new();
        session.add_to_basket(Sku::new("snack-a"), count);
        engine.process_scan(&mut session, &profile, ScanEvent::now(Sku::new("snack-a")))
    };

    // threshold - 2 in the basket: still two away, no multibuy.
    assert!(serve(1).into_iter().all(|nudge| nudge.nudge_type != NudgeType::Multibuy));
    // threshold - 1: exactly one away, fires.
    let fired = serve(2).expect("a nudge is served");
    assert_eq!(fired.nudge_type, NudgeType::Multibuy);
    assert!(fired.savings > Decimal::ZERO);
    // full set: no gap.
    assert!(serve(3).into_iter().all(|nudge| nudge.nudge_type != NudgeType::Multibuy));
}

#[test]
fn no_candidate_id_is_served_twice() {
    let engine = engine();
    let mut session = SessionContext::new();
    session.add_to_basket(Sku::new("pasta-penne"), 1);

    let skus = ["pasta-penne", "flatbread-250g", "houmous-200g", "falafel-200g", "carrots-1kg",
        "cereal-500g", "milk-1l", "orange-juice-1l", "spaghetti-500g", "oat-drink-1l"];
    for sku in skus {
        scan(&mut session, &engine, sku);
    }

    let mut seen = std::collections::HashSet::new();
    assert!(session.nudge_history.iter().all(|id| seen.insert(id.clone())));
}

#[test]
fn value_bias_shopper_still_gets_the_complement_over_loyalty_points() {
    let engine = engine();
    // Value bias raises the points scale, but the capped contribution must
    // leave the loyalty candidate below a complement.
    let profile = UserProfile::new("u4", ValueBias::Value);
    let mut session = SessionContext::new();
    session.add_to_basket(Sku::new("pasta-500g"), 1);

    let nudge = engine
        .process_scan(&mut session, &profile, ScanEvent::now(Sku::new("pasta-500g")))
        .expect("a nudge is served");
    assert_eq!(nudge.nudge_type, NudgeType::Complement);
}

#[test]
fn repeated_context_deprioritizes_the_previous_nudge_type() {
    let engine = engine();
    let mut session = SessionContext::new();
    session.add_to_basket(Sku::new("pasta-500g"), 1);

    let first = scan(&mut session, &engine, "pasta-500g").expect("first nudge");
    assert_eq!(first.nudge_type, NudgeType::Complement);

    // Two throttled scans, then an identical context: the complement is
    // penalized for repeating its type and something else wins.
    scan(&mut session, &engine, "pasta-500g");
    scan(&mut session, &engine, "pasta-500g");
    let fourth = scan(&mut session, &engine, "pasta-500g").expect("fourth nudge");
    assert_ne!(fourth.nudge_type, NudgeType::Complement);
}

struct FailingReranker;

#[async_trait]
impl Reranker for FailingReranker {
    async fn rerank(&self, _request: RerankRequest<'_>) -> RerankOutcome {
        RerankOutcome::Unavailable
    }
}

struct EmptyReranker;

#[async_trait]
impl Reranker for EmptyReranker {
    async fn rerank(&self, _request: RerankRequest<'_>) -> RerankOutcome {
        RerankOutcome::Reordered(Vec::new())
    }
}

struct ReversingReranker;

#[async_trait]
impl Reranker for ReversingReranker {
    async fn rerank(&self, request: RerankRequest<'_>) -> RerankOutcome {
        let mut reversed = request.candidates.to_vec();
        reversed.reverse();
        RerankOutcome::Reordered(reversed)
    }
}

#[tokio::test]
async fn unavailable_reranker_matches_local_ranking() {
    let engine = engine();
    let profile = balanced_vegetarian();

    let mut local_session = SessionContext::new();
    local_session.add_to_basket(Sku::new("pasta-penne"), 1);
    let local = engine
        .process_scan(&mut local_session, &profile, ScanEvent::now(Sku::new("pasta-penne")))
        .expect("local nudge");

    let mut remote_session = SessionContext::new();
    remote_session.add_to_basket(Sku::new("pasta-penne"), 1);
    let remote = engine
        .process_scan_reranked(
            &mut remote_session,
            &profile,
            ScanEvent::now(Sku::new("pasta-penne")),
            &FailingReranker,
        )
        .await
        .expect("fallback nudge");

    // Ids are fresh per generation; the decision itself must match.
    assert_eq!(remote.nudge_type, local.nudge_type);
    assert_eq!(remote.products, local.products);
    assert_eq!(remote.savings, local.savings);
}

#[tokio::test]
async fn empty_reranker_response_keeps_local_ranking() {
    let engine = engine();
    let profile = balanced_vegetarian();
    let mut session = SessionContext::new();
    session.add_to_basket(Sku::new("pasta-penne"), 1);

    let nudge = engine
        .process_scan_reranked(
            &mut session,
            &profile,
            ScanEvent::now(Sku::new("pasta-penne")),
            &EmptyReranker,
        )
        .await
        .expect("nudge despite empty rerank");
    assert_eq!(nudge.nudge_type, NudgeType::Complement);
}

#[tokio::test]
async fn remote_reordering_is_honored() {
    let engine = engine();
    let profile = balanced_vegetarian();
    let mut session = SessionContext::new();
    session.add_to_basket(Sku::new("pasta-penne"), 1);

    let nudge = engine
        .process_scan_reranked(
            &mut session,
            &profile,
            ScanEvent::now(Sku::new("pasta-penne")),
            &ReversingReranker,
        )
        .await
        .expect("reordered nudge");
    // The local winner is the complement; a reversed list serves the
    // local tail instead.
    assert_ne!(nudge.nudge_type, NudgeType::Complement);
}

#[test]
fn unknown_scan_sku_never_fails_the_pipeline() {
    let engine = engine();
    let mut session = SessionContext::new();
    session.add_to_basket(Sku::new("not-a-real-sku"), 2);

    // Worst case is "no nudge", never a panic or error.
    let result = scan(&mut session, &engine, "also-not-real");
    assert!(result.is_none() || !result.unwrap().products.is_empty());
}
