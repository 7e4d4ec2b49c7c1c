use std::fmt::Write as _;
use std::path::PathBuf;
use std::sync::Arc;

use cartwise_core::config::AppConfig;
use cartwise_core::{
    CatalogStore, DietTag, NudgeCandidate, NudgeEngine, ScanEvent, SessionContext, Sku,
    UserProfile, ValueBias,
};
use cartwise_reranker::HttpReranker;

use super::CommandResult;

/// Fixed shopping script: a vegetarian shopper working through a pasta
/// dinner, a mezze side, and some breakfast staples. Chosen so the run
/// exercises complements, the one-away multibuy, and throttling.
const DEMO_SCANS: &[&str] = &[
    "pasta-penne",
    "flatbread-250g",
    "cereal-500g",
    "falafel-200g",
    "milk-1l",
    "orange-juice-1l",
    "toilet-tissue-9-roll",
];

pub fn run(rerank: bool, config_path: Option<&PathBuf>) -> CommandResult {
    let config = match AppConfig::load(config_path) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure("demo", "config_validation", error.to_string(), 2)
        }
    };

    if rerank && !config.reranker.enabled {
        return CommandResult::failure(
            "demo",
            "reranker_disabled",
            "remote reranking requested but [reranker] enabled = false",
            2,
        );
    }

    let catalog = Arc::new(CatalogStore::seeded());
    let engine = NudgeEngine::with_config(Arc::clone(&catalog), &config);
    let profile =
        UserProfile::new("demo-shopper", ValueBias::Balanced).with_diet_tags(vec![DietTag::Vegetarian]);
    let mut session = SessionContext::new();

    let served = if rerank {
        let runtime = match tokio::runtime::Runtime::new() {
            Ok(runtime) => runtime,
            Err(error) => {
                return CommandResult::failure("demo", "runtime", error.to_string(), 3)
            }
        };
        let reranker = HttpReranker::new(&config.reranker);
        runtime.block_on(async {
            let mut served = Vec::with_capacity(DEMO_SCANS.len());
            for sku in DEMO_SCANS {
                session.add_to_basket(Sku::new(*sku), 1);
                let event = ScanEvent::now(Sku::new(*sku));
                served.push(
                    engine
                        .process_scan_reranked(&mut session, &profile, event, &reranker)
                        .await,
                );
            }
            served
        })
    } else {
        DEMO_SCANS
            .iter()
            .map(|sku| {
                session.add_to_basket(Sku::new(*sku), 1);
                let event = ScanEvent::now(Sku::new(*sku));
                engine.process_scan(&mut session, &profile, event)
            })
            .collect()
    };

    let mut summary = String::from("scripted session (vegetarian, balanced):\n");
    for (index, (sku, nudge)) in DEMO_SCANS.iter().zip(&served).enumerate() {
        let name = catalog
            .lookup(&Sku::new(*sku))
            .map(|product| product.name.as_str())
            .unwrap_or("<unknown>");
        let _ = writeln!(summary, "  scan {}: {sku} ({name})", index + 1);
        match nudge {
            Some(candidate) => {
                let _ = writeln!(summary, "    {}", describe(candidate));
            }
            None => {
                let _ = writeln!(summary, "    (no nudge)");
            }
        }
    }
    let total = served.iter().flatten().count();
    let _ = write!(summary, "  served {total} nudge(s) over {} scans", DEMO_SCANS.len());

    CommandResult::success("demo", summary)
}

fn describe(candidate: &NudgeCandidate) -> String {
    let products: Vec<&str> =
        candidate.products.iter().map(|product| product.sku.as_str()).collect();
    let score =
        candidate.score.map(|score| format!("{score:.2}")).unwrap_or_else(|| "-".to_string());
    format!(
        "nudge [{}] {} | {} | products: [{}] | saves {} | score {}",
        candidate.nudge_type.label(),
        candidate.title,
        candidate.reason,
        products.join(", "),
        candidate.savings,
        score,
    )
}
