//! cartwise-core: the in-trolley nudge decision pipeline.
//!
//! After each scanned product, decide whether to surface at most one
//! contextual suggestion and which one, subject to scan-spacing throttling
//! and a no-repeat rule. The pipeline is strictly sequential per session:
//! scan event → session mutation → basket facts → candidate generation →
//! ranking (local, optionally remote) → throttle gate → at most one
//! candidate.
//!
//! The catalog is read-only process-wide data; sessions share it behind an
//! `Arc`. Session state is owned exclusively by the engine for the
//! duration of one scan resolution.

pub mod basket;
pub mod catalog;
pub mod config;
pub mod domain;
pub mod errors;
pub mod nudges;

pub use basket::{BasketAnalyzer, MultibuyGap, DEFAULT_MULTIBUY_THRESHOLD};
pub use catalog::{CatalogBuilder, CatalogStore};
pub use config::{AppConfig, ConfigError, LoggingConfig, RerankerConfig};
pub use domain::product::{BrandTier, DietTag, Product, PromoMeta, Sku};
pub use domain::profile::{UserProfile, ValueBias};
pub use domain::session::{BasketItem, ScanEvent, SessionContext};
pub use errors::CatalogError;
pub use nudges::{
    NudgeCandidate, NudgeEngine, NudgeType, Ranker, RerankOutcome, RerankRequest, Reranker,
    ScoringConfig, ThrottleConfig, ThrottleManager,
};
