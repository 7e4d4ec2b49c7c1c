//! The nudge decision pipeline: candidate generation, ranking, remote
//! reranking seam, throttling, and per-scan orchestration.

mod engine;
mod generator;
mod rerank;
mod scoring;
mod throttle;
mod types;

pub use engine::NudgeEngine;
pub use generator::CandidateGenerator;
pub use rerank::{Reranker, RerankOutcome, RerankRequest};
pub use scoring::{Ranker, ScoringConfig, TypeWeights};
pub use throttle::{ThrottleConfig, ThrottleManager, DEFAULT_SCAN_SPACING};
pub use types::{NudgeCandidate, NudgeType};
