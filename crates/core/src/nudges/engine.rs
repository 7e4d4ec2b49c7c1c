//! Per-scan orchestration: generate, rank, optionally rerank remotely,
//! gate, serve, and record.
//!
//! The engine takes exclusive access to one session for the duration of a
//! scan resolution; nothing else mutates session state while a scan is in
//! flight. Nothing here returns an error for a single scan: the worst
//! outcome of any internal fault is "no nudge".

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::rerank::{Reranker, RerankOutcome, RerankRequest};
use super::scoring::Ranker;
use super::throttle::ThrottleManager;
use super::types::NudgeCandidate;
use crate::catalog::CatalogStore;
use crate::config::AppConfig;
use crate::domain::profile::UserProfile;
use crate::domain::session::{ScanEvent, SessionContext};
use crate::nudges::generator::CandidateGenerator;

pub struct NudgeEngine {
    catalog: Arc<CatalogStore>,
    ranker: Ranker,
    throttle: ThrottleManager,
}

impl NudgeEngine {
    pub fn new(catalog: Arc<CatalogStore>) -> Self {
        Self { catalog, ranker: Ranker::new(), throttle: ThrottleManager::default() }
    }

    pub fn with_config(catalog: Arc<CatalogStore>, config: &AppConfig) -> Self {
        Self {
            catalog,
            ranker: Ranker::with_config(config.scoring),
            throttle: ThrottleManager::from_config(config.throttle),
        }
    }

    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    /// Synchronous scan resolution using local ranking only.
    pub fn process_scan(
        &self,
        session: &mut SessionContext,
        profile: &UserProfile,
        event: ScanEvent,
    ) -> Option<NudgeCandidate> {
        session.scans.push(event);
        let ranked = self.ranked_candidates(session, profile);
        self.serve(session, ranked)
    }

    /// Asynchronous scan resolution that offers the ranked list to a
    /// remote reranker first. Any failure there silently keeps the local
    /// ranking; this path never surfaces an error to the caller.
    pub async fn process_scan_reranked(
        &self,
        session: &mut SessionContext,
        profile: &UserProfile,
        event: ScanEvent,
        reranker: &dyn Reranker,
    ) -> Option<NudgeCandidate> {
        session.scans.push(event);
        let mut ranked = self.ranked_candidates(session, profile);

        if !ranked.is_empty() {
            let request = RerankRequest { candidates: &ranked, profile, session };
            match reranker.rerank(request).await {
                RerankOutcome::Reordered(reordered) if !reordered.is_empty() => {
                    debug!(count = reordered.len(), "applied remote reranking");
                    ranked = reordered;
                }
                RerankOutcome::Reordered(_) | RerankOutcome::Unavailable => {
                    warn!("reranker unavailable, keeping local ranking");
                }
            }
        }

        self.serve(session, ranked)
    }

    fn ranked_candidates(
        &self,
        session: &SessionContext,
        profile: &UserProfile,
    ) -> Vec<NudgeCandidate> {
        let generator = CandidateGenerator::new(&self.catalog);
        let candidates = generator.generate(session, profile);
        let ranked = self.ranker.rank(candidates, profile);
        match session.last_nudge_type {
            Some(previous) => self.ranker.apply_same_type_penalty(ranked, previous),
            None => ranked,
        }
    }

    /// Walk the ranked list and serve the first candidate never served
    /// before, updating session bookkeeping. Throttle denial or an
    /// exhausted list both mean "no nudge".
    fn serve(
        &self,
        session: &mut SessionContext,
        ranked: Vec<NudgeCandidate>,
    ) -> Option<NudgeCandidate> {
        if !self.throttle.can_serve(session) {
            debug!(scans = session.scans.len(), "throttled, no nudge served");
            return None;
        }
        for candidate in ranked {
            if self.throttle.already_served(session, &candidate.id) {
                continue;
            }
            session.nudge_history.push(candidate.id.clone());
            session.last_nudge_scan_index = Some(session.scans.len());
            session.last_nudge_type = Some(candidate.nudge_type);
            info!(
                nudge_type = candidate.nudge_type.label(),
                savings = %candidate.savings,
                "serving nudge"
            );
            return Some(candidate);
        }
        None
    }
}
