//! Remote reranking boundary.
//!
//! The fallback contract is a first-class branch: a reranker either hands
//! back a reordering or reports itself unavailable. Nothing at this seam
//! can fail the scan pipeline; callers treat `Unavailable` as "keep the
//! local ranking".

use async_trait::async_trait;

use super::types::NudgeCandidate;
use crate::domain::profile::UserProfile;
use crate::domain::session::SessionContext;

/// Snapshot handed to the remote collaborator. Borrows the engine's
/// working state; serialized at the transport layer.
#[derive(Clone, Copy, Debug)]
pub struct RerankRequest<'a> {
    pub candidates: &'a [NudgeCandidate],
    pub profile: &'a UserProfile,
    pub session: &'a SessionContext,
}

#[derive(Clone, Debug, PartialEq)]
pub enum RerankOutcome {
    /// The remote service produced a usable reordering.
    Reordered(Vec<NudgeCandidate>),
    /// Transport error, timeout, non-success status, or malformed body.
    Unavailable,
}

#[async_trait]
pub trait Reranker: Send + Sync {
    async fn rerank(&self, request: RerankRequest<'_>) -> RerankOutcome;
}
