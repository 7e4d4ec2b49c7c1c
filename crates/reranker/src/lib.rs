//! HTTP client for the optional remote reranking collaborator.
//!
//! The remote service receives the locally ranked candidate list plus the
//! profile and a session snapshot, and replies with either reordered full
//! candidate objects or an ordered id list. Both shapes are accepted; any
//! transport error, timeout, non-success status, or unparseable body is
//! reported as `RerankOutcome::Unavailable` so the engine keeps its local
//! ranking. This client never fails a scan.

mod client;

pub use client::HttpReranker;
