use std::time::Duration;

use async_trait::async_trait;
use rust_decimal::Decimal;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use cartwise_core::{
    NudgeCandidate, NudgeType, RerankOutcome, RerankRequest, Reranker, RerankerConfig,
};

/// Candidate digest on the wire: just what the remote ranker needs.
#[derive(Serialize)]
struct WireCandidate<'a> {
    id: &'a str,
    #[serde(rename = "type")]
    nudge_type: NudgeType,
    title: &'a str,
    reason: &'a str,
    savings: Decimal,
    products: Vec<WireProduct<'a>>,
}

#[derive(Serialize)]
struct WireProduct<'a> {
    sku: &'a str,
    price: Decimal,
}

fn request_body(request: &RerankRequest<'_>) -> Value {
    let candidates: Vec<WireCandidate<'_>> = request
        .candidates
        .iter()
        .map(|candidate| WireCandidate {
            id: &candidate.id,
            nudge_type: candidate.nudge_type,
            title: &candidate.title,
            reason: &candidate.reason,
            savings: candidate.savings,
            products: candidate
                .products
                .iter()
                .map(|product| WireProduct { sku: product.sku.as_str(), price: product.price })
                .collect(),
        })
        .collect();

    serde_json::json!({
        "candidates": candidates,
        "profile": request.profile,
        "session": request.session,
    })
}

/// Reorder the local candidates by a remote id list. Unknown ids are
/// dropped; locals the remote did not mention keep their local order at
/// the tail.
fn apply_order(local: &[NudgeCandidate], ids: &[String]) -> Vec<NudgeCandidate> {
    let mut reordered: Vec<NudgeCandidate> = ids
        .iter()
        .filter_map(|id| local.iter().find(|candidate| &candidate.id == id))
        .cloned()
        .collect();
    for candidate in local {
        if !ids.contains(&candidate.id) {
            reordered.push(candidate.clone());
        }
    }
    reordered
}

/// Extract an id ordering from a response body. Accepts full candidate
/// objects under `candidates` or a bare id list under `order`.
fn parse_response(local: &[NudgeCandidate], body: &Value) -> Option<Vec<NudgeCandidate>> {
    if let Some(candidates) = body.get("candidates").and_then(Value::as_array) {
        let ids: Vec<String> = candidates
            .iter()
            .filter_map(|entry| entry.get("id").and_then(Value::as_str).map(str::to_owned))
            .collect();
        if ids.is_empty() {
            return None;
        }
        return Some(apply_order(local, &ids));
    }
    if let Some(order) = body.get("order").and_then(Value::as_array) {
        let ids: Vec<String> =
            order.iter().filter_map(|entry| entry.as_str().map(str::to_owned)).collect();
        if ids.is_empty() {
            return None;
        }
        return Some(apply_order(local, &ids));
    }
    None
}

pub struct HttpReranker {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<SecretString>,
    timeout: Duration,
}

impl HttpReranker {
    pub fn new(config: &RerankerConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
            timeout: config.timeout(),
        }
    }

    pub fn with_endpoint(endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self { client: reqwest::Client::new(), endpoint: endpoint.into(), api_key: None, timeout }
    }
}

#[async_trait]
impl Reranker for HttpReranker {
    async fn rerank(&self, request: RerankRequest<'_>) -> RerankOutcome {
        let body = request_body(&request);
        let mut call =
            self.client.post(&self.endpoint).timeout(self.timeout).json(&body);
        if let Some(api_key) = &self.api_key {
            call = call.bearer_auth(api_key.expose_secret());
        }

        let response = match call.send().await {
            Ok(response) => response,
            Err(error) => {
                warn!(%error, "reranker transport failure");
                return RerankOutcome::Unavailable;
            }
        };
        if !response.status().is_success() {
            warn!(status = %response.status(), "reranker returned non-success status");
            return RerankOutcome::Unavailable;
        }
        let payload: Value = match response.json().await {
            Ok(payload) => payload,
            Err(error) => {
                warn!(%error, "reranker response body was not json");
                return RerankOutcome::Unavailable;
            }
        };

        match parse_response(request.candidates, &payload) {
            Some(reordered) => RerankOutcome::Reordered(reordered),
            None => {
                warn!("reranker response carried no usable ordering");
                RerankOutcome::Unavailable
            }
        }
    }
}
