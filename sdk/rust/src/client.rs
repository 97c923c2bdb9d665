use reqwest::Client;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteRequest {
    pub merchant_id: String,
    pub amount: f64,
    pub currency: String,
    pub channel: String, // "pos" and "online" are recognised, anything else falls back
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteResponse {
    pub gateway: String,
    /// Suggested retry delay in nanoseconds.
    pub retry_in: u64,
    pub trace_id: String,
    pub timestamp: String, // RFC 3339, UTC
}

pub struct RouterClient {
    client: Client,
    router_url: String,
}

impl RouterClient {
    pub fn new(router_url: &str) -> Self {
        Self {
            client: Client::new(),
            router_url: router_url.trim_end_matches('/').to_string(),
        }
    }

    /// Ask the router for a gateway decision.
    pub async fn route(&self, req: &RouteRequest) -> Result<RouteResponse, Box<dyn std::error::Error + Send + Sync>> {
        let resp = self.client
            .post(format!("{}/route", self.router_url))
            .json(req)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            return Err(format!("Router returned error status {}: {}", status, text).into());
        }

        Ok(serde_json::from_str::<RouteResponse>(&text)?)
    }

    /// Returns true if the liveness endpoint answers `ok`.
    pub async fn health(&self) -> Result<bool, reqwest::Error> {
        let resp = self.client
            .get(format!("{}/health", self.router_url))
            .send()
            .await?;
        let ok = resp.status().is_success();
        Ok(ok && resp.text().await? == "ok")
    }
}
