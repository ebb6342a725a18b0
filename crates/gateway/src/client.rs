//! HTTP client for a running gateway, used by the CLI.

use std::time::Duration;

use {
    anyhow::{Context, Result, bail},
    tracing::{error, info, warn},
    wabridge_channels::GroupChat,
};

use crate::api::{ErrorBody, GroupsResponse, SendRequest, StatusResponse};

const STATUS_TIMEOUT: Duration = Duration::from_secs(5);
const SEND_TIMEOUT: Duration = Duration::from_secs(30);

/// Talks to the gateway's HTTP surface.
#[derive(Debug, Clone)]
pub struct BridgeClient {
    base_url: String,
    http: reqwest::Client,
}

/// Outcome of sending one message to several chats.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    pub delivered: Vec<String>,
    /// `(chat_id, error)` for every chat that failed.
    pub failed: Vec<(String, String)>,
}

impl BridgeClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub async fn status(&self) -> Result<StatusResponse> {
        let resp = self
            .http
            .get(self.url("/status"))
            .timeout(STATUS_TIMEOUT)
            .send()
            .await
            .with_context(|| format!("cannot reach gateway at {}", self.base_url))?;
        Ok(resp.error_for_status()?.json().await?)
    }

    pub async fn groups(&self) -> Result<Vec<GroupChat>> {
        let resp = self
            .http
            .get(self.url("/groups"))
            .timeout(SEND_TIMEOUT)
            .send()
            .await
            .with_context(|| format!("cannot reach gateway at {}", self.base_url))?;
        let resp = check(resp).await?;
        let body: GroupsResponse = resp.json().await?;
        Ok(body.groups)
    }

    pub async fn send(&self, req: &SendRequest) -> Result<()> {
        let resp = self
            .http
            .post(self.url("/send"))
            .timeout(SEND_TIMEOUT)
            .json(req)
            .send()
            .await
            .with_context(|| format!("cannot reach gateway at {}", self.base_url))?;
        check(resp).await?;
        Ok(())
    }

    /// Send `message` (and optional image) to every chat in `targets`.
    ///
    /// Checks `/status` first. Individual failures are collected; the call
    /// only fails when no chat could be reached at all.
    pub async fn broadcast(
        &self,
        targets: &[String],
        message: &str,
        image_url: Option<&str>,
    ) -> Result<BroadcastReport> {
        if targets.is_empty() {
            bail!("no target chats given");
        }
        let status = self.status().await?;
        if !status.connected {
            match status.auth_failure {
                Some(reason) => bail!("gateway is disconnected ({reason})"),
                None => bail!("gateway is disconnected"),
            }
        }

        info!(targets = targets.len(), "broadcasting message");
        let mut report = BroadcastReport::default();
        for chat_id in targets {
            let mut req = SendRequest::new(chat_id.as_str(), message);
            if let Some(url) = image_url.filter(|u| !u.is_empty()) {
                req = req.with_image(url);
            }
            match self.send(&req).await {
                Ok(()) => {
                    info!(chat_id = %chat_id, "delivered");
                    report.delivered.push(chat_id.clone());
                },
                Err(e) => {
                    error!(chat_id = %chat_id, error = %format!("{e:#}"), "delivery failed");
                    report.failed.push((chat_id.clone(), format!("{e:#}")));
                },
            }
        }

        if report.delivered.is_empty() {
            let errors: Vec<&str> = report.failed.iter().map(|(_, e)| e.as_str()).collect();
            bail!("failed on every target: {}", errors.join("; "));
        }
        if !report.failed.is_empty() {
            warn!(
                delivered = report.delivered.len(),
                failed = report.failed.len(),
                "broadcast partially failed"
            );
        }
        Ok(report)
    }
}

/// Append an affiliate link to a message body, if one is given.
pub fn with_link(message: &str, link: Option<&str>) -> String {
    match link.map(str::trim).filter(|l| !l.is_empty()) {
        Some(link) => format!("{message}\n\n🔗 {link}"),
        None => message.to_string(),
    }
}

/// Turn a non-2xx response into an error carrying the gateway's message.
async fn check(resp: reqwest::Response) -> Result<reqwest::Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let text = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .map(|b| b.error)
        .unwrap_or(text);
    bail!("HTTP {} - {message}", status.as_u16())
}
