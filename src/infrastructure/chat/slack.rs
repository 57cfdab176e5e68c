//! Slack Web API 연동 구현.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use crate::application::ports::ChatGateway;
use crate::domain::blocks::MessageBlock;

const DEFAULT_API_BASE: &str = "https://slack.com/api";

pub struct SlackClient {
    client: Client,
    token: String,
    api_base: String,
}

impl SlackClient {
    pub fn new(token: String, api_base: Option<String>) -> Self {
        Self {
            client: Client::new(),
            token,
            api_base: api_base
                .map(|b| b.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
        }
    }

    fn post_message_endpoint(&self) -> String {
        format!("{}/chat.postMessage", self.api_base)
    }
}

#[derive(Debug, Deserialize)]
struct PostMessageResponse {
    ok: bool,
    error: Option<String>,
}

/// HTTP 200이어도 본문의 `ok: false`는 발송 실패다.
fn check_post_response(body: &str, destination: &str) -> Result<()> {
    let parsed: PostMessageResponse =
        serde_json::from_str(body).context("slack: invalid chat.postMessage JSON")?;
    if !parsed.ok {
        anyhow::bail!(
            "slack: chat.postMessage failed: {} (destination={destination})",
            parsed.error.as_deref().unwrap_or("unknown_error")
        );
    }
    Ok(())
}

#[async_trait]
impl ChatGateway for SlackClient {
    async fn post_message(
        &self,
        destination: &str,
        fallback: &str,
        blocks: &[MessageBlock],
    ) -> Result<()> {
        let resp = self
            .client
            .post(self.post_message_endpoint())
            .bearer_auth(&self.token)
            .json(&json!({
                "channel": destination,
                "text": fallback,
                "blocks": blocks,
            }))
            .send()
            .await
            .with_context(|| format!("slack: failed to post message to {destination}"))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .context("slack: failed to read chat.postMessage body")?;
        if !status.is_success() {
            anyhow::bail!("slack: chat.postMessage HTTP error ({status}): {body}");
        }

        check_post_response(&body, destination)
    }
}
