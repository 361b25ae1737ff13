//! Discord channel sink
//!
//! Publishes display units as single-embed messages through the Discord
//! REST API. Edits and deletes fetch the message first so a vanished
//! message is reported as a failure instead of a silent no-op.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;
use serde_json::{json, Value};

use shared::{component_debug, Component, MessageHandle};

use crate::core::DisplayUnit;
use crate::error::{ScoreboardError, ScoreboardResult};
use crate::traits::ChannelSink;

pub const DEFAULT_DISCORD_BASE_URL: &str = "https://discord.com/api/v10";

#[derive(Debug, Deserialize)]
struct CreatedMessage {
    id: String,
}

/// Real channel sink for one Discord text channel
pub struct DiscordChannel {
    client: Client,
    base_url: String,
    channel_id: String,
    token: String,
}

impl DiscordChannel {
    pub fn new(
        token: impl Into<String>,
        channel_id: impl Into<String>,
        timeout: Duration,
    ) -> ScoreboardResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("DiscordBot (scoreboard, ", env!("CARGO_PKG_VERSION"), ")"))
            .build()?;
        Ok(Self {
            client,
            base_url: DEFAULT_DISCORD_BASE_URL.to_string(),
            channel_id: channel_id.into(),
            token: token.into(),
        })
    }

    /// Point at a different API host
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn messages_url(&self) -> String {
        format!("{}/channels/{}/messages", self.base_url, self.channel_id)
    }

    fn message_url(&self, handle: &MessageHandle) -> String {
        format!("{}/{}", self.messages_url(), handle)
    }

    fn authorization(&self) -> String {
        format!("Bot {}", self.token)
    }

    /// GET the message so edits and deletes only touch messages that still exist
    async fn fetch_message(&self, operation: &str, handle: &MessageHandle) -> ScoreboardResult<()> {
        let response = self
            .client
            .get(self.message_url(handle))
            .header("Authorization", self.authorization())
            .send()
            .await
            .map_err(|e| ScoreboardError::channel(operation, e.to_string()))?;
        ensure_success(operation, response).await?;
        Ok(())
    }
}

/// Embed payload for one display unit
pub fn embed_json(unit: &DisplayUnit) -> Value {
    let fields: Vec<Value> = unit
        .fields
        .iter()
        .map(|field| json!({ "name": field.name, "value": field.value, "inline": false }))
        .collect();

    let mut embed = json!({
        "title": unit.title,
        "color": unit.kind.color(),
        "fields": fields,
    });
    if let Some(description) = &unit.description {
        embed["description"] = json!(description);
    }
    embed
}

fn message_body(unit: &DisplayUnit) -> Value {
    json!({ "embeds": [embed_json(unit)] })
}

async fn ensure_success(operation: &str, response: Response) -> ScoreboardResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ScoreboardError::channel(operation, format!("HTTP {status}: {body}")))
}

#[async_trait]
impl ChannelSink for DiscordChannel {
    async fn create_message(&self, unit: &DisplayUnit) -> ScoreboardResult<MessageHandle> {
        let response = self
            .client
            .post(self.messages_url())
            .header("Authorization", self.authorization())
            .json(&message_body(unit))
            .send()
            .await
            .map_err(|e| ScoreboardError::channel("create", e.to_string()))?;

        let created: CreatedMessage = ensure_success("create", response)
            .await?
            .json()
            .await
            .map_err(|e| ScoreboardError::channel("create", format!("unreadable response: {e}")))?;

        let handle = MessageHandle::new(created.id)?;
        component_debug!(
            Component::Channel,
            "Created message {} in channel {}",
            handle,
            self.channel_id
        );
        Ok(handle)
    }

    async fn edit_message(
        &self,
        handle: &MessageHandle,
        unit: &DisplayUnit,
    ) -> ScoreboardResult<()> {
        self.fetch_message("edit", handle).await?;

        let response = self
            .client
            .patch(self.message_url(handle))
            .header("Authorization", self.authorization())
            .json(&message_body(unit))
            .send()
            .await
            .map_err(|e| ScoreboardError::channel("edit", e.to_string()))?;
        ensure_success("edit", response).await?;
        Ok(())
    }

    async fn delete_message(&self, handle: &MessageHandle) -> ScoreboardResult<()> {
        self.fetch_message("delete", handle).await?;

        let response = self
            .client
            .delete(self.message_url(handle))
            .header("Authorization", self.authorization())
            .send()
            .await
            .map_err(|e| ScoreboardError::channel("delete", e.to_string()))?;
        ensure_success("delete", response).await?;
        Ok(())
    }
}
