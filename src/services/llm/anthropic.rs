// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{LlmProvider, ROLE_USER, env_lookup, resolve_api_key, status_error, transport_error};
use crate::config::Config;
use crate::domain::PromptPair;
use crate::error::{Error, Result};

pub const API_KEY_ENV: &str = "ANTHROPIC_API_KEY";
const DEFAULT_BASE_URL: &str = "https://api.anthropic.com/v1";
const API_VERSION: &str = "2023-06-01";
const NAME: &str = "anthropic";

pub struct AnthropicProvider {
    client: Client,
    base_url: String,
    model: String,
    api_key: SecretString,
    max_tokens: u32,
    timeout: Duration,
}

// The system prompt is a top-level field; `messages` only holds user/assistant turns.
#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    system: &'a str,
    messages: [Message<'a>; 1],
    max_tokens: u32,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
}

#[derive(Deserialize, Debug)]
struct Usage {
    input_tokens: u32,
    output_tokens: u32,
}

impl AnthropicProvider {
    /// Build the adapter, reading the key from config or `ANTHROPIC_API_KEY`.
    pub fn new(config: &Config) -> Result<Self> {
        let api_key = resolve_api_key(config.api_key.as_deref(), NAME, API_KEY_ENV, env_lookup)?;
        Self::with_api_key(config, api_key)
    }

    pub fn with_api_key(config: &Config, api_key: SecretString) -> Result<Self> {
        let timeout = Duration::from_secs(config.timeout_secs);
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: config
                .anthropic_base_url
                .as_deref()
                .unwrap_or(DEFAULT_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
            model: config.model.clone(),
            api_key,
            max_tokens: config.max_tokens,
            timeout,
        })
    }
}

#[async_trait]
impl LlmProvider for AnthropicProvider {
    async fn create_message(&self, prompt: &PromptPair) -> Result<String> {
        let url = format!("{}/messages", self.base_url);

        let response = self
            .client
            .post(&url)
            .header("x-api-key", self.api_key.expose_secret())
            .header("anthropic-version", API_VERSION)
            .json(&MessagesRequest {
                model: &self.model,
                system: &prompt.system,
                messages: [Message {
                    role: ROLE_USER,
                    content: &prompt.user,
                }],
                max_tokens: self.max_tokens,
            })
            .send()
            .await
            .map_err(|e| transport_error(NAME, self.timeout, e))?;

        if !response.status().is_success() {
            return Err(status_error(NAME, response).await);
        }

        let body: MessagesResponse = response
            .json()
            .await
            .map_err(|e| transport_error(NAME, self.timeout, e))?;

        if let Some(usage) = &body.usage {
            debug!(
                input_tokens = usage.input_tokens,
                output_tokens = usage.output_tokens,
                "anthropic usage"
            );
        }

        body.content
            .into_iter()
            .find(|block| block.block_type == "text")
            .and_then(|block| block.text)
            .ok_or_else(|| Error::EmptyCompletion {
                provider: NAME.into(),
            })
    }

    fn name(&self) -> &str {
        NAME
    }
}
