// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{
    LlmProvider, ROLE_SYSTEM, ROLE_USER, env_lookup, resolve_api_key, status_error,
    transport_error,
};
use crate::config::Config;
use crate::domain::PromptPair;
use crate::error::{Error, Result};

pub const API_KEY_ENV: &str = "OPENAI_API_KEY";
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const NAME: &str = "openai";

pub struct OpenAiProvider {
    client: Client,
    base_url: String,
    model: String,
    api_key: SecretString,
    timeout: Duration,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [Message<'a>; 2],
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize, Debug)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

impl OpenAiProvider {
    /// Build the adapter, reading the key from config or `OPENAI_API_KEY`.
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
                .openai_base_url
                .as_deref()
                .unwrap_or(DEFAULT_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
            model: config.model.clone(),
            api_key,
            timeout,
        })
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    async fn create_message(&self, prompt: &PromptPair) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.api_key.expose_secret())
            .json(&ChatRequest {
                model: &self.model,
                messages: [
                    Message {
                        role: ROLE_SYSTEM,
                        content: &prompt.system,
                    },
                    Message {
                        role: ROLE_USER,
                        content: &prompt.user,
                    },
                ],
            })
            .send()
            .await
            .map_err(|e| transport_error(NAME, self.timeout, e))?;

        if !response.status().is_success() {
            return Err(status_error(NAME, response).await);
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| transport_error(NAME, self.timeout, e))?;

        if let Some(usage) = &body.usage {
            debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                total_tokens = usage.total_tokens,
                "openai usage"
            );
        }

        let choice = body
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| Error::EmptyCompletion {
                provider: NAME.into(),
            })?;

        Ok(choice.message.content.unwrap_or_default())
    }

    fn name(&self) -> &str {
        NAME
    }
}
