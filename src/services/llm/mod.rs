// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
// SPDX-License-Identifier: GPL-3.0-only

use std::time::Duration;

use async_trait::async_trait;
use secrecy::SecretString;

pub mod anthropic;
pub mod openai;

use crate::config::{Config, Provider};
use crate::domain::PromptPair;
use crate::error::{Error, Result};

pub(crate) const ROLE_SYSTEM: &str = "system";
pub(crate) const ROLE_USER: &str = "user";

/// A backend that turns a prompt pair into a commit message draft.
///
/// Implementations issue exactly one request per call and never retry;
/// deadlines and regeneration are the caller's business.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    async fn create_message(&self, prompt: &PromptPair) -> Result<String>;

    fn name(&self) -> &str;
}

/// Which adapter to build and for which model. Resolved once per process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderIdentity {
    pub provider: Provider,
    pub model: String,
}

impl ProviderIdentity {
    pub fn from_config(config: &Config) -> Self {
        Self {
            provider: config.resolved_provider(),
            model: config.model.clone(),
        }
    }

    /// Environment variable holding this backend's API key.
    pub fn env_var(&self) -> &'static str {
        match self.provider {
            Provider::OpenAI => openai::API_KEY_ENV,
            Provider::Anthropic => anthropic::API_KEY_ENV,
        }
    }
}

pub fn create_provider(config: &Config) -> Result<Box<dyn LlmProvider>> {
    let identity = ProviderIdentity::from_config(config);
    tracing::debug!(provider = %identity.provider, model = %identity.model, "creating provider");

    match identity.provider {
        Provider::OpenAI => Ok(Box::new(openai::OpenAiProvider::new(config)?)),
        Provider::Anthropic => Ok(Box::new(anthropic::AnthropicProvider::new(config)?)),
    }
}

/// Pick the API key: an explicit `api_key` from config wins, then `env_var`.
pub fn resolve_api_key(
    configured: Option<&str>,
    provider: &str,
    env_var: &'static str,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<SecretString> {
    configured
        .filter(|key| !key.trim().is_empty())
        .map(str::to_owned)
        .or_else(|| lookup(env_var))
        .filter(|key| !key.trim().is_empty())
        .map(SecretString::from)
        .ok_or_else(|| Error::MissingCredential {
            provider: provider.into(),
            env_var,
        })
}

pub(crate) fn env_lookup(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Map a reqwest failure to the crate's timeout or transport error.
pub(crate) fn transport_error(provider: &str, timeout: Duration, e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::RequestTimeout {
            provider: provider.into(),
            timeout,
        }
    } else {
        Error::Provider {
            provider: provider.into(),
            message: e.to_string(),
        }
    }
}

/// Error for a non-2xx response, carrying the backend's own message.
pub(crate) async fn status_error(provider: &str, response: reqwest::Response) -> Error {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Error::Provider {
        provider: provider.into(),
        message: format!("HTTP {status}: {body}"),
    }
}
