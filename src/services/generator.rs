// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::config::{Config, RegeneratePolicy};
use crate::domain::{DiffSegment, GenerationMode, PromptPair};
use crate::error::{Error, Result};
use crate::services::chunker::split_diff;
use crate::services::filter::LockFileFilter;
use crate::services::llm::LlmProvider;
use crate::services::prompt::PromptAssembler;

/// The user's verdict on a generated message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Accept,
    Regenerate,
}

/// The interactive side of the loop: showing drafts and collecting verdicts.
pub trait Interaction {
    fn confirm(&mut self, message: &str) -> Result<Decision>;

    /// Offer to edit the partial message before regenerating. `None` keeps it.
    fn revise_message(&mut self, current: &str) -> Result<Option<String>>;

    fn request_started(&mut self) {}

    fn request_finished(&mut self) {}
}

/// Runs prompt assembly, the provider request and the accept/regenerate loop.
pub struct Generator<'a> {
    config: &'a Config,
    provider: &'a dyn LlmProvider,
    cancel: CancellationToken,
    timeout: Duration,
}

impl<'a> Generator<'a> {
    pub fn new(config: &'a Config, provider: &'a dyn LlmProvider, cancel: CancellationToken) -> Self {
        Self {
            config,
            provider,
            cancel,
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    /// Override the request deadline taken from `timeout_secs`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Chunk the raw diff and drop lock-file segments.
    pub fn prepare_diff(&self, raw_diff: &str) -> Result<Vec<DiffSegment>> {
        let segments = split_diff(raw_diff)?;
        let filtered = LockFileFilter::new(&self.config.ignore_files).apply(segments);

        if filtered.is_empty() {
            debug!("every staged file matched the ignore list");
            return Err(Error::EmptyOrMalformedDiff);
        }

        Ok(filtered)
    }

    pub fn assemble(
        &self,
        segments: &[DiffSegment],
        mode: GenerationMode,
        partial: Option<&str>,
    ) -> Result<PromptPair> {
        PromptAssembler::new(&self.config.system_message, &self.config.commit_types)
            .assemble(segments, mode, partial)
    }

    /// Generate a message for `raw_diff` and loop until the user accepts one.
    ///
    /// Rejections go straight back to the provider. Failed requests are
    /// returned to the caller and never retried here.
    pub async fn generate_commit_message(
        &self,
        raw_diff: &str,
        mode: GenerationMode,
        partial: Option<&str>,
        ui: &mut dyn Interaction,
    ) -> Result<String> {
        let segments = self.prepare_diff(raw_diff)?;
        let mut partial = partial.map(str::to_owned);
        let mut prompt = self.assemble(&segments, mode, partial.as_deref())?;
        debug!(prompt_chars = prompt.len(), ?mode, "prompt assembled");

        let mut attempt = 1usize;
        loop {
            ui.request_started();
            let result = self.request(&prompt).await;
            ui.request_finished();

            let draft = result?;
            let draft = draft.trim();
            if draft.is_empty() {
                return Err(Error::EmptyCompletion {
                    provider: self.provider.name().into(),
                });
            }

            match ui.confirm(draft)? {
                Decision::Accept => {
                    info!(attempt, "message accepted");
                    return Ok(draft.to_string());
                }
                Decision::Regenerate => {
                    attempt += 1;
                    debug!(attempt, "regenerating");
                }
            }

            if self.config.regenerate == RegeneratePolicy::Reassemble
                && mode == GenerationMode::ScopeOnly
                && let Some(current) = partial.clone()
                && let Some(revised) = ui.revise_message(&current)?
                && revised != current
            {
                debug!("partial message changed, reassembling prompt");
                prompt = self.assemble(&segments, mode, Some(&revised))?;
                partial = Some(revised);
            }
        }
    }

    /// One provider call under the configured deadline, abandoned on Ctrl+C.
    pub async fn request(&self, prompt: &PromptPair) -> Result<String> {
        if self.cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }

        let timeout = self.timeout;
        tokio::select! {
            _ = self.cancel.cancelled() => Err(Error::Cancelled),
            result = tokio::time::timeout(timeout, self.provider.create_message(prompt)) => {
                match result {
                    Ok(inner) => inner,
                    Err(_) => {
                        debug!(provider = self.provider.name(), ?timeout, "deadline exceeded");
                        Err(Error::RequestTimeout {
                            provider: self.provider.name().into(),
                            timeout,
                        })
                    }
                }
            }
        }
    }
}
