// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: GPL-3.0-only

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use convit::domain::PromptPair;
use convit::error::{Error, Result};
use convit::services::generator::{Decision, Interaction};
use convit::services::llm::LlmProvider;

/// One file's block as `git diff --cached` prints it.
#[allow(dead_code)]
pub fn file_diff(path: &str, body: &str) -> String {
    format!(
        "diff --git a/{path} b/{path}\nindex 83db48f..bf269f4 100644\n--- a/{path}\n+++ b/{path}\n@@ -1,3 +1,3 @@\n{body}\n"
    )
}

/// Concatenate per-file blocks into one staged diff.
#[allow(dead_code)]
pub fn staged_diff(files: &[(&str, &str)]) -> String {
    files
        .iter()
        .map(|(path, body)| file_diff(path, body))
        .collect()
}

#[allow(dead_code)]
enum Behavior {
    Reply(Mutex<VecDeque<String>>),
    Slow(Duration),
    Fail(String),
}

/// Provider double that counts calls and records every prompt it receives.
#[allow(dead_code)]
pub struct FakeProvider {
    behavior: Behavior,
    calls: AtomicUsize,
    prompts: Mutex<Vec<PromptPair>>,
}

#[allow(dead_code)]
impl FakeProvider {
    /// Replies with each entry in turn, repeating the last one when exhausted.
    pub fn replying(replies: &[&str]) -> Self {
        Self::with(Behavior::Reply(Mutex::new(
            replies.iter().map(|r| r.to_string()).collect(),
        )))
    }

    pub fn slow(delay: Duration) -> Self {
        Self::with(Behavior::Slow(delay))
    }

    pub fn failing(message: &str) -> Self {
        Self::with(Behavior::Fail(message.to_string()))
    }

    fn with(behavior: Behavior) -> Self {
        Self {
            behavior,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<PromptPair> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmProvider for FakeProvider {
    async fn create_message(&self, prompt: &PromptPair) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.clone());

        match &self.behavior {
            Behavior::Reply(queue) => {
                let mut queue = queue.lock().unwrap();
                let reply = if queue.len() > 1 {
                    queue.pop_front()
                } else {
                    queue.front().cloned()
                };
                Ok(reply.unwrap_or_default())
            }
            Behavior::Slow(delay) => {
                tokio::time::sleep(*delay).await;
                Ok("feat: too late".into())
            }
            Behavior::Fail(message) => Err(Error::Provider {
                provider: "fake".into(),
                message: message.clone(),
            }),
        }
    }

    fn name(&self) -> &str {
        "fake"
    }
}

/// Interaction double answering from a script and recording what it was shown.
#[allow(dead_code)]
#[derive(Default)]
pub struct ScriptedInteraction {
    decisions: VecDeque<Decision>,
    revisions: VecDeque<Option<String>>,
    pub shown: Vec<String>,
    pub revise_calls: usize,
    pub started: usize,
    pub finished: usize,
}

#[allow(dead_code)]
impl ScriptedInteraction {
    pub fn new(decisions: &[Decision]) -> Self {
        Self {
            decisions: decisions.iter().copied().collect(),
            ..Self::default()
        }
    }

    /// Reject `n` drafts, then accept.
    pub fn rejecting(n: usize) -> Self {
        let mut decisions = vec![Decision::Regenerate; n];
        decisions.push(Decision::Accept);
        Self::new(&decisions)
    }

    pub fn with_revisions(mut self, revisions: &[Option<&str>]) -> Self {
        self.revisions = revisions.iter().map(|r| r.map(str::to_string)).collect();
        self
    }
}

impl Interaction for ScriptedInteraction {
    fn confirm(&mut self, message: &str) -> Result<Decision> {
        self.shown.push(message.to_string());
        self.decisions.pop_front().ok_or(Error::Cancelled)
    }

    fn revise_message(&mut self, _current: &str) -> Result<Option<String>> {
        self.revise_calls += 1;
        Ok(self.revisions.pop_front().flatten())
    }

    fn request_started(&mut self) {
        self.started += 1;
    }

    fn request_finished(&mut self) {
        self.finished += 1;
    }
}
