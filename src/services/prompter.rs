// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0

use std::sync::LazyLock;
use std::time::Duration;

use console::style;
use dialoguer::{Confirm, Editor, Input, Select};
use indicatif::{ProgressBar, ProgressStyle};
use regex::Regex;

use crate::config::{MODEL_CHOICES, Preferences};
use crate::domain::{CommitTypeEntry, lowercase_first_letter};
use crate::error::{Error, Result};
use crate::services::generator::{Decision, Interaction};

static SCOPE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9][a-z0-9\-_/.]*$").unwrap());

/// Terminal front end: spinner while waiting, dialoguer prompts for everything else.
#[derive(Default)]
pub struct TerminalPrompter {
    spinner: Option<ProgressBar>,
    /// Lowercase the first letter of revised partial messages
    lowercase: bool,
}

impl TerminalPrompter {
    pub fn new(lowercase: bool) -> Self {
        Self {
            spinner: None,
            lowercase,
        }
    }

    pub fn select_commit_type<'c>(
        &self,
        catalogue: &'c [CommitTypeEntry],
    ) -> Result<&'c CommitTypeEntry> {
        let labels: Vec<String> = catalogue.iter().map(CommitTypeEntry::label).collect();

        let index = Select::new()
            .with_prompt("Select the type of commit")
            .items(&labels)
            .default(0)
            .interact()?;

        Ok(&catalogue[index])
    }

    /// Optional scope; an empty answer means none. Invalid scopes are asked again.
    pub fn input_scope(&self) -> Result<Option<String>> {
        let scope: String = Input::new()
            .with_prompt("Provide an optional scope (leave empty for none)")
            .allow_empty(true)
            .validate_with(|input: &String| check_scope(input))
            .interact_text()?;

        parse_scope(&scope)
    }

    pub fn input_message(&self) -> Result<String> {
        let message: String = Input::new()
            .with_prompt("Enter your commit message")
            .allow_empty(true)
            .interact_text()?;

        normalize_message(&message, self.lowercase)
    }

    /// `config init`: the toggles used by the manual commit flow.
    pub fn edit_commit_preferences(&self, prefs: &mut Preferences) -> Result<()> {
        prefs.lowercase_first_letter = Confirm::new()
            .with_prompt("Lowercase first letter of commit message?")
            .default(prefs.lowercase_first_letter)
            .interact()?;

        prefs.prompt_for_subtype = Confirm::new()
            .with_prompt("Prompt for optional sub-type?")
            .default(prefs.prompt_for_subtype)
            .interact()?;

        Ok(())
    }

    /// `config init ai`: default model and system message.
    pub fn edit_ai_preferences(&self, prefs: &mut Preferences) -> Result<()> {
        let mut models: Vec<&str> = MODEL_CHOICES.to_vec();
        if !models.contains(&prefs.model.as_str()) {
            models.push(&prefs.model);
        }
        let current = models.iter().position(|m| *m == prefs.model).unwrap_or(0);

        let index = Select::new()
            .with_prompt("Model")
            .items(&models)
            .default(current)
            .interact()?;
        let model = models[index].to_string();

        let edit = Confirm::new()
            .with_prompt("Edit the system message?")
            .default(false)
            .interact()?;
        if edit
            && let Some(message) = Editor::new().edit(&prefs.system_message)?
            && !message.trim().is_empty()
        {
            prefs.system_message = message.trim().to_string();
        }

        prefs.model = model;
        Ok(())
    }
}

impl Interaction for TerminalPrompter {
    fn confirm(&mut self, message: &str) -> Result<Decision> {
        eprintln!("\n{}", style("Generated commit message:").bold());
        eprintln!("{}", style(message).green());
        eprintln!();

        let accepted = Confirm::new()
            .with_prompt("Do you want to commit this message?")
            .default(true)
            .interact()?;

        Ok(if accepted {
            Decision::Accept
        } else {
            Decision::Regenerate
        })
    }

    fn revise_message(&mut self, current: &str) -> Result<Option<String>> {
        let revised: String = Input::new()
            .with_prompt("Commit message (edit or press enter to keep)")
            .with_initial_text(current)
            .allow_empty(true)
            .interact_text()?;

        if revised.trim().is_empty() {
            return Ok(None);
        }

        normalize_message(&revised, self.lowercase).map(Some)
    }

    fn request_started(&mut self) {
        let spinner = ProgressBar::new_spinner();
        if let Ok(template) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
            spinner.set_style(template);
        }
        spinner.set_message("Generating your commit message...");
        spinner.enable_steady_tick(Duration::from_millis(100));
        self.spinner = Some(spinner);
    }

    fn request_finished(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }
}

/// Accepts the first draft without asking (`--yes`).
#[derive(Debug, Default)]
pub struct AutoAccept;

impl Interaction for AutoAccept {
    fn confirm(&mut self, _message: &str) -> Result<Decision> {
        Ok(Decision::Accept)
    }

    fn revise_message(&mut self, _current: &str) -> Result<Option<String>> {
        Ok(None)
    }
}

/// Trim, reject empty, and optionally lowercase the first letter.
pub fn normalize_message(raw: &str, lowercase: bool) -> Result<String> {
    let message = raw.trim();
    if message.is_empty() {
        return Err(Error::EmptyMessage);
    }

    Ok(if lowercase {
        lowercase_first_letter(message)
    } else {
        message.to_string()
    })
}

pub fn parse_scope(raw: &str) -> Result<Option<String>> {
    let scope = raw.trim();
    if scope.is_empty() {
        return Ok(None);
    }

    if !SCOPE_REGEX.is_match(scope) {
        return Err(Error::InvalidScope(scope.to_string()));
    }

    Ok(Some(scope.to_string()))
}

/// Validator for the scope prompt; the message is shown before re-asking.
pub fn check_scope(input: &str) -> std::result::Result<(), String> {
    parse_scope(input)
        .map(|_| ())
        .map_err(|_| "Use lowercase letters, digits and -_/. only".to_string())
}

/// `type`, `type(scope)`, or the entry's own `type(subtype)`.
pub fn commit_prefix(entry: &CommitTypeEntry, scope: Option<&str>) -> String {
    match scope {
        Some(scope) if !entry.has_subtype() => format!("{}({})", entry.commit_type, scope),
        _ => entry.value(),
    }
}
