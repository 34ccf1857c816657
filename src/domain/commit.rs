// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: GPL-3.0-only

use serde::{Deserialize, Serialize};

/// A catalogue entry describing when a conventional commit type applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitTypeEntry {
    #[serde(rename = "type")]
    pub commit_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,

    pub description: String,
}

impl CommitTypeEntry {
    pub fn new(commit_type: &str, description: &str) -> Self {
        Self {
            commit_type: commit_type.into(),
            subtype: None,
            description: description.into(),
        }
    }

    pub fn with_subtype(commit_type: &str, subtype: &str, description: &str) -> Self {
        Self {
            commit_type: commit_type.into(),
            subtype: Some(subtype.into()),
            description: description.into(),
        }
    }

    pub fn has_subtype(&self) -> bool {
        self.subtype.as_deref().is_some_and(|s| !s.is_empty())
    }

    /// The commit prefix this entry stands for: `feat` or `chore(deps)`.
    pub fn value(&self) -> String {
        match self.subtype.as_deref() {
            Some(sub) if !sub.is_empty() => format!("{}({})", self.commit_type, sub),
            _ => self.commit_type.clone(),
        }
    }

    /// Menu text: `chore(deps): Add, remove or update dependencies`.
    pub fn label(&self) -> String {
        format!("{}: {}", self.value(), self.description)
    }
}

pub fn default_catalogue() -> Vec<CommitTypeEntry> {
    vec![
        CommitTypeEntry::new("chore", "Changes that don't change source code or tests"),
        CommitTypeEntry::new("feat", "Adds or removes a new feature"),
        CommitTypeEntry::new("fix", "Fixes a bug"),
        CommitTypeEntry::new(
            "refactor",
            "A code change that neither fixes a bug nor adds a feature, eg. renaming a variable, remove dead code, etc.",
        ),
        CommitTypeEntry::new("docs", "Documentation only changes"),
        CommitTypeEntry::new("style", "Changes the style of the code eg. linting"),
        CommitTypeEntry::new("perf", "Improves the performance of the code"),
        CommitTypeEntry::new("test", "Adding missing tests or correcting existing tests"),
        CommitTypeEntry::new(
            "build",
            "Changes that affect the build system or external dependencies (example scopes: gulp, broccoli, npm)",
        ),
        CommitTypeEntry::new("ci", "Changes to CI configuration files and scripts"),
        CommitTypeEntry::new("revert", "Reverts a previous commit"),
        CommitTypeEntry::with_subtype("chore", "release", "Release / Version tags"),
        CommitTypeEntry::with_subtype("chore", "deps", "Add, remove or update dependencies"),
        CommitTypeEntry::with_subtype(
            "chore",
            "dev-deps",
            "Add, remove or update development dependencies",
        ),
        CommitTypeEntry::with_subtype("chore", "types", "Add or update types."),
    ]
}

/// `{prefix}: {message}` where prefix is `type` or `type(scope)`.
pub fn format_conventional(prefix: &str, message: &str) -> String {
    format!("{}: {}", prefix, message)
}

/// Lowercase only the first character, leaving the rest untouched.
pub fn lowercase_first_letter(message: &str) -> String {
    let mut chars = message.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
