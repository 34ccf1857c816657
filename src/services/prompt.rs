// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
// SPDX-License-Identifier: GPL-3.0-only

use crate::domain::{CommitTypeEntry, DiffSegment, GenerationMode, PromptPair, join_segments};
use crate::error::{Error, Result};

const TYPES_HEADING: &str = "Example of the types with the description when they should be used:";

const FULL_SUFFIX: &str = "You will be given a diff of the changes made to the codebase. You will need to generate a full commit message that includes the type, optional scope, and description of the changes.";

const SCOPE_ONLY_SUFFIX: &str = "It is your job to come up with only the type and optional scope based on the provided commit message and staged changes (diff) and then reply with the full commit message. Don't touch the original provided commit message, just include it and don't add stuff to it.";

/// Builds the system/user prompt pair. Pure: same inputs, same bytes.
pub struct PromptAssembler<'a> {
    system_message: &'a str,
    catalogue: &'a [CommitTypeEntry],
}

impl<'a> PromptAssembler<'a> {
    pub fn new(system_message: &'a str, catalogue: &'a [CommitTypeEntry]) -> Self {
        Self {
            system_message,
            catalogue,
        }
    }

    pub fn assemble(
        &self,
        segments: &[DiffSegment],
        mode: GenerationMode,
        partial: Option<&str>,
    ) -> Result<PromptPair> {
        let diff = join_segments(segments);

        let user = match mode {
            GenerationMode::Full => diff,
            GenerationMode::ScopeOnly => {
                let message = partial
                    .filter(|m| !m.trim().is_empty())
                    .ok_or(Error::EmptyMessage)?;
                format!("message: {message}\n\ndiff: {diff}")
            }
        };

        Ok(PromptPair {
            system: self.system_prompt(mode),
            user,
        })
    }

    pub fn system_prompt(&self, mode: GenerationMode) -> String {
        let suffix = match mode {
            GenerationMode::Full => FULL_SUFFIX,
            GenerationMode::ScopeOnly => SCOPE_ONLY_SUFFIX,
        };

        format!(
            "{}\n\n{}\n\n{}",
            self.system_message,
            self.type_listing(),
            suffix
        )
    }

    fn type_listing(&self) -> String {
        let mut listing = format!("{TYPES_HEADING}\n");
        for entry in self.catalogue {
            listing.push_str(&format!("- {}: {}\n", entry.commit_type, entry.description));
        }
        listing
    }
}
