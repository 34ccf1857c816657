// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
// SPDX-License-Identifier: GPL-3.0-only

/// What the backend is asked to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationMode {
    /// Type, optional scope and description, all inferred from the diff.
    Full,
    /// Only type and scope; the user's message is kept verbatim.
    ScopeOnly,
}

impl GenerationMode {
    pub fn from_partial(partial: bool) -> Self {
        if partial { Self::ScopeOnly } else { Self::Full }
    }
}

/// The fully assembled instruction and content sent to a provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptPair {
    pub system: String,
    pub user: String,
}

impl PromptPair {
    pub fn len(&self) -> usize {
        self.system.len() + self.user.len()
    }

    pub fn is_empty(&self) -> bool {
        self.system.is_empty() && self.user.is_empty()
    }
}
