// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: GPL-3.0-only

/// One file's change block from a unified diff, with the `diff --git`
/// marker stripped and surrounding whitespace trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffSegment {
    text: String,
}

impl DiffSegment {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// First line of the segment, e.g. `a/src/main.rs b/src/main.rs`.
    pub fn header(&self) -> &str {
        self.text.lines().next().unwrap_or("")
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn lines(&self) -> std::str::Lines<'_> {
        self.text.lines()
    }
}

impl std::fmt::Display for DiffSegment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// Join segments back into a single diff body, one newline between files.
pub fn join_segments(segments: &[DiffSegment]) -> String {
    segments
        .iter()
        .map(DiffSegment::as_str)
        .collect::<Vec<_>>()
        .join("\n")
}
