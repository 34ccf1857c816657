// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0

use crate::domain::DiffSegment;
use crate::error::{Error, Result};

/// Per-file boundary emitted by `git diff`.
pub const FILE_MARKER: &str = "diff --git";

/// Split a raw unified diff into one segment per changed file.
///
/// Only lines that *start* with the marker open a new segment; content lines
/// in a unified diff carry a `+`, `-` or space prefix, so a marker quoted
/// inside a file never splits it. Anything before the first marker is dropped.
///
/// Lines are split on `\n` alone so CRLF content survives byte for byte;
/// only the ends of each segment are trimmed.
pub fn split_diff(raw: &str) -> Result<Vec<DiffSegment>> {
    let mut segments = Vec::new();
    let mut current: Option<Vec<&str>> = None;

    for line in raw.split('\n') {
        if let Some(rest) = line.strip_prefix(FILE_MARKER) {
            if let Some(lines) = current.take() {
                segments.push(finish(&lines));
            }
            current = Some(vec![rest]);
        } else if let Some(lines) = current.as_mut() {
            lines.push(line);
        }
    }

    if let Some(lines) = current {
        segments.push(finish(&lines));
    }

    if segments.is_empty() {
        return Err(Error::EmptyOrMalformedDiff);
    }

    Ok(segments)
}

fn finish(lines: &[&str]) -> DiffSegment {
    DiffSegment::new(lines.join("\n").trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_is_stripped_from_header() {
        let segments = split_diff("diff --git a/x.rs b/x.rs\n+1\n").unwrap();
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].header(), "a/x.rs b/x.rs");
        assert_eq!(segments[0].as_str(), "a/x.rs b/x.rs\n+1");
    }

    #[test]
    fn preamble_before_first_marker_is_dropped() {
        let raw = "warning: LF will be replaced\ndiff --git a/y b/y\n-old\n+new";
        let segments = split_diff(raw).unwrap();
        assert_eq!(segments.len(), 1);
        assert!(!segments[0].as_str().contains("warning"));
    }

    #[test]
    fn crlf_content_is_kept() {
        let raw = "diff --git a/run.sh b/run.sh\r\n+echo a\r\n+echo b\r\n";
        let segments = split_diff(raw).unwrap();
        assert_eq!(segments[0].header(), "a/run.sh b/run.sh");
        assert_eq!(segments[0].as_str(), "a/run.sh b/run.sh\r\n+echo a\r\n+echo b");
    }

    #[test]
    fn whitespace_only_is_malformed() {
        assert!(matches!(
            split_diff("  \n\t\n"),
            Err(Error::EmptyOrMalformedDiff)
        ));
    }
}
