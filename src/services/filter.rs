// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0

use rayon::prelude::*;
use tracing::debug;

use crate::domain::DiffSegment;

/// Drops diff segments for lock files and other generated artifacts.
///
/// Every segment is checked independently on the rayon pool. Rayon's
/// `collect` into a `Vec` keeps sequential order, so the output is the input
/// with ignored segments removed.
pub struct LockFileFilter<'a> {
    patterns: &'a [String],
}

impl<'a> LockFileFilter<'a> {
    pub fn new(patterns: &'a [String]) -> Self {
        Self { patterns }
    }

    /// The first ignore pattern contained in the segment header, if any.
    pub fn matching_pattern(&self, segment: &DiffSegment) -> Option<&'a str> {
        let header = segment.header();
        self.patterns
            .iter()
            .find(|pattern| header.contains(pattern.as_str()))
            .map(String::as_str)
    }

    pub fn apply(&self, segments: Vec<DiffSegment>) -> Vec<DiffSegment> {
        let total = segments.len();

        let kept: Vec<DiffSegment> = segments
            .into_par_iter()
            .filter(|segment| match self.matching_pattern(segment) {
                Some(pattern) => {
                    debug!(pattern, header = segment.header(), "ignoring");
                    false
                }
                None => {
                    debug!(header = segment.header(), "using");
                    true
                }
            })
            .collect();

        debug!(total, kept = kept.len(), "lock file filter applied");
        kept
    }
}
