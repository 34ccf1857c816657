// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0

#![no_main]

use libfuzzer_sys::fuzz_target;

use convit::config::DEFAULT_IGNORE_FILES;
use convit::services::chunker::split_diff;
use convit::services::filter::LockFileFilter;

fuzz_target!(|data: &[u8]| {
    let Ok(raw) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(segments) = split_diff(raw) else {
        return;
    };
    assert!(!segments.is_empty());

    let patterns: Vec<String> = DEFAULT_IGNORE_FILES.iter().map(|s| s.to_string()).collect();
    let total = segments.len();
    let kept = LockFileFilter::new(&patterns).apply(segments);
    assert!(kept.len() <= total);
    for segment in &kept {
        assert!(!patterns.iter().any(|p| segment.header().contains(p.as_str())));
    }
});
