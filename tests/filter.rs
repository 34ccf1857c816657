// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: GPL-3.0-only

mod helpers;

use convit::config::Config;
use convit::domain::DiffSegment;
use convit::services::chunker::split_diff;
use convit::services::filter::LockFileFilter;
use helpers::staged_diff;
use proptest::prelude::*;

fn default_patterns() -> Vec<String> {
    Config::default().ignore_files
}

fn segment(path: &str) -> DiffSegment {
    DiffSegment::new(format!("a/{path} b/{path}\n+line"))
}

// ─── Scenarios ───────────────────────────────────────────────────────────────

#[test]
fn go_sum_is_dropped_and_main_go_kept() {
    let diff = staged_diff(&[
        ("go.sum", "+golang.org/x/net v0.1.0 h1:xyz="),
        ("main.go", "+func main() {}"),
    ]);
    let patterns = default_patterns();

    let filtered = LockFileFilter::new(&patterns).apply(split_diff(&diff).unwrap());

    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].header(), "a/main.go b/main.go");
}

#[test]
fn nested_lock_files_match_by_substring() {
    let patterns = default_patterns();
    let filter = LockFileFilter::new(&patterns);

    assert_eq!(
        filter.matching_pattern(&segment("web/package-lock.json")),
        Some("package-lock.json")
    );
    assert_eq!(
        filter.matching_pattern(&segment("crates/core/Cargo.lock")),
        Some("Cargo.lock")
    );
    assert_eq!(filter.matching_pattern(&segment("Cargo.toml")), None);
}

#[test]
fn only_the_header_is_matched() {
    let patterns = default_patterns();
    let seg = DiffSegment::new("a/README.md b/README.md\n+Run `yarn install` to refresh yarn.lock");

    assert_eq!(LockFileFilter::new(&patterns).matching_pattern(&seg), None);
}

#[test]
fn custom_patterns_replace_defaults() {
    let patterns = vec!["generated.rs".to_string()];
    let filter = LockFileFilter::new(&patterns);

    let kept = filter.apply(vec![segment("src/generated.rs"), segment("go.sum")]);
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].header(), "a/go.sum b/go.sum");
}

#[test]
fn empty_input_yields_empty_output() {
    let patterns = default_patterns();
    assert!(LockFileFilter::new(&patterns).apply(Vec::new()).is_empty());
}

#[test]
fn large_input_keeps_order() {
    let patterns = default_patterns();
    let segments: Vec<_> = (0..2_000)
        .map(|i| {
            if i % 7 == 0 {
                segment(&format!("pkg{i}/yarn.lock"))
            } else {
                segment(&format!("src/file{i}.rs"))
            }
        })
        .collect();
    let expected: Vec<_> = segments
        .iter()
        .filter(|s| !s.header().contains("yarn.lock"))
        .cloned()
        .collect();

    let kept = LockFileFilter::new(&patterns).apply(segments);

    assert_eq!(kept, expected);
}

// ─── Properties ──────────────────────────────────────────────────────────────

fn path_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z]{1,6}/[a-z]{1,6}\\.(rs|ts|py)",
        prop::sample::select(vec![
            "yarn.lock",
            "go.sum",
            "Cargo.lock",
            "app/Gemfile.lock",
            "composer.lock",
        ])
        .prop_map(str::to_string),
    ]
}

proptest! {
    #[test]
    fn kept_exactly_the_non_matching_segments(
        paths in prop::collection::vec(path_strategy(), 0..60)
    ) {
        let patterns = default_patterns();
        let segments: Vec<_> = paths.iter().map(|p| segment(p)).collect();

        let kept = LockFileFilter::new(&patterns).apply(segments.clone());

        let expected: Vec<_> = segments
            .into_iter()
            .filter(|s| !patterns.iter().any(|p| s.header().contains(p.as_str())))
            .collect();
        prop_assert_eq!(kept, expected);
    }
}
