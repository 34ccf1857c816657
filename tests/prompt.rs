// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: GPL-3.0-only

use convit::config::SYSTEM_MESSAGE;
use convit::domain::{CommitTypeEntry, DiffSegment, GenerationMode, default_catalogue};
use convit::error::Error;
use convit::services::prompt::PromptAssembler;

fn segments() -> Vec<DiffSegment> {
    vec![
        DiffSegment::new("a/main.go b/main.go\n+func main() {}"),
        DiffSegment::new("a/util.go b/util.go\n-func old() {}"),
    ]
}

// ─── System prompt ───────────────────────────────────────────────────────────

#[test]
fn system_prompt_has_base_listing_and_suffix() {
    let catalogue = vec![
        CommitTypeEntry::new("feat", "Adds or removes a new feature"),
        CommitTypeEntry::new("fix", "Fixes a bug"),
    ];
    let assembler = PromptAssembler::new("BASE", &catalogue);

    let system = assembler.system_prompt(GenerationMode::Full);

    let expected_head = "BASE\n\nExample of the types with the description when they should be used:\n- feat: Adds or removes a new feature\n- fix: Fixes a bug\n\n\n";
    assert!(
        system.starts_with(expected_head),
        "unexpected layout:\n{system}"
    );
    assert!(system.ends_with("type, optional scope, and description of the changes."));
}

#[test]
fn scope_only_suffix_forbids_touching_the_message() {
    let catalogue = default_catalogue();
    let system =
        PromptAssembler::new(SYSTEM_MESSAGE, &catalogue).system_prompt(GenerationMode::ScopeOnly);

    assert!(system.starts_with(SYSTEM_MESSAGE));
    assert!(system.contains("only the type and optional scope"));
    assert!(system.ends_with("don't add stuff to it."));
}

#[test]
fn every_catalogue_entry_is_listed_by_type() {
    let catalogue = default_catalogue();
    let system =
        PromptAssembler::new(SYSTEM_MESSAGE, &catalogue).system_prompt(GenerationMode::Full);

    for entry in &catalogue {
        let line = format!("- {}: {}\n", entry.commit_type, entry.description);
        assert!(system.contains(&line), "missing listing line {line:?}");
    }
    assert!(system.contains("- chore: Add, remove or update dependencies\n"));
}

// ─── User prompt ─────────────────────────────────────────────────────────────

#[test]
fn full_mode_user_prompt_is_the_joined_diff() {
    let catalogue = default_catalogue();
    let prompt = PromptAssembler::new(SYSTEM_MESSAGE, &catalogue)
        .assemble(&segments(), GenerationMode::Full, Some("ignored"))
        .unwrap();

    assert_eq!(
        prompt.user,
        "a/main.go b/main.go\n+func main() {}\na/util.go b/util.go\n-func old() {}"
    );
}

#[test]
fn scope_only_user_prompt_wraps_message_and_diff() {
    let catalogue = default_catalogue();
    let segs = segments();
    let prompt = PromptAssembler::new(SYSTEM_MESSAGE, &catalogue)
        .assemble(&segs, GenerationMode::ScopeOnly, Some("add retry logic"))
        .unwrap();

    let filtered = convit::domain::join_segments(&segs);
    assert_eq!(prompt.user, format!("message: add retry logic\n\ndiff: {filtered}"));
}

#[test]
fn scope_only_without_message_is_rejected() {
    let catalogue = default_catalogue();
    let assembler = PromptAssembler::new(SYSTEM_MESSAGE, &catalogue);

    for partial in [None, Some(""), Some("   ")] {
        let result = assembler.assemble(&segments(), GenerationMode::ScopeOnly, partial);
        assert!(
            matches!(result, Err(Error::EmptyMessage)),
            "expected EmptyMessage for {partial:?}"
        );
    }
}

// ─── Purity ──────────────────────────────────────────────────────────────────

#[test]
fn identical_inputs_give_identical_prompts() {
    let catalogue = default_catalogue();
    let assembler = PromptAssembler::new(SYSTEM_MESSAGE, &catalogue);

    for (mode, partial) in [
        (GenerationMode::Full, None),
        (GenerationMode::ScopeOnly, Some("add retry logic")),
    ] {
        let first = assembler.assemble(&segments(), mode, partial).unwrap();
        let second = assembler.assemble(&segments(), mode, partial).unwrap();
        assert_eq!(first, second);
    }
}
