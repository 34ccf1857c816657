// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: GPL-3.0-only

use convit::domain::{
    CommitTypeEntry, default_catalogue, format_conventional, lowercase_first_letter,
};

#[test]
fn default_catalogue_has_fifteen_entries() {
    let catalogue = default_catalogue();
    assert_eq!(catalogue.len(), 15);
    assert_eq!(catalogue[0].commit_type, "chore");
    assert!(
        catalogue.iter().all(|e| !e.description.is_empty()),
        "every entry needs a description"
    );
}

#[test]
fn catalogue_values_are_unique() {
    let catalogue = default_catalogue();
    let mut values: Vec<_> = catalogue.iter().map(CommitTypeEntry::value).collect();
    values.sort();
    values.dedup();
    assert_eq!(values.len(), catalogue.len());
}

#[test]
fn subtype_entries_render_with_parentheses() {
    let catalogue = default_catalogue();
    let with_sub: Vec<_> = catalogue
        .iter()
        .filter(|e| e.has_subtype())
        .map(CommitTypeEntry::value)
        .collect();
    assert_eq!(
        with_sub,
        vec!["chore(release)", "chore(deps)", "chore(dev-deps)", "chore(types)"]
    );
}

#[test]
fn label_snapshot() {
    let entry = CommitTypeEntry::with_subtype("chore", "deps", "Add, remove or update dependencies");
    insta::assert_snapshot!(entry.label(), @"chore(deps): Add, remove or update dependencies");

    let entry = CommitTypeEntry::new("fix", "Fixes a bug");
    insta::assert_snapshot!(entry.label(), @"fix: Fixes a bug");
}

#[test]
fn empty_subtype_is_treated_as_none() {
    let entry = CommitTypeEntry::with_subtype("feat", "", "x");
    assert!(!entry.has_subtype());
    assert_eq!(entry.value(), "feat");
}

#[test]
fn format_conventional_joins_prefix_and_message() {
    assert_eq!(format_conventional("feat", "add retry"), "feat: add retry");
    assert_eq!(
        format_conventional("fix(net)", "handle resets"),
        "fix(net): handle resets"
    );
}

#[test]
fn lowercase_first_letter_only_touches_first_char() {
    assert_eq!(lowercase_first_letter("Add HTTP retry"), "add HTTP retry");
    assert_eq!(lowercase_first_letter("already"), "already");
    assert_eq!(lowercase_first_letter("Élan"), "élan");
    assert_eq!(lowercase_first_letter(""), "");
}
