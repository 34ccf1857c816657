// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0

// miette's Diagnostic derive generates code that triggers this false positive
#![allow(unused_assignments)]

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    #[error("No staged changes found")]
    #[diagnostic(
        code(convit::git::no_staged),
        help("Stage files with: git add <files>")
    )]
    NoStagedChanges,

    #[error("Not a git repository")]
    #[diagnostic(
        code(convit::git::not_repo),
        help("Run this command inside a git repository")
    )]
    NotAGitRepo,

    #[error("Merge in progress")]
    #[diagnostic(
        code(convit::git::merge),
        help("Complete or abort the merge: git merge --abort")
    )]
    MergeInProgress,

    #[error("Staged diff is empty or could not be parsed into file changes")]
    #[diagnostic(
        code(convit::diff::empty),
        help("Only lock files or no parsable `diff --git` blocks were staged")
    )]
    EmptyOrMalformedDiff,

    #[error("{provider} requires an API key but {env_var} is not set")]
    #[diagnostic(
        code(convit::provider::missing_credential),
        help("Export {env_var} or set CONVIT_API_KEY")
    )]
    MissingCredential {
        provider: String,
        env_var: &'static str,
    },

    #[error("Request to {provider} timed out after {timeout:?}")]
    #[diagnostic(
        code(convit::provider::timeout),
        help("Raise timeout_secs in the config or retry")
    )]
    RequestTimeout {
        provider: String,
        timeout: std::time::Duration,
    },

    #[error("Provider '{provider}' error: {message}")]
    #[diagnostic(code(convit::provider::error))]
    Provider { provider: String, message: String },

    #[error("{provider} returned an empty completion")]
    #[diagnostic(code(convit::provider::empty_completion))]
    EmptyCompletion { provider: String },

    #[error("Commit message cannot be empty")]
    #[diagnostic(code(convit::commit::empty_message))]
    EmptyMessage,

    #[error("Invalid scope: '{0}'")]
    #[diagnostic(
        code(convit::commit::invalid_scope),
        help("Use lowercase alphanumerics and -_/. only")
    )]
    InvalidScope(String),

    #[error("Operation cancelled by user")]
    Cancelled,

    #[error("Configuration error: {0}")]
    #[diagnostic(code(convit::config::error))]
    Config(String),

    #[error("Git error: {0}")]
    #[diagnostic(code(convit::git::error))]
    Git(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("Dialog error: {0}")]
    Dialog(String),
}

impl From<dialoguer::Error> for Error {
    fn from(e: dialoguer::Error) -> Self {
        match e {
            dialoguer::Error::IO(io) if io.kind() == std::io::ErrorKind::Interrupted => {
                Error::Cancelled
            }
            other => Error::Dialog(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
