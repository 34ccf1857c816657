// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0

use directories::ProjectDirs;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::cli::Cli;
use crate::domain::{CommitTypeEntry, default_catalogue};
use crate::error::{Error, Result};

pub const SYSTEM_MESSAGE: &str = "Generate a conventional commit message that follows the Conventional Commits specification as described below.
A scope may be provided to a commit's type, to provide additional contextual information and is contained within parenthesis, e.g., feat(parser): add ability to parse arrays.
Base yourself on the adjusted files in the diff and the actual code changes to determine what the type and scope of the message should be.
Don't include a message body, just the commit title. Don't surround it in backticks or anything of custom markdown formatting.";

/// Files whose diffs are dropped before prompting (substring match on the header).
pub const DEFAULT_IGNORE_FILES: &[&str] = &[
    "package-lock.json",
    "yarn.lock",
    "pnpm-lock.yaml",
    "bun.lockb",
    "npm-debug.log",
    "yarn-debug.log",
    "yarn-error.log",
    ".pnpm-debug.log",
    "Cargo.lock",
    "Gemfile.lock",
    "mix.lock",
    "Pipfile.lock",
    "poetry.lock",
    "composer.lock",
    "go.sum",
];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    OpenAI,
    Anthropic,
}

impl Provider {
    /// Infer the backend from a model id: `claude-*` is Anthropic, anything else OpenAI.
    pub fn from_model(model: &str) -> Self {
        if model.to_lowercase().starts_with("claude") {
            Self::Anthropic
        } else {
            Self::OpenAI
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "openai" => Some(Self::OpenAI),
            "anthropic" => Some(Self::Anthropic),
            _ => None,
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OpenAI => write!(f, "openai"),
            Self::Anthropic => write!(f, "anthropic"),
        }
    }
}

/// What happens to the prompt when the user rejects a generated message.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RegeneratePolicy {
    /// Resend the exact prompt that produced the rejected message.
    #[default]
    Reuse,
    /// Offer to revise the partial message and rebuild the prompt if it changed.
    Reassemble,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Explicit backend; inferred from `model` when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<Provider>,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Base instruction placed at the top of the system prompt
    #[serde(default = "default_system_message")]
    pub system_message: String,

    #[serde(default = "default_true")]
    pub lowercase_first_letter: bool,

    /// Ask for an optional scope after selecting a type without a subtype
    #[serde(default)]
    pub prompt_for_subtype: bool,

    /// Request deadline in seconds (default 30)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum tokens to generate (Anthropic requires it)
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default)]
    pub regenerate: RegeneratePolicy,

    #[serde(default = "default_ignore_files")]
    pub ignore_files: Vec<String>,

    #[serde(default = "default_catalogue")]
    pub commit_types: Vec<CommitTypeEntry>,

    /// Base URL for OpenAI-compatible APIs (default: https://api.openai.com/v1)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openai_base_url: Option<String>,

    /// Base URL for the Anthropic API (default: https://api.anthropic.com/v1)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anthropic_base_url: Option<String>,
}

fn default_true() -> bool {
    true
}
fn default_model() -> String {
    "gpt-4o-mini".into()
}
fn default_system_message() -> String {
    SYSTEM_MESSAGE.into()
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_max_tokens() -> u32 {
    1024
}
fn default_ignore_files() -> Vec<String> {
    DEFAULT_IGNORE_FILES.iter().map(|s| s.to_string()).collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider: None,
            model: default_model(),
            api_key: None,
            system_message: default_system_message(),
            lowercase_first_letter: true,
            prompt_for_subtype: false,
            timeout_secs: default_timeout_secs(),
            max_tokens: default_max_tokens(),
            regenerate: RegeneratePolicy::default(),
            ignore_files: default_ignore_files(),
            commit_types: default_catalogue(),
            openai_base_url: None,
            anthropic_base_url: None,
        }
    }
}

impl Config {
    /// Load with priority: CLI > ENV > user config > project config > defaults
    pub fn load(cli: &Cli) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        // Project-level config (.convit.toml in the working directory)
        if let Ok(cwd) = std::env::current_dir() {
            let project_config = cwd.join(".convit.toml");
            if project_config.exists() {
                figment = figment.merge(Toml::file(&project_config));
            }
        }

        if let Some(path) = Self::config_path()
            && path.exists()
        {
            figment = figment.merge(Toml::file(&path));
        }

        // CONVIT_MODEL, CONVIT_TIMEOUT_SECS, ...
        figment = figment.merge(Env::prefixed("CONVIT_").split("__"));

        let mut config: Config = figment
            .extract()
            .map_err(|e| Error::Config(e.to_string()))?;

        config.apply_cli(cli)?;
        config.validate()?;
        Ok(config)
    }

    pub fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", "convit").map(|dirs| dirs.config_dir().to_path_buf())
    }

    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|d| d.join("config.toml"))
    }

    /// The backend this config selects, explicit or inferred from the model.
    pub fn resolved_provider(&self) -> Provider {
        self.provider
            .unwrap_or_else(|| Provider::from_model(&self.model))
    }

    fn apply_cli(&mut self, cli: &Cli) -> Result<()> {
        if let Some(ref p) = cli.provider {
            let provider = Provider::parse(p).ok_or_else(|| {
                Error::Config(format!(
                    "unknown provider '{p}', expected 'openai' or 'anthropic'"
                ))
            })?;
            self.provider = Some(provider);
        }
        if let Some(ref m) = cli.model {
            self.model = m.clone();
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(Error::Config("model cannot be empty".into()));
        }

        if self.system_message.trim().is_empty() {
            return Err(Error::Config("system_message cannot be empty".into()));
        }

        if !(1..=600).contains(&self.timeout_secs) {
            return Err(Error::Config(format!(
                "timeout_secs must be 1–600, got {}",
                self.timeout_secs
            )));
        }

        if !(1..=32_768).contains(&self.max_tokens) {
            return Err(Error::Config(format!(
                "max_tokens must be 1–32768, got {}",
                self.max_tokens
            )));
        }

        if self.commit_types.is_empty() {
            return Err(Error::Config("commit_types cannot be empty".into()));
        }

        if let Some(entry) = self
            .commit_types
            .iter()
            .find(|e| e.commit_type.trim().is_empty())
        {
            return Err(Error::Config(format!(
                "commit type with description '{}' has an empty type",
                entry.description
            )));
        }

        if self.ignore_files.iter().any(|p| p.is_empty()) {
            return Err(Error::Config(
                "ignore_files cannot contain empty patterns".into(),
            ));
        }

        for (key, value) in [
            ("openai_base_url", &self.openai_base_url),
            ("anthropic_base_url", &self.anthropic_base_url),
        ] {
            if let Some(raw) = value {
                Self::validate_base_url(key, raw)?;
            }
        }

        Ok(())
    }

    fn validate_base_url(key: &str, raw: &str) -> Result<()> {
        let parsed = url::Url::parse(raw)
            .map_err(|e| Error::Config(format!("{key} is not a valid URL ('{raw}'): {e}")))?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::Config(format!(
                "{key} must start with http:// or https://, got '{raw}'"
            )));
        }

        Ok(())
    }

    /// Copy suitable for display: the API key is masked.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if copy.api_key.is_some() {
            copy.api_key = Some("********".into());
        }
        copy
    }
}

/// Models offered by `config init ai`.
pub const MODEL_CHOICES: &[&str] = &[
    "gpt-4o-mini",
    "gpt-4o",
    "gpt-4-turbo",
    "gpt-3.5-turbo",
    "claude-3-5-sonnet-20240620",
];

/// The settings `config init` edits interactively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preferences {
    pub lowercase_first_letter: bool,
    pub prompt_for_subtype: bool,
    pub model: String,
    pub system_message: String,
}

/// The user config file as a TOML table, edited in place by `config init`.
///
/// Keys other than the [`Preferences`] fields (`api_key`, `ignore_files`, ...)
/// are carried through untouched.
#[derive(Debug)]
pub struct UserConfigFile {
    path: PathBuf,
    table: toml::Table,
    backup: Option<PathBuf>,
}

impl UserConfigFile {
    /// Open `<config dir>/config.toml`.
    pub fn open_default() -> Result<Self> {
        let path = Config::config_path()
            .ok_or_else(|| Error::Config("Cannot determine config directory".into()))?;
        Self::open(path)
    }

    /// Read `path`, or start from the default template when it does not exist.
    ///
    /// A file that is not valid TOML is moved aside to `config.toml.bak`.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let mut backup = None;

        let table = if path.exists() {
            let content = fs::read_to_string(&path)?;
            match toml::from_str::<toml::Table>(&content) {
                Ok(table) => table,
                Err(e) => {
                    let moved = path.with_extension("toml.bak");
                    warn!(path = %path.display(), error = %e, "config is not valid TOML, moving it aside");
                    fs::rename(&path, &moved)?;
                    backup = Some(moved);
                    template_table()?
                }
            }
        } else {
            template_table()?
        };

        Ok(Self {
            path,
            table,
            backup,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Where an unreadable previous file was moved, if that happened on open.
    pub fn backup(&self) -> Option<&Path> {
        self.backup.as_deref()
    }

    /// Current values, falling back to defaults for missing or mistyped keys.
    pub fn preferences(&self) -> Preferences {
        let bool_or = |key: &str, default: bool| {
            self.table
                .get(key)
                .and_then(toml::Value::as_bool)
                .unwrap_or(default)
        };
        let str_or = |key: &str, default: String| {
            self.table
                .get(key)
                .and_then(toml::Value::as_str)
                .map(str::to_owned)
                .unwrap_or(default)
        };

        Preferences {
            lowercase_first_letter: bool_or("lowercase_first_letter", true),
            prompt_for_subtype: bool_or("prompt_for_subtype", false),
            model: str_or("model", default_model()),
            system_message: str_or("system_message", default_system_message()),
        }
    }

    /// Write the preferences back; the built-in system message is left implicit.
    pub fn set_preferences(&mut self, prefs: &Preferences) {
        let table = &mut self.table;
        table.insert(
            "lowercase_first_letter".into(),
            prefs.lowercase_first_letter.into(),
        );
        table.insert("prompt_for_subtype".into(), prefs.prompt_for_subtype.into());
        table.insert("model".into(), prefs.model.clone().into());

        if prefs.system_message == SYSTEM_MESSAGE {
            table.remove("system_message");
        } else {
            table.insert("system_message".into(), prefs.system_message.clone().into());
        }
    }

    /// Validate the file contents as a full config, without env or CLI layers.
    pub fn check(&self) -> Result<()> {
        let content =
            toml::to_string(&self.table).map_err(|e| Error::Config(e.to_string()))?;
        let config: Config =
            toml::from_str(&content).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()
    }

    /// Save with 0600 permissions via a temp file and rename.
    ///
    /// An untouched default table is written as the commented template.
    pub fn save(&self) -> Result<()> {
        let content = if template_table().is_ok_and(|t| t == self.table) {
            DEFAULT_CONFIG_TEMPLATE.to_string()
        } else {
            toml::to_string_pretty(&self.table).map_err(|e| Error::Config(e.to_string()))?
        };

        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }

        let temp_path = self.path.with_extension("toml.tmp");
        fs::write(&temp_path, content)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(&temp_path)?.permissions();
            perms.set_mode(0o600);
            fs::set_permissions(&temp_path, perms)?;
        }

        fs::rename(&temp_path, &self.path)?;
        debug!(path = %self.path.display(), "config saved");
        Ok(())
    }
}

fn template_table() -> Result<toml::Table> {
    toml::from_str(DEFAULT_CONFIG_TEMPLATE).map_err(|e| Error::Config(e.to_string()))
}

pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# convit configuration

# Model used by `convit generate`. Models starting with "claude" use
# Anthropic (ANTHROPIC_API_KEY), everything else OpenAI (OPENAI_API_KEY).
model = "gpt-4o-mini"

# Force a backend regardless of the model name: "openai" or "anthropic"
# provider = "openai"

# Lowercase the first letter of typed commit messages
lowercase_first_letter = true

# Ask for an optional scope after picking a commit type
prompt_for_subtype = false

# Seconds to wait for the model before giving up
timeout_secs = 30

# On rejection: "reuse" resends the same prompt, "reassemble" lets you
# revise the partial message first
regenerate = "reuse"

# Extra lock or generated files to leave out of the prompt
# ignore_files = ["package-lock.json", "yarn.lock", "Cargo.lock", "go.sum"]

# OpenAI-compatible gateway
# openai_base_url = "https://api.openai.com/v1"
"#;
