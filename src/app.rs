// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0

use console::style;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::cli::{Cli, Commands, ConfigAction, GenerateArgs, InitTarget};
use crate::config::{Config, UserConfigFile};
use crate::domain::{GenerationMode, format_conventional};
use crate::error::{Error, Result};
use crate::services::{
    generator::{Generator, Interaction},
    git::GitService,
    llm,
    prompter::{AutoAccept, TerminalPrompter, commit_prefix},
};

pub struct App {
    cli: Cli,
    cancel_token: CancellationToken,
}

impl App {
    pub fn new(cli: Cli) -> Self {
        Self {
            cli,
            cancel_token: CancellationToken::new(),
        }
    }

    /// Only the commands that use the config load it, so `config init` and
    /// `completions` still work while the file is broken.
    fn load_config(&self) -> Result<Config> {
        let config = Config::load(&self.cli)?;
        debug!(
            provider = %config.resolved_provider(),
            model = %config.model,
            timeout_secs = config.timeout_secs,
            "config loaded"
        );
        Ok(config)
    }

    pub async fn run(&mut self) -> Result<()> {
        // Ctrl+C aborts an in-flight request
        let cancel = self.cancel_token.clone();
        tokio::spawn(async move {
            signal::ctrl_c().await.ok();
            cancel.cancel();
        });

        match &self.cli.command {
            Commands::Commit => self.commit_manually().await,
            Commands::Generate(args) => self.generate(args).await,
            Commands::Config { action } => self.handle_config(action),
            Commands::Completions { shell } => {
                let mut cmd = <Cli as clap::CommandFactory>::command();
                clap_complete::generate(*shell, &mut cmd, "convit", &mut std::io::stdout());
                Ok(())
            }
        }
    }

    async fn commit_manually(&self) -> Result<()> {
        let config = self.load_config()?;
        let git = GitService::discover()?;
        let prompter = TerminalPrompter::new(config.lowercase_first_letter);

        let entry = prompter.select_commit_type(&config.commit_types)?;
        let scope = if config.prompt_for_subtype && !entry.has_subtype() {
            prompter.input_scope()?
        } else {
            None
        };
        let message = prompter.input_message()?;

        let full = format_conventional(&commit_prefix(entry, scope.as_deref()), &message);
        debug!(message = %full, "committing");

        git.commit(&full).await?;
        eprintln!("{} Committed!", style("✓").green().bold());
        Ok(())
    }

    async fn generate(&self, args: &GenerateArgs) -> Result<()> {
        let config = self.load_config()?;
        // Missing credentials fail before anything is asked of the user
        let provider = llm::create_provider(&config)?;
        let mut prompter = TerminalPrompter::new(config.lowercase_first_letter);

        let mode = GenerationMode::from_partial(args.partial);
        let partial = match mode {
            GenerationMode::ScopeOnly => Some(prompter.input_message()?),
            GenerationMode::Full => None,
        };

        let git = GitService::discover()?;
        let diff = git.staged_diff().await?;

        let generator = Generator::new(&config, provider.as_ref(), self.cancel_token.clone());

        if args.show_prompt {
            let segments = generator.prepare_diff(&diff)?;
            let prompt = generator.assemble(&segments, mode, partial.as_deref())?;
            eprintln!("{}", style("--- SYSTEM ---").dim());
            eprintln!("{}", prompt.system);
            eprintln!("{}", style("--- USER ---").dim());
            eprintln!("{}", prompt.user);
            eprintln!("{}", style("--- END PROMPT ---").dim());
        }

        let mut auto = AutoAccept;
        let ui: &mut dyn Interaction = if args.yes || args.dry_run {
            &mut auto
        } else {
            &mut prompter
        };

        let message = generator
            .generate_commit_message(&diff, mode, partial.as_deref(), ui)
            .await?;

        if args.dry_run {
            println!("{message}");
            return Ok(());
        }

        if self.cancel_token.is_cancelled() {
            return Err(Error::Cancelled);
        }

        git.commit(&message).await?;
        eprintln!("{} Committed!", style("✓").green().bold());
        Ok(())
    }

    fn handle_config(&self, action: &ConfigAction) -> Result<()> {
        match action {
            ConfigAction::Init { target, yes } => self.init_config(*target, *yes),
            ConfigAction::Ls => {
                let config = self.load_config()?;
                let json = serde_json::to_string_pretty(&config.redacted())
                    .map_err(|e| Error::Config(e.to_string()))?;
                println!("{json}");
                Ok(())
            }
        }
    }

    /// Edit the user config file in place, keeping keys the form does not cover.
    fn init_config(&self, target: Option<InitTarget>, yes: bool) -> Result<()> {
        let mut file = UserConfigFile::open_default()?;
        if let Some(backup) = file.backup() {
            eprintln!(
                "{} Existing config was not valid TOML, moved to {}",
                style("!").yellow().bold(),
                backup.display()
            );
        }

        let mut prefs = file.preferences();
        if !yes {
            let prompter = TerminalPrompter::new(prefs.lowercase_first_letter);
            match target {
                None => prompter.edit_commit_preferences(&mut prefs)?,
                Some(InitTarget::Ai) => prompter.edit_ai_preferences(&mut prefs)?,
            }
        }

        file.set_preferences(&prefs);
        file.save()?;
        println!("Saved config: {}", file.path().display());

        // Saved as-is; the next command that loads it reports the same problem
        if let Err(e) = file.check() {
            eprintln!("{} {e}", style("!").yellow().bold());
        }
        Ok(())
    }
}
