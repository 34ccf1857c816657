// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
// SPDX-License-Identifier: GPL-3.0-only

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "convit")]
#[command(version)]
#[command(about = "Write conventional commit messages", long_about = None)]
pub struct Cli {
    /// LLM provider (openai, anthropic); inferred from the model when omitted
    #[arg(short, long, global = true, env = "CONVIT_PROVIDER")]
    pub provider: Option<String>,

    /// Model name
    #[arg(short, long, global = true, env = "CONVIT_MODEL")]
    pub model: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Write a commit message
    Commit,
    /// Write a commit message with the help of AI
    Generate(GenerateArgs),
    /// Configure the app
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}

#[derive(clap::Args, Debug, Default)]
pub struct GenerateArgs {
    /// Only generate the commit type and scope
    #[arg(long)]
    pub partial: bool,

    /// Accept the first generated message without prompting
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Print message only, don't commit
    #[arg(long)]
    pub dry_run: bool,

    /// Show the prompt sent to the LLM
    #[arg(long)]
    pub show_prompt: bool,
}

#[derive(clap::Subcommand, Debug)]
pub enum ConfigAction {
    /// Initialize the config, keeping existing values as defaults
    Init {
        #[command(subcommand)]
        target: Option<InitTarget>,

        /// Save current values without prompting
        #[arg(short = 'y', long, global = true)]
        yes: bool,
    },
    /// List the current configuration
    Ls,
}

#[derive(clap::Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitTarget {
    /// Initialize the AI config (model and system message)
    Ai,
}
