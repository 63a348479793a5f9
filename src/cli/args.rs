//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! `changelog` is a single command without subcommands. Flags that the
//! config file can also supply are `Option`s so that "not given" can be told
//! apart from an explicit value.

use clap::Parser;
use std::path::PathBuf;

use crate::core::config::ConfigOverrides;

/// Changelog between GITHUB repository releases
#[derive(Parser, Debug)]
#[command(name = "changelog")]
#[command(author, version, about)]
#[command(long_about = "Changelog generator for GITHUB releases automatically.\n\n\
    Collects the pull requests merged between two releases, groups them by \
    their first label, and writes a Markdown changelog. With --save the result \
    also replaces the release notes of the current release.")]
#[command(after_help = "\
EXAMPLES:
    # Changelog from v1.0.0 to the latest release
    changelog -u myorg -r widget -p v1.0.0

    # Only PRs labeled release-note, between two explicit releases
    changelog -u myorg -r widget -l release-note -p v1.0.0 -c v1.1.0

    # Publish the notes (needs a token)
    changelog -u myorg -r widget -p v1.0.0 -t ~/.github-token --save")]
pub struct Cli {
    /// Save release notes on Github
    #[arg(short, long)]
    pub save: bool,

    /// Github owner or org [default: knabben]
    #[arg(short, long, value_name = "OWNER")]
    pub user: Option<String>,

    /// Github repo
    #[arg(short, long, value_name = "REPO")]
    pub repo: Option<String>,

    /// Release-note label
    #[arg(short, long, value_name = "LABEL")]
    pub label: Option<String>,

    /// Path to output file [default: ./release-note]
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Github token file (optional; without it access is unauthenticated)
    #[arg(short, long, value_name = "PATH")]
    pub token: Option<PathBuf>,

    /// Previous release
    #[arg(
        short,
        long = "previous_release",
        alias = "previous-release",
        value_name = "TAG"
    )]
    pub previous_release: Option<String>,

    /// Current release (defaults to the latest release)
    #[arg(
        short,
        long = "current_release",
        alias = "current-release",
        value_name = "TAG"
    )]
    pub current_release: Option<String>,

    /// Base branch the PRs were merged into [default: master]
    #[arg(short, long, value_name = "BRANCH")]
    pub base: Option<String>,

    /// GitHub API root, for GitHub Enterprise [default: https://api.github.com]
    #[arg(long, value_name = "URL")]
    pub api_base: Option<String>,

    /// Read defaults from this config file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Log errors only
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Parse command-line arguments, returning parse errors to the caller.
    pub fn try_parse_args() -> Result<Self, clap::Error> {
        Parser::try_parse()
    }

    /// The values given on the command line, for config resolution.
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            owner: self.user.clone(),
            repo: self.repo.clone(),
            label: self.label.clone(),
            output: self.output.clone(),
            token_file: self.token.clone(),
            previous_release: self.previous_release.clone(),
            current_release: self.current_release.clone(),
            base: self.base.clone(),
            api_base: self.api_base.clone(),
            save: self.save,
        }
    }
}
