//! cli
//!
//! Command-line interface layer.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments
//! - Initialise logging
//! - Build the immutable run configuration and credentials
//! - Hand off to [`crate::engine`] and decide the exit status
//!
//! # Exit Status
//!
//! Startup failures (config file, token file) are returned as errors and end
//! the process with a non-zero status. Failures inside the pipeline are
//! logged and the command still returns normally.

pub mod args;

pub use args::Cli;

use anyhow::{Context, Result};

use crate::core::config::{self, ChangelogConfig};
use crate::engine::{self, PublishStatus};
use crate::forge::create_forge;
use crate::secrets::Credentials;
use crate::ui::output::{init_logging, Verbosity};

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run(cli: Cli) -> Result<()> {
    init_logging(Verbosity::from_flags(cli.quiet, cli.debug));

    let (file_config, config_path) =
        config::load(cli.config.as_deref()).context("Error loading configuration")?;
    if let Some(path) = &config_path {
        log::debug!("Loaded config from {}", path.display());
    }

    let config = ChangelogConfig::resolve(&file_config, cli.overrides());
    log::debug!("Resolved configuration: {:?}", config);

    let credentials = Credentials::load(config.token_file.as_deref())
        .context("Error accessing user supplied token_file")?;
    let forge = create_forge(&config, credentials);

    let rt = tokio::runtime::Runtime::new()?;
    match rt.block_on(engine::run(&config, forge.as_ref())) {
        Ok(outcome) => {
            log::info!(
                "Wrote {} PRs for {} to {}",
                outcome.pr_count,
                outcome.current_release,
                config.output.display()
            );
            if let PublishStatus::Published = outcome.publish {
                log::info!("Release notes for {} updated", outcome.current_release);
            }
        }
        Err(e) => log::error!("{}", e),
    }

    Ok(())
}
