use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;

use pagecraft_cli::{
    cli::{Cli, Commands},
    commands, logging,
};
use pagecraft_config::ConfigLoader;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = ConfigLoader::load_or_default(cli.config.as_deref()).with_context(|| {
        match &cli.config {
            Some(path) => format!("failed to load configuration from {}", path.display()),
            None => "failed to load configuration".to_string(),
        }
    })?;

    logging::init(logging::level_filter(cli.log_level, cli.verbose, &config));
    debug!(breakpoints = config.breakpoints.len(), "configuration loaded");

    match cli.command {
        Commands::Validate { manifest, document } => {
            commands::validate::execute(&manifest, document.as_deref())
        }
        Commands::Normalize { document } => commands::normalize::execute(&document),
        Commands::Copy {
            input,
            element,
            seeds,
        } => commands::copy::execute(&config, &input, &element, &seeds),
        Commands::Merge {
            manifest,
            base,
            incoming,
        } => commands::merge::execute(&manifest, &base, &incoming),
        Commands::Extract { input, device } => commands::extract::execute(&config, &input, device),
        Commands::ApplyTranslations {
            input,
            translations,
            device,
        } => commands::apply_translations::execute(&config, &input, &translations, device),
        Commands::Resolve {
            input,
            element,
            device,
            theme,
            resources,
        } => commands::resolve::execute(
            &config,
            &input,
            commands::resolve::ResolveArgs {
                element,
                device,
                theme,
                resources,
            },
        ),
    }
}
