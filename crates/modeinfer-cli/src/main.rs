use clap::Parser;
use modeinfer_cli::{Cli, ConfigSource, ModeinferConfig, execute, tracing_setup};
use std::process::ExitCode;
use tracing::{error, info, warn};

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "modeinfer failed");
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let (config, source, applied) = match resolve_config(cli) {
        Ok(resolved) => resolved,
        Err(err) => {
            // configuration never loaded, so log with built-in settings
            let fallback = cli.apply_to(ModeinferConfig::default());
            tracing_setup::init_tracing(&fallback.logging).ok();
            return Err(err);
        }
    };
    tracing_setup::init_tracing(&config.logging)?;

    info!(version = env!("CARGO_PKG_VERSION"), "Starting modeinfer");
    match &source {
        ConfigSource::File(path) => info!(path = %path.display(), "Loaded configuration"),
        ConfigSource::Defaults(path) => warn!(
            path = %path.display(),
            "Configuration file not found. Using default configuration."
        ),
    }
    info!(
        overrides = ?applied,
        level = %config.logging.level,
        strategy = %config.inference.strategy,
        "Applied configuration profile"
    );

    let stdout = std::io::stdout();
    execute(&cli.command(), &cli.input, &config, &mut stdout.lock())
}

type ResolvedConfig = (ModeinferConfig, ConfigSource, Vec<&'static str>);

fn resolve_config(cli: &Cli) -> anyhow::Result<ResolvedConfig> {
    let (config, source) = ModeinferConfig::load(cli.config.as_deref())?;
    let (config, applied) = config.apply_profile()?;
    Ok((cli.apply_to(config), source, applied))
}
