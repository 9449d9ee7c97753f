//! Command line definition

use crate::config::{ModeinferConfig, OutputFormat};
use clap::{Args, Parser, Subcommand, ValueEnum};
use modeinfer_core::{ClusterStrategy, DatasetPaths};
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;

/// Argument type inference for ILP datasets
#[derive(Parser, Debug)]
#[command(name = "modeinfer")]
#[command(about = "Infer argument types of predicates from ground facts and examples")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub input: InputArgs,

    /// Debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (defaults to modeinfer.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Dataset collection paths
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct InputArgs {
    /// Background facts
    #[arg(long, visible_alias = "fac", global = true, value_name = "PATH")]
    pub facts: Option<PathBuf>,

    /// Positive examples
    #[arg(long, visible_alias = "pos", global = true, value_name = "PATH")]
    pub positive: Option<PathBuf>,

    /// Negative examples
    #[arg(long, visible_alias = "neg", global = true, value_name = "PATH")]
    pub negative: Option<PathBuf>,
}

impl InputArgs {
    pub fn dataset_paths(&self) -> DatasetPaths {
        DatasetPaths {
            facts: self.facts.clone(),
            positives: self.positive.clone(),
            negatives: self.negative.clone(),
        }
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the inferred type of every predicate argument
    Infer {
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,

        /// Name heads by symbol instead of rank code
        #[arg(long)]
        symbolic: bool,

        #[arg(long, value_enum)]
        strategy: Option<StrategyArg>,
    },

    /// Print the head and constant rank tables
    Ranks {
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Rewrite each collection with rank codes
    Compress {
        /// Write facts.txt, pos.txt and neg.txt here instead of printing
        #[arg(long, value_name = "DIR")]
        output_dir: Option<PathBuf>,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::Infer { format: None, symbolic: false, strategy: None }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyArg {
    UnionFind,
    FloodFill,
}

impl From<StrategyArg> for ClusterStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::UnionFind => ClusterStrategy::UnionFind,
            StrategyArg::FloodFill => ClusterStrategy::FloodFill,
        }
    }
}

impl Cli {
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or_default()
    }

    /// Fold command line flags into the loaded configuration
    pub fn apply_to(&self, mut config: ModeinferConfig) -> ModeinferConfig {
        if self.verbose {
            config.logging.level = raise_to_debug(&config.logging.level);
        }
        match &self.command() {
            Command::Infer { format, symbolic, strategy } => {
                if let Some(format) = format {
                    config.output.format = *format;
                }
                if *symbolic {
                    config.output.symbolic = true;
                }
                if let Some(strategy) = strategy {
                    config.inference.strategy = (*strategy).into();
                }
            }
            Command::Ranks { format: Some(format) } => config.output.format = *format,
            Command::Ranks { format: None } | Command::Compress { .. } => {}
        }
        config
    }
}

/// `-v` never lowers verbosity. A directive list such as `modeinfer_core=trace,info`
/// is kept as written.
fn raise_to_debug(level: &str) -> String {
    match level.parse::<LevelFilter>() {
        Ok(current) if current >= LevelFilter::DEBUG => level.to_string(),
        Ok(_) => "debug".to_string(),
        Err(_) => level.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_aliases() {
        let cli =
            Cli::try_parse_from(["modeinfer", "--fac", "b.pl", "--pos", "p.pl", "--neg", "n.pl"])
                .unwrap();
        assert_eq!(cli.command(), Command::default());
        let paths = cli.input.dataset_paths();
        assert_eq!(paths.facts, Some(PathBuf::from("b.pl")));
        assert_eq!(paths.positives, Some(PathBuf::from("p.pl")));
        assert_eq!(paths.negatives, Some(PathBuf::from("n.pl")));
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let cli = Cli::try_parse_from(["modeinfer", "ranks", "--facts", "b.pl", "-v"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.input.facts, Some(PathBuf::from("b.pl")));
    }

    #[test]
    fn test_flags_override_configuration() {
        let cli = Cli::try_parse_from([
            "modeinfer",
            "-v",
            "infer",
            "--format",
            "json",
            "--symbolic",
            "--strategy",
            "flood-fill",
        ])
        .unwrap();
        let config = cli.apply_to(ModeinferConfig::default());
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(config.output.symbolic);
        assert_eq!(config.inference.strategy, ClusterStrategy::FloodFill);
    }

    #[test]
    fn test_verbose_keeps_more_detailed_level() {
        let cli = Cli::try_parse_from(["modeinfer", "-v"]).unwrap();

        let mut base = ModeinferConfig::default();
        base.logging.level = "trace".to_string();
        assert_eq!(cli.apply_to(base).logging.level, "trace");

        let mut base = ModeinferConfig::default();
        base.logging.level = "warn".to_string();
        assert_eq!(cli.apply_to(base).logging.level, "debug");

        let mut base = ModeinferConfig::default();
        base.logging.level = "modeinfer_core=trace,info".to_string();
        assert_eq!(cli.apply_to(base).logging.level, "modeinfer_core=trace,info");
    }

    #[test]
    fn test_unset_flags_keep_configuration() {
        let mut base = ModeinferConfig::default();
        base.inference.strategy = ClusterStrategy::FloodFill;
        base.output.format = OutputFormat::Json;
        let cli = Cli::try_parse_from(["modeinfer", "infer"]).unwrap();
        assert_eq!(cli.apply_to(base.clone()), base);
    }

    #[test]
    fn test_unknown_strategy_is_rejected() {
        assert!(Cli::try_parse_from(["modeinfer", "infer", "--strategy", "random"]).is_err());
    }
}
