#![allow(missing_docs)]
//! modeinfer command line front end
//!
//! Loads configuration, sets up tracing and runs one subcommand over a dataset
//! given as facts, positive example and negative example files.

pub mod cli;
pub mod commands;
pub mod config;
pub mod output;
pub mod tracing_setup;

pub use cli::{Cli, Command, InputArgs, StrategyArg};
pub use commands::execute;
pub use config::{ConfigSource, LogFormat, ModeinferConfig, OutputFormat};
