//! CLI argument parsing with clap derive

use std::path::PathBuf;

use anyhow::Result;
use clap::error::ErrorKind;
use clap::parser::ValueSource;
use clap::{ArgAction, ArgMatches, CommandFactory, FromArgMatches, Parser, Subcommand};

use crate::app::{AppContext, AppFlags, OutputFlags};
use crate::commands;

/// Register a task definition on Amazon ECS and roll it out
///
/// Without a subcommand the deploy flags are accepted directly:
/// `ecs-deploy --cluster prod --task web --task-file ./task.json`
#[derive(Parser)]
#[command(
    name = "ecs-deploy",
    version,
    propagate_version = true
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(
        long,
        global = true,
        env = "NO_COLOR",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    pub no_color: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file with defaults [default: ~/.ecs-deploy/config.yaml]
    #[arg(long, global = true, env = "ECS_DEPLOY_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub deploy: commands::deploy::DeployArgs,
}

/// First non-global top-level flag that was typed on the command line.
///
/// Values coming from the environment (`ECS_DEPLOY_CLUSTER`, ...) do not
/// count.
fn stray_deploy_flag(command: &clap::Command, matches: &ArgMatches) -> Option<String> {
    command
        .get_arguments()
        .filter(|arg| !arg.is_global_set())
        .map(|arg| arg.get_id().as_str())
        .find(|id| matches.value_source(id) == Some(ValueSource::CommandLine))
        .map(|id| id.replace('_', "-"))
}

#[derive(Subcommand)]
pub enum Command {
    /// Register the task definition and deploy it (default)
    Deploy(commands::deploy::DeployArgs),

    /// Check a task file without calling AWS
    Validate(commands::validate::ValidateArgs),

    /// Show version
    Version,
}

impl Cli {
    /// Parse `std::env::args`, exiting on usage errors.
    ///
    /// Deploy flags given before a subcommand are rejected; they belong
    /// after `deploy`.
    #[must_use]
    pub fn parse_args() -> Self {
        match Self::try_parse_args(std::env::args_os()) {
            Ok(cli) => cli,
            Err(e) => e.exit(),
        }
    }

    /// Fallible form of [`Cli::parse_args`] over explicit arguments.
    ///
    /// # Errors
    ///
    /// Returns the clap error for invalid usage, including an
    /// `ArgumentConflict` for top-level deploy flags combined with a
    /// subcommand.
    pub fn try_parse_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let mut command = Self::command();
        let matches = command.try_get_matches_from_mut(args)?;
        if let (Some((name, _)), Some(flag)) =
            (matches.subcommand(), stray_deploy_flag(&command, &matches))
        {
            return Err(command.error(
                ErrorKind::ArgumentConflict,
                format!("'--{flag}' cannot be used before the '{name}' subcommand"),
            ));
        }
        Self::from_arg_matches(&matches)
    }

    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub async fn run(self) -> Result<()> {
        let Cli {
            json,
            quiet,
            no_color,
            config,
            command,
            deploy,
            ..
        } = self;
        let app = AppContext::new(AppFlags {
            output: OutputFlags {
                no_color,
                quiet,
                json,
            },
            config,
        });

        match command.unwrap_or(Command::Deploy(deploy)) {
            Command::Deploy(args) => commands::deploy::run(&args, &app).await,
            Command::Validate(args) => commands::validate::run(&args, &app),
            Command::Version => commands::version::run(&app),
        }
    }
}
