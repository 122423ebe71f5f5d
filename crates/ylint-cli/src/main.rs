// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Grammar linter command-line interface.
//!
//! This is the main entry point for the `ylint` command.

use clap::{Parser, Subcommand};
use miette::Result;
use tracing_subscriber::EnvFilter;
use ylint_core::report::OutputFormat;

mod commands;

/// Ylint: a linter and formatter for Bison/Lrama grammar files
#[derive(Debug, Parser)]
#[command(name = "ylint")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Lint grammar files
    Lint {
        /// Grammar files or directories to lint
        #[arg(default_value = ".")]
        paths: Vec<String>,

        /// Configuration file (default: ylint.toml in the working directory)
        #[arg(long)]
        config: Option<String>,

        /// Output format: text, json, or github
        #[arg(long, default_value = "text")]
        format: OutputFormat,

        /// Apply automatic fixes and rewrite the files
        #[arg(long, short = 'a', visible_alias = "autocorrect")]
        fix: bool,

        /// Run only the named rules
        #[arg(long, value_name = "RULE")]
        only: Vec<String>,

        /// Skip the named rules
        #[arg(long, value_name = "RULE")]
        except: Vec<String>,
    },

    /// Reformat grammar files in place
    Fmt {
        /// Grammar files or directories to format
        #[arg(default_value = ".")]
        paths: Vec<String>,

        /// Report files that would change without writing them
        #[arg(long)]
        check: bool,

        /// Print a unified diff instead of writing
        #[arg(long)]
        diff: bool,

        /// Configuration file (default: ylint.toml in the working directory)
        #[arg(long)]
        config: Option<String>,
    },

    /// List the built-in lint rules
    Rules {
        /// Output format: text or json
        #[arg(long, default_value = "text")]
        format: commands::rules::RulesFormat,
    },

    /// Write a starter ylint.toml to the working directory
    Init {
        /// Overwrite an existing ylint.toml
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    // Install miette's fancy error handler
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Lint {
            paths,
            config,
            format,
            fix,
            only,
            except,
        } => commands::lint::run_lint(&paths, config.as_deref(), format, fix, &only, &except),
        Command::Fmt {
            paths,
            check,
            diff,
            config,
        } => commands::fmt::run_fmt(&paths, check, diff, config.as_deref()),
        Command::Rules { format } => commands::rules::run_rules(format),
        Command::Init { force } => commands::init::run_init(force),
    };

    // Exit with appropriate code
    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("{e:?}");
            std::process::exit(1);
        }
    }
}
