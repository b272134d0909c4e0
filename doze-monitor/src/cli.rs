// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Command-line interface definitions.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;
use crate::source::Source;

/// Command-line arguments.
#[derive(Parser)]
#[command(name = "doze-monitor")]
#[command(about = "Console checker for the doze power-mode firmware")]
pub struct Cli {
    /// Serial port (e.g., /dev/ttyUSB0); stdin is read when omitted
    #[arg(short, long)]
    pub port: Option<String>,

    /// Serial baud rate
    #[arg(short, long, default_value = "115200")]
    pub baud: u32,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Follow the live console and check each power cycle
    Watch {
        /// Number of complete power cycles to observe
        #[arg(short, long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
        cycles: u32,

        /// Slack allowed on the measured sleep spans, in milliseconds
        #[arg(short, long, default_value = "1500")]
        tolerance_ms: u64,

        /// Do not echo console lines
        #[arg(short, long)]
        quiet: bool,
    },

    /// Check the phase ordering of a captured console log
    Check {
        /// Console log file
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

/// Execute the parsed CLI command.
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Check { file } => commands::check(Source::file(&file)?),

        Commands::Watch {
            cycles,
            tolerance_ms,
            quiet,
        } => {
            let source = match cli.port.as_deref() {
                Some(port) => Source::serial(port, cli.baud)?,
                None => Source::stdin(),
            };
            commands::watch(source, cycles, tolerance_ms, quiet)
        }
    }
}
