// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the skipset command-line interface.
//!
//! Four subcommands. `inspect` and `contains` read a serialized skip set and
//! report on it, `encode` produces one from a list of ids, and `score` runs
//! the scoring adapter over JSON documents exactly as a host would, which
//! makes it the quickest way to check a params blob before shipping it.

pub mod commands;
pub mod display;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "skipset",
    about = "Inspect, build and score with Roaring-format skip sets",
    version
)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the chunk layout of a serialized skip set
    Inspect {
        /// Serialized skip set, or `-` for stdin
        input: String,

        /// Input is base64 text rather than raw bytes
        #[arg(long)]
        base64: bool,
    },

    /// Test ids for membership
    Contains {
        /// Serialized skip set, or `-` for stdin
        input: String,

        /// Input is base64 text rather than raw bytes
        #[arg(long)]
        base64: bool,

        /// Ids to test
        #[arg(required = true)]
        ids: Vec<u32>,
    },

    /// Build a skip set from ids on stdin (whitespace or comma separated)
    Encode {
        /// Use run containers where they are smaller
        #[arg(long)]
        runs: bool,

        /// Write raw bytes to this file instead of printing base64
        #[arg(long, value_name = "FILE")]
        raw: Option<String>,
    },

    /// Score JSON documents with the skip_list script
    Score {
        /// JSON file holding the script params
        #[arg(short, long)]
        params: String,

        /// JSON Lines file of documents (default: stdin)
        #[arg(short, long)]
        docs: Option<String>,
    },
}
