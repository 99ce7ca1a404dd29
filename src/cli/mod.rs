//! CLI argument definitions for wuwaconf.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// wuwaconf - edit the Wuthering Waves LocalStorage settings database.
///
/// Point it at the `LocalStorage.db` from the game's
/// `Client/Saved/LocalStorage` directory. The input file is never
/// modified in place; `set` writes a patched copy next to it.
#[derive(Parser, Debug)]
#[command(name = "wuwaconf")]
#[command(author, version, about = "Edit the Wuthering Waves LocalStorage settings database", long_about = None)]
#[command(long_version = concat!(
    env!("CARGO_PKG_VERSION"),
    " (", env!("WWC_GIT_COMMIT"), ", built ", env!("WWC_BUILD_TIMESTAMP"), ")"
))]
pub struct Cli {
    /// Output in human-readable format instead of JSON
    #[arg(short = 'H', long = "human", global = true)]
    pub human_readable: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate that a file is an editable settings database
    Check {
        /// Path to LocalStorage.db
        file: PathBuf,
    },

    /// List the settings stored in a database
    Show {
        /// Path to LocalStorage.db
        file: PathBuf,

        /// Only show the settings this tool knows how to edit
        #[arg(long)]
        known: bool,
    },

    /// Apply settings changes and write a patched copy
    ///
    /// Assignments are applied in order and cascade: turning RayTracing
    /// off resets its dependent settings and restores XeSS to the stored
    /// baseline, turning it on forces XeSS off, and CustomFrameRate=120
    /// installs the in-database trigger that keeps the value pinned.
    Set {
        /// Path to LocalStorage.db (never modified in place)
        file: PathBuf,

        /// Settings to change, as KEY=VALUE (e.g. CustomFrameRate=120)
        #[arg(required = true)]
        assignments: Vec<String>,

        /// Where to write the patched database (default: <FILE stem>_Modified.db)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Also write an untouched backup copy of the input here
        #[arg(long)]
        backup: Option<PathBuf>,
    },
}
