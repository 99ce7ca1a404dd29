//! wuwaconf CLI - patch the Wuthering Waves LocalStorage database.

use std::process;

use clap::Parser;

use wuwaconf::cli::{Cli, Commands};
use wuwaconf::commands::{self, Output};

fn main() {
    let cli = Cli::parse();
    let human = cli.human_readable;

    if let Err(e) = run_command(cli.command, human) {
        if human {
            eprintln!("Error: {}", e);
        } else {
            eprintln!("{}", serde_json::json!({ "error": e.to_string() }));
        }
        process::exit(1);
    }
}

fn run_command(command: Commands, human: bool) -> Result<(), wuwaconf::Error> {
    match command {
        Commands::Check { file } => output(&commands::check(&file)?, human),
        Commands::Show { file, known } => output(&commands::show(&file, known)?, human),
        Commands::Set {
            file,
            assignments,
            out,
            backup,
        } => output(&commands::set(&file, &assignments, out, backup)?, human),
    }
    Ok(())
}

/// Print output in JSON or human-readable format.
fn output<T: Output>(result: &T, human: bool) {
    if human {
        println!("{}", result.to_human());
    } else {
        println!("{}", result.to_json());
    }
}
