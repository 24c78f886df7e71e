use std::fs;

use clap::Parser;
use squared::{interpreter::host::Host, run_script};

/// Squared is a small, bracket-delimited, indentation-structured scripting
/// language.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells squared to look at a file instead of an inline script.
    #[arg(short, long)]
    file: bool,

    /// Pipe mode automatically prints the value of the last top-level
    /// expression of the script.
    #[arg(short, long)]
    pipe_mode: bool,

    contents: String,
}

fn main() {
    let args = Args::parse();

    let script = if args.file {
        fs::read_to_string(&args.contents).unwrap_or_else(|_| {
            eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                      &args.contents);
            std::process::exit(1);
        })
    } else {
        args.contents
    };

    // Errors have already been reported through the stdio host.
    if run_script(&script, Host::stdio(), args.pipe_mode).is_err() {
        std::process::exit(1);
    }
}
