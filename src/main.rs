use adif_validator::cli::{args::Args, commands};
use clap::Parser;
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    match commands::run(args) {
        Ok(_summary) => {
            // A completed scan succeeds however many problems the log has
            process::exit(0);
        }
        Err(error) => {
            if error.is_user_error() {
                eprintln!("{}", error);
            } else {
                eprintln!("Error: {:#}", error);
            }
            process::exit(1);
        }
    }
}
