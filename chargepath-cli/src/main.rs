//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

fn main() {
    if let Err(err) = chargepath_cli::run() {
        eprintln!("chargepath: {err}");
        std::process::exit(1);
    }
}
