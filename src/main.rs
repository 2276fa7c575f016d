use squarekit::{init_logging, run};
use std::process;

fn main() {
    if let Err(e) = init_logging() {
        eprintln!("squarekit: failed to initialize logging: {e:#}");
    }

    match run() {
        Ok(stats) => tracing::debug!("Done: {}", stats),
        Err(e) => {
            eprintln!("squarekit: {e:#}");
            process::exit(-1);
        }
    }
}
