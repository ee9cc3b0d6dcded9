use std::process;

use env_logger::Builder;
use genkey::{report, run, Args};
use log::LevelFilter;

fn main() {
    // stderr carries usage and errors only, keep chatter below warn out of it
    Builder::new().filter_level(LevelFilter::Warn).init();

    let code = match Args::from_env().and_then(run) {
        Ok(outcome) => outcome.exit_code(),
        Err(e) => {
            eprint!("{}", report(&e));
            e.exit_code()
        }
    };
    process::exit(code);
}
