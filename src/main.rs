extern crate smartagent_receiver;

use std::process::ExitCode;

use smartagent_receiver::{app, cli::Opts};

fn main() -> ExitCode {
    let opts = Opts::get_matches().unwrap_or_else(|error| error.exit());
    ExitCode::from(app::run(opts) as u8)
}
