use std::env;
use std::io::{self, IsTerminal};
use std::process::ExitCode;

use feature_tour::{dispatch, logging, registry};

/// Plain output unless both streams are terminals. `CLICOLOR_FORCE` and
/// `NO_COLOR` are still honoured by `colored` itself.
fn configure_colour() {
    let forced = env::var_os("CLICOLOR_FORCE").is_some_and(|v| v != "0");
    if !forced && !(io::stdout().is_terminal() && io::stderr().is_terminal()) {
        colored::control::set_override(false);
    }
}

fn main() -> ExitCode {
    logging::init();
    configure_colour();

    let mut stdout = io::stdout();
    let mut stderr = io::stderr();

    // `Stdout` is passed unlocked: demos print from their own threads.
    match dispatch::run(registry::global(), env::args(), &mut stdout, &mut stderr) {
        Ok(outcome) => outcome.exit_code(),
        Err(err) => {
            eprintln!("tour: failed to write output: {err}");
            ExitCode::FAILURE
        }
    }
}
