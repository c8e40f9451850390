use std::process::ExitCode;

use svgtess::cli::{get_config, init_logging, run};

fn main() -> ExitCode {
    let result = get_config().and_then(|config| {
        init_logging(config.verbosity);
        run(config)
    });
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
