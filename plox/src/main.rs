use std::process::ExitCode;

use plox_driver::{Argument, Parser};

fn main() -> ExitCode {
    let status = match Argument::try_parse() {
        Ok(argument) => plox_driver::run(argument),
        Err(error) => plox_driver::usage(&error),
    };

    status.into()
}
