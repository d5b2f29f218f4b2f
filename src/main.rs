use std::process::ExitCode;
use tidyext::cli::{main_with_args, parse_args};

fn main() -> ExitCode {
    match parse_args() {
        Ok(args) => main_with_args(args),
        Err(code) => code,
    }
}
