use anyhow::Result;
use std::process::ExitCode;

fn main() -> Result<ExitCode> {
    wayfinder_cli::main_entry()
}
