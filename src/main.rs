//! Binary entry point for the `folkb` CLI (`SPEC_FULL.md` §6.3). All
//! behavior lives in [`folkb::app`]; this file only hands off to it.

use std::process::ExitCode;

fn main() -> ExitCode {
    folkb::app::run()
}
