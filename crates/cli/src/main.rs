use std::process::ExitCode;

fn main() -> ExitCode {
    rigline_cli::run()
}
