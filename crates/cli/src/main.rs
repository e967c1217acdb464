use std::process::ExitCode;

fn main() -> ExitCode {
    comparo_cli::run()
}
