use std::process::ExitCode;

fn main() -> ExitCode {
    vonage_cli::run()
}
