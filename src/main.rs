use std::process::ExitCode;

fn main() -> ExitCode {
    match sortdesk::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
