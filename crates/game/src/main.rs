mod app;

use std::process::ExitCode;

fn main() -> ExitCode {
    let wiring = match app::bootstrap::build_app() {
        Ok(wiring) => wiring,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };
    app::loop_runner::run(wiring)
}
