use std::process::ExitCode;

mod app;
mod logging;

fn main() -> ExitCode {
    let args = canon_rename::cli::parse();
    match app::run(args) {
        Ok(code) => code,
        Err(e) => {
            canon_rename::output::print_error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}
