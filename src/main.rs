use std::process::ExitCode;

fn main() -> ExitCode {
    match hormone_survey_lib::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("hormone-survey: {e}");
            ExitCode::FAILURE
        }
    }
}
