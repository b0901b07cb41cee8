use crate::app::App;
use crate::args::{Args, Parser};
use crate::pomodoro::State;
use std::process::ExitCode;
use tracing::error;

mod app;
mod args;
mod event;
mod logging;
mod pomodoro;
mod tui;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(err) = logging::init(args.log_file.as_deref(), args.log_level()) {
        eprintln!("error: {err}");
        return ExitCode::FAILURE;
    }

    let pomodoro_state = State::new(args.settings());
    let result = match App::new(pomodoro_state, args.info_url) {
        Ok(mut app) => app.run().await,
        Err(err) => Err(err),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
