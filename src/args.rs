use crate::pomodoro::{parse_session_duration, SessionDuration, Settings};
pub use clap::Parser;
use std::path::PathBuf;
use url::Url;

pub const DEFAULT_INFO_URL: &str = "https://todoist.com/productivity-methods/pomodoro-technique";

#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Args {
    /// Duration of a work session, as "minutes" or "minutes:seconds"
    #[arg(
        short,
        long,
        value_parser = parse_session_duration,
        default_value_t = SessionDuration::from_mins(25)
    )]
    pub work: SessionDuration,

    /// Duration of a break, as "minutes" or "minutes:seconds"
    #[arg(
        short,
        long = "break",
        value_parser = parse_session_duration,
        default_value_t = SessionDuration::from_mins(5)
    )]
    pub break_duration: SessionDuration,

    /// Page linked from the info dialog
    #[arg(long, default_value = DEFAULT_INFO_URL)]
    pub info_url: Url,

    /// Write logs to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Log debug output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn settings(&self) -> Settings {
        Settings {
            work_duration: self.work,
            break_duration: self.break_duration,
        }
    }

    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "info"
        }
    }
}
