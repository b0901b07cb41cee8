use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;
use thiserror::Error;
use tracing::subscriber::SetGlobalDefaultError;
use tracing::Subscriber;
use tracing_subscriber::EnvFilter;

/// Sends `tracing` output to `path`. The terminal belongs to the ui, so without
/// a log file nothing is installed and events are dropped.
///
/// `RUST_LOG` takes precedence over `default_level`.
pub fn init(path: Option<&Path>, default_level: &str) -> Result<(), LoggingError> {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();

    match file_subscriber(path, filter(directives, default_level))? {
        Some(subscriber) => Ok(tracing::subscriber::set_global_default(subscriber)?),
        None => Ok(()),
    }
}

fn filter(directives: Option<String>, default_level: &str) -> EnvFilter {
    directives
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(format!("pomodoro_timer={default_level}")))
}

fn file_subscriber(
    path: Option<&Path>,
    filter: EnvFilter,
) -> Result<Option<impl Subscriber + Send + Sync + 'static>, LoggingError> {
    let Some(path) = path else {
        return Ok(None);
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(LoggingError::OpenFile)?;

    Ok(Some(
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .finish(),
    ))
}

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("failed to open log file: {0}")]
    OpenFile(io::Error),
    #[error("failed to install log subscriber: {0}")]
    Install(#[from] SetGlobalDefaultError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tracing::level_filters::LevelFilter;
    use tracing::{debug, info};

    #[test]
    fn test_without_log_file_nothing_is_installed() {
        assert!(init(None, "info").is_ok());
        assert!(file_subscriber(None, filter(None, "info")).unwrap().is_none());
    }

    #[test]
    fn test_events_are_written_to_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pomodoro.log");

        let subscriber = file_subscriber(Some(&path), filter(None, "info"))
            .unwrap()
            .unwrap();
        tracing::subscriber::with_default(subscriber, || {
            info!("timer started");
            debug!("session duration adjusted");
        });

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("timer started"));
        assert!(!contents.contains("session duration adjusted"));
    }

    #[test]
    fn test_log_file_is_appended_to() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pomodoro.log");
        fs::write(&path, "earlier run\n").unwrap();

        let subscriber = file_subscriber(Some(&path), filter(None, "info"))
            .unwrap()
            .unwrap();
        tracing::subscriber::with_default(subscriber, || info!("timer reset"));

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("earlier run\n"));
        assert!(contents.contains("timer reset"));
    }

    #[test]
    fn test_unopenable_log_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("pomodoro.log");

        let result = init(Some(&path), "info");

        assert!(matches!(result, Err(LoggingError::OpenFile(_))));
    }

    #[test]
    fn test_rust_log_overrides_default_level() {
        assert_eq!(filter(None, "info").max_level_hint(), Some(LevelFilter::INFO));
        assert_eq!(filter(None, "debug").max_level_hint(), Some(LevelFilter::DEBUG));
        assert_eq!(
            filter(Some("pomodoro_timer=trace".to_string()), "info").max_level_hint(),
            Some(LevelFilter::TRACE)
        );
    }

    #[test]
    fn test_invalid_rust_log_falls_back_to_default_level() {
        let filter = filter(Some("pomodoro_timer=loud".to_string()), "debug");

        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
    }
}
