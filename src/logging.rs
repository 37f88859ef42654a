//! Log setup. The terminal UI owns stdout, so events go to a daily log file.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::QuizError;

const LOG_FILE_NAME: &str = "trivia-rush.log";

/// Install the global subscriber. Keep the returned guard alive until exit or
/// buffered lines are lost.
pub fn init<P: AsRef<Path>>(log_dir: P, level: &str) -> Result<WorkerGuard, QuizError> {
    let file_appender = tracing_appender::rolling::daily(log_dir.as_ref(), LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter =
        EnvFilter::try_new(level).map_err(|e| QuizError::Logging(e.to_string()))?;
    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init()
        .map_err(|e| QuizError::Logging(e.to_string()))?;

    Ok(guard)
}
