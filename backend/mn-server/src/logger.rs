use crate::error::{Result as ServerErrorResult, ServerError};

use std::fmt::Display;
use std::path::PathBuf;
use std::time::SystemTime;

use fern::colors::{Color, ColoredLevelConfig};
use fern::{Dispatch, FormatCallback};
use log::{LevelFilter, Record, info};

/// Where control-plane logs go
enum LogSink {
    /// Append to a file, no colour codes
    File(PathBuf),
    /// Terminal with coloured levels
    Colored,
    /// Plain stdout for systemd / docker logs
    Plain,
}

impl LogSink {
    fn choose(log_file: Option<PathBuf>, colored: bool) -> Self {
        match log_file {
            Some(path) => Self::File(path),
            None if colored => Self::Colored,
            None => Self::Plain,
        }
    }
}

/// `[<rfc3339> - LEVEL] message [file:line]`
fn write_line(
    out: FormatCallback,
    message: &std::fmt::Arguments,
    record: &Record,
    level: impl Display,
) {
    out.finish(format_args!(
        "[{} - {}] {} [{}:{}]",
        humantime::format_rfc3339(SystemTime::now()),
        level,
        message,
        record.file().unwrap_or("unknown"),
        record.line().unwrap_or(0),
    ))
}

/// Install the global logger.
///
/// `log_file` wins over `colored`; colours are never written to files.
pub fn initialize(
    log_level: mn_config::LogLevel,
    log_file: Option<PathBuf>,
    colored: bool,
) -> ServerErrorResult<()> {
    let level = log_level.0;
    let sink = LogSink::choose(log_file, colored);

    let output = match &sink {
        LogSink::File(path) => {
            let file = fern::log_file(path).map_err(|e| ServerError::Logger {
                message: format!("Failed to open log file {}: {}", path.display(), e),
            })?;
            Dispatch::new()
                .format(|out, message, record| write_line(out, message, record, record.level()))
                .chain(file)
        }
        LogSink::Colored => {
            let colors = ColoredLevelConfig::new()
                .trace(Color::Magenta)
                .debug(Color::Blue)
                .info(Color::Green)
                .warn(Color::Yellow)
                .error(Color::Red);
            Dispatch::new()
                .format(move |out, message, record| {
                    write_line(out, message, record, colors.color(record.level()))
                })
                .chain(std::io::stdout())
        }
        LogSink::Plain => Dispatch::new()
            .format(|out, message, record| write_line(out, message, record, record.level()))
            .chain(std::io::stdout()),
    };

    Dispatch::new()
        .level(level)
        // Connection pool chatter from proxying and probes
        .level_for("hyper_util", LevelFilter::Warn)
        .level_for("reqwest", LevelFilter::Warn)
        .chain(output)
        .apply()
        .map_err(|e| ServerError::Logger {
            message: format!("Failed to initialize logger: {e}"),
        })?;

    match &sink {
        LogSink::File(path) => info!("Logging at {:?} to {}", level, path.display()),
        LogSink::Colored | LogSink::Plain => info!("Logging at {:?} to stdout", level),
    }

    tracing_log::LogTracer::init().ok();

    Ok(())
}
