use colored::Colorize;
use fern::colors::{Color, ColoredLevelConfig};
use log::LevelFilter;
use middleware::logger::LoggerMiddleware;

pub mod middleware {
    pub mod logger;
}

/// Sets up the logger for the application.
///
/// Logs go to stdout when `console` is set and, when `log_file` is given, to
/// that file as well. `RUST_LOG`-style filtering is not supported; `debug`
/// raises the level from `Info` to `Debug`.
pub fn setup(console: bool, log_file: Option<&str>, debug: bool) -> Result<(), fern::InitError> {
    let stdout = console.then(|| fern::Output::from(std::io::stdout()));
    dispatch(stdout, log_file, debug)?.apply()?;
    Ok(())
}

fn dispatch(
    console: Option<fern::Output>,
    log_file: Option<&str>,
    debug: bool,
) -> Result<fern::Dispatch, fern::InitError> {
    let colors = ColoredLevelConfig::new()
        .error(Color::Red)
        .warn(Color::Yellow)
        .info(Color::Green)
        .debug(Color::Blue)
        .trace(Color::Magenta);

    let level = if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut dispatch = fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "{} {} [{}] {}",
                chrono::Local::now()
                    .format("[%Y-%m-%d %H:%M:%S]")
                    .to_string()
                    .bright_black(),
                colors.color(record.level()),
                record.target().bright_blue(),
                message
            ))
        })
        .level(level)
        .level_for("hyper", LevelFilter::Off)
        .level_for("sqlx", LevelFilter::Warn);

    if let Some(console) = console {
        dispatch = dispatch.chain(console);
    }
    if let Some(path) = log_file {
        dispatch = dispatch.chain(fern::log_file(path)?);
    }

    Ok(dispatch)
}

/// Creates a logger middleware for Actix Web.
/// This middleware logs one line per HTTP request.
pub fn middleware(console_logging_enabled: bool) -> LoggerMiddleware {
    LoggerMiddleware::new(console_logging_enabled)
}
