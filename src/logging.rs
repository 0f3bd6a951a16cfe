//! Tracing initialization.
//! Builds a subscriber with EnvFilter, compact or JSON formatting, and optional file logging.
//!
//! Behavior:
//! - Log level is driven by LogLevel (no RUST_LOG override here).
//! - Console events go to stderr so stdout stays free for result rows.
//! - If `log_file` is provided and passes safety checks, a non-blocking file layer is added.
//! - File logging is refused when any ancestor of the file path is a symlink.

use anyhow::Result;
use canon_rename::config::{default_log_path, path_has_symlink_ancestor, LogLevel};
use canon_rename::output as out;
use canon_rename::platform::open_log_file_secure_append;
use chrono::Local;
use std::fmt as stdfmt;
use std::io;
use std::path::Path;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::fmt as tsfmt;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry;
use tracing_subscriber::registry::Registry;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Human-friendly timestamp formatter (DD/MM/YY HH:MM:SS)
struct LocalHumanTime;
impl FormatTime for LocalHumanTime {
    fn format_time(&self, w: &mut tsfmt::format::Writer<'_>) -> stdfmt::Result {
        write!(w, "{}", Local::now().format("%d/%m/%y %H:%M:%S"))
    }
}

#[inline]
fn to_level_filter(lvl: &LogLevel) -> LevelFilter {
    match lvl {
        LogLevel::Quiet => LevelFilter::ERROR,
        LogLevel::Normal => LevelFilter::WARN,
        LogLevel::Info => LevelFilter::INFO,
        LogLevel::Debug => LevelFilter::TRACE,
    }
}

fn env_filter_from_level(level_filter: LevelFilter) -> EnvFilter {
    EnvFilter::new(level_filter.to_string().to_ascii_lowercase())
}

fn fmt_layer<W>(writer: W, json: bool, ansi: bool) -> BoxedLayer
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let base = tsfmt::layer()
        .with_timer(LocalHumanTime)
        .with_level(true)
        .with_target(true)
        .with_ansi(ansi)
        .with_writer(writer);
    if json {
        base.json().boxed()
    } else {
        base.compact().boxed()
    }
}

/// Open a non-blocking file writer, or explain on stderr why not.
fn maybe_open_non_blocking_writer(path: &Path) -> Option<(NonBlocking, WorkerGuard)> {
    match path_has_symlink_ancestor(path) {
        Ok(true) => {
            eprintln!(
                "Refusing to enable file logging: ancestor of {} is a symlink; proceeding without file logging.",
                path.display()
            );
            return None;
        }
        Err(e) => {
            eprintln!(
                "Error checking log path {} for symlinks: {}; proceeding without file logging.",
                path.display(),
                e
            );
            return None;
        }
        Ok(false) => {}
    }

    match open_log_file_secure_append(path) {
        Ok(file) => Some(tracing_appender::non_blocking(file)),
        Err(e) => {
            eprintln!("Failed to open log file {}: {}", path.display(), e);
            None
        }
    }
}

/// Initialize tracing. Returns the WorkerGuard of the file appender, which must
/// be held until shutdown to flush logs.
pub fn init_tracing(
    lvl: &LogLevel,
    log_file: Option<&Path>,
    json: bool,
) -> Result<Option<WorkerGuard>> {
    let env_filter = env_filter_from_level(to_level_filter(lvl));
    let ansi = atty::is(atty::Stream::Stderr) && !json;
    let mut layers: Vec<BoxedLayer> = vec![fmt_layer(io::stderr, json, ansi)];
    let mut guard = None;

    if let Some(path) = log_file {
        match maybe_open_non_blocking_writer(path) {
            Some((writer, g)) => {
                layers.push(fmt_layer(writer, json, false));
                guard = Some(g);
            }
            None => {
                out::print_warn(&format!(
                    "Requested file logging to '{}' was not enabled. Logs will continue to stderr.",
                    path.display()
                ));
                if let Ok(def) = default_log_path() {
                    out::print_info(&format!("You can try the default log path instead: {}", def.display()));
                }
            }
        }
    }

    registry().with(layers).with(env_filter).try_init()?;
    Ok(guard)
}
