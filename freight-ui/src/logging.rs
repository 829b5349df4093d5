//! Tracing setup for the dashboard.
//!
//! Records go to stderr so they never interleave with the rendered
//! dashboard on stdout. A log file can be attached after start-up and the
//! level can be changed while the dashboard runs.

use std::{
    fs::File,
    io::{self, IsTerminal, Write},
    path::Path,
    sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError},
};

use anyhow::Result;
use chrono::Local;
use tracing::{Event, Level, Subscriber, debug};
use tracing_subscriber::{
    EnvFilter,
    fmt::{
        FmtContext, MakeWriter,
        format::{FormatEvent, FormatFields, Writer},
    },
    layer::SubscriberExt,
    registry::LookupSpan,
    reload,
    util::SubscriberInitExt,
};

/// `timestamp LEVEL file:line message`, coloured when the writer is a
/// terminal.
struct DashboardFmt;

impl<S, N> FormatEvent<S, N> for DashboardFmt
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        let ansi = writer.has_ansi_escapes();
        let timestamp = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");

        if ansi {
            write!(writer, "\x1b[2m{timestamp}\x1b[0m ")?;
        } else {
            write!(writer, "{timestamp} ")?;
        }

        let colour = match *meta.level() {
            Level::ERROR => "\x1b[1;31m",
            Level::WARN => "\x1b[1;33m",
            Level::INFO => "\x1b[1;32m",
            Level::DEBUG => "\x1b[1;34m",
            Level::TRACE => "\x1b[1;35m",
        };
        if ansi {
            write!(writer, "{colour}{:>5}\x1b[0m ", meta.level())?;
        } else {
            write!(writer, "{:>5} ", meta.level())?;
        }

        if let (Some(file), Some(line)) = (meta.file(), meta.line()) {
            let file = file
                .rsplit_once("src/")
                .or_else(|| file.rsplit_once("src\\"))
                .map_or(file, |(_, rest)| rest);
            write!(writer, "{file}:{line} ")?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Writer that discards output until a file is attached.
#[derive(Clone)]
struct FileSlot(Arc<Mutex<Option<File>>>);

struct SlotWriter<'a>(MutexGuard<'a, Option<File>>);

impl Write for SlotWriter<'_> {
    fn write(
        &mut self,
        buf: &[u8],
    ) -> io::Result<usize> {
        match &mut *self.0 {
            Some(f) => f.write(buf),
            None => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut *self.0 {
            Some(f) => f.flush(),
            None => Ok(()),
        }
    }
}

impl<'a> MakeWriter<'a> for FileSlot {
    type Writer = SlotWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        SlotWriter(self.0.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

type SetLevelFn = Box<dyn Fn(&str) -> Result<()> + Send + Sync>;

static SET_LOG_LEVEL: OnceLock<SetLevelFn> = OnceLock::new();
static FILE_SLOT: OnceLock<Arc<Mutex<Option<File>>>> = OnceLock::new();

fn parse_filter(directive: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(directive)
        .map_err(|e| anyhow::anyhow!("invalid log level '{directive}': {e}"))
}

/// Installs the global subscriber. Later calls are ignored.
///
/// `RUST_LOG` takes precedence over `level`; an unparseable `level` falls
/// back to `info`.
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| parse_filter(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let (level_filter, level_handle) = reload::Layer::new(filter);

    let file_inner: Arc<Mutex<Option<File>>> = Arc::new(Mutex::new(None));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .event_format(DashboardFmt)
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr);

    let file_layer = tracing_subscriber::fmt::layer()
        .event_format(DashboardFmt)
        .with_ansi(false)
        .with_writer(FileSlot(file_inner.clone()));

    if tracing_subscriber::registry()
        .with(level_filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .is_ok()
    {
        let _ = FILE_SLOT.set(file_inner);
        let _ = SET_LOG_LEVEL.set(Box::new(move |directive: &str| {
            let filter = parse_filter(directive)?;
            level_handle
                .reload(filter)
                .map_err(|e| anyhow::anyhow!("filter reload failed: {e}"))
        }));
    }
}

/// Changes the active filter. Accepts a bare level ("debug") or any
/// `EnvFilter` directive.
pub fn set_log_level(level: &str) -> Result<()> {
    match SET_LOG_LEVEL.get() {
        Some(f) => f(level),
        None => anyhow::bail!("logging not yet initialized"),
    }
}

/// Appends log records to `path`, replacing any file already attached. The
/// directory must exist.
pub fn enable_file_logging(path: &Path) -> Result<()> {
    let file = File::options()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| anyhow::anyhow!("cannot open log file '{}': {e}", path.display()))?;

    match FILE_SLOT.get() {
        Some(slot) => {
            *slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(file);
            Ok(())
        }
        None => anyhow::bail!("logging not yet initialized"),
    }
}

/// Records how a background request task ended. Failures are already
/// logged by the dashboard, so this stays at debug.
pub fn log_task_result<E: std::fmt::Display>(
    task_name: &'static str,
    result: Result<(), E>,
) {
    match result {
        Ok(()) => debug!(task = task_name, "request task finished"),
        Err(error) => debug!(task = task_name, %error, "request task finished with error"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_filter_accepts_levels_and_directives() {
        assert!(parse_filter("debug").is_ok());
        assert!(parse_filter("info,freight_core=trace").is_ok());
    }

    #[test]
    fn parse_filter_rejects_garbage() {
        let err = parse_filter("freight_core=loud").unwrap_err();
        assert!(err.to_string().contains("invalid log level"));
    }
}
