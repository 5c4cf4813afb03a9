// Wed Jan 15 2026 - Alex

use crate::config::Config;
use crate::error::display::ErrorDisplay;
use once_cell::sync::Lazy;
use std::io::{self, Write};
use std::sync::Mutex;

/// Runs fallible closures and reports their errors before handing them back
/// (or dropping them, for the `nothrow` flavours).
pub struct ErrorTracer {
    display: ErrorDisplay,
    sink: Mutex<Box<dyn Write + Send>>,
}

impl ErrorTracer {
    pub fn new() -> Self {
        Self {
            display: ErrorDisplay::new(),
            sink: Mutex::new(Box::new(io::stderr())),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let mut display = ErrorDisplay::new().with_max_frames(config.trace_depth);
        if !config.color {
            display = display.without_colors();
        }
        if !config.print_trace {
            display = display.without_trace();
        }
        if !config.print_cause_chain {
            display = display.without_cause_chain();
        }
        Self::new().with_display(display)
    }

    pub fn with_display(mut self, display: ErrorDisplay) -> Self {
        self.display = display;
        self
    }

    pub fn with_sink<W: Write + Send + 'static>(mut self, sink: W) -> Self {
        self.sink = Mutex::new(Box::new(sink));
        self
    }

    pub fn report(&self, msg: &str, error: &anyhow::Error) {
        log::error!("{}{}", msg, error);
        let text = self.display.format(msg, error);
        if let Ok(mut sink) = self.sink.lock() {
            let _ = sink.write_all(text.as_bytes());
            let _ = sink.flush();
        }
    }

    pub fn trace_msg<T, F>(&self, msg: &str, f: F) -> anyhow::Result<T>
    where
        F: FnOnce() -> anyhow::Result<T>,
    {
        f().map_err(|error| {
            self.report(msg, &error);
            error
        })
    }

    pub fn trace_msg_nothrow<T, F>(&self, msg: &str, f: F) -> Option<T>
    where
        F: FnOnce() -> anyhow::Result<T>,
    {
        self.trace_msg(msg, f).ok()
    }

    pub fn trace<T, F>(&self, f: F) -> anyhow::Result<T>
    where
        F: FnOnce() -> anyhow::Result<T>,
    {
        self.trace_msg("", f)
    }

    pub fn trace_nothrow<T, F>(&self, f: F) -> Option<T>
    where
        F: FnOnce() -> anyhow::Result<T>,
    {
        self.trace_msg_nothrow("", f)
    }
}

impl Default for ErrorTracer {
    fn default() -> Self {
        Self::new()
    }
}

static GLOBAL_TRACER: Lazy<ErrorTracer> = Lazy::new(|| match Config::from_env() {
    Ok(config) => ErrorTracer::from_config(&config),
    Err(e) => {
        log::warn!("ignoring tracer environment: {}", e);
        ErrorTracer::new()
    }
});

/// Process-wide tracer used by the free functions, configured from `COR_*`.
pub fn global_tracer() -> &'static ErrorTracer {
    &GLOBAL_TRACER
}

pub fn error_trace_msg<T, F>(msg: &str, f: F) -> anyhow::Result<T>
where
    F: FnOnce() -> anyhow::Result<T>,
{
    global_tracer().trace_msg(msg, f)
}

pub fn error_trace_msg_nothrow<T, F>(msg: &str, f: F) -> Option<T>
where
    F: FnOnce() -> anyhow::Result<T>,
{
    global_tracer().trace_msg_nothrow(msg, f)
}

pub fn error_tracer<T, F>(f: F) -> anyhow::Result<T>
where
    F: FnOnce() -> anyhow::Result<T>,
{
    global_tracer().trace(f)
}

pub fn error_trace_nothrow<T, F>(f: F) -> Option<T>
where
    F: FnOnce() -> anyhow::Result<T>,
{
    global_tracer().trace_nothrow(f)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{as_traced, Error};
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn quiet_tracer(buffer: &SharedBuffer) -> ErrorTracer {
        ErrorTracer::new()
            .with_display(ErrorDisplay::new().without_colors())
            .with_sink(buffer.clone())
    }

    #[test]
    fn test_success_is_silent() {
        let buffer = SharedBuffer::default();
        let tracer = quiet_tracer(&buffer);

        let value = tracer.trace(|| Ok(5)).unwrap();
        assert_eq!(value, 5);
        assert!(buffer.contents().is_empty());
    }

    #[test]
    fn test_traced_error_is_reported_and_returned() {
        let buffer = SharedBuffer::default();
        let tracer = quiet_tracer(&buffer);

        let result: anyhow::Result<()> = tracer.trace_msg("step 1: ", || Err(Error::new("bad").into()));
        let error = result.unwrap_err();

        assert!(as_traced(&error).is_some());
        let text = buffer.contents();
        assert!(text.starts_with("step 1: cor::Error: bad\n"));
        assert!(text.contains("0: "));
    }

    #[test]
    fn test_foreign_error_is_reported() {
        let buffer = SharedBuffer::default();
        let tracer = quiet_tracer(&buffer);

        let result: anyhow::Result<u8> = tracer.trace(|| Ok("x".parse::<u8>()?));
        assert!(result.is_err());
        assert_eq!(buffer.contents(), "error: invalid digit found in string\n");
    }

    #[test]
    fn test_nothrow_swallows() {
        let buffer = SharedBuffer::default();
        let tracer = quiet_tracer(&buffer);

        let value: Option<()> = tracer.trace_nothrow(|| Err(anyhow::anyhow!("gone")));
        assert!(value.is_none());
        assert_eq!(buffer.contents(), "error: gone\n");

        assert_eq!(tracer.trace_msg_nothrow("ctx", || Ok(1)), Some(1));
    }

    #[test]
    fn test_from_config_without_trace() {
        let buffer = SharedBuffer::default();
        let config = Config::new().with_color(false).with_print_trace(false);
        let tracer = ErrorTracer::from_config(&config).with_sink(buffer.clone());

        let _ = tracer.trace(|| -> anyhow::Result<()> { Err(Error::new("quiet").into()) });
        assert_eq!(buffer.contents(), "cor::Error: quiet\n");
    }

    #[test]
    fn test_free_functions_pass_values_through() {
        assert_eq!(error_tracer(|| Ok(3)).unwrap(), 3);
        assert_eq!(error_trace_nothrow(|| Ok("ok")), Some("ok"));
        assert!(error_trace_msg_nothrow::<(), _>("free: ", || Err(anyhow::anyhow!("x"))).is_none());
        assert!(error_trace_msg::<(), _>("free: ", || Err(Error::new("y").into())).is_err());
    }

    struct CapturingLogger(Mutex<Vec<(log::Level, String)>>);

    impl log::Log for CapturingLogger {
        fn enabled(&self, _metadata: &log::Metadata) -> bool {
            true
        }

        fn log(&self, record: &log::Record) {
            self.0.lock().unwrap().push((record.level(), record.args().to_string()));
        }

        fn flush(&self) {}
    }

    static CAPTURED: Lazy<CapturingLogger> = Lazy::new(|| CapturingLogger(Mutex::new(Vec::new())));

    #[test]
    fn test_reports_are_mirrored_to_log() {
        if log::set_logger(&*CAPTURED).is_ok() {
            log::set_max_level(log::LevelFilter::Trace);
        }

        let buffer = SharedBuffer::default();
        let tracer = quiet_tracer(&buffer);
        let _ = tracer.trace_msg("mirror: ", || -> anyhow::Result<()> { Err(Error::new("unique 7f3a").into()) });

        let records = CAPTURED.0.lock().unwrap();
        assert!(records
            .iter()
            .any(|(level, text)| *level == log::Level::Error && text == "mirror: unique 7f3a"));
        assert!(records
            .iter()
            .any(|(level, text)| *level == log::Level::Debug && text.starts_with("captured ")));
    }
}
