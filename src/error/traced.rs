// Tue Jan 13 2026 - Alex

use crate::error::backtrace::{Backtrace, DEFAULT_FRAMES};
use std::io::{self, Write};
use thiserror::Error;

pub const TRACE_DEPTH: usize = DEFAULT_FRAMES;
pub const MAX_MESSAGE_LEN: usize = 64 * 1024;

pub type Trace = Backtrace<TRACE_DEPTH>;

/// Normalizes an error message: anything past `MAX_MESSAGE_LEN` bytes is cut
/// at the nearest character boundary.
pub fn mk_error_message(info: impl Into<String>) -> String {
    let mut message = info.into();
    if message.len() > MAX_MESSAGE_LEN {
        let mut end = MAX_MESSAGE_LEN;
        while !message.is_char_boundary(end) {
            end -= 1;
        }
        message.truncate(end);
    }
    message
}

/// Errors that remember where they were created.
pub trait TracedError: std::error::Error + Send + Sync + 'static {
    fn message(&self) -> &str;

    fn trace(&self) -> &Trace;

    /// Lines printed ahead of the frames.
    fn write_context(&self, _out: &mut dyn Write) -> io::Result<()> {
        Ok(())
    }

    fn write_trace(&self, out: &mut dyn Write) -> io::Result<()> {
        self.write_context(out)?;
        write!(out, "{}", self.trace())
    }

    fn print_trace(&self) {
        let stderr = io::stderr();
        let mut lock = stderr.lock();
        let _ = self.write_trace(&mut lock);
    }
}

#[derive(Error, Debug, Clone)]
#[error("{message}")]
pub struct Error {
    message: String,
    trace: Trace,
}

impl Error {
    pub fn new(info: impl Into<String>) -> Self {
        Self {
            message: mk_error_message(info),
            trace: Backtrace::capture(),
        }
    }
}

impl TracedError for Error {
    fn message(&self) -> &str {
        &self.message
    }

    fn trace(&self) -> &Trace {
        &self.trace
    }
}

/// Failure of a C-style call, carrying its return code.
#[derive(Error, Debug, Clone)]
#[error("{inner}")]
pub struct CError {
    rc: i64,
    inner: Error,
}

impl CError {
    pub fn new(rc: i64, info: impl Into<String>) -> Self {
        Self {
            rc,
            inner: Error::new(info),
        }
    }

    /// Builds the error from the calling thread's `errno`.
    pub fn last_os_error(info: impl AsRef<str>) -> Self {
        let os = io::Error::last_os_error();
        let rc = os.raw_os_error().unwrap_or(0) as i64;
        Self::new(rc, format!("{}: {}", info.as_ref(), os))
    }

    pub fn rc(&self) -> i64 {
        self.rc
    }
}

impl TracedError for CError {
    fn message(&self) -> &str {
        self.inner.message()
    }

    fn trace(&self) -> &Trace {
        self.inner.trace()
    }

    fn write_context(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "rc: {:x}", self.rc)
    }
}

/// Returns the traced view of an error, if it is one of ours.
pub fn as_traced(error: &anyhow::Error) -> Option<&dyn TracedError> {
    if let Some(e) = error.downcast_ref::<CError>() {
        return Some(e as &dyn TracedError);
    }
    error.downcast_ref::<Error>().map(|e| e as &dyn TracedError)
}

/// Creates a [`Error`](crate::error::Error) from a format string.
#[macro_export]
macro_rules! traced_error {
    ($($arg:tt)*) => {
        $crate::error::Error::new(format!($($arg)*))
    };
}

/// Returns early with a traced error.
#[macro_export]
macro_rules! traced_bail {
    ($($arg:tt)*) => {
        return Err($crate::traced_error!($($arg)*).into())
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_formatting() {
        let err = crate::traced_error!("bad value {} in {}", 42, "slot");
        assert_eq!(err.to_string(), "bad value 42 in slot");
        assert_eq!(err.message(), "bad value 42 in slot");
        assert!(!err.trace().is_empty());
    }

    #[test]
    fn test_empty_message() {
        let err = Error::new("");
        assert_eq!(err.to_string(), "");
    }

    #[test]
    fn test_message_is_capped() {
        let long = "é".repeat(MAX_MESSAGE_LEN);
        let message = mk_error_message(long);
        assert!(message.len() <= MAX_MESSAGE_LEN);
        assert!(message.chars().all(|c| c == 'é'));
    }

    #[test]
    fn test_cerror_trace_has_rc() {
        let err = CError::new(-1, "open failed");
        assert_eq!(err.rc(), -1);
        assert_eq!(err.to_string(), "open failed");

        let mut out = Vec::new();
        err.write_trace(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("rc: ffffffffffffffff\n"));
        assert!(text.contains("0: "));
    }

    #[test]
    fn test_last_os_error() {
        unsafe { libc::close(-1) };
        let err = CError::last_os_error("close");
        assert_eq!(err.rc(), libc::EBADF as i64);
        assert!(err.message().starts_with("close: "));
    }

    #[test]
    fn test_as_traced() {
        let plain: anyhow::Error = Error::new("x").into();
        assert_eq!(as_traced(&plain).map(|e| e.message().to_string()).as_deref(), Some("x"));

        let coded: anyhow::Error = CError::new(2, "y").into();
        assert_eq!(as_traced(&coded).map(|e| e.message().to_string()).as_deref(), Some("y"));

        let foreign = anyhow::anyhow!("z");
        assert!(as_traced(&foreign).is_none());
    }

    fn fails() -> anyhow::Result<()> {
        crate::traced_bail!("failed with {}", 7);
    }

    #[test]
    fn test_traced_bail() {
        let err = fails().unwrap_err();
        assert_eq!(err.to_string(), "failed with 7");
        assert!(as_traced(&err).is_some());
    }
}
