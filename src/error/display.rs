// Wed Jan 15 2026 - Alex

use crate::error::backtrace::DEFAULT_FRAMES;
use crate::error::traced::as_traced;
use colored::Colorize;
use std::fmt::Write as _;

const MAX_CAUSE_DEPTH: usize = 10;

pub struct ErrorDisplay {
    show_trace: bool,
    show_cause_chain: bool,
    color_enabled: bool,
    max_frames: usize,
}

impl ErrorDisplay {
    pub fn new() -> Self {
        Self {
            show_trace: true,
            show_cause_chain: true,
            color_enabled: true,
            max_frames: DEFAULT_FRAMES,
        }
    }

    pub fn without_trace(mut self) -> Self {
        self.show_trace = false;
        self
    }

    pub fn without_cause_chain(mut self) -> Self {
        self.show_cause_chain = false;
        self
    }

    pub fn without_colors(mut self) -> Self {
        self.color_enabled = false;
        self
    }

    pub fn with_max_frames(mut self, max_frames: usize) -> Self {
        self.max_frames = max_frames;
        self
    }

    /// Renders `error` the way tracers report it: a `cor::Error:` line for
    /// traced errors followed by their backtrace, an `error:` line for
    /// anything else.
    pub fn format(&self, prefix: &str, error: &anyhow::Error) -> String {
        let mut output = String::new();
        let traced = as_traced(error);

        let label = match (traced.is_some(), self.color_enabled) {
            (true, true) => "cor::Error:".red().bold().to_string(),
            (true, false) => "cor::Error:".to_string(),
            (false, true) => "error:".yellow().bold().to_string(),
            (false, false) => "error:".to_string(),
        };
        let _ = writeln!(output, "{}{} {}", prefix, label, error);

        if self.show_cause_chain {
            for (depth, cause) in error.chain().skip(1).enumerate() {
                if depth >= MAX_CAUSE_DEPTH {
                    output.push_str("  ... (cause chain truncated)\n");
                    break;
                }
                let arrow = if self.color_enabled {
                    "→".yellow().to_string()
                } else {
                    "->".to_string()
                };
                let _ = writeln!(output, "  {} Caused by: {}", arrow, cause);
            }
        }

        if let (true, Some(traced)) = (self.show_trace, traced) {
            let mut context = Vec::new();
            if traced.write_context(&mut context).is_ok() {
                output.push_str(&String::from_utf8_lossy(&context));
            }

            let trace = traced.trace();
            let shown = trace.len().min(self.max_frames);
            for i in 0..shown {
                let _ = writeln!(output, "{}: {}", i, trace.name(i));
            }
            if shown < trace.len() {
                let _ = writeln!(output, "... {} more frames", trace.len() - shown);
            }
        }

        output
    }
}

impl Default for ErrorDisplay {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CError, Error};

    #[test]
    fn test_format_traced() {
        let display = ErrorDisplay::new().without_colors();
        let err: anyhow::Error = Error::new("boom").into();
        let text = display.format("load: ", &err);

        assert!(text.starts_with("load: cor::Error: boom\n"));
        assert!(text.contains("\n0: "));
    }

    #[test]
    fn test_format_foreign() {
        let display = ErrorDisplay::new().without_colors();
        let err = anyhow::anyhow!("plain");
        assert_eq!(display.format("", &err), "error: plain\n");
    }

    #[test]
    fn test_format_cause_chain() {
        let display = ErrorDisplay::new().without_colors().without_trace();
        let err = anyhow::Error::from(Error::new("root")).context("outer");
        let text = display.format("", &err);

        assert_eq!(text, "cor::Error: outer\n  -> Caused by: root\n");
    }

    #[test]
    fn test_format_cerror_and_frame_limit() {
        let display = ErrorDisplay::new().without_colors().with_max_frames(1);
        let err: anyhow::Error = CError::new(0x1f, "ioctl").into();
        let text = display.format("", &err);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "cor::Error: ioctl");
        assert_eq!(lines[1], "rc: 1f");
        assert!(lines[2].starts_with("0: "));
        assert!(lines.iter().all(|l| !l.starts_with("1: ")));
    }
}
