// Tue Jan 13 2026 - Alex

pub mod config;
pub mod error;
pub mod symbol;
pub mod tuple;
pub mod utils;

pub use config::Config;
pub use error::{
    error_trace_msg, error_trace_msg_nothrow, error_trace_nothrow, error_tracer, Backtrace, CError, Error,
    ErrorTracer, TracedError,
};
pub use symbol::{demangle, SymbolInfo};
pub use tuple::{FieldId, Record};
