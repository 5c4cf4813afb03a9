// Tue Jan 13 2026 - Alex

pub mod backtrace;
pub mod cmem;
pub mod display;
pub mod traced;
pub mod tracer;

pub use backtrace::{Backtrace, DEFAULT_FRAMES};
pub use cmem::{is_address_valid, CMem};
pub use display::ErrorDisplay;
pub use traced::{as_traced, mk_error_message, CError, Error, Trace, TracedError, MAX_MESSAGE_LEN, TRACE_DEPTH};
pub use tracer::{
    error_trace_msg, error_trace_msg_nothrow, error_trace_nothrow, error_tracer, global_tracer,
    ErrorTracer,
};
