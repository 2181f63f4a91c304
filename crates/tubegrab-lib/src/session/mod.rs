mod context;
mod logger;

pub use context::{Counters, RunContext};
pub use logger::{FileLogSink, LogSink, log_session_start, log_session_summary};
