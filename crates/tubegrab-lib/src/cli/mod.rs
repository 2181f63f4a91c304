mod args;
mod params;
mod resolved_command;
mod run;

pub use args::{Args, RunRequest, parse_args, usage};
pub use params::{RunParams, ShutdownOptions};
pub use resolved_command::{expand_home, resolve_command};
pub use run::{SessionReport, run_session};
