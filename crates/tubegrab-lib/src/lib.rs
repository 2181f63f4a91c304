pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod download;
pub mod error;
pub mod links;
pub mod media;
pub mod output;
pub mod progress;
pub mod session;
pub mod tools;
pub mod update;

pub use config::Settings;
pub use error::TubeGrabError;
