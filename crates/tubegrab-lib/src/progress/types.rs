use serde::{Deserialize, Serialize};

/// Signals a downloader emits while a media-kind call runs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProgressEvent {
    /// One unit finished downloading and post-processing.
    Finished {
        filename: String,
        source_url: Option<String>,
    },
    /// Any other line of downloader output.
    Message(String),
}

/// Receives progress events synchronously from inside a download call.
pub trait ProgressSink: Send {
    fn on_event(&mut self, event: ProgressEvent);
}

/// How completed units are turned into the `done` count.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum CountPolicy {
    /// Every completed unit counts, so one URL fetched as audio and video counts twice.
    #[default]
    PerUnit,
    /// Each distinct source URL counts once across media kinds.
    PerUrl,
}
