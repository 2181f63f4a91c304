use super::DownloadOptions;
use crate::error::TubeGrabError;
use crate::progress::ProgressSink;
use async_trait::async_trait;

/// Fetches a batch of URLs for one media kind.
#[async_trait]
pub trait MediaDownloader: Send + Sync {
    /// Downloads every URL with `options`, reporting each completed unit to `sink`.
    ///
    /// Returns the downloader's exit code; anything but `0` is a failed call.
    async fn download(
        &self,
        options: &DownloadOptions,
        urls: &[String],
        sink: &mut dyn ProgressSink,
    ) -> Result<i32, TubeGrabError>;
}
