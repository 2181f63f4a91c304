mod driver;
mod options;
mod traits;
mod ytdlp;

pub use driver::run_downloads;
pub use options::{AudioExtraction, DownloadOptions, build_audio_options, build_video_options};
pub use traits::MediaDownloader;
pub use ytdlp::{FINISHED_MARKER, YtDlp, parse_finished_line};
