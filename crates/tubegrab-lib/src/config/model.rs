use crate::progress::CountPolicy;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Explicit yt-dlp binary; looked up on `PATH` when unset.
    pub ytdlp_path: Option<PathBuf>,
    pub retries: u32,
    pub fragment_retries: u32,
    pub concurrent_fragments: u32,
    /// Format selector for audio downloads.
    pub audio_format: String,
    /// Codec the extracted audio is converted to.
    pub audio_codec: String,
    pub audio_quality: String,
    /// Format selector for video downloads.
    pub video_format: String,
    pub merge_output_format: String,
    /// Substituted for metadata fields yt-dlp cannot resolve.
    pub na_placeholder: String,
    pub log_file_name: String,
    /// Program and arguments used by `--auto-update`; defaults to `<yt-dlp> -U`.
    pub update_command: Option<Vec<String>>,
    pub count_policy: CountPolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ytdlp_path: None,
            retries: 3,
            fragment_retries: 3,
            concurrent_fragments: 1,
            audio_format: "bestaudio/best".to_string(),
            audio_codec: "m4a".to_string(),
            audio_quality: "0".to_string(),
            video_format: "bestvideo[ext=mp4]+bestaudio[ext=m4a]/best[ext=mp4]/best".to_string(),
            merge_output_format: "mp4".to_string(),
            na_placeholder: "unknown".to_string(),
            log_file_name: "download_log.txt".to_string(),
            update_command: None,
            count_policy: CountPolicy::PerUnit,
        }
    }
}
