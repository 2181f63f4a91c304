use std::path::{Path, PathBuf};

pub const YTDLP: &str = "yt-dlp";
pub const FFMPEG: &str = "ffmpeg";

/// Resolves `name` on `PATH`.
pub fn find_tool(name: &str) -> Option<PathBuf> {
    which::which(name).ok()
}

pub fn have_ffmpeg() -> bool {
    find_tool(FFMPEG).is_some()
}

/// yt-dlp binary to run: the configured path, the one on `PATH`, or the bare name.
///
/// A bare name that does not resolve is still returned so the spawn failure
/// surfaces as a per-kind download error.
pub fn resolve_ytdlp(configured: Option<&Path>) -> PathBuf {
    if let Some(path) = configured {
        return path.to_path_buf();
    }

    match find_tool(YTDLP) {
        Some(path) => {
            tracing::debug!("Using yt-dlp at {}", path.display());
            path
        }
        None => {
            tracing::warn!("yt-dlp not found on PATH");
            PathBuf::from(YTDLP)
        }
    }
}
