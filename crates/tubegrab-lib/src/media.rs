use std::fmt;
use std::path::{Path, PathBuf};

/// The two independent download categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Audio,
    Video,
}

impl MediaKind {
    pub fn label(&self) -> &'static str {
        match self {
            MediaKind::Audio => "AUDIO",
            MediaKind::Video => "VIDEO",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which kinds a run downloads. Requesting neither means both.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MediaSelection {
    pub audio: bool,
    pub video: bool,
}

impl MediaSelection {
    pub fn from_flags(audio: bool, video: bool) -> Self {
        let neither = !audio && !video;
        Self {
            audio: audio || neither,
            video: video || neither,
        }
    }

    /// Requested kinds in execution order: audio first, then video.
    pub fn kinds(&self) -> Vec<MediaKind> {
        let mut kinds = Vec::with_capacity(2);
        if self.audio {
            kinds.push(MediaKind::Audio);
        }
        if self.video {
            kinds.push(MediaKind::Video);
        }
        kinds
    }
}

/// Target directories for each media kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputDirs {
    pub video: PathBuf,
    pub music: PathBuf,
}

impl OutputDirs {
    pub fn for_kind(&self, kind: MediaKind) -> &Path {
        match kind {
            MediaKind::Audio => &self.music,
            MediaKind::Video => &self.video,
        }
    }

    /// Directory holding the session log; video wins when both kinds run.
    pub fn log_dir(&self, selection: MediaSelection) -> &Path {
        if selection.video {
            &self.video
        } else {
            &self.music
        }
    }

    pub fn ensure_exist(&self) -> Result<(), crate::error::TubeGrabError> {
        for dir in [&self.video, &self.music] {
            std::fs::create_dir_all(dir).map_err(|e| {
                crate::error::TubeGrabError::OutputDirectoryCreation {
                    path: dir.clone(),
                    reason: e.to_string(),
                }
            })?;
        }
        Ok(())
    }
}
