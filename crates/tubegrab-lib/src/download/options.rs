use super::ytdlp::FINISHED_PRINT_TEMPLATE;
use crate::config::Settings;
use crate::media::MediaKind;
use crate::output::{OutputTemplate, build_output_template};
use std::path::Path;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AudioExtraction {
    pub codec: String,
    pub quality: String,
}

/// Everything one yt-dlp call needs for a single media kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DownloadOptions {
    pub kind: MediaKind,
    pub format: String,
    pub output: OutputTemplate,
    pub allow_playlists: bool,
    pub retries: u32,
    pub fragment_retries: u32,
    pub concurrent_fragments: u32,
    pub audio_extraction: Option<AudioExtraction>,
    pub merge_output_format: Option<String>,
}

impl DownloadOptions {
    fn common(kind: MediaKind, format: &str, dir: &Path, settings: &Settings, allow_playlists: bool) -> Self {
        Self {
            kind,
            format: format.to_string(),
            output: build_output_template(dir, kind, &settings.na_placeholder),
            allow_playlists,
            retries: settings.retries,
            fragment_retries: settings.fragment_retries,
            concurrent_fragments: settings.concurrent_fragments,
            audio_extraction: None,
            merge_output_format: None,
        }
    }

    /// Renders the options as yt-dlp arguments, excluding the URLs.
    pub fn to_args(&self) -> Vec<String> {
        let playlist_flag = if self.allow_playlists {
            "--yes-playlist"
        } else {
            "--no-playlist"
        };

        let mut args = vec![
            playlist_flag.to_string(),
            "--force-overwrites".to_string(),
            "--no-abort-on-error".to_string(),
            "--retries".to_string(),
            self.retries.to_string(),
            "--fragment-retries".to_string(),
            self.fragment_retries.to_string(),
            "--concurrent-fragments".to_string(),
            self.concurrent_fragments.to_string(),
            "--no-progress".to_string(),
            "--quiet".to_string(),
            "--no-warnings".to_string(),
            "--no-check-certificates".to_string(),
            "--no-simulate".to_string(),
            "--print".to_string(),
            FINISHED_PRINT_TEMPLATE.to_string(),
            "--format".to_string(),
            self.format.clone(),
        ];
        args.extend(self.output.to_args());

        if let Some(audio) = &self.audio_extraction {
            args.extend([
                "--extract-audio".to_string(),
                "--audio-format".to_string(),
                audio.codec.clone(),
                "--audio-quality".to_string(),
                audio.quality.clone(),
            ]);
        }

        if let Some(merge_format) = &self.merge_output_format {
            args.push("--merge-output-format".to_string());
            args.push(merge_format.clone());
        }

        args
    }
}

pub fn build_audio_options(music_dir: &Path, settings: &Settings, allow_playlists: bool) -> DownloadOptions {
    DownloadOptions {
        audio_extraction: Some(AudioExtraction {
            codec: settings.audio_codec.clone(),
            quality: settings.audio_quality.clone(),
        }),
        ..DownloadOptions::common(
            MediaKind::Audio,
            &settings.audio_format,
            music_dir,
            settings,
            allow_playlists,
        )
    }
}

pub fn build_video_options(video_dir: &Path, settings: &Settings, allow_playlists: bool) -> DownloadOptions {
    DownloadOptions {
        merge_output_format: Some(settings.merge_output_format.clone()),
        ..DownloadOptions::common(
            MediaKind::Video,
            &settings.video_format,
            video_dir,
            settings,
            allow_playlists,
        )
    }
}
