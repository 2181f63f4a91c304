use crate::media::MediaKind;
use std::path::Path;

const FILE_NAME_PATTERN: &str = "%(artist)s-%(title)s.%(ext)s";
const SPACE_REPLACED_FIELDS: &str = "artist,title";

/// Output naming handed to yt-dlp: the path template plus the rules that shape it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputTemplate {
    pub template: String,
    pub na_placeholder: String,
    pub restrict_filenames: bool,
}

impl OutputTemplate {
    pub fn to_args(&self) -> Vec<String> {
        let mut args = vec![
            "--output".to_string(),
            self.template.clone(),
            "--output-na-placeholder".to_string(),
            self.na_placeholder.clone(),
            // Spaces in artist and title become underscores before templating.
            "--replace-in-metadata".to_string(),
            SPACE_REPLACED_FIELDS.to_string(),
            " ".to_string(),
            "_".to_string(),
        ];
        if self.restrict_filenames {
            args.push("--restrict-filenames".to_string());
        }
        args
    }
}

/// Builds the `artist-title.ext` template under `base_dir`.
///
/// Both media kinds share the naming scheme; the extension is resolved by yt-dlp
/// after conversion (`m4a`) or merging (`mp4`).
pub fn build_output_template(base_dir: &Path, kind: MediaKind, na_placeholder: &str) -> OutputTemplate {
    let template = base_dir.join(FILE_NAME_PATTERN).to_string_lossy().into_owned();
    tracing::trace!(%kind, template = %template, "Built output template");

    OutputTemplate {
        template,
        na_placeholder: na_placeholder.to_string(),
        restrict_filenames: true,
    }
}
