use crate::error::TubeGrabError;
use itertools::Itertools;
use std::io::ErrorKind;
use std::path::Path;
use url::Url;

const COMMENT_MARKER: char = '#';

/// Extracts URLs from link-file contents, one per line.
///
/// Lines are trimmed; empty lines and lines starting with `#` are skipped.
pub fn parse_links(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with(COMMENT_MARKER))
        .map(str::to_string)
        .collect()
}

pub fn read_links_from_file(path: &Path) -> Result<Vec<String>, TubeGrabError> {
    let contents = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => TubeGrabError::LinkFileNotFound {
            path: path.to_path_buf(),
        },
        _ => TubeGrabError::LinkFileRead {
            path: path.to_path_buf(),
            reason: e.to_string(),
        },
    })?;

    let links = parse_links(&contents);
    tracing::debug!("Read {} links from {}", links.len(), path.display());
    Ok(links)
}

/// Removes exact duplicates, keeping the first occurrence of each URL in order.
pub fn dedupe_urls<I>(urls: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    urls.into_iter().unique().collect()
}

/// Collects file-sourced URLs followed by command-line URLs, deduplicated.
pub fn collect_urls(file: Option<&Path>, cli_urls: Vec<String>) -> Result<Vec<String>, TubeGrabError> {
    let from_file = match file {
        Some(path) => read_links_from_file(path)?,
        None => Vec::new(),
    };

    Ok(dedupe_urls(from_file.into_iter().chain(cli_urls)))
}

/// Single-video URLs that also reference a playlist (`watch?v=…&list=…`).
///
/// Pure playlist URLs are left out; `--no-playlist` does not narrow those.
pub fn playlist_urls(urls: &[String]) -> Vec<&str> {
    urls.iter()
        .filter(|raw| {
            Url::parse(raw.as_str()).is_ok_and(|url| {
                let has = |name: &str| url.query_pairs().any(|(key, _)| key == name);
                has("v") && has("list")
            })
        })
        .map(String::as_str)
        .collect()
}
