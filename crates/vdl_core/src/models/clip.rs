//! Clip identifier and the temporary media files it names.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Opaque identifier returned by the clip metadata endpoint.
///
/// Always non-empty. Construct with [`ClipId::new`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClipId(String);

impl ClipId {
    /// Wrap a raw identifier, trimming whitespace. Returns `None` when empty.
    pub fn new(raw: impl AsRef<str>) -> Option<Self> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Temporary files for this clip inside `work_dir`.
    pub fn media_pair(&self, work_dir: &Path) -> MediaPair {
        MediaPair {
            video: work_dir.join(format!("{}-video.mp4", self.0)),
            audio: work_dir.join(format!("{}-audio.mp4", self.0)),
        }
    }
}

impl fmt::Display for ClipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The separately downloaded video and audio streams of one clip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaPair {
    pub video: PathBuf,
    pub audio: PathBuf,
}

impl MediaPair {
    /// Both streams are present on disk.
    pub fn both_exist(&self) -> bool {
        self.video.is_file() && self.audio.is_file()
    }

    /// First missing stream, if any.
    pub fn first_missing(&self) -> Option<&Path> {
        [&self.video, &self.audio]
            .into_iter()
            .find(|path| !path.is_file())
            .map(PathBuf::as_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn rejects_blank_ids() {
        assert!(ClipId::new("").is_none());
        assert!(ClipId::new("   ").is_none());
        assert_eq!(ClipId::new(" abc123 ").unwrap().as_str(), "abc123");
    }

    #[test]
    fn media_pair_names() {
        let id = ClipId::new("abc123").unwrap();
        let pair = id.media_pair(Path::new("/work"));
        assert_eq!(pair.video, PathBuf::from("/work/abc123-video.mp4"));
        assert_eq!(pair.audio, PathBuf::from("/work/abc123-audio.mp4"));
    }

    #[test]
    fn reports_first_missing_stream() {
        let dir = tempdir().unwrap();
        let pair = ClipId::new("x").unwrap().media_pair(dir.path());
        assert_eq!(pair.first_missing(), Some(pair.video.as_path()));

        fs::write(&pair.video, b"v").unwrap();
        assert_eq!(pair.first_missing(), Some(pair.audio.as_path()));

        fs::write(&pair.audio, b"a").unwrap();
        assert!(pair.both_exist());
        assert_eq!(pair.first_missing(), None);
    }
}
