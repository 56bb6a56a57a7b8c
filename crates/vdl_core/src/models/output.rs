//! Output target for the merged file.

use std::path::{Path, PathBuf};

use crate::validation::ValidationError;

/// Container extensions accepted as-is on the output name.
const VIDEO_EXTENSIONS: [&str; 6] = ["mp4", "mkv", "avi", "mov", "flv", "wmv"];

/// Whether `name` already ends in a known video container extension.
pub fn has_video_extension(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| VIDEO_EXTENSIONS.iter().any(|known| known.eq_ignore_ascii_case(ext)))
        .unwrap_or(false)
}

/// Trim `name` and append `.mp4` unless it already has a container extension.
pub fn normalize_output_name(name: &str) -> String {
    let trimmed = name.trim();
    if has_video_extension(trimmed) {
        trimmed.to_string()
    } else {
        format!("{}.mp4", trimmed)
    }
}

/// User-chosen output file name, optionally inside a chosen directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTarget {
    file_name: String,
    directory: Option<PathBuf>,
}

impl OutputTarget {
    /// Build a target from the raw name field and the optional picked folder.
    ///
    /// A blank name is rejected; a blank directory means "the work directory".
    pub fn new(name: &str, directory: Option<&Path>) -> Result<Self, ValidationError> {
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyOutputName);
        }

        let directory = directory
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(Path::to_path_buf);

        Ok(Self {
            file_name: normalize_output_name(name),
            directory,
        })
    }

    /// Normalised file name, e.g. `clip.mp4`.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn directory(&self) -> Option<&Path> {
        self.directory.as_deref()
    }

    /// Directory the merged file is written to.
    pub fn resolve_dir(&self, work_dir: &Path) -> PathBuf {
        match &self.directory {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => work_dir.join(dir),
            None => work_dir.to_path_buf(),
        }
    }

    /// Full path of the merged file.
    pub fn resolve(&self, work_dir: &Path) -> PathBuf {
        self.resolve_dir(work_dir).join(&self.file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_check_is_case_insensitive() {
        assert!(has_video_extension("clip.mp4"));
        assert!(has_video_extension("clip.MKV"));
        assert!(!has_video_extension("clip"));
        assert!(!has_video_extension("clip.txt"));
        assert!(!has_video_extension(".mp4x"));
    }

    #[test]
    fn name_gets_mp4_appended() {
        assert_eq!(normalize_output_name(" lecture "), "lecture.mp4");
        assert_eq!(normalize_output_name("lecture.mov"), "lecture.mov");
        assert_eq!(normalize_output_name("v1.2"), "v1.2.mp4");
    }

    #[test]
    fn blank_name_is_rejected() {
        assert_eq!(
            OutputTarget::new("  ", None),
            Err(ValidationError::EmptyOutputName)
        );
    }

    #[test]
    fn resolves_against_work_dir() {
        let work = Path::new("/work");

        let plain = OutputTarget::new("clip", None).unwrap();
        assert_eq!(plain.resolve(work), PathBuf::from("/work/clip.mp4"));

        let relative = OutputTarget::new("clip", Some(Path::new("out"))).unwrap();
        assert_eq!(relative.resolve(work), PathBuf::from("/work/out/clip.mp4"));

        let absolute = OutputTarget::new("clip.mkv", Some(Path::new("/videos"))).unwrap();
        assert_eq!(absolute.resolve(work), PathBuf::from("/videos/clip.mkv"));

        let empty_dir = OutputTarget::new("clip", Some(Path::new(""))).unwrap();
        assert_eq!(empty_dir.directory(), None);
    }
}
