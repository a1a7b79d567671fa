//! Path utilities for detecting catalog video files by extension.
//!
//! Extension lists may be written with or without the leading dot
//! (`".mp4"` and `"mp4"` are equivalent), and matching ignores case.

use std::path::Path;

/// Extensions treated as catalog videos when nothing else is configured.
pub const DEFAULT_VIDEO_EXTENSIONS: &[&str] = &[
    "mp4", "avi", "rmvb", "wmv", "mov", "mkv", "flv", "ts", "webm", "iso",
];

/// Lowercase an extension and drop a leading dot.
///
/// ```
/// use idforged_common::paths::normalize_extension;
///
/// assert_eq!(normalize_extension(".MKV"), "mkv");
/// assert_eq!(normalize_extension("mp4"), "mp4");
/// ```
pub fn normalize_extension(ext: &str) -> String {
    ext.trim().trim_start_matches('.').to_lowercase()
}

/// Check if `path` carries one of `extensions`.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use idforged_common::paths::has_extension;
///
/// let allowed = [".mp4", "mkv"];
/// assert!(has_extension(Path::new("/media/ABP-454.MP4"), &allowed));
/// assert!(!has_extension(Path::new("ABP-454.srt"), &allowed));
/// ```
pub fn has_extension<S: AsRef<str>>(path: &Path, extensions: &[S]) -> bool {
    let Some(ext) = path.extension().and_then(|ext| ext.to_str()) else {
        return false;
    };
    let ext = ext.to_lowercase();
    extensions
        .iter()
        .any(|allowed| normalize_extension(allowed.as_ref()) == ext)
}

/// Check if a path has one of the default video extensions.
///
/// ```
/// use std::path::Path;
/// use idforged_common::paths::is_video_file;
///
/// assert!(is_video_file(Path::new("movie.rmvb")));
/// assert!(!is_video_file(Path::new("cover.jpg")));
/// ```
pub fn is_video_file(path: &Path) -> bool {
    has_extension(path, DEFAULT_VIDEO_EXTENSIONS)
}

/// The default video extensions, each with a leading dot.
#[must_use]
pub fn video_extensions() -> Vec<String> {
    DEFAULT_VIDEO_EXTENSIONS
        .iter()
        .map(|ext| format!(".{ext}"))
        .collect()
}
