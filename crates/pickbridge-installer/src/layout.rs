//! Archive layout classification and display-name helpers

/// Top-level content markers that identify a flat archive
///
/// These are the directories the plugin loader reads; an archive carrying
/// any of them at its root needs no unwrapping, only a rename.
pub const CONTENT_MARKERS: [&str; 3] = ["data/", "images/", "sounds/"];

/// How a plugin archive arranges its content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveLayout {
    /// Content directories sit directly at the archive root
    Flat,
    /// Content is wrapped in one extra top-level folder
    Nested,
}

impl ArchiveLayout {
    /// Classify an archive from its entry names
    ///
    /// An archive with no entries (or no marker at the root) classifies as
    /// nested, which degenerates to moving nothing during normalization.
    pub fn classify<'a>(entry_names: impl IntoIterator<Item = &'a str>) -> Self {
        if entry_names.into_iter().any(is_content_marker) {
            ArchiveLayout::Flat
        } else {
            ArchiveLayout::Nested
        }
    }
}

/// Whether an entry name begins with a recognized top-level content marker
pub(crate) fn is_content_marker(entry_name: &str) -> bool {
    CONTENT_MARKERS
        .iter()
        .any(|marker| entry_name.starts_with(marker))
}

/// Strip a trailing `.zip` suffix from a display name, case-insensitively
pub fn strip_archive_suffix(name: &str) -> &str {
    let trimmed = name.trim_end();
    match trimmed.get(trimmed.len().saturating_sub(4)..) {
        Some(suffix) if suffix.eq_ignore_ascii_case(".zip") => &trimmed[..trimmed.len() - 4],
        _ => trimmed,
    }
}
