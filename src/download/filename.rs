//! Destination file names for downloaded attachments.

use std::path::{Component, Path};

/// Used when a display name sanitizes to nothing usable.
pub const FALLBACK_FILENAME: &str = "attachment";

/// Maps a vendor display name to a file name that stays inside the target
/// directory.
///
/// Only the final path component is kept; characters invalid on common
/// filesystems become `_`; dot-only names fall back to
/// [`FALLBACK_FILENAME`]. Unicode is preserved.
#[must_use]
pub fn destination_filename(display_name: &str) -> String {
    let last = display_name
        .rsplit(['/', '\\'])
        .find(|segment| !segment.trim().is_empty())
        .unwrap_or("");
    let sanitized = sanitize_filename(last.trim());

    if sanitized.is_empty() || !is_safe_filename_segment(&sanitized) {
        return FALLBACK_FILENAME.to_string();
    }
    sanitized
}

/// Prefixes `name` with `_` while it matches an entry in `reserved`.
///
/// Keeps attachments from replacing the persisted payload or the reserved
/// directories when downloads share the output root.
#[must_use]
pub(crate) fn avoid_reserved_name(name: String, reserved: &[&str]) -> String {
    let mut name = name;
    while reserved.iter().any(|r| r.eq_ignore_ascii_case(&name)) {
        name.insert(0, '_');
    }
    name
}

/// Replaces characters that are invalid on common filesystems:
/// / \ : * ? " < > | and control characters.
pub(crate) fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

fn is_safe_filename_segment(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_destination_keeps_plain_and_unicode_names() {
        assert_eq!(destination_filename("report.pdf"), "report.pdf");
        assert_eq!(destination_filename("营业执照 (副本).jpg"), "营业执照 (副本).jpg");
    }

    #[test]
    fn test_destination_strips_directories() {
        assert_eq!(destination_filename("../../etc/passwd"), "passwd");
        assert_eq!(destination_filename("C:\\temp\\x.docx"), "x.docx");
        assert_eq!(destination_filename("dir/"), "dir");
    }

    #[test]
    fn test_destination_replaces_reserved_chars() {
        assert_eq!(destination_filename("a:b*c?.pdf"), "a_b_c_.pdf");
        assert_eq!(destination_filename("tab\there.txt"), "tab_here.txt");
    }

    #[test]
    fn test_reserved_names_are_prefixed() {
        let reserved = ["api-data.json", "images", "_images"];
        assert_eq!(
            avoid_reserved_name("api-data.json".into(), &reserved),
            "_api-data.json"
        );
        assert_eq!(avoid_reserved_name("IMAGES".into(), &reserved), "__IMAGES");
        assert_eq!(avoid_reserved_name("scope.pdf".into(), &reserved), "scope.pdf");
        assert_eq!(avoid_reserved_name("images".into(), &[]), "images");
    }

    #[test]
    fn test_destination_falls_back_for_dot_or_empty() {
        assert_eq!(destination_filename(""), FALLBACK_FILENAME);
        assert_eq!(destination_filename(".."), FALLBACK_FILENAME);
        assert_eq!(destination_filename("."), FALLBACK_FILENAME);
        assert_eq!(destination_filename("/"), FALLBACK_FILENAME);
    }

    #[test]
    fn test_sanitize_filename_removes_invalid_chars() {
        assert_eq!(sanitize_filename("file<name>.pdf"), "file_name_.pdf");
        assert_eq!(sanitize_filename("file|name.pdf"), "file_name.pdf");
    }
}
