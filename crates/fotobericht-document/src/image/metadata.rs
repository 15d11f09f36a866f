// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Capture-time extraction from EXIF metadata.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use chrono::NaiveDateTime;
use exif::{Exif, In, Reader, Tag, Value};
use tracing::debug;

/// Tags consulted for the capture time, in order of preference.
const CAPTURE_TIME_TAGS: [Tag; 3] = [Tag::DateTimeOriginal, Tag::DateTimeDigitized, Tag::DateTime];

/// EXIF date format (`YYYY:MM:DD HH:MM:SS`).
const EXIF_DATETIME_FORMAT: &str = "%Y:%m:%d %H:%M:%S";

/// Format used when a timestamp is burned into a photo.
pub const OVERLAY_FORMAT: &str = "%d.%m.%Y %H:%M";

/// Capture time of the photo at `path`, or `None` if the file has no EXIF
/// data or none of the date tags parse.
pub fn capture_time(path: &Path) -> Option<NaiveDateTime> {
    let file = File::open(path).ok()?;
    let mut reader = BufReader::new(file);
    let exif = Reader::new().read_from_container(&mut reader).ok()?;
    let found = capture_time_from(&exif);
    if found.is_none() {
        debug!(path = %path.display(), "no usable capture time in EXIF");
    }
    found
}

/// Overlay text for the photo at `path`.
pub fn capture_label(path: &Path) -> Option<String> {
    capture_time(path).map(|t| t.format(OVERLAY_FORMAT).to_string())
}

fn capture_time_from(exif: &Exif) -> Option<NaiveDateTime> {
    CAPTURE_TIME_TAGS.iter().find_map(|tag| {
        let field = exif.get_field(*tag, In::PRIMARY)?;
        match &field.value {
            Value::Ascii(parts) => parts
                .first()
                .and_then(|raw| std::str::from_utf8(raw).ok())
                .and_then(parse_exif_datetime),
            _ => None,
        }
    })
}

/// Parse an EXIF date string. Trailing NULs and whitespace are tolerated.
pub fn parse_exif_datetime(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim_matches(|c: char| c == '\0' || c.is_whitespace());
    NaiveDateTime::parse_from_str(trimmed, EXIF_DATETIME_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn parses_exif_format() {
        let t = parse_exif_datetime("2024:03:17 14:05:09").unwrap();
        assert_eq!((t.year(), t.month(), t.day()), (2024, 3, 17));
        assert_eq!((t.hour(), t.minute(), t.second()), (14, 5, 9));
        assert_eq!(t.format(OVERLAY_FORMAT).to_string(), "17.03.2024 14:05");
    }

    #[test]
    fn tolerates_padding() {
        assert!(parse_exif_datetime("2024:03:17 14:05:09\0").is_some());
        assert!(parse_exif_datetime(" 2024:03:17 14:05:09 ").is_some());
    }

    #[test]
    fn rejects_other_formats() {
        assert!(parse_exif_datetime("2024-03-17 14:05:09").is_none());
        assert!(parse_exif_datetime("    :  :     :  :  ").is_none());
        assert!(parse_exif_datetime("").is_none());
    }

    #[test]
    fn reads_date_time_original_from_jpeg() {
        let dir = tempfile::tempdir().unwrap();
        let path = crate::image::fixtures::write_camera_jpeg(
            dir.path(),
            "shot.jpg",
            (64, 48),
            1,
            "2024:03:17 14:05:00",
        );
        assert_eq!(capture_label(&path).as_deref(), Some("17.03.2024 14:05"));
    }

    #[test]
    fn missing_file_has_no_capture_time() {
        assert!(capture_time(Path::new("/nonexistent/file.jpg")).is_none());
        assert!(capture_label(Path::new("/nonexistent/file.jpg")).is_none());
    }
}
