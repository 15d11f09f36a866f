// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Output folder resolution for `create`: a folder named after the report,
// next to the first photo unless told otherwise, holding `<name>.pdf`.

use std::path::{Path, PathBuf};

use fotobericht_core::error::{FotoberichtError, Result};
use tracing::{info, warn};

/// Where a report goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLocation {
    pub folder: PathBuf,
    pub document: PathBuf,
}

/// Report name with a trailing `.pdf` (any case) removed.
pub fn strip_pdf_suffix(name: &str) -> &str {
    let trimmed = name.trim();
    match trimmed.len().checked_sub(4) {
        Some(cut) if trimmed.is_char_boundary(cut) && trimmed[cut..].eq_ignore_ascii_case(".pdf") => {
            &trimmed[..cut]
        }
        _ => trimmed,
    }
}

/// Resolve the folder and document path. `parent` defaults to the first
/// photo's directory, `name` to `label`.
pub fn resolve(
    first_image: &Path,
    parent: Option<&Path>,
    name: Option<&str>,
    label: &str,
) -> Result<OutputLocation> {
    let base = strip_pdf_suffix(name.unwrap_or(label));
    if base.is_empty() || base.contains(['/', '\\']) {
        return Err(FotoberichtError::Config(format!(
            "'{base}' cannot be used as a report name"
        )));
    }
    let parent = match parent {
        Some(p) => p.to_path_buf(),
        None => first_image
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default(),
    };
    let folder = parent.join(base);
    let document = folder.join(format!("{base}.pdf"));
    Ok(OutputLocation { folder, document })
}

/// Make `location.folder` ready for writing. An existing folder is only
/// replaced with `overwrite`, and never if it holds one of the photos.
pub fn prepare(location: &OutputLocation, images: &[PathBuf], overwrite: bool) -> Result<()> {
    let folder = &location.folder;
    if folder.exists() {
        if !overwrite {
            return Err(FotoberichtError::OutputExists(folder.clone()));
        }
        let canonical = folder.canonicalize()?;
        let holds_photo = images.iter().any(|img| {
            img.canonicalize()
                .map(|p| p.starts_with(&canonical))
                .unwrap_or(false)
        });
        if holds_photo {
            return Err(FotoberichtError::Config(format!(
                "{} contains photos of this report and cannot be replaced",
                folder.display()
            )));
        }
        info!(folder = %folder.display(), "Replacing existing output folder");
        std::fs::remove_dir_all(folder)?;
    }
    std::fs::create_dir_all(folder)?;
    Ok(())
}

/// Remove the report folder after a run that left nothing in it.
pub fn discard_if_empty(location: &OutputLocation) {
    let folder = &location.folder;
    let empty = std::fs::read_dir(folder)
        .map(|mut entries| entries.next().is_none())
        .unwrap_or(false);
    if !empty {
        return;
    }
    match std::fs::remove_dir(folder) {
        Ok(()) => info!(folder = %folder.display(), "Removed empty output folder"),
        Err(err) => warn!(folder = %folder.display(), error = %err, "could not remove output folder"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_pdf_suffix() {
        assert_eq!(strip_pdf_suffix("Bericht.pdf"), "Bericht");
        assert_eq!(strip_pdf_suffix("Bericht.PDF"), "Bericht");
        assert_eq!(strip_pdf_suffix("Bericht"), "Bericht");
        assert_eq!(strip_pdf_suffix("pdf"), "pdf");
    }

    #[test]
    fn defaults_next_to_first_photo() {
        let loc = resolve(Path::new("/photos/a.jpg"), None, None, "12345-7").unwrap();
        assert_eq!(loc.folder, PathBuf::from("/photos/12345-7"));
        assert_eq!(loc.document, PathBuf::from("/photos/12345-7/12345-7.pdf"));
    }

    #[test]
    fn explicit_parent_and_name() {
        let loc = resolve(
            Path::new("/photos/a.jpg"),
            Some(Path::new("/reports")),
            Some("Schaden.pdf"),
            "12345-7",
        )
        .unwrap();
        assert_eq!(loc.document, PathBuf::from("/reports/Schaden/Schaden.pdf"));
    }

    #[test]
    fn rejects_empty_or_nested_names() {
        assert!(resolve(Path::new("/p/a.jpg"), None, Some(".pdf"), "x").is_err());
        assert!(resolve(Path::new("/p/a.jpg"), None, Some("a/b"), "x").is_err());
    }

    #[test]
    fn existing_folder_needs_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let loc = resolve(&dir.path().join("a.jpg"), None, None, "r").unwrap();
        std::fs::create_dir(&loc.folder).unwrap();
        std::fs::write(loc.folder.join("old.pdf"), b"x").unwrap();

        assert!(matches!(
            prepare(&loc, &[], false),
            Err(FotoberichtError::OutputExists(_))
        ));
        prepare(&loc, &[], true).unwrap();
        assert!(loc.folder.exists());
        assert!(!loc.folder.join("old.pdf").exists());
    }

    #[test]
    fn unused_folder_is_discarded() {
        let dir = tempfile::tempdir().unwrap();
        let loc = resolve(&dir.path().join("a.jpg"), None, None, "r").unwrap();
        prepare(&loc, &[], false).unwrap();

        discard_if_empty(&loc);
        assert!(!loc.folder.exists());
        // A rerun no longer trips over the leftover folder.
        prepare(&loc, &[], false).unwrap();

        std::fs::write(&loc.document, b"%PDF").unwrap();
        discard_if_empty(&loc);
        assert!(loc.document.exists());
    }

    #[test]
    fn never_replaces_folder_holding_photos() {
        let dir = tempfile::tempdir().unwrap();
        let loc = resolve(&dir.path().join("a.jpg"), None, None, "r").unwrap();
        std::fs::create_dir(&loc.folder).unwrap();
        let photo = loc.folder.join("p.jpg");
        std::fs::write(&photo, b"x").unwrap();

        assert!(matches!(
            prepare(&loc, &[photo.clone()], true),
            Err(FotoberichtError::Config(_))
        ));
        assert!(photo.exists());
    }
}
