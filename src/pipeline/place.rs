//! Output placement: pick each PNG's directory and move it there.
//!
//! The rendered PNG lives in a scoped temporary directory, usually on a
//! different filesystem than the destination. A plain rename is tried
//! first; when it fails the bytes are copied to a sibling `.png.tmp` and
//! renamed over the destination, so a reader never sees a half-written PNG.

use crate::error::FileError;
use std::path::{Path, PathBuf};
use tracing::debug;

/// The directory a PDF's PNG is written to.
///
/// An explicit directory applies to every input; otherwise the PNG goes
/// next to its PDF.
pub fn output_dir_for(pdf: &Path, explicit: Option<&Path>) -> PathBuf {
    if let Some(dir) = explicit {
        return dir.to_path_buf();
    }
    match pdf.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Create `dir` and any missing parents.
pub async fn ensure_dir(dir: &Path) -> Result<(), FileError> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| FileError::OutputDir {
            path: dir.to_path_buf(),
            source: e,
        })
}

/// Move `from` to `to`, replacing any existing file at `to`.
pub async fn move_into_place(from: &Path, to: &Path) -> Result<(), FileError> {
    if tokio::fs::rename(from, to).await.is_ok() {
        debug!("Renamed {} -> {}", from.display(), to.display());
        return Ok(());
    }

    let move_failed = |e: std::io::Error| FileError::MoveFailed {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source: e,
    };

    let tmp_path = to.with_extension("png.tmp");
    if let Err(e) = tokio::fs::copy(from, &tmp_path).await {
        let _ = tokio::fs::remove_file(&tmp_path).await;
        return Err(move_failed(e));
    }
    if let Err(e) = tokio::fs::rename(&tmp_path, to).await {
        let _ = tokio::fs::remove_file(&tmp_path).await;
        return Err(move_failed(e));
    }
    // The source's scoped directory is removed on drop regardless.
    let _ = tokio::fs::remove_file(from).await;

    debug!("Copied {} -> {}", from.display(), to.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn explicit_dir_wins() {
        let dir = output_dir_for(Path::new("Figures/a.pdf"), Some(Path::new("out")));
        assert_eq!(dir, PathBuf::from("out"));
    }

    #[test]
    fn default_is_the_pdf_parent() {
        assert_eq!(
            output_dir_for(Path::new("Figures/a.pdf"), None),
            PathBuf::from("Figures")
        );
        assert_eq!(output_dir_for(Path::new("a.pdf"), None), PathBuf::from("."));
    }

    #[tokio::test]
    async fn ensure_dir_creates_parents() {
        let tmp = TempDir::new().unwrap();
        let nested = tmp.path().join("static/images/figs");
        ensure_dir(&nested).await.unwrap();
        assert!(nested.is_dir());
        // Idempotent.
        ensure_dir(&nested).await.unwrap();
    }

    #[tokio::test]
    async fn move_replaces_existing_output() {
        let tmp = TempDir::new().unwrap();
        let from = tmp.path().join("fig.pdf.png");
        let to = tmp.path().join("fig.png");
        std::fs::write(&to, b"old").unwrap();
        std::fs::write(&from, b"new").unwrap();

        move_into_place(&from, &to).await.unwrap();
        assert_eq!(std::fs::read(&to).unwrap(), b"new");
        assert!(!from.exists());
        assert!(!tmp.path().join("fig.png.tmp").exists());
    }

    #[tokio::test]
    async fn move_from_missing_source_fails() {
        let tmp = TempDir::new().unwrap();
        let err = move_into_place(&tmp.path().join("nope.png"), &tmp.path().join("out.png"))
            .await
            .unwrap_err();
        assert!(matches!(err, FileError::MoveFailed { .. }));
        assert!(!tmp.path().join("out.png").exists());
    }
}
