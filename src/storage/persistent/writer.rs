//! Whole-document file writer.
//!
//! In atomic mode the document is written to a temporary sibling file,
//! flushed, optionally fsynced, then renamed over the target. The rename is
//! the commit point. A writer dropped before [`DocumentWriter::commit`]
//! removes its temporary file.

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Error as IoError, ErrorKind, Result as IoResult, Write};
use std::path::{Path, PathBuf};

use uuid::Uuid;

/// Marker embedded in temporary file names.
pub const TEMP_MARKER: &str = ".tmp.";

/// Fixed temp-name prefix. The target's own name is not reused, so a target
/// at the file system's name-length limit still gets a valid temp sibling.
const TEMP_PREFIX: &str = ".stockroom";

pub struct DocumentWriter {
    temp_path: Option<PathBuf>,
    final_path: PathBuf,
    writer: Option<BufWriter<File>>,
    sync: bool,
}

impl DocumentWriter {
    /// Open a writer for `final_path`.
    ///
    /// With `atomic` the bytes go to a uniquely named sibling first;
    /// otherwise the target is truncated and written directly.
    pub fn create(final_path: &Path, atomic: bool, sync: bool) -> IoResult<Self> {
        let (target, temp_path) = if atomic {
            let temp = temp_path_for(final_path)?;
            (temp.clone(), Some(temp))
        } else {
            (final_path.to_path_buf(), None)
        };

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&target)?;

        Ok(Self {
            temp_path,
            final_path: final_path.to_path_buf(),
            writer: Some(BufWriter::new(file)),
            sync,
        })
    }

    /// Write the full document body.
    pub fn write_all(&mut self, bytes: &[u8]) -> IoResult<()> {
        let writer = self.writer.as_mut().ok_or_else(|| {
            IoError::new(ErrorKind::Other, "writer already consumed")
        })?;
        writer.write_all(bytes)
    }

    /// Flush, fsync if configured, and move the document into place.
    pub fn commit(mut self) -> IoResult<()> {
        let mut writer = self.writer.take().ok_or_else(|| {
            IoError::new(ErrorKind::Other, "writer already consumed")
        })?;

        writer.flush()?;
        if self.sync {
            writer.get_ref().sync_all()?;
        }
        drop(writer);

        if let Some(temp_path) = self.temp_path.take() {
            if let Err(e) = fs::rename(&temp_path, &self.final_path) {
                let _ = fs::remove_file(&temp_path);
                return Err(e);
            }
        }
        Ok(())
    }
}

impl Drop for DocumentWriter {
    fn drop(&mut self) {
        self.writer.take();
        if let Some(ref temp_path) = self.temp_path {
            if temp_path.exists() {
                let _ = fs::remove_file(temp_path);
            }
        }
    }
}

fn temp_path_for(final_path: &Path) -> IoResult<PathBuf> {
    if final_path.file_name().is_none() {
        return Err(IoError::new(
            ErrorKind::InvalidInput,
            format!("document path has no file name: {}", final_path.display()),
        ));
    }
    let temp_name = format!("{TEMP_PREFIX}{TEMP_MARKER}{}", Uuid::new_v4().simple());
    Ok(final_path.with_file_name(temp_name))
}

/// Returns true if `path` names a temporary file left by this writer.
pub fn is_temp_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('.') && n.contains(TEMP_MARKER))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn temp_files(dir: &Path) -> Vec<PathBuf> {
        fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().path())
            .filter(|p| is_temp_file(p))
            .collect()
    }

    #[test]
    fn test_atomic_commit_replaces_target() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("doc.json");
        fs::write(&path, b"old").unwrap();

        let mut writer = DocumentWriter::create(&path, true, true).unwrap();
        writer.write_all(b"new").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"old");
        writer.commit().unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"new");
        assert!(temp_files(dir.path()).is_empty());
    }

    #[test]
    fn test_dropped_writer_keeps_old_content_and_cleans_up() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("doc.json");
        fs::write(&path, b"old").unwrap();

        {
            let mut writer = DocumentWriter::create(&path, true, false).unwrap();
            writer.write_all(b"half").unwrap();
            assert_eq!(temp_files(dir.path()).len(), 1);
        }

        assert_eq!(fs::read(&path).unwrap(), b"old");
        assert!(temp_files(dir.path()).is_empty());
    }

    #[test]
    fn test_direct_mode_truncates_in_place() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("doc.json");
        fs::write(&path, b"a much longer previous body").unwrap();

        let mut writer = DocumentWriter::create(&path, false, false).unwrap();
        writer.write_all(b"short").unwrap();
        writer.commit().unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"short");
    }

    #[test]
    fn test_temp_file_naming() {
        let temp = temp_path_for(Path::new("/data/inventory.json")).unwrap();
        assert_eq!(temp.parent(), Some(Path::new("/data")));
        assert!(is_temp_file(&temp));
        assert!(!is_temp_file(Path::new("/data/inventory.json")));
    }

    #[test]
    fn test_temp_name_length_is_independent_of_target() {
        let long_name = format!("{}.json", "a".repeat(240));
        let short = temp_path_for(Path::new("/data/x.json")).unwrap();
        let long = temp_path_for(&Path::new("/data").join(&long_name)).unwrap();

        assert_eq!(
            short.file_name().unwrap().len(),
            long.file_name().unwrap().len()
        );
        assert!(long.file_name().unwrap().len() < 64);
    }

    #[test]
    fn test_atomic_commit_to_long_file_name() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(format!("{}.json", "a".repeat(240)));
        fs::write(&path, b"[]").unwrap();

        let mut writer = DocumentWriter::create(&path, true, false).unwrap();
        writer.write_all(b"[1]").unwrap();
        writer.commit().unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"[1]");
        assert!(temp_files(dir.path()).is_empty());
    }

    #[test]
    fn test_path_without_file_name_is_rejected() {
        let err = temp_path_for(Path::new("/")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }
}
