//! Export/import file transfer.
//!
//! # Responsibility
//! - Describe the downloadable export blob.
//! - Define how a shell hands out exports and reads user-selected files.
//!
//! # Invariants
//! - Exports are always named `todos.json` with a JSON media type.
//! - `DirectoryTransfer` never writes outside its target directory.

use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// File name offered for every export.
pub const EXPORT_FILE_NAME: &str = "todos.json";
/// Media type of exported files.
pub const EXPORT_MIME_TYPE: &str = "application/json";

/// Result type used by file transfer operations.
pub type TransferResult<T> = Result<T, TransferError>;

/// File transfer failures.
#[derive(Debug)]
pub enum TransferError {
    /// Reading or writing a file failed.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Export name would escape the target directory.
    InvalidFileName(String),
}

impl Display for TransferError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "file transfer failed for `{}`: {source}", path.display())
            }
            Self::InvalidFileName(name) => write!(f, "invalid export file name `{name}`"),
        }
    }
}

impl Error for TransferError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::InvalidFileName(_) => None,
        }
    }
}

/// Downloadable export blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub file_name: String,
    pub mime_type: &'static str,
    pub contents: String,
}

impl ExportFile {
    /// Wraps already serialized JSON under the standard export name.
    pub fn json(contents: String) -> Self {
        Self {
            file_name: EXPORT_FILE_NAME.to_string(),
            mime_type: EXPORT_MIME_TYPE,
            contents,
        }
    }
}

/// Shell-side file plumbing.
pub trait FileTransfer {
    /// Makes `file` available to the user; returns where it landed.
    fn offer_download(&self, file: &ExportFile) -> TransferResult<PathBuf>;
    /// Reads a user-selected file as text.
    ///
    /// Invalid UTF-8 is replaced with U+FFFD rather than reported, so bad
    /// bytes surface as malformed text when the contents are decoded.
    fn read_text(&self, source: &Path) -> TransferResult<String>;
}

/// Writes exports into one directory and reads imports from any path.
#[derive(Debug, Clone)]
pub struct DirectoryTransfer {
    target_dir: PathBuf,
}

impl DirectoryTransfer {
    pub fn new(target_dir: impl Into<PathBuf>) -> Self {
        Self {
            target_dir: target_dir.into(),
        }
    }
}

impl FileTransfer for DirectoryTransfer {
    fn offer_download(&self, file: &ExportFile) -> TransferResult<PathBuf> {
        let name = Path::new(&file.file_name);
        if name.file_name() != Some(name.as_os_str()) {
            return Err(TransferError::InvalidFileName(file.file_name.clone()));
        }

        std::fs::create_dir_all(&self.target_dir).map_err(|source| TransferError::Io {
            path: self.target_dir.clone(),
            source,
        })?;
        let path = self.target_dir.join(name);
        std::fs::write(&path, file.contents.as_bytes()).map_err(|source| TransferError::Io {
            path: path.clone(),
            source,
        })?;

        info!(
            "event=export_write module=transfer status=ok bytes={}",
            file.contents.len()
        );
        Ok(path)
    }

    fn read_text(&self, source: &Path) -> TransferResult<String> {
        let bytes = std::fs::read(source).map_err(|err| TransferError::Io {
            path: source.to_path_buf(),
            source: err,
        })?;
        match String::from_utf8(bytes) {
            Ok(text) => Ok(text),
            Err(err) => {
                warn!(
                    "event=import_read module=transfer status=lossy valid_up_to={}",
                    err.utf8_error().valid_up_to()
                );
                Ok(String::from_utf8_lossy(err.as_bytes()).into_owned())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DirectoryTransfer, ExportFile, FileTransfer, TransferError};

    #[test]
    fn rejects_nested_export_names() {
        let dir = tempfile::tempdir().unwrap();
        let transfer = DirectoryTransfer::new(dir.path());
        let mut file = ExportFile::json("[]".to_string());
        file.file_name = "../escape.json".to_string();

        let err = transfer.offer_download(&file).unwrap_err();
        assert!(matches!(err, TransferError::InvalidFileName(_)));
    }

    #[test]
    fn read_text_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let transfer = DirectoryTransfer::new(dir.path());
        let err = transfer
            .read_text(&dir.path().join("missing.json"))
            .unwrap_err();
        assert!(matches!(err, TransferError::Io { .. }));
    }

    #[test]
    fn read_text_replaces_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latin1.json");
        std::fs::write(&path, [b'[', 0xe9, b']']).unwrap();

        let text = DirectoryTransfer::new(dir.path()).read_text(&path).unwrap();
        assert_eq!(text, "[\u{fffd}]");
    }
}
