use std::path::{Path, PathBuf};

// Fallback for extensions that map to no known MIME type. Such files then
// fail the allow-list.
const UNKNOWN_MIME: &str = "application/octet-stream";

/// One entry of the current selection: the metadata shown to the user plus
/// the path the upload worker reads from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub path: PathBuf,
    pub mime_type: String,
    pub size: u64,
}

impl SelectedFile {
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let metadata = std::fs::metadata(path)?;
        let name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        let mime_type = mime_guess::from_path(path)
            .first_raw()
            .unwrap_or(UNKNOWN_MIME)
            .to_string();
        Ok(Self {
            name,
            path: path.to_path_buf(),
            mime_type,
            size: metadata.len(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadOutcome {
    Success,
    Error,
}

/// Notifications the upload worker sends back to the form, in order:
/// any number of `Progress` updates, then exactly one `Done`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadEvent {
    Progress { sent: u64, total: u64 },
    Done(UploadOutcome),
}
