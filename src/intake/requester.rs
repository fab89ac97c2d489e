//! # File Requester
//!
//! The stand-in for a file-picker dialog. The intake logic never touches the
//! filesystem directly; it asks a `FileRequester` for candidates, which keeps
//! the validation and state machine testable without a real directory.
//!
//! The bundled `InboxRequester` lists a configured inbox directory — the
//! terminal workflow is "drop your documents in `~/tripdeck-inbox`, press
//! `o`, pick what to attach".

use log::{debug, warn};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use super::FileCandidate;

#[derive(Debug)]
pub enum RequestError {
    Io(std::io::Error),
    MissingInbox(PathBuf),
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::Io(e) => write!(f, "file request I/O error: {e}"),
            RequestError::MissingInbox(p) => {
                write!(f, "inbox directory does not exist: {}", p.display())
            }
        }
    }
}

impl std::error::Error for RequestError {}

/// Source of candidate files, injected into the app.
pub trait FileRequester {
    /// Return the current candidates, in a stable order.
    fn request(&self) -> Result<Vec<FileCandidate>, RequestError>;
}

/// Lists regular files in a single directory, sorted by name.
pub struct InboxRequester {
    inbox: PathBuf,
}

impl InboxRequester {
    pub fn new(inbox: PathBuf) -> Self {
        Self { inbox }
    }
}

impl FileRequester for InboxRequester {
    fn request(&self) -> Result<Vec<FileCandidate>, RequestError> {
        if !self.inbox.is_dir() {
            return Err(RequestError::MissingInbox(self.inbox.clone()));
        }
        let mut candidates = Vec::new();
        for entry in fs::read_dir(&self.inbox).map_err(RequestError::Io)? {
            let entry = entry.map_err(RequestError::Io)?;
            match candidate_from_path(&entry.path()) {
                Ok(Some(candidate)) => candidates.push(candidate),
                Ok(None) => {}
                Err(e) => warn!("Skipping unreadable entry {:?}: {}", entry.path(), e),
            }
        }
        candidates.sort_by(|a, b| a.name.cmp(&b.name));
        debug!("Inbox {} yielded {} candidates", self.inbox.display(), candidates.len());
        Ok(candidates)
    }
}

/// Build a candidate from a filesystem path. Returns `Ok(None)` for
/// non-regular files (directories, sockets).
pub fn candidate_from_path(path: &Path) -> std::io::Result<Option<FileCandidate>> {
    let meta = fs::metadata(path)?;
    if !meta.is_file() {
        return Ok(None);
    }
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(Some(FileCandidate {
        mime: mime_for(&name),
        name,
        size_bytes: meta.len(),
    }))
}

/// Infer a MIME type from the filename extension. Unknown extensions get
/// `None`, which still matches suffix-style accepted patterns.
pub fn mime_for(name: &str) -> Option<String> {
    let ext = name.rsplit_once('.')?.1.to_ascii_lowercase();
    let mime = match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "heic" => "image/heic",
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        _ => return None,
    };
    Some(mime.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_mime_inference() {
        assert_eq!(mime_for("passport.PNG").as_deref(), Some("image/png"));
        assert_eq!(mime_for("visa.pdf").as_deref(), Some("application/pdf"));
        assert_eq!(mime_for("notes.xyz"), None);
        assert_eq!(mime_for("no_extension"), None);
    }

    #[test]
    fn test_missing_inbox_is_an_error() {
        let requester = InboxRequester::new(PathBuf::from("/nonexistent/tripdeck-inbox"));
        assert!(matches!(
            requester.request(),
            Err(RequestError::MissingInbox(_))
        ));
    }

    #[test]
    fn test_inbox_listing_sorted_files_only() {
        let dir = std::env::temp_dir().join(format!("tripdeck-test-{}", Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("b.pdf"), b"12345").unwrap();
        fs::write(dir.join("a.png"), b"123").unwrap();
        fs::create_dir(dir.join("subdir")).unwrap();

        let requester = InboxRequester::new(dir.clone());
        let candidates = requester.request().unwrap();
        assert_eq!(
            candidates.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(),
            ["a.png", "b.pdf"]
        );
        assert_eq!(candidates[0].size_bytes, 3);
        assert_eq!(candidates[0].mime.as_deref(), Some("image/png"));

        fs::remove_dir_all(&dir).unwrap();
    }
}
