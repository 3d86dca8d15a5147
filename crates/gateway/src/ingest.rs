//! Filesystem ingestion: collect knowledge documents from the
//! configured document root.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Extensions treated as knowledge documents.
const DOC_EXTENSIONS: [&str; 2] = ["md", "txt"];

/// Documents gathered from the filesystem, plus their paths relative
/// to the document root.
#[derive(Debug)]
pub struct CollectedDocs {
    pub documents: Vec<String>,
    pub files: Vec<String>,
}

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("path not found")]
    NotFound,

    #[error("path outside document root")]
    OutsideRoot,

    #[error("failed to read {path}: {reason}")]
    ReadFailed { path: String, reason: String },
}

/// Resolve `requested` against `root` and read every `.md`/`.txt` file
/// under it.
///
/// Containment is checked on canonicalized paths, so `..` segments
/// cannot escape the root. `None` ingests the whole root. Files are
/// returned in sorted relative-path order so ingestion is
/// deterministic.
pub fn collect_documents(
    root: &Path,
    requested: Option<&str>,
) -> Result<CollectedDocs, IngestError> {
    let root = root.canonicalize().map_err(|_| IngestError::NotFound)?;

    let target = match requested {
        Some(sub) => root.join(sub),
        None => root.clone(),
    };
    let target = target.canonicalize().map_err(|_| IngestError::NotFound)?;

    if !target.starts_with(&root) {
        return Err(IngestError::OutsideRoot);
    }

    let mut paths: Vec<PathBuf> = Vec::new();
    if target.is_file() {
        if is_document(&target) {
            paths.push(target);
        }
    } else {
        let mut pending = vec![target];
        while let Some(dir) = pending.pop() {
            let entries = std::fs::read_dir(&dir).map_err(|e| IngestError::ReadFailed {
                path: dir.display().to_string(),
                reason: e.to_string(),
            })?;
            for entry in entries {
                let entry = entry.map_err(|e| IngestError::ReadFailed {
                    path: dir.display().to_string(),
                    reason: e.to_string(),
                })?;
                let path = entry.path();
                if path.is_dir() {
                    pending.push(path);
                } else if is_document(&path) {
                    paths.push(path);
                }
            }
        }
    }

    paths.sort();

    let mut documents = Vec::with_capacity(paths.len());
    let mut files = Vec::with_capacity(paths.len());
    for path in &paths {
        let content = std::fs::read_to_string(path).map_err(|e| IngestError::ReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        documents.push(content);
        files.push(
            path.strip_prefix(&root)
                .unwrap_or(path)
                .display()
                .to_string(),
        );
    }

    Ok(CollectedDocs { documents, files })
}

fn is_document(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| DOC_EXTENSIONS.contains(&e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_root() -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("docs");
        std::fs::create_dir_all(root.join("sub")).unwrap();
        std::fs::write(root.join("guide.md"), "reset your password").unwrap();
        std::fs::write(root.join("notes.txt"), "billing notes").unwrap();
        std::fs::write(root.join("sub/deep.md"), "deep content").unwrap();
        std::fs::write(root.join("image.png"), [0u8, 1, 2]).unwrap();
        std::fs::write(dir.path().join("outside.md"), "secret").unwrap();
        (dir, root)
    }

    #[test]
    fn collects_whole_root_recursively() {
        let (_dir, root) = seeded_root();
        let collected = collect_documents(&root, None).unwrap();

        assert_eq!(collected.documents.len(), 3);
        assert_eq!(collected.files.len(), 3);
        assert!(collected.files.iter().any(|f| f.contains("deep.md")));
        assert!(!collected.files.iter().any(|f| f.contains("image.png")));
    }

    #[test]
    fn file_order_is_sorted_and_contents_align() {
        let (_dir, root) = seeded_root();
        let collected = collect_documents(&root, None).unwrap();

        let mut sorted = collected.files.clone();
        sorted.sort();
        assert_eq!(collected.files, sorted);

        let guide_idx = collected
            .files
            .iter()
            .position(|f| f.ends_with("guide.md"))
            .unwrap();
        assert_eq!(collected.documents[guide_idx], "reset your password");
    }

    #[test]
    fn subdirectory_request_scopes_the_walk() {
        let (_dir, root) = seeded_root();
        let collected = collect_documents(&root, Some("sub")).unwrap();

        assert_eq!(collected.documents, vec!["deep content".to_string()]);
    }

    #[test]
    fn single_file_request_reads_that_file() {
        let (_dir, root) = seeded_root();
        let collected = collect_documents(&root, Some("guide.md")).unwrap();

        assert_eq!(collected.documents, vec!["reset your password".to_string()]);
        assert_eq!(collected.files, vec!["guide.md".to_string()]);
    }

    #[test]
    fn non_document_file_yields_nothing() {
        let (_dir, root) = seeded_root();
        let collected = collect_documents(&root, Some("image.png")).unwrap();

        assert!(collected.documents.is_empty());
        assert!(collected.files.is_empty());
    }

    #[test]
    fn missing_path_is_not_found() {
        let (_dir, root) = seeded_root();
        let err = collect_documents(&root, Some("missing")).unwrap_err();
        assert!(matches!(err, IngestError::NotFound));
    }

    #[test]
    fn traversal_outside_root_is_rejected() {
        let (_dir, root) = seeded_root();
        let err = collect_documents(&root, Some("../outside.md")).unwrap_err();
        assert!(matches!(err, IngestError::OutsideRoot));
        assert_eq!(err.to_string(), "path outside document root");
    }

    #[test]
    fn missing_root_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = collect_documents(&dir.path().join("absent"), None).unwrap_err();
        assert!(matches!(err, IngestError::NotFound));
    }
}
