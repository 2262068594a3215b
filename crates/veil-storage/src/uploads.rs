//! Upload directory for original and processed images

use crate::{Result, StorageError};
use std::path::{Path, PathBuf};

/// Flat directory of uploaded and processed files, addressed by file name
#[derive(Debug, Clone)]
pub struct UploadStore {
    root: PathBuf,
}

impl UploadStore {
    /// Create the directory if it doesn't exist
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write `content` under `name`, replacing any file of the same name
    pub async fn store(&self, name: &str, content: &[u8]) -> Result<PathBuf> {
        let path = self.path_for(name)?;
        tokio::fs::write(&path, content).await?;
        Ok(path)
    }

    pub async fn remove(&self, name: &str) -> Result<()> {
        let path = self.path_for(name)?;
        tokio::fs::remove_file(&path).await?;
        Ok(())
    }

    pub fn exists(&self, name: &str) -> bool {
        self.path_for(name).map(|p| p.is_file()).unwrap_or(false)
    }

    /// Resolve a stored name. Anything that is not a plain file name is rejected.
    pub fn path_for(&self, name: &str) -> Result<PathBuf> {
        if name.is_empty()
            || name == "."
            || name == ".."
            || name.contains(['/', '\\'])
            || name.contains('\0')
        {
            return Err(StorageError::InvalidFileName(name.to_string()));
        }
        Ok(self.root.join(name))
    }
}

/// Reduce a client-supplied file name to a safe single path component.
///
/// Directory parts are dropped, characters outside `[A-Za-z0-9._-]` become `_`,
/// and leading dots are stripped. An empty result becomes `upload`.
pub fn sanitize_filename(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or("");

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() || cleaned.chars().all(|c| c == '_') {
        "upload".to_string()
    } else {
        cleaned.to_string()
    }
}
