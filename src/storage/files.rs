//! Managed file storage for project thumbnails.
//!
//! All stored files live directly inside a single upload directory. Stored
//! names are the sanitized client file name prefixed with the upload time,
//! so two uploads of `bear.jpg` in different seconds never collide.

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use log::debug;

use crate::utils::datetime::UPLOAD_PREFIX_FORMAT;

/// Storage for uploaded files, scoped to one managed directory.
#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Persist `bytes` and return the name it was stored under.
    async fn save(&self, bytes: &[u8], suggested_name: &str) -> io::Result<String>;

    /// Remove a stored file. A missing file is not an error.
    async fn delete(&self, stored_name: &str) -> io::Result<()>;

    /// Read a stored file, `None` when it does not exist.
    async fn read(&self, stored_name: &str) -> io::Result<Option<Vec<u8>>>;
}

/// [`FileStorage`] backed by a directory on the local filesystem.
#[derive(Clone, Debug)]
pub struct LocalFileStorage {
    root: PathBuf,
}

impl LocalFileStorage {
    /// Create the storage, making sure the directory exists.
    pub async fn new(root: impl Into<PathBuf>) -> io::Result<Self> {
        let root = root.into();
        tokio::fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, stored_name: &str) -> io::Result<PathBuf> {
        let is_plain = !stored_name.is_empty()
            && stored_name != "."
            && stored_name != ".."
            && !stored_name.contains(['/', '\\']);
        if !is_plain {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid stored file name: {stored_name:?}"),
            ));
        }
        Ok(self.root.join(stored_name))
    }
}

#[async_trait]
impl FileStorage for LocalFileStorage {
    async fn save(&self, bytes: &[u8], suggested_name: &str) -> io::Result<String> {
        let stored_name = format!(
            "{}_{}",
            Utc::now().format(UPLOAD_PREFIX_FORMAT),
            sanitize_file_name(suggested_name)
        );
        let path = self.resolve(&stored_name)?;
        tokio::fs::write(&path, bytes).await?;
        debug!("Stored upload {} ({} bytes)", stored_name, bytes.len());
        Ok(stored_name)
    }

    async fn delete(&self, stored_name: &str) -> io::Result<()> {
        let path = self.resolve(stored_name)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                debug!("Removed upload {stored_name}");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }

    async fn read(&self, stored_name: &str) -> io::Result<Option<Vec<u8>>> {
        let path = self.resolve(stored_name)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }
}

/// Reduce a client-supplied file name to a safe single path component.
///
/// Directory parts are dropped, whitespace becomes `_`, and anything outside
/// ASCII alphanumerics, `.`, `-` and `_` is removed. Falls back to `upload`.
pub fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base
        .chars()
        .filter_map(|c| match c {
            c if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' => Some(c),
            c if c.is_whitespace() => Some('_'),
            _ => None,
        })
        .collect();
    let cleaned = cleaned.trim_matches(|c| c == '.' || c == '_').to_string();

    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_strips_directories() {
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name("C:\\photos\\bear.jpg"), "bear.jpg");
    }

    #[test]
    fn test_sanitize_replaces_whitespace_and_drops_symbols() {
        assert_eq!(sanitize_file_name("my bear (v2).png"), "my_bear_v2.png");
        assert_eq!(sanitize_file_name("..."), "upload");
        assert_eq!(sanitize_file_name(""), "upload");
    }
}
