use std::path::{Path, PathBuf};
use thiserror::Error;
use uuid::Uuid;

/// Subdirectory of the media root holding profile pictures
pub const PROFILE_IMAGES_DIR: &str = "profile_images";

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("Failed to store media file: {0}")]
    Io(#[from] std::io::Error),
}

/// Filesystem storage for uploaded files
///
/// Stored paths are relative to the root and always use `/`.
#[derive(Debug, Clone)]
pub struct MediaStore {
    root: PathBuf,
}

impl MediaStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Writes a profile picture for `user_id` and returns its relative path
    ///
    /// The stored name is the user id plus the original file's extension,
    /// so a client-supplied name never reaches the filesystem.
    pub async fn save_profile_picture(
        &self,
        user_id: Uuid,
        original_name: Option<&str>,
        bytes: &[u8],
    ) -> Result<String, MediaError> {
        let file_name = match original_name.and_then(extension_of) {
            Some(ext) => format!("{}.{}", user_id, ext),
            None => user_id.to_string(),
        };

        let dir = self.root.join(PROFILE_IMAGES_DIR);
        tokio::fs::create_dir_all(&dir).await?;
        tokio::fs::write(dir.join(&file_name), bytes).await?;

        Ok(format!("{}/{}", PROFILE_IMAGES_DIR, file_name))
    }

    /// Deletes a stored file; a missing file is not an error
    pub async fn remove(&self, relative_path: &str) -> Result<(), MediaError> {
        match tokio::fs::remove_file(self.root.join(relative_path)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

fn extension_of(name: &str) -> Option<String> {
    let (_, ext) = name.rsplit_once('.')?;
    let valid = !ext.is_empty() && ext.len() <= 8 && ext.chars().all(|c| c.is_ascii_alphanumeric());
    valid.then(|| ext.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_is_sanitized() {
        assert_eq!(extension_of("me.PNG"), Some("png".to_string()));
        assert_eq!(extension_of("archive.tar.gz"), Some("gz".to_string()));
        assert_eq!(extension_of("noext"), None);
        assert_eq!(extension_of("evil.p/ng"), None);
    }

    #[tokio::test]
    async fn save_and_remove_profile_picture() {
        let dir = tempfile::tempdir().unwrap();
        let store = MediaStore::new(dir.path());
        let user_id = Uuid::new_v4();

        let path = store
            .save_profile_picture(user_id, Some("../../me.jpg"), b"jpeg-bytes")
            .await
            .unwrap();

        assert_eq!(path, format!("profile_images/{}.jpg", user_id));
        let written = std::fs::read(dir.path().join(&path)).unwrap();
        assert_eq!(written, b"jpeg-bytes");

        store.remove(&path).await.unwrap();
        assert!(!dir.path().join(&path).exists());
        store.remove(&path).await.unwrap();
    }
}
