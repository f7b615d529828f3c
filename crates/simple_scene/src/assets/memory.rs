//! In-memory asset archive

use std::collections::HashMap;
use std::io::Cursor;
use std::sync::Arc;

use parking_lot::RwLock;

use super::{AssetArchive, AssetError, AssetStream};

/// In-memory archive for embedded assets and tests.
///
/// Thread-safe and mutable after registration: clones share the same
/// storage, so a clone kept by the caller can add files the resolver will
/// see on its next lookup.
///
/// Names are matched exactly; no path normalization is applied.
///
/// # Example
///
/// ```ignore
/// let builtin = MemoryArchive::with_label("builtin");
/// builtin.insert("textures/white.png", WHITE_PNG.to_vec());
/// resolver.register(builtin.clone());
/// ```
#[derive(Clone)]
pub struct MemoryArchive {
    label: String,
    files: Arc<RwLock<HashMap<String, Arc<[u8]>>>>,
}

impl MemoryArchive {
    /// Create an empty archive
    pub fn new() -> Self {
        Self::with_label("memory")
    }

    /// Create an empty archive with a label shown in diagnostics
    pub fn with_label(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            files: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Insert a resource, replacing any previous one with the same name
    pub fn insert(&self, name: impl Into<String>, data: impl Into<Vec<u8>>) {
        let data: Vec<u8> = data.into();
        self.files.write().insert(name.into(), Arc::from(data));
    }

    /// Remove a resource, returning its bytes if it existed
    pub fn remove(&self, name: &str) -> Option<Vec<u8>> {
        self.files.write().remove(name).map(|data| data.to_vec())
    }

    /// Number of resources held
    pub fn len(&self) -> usize {
        self.files.read().len()
    }

    /// Whether the archive holds no resources
    pub fn is_empty(&self) -> bool {
        self.files.read().is_empty()
    }
}

impl Default for MemoryArchive {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetArchive for MemoryArchive {
    fn exists(&self, name: &str) -> bool {
        self.files.read().contains_key(name)
    }

    fn open(&self, name: &str) -> Result<AssetStream, AssetError> {
        let data = self
            .files
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| AssetError::NotFound {
                archive: self.describe(),
                name: name.to_string(),
            })?;
        Ok(Box::new(Cursor::new(data)))
    }

    fn describe(&self) -> String {
        format!("MemoryArchive {}", self.label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    #[test]
    fn test_insert_and_open() {
        let archive = MemoryArchive::new();
        archive.insert("config.json", b"{}".to_vec());

        let mut stream = archive.open("config.json").unwrap();
        let mut data = Vec::new();
        stream.read_to_end(&mut data).unwrap();
        assert_eq!(data, b"{}");
    }

    #[test]
    fn test_open_missing() {
        let archive = MemoryArchive::with_label("builtin");
        let result = archive.open("nope.txt");
        assert!(matches!(
            result,
            Err(AssetError::NotFound { ref archive, .. }) if archive == "MemoryArchive builtin"
        ));
    }

    #[test]
    fn test_clones_share_storage() {
        let archive = MemoryArchive::new();
        let clone = archive.clone();
        assert!(!clone.exists("late.txt"));

        archive.insert("late.txt", "added after clone");
        assert!(clone.exists("late.txt"));
        assert_eq!(clone.len(), 1);
    }

    #[test]
    fn test_streams_are_independent() {
        let archive = MemoryArchive::new();
        archive.insert("data.bin", vec![1u8, 2, 3, 4]);

        let mut first = archive.open("data.bin").unwrap();
        let mut head = [0u8; 2];
        first.read_exact(&mut head).unwrap();

        let mut second = archive.open("data.bin").unwrap();
        let mut all = Vec::new();
        second.read_to_end(&mut all).unwrap();
        assert_eq!(all, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_remove_returns_data() {
        let archive = MemoryArchive::new();
        archive.insert("file.txt", b"data".to_vec());
        assert_eq!(archive.remove("file.txt"), Some(b"data".to_vec()));
        assert!(archive.remove("file.txt").is_none());
        assert!(archive.is_empty());
    }
}
