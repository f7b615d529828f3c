//! Directory-backed asset archive

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use super::{AssetArchive, AssetError, AssetStream};

/// Filesystem archive rooted at a directory.
///
/// Resource names are joined onto the root with `Path::join`. No traversal
/// restriction is applied; `..` segments resolve like any other path.
///
/// # Example
///
/// ```ignore
/// let resolver = AssetResolver::new();
/// resolver.register(FileSystemArchive::new("./assets"));
///
/// // Opens ./assets/drone2/drone2.obj
/// let stream = resolver.resolve("drone2/drone2.obj")?.open()?;
/// ```
pub struct FileSystemArchive {
    root: PathBuf,
}

impl FileSystemArchive {
    /// Create an archive rooted at the given directory.
    ///
    /// The directory does not need to exist yet; it is checked on each
    /// lookup.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory as given at construction
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn full_path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

impl AssetArchive for FileSystemArchive {
    fn exists(&self, name: &str) -> bool {
        self.full_path(name).is_file()
    }

    fn open(&self, name: &str) -> Result<AssetStream, AssetError> {
        let full_path = self.full_path(name);
        if !full_path.is_file() {
            return Err(AssetError::NotFound {
                archive: self.describe(),
                name: name.to_string(),
            });
        }

        // The file may vanish between the check and the open; that surfaces
        // as a load error rather than NotFound.
        let file = File::open(&full_path).map_err(|source| AssetError::LoadError {
            archive: self.describe(),
            name: name.to_string(),
            source,
        })?;

        log::trace!("Opened {:?}", full_path);
        Ok(Box::new(BufReader::new(file)))
    }

    fn describe(&self) -> String {
        let absolute = std::env::current_dir()
            .map(|cwd| cwd.join(&self.root))
            .unwrap_or_else(|_| self.root.clone());
        format!(
            "FileSystemArchive {} ({})",
            absolute.display(),
            self.root.display()
        )
    }
}
