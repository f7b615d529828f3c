//! Resolved, reusable references to assets

use std::fmt;
use std::io::Read;
use std::sync::Arc;

use super::{AssetArchive, AssetError, AssetStream};

/// Reusable reference to a resolved asset.
///
/// A handle pairs the archive that won resolution with the resource name it
/// was resolved under. Both are fixed at creation. Opening never re-resolves:
/// even if a higher-priority archive later gains the resource, this handle
/// keeps reading from the archive it was bound to.
///
/// Handles carry no mutable state, so they are cheap to clone and safe to
/// share across threads.
#[derive(Clone)]
pub struct AssetHandle {
    archive: Arc<dyn AssetArchive>,
    resource_name: String,
}

impl AssetHandle {
    /// Bind a resource name to an archive
    pub fn new(archive: Arc<dyn AssetArchive>, resource_name: impl Into<String>) -> Self {
        Self {
            archive,
            resource_name: resource_name.into(),
        }
    }

    /// Open a fresh stream over the resource.
    ///
    /// Every call asks the bound archive again; streams are independent and
    /// each starts at offset 0.
    pub fn open(&self) -> Result<AssetStream, AssetError> {
        self.archive.open(&self.resource_name)
    }

    /// Read the whole resource into memory
    pub fn read_bytes(&self) -> Result<Vec<u8>, AssetError> {
        let mut stream = self.open()?;
        let mut data = Vec::new();
        stream
            .read_to_end(&mut data)
            .map_err(|source| AssetError::LoadError {
                archive: self.archive.describe(),
                name: self.resource_name.clone(),
                source,
            })?;
        Ok(data)
    }

    /// Archive this handle is bound to
    pub fn archive(&self) -> &Arc<dyn AssetArchive> {
        &self.archive
    }

    /// Resource name within the archive
    pub fn resource_name(&self) -> &str {
        &self.resource_name
    }

    /// Whether this handle is bound to the given archive instance
    pub fn is_bound_to(&self, archive: &Arc<dyn AssetArchive>) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.archive), Arc::as_ptr(archive))
    }
}

impl fmt::Debug for AssetHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssetHandle")
            .field("archive", &self.archive.describe())
            .field("resource_name", &self.resource_name)
            .finish()
    }
}

impl fmt::Display for AssetHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}:{}]", self.archive.describe(), self.resource_name)
    }
}
