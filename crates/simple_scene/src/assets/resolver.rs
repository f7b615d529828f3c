//! Asset Resolver - ordered lookup over registered archives
//!
//! The resolver separates *finding* an asset from *opening* it. Resolution
//! walks the registered archives in registration order and binds the first
//! one that holds the resource into an [`AssetHandle`]; the handle can then
//! be stored and opened whenever needed.
//!
//! ```text
//! AssetContext ("drone2/")
//!        ↓  joins base path + name
//! AssetResolver (THIS MODULE - picks the first archive that has it)
//!        ↓
//! AssetArchive (filesystem, memory, ...)
//! ```
//!
//! **Ownership**: the embedding application constructs one resolver, wraps
//! it in an `Arc` and hands it (or contexts derived from it) to loaders.

use std::path::Path;
use std::sync::Arc;

use parking_lot::Mutex;

use super::{AssetArchive, AssetContext, AssetError, AssetHandle, FileSystemArchive};
use crate::core::config::AssetConfig;

/// Ordered, thread-safe multiplexer over asset archives
pub struct AssetResolver {
    /// Registered archives, highest priority first
    archives: Mutex<Vec<Arc<dyn AssetArchive>>>,
}

impl AssetResolver {
    /// Create a resolver with no archives
    pub fn new() -> Self {
        Self {
            archives: Mutex::new(Vec::new()),
        }
    }

    /// Create a resolver with one filesystem archive per configured root,
    /// in configured order
    pub fn from_config(config: &AssetConfig) -> Self {
        let resolver = Self::new();
        for root in &config.archive_roots {
            resolver.register(FileSystemArchive::new(root));
        }
        log::info!(
            "Created AssetResolver with {} archive root(s): {:?}",
            config.archive_roots.len(),
            config.archive_roots
        );
        resolver
    }

    /// Append an archive to the search order
    ///
    /// Returns the shared archive so callers can keep a reference to it.
    pub fn register(&self, archive: impl AssetArchive + 'static) -> Arc<dyn AssetArchive> {
        let archive: Arc<dyn AssetArchive> = Arc::new(archive);
        self.register_shared(Arc::clone(&archive));
        archive
    }

    /// Append an already shared archive to the search order
    pub fn register_shared(&self, archive: Arc<dyn AssetArchive>) {
        let description = archive.describe();
        let count = {
            let mut archives = self.archives.lock();
            archives.push(archive);
            archives.len()
        };
        log::debug!("Registered asset archive #{count}: {description}");
    }

    /// Point-in-time copy of the registered archives, in search order
    pub fn archives(&self) -> Vec<Arc<dyn AssetArchive>> {
        self.archives.lock().clone()
    }

    /// Number of registered archives
    pub fn archive_count(&self) -> usize {
        self.archives.lock().len()
    }

    /// Resolve a resource name to a handle bound to the first archive that
    /// holds it
    ///
    /// The archive list is copied before probing, so the registration lock
    /// is never held while an archive does I/O, and a concurrent
    /// registration cannot disturb an in-flight resolution.
    ///
    /// # Errors
    /// * [`AssetError::NoArchivesConfigured`] - nothing is registered
    /// * [`AssetError::NoSuchResource`] - no archive holds `name`
    pub fn resolve(&self, name: &str) -> Result<AssetHandle, AssetError> {
        let archives = self.archives();
        if archives.is_empty() {
            return Err(AssetError::NoArchivesConfigured);
        }

        for archive in &archives {
            log::trace!("Probing {} for '{}'", archive.describe(), name);
            if archive.exists(name) {
                log::debug!("Resolved '{}' in {}", name, archive.describe());
                return Ok(AssetHandle::new(Arc::clone(archive), name));
            }
        }

        Err(AssetError::NoSuchResource {
            name: name.to_string(),
            archives: archives.iter().map(|archive| archive.describe()).collect(),
        })
    }

    /// Create a context whose lookups are relative to `base_path`
    pub fn context(self: &Arc<Self>, base_path: impl Into<String>) -> AssetContext {
        AssetContext::new(Arc::clone(self), base_path)
    }

    /// Create a context for the directory containing `resource_path`
    ///
    /// Sibling resources (material libraries, textures) of a model can then
    /// be looked up by their bare names.
    pub fn context_for_resource(self: &Arc<Self>, resource_path: &str) -> AssetContext {
        let base = Path::new(resource_path)
            .parent()
            .map(|parent| parent.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.context(base)
    }
}

impl Default for AssetResolver {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// UNIT TESTS
// ============================================================================
