//! Storage backend trait for assets

use std::fmt;
use std::io::{Read, Seek};

use super::AssetError;

/// Readable, seekable byte stream returned by an archive
///
/// Blanket-implemented for every `Read + Seek + Send` type.
pub trait ReadSeek: Read + Seek + Send {}

impl<T: Read + Seek + Send> ReadSeek for T {}

/// Owned stream for one opened asset, positioned at offset 0
///
/// Dropping the stream releases whatever the archive acquired for it.
pub type AssetStream = Box<dyn ReadSeek>;

/// Trait for asset storage backends
///
/// An archive answers two questions about a resource name: does it hold the
/// resource, and can it hand out a fresh stream over its bytes. Directories,
/// packed files and in-memory tables all fit behind this trait, and the
/// resolver treats them uniformly.
///
/// Resource names are relative paths. How a name maps onto storage is up to
/// the archive.
pub trait AssetArchive: Send + Sync {
    /// Check whether the archive holds a resource with the given name.
    fn exists(&self, name: &str) -> bool;

    /// Open a new stream over the resource.
    ///
    /// Fails with [`AssetError::NotFound`] when the resource is absent at
    /// call time and [`AssetError::LoadError`] when the backend fails.
    fn open(&self, name: &str) -> Result<AssetStream, AssetError>;

    /// Human-readable identity used in diagnostics.
    fn describe(&self) -> String;
}

impl fmt::Debug for dyn AssetArchive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}
