//! Asset management system
//!
//! Archives store bytes, the resolver finds which archive holds a name, and
//! handles remember the answer so the resource can be opened later. Contexts
//! scope lookups to a directory, the way a model file refers to its
//! material libraries and textures.

pub mod archive;
pub mod context;
pub mod error;
pub mod filesystem;
pub mod handle;
pub mod memory;
pub mod resolver;

pub mod obj_loader;
pub mod materials;

pub use archive::{AssetArchive, AssetStream, ReadSeek};
pub use context::AssetContext;
pub use error::AssetError;
pub use filesystem::FileSystemArchive;
pub use handle::AssetHandle;
pub use memory::MemoryArchive;
pub use resolver::AssetResolver;

pub use obj_loader::{ObjError, ObjLoader};
pub use materials::{MtlData, MtlParser};
