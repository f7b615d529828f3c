//! # Simple Scene
//!
//! Asset resolution and indexed mesh construction for Wavefront OBJ models.
//!
//! ## Features
//!
//! - **Asset Archives**: Pluggable storage backends (filesystem, in-memory)
//! - **Resource Resolution**: Ordered, thread-safe lookup over registered archives
//! - **Reusable Handles**: Resolve once, open as many times as needed
//! - **Mesh Subsets**: Per-material deduplicated vertex and index buffers,
//!   plus a wireframe edge buffer with shared edges emitted once
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use simple_scene::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let resolver = AssetResolver::new();
//!     resolver.register(FileSystemArchive::new("./assets"));
//!     let resolver = Arc::new(resolver);
//!
//!     let ctx = resolver.context("drone2/");
//!     let mesh = ObjMesh::load(&ctx, "drone2.obj")?;
//!     for subset in mesh.subsets() {
//!         println!("{}: {} triangles", subset.material_name, subset.triangle_count());
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod core;

pub mod foundation;
pub mod config;
pub mod assets;
pub mod mesh;

/// Common imports for library users
pub mod prelude {
    pub use crate::{
        assets::{
            AssetArchive, AssetContext, AssetError, AssetHandle, AssetResolver, AssetStream,
            FileSystemArchive, MemoryArchive, ObjLoader,
        },
        core::config::{ApplicationConfig, AssetConfig},
        config::{Config, ConfigError},
        foundation::math::{Vec2, Vec3},
        mesh::{
            MaterialTextures, MeshError, ModelError, ObjMesh, RawModel, Subset, SubsetBuilder,
            SubsetVertex, TextureSlot,
        },
    };
}
