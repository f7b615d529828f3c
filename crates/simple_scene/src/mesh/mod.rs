//! Indexed mesh construction
//!
//! A parser produces a [`RawModel`]; [`SubsetBuilder`] turns it into one
//! [`Subset`] per material, each with deduplicated vertices, a triangle list
//! and a wireframe line list. [`ObjMesh`] ties parsing and building together
//! for Wavefront OBJ files.

pub mod raw_model;
pub mod vertex;
pub mod subset;
pub mod subset_builder;
pub mod wireframe;
pub mod obj_mesh;

pub use raw_model::{Face, FaceVertex, RawMaterial, RawModel};
pub use vertex::SubsetVertex;
pub use subset::{MaterialTextures, Subset, TextureSlot};
pub use subset_builder::{MeshError, SubsetBuilder};
pub use wireframe::line_indices;
pub use obj_mesh::{ModelError, ObjMesh};
