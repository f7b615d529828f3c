//! Wavefront OBJ model assembled into renderable subsets

use log::info;
use thiserror::Error;

use super::{MeshError, RawModel, Subset, SubsetBuilder};
use crate::assets::{AssetContext, ObjError, ObjLoader};
use crate::foundation::math::{self, Vec3};

/// OBJ model loading errors
#[derive(Error, Debug)]
pub enum ModelError {
    /// The OBJ file or one of its material libraries could not be parsed
    #[error("Failed to parse model: {0}")]
    Obj(#[from] ObjError),

    /// Subsets could not be built from the parsed model
    #[error("Failed to build model subsets: {0}")]
    Mesh(#[from] MeshError),
}

/// Model loaded from an OBJ file, split into one subset per used material
#[derive(Debug, Clone)]
pub struct ObjMesh {
    source_name: String,
    subsets: Vec<Subset>,
}

impl ObjMesh {
    /// Load `filename` relative to `context` and build its subsets
    ///
    /// Material libraries and textures are looked up through the same
    /// context. Nothing is returned unless every step succeeds.
    pub fn load(context: &AssetContext, filename: &str) -> Result<Self, ModelError> {
        let source_name = context.full_path(filename);
        let raw = ObjLoader::load(context, filename)?;
        info!(
            "Loading OBJ model '{}': {} vertices, {} faces, {} materials",
            source_name,
            raw.positions.len(),
            raw.face_count(),
            raw.materials.len()
        );
        Ok(Self::from_raw(context, source_name, &raw)?)
    }

    /// Build a mesh from already parsed model data
    pub fn from_raw(
        context: &AssetContext,
        source_name: impl Into<String>,
        raw: &RawModel,
    ) -> Result<Self, MeshError> {
        let subsets = SubsetBuilder::new(context).build(raw)?;
        Ok(Self {
            source_name: source_name.into(),
            subsets,
        })
    }

    /// Resource name the model was loaded from
    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    /// Subsets in material declaration order
    pub fn subsets(&self) -> &[Subset] {
        &self.subsets
    }

    /// Total vertex records across all subsets
    pub fn vertex_count(&self) -> usize {
        self.subsets.iter().map(|s| s.vertices.len()).sum()
    }

    /// Total triangles across all subsets
    pub fn triangle_count(&self) -> usize {
        self.subsets.iter().map(Subset::triangle_count).sum()
    }

    /// Position of every vertex record, subset by subset
    pub fn points(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.subsets
            .iter()
            .flat_map(|s| s.vertices.iter().map(super::SubsetVertex::position_vec))
    }

    /// Call `f` with the corner positions of every triangle
    ///
    /// Returns `true` as soon as `f` does, without visiting the rest.
    pub fn traverse_triangles<F>(&self, mut f: F) -> bool
    where
        F: FnMut(Vec3, Vec3, Vec3) -> bool,
    {
        self.subsets
            .iter()
            .flat_map(Subset::triangles)
            .any(|[a, b, c]| f(a.position_vec(), b.position_vec(), c.position_vec()))
    }

    /// Axis-aligned bounds `(min, max)`, or `None` for an empty mesh
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        math::bounds(self.points())
    }
}
