//! Conversion of a [`RawModel`] into per-material indexed subsets
//!
//! Corners that share the same source position, normal and texture
//! coordinate indices and the same color collapse into one vertex record.
//! The comparison is on source indices, never on float values, so two
//! coincident positions declared on separate `v` lines stay distinct.

use std::collections::HashMap;

use log::{debug, warn};
use thiserror::Error;

use super::vertex::{DEFAULT_NORMAL, DEFAULT_TEX_COORD};
use super::wireframe::line_indices;
use super::{FaceVertex, MaterialTextures, RawMaterial, RawModel, Subset, SubsetVertex, TextureSlot};
use crate::assets::{AssetContext, AssetError};

/// Subset construction errors
#[derive(Error, Debug)]
pub enum MeshError {
    /// A texture named by a material could not be resolved
    #[error("Material {material_index} {slot} texture could not be resolved: {source}")]
    MaterialTextureUnresolved {
        /// Position of the material in the model's material list
        material_index: usize,
        /// Slot the texture was declared for
        slot: TextureSlot,
        /// Resolver failure
        #[source]
        source: AssetError,
    },

    /// A face corner references past the end of an attribute array
    #[error("{attribute} index {index} out of range ({len} available)")]
    IndexOutOfRange {
        /// Attribute array name
        attribute: &'static str,
        /// Offending 0-based index
        index: usize,
        /// Length of the attribute array
        len: usize,
    },

    /// A material references a face the model does not have
    #[error("Material {material_index} references face {face} but the model has {len}")]
    FaceOutOfRange {
        /// Position of the material in the model's material list
        material_index: usize,
        /// Offending face index
        face: usize,
        /// Number of faces in the model
        len: usize,
    },

    /// A subset needs more vertices than a `u32` index can address
    #[error("Material {material_index} has more vertices than 32-bit indices can address")]
    TooManyVertices {
        /// Position of the material in the model's material list
        material_index: usize,
    },
}

/// Identity of a vertex within one subset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct VertexKey {
    position: usize,
    normal: Option<usize>,
    tex_coord: Option<usize>,
    color: u32,
}

impl From<FaceVertex> for VertexKey {
    fn from(corner: FaceVertex) -> Self {
        Self {
            position: corner.position,
            normal: corner.normal,
            tex_coord: corner.tex_coord,
            color: corner.color,
        }
    }
}

/// Builds [`Subset`]s from a [`RawModel`], resolving textures through a context
///
/// ```ignore
/// let ctx = resolver.context("drone2/");
/// let subsets = SubsetBuilder::new(&ctx).build(&raw)?;
/// ```
pub struct SubsetBuilder<'a> {
    context: &'a AssetContext,
}

impl<'a> SubsetBuilder<'a> {
    /// Builder that resolves texture names relative to `context`
    pub fn new(context: &'a AssetContext) -> Self {
        Self { context }
    }

    /// One subset per material that has triangles, in declaration order
    ///
    /// Materials whose faces are all degenerate are skipped without
    /// resolving their textures. Any failure discards the subsets built so
    /// far.
    pub fn build(&self, model: &RawModel) -> Result<Vec<Subset>, MeshError> {
        let mut subsets = Vec::new();

        for (material_index, material) in model.materials.iter().enumerate() {
            if material.faces.is_empty() {
                debug!("Skipping material '{}': no faces", material.name);
                continue;
            }

            let Some(subset) = self.build_subset(model, material_index, material)? else {
                debug!("Skipping material '{}': no drawable triangles", material.name);
                continue;
            };
            debug!(
                "Built subset '{}': {} vertices, {} triangles, {} edges",
                subset.material_name,
                subset.vertices.len(),
                subset.triangle_count(),
                subset.edge_count()
            );
            subsets.push(subset);
        }

        Ok(subsets)
    }

    fn build_subset(
        &self,
        model: &RawModel,
        material_index: usize,
        material: &RawMaterial,
    ) -> Result<Option<Subset>, MeshError> {
        let mut lookup: HashMap<VertexKey, u32> = HashMap::new();
        let mut vertices = Vec::new();
        let mut triangle_indices = Vec::new();

        for &face_index in &material.faces {
            let face = model.faces.get(face_index).ok_or(MeshError::FaceOutOfRange {
                material_index,
                face: face_index,
                len: model.faces.len(),
            })?;

            if face.vertices.len() < 3 {
                warn!(
                    "Material '{}': face {} has {} corners, skipping",
                    material.name,
                    face_index,
                    face.vertices.len()
                );
                continue;
            }

            for triangle in face.triangles() {
                for corner in triangle {
                    let key = VertexKey::from(corner);
                    let index = match lookup.get(&key) {
                        Some(&index) => index,
                        None => {
                            let index = u32::try_from(vertices.len())
                                .map_err(|_| MeshError::TooManyVertices { material_index })?;
                            vertices.push(Self::make_vertex(model, corner)?);
                            lookup.insert(key, index);
                            index
                        }
                    };
                    triangle_indices.push(index);
                }
            }
        }

        if triangle_indices.is_empty() {
            return Ok(None);
        }

        let wireframe_indices = line_indices(&triangle_indices);
        let material_textures = self.resolve_textures(material_index, material)?;

        Ok(Some(Subset {
            material_name: material.name.clone(),
            vertices,
            triangle_indices,
            wireframe_indices,
            material_textures,
        }))
    }

    fn make_vertex(model: &RawModel, corner: FaceVertex) -> Result<SubsetVertex, MeshError> {
        let position = *fetch(&model.positions, corner.position, "position")?;
        let normal = match corner.normal {
            Some(index) => *fetch(&model.normals, index, "normal")?,
            None => DEFAULT_NORMAL,
        };
        let tex_coord = match corner.tex_coord {
            Some(index) => *fetch(&model.tex_coords, index, "texture coordinate")?,
            None => DEFAULT_TEX_COORD,
        };
        Ok(SubsetVertex::new(position, normal, tex_coord, corner.color))
    }

    fn resolve_textures(
        &self,
        material_index: usize,
        material: &RawMaterial,
    ) -> Result<MaterialTextures, MeshError> {
        let mut textures = MaterialTextures::default();
        for slot in TextureSlot::ALL {
            let Some(name) = material.texture(slot) else {
                continue;
            };
            let handle = self
                .context
                .lookup(name)
                .map_err(|source| MeshError::MaterialTextureUnresolved {
                    material_index,
                    slot,
                    source,
                })?;
            textures.set(slot, handle);
        }
        Ok(textures)
    }
}

fn fetch<'m, T>(items: &'m [T], index: usize, attribute: &'static str) -> Result<&'m T, MeshError> {
    items.get(index).ok_or(MeshError::IndexOutOfRange {
        attribute,
        index,
        len: items.len(),
    })
}
