//! Unindexed model data as produced by a parser
//!
//! A [`RawModel`] is the hand-off point between a file-format parser and
//! the [`SubsetBuilder`](super::SubsetBuilder). All indices are 0-based.

use super::TextureSlot;
use crate::foundation::math::WHITE_RGBA;

/// One corner of a face: indices into the model's attribute arrays plus a
/// packed `0xRRGGBBAA` color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FaceVertex {
    /// Index into [`RawModel::positions`]
    pub position: usize,
    /// Index into [`RawModel::normals`], if the corner has one
    pub normal: Option<usize>,
    /// Index into [`RawModel::tex_coords`], if the corner has one
    pub tex_coord: Option<usize>,
    /// Vertex color
    pub color: u32,
}

impl FaceVertex {
    /// White corner referencing only a position
    pub fn new(position: usize) -> Self {
        Self {
            position,
            normal: None,
            tex_coord: None,
            color: WHITE_RGBA,
        }
    }

    /// Set the normal index
    pub fn with_normal(mut self, normal: usize) -> Self {
        self.normal = Some(normal);
        self
    }

    /// Set the texture coordinate index
    pub fn with_tex_coord(mut self, tex_coord: usize) -> Self {
        self.tex_coord = Some(tex_coord);
        self
    }

    /// Set the packed color
    pub fn with_color(mut self, color: u32) -> Self {
        self.color = color;
        self
    }
}

/// Polygon with any number of corners
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Face {
    /// Corners in winding order
    pub vertices: Vec<FaceVertex>,
}

impl Face {
    /// Create a face from its corners
    pub fn new(vertices: Vec<FaceVertex>) -> Self {
        Self { vertices }
    }

    /// Fan triangulation: `(v0, vi, vi+1)` for every `i` in `1..n-1`
    ///
    /// Faces with fewer than three corners yield nothing.
    pub fn triangles(&self) -> impl Iterator<Item = [FaceVertex; 3]> + '_ {
        let first = self.vertices.first().copied();
        self.vertices
            .windows(2)
            .skip(1)
            .filter_map(move |pair| first.map(|v0| [v0, pair[0], pair[1]]))
    }

    /// Number of triangles the fan triangulation produces
    pub fn triangle_count(&self) -> usize {
        self.vertices.len().saturating_sub(2)
    }
}

/// Material declaration with the faces that use it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawMaterial {
    /// Material name, for diagnostics
    pub name: String,
    /// Diffuse texture resource name
    pub diffuse_texture: Option<String>,
    /// Specular texture resource name
    pub specular_texture: Option<String>,
    /// Ambient texture resource name
    pub ambient_texture: Option<String>,
    /// Bump texture resource name
    pub bump_texture: Option<String>,
    /// Indices into [`RawModel::faces`], in file order
    pub faces: Vec<usize>,
}

impl RawMaterial {
    /// Untextured material with no faces
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Texture resource name declared for a slot
    pub fn texture(&self, slot: TextureSlot) -> Option<&str> {
        match slot {
            TextureSlot::Diffuse => self.diffuse_texture.as_deref(),
            TextureSlot::Specular => self.specular_texture.as_deref(),
            TextureSlot::Ambient => self.ambient_texture.as_deref(),
            TextureSlot::Bump => self.bump_texture.as_deref(),
        }
    }

    /// Declare a texture resource name for a slot
    pub fn with_texture(mut self, slot: TextureSlot, name: impl Into<String>) -> Self {
        let name = Some(name.into());
        match slot {
            TextureSlot::Diffuse => self.diffuse_texture = name,
            TextureSlot::Specular => self.specular_texture = name,
            TextureSlot::Ambient => self.ambient_texture = name,
            TextureSlot::Bump => self.bump_texture = name,
        }
        self
    }

    /// Assign faces to this material
    pub fn with_faces(mut self, faces: impl IntoIterator<Item = usize>) -> Self {
        self.faces.extend(faces);
        self
    }
}

/// Parsed, unindexed 3D geometry grouped by material
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawModel {
    /// Vertex positions
    pub positions: Vec<[f32; 3]>,
    /// Vertex normals
    pub normals: Vec<[f32; 3]>,
    /// Texture coordinates
    pub tex_coords: Vec<[f32; 2]>,
    /// Every face in the model
    pub faces: Vec<Face>,
    /// Materials in declaration order
    pub materials: Vec<RawMaterial>,
}

impl RawModel {
    /// Create an empty model
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of faces
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Find a material by name
    pub fn material(&self, name: &str) -> Option<&RawMaterial> {
        self.materials.iter().find(|m| m.name == name)
    }

    /// Index of a material by name
    pub fn material_index(&self, name: &str) -> Option<usize> {
        self.materials.iter().position(|m| m.name == name)
    }
}
