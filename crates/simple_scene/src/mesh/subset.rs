//! Per-material subsets and their texture bindings

use std::fmt;

use super::SubsetVertex;
use crate::assets::AssetHandle;

/// Texture binding point of a material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureSlot {
    /// Base color (`map_Kd`)
    Diffuse,
    /// Specular intensity (`map_Ks`)
    Specular,
    /// Ambient (`map_Ka`)
    Ambient,
    /// Bump / normal perturbation (`map_Bump`)
    Bump,
}

impl TextureSlot {
    /// Every slot, in the order subsets resolve them
    pub const ALL: [Self; 4] = [Self::Diffuse, Self::Specular, Self::Ambient, Self::Bump];
}

impl fmt::Display for TextureSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Diffuse => "diffuse",
            Self::Specular => "specular",
            Self::Ambient => "ambient",
            Self::Bump => "bump",
        };
        f.write_str(name)
    }
}

/// Resolved texture handles of one material; unset slots stay `None`
#[derive(Debug, Clone, Default)]
pub struct MaterialTextures {
    /// Diffuse texture
    pub diffuse: Option<AssetHandle>,
    /// Specular texture
    pub specular: Option<AssetHandle>,
    /// Ambient texture
    pub ambient: Option<AssetHandle>,
    /// Bump texture
    pub bump: Option<AssetHandle>,
}

impl MaterialTextures {
    /// Handle bound to a slot
    pub fn get(&self, slot: TextureSlot) -> Option<&AssetHandle> {
        match slot {
            TextureSlot::Diffuse => self.diffuse.as_ref(),
            TextureSlot::Specular => self.specular.as_ref(),
            TextureSlot::Ambient => self.ambient.as_ref(),
            TextureSlot::Bump => self.bump.as_ref(),
        }
    }

    /// Bind a handle to a slot
    pub fn set(&mut self, slot: TextureSlot, handle: AssetHandle) {
        let target = match slot {
            TextureSlot::Diffuse => &mut self.diffuse,
            TextureSlot::Specular => &mut self.specular,
            TextureSlot::Ambient => &mut self.ambient,
            TextureSlot::Bump => &mut self.bump,
        };
        *target = Some(handle);
    }

    /// Bound slots with their handles
    pub fn iter(&self) -> impl Iterator<Item = (TextureSlot, &AssetHandle)> {
        TextureSlot::ALL
            .into_iter()
            .filter_map(move |slot| self.get(slot).map(|handle| (slot, handle)))
    }
}

/// One material's deduplicated, indexed geometry and its textures
///
/// Subsets are built once and read-only afterwards; a renderer uploads the
/// three arrays to GPU buffers and draws from them.
#[derive(Debug, Clone)]
pub struct Subset {
    /// Name of the material this subset was built from
    pub material_name: String,
    /// Unique vertex records
    pub vertices: Vec<SubsetVertex>,
    /// Triangle list, three indices per triangle
    pub triangle_indices: Vec<u32>,
    /// Line list, two indices per unique edge
    pub wireframe_indices: Vec<u32>,
    /// Resolved material textures
    pub material_textures: MaterialTextures,
}

impl Subset {
    /// Number of triangles
    pub fn triangle_count(&self) -> usize {
        self.triangle_indices.len() / 3
    }

    /// Number of unique edges
    pub fn edge_count(&self) -> usize {
        self.wireframe_indices.len() / 2
    }

    /// Triangles as vertex triples
    pub fn triangles(&self) -> impl Iterator<Item = [&SubsetVertex; 3]> {
        self.triangle_indices.chunks_exact(3).map(|tri| {
            [
                &self.vertices[tri[0] as usize],
                &self.vertices[tri[1] as usize],
                &self.vertices[tri[2] as usize],
            ]
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::MemoryArchive;
    use std::sync::Arc;

    #[test]
    fn test_slot_display() {
        let names: Vec<String> = TextureSlot::ALL.iter().map(ToString::to_string).collect();
        assert_eq!(names, vec!["diffuse", "specular", "ambient", "bump"]);
    }

    #[test]
    fn test_material_textures_set_and_iter() {
        let archive: Arc<dyn crate::assets::AssetArchive> = Arc::new(MemoryArchive::new());
        let mut textures = MaterialTextures::default();
        assert_eq!(textures.iter().count(), 0);

        textures.set(TextureSlot::Bump, AssetHandle::new(Arc::clone(&archive), "n.png"));
        textures.set(TextureSlot::Diffuse, AssetHandle::new(archive, "d.png"));

        let bound: Vec<(TextureSlot, &str)> = textures
            .iter()
            .map(|(slot, handle)| (slot, handle.resource_name()))
            .collect();
        assert_eq!(
            bound,
            vec![(TextureSlot::Diffuse, "d.png"), (TextureSlot::Bump, "n.png")]
        );
        assert!(textures.get(TextureSlot::Specular).is_none());
    }

    #[test]
    fn test_counts_and_triangles() {
        let v = |x: f32| SubsetVertex::new([x, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0], 0);
        let subset = Subset {
            material_name: "m".to_string(),
            vertices: vec![v(0.0), v(1.0), v(2.0)],
            triangle_indices: vec![0, 1, 2],
            wireframe_indices: vec![0, 1, 1, 2, 2, 0],
            material_textures: MaterialTextures::default(),
        };
        assert_eq!(subset.triangle_count(), 1);
        assert_eq!(subset.edge_count(), 3);

        let tri = subset.triangles().next().unwrap();
        assert_eq!(tri.map(|v| v.position[0]), [0.0, 1.0, 2.0]);
    }
}
