//! Vertex record stored in mesh subsets
//!
//! The layout is `#[repr(C)]` and `Pod`, so a subset's vertex array can be
//! handed to a GPU upload with `bytemuck::cast_slice` and no copying.

use bytemuck::{Pod, Zeroable};

use crate::foundation::math::{Vec2, Vec3};

/// Normal used for corners that reference none
pub const DEFAULT_NORMAL: [f32; 3] = [0.0, 1.0, 0.0];

/// Texture coordinate used for corners that reference none
pub const DEFAULT_TEX_COORD: [f32; 2] = [0.0, 0.0];

/// Position, normal, diffuse color and one texture coordinate
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct SubsetVertex {
    /// Position in model space
    pub position: [f32; 3],

    /// Normal vector
    pub normal: [f32; 3],

    /// Texture coordinates
    pub tex_coord: [f32; 2],

    /// Diffuse color packed as `0xRRGGBBAA`
    pub color: u32,
}

impl SubsetVertex {
    /// Create a new vertex
    pub fn new(position: [f32; 3], normal: [f32; 3], tex_coord: [f32; 2], color: u32) -> Self {
        Self {
            position,
            normal,
            tex_coord,
            color,
        }
    }

    /// Position as a math vector
    pub fn position_vec(&self) -> Vec3 {
        Vec3::from(self.position)
    }

    /// Normal as a math vector
    pub fn normal_vec(&self) -> Vec3 {
        Vec3::from(self.normal)
    }

    /// Texture coordinate as a math vector
    pub fn tex_coord_vec(&self) -> Vec2 {
        Vec2::from(self.tex_coord)
    }

    /// Color as `[r, g, b, a]` bytes
    pub fn color_bytes(&self) -> [u8; 4] {
        self.color.to_be_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_layout_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<SubsetVertex>(), 36);
        assert_eq!(std::mem::align_of::<SubsetVertex>(), 4);
    }

    #[test]
    fn test_cast_to_bytes() {
        let vertices = [
            SubsetVertex::new([1.0, 2.0, 3.0], DEFAULT_NORMAL, DEFAULT_TEX_COORD, 0xFF00_00FF),
            SubsetVertex::zeroed(),
        ];
        let bytes: &[u8] = bytemuck::cast_slice(&vertices);
        assert_eq!(bytes.len(), 72);
        assert_eq!(&bytes[0..4], &1.0f32.to_ne_bytes());
    }

    #[test]
    fn test_vector_accessors() {
        let v = SubsetVertex::new([1.0, 2.0, 3.0], [0.0, 0.0, 1.0], [0.25, 0.75], 0x1122_3344);
        assert_relative_eq!(v.position_vec(), Vec3::new(1.0, 2.0, 3.0));
        assert_relative_eq!(v.normal_vec(), Vec3::new(0.0, 0.0, 1.0));
        assert_relative_eq!(v.tex_coord_vec(), Vec2::new(0.25, 0.75));
        assert_eq!(v.color_bytes(), [0x11, 0x22, 0x33, 0x44]);
    }
}
