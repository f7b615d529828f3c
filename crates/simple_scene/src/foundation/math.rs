//! Math utilities and types

pub use nalgebra::{Vector2, Vector3};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// Pack a linear RGBA color in `[0, 1]` into `0xRRGGBBAA`
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn pack_rgba(r: f32, g: f32, b: f32, a: f32) -> u32 {
    // Each channel is clamped to [0, 255] before the cast
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u32;
    (channel(r) << 24) | (channel(g) << 16) | (channel(b) << 8) | channel(a)
}

/// Opaque white, the vertex color used when a model declares none
pub const WHITE_RGBA: u32 = 0xFFFF_FFFF;

/// Component-wise minimum and maximum over a set of points
///
/// Returns `None` for an empty iterator.
pub fn bounds<I>(points: I) -> Option<(Vec3, Vec3)>
where
    I: IntoIterator<Item = Vec3>,
{
    let mut iter = points.into_iter();
    let first = iter.next()?;
    Some(iter.fold((first, first), |(min, max), p| (min.inf(&p), max.sup(&p))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_pack_rgba() {
        assert_eq!(pack_rgba(1.0, 1.0, 1.0, 1.0), WHITE_RGBA);
        assert_eq!(pack_rgba(1.0, 0.0, 0.0, 1.0), 0xFF00_00FF);
        assert_eq!(pack_rgba(0.0, 0.0, 0.0, 0.0), 0);
    }

    #[test]
    fn test_pack_rgba_clamps() {
        assert_eq!(pack_rgba(2.0, -1.0, 0.0, 1.0), 0xFF00_00FF);
    }

    #[test]
    fn test_bounds() {
        let points = vec![
            Vec3::new(1.0, -2.0, 0.5),
            Vec3::new(-1.0, 3.0, 0.0),
            Vec3::new(0.0, 0.0, 4.0),
        ];
        let (min, max) = bounds(points).unwrap();
        assert_relative_eq!(min, Vec3::new(-1.0, -2.0, 0.0));
        assert_relative_eq!(max, Vec3::new(1.0, 3.0, 4.0));
    }

    #[test]
    fn test_bounds_empty() {
        assert!(bounds(Vec::<Vec3>::new()).is_none());
    }
}
