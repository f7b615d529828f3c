//! Wireframe extraction from triangle lists

use std::collections::HashSet;

/// Line-list indices covering every unique edge of a triangle list
///
/// Each triangle contributes edges `(i0, i1)`, `(i1, i2)` and `(i2, i0)`.
/// An edge is emitted the first time its unordered pair is seen; a trailing
/// partial triangle is ignored.
pub fn line_indices(triangle_indices: &[u32]) -> Vec<u32> {
    let mut seen: HashSet<(u32, u32)> = HashSet::new();
    let mut lines = Vec::new();

    for tri in triangle_indices.chunks_exact(3) {
        for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
            if seen.insert((a.min(b), a.max(b))) {
                lines.push(a);
                lines.push(b);
            }
        }
    }

    lines
}
