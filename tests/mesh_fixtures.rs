//! Shared helpers for mesh tests.

use ribbon_scene::{Mesh, SceneVertex};

/// Triangles of an indexed strip, with odd triangles reordered so every
/// triangle keeps the winding of the first one.
pub fn strip_triangles(indices: &[u32]) -> Vec<[u32; 3]> {
    indices
        .windows(3)
        .enumerate()
        .map(|(i, w)| {
            if i % 2 == 0 {
                [w[0], w[1], w[2]]
            } else {
                [w[1], w[0], w[2]]
            }
        })
        .collect()
}

/// A triangle with a repeated index has zero area.
pub fn is_degenerate(triangle: &[u32; 3]) -> bool {
    triangle[0] == triangle[1] || triangle[1] == triangle[2] || triangle[0] == triangle[2]
}

/// Signed area of a triangle in uv space (positive is counter-clockwise).
pub fn uv_signed_area(vertices: &[SceneVertex], triangle: &[u32; 3]) -> f32 {
    let [a, b, c] = triangle.map(|i| vertices[i as usize].uv);
    (b[0] - a[0]) * (c[1] - a[1]) - (b[1] - a[1]) * (c[0] - a[0])
}

/// Element (ribbon or particle) a vertex belongs to.
pub fn element_of(vertices: &[SceneVertex], index: u32) -> f32 {
    vertices[index as usize].position[0]
}

/// Non-degenerate triangles of a mesh.
pub fn visible_triangles(mesh: &Mesh) -> Vec<[u32; 3]> {
    strip_triangles(&mesh.indices)
        .into_iter()
        .filter(|t| !is_degenerate(t))
        .collect()
}
