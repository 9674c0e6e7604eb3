//! Integration tests for ribbon and particle strip generation.

mod mesh_fixtures;

use mesh_fixtures::*;
use ribbon_scene::{particles, ribbons, ParticleParams, RibbonParams};

// ==================== Ribbon Tests ====================

#[test]
fn test_ribbon_counts_match_closed_form() {
    for params in [
        RibbonParams::default(),
        RibbonParams {
            count: 3,
            slice_x: 10,
            slice_y: 4,
        },
        RibbonParams {
            count: 5,
            slice_x: 1,
            slice_y: 1,
        },
    ] {
        let mesh = ribbons(&params);
        assert_eq!(mesh.vertices.len(), params.vertex_count(), "{params:?}");
        assert_eq!(mesh.indices.len(), params.index_count(), "{params:?}");
    }
}

#[test]
fn test_ribbon_visible_triangle_count() {
    let params = RibbonParams {
        count: 2,
        slice_x: 6,
        slice_y: 3,
    };
    let mesh = ribbons(&params);
    // Two triangles per face, nothing else survives the joins.
    let expected = (params.count * params.slice_x * params.slice_y * 2) as usize;
    assert_eq!(visible_triangles(&mesh).len(), expected);
}

#[test]
fn test_ribbon_joins_never_bridge_ribbons() {
    let mesh = ribbons(&RibbonParams {
        count: 4,
        slice_x: 5,
        slice_y: 2,
    });

    for t in visible_triangles(&mesh) {
        let ribbon = element_of(&mesh.vertices, t[0]);
        assert!(t.iter().all(|&i| element_of(&mesh.vertices, i) == ribbon));
    }
}

#[test]
fn test_ribbon_triangles_share_winding() {
    let mesh = ribbons(&RibbonParams {
        count: 2,
        slice_x: 8,
        slice_y: 3,
    });

    for t in visible_triangles(&mesh) {
        assert!(uv_signed_area(&mesh.vertices, &t) > 0.0, "{t:?}");
    }
}

#[test]
fn test_ribbon_faces_span_one_row() {
    let params = RibbonParams {
        count: 1,
        slice_x: 4,
        slice_y: 4,
    };
    let mesh = ribbons(&params);
    let row_height = 1.0 / params.slice_y as f32;

    for t in visible_triangles(&mesh) {
        let vs: Vec<f32> = t.iter().map(|&i| mesh.vertices[i as usize].uv[1]).collect();
        let span = vs.iter().cloned().fold(f32::NEG_INFINITY, f32::max)
            - vs.iter().cloned().fold(f32::INFINITY, f32::min);
        assert!((span - row_height).abs() < 1e-6);
    }
}

// ==================== Particle Tests ====================

#[test]
fn test_particle_visible_triangles() {
    let params = ParticleParams { count: 50 };
    let mesh = particles(&params);
    assert_eq!(visible_triangles(&mesh).len(), 100);
}

#[test]
fn test_particle_quads_are_front_facing() {
    let mesh = particles(&ParticleParams { count: 20 });

    for t in visible_triangles(&mesh) {
        // Each quad triangle covers half of the [-1, 1] square.
        assert!((uv_signed_area(&mesh.vertices, &t) - 4.0).abs() < 1e-6);
    }
}

#[test]
fn test_particle_joins_never_bridge_quads() {
    let mesh = particles(&ParticleParams { count: 30 });

    for t in visible_triangles(&mesh) {
        let particle = element_of(&mesh.vertices, t[0]);
        assert!(t.iter().all(|&i| element_of(&mesh.vertices, i) == particle));
    }
}

#[test]
fn test_particle_phase_spans_unit_interval() {
    let params = ParticleParams { count: 200 };
    let mesh = particles(&params);
    let first = mesh.vertices.first().map(|v| v.position[1]);
    let last = mesh.vertices.last().map(|v| v.position[1]);
    assert_eq!(first, Some(0.0));
    assert_eq!(last, Some(199.0 / 200.0));
}

#[test]
fn test_indices_stay_in_bounds() {
    let ribbon = ribbons(&RibbonParams::default());
    let quads = particles(&ParticleParams::default());

    for mesh in [ribbon, quads] {
        let max = mesh.vertices.len() as u32;
        assert!(mesh.indices.iter().all(|&i| i < max));
    }
}
