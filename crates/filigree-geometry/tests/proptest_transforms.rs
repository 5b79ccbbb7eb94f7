//! Property tests for the wireframe affine transforms.
//!
//! Random vertex clouds and transform parameters; the laws under test are
//! the inverse pairs (translate/rotate), centroid preservation under scaling,
//! and `w = 1` preservation across arbitrary compositions.

use filigree_geometry::prelude::*;
use proptest::prelude::*;

/// Finite coordinates in a range that keeps accumulated rounding well under
/// the assertion tolerances.
fn coord() -> impl Strategy<Value = f64> {
    (-10_000i32..10_000i32).prop_map(|v| v as f64 * 0.1)
}

fn vertex() -> impl Strategy<Value = (f64, f64, f64)> {
    (coord(), coord(), coord())
}

fn axis_pair() -> impl Strategy<Value = (usize, usize)> {
    prop_oneof![
        Just((0usize, 1usize)),
        Just((0usize, 2usize)),
        Just((1usize, 2usize)),
        Just((1usize, 0usize)),
        Just((2usize, 0usize)),
        Just((2usize, 1usize)),
    ]
}

fn wireframe_from(vertices: Vec<(f64, f64, f64)>) -> Wireframe {
    let mut wf = Wireframe::new(0, "cloud");
    wf.vertices = vertices
        .into_iter()
        .map(|(x, y, z)| world_point(x, y, z))
        .collect();
    wf
}

proptest! {
    #[test]
    fn translation_has_an_exact_inverse(
        vertices in prop::collection::vec(vertex(), 1..30),
        (dx, dy, dz) in vertex(),
    ) {
        let mut wf = wireframe_from(vertices);
        let original = wf.vertices.clone();

        wf.translate(dx, dy, dz);
        wf.translate(-dx, -dy, -dz);

        for (v, o) in wf.vertices.iter().zip(original.iter()) {
            prop_assert!((*v - *o).length() < 1e-9);
        }
    }

    #[test]
    fn scaling_about_the_centroid_fixes_the_centroid(
        vertices in prop::collection::vec(vertex(), 1..30),
        factor in 1i32..400i32,
    ) {
        let mut wf = wireframe_from(vertices);
        let before = wf.centroid();

        wf.scale(factor as f64 * 0.01);

        prop_assert!((wf.centroid() - before).length() < 1e-6);
    }

    #[test]
    fn rotation_has_an_inverse_about_any_pivot(
        vertices in prop::collection::vec(vertex(), 1..30),
        degrees in -360i32..360i32,
        (a1, a2) in axis_pair(),
        pivot in vertex(),
    ) {
        let mut wf = wireframe_from(vertices);
        let original = wf.vertices.clone();
        let pivot = Some(world_point(pivot.0, pivot.1, pivot.2));

        wf.rotate(degrees as f64, pivot, a1, a2);
        wf.rotate(-(degrees as f64), pivot, a1, a2);

        for (v, o) in wf.vertices.iter().zip(original.iter()) {
            prop_assert!((*v - *o).length() < 1e-6);
        }
    }

    #[test]
    fn transforms_keep_points_affine(
        vertices in prop::collection::vec(vertex(), 1..30),
        (dx, dy, dz) in vertex(),
        degrees in -360i32..360i32,
        (a1, a2) in axis_pair(),
        factor in 1i32..400i32,
    ) {
        let mut wf = wireframe_from(vertices);

        wf.translate(dx, dy, dz);
        wf.rotate(degrees as f64, None, a1, a2);
        wf.scale(factor as f64 * 0.01);

        for v in &wf.vertices {
            prop_assert!((v.w - 1.0).abs() < 1e-12);
        }
    }
}
