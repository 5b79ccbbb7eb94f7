//! The wireframe composite: vertices plus the components that reference
//! them, and the in-place affine transforms.
//!
//! Components (edges, faces, curves, surfaces) refer to vertices by index
//! into the owning wireframe's vertex list. That keeps every transform a
//! single pass over `vertices`, makes cloning for the per-frame snapshot
//! trivial, and avoids ownership cycles entirely.
//!
//! Projection is not stored here: the viewing layer projects `vertices` each
//! frame and passes the resulting window-plane slice to
//! [`Wireframe::window_objects`].

use glam::{DMat4, DVec3};

use crate::curve::Curve;
use crate::point::{Color, WindowObject, WindowPoint, WorldPoint};
use crate::surface::Surface;
use crate::transform::{planar_rotation4, translation, uniform_scale};
use crate::GeometryError;

// ---------------------------------------------------------------------------
// Face / Appearance
// ---------------------------------------------------------------------------

/// A polygonal face: an ordered vertex-index ring (implicitly closed) with an
/// optional fill tag. Unfilled faces render as outlines only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Face {
    pub vertices: Vec<usize>,
    pub fill: Option<Color>,
}

impl Face {
    pub fn new(vertices: Vec<usize>, fill: Option<Color>) -> Self {
        Self { vertices, fill }
    }
}

/// How a wireframe is drawn: stroke thickness, line color, and the fill tag
/// applied to faces that do not carry their own.
#[derive(Debug, Clone, PartialEq)]
pub struct Appearance {
    pub thickness: f64,
    pub line_color: Color,
    pub fill_color: Option<Color>,
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            thickness: 1.0,
            line_color: "black".to_owned(),
            fill_color: None,
        }
    }
}

// ---------------------------------------------------------------------------
// WireframeKind
// ---------------------------------------------------------------------------

/// Coarse classification for the object list, by the richest component the
/// wireframe carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireframeKind {
    Surface,
    Curve,
    Face,
    Edge,
    Point,
    Empty,
}

impl std::fmt::Display for WireframeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            WireframeKind::Surface => "Surface",
            WireframeKind::Curve => "Curve",
            WireframeKind::Face => "Face",
            WireframeKind::Edge => "Edge",
            WireframeKind::Point => "Point",
            WireframeKind::Empty => "Empty",
        };
        write!(f, "{name}")
    }
}

// ---------------------------------------------------------------------------
// Wireframe
// ---------------------------------------------------------------------------

/// A named object in the world: vertices plus zero or more of edges, faces,
/// curves, and surfaces.
///
/// A wireframe with no components at all renders its vertices as point
/// marks.
#[derive(Debug, Clone, PartialEq)]
pub struct Wireframe {
    pub id: u64,
    pub name: String,
    pub vertices: Vec<WorldPoint>,
    /// Vertex-index pairs.
    pub edges: Vec<(usize, usize)>,
    pub faces: Vec<Face>,
    pub curves: Vec<Curve>,
    pub surfaces: Vec<Surface>,
    pub appearance: Appearance,
}

impl Wireframe {
    /// An empty wireframe.
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            vertices: Vec::new(),
            edges: Vec::new(),
            faces: Vec::new(),
            curves: Vec::new(),
            surfaces: Vec::new(),
            appearance: Appearance::default(),
        }
    }

    /// The richest component kind present.
    pub fn kind(&self) -> WireframeKind {
        if !self.surfaces.is_empty() {
            WireframeKind::Surface
        } else if !self.curves.is_empty() {
            WireframeKind::Curve
        } else if !self.faces.is_empty() {
            WireframeKind::Face
        } else if !self.edges.is_empty() {
            WireframeKind::Edge
        } else if !self.vertices.is_empty() {
            WireframeKind::Point
        } else {
            WireframeKind::Empty
        }
    }

    /// Componentwise mean of the vertices (affine, `w = 1`). The zero point
    /// for an empty wireframe.
    pub fn centroid(&self) -> WorldPoint {
        if self.vertices.is_empty() {
            return WorldPoint::new(0.0, 0.0, 0.0, 1.0);
        }
        let sum: WorldPoint = self.vertices.iter().sum();
        let mut center = sum / self.vertices.len() as f64;
        center.w = 1.0;
        center
    }

    /// Euclidean distance from the centroid to `point` (painter ordering).
    pub fn distance_to(&self, point: DVec3) -> f64 {
        (self.centroid().truncate() - point).length()
    }

    // -- transforms ---------------------------------------------------------

    /// Apply `m` to every vertex in place. The most recently applied matrix
    /// is the outermost factor of the composition.
    pub fn transform(&mut self, m: &DMat4) {
        for v in &mut self.vertices {
            *v = *m * *v;
        }
    }

    /// Translate every vertex by `(dx, dy, dz)`.
    pub fn translate(&mut self, dx: f64, dy: f64, dz: f64) {
        self.transform(&translation(dx, dy, dz));
    }

    /// Uniform scale about the centroid.
    pub fn scale(&mut self, factor: f64) {
        let c = self.centroid();
        self.transform(&translation(-c.x, -c.y, -c.z));
        self.transform(&uniform_scale(factor));
        self.transform(&translation(c.x, c.y, c.z));
    }

    /// Rotate by `degrees` in the plane of coordinate axes `(a1, a2)` about
    /// `pivot` (the centroid when `None`).
    pub fn rotate(&mut self, degrees: f64, pivot: Option<WorldPoint>, a1: usize, a2: usize) {
        let p = pivot.unwrap_or_else(|| self.centroid());
        self.transform(&translation(-p.x, -p.y, -p.z));
        self.transform(&planar_rotation4(degrees, a1, a2));
        self.transform(&translation(p.x, p.y, p.z));
    }

    // -- drawing ------------------------------------------------------------

    /// Assemble the drawable primitives from projected vertices.
    ///
    /// `projected` must be the window-plane projection of `vertices`, in the
    /// same order. `curve_steps` is the tessellation density for curves;
    /// surfaces carry their own step count.
    pub fn window_objects(
        &self,
        projected: &[WindowPoint],
        curve_steps: usize,
    ) -> Result<Vec<WindowObject>, GeometryError> {
        let mut objects = Vec::new();

        for &(start, end) in &self.edges {
            objects.push(WindowObject::Line {
                start: fetch(projected, start)?,
                end: fetch(projected, end)?,
            });
        }

        for face in &self.faces {
            objects.push(WindowObject::Polygon {
                points: gather(projected, &face.vertices)?,
                fill: face.fill.clone().or_else(|| self.appearance.fill_color.clone()),
            });
        }

        for curve in &self.curves {
            let control = gather(projected, &curve.control_points)?;
            objects.extend(curve.window_objects(&control, curve_steps)?);
        }

        for surface in &self.surfaces {
            let control = gather(projected, &surface.control_points)?;
            objects.extend(surface.window_objects(&control)?);
        }

        // No other components: the vertices themselves are the drawing.
        if objects.is_empty() {
            objects.extend(projected.iter().map(|&p| WindowObject::Point(p)));
        }

        Ok(objects)
    }

    /// Check that every component index refers into the vertex list.
    pub fn validate_indices(&self) -> Result<(), GeometryError> {
        let len = self.vertices.len();
        let check = |index: usize| {
            if index < len {
                Ok(())
            } else {
                Err(GeometryError::IndexOutOfRange { index, len })
            }
        };

        for &(start, end) in &self.edges {
            check(start)?;
            check(end)?;
        }
        for face in &self.faces {
            for &i in &face.vertices {
                check(i)?;
            }
        }
        for curve in &self.curves {
            for &i in &curve.control_points {
                check(i)?;
            }
        }
        for surface in &self.surfaces {
            for &i in &surface.control_points {
                check(i)?;
            }
        }
        Ok(())
    }
}

fn fetch(projected: &[WindowPoint], index: usize) -> Result<WindowPoint, GeometryError> {
    projected
        .get(index)
        .copied()
        .ok_or(GeometryError::IndexOutOfRange {
            index,
            len: projected.len(),
        })
}

fn gather(projected: &[WindowPoint], indices: &[usize]) -> Result<Vec<WindowPoint>, GeometryError> {
    indices.iter().map(|&i| fetch(projected, i)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::CurveKind;
    use crate::point::world_point;

    fn unit_square() -> Wireframe {
        let mut wf = Wireframe::new(1, "square");
        wf.vertices = vec![
            world_point(0.0, 0.0, 0.0),
            world_point(1.0, 0.0, 0.0),
            world_point(1.0, 1.0, 0.0),
            world_point(0.0, 1.0, 0.0),
        ];
        wf.edges = vec![(0, 1), (1, 2), (2, 3), (3, 0)];
        wf
    }

    #[test]
    fn translate_then_inverse_translate_is_identity() {
        let mut wf = unit_square();
        let original = wf.vertices.clone();
        wf.translate(12.5, -3.0, 7.25);
        wf.translate(-12.5, 3.0, -7.25);
        for (v, o) in wf.vertices.iter().zip(original.iter()) {
            assert!((*v - *o).length() < 1e-12);
            assert_eq!(v.w, 1.0);
        }
    }

    #[test]
    fn scale_preserves_centroid() {
        let mut wf = unit_square();
        wf.translate(5.0, 3.0, -2.0);
        let before = wf.centroid();
        wf.scale(3.5);
        let after = wf.centroid();
        assert!((before - after).length() < 1e-12);
    }

    #[test]
    fn rotation_round_trip_is_identity() {
        let mut wf = unit_square();
        let original = wf.vertices.clone();
        let pivot = Some(world_point(4.0, -1.0, 2.0));
        wf.rotate(33.0, pivot, 0, 2);
        wf.rotate(-33.0, pivot, 0, 2);
        for (v, o) in wf.vertices.iter().zip(original.iter()) {
            assert!((*v - *o).length() < 1e-9);
        }
    }

    #[test]
    fn full_turn_in_steps_returns_home() {
        let mut wf = unit_square();
        let original = wf.vertices.clone();
        let n = 24;
        for _ in 0..n {
            wf.rotate(360.0 / n as f64, None, 1, 2);
        }
        for (v, o) in wf.vertices.iter().zip(original.iter()) {
            assert!((*v - *o).length() < 1e-9);
        }
    }

    #[test]
    fn kind_reports_richest_component() {
        let mut wf = Wireframe::new(0, "empty");
        assert_eq!(wf.kind(), WireframeKind::Empty);
        wf.vertices.push(world_point(0.0, 0.0, 0.0));
        assert_eq!(wf.kind(), WireframeKind::Point);
        wf.edges.push((0, 0));
        assert_eq!(wf.kind(), WireframeKind::Edge);
        wf.faces.push(Face::new(vec![0], None));
        assert_eq!(wf.kind(), WireframeKind::Face);
        wf.curves.push(Curve::new(CurveKind::Bezier, vec![0]));
        assert_eq!(wf.kind(), WireframeKind::Curve);
    }

    #[test]
    fn window_objects_lower_edges_and_faces() {
        let mut wf = unit_square();
        wf.faces.push(Face::new(vec![0, 1, 2, 3], Some("gray".to_owned())));
        let projected: Vec<WindowPoint> = wf
            .vertices
            .iter()
            .map(|v| WindowPoint::new(v.x, v.y))
            .collect();
        let objects = wf.window_objects(&projected, 10).unwrap();
        assert_eq!(objects.len(), 5);
        assert!(matches!(
            objects[4],
            WindowObject::Polygon { ref fill, .. } if fill.as_deref() == Some("gray")
        ));
    }

    #[test]
    fn bare_vertices_render_as_point_marks() {
        let mut wf = Wireframe::new(0, "dots");
        wf.vertices = vec![world_point(1.0, 2.0, 3.0), world_point(4.0, 5.0, 6.0)];
        let projected = vec![WindowPoint::new(1.0, 2.0), WindowPoint::new(4.0, 5.0)];
        let objects = wf.window_objects(&projected, 10).unwrap();
        assert_eq!(
            objects,
            vec![
                WindowObject::Point(WindowPoint::new(1.0, 2.0)),
                WindowObject::Point(WindowPoint::new(4.0, 5.0)),
            ]
        );
    }

    #[test]
    fn out_of_range_component_index_is_an_error_not_a_panic() {
        let mut wf = unit_square();
        wf.edges.push((0, 9));
        let projected = vec![WindowPoint::ZERO; 4];
        assert_eq!(
            wf.window_objects(&projected, 10),
            Err(GeometryError::IndexOutOfRange { index: 9, len: 4 })
        );
        assert_eq!(
            wf.validate_indices(),
            Err(GeometryError::IndexOutOfRange { index: 9, len: 4 })
        );
    }
}
