//! The scene: the object registry and the interactive build buffer.
//!
//! The registry owns every wireframe, hands out monotonically increasing
//! ids, and tolerates removal of unknown ids (the render driver may race a
//! deletion by one frame). The build buffer collects world points while the
//! user assembles a new object; the `finish_*` constructors consume it and
//! emit the corresponding wireframes.
//!
//! Undo cascades: a buffered point first, then build mode itself, then the
//! most recently added wireframe.

use filigree_geometry::curve::{Curve, CurveKind};
use filigree_geometry::point::{Color, WorldPoint};
use filigree_geometry::surface::{Surface, SurfaceAlgorithm, SurfaceKind};
use filigree_geometry::wireframe::{Face, Wireframe};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Constraint violations raised by the interactive constructors. These are
/// surfaced to the interaction layer, which may refuse the operation or
/// re-prompt; the registry itself stays unchanged on error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SceneError {
    #[error("a polygon needs at least 3 points, got {got}")]
    PolygonTooSmall { got: usize },

    #[error("a curve needs at least 2 points, got {got}")]
    CurveTooSmall { got: usize },

    #[error("a {nu}x{nv} surface grid needs exactly {expected} points, got {got}")]
    SurfaceGridMismatch {
        nu: usize,
        nv: usize,
        expected: usize,
        got: usize,
    },
}

// ---------------------------------------------------------------------------
// CurveFinish
// ---------------------------------------------------------------------------

/// What [`Scene::finish_curve`] actually produced.
///
/// Buffers that cannot carry the requested family degrade by documented
/// policy: two points finish as a plain segment, three as a quadratic
/// Bezier. The variant lets the interaction layer report the degradation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveFinish {
    /// The requested family, degree 4.
    Full { id: u64 },
    /// Three points: a quadratic Bezier.
    Quadratic { id: u64 },
    /// Two points: a plain line segment.
    Segment { id: u64 },
}

impl CurveFinish {
    pub fn id(self) -> u64 {
        match self {
            CurveFinish::Full { id } | CurveFinish::Quadratic { id } | CurveFinish::Segment { id } => id,
        }
    }
}

// ---------------------------------------------------------------------------
// Scene
// ---------------------------------------------------------------------------

/// The object registry plus build state.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    wireframes: Vec<Wireframe>,
    next_id: u64,
    build: Vec<WorldPoint>,
    building: bool,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// A scene over pre-loaded wireframes. Ids are re-assigned by position
    /// so the counter stays monotonic.
    pub fn load(wireframes: Vec<Wireframe>) -> Self {
        let mut scene = Self::new();
        for wireframe in wireframes {
            scene.add(wireframe);
        }
        scene
    }

    // -- registry -----------------------------------------------------------

    /// Insert a wireframe under a fresh id; returns the id.
    pub fn add(&mut self, mut wireframe: Wireframe) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        wireframe.id = id;
        self.wireframes.push(wireframe);
        id
    }

    /// Remove by id. Unknown ids are ignored.
    pub fn remove(&mut self, id: u64) {
        self.wireframes.retain(|w| w.id != id);
    }

    /// Drop every wireframe and reset the build state. The id counter is
    /// not reset, so ids never repeat within a session.
    pub fn clear(&mut self) {
        self.wireframes.clear();
        self.build.clear();
        self.building = false;
    }

    pub fn wireframes(&self) -> &[Wireframe] {
        &self.wireframes
    }

    pub fn get(&self, id: u64) -> Option<&Wireframe> {
        self.wireframes.iter().find(|w| w.id == id)
    }

    pub fn get_mut(&mut self, id: u64) -> Option<&mut Wireframe> {
        self.wireframes.iter_mut().find(|w| w.id == id)
    }

    pub fn len(&self) -> usize {
        self.wireframes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wireframes.is_empty()
    }

    // -- build mode ---------------------------------------------------------

    pub fn building(&self) -> bool {
        self.building
    }

    pub fn build_buffer(&self) -> &[WorldPoint] {
        &self.build
    }

    pub fn begin_build(&mut self) {
        self.building = true;
    }

    /// Abandon the buffer and leave build mode.
    pub fn cancel_build(&mut self) {
        self.build.clear();
        self.building = false;
    }

    /// Append a point to the build buffer (no-op outside build mode).
    pub fn push_build_point(&mut self, point: WorldPoint) {
        if self.building {
            self.build.push(point);
        }
    }

    /// Undo the last action: pop a buffered point, else leave build mode,
    /// else remove the newest wireframe.
    pub fn undo(&mut self) {
        if self.building {
            if self.build.pop().is_none() {
                self.building = false;
            }
        } else {
            self.wireframes.pop();
        }
    }

    // -- finishers ----------------------------------------------------------

    /// Consume the buffer as loose geometry: a single point becomes a
    /// vertex-only wireframe, more become one single-edge wireframe per
    /// consecutive pair. An empty buffer produces nothing.
    pub fn finish_polyline(&mut self) -> Vec<u64> {
        let points = self.take_buffer();
        let mut ids = Vec::new();

        if points.len() == 1 {
            let mut wireframe = Wireframe::new(0, "Point");
            wireframe.vertices.push(points[0]);
            ids.push(self.add(wireframe));
            return ids;
        }

        for pair in points.windows(2) {
            let mut wireframe = Wireframe::new(0, "Line");
            wireframe.vertices = vec![pair[0], pair[1]];
            wireframe.edges = vec![(0, 1)];
            ids.push(self.add(wireframe));
        }
        ids
    }

    /// Consume the buffer as one closed polygon with a single face.
    pub fn finish_polygon(&mut self, fill: Option<Color>) -> Result<u64, SceneError> {
        if self.build.len() < 3 {
            return Err(SceneError::PolygonTooSmall {
                got: self.build.len(),
            });
        }
        let points = self.take_buffer();
        let n = points.len();

        let mut wireframe = Wireframe::new(0, "Polygon");
        wireframe.vertices = points;
        wireframe.edges = (0..n).map(|i| (i, (i + 1) % n)).collect();
        wireframe.faces = vec![Face::new((0..n).collect(), fill)];
        Ok(self.add(wireframe))
    }

    /// Consume the buffer as a curve of the given family, degrading small
    /// buffers per the documented policy (see [`CurveFinish`]).
    pub fn finish_curve(&mut self, kind: CurveKind) -> Result<CurveFinish, SceneError> {
        if self.build.len() < 2 {
            return Err(SceneError::CurveTooSmall {
                got: self.build.len(),
            });
        }
        let points = self.take_buffer();
        let n = points.len();

        if n == 2 {
            let mut wireframe = Wireframe::new(0, "Line");
            wireframe.vertices = points;
            wireframe.edges = vec![(0, 1)];
            return Ok(CurveFinish::Segment {
                id: self.add(wireframe),
            });
        }

        let mut wireframe = Wireframe::new(0, "Curve");
        wireframe.vertices = points;
        if n == 3 {
            let mut curve = Curve::new(CurveKind::Bezier, vec![0, 1, 2]);
            curve.degree = 3;
            wireframe.curves.push(curve);
            return Ok(CurveFinish::Quadratic {
                id: self.add(wireframe),
            });
        }

        wireframe.curves.push(Curve::new(kind, (0..n).collect()));
        Ok(CurveFinish::Full {
            id: self.add(wireframe),
        })
    }

    /// Consume the buffer as an `nu x nv` surface control grid.
    pub fn finish_surface(
        &mut self,
        kind: SurfaceKind,
        algorithm: SurfaceAlgorithm,
        nu: usize,
        nv: usize,
        steps: usize,
    ) -> Result<u64, SceneError> {
        let expected = nu * nv;
        if self.build.len() != expected {
            return Err(SceneError::SurfaceGridMismatch {
                nu,
                nv,
                expected,
                got: self.build.len(),
            });
        }
        let points = self.take_buffer();
        let n = points.len();

        let mut wireframe = Wireframe::new(0, "Surface");
        wireframe.vertices = points;
        let mut surface = Surface::new(kind, algorithm, (0..n).collect(), (nu, nv));
        surface.steps = steps.max(1);
        wireframe.surfaces.push(surface);
        Ok(self.add(wireframe))
    }

    fn take_buffer(&mut self) -> Vec<WorldPoint> {
        self.building = false;
        std::mem::take(&mut self.build)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use filigree_geometry::point::world_point;
    use filigree_geometry::wireframe::WireframeKind;

    fn buffered(points: &[(f64, f64)]) -> Scene {
        let mut scene = Scene::new();
        scene.begin_build();
        for &(x, y) in points {
            scene.push_build_point(world_point(x, y, 0.0));
        }
        scene
    }

    #[test]
    fn ids_are_monotonic_across_removals() {
        let mut scene = Scene::new();
        let a = scene.add(Wireframe::new(0, "a"));
        let b = scene.add(Wireframe::new(0, "b"));
        scene.remove(a);
        let c = scene.add(Wireframe::new(0, "c"));
        assert_eq!((a, b, c), (0, 1, 2));
        assert!(scene.get(a).is_none());
        assert_eq!(scene.get(c).unwrap().name, "c");
    }

    #[test]
    fn removing_an_unknown_id_is_silent() {
        let mut scene = Scene::new();
        scene.add(Wireframe::new(0, "only"));
        scene.remove(999);
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn load_reassigns_ids_by_position() {
        let objects = vec![Wireframe::new(7, "x"), Wireframe::new(7, "y")];
        let scene = Scene::load(objects);
        let ids: Vec<u64> = scene.wireframes().iter().map(|w| w.id).collect();
        assert_eq!(ids, vec![0, 1]);
    }

    #[test]
    fn push_outside_build_mode_is_ignored() {
        let mut scene = Scene::new();
        scene.push_build_point(world_point(1.0, 2.0, 3.0));
        assert!(scene.build_buffer().is_empty());
    }

    #[test]
    fn undo_cascades_through_buffer_mode_and_objects() {
        let mut scene = buffered(&[(0.0, 0.0), (1.0, 1.0)]);
        scene.add(Wireframe::new(0, "existing"));

        scene.undo();
        assert_eq!(scene.build_buffer().len(), 1);
        scene.undo();
        assert!(scene.build_buffer().is_empty());
        assert!(scene.building());

        // Buffer empty: the next undo leaves build mode.
        scene.undo();
        assert!(!scene.building());

        // Not building: undo removes the newest wireframe.
        scene.undo();
        assert!(scene.is_empty());
    }

    #[test]
    fn single_buffered_point_finishes_as_a_point_mark() {
        let mut scene = buffered(&[(2.0, 3.0)]);
        let ids = scene.finish_polyline();
        assert_eq!(ids.len(), 1);
        let wf = scene.get(ids[0]).unwrap();
        assert_eq!(wf.kind(), WireframeKind::Point);
        assert!(!scene.building());
    }

    #[test]
    fn polyline_finishes_as_one_segment_per_pair() {
        let mut scene = buffered(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
        let ids = scene.finish_polyline();
        assert_eq!(ids, vec![0, 1]);
        for id in ids {
            assert_eq!(scene.get(id).unwrap().edges, vec![(0, 1)]);
        }
    }

    #[test]
    fn polygon_needs_three_points() {
        let mut scene = buffered(&[(0.0, 0.0), (1.0, 0.0)]);
        assert_eq!(
            scene.finish_polygon(None),
            Err(SceneError::PolygonTooSmall { got: 2 })
        );
        // The buffer is kept on error so the user can keep adding points.
        assert_eq!(scene.build_buffer().len(), 2);
    }

    #[test]
    fn polygon_closes_its_edge_ring_and_references_all_vertices() {
        let mut scene = buffered(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]);
        let id = scene.finish_polygon(Some("amber".to_owned())).unwrap();
        let wf = scene.get(id).unwrap();
        assert_eq!(wf.edges, vec![(0, 1), (1, 2), (2, 3), (3, 0)]);
        assert_eq!(wf.faces[0].vertices, vec![0, 1, 2, 3]);
        assert_eq!(wf.faces[0].fill.as_deref(), Some("amber"));
    }

    #[test]
    fn curve_finish_degrades_by_buffer_size() {
        let mut scene = buffered(&[(0.0, 0.0)]);
        assert_eq!(
            scene.finish_curve(CurveKind::BSpline),
            Err(SceneError::CurveTooSmall { got: 1 })
        );
        scene.cancel_build();

        let mut scene = buffered(&[(0.0, 0.0), (1.0, 1.0)]);
        assert!(matches!(
            scene.finish_curve(CurveKind::BSpline).unwrap(),
            CurveFinish::Segment { .. }
        ));

        let mut scene = buffered(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0)]);
        let finish = scene.finish_curve(CurveKind::BSpline).unwrap();
        assert!(matches!(finish, CurveFinish::Quadratic { .. }));
        let wf = scene.get(finish.id()).unwrap();
        assert_eq!(wf.curves[0].kind, CurveKind::Bezier);
        assert_eq!(wf.curves[0].degree, 3);

        let mut scene = buffered(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0), (3.0, 1.0)]);
        let finish = scene.finish_curve(CurveKind::BSpline).unwrap();
        assert!(matches!(finish, CurveFinish::Full { .. }));
        let wf = scene.get(finish.id()).unwrap();
        assert_eq!(wf.curves[0].kind, CurveKind::BSpline);
        assert_eq!(wf.curves[0].degree, 4);
    }

    #[test]
    fn surface_finish_requires_an_exact_grid() {
        let mut scene = buffered(&[(0.0, 0.0); 15]);
        assert_eq!(
            scene.finish_surface(
                SurfaceKind::Bezier,
                SurfaceAlgorithm::ForwardDifferences,
                4,
                4,
                10
            ),
            Err(SceneError::SurfaceGridMismatch {
                nu: 4,
                nv: 4,
                expected: 16,
                got: 15
            })
        );

        let mut scene = buffered(&[(0.0, 0.0); 16]);
        let id = scene
            .finish_surface(SurfaceKind::Bezier, SurfaceAlgorithm::ForwardDifferences, 4, 4, 10)
            .unwrap();
        let wf = scene.get(id).unwrap();
        assert_eq!(wf.kind(), WireframeKind::Surface);
        assert_eq!(wf.surfaces[0].degrees, (4, 4));
    }

    #[test]
    fn clear_empties_objects_and_build_state() {
        let mut scene = buffered(&[(0.0, 0.0)]);
        scene.add(Wireframe::new(0, "x"));
        scene.clear();
        assert!(scene.is_empty());
        assert!(scene.build_buffer().is_empty());
        assert!(!scene.building());
    }
}
