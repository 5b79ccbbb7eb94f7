//! The window: a virtual camera over the world and the coordinate bridge
//! between world, window-plane, and viewport spaces.
//!
//! The window owns a world pose (`position` plus the orthonormal
//! `right`/`up`/`normal` triple), a projection mode, and the viewport
//! mapping parameters (zoom, pan, padding). World points project onto the
//! plane through `position` with normal `normal`; window coordinates are the
//! projections' components along `right` and `up`.
//!
//! Invariant kept by every navigation operation: `right`, `up`, `normal`
//! stay mutually orthogonal unit vectors, with `normal = up x right`.

use filigree_geometry::point::{WindowPoint, WorldPoint};
use filigree_geometry::transform::planar_rotation3;
use glam::{DMat3, DVec3};

/// Zoom bounds shared by all windows.
pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 100.0;

/// Distance from the window position to the derived center of projection.
const FOCUS_DISTANCE: f64 = 1000.0;

// ---------------------------------------------------------------------------
// Projection
// ---------------------------------------------------------------------------

/// How world points land on the window plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum Projection {
    /// Orthogonal projection along the plane normal.
    #[default]
    Parallel,
    /// One-point perspective through the focus (center of projection).
    Perspective,
}

// ---------------------------------------------------------------------------
// WindowConfig
// ---------------------------------------------------------------------------

/// Construction parameters for a [`Window`].
#[derive(Debug, Clone)]
pub struct WindowConfig {
    /// Viewport size in pixels.
    pub width: f64,
    pub height: f64,
    pub position: DVec3,
    /// View plane normal (normalized on construction).
    pub normal: DVec3,
    /// Center of projection for perspective; informational for parallel.
    pub focus: DVec3,
    /// Up hint; the actual `up` is re-orthogonalized against the normal.
    pub up: DVec3,
    pub movement_speed: f64,
    pub rotation_speed: f64,
    pub zoom: f64,
    pub projection: Projection,
    /// Inset of the clipping window inside the viewport, in pixels.
    pub padding: f64,
}

impl Default for WindowConfig {
    /// The canonical pose: looking down -z from `(0, 0, 100)`.
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            position: DVec3::new(0.0, 0.0, 100.0),
            normal: DVec3::new(0.0, 0.0, -1.0),
            focus: DVec3::new(0.0, 0.0, 100.0 + FOCUS_DISTANCE),
            up: DVec3::Y,
            movement_speed: 10.0,
            rotation_speed: 5.0,
            zoom: 1.0,
            projection: Projection::Parallel,
            padding: 15.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Window
// ---------------------------------------------------------------------------

/// The camera and its viewport mapping.
#[derive(Debug, Clone)]
pub struct Window {
    pub width: f64,
    pub height: f64,
    pub position: DVec3,
    pub normal: DVec3,
    pub focus: DVec3,
    pub right: DVec3,
    pub up: DVec3,
    pub movement_speed: f64,
    pub rotation_speed: f64,
    pub zoom: f64,
    pub projection: Projection,
    pub padding: f64,
    /// 2D pan on the window plane, applied after projection and before the
    /// zoom scaling.
    pub window_focus: WindowPoint,
    /// Viewport center in pixels; window-plane origin maps here.
    pub viewport_center: WindowPoint,
}

impl Window {
    pub fn new(config: WindowConfig) -> Self {
        let normal = config.normal.normalize_or_zero();
        // Degenerate up hint (parallel or anti-parallel to the normal) falls
        // back to the canonical basis.
        let cross = normal.cross(config.up);
        let (right, up) = if cross.length_squared() < 1e-12 {
            (DVec3::X, DVec3::Y)
        } else {
            let right = cross.normalize();
            (right, right.cross(normal).normalize())
        };

        Self {
            width: config.width,
            height: config.height,
            position: config.position,
            normal,
            focus: config.focus,
            right,
            up,
            movement_speed: config.movement_speed,
            rotation_speed: config.rotation_speed,
            zoom: config.zoom.clamp(MIN_ZOOM, MAX_ZOOM),
            projection: config.projection,
            padding: config.padding,
            window_focus: WindowPoint::ZERO,
            viewport_center: WindowPoint::new(config.width / 2.0, config.height / 2.0),
        }
    }

    /// A window in the canonical pose over a `width x height` viewport.
    pub fn with_viewport(width: f64, height: f64) -> Self {
        Self::new(WindowConfig {
            width,
            height,
            ..WindowConfig::default()
        })
    }

    // -- navigation ---------------------------------------------------------

    /// Step size of the flat (world-axis) moves; never less than one world
    /// unit so high zoom cannot freeze the camera.
    fn flat_step(&self) -> f64 {
        (self.movement_speed / self.zoom).max(1.0)
    }

    pub fn move_up(&mut self) {
        self.position.y += self.flat_step();
    }

    pub fn move_down(&mut self) {
        self.position.y -= self.flat_step();
    }

    pub fn move_left(&mut self) {
        self.position.x -= self.flat_step();
    }

    pub fn move_right(&mut self) {
        self.position.x += self.flat_step();
    }

    pub fn move_above(&mut self) {
        self.position.z += self.flat_step();
    }

    pub fn move_below(&mut self) {
        self.position.z -= self.flat_step();
    }

    pub fn move_forward(&mut self) {
        self.position += self.normal * self.movement_speed;
    }

    pub fn move_backward(&mut self) {
        self.position -= self.normal * self.movement_speed;
    }

    pub fn move_sideways_left(&mut self) {
        self.position += self.right * self.movement_speed;
    }

    pub fn move_sideways_right(&mut self) {
        self.position -= self.right * self.movement_speed;
    }

    pub fn move_upward(&mut self) {
        self.position += self.up * self.movement_speed;
    }

    pub fn move_downward(&mut self) {
        self.position -= self.up * self.movement_speed;
    }

    /// Rotate the camera basis by `degrees` in the plane of world axes
    /// `(a1, a2)`. The normal is rebuilt from the rotated pair, keeping the
    /// triple orthonormal; the focus follows the normal.
    pub fn rotate(&mut self, degrees: f64, a1: usize, a2: usize) {
        let m: DMat3 = planar_rotation3(degrees, a1, a2);
        self.right = m * self.right;
        self.up = m * self.up;
        self.normal = self.up.cross(self.right);
        self.focus = self.position - self.normal * FOCUS_DISTANCE;
    }

    /// Rotate by the configured rotation speed.
    pub fn rotate_default(&mut self, a1: usize, a2: usize) {
        self.rotate(self.rotation_speed, a1, a2);
    }

    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom * 1.1).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = (self.zoom / 1.1).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Reset to the canonical pose.
    pub fn recenter(&mut self) {
        self.position = DVec3::new(0.0, 0.0, 100.0);
        self.normal = DVec3::new(0.0, 0.0, -1.0);
        self.focus = self.position - self.normal * FOCUS_DISTANCE;
        self.right = DVec3::X;
        self.up = DVec3::Y;
        self.zoom = 1.0;
        self.window_focus = WindowPoint::ZERO;
        self.viewport_center = WindowPoint::new(self.width / 2.0, self.height / 2.0);
    }

    // -- projection ---------------------------------------------------------

    /// Project a world point onto the window plane.
    pub fn project(&self, point: WorldPoint) -> WindowPoint {
        match self.projection {
            Projection::Parallel => self.parallel_projection(point),
            Projection::Perspective => self.perspective_projection(point),
        }
    }

    fn parallel_projection(&self, point: WorldPoint) -> WindowPoint {
        let p = point.truncate();
        let t = self.normal.dot(self.position - p) / self.normal.dot(self.normal);
        let on_plane = p + self.normal * t;
        let v = on_plane - self.position;
        WindowPoint::new(v.dot(self.right), v.dot(self.up))
    }

    /// One-point perspective via the 3x3 solve
    /// `[right | up | p - focus] . x = focus - position`; the window
    /// coordinates are the first two components of the solution.
    ///
    /// Degenerate configurations (singular matrix, or the view ray parallel
    /// to the plane) return the infinite sentinel, which the clipper
    /// rejects.
    fn perspective_projection(&self, point: WorldPoint) -> WindowPoint {
        let p = point.truncate();
        let m = DMat3::from_cols(self.right, self.up, p - self.focus);
        let r = self.focus - self.position;

        if m.determinant() == 0.0 || self.normal.dot(r) == 0.0 {
            return WindowPoint::new(f64::INFINITY, f64::INFINITY);
        }

        let solution = m.inverse() * r;
        WindowPoint::new(solution.x, solution.y)
    }

    // -- coordinate bridges -------------------------------------------------

    /// Window plane -> viewport pixels: pan, zoom, center, and the vertical
    /// flip onto the top-left-origin raster.
    pub fn window_to_viewport(&self, point: WindowPoint) -> WindowPoint {
        let scaled = (point + self.window_focus) * self.zoom + self.viewport_center;
        WindowPoint::new(scaled.x, self.height - scaled.y)
    }

    /// Inverse of [`window_to_viewport`](Self::window_to_viewport).
    pub fn viewport_to_window(&self, x: f64, y: f64) -> WindowPoint {
        let y = self.height - y;
        WindowPoint::new(
            (x - self.viewport_center.x) / self.zoom - self.window_focus.x,
            (y - self.viewport_center.y) / self.zoom - self.window_focus.y,
        )
    }

    /// Full pipeline: projection plus viewport mapping.
    pub fn world_to_viewport(&self, point: WorldPoint) -> WindowPoint {
        self.window_to_viewport(self.project(point))
    }

    /// Project a whole vertex list to viewport coordinates.
    pub fn project_all(&self, points: &[WorldPoint]) -> Vec<WindowPoint> {
        points.iter().map(|&p| self.world_to_viewport(p)).collect()
    }

    /// A window-plane coordinate lifted back into world space, on the plane
    /// through the camera position.
    pub fn window_to_world(&self, point: WindowPoint) -> WorldPoint {
        (self.position + self.right * point.x + self.up * point.y).extend(1.0)
    }

    pub fn viewport_to_world(&self, x: f64, y: f64) -> WorldPoint {
        self.window_to_world(self.viewport_to_window(x, y))
    }

    /// Whether a viewport coordinate falls inside the padded clip window.
    pub fn click_in_window(&self, x: f64, y: f64) -> bool {
        x >= self.padding
            && x <= self.width - self.padding
            && y >= self.padding
            && y <= self.height - self.padding
    }

    /// The padded clipping rectangle, in viewport coordinates.
    pub fn clip_bounds(&self) -> crate::clipping::ClipBounds {
        crate::clipping::ClipBounds::new(
            self.padding,
            self.padding,
            self.width - self.padding,
            self.height - self.padding,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use filigree_geometry::point::world_point;

    fn canonical(width: f64, height: f64) -> Window {
        Window::with_viewport(width, height)
    }

    fn assert_orthonormal(w: &Window) {
        assert!(w.right.dot(w.up).abs() < 1e-6);
        assert!(w.right.dot(w.normal).abs() < 1e-6);
        assert!(w.up.dot(w.normal).abs() < 1e-6);
        assert!((w.right.length() - 1.0).abs() < 1e-6);
        assert!((w.up.length() - 1.0).abs() < 1e-6);
        assert!((w.normal.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn canonical_pose_parallel_projection() {
        // Camera at (0, 0, 100) looking down -z: the world xy-plane maps
        // straight through.
        let w = canonical(800.0, 600.0);
        let projected = w.project(world_point(25.0, 40.0, 0.0));
        assert!((projected - WindowPoint::new(25.0, 40.0)).length() < 1e-9);

        let viewport = w.world_to_viewport(world_point(25.0, 40.0, 0.0));
        assert!((viewport - WindowPoint::new(25.0 + 400.0, 600.0 - (40.0 + 300.0))).length() < 1e-9);

        let world = w.viewport_to_world(viewport.x, viewport.y);
        assert!((world.x - 25.0).abs() < 1e-9);
        assert!((world.y - 40.0).abs() < 1e-9);
        assert_eq!(world.w, 1.0);
    }

    #[test]
    fn parallel_projection_of_on_plane_points_uses_the_basis() {
        let mut w = canonical(800.0, 600.0);
        w.rotate(30.0, 0, 2);
        let point = w.position + w.right * 7.0 + w.up * -3.0;
        let projected = w.project(point.extend(1.0));
        assert!((projected - WindowPoint::new(7.0, -3.0)).length() < 1e-9);
    }

    #[test]
    fn viewport_round_trip_with_pan_and_zoom() {
        let mut w = canonical(640.0, 480.0);
        w.window_focus = WindowPoint::new(12.5, -40.0);
        w.zoom = 2.5;
        for (x, y) in [(0.0, 0.0), (320.0, 240.0), (17.0, 433.0), (640.0, 480.0)] {
            let p = w.window_to_viewport(w.viewport_to_window(x, y));
            assert!((p - WindowPoint::new(x, y)).length() < 1e-9, "({x}, {y}) -> {p:?}");
        }
    }

    #[test]
    fn rotation_preserves_orthonormality() {
        let mut w = canonical(800.0, 600.0);
        for _ in 0..5 {
            w.rotate(37.0, 1, 2);
        }
        assert_orthonormal(&w);
    }

    #[test]
    fn mixed_navigation_preserves_orthonormality() {
        let mut w = canonical(800.0, 600.0);
        w.rotate(13.0, 0, 1);
        w.move_forward();
        w.rotate(-41.0, 0, 2);
        w.move_sideways_left();
        w.rotate(97.0, 1, 2);
        w.move_upward();
        w.zoom_in();
        assert_orthonormal(&w);
    }

    #[test]
    fn zoom_is_clamped() {
        let mut w = canonical(800.0, 600.0);
        for _ in 0..200 {
            w.zoom_in();
        }
        assert!(w.zoom <= MAX_ZOOM);
        for _ in 0..400 {
            w.zoom_out();
        }
        assert!(w.zoom >= MIN_ZOOM);
    }

    #[test]
    fn flat_moves_never_stall_at_high_zoom() {
        let mut w = canonical(800.0, 600.0);
        w.zoom = 50.0;
        let before = w.position;
        w.move_up();
        assert!((w.position.y - before.y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn recenter_restores_the_canonical_pose() {
        let mut w = canonical(800.0, 600.0);
        w.move_forward();
        w.rotate(45.0, 0, 2);
        w.zoom_in();
        w.window_focus = WindowPoint::new(5.0, 5.0);

        w.recenter();
        assert_eq!(w.position, DVec3::new(0.0, 0.0, 100.0));
        assert_eq!(w.normal, DVec3::new(0.0, 0.0, -1.0));
        assert_eq!(w.right, DVec3::X);
        assert_eq!(w.up, DVec3::Y);
        assert_eq!(w.zoom, 1.0);
        assert_eq!(w.window_focus, WindowPoint::ZERO);
    }

    #[test]
    fn degenerate_up_hint_falls_back_to_canonical_basis() {
        let w = Window::new(WindowConfig {
            normal: DVec3::Y,
            up: DVec3::Y,
            ..WindowConfig::default()
        });
        assert_eq!(w.right, DVec3::X);
        assert_eq!(w.up, DVec3::Y);
    }

    #[test]
    fn perspective_matches_parallel_on_the_plane_at_canonical_pose() {
        let mut w = canonical(800.0, 600.0);
        w.projection = Projection::Perspective;
        w.focus = w.position - w.normal * 1000.0;

        // A point on the window plane itself projects to its in-plane
        // coordinates under both projections.
        let p = world_point(25.0, 40.0, 100.0);
        let perspective = w.project(p);
        assert!((perspective - WindowPoint::new(25.0, 40.0)).length() < 1e-9);
    }

    #[test]
    fn perspective_degeneracy_yields_the_infinite_sentinel() {
        let mut w = canonical(800.0, 600.0);
        w.projection = Projection::Perspective;
        // The point of projection itself makes the third column zero.
        let projected = w.project(w.focus.extend(1.0));
        assert!(projected.x.is_infinite() && projected.y.is_infinite());
    }

    #[test]
    fn click_predicate_respects_padding() {
        let w = canonical(800.0, 600.0);
        assert!(w.click_in_window(15.0, 15.0));
        assert!(w.click_in_window(400.0, 300.0));
        assert!(!w.click_in_window(5.0, 300.0));
        assert!(!w.click_in_window(790.0, 300.0));
    }
}
