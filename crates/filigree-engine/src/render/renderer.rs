//! The frame driver: snapshot, depth-sort, project, clip, emit.
//!
//! The renderer does not own an event loop; the host calls
//! [`Renderer::render_frame`] whenever the scene or the window changed. Each
//! frame works on a defensive copy of the scene's wireframes, so mutations
//! between frames never tear a frame in progress.
//!
//! Per frame:
//!
//! 1. optional debug overlays (world grid, axes cross, viewport border,
//!    camera label);
//! 2. painter's ordering -- wireframes sorted far-to-near by centroid
//!    distance to the window position;
//! 3. per wireframe: project vertices, assemble window objects, clip, draw;
//! 4. the build-buffer overlay in the distinguished build color.
//!
//! A frame never fails: wireframes whose window objects cannot be assembled
//! (stale indices, degree violations) are skipped with a warning.

use filigree_geometry::point::{WindowObject, WindowPoint};
use filigree_geometry::wireframe::Appearance;

use crate::clipping::{Clipper, ClippingAlgorithm};
use crate::render::canvas::Canvas;
use crate::scene::Scene;
use crate::window::Window;

/// World-unit spacing of the debug grid.
const GRID_STEP: f64 = 75.0;

// ---------------------------------------------------------------------------
// RenderSettings
// ---------------------------------------------------------------------------

/// Frame-independent rendering knobs.
#[derive(Debug, Clone)]
pub struct RenderSettings {
    /// Straight segments per curve segment.
    pub curve_steps: usize,
    pub clipping: ClippingAlgorithm,
    /// Draw the world grid, axes, viewport border, and camera label.
    pub debug: bool,
    /// Color of the in-progress build overlay.
    pub build_color: String,
    /// Color of the debug overlays.
    pub debug_color: String,
    /// Color of the debug grid lines.
    pub grid_color: String,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            curve_steps: 100,
            clipping: ClippingAlgorithm::default(),
            debug: false,
            build_color: "red".to_owned(),
            debug_color: "blue".to_owned(),
            grid_color: "gray".to_owned(),
        }
    }
}

// ---------------------------------------------------------------------------
// Renderer
// ---------------------------------------------------------------------------

/// The per-frame render driver. Single-threaded and synchronous.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    pub settings: RenderSettings,
}

impl Renderer {
    pub fn new(settings: RenderSettings) -> Self {
        Self { settings }
    }

    /// Draw one frame of `scene` through `window` onto `canvas`.
    pub fn render_frame(&self, scene: &Scene, window: &Window, canvas: &mut dyn Canvas) {
        let clipper = Clipper::new(window.clip_bounds(), self.settings.clipping);

        if self.settings.debug {
            self.draw_debug_overlays(window, canvas);
        }

        // Defensive copy, then painter's order: farthest first.
        let mut wireframes = scene.wireframes().to_vec();
        wireframes.sort_by(|a, b| {
            b.distance_to(window.position)
                .total_cmp(&a.distance_to(window.position))
        });

        for wireframe in &wireframes {
            let projected = window.project_all(&wireframe.vertices);
            let objects = match wireframe.window_objects(&projected, self.settings.curve_steps) {
                Ok(objects) => objects,
                Err(error) => {
                    tracing::warn!(wireframe = wireframe.id, %error, "skipping undrawable wireframe");
                    continue;
                }
            };
            for object in objects {
                if let Some(visible) = clipper.clip(object) {
                    draw_object(canvas, &visible, &wireframe.appearance);
                }
            }
        }

        self.draw_build_overlay(scene, window, &clipper, canvas);
    }

    /// World grid and axes cross, viewport border, camera position label.
    fn draw_debug_overlays(&self, window: &Window, canvas: &mut dyn Canvas) {
        let reach = (window.width.max(window.height) / crate::window::MIN_ZOOM / 2.0) as i64;
        let step = GRID_STEP as i64;
        let start = -(reach / step) * step;
        let end = reach / step * step;

        let mut k = start;
        while k <= end {
            let at = k as f64;
            let h0 = window.world_to_viewport(glam::DVec4::new(-reach as f64, at, 0.0, 1.0));
            let h1 = window.world_to_viewport(glam::DVec4::new(reach as f64, at, 0.0, 1.0));
            canvas.line(h0, h1, &self.settings.grid_color, 1.0);

            let v0 = window.world_to_viewport(glam::DVec4::new(at, -reach as f64, 0.0, 1.0));
            let v1 = window.world_to_viewport(glam::DVec4::new(at, reach as f64, 0.0, 1.0));
            canvas.line(v0, v1, &self.settings.grid_color, 1.0);
            k += step;
        }

        // Axes cross over the viewport.
        canvas.line(
            WindowPoint::new(0.0, window.height * 0.4),
            WindowPoint::new(window.width, window.height * 0.4),
            &self.settings.debug_color,
            1.0,
        );
        canvas.line(
            WindowPoint::new(window.width * 0.4, 0.0),
            WindowPoint::new(window.width * 0.4, window.height),
            &self.settings.debug_color,
            1.0,
        );

        // Border of the clipping window.
        let b = window.clip_bounds();
        let corners = [
            WindowPoint::new(b.xmin, b.ymin),
            WindowPoint::new(b.xmax, b.ymin),
            WindowPoint::new(b.xmax, b.ymax),
            WindowPoint::new(b.xmin, b.ymax),
        ];
        canvas.polygon(&corners, None, &self.settings.debug_color, 2.0);

        // World origin and camera pose labels.
        let origin = window.world_to_viewport(glam::DVec4::new(0.0, 0.0, 0.0, 1.0));
        canvas.text(
            origin + WindowPoint::new(15.0, -10.0),
            "(0,0)",
            &self.settings.debug_color,
        );
        let p = window.position;
        canvas.text(
            WindowPoint::new(window.padding, window.padding),
            &format!("camera ({:.1}, {:.1}, {:.1})", p.x, p.y, p.z),
            &self.settings.debug_color,
        );
    }

    /// The in-progress build buffer: clipped point marks plus the connecting
    /// polyline, all in the build color.
    fn draw_build_overlay(
        &self,
        scene: &Scene,
        window: &Window,
        clipper: &Clipper,
        canvas: &mut dyn Canvas,
    ) {
        let projected: Vec<WindowPoint> = scene
            .build_buffer()
            .iter()
            .map(|&p| window.world_to_viewport(p))
            .collect();

        for &p in &projected {
            if clipper.bounds.contains(p) {
                canvas.point(p, &self.settings.build_color, 1.0);
            }
        }
        for pair in projected.windows(2) {
            if let Some((start, end)) = clipper.clip_line(pair[0], pair[1]) {
                canvas.line(start, end, &self.settings.build_color, 1.0);
            }
        }
    }
}

/// Forward one clipped object to the canvas with the owning wireframe's
/// appearance.
fn draw_object(canvas: &mut dyn Canvas, object: &WindowObject, appearance: &Appearance) {
    match object {
        WindowObject::Point(p) => {
            canvas.point(*p, &appearance.line_color, appearance.thickness);
        }
        WindowObject::Line { start, end } => {
            canvas.line(*start, *end, &appearance.line_color, appearance.thickness);
        }
        WindowObject::Polygon { points, fill } => {
            canvas.polygon(
                points,
                fill.as_deref(),
                &appearance.line_color,
                appearance.thickness,
            );
        }
        // The clipper never lets a patch grid through; nothing to draw.
        WindowObject::SurfaceGrid { .. } => {}
    }
}
