//! Filigree Engine -- viewing, clipping, and frame orchestration for the
//! Filigree wireframe modeler.
//!
//! This crate holds everything between the geometry model and the screen:
//! the [`Window`](window::Window) camera with its projections and coordinate
//! bridges, the [`Clipper`](clipping::Clipper), the [`Scene`](scene::Scene)
//! registry with its interactive build buffer, the per-frame
//! [`Renderer`](render::Renderer) over an abstract [`Canvas`](render::Canvas)
//! sink, and the persisted [`Preferences`](preferences::Preferences).
//!
//! The input event layer and the widget toolkit live outside; they drive
//! this crate by mutating the scene and window and asking for frames.
//!
//! # Quick Start
//!
//! ```
//! use filigree_engine::prelude::*;
//! use filigree_engine::geometry::prelude::*;
//!
//! let mut scene = Scene::new();
//! let mut cube_face = Wireframe::new(0, "quad");
//! cube_face.vertices = vec![
//!     world_point(-20.0, -20.0, 0.0),
//!     world_point(20.0, -20.0, 0.0),
//!     world_point(20.0, 20.0, 0.0),
//!     world_point(-20.0, 20.0, 0.0),
//! ];
//! cube_face.edges = vec![(0, 1), (1, 2), (2, 3), (3, 0)];
//! scene.add(cube_face);
//!
//! let window = Window::with_viewport(800.0, 600.0);
//! let renderer = Renderer::default();
//! let mut canvas = RecordingCanvas::new();
//! renderer.render_frame(&scene, &window, &mut canvas);
//!
//! assert_eq!(canvas.count_lines(), 4);
//! ```

#![deny(unsafe_code)]

pub mod clipping;
pub mod preferences;
pub mod render;
pub mod scene;
pub mod window;

// ---------------------------------------------------------------------------
// Re-exports
// ---------------------------------------------------------------------------

/// Re-export the geometry crate for convenience.
pub use filigree_geometry as geometry;

/// Re-export the object codec for convenience.
pub use filigree_obj as obj;

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

/// Convenience re-exports for common engine usage.
pub mod prelude {
    pub use crate::clipping::{ClipBounds, Clipper, ClippingAlgorithm};
    pub use crate::preferences::Preferences;
    pub use crate::render::{Canvas, DrawCall, RecordingCanvas, RenderSettings, Renderer};
    pub use crate::scene::{CurveFinish, Scene, SceneError};
    pub use crate::window::{Projection, Window, WindowConfig};
}
