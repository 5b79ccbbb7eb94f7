//! Persisted user preferences.
//!
//! A flat key-value record stored as JSON under a `user_preferences` key, so
//! the settings file can host sibling sections without being clobbered on
//! save. Missing files and unreadable documents fall back to defaults with a
//! warning -- preferences are never load-bearing.

use std::path::Path;

use filigree_geometry::curve::CurveKind;
use filigree_geometry::surface::SurfaceKind;
use serde::{Deserialize, Serialize};

use crate::clipping::ClippingAlgorithm;
use crate::render::RenderSettings;
use crate::window::{Window, WindowConfig};

/// The key the record lives under inside the settings document.
const DOCUMENT_KEY: &str = "user_preferences";

// ---------------------------------------------------------------------------
// Preferences
// ---------------------------------------------------------------------------

/// The persisted state record. Enum-valued settings are stored as small
/// integers to keep the on-disk schema stable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub window_position: [f64; 3],
    pub window_normal: [f64; 3],
    pub window_focus: [f64; 3],
    pub window_up: [f64; 3],
    pub window_zoom: f64,
    /// 0 = Cohen-Sutherland, 1 = Liang-Barsky.
    pub line_clipping_algorithm: u8,
    /// 0 = Bezier, 1 = B-spline.
    pub curve_type: u8,
    /// Straight segments per curve segment.
    pub curve_coefficient: usize,
    /// 0 = Bezier, 1 = B-spline.
    pub surface_type: u8,
    /// Straight segments per patch per direction.
    pub surface_degree: usize,
    pub debug: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            window_position: [0.0, 0.0, 100.0],
            window_normal: [0.0, 0.0, -1.0],
            window_focus: [0.0, 0.0, 1100.0],
            window_up: [0.0, 1.0, 0.0],
            window_zoom: 1.0,
            line_clipping_algorithm: 0,
            curve_type: 0,
            curve_coefficient: 100,
            surface_type: 0,
            surface_degree: 10,
            debug: false,
        }
    }
}

impl Preferences {
    /// Load from a settings document. Any failure (missing file, bad JSON,
    /// missing key) logs and returns the defaults.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "preferences not loaded; using defaults");
                return Self::default();
            }
        };
        let document: serde_json::Value = match serde_json::from_str(&text) {
            Ok(document) => document,
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "preferences unreadable; using defaults");
                return Self::default();
            }
        };
        match document.get(DOCUMENT_KEY) {
            Some(record) => serde_json::from_value(record.clone()).unwrap_or_else(|error| {
                tracing::warn!(path = %path.display(), %error, "preferences malformed; using defaults");
                Self::default()
            }),
            None => Self::default(),
        }
    }

    /// Save into a settings document, preserving sibling keys.
    pub fn save(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let path = path.as_ref();
        let mut document: serde_json::Value = std::fs::read_to_string(path)
            .ok()
            .and_then(|text| serde_json::from_str(&text).ok())
            .filter(serde_json::Value::is_object)
            .unwrap_or_else(|| serde_json::json!({}));

        let record = serde_json::to_value(self).expect("preferences are always serializable");
        document[DOCUMENT_KEY] = record;

        let text = serde_json::to_string_pretty(&document).expect("document is always serializable");
        std::fs::write(path, text)
    }

    // -- typed views --------------------------------------------------------

    pub fn clipping_algorithm(&self) -> ClippingAlgorithm {
        ClippingAlgorithm::from_index(self.line_clipping_algorithm).unwrap_or_default()
    }

    pub fn curve_kind(&self) -> CurveKind {
        match self.curve_type {
            1 => CurveKind::BSpline,
            _ => CurveKind::Bezier,
        }
    }

    pub fn surface_kind(&self) -> SurfaceKind {
        match self.surface_type {
            1 => SurfaceKind::BSpline,
            _ => SurfaceKind::Bezier,
        }
    }

    /// A window in the persisted pose over the given viewport.
    pub fn window(&self, width: f64, height: f64) -> Window {
        let v = |a: [f64; 3]| glam::DVec3::new(a[0], a[1], a[2]);
        Window::new(WindowConfig {
            width,
            height,
            position: v(self.window_position),
            normal: v(self.window_normal),
            focus: v(self.window_focus),
            up: v(self.window_up),
            zoom: self.window_zoom,
            ..WindowConfig::default()
        })
    }

    /// Render settings derived from the record.
    pub fn render_settings(&self) -> RenderSettings {
        RenderSettings {
            curve_steps: self.curve_coefficient.max(1),
            clipping: self.clipping_algorithm(),
            debug: self.debug,
            ..RenderSettings::default()
        }
    }

    /// Capture the window pose back into the record before saving.
    pub fn capture_window(&mut self, window: &Window) {
        self.window_position = window.position.to_array();
        self.window_normal = window.normal.to_array();
        self.window_focus = window.focus.to_array();
        self.window_up = window.up.to_array();
        self.window_zoom = window.zoom;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_canonical_window() {
        let prefs = Preferences::default();
        let window = prefs.window(800.0, 600.0);
        assert_eq!(window.position, glam::DVec3::new(0.0, 0.0, 100.0));
        assert_eq!(window.normal, glam::DVec3::new(0.0, 0.0, -1.0));
        assert_eq!(window.zoom, 1.0);
        assert_eq!(prefs.clipping_algorithm(), ClippingAlgorithm::CohenSutherland);
        assert_eq!(prefs.curve_kind(), CurveKind::Bezier);
    }

    #[test]
    fn save_then_load_round_trips_and_preserves_siblings() {
        let dir = std::env::temp_dir().join("filigree-prefs-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("settings.json");
        std::fs::write(&path, r#"{"other_section": {"keep": true}}"#).unwrap();

        let mut prefs = Preferences::default();
        prefs.window_zoom = 2.5;
        prefs.curve_type = 1;
        prefs.debug = true;
        prefs.save(&path).unwrap();

        let loaded = Preferences::load(&path);
        assert_eq!(loaded, prefs);

        let document: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(document["other_section"]["keep"], serde_json::json!(true));

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let prefs = Preferences::load("/nonexistent/filigree/settings.json");
        assert_eq!(prefs, Preferences::default());
    }

    #[test]
    fn capture_window_round_trips_the_pose() {
        let mut window = Window::with_viewport(800.0, 600.0);
        window.rotate(25.0, 0, 2);
        window.move_forward();
        window.zoom = 3.0;

        let mut prefs = Preferences::default();
        prefs.capture_window(&window);
        let restored = prefs.window(800.0, 600.0);

        assert!((restored.position - window.position).length() < 1e-9);
        assert!((restored.normal - window.normal).length() < 1e-9);
        assert_eq!(restored.zoom, 3.0);
    }
}
