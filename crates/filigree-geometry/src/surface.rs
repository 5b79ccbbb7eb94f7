//! Bicubic tensor-product surface evaluation: Bezier and B-spline patches,
//! by blending functions or forward differences.
//!
//! A surface references a row-major `nu x nv` control grid (`u` along the
//! outer axis) of the owning wireframe's vertices. Bezier grids decompose
//! into consecutive non-overlapping 4x4 patches; B-spline grids into
//! overlapping 4x4 windows advancing by one. Every patch tessellates to an
//! `(steps + 1) x (steps + 1)` grid whose horizontal and vertical neighbors
//! become line primitives.
//!
//! As with curves, the parameter-domain fields are serialization fidelity
//! only; evaluation covers `[0, 1] x [0, 1]`.

use glam::{DMat4, DVec4};

use crate::point::{WindowObject, WindowPoint};
use crate::transform::{bezier_basis, bspline_basis, forward_difference_matrix, mat4_from_rows};
use crate::GeometryError;

// ---------------------------------------------------------------------------
// SurfaceKind / SurfaceAlgorithm
// ---------------------------------------------------------------------------

/// The supported surface families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum SurfaceKind {
    /// Interpolates patch corner control points.
    #[default]
    Bezier,
    /// Cubic uniform B-spline; approximates the control grid.
    BSpline,
}

impl SurfaceKind {
    /// Parse the type token used by `stype` records.
    pub fn from_obj_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "bezier" => Some(SurfaceKind::Bezier),
            "bspline" => Some(SurfaceKind::BSpline),
            _ => None,
        }
    }

    /// The type token emitted into `stype` records.
    pub fn obj_name(self) -> &'static str {
        match self {
            SurfaceKind::Bezier => "bezier",
            SurfaceKind::BSpline => "bspline",
        }
    }
}

impl std::fmt::Display for SurfaceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SurfaceKind::Bezier => write!(f, "Bézier"),
            SurfaceKind::BSpline => write!(f, "B-Spline"),
        }
    }
}

/// How patch samples are computed. Both algorithms evaluate the same
/// polynomials; forward differences trade the per-sample matrix products for
/// three additions per step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum SurfaceAlgorithm {
    BlendingFunctions,
    #[default]
    ForwardDifferences,
}

impl SurfaceAlgorithm {
    /// Parse the algorithm token of `stype` records.
    pub fn from_obj_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "blending_functions" => Some(SurfaceAlgorithm::BlendingFunctions),
            "forward_differences" => Some(SurfaceAlgorithm::ForwardDifferences),
            _ => None,
        }
    }

    /// The algorithm token emitted into `stype` records.
    pub fn obj_name(self) -> &'static str {
        match self {
            SurfaceAlgorithm::BlendingFunctions => "blending_functions",
            SurfaceAlgorithm::ForwardDifferences => "forward_differences",
        }
    }
}

impl std::fmt::Display for SurfaceAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SurfaceAlgorithm::BlendingFunctions => write!(f, "Blending Functions"),
            SurfaceAlgorithm::ForwardDifferences => write!(f, "Forward Differences"),
        }
    }
}

// ---------------------------------------------------------------------------
// SurfaceDomain
// ---------------------------------------------------------------------------

/// The serialized `(u, v)` parameter ranges of `surf` records. Round-tripped
/// verbatim; not consulted by evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceDomain {
    pub start_u: f64,
    pub end_u: f64,
    pub start_v: f64,
    pub end_v: f64,
}

impl Default for SurfaceDomain {
    fn default() -> Self {
        Self {
            start_u: 0.0,
            end_u: 1.0,
            start_v: 0.0,
            end_v: 1.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Surface
// ---------------------------------------------------------------------------

/// A tensor-product surface over a row-major control grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    pub kind: SurfaceKind,
    pub algorithm: SurfaceAlgorithm,
    /// Indices into the owning wireframe's vertex list, row-major, `u` along
    /// the outer axis. Length must equal `degrees.0 * degrees.1`.
    pub control_points: Vec<usize>,
    /// Control grid extent `(nu, nv)`.
    pub degrees: (usize, usize),
    /// Straight segments per patch per direction.
    pub steps: usize,
    pub domain: SurfaceDomain,
}

impl Surface {
    /// A surface with the default tessellation (10 steps, full domain).
    pub fn new(
        kind: SurfaceKind,
        algorithm: SurfaceAlgorithm,
        control_points: Vec<usize>,
        degrees: (usize, usize),
    ) -> Self {
        Self {
            kind,
            algorithm,
            control_points,
            degrees,
            steps: 10,
            domain: SurfaceDomain::default(),
        }
    }

    /// Tessellate every patch into an `(steps + 1) x (steps + 1)` sample
    /// grid (row index follows `u`).
    pub fn patch_grids(
        &self,
        control: &[WindowPoint],
    ) -> Result<Vec<Vec<Vec<WindowPoint>>>, GeometryError> {
        let (nu, nv) = self.degrees;
        if control.len() != nu * nv {
            return Err(GeometryError::DegreeConstraint {
                detail: format!(
                    "control grid expects {} points ({nu}x{nv}), got {}",
                    nu * nv,
                    control.len()
                ),
            });
        }

        // Patch windowing per family: Bezier tiles the grid in 4x4 blocks,
        // B-spline slides a 4x4 window by one in each direction.
        let (patches_u, patches_v, patch_step) = match self.kind {
            SurfaceKind::Bezier => {
                if nu == 0 || nv == 0 || nu % 4 != 0 || nv % 4 != 0 {
                    return Err(GeometryError::DegreeConstraint {
                        detail: format!(
                            "Bézier patches require positive multiples of 4 control points \
                             per direction, got {nu}x{nv}"
                        ),
                    });
                }
                (nu / 4, nv / 4, 4)
            }
            SurfaceKind::BSpline => {
                if nu < 4 || nv < 4 {
                    return Err(GeometryError::DegreeConstraint {
                        detail: format!(
                            "B-spline patches require at least 4 control points per \
                             direction, got {nu}x{nv}"
                        ),
                    });
                }
                (nu - 3, nv - 3, 1)
            }
        };

        let basis = match self.kind {
            SurfaceKind::Bezier => bezier_basis(),
            SurfaceKind::BSpline => bspline_basis(),
        };
        let steps = self.steps.max(1);

        let mut grids = Vec::with_capacity(patches_u * patches_v);
        for pu in 0..patches_u {
            for pv in 0..patches_v {
                let (gx, gy) = patch_geometry(control, nv, pu * patch_step, pv * patch_step);
                let cx = basis * gx * basis.transpose();
                let cy = basis * gy * basis.transpose();

                let grid = match self.algorithm {
                    SurfaceAlgorithm::BlendingFunctions => blend_patch(cx, cy, steps),
                    SurfaceAlgorithm::ForwardDifferences => forward_difference_patch(cx, cy, steps),
                };
                grids.push(grid);
            }
        }
        Ok(grids)
    }

    /// The line primitives tracing every patch grid (horizontal and vertical
    /// neighbors).
    pub fn window_objects(
        &self,
        control: &[WindowPoint],
    ) -> Result<Vec<WindowObject>, GeometryError> {
        let mut lines = Vec::new();
        for grid in self.patch_grids(control)? {
            let rows = grid.len();
            let cols = grid.first().map_or(0, Vec::len);
            for i in 0..rows {
                for j in 0..cols.saturating_sub(1) {
                    lines.push(WindowObject::Line {
                        start: grid[i][j],
                        end: grid[i][j + 1],
                    });
                }
            }
            for j in 0..cols {
                for i in 0..rows.saturating_sub(1) {
                    lines.push(WindowObject::Line {
                        start: grid[i][j],
                        end: grid[i + 1][j],
                    });
                }
            }
        }
        Ok(lines)
    }
}

/// Extract the 4x4 geometry matrices (x and y separately) of the patch whose
/// top-left control point sits at grid position `(u0, v0)`.
fn patch_geometry(
    control: &[WindowPoint],
    nv: usize,
    u0: usize,
    v0: usize,
) -> (DMat4, DMat4) {
    let mut rows_x = [[0.0; 4]; 4];
    let mut rows_y = [[0.0; 4]; 4];
    for (r, (row_x, row_y)) in rows_x.iter_mut().zip(rows_y.iter_mut()).enumerate() {
        for c in 0..4 {
            let p = control[(u0 + r) * nv + (v0 + c)];
            row_x[c] = p.x;
            row_y[c] = p.y;
        }
    }
    (mat4_from_rows(rows_x), mat4_from_rows(rows_y))
}

/// Direct evaluation: `[u^3 u^2 u 1] . C . [v^3 v^2 v 1]^T` per sample.
fn blend_patch(cx: DMat4, cy: DMat4, steps: usize) -> Vec<Vec<WindowPoint>> {
    let step_size = 1.0 / steps as f64;
    let mut grid = Vec::with_capacity(steps + 1);
    for i in 0..=steps {
        let u = i as f64 * step_size;
        let u_vec = DVec4::new(u * u * u, u * u, u, 1.0);
        let mut row = Vec::with_capacity(steps + 1);
        for j in 0..=steps {
            let v = j as f64 * step_size;
            let v_vec = DVec4::new(v * v * v, v * v, v, 1.0);
            row.push(WindowPoint::new(
                u_vec.dot(cx * v_vec),
                u_vec.dot(cy * v_vec),
            ));
        }
        grid.push(row);
    }
    grid
}

/// Incremental evaluation: `F = D . C . D^T` seeds rows of forward
/// differences; three column additions advance `u`, three component
/// additions advance `v`.
fn forward_difference_patch(cx: DMat4, cy: DMat4, steps: usize) -> Vec<Vec<WindowPoint>> {
    let d = forward_difference_matrix(1.0 / steps as f64);
    let mut fx = d * cx * d.transpose();
    let mut fy = d * cy * d.transpose();

    let mut grid = Vec::with_capacity(steps + 1);
    for i in 0..=steps {
        let mut row_x = fx.x_axis;
        let mut row_y = fy.x_axis;
        let mut row = Vec::with_capacity(steps + 1);
        for _ in 0..=steps {
            row.push(WindowPoint::new(row_x.x, row_y.x));

            row_x.x += row_x.y;
            row_x.y += row_x.z;
            row_x.z += row_x.w;
            row_y.x += row_y.y;
            row_y.y += row_y.z;
            row_y.z += row_y.w;
        }
        grid.push(row);

        if i < steps {
            fx.x_axis += fx.y_axis;
            fx.y_axis += fx.z_axis;
            fx.z_axis += fx.w_axis;
            fy.x_axis += fy.y_axis;
            fy.y_axis += fy.z_axis;
            fy.z_axis += fy.w_axis;
        }
    }
    grid
}
