//! Affine matrix builders and the polynomial basis matrices.
//!
//! glam carries the vector/matrix arithmetic; this module adds the handful of
//! constructions it does not ship: rotation in the plane of an arbitrary pair
//! of coordinate axes, the cubic Bezier/B-spline basis matrices, and the
//! forward-difference stepping matrix. Matrices with a natural row-wise
//! definition are written as row arrays and transposed into glam's
//! column-major layout.

use glam::{DMat3, DMat4};

/// A 4x4 translation by `(dx, dy, dz)`.
#[inline]
pub fn translation(dx: f64, dy: f64, dz: f64) -> DMat4 {
    DMat4::from_translation(glam::DVec3::new(dx, dy, dz))
}

/// A 4x4 uniform scale about the origin (`w` untouched).
#[inline]
pub fn uniform_scale(factor: f64) -> DMat4 {
    DMat4::from_scale(glam::DVec3::splat(factor))
}

/// A 3x3 rotation by `degrees` in the plane spanned by coordinate axes `a1`
/// and `a2` (`a1 != a2`, both in `0..3`). `(0, 1)` rotates around the z axis,
/// `(0, 2)` around y, `(1, 2)` around x.
pub fn planar_rotation3(degrees: f64, a1: usize, a2: usize) -> DMat3 {
    debug_assert!(a1 < 3 && a2 < 3 && a1 != a2, "invalid axis pair ({a1}, {a2})");
    let (s, c) = degrees.to_radians().sin_cos();
    let mut m = DMat3::IDENTITY;
    // Row a1 gets (c, -s), row a2 gets (s, c), in columns (a1, a2).
    m.col_mut(a1)[a1] = c;
    m.col_mut(a2)[a1] = -s;
    m.col_mut(a1)[a2] = s;
    m.col_mut(a2)[a2] = c;
    m
}

/// The 4x4 homogeneous extension of [`planar_rotation3`].
pub fn planar_rotation4(degrees: f64, a1: usize, a2: usize) -> DMat4 {
    debug_assert!(a1 < 3 && a2 < 3 && a1 != a2, "invalid axis pair ({a1}, {a2})");
    let (s, c) = degrees.to_radians().sin_cos();
    let mut m = DMat4::IDENTITY;
    m.col_mut(a1)[a1] = c;
    m.col_mut(a2)[a1] = -s;
    m.col_mut(a1)[a2] = s;
    m.col_mut(a2)[a2] = c;
    m
}

/// Binomial coefficient `C(n, k)` as a float (Bernstein weights).
pub fn binomial(n: usize, k: usize) -> f64 {
    if k > n {
        return 0.0;
    }
    let k = k.min(n - k);
    let mut result = 1.0;
    for i in 0..k {
        result = result * (n - i) as f64 / (i + 1) as f64;
    }
    result
}

/// Build a `DMat4` from mathematical rows (glam stores columns).
#[inline]
pub(crate) fn mat4_from_rows(rows: [[f64; 4]; 4]) -> DMat4 {
    DMat4::from_cols_array_2d(&rows).transpose()
}

/// The cubic Bezier basis matrix.
pub fn bezier_basis() -> DMat4 {
    mat4_from_rows([
        [-1.0, 3.0, -3.0, 1.0],
        [3.0, -6.0, 3.0, 0.0],
        [-3.0, 3.0, 0.0, 0.0],
        [1.0, 0.0, 0.0, 0.0],
    ])
}

/// The cubic uniform B-spline basis matrix (1/6 scaled).
pub fn bspline_basis() -> DMat4 {
    mat4_from_rows([
        [-1.0, 3.0, -3.0, 1.0],
        [3.0, -6.0, 3.0, 0.0],
        [-3.0, 0.0, 3.0, 0.0],
        [1.0, 4.0, 1.0, 0.0],
    ]) * (1.0 / 6.0)
}

/// The forward-difference stepping matrix for step size `delta`.
///
/// Rows are the value and the first three forward differences of a cubic at
/// `t = 0`; repeated column additions then advance the polynomial by `delta`
/// per step with three additions.
pub fn forward_difference_matrix(delta: f64) -> DMat4 {
    let d2 = delta * delta;
    let d3 = d2 * delta;
    mat4_from_rows([
        [0.0, 0.0, 0.0, 1.0],
        [d3, d2, delta, 0.0],
        [6.0 * d3, 2.0 * d2, 0.0, 0.0],
        [6.0 * d3, 0.0, 0.0, 0.0],
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{DVec3, DVec4};

    #[test]
    fn translation_preserves_w() {
        let p = DVec4::new(1.0, 2.0, 3.0, 1.0);
        let q = translation(5.0, -2.0, 0.5) * p;
        assert_eq!(q, DVec4::new(6.0, 0.0, 3.5, 1.0));
    }

    #[test]
    fn planar_rotation_xy_is_z_rotation() {
        // 90 degrees in the (x, y) plane sends +x to +y.
        let m = planar_rotation3(90.0, 0, 1);
        let v = m * DVec3::X;
        assert!((v - DVec3::Y).length() < 1e-12);
    }

    #[test]
    fn planar_rotation_matches_homogeneous_form() {
        let m3 = planar_rotation3(37.0, 1, 2);
        let m4 = planar_rotation4(37.0, 1, 2);
        let v = DVec3::new(0.3, -1.2, 2.5);
        let a = m3 * v;
        let b = m4 * v.extend(1.0);
        assert!((a.x - b.x).abs() < 1e-12);
        assert!((a.y - b.y).abs() < 1e-12);
        assert!((a.z - b.z).abs() < 1e-12);
        assert_eq!(b.w, 1.0);
    }

    #[test]
    fn binomial_small_values() {
        assert_eq!(binomial(3, 0), 1.0);
        assert_eq!(binomial(3, 1), 3.0);
        assert_eq!(binomial(3, 2), 3.0);
        assert_eq!(binomial(3, 3), 1.0);
        assert_eq!(binomial(2, 5), 0.0);
    }

    #[test]
    fn bspline_basis_rows_sum_to_partition_of_unity() {
        // At t = 0 the basis functions are (1, 4, 1, 0) / 6; they must sum
        // to one for the spline to be affine-invariant.
        let m = bspline_basis();
        let value_row = m.transpose().col(3); // mathematical row 3
        assert!((value_row.x + value_row.y + value_row.z + value_row.w - 1.0).abs() < 1e-12);
    }

    #[test]
    fn forward_difference_matrix_first_row_is_value_at_zero() {
        let d = forward_difference_matrix(0.1);
        // Mathematical row 0 is (0, 0, 0, 1): the cubic's constant term.
        let row0 = d.transpose().col(0);
        assert_eq!(row0, DVec4::new(0.0, 0.0, 0.0, 1.0));
    }
}
