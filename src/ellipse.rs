//! Direct algebraic ellipse (2D) and ellipsoid (3D) fitting.

use nalgebra::{DMatrix, DVector, Matrix3, SymmetricEigen, Vector3};

use crate::component::Component;
use crate::error::FitError;

/// A fitted 2D ellipse: center, semi-axes (unordered, as produced by the
/// fit), orientation in radians, and the full 6-term conic
/// `(a, b, c, d, e, f)` satisfying `a*x^2 + b*xy + c*y^2 + d*x + e*y + f = 0`.
#[derive(Debug, Clone, Copy)]
pub struct Ellipse2d {
    /// Ellipse center, in the component's original (uncentered) coordinates.
    pub center: (f64, f64),
    /// The two semi-axis lengths, in no particular order.
    pub radii: (f64, f64),
    /// Orientation of the first semi-axis, in radians.
    pub orientation: f64,
    /// The full conic `(a, b, c, d, e, f)`.
    pub conic: (f64, f64, f64, f64, f64, f64),
}

/// A fitted 3D ellipsoid: center, three radii, and the corresponding
/// principal axes (unit vectors, one per radius, same order).
#[derive(Debug, Clone)]
pub struct Ellipsoid3d {
    /// Ellipsoid center.
    pub center: (f64, f64, f64),
    /// The three radii, in no particular order.
    pub radii: (f64, f64, f64),
    /// Principal axes (unit vectors), one per radius, same order as `radii`.
    pub axes: [(f64, f64, f64); 3],
}

/// Fits a 2D ellipse to the `(x, y)` projection of a component's points
/// (Fitzgibbon's direct least-squares method).
///
/// Requires at least 6 points. Returns [`FitError::TooFewPoints`] or
/// [`FitError::DegenerateShape`] on failure; callers that want a NaN-radii
/// sentinel instead of an error should go through [`fit_ellipse_2d_or_nan`].
pub fn fit_ellipse_2d(cc: &Component) -> Result<Ellipse2d, FitError> {
    let points: Vec<(f64, f64)> = cc.points().iter().map(|&(x, y, _)| (x as f64, y as f64)).collect();
    fit_ellipse_2d_points(&points)
}

/// Same as [`fit_ellipse_2d`], but swallows both failure modes into a
/// result carrying `NaN` for every numeric field, so a caller assembling a
/// batch of descriptors never has to abort on one degenerate component.
pub fn fit_ellipse_2d_or_nan(cc: &Component) -> Ellipse2d {
    fit_ellipse_2d(cc).unwrap_or(Ellipse2d {
        center: (f64::NAN, f64::NAN),
        radii: (f64::NAN, f64::NAN),
        orientation: f64::NAN,
        conic: (f64::NAN, f64::NAN, f64::NAN, f64::NAN, f64::NAN, f64::NAN),
    })
}

fn fit_ellipse_2d_points(points: &[(f64, f64)]) -> Result<Ellipse2d, FitError> {
    let n = points.len();
    if n < 6 {
        return Err(FitError::TooFewPoints);
    }

    let mx = points.iter().map(|p| p.0).sum::<f64>() / n as f64;
    let my = points.iter().map(|p| p.1).sum::<f64>() / n as f64;

    let mut d1 = DMatrix::<f64>::zeros(n, 3);
    let mut d2 = DMatrix::<f64>::zeros(n, 3);
    for (i, &(x, y)) in points.iter().enumerate() {
        let (x, y) = (x - mx, y - my);
        d1[(i, 0)] = x * x;
        d1[(i, 1)] = x * y;
        d1[(i, 2)] = y * y;
        d2[(i, 0)] = x;
        d2[(i, 1)] = y;
        d2[(i, 2)] = 1.0;
    }

    let s1 = d1.transpose() * &d1;
    let s2 = d1.transpose() * &d2;
    let s3 = d2.transpose() * &d2;

    let s3_inv = s3.try_inverse().ok_or(FitError::DegenerateShape)?;
    let t = -&s3_inv * s2.transpose();
    let m = s1 + &s2 * &t;

    // N = [M2/2; -M1; M0/2] (0-indexed rows of M).
    let n_mat = Matrix3::new(
        m[(2, 0)] / 2.0,
        m[(2, 1)] / 2.0,
        m[(2, 2)] / 2.0,
        -m[(1, 0)],
        -m[(1, 1)],
        -m[(1, 2)],
        m[(0, 0)] / 2.0,
        m[(0, 1)] / 2.0,
        m[(0, 2)] / 2.0,
    );

    let a1 = select_ellipse_eigenvector(&n_mat).ok_or(FitError::DegenerateShape)?;
    let a2 = &t * Vector3::new(a1.x, a1.y, a1.z);

    // Conic in centered coordinates: A u^2 + B uv + C v^2 + D u + E v + F.
    // `a2` comes out of a `DMatrix` product, so it's a `DVector` here —
    // index rather than the `.x`/`.y`/`.z` field accessors `Vector3` has.
    let (ca, cb, cc_, cd, ce, cf) = (a1.x, a1.y, a1.z, a2[0], a2[1], a2[2]);

    // Undo the centering shift (u = x - mx, v = y - my).
    let a = ca;
    let b = cb;
    let c = cc_;
    let d = cd - 2.0 * ca * mx - cb * my;
    let e = ce - 2.0 * cc_ * my - cb * mx;
    let f = ca * mx * mx + cb * mx * my + cc_ * my * my - cd * mx - ce * my + cf;

    // Geometric parameters use the half-coefficient convention from spec
    // §4.3: (a, b/2, c, d/2, f/2, g) against A x^2 + B xy + C y^2 + D x + E y + F.
    let (ga, gb, gc, gd, gf, gg) = (a, b / 2.0, c, d / 2.0, e / 2.0, f);

    let denom = gb * gb - ga * gc;
    if denom.abs() < 1e-12 {
        return Err(FitError::DegenerateShape);
    }
    let center = ((gc * gd - gb * gf) / denom, (ga * gf - gb * gd) / denom);

    let delta = 2.0 * (ga * gf * gf + gc * gd * gd + gg * gb * gb - 2.0 * gb * gd * gf - ga * gc * gg);
    let root = ((ga - gc).powi(2) + 4.0 * gb * gb).sqrt();

    let axis1_sq = delta / (denom * (root - (ga + gc)));
    let axis2_sq = delta / (denom * (-root - (ga + gc)));
    if axis1_sq < 0.0 || axis2_sq < 0.0 {
        return Err(FitError::DegenerateShape);
    }
    let radii = (axis1_sq.sqrt(), axis2_sq.sqrt());

    let orientation = if gb == 0.0 && ga <= gc {
        0.0
    } else if gb == 0.0 && ga > gc {
        std::f64::consts::FRAC_PI_2
    } else {
        let base = 0.5 * (2.0 * gb / (ga - gc)).atan();
        if ga > gc { base + std::f64::consts::FRAC_PI_2 } else { base }
    };

    Ok(Ellipse2d { center, radii, orientation, conic: (a, b, c, d, e, f) })
}

/// Finds the eigenvector of a 3x3 real matrix satisfying the ellipse
/// constraint `4*v0*v2 - v1^2 > 0`. `nalgebra`'s closed-form
/// `eigenvalues()` only returns real roots (`None` if any are complex,
/// which we treat as a degenerate fit); eigenvectors are then recovered as
/// the null space of `N - λI`, approximated as the cross product of two of
/// its rows (valid whenever `N - λI` has rank 2, the generic case for a
/// genuine ellipse fit).
fn select_ellipse_eigenvector(n_mat: &Matrix3<f64>) -> Option<Vector3<f64>> {
    let eigenvalues = n_mat.eigenvalues()?;
    for i in 0..3 {
        let lambda = eigenvalues[i];
        let shifted = n_mat - Matrix3::identity() * lambda;
        let v = null_space_vector(&shifted)?;
        if 4.0 * v.x * v.z - v.y * v.y > 0.0 {
            return Some(v);
        }
    }
    None
}

fn null_space_vector(m: &Matrix3<f64>) -> Option<Vector3<f64>> {
    let rows = [m.row(0).transpose(), m.row(1).transpose(), m.row(2).transpose()];
    for &(i, j) in &[(0, 1), (0, 2), (1, 2)] {
        let cross = rows[i].cross(&rows[j]);
        if cross.norm() > 1e-9 {
            return Some(cross.normalize());
        }
    }
    None
}

/// Fits a 3D ellipsoid to a component's points (Petrov/BoneJ-style
/// generalized least-squares + eigendecomposition).
///
/// Requires at least 9 points.
pub fn fit_ellipsoid_3d(cc: &Component) -> Result<Ellipsoid3d, FitError> {
    let points: Vec<(f64, f64, f64)> = cc.points().iter().map(|&(x, y, z)| (x as f64, y as f64, z as f64)).collect();
    fit_ellipsoid_3d_points(&points)
}

/// Same as [`fit_ellipsoid_3d`], swallowing failures into all-`NaN` output.
pub fn fit_ellipsoid_3d_or_nan(cc: &Component) -> Ellipsoid3d {
    fit_ellipsoid_3d(cc).unwrap_or(Ellipsoid3d {
        center: (f64::NAN, f64::NAN, f64::NAN),
        radii: (f64::NAN, f64::NAN, f64::NAN),
        axes: [(f64::NAN, f64::NAN, f64::NAN); 3],
    })
}

fn fit_ellipsoid_3d_points(points: &[(f64, f64, f64)]) -> Result<Ellipsoid3d, FitError> {
    let n = points.len();
    if n < 9 {
        return Err(FitError::TooFewPoints);
    }

    let mut d = DMatrix::<f64>::zeros(n, 9);
    for (i, &(x, y, z)) in points.iter().enumerate() {
        d[(i, 0)] = x * x;
        d[(i, 1)] = y * y;
        d[(i, 2)] = z * z;
        d[(i, 3)] = 2.0 * x * y;
        d[(i, 4)] = 2.0 * x * z;
        d[(i, 5)] = 2.0 * y * z;
        d[(i, 6)] = 2.0 * x;
        d[(i, 7)] = 2.0 * y;
        d[(i, 8)] = 2.0 * z;
    }
    let ones = DVector::<f64>::repeat(n, 1.0);

    let dtd = d.transpose() * &d;
    let dtd_inv = dtd.try_inverse().ok_or(FitError::DegenerateShape)?;
    let v = dtd_inv * d.transpose() * ones;

    let a = nalgebra::Matrix4::new(
        v[0], v[3], v[4], v[6], v[3], v[1], v[5], v[7], v[4], v[5], v[2], v[8], v[6], v[7], v[8], -1.0,
    );

    let a_top_left = a.fixed_view::<3, 3>(0, 0).into_owned();
    let v_tail = Vector3::new(v[6], v[7], v[8]);
    let a_top_left_inv = a_top_left.try_inverse().ok_or(FitError::DegenerateShape)?;
    let center = -a_top_left_inv * v_tail;

    let mut t = nalgebra::Matrix4::identity();
    t[(3, 0)] = center.x;
    t[(3, 1)] = center.y;
    t[(3, 2)] = center.z;

    let r = t * a * t.transpose();
    let r_top_left = r.fixed_view::<3, 3>(0, 0).into_owned();
    let scale = -r[(3, 3)];
    if scale.abs() < 1e-12 {
        return Err(FitError::DegenerateShape);
    }
    let symmetric = r_top_left / scale;

    let eigen = SymmetricEigen::new(symmetric);
    let mut radii = [0.0f64; 3];
    let mut axes = [Vector3::zeros(); 3];
    for i in 0..3 {
        let lambda = eigen.eigenvalues[i];
        if lambda <= 0.0 {
            return Err(FitError::DegenerateShape);
        }
        radii[i] = 1.0 / lambda.sqrt();
        axes[i] = eigen.eigenvectors.column(i).into_owned();
    }

    Ok(Ellipsoid3d {
        center: (center.x, center.y, center.z),
        radii: (radii[0], radii[1], radii[2]),
        axes: [
            (axes[0].x, axes[0].y, axes[0].z),
            (axes[1].x, axes[1].y, axes[1].z),
            (axes[2].x, axes[2].y, axes[2].z),
        ],
    })
}

/// Sorted `(a, b, c)` radii, descending, with `c = 0` for 2D components.
pub fn compute_ellipse_dimensions(cc: &Component) -> (f64, f64, f64) {
    if cc.is_2d() {
        let e = fit_ellipse_2d_or_nan(cc);
        let (mut a, mut b) = e.radii;
        if a < b {
            std::mem::swap(&mut a, &mut b);
        }
        (a, b, 0.0)
    } else {
        let e = fit_ellipsoid_3d_or_nan(cc);
        let mut radii = [e.radii.0, e.radii.1, e.radii.2];
        radii.sort_by(|x, y| y.partial_cmp(x).unwrap_or(std::cmp::Ordering::Equal));
        (radii[0], radii[1], radii[2])
    }
}
