//! 2D/3D convex hull: contour length/surface area and enclosed area/volume.

use std::collections::HashSet;

use nalgebra::Point3;

use crate::component::Component;

/// Result of [`convex_hull`]: contour length (2D) / surface area (3D), and
/// enclosed area (2D) / volume (3D).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HullResult {
    /// Hull contour length (2D) or surface area (3D).
    pub contour: f64,
    /// Hull-enclosed area (2D) or volume (3D).
    pub volume: f64,
}

/// Computes the convex hull descriptor for a component, dispatching on
/// [`Component::is_2d`].
///
/// `size == 1` always returns `(0, 1)`; below the 2D monotone-chain
/// hull's 5-point minimum and the 3D hull's 4-point/non-coplanar minimum,
/// the fallback is `(size, size)`. Both fallbacks exist so
/// [`compute_hull_ratio`] stays well-defined without a special case of its
/// own.
pub fn convex_hull(cc: &Component) -> HullResult {
    if cc.size() == 1 {
        return HullResult { contour: 0.0, volume: 1.0 };
    }
    if cc.is_2d() {
        convex_hull_2d(cc)
    } else {
        convex_hull_3d(cc)
    }
}

/// Component size divided by hull volume, clamped to 1: how much of the
/// convex hull the component itself actually fills.
pub fn compute_hull_ratio(cc: &Component) -> f64 {
    let hull = convex_hull(cc);
    if hull.volume <= 0.0 {
        return 1.0;
    }
    (cc.size() as f64 / hull.volume).min(1.0)
}

fn convex_hull_2d(cc: &Component) -> HullResult {
    let mut points: Vec<(f64, f64)> = cc.points().iter().map(|&(x, y, _)| (x as f64, y as f64)).collect();
    points.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    points.dedup();

    if points.len() < 5 {
        return HullResult { contour: cc.size() as f64, volume: cc.size() as f64 };
    }

    let hull = monotone_chain(&points);

    let mut contour = 0.0;
    let mut signed_area = 0.0;
    let k = hull.len();
    for i in 0..k {
        let (x_i, y_i) = hull[i];
        let (x_prev, y_prev) = hull[(i + k - 1) % k];
        contour += ((x_i - x_prev).powi(2) + (y_i - y_prev).powi(2)).sqrt();
        signed_area += x_i * y_prev - y_i * x_prev;
    }

    HullResult { contour, volume: 0.5 * signed_area.abs() }
}

/// Andrew's monotone chain algorithm. `points` must be sorted and deduped.
fn monotone_chain(points: &[(f64, f64)]) -> Vec<(f64, f64)> {
    fn cross(o: (f64, f64), a: (f64, f64), b: (f64, f64)) -> f64 {
        (a.0 - o.0) * (b.1 - o.1) - (a.1 - o.1) * (b.0 - o.0)
    }

    let n = points.len();
    let mut lower = Vec::with_capacity(n);
    for &p in points {
        while lower.len() >= 2 && cross(lower[lower.len() - 2], lower[lower.len() - 1], p) <= 0.0 {
            lower.pop();
        }
        lower.push(p);
    }

    let mut upper = Vec::with_capacity(n);
    for &p in points.iter().rev() {
        while upper.len() >= 2 && cross(upper[upper.len() - 2], upper[upper.len() - 1], p) <= 0.0 {
            upper.pop();
        }
        upper.push(p);
    }

    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower
}

fn convex_hull_3d(cc: &Component) -> HullResult {
    let points: Vec<Point3<f64>> =
        cc.points().iter().map(|&(x, y, z)| Point3::new(x as f64, y as f64, z as f64)).collect();

    let faces = match incremental_hull(&points) {
        Some(faces) => faces,
        None => return HullResult { contour: cc.size() as f64, volume: cc.size() as f64 },
    };

    let mut contour = 0.0;
    let mut volume = 0.0;
    for &(i, j, k) in &faces {
        let (p1, p2, p3) = (points[i], points[j], points[k]);
        let n = (p2 - p1).cross(&(p3 - p1));
        let area = n.norm() / 2.0;
        contour += area;
        if n.norm() > 1e-12 {
            let n_unit = n / n.norm();
            volume += area * n_unit.x * (p1.x + p2.x + p3.x) / 3.0;
        }
    }

    HullResult { contour, volume: volume.abs() }
}

/// Builds a triangular-face list for the 3D convex hull of `points` via a
/// standard incremental algorithm: seed a tetrahedron on four
/// non-coplanar points (farthest-point construction, for numerical
/// robustness on thin/near-planar voxel blobs), then repeatedly fold in
/// the farthest remaining point outside the current hull by removing every
/// face it can see and re-triangulating the resulting horizon.
///
/// Returns `None` if fewer than 4 points are given or all points are
/// coplanar (no valid seed tetrahedron).
fn incremental_hull(points: &[Point3<f64>]) -> Option<Vec<(usize, usize, usize)>> {
    if points.len() < 4 {
        return None;
    }

    let (i0, i1, i2, i3) = seed_tetrahedron(points)?;
    let mut faces: Vec<(usize, usize, usize)> = Vec::new();
    let centroid = Point3::from(
        (points[i0].coords + points[i1].coords + points[i2].coords + points[i3].coords) / 4.0,
    );
    for &(a, b, c) in &[(i0, i1, i2), (i0, i1, i3), (i0, i2, i3), (i1, i2, i3)] {
        faces.push(orient_outward(points, &centroid, (a, b, c)));
    }

    let mut used: HashSet<usize> = [i0, i1, i2, i3].into_iter().collect();
    for (p_idx, &p) in points.iter().enumerate() {
        if used.contains(&p_idx) {
            continue;
        }
        let visible: Vec<(usize, usize, usize)> =
            faces.iter().copied().filter(|&f| is_visible(points, f, p)).collect();
        if visible.is_empty() {
            continue;
        }

        faces.retain(|f| !is_visible(points, *f, p));

        let mut horizon: Vec<(usize, usize)> = Vec::new();
        for &(a, b, c) in &visible {
            for &(u, v) in &[(a, b), (b, c), (c, a)] {
                // An edge is on the horizon if its reverse does not belong
                // to another visible face (directed-edge cancellation).
                if !visible.iter().any(|&(x, y, z)| (x, y, z) != (a, b, c) && has_directed_edge((x, y, z), (v, u))) {
                    horizon.push((u, v));
                }
            }
        }

        for (u, v) in horizon {
            faces.push(orient_outward(points, &centroid, (u, v, p_idx)));
        }
        used.insert(p_idx);
    }

    Some(faces)
}

fn has_directed_edge(face: (usize, usize, usize), edge: (usize, usize)) -> bool {
    let (a, b, c) = face;
    [(a, b), (b, c), (c, a)].contains(&edge)
}

fn is_visible(points: &[Point3<f64>], face: (usize, usize, usize), p: Point3<f64>) -> bool {
    let (a, b, c) = face;
    let n = (points[b] - points[a]).cross(&(points[c] - points[a]));
    n.dot(&(p - points[a])) > 1e-9
}

fn orient_outward(
    points: &[Point3<f64>],
    centroid: &Point3<f64>,
    (a, b, c): (usize, usize, usize),
) -> (usize, usize, usize) {
    let n = (points[b] - points[a]).cross(&(points[c] - points[a]));
    if n.dot(&(*centroid - points[a])) > 0.0 {
        (a, c, b)
    } else {
        (a, b, c)
    }
}

/// Picks four non-coplanar points to seed the hull: the two points
/// farthest apart, the point farthest from that segment, and the point
/// farthest (by absolute distance) from the resulting plane.
fn seed_tetrahedron(points: &[Point3<f64>]) -> Option<(usize, usize, usize, usize)> {
    let n = points.len();
    let mut i0 = 0;
    let mut i1 = 1;
    let mut best = 0.0;
    for i in 0..n {
        for j in (i + 1)..n {
            let d = (points[i] - points[j]).norm_squared();
            if d > best {
                best = d;
                i0 = i;
                i1 = j;
            }
        }
    }

    let dir = (points[i1] - points[i0]).normalize();
    let mut i2 = usize::MAX;
    let mut best = 0.0;
    for i in 0..n {
        if i == i0 || i == i1 {
            continue;
        }
        let v = points[i] - points[i0];
        let perp = v - dir * v.dot(&dir);
        let d = perp.norm_squared();
        if d > best {
            best = d;
            i2 = i;
        }
    }
    if i2 == usize::MAX || best < 1e-12 {
        return None;
    }

    let normal = (points[i1] - points[i0]).cross(&(points[i2] - points[i0]));
    let mut i3 = usize::MAX;
    let mut best = 0.0;
    for i in 0..n {
        if i == i0 || i == i1 || i == i2 {
            continue;
        }
        let d = normal.dot(&(points[i] - points[i0])).abs();
        if d > best {
            best = d;
            i3 = i;
        }
    }
    if i3 == usize::MAX || best < 1e-9 {
        return None;
    }

    Some((i0, i1, i2, i3))
}
