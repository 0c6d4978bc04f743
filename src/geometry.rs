//! Simple whole-component geometry: bounding boxes, centroids, bounding
//! spheres, and inter-component distance.

use crate::component::Component;

/// A component's axis-aligned bounding box, as `(min, max)` voxel
/// coordinates. Identical to [`Component::bounding_box`]; kept here too so
/// callers that pulled in `geometry` for the sphere/distance helpers don't
/// also need to import `component`.
pub fn bounding_box(cc: &Component) -> ((usize, usize, usize), (usize, usize, usize)) {
    cc.bounding_box()
}

/// A component's voxel centroid (mean coordinate). Identical to
/// [`Component::mass_center`].
pub fn mass_center(cc: &Component) -> (f64, f64, f64) {
    cc.mass_center()
}

/// A minimal enclosing sphere over a component's voxels, via Ritter's
/// approximation algorithm: pick an arbitrary point, find its farthest
/// point `x`, find `x`'s farthest point `y`, seed a sphere on the segment
/// `xy`, then grow it to cover every remaining point that falls outside.
///
/// This is an approximation, not the true minimal enclosing sphere, but it
/// is a linear-time one and matches what the rest of this crate needs: a
/// cheap radius estimate for shape-compactness comparisons, not an exact
/// bound.
///
/// source: <https://en.wikipedia.org/wiki/Bounding_sphere#Ritter's_bounding_sphere>
///
/// **Panics** if `cc` has no points (never the case for a materialized
/// `Component`).
pub fn bounding_sphere(cc: &Component) -> (f64, f64, f64, f64) {
    let points = cc.points();
    assert!(!points.is_empty(), "a materialized component must have at least one voxel");

    let as_f64 = |p: (usize, usize, usize)| (p.0 as f64, p.1 as f64, p.2 as f64);
    let dist2 = |a: (f64, f64, f64), b: (f64, f64, f64)| {
        let (dx, dy, dz) = (a.0 - b.0, a.1 - b.1, a.2 - b.2);
        dx * dx + dy * dy + dz * dz
    };

    let p0 = as_f64(points[0]);
    let x = points.iter().map(|&p| as_f64(p)).fold(p0, |farthest, p| if dist2(p, p0) > dist2(farthest, p0) { p } else { farthest });
    let y = points.iter().map(|&p| as_f64(p)).fold(x, |farthest, p| if dist2(p, x) > dist2(farthest, x) { p } else { farthest });

    let mut center = ((x.0 + y.0) / 2.0, (x.1 + y.1) / 2.0, (x.2 + y.2) / 2.0);
    let mut radius = dist2(x, y).sqrt() / 2.0;

    for &p in points {
        let p = as_f64(p);
        let d = dist2(p, center).sqrt();
        if d > radius {
            let new_radius = (radius + d) / 2.0;
            let k = (new_radius - radius) / d;
            center = (center.0 + (p.0 - center.0) * k, center.1 + (p.1 - center.1) * k, center.2 + (p.2 - center.2) * k);
            radius = new_radius;
        }
    }

    (center.0, center.1, center.2, radius)
}

/// Euclidean distance between two components' mass centers.
pub fn centroid_distance(a: &Component, b: &Component) -> f64 {
    let (ax, ay, az) = a.mass_center();
    let (bx, by, bz) = b.mass_center();
    ((ax - bx).powi(2) + (ay - by).powi(2) + (az - bz).powi(2)).sqrt()
}
