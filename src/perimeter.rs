//! Digitized perimeter/surface estimation and sphericity.

use std::collections::HashSet;

use crate::component::Component;

/// The six 6-neighborhood offsets, grouped so the x/y pair comes first: in
/// 2D mode only the first four are consulted, the z pair is skipped.
const NEIGHBOR_OFFSETS: [(isize, isize, isize); 6] =
    [(-1, 0, 0), (1, 0, 0), (0, -1, 0), (0, 1, 0), (0, 0, -1), (0, 0, 1)];

/// Result of [`perimeter`]: the corrected length/area plus, for callers that
/// want them, the contour voxels and a byte mask flagging them.
#[derive(Debug, Clone)]
pub struct PerimeterResult {
    /// The corrected perimeter (2D) or surface area (3D).
    pub perimeter: f64,
    /// Member voxels with at least one exposed 6-neighborhood direction.
    pub contour_points: Vec<(usize, usize, usize)>,
    /// `true` at the position of every `contour_points` entry, indexed the
    /// same way as [`Component::points`] relative to the bounding box: entry
    /// `i` corresponds to the voxel at `component.points()[i]`.
    pub contour_mask: Vec<bool>,
}

/// Estimates the corrected perimeter (2D) or surface area (3D) of a
/// component from a digitized-contour edge/corner classification of its
/// member voxels.
///
/// The empirical correction term `P + round(P / size) - min(a / 10, b)` is
/// kept exactly as given rather than simplified or re-derived, since
/// sphericity is only comparable across implementations that keep this
/// exact formula.
pub fn perimeter(cc: &Component) -> PerimeterResult {
    let points = cc.points();
    let is_2d = cc.is_2d();
    let directions = if is_2d { &NEIGHBOR_OFFSETS[0..4] } else { &NEIGHBOR_OFFSETS[..] };

    let member: HashSet<(i64, i64, i64)> =
        points.iter().map(|&(x, y, z)| (x as i64, y as i64, z as i64)).collect();

    let mut sum = 0.0f64;
    let mut a = 0.0f64;
    let mut b = 0.0f64;
    let mut contour_points = Vec::new();
    let mut contour_mask = Vec::with_capacity(points.len());

    for &(x, y, z) in points {
        let (x, y, z) = (x as i64, y as i64, z as i64);
        let n = directions
            .iter()
            .filter(|&&(dx, dy, dz)| !member.contains(&(x + dx as i64, y + dy as i64, z + dz as i64)))
            .count();

        let (increment, is_contour) = match n {
            0 => (0.0, false),
            1 => {
                a += 1.0;
                (1.0, true)
            }
            2 => {
                b += 1.0;
                (std::f64::consts::SQRT_2, true)
            }
            3 => {
                b += 2.0;
                (2.0 * std::f64::consts::SQRT_2, true)
            }
            _ => (3.0f64.sqrt(), true),
        };
        sum += increment;
        contour_mask.push(is_contour);
        if is_contour {
            contour_points.push((x as usize, y as usize, z as usize));
        }
    }

    let size = cc.size() as f64;
    let perimeter = sum + (sum / size).round() - (a / 10.0).min(b);

    PerimeterResult { perimeter, contour_points, contour_mask }
}

/// Sphericity (2D: circularity): a dimension-normalized ratio of
/// `area^((dim-1)/dim)` to `perimeter`, clamped at 1.
///
/// `area` is the component's voxel count; `peri` is [`perimeter`]'s
/// corrected length. When `peri` is zero (the single-voxel case, before any
/// correction pulls it below zero) the ratio is defined as `1.0` rather than
/// dividing by zero.
pub fn sphericity(cc: &Component) -> f64 {
    let dim = if cc.is_2d() { 2.0 } else { 3.0 };
    let area = cc.size() as f64;
    let peri = perimeter(cc).perimeter;
    if peri <= 0.0 {
        return 1.0;
    }
    let value = (std::f64::consts::PI.powf(1.0 / dim) / peri) * (2.0 * dim * area).powf((dim - 1.0) / dim);
    value.min(1.0)
}
