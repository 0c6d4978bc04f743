//! Per-component feature row assembly and final-id reordering.
//!
//! Everything here is a pure function of already-materialized `Component`s,
//! built for an external spreadsheet-export caller rather than consumed
//! internally by the labeler or any descriptor engine.

use crate::component::Component;
use crate::ellipse::compute_ellipse_dimensions;
use crate::geometry::mass_center;
use crate::hull::{compute_hull_ratio, convex_hull};
use crate::moments::moment;
use crate::perimeter::{perimeter, sphericity};

/// Physical-unit scale factors applied when assembling a [`FeatureRow`].
///
/// `dt`, `sx`, `sy`, `sz` convert voxel/frame counts into the caller's
/// physical units; `voxel_volume` is `sx*sy*sz` pre-multiplied once by the
/// caller so this module never has to assume a particular unit system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale {
    /// Physical time per frame, multiplied onto [`Component::t`].
    pub dt: f64,
    /// Physical units per voxel along x, multiplied onto the mass center.
    pub sx: f64,
    /// Physical units per voxel along y, multiplied onto the mass center.
    pub sy: f64,
    /// Physical units per voxel along z, multiplied onto the mass center.
    pub sz: f64,
    /// `sx * sy * sz`, multiplied onto a raw voxel count to get physical volume.
    pub voxel_volume: f64,
}

impl Default for Scale {
    fn default() -> Self {
        Scale { dt: 1.0, sx: 1.0, sy: 1.0, sz: 1.0, voxel_volume: 1.0 }
    }
}

/// The 14 geometric moments in the row schema, `None` for the z-bearing
/// entries on a 2D component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Moments {
    /// `M_100`.
    pub m100: f64,
    /// `M_010`.
    pub m010: f64,
    /// `M_001`, `None` for a 2D component.
    pub m001: Option<f64>,
    /// `M_110`.
    pub m110: f64,
    /// `M_101`, `None` for a 2D component.
    pub m101: Option<f64>,
    /// `M_011`, `None` for a 2D component.
    pub m011: Option<f64>,
    /// `M_111`, `None` for a 2D component.
    pub m111: Option<f64>,
    /// `M_200`.
    pub m200: f64,
    /// `M_020`.
    pub m020: f64,
    /// `M_002`, `None` for a 2D component.
    pub m002: Option<f64>,
    /// `M_220`.
    pub m220: f64,
    /// `M_202`, `None` for a 2D component.
    pub m202: Option<f64>,
    /// `M_022`, `None` for a 2D component.
    pub m022: Option<f64>,
    /// `M_222`, `None` for a 2D component.
    pub m222: Option<f64>,
}

fn compute_moments(cc: &Component) -> Moments {
    let m = |p, q, r| moment(cc, p, q, r);
    if cc.is_2d() {
        Moments {
            m100: m(1, 0, 0),
            m010: m(0, 1, 0),
            m001: None,
            m110: m(1, 1, 0),
            m101: None,
            m011: None,
            m111: None,
            m200: m(2, 0, 0),
            m020: m(0, 2, 0),
            m002: None,
            m220: m(2, 2, 0),
            m202: None,
            m022: None,
            m222: None,
        }
    } else {
        Moments {
            m100: m(1, 0, 0),
            m010: m(0, 1, 0),
            m001: Some(m(0, 0, 1)),
            m110: m(1, 1, 0),
            m101: Some(m(1, 0, 1)),
            m011: Some(m(0, 1, 1)),
            m111: Some(m(1, 1, 1)),
            m200: m(2, 0, 0),
            m020: m(0, 2, 0),
            m002: Some(m(0, 0, 2)),
            m220: m(2, 2, 0),
            m202: Some(m(2, 0, 2)),
            m022: Some(m(0, 2, 2)),
            m222: Some(m(2, 2, 2)),
        }
    }
}

/// One exported row, suitable for spreadsheet-style export. `minor_z_axis`
/// is `None` for a 2D component (there is no third ellipsoid radius).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureRow {
    /// The component's dense final label id.
    pub index: u32,
    /// Time index scaled by [`Scale::dt`].
    pub t: f64,
    /// Mass center scaled by `(sx, sy, sz)`.
    pub center: (f64, f64, f64),
    /// Corrected perimeter/surface area, unscaled.
    pub perimeter: f64,
    /// Voxel count scaled by [`Scale::voxel_volume`].
    pub volume: f64,
    /// Sphericity/circularity.
    pub sphericity: f64,
    /// Largest fitted ellipse/ellipsoid radius.
    pub major_axis: f64,
    /// Second-largest fitted ellipse/ellipsoid radius.
    pub minor_axis: f64,
    /// Third ellipsoid radius; `None` for a 2D component.
    pub minor_z_axis: Option<f64>,
    /// `minor_axis / major_axis`.
    pub eccentricity: f64,
    /// Component size divided by convex hull volume, clamped to 1.
    pub hull_fill_ratio: f64,
    /// Geometric moments.
    pub moments: Moments,
    /// Convex hull contour length (2D) / surface area (3D).
    pub convex_perimeter: f64,
    /// Convex hull enclosed area (2D) / volume (3D).
    pub convex_volume: f64,
}

/// Assembles a [`FeatureRow`] for `cc`, identified by `index` (its final
/// dense label id), scaled by `scale`.
pub fn feature_row(cc: &Component, index: u32, scale: &Scale) -> FeatureRow {
    let (cx, cy, cz) = mass_center(cc);
    let peri = perimeter(cc).perimeter;
    let hull = convex_hull(cc);
    let (a, b, c) = compute_ellipse_dimensions(cc);

    let (major_axis, minor_axis, minor_z_axis) =
        if cc.is_2d() { (a, b, None) } else { (a, b, Some(c)) };
    let eccentricity = if major_axis > 0.0 { minor_axis / major_axis } else { f64::NAN };

    FeatureRow {
        index,
        t: cc.t() as f64 * scale.dt,
        center: (cx * scale.sx, cy * scale.sy, cz * scale.sz),
        perimeter: peri,
        volume: cc.size() as f64 * scale.voxel_volume,
        sphericity: sphericity(cc),
        major_axis,
        minor_axis,
        minor_z_axis,
        eccentricity,
        hull_fill_ratio: compute_hull_ratio(cc),
        moments: compute_moments(cc),
        convex_perimeter: hull.contour,
        convex_volume: hull.volume,
    }
}

/// How emitted components should be ordered (and therefore relabeled)
/// before being handed back to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelOrdering {
    /// No-op: ids stay in raster-scan discovery order.
    Arrival,
    /// Ascending by the z-coordinate of the component's mass center.
    DepthAscending,
    /// Descending by the z-coordinate of the component's mass center.
    DepthDescending,
}

/// Reorders `components` per `ordering` and returns the reordered list
/// together with an `old_id -> new_id` remap (1-indexed, same convention
/// as the labeler's output grid) for rewriting the label grid in place.
///
/// "Depth" is the z-coordinate of a component's mass center.
pub fn sort_components(mut components: Vec<Component>, ordering: LabelOrdering) -> (Vec<Component>, Vec<u32>) {
    let original_count = components.len();
    let mut order: Vec<usize> = (0..original_count).collect();

    match ordering {
        LabelOrdering::Arrival => {}
        LabelOrdering::DepthAscending => {
            order.sort_by(|&a, &b| {
                components[a].mass_center().2.partial_cmp(&components[b].mass_center().2).unwrap()
            });
        }
        LabelOrdering::DepthDescending => {
            order.sort_by(|&a, &b| {
                components[b].mass_center().2.partial_cmp(&components[a].mass_center().2).unwrap()
            });
        }
    }

    // `remap[old_id - 1] = new_id`, where old ids are the 1-indexed
    // position components held in the input vector.
    let mut remap = vec![0u32; original_count];
    for (new_pos, &old_pos) in order.iter().enumerate() {
        remap[old_pos] = new_pos as u32 + 1;
    }

    // Reorder `components` to match `order` without cloning.
    let mut slots: Vec<Option<Component>> = components.drain(..).map(Some).collect();
    let reordered = order.into_iter().map(|i| slots[i].take().unwrap()).collect();

    (reordered, remap)
}
