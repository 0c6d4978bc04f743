//! The materialized connected region produced by the labeler.

/// A single connected region, as emitted by [`crate::labeler::label3d`].
///
/// `points` is filled exactly once, in the labeler's final raster-order
/// rewrite pass, and is read-only from then on — [`crate::hull`] relies on
/// this ordering for deterministic tie-breaking.
///
/// `mass_center`/`bounding_box` are computed once, right after `points` is
/// fully populated, rather than lazily on first read: since a `Component` is
/// immutable from that point forward, eager-at-construction and
/// lazy-on-first-read are observationally identical, and the eager version
/// avoids interior mutability.
#[derive(Debug, Clone)]
pub struct Component {
    points: Vec<(usize, usize, usize)>,
    t: usize,
    on_edge_x: bool,
    on_edge_y: bool,
    on_edge_z: bool,
    mass_center: (f64, f64, f64),
    bounding_box: ((usize, usize, usize), (usize, usize, usize)),
}

impl Component {
    pub(crate) fn new_stub(t: usize, on_edge_x: bool, on_edge_y: bool, on_edge_z: bool, capacity: usize) -> Self {
        Component {
            points: Vec::with_capacity(capacity),
            t,
            on_edge_x,
            on_edge_y,
            on_edge_z,
            mass_center: (0.0, 0.0, 0.0),
            bounding_box: ((0, 0, 0), (0, 0, 0)),
        }
    }

    pub(crate) fn push_point(&mut self, p: (usize, usize, usize)) {
        self.points.push(p);
    }

    /// Computes `mass_center` and `bounding_box` from the now-final `points`.
    ///
    /// **Panics** if called on a component with no points; pass 3 never
    /// materializes an empty `Component`, so this should be unreachable from
    /// the public API.
    pub(crate) fn finalize(&mut self) {
        assert!(!self.points.is_empty(), "a materialized component must have at least one voxel");

        let n = self.points.len() as f64;
        let (mut sx, mut sy, mut sz) = (0.0, 0.0, 0.0);
        let (mut min_x, mut min_y, mut min_z) = self.points[0];
        let (mut max_x, mut max_y, mut max_z) = self.points[0];
        for &(x, y, z) in &self.points {
            sx += x as f64;
            sy += y as f64;
            sz += z as f64;
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            min_z = min_z.min(z);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
            max_z = max_z.max(z);
        }
        self.mass_center = (sx / n, sy / n, sz / n);
        self.bounding_box = ((min_x, min_y, min_z), (max_x, max_y, max_z));
    }

    /// Number of voxels in the component. Equal to `self.points().len()`.
    pub fn size(&self) -> usize {
        self.points.len()
    }

    /// The time index this component was extracted from.
    pub fn t(&self) -> usize {
        self.t
    }

    /// The component's voxel coordinates, in raster-scan (pass 3) order.
    pub fn points(&self) -> &[(usize, usize, usize)] {
        &self.points
    }

    /// `true` if any member voxel lies at `x == 0` or `x == width - 1`.
    pub fn on_edge_x(&self) -> bool {
        self.on_edge_x
    }

    /// `true` if any member voxel lies at `y == 0` or `y == height - 1`.
    pub fn on_edge_y(&self) -> bool {
        self.on_edge_y
    }

    /// `true` if any member voxel lies at `z == 0` or `z == depth - 1`.
    pub fn on_edge_z(&self) -> bool {
        self.on_edge_z
    }

    /// Mean of `points`, in floating coordinates.
    pub fn mass_center(&self) -> (f64, f64, f64) {
        self.mass_center
    }

    /// `(min, max)` voxel coordinates spanning the component.
    pub fn bounding_box(&self) -> ((usize, usize, usize), (usize, usize, usize)) {
        self.bounding_box
    }

    /// A component is 2D iff its bounding box has `min.z == max.z`. This is
    /// the discriminator every dimensional branch in the descriptor modules
    /// gates on.
    pub fn is_2d(&self) -> bool {
        let (min, max) = self.bounding_box;
        min.2 == max.2
    }
}
