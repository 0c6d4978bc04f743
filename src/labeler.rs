//! The single-pass union-find labeler.

use ndarray::{Array3, Array4, Array5, ArrayBase, Data, Ix3, Ix5};
use num_traits::Zero;

use crate::arena::LabelArena;
use crate::component::Component;
use crate::error::LabelError;
use crate::voxel::VoxelStore;

/// How candidate voxels are distinguished from background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionMode {
    /// Every voxel that differs from the reference value is foreground; no
    /// intensity-preservation check is applied when merging neighbors.
    BackgroundAll,

    /// Like `BackgroundAll`, but two touching voxels are only merged into
    /// the same label if they carry the same intensity as the label's
    /// `image_value` (the intensity recorded when the label was first
    /// allocated).
    BackgroundLabeled,

    /// Only voxels exactly equal to the reference value are foreground.
    ExactValue,

    /// The input grid already carries per-region integer tags; this mode is
    /// `BackgroundLabeled` with the reference value forced to zero.
    RegionOfInterest,
}

/// Labeling configuration: size bounds and edge-discard policy.
///
/// Bundled into a struct rather than four more positional parameters: past a
/// handful of independent knobs, a named struct reads better at the call
/// site than a run of positional `bool`s.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelerConfig {
    /// Inclusive lower bound on component size. Must be `>= 1`.
    pub min_size: usize,
    /// Inclusive upper bound on component size. Must be `>= min_size`.
    pub max_size: usize,
    /// Discard components with any voxel at `x == 0` or `x == width - 1`.
    pub no_edge_x: bool,
    /// Discard components with any voxel at `y == 0` or `y == height - 1`.
    pub no_edge_y: bool,
    /// Discard components with any voxel at `z == 0` or `z == depth - 1`.
    ///
    /// Callers working with 2D input (`depth == 1`) must leave this `false`:
    /// a single-slice volume flags `on_edge_z` trivially on every component,
    /// since both faces of a depth-1 slab are the same slice.
    pub no_edge_z: bool,
}

impl Default for LabelerConfig {
    fn default() -> Self {
        LabelerConfig { min_size: 1, max_size: usize::MAX, no_edge_x: false, no_edge_y: false, no_edge_z: false }
    }
}

impl LabelerConfig {
    /// A config with only the size bounds set, no edge discarding.
    pub fn with_size_bounds(min_size: usize, max_size: usize) -> Self {
        LabelerConfig { min_size, max_size, ..Default::default() }
    }

    /// Builder-style setter for `no_edge_x`.
    pub fn with_no_edge_x(mut self, no_edge_x: bool) -> Self {
        self.no_edge_x = no_edge_x;
        self
    }

    /// Builder-style setter for `no_edge_y`.
    pub fn with_no_edge_y(mut self, no_edge_y: bool) -> Self {
        self.no_edge_y = no_edge_y;
        self
    }

    /// Builder-style setter for `no_edge_z`.
    pub fn with_no_edge_z(mut self, no_edge_z: bool) -> Self {
        self.no_edge_z = no_edge_z;
        self
    }

    fn validate(&self) -> Result<(), LabelError> {
        if self.min_size > self.max_size || self.max_size < 1 {
            return Err(LabelError::InvalidBounds { min_size: self.min_size, max_size: self.max_size });
        }
        Ok(())
    }
}

/// The 13 backward neighbors of the 26-connectivity stencil, as `(dx, dy,
/// dz)` offsets: the full 3x3 block one slice back (`dz == -1`), then the
/// in-plane "above and to the left" hook on the current slice (`dz == 0`).
const BACKWARD_OFFSETS: [(isize, isize, isize); 13] = [
    (-1, -1, -1),
    (0, -1, -1),
    (1, -1, -1),
    (-1, 0, -1),
    (0, 0, -1),
    (1, 0, -1),
    (-1, 1, -1),
    (0, 1, -1),
    (1, 1, -1),
    (-1, -1, 0),
    (0, -1, 0),
    (1, -1, 0),
    (-1, 0, 0),
];

/// Labels the connected components of a single 3D frame.
///
/// Returns the final labeled grid (dense `1..=K` ids, background `0`) and
/// the `Component`s in ascending final-id order.
///
/// * `voxels` - the scalar intensities to label.
/// * `mode` - how candidate (foreground) voxels are identified.
/// * `value` - the reference value `mode` compares against. Ignored (forced
///   to zero) under `ExtractionMode::RegionOfInterest`.
/// * `config` - size bounds and edge-discard policy.
/// * `t` - the time index recorded on every emitted `Component`.
pub fn label3d<S, A>(
    voxels: &ArrayBase<S, Ix3>,
    mode: ExtractionMode,
    value: A,
    config: &LabelerConfig,
    t: usize,
) -> Result<(Array3<u32>, Vec<Component>), LabelError>
where
    S: Data<Elem = A>,
    A: Copy + PartialEq + Zero,
{
    config.validate()?;

    let store = VoxelStore::new(voxels);
    if store.is_empty() {
        return Err(LabelError::EmptyInput);
    }

    let (width, height, depth) = store.dim();
    let exact = matches!(mode, ExtractionMode::ExactValue);
    let check_image_value = matches!(mode, ExtractionMode::BackgroundLabeled | ExtractionMode::RegionOfInterest);
    let value = if matches!(mode, ExtractionMode::RegionOfInterest) { A::zero() } else { value };
    let is_candidate = |p: A| if exact { p == value } else { p != value };

    let mut grid = Array3::<u32>::zeros((width, height, depth));
    let mut arena = LabelArena::with_capacity(width * height * depth / 2, value);

    // Pass 1: raster scan, z outer, y middle, x inner (fastest).
    for z in 0..depth {
        for y in 0..height {
            for x in 0..width {
                let p = store.get(x, y, z);
                if !is_candidate(p) {
                    continue;
                }

                let mut qualifying: Vec<u32> = Vec::with_capacity(13);
                for &(dx, dy, dz) in &BACKWARD_OFFSETS {
                    let nx = x as isize + dx;
                    let ny = y as isize + dy;
                    let nz = z as isize + dz;
                    if nx < 0 || ny < 0 || nz < 0 {
                        continue;
                    }
                    let (nx, ny, nz) = (nx as usize, ny as usize, nz as usize);
                    if nx >= width || ny >= height || nz >= depth {
                        continue;
                    }
                    let label = grid[(nx, ny, nz)];
                    if label == 0 {
                        continue;
                    }
                    if check_image_value && arena.image_value(label) != p {
                        continue;
                    }
                    qualifying.push(label);
                }

                let on_edge_x = x == 0 || x == width - 1;
                let on_edge_y = y == 0 || y == height - 1;
                let on_edge_z = z == 0 || z == depth - 1;

                let assigned = if let Some(&l_min) = qualifying.iter().min() {
                    for &other in &qualifying {
                        if other != l_min {
                            arena.union(l_min, other);
                        }
                    }
                    l_min
                } else {
                    arena.allocate(p).ok_or(LabelError::Overflow)?
                };

                grid[(x, y, z)] = assigned;
                arena.add_voxel(assigned, on_edge_x, on_edge_y, on_edge_z);
            }
        }
    }

    // Pass 2: equivalence resolution, size/edge filtering, dense relabeling.
    let mut components =
        arena.finalize(t, config.min_size, config.max_size, config.no_edge_x, config.no_edge_y, config.no_edge_z);

    // Pass 3: rewrite and materialize.
    for z in 0..depth {
        for y in 0..height {
            for x in 0..width {
                let raw = grid[(x, y, z)];
                if raw == 0 {
                    continue;
                }
                let final_id = arena.resolve(raw);
                grid[(x, y, z)] = final_id;
                if final_id != 0 {
                    components[final_id as usize - 1].push_point((x, y, z));
                }
            }
        }
    }

    for c in &mut components {
        c.finalize();
    }

    Ok((grid, components))
}

/// Labels every time point of a `(t, z, y, x, channel)` series independently.
///
/// Each frame owns a disjoint `LabelArena` and output slab: frames never
/// share mutable state, so a caller wanting per-frame parallelism can map
/// `label3d` over `t` themselves (e.g. with a thread pool) instead of
/// calling this sequential convenience wrapper.
///
/// **Panics** if the channel axis (axis 4) is not of length 1 — this crate
/// only handles single-channel volumes.
pub fn label_series<S, A>(
    voxels: &ArrayBase<S, Ix5>,
    mode: ExtractionMode,
    value: A,
    config: &LabelerConfig,
) -> Result<(Array5<u32>, Vec<Vec<Component>>), LabelError>
where
    S: Data<Elem = A>,
    A: Copy + PartialEq + Zero,
{
    let (nt, depth, height, width, channels) = voxels.dim();
    assert_eq!(channels, 1, "ndarray-shapes only handles single-channel (channel == 1) volumes");
    if nt == 0 || depth == 0 || height == 0 || width == 0 {
        return Err(LabelError::EmptyInput);
    }

    let mut out = Array5::<u32>::zeros((nt, depth, height, width, 1));
    let mut all_components = Vec::with_capacity(nt);
    for t in 0..nt {
        let frame = voxels.slice(ndarray::s![t, .., .., .., 0]);
        // `frame` is (z, y, x); the labeler indexes (x, y, z), so permute the view.
        let frame = frame.permuted_axes([2, 1, 0]);
        let (labels, components) = label3d(&frame.to_owned(), mode, value, config, t)?;
        let labels = labels.permuted_axes([2, 1, 0]);
        out.slice_mut(ndarray::s![t, .., .., .., 0]).assign(&labels);
        all_components.push(components);
    }

    Ok((out, all_components))
}

/// `(t, z, y, x)` convenience wrapper around [`label_series`] for callers
/// without an explicit channel axis; equivalent to inserting a length-1
/// channel axis.
pub fn label_series_4d<S, A>(
    voxels: &ArrayBase<S, ndarray::Ix4>,
    mode: ExtractionMode,
    value: A,
    config: &LabelerConfig,
) -> Result<(Array4<u32>, Vec<Vec<Component>>), LabelError>
where
    S: Data<Elem = A>,
    A: Copy + PartialEq + Zero,
{
    let (nt, depth, height, width) = voxels.dim();
    let with_channel = voxels.view().insert_axis(ndarray::Axis(4));
    let (out, components) = label_series(&with_channel.to_owned(), mode, value, config)?;
    let out = out.into_shape((nt, depth, height, width)).expect("channel axis was length 1");
    Ok((out, components))
}
