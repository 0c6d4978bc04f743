use ndarray::{ArrayBase, ArrayView3, Data, Ix3};

/// Read-only accessor over a 3D grid of scalar voxels.
///
/// This is a thin wrapper around an [`ArrayView3`]; it exists so the
/// labeler's hot loop has a single, small surface to index through instead of
/// threading `ArrayBase<S, Ix3>` generics everywhere, mirroring how
/// `ndarray-ndimage`'s own filters wrap a borrowed view rather than an owned
/// array.
#[derive(Debug, Clone, Copy)]
pub struct VoxelStore<'a, A> {
    view: ArrayView3<'a, A>,
}

impl<'a, A> VoxelStore<'a, A>
where
    A: Copy,
{
    /// Wraps any array-like value with `Ix3` layout (owned, view, or
    /// `ArcArray`) as a read-only voxel store.
    pub fn new<S>(data: &'a ArrayBase<S, Ix3>) -> Self
    where
        S: Data<Elem = A>,
    {
        VoxelStore { view: data.view() }
    }

    /// Width (size along the `x` axis).
    pub fn width(&self) -> usize {
        self.view.dim().0
    }

    /// Height (size along the `y` axis).
    pub fn height(&self) -> usize {
        self.view.dim().1
    }

    /// Depth (size along the `z` axis).
    pub fn depth(&self) -> usize {
        self.view.dim().2
    }

    /// `(width, height, depth)`.
    pub fn dim(&self) -> (usize, usize, usize) {
        self.view.dim()
    }

    /// Number of voxels, `width * height * depth`.
    pub fn len(&self) -> usize {
        self.view.len()
    }

    /// `true` if the store holds no voxels.
    pub fn is_empty(&self) -> bool {
        self.view.is_empty()
    }

    /// Typed element access at voxel coordinate `(x, y, z)`.
    ///
    /// **Panics** if the coordinate is out of bounds.
    pub fn get(&self, x: usize, y: usize, z: usize) -> A {
        self.view[(x, y, z)]
    }

    /// Returns the underlying view, e.g. for callers that want to run their
    /// own `ndarray` operations alongside the labeler.
    pub fn view(&self) -> ArrayView3<'a, A> {
        self.view
    }
}
