use thiserror::Error;

/// Fatal errors raised at the call boundary of the labeler.
///
/// These always abort the call; there is no sentinel-value recovery for them
/// (contrast with [`FitError`], which the shape-descriptor routines swallow
/// into `NaN` radii).
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum LabelError {
    /// The input volume (or one frame of a time series) has zero voxels.
    #[error("input volume is empty")]
    EmptyInput,

    /// `min_size > max_size`, or `max_size < 1`.
    #[error("invalid size bounds: min_size={min_size}, max_size={max_size}")]
    InvalidBounds {
        /// The offending `min_size`.
        min_size: usize,
        /// The offending `max_size`.
        max_size: usize,
    },

    /// The label population would exceed the arena's index type (`u32`).
    ///
    /// Callers are expected to split the volume; this crate does not attempt
    /// to do so automatically.
    #[error("label population exceeds the arena index type")]
    Overflow,
}

/// Non-fatal failures from the geometric fitting routines.
///
/// Per the descriptor contract, these never propagate as panics or aborted
/// calls: [`crate::ellipse::fit_ellipse_2d`] and
/// [`crate::ellipse::fit_ellipsoid_3d`] catch them internally and return a
/// result carrying `NaN` radii, with the reason attached for callers who want
/// to distinguish "too small to fit" from "numerically singular".
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FitError {
    /// Fewer points were supplied than the fit requires (6 for 2D, 9 for 3D).
    #[error("too few points for this fit")]
    TooFewPoints,

    /// The least-squares system was singular (typically a flat point cloud).
    #[error("degenerate shape: singular fitting system")]
    DegenerateShape,
}
