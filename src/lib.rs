#![warn(missing_docs, trivial_casts, trivial_numeric_casts, unused_qualifications)]

//! Connected-component labeling and geometric shape descriptors for
//! volumetric label images, built on [`ndarray`].
//!
//! [`labeler::label3d`] turns a scalar 3D grid into a dense-id label grid
//! plus a list of [`component::Component`]s via a single-pass union-find
//! raster scan. The remaining modules are pure descriptor functions of a
//! `Component`: perimeter/surface ([`perimeter`]), ellipse/ellipsoid fit
//! ([`ellipse`]), convex hull ([`hull`]), geometric moments ([`moments`]),
//! and whole-component geometry ([`geometry`]). [`descriptors`] assembles
//! these into the exported feature row used by spreadsheet-style callers.

mod arena;
pub mod component;
pub mod descriptors;
pub mod ellipse;
pub mod error;
pub mod geometry;
pub mod hull;
pub mod labeler;
pub mod moments;
pub mod perimeter;
pub mod voxel;

pub use component::Component;
pub use descriptors::{feature_row, sort_components, FeatureRow, LabelOrdering, Moments, Scale};
pub use ellipse::{compute_ellipse_dimensions, fit_ellipse_2d, fit_ellipsoid_3d, Ellipse2d, Ellipsoid3d};
pub use error::{FitError, LabelError};
pub use geometry::{bounding_box, bounding_sphere, centroid_distance, mass_center};
pub use hull::{compute_hull_ratio, convex_hull, HullResult};
pub use labeler::{label3d, label_series, label_series_4d, ExtractionMode, LabelerConfig};
pub use moments::moment;
pub use perimeter::{perimeter, sphericity, PerimeterResult};
pub use voxel::VoxelStore;
