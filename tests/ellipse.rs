use approx::assert_relative_eq;
use ndarray::Array3;
use ndarray_shapes::{compute_ellipse_dimensions, fit_ellipse_2d, fit_ellipsoid_3d, label3d, ExtractionMode, LabelerConfig};

fn single_component(grid: &Array3<u8>) -> ndarray_shapes::Component {
    let config = LabelerConfig::default();
    let (_labels, mut components) = label3d(grid, ExtractionMode::BackgroundAll, 0u8, &config, 0).unwrap();
    assert_eq!(components.len(), 1);
    components.remove(0)
}

#[test]
fn too_few_points_is_rejected_for_2d_fit() {
    let mut grid = Array3::<u8>::zeros((10, 10, 1));
    for x in 1..4 {
        grid[(x, 1, 0)] = 1; // 3 points, fewer than 6
    }
    let cc = single_component(&grid);
    assert!(fit_ellipse_2d(&cc).is_err());
}

#[test]
fn disk_shaped_component_fits_a_roughly_circular_ellipse() {
    let mut grid = Array3::<u8>::zeros((21, 21, 1));
    let (cx, cy, r) = (10.0, 10.0, 6.0);
    for x in 0..21 {
        for y in 0..21 {
            let dx = x as f64 - cx;
            let dy = y as f64 - cy;
            if dx * dx + dy * dy <= r * r {
                grid[(x, y, 0)] = 1;
            }
        }
    }
    let cc = single_component(&grid);
    let ellipse = fit_ellipse_2d(&cc).expect("disk should fit cleanly");
    assert_relative_eq!(ellipse.center.0, cx, epsilon = 1.0);
    assert_relative_eq!(ellipse.center.1, cy, epsilon = 1.0);
    let ratio = ellipse.radii.0.max(ellipse.radii.1) / ellipse.radii.0.min(ellipse.radii.1);
    assert!(ratio < 1.2, "expected a near-circular fit, got ratio {ratio}");
}

#[test]
fn too_few_points_is_rejected_for_3d_fit() {
    let mut grid = Array3::<u8>::zeros((10, 10, 10));
    for x in 1..5 {
        grid[(x, 1, 1)] = 1; // 4 points, fewer than 9
    }
    let cc = single_component(&grid);
    assert!(fit_ellipsoid_3d(&cc).is_err());
}

#[test]
fn coplanar_cloud_is_degenerate_for_ellipsoid_fit() {
    // A flat 10x10 plaque at a fixed z: every point is coplanar.
    let mut grid = Array3::<u8>::zeros((10, 10, 6));
    for x in 0..10 {
        for y in 0..10 {
            grid[(x, y, 3)] = 1;
        }
    }
    let cc = single_component(&grid);
    assert!(cc.is_2d());
    assert!(fit_ellipsoid_3d(&cc).is_err());
}

#[test]
fn solid_cube_ellipsoid_is_isotropic_and_centered_on_the_mass_center() {
    // A solid cube is invariant under permuting its axes, so the least-squares
    // quadric fit should come out isotropic: all three radii equal, and
    // centered on the cube's own mass center.
    let s: usize = 41;
    let mut grid = Array3::<u8>::zeros((s + 8, s + 8, s + 8));
    for x in 4..4 + s {
        for y in 4..4 + s {
            for z in 4..4 + s {
                grid[(x, y, z)] = 1;
            }
        }
    }
    let cc = single_component(&grid);
    assert!(!cc.is_2d());
    let ellipsoid = fit_ellipsoid_3d(&cc).expect("solid cube should fit cleanly");

    let (rx, ry, rz) = ellipsoid.radii;
    assert_relative_eq!(rx, ry, epsilon = 1e-3);
    assert_relative_eq!(ry, rz, epsilon = 1e-3);

    // The fit solves for the quadric that best explains every interior
    // voxel, not just the boundary, so for a solid cube it comes out larger
    // than the half-width rather than equal to it (around 1.1-1.2x, for a
    // cube this size) — it should still be the same order as the half-width.
    let half_width = (s - 1) as f64 / 2.0;
    assert!(rx > half_width, "expected a radius larger than the half-width, got {rx}");
    assert!(rx < 1.4 * half_width, "radius grew unexpectedly large: {rx} vs half-width {half_width}");

    let (cx, cy, cz) = ellipsoid.center;
    let (mcx, mcy, mcz) = cc.mass_center();
    assert_relative_eq!(cx, mcx, epsilon = 1e-3);
    assert_relative_eq!(cy, mcy, epsilon = 1e-3);
    assert_relative_eq!(cz, mcz, epsilon = 1e-3);
}

#[test]
fn compute_ellipse_dimensions_sorts_descending_with_zero_c_in_2d() {
    let mut grid = Array3::<u8>::zeros((21, 21, 1));
    let (cx, cy) = (10.0, 10.0);
    for x in 0..21 {
        for y in 0..21 {
            let dx = (x as f64 - cx) / 8.0;
            let dy = (y as f64 - cy) / 4.0;
            if dx * dx + dy * dy <= 1.0 {
                grid[(x, y, 0)] = 1;
            }
        }
    }
    let cc = single_component(&grid);
    let (a, b, c) = compute_ellipse_dimensions(&cc);
    assert_eq!(c, 0.0);
    assert!(a >= b);
}
