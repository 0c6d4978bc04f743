use approx::assert_relative_eq;
use ndarray::Array3;
use ndarray_shapes::{compute_hull_ratio, convex_hull, label3d, ExtractionMode, LabelerConfig};

fn single_component(grid: &Array3<u8>) -> ndarray_shapes::Component {
    let config = LabelerConfig::default();
    let (_labels, mut components) = label3d(grid, ExtractionMode::BackgroundAll, 0u8, &config, 0).unwrap();
    assert_eq!(components.len(), 1);
    components.remove(0)
}

#[test]
fn single_voxel_hull_is_zero_one() {
    let mut grid = Array3::<u8>::zeros((5, 5, 1));
    grid[(2, 2, 0)] = 1;
    let cc = single_component(&grid);
    let hull = convex_hull(&cc);
    assert_eq!(hull.contour, 0.0);
    assert_eq!(hull.volume, 1.0);
    assert_eq!(compute_hull_ratio(&cc), 1.0);
}

#[test]
fn small_2d_cluster_below_five_points_uses_fallback() {
    let mut grid = Array3::<u8>::zeros((5, 5, 1));
    grid[(1, 1, 0)] = 1;
    grid[(1, 2, 0)] = 1;
    grid[(1, 3, 0)] = 1;
    let cc = single_component(&grid);
    assert_eq!(cc.size(), 3);
    let hull = convex_hull(&cc);
    assert_eq!(hull.contour, 3.0);
    assert_eq!(hull.volume, 3.0);
}

#[test]
fn square_hull_area_matches_shoelace() {
    // A 4x4 solid square: hull area should equal roughly the square's area.
    let mut grid = Array3::<u8>::zeros((10, 10, 1));
    for x in 2..6 {
        for y in 2..6 {
            grid[(x, y, 0)] = 1;
        }
    }
    let cc = single_component(&grid);
    let hull = convex_hull(&cc);
    // Hull vertices sit on the outer voxel centers (2..5 inclusive), so the
    // enclosed area is a 3x3 square: 9.0.
    assert_relative_eq!(hull.volume, 9.0, epsilon = 1e-6);
    assert!(hull.contour > 0.0);
}

#[test]
fn solid_cube_hull_volume_is_close_to_voxel_count() {
    let mut grid = Array3::<u8>::zeros((10, 10, 10));
    for x in 2..7 {
        for y in 2..7 {
            for z in 2..7 {
                grid[(x, y, z)] = 1;
            }
        }
    }
    let cc = single_component(&grid);
    assert!(!cc.is_2d());
    let hull = convex_hull(&cc);
    assert!(hull.volume > 0.0);
    assert!(hull.contour > 0.0);
    assert!(compute_hull_ratio(&cc) <= 1.0);
}
