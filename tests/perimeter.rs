use approx::assert_relative_eq;
use ndarray::Array3;
use ndarray_shapes::{label3d, perimeter, sphericity, ExtractionMode, LabelerConfig};

fn single_component(grid: &Array3<u8>) -> ndarray_shapes::Component {
    let config = LabelerConfig::default();
    let (_labels, mut components) = label3d(grid, ExtractionMode::BackgroundAll, 0u8, &config, 0).unwrap();
    assert_eq!(components.len(), 1);
    components.remove(0)
}

fn solid_cube(side: usize) -> Array3<u8> {
    let mut grid = Array3::<u8>::zeros((side + 8, side + 8, side + 8));
    for x in 4..4 + side {
        for y in 4..4 + side {
            for z in 4..4 + side {
                grid[(x, y, z)] = 1;
            }
        }
    }
    grid
}

#[test]
fn interior_voxel_contributes_nothing() {
    // A 3x3x1 solid square: the center voxel is fully surrounded in-plane.
    let mut grid = Array3::<u8>::zeros((3, 3, 1));
    grid.fill(1);
    let cc = single_component(&grid);
    let result = perimeter(&cc);
    // Every contour voxel has n > 0; the center (1,1,0) is interior (n == 0).
    assert!(!result.contour_points.contains(&(1, 1, 0)));
}

#[test]
fn solid_square_perimeter_is_positive_and_matches_sphericity_input() {
    let mut grid = Array3::<u8>::zeros((3, 3, 1));
    grid.fill(1);
    let cc = single_component(&grid);
    let result = perimeter(&cc);
    assert!(result.perimeter > 0.0);
    let s = sphericity(&cc);
    assert!(s <= 1.0);
    assert!(s > 0.0);
}

#[test]
fn single_voxel_sphericity_is_at_most_one() {
    let mut grid = Array3::<u8>::zeros((5, 5, 1));
    grid[(2, 2, 0)] = 1;
    let cc = single_component(&grid);
    assert!(sphericity(&cc) <= 1.0);
}

#[test]
fn three_dimensional_cube_uses_six_neighborhood() {
    let mut grid = Array3::<u8>::zeros((5, 5, 5));
    for x in 1..4 {
        for y in 1..4 {
            for z in 1..4 {
                grid[(x, y, z)] = 1;
            }
        }
    }
    let cc = single_component(&grid);
    assert!(!cc.is_2d());
    let result = perimeter(&cc);
    assert!(result.perimeter > 0.0);
    // The cube's center voxel (2,2,2) is fully interior.
    assert!(!result.contour_points.contains(&(2, 2, 2)));
}

#[test]
fn solid_cube_sphericity_converges_toward_the_continuum_cube_limit() {
    // A continuous solid cube has sphericity (pi/6)^(1/3) ~= 0.806. The
    // correction term only approaches that limit as O(1/side), so landing
    // within a percent of it needs a cube hundreds of voxels on a side; at a
    // practical size we instead check the measured value moves monotonically
    // closer to the limit as the cube grows, and lands within a few percent
    // by side 120.
    let limit = (std::f64::consts::PI / 6.0).powf(1.0 / 3.0);

    let s30 = sphericity(&single_component(&solid_cube(30)));
    let s60 = sphericity(&single_component(&solid_cube(60)));
    let s120 = sphericity(&single_component(&solid_cube(120)));

    assert!(s30 > s60 && s60 > s120, "expected sphericity to decrease toward the limit as the cube grows");
    assert!((s30 - limit).abs() > (s60 - limit).abs());
    assert!((s60 - limit).abs() > (s120 - limit).abs());
    assert_relative_eq!(s120, limit, epsilon = 0.03 * limit);
}
