use approx::assert_relative_eq;
use ndarray::Array3;
use ndarray_shapes::{bounding_box, bounding_sphere, centroid_distance, label3d, mass_center, ExtractionMode, LabelerConfig};

fn components(grid: &Array3<u8>) -> Vec<ndarray_shapes::Component> {
    let config = LabelerConfig::default();
    label3d(grid, ExtractionMode::BackgroundAll, 0u8, &config, 0).unwrap().1
}

#[test]
fn bounding_box_matches_cube_extent() {
    let mut grid = Array3::<u8>::zeros((10, 10, 10));
    for x in 2..6 {
        for y in 3..7 {
            for z in 1..5 {
                grid[(x, y, z)] = 1;
            }
        }
    }
    let cc = &components(&grid)[0];
    let (min, max) = bounding_box(cc);
    assert_eq!(min, (2, 3, 1));
    assert_eq!(max, (5, 6, 4));
}

#[test]
fn mass_center_of_symmetric_cube_is_its_midpoint() {
    let mut grid = Array3::<u8>::zeros((10, 10, 10));
    for x in 2..6 {
        for y in 2..6 {
            for z in 2..6 {
                grid[(x, y, z)] = 1;
            }
        }
    }
    let cc = &components(&grid)[0];
    let (cx, cy, cz) = mass_center(cc);
    assert_relative_eq!(cx, 3.5, epsilon = 1e-9);
    assert_relative_eq!(cy, 3.5, epsilon = 1e-9);
    assert_relative_eq!(cz, 3.5, epsilon = 1e-9);
}

#[test]
fn bounding_sphere_contains_every_voxel() {
    let mut grid = Array3::<u8>::zeros((10, 10, 10));
    for x in 2..7 {
        for y in 2..7 {
            for z in 2..7 {
                grid[(x, y, z)] = 1;
            }
        }
    }
    let cc = &components(&grid)[0];
    let (scx, scy, scz, radius) = bounding_sphere(cc);
    for &(x, y, z) in cc.points() {
        let d = ((x as f64 - scx).powi(2) + (y as f64 - scy).powi(2) + (z as f64 - scz).powi(2)).sqrt();
        assert!(d <= radius + 1e-6);
    }
}

#[test]
fn centroid_distance_between_separated_cubes() {
    let mut grid = Array3::<u8>::zeros((20, 10, 1));
    for x in 0..2 {
        for y in 0..2 {
            grid[(x, y, 0)] = 1;
        }
    }
    for x in 10..12 {
        for y in 0..2 {
            grid[(x, y, 0)] = 1;
        }
    }
    let cc = components(&grid);
    assert_eq!(cc.len(), 2);
    let d = centroid_distance(&cc[0], &cc[1]);
    assert_relative_eq!(d, 10.0, epsilon = 1e-9);
}
