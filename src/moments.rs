//! Centralized geometric moments.

use crate::component::Component;

/// Central geometric moment `M_pqr = sum (x-cx)^p (y-cy)^q (z-cz)^r` over a
/// component's points, with `(cx, cy, cz)` its mass center.
///
/// In 2D mode (`cc.is_2d()`) the z term is omitted — `r` is ignored rather
/// than raising the `(z - cz)^r` factor, since `z == cz` for every point of
/// a 2D component and that factor would just be `0^r` for any `r > 0`.
pub fn moment(cc: &Component, p: i32, q: i32, r: i32) -> f64 {
    let (cx, cy, cz) = cc.mass_center();
    let is_2d = cc.is_2d();
    cc.points()
        .iter()
        .map(|&(x, y, z)| {
            let dx = x as f64 - cx;
            let dy = y as f64 - cy;
            let dz_term = if is_2d { 1.0 } else { (z as f64 - cz).powi(r) };
            dx.powi(p) * dy.powi(q) * dz_term
        })
        .sum()
}
