//! Deterministic 3D simplex noise and a divergence-free curl field built on it.
//!
//! `noise3` is the classic tetrahedral-lattice simplex construction with a
//! mod-289 permutation polynomial and gradients spread over a 7×7 grid on an
//! octahedron. It holds no state: identical input always gives identical
//! output, on the CPU and in `particles.wgsl`.

use crate::constants::CURL_EPSILON;
use glam::{Vec3, Vec4};

#[inline]
fn mod289_3(x: Vec3) -> Vec3 {
    x - (x * (1.0 / 289.0)).floor() * 289.0
}

#[inline]
fn mod289_4(x: Vec4) -> Vec4 {
    x - (x * (1.0 / 289.0)).floor() * 289.0
}

#[inline]
fn permute(x: Vec4) -> Vec4 {
    mod289_4((x * 34.0 + Vec4::ONE) * x)
}

#[inline]
fn taylor_inv_sqrt(r: f32) -> f32 {
    1.792_842_9 - 0.853_734_7 * r
}

/// Shader `step`: 0 below the edge, 1 at or above it.
#[inline]
fn step(edge: f32, x: f32) -> f32 {
    if x < edge {
        0.0
    } else {
        1.0
    }
}

/// 3D simplex noise in roughly [-1, 1].
pub fn noise3(v: Vec3) -> f32 {
    const SKEW: f32 = 1.0 / 3.0;
    const UNSKEW: f32 = 1.0 / 6.0;

    // First corner
    let i = (v + Vec3::splat(v.dot(Vec3::splat(SKEW)))).floor();
    let x0 = v - i + Vec3::splat(i.dot(Vec3::splat(UNSKEW)));

    // Other corners
    let g = Vec3::new(step(x0.y, x0.x), step(x0.z, x0.y), step(x0.x, x0.z));
    let l = Vec3::ONE - g;
    let l_zxy = Vec3::new(l.z, l.x, l.y);
    let i1 = g.min(l_zxy);
    let i2 = g.max(l_zxy);

    let x1 = x0 - i1 + Vec3::splat(UNSKEW);
    let x2 = x0 - i2 + Vec3::splat(SKEW);
    let x3 = x0 - Vec3::splat(0.5);

    // Permutations
    let i = mod289_3(i);
    let p = permute(
        permute(
            permute(Vec4::splat(i.z) + Vec4::new(0.0, i1.z, i2.z, 1.0))
                + Vec4::splat(i.y)
                + Vec4::new(0.0, i1.y, i2.y, 1.0),
        ) + Vec4::splat(i.x)
            + Vec4::new(0.0, i1.x, i2.x, 1.0),
    );

    // Gradients: 7x7 points over a square, mapped onto an octahedron.
    const N: f32 = 1.0 / 7.0;
    let ns = Vec3::new(2.0 * N, 0.5 * N - 1.0, N);

    let j = p - (p * ns.z * ns.z).floor() * 49.0;
    let x_ = (j * ns.z).floor();
    let y_ = (j - x_ * 7.0).floor();

    let x = x_ * ns.x + Vec4::splat(ns.y);
    let y = y_ * ns.x + Vec4::splat(ns.y);
    let h = Vec4::ONE - x.abs() - y.abs();

    let corners = [x0, x1, x2, x3];
    let mut total = 0.0;
    for (k, corner) in corners.iter().enumerate() {
        let sh = if h[k] > 0.0 { 0.0 } else { -1.0 };
        let gx = x[k] + (x[k].floor() * 2.0 + 1.0) * sh;
        let gy = y[k] + (y[k].floor() * 2.0 + 1.0) * sh;
        let grad = Vec3::new(gx, gy, h[k]);
        let grad = grad * taylor_inv_sqrt(grad.dot(grad));

        let m = (0.6 - corner.dot(*corner)).max(0.0);
        let m2 = m * m;
        total += m2 * m2 * grad.dot(*corner);
    }
    42.0 * total
}

/// Curl of the scalar noise field via central differences with step
/// [`CURL_EPSILON`].
///
/// Each output axis is the difference of two partial derivatives taken along
/// the other two axes, so the divergence of the result cancels term by term.
/// Each partial is sampled once (six `noise3` calls); it is still the most
/// expensive call in the model and is made at most once per particle per frame.
pub fn curl3(p: Vec3) -> Vec3 {
    let e = CURL_EPSILON;
    let inv = 1.0 / (2.0 * e);
    let dx = (noise3(Vec3::new(p.x + e, p.y, p.z)) - noise3(Vec3::new(p.x - e, p.y, p.z))) * inv;
    let dy = (noise3(Vec3::new(p.x, p.y + e, p.z)) - noise3(Vec3::new(p.x, p.y - e, p.z))) * inv;
    let dz = (noise3(Vec3::new(p.x, p.y, p.z + e)) - noise3(Vec3::new(p.x, p.y, p.z - e))) * inv;
    Vec3::new(dy - dz, dz - dx, dx - dy)
}
