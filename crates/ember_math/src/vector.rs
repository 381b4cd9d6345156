//! Vector helpers the path tracer needs beyond what glam provides.
//!
//! All functions are pure: they take vectors by value and return new ones.

use crate::Vec3;

/// Normalize `v`, returning the zero vector when `v` has zero (or non-finite) length.
#[inline]
pub fn unit_vector(v: Vec3) -> Vec3 {
    v.normalize_or_zero()
}

/// True if every component of `v` is within `1e-6` of zero.
///
/// The bound is sized for `f32`: cancellation between a unit normal and a
/// nearly opposite unit vector leaves residues around `1e-7`.
#[inline]
pub fn near_zero(v: Vec3) -> bool {
    const EPS: f32 = 1e-6;
    v.abs().max_element() < EPS
}

/// Reflect `v` about the normal `n`: `v - 2 * dot(v, n) * n`.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract the unit vector `uv` through a surface with unit normal `n`.
///
/// `etai_over_etat` is the ratio of refractive indices. The caller must rule out
/// total internal reflection beforehand; this only does the Snell's law split into
/// perpendicular and parallel parts.
#[inline]
pub fn refract(uv: Vec3, n: Vec3, etai_over_etat: f32) -> Vec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}

/// Project `v` onto `onto`. Projecting onto the zero vector gives zero.
#[inline]
pub fn project(v: Vec3, onto: Vec3) -> Vec3 {
    let len_sq = onto.length_squared();
    if len_sq > 0.0 {
        onto * (v.dot(onto) / len_sq)
    } else {
        Vec3::ZERO
    }
}
