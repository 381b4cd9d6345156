//! Ember math - vectors, rays, intervals and random sampling for the path tracer.

// Re-export glam for convenience
pub use glam::*;

mod interval;
mod ray;
pub mod sampling;
pub mod vector;

pub use interval::Interval;
pub use ray::Ray;
pub use sampling::{gen_f32, gen_range, random_in_unit_disk, random_in_unit_sphere, random_unit_vector};
pub use vector::{near_zero, project, reflect, refract, unit_vector};

/// A position in world space. Same representation as a free vector.
pub type Point3 = Vec3;

/// Linear RGB color, channels nominally in [0, 1].
pub type Color = Vec3;
