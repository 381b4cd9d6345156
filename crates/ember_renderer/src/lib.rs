//! Ember renderer - CPU path tracing.
//!
//! A recursive Monte Carlo path tracer for scenes of spheres with diffuse,
//! metal and glass materials. The entry points take a [`Camera`], a world
//! implementing [`Hittable`] and a random generator, and fill an RGB8 buffer.

mod camera;
mod error;
mod hittable;
mod material;
mod parallel;
mod renderer;
pub mod scene;
mod sphere;

pub use camera::{image_height_for, Camera, CameraConfig};
pub use error::{ConfigError, RenderError};
pub use hittable::{HitRecord, Hittable, HittableList};
pub use material::{Dielectric, Lambertian, Material, Metal, ScatterResult};
pub use parallel::{render_parallel, render_image_parallel};
pub use renderer::{
    color_to_rgb, linear_to_gamma, ray_color, render, render_image, sample_pixel, Image,
    CHANNELS, RAY_T_MIN,
};
pub use scene::{MaterialDesc, Scene, SceneDescription, SceneError, SphereDesc};
pub use sphere::Sphere;

/// Re-export common math types from ember_math
pub use ember_math::{Color, Interval, Point3, Ray, Vec3};
