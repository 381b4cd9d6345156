//! Camera for ray generation.
//!
//! [`CameraConfig`] holds the user-facing settings. [`Camera::new`] validates
//! them once and derives the viewing basis and focal-plane viewport. The
//! derived state is read-only: changing a setting means building a new camera.

use crate::{ConfigError, CHANNELS};
use ember_math::{random_in_unit_disk, unit_vector, Point3, Ray, Vec3};
use rand::RngCore;
use serde::{Deserialize, Serialize};

/// Camera settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    // Camera positioning
    pub position: Point3,
    pub target: Point3,
    pub world_up: Vec3,

    // Lens settings
    pub vfov_degrees: f32,   // Vertical field of view in degrees
    pub aspect_ratio: f32,   // Image width / height
    pub aperture: f32,       // Lens diameter, 0 disables depth of field
    pub focus_distance: f32, // Distance from camera to plane of perfect focus

    // Image settings
    pub image_width: u32,
    pub samples_per_pixel: u32,
    pub max_depth: u32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        let position = Point3::new(-2.0, 2.0, 1.0);
        let target = Point3::new(0.0, 0.0, -1.0);
        Self {
            position,
            target,
            world_up: Vec3::Y,
            vfov_degrees: 20.0,
            aspect_ratio: 16.0 / 9.0,
            aperture: 0.0,
            focus_distance: (position - target).length(),
            image_width: 800,
            samples_per_pixel: 100,
            max_depth: 50,
        }
    }
}

impl CameraConfig {
    /// Set image width and aspect ratio. Height is derived from both.
    pub fn with_resolution(mut self, image_width: u32, aspect_ratio: f32) -> Self {
        self.image_width = image_width;
        self.aspect_ratio = aspect_ratio;
        self
    }

    /// Set quality settings.
    pub fn with_quality(mut self, samples_per_pixel: u32, max_depth: u32) -> Self {
        self.samples_per_pixel = samples_per_pixel;
        self.max_depth = max_depth;
        self
    }

    /// Set camera position.
    pub fn with_position(mut self, position: Point3, target: Point3, world_up: Vec3) -> Self {
        self.position = position;
        self.target = target;
        self.world_up = world_up;
        self
    }

    /// Set lens settings.
    pub fn with_lens(mut self, vfov_degrees: f32, aperture: f32, focus_distance: f32) -> Self {
        self.vfov_degrees = vfov_degrees;
        self.aperture = aperture;
        self.focus_distance = focus_distance;
        self
    }

    /// Image height in pixels for this configuration.
    pub fn image_height(&self) -> u32 {
        image_height_for(self.image_width, self.aspect_ratio)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.image_width == 0 {
            return Err(ConfigError::ZeroImageWidth);
        }
        if self.samples_per_pixel == 0 {
            return Err(ConfigError::ZeroSamples);
        }
        if !self.aspect_ratio.is_finite() || self.aspect_ratio <= 0.0 {
            return Err(ConfigError::InvalidAspectRatio(self.aspect_ratio));
        }
        let height = self.image_height();
        let buffer_len = (self.image_width as usize)
            .checked_mul(height as usize)
            .and_then(|pixels| pixels.checked_mul(CHANNELS));
        if !buffer_len.is_some_and(|len| len <= isize::MAX as usize) {
            return Err(ConfigError::ImageTooLarge {
                width: self.image_width,
                height,
            });
        }
        if !(self.vfov_degrees > 0.0 && self.vfov_degrees < 180.0) {
            return Err(ConfigError::InvalidFieldOfView(self.vfov_degrees));
        }
        if !self.aperture.is_finite() || self.aperture < 0.0 {
            return Err(ConfigError::InvalidAperture(self.aperture));
        }
        if !self.focus_distance.is_finite() || self.focus_distance <= 0.0 {
            return Err(ConfigError::InvalidFocusDistance(self.focus_distance));
        }
        Ok(())
    }
}

/// Image height for a width and aspect ratio: `round(width / aspect)`, at least 1.
pub fn image_height_for(image_width: u32, aspect_ratio: f32) -> u32 {
    let height = (image_width as f32 / aspect_ratio).round();
    // `as` saturates, NaN becomes 0
    (height as u32).max(1)
}

/// Thin-lens camera for generating rays into the scene.
#[derive(Debug, Clone)]
pub struct Camera {
    config: CameraConfig,
    image_height: u32,

    // Orthonormal basis
    right: Vec3,
    up: Vec3,
    forward: Vec3,

    // Focal plane, scaled by the focus distance
    viewport_width: Vec3,
    viewport_height: Vec3,
    viewport_origin: Point3, // Top-left corner
    lens_radius: f32,
}

impl Camera {
    /// Validate `config` and derive the viewing geometry.
    pub fn new(config: CameraConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let forward = unit_vector(config.target - config.position);
        let right = unit_vector(forward.cross(config.world_up));
        if forward == Vec3::ZERO || right == Vec3::ZERO {
            return Err(ConfigError::DegenerateView);
        }
        let up = right.cross(forward);

        // Viewport dimensions at unit distance
        let theta = config.vfov_degrees.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_h = 2.0 * h;
        let viewport_w = config.aspect_ratio * viewport_h;

        let viewport_width = right * (viewport_w * config.focus_distance);
        let viewport_height = up * (viewport_h * config.focus_distance);

        let focus_center = config.position + forward * config.focus_distance;
        let viewport_origin = focus_center - viewport_width / 2.0 + viewport_height / 2.0;

        let camera = Self {
            config,
            image_height: config.image_height(),
            right,
            up,
            forward,
            viewport_width,
            viewport_height,
            viewport_origin,
            lens_radius: config.aperture / 2.0,
        };

        log::debug!(
            "Camera {}x{}: forward={:?} right={:?} up={:?} lens_radius={}",
            camera.image_width(),
            camera.image_height,
            camera.forward,
            camera.right,
            camera.up,
            camera.lens_radius
        );

        Ok(camera)
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    pub fn image_width(&self) -> u32 {
        self.config.image_width
    }

    pub fn image_height(&self) -> u32 {
        self.image_height
    }

    pub fn samples_per_pixel(&self) -> u32 {
        self.config.samples_per_pixel
    }

    pub fn max_depth(&self) -> u32 {
        self.config.max_depth
    }

    pub fn lens_radius(&self) -> f32 {
        self.lens_radius
    }

    /// Camera basis as (right, up, forward).
    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        (self.right, self.up, self.forward)
    }

    /// World-space top-left corner of the focal-plane viewport.
    pub fn viewport_origin(&self) -> Point3 {
        self.viewport_origin
    }

    /// Generate a ray through normalized screen coordinates `(s, t)`.
    ///
    /// `(0, 0)` is the top-left of the viewport and `(1, 1)` the bottom-right.
    /// With a non-zero aperture the ray origin is jittered across the lens,
    /// which blurs everything off the focal plane.
    pub fn get_ray(&self, s: f32, t: f32, rng: &mut dyn RngCore) -> Ray {
        // Screen y grows downwards, camera up grows upwards
        let viewport_point =
            self.viewport_origin + s * self.viewport_width - t * self.viewport_height;

        let ray_origin = if self.lens_radius <= 0.0 {
            self.config.position
        } else {
            self.defocus_disk_sample(rng)
        };

        Ray::new(ray_origin, viewport_point - ray_origin)
    }

    /// Sample a point on the lens disk.
    fn defocus_disk_sample(&self, rng: &mut dyn RngCore) -> Point3 {
        let p = random_in_unit_disk(rng) * self.lens_radius;
        self.config.position + p.x * self.right + p.y * self.up
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn looking_down_z() -> CameraConfig {
        CameraConfig::default()
            .with_resolution(100, 1.0)
            .with_position(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), Vec3::Y)
            .with_lens(90.0, 0.0, 1.0)
    }

    #[test]
    fn test_image_height_derivation() {
        assert_eq!(image_height_for(800, 16.0 / 9.0), 450);
        assert_eq!(image_height_for(10, 100.0), 1);
        assert_eq!(image_height_for(1, 2.0), 1);

        let camera = Camera::new(CameraConfig::default()).unwrap();
        assert_eq!(camera.image_width(), 800);
        assert_eq!(camera.image_height(), 450);
    }

    #[test]
    fn test_camera_basis() {
        let camera = Camera::new(looking_down_z()).unwrap();
        let (right, up, forward) = camera.basis();

        assert!((forward - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-6);
        assert!((right - Vec3::X).length() < 1e-6);
        assert!((up - Vec3::Y).length() < 1e-6);
    }

    #[test]
    fn test_viewport_corners() {
        // 90 degree fov at focus distance 1: viewport spans [-1, 1] on both axes
        let camera = Camera::new(looking_down_z()).unwrap();
        let mut rng = StdRng::seed_from_u64(42);

        assert!((camera.viewport_origin() - Vec3::new(-1.0, 1.0, -1.0)).length() < 1e-5);

        let top_left = camera.get_ray(0.0, 0.0, &mut rng);
        assert_eq!(top_left.origin(), Vec3::ZERO);
        assert!((top_left.direction() - Vec3::new(-1.0, 1.0, -1.0)).length() < 1e-5);

        let center = camera.get_ray(0.5, 0.5, &mut rng);
        assert!((center.direction() - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-5);

        let bottom_right = camera.get_ray(1.0, 1.0, &mut rng);
        assert!((bottom_right.direction() - Vec3::new(1.0, -1.0, -1.0)).length() < 1e-5);
    }

    #[test]
    fn test_depth_of_field_rays_converge_on_focal_plane() {
        let config = looking_down_z().with_lens(90.0, 2.0, 5.0);
        let camera = Camera::new(config).unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        let focus_point = Vec3::new(0.0, 0.0, -5.0);
        let mut jittered = false;
        for _ in 0..100 {
            let ray = camera.get_ray(0.5, 0.5, &mut rng);
            // Origin stays on the lens disk
            assert!(ray.origin().z.abs() < 1e-6);
            assert!(ray.origin().length() < camera.lens_radius() + 1e-6);
            jittered |= ray.origin() != Vec3::ZERO;

            // Every ray passes through the in-focus point at t = 1
            assert!((ray.at(1.0) - focus_point).length() < 1e-4);
        }
        assert!(jittered);
    }

    #[test]
    fn test_invalid_configs_rejected() {
        let base = looking_down_z();

        assert_eq!(
            Camera::new(base.with_resolution(0, 1.0)).unwrap_err(),
            ConfigError::ZeroImageWidth
        );
        assert_eq!(Camera::new(base.with_quality(0, 10)).unwrap_err(), ConfigError::ZeroSamples);
        assert!(matches!(
            Camera::new(base.with_resolution(100, 0.0)),
            Err(ConfigError::InvalidAspectRatio(_))
        ));
        assert!(matches!(
            Camera::new(base.with_lens(180.0, 0.0, 1.0)),
            Err(ConfigError::InvalidFieldOfView(_))
        ));
        assert!(matches!(
            Camera::new(base.with_lens(90.0, -1.0, 1.0)),
            Err(ConfigError::InvalidAperture(_))
        ));
        assert!(matches!(
            Camera::new(base.with_lens(90.0, 0.0, 0.0)),
            Err(ConfigError::InvalidFocusDistance(_))
        ));
        assert_eq!(
            Camera::new(base.with_position(Vec3::ZERO, Vec3::Y, Vec3::Y)).unwrap_err(),
            ConfigError::DegenerateView
        );
        assert_eq!(
            Camera::new(base.with_position(Vec3::ONE, Vec3::ONE, Vec3::Y)).unwrap_err(),
            ConfigError::DegenerateView
        );
    }

    #[test]
    fn test_oversized_image_rejected() {
        // Height saturates to u32::MAX, so the RGB buffer size overflows
        let config = looking_down_z().with_resolution(u32::MAX, 1e-30);
        assert_eq!(config.image_height(), u32::MAX);
        assert_eq!(
            Camera::new(config).unwrap_err(),
            ConfigError::ImageTooLarge {
                width: u32::MAX,
                height: u32::MAX
            }
        );

        let camera = Camera::new(looking_down_z().with_resolution(4000, 2.0)).unwrap();
        assert_eq!(crate::renderer::buffer_len(&camera), 4000 * 2000 * 3);
    }

    #[test]
    fn test_zero_depth_is_valid() {
        assert!(Camera::new(looking_down_z().with_quality(1, 0)).is_ok());
    }

    #[test]
    fn test_config_json_defaults() {
        let config: CameraConfig =
            serde_json::from_str(r#"{ "image_width": 320, "samples_per_pixel": 8 }"#).unwrap();
        assert_eq!(config.image_width, 320);
        assert_eq!(config.samples_per_pixel, 8);
        assert_eq!(config.max_depth, CameraConfig::default().max_depth);
        assert_eq!(config.image_height(), 180);
    }
}
