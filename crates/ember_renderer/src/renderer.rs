//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Bounce-limited radiance integration over a sky-dome background
//! - Anti-aliasing via jittered multi-sampling
//! - Gamma correction and 8-bit quantization

use crate::{Camera, Color, Hittable, RenderError};
use ember_math::{gen_f32, unit_vector, Interval, Ray};
use rand::RngCore;
use std::time::Instant;

/// Bytes per pixel in the output buffer (RGB).
pub const CHANNELS: usize = 3;

/// Minimum ray parameter accepted as a hit. Keeps a bounced ray from
/// re-hitting the surface it just left due to floating-point error.
pub const RAY_T_MIN: f32 = 0.001;

/// Compute the color seen along a ray.
///
/// Follows the ray through up to `depth` scattering events, multiplying in
/// each surface's attenuation. A ray that escapes the scene picks up the sky
/// color; one that is absorbed or runs out of bounces contributes black.
///
/// Written as a loop over a running attenuation product rather than recursion,
/// so stack usage does not grow with `depth`.
pub fn ray_color(ray: &Ray, world: &dyn Hittable, depth: u32, rng: &mut dyn RngCore) -> Color {
    let mut ray = *ray;
    let mut throughput = Color::ONE;

    for _ in 0..depth {
        let Some(rec) = world.hit(&ray, Interval::new(RAY_T_MIN, f32::INFINITY)) else {
            return throughput * sky_gradient(&ray);
        };

        match rec.material.scatter(&ray, &rec, rng) {
            Some(result) => {
                throughput *= result.attenuation;
                ray = result.scattered;
            }
            // Absorbed
            None => return Color::ZERO,
        }
    }

    // Bounce budget exhausted
    Color::ZERO
}

/// Sky dome: white at the bottom blending to light blue at the top.
fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = unit_vector(ray.direction());
    let a = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let sky_blue = Color::new(0.5, 0.7, 1.0);
    white.lerp(sky_blue, a)
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert an averaged linear color to gamma-corrected 8-bit RGB.
///
/// Channels are clamped to [0, 0.999] before scaling by 256 so that 1.0
/// maps to 255 instead of overflowing.
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    const INTENSITY: Interval = Interval::new(0.0, 0.999);
    let quantize = |c: f32| (256.0 * INTENSITY.clamp(linear_to_gamma(c))) as u8;
    [quantize(color.x), quantize(color.y), quantize(color.z)]
}

/// Render a single pixel with multi-sampling and return the averaged linear color.
///
/// Each sample is jittered uniformly inside the pixel footprint.
pub fn sample_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    i: u32,
    j: u32,
    rng: &mut dyn RngCore,
) -> Color {
    let width = camera.image_width() as f32;
    let height = camera.image_height() as f32;
    let samples = camera.samples_per_pixel();

    let mut pixel_color = Color::ZERO;
    for _ in 0..samples {
        let s = (i as f32 + gen_f32(rng)) / width;
        let t = (j as f32 + gen_f32(rng)) / height;
        let ray = camera.get_ray(s, t, rng);
        pixel_color += ray_color(&ray, world, camera.max_depth(), rng);
    }

    // Average the samples
    pixel_color / samples as f32
}

/// Number of bytes an RGB8 buffer for this camera must hold.
///
/// `Camera::new` rejects sizes that overflow `usize`.
pub(crate) fn buffer_len(camera: &Camera) -> usize {
    camera.image_width() as usize * camera.image_height() as usize * CHANNELS
}

pub(crate) fn check_buffer(camera: &Camera, pixels: &[u8]) -> Result<(), RenderError> {
    let expected = buffer_len(camera);
    if pixels.len() != expected {
        return Err(RenderError::BufferSize {
            expected,
            actual: pixels.len(),
        });
    }
    Ok(())
}

/// Render one scanline into `row` (exactly `width * 3` bytes).
pub(crate) fn render_row(
    camera: &Camera,
    world: &dyn Hittable,
    j: u32,
    row: &mut [u8],
    rng: &mut dyn RngCore,
) {
    for (i, pixel) in row.chunks_exact_mut(CHANNELS).enumerate() {
        let color = sample_pixel(camera, world, i as u32, j, rng);
        pixel.copy_from_slice(&color_to_rgb(color));
    }
}

/// Render the scene into a caller-allocated RGB8 buffer.
///
/// The buffer is filled row-major, top row first, 3 bytes per pixel, with no
/// padding. It must be exactly `width * height * 3` bytes; otherwise nothing
/// is written. All randomness comes from `rng`, so a seeded generator gives a
/// reproducible image.
pub fn render(
    camera: &Camera,
    world: &dyn Hittable,
    rng: &mut dyn RngCore,
    pixels: &mut [u8],
) -> Result<(), RenderError> {
    check_buffer(camera, pixels)?;
    render_rows(camera, world, rng, pixels);
    Ok(())
}

/// Render the scene into a newly allocated [`Image`].
pub fn render_image(camera: &Camera, world: &dyn Hittable, rng: &mut dyn RngCore) -> Image {
    let mut image = Image::new(camera.image_width(), camera.image_height());
    render_rows(camera, world, rng, &mut image.pixels);
    image
}

/// Scanlines top to bottom, pixels left to right. `pixels` is already sized.
fn render_rows(camera: &Camera, world: &dyn Hittable, rng: &mut dyn RngCore, pixels: &mut [u8]) {
    let width = camera.image_width() as usize;
    let height = camera.image_height();
    log::info!(
        "Rendering {}x{} @ {} spp, max depth {}",
        width,
        height,
        camera.samples_per_pixel(),
        camera.max_depth()
    );
    let start = Instant::now();

    for (j, row) in pixels.chunks_exact_mut(width * CHANNELS).enumerate() {
        render_row(camera, world, j as u32, row, rng);
        log::trace!("Scanlines remaining: {}", height - j as u32 - 1);
    }

    log::info!("Rendered in {:?}", start.elapsed());
}

/// An RGB8 image buffer, row-major, top row first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl Image {
    /// Create a new image filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * CHANNELS],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> [u8; 3] {
        let start = (y as usize * self.width as usize + x as usize) * CHANNELS;
        [self.pixels[start], self.pixels[start + 1], self.pixels[start + 2]]
    }

    /// Raw RGB bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.pixels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CameraConfig, Dielectric, HittableList, Lambertian, Material, Metal, Sphere, Vec3};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Arc;

    fn assert_color_eq(actual: Color, expected: Color) {
        assert!(
            (actual - expected).length() < 1e-5,
            "expected {expected:?}, got {actual:?}"
        );
    }

    fn three_spheres() -> HittableList {
        let ground: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.8, 0.8, 0.0)));
        let glass: Arc<dyn Material> = Arc::new(Dielectric::new(1.5));
        let metal: Arc<dyn Material> = Arc::new(Metal::new(Color::new(0.8, 0.6, 0.2), 0.3));

        let mut world = HittableList::new();
        world.add(Box::new(Sphere::new(Vec3::new(0.0, -100.5, -1.0), 100.0, ground.clone())));
        world.add(Box::new(Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, ground)));
        world.add(Box::new(Sphere::new(Vec3::new(-1.0, 0.0, -1.0), 0.5, glass)));
        world.add(Box::new(Sphere::new(Vec3::new(1.0, 0.0, -1.0), 0.5, metal)));
        world
    }

    fn small_camera(width: u32, samples: u32) -> Camera {
        let config = CameraConfig::default()
            .with_resolution(width, 16.0 / 9.0)
            .with_quality(samples, 8)
            .with_position(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), Vec3::Y)
            .with_lens(90.0, 0.0, 1.0);
        Camera::new(config).unwrap()
    }

    #[test]
    fn test_depth_zero_is_black() {
        let world = three_spheres();
        let mut rng = StdRng::seed_from_u64(1);

        for direction in [Vec3::Y, -Vec3::Y, Vec3::new(0.0, 0.0, -1.0)] {
            let ray = Ray::new(Vec3::ZERO, direction);
            assert_eq!(ray_color(&ray, &world, 0, &mut rng), Color::ZERO);
        }
    }

    #[test]
    fn test_background_gradient() {
        let world = HittableList::new();
        let mut rng = StdRng::seed_from_u64(1);
        let color = |d: Vec3, rng: &mut StdRng| ray_color(&Ray::new(Vec3::ZERO, d), &world, 10, rng);

        assert_color_eq(color(Vec3::new(0.0, -1.0, 0.0), &mut rng), Color::new(1.0, 1.0, 1.0));
        assert_color_eq(color(Vec3::new(0.0, 1.0, 0.0), &mut rng), Color::new(0.5, 0.7, 1.0));
        assert_color_eq(color(Vec3::new(0.0, 0.0, -1.0), &mut rng), Color::new(0.75, 0.85, 1.0));
        // Direction length does not matter
        assert_color_eq(color(Vec3::new(0.0, 5.0, 0.0), &mut rng), Color::new(0.5, 0.7, 1.0));
    }

    #[test]
    fn test_attenuation_applies_to_escaping_ray() {
        // A perfect mirror facing up reflects a downward ray straight to the zenith
        let mirror: Arc<dyn Material> = Arc::new(Metal::new(Color::new(0.5, 0.5, 0.5), 0.0));
        let mut world = HittableList::new();
        world.add(Box::new(Sphere::new(Vec3::new(0.0, -1000.0, 0.0), 1000.0, mirror)));

        let mut rng = StdRng::seed_from_u64(3);
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, -1.0, 0.0));

        let color = ray_color(&ray, &world, 5, &mut rng);
        assert_color_eq(color, Color::new(0.25, 0.35, 0.5));

        // One bounce is not enough to escape
        assert_eq!(ray_color(&ray, &world, 1, &mut rng), Color::ZERO);
    }

    #[test]
    fn test_linear_to_gamma() {
        assert_eq!(linear_to_gamma(0.0), 0.0);
        assert_eq!(linear_to_gamma(-1.0), 0.0);
        assert!((linear_to_gamma(1.0) - 1.0).abs() < 0.0001);
        assert!((linear_to_gamma(0.25) - 0.5).abs() < 0.0001);
    }

    #[test]
    fn test_quantization_boundaries() {
        assert_eq!(color_to_rgb(Color::ONE), [255, 255, 255]);
        assert_eq!(color_to_rgb(Color::ZERO), [0, 0, 0]);
        assert_eq!(color_to_rgb(Color::splat(4.0)), [255, 255, 255]);
        assert_eq!(color_to_rgb(Color::new(0.25, -3.0, 1.0)), [128, 0, 255]);
    }

    #[test]
    fn test_single_sample_white_pixel_is_255() {
        // Empty scene looking straight down: every sample is pure white
        let config = CameraConfig::default()
            .with_resolution(4, 1.0)
            .with_quality(1, 5)
            .with_position(Vec3::ZERO, Vec3::new(0.0, -1.0, 0.0), Vec3::Z)
            .with_lens(1.0, 0.0, 1.0);
        let camera = Camera::new(config).unwrap();
        let world = HittableList::new();
        let mut rng = StdRng::seed_from_u64(9);

        let color = sample_pixel(&camera, &world, 2, 2, &mut rng);
        assert_eq!(color_to_rgb(color), [255, 255, 255]);
    }

    #[test]
    fn test_render_fills_buffer() {
        let camera = small_camera(16, 2);
        let world = three_spheres();
        let mut rng = StdRng::seed_from_u64(42);

        let mut pixels = vec![0u8; 16 * 9 * CHANNELS];
        render(&camera, &world, &mut rng, &mut pixels).unwrap();

        // Top row looks at the sky, which is never black
        assert!(pixels[..16 * CHANNELS].iter().all(|&b| b > 0));
    }

    #[test]
    fn test_render_rejects_wrong_buffer_size() {
        let camera = small_camera(16, 1);
        let world = three_spheres();
        let mut rng = StdRng::seed_from_u64(42);

        let mut pixels = vec![7u8; 10];
        let err = render(&camera, &world, &mut rng, &mut pixels).unwrap_err();
        assert_eq!(
            err,
            RenderError::BufferSize {
                expected: 16 * 9 * 3,
                actual: 10
            }
        );
        assert!(pixels.iter().all(|&b| b == 7));
    }

    #[test]
    fn test_render_is_deterministic_for_seed() {
        let camera = small_camera(12, 3);
        let world = three_spheres();

        let a = render_image(&camera, &world, &mut StdRng::seed_from_u64(5));
        let b = render_image(&camera, &world, &mut StdRng::seed_from_u64(5));
        assert_eq!(a, b);
        assert_eq!(a.width, 12);
        assert_eq!(a.height, 7);
        assert_eq!(a.as_bytes().len(), 12 * 7 * 3);
    }

    #[test]
    fn test_image_get() {
        let mut image = Image::new(2, 2);
        image.pixels[9..12].copy_from_slice(&[1, 2, 3]);
        assert_eq!(image.get(1, 1), [1, 2, 3]);
        assert_eq!(image.get(0, 0), [0, 0, 0]);
        assert_eq!(image.into_bytes().len(), 12);
    }
}
