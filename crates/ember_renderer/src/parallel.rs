//! Scanline-parallel rendering with rayon.
//!
//! Each scanline gets its own generator seeded from the frame seed and the
//! row index, so a given seed produces the same image no matter how many
//! worker threads run or in what order rows finish. Rows are disjoint slices
//! of the output buffer, so no locking is needed.

use crate::renderer::{check_buffer, render_row, Image, CHANNELS};
use crate::{Camera, Hittable, RenderError};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Instant;

/// Seed for one scanline's generator.
fn row_seed(seed: u64, row: u64) -> u64 {
    // splitmix64 step so neighbouring rows get unrelated streams
    let mut z = seed ^ row.wrapping_mul(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Render into a caller-allocated RGB8 buffer using the current rayon pool.
///
/// Same layout and size rules as [`render`](crate::render).
pub fn render_parallel(
    camera: &Camera,
    world: &dyn Hittable,
    seed: u64,
    pixels: &mut [u8],
) -> Result<(), RenderError> {
    check_buffer(camera, pixels)?;

    let row_len = camera.image_width() as usize * CHANNELS;
    log::info!(
        "Rendering {}x{} @ {} spp, max depth {} on {} threads",
        camera.image_width(),
        camera.image_height(),
        camera.samples_per_pixel(),
        camera.max_depth(),
        rayon::current_num_threads()
    );
    let start = Instant::now();
    let remaining = AtomicU32::new(camera.image_height());

    pixels
        .par_chunks_exact_mut(row_len)
        .enumerate()
        .for_each(|(j, row)| {
            let mut rng = StdRng::seed_from_u64(row_seed(seed, j as u64));
            render_row(camera, world, j as u32, row, &mut rng);
            // Rows finish out of order, so report a count rather than an index
            let left = remaining.fetch_sub(1, Ordering::Relaxed) - 1;
            log::trace!("Scanlines remaining: {}", left);
        });

    log::info!("Rendered in {:?}", start.elapsed());
    Ok(())
}

/// Parallel counterpart of [`render_image`](crate::render_image).
pub fn render_image_parallel(camera: &Camera, world: &dyn Hittable, seed: u64) -> Result<Image, RenderError> {
    let mut image = Image::new(camera.image_width(), camera.image_height());
    render_parallel(camera, world, seed, &mut image.pixels)?;
    Ok(image)
}
