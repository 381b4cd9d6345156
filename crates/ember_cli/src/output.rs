//! Image file output.

use std::path::Path;

use anyhow::{bail, Context, Result};
use ember_renderer::Image;
use image::{ImageFormat, RgbImage};

/// Output format from the file extension. Only PNG and TGA are written.
pub fn output_format(path: &Path) -> Result<ImageFormat> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("png") => Ok(ImageFormat::Png),
        Some("tga") => Ok(ImageFormat::Tga),
        _ => bail!(
            "unsupported output file '{}': use a .png or .tga extension",
            path.display()
        ),
    }
}

/// Encode the rendered RGB8 buffer and write it to `path`.
pub fn save_image(image: Image, path: &Path) -> Result<()> {
    let format = output_format(path)?;
    let (width, height) = (image.width, image.height);
    let buffer = RgbImage::from_raw(width, height, image.into_bytes())
        .context("pixel buffer does not match image dimensions")?;

    buffer
        .save_with_format(path, format)
        .with_context(|| format!("failed to write {}", path.display()))?;

    log::info!("Saved {}x{} image to {}", width, height, path.display());
    Ok(())
}
