use std::path::PathBuf;

use anyhow::{Context, Result};
use image::RgbImage;

/// Shows a rendered image to the user.
pub trait Viewer {
    fn show(&self, img: &RgbImage) -> Result<()>;
}

/// Opens the image in the platform's default viewer.
///
/// The image is written to a kept temporary PNG first since the viewer runs
/// detached and may read it after this process has exited.
pub struct SystemViewer;

impl SystemViewer {
    fn write_temp(img: &RgbImage) -> Result<PathBuf> {
        let file = tempfile::Builder::new()
            .prefix("highlighter-")
            .suffix(".png")
            .tempfile()
            .context("Failed to create temporary file for viewer")?;
        img.save_with_format(file.path(), image::ImageFormat::Png)
            .context("Failed to write temporary image for viewer")?;
        let (_, path) = file.keep().context("Failed to keep temporary image")?;
        Ok(path)
    }
}

impl Viewer for SystemViewer {
    fn show(&self, img: &RgbImage) -> Result<()> {
        let path = Self::write_temp(img)?;
        log::debug!("Opening viewer on {}", path.display());
        open::that_detached(&path)
            .with_context(|| format!("Failed to open viewer for {}", path.display()))
    }
}

/// Headless runs: nothing is displayed.
pub struct NoViewer;

impl Viewer for NoViewer {
    fn show(&self, _img: &RgbImage) -> Result<()> {
        Ok(())
    }
}
