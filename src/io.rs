use std::{
    ffi::OsString,
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use image::RgbImage;

use crate::record::Highlight;

/// Decodes an image file into 8-bit RGB, dropping any alpha channel.
pub fn load_image(path: &Path) -> Result<RgbImage> {
    let img = image::open(path)
        .with_context(|| format!("Failed to open image: {}", path.display()))?;
    Ok(img.to_rgb8())
}

/// Reads the ordered highlight list. Order is paint order.
pub fn load_highlights(path: &Path) -> Result<Vec<Highlight>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open highlights: {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Malformed highlights file: {}", path.display()))
}

pub fn save_image(img: &RgbImage, path: &Path) -> Result<()> {
    img.save(path)
        .with_context(|| format!("Failed to save image: {}", path.display()))
}

/// Sibling of `input` with `suffix` inserted before the extension:
/// `photo.jpg` becomes `photo_HIGHLIGHTED.jpg`.
pub fn highlighted_path(input: &Path, suffix: &str) -> Result<PathBuf> {
    let stem = input
        .file_stem()
        .with_context(|| format!("Input filename has no stem: {}", input.display()))?;

    let mut name = OsString::from(stem);
    name.push(suffix);
    if let Some(ext) = input.extension() {
        name.push(".");
        name.push(ext);
    }
    Ok(input.with_file_name(name))
}
