use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::{Rgb, RgbImage, imageops};
use imageproc::map::map_colors;
use tint::Tint;

use crate::{
    geom::{HighlightBox, Region},
    io,
    record::Highlight,
    viewer::Viewer,
};

pub struct HighlightCfg {
    pub show: bool,
    pub suffix: String, // inserted before the output extension
}

impl Default for HighlightCfg {
    fn default() -> Self {
        Self {
            show: true,
            suffix: "_HIGHLIGHTED".to_string(),
        }
    }
}

/// Tints the highlighted rectangles of one image.
pub struct Highlighter {
    image_path: PathBuf,
    image: RgbImage,
    highlights: Vec<Highlight>,
    cfg: HighlightCfg,
}

impl Highlighter {
    pub fn new(
        image_path: PathBuf,
        image: RgbImage,
        highlights: Vec<Highlight>,
        cfg: HighlightCfg,
    ) -> Self {
        Self {
            image_path,
            image,
            highlights,
            cfg,
        }
    }

    /// Loads the image and its highlight list.
    pub fn open(image_path: &Path, highlights_path: &Path, cfg: HighlightCfg) -> Result<Self> {
        let image = io::load_image(image_path)?;
        let highlights = io::load_highlights(highlights_path)?;
        log::debug!(
            "Loaded {} ({}x{}) with {} highlights",
            image_path.display(),
            image.width(),
            image.height(),
            highlights.len()
        );
        Ok(Self::new(image_path.to_path_buf(), image, highlights, cfg))
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    /// Applies every highlight in order; later ones paint over earlier ones.
    pub fn render_highlights(&mut self) -> Result<()> {
        let (w, h) = self.image.dimensions();

        for (i, hl) in self.highlights.iter().enumerate() {
            let weights = hl
                .weights()
                .with_context(|| format!("Highlight #{i} ({:?}) has a bad color", hl.comment))?;

            let Some(region) = HighlightBox::from_highlight(hl).clip(w, h) else {
                log::warn!(
                    "{}: box ({}, {}) {}x{} is outside the {w}x{h} image, skipping",
                    hl.comment,
                    hl.x,
                    hl.y,
                    hl.width,
                    hl.height
                );
                continue;
            };
            let tint = Tint::new(weights);
            log::debug!(
                "{}: {}x{} at ({}, {}) weights {}",
                hl.comment,
                region.w,
                region.h,
                region.x,
                region.y,
                tint.weights()
            );

            let tinted = tint_region(&self.image, region, &tint);
            imageops::replace(&mut self.image, &tinted, region.x as i64, region.y as i64);
        }

        Ok(())
    }

    pub fn output_path(&self) -> Result<PathBuf> {
        io::highlighted_path(&self.image_path, &self.cfg.suffix)
    }

    /// Renders, displays and saves. Returns where the result was written.
    pub fn run(mut self, viewer: &dyn Viewer) -> Result<PathBuf> {
        self.render_highlights()?;
        let out_path = self.output_path()?;

        if self.cfg.show {
            if let Err(e) = viewer.show(&self.image) {
                log::warn!("Could not display result: {e:#}");
            }
        }

        log::debug!("Writing highlighted image to: {}", out_path.display());
        io::save_image(&self.image, &out_path)?;
        Ok(out_path)
    }
}

/// Crops `region` out of `img` and runs every pixel through `tint`.
pub fn tint_region(img: &RgbImage, region: Region, tint: &Tint) -> RgbImage {
    let sub = imageops::crop_imm(img, region.x, region.y, region.w, region.h).to_image();
    map_colors(&sub, |p: Rgb<u8>| Rgb(tint.apply(p.0)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewer::NoViewer;
    use std::cell::Cell;
    use tempfile::tempdir;
    use tint::{Weights, ZERO_WEIGHT_VALUE, transform_channel};

    const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

    fn hl(x: i64, y: i64, width: u32, height: u32, color: Option<&str>) -> Highlight {
        Highlight {
            x,
            y,
            width,
            height,
            comment: "test".to_string(),
            color: color.map(str::to_string),
        }
    }

    fn highlighter(img: RgbImage, highlights: Vec<Highlight>) -> Highlighter {
        Highlighter::new(
            PathBuf::from("img.png"),
            img,
            highlights,
            HighlightCfg::default(),
        )
    }

    struct CountingViewer(Cell<u32>);

    impl Viewer for CountingViewer {
        fn show(&self, _img: &RgbImage) -> Result<()> {
            self.0.set(self.0.get() + 1);
            Ok(())
        }
    }

    struct FailingViewer;

    impl Viewer for FailingViewer {
        fn show(&self, _img: &RgbImage) -> Result<()> {
            anyhow::bail!("no display")
        }
    }

    #[test]
    fn white_weight_keeps_white() {
        let img = RgbImage::from_pixel(10, 10, WHITE);
        let mut h = highlighter(img, vec![hl(0, 0, 10, 10, Some("ffffff"))]);
        h.render_highlights().unwrap();
        assert!(h.image().pixels().all(|p| *p == WHITE));
    }

    #[test]
    fn black_weight_hits_fixed_point() {
        let img = RgbImage::from_pixel(10, 10, WHITE);
        let mut h = highlighter(img, vec![hl(0, 0, 10, 10, Some("000000"))]);
        h.render_highlights().unwrap();
        let v = ZERO_WEIGHT_VALUE;
        assert!(h.image().pixels().all(|p| p.0 == [v, v, v]));
    }

    #[test]
    fn missing_color_acts_as_black() {
        let img = RgbImage::from_pixel(4, 4, Rgb([10, 200, 90]));
        let mut h = highlighter(img, vec![hl(0, 0, 4, 4, None)]);
        h.render_highlights().unwrap();
        let v = ZERO_WEIGHT_VALUE;
        assert!(h.image().pixels().all(|p| p.0 == [v, v, v]));
    }

    #[test]
    fn only_the_box_is_touched() {
        let img = RgbImage::from_pixel(10, 10, WHITE);
        let mut h = highlighter(img, vec![hl(2, 3, 4, 5, Some("000000"))]);
        h.render_highlights().unwrap();

        for (x, y, p) in h.image().enumerate_pixels() {
            let inside = (2..6).contains(&x) && (3..8).contains(&y);
            if inside {
                assert_eq!(p.0[0], ZERO_WEIGHT_VALUE, "({x}, {y})");
            } else {
                assert_eq!(*p, WHITE, "({x}, {y})");
            }
        }
    }

    #[test]
    fn later_highlights_override_earlier_ones() {
        let base = Rgb([200, 100, 50]);
        let img = RgbImage::from_pixel(10, 10, base);
        let mut h = highlighter(
            img,
            vec![
                hl(0, 0, 6, 6, Some("ff0000")),
                hl(4, 4, 6, 6, Some("0000ff")),
            ],
        );
        h.render_highlights().unwrap();

        let red_only = Rgb([
            transform_channel(200, 1.0),
            ZERO_WEIGHT_VALUE,
            ZERO_WEIGHT_VALUE,
        ]);
        let blue_only = Rgb([
            ZERO_WEIGHT_VALUE,
            ZERO_WEIGHT_VALUE,
            transform_channel(50, 1.0),
        ]);
        // the second box reads pixels the first one already tinted
        let both = Rgb([
            ZERO_WEIGHT_VALUE,
            ZERO_WEIGHT_VALUE,
            transform_channel(ZERO_WEIGHT_VALUE, 1.0),
        ]);

        assert_eq!(*h.image().get_pixel(1, 1), red_only);
        assert_eq!(*h.image().get_pixel(8, 8), blue_only);
        assert_eq!(*h.image().get_pixel(5, 5), both);
        assert_eq!(*h.image().get_pixel(9, 0), base);
        assert_ne!(*h.image().get_pixel(5, 5), red_only);
    }

    #[test]
    fn out_of_bounds_box_is_clipped_or_skipped() {
        let img = RgbImage::from_pixel(5, 5, WHITE);
        let mut h = highlighter(
            img,
            vec![hl(3, 3, 10, 10, Some("000000")), hl(20, 20, 2, 2, None)],
        );
        h.render_highlights().unwrap();
        assert_eq!(h.image().get_pixel(4, 4).0[0], ZERO_WEIGHT_VALUE);
        assert_eq!(*h.image().get_pixel(2, 2), WHITE);
    }

    #[test]
    fn bad_color_aborts_rendering() {
        let img = RgbImage::from_pixel(5, 5, WHITE);
        let mut h = highlighter(img, vec![hl(0, 0, 5, 5, Some("1122334"))]);
        let err = h.render_highlights().unwrap_err();
        assert!(format!("{err:#}").contains("112233"));
    }

    #[test]
    fn tint_region_matches_weights() {
        let img = RgbImage::from_fn(4, 4, |x, y| Rgb([(x * 60) as u8, (y * 60) as u8, 128]));
        let weights = Weights::from_hex("80ff00").unwrap();
        let out = tint_region(&img, Region::new(1, 1, 2, 3), &Tint::new(weights));
        assert_eq!(out.dimensions(), (2, 3));
        let src = img.get_pixel(2, 3).0;
        assert_eq!(
            out.get_pixel(1, 2).0,
            [
                transform_channel(src[0], weights.r),
                transform_channel(src[1], weights.g),
                transform_channel(src[2], weights.b),
            ]
        );
    }

    #[test]
    fn run_saves_next_to_input_and_shows_once() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("photo.png");
        RgbImage::from_pixel(10, 10, WHITE).save(&input).unwrap();
        let json = dir.path().join("hl.json");
        std::fs::write(
            &json,
            r#"[{"x": 0, "y": 0, "width": 10, "height": 10, "comment": "all", "color": "000000"}]"#,
        )
        .unwrap();

        let viewer = CountingViewer(Cell::new(0));
        let h = Highlighter::open(&input, &json, HighlightCfg::default()).unwrap();
        let out = h.run(&viewer).unwrap();

        assert_eq!(out, dir.path().join("photo_HIGHLIGHTED.png"));
        assert_eq!(viewer.0.get(), 1);
        let saved = io::load_image(&out).unwrap();
        let v = ZERO_WEIGHT_VALUE;
        assert!(saved.pixels().all(|p| p.0 == [v, v, v]));
    }

    #[test]
    fn run_without_show_skips_viewer() {
        let dir = tempdir().unwrap();
        let cfg = HighlightCfg {
            show: false,
            ..HighlightCfg::default()
        };
        let viewer = CountingViewer(Cell::new(0));
        let h = Highlighter::new(
            dir.path().join("a.png"),
            RgbImage::new(2, 2),
            Vec::new(),
            cfg,
        );
        h.run(&viewer).unwrap();
        assert_eq!(viewer.0.get(), 0);
        assert!(dir.path().join("a_HIGHLIGHTED.png").exists());
    }

    #[test]
    fn viewer_failure_still_saves() {
        let dir = tempdir().unwrap();
        let h = Highlighter::new(
            dir.path().join("a.png"),
            RgbImage::new(2, 2),
            Vec::new(),
            HighlightCfg::default(),
        );
        let out = h.run(&FailingViewer).unwrap();
        assert!(out.exists());
    }

    #[test]
    fn huge_origin_from_json_is_skipped() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("photo.png");
        RgbImage::from_pixel(4, 4, WHITE).save(&input).unwrap();
        let json = dir.path().join("hl.json");
        std::fs::write(
            &json,
            r#"[{"x": 9223372036854775807, "y": 0, "width": 1, "height": 1}]"#,
        )
        .unwrap();

        let h = Highlighter::open(&input, &json, HighlightCfg::default()).unwrap();
        let out = h.run(&NoViewer).unwrap();
        assert!(io::load_image(&out).unwrap().pixels().all(|p| *p == WHITE));
    }

    #[test]
    fn failed_render_writes_nothing() {
        let dir = tempdir().unwrap();
        let h = Highlighter::new(
            dir.path().join("a.png"),
            RgbImage::new(2, 2),
            vec![hl(0, 0, 1, 1, None), hl(0, 0, 1, 1, Some("zz0000"))],
            HighlightCfg::default(),
        );
        assert!(h.run(&NoViewer).is_err());
        assert!(!dir.path().join("a_HIGHLIGHTED.png").exists());
    }
}
