use crate::record::Highlight;

/// Corners of a highlight: upper-left inclusive, lower-right exclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HighlightBox {
    pub x1: i64,
    pub y1: i64,
    pub x2: i64,
    pub y2: i64,
}

/// In-bounds rectangle of an image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Region {
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }
}

impl HighlightBox {
    pub fn from_highlight(hl: &Highlight) -> Self {
        Self {
            x1: hl.x,
            y1: hl.y,
            x2: hl.x.saturating_add(hl.width as i64),
            y2: hl.y.saturating_add(hl.height as i64),
        }
    }

    /// Intersects the box with a `width` x `height` image. `None` when no
    /// pixel of the box is inside the image.
    pub fn clip(&self, width: u32, height: u32) -> Option<Region> {
        let x1 = self.x1.clamp(0, width as i64);
        let y1 = self.y1.clamp(0, height as i64);
        let x2 = self.x2.clamp(0, width as i64);
        let y2 = self.y2.clamp(0, height as i64);
        if x2 <= x1 || y2 <= y1 {
            return None;
        }
        Some(Region::new(
            x1 as u32,
            y1 as u32,
            (x2 - x1) as u32,
            (y2 - y1) as u32,
        ))
    }
}
