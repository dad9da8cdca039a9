use serde::Deserialize;
use tint::{ColorError, Weights};

/// One rectangle to tint, as read from the highlights file.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Highlight {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub color: Option<String>,
}

impl Highlight {
    /// Resolves the tint weights; no color means black.
    pub fn weights(&self) -> Result<Weights, ColorError> {
        match &self.color {
            Some(hex) => Weights::from_hex(hex),
            None => Ok(Weights::BLACK),
        }
    }
}
