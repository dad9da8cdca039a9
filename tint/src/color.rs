use std::fmt;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorError {
    #[error("requires hex RGB colors in format 112233, got {0} characters")]
    InvalidLength(usize),
    #[error("invalid hex digit in color {0:?}")]
    InvalidDigit(String),
}

/// Per-channel color weights, each in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Weights {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Weights {
    /// Weights used when a highlight carries no color.
    pub const BLACK: Weights = Weights {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };

    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Parses a 6 hex digit color (`"ff8000"`, no leading `#`) into weights
    /// `byte / 255`.
    pub fn from_hex(color: &str) -> Result<Self, ColorError> {
        let len = color.chars().count();
        if len != 6 {
            return Err(ColorError::InvalidLength(len));
        }
        if !color.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorError::InvalidDigit(color.to_string()));
        }

        let byte = |i: usize| {
            u8::from_str_radix(&color[i..i + 2], 16)
                .map_err(|_| ColorError::InvalidDigit(color.to_string()))
        };

        Ok(Self {
            r: byte(0)? as f64 / 255.0,
            g: byte(2)? as f64 / 255.0,
            b: byte(4)? as f64 / 255.0,
        })
    }

    pub fn as_array(&self) -> [f64; 3] {
        [self.r, self.g, self.b]
    }
}

impl fmt::Display for Weights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3}, {:.3})", self.r, self.g, self.b)
    }
}
