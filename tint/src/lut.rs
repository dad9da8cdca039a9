use crate::{color::Weights, logit::transform_channel};

/// Precomputed channel transform for one set of weights.
///
/// A channel has only 256 inputs, so each channel's transform is tabulated
/// once and pixels become three lookups.
pub struct Tint {
    weights: Weights,
    tables: [[u8; 256]; 3],
}

impl Tint {
    pub fn new(weights: Weights) -> Self {
        let mut tables = [[0u8; 256]; 3];
        for (table, w) in tables.iter_mut().zip(weights.as_array()) {
            for (v, out) in table.iter_mut().enumerate() {
                *out = transform_channel(v as u8, w);
            }
        }
        Self { weights, tables }
    }

    pub fn weights(&self) -> Weights {
        self.weights
    }

    #[inline]
    pub fn apply(&self, rgb: [u8; 3]) -> [u8; 3] {
        [
            self.tables[0][rgb[0] as usize],
            self.tables[1][rgb[1] as usize],
            self.tables[2][rgb[2] as usize],
        ]
    }
}
