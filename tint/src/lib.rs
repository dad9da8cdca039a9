pub mod color;
pub mod logit;
pub mod lut;

pub use color::{ColorError, Weights};
pub use logit::{ZERO_WEIGHT_VALUE, denormalize, normalize, transform_channel};
pub use lut::Tint;
