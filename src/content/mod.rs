//! Per-section content processing: normalization, extraction and scoring.

mod extract;
mod normalize;
pub mod quality;

pub use extract::ContentExtractor;
pub use normalize::{NormalizeOptions, Normalizer, BULLET, IMAGE_PLACEHOLDER};
pub use quality::score;
