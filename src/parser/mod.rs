//! Segmentation and classification of the converted text stream.

mod classifier;
mod options;
mod segmenter;

pub use classifier::{classify, cross_references, section_id, section_type, Classifier};
pub use options::{ProcessOptions, DEFAULT_QUALITY_THRESHOLD};
pub use segmenter::{segment, Block, Segmenter};
