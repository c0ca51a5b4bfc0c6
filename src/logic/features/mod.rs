//! Features Module - Artifact feature extraction
//!
//! ## Structure
//! - `extractor.rs` - FeatureExtractor trait + default file extractor
//! - `pe.rs` - PE header parsing (entry point lookup)

pub mod extractor;
pub mod pe;

pub use extractor::{FeatureExtractor, FileFeatureExtractor};
