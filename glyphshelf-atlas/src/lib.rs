//! Glyph atlas construction.
//!
//! Surveys every Unicode scalar value a font can render, rasterizes each
//! glyph once, and shelf-packs the coverage masks into a single power-of-two
//! grayscale texture together with per-glyph placement metrics.

mod atlas_generator;
mod coverage;
mod packer;
mod png_export;
mod survey;
#[cfg(test)]
mod synthetic_font;

pub use atlas_generator::{AtlasError, AtlasGenerator};
pub use coverage::{CoverageReport, coverage};
pub use packer::{AtlasSize, pack, pack_with_size};
pub use png_export::{PngExportError, encode_png, save_png, write_png};
pub use survey::{GlyphDescriptor, GlyphSurvey, survey};
