//! Font loading and glyph rasterization backed by swash, with system font
//! lookup through fontdb.

mod discovery;
mod error;
mod face;
mod rasterizer;

pub use discovery::FontDiscovery;
pub use error::FontParseError;
pub use face::FontFace;
pub use rasterizer::{RasterOptions, SwashRasterizer};
