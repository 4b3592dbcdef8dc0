//! Data types shared by the glyph atlas builder and its consumers.
//!
//! Integer pixel geometry, 26.6 fixed-point advances, 8-bit coverage images,
//! the packed [`FontAtlas`] with its text layout helpers, and the
//! [`GlyphSource`] trait rasterizers implement.

mod atlas;
mod fixed;
mod geometry;
mod glyph;
mod image;
mod layout;
mod source;

pub use atlas::{FontAtlas, PackingOverflow};
pub use fixed::Fixed26_6;
pub use geometry::{Point, Rect};
pub use glyph::{CodepointRange, GlyphPlacement, GlyphRaster};
pub use image::GrayImage;
pub use layout::{GlyphQuad, ScaledGlyphQuad};
pub use source::{GlyphLoadError, GlyphSource};
