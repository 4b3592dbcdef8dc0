use std::fmt;

use crate::{Fixed26_6, GrayImage, Point, Rect};

/// A rasterized glyph as reported by a font engine.
///
/// `bounds` is expressed relative to the text origin (pen position on the
/// baseline) with y pointing down, so glyph ink above the baseline has a
/// negative `min.y`. The coverage for `bounds.min` is found in `mask` at
/// `mask_origin`; pixel `(dx, dy)` of the glyph lives at
/// `mask_origin + (dx, dy)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphRaster {
    /// Tight pixel bounding box relative to the text origin.
    pub bounds: Rect,
    /// Coverage mask; may be larger than `bounds`.
    pub mask: GrayImage,
    /// Position of `bounds.min` inside `mask`.
    pub mask_origin: Point,
    /// Horizontal advance.
    pub advance: Fixed26_6,
}

impl GlyphRaster {
    /// A glyph without ink, such as a space.
    pub fn blank(advance: Fixed26_6) -> Self {
        Self {
            bounds: Rect::default(),
            mask: GrayImage::new(0, 0),
            mask_origin: Point::ZERO,
            advance,
        }
    }
}

/// Where a glyph lives in the atlas and how to position it when rendering.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GlyphPlacement {
    /// Location of the glyph bitmap inside the atlas, in atlas pixels.
    pub rect: Rect,
    /// Negated minimum of the glyph bounding box; the glyph's reference point
    /// relative to the top-left of its bitmap.
    pub center: Point,
    /// Top-left of the glyph bitmap relative to the top-left of the font-wide
    /// bounding box, used to place the quad relative to the pen.
    pub offset: Point,
    /// `x`: horizontal advance in whole pixels, `y`: font-wide line height.
    pub advance: Point,
}

/// A half-open run `[min, max)` of consecutive code points the font maps to a
/// glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CodepointRange {
    /// First code point in the run.
    pub min: u32,
    /// One past the last code point in the run.
    pub max: u32,
}

impl CodepointRange {
    /// A range holding exactly one code point.
    pub fn single(codepoint: u32) -> Self {
        Self { min: codepoint, max: codepoint + 1 }
    }

    /// Number of code points in the run.
    pub fn len(&self) -> u32 {
        self.max.saturating_sub(self.min)
    }

    /// `true` when the run holds no code points.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `codepoint` lies in `[min, max)`.
    pub fn contains(&self, codepoint: u32) -> bool {
        self.min <= codepoint && codepoint < self.max
    }

    /// Returns true if the two half-open ranges share a code point.
    pub fn overlaps(&self, min: u32, max_inclusive: u32) -> bool {
        self.min <= max_inclusive && min < self.max
    }
}

impl fmt::Display for CodepointRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04X}-{:04X}", self.min, self.max.saturating_sub(1))
    }
}
