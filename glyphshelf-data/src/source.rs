use crate::{GlyphRaster, Rect};

/// Rasterization failed for a code point the font claims to support.
///
/// This signals an inconsistency between the font's character map and its
/// glyph data; an atlas build that hits it is aborted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("could not load glyph {:?} (U+{:04X}): {reason}", .codepoint, u32::from(*.codepoint))]
pub struct GlyphLoadError {
    /// The code point whose glyph failed to rasterize.
    pub codepoint: char,
    /// What the font engine reported.
    pub reason: String,
}

impl GlyphLoadError {
    /// A load failure for `codepoint` with a human-readable reason.
    pub fn new(codepoint: char, reason: impl Into<String>) -> Self {
        Self { codepoint, reason: reason.into() }
    }
}

/// A font engine configured for a single pixel size.
///
/// Implementations hold whatever rasterizer state they need (hinting caches,
/// scratch buffers), which is why rasterization takes `&mut self`. Use one
/// instance per thread when building several atlases concurrently.
pub trait GlyphSource {
    /// Returns true if the font maps `codepoint` to a non-zero glyph index.
    fn has_glyph(&self, codepoint: char) -> bool;

    /// Rasterizes the glyph for `codepoint` with the text origin at `(0, 0)`.
    ///
    /// # Errors
    /// Returns [`GlyphLoadError`] if the engine cannot produce a coverage mask
    /// for a glyph that [`has_glyph`](Self::has_glyph) reports as present.
    fn rasterize(&mut self, codepoint: char) -> Result<GlyphRaster, GlyphLoadError>;

    /// The font-wide bounding box (union of ascent, descent and side bearings
    /// over all glyphs) at the configured size, in whole pixels with y down.
    fn font_bounds(&self) -> Rect;
}

impl<S: GlyphSource + ?Sized> GlyphSource for &mut S {
    fn has_glyph(&self, codepoint: char) -> bool {
        (**self).has_glyph(codepoint)
    }

    fn rasterize(&mut self, codepoint: char) -> Result<GlyphRaster, GlyphLoadError> {
        (**self).rasterize(codepoint)
    }

    fn font_bounds(&self) -> Rect {
        (**self).font_bounds()
    }
}
