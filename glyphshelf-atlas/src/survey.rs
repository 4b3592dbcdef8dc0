use glyphshelf_data::{Fixed26_6, GlyphLoadError, GlyphRaster, GlyphSource, GrayImage, Point, Rect};
use glyphshelf_unicode::candidate_codepoints;
use tracing::debug;

/// A rasterized glyph waiting to be packed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphDescriptor {
    /// The code point this glyph renders.
    pub codepoint: char,
    /// Tight ink bounds relative to the pen position, y down. Zero-sized for
    /// glyphs without ink.
    pub bitmap_rect: Rect,
    /// Coverage mask as rasterized, possibly larger than `bitmap_rect`.
    pub mask: GrayImage,
    /// Top-left of `bitmap_rect` inside `mask`.
    pub mask_origin: Point,
    /// Horizontal pen advance.
    pub advance: Fixed26_6,
}

impl GlyphDescriptor {
    /// Wraps a raster produced by a [`GlyphSource`].
    pub fn from_raster(codepoint: char, raster: GlyphRaster) -> Self {
        Self {
            codepoint,
            bitmap_rect: raster.bounds,
            mask: raster.mask,
            mask_origin: raster.mask_origin,
            advance: raster.advance,
        }
    }

    /// Width of the ink bounds in pixels.
    pub fn width(&self) -> u32 {
        self.bitmap_rect.width() as u32
    }

    /// Height of the ink bounds in pixels.
    pub fn height(&self) -> u32 {
        self.bitmap_rect.height() as u32
    }
}

/// Every renderable glyph of a font, in code point order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlyphSurvey {
    /// Surveyed glyphs, ascending by code point.
    pub glyphs: Vec<GlyphDescriptor>,
    /// Sum of `width * height` over all glyph bitmaps.
    pub total_area: u64,
}

impl GlyphSurvey {
    /// Builds a survey from descriptors, recomputing the total area.
    pub fn from_descriptors(glyphs: Vec<GlyphDescriptor>) -> Self {
        let total_area = glyphs.iter().map(|g| g.bitmap_rect.area()).sum();
        Self { glyphs, total_area }
    }

    /// Number of surveyed glyphs.
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// `true` when the font renders nothing outside the private-use blocks.
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

/// Rasterizes every code point the font maps to a glyph.
///
/// The whole scalar value range is scanned; the private-use blocks are
/// skipped without asking the font.
///
/// # Errors
/// Returns [`GlyphLoadError`] for the first glyph the font maps but cannot
/// rasterize. No partial survey is returned.
pub fn survey(source: &mut impl GlyphSource) -> Result<GlyphSurvey, GlyphLoadError> {
    let mut glyphs = Vec::new();
    let mut total_area = 0u64;

    for codepoint in candidate_codepoints() {
        if !source.has_glyph(codepoint) {
            continue;
        }

        let descriptor = GlyphDescriptor::from_raster(codepoint, source.rasterize(codepoint)?);
        total_area += descriptor.bitmap_rect.area();
        glyphs.push(descriptor);
    }

    debug!(glyph_count = glyphs.len(), total_area, "Glyph survey complete");

    Ok(GlyphSurvey { glyphs, total_area })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synthetic_font::SyntheticFont;

    #[test]
    fn test_survey_collects_in_codepoint_order() {
        let mut font = SyntheticFont::new()
            .with_glyph('.', 2, 2, 3)
            .with_glyph('B', 8, 10, 9)
            .with_glyph('A', 8, 10, 9);

        let survey = survey(&mut font).unwrap();

        let order: String = survey.glyphs.iter().map(|g| g.codepoint).collect();
        assert_eq!(order, ".AB");
        assert_eq!(survey.total_area, 164);
        assert_eq!(survey.glyphs[1].advance, Fixed26_6::from_px(9));
    }

    #[test]
    fn test_private_use_glyphs_are_never_rasterized() {
        let mut font = SyntheticFont::new()
            .with_glyph('A', 4, 4, 5)
            .with_glyph('\u{E000}', 4, 4, 5)
            .with_glyph('\u{F8FF}', 4, 4, 5)
            .with_glyph('\u{10FFFD}', 4, 4, 5);

        let survey = survey(&mut font).unwrap();

        assert_eq!(survey.len(), 1);
        assert_eq!(font.rasterized(), ['A']);
    }

    #[test]
    fn test_blank_glyphs_are_kept_without_area() {
        let mut font = SyntheticFont::new()
            .with_glyph(' ', 0, 0, 4)
            .with_glyph('x', 3, 3, 4);

        let survey = survey(&mut font).unwrap();

        assert_eq!(survey.len(), 2);
        assert_eq!(survey.glyphs[0].bitmap_rect.area(), 0);
        assert_eq!(survey.total_area, 9);
    }

    #[test]
    fn test_load_error_aborts_survey() {
        let mut font = SyntheticFont::new()
            .with_glyph('A', 4, 4, 5)
            .with_broken_glyph('Q');

        let err = survey(&mut font).unwrap_err();
        assert_eq!(err.codepoint, 'Q');
    }

    #[test]
    fn test_from_descriptors_sums_area() {
        let mut font = SyntheticFont::new().with_glyph('A', 8, 10, 9);
        let descriptors = survey(&mut font).unwrap().glyphs;

        let rebuilt = GlyphSurvey::from_descriptors(descriptors);
        assert_eq!(rebuilt.total_area, 80);
        assert!(!rebuilt.is_empty());
        assert!(GlyphSurvey::default().is_empty());
    }
}
