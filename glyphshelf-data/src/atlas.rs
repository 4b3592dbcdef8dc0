use std::{collections::BTreeMap, fmt::Debug};

use crate::{GlyphPlacement, GrayImage, Rect};

/// A packed glyph atlas: a single-channel texture plus the placement of every
/// glyph inside it.
///
/// The atlas is immutable once built. If packing ran out of room, the atlas
/// carries a [`PackingOverflow`] report; such an atlas has aliased glyph
/// regions and must not be used for rendering.
#[derive(Clone, PartialEq, Eq)]
pub struct FontAtlas {
    bitmap: GrayImage,
    glyphs: BTreeMap<char, GlyphPlacement>,
    is_fixed_width: bool,
    line_height: i32,
    overflow: Option<PackingOverflow>,
}

impl Debug for FontAtlas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontAtlas")
            .field("width", &self.bitmap.width())
            .field("height", &self.bitmap.height())
            .field("glyphs_count", &self.glyphs.len())
            .field("is_fixed_width", &self.is_fixed_width)
            .field("line_height", &self.line_height)
            .field("overflow", &self.overflow)
            .finish()
    }
}

impl FontAtlas {
    /// Assembles an atlas from packer output.
    pub fn new(
        bitmap: GrayImage,
        glyphs: BTreeMap<char, GlyphPlacement>,
        is_fixed_width: bool,
        line_height: i32,
        overflow: Option<PackingOverflow>,
    ) -> Self {
        Self {
            bitmap,
            glyphs,
            is_fixed_width,
            line_height,
            overflow,
        }
    }

    /// The atlas texture, one intensity byte per pixel.
    pub fn bitmap(&self) -> &GrayImage {
        &self.bitmap
    }

    /// Texture width in pixels.
    pub fn width(&self) -> u32 {
        self.bitmap.width()
    }

    /// Texture height in pixels.
    pub fn height(&self) -> u32 {
        self.bitmap.height()
    }

    /// All glyph placements, ordered by code point.
    pub fn glyphs(&self) -> &BTreeMap<char, GlyphPlacement> {
        &self.glyphs
    }

    /// Looks up a glyph; `None` means the font has no glyph for `ch` and the
    /// character is skipped when rendering.
    pub fn glyph(&self, ch: char) -> Option<&GlyphPlacement> {
        self.glyphs.get(&ch)
    }

    /// True if every glyph advances the pen by the same amount.
    pub fn is_fixed_width(&self) -> bool {
        self.is_fixed_width
    }

    /// Height of the font-wide bounding box in pixels.
    pub fn line_height(&self) -> i32 {
        self.line_height
    }

    /// The overflow report, if any glyph did not fit.
    pub fn overflow(&self) -> Option<&PackingOverflow> {
        self.overflow.as_ref()
    }

    /// True if every glyph fit into the texture without overlap.
    pub fn is_complete(&self) -> bool {
        self.overflow.is_none()
    }
}

/// Report attached to an atlas whose glyphs did not fit in the planned
/// texture size.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "not enough space in {atlas_width}x{atlas_height} atlas: {} glyphs overflowed, {required_width}x{required_height} needed",
    .glyphs.len()
)]
pub struct PackingOverflow {
    /// Width of the texture that was packed into.
    pub atlas_width: u32,
    /// Height of the texture that was packed into.
    pub atlas_height: u32,
    /// Right-most edge reached by any placement.
    pub required_width: u32,
    /// Bottom-most edge reached by any placement.
    pub required_height: u32,
    /// Glyphs whose placement extends outside the atlas, in packing order.
    pub glyphs: Vec<char>,
}

impl PackingOverflow {
    /// The area the packer actually needed.
    pub fn required_rect(&self) -> Rect {
        Rect::new(0, 0, self.required_width as i32, self.required_height as i32)
    }

    /// Whether `ch` was one of the overflowed glyphs.
    pub fn contains(&self, ch: char) -> bool {
        self.glyphs.contains(&ch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Point;

    fn atlas_with(glyphs: &[(char, Rect)], overflow: Option<PackingOverflow>) -> FontAtlas {
        let glyphs = glyphs
            .iter()
            .map(|&(c, rect)| (c, GlyphPlacement { rect, ..Default::default() }))
            .collect();
        FontAtlas::new(GrayImage::new(16, 16), glyphs, true, 12, overflow)
    }

    #[test]
    fn test_lookup_missing_glyph_returns_none() {
        let atlas = atlas_with(&[('A', Rect::new(0, 0, 8, 10))], None);
        assert_eq!(atlas.glyph('A').map(|g| g.rect.min), Some(Point::ZERO));
        assert!(atlas.glyph('Z').is_none());
        assert!(atlas.is_complete());
        assert_eq!((atlas.width(), atlas.height()), (16, 16));
    }

    #[test]
    fn test_overflow_report() {
        let overflow = PackingOverflow {
            atlas_width: 16,
            atlas_height: 8,
            required_width: 16,
            required_height: 12,
            glyphs: vec!['A', '.'],
        };
        assert_eq!(
            overflow.to_string(),
            "not enough space in 16x8 atlas: 2 glyphs overflowed, 16x12 needed"
        );
        assert_eq!(overflow.required_rect(), Rect::new(0, 0, 16, 12));

        let atlas = atlas_with(&[], Some(overflow));
        assert!(!atlas.is_complete());
        assert!(atlas.overflow().is_some_and(|o| o.contains('.')));
    }

    #[test]
    fn test_debug_omits_pixel_data() {
        let atlas = atlas_with(&[('A', Rect::new(0, 0, 8, 10))], None);
        let debug = format!("{atlas:?}");
        assert!(debug.contains("glyphs_count: 1"));
        assert!(!debug.contains("pixels"));
    }
}
