//! A scripted [`GlyphSource`] for tests: solid rectangular glyphs with
//! fixed advances and no font file.

use std::collections::BTreeMap;

use glyphshelf_data::{
    Fixed26_6, GlyphLoadError, GlyphRaster, GlyphSource, GrayImage, Point, Rect,
};

#[derive(Debug, Clone)]
enum Scripted {
    Solid { width: i32, height: i32, advance: Fixed26_6, ink: u8 },
    Broken,
}

#[derive(Debug, Clone)]
pub(crate) struct SyntheticFont {
    glyphs: BTreeMap<char, Scripted>,
    font_bounds: Rect,
    rasterized: Vec<char>,
}

impl SyntheticFont {
    pub(crate) fn new() -> Self {
        Self {
            glyphs: BTreeMap::new(),
            font_bounds: Rect::new(0, -12, 10, 4),
            rasterized: Vec::new(),
        }
    }

    /// A `width` x `height` block sitting on the baseline.
    pub(crate) fn with_glyph(self, ch: char, width: i32, height: i32, advance_px: i32) -> Self {
        self.with_raw_advance(ch, width, height, Fixed26_6::from_px(advance_px).raw())
    }

    pub(crate) fn with_raw_advance(mut self, ch: char, width: i32, height: i32, raw: i32) -> Self {
        // distinct intensity per glyph so copies can be traced back
        let ink = (u32::from(ch) % 250) as u8 + 1;
        self.glyphs.insert(ch, Scripted::Solid {
            width,
            height,
            advance: Fixed26_6::from_raw(raw),
            ink,
        });
        self
    }

    /// Mapped in the character map but fails to rasterize.
    pub(crate) fn with_broken_glyph(mut self, ch: char) -> Self {
        self.glyphs.insert(ch, Scripted::Broken);
        self
    }

    pub(crate) fn with_font_bounds(mut self, bounds: Rect) -> Self {
        self.font_bounds = bounds;
        self
    }

    /// Code points passed to `rasterize`, in call order.
    pub(crate) fn rasterized(&self) -> &[char] {
        &self.rasterized
    }

    /// Intensity used for the ink of `ch`.
    pub(crate) fn ink(&self, ch: char) -> Option<u8> {
        match self.glyphs.get(&ch)? {
            Scripted::Solid { ink, .. } => Some(*ink),
            Scripted::Broken => None,
        }
    }
}

impl GlyphSource for SyntheticFont {
    fn has_glyph(&self, codepoint: char) -> bool {
        self.glyphs.contains_key(&codepoint)
    }

    fn rasterize(&mut self, codepoint: char) -> Result<GlyphRaster, GlyphLoadError> {
        self.rasterized.push(codepoint);

        match self.glyphs.get(&codepoint) {
            None => Err(GlyphLoadError::new(codepoint, "not in character map")),
            Some(Scripted::Broken) => Err(GlyphLoadError::new(codepoint, "corrupt outline")),
            Some(
                &Scripted::Solid { width: 0, advance, .. }
                | &Scripted::Solid { height: 0, advance, .. },
            ) => Ok(GlyphRaster::blank(advance)),
            Some(&Scripted::Solid { width, height, advance, ink }) => {
                // one pixel of transparent padding around the ink
                let mut mask = GrayImage::new(width as u32 + 2, height as u32 + 2);
                for y in 1..=height {
                    for x in 1..=width {
                        mask.put(x, y, ink);
                    }
                }

                Ok(GlyphRaster {
                    bounds: Rect::from_origin_size(Point::new(0, -height), width, height),
                    mask,
                    mask_origin: Point::new(1, 1),
                    advance,
                })
            },
        }
    }

    fn font_bounds(&self) -> Rect {
        self.font_bounds
    }
}
