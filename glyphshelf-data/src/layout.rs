use crate::{FontAtlas, GlyphPlacement, Point, Rect};

/// A textured quad for one rendered glyph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphQuad {
    /// The character this quad draws.
    pub ch: char,
    /// Screen-space rectangle in pixels.
    pub screen: Rect,
    /// Top-left texture coordinate, normalized to `[0, 1]`.
    pub uv_min: (f32, f32),
    /// Bottom-right texture coordinate, normalized to `[0, 1]`.
    pub uv_max: (f32, f32),
}

/// A textured quad laid out at a fractional scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaledGlyphQuad {
    /// The character this quad draws.
    pub ch: char,
    /// Top-left screen corner in pixels.
    pub min: (f32, f32),
    /// Bottom-right screen corner in pixels.
    pub max: (f32, f32),
    /// Top-left texture coordinate, normalized to `[0, 1]`.
    pub uv_min: (f32, f32),
    /// Bottom-right texture coordinate, normalized to `[0, 1]`.
    pub uv_max: (f32, f32),
}

impl FontAtlas {
    fn uv(&self, glyph: &GlyphPlacement) -> ((f32, f32), (f32, f32)) {
        let (atlas_w, atlas_h) = (self.width() as f32, self.height() as f32);
        (
            (glyph.rect.min.x as f32 / atlas_w, glyph.rect.min.y as f32 / atlas_h),
            (glyph.rect.max.x as f32 / atlas_w, glyph.rect.max.y as f32 / atlas_h),
        )
    }

    /// Lays out a single line of text starting with the pen at `origin`.
    ///
    /// `origin` is the top-left of the font-wide bounding box for the first
    /// glyph. Characters without a glyph are skipped without advancing the pen;
    /// glyphs without ink advance the pen but produce no quad. No kerning is
    /// applied.
    pub fn layout(&self, text: &str, origin: Point) -> Vec<GlyphQuad> {
        let mut pen = origin;
        let mut quads = Vec::with_capacity(text.len());

        for ch in text.chars() {
            let Some(glyph) = self.glyph(ch) else {
                continue;
            };

            if !glyph.rect.is_empty() {
                let screen = Rect::from_origin_size(
                    pen + glyph.offset,
                    glyph.rect.width(),
                    glyph.rect.height(),
                );
                let (uv_min, uv_max) = self.uv(glyph);
                quads.push(GlyphQuad { ch, screen, uv_min, uv_max });
            }

            pen.x += glyph.advance.x;
        }

        quads
    }

    /// Like [`layout`](Self::layout), with glyph offsets, sizes and pen
    /// advances multiplied by `scale`. Texture coordinates are unaffected.
    pub fn layout_scaled(&self, text: &str, origin: (f32, f32), scale: f32) -> Vec<ScaledGlyphQuad> {
        let mut pen_x = origin.0;
        let mut quads = Vec::with_capacity(text.len());

        for ch in text.chars() {
            let Some(glyph) = self.glyph(ch) else {
                continue;
            };

            if !glyph.rect.is_empty() {
                let x0 = pen_x + glyph.offset.x as f32 * scale;
                let y0 = origin.1 + glyph.offset.y as f32 * scale;
                let (uv_min, uv_max) = self.uv(glyph);
                quads.push(ScaledGlyphQuad {
                    ch,
                    min: (x0, y0),
                    max: (
                        x0 + glyph.rect.width() as f32 * scale,
                        y0 + glyph.rect.height() as f32 * scale,
                    ),
                    uv_min,
                    uv_max,
                });
            }

            pen_x += glyph.advance.x as f32 * scale;
        }

        quads
    }

    /// Total horizontal advance of `text` in pixels.
    pub fn measure(&self, text: &str) -> i32 {
        text.chars()
            .filter_map(|ch| self.glyph(ch))
            .map(|g| g.advance.x)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::{GlyphPlacement, GrayImage};

    fn sample_atlas() -> FontAtlas {
        let mut glyphs = BTreeMap::new();
        glyphs.insert('A', GlyphPlacement {
            rect: Rect::new(0, 0, 8, 10),
            center: Point::new(0, 10),
            offset: Point::new(1, 2),
            advance: Point::new(9, 14),
        });
        glyphs.insert('.', GlyphPlacement {
            rect: Rect::new(8, 0, 10, 2),
            center: Point::new(-1, 2),
            offset: Point::new(2, 10),
            advance: Point::new(3, 14),
        });
        glyphs.insert(' ', GlyphPlacement {
            rect: Rect::new(10, 0, 10, 0),
            center: Point::ZERO,
            offset: Point::new(1, 12),
            advance: Point::new(4, 14),
        });
        FontAtlas::new(GrayImage::new(16, 16), glyphs, false, 14, None)
    }

    #[test]
    fn test_layout_positions_quads_along_the_pen() {
        let atlas = sample_atlas();
        let quads = atlas.layout("A.", Point::new(100, 50));

        assert_eq!(quads.len(), 2);
        assert_eq!(quads[0].screen, Rect::new(101, 52, 109, 62));
        assert_eq!(quads[0].uv_min, (0.0, 0.0));
        assert_eq!(quads[0].uv_max, (0.5, 0.625));

        // pen advanced by 9 before '.'
        assert_eq!(quads[1].screen, Rect::new(111, 60, 113, 62));
        assert_eq!(quads[1].uv_min, (0.5, 0.0));
    }

    #[test]
    fn test_layout_skips_missing_and_blank_glyphs() {
        let atlas = sample_atlas();
        let quads = atlas.layout("A?  .", Point::ZERO);

        assert_eq!(quads.iter().map(|q| q.ch).collect::<String>(), "A.");
        // 'A' (9) + two spaces (4 each); '?' is missing and does not advance
        assert_eq!(quads[1].screen.min.x, 9 + 8 + 2);
        assert_eq!(atlas.measure("A?  ."), 9 + 4 + 4 + 3);
    }

    #[test]
    fn test_scaled_layout_multiplies_geometry_not_uvs() {
        let atlas = sample_atlas();

        let unscaled = atlas.layout_scaled("A.", (100.0, 50.0), 1.0);
        let quads = atlas.layout("A.", Point::new(100, 50));
        for (scaled, quad) in unscaled.iter().zip(&quads) {
            assert_eq!(scaled.min, (quad.screen.min.x as f32, quad.screen.min.y as f32));
            assert_eq!(scaled.max, (quad.screen.max.x as f32, quad.screen.max.y as f32));
            assert_eq!(scaled.uv_min, quad.uv_min);
        }

        let doubled = atlas.layout_scaled("A .", (0.0, 0.0), 2.0);
        assert_eq!(doubled.len(), 2);
        assert_eq!(doubled[0].min, (2.0, 4.0));
        assert_eq!(doubled[0].max, (18.0, 24.0));
        assert_eq!(doubled[0].uv_max, (0.5, 0.625));
        // pen: (9 + 4) * 2, then the '.' offset (2, 10) * 2
        assert_eq!(doubled[1].min, (30.0, 20.0));
        assert_eq!(doubled[1].max, (34.0, 24.0));
    }
}
