use std::collections::BTreeMap;

use glyphshelf_data::{
    Fixed26_6, FontAtlas, GlyphPlacement, GrayImage, PackingOverflow, Point, Rect,
};
use tracing::{debug, warn};

use crate::{GlyphDescriptor, GlyphSurvey};

/// Atlas texture dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AtlasSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl AtlasSize {
    /// A `width` by `height` atlas.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Smallest power-of-two size whose area covers `total_area`.
    ///
    /// The width is the next power of two at or above the side of a square
    /// holding `total_area`; the height is the next power of two that covers
    /// the remaining rows. Zero area yields a 1x1 texture.
    pub fn for_area(total_area: u64) -> Self {
        let side = ceil_sqrt(total_area);
        let width = side.next_power_of_two();
        let height = total_area.div_ceil(width).next_power_of_two();

        Self {
            width: width as u32,
            height: height as u32,
        }
    }

    /// Pixel count, `width * height`.
    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

fn ceil_sqrt(n: u64) -> u64 {
    let root = n.isqrt();
    if root * root < n { root + 1 } else { root }
}

/// Packs a survey into an atlas sized by [`AtlasSize::for_area`].
pub fn pack(survey: &GlyphSurvey, font_bounds: Rect) -> FontAtlas {
    pack_with_size(survey, font_bounds, AtlasSize::for_area(survey.total_area))
}

/// Packs a survey into an atlas of the given size.
///
/// Glyphs are placed tallest first onto shelves, left to right. A glyph whose
/// rectangle extends past the atlas edge is still placed (pixels outside the
/// texture are dropped) and named in the [`PackingOverflow`] report attached
/// to the returned atlas.
pub fn pack_with_size(survey: &GlyphSurvey, font_bounds: Rect, size: AtlasSize) -> FontAtlas {
    let mut order: Vec<&GlyphDescriptor> = survey.glyphs.iter().collect();
    order.sort_by_key(|g| std::cmp::Reverse(g.height()));

    let (atlas_w, atlas_h) = (size.width as i32, size.height as i32);
    let mut bitmap = GrayImage::new(size.width, size.height);
    let mut glyphs = BTreeMap::new();
    let mut shelf = Shelf::default();
    let mut fixed_width = FixedWidthTracker::default();
    let mut overflowed = Vec::new();
    let mut extent = Point::ZERO;

    for glyph in order {
        let rect = shelf.place(glyph.bitmap_rect.width(), glyph.bitmap_rect.height(), atlas_w);

        if !rect.is_empty() {
            extent.x = extent.x.max(rect.max.x);
            extent.y = extent.y.max(rect.max.y);
            if rect.max.x > atlas_w || rect.max.y > atlas_h {
                overflowed.push(glyph.codepoint);
            }
            bitmap.copy_from(&glyph.mask, glyph.mask_origin, rect);
        }

        fixed_width.observe(glyph.advance);
        glyphs.insert(glyph.codepoint, placement(glyph, rect, font_bounds));
    }

    let overflow = (!overflowed.is_empty()).then(|| PackingOverflow {
        atlas_width: size.width,
        atlas_height: size.height,
        required_width: extent.x as u32,
        required_height: extent.y as u32,
        glyphs: overflowed,
    });

    if let Some(overflow) = &overflow {
        warn!(
            atlas_width = size.width,
            atlas_height = size.height,
            required_width = overflow.required_width,
            required_height = overflow.required_height,
            overflowed = overflow.glyphs.len(),
            "Glyphs did not fit in atlas"
        );
    }

    debug!(
        width = size.width,
        height = size.height,
        glyph_count = glyphs.len(),
        is_fixed_width = fixed_width.is_fixed(),
        "Packed atlas"
    );

    FontAtlas::new(
        bitmap,
        glyphs,
        fixed_width.is_fixed(),
        font_bounds.height(),
        overflow,
    )
}

fn placement(glyph: &GlyphDescriptor, rect: Rect, font_bounds: Rect) -> GlyphPlacement {
    let bitmap_min = glyph.bitmap_rect.min;
    GlyphPlacement {
        rect,
        center: -bitmap_min,
        offset: bitmap_min - font_bounds.min,
        advance: Point::new(glyph.advance.floor(), font_bounds.height()),
    }
}

/// Shelf cursor: the next free position and the tallest glyph on the
/// current row. Zero-area glyphs are placed at the cursor and leave it
/// untouched.
#[derive(Debug, Default)]
struct Shelf {
    x: i32,
    y: i32,
    row_height: i32,
}

impl Shelf {
    fn place(&mut self, width: i32, height: i32, atlas_width: i32) -> Rect {
        if width == 0 || height == 0 {
            return Rect::from_origin_size(Point::new(self.x, self.y), width, height);
        }

        if self.x + width > atlas_width {
            self.x = 0;
            self.y += self.row_height;
            self.row_height = 0;
        }

        let rect = Rect::from_origin_size(Point::new(self.x, self.y), width, height);
        self.x += width;
        self.row_height = self.row_height.max(height);
        rect
    }
}

/// The first non-zero advance is the reference; any later glyph advancing
/// differently makes the font proportional.
#[derive(Debug)]
struct FixedWidthTracker {
    reference: Option<Fixed26_6>,
    fixed: bool,
}

impl Default for FixedWidthTracker {
    fn default() -> Self {
        Self { reference: None, fixed: true }
    }
}

impl FixedWidthTracker {
    fn observe(&mut self, advance: Fixed26_6) {
        match self.reference {
            Some(reference) => self.fixed &= advance == reference,
            None if !advance.is_zero() => self.reference = Some(advance),
            None => {},
        }
    }

    fn is_fixed(&self) -> bool {
        self.fixed
    }
}
