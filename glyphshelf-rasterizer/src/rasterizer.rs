use std::fmt::Debug;

use glyphshelf_data::{Fixed26_6, GlyphLoadError, GlyphRaster, GlyphSource, GrayImage, Point, Rect};
use swash::{
    scale::{Render, ScaleContext, Source, StrikeWith, image::Content},
    zeno::Format,
};
use tracing::trace;

use crate::FontFace;

/// Rasterization parameters for one atlas build.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterOptions {
    /// Pixels per em.
    pub size: f32,
    /// Grid-fit outlines and round advances to whole pixels.
    pub hinting: bool,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self { size: 14.0, hinting: true }
    }
}

impl RasterOptions {
    /// Options for rendering at `size` pixels per em, hinting on.
    pub fn new(size: f32) -> Self {
        Self { size, ..Self::default() }
    }

    /// Turns hinting on or off.
    #[must_use]
    pub fn hinting(mut self, hinting: bool) -> Self {
        self.hinting = hinting;
        self
    }
}

/// A [`GlyphSource`] that renders 8-bit coverage masks with swash.
///
/// Glyphs are rendered with the pen at the origin and no sub-pixel offset.
/// Masks are cropped to their tight bounds before being handed out.
pub struct SwashRasterizer {
    face: FontFace,
    context: ScaleContext,
    options: RasterOptions,
    font_bounds: Rect,
}

impl Debug for SwashRasterizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SwashRasterizer")
            .field("face", &self.face.index())
            .field("options", &self.options)
            .field("font_bounds", &self.font_bounds)
            .finish()
    }
}

impl SwashRasterizer {
    /// A rasterizer for `face` rendering with `options`.
    pub fn new(face: FontFace, options: RasterOptions) -> Self {
        let font_bounds = face.pixel_bounds(options.size);

        Self {
            face,
            context: ScaleContext::new(),
            options,
            font_bounds,
        }
    }

    /// The options glyphs are rendered with.
    pub fn options(&self) -> RasterOptions {
        self.options
    }

    /// The face glyphs are rendered from.
    pub fn face(&self) -> &FontFace {
        &self.face
    }

    fn advance(&self, glyph_id: u16) -> Fixed26_6 {
        let advance = self
            .face
            .as_swash_ref()
            .glyph_metrics(&[])
            .scale(self.options.size)
            .advance_width(glyph_id);

        if self.options.hinting {
            Fixed26_6::from_px(advance.round() as i32)
        } else {
            Fixed26_6::from_f32(advance)
        }
    }
}

impl GlyphSource for SwashRasterizer {
    fn has_glyph(&self, codepoint: char) -> bool {
        self.face.glyph_index(codepoint) != 0
    }

    fn rasterize(&mut self, codepoint: char) -> Result<GlyphRaster, GlyphLoadError> {
        let glyph_id = self.face.glyph_index(codepoint);
        if glyph_id == 0 {
            return Err(GlyphLoadError::new(codepoint, "not in character map"));
        }

        let advance = self.advance(glyph_id);
        let font = self.face.as_swash_ref();
        let mut scaler = self
            .context
            .builder(font)
            .size(self.options.size)
            .hint(self.options.hinting)
            .build();

        let rendered = Render::new(&[Source::Outline, Source::Bitmap(StrikeWith::BestFit)])
            .format(Format::Alpha)
            .render(&mut scaler, glyph_id);

        let Some(image) = rendered else {
            // glyphs with an empty outline (spaces) have nothing to render
            return match scaler.scale_outline(glyph_id) {
                Some(outline) if outline.points().is_empty() => Ok(GlyphRaster::blank(advance)),
                _ => Err(GlyphLoadError::new(codepoint, "no outline or bitmap")),
            };
        };

        match image.content {
            Content::Mask => {},
            Content::SubpixelMask => {
                return Err(GlyphLoadError::new(codepoint, "subpixel masks are not supported"));
            },
            Content::Color => {
                return Err(GlyphLoadError::new(codepoint, "color glyphs are not supported"));
            },
        }

        let placement = image.placement;
        let mask = GrayImage::from_raw(placement.width, placement.height, image.data)
            .ok_or_else(|| GlyphLoadError::new(codepoint, "mask size mismatch"))?;

        let tight = mask.tight_bounds();
        if tight.is_empty() {
            return Ok(GlyphRaster::blank(advance));
        }

        // swash places the mask with `top` measured upward from the baseline
        let mask_offset = Point::new(placement.left, -placement.top);
        let raster = GlyphRaster {
            bounds: tight.translate(mask_offset),
            mask_origin: tight.min,
            mask,
            advance,
        };

        trace!(
            codepoint = format_args!("U+{:04X}", u32::from(codepoint)),
            bounds = ?raster.bounds,
            advance = %raster.advance,
            "Rasterized glyph"
        );

        Ok(raster)
    }

    fn font_bounds(&self) -> Rect {
        self.font_bounds
    }
}
