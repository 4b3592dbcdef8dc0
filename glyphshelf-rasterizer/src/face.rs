use std::{path::Path, sync::Arc};

use glyphshelf_data::Rect;
use swash::FontRef;
use tracing::debug;

use crate::FontParseError;

/// A parsed font face that owns its font data.
#[derive(Debug, Clone)]
pub struct FontFace {
    data: Arc<[u8]>,
    offset: u32,
    key: swash::CacheKey,
    index: usize,
}

impl FontFace {
    /// Parses face `index` of a font file or collection held in memory.
    ///
    /// # Errors
    /// Returns [`FontParseError::Malformed`] if the data is not a font or the
    /// index is out of range.
    pub fn from_bytes(data: impl Into<Arc<[u8]>>, index: usize) -> Result<Self, FontParseError> {
        let data = data.into();
        let font = FontRef::from_index(&data, index).ok_or(FontParseError::Malformed { index })?;
        let (offset, key) = (font.offset, font.key);

        debug!(
            index,
            bytes = data.len(),
            glyph_count = font.metrics(&[]).glyph_count,
            "Parsed font face"
        );

        Ok(Self { data, offset, key, index })
    }

    /// Reads and parses a font file from disk.
    ///
    /// # Errors
    /// Returns [`FontParseError::Io`] if the file cannot be read, or
    /// [`FontParseError::Malformed`] if it does not contain a usable face.
    pub fn from_path(path: impl AsRef<Path>, index: usize) -> Result<Self, FontParseError> {
        let path = path.as_ref();
        let data = std::fs::read(path)
            .map_err(|source| FontParseError::Io { path: path.to_path_buf(), source })?;

        Self::from_bytes(data, index)
    }

    pub(crate) fn as_swash_ref(&self) -> FontRef<'_> {
        FontRef { data: &self.data, offset: self.offset, key: self.key }
    }

    /// Face index within the font collection.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Glyph index the character map assigns to `ch`; zero means missing.
    pub fn glyph_index(&self, ch: char) -> u16 {
        self.as_swash_ref().charmap().map(ch)
    }

    fn parse_ttf(&self) -> Option<ttf_parser::Face<'_>> {
        ttf_parser::Face::parse(&self.data, self.index as u32).ok()
    }

    /// Design units per em, read from the `head` table.
    pub fn units_per_em(&self) -> u16 {
        match self.parse_ttf() {
            Some(face) => face.units_per_em(),
            None => self.as_swash_ref().metrics(&[]).units_per_em,
        }
    }

    /// Font-wide bounding box in font units, y up, as stored in the `head`
    /// table.
    pub fn design_bounds(&self) -> Option<ttf_parser::Rect> {
        self.parse_ttf().map(|face| face.global_bounding_box())
    }

    /// Font-wide bounding box scaled to `size` pixels per em, in whole pixels
    /// with y pointing down.
    ///
    /// Falls back to ascent, descent and the widest advance when ttf-parser
    /// cannot read the face.
    pub fn pixel_bounds(&self, size: f32) -> Rect {
        let upem = f32::from(self.units_per_em().max(1));
        let scale = size / upem;

        let (x_min, y_min, x_max, y_max) = match self.design_bounds() {
            Some(bbox) => (
                f32::from(bbox.x_min) * scale,
                f32::from(bbox.y_min) * scale,
                f32::from(bbox.x_max) * scale,
                f32::from(bbox.y_max) * scale,
            ),
            None => {
                let metrics = self.as_swash_ref().metrics(&[]).scale(size);
                (0.0, -metrics.descent, metrics.max_width, metrics.ascent)
            },
        };

        Rect::new(
            x_min.floor() as i32,
            -(y_max.ceil() as i32),
            x_max.ceil() as i32,
            -(y_min.floor() as i32),
        )
    }
}
