use std::fmt::Debug;

use crate::{Point, Rect};

/// A single-channel 8-bit intensity image stored row-major.
///
/// Used both for per-glyph coverage masks and for the packed atlas texture.
#[derive(Clone, PartialEq, Eq)]
pub struct GrayImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Debug for GrayImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GrayImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("lit_pixels", &self.pixels.iter().filter(|&&p| p > 0).count())
            .finish()
    }
}

impl GrayImage {
    /// Creates a zero-filled image.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize],
        }
    }

    /// Wraps existing pixel data; returns `None` if the buffer length does not
    /// match `width * height`.
    pub fn from_raw(width: u32, height: u32, pixels: Vec<u8>) -> Option<Self> {
        (pixels.len() == width as usize * height as usize).then_some(Self { width, height, pixels })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major pixel data, one byte per pixel.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Consumes the image, returning its row-major pixels.
    pub fn into_raw(self) -> Vec<u8> {
        self.pixels
    }

    /// The full image rectangle, anchored at the origin.
    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width as i32, self.height as i32)
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let in_bounds = x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height;
        in_bounds.then(|| y as usize * self.width as usize + x as usize)
    }

    /// Returns the intensity at `(x, y)`, or `None` outside the image.
    pub fn get(&self, x: i32, y: i32) -> Option<u8> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Writes the intensity at `(x, y)`. Returns false if the pixel lies
    /// outside the image; nothing is written in that case.
    pub fn put(&mut self, x: i32, y: i32, value: u8) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.pixels[i] = value;
                true
            },
            None => false,
        }
    }

    /// Copies the `dest.size()` pixels of `src` starting at `src_origin` into
    /// this image at `dest`. Source and destination pixels outside their
    /// images are skipped. Returns the number of pixels written.
    pub fn copy_from(&mut self, src: &GrayImage, src_origin: Point, dest: Rect) -> usize {
        let mut written = 0;
        for dy in 0..dest.height() {
            for dx in 0..dest.width() {
                let Some(value) = src.get(src_origin.x + dx, src_origin.y + dy) else {
                    continue;
                };
                if self.put(dest.min.x + dx, dest.min.y + dy, value) {
                    written += 1;
                }
            }
        }
        written
    }

    fn row_is_empty(&self, rect: Rect, y: i32) -> bool {
        (rect.min.x..rect.max.x).all(|x| self.get(x, y).unwrap_or(0) == 0)
    }

    fn column_is_empty(&self, rect: Rect, x: i32) -> bool {
        (rect.min.y..rect.max.y).all(|y| self.get(x, y).unwrap_or(0) == 0)
    }

    /// Smallest rectangle containing every non-zero pixel.
    ///
    /// Border rows are trimmed before columns. A fully transparent image
    /// collapses to an empty rectangle.
    pub fn tight_bounds(&self) -> Rect {
        let mut r = self.bounds();
        while r.min.y < r.max.y && self.row_is_empty(r, r.min.y) {
            r.min.y += 1;
        }
        while r.min.y < r.max.y && self.row_is_empty(r, r.max.y - 1) {
            r.max.y -= 1;
        }
        while r.min.x < r.max.x && self.column_is_empty(r, r.min.x) {
            r.min.x += 1;
        }
        while r.min.x < r.max.x && self.column_is_empty(r, r.max.x - 1) {
            r.max.x -= 1;
        }
        r
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image_from_rows(rows: &[&[u8]]) -> GrayImage {
        let width = rows[0].len() as u32;
        let pixels = rows.iter().flat_map(|r| r.iter().copied()).collect();
        GrayImage::from_raw(width, rows.len() as u32, pixels).unwrap()
    }

    #[test]
    fn test_from_raw_validates_length() {
        assert!(GrayImage::from_raw(2, 2, vec![0; 4]).is_some());
        assert!(GrayImage::from_raw(2, 2, vec![0; 3]).is_none());
    }

    #[test]
    fn test_get_and_put_respect_bounds() {
        let mut img = GrayImage::new(3, 2);
        assert!(img.put(2, 1, 200));
        assert!(!img.put(3, 1, 200));
        assert!(!img.put(-1, 0, 200));
        assert_eq!(img.get(2, 1), Some(200));
        assert_eq!(img.get(0, 2), None);
        assert_eq!(img.pixels()[5], 200);
    }

    #[test]
    fn test_tight_bounds_trims_empty_border() {
        let img = image_from_rows(&[
            &[0, 0, 0, 0, 0],
            &[0, 0, 9, 0, 0],
            &[0, 7, 0, 0, 0],
            &[0, 0, 0, 0, 0],
        ]);
        assert_eq!(img.tight_bounds(), Rect::new(1, 1, 3, 3));
    }

    #[test]
    fn test_tight_bounds_of_blank_image_is_empty() {
        let img = GrayImage::new(4, 4);
        assert!(img.tight_bounds().is_empty());
    }

    #[test]
    fn test_copy_from_uses_source_origin_and_clips() {
        let src = image_from_rows(&[
            &[0, 0, 0],
            &[0, 1, 2],
            &[0, 3, 4],
        ]);
        let mut dst = GrayImage::new(3, 3);

        // bottom-right 2x2 of the source, placed so the last column falls off
        let written = dst.copy_from(&src, Point::new(1, 1), Rect::new(2, 0, 4, 2));
        assert_eq!(written, 2);
        assert_eq!(dst.get(2, 0), Some(1));
        assert_eq!(dst.get(2, 1), Some(3));
        assert_eq!(dst.pixels().iter().filter(|&&p| p > 0).count(), 2);
    }
}
