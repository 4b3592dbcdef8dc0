use std::fmt;

/// A signed 26.6 fixed-point value: 26 integer bits and 6 fractional bits,
/// giving 1/64 pixel granularity.
///
/// Font engines report glyph advances in this unit. Comparing raw values
/// instead of floats keeps fixed-width detection exact.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fixed26_6(i32);

impl Fixed26_6 {
    /// Zero advance.
    pub const ZERO: Fixed26_6 = Fixed26_6(0);
    /// One whole pixel.
    pub const ONE: Fixed26_6 = Fixed26_6(64);

    /// Wraps a raw 26.6 value.
    pub const fn from_raw(raw: i32) -> Self {
        Self(raw)
    }

    /// Converts whole pixels into 26.6.
    pub const fn from_px(px: i32) -> Self {
        Self(px << 6)
    }

    /// Converts a floating point pixel value, rounding to the nearest 1/64.
    pub fn from_f32(px: f32) -> Self {
        Self((px * 64.0).round() as i32)
    }

    /// The raw 26.6 value.
    pub const fn raw(self) -> i32 {
        self.0
    }

    /// Truncates to whole pixels (rounds toward negative infinity).
    pub const fn floor(self) -> i32 {
        self.0 >> 6
    }

    /// Rounds up to whole pixels.
    pub const fn ceil(self) -> i32 {
        (self.0 + 63) >> 6
    }

    /// `true` for a zero advance.
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Exact conversion to fractional pixels.
    pub fn to_f32(self) -> f32 {
        self.0 as f32 / 64.0
    }
}

impl fmt::Display for Fixed26_6 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}:{:02}", abs >> 6, abs & 0x3F)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_conversions() {
        assert_eq!(Fixed26_6::from_px(9).raw(), 576);
        assert_eq!(Fixed26_6::from_px(9).floor(), 9);
        assert_eq!(Fixed26_6::from_f32(8.5).raw(), 544);
        assert_eq!(Fixed26_6::from_f32(8.5).floor(), 8);
        assert_eq!(Fixed26_6::from_f32(8.5).ceil(), 9);
        assert_eq!(Fixed26_6::from_raw(-1).floor(), -1);
        assert_eq!(Fixed26_6::from_raw(-64).ceil(), -1);
        assert!((Fixed26_6::from_raw(96).to_f32() - 1.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_display_matches_engine_notation() {
        assert_eq!(Fixed26_6::from_px(9).to_string(), "9:00");
        assert_eq!(Fixed26_6::from_raw(100).to_string(), "1:36");
        assert_eq!(Fixed26_6::from_raw(-100).to_string(), "-1:36");
    }
}
