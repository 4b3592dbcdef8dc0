//! Unicode code point classification used when surveying font coverage.
//!
//! Fonts occasionally map code points in the private-use blocks to real
//! glyphs. Those code points carry no standard meaning, so the atlas builder
//! never treats them as renderable.

use std::ops::RangeInclusive;

/// Private Use Area in the Basic Multilingual Plane.
pub const PRIVATE_USE_AREA: RangeInclusive<u32> = 0xE000..=0xF8FF;
/// Supplementary Private Use Area-A (plane 15).
pub const SUPPLEMENTARY_PRIVATE_USE_A: RangeInclusive<u32> = 0xF0000..=0xFFFFD;
/// Supplementary Private Use Area-B (plane 16).
pub const SUPPLEMENTARY_PRIVATE_USE_B: RangeInclusive<u32> = 0x100000..=0x10FFFD;

/// All code point blocks that are never considered renderable.
pub const RESERVED_BLOCKS: [RangeInclusive<u32>; 3] = [
    PRIVATE_USE_AREA,
    SUPPLEMENTARY_PRIVATE_USE_A,
    SUPPLEMENTARY_PRIVATE_USE_B,
];

/// Returns true if the code point lies in one of the private-use blocks.
#[must_use]
pub fn is_reserved_codepoint(codepoint: u32) -> bool {
    RESERVED_BLOCKS
        .iter()
        .any(|block| block.contains(&codepoint))
}

/// Returns true if the character lies in one of the private-use blocks.
#[must_use]
pub fn is_reserved(ch: char) -> bool {
    is_reserved_codepoint(ch as u32)
}

/// Iterates every Unicode scalar value in ascending order.
///
/// Surrogate code points (`U+D800..=U+DFFF`) are not scalar values and are
/// never yielded.
pub fn scalar_values() -> impl Iterator<Item = char> {
    '\0'..=char::MAX
}

/// Iterates every scalar value outside the private-use blocks.
pub fn candidate_codepoints() -> impl Iterator<Item = char> {
    scalar_values().filter(|&ch| !is_reserved(ch))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_block_edges() {
        assert!(!is_reserved_codepoint(0xDFFF));
        assert!(is_reserved_codepoint(0xE000));
        assert!(is_reserved_codepoint(0xF8FF));
        assert!(!is_reserved_codepoint(0xF900));

        assert!(!is_reserved_codepoint(0xEFFFF));
        assert!(is_reserved_codepoint(0xF0000));
        assert!(is_reserved_codepoint(0xFFFFD));
        // noncharacters at the end of plane 15 are not part of the block
        assert!(!is_reserved_codepoint(0xFFFFE));
        assert!(!is_reserved_codepoint(0xFFFFF));

        assert!(is_reserved_codepoint(0x100000));
        assert!(is_reserved_codepoint(0x10FFFD));
        assert!(!is_reserved_codepoint(0x10FFFE));
    }

    #[test]
    fn test_ordinary_characters_are_not_reserved() {
        for ch in ['A', ' ', '\u{00E9}', '\u{2588}', '\u{4E00}', '\u{1F600}'] {
            assert!(!is_reserved(ch), "{ch:?} should not be reserved");
        }
    }

    #[test]
    fn test_scalar_values_skip_surrogates() {
        let count = scalar_values().count();
        assert_eq!(count, 0x110000 - 0x800);

        let mut iter = scalar_values().skip_while(|&c| c != '\u{D7FF}');
        assert_eq!(iter.next(), Some('\u{D7FF}'));
        assert_eq!(iter.next(), Some('\u{E000}'));
    }

    #[test]
    fn test_candidates_exclude_reserved_blocks() {
        let reserved: usize = RESERVED_BLOCKS
            .iter()
            .map(|block| (block.end() - block.start() + 1) as usize)
            .sum();

        assert_eq!(candidate_codepoints().count(), scalar_values().count() - reserved);
        assert!(candidate_codepoints().all(|c| !is_reserved(c)));
    }
}
