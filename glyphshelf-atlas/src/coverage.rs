use std::fmt;

use glyphshelf_data::{CodepointRange, GlyphSource};
use glyphshelf_unicode::{is_reserved, scalar_values};

/// Which code points a font can render, as coalesced ranges.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoverageReport {
    /// Disjoint, ascending ranges of renderable code points.
    pub ranges: Vec<CodepointRange>,
    /// True if the font has a glyph for U+FFFD REPLACEMENT CHARACTER.
    pub has_replacement_glyph: bool,
    /// Number of code points covered by `ranges`.
    pub total: u32,
}

impl CoverageReport {
    /// Whether the font maps `ch` to a glyph.
    pub fn contains(&self, ch: char) -> bool {
        let cp = u32::from(ch);
        self.ranges
            .binary_search_by(|r| {
                if r.max <= cp {
                    std::cmp::Ordering::Less
                } else if r.min > cp {
                    std::cmp::Ordering::Greater
                } else {
                    std::cmp::Ordering::Equal
                }
            })
            .is_ok()
    }
}

impl fmt::Display for CoverageReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for range in &self.ranges {
            writeln!(f, "{range} ({})", range.len())?;
        }
        writeln!(f, "Total: {} code points in {} ranges", self.total, self.ranges.len())?;
        let replacement = if self.has_replacement_glyph { "present" } else { "missing" };
        write!(f, "Replacement glyph (U+FFFD): {replacement}")
    }
}

/// Scans the scalar value range for code points with a glyph.
///
/// Adjacent renderable code points coalesce into one range. A code point in
/// a private-use block ends the current range and is never reported, even
/// if the font maps it.
pub fn coverage(source: &impl GlyphSource) -> CoverageReport {
    let mut ranges: Vec<CodepointRange> = Vec::new();
    let mut current: Option<CodepointRange> = None;

    for ch in scalar_values() {
        let cp = u32::from(ch);
        if is_reserved(ch) || !source.has_glyph(ch) {
            ranges.extend(current.take());
            continue;
        }

        current = match current {
            Some(range) if range.max == cp => Some(CodepointRange { max: cp + 1, ..range }),
            Some(range) => {
                ranges.push(range);
                Some(CodepointRange::single(cp))
            },
            None => Some(CodepointRange::single(cp)),
        };
    }
    ranges.extend(current);

    CoverageReport {
        total: ranges.iter().map(CodepointRange::len).sum(),
        has_replacement_glyph: source.has_glyph(char::REPLACEMENT_CHARACTER),
        ranges,
    }
}
