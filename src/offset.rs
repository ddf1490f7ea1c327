//! Byte-to-character offset conversion.
//!
//! The regex engine reports byte offsets, but occurrence records carry
//! character indices so that downstream consumers (maskers, slicers in
//! other languages) address the text the same way regardless of encoding.
//!
//! ```text
//! Text:  "café mom"
//!
//! BYTE   c   a   f   [ é ]   ␣   m   o   m
//!        0   1   2   3 - 4   5   6   7   8
//!
//! CHAR   c   a   f   é   ␣   m   o   m
//!        0   1   2   3   4   5   6   7
//! ```
//!
//! A match on "mom" starts at byte 6 but character 5. ASCII text needs no
//! conversion; everything else goes through a precomputed per-byte map.

/// Convert a byte offset in `text` to a character offset.
///
/// `byte_offset` must lie on a character boundary (regex match boundaries
/// always do).
///
/// # Example
///
/// ```rust
/// use kinterm::offset::byte_to_char;
///
/// assert_eq!(byte_to_char("café mom", 6), 5); // 'é' is two bytes
/// assert_eq!(byte_to_char("cafe mom", 5), 5);
/// ```
#[must_use]
pub fn byte_to_char(text: &str, byte_offset: usize) -> usize {
    if text.is_ascii() {
        return byte_offset;
    }
    text[..byte_offset].chars().count()
}

/// Byte-to-character offset map for one text.
///
/// Use this instead of [`byte_to_char`] when converting many offsets in the
/// same text; it walks the text once. For ASCII text no map is built and
/// lookups are identity.
#[derive(Debug, Clone)]
pub struct OffsetMap {
    /// `map[byte] == char index` for every byte of the text, plus one entry
    /// past the end. `None` for ASCII text.
    map: Option<Vec<usize>>,
}

impl OffsetMap {
    /// Build the offset map for `text`.
    #[must_use]
    pub fn new(text: &str) -> Self {
        if text.is_ascii() {
            return Self { map: None };
        }

        let mut map = Vec::with_capacity(text.len() + 1);
        for (char_idx, ch) in text.chars().enumerate() {
            for _ in 0..ch.len_utf8() {
                map.push(char_idx);
            }
        }
        map.push(text.chars().count());
        Self { map: Some(map) }
    }

    /// Look up the character offset for a byte offset.
    #[must_use]
    pub fn char_offset(&self, byte_offset: usize) -> usize {
        match &self.map {
            None => byte_offset,
            Some(map) => map[byte_offset.min(map.len() - 1)],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_is_identity() {
        let text = "my sister loves that book";
        let map = OffsetMap::new(text);
        for i in 0..=text.len() {
            assert_eq!(map.char_offset(i), i);
            assert_eq!(byte_to_char(text, i), i);
        }
    }

    #[test]
    fn test_multibyte_offsets() {
        // 'é' occupies bytes 3-4, so everything after it shifts by one.
        let text = "café mom";
        assert_eq!(byte_to_char(text, 0), 0);
        assert_eq!(byte_to_char(text, 3), 3);
        assert_eq!(byte_to_char(text, 5), 4); // space after café
        assert_eq!(byte_to_char(text, 6), 5); // 'm' of mom

        let map = OffsetMap::new(text);
        assert_eq!(map.char_offset(6), 5);
        assert_eq!(map.char_offset(text.len()), text.chars().count());
    }

    #[test]
    fn test_emoji_offsets() {
        let text = "👋 my mom";
        let map = OffsetMap::new(text);
        // emoji is 4 bytes; "my" starts at byte 5, char 2.
        assert_eq!(map.char_offset(5), 2);
        assert_eq!(map.char_offset(8), 5);
    }
}
