//! Bounded pattern search and in-place rewrite
//!
//! Operates on binary data, not terminated text. Searches never read past
//! the declared haystack length and rewrites never resize the buffer.

/// find the first occurrence of `needle` in `haystack`
///
/// returns `None` for an empty needle or one longer than the haystack.
/// only the first occurrence is reported; callers wanting several patches
/// in one buffer register several rules.
pub fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|window| window == needle)
}

/// overwrite `replacement.len()` bytes at `offset`, byte-for-byte
///
/// `offset` is expected to come from [`find`] on the same haystack, so the
/// write always lands inside `[0, haystack.len())`.
pub fn apply(haystack: &mut [u8], offset: usize, replacement: &[u8]) {
    haystack[offset..offset + replacement.len()].copy_from_slice(replacement);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_first_occurrence() {
        let data = b"..MacPro6,1..MacPro6,1..";
        assert_eq!(find(data, b"MacPro6,1"), Some(2));
    }

    #[test]
    fn test_find_miss() {
        assert_eq!(find(b"abcdef", b"xyz"), None);
    }

    #[test]
    fn test_find_degenerate_needles() {
        assert_eq!(find(b"abc", b""), None);
        assert_eq!(find(b"ab", b"abc"), None);
        assert_eq!(find(b"", b"a"), None);
    }

    #[test]
    fn test_find_at_buffer_end() {
        let data = b"....tail";
        assert_eq!(find(data, b"tail"), Some(4));
    }

    #[test]
    fn test_apply_rewrites_in_place() {
        let mut data = *b"XMacPro6,1Y";
        let offset = find(&data, b"MacPro6,1").unwrap();
        apply(&mut data, offset, b"MacPro7,1");
        assert_eq!(&data, b"XMacPro7,1Y");
    }

    #[test]
    fn test_apply_leaves_length_unchanged() {
        let mut data = vec![0u8; 64];
        data[10..13].copy_from_slice(b"old");
        apply(&mut data, 10, b"new");
        assert_eq!(data.len(), 64);
        assert_eq!(&data[10..13], b"new");
    }
}
