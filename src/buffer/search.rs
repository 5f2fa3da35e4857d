// src/buffer/search.rs
//! Substring search over byte slices
//!
//! Short needles are found with a plain scan. Needles of
//! [`SKIP_SEARCH_MIN_LEN`] bytes or more use Boyer-Moore-Horspool, which
//! skips ahead using a 256-entry shift table keyed on the byte under the
//! end of the current window. Both paths return the lowest match index.

/// Needle length from which the skip search pays for building its table.
pub(crate) const SKIP_SEARCH_MIN_LEN: usize = 4;

/// Returns the index of the first occurrence of `needle` in `haystack`.
///
/// An empty needle never matches.
pub(crate) fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    match needle.len() {
        0 => None,
        n if n > haystack.len() => None,
        1 => haystack.iter().position(|&b| b == needle[0]),
        n if n < SKIP_SEARCH_MIN_LEN => scan(haystack, needle),
        _ => horspool(haystack, needle),
    }
}

/// Byte-by-byte scan, aborting each window on the first mismatch.
pub(crate) fn scan(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

fn horspool(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    let m = needle.len();
    let last = m - 1;

    let mut shift = [m; 256];
    for (i, &b) in needle[..last].iter().enumerate() {
        shift[b as usize] = last - i;
    }

    let mut pos = 0;
    while pos + m <= haystack.len() {
        let tail = haystack[pos + last];
        if tail == needle[last] && haystack[pos..pos + last] == needle[..last] {
            return Some(pos);
        }
        pos += shift[tail as usize];
    }
    None
}
