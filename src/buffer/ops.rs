// src/buffer/ops.rs
//! Stateless buffer operations
//!
//! Aliasing is fixed per operation: [`fill`] and [`clear`] mutate the caller's
//! buffer and hand the same buffer back for chaining; every other operation
//! returns a fresh allocation or a plain value and never keeps a reference
//! to its inputs.

use super::core::ByteBuffer;
use super::like::{BufferLike, FillValue};
use super::search;
use crate::error::{BufferError, Result};
use std::cmp::Ordering;

/// Returns `true` if both values hold the same bytes.
///
/// # Examples
///
/// ```
/// use buftools::buffer::equals;
/// # use buftools::BufferError;
///
/// assert!(equals(b"abc", "abc")?);
/// assert!(!equals(b"abc", "abcd")?);
/// # Ok::<(), BufferError>(())
/// ```
pub fn equals<'a, 'b>(a: impl Into<BufferLike<'a>>, b: impl Into<BufferLike<'b>>) -> Result<bool> {
    Ok(compare(a, b)? == Ordering::Equal)
}

/// Compares two values byte by byte as unsigned integers.
///
/// When one value is a prefix of the other, the shorter one sorts first.
/// `compare(a, b)? as i8` yields the conventional `-1`, `0` or `1`.
///
/// # Examples
///
/// ```
/// use buftools::buffer::compare;
/// use std::cmp::Ordering;
/// # use buftools::BufferError;
///
/// assert_eq!(compare(b"abc", "abd")?, Ordering::Less);
/// assert_eq!(compare(&[0xffu8][..], &[0x01u8, 0x00][..])?, Ordering::Greater);
/// assert_eq!(compare("ab", "abc")? as i8, -1);
/// # Ok::<(), BufferError>(())
/// ```
pub fn compare<'a, 'b>(
    a: impl Into<BufferLike<'a>>,
    b: impl Into<BufferLike<'b>>,
) -> Result<Ordering> {
    let a = a.into();
    let b = b.into();
    let (a, b) = (a.to_bytes()?, b.to_bytes()?);
    Ok(a.as_ref().cmp(b.as_ref()))
}

/// Fills `buf` in place and returns it.
///
/// A byte value overwrites every byte. A pattern is repeated from the start
/// of the buffer, with the last copy truncated to fit; a pattern longer than
/// the buffer is simply cut at the buffer's length.
///
/// # Errors
///
/// Returns [`BufferError::InvalidArgument`] if the pattern is empty.
///
/// # Examples
///
/// ```
/// use buftools::ByteBuffer;
/// use buftools::buffer::fill;
/// # use buftools::BufferError;
///
/// let mut buf = ByteBuffer::new(5);
/// fill(&mut buf, "ab")?;
/// assert_eq!(buf.as_slice(), b"ababa");
///
/// assert_eq!(fill(&mut buf, 0x2au8)?.as_slice(), &[0x2a; 5]);
/// # Ok::<(), BufferError>(())
/// ```
pub fn fill<'v>(buf: &mut ByteBuffer, value: impl Into<FillValue<'v>>) -> Result<&mut ByteBuffer> {
    match value.into() {
        FillValue::Byte(byte) => buf.as_mut_slice().fill(byte),
        FillValue::Pattern(pattern) => {
            let pattern = pattern.to_bytes()?;
            if pattern.is_empty() {
                return Err(BufferError::InvalidArgument(
                    "fill pattern must not be empty".into(),
                ));
            }
            for chunk in buf.as_mut_slice().chunks_mut(pattern.len()) {
                chunk.copy_from_slice(&pattern[..chunk.len()]);
            }
        }
    }
    Ok(buf)
}

/// Zeroes `buf` in place and returns it. Same result as `fill(buf, 0)`.
pub fn clear(buf: &mut ByteBuffer) -> &mut ByteBuffer {
    buf.burn();
    buf
}

/// Returns a new buffer with the bytes of `buf` in reverse order.
pub fn reverse(buf: impl AsRef<[u8]>) -> ByteBuffer {
    let mut data = buf.as_ref().to_vec();
    data.reverse();
    ByteBuffer::from_vec(data)
}

/// Finds the lowest index at or after `start` where `needle` occurs in `haystack`.
///
/// Returns `None` when there is no match, when `needle` is empty, and when
/// `start` lies beyond the end of `haystack`.
///
/// # Examples
///
/// ```
/// use buftools::buffer::index_of;
/// # use buftools::BufferError;
///
/// assert_eq!(index_of("Hello, world!", "world", 0)?, Some(7));
/// assert_eq!(index_of("Hello, world!", "o", 5)?, Some(8));
/// assert_eq!(index_of("Hello, world!", "", 0)?, None);
/// # Ok::<(), BufferError>(())
/// ```
pub fn index_of<'h, 'n>(
    haystack: impl Into<BufferLike<'h>>,
    needle: impl Into<BufferLike<'n>>,
    start: usize,
) -> Result<Option<usize>> {
    let haystack = haystack.into();
    let needle = needle.into();
    let (haystack, needle) = (haystack.to_bytes()?, needle.to_bytes()?);

    let Some(tail) = haystack.get(start..) else {
        return Ok(None);
    };
    Ok(search::find(tail, &needle).map(|i| i + start))
}

/// Joins all parts, in order, into one freshly allocated buffer.
///
/// The result never aliases an input, even for a single part.
///
/// # Examples
///
/// ```
/// use buftools::buffer::concat;
/// # use buftools::BufferError;
///
/// assert_eq!(concat(["foo", "bar", "baz"])?.as_slice(), b"foobarbaz");
/// assert!(concat(Vec::<&str>::new())?.is_empty());
/// # Ok::<(), BufferError>(())
/// ```
pub fn concat<'a, I>(parts: I) -> Result<ByteBuffer>
where
    I: IntoIterator,
    I::Item: Into<BufferLike<'a>>,
{
    let parts: Vec<BufferLike<'a>> = parts.into_iter().map(Into::into).collect();
    let resolved = parts
        .iter()
        .map(BufferLike::to_bytes)
        .collect::<Result<Vec<_>>>()?;
    let slices: Vec<&[u8]> = resolved.iter().map(|bytes| bytes.as_ref()).collect();
    Ok(concat_slices(&slices))
}

/// Copies `parts` back to back into one allocation of exactly their total length.
pub(crate) fn concat_slices(parts: &[&[u8]]) -> ByteBuffer {
    let total = parts.iter().map(|part| part.len()).sum();
    let mut data = Vec::with_capacity(total);
    for part in parts {
        data.extend_from_slice(part);
    }
    ByteBuffer::from_vec(data)
}

/// Encodes `buf` as lowercase hex, two digits per byte, high nibble first.
///
/// # Examples
///
/// ```
/// use buftools::buffer::to_hex;
///
/// assert_eq!(to_hex("\t \r\n"), "09200d0a");
/// ```
pub fn to_hex(buf: impl AsRef<[u8]>) -> String {
    hex::encode(buf.as_ref())
}

/// Decodes a hex string. Upper- and lowercase digits are both accepted.
///
/// # Errors
///
/// Returns [`BufferError::Format`] if the length is odd or a character is not
/// a hex digit.
pub fn from_hex(text: impl AsRef<[u8]>) -> Result<ByteBuffer> {
    Ok(ByteBuffer::from_vec(hex::decode(text)?))
}

/// Concatenates any mix of buffers and text into a new [`ByteBuffer`].
///
/// Expands to [`concat`](crate::buffer::concat) after converting each
/// argument to a [`BufferLike`].
///
/// # Example
/// ```
/// use buftools::{concat_buffers, ByteBuffer};
/// # use buftools::BufferError;
///
/// let tail = ByteBuffer::from_slice(b"baz");
/// assert_eq!(concat_buffers!("foo", b"bar", &tail)?.as_slice(), b"foobarbaz");
/// assert!(concat_buffers!()?.is_empty());
/// # Ok::<(), BufferError>(())
/// ```
#[macro_export]
macro_rules! concat_buffers {
    () => {
        $crate::buffer::concat(::std::iter::empty::<$crate::BufferLike<'static>>())
    };
    ($($part:expr),+ $(,)?) => {
        $crate::buffer::concat([$($crate::BufferLike::from($part)),+])
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equals_mixed_forms() {
        let buf = ByteBuffer::from_slice(b"binary\0safe");
        assert!(equals(&buf, "binary\0safe").unwrap());
        assert!(!equals(&buf, "binary").unwrap());
        assert!(equals(b"", "").unwrap());
    }

    #[test]
    fn test_compare_orders() {
        assert_eq!(compare(b"abc", b"abc").unwrap(), Ordering::Equal);
        assert_eq!(compare(b"abc", b"abd").unwrap(), Ordering::Less);
        assert_eq!(compare(b"b", b"abc").unwrap(), Ordering::Greater);
        assert_eq!(compare(b"", b"\0").unwrap(), Ordering::Less);
    }

    #[test]
    fn test_compare_is_unsigned() {
        assert_eq!(compare(&[0x80u8], &[0x7fu8]).unwrap(), Ordering::Greater);
    }

    #[test]
    fn test_compare_prefix_shorter_first() {
        assert_eq!(compare("abc", "abcd").unwrap() as i8, -1);
        assert_eq!(compare("abcd", "abc").unwrap() as i8, 1);
    }

    #[test]
    fn test_compare_hex_text() {
        let like = BufferLike::text("0102", "hex").unwrap();
        assert_eq!(compare(&[1u8, 2], like).unwrap(), Ordering::Equal);

        let bad = BufferLike::text("010", "hex").unwrap();
        assert!(matches!(compare(b"x", bad), Err(BufferError::Format(_))));
    }

    #[test]
    fn test_fill_byte() {
        let mut buf = ByteBuffer::new(4);
        fill(&mut buf, 0x2au8).unwrap();
        assert_eq!(buf.as_slice(), &[0x2a, 0x2a, 0x2a, 0x2a]);
    }

    #[test]
    fn test_fill_pattern() {
        let mut buf = ByteBuffer::new(4);
        fill(&mut buf, "ab").unwrap();
        assert_eq!(buf.as_slice(), &[0x61, 0x62, 0x61, 0x62]);

        let mut buf = ByteBuffer::new(7);
        fill(&mut buf, b"xyz").unwrap();
        assert_eq!(buf.as_slice(), b"xyzxyzx");
    }

    #[test]
    fn test_fill_pattern_longer_than_buffer() {
        let mut buf = ByteBuffer::new(3);
        fill(&mut buf, "abcdef").unwrap();
        assert_eq!(buf.as_slice(), b"abc");
    }

    #[test]
    fn test_fill_empty_pattern() {
        let mut buf = ByteBuffer::from_slice(b"keep");
        let result = fill(&mut buf, "");
        assert!(matches!(result, Err(BufferError::InvalidArgument(_))));
        assert_eq!(buf.as_slice(), b"keep");
    }

    #[test]
    fn test_fill_empty_buffer() {
        let mut buf = ByteBuffer::new(0);
        assert!(fill(&mut buf, "ab").unwrap().is_empty());
    }

    #[test]
    fn test_fill_chains() {
        let mut buf = ByteBuffer::new(4);
        let out = fill(fill(&mut buf, 1u8).unwrap(), "z").unwrap();
        assert_eq!(out.as_slice(), b"zzzz");
    }

    #[test]
    fn test_clear() {
        let mut buf = ByteBuffer::from_slice(b"data");
        assert_eq!(clear(&mut buf).as_slice(), &[0, 0, 0, 0]);
    }

    #[test]
    fn test_reverse() {
        let buf = ByteBuffer::from_slice(&[1, 2, 3]);
        assert_eq!(reverse(&buf).as_slice(), &[3, 2, 1]);
        assert_eq!(buf.as_slice(), &[1, 2, 3]);
        assert!(reverse(ByteBuffer::new(0)).is_empty());
    }

    #[test]
    fn test_index_of() {
        assert_eq!(index_of("Hello, world!", "world", 0).unwrap(), Some(7));
        assert_eq!(index_of("Hello, world!", "xyz", 0).unwrap(), None);
        assert_eq!(index_of("Hello, world!", "world", 8).unwrap(), None);
        assert_eq!(index_of("abcabc", "abc", 1).unwrap(), Some(3));
    }

    #[test]
    fn test_index_of_start_bounds() {
        assert_eq!(index_of("abc", "c", 3).unwrap(), None);
        assert_eq!(index_of("abc", "c", 100).unwrap(), None);
        assert_eq!(index_of("abc", "c", 2).unwrap(), Some(2));
    }

    #[test]
    fn test_index_of_empty_needle() {
        assert_eq!(index_of("abc", "", 0).unwrap(), None);
        assert_eq!(index_of("", "", 0).unwrap(), None);
    }

    #[test]
    fn test_concat() {
        assert_eq!(concat(["foo", "bar", "baz"]).unwrap().as_slice(), b"foobarbaz");
        assert!(concat(Vec::<&[u8]>::new()).unwrap().is_empty());

        let parts = [BufferLike::from(b"\0\x01"), BufferLike::from("2")];
        assert_eq!(concat(parts).unwrap().as_slice(), b"\0\x012");
    }

    #[test]
    fn test_concat_single_part_copies() {
        let original = ByteBuffer::from_slice(b"abc");
        let mut copy = concat([&original]).unwrap();
        assert_eq!(copy, original);
        assert_ne!(copy.as_slice().as_ptr(), original.as_slice().as_ptr());

        copy.as_mut_slice()[0] = b'X';
        assert_eq!(original.as_slice(), b"abc");
    }

    #[test]
    fn test_concat_exact_capacity() {
        let joined = concat_slices(&[&b"ab"[..], &b""[..], &b"cde"[..]]);
        assert_eq!(joined.as_slice(), b"abcde");
        assert_eq!(joined.data.capacity(), 5);
    }

    #[test]
    fn test_concat_macro() {
        let tail = ByteBuffer::from_slice(b"!");
        let joined = crate::concat_buffers!("Hello, ", b"world", &tail).unwrap();
        assert_eq!(joined.as_slice(), b"Hello, world!");
    }

    #[test]
    fn test_hex() {
        assert_eq!(to_hex("\t \r\n"), "09200d0a");
        assert_eq!(to_hex([0xdeu8, 0xad, 0xbe, 0xef]), "deadbeef");
        assert_eq!(to_hex(ByteBuffer::new(0)), "");

        assert_eq!(from_hex("DEADbeef").unwrap().as_slice(), &[0xde, 0xad, 0xbe, 0xef]);
        assert!(from_hex("").unwrap().is_empty());
    }

    #[test]
    fn test_from_hex_malformed() {
        assert!(matches!(from_hex("abc"), Err(BufferError::Format(_))));
        assert!(matches!(from_hex("zz"), Err(BufferError::Format(_))));
        assert!(matches!(from_hex("0x00"), Err(BufferError::Format(_))));
    }
}
