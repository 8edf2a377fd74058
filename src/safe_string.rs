//! Safe-string codec.
//!
//! Layout: `u16` count whose top nibble is a format marker, then `count &
//! 0x0FFF` single-byte (Latin-1) characters.  A count with an all-zero top
//! nibble is a legacy string and is followed by an obsolete 32-bit count
//! that is skipped.  When the first character byte has its high bit set the
//! whole buffer is stored bitwise-inverted.

use crate::error::Result;
use crate::stream::PrpReader;

const MARKER_MASK: u16 = 0xF000;
const COUNT_MASK: u16 = 0x0FFF;
const LEGACY_COUNT_LEN: usize = 4;

pub fn read_safe_string(reader: &mut PrpReader) -> Result<String> {
    let count = reader.read_u16()?;
    if count & MARKER_MASK == 0 {
        reader.skip(LEGACY_COUNT_LEN)?;
    }
    let n = (count & COUNT_MASK) as usize;
    if n == 0 {
        return Ok(String::new());
    }

    let mut buf = reader.read_bytes(n)?;
    // Only byte 0 carries the flag; the rest are inverted unconditionally.
    if buf[0] & 0x80 != 0 {
        for b in buf.iter_mut() {
            *b = !*b;
        }
    }
    Ok(latin1(&buf))
}

/// Latin-1 maps every byte to the code point of the same value.
fn latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PrpError;
    use std::io::Cursor;

    fn reader(bytes: &[u8]) -> PrpReader {
        PrpReader::new(Cursor::new(bytes.to_vec()))
    }

    #[test]
    fn plain_string() {
        let mut r = reader(&[0x03, 0xF0, b'a', b'b', b'c', 0xEE]);
        assert_eq!(read_safe_string(&mut r).unwrap(), "abc");
        assert_eq!(r.position().unwrap(), 5);
    }

    #[test]
    fn inverted_string() {
        // "Pub" inverted: !0x50 = 0xAF, !0x75 = 0x8A, !0x62 = 0x9D
        let mut r = reader(&[0x03, 0xF0, 0xAF, 0x8A, 0x9D]);
        assert_eq!(read_safe_string(&mut r).unwrap(), "Pub");
    }

    #[test]
    fn inversion_is_keyed_on_first_byte_only() {
        // First byte flags inversion; the second byte 0x3E (high bit clear)
        // is still inverted, yielding 0xC1 ('Á').
        let mut r = reader(&[0x02, 0xF0, 0xBE, 0x3E]);
        assert_eq!(read_safe_string(&mut r).unwrap(), "A\u{C1}");
    }

    #[test]
    fn high_bytes_without_flag_are_latin1() {
        let mut r = reader(&[0x02, 0xF0, 0x41, 0xE9]);
        assert_eq!(read_safe_string(&mut r).unwrap(), "A\u{E9}");
    }

    #[test]
    fn empty_string_reads_nothing_more() {
        let mut r = reader(&[0x00, 0xF0, 0x55]);
        assert_eq!(read_safe_string(&mut r).unwrap(), "");
        assert_eq!(r.position().unwrap(), 2);
    }

    #[test]
    fn legacy_count_is_skipped() {
        let mut r = reader(&[0x02, 0x00, 0xFF, 0xFF, 0xFF, 0xFF, b'h', b'i']);
        assert_eq!(read_safe_string(&mut r).unwrap(), "hi");
        assert_eq!(r.position().unwrap(), 8);
    }

    #[test]
    fn count_longer_than_input_is_truncation() {
        let mut r = reader(&[0x10, 0xF0, b'a', b'b']);
        assert!(matches!(
            read_safe_string(&mut r),
            Err(PrpError::TruncatedInput { offset: 2, need: 16 })
        ));
    }
}
