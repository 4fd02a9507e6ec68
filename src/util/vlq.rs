//! Variable-length quantity codec used by the transaction packing format.
//!
//! Values are stored as big-endian 7-bit groups with the continuation bit set
//! on every byte except the last; signed values are zigzag-mapped first. This
//! is the MIDI-style VLQ, *not* the little-endian varint of the Bitcoin wire
//! format, and the stored records depend on it staying that way.

/// Longest possible encoding of a 64-bit value (ceil(64 / 7) bytes).
pub const MAX_LEN: usize = 10;

/// Appends the VLQ encoding of `x` to `buf`, returning the number of bytes
/// written.
pub fn push_uint(buf: &mut Vec<u8>, mut x: u64) -> usize {
    let mut tmp = [0u8; MAX_LEN];
    let mut i = MAX_LEN - 1;
    tmp[i] = (x & 0x7f) as u8;
    x >>= 7;
    while x > 0 {
        i -= 1;
        tmp[i] = (x & 0x7f) as u8 | 0x80;
        x >>= 7;
    }
    buf.extend_from_slice(&tmp[i..]);
    MAX_LEN - i
}

/// Appends the zigzag VLQ encoding of `v` to `buf`, returning the number of
/// bytes written.
pub fn push_int(buf: &mut Vec<u8>, v: i64) -> usize {
    push_uint(buf, ((v << 1) ^ (v >> 63)) as u64)
}

/// Reads one VLQ value from the front of `buf`. Returns the value and the
/// number of bytes consumed, or `None` when the buffer ends before the final
/// group or the value overflows 64 bits.
pub fn read_uint(buf: &[u8]) -> Option<(u64, usize)> {
    let mut x: u64 = 0;
    for (n, &b) in buf.iter().enumerate() {
        if x > u64::max_value() >> 7 {
            return None;
        }
        x = (x << 7) | u64::from(b & 0x7f);
        if b & 0x80 == 0 {
            return Some((x, n + 1));
        }
    }
    None
}

/// Signed counterpart of [`read_uint`], undoing the zigzag mapping.
pub fn read_int(buf: &[u8]) -> Option<(i64, usize)> {
    let (ux, n) = read_uint(buf)?;
    Some((((ux >> 1) as i64) ^ -((ux & 1) as i64), n))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocktime_fixture() {
        // Stored prefix of every mainnet record packed at 2019-04-09 18:41:43 UTC.
        let mut buf = Vec::new();
        assert_eq!(push_int(&mut buf, 1554837703), 5);
        assert_eq!(hex::encode(&buf), "8bcae7c30e");
        assert_eq!(read_int(&buf), Some((1554837703, 5)));
    }

    #[test]
    fn signed_round_trip() {
        for &v in &[
            0i64,
            1,
            -1,
            63,
            64,
            -64,
            -65,
            1554837703,
            -1554837703,
            i64::max_value(),
            i64::min_value(),
        ] {
            let mut buf = Vec::new();
            let n = push_int(&mut buf, v);
            assert_eq!(buf.len(), n);
            assert_eq!(read_int(&buf), Some((v, n)), "value {}", v);
        }
    }

    #[test]
    fn single_byte_values() {
        let mut buf = Vec::new();
        assert_eq!(push_uint(&mut buf, 0), 1);
        assert_eq!(buf, [0x00]);
        buf.clear();
        assert_eq!(push_uint(&mut buf, 127), 1);
        assert_eq!(buf, [0x7f]);
        buf.clear();
        assert_eq!(push_uint(&mut buf, 128), 2);
        assert_eq!(buf, [0x81, 0x00]);
    }

    #[test]
    fn rejects_truncated_input() {
        assert_eq!(read_uint(&[]), None);
        // continuation bit set on the last available byte
        assert_eq!(read_uint(&[0x8b, 0xca]), None);
    }

    #[test]
    fn rejects_overlong_input() {
        // eleven groups cannot fit in 64 bits
        assert_eq!(read_uint(&[0xff; 11]), None);
    }
}
