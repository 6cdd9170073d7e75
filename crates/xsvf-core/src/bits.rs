//! Packed bit-vector primitive for scan data.
//!
//! XSVF packs scan values big-endian: a run of `n` bits occupies exactly
//! `ceil(n / 8)` bytes, most significant byte first, with the value
//! right-aligned in the final byte. The interpreter only moves these
//! vectors around; comparing captured against expected bits is the TAP
//! driver's job.

use std::fmt;

/// A run of bits extracted from an XSVF stream.
///
/// The bit count is fixed at construction and never mutated. An empty
/// vector (zero bits) is the "all don't-care" value used for an unset
/// TDO mask.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct BitVector {
    bit_len: usize,
    bytes: Vec<u8>,
}

impl BitVector {
    /// Creates a vector holding the first `ceil(bit_len / 8)` bytes of
    /// `bytes`, big-endian as transmitted.
    ///
    /// # Panics
    ///
    /// Panics if `bytes` holds fewer than `ceil(bit_len / 8)` bytes.
    #[must_use]
    pub fn from_slice(bytes: &[u8], bit_len: usize) -> Self {
        let byte_len = bit_len.div_ceil(8);
        assert!(
            bytes.len() >= byte_len,
            "{} bytes cannot back {bit_len} bits",
            bytes.len()
        );
        Self {
            bit_len,
            bytes: bytes[..byte_len].to_vec(),
        }
    }

    /// Creates the zero-bit vector.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            bit_len: 0,
            bytes: Vec::new(),
        }
    }

    /// Number of bits in the vector.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.bit_len
    }

    /// Returns true for the zero-bit vector.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.bit_len == 0
    }

    /// Backing storage, `ceil(len / 8)` bytes, most significant first.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Reads one bit. Bit 0 is the least significant bit of the packed
    /// big-endian value, i.e. the low bit of the last byte.
    #[must_use]
    pub fn bit(&self, index: usize) -> Option<bool> {
        if index >= self.bit_len {
            return None;
        }
        let byte = self.bytes[self.bytes.len() - 1 - index / 8];
        Some((byte >> (index % 8)) & 1 == 1)
    }
}

impl fmt::Display for BitVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.bit_len == 0 {
            return f.write_str("0'h0");
        }
        write!(f, "{}'h", self.bit_len)?;
        for byte in &self.bytes {
            write!(f, "{byte:02X}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::BitVector;

    #[test]
    fn storage_is_sized_to_whole_bytes() {
        let backing = [0xAB, 0xCD, 0xEF];
        assert_eq!(BitVector::from_slice(&backing, 1).as_bytes(), &[0xAB]);
        assert_eq!(BitVector::from_slice(&backing, 8).as_bytes(), &[0xAB]);
        assert_eq!(BitVector::from_slice(&backing, 9).as_bytes(), &[0xAB, 0xCD]);
        assert_eq!(
            BitVector::from_slice(&backing, 16).as_bytes(),
            &[0xAB, 0xCD]
        );
    }

    #[test]
    fn empty_vector_has_no_bits_or_bytes() {
        let empty = BitVector::empty();
        assert!(empty.is_empty());
        assert_eq!(empty.len(), 0);
        assert!(empty.as_bytes().is_empty());
        assert_eq!(empty, BitVector::default());
    }

    #[test]
    fn bit_indexing_is_lsb_first_from_last_byte() {
        // 12'h5A3: bits 0 and 1 come from 0x3, bit 11 from 0x5.
        let vector = BitVector::from_slice(&[0x05, 0xA3], 12);
        assert_eq!(vector.bit(0), Some(true));
        assert_eq!(vector.bit(1), Some(true));
        assert_eq!(vector.bit(2), Some(false));
        assert_eq!(vector.bit(7), Some(true));
        assert_eq!(vector.bit(8), Some(true));
        assert_eq!(vector.bit(11), Some(false));
        assert_eq!(vector.bit(12), None);
    }

    #[test]
    fn display_renders_width_and_hex() {
        let vector = BitVector::from_slice(&[0x2F], 8);
        assert_eq!(vector.to_string(), "8'h2F");
        let wide = BitVector::from_slice(&[0x01, 0xF3], 16);
        assert_eq!(wide.to_string(), "16'h01F3");
        assert_eq!(BitVector::empty().to_string(), "0'h0");
    }

    #[test]
    #[should_panic(expected = "cannot back")]
    fn short_backing_slice_is_rejected() {
        let _ = BitVector::from_slice(&[0xAB], 9);
    }
}
