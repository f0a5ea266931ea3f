//! Cross-call bit buffers.
//!
//! Input that doesn't fill a whole block yet is parked here until the next
//! `update()` call completes it.  Bits are packed least-significant-bit first
//! within each byte and least-significant-byte first across the stream, which
//! is exactly the layout a little-endian block read would produce, so a
//! completed buffer can be handed to the block mixer as-is.
//!
//! Invariants (between calls):
//!
//! - `shift < BLOCK_BITS`.
//! - All bits at or above `shift` are zero.  This is what makes the pending
//!   words directly usable as a zero padded tail.

/// Reads up to 4 bytes as a little-endian word, zero padding the rest.
#[inline]
pub fn le_u32(bytes: &[u8]) -> u32 {
    debug_assert!(bytes.len() <= 4);
    let mut word = [0u8; 4];
    word[..bytes.len()].copy_from_slice(bytes);
    u32::from_le_bytes(word)
}

/// Reads up to 8 bytes as a little-endian word, zero padding the rest.
#[inline]
pub fn le_u64(bytes: &[u8]) -> u64 {
    debug_assert!(bytes.len() <= 8);
    let mut word = [0u8; 8];
    word[..bytes.len()].copy_from_slice(bytes);
    u64::from_le_bytes(word)
}

#[inline]
fn low_bits(k: u64, width: u32) -> u64 {
    if width >= 64 {
        k
    } else {
        k & ((1u64 << width) - 1)
    }
}

/// Buffer for 32-bit blocks, backed by a single 64-bit word so that a full
/// 32-bit push on top of a partial block never overflows.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct BitBuffer32 {
    bits: u64,
    shift: u32,
}

impl BitBuffer32 {
    pub const BLOCK_BITS: u32 = 32;

    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the low `width` bits of `k` (`width <= 32`).  Returns the
    /// block that this push completed, if any.
    #[inline]
    pub fn push(&mut self, k: u32, width: u32) -> Option<u32> {
        debug_assert!(width <= Self::BLOCK_BITS);
        debug_assert!(self.shift < Self::BLOCK_BITS);

        self.bits |= low_bits(k as u64, width) << self.shift;
        self.shift += width;

        if self.shift >= Self::BLOCK_BITS {
            let block = self.bits as u32;
            self.bits >>= Self::BLOCK_BITS;
            self.shift -= Self::BLOCK_BITS;
            Some(block)
        } else {
            None
        }
    }

    /// The buffered, not yet mixed bits as a zero padded word.
    #[inline]
    pub fn pending(&self) -> u32 {
        self.bits as u32
    }

    /// Number of valid bits currently buffered.
    #[inline]
    pub fn shift(&self) -> u32 {
        self.shift
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Buffer for 128-bit blocks, as two 64-bit words.  Used by both 128-bit
/// variants: x64_128 reads the words directly, x86_128 splits each of them
/// into two 32-bit halves.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct BitBuffer128 {
    lo: u64,
    hi: u64,
    shift: u32,
}

impl BitBuffer128 {
    pub const BLOCK_BITS: u32 = 128;

    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the low `width` bits of `k` (`width <= 64`).  Returns the
    /// `(lo, hi)` words of the block that this push completed, if any.
    ///
    /// A push may straddle the `lo`/`hi` boundary, or the end of the block,
    /// in which case the bits past the end are carried over into the fresh
    /// buffer.
    #[inline]
    pub fn push(&mut self, k: u64, width: u32) -> Option<(u64, u64)> {
        debug_assert!(width <= 64);
        debug_assert!(self.shift < Self::BLOCK_BITS);

        let k = low_bits(k, width);
        let end = self.shift + width;
        let mut carry = 0;

        if self.shift < 64 {
            self.lo |= k << self.shift;
            if end > 64 {
                // `end > 64` with `width <= 64` means `shift > 0`.
                self.hi |= k >> (64 - self.shift);
            }
        } else {
            self.hi |= k << (self.shift - 64);
            if end > Self::BLOCK_BITS {
                // Likewise, `shift > 64` here.
                carry = k >> (Self::BLOCK_BITS - self.shift);
            }
        }
        self.shift = end;

        if self.shift >= Self::BLOCK_BITS {
            let block = (self.lo, self.hi);
            self.lo = carry;
            self.hi = 0;
            self.shift -= Self::BLOCK_BITS;
            Some(block)
        } else {
            None
        }
    }

    /// The buffered bits as zero padded `(lo, hi)` words.
    #[inline]
    pub fn pending(&self) -> (u64, u64) {
        (self.lo, self.hi)
    }

    #[inline]
    pub fn shift(&self) -> u32 {
        self.shift
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Splits two 64-bit words into the four 32-bit lane words of x86_128.
#[inline]
pub fn split_words(lo: u64, hi: u64) -> [u32; 4] {
    [lo as u32, (lo >> 32) as u32, hi as u32, (hi >> 32) as u32]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn le_reads_zero_pad() {
        assert_eq!(le_u32(&[]), 0);
        assert_eq!(le_u32(&[0x21, 0x43, 0x65]), 0x00654321);
        assert_eq!(le_u64(&[1, 2, 3, 4, 5, 6, 7, 8]), 0x0807060504030201);
        assert_eq!(le_u64(&[0xff]), 0xff);
    }

    #[test]
    fn buffer32_bytewise() {
        let mut buf = BitBuffer32::new();
        assert_eq!(buf.push(0x21, 8), None);
        assert_eq!(buf.push(0x43, 8), None);
        assert_eq!(buf.push(0x65, 8), None);
        assert_eq!(buf.shift(), 24);
        assert_eq!(buf.pending(), 0x00654321);
        assert_eq!(buf.push(0x87, 8), Some(0x87654321));
        assert_eq!(buf.shift(), 0);
        assert_eq!(buf.pending(), 0);
    }

    #[test]
    fn buffer32_word_on_top_of_partial() {
        let mut buf = BitBuffer32::new();
        buf.push(0xaa, 8);
        buf.push(0xbb, 8);
        assert_eq!(buf.push(0x44332211, 32), Some(0x2211bbaa));
        assert_eq!(buf.shift(), 16);
        assert_eq!(buf.pending(), 0x4433);
    }

    #[test]
    fn buffer32_masks_wide_input() {
        let mut buf = BitBuffer32::new();
        buf.push(0xffff_ff01, 8);
        assert_eq!(buf.pending(), 0x01);
    }

    #[test]
    fn buffer128_word_straddles_halves() {
        let mut buf = BitBuffer128::new();
        for byte in [1u64, 2, 3, 4, 5] {
            assert_eq!(buf.push(byte, 8), None);
        }
        assert_eq!(buf.push(0x0d0c0b0a09080706, 64), None);
        assert_eq!(buf.shift(), 104);
        assert_eq!(buf.pending(), (0x0807060504030201, 0x000000000d0c0b0a09));
    }

    #[test]
    fn buffer128_word_straddles_block_end() {
        let mut buf = BitBuffer128::new();
        for i in 0..13u64 {
            buf.push(i, 8);
        }
        let block = buf.push(0x1716151413121110, 64);
        assert_eq!(
            block,
            Some((0x0706050403020100, 0x121110_0c0b0a0908))
        );
        assert_eq!(buf.shift(), 40);
        assert_eq!(buf.pending(), (0x1716151413, 0));
    }

    #[test]
    fn buffer128_exact_completion() {
        let mut buf = BitBuffer128::new();
        assert_eq!(buf.push(u64::MAX, 64), None);
        assert_eq!(buf.push(1, 64), Some((u64::MAX, 1)));
        assert_eq!(buf.shift(), 0);
        assert_eq!(buf.pending(), (0, 0));
    }

    #[test]
    fn buffer128_odd_widths_keep_invariants() {
        // Non-byte widths aren't used by the hashers, but the packing is
        // defined in bits and should hold for any width.
        let mut buf = BitBuffer128::new();
        let mut total = 0u32;
        for width in [3u32, 61, 7, 64, 1, 33, 50, 12] {
            let completed = buf.push(u64::MAX, width).is_some();
            total += width;
            assert_eq!(completed, total / 128 > (total - width) / 128);
            assert_eq!(buf.shift(), total % 128);
            let (lo, hi) = buf.pending();
            let shift = buf.shift();
            let expect_lo = if shift >= 64 { u64::MAX } else { (1u64 << shift) - 1 };
            let expect_hi = if shift > 64 { (1u64 << (shift - 64)) - 1 } else { 0 };
            assert_eq!((lo, hi), (expect_lo, expect_hi));
        }
    }

    #[test]
    fn split_words_order() {
        assert_eq!(
            split_words(0x2222222211111111, 0x4444444433333333),
            [0x11111111, 0x22222222, 0x33333333, 0x44444444]
        );
    }
}
