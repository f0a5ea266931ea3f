use super::buffer::{le_u32, BitBuffer32};
use crate::digest::Digest;
use crate::mix::{finalize_32, mix_h1, mix_k1};

/// Streaming MurmurHash3_x86_32.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hasher32 {
    seed: u32,
    h1: u32,
    buffer: BitBuffer32,
    len: u64,
}

impl Hasher32 {
    pub const NAME: &'static str = "mmh3_32";
    pub const DIGEST_SIZE: usize = 4;
    pub const BLOCK_SIZE: usize = 4;

    pub fn new(seed: u32) -> Self {
        Self {
            seed,
            h1: seed,
            buffer: BitBuffer32::new(),
            len: 0,
        }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Number of bytes fed so far.
    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn update(&mut self, data: &[u8]) {
        self.len += data.len() as u64;

        let words = data.chunks_exact(4);
        let rest = words.remainder();
        for word in words {
            self.push(le_u32(word), 32);
        }
        for &byte in rest {
            self.push(byte as u32, 8);
        }
    }

    #[inline]
    fn push(&mut self, k: u32, width: u32) {
        if let Some(block) = self.buffer.push(k, width) {
            self.h1 = mix_h1(self.h1, mix_k1(block));
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.seed);
    }

    /// The finalized hash.  The buffered tail is folded into a copy of the
    /// lane, so the stream can carry on afterwards.
    fn finalize(&self) -> u32 {
        // An empty buffer is all zeros, and `mix_k1(0) == 0`.
        let h1 = self.h1 ^ mix_k1(self.buffer.pending());
        finalize_32(h1, self.len)
    }

    /// The digest as little-endian bytes.
    pub fn digest(&self) -> [u8; 4] {
        self.finalize().to_le_bytes()
    }

    pub fn sint_digest(&self) -> i32 {
        self.finalize() as i32
    }

    pub fn uint_digest(&self) -> u32 {
        self.finalize()
    }

    pub fn finish_digest(&self) -> Digest {
        Digest::Bits32(self.finalize())
    }
}

impl Default for Hasher32 {
    fn default() -> Self {
        Self::new(0)
    }
}

impl_std_traits!(Hasher32);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oneshot::hash32;

    fn hashed(seed: u32, chunks: &[&[u8]]) -> Hasher32 {
        let mut hasher = Hasher32::new(seed);
        for chunk in chunks {
            hasher.update(chunk);
        }
        hasher
    }

    #[test]
    fn empty() {
        let hasher = Hasher32::default();
        assert_eq!(hasher.digest(), [0, 0, 0, 0]);
        assert_eq!(hasher.uint_digest(), 0);
        assert!(hasher.is_empty());

        assert_eq!(hashed(0, &[b"", b""]).uint_digest(), 0);
        assert_eq!(hashed(1, &[b""]).uint_digest(), 0x514e28b7);
    }

    #[test]
    fn split_vectors() {
        assert_eq!(hashed(0, &[b"\x21\x43", b"\x65"]).uint_digest(), 0x7e4a8634);
        assert_eq!(hashed(0, &[b"\x21\x43\x65\x87"]).uint_digest(), 0xf55b516b);
        assert_eq!(hashed(0, &[b"\x21\x43", b"\x65\x87"]).uint_digest(), 0xf55b516b);
        assert_eq!(
            hashed(0x9747b28c, &[b"Hello,", b" world!"]).digest(),
            [0xba, 0x4c, 0x88, 0x24]
        );
        assert_eq!(
            hashed(0x9747b28c, &[b"The quick brown fo", b"x jumps over the lazy dog"])
                .uint_digest(),
            0x2fa826cd
        );
        assert_eq!(hashed(0, &[b"foo"]).sint_digest(), -156908512);
        assert_eq!(hashed(0, &[b"foo"]).uint_digest(), 4138058784);
    }

    #[test]
    fn abcdefgh_chunkings() {
        let whole = hashed(0, &[b"abcdefgh"]);
        let halves = hashed(0, &[b"abcd", b"efgh"]);
        let bytes = hashed(0, &[b"a", b"b", b"c", b"d", b"e", b"f", b"g", b"h"]);
        assert_eq!(whole.uint_digest(), hash32(0, b"abcdefgh"));
        assert_eq!(whole, halves);
        assert_eq!(whole, bytes);
    }

    #[test]
    fn digest_does_not_disturb_stream() {
        let mut hasher = Hasher32::new(0x9747b28c);
        hasher.update(b"Hello, ");
        let mid = hasher.uint_digest();
        assert_eq!(mid, hasher.uint_digest());
        assert_eq!(mid, hash32(0x9747b28c, b"Hello, "));

        hasher.update(b"world!");
        assert_eq!(hasher.uint_digest(), 0x24884cba);
        assert_eq!(hasher.len(), 13);
    }

    #[test]
    fn reset_keeps_seed() {
        let mut hasher = hashed(5, &[b"some bytes"]);
        hasher.reset();
        assert_eq!(hasher, Hasher32::new(5));
        assert_eq!(hasher.seed(), 5);
    }

    #[test]
    fn presentations_agree() {
        let hasher = hashed(3, &[b"presentation"]);
        let u = hasher.uint_digest();
        assert_eq!(hasher.sint_digest() as u32, u);
        assert_eq!(u32::from_le_bytes(hasher.digest()), u);
        assert_eq!(hasher.finish_digest(), Digest::Bits32(u));
    }
}
