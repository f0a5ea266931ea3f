use super::buffer::{le_u64, BitBuffer128};
use crate::digest::Digest;
use crate::mix::{block_x64, finalize_x64, tail_x64};

/// Streaming MurmurHash3_x64_128: two 64-bit lanes, 16-byte blocks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hasher128X64 {
    seed: u32,
    h: [u64; 2],
    buffer: BitBuffer128,
    len: u64,
}

impl Hasher128X64 {
    pub const NAME: &'static str = "mmh3_x64_128";
    pub const DIGEST_SIZE: usize = 16;
    pub const BLOCK_SIZE: usize = 16;

    pub fn new(seed: u32) -> Self {
        Self {
            seed,
            h: [seed as u64; 2],
            buffer: BitBuffer128::new(),
            len: 0,
        }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn update(&mut self, data: &[u8]) {
        self.len += data.len() as u64;

        // Whole 64-bit words go in with a single push each, wherever the
        // current block boundary happens to be.
        let words = data.chunks_exact(8);
        let rest = words.remainder();
        for word in words {
            self.push(le_u64(word), 64);
        }
        for &byte in rest {
            self.push(byte as u64, 8);
        }
    }

    #[inline]
    fn push(&mut self, k: u64, width: u32) {
        if let Some((k1, k2)) = self.buffer.push(k, width) {
            block_x64(&mut self.h, k1, k2);
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.seed);
    }

    fn finalize(&self) -> [u64; 2] {
        let mut h = self.h;
        let (k1, k2) = self.buffer.pending();
        tail_x64(&mut h, k1, k2);
        finalize_x64(h, self.len)
    }

    fn finalize_u128(&self) -> u128 {
        let [h1, h2] = self.finalize();
        h1 as u128 | (h2 as u128) << 64
    }

    /// The digest as bytes: first lane, then second lane, each little-endian.
    pub fn digest(&self) -> [u8; 16] {
        self.finalize_u128().to_le_bytes()
    }

    pub fn sint_digest(&self) -> i128 {
        self.finalize_u128() as i128
    }

    pub fn uint_digest(&self) -> u128 {
        self.finalize_u128()
    }

    /// `(first lane, second lane)`, reinterpreted as signed.
    pub fn stuple_digest(&self) -> (i64, i64) {
        let [h1, h2] = self.finalize();
        (h1 as i64, h2 as i64)
    }

    pub fn utuple_digest(&self) -> (u64, u64) {
        let [h1, h2] = self.finalize();
        (h1, h2)
    }

    pub fn finish_digest(&self) -> Digest {
        Digest::Bits128(self.finalize_u128())
    }
}

impl Default for Hasher128X64 {
    fn default() -> Self {
        Self::new(0)
    }
}

impl_std_traits!(Hasher128X64);
