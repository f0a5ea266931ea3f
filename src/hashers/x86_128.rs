use super::buffer::{le_u64, split_words, BitBuffer128};
use crate::digest::Digest;
use crate::mix::{block_x86, finalize_x86, tail_x86};
use crate::oneshot::join_x86;

/// Streaming MurmurHash3_x86_128: four 32-bit lanes, 16-byte blocks.
///
/// Input is buffered in the same two 64-bit words as [`super::Hasher128X64`]
/// and split into the four lane words when a block completes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hasher128X86 {
    seed: u32,
    h: [u32; 4],
    buffer: BitBuffer128,
    len: u64,
}

impl Hasher128X86 {
    pub const NAME: &'static str = "mmh3_x86_128";
    pub const DIGEST_SIZE: usize = 16;
    pub const BLOCK_SIZE: usize = 16;

    pub fn new(seed: u32) -> Self {
        Self {
            seed,
            h: [seed; 4],
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
        if let Some((lo, hi)) = self.buffer.push(k, width) {
            block_x86(&mut self.h, split_words(lo, hi));
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.seed);
    }

    fn finalize(&self) -> u128 {
        let mut h = self.h;
        let (lo, hi) = self.buffer.pending();
        tail_x86(&mut h, split_words(lo, hi));
        join_x86(finalize_x86(h, self.len))
    }

    /// The digest as bytes: the four lanes in order, each little-endian.
    pub fn digest(&self) -> [u8; 16] {
        self.finalize().to_le_bytes()
    }

    pub fn sint_digest(&self) -> i128 {
        self.finalize() as i128
    }

    pub fn uint_digest(&self) -> u128 {
        self.finalize()
    }

    /// Low and high 64 bits of the digest, reinterpreted as signed.
    pub fn stuple_digest(&self) -> (i64, i64) {
        let (lo, hi) = self.utuple_digest();
        (lo as i64, hi as i64)
    }

    pub fn utuple_digest(&self) -> (u64, u64) {
        let h = self.finalize();
        (h as u64, (h >> 64) as u64)
    }

    pub fn finish_digest(&self) -> Digest {
        Digest::Bits128(self.finalize())
    }
}

impl Default for Hasher128X86 {
    fn default() -> Self {
        Self::new(0)
    }
}

impl_std_traits!(Hasher128X86);
