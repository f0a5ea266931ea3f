//! One-shot MurmurHash3 over a buffer that's already entirely in memory.
//!
//! These are stateless and deliberately don't go through the streaming
//! hashers, so the two can be checked against each other.

use crate::digest::Digest;
use crate::hashers::buffer::{le_u32, le_u64};
use crate::mix::{
    block_x64, block_x86, finalize_32, finalize_x64, finalize_x86, mix_h1, mix_k1, tail_x64,
    tail_x86,
};

/// MurmurHash3_x86_32.
pub fn hash32(seed: u32, data: &[u8]) -> u32 {
    let mut h1 = seed;

    let blocks = data.chunks_exact(4);
    let tail = blocks.remainder();
    for block in blocks {
        h1 = mix_h1(h1, mix_k1(le_u32(block)));
    }

    if !tail.is_empty() {
        h1 ^= mix_k1(le_u32(tail));
    }

    finalize_32(h1, data.len() as u64)
}

/// MurmurHash3_x64_128, the two-lane variant.
///
/// The result's little-endian bytes are the reference output bytes, i.e. the
/// first lane is the low 64 bits.
pub fn hash128_x64(seed: u32, data: &[u8]) -> u128 {
    let mut h = [seed as u64; 2];

    let blocks = data.chunks_exact(16);
    let tail = blocks.remainder();
    for block in blocks {
        block_x64(&mut h, le_u64(&block[0..8]), le_u64(&block[8..16]));
    }

    if !tail.is_empty() {
        let (k1, k2) = tail.split_at(tail.len().min(8));
        tail_x64(&mut h, le_u64(k1), le_u64(k2));
    }

    let [h1, h2] = finalize_x64(h, data.len() as u64);
    h1 as u128 | (h2 as u128) << 64
}

/// MurmurHash3_x86_128, the four-lane variant.
pub fn hash128_x86(seed: u32, data: &[u8]) -> u128 {
    let mut h = [seed; 4];

    let blocks = data.chunks_exact(16);
    let tail = blocks.remainder();
    for block in blocks {
        block_x86(&mut h, read_x86_words(block));
    }

    if !tail.is_empty() {
        tail_x86(&mut h, read_x86_words(tail));
    }

    join_x86(finalize_x86(h, data.len() as u64))
}

/// Reads up to 16 bytes as four zero padded little-endian words.
fn read_x86_words(bytes: &[u8]) -> [u32; 4] {
    let mut words = [0u32; 4];
    for (word, chunk) in words.iter_mut().zip(bytes.chunks(4)) {
        *word = le_u32(chunk);
    }
    words
}

pub(crate) fn join_x86(h: [u32; 4]) -> u128 {
    h[0] as u128 | (h[1] as u128) << 32 | (h[2] as u128) << 64 | (h[3] as u128) << 96
}

//-------------------------------------------------------------
// Convenience wrappers in the shapes people usually want.

pub fn digest32(seed: u32, data: &[u8]) -> Digest {
    Digest::Bits32(hash32(seed, data))
}

pub fn digest128_x64(seed: u32, data: &[u8]) -> Digest {
    Digest::Bits128(hash128_x64(seed, data))
}

pub fn digest128_x86(seed: u32, data: &[u8]) -> Digest {
    Digest::Bits128(hash128_x86(seed, data))
}

/// x64_128 as its two unsigned 64-bit lanes, low lane first.
pub fn hash64(seed: u32, data: &[u8]) -> (u64, u64) {
    let h = hash128_x64(seed, data);
    (h as u64, (h >> 64) as u64)
}

/// Like `hash64()`, with each lane reinterpreted as signed.
pub fn hash64_signed(seed: u32, data: &[u8]) -> (i64, i64) {
    let (lo, hi) = hash64(seed, data);
    (lo as i64, hi as i64)
}

/// x64_128 as raw bytes.
pub fn hash_bytes(seed: u32, data: &[u8]) -> [u8; 16] {
    hash128_x64(seed, data).to_le_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash32_boyd_vectors() {
        assert_eq!(hash32(0, b""), 0);
        assert_eq!(hash32(1, b""), 0x514e28b7);
        assert_eq!(hash32(0xffffffff, b""), 0x81f16f39);
        assert_eq!(hash32(0, b"\x21\x43\x65\x87"), 0xf55b516b);
        assert_eq!(hash32(0x5082edee, b"\x21\x43\x65\x87"), 0x2362f9de);
        assert_eq!(hash32(0, b"\x21\x43\x65"), 0x7e4a8634);
        assert_eq!(hash32(0, b"\x21\x43"), 0xa0f7b07a);
        assert_eq!(hash32(0, b"\x21"), 0x72661cf4);
        assert_eq!(hash32(0, b"\xff\xff\xff\xff"), 0x76293b50);
        assert_eq!(hash32(0, b"\x00\x00\x00\x00"), 0x2362f9de);
        assert_eq!(hash32(0, b"\x00\x00\x00"), 0x85f0b427);
        assert_eq!(hash32(0, b"\x00\x00"), 0x30f4c306);
        assert_eq!(hash32(0, b"\x00"), 0x514e28b7);
    }

    #[test]
    fn hash32_text_vectors() {
        let seed = 0x9747b28c;
        assert_eq!(hash32(seed, b"aaaa"), 0x5a97808a);
        assert_eq!(hash32(seed, b"aaa"), 0x283e0130);
        assert_eq!(hash32(seed, b"aa"), 0x5d211726);
        assert_eq!(hash32(seed, b"a"), 0x7fa09ea6);
        assert_eq!(hash32(seed, b"abcd"), 0xf0478627);
        assert_eq!(hash32(seed, b"abc"), 0xc84a62dd);
        assert_eq!(hash32(seed, b"ab"), 0x74875592);
        assert_eq!(hash32(seed, b"Hello, world!"), 0x24884cba);
        assert_eq!(hash32(seed, "ππππππππ".as_bytes()), 0xd58063c1);
        assert_eq!(hash32(seed, &[b'a'; 256]), 0x37405bdc);
        assert_eq!(
            hash32(seed, b"The quick brown fox jumps over the lazy dog"),
            0x2fa826cd
        );
        assert_eq!(hash32(0, b"abc"), 0xb3dd93fa);
        assert_eq!(
            hash32(0, b"abcdbcdecdefdefgefghfghighijhijkijkljklmklmnlmnomnopnopq"),
            0xee925b90
        );
        assert_eq!(hash32(0, b"foo"), 4138058784);
    }

    #[test]
    fn hash128_x64_vectors() {
        assert_eq!(hash128_x64(0, b""), 0);
        assert_eq!(hash128_x64(0, b"foo"), 168394135621993849475852668931176482145);
        assert_eq!(hash128_x64(42, b"foo"), 215966891540331383248189432718888555506);
        assert_eq!(hash128_x64(1, b""), 108177238965372658051732455265379769525);
        assert_eq!(hash128_x64(0, b"fooo"), 93757880664175803030724836966881520758);
        assert_eq!(
            hash128_x64(0, b"fooofooo"),
            211983152696995059280678248292944636041
        );
        assert_eq!(
            hash128_x64(0, b"fooofoooo"),
            338423359992422647011971677127905553798
        );
        assert_eq!(
            hash128_x64(0x9747b28c, b"The quick brown fox jumps over the lazy dog"),
            331338380982025235147197912083035533601
        );
    }

    #[test]
    fn hash128_x86_vectors() {
        assert_eq!(hash128_x86(0, b""), 0);
        assert_eq!(
            hash128_x86(123, b"Hello, world!"),
            0x9e37c886a41621625a1aacd761c9129e
        );
        assert_eq!(hash128_x86(123, b""), 0x26f3e79926f3e79926f3e799fedc5245);
        assert_eq!(hash128_x86(0, b"a"), 0x5556b01b5556b01b5556b01ba794933c);
        assert_eq!(
            hash128_x86(0, b"The quick brown fox jumps over the lazy dog"),
            0xe5e91d2c5d7bf66cecee2c672f1583c3
        );
    }

    #[test]
    fn wrappers_agree() {
        let data = b"The quick brown fox jumps over the lazy dog";
        assert_eq!(hash64(0x9747b28c, data), (8325606756057297185, 17961889624427075301));
        assert_eq!(
            hash64_signed(0x9747b28c, data),
            (8325606756057297185, -484854449282476315)
        );
        assert_eq!(hash64(0, b"foo"), (16316970633193145697, 9128664383759220103));
        assert_eq!(
            hash_bytes(0, b"foo"),
            *b"aE\xf5\x01W\x86q\xe2\x87}\xba+\xe4\x87\xaf~"
        );
        assert_eq!(digest32(0, b"foo").signed(), -156908512);
        assert_eq!(
            digest128_x86(123, b"Hello, world!").unsigned_pair(),
            Some((0x5a1aacd761c9129e, 0x9e37c886a4162162))
        );
        assert_eq!(
            digest128_x64(42, b"foo").signed(),
            -124315475380607080215185174712879655950
        );
    }
}
