//! The MurmurHash3 mixing primitives.
//!
//! Everything here is a pure function over integers.  The constants are the
//! ones from Austin Appleby's reference implementation and must not change,
//! otherwise the hashes stop matching every other MurmurHash3 out there.

//-------------------------------------------------------------
// x86_32

const C1_32: u32 = 0xcc9e2d51;
const C2_32: u32 = 0x1b873593;

/// Diffuses one 32-bit input word before it's xored into the lane.
#[inline]
pub fn mix_k1(mut k1: u32) -> u32 {
    k1 = k1.wrapping_mul(C1_32);
    k1 = k1.rotate_left(15);
    k1 = k1.wrapping_mul(C2_32);
    k1
}

/// Absorbs an already diffused word into the lane.
#[inline]
pub fn mix_h1(mut h1: u32, k1: u32) -> u32 {
    h1 ^= k1;
    h1 = h1.rotate_left(13);
    h1.wrapping_mul(5).wrapping_add(0xe6546b64)
}

/// The 32-bit finalization mix.  Forces all bits of the lane to avalanche.
#[inline]
pub fn fmix32(mut h: u32) -> u32 {
    h ^= h >> 16;
    h = h.wrapping_mul(0x85ebca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2ae35);
    h ^= h >> 16;
    h
}

//-------------------------------------------------------------
// x64_128

const C1_X64: u64 = 0x87c37b91114253d5;
const C2_X64: u64 = 0x4cf5ad432745937f;

/// `(rotation, additive constant)` for the two lanes of `mix_h_x64()`.
pub const H_X64: [(u32, u32); 2] = [(27, 0x52dce729), (31, 0x38495ab5)];

#[inline]
pub fn mix_k1_x64(mut k1: u64) -> u64 {
    k1 = k1.wrapping_mul(C1_X64);
    k1 = k1.rotate_left(31);
    k1.wrapping_mul(C2_X64)
}

#[inline]
pub fn mix_k2_x64(mut k2: u64) -> u64 {
    k2 = k2.wrapping_mul(C2_X64);
    k2 = k2.rotate_left(33);
    k2.wrapping_mul(C1_X64)
}

/// Rotates `h`, adds the partner lane, then multiplies by 5 and adds `c`.
#[inline]
pub fn mix_h_x64(mut h: u64, other: u64, rotation: u32, c: u32) -> u64 {
    h = h.rotate_left(rotation);
    h = h.wrapping_add(other);
    h.wrapping_mul(5).wrapping_add(c as u64)
}

/// The 64-bit finalization mix.
#[inline]
pub fn fmix64(mut k: u64) -> u64 {
    k ^= k >> 33;
    k = k.wrapping_mul(0xff51afd7ed558ccd);
    k ^= k >> 33;
    k = k.wrapping_mul(0xc4ceb9fe1a85ec53);
    k ^= k >> 33;
    k
}

//-------------------------------------------------------------
// x86_128

/// Lane `i` multiplies by `C_X86[i]`, rotates, then multiplies by
/// `C_X86[(i + 1) % 4]`.
const C_X86: [u32; 4] = [0x239b961b, 0xab0e9789, 0x38b34ae5, 0xa1e38b93];
const K_ROTATIONS_X86: [u32; 4] = [15, 16, 17, 18];

/// `(rotation, additive constant)` for each of the four lanes of
/// `mix_h_x86()`.
pub const H_X86: [(u32, u32); 4] = [
    (19, 0x561ccd1b),
    (17, 0x0bcaa747),
    (15, 0x96cd1c35),
    (13, 0x32ac3b17),
];

/// Diffuses the input word destined for lane `lane` (0..4).
#[inline]
pub fn mix_k_x86(lane: usize, mut k: u32) -> u32 {
    k = k.wrapping_mul(C_X86[lane]);
    k = k.rotate_left(K_ROTATIONS_X86[lane]);
    k.wrapping_mul(C_X86[(lane + 1) % 4])
}

#[inline]
pub fn mix_h_x86(mut h: u32, other: u32, rotation: u32, c: u32) -> u32 {
    h = h.rotate_left(rotation);
    h = h.wrapping_add(other);
    h.wrapping_mul(5).wrapping_add(c)
}

//-------------------------------------------------------------
// Block and finalization steps shared by the one-shot functions and the
// streaming hashers.

/// Mixes one complete 16-byte block, given as two little-endian words, into
/// the x64_128 lanes.
#[inline]
pub fn block_x64(h: &mut [u64; 2], k1: u64, k2: u64) {
    h[0] ^= mix_k1_x64(k1);
    h[0] = mix_h_x64(h[0], h[1], H_X64[0].0, H_X64[0].1);
    h[1] ^= mix_k2_x64(k2);
    h[1] = mix_h_x64(h[1], h[0], H_X64[1].0, H_X64[1].1);
}

/// Folds a zero padded tail into the x64_128 lanes.  Unlike `block_x64()`
/// this deliberately skips the `mix_h_x64()` step.
#[inline]
pub fn tail_x64(h: &mut [u64; 2], k1: u64, k2: u64) {
    h[1] ^= mix_k2_x64(k2);
    h[0] ^= mix_k1_x64(k1);
}

pub fn finalize_x64(mut h: [u64; 2], len: u64) -> [u64; 2] {
    h[0] ^= len;
    h[1] ^= len;

    h[0] = h[0].wrapping_add(h[1]);
    h[1] = h[1].wrapping_add(h[0]);

    h[0] = fmix64(h[0]);
    h[1] = fmix64(h[1]);

    h[0] = h[0].wrapping_add(h[1]);
    h[1] = h[1].wrapping_add(h[0]);
    h
}

/// Mixes one complete 16-byte block, given as four little-endian words, into
/// the x86_128 lanes.  Each lane's `mix_h` sees the already updated value of
/// the lane before it (lane 3 wraps around to lane 0).
#[inline]
pub fn block_x86(h: &mut [u32; 4], k: [u32; 4]) {
    for lane in 0..4 {
        let (rotation, c) = H_X86[lane];
        h[lane] ^= mix_k_x86(lane, k[lane]);
        h[lane] = mix_h_x86(h[lane], h[(lane + 1) % 4], rotation, c);
    }
}

/// Tail counterpart of `block_x86()`, again without the `mix_h` step.
#[inline]
pub fn tail_x86(h: &mut [u32; 4], k: [u32; 4]) {
    for lane in (0..4).rev() {
        h[lane] ^= mix_k_x86(lane, k[lane]);
    }
}

pub fn finalize_x86(mut h: [u32; 4], len: u64) -> [u32; 4] {
    // The reference implementation keeps the length in an `int`.
    let len = len as u32;
    for lane in h.iter_mut() {
        *lane ^= len;
    }

    cross_add_x86(&mut h);
    for lane in h.iter_mut() {
        *lane = fmix32(*lane);
    }
    cross_add_x86(&mut h);
    h
}

fn cross_add_x86(h: &mut [u32; 4]) {
    h[0] = h[0].wrapping_add(h[1]).wrapping_add(h[2]).wrapping_add(h[3]);
    h[1] = h[1].wrapping_add(h[0]);
    h[2] = h[2].wrapping_add(h[0]);
    h[3] = h[3].wrapping_add(h[0]);
}

pub fn finalize_32(h: u32, len: u64) -> u32 {
    fmix32(h ^ len as u32)
}
