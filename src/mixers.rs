//! MurmurHash3's pieces wrapped as fixed size mix functions, for running
//! through [`crate::stats`].
//!
//! The block mixers absorb a single block into a seeded state and return the
//! raw state, without finalization.  That shows how much diffusion one block
//! gets before the next one lands on top of it.

use crate::hashers::Hasher128X64;
use crate::mix::{block_x64, block_x86, fmix32, fmix64, mix_h1, mix_k1};
use crate::oneshot::{hash128_x64, hash128_x86, hash32};

const SEED: u32 = 0xf1c2287e;

pub struct Mixer<'a> {
    pub name: &'a str,
    pub mix_function: &'a dyn Fn(&[u8], &mut [u8]),
    pub input_size: usize,  // In bytes.
    pub output_size: usize, // In bytes.
    pub digest_size: usize, // In bytes.
}

pub const MIXERS: &[Mixer] = &[
    Mixer {
        name: "fmix32 finalizer",
        mix_function: &fmix32_input,
        input_size: 4,
        output_size: 4,
        digest_size: 4,
    },
    Mixer {
        name: "fmix64 finalizer",
        mix_function: &fmix64_input,
        input_size: 8,
        output_size: 8,
        digest_size: 8,
    },
    Mixer {
        name: "x86_32 block",
        mix_function: &block_x86_32_input,
        input_size: 4,
        output_size: 4,
        digest_size: 4,
    },
    Mixer {
        name: "x64_128 block",
        mix_function: &block_x64_128_input,
        input_size: 16,
        output_size: 16,
        digest_size: 16,
    },
    Mixer {
        name: "x86_128 block",
        mix_function: &block_x86_128_input,
        input_size: 16,
        output_size: 16,
        digest_size: 16,
    },
    Mixer {
        name: "mmh3_32, 16 bytes",
        mix_function: &hash32_input,
        input_size: 16,
        output_size: 4,
        digest_size: 4,
    },
    Mixer {
        name: "mmh3_32, 3 byte tail",
        mix_function: &hash32_input,
        input_size: 3,
        output_size: 4,
        digest_size: 4,
    },
    Mixer {
        name: "mmh3_x64_128, 16 bytes",
        mix_function: &hash128_x64_input,
        input_size: 16,
        output_size: 16,
        digest_size: 16,
    },
    Mixer {
        name: "mmh3_x64_128, 7 byte tail",
        mix_function: &hash128_x64_input,
        input_size: 7,
        output_size: 16,
        digest_size: 16,
    },
    Mixer {
        name: "mmh3_x64_128 streamed, 5 + 14 bytes",
        mix_function: &streamed_x64_128_input,
        input_size: 19,
        output_size: 16,
        digest_size: 16,
    },
    Mixer {
        name: "mmh3_x86_128, 16 bytes",
        mix_function: &hash128_x86_input,
        input_size: 16,
        output_size: 16,
        digest_size: 16,
    },
];

fn u32_at(bytes: &[u8], i: usize) -> u32 {
    u32::from_le_bytes([bytes[i], bytes[i + 1], bytes[i + 2], bytes[i + 3]])
}

fn u64_at(bytes: &[u8], i: usize) -> u64 {
    u32_at(bytes, i) as u64 | (u32_at(bytes, i + 4) as u64) << 32
}

pub fn fmix32_input(in_bytes: &[u8], out_bytes: &mut [u8]) {
    out_bytes[..4].copy_from_slice(&fmix32(u32_at(in_bytes, 0)).to_le_bytes());
}

pub fn fmix64_input(in_bytes: &[u8], out_bytes: &mut [u8]) {
    out_bytes[..8].copy_from_slice(&fmix64(u64_at(in_bytes, 0)).to_le_bytes());
}

pub fn block_x86_32_input(in_bytes: &[u8], out_bytes: &mut [u8]) {
    let h1 = mix_h1(SEED, mix_k1(u32_at(in_bytes, 0)));
    out_bytes[..4].copy_from_slice(&h1.to_le_bytes());
}

pub fn block_x64_128_input(in_bytes: &[u8], out_bytes: &mut [u8]) {
    let mut h = [SEED as u64; 2];
    block_x64(&mut h, u64_at(in_bytes, 0), u64_at(in_bytes, 8));
    out_bytes[0..8].copy_from_slice(&h[0].to_le_bytes());
    out_bytes[8..16].copy_from_slice(&h[1].to_le_bytes());
}

pub fn block_x86_128_input(in_bytes: &[u8], out_bytes: &mut [u8]) {
    let mut h = [SEED; 4];
    let k = [0, 4, 8, 12].map(|i| u32_at(in_bytes, i));
    block_x86(&mut h, k);
    for (lane, out) in h.iter().zip(out_bytes.chunks_exact_mut(4)) {
        out.copy_from_slice(&lane.to_le_bytes());
    }
}

/// Full hashes over the whole input, whatever its length.
pub fn hash32_input(in_bytes: &[u8], out_bytes: &mut [u8]) {
    out_bytes[..4].copy_from_slice(&hash32(SEED, in_bytes).to_le_bytes());
}

pub fn hash128_x64_input(in_bytes: &[u8], out_bytes: &mut [u8]) {
    out_bytes[..16].copy_from_slice(&hash128_x64(SEED, in_bytes).to_le_bytes());
}

pub fn hash128_x86_input(in_bytes: &[u8], out_bytes: &mut [u8]) {
    out_bytes[..16].copy_from_slice(&hash128_x86(SEED, in_bytes).to_le_bytes());
}

/// The streaming hasher, with the input split so that both the buffered
/// word path and the byte path are involved.
pub fn streamed_x64_128_input(in_bytes: &[u8], out_bytes: &mut [u8]) {
    let mut hasher = Hasher128X64::new(SEED);
    hasher.update(&in_bytes[..5]);
    hasher.update(&in_bytes[5..]);
    out_bytes[..16].copy_from_slice(&hasher.digest());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mixers_fill_their_output() {
        for mixer in MIXERS {
            let input: Vec<u8> = (0..mixer.input_size as u8).map(|i| i ^ 0x5a).collect();
            let mut out = vec![0u8; mixer.output_size];
            (mixer.mix_function)(&input, &mut out);
            assert!(out.iter().any(|&b| b != 0), "{}", mixer.name);
            assert!(mixer.digest_size <= mixer.output_size, "{}", mixer.name);
        }
    }

    #[test]
    fn streamed_matches_oneshot() {
        let input: Vec<u8> = (0..19).collect();
        let mut out = [0u8; 16];
        streamed_x64_128_input(&input, &mut out);
        assert_eq!(u128::from_le_bytes(out), hash128_x64(SEED, &input));
    }

    #[test]
    fn hash_mixers_are_the_oneshot_hashes() {
        let input: Vec<u8> = (100..116).collect();
        let mut out4 = [0u8; 4];
        let mut out16 = [0u8; 16];

        hash32_input(&input[..3], &mut out4);
        assert_eq!(u32::from_le_bytes(out4), hash32(SEED, &input[..3]));
        hash128_x64_input(&input[..7], &mut out16);
        assert_eq!(u128::from_le_bytes(out16), hash128_x64(SEED, &input[..7]));
        hash128_x86_input(&input, &mut out16);
        assert_eq!(u128::from_le_bytes(out16), hash128_x86(SEED, &input));
    }

    #[test]
    fn fmix64_mixer_is_fmix64() {
        let mut out = [0u8; 8];
        fmix64_input(&1u64.to_le_bytes(), &mut out);
        assert_eq!(u64::from_le_bytes(out), fmix64(1));
    }
}
