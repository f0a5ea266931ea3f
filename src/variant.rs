//! Descriptors for the three MurmurHash3 variants, for picking one at
//! runtime.

use std::fmt;
use std::str::FromStr;

use crate::digest::Digest;
use crate::error::{self, Error};
use crate::hashers::{Hasher128X64, Hasher128X86, Hasher32, Murmur3Hasher};
use crate::oneshot;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Variant {
    X86_32,
    X64_128,
    X86_128,
}

impl Variant {
    pub const ALL: &'static [Variant] = &[Variant::X86_32, Variant::X64_128, Variant::X86_128];

    pub fn name(&self) -> &'static str {
        match self {
            Variant::X86_32 => Hasher32::NAME,
            Variant::X64_128 => Hasher128X64::NAME,
            Variant::X86_128 => Hasher128X86::NAME,
        }
    }

    pub fn digest_size(&self) -> usize {
        match self {
            Variant::X86_32 => Hasher32::DIGEST_SIZE,
            Variant::X64_128 => Hasher128X64::DIGEST_SIZE,
            Variant::X86_128 => Hasher128X86::DIGEST_SIZE,
        }
    }

    pub fn block_size(&self) -> usize {
        match self {
            Variant::X86_32 => Hasher32::BLOCK_SIZE,
            Variant::X64_128 => Hasher128X64::BLOCK_SIZE,
            Variant::X86_128 => Hasher128X86::BLOCK_SIZE,
        }
    }

    pub fn new_hasher(&self, seed: u32) -> Box<dyn Murmur3Hasher> {
        match self {
            Variant::X86_32 => Box::new(Hasher32::new(seed)),
            Variant::X64_128 => Box::new(Hasher128X64::new(seed)),
            Variant::X86_128 => Box::new(Hasher128X86::new(seed)),
        }
    }

    /// One-shot hash of `data`.
    pub fn hash(&self, seed: u32, data: &[u8]) -> Digest {
        match self {
            Variant::X86_32 => oneshot::digest32(seed, data),
            Variant::X64_128 => oneshot::digest128_x64(seed, data),
            Variant::X86_128 => oneshot::digest128_x86(seed, data),
        }
    }
}

impl Default for Variant {
    fn default() -> Self {
        Variant::X64_128
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Variant {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        let name = lower.strip_prefix("mmh3_").unwrap_or(&lower);
        match name {
            "32" | "x86_32" => Ok(Variant::X86_32),
            "128" | "x64_128" => Ok(Variant::X64_128),
            "x86_128" => Ok(Variant::X86_128),
            _ => Err(Error::UnknownVariant(s.to_string())),
        }
    }
}

/// Parses a seed the way the command line accepts it: decimal or `0x`
/// prefixed hex, full `u32` range.  Negative decimal values down to
/// `i32::MIN` are accepted too and taken as their two's complement bits, so
/// `-1` is the same seed as `0xffffffff`.  The hex digits themselves can't
/// carry a sign.
pub fn parse_seed(input: &str) -> error::Result<u32> {
    let trimmed = input.trim();
    let invalid = |source| Error::InvalidSeed {
        input: input.to_string(),
        source,
    };

    let value: i64 = if let Some(hex) = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        if hex.starts_with(['+', '-']) {
            return Err(Error::SignedHexSeed(input.to_string()));
        }
        i64::from_str_radix(hex, 16).map_err(invalid)?
    } else {
        trimmed.parse::<i64>().map_err(invalid)?
    };

    if value >= i32::MIN as i64 && value < 0 {
        Ok(value as i32 as u32)
    } else {
        u32::try_from(value).map_err(|_| Error::SeedOutOfRange(input.to_string()))
    }
}
