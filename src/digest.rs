//! Finalized digests, and the different ways of looking at them.

use std::fmt;
use std::str::FromStr;

use crate::error::{self, Error};

/// A finalized MurmurHash3 value.
///
/// 128-bit digests are stored so that their little-endian bytes are exactly
/// the bytes the reference implementation writes to its output buffer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Digest {
    Bits32(u32),
    Bits128(u128),
}

impl Digest {
    /// Size of the digest in bytes.
    pub fn size(&self) -> usize {
        match self {
            Digest::Bits32(_) => 4,
            Digest::Bits128(_) => 16,
        }
    }

    /// The digest as little-endian bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            Digest::Bits32(v) => v.to_le_bytes().to_vec(),
            Digest::Bits128(v) => v.to_le_bytes().to_vec(),
        }
    }

    /// Writes the little-endian bytes into the start of `out`.  Returns the
    /// number of bytes written.
    ///
    /// # Panics
    ///
    /// If `out` is shorter than `size()`.
    pub fn write_to(&self, out: &mut [u8]) -> usize {
        let n = self.size();
        match self {
            Digest::Bits32(v) => out[..n].copy_from_slice(&v.to_le_bytes()),
            Digest::Bits128(v) => out[..n].copy_from_slice(&v.to_le_bytes()),
        }
        n
    }

    /// The digest reinterpreted as a two's complement integer of its own
    /// width, then sign extended.
    pub fn signed(&self) -> i128 {
        match *self {
            Digest::Bits32(v) => v as i32 as i128,
            Digest::Bits128(v) => v as i128,
        }
    }

    pub fn unsigned(&self) -> u128 {
        match *self {
            Digest::Bits32(v) => v as u128,
            Digest::Bits128(v) => v,
        }
    }

    /// Low and high 64-bit halves, as unsigned values.  `None` for 32-bit
    /// digests.
    pub fn unsigned_pair(&self) -> Option<(u64, u64)> {
        match *self {
            Digest::Bits32(_) => None,
            Digest::Bits128(v) => Some((v as u64, (v >> 64) as u64)),
        }
    }

    /// Low and high 64-bit halves, each reinterpreted as signed.
    pub fn signed_pair(&self) -> Option<(i64, i64)> {
        self.unsigned_pair().map(|(lo, hi)| (lo as i64, hi as i64))
    }
}

impl fmt::LowerHex for Digest {
    /// Hex of the little-endian bytes, i.e. the byte order of `to_bytes()`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.to_bytes() {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(self, f)
    }
}

impl From<u32> for Digest {
    fn from(v: u32) -> Self {
        Digest::Bits32(v)
    }
}

impl From<u128> for Digest {
    fn from(v: u128) -> Self {
        Digest::Bits128(v)
    }
}

//-------------------------------------------------------------

/// How a digest gets printed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Hex,
    Signed,
    Unsigned,
    /// Signed low and high 64-bit halves.
    Pair,
    /// Unsigned low and high 64-bit halves.
    UnsignedPair,
}

impl OutputFormat {
    pub const NAMES: &'static [&'static str] = &["hex", "signed", "unsigned", "pair", "upair"];

    /// Whether a digest of `digest_size` bytes can be shown this way.  The
    /// pair formats need a 128-bit digest.
    pub fn fits(&self, digest_size: usize) -> bool {
        match self {
            OutputFormat::Pair | OutputFormat::UnsignedPair => digest_size >= 16,
            _ => true,
        }
    }

    /// Renders `digest`.  `name` is only used for the error message when a
    /// pair is requested from a 32-bit digest.
    pub fn render(&self, digest: &Digest, name: &str) -> error::Result<String> {
        let pair_error = || Error::PairOnNarrowDigest {
            name: name.to_string(),
        };

        Ok(match self {
            OutputFormat::Hex => format!("{:x}", digest),
            OutputFormat::Signed => digest.signed().to_string(),
            OutputFormat::Unsigned => digest.unsigned().to_string(),
            OutputFormat::Pair => {
                let (lo, hi) = digest.signed_pair().ok_or_else(pair_error)?;
                format!("{} {}", lo, hi)
            }
            OutputFormat::UnsignedPair => {
                let (lo, hi) = digest.unsigned_pair().ok_or_else(pair_error)?;
                format!("{} {}", lo, hi)
            }
        })
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hex" => Ok(OutputFormat::Hex),
            "signed" | "sint" => Ok(OutputFormat::Signed),
            "unsigned" | "uint" => Ok(OutputFormat::Unsigned),
            "pair" | "spair" => Ok(OutputFormat::Pair),
            "upair" => Ok(OutputFormat::UnsignedPair),
            _ => Err(Error::UnknownFormat(s.to_string())),
        }
    }
}
