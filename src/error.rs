use std::num::ParseIntError;

use thiserror::Error as ErrorDerive;

use crate::digest::OutputFormat;

/// Errors from the parts of the crate that deal with the outside world.
/// Hashing itself can't fail.
#[derive(ErrorDerive, Debug)]
pub enum Error {
    #[error("Unknown MurmurHash3 variant \"{0}\". Expected one of: mmh3_32, mmh3_x64_128, mmh3_x86_128.")]
    UnknownVariant(String),

    #[error("Invalid seed \"{input}\".")]
    InvalidSeed {
        input: String,
        #[source]
        source: ParseIntError,
    },

    #[error("Seed \"{0}\" doesn't fit in 32 bits.")]
    SeedOutOfRange(String),

    #[error("Hex seed \"{0}\" can't carry a sign. Put the \"-\" before \"0x\" instead.")]
    SignedHexSeed(String),

    #[error("Unknown output format \"{0}\". Expected one of: {}.", OutputFormat::NAMES.join(", "))]
    UnknownFormat(String),

    #[error("{name} produces a 32-bit digest, which can't be shown as a pair of 64-bit integers.")]
    PairOnNarrowDigest { name: String },
}

pub type Result<T> = std::result::Result<T, Error>;
