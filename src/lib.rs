//! Streaming MurmurHash3.
//!
//! All three variants of Austin Appleby's MurmurHash3 (x86_32, x64_128 and
//! x86_128), both as one-shot functions over a complete buffer and as
//! incremental hashers that take their input in arbitrarily sized chunks.
//! Both produce bit-identical results to the reference implementation for
//! every seed and input.
//!
//! MurmurHash3 is not a cryptographic hash.  Don't use it where an attacker
//! controls the input and collisions matter.
//!
//! ```
//! use lib::{hash128_x64, Hasher128X64};
//!
//! let mut hasher = Hasher128X64::new(0x9747b28c);
//! hasher.update(b"The quick brown fox ");
//! hasher.update(b"jumps over the lazy dog");
//! assert_eq!(
//!     hasher.uint_digest(),
//!     hash128_x64(0x9747b28c, b"The quick brown fox jumps over the lazy dog")
//! );
//! ```

pub mod digest;
pub mod error;
pub mod hashers;
pub mod io;
pub mod logging;
pub mod mix;
pub mod mixers;
pub mod oneshot;
pub mod stats;
pub mod variant;

pub use digest::{Digest, OutputFormat};
pub use error::Error;
pub use hashers::{BuildMurmur3Hasher, Hasher128X64, Hasher128X86, Hasher32, Murmur3Hasher};
pub use oneshot::{hash128_x64, hash128_x86, hash32, hash64, hash64_signed, hash_bytes};
pub use variant::{parse_seed, Variant};
