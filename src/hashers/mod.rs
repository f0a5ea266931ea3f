//! Streaming MurmurHash3.
//!
//! Each hasher accepts its input in arbitrarily sized chunks and can produce
//! the digest of everything fed so far at any time, without disturbing the
//! stream.  Feeding a byte string in one `update()` call or in any number of
//! smaller ones gives the same digest as the one-shot functions in
//! [`crate::oneshot`].

use std::hash::BuildHasher;
use std::marker::PhantomData;

use crate::digest::Digest;

/// Implements the std traits that every hasher gets in exactly the same
/// way, on top of its inherent `update()`/`finish_digest()`.
macro_rules! impl_std_traits {
    ($hasher:ty) => {
        impl std::io::Write for $hasher {
            fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
                self.update(buf);
                Ok(buf.len())
            }

            fn write_all(&mut self, buf: &[u8]) -> std::io::Result<()> {
                self.update(buf);
                Ok(())
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        impl std::hash::Hasher for $hasher {
            fn write(&mut self, bytes: &[u8]) {
                self.update(bytes);
            }

            /// The low 64 bits of the unsigned digest.
            fn finish(&self) -> u64 {
                self.finish_digest().unsigned() as u64
            }
        }

        impl crate::hashers::Murmur3Hasher for $hasher {
            fn name(&self) -> &'static str {
                <$hasher>::NAME
            }

            fn digest_size(&self) -> usize {
                <$hasher>::DIGEST_SIZE
            }

            fn block_size(&self) -> usize {
                <$hasher>::BLOCK_SIZE
            }

            fn update(&mut self, data: &[u8]) {
                <$hasher>::update(self, data);
            }

            fn finish(&self) -> crate::digest::Digest {
                self.finish_digest()
            }

            fn reset(&mut self) {
                <$hasher>::reset(self);
            }
        }

        impl crate::hashers::SeededHasher for $hasher {
            fn with_seed(seed: u32) -> Self {
                <$hasher>::new(seed)
            }
        }
    };
}

pub mod buffer;
mod x64_128;
mod x86_128;
mod x86_32;

pub use x64_128::Hasher128X64;
pub use x86_128::Hasher128X86;
pub use x86_32::Hasher32;

/// What every streaming MurmurHash3 variant can do.
///
/// This is object safe, so the variant can be picked at runtime with
/// `Box<dyn Murmur3Hasher>` (see [`crate::variant::Variant`]).  The concrete
/// types additionally have typed digest methods.
pub trait Murmur3Hasher {
    /// Identifying name, e.g. `"mmh3_32"`.
    fn name(&self) -> &'static str;

    /// Digest size in bytes.
    fn digest_size(&self) -> usize;

    /// Block size in bytes.
    fn block_size(&self) -> usize;

    /// Feeds more input.
    fn update(&mut self, data: &[u8]);

    /// Digest of everything fed so far.  Doesn't change the hasher.
    fn finish(&self) -> Digest;

    /// Back to the freshly constructed state, keeping the seed.
    fn reset(&mut self);
}

impl<H: Murmur3Hasher + ?Sized> Murmur3Hasher for Box<H> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn digest_size(&self) -> usize {
        (**self).digest_size()
    }

    fn block_size(&self) -> usize {
        (**self).block_size()
    }

    fn update(&mut self, data: &[u8]) {
        (**self).update(data)
    }

    fn finish(&self) -> Digest {
        (**self).finish()
    }

    fn reset(&mut self) {
        (**self).reset()
    }
}

/// Concrete hashers that generic code (like `BuildMurmur3Hasher`) can
/// construct from a seed.
pub trait SeededHasher: Murmur3Hasher + Clone {
    fn with_seed(seed: u32) -> Self;
}

/// `BuildHasher` for using a MurmurHash3 variant in `HashMap` and friends.
///
/// ```
/// use std::collections::HashMap;
/// use lib::hashers::{BuildMurmur3Hasher, Hasher128X64};
///
/// let mut map = HashMap::with_hasher(BuildMurmur3Hasher::<Hasher128X64>::new(42));
/// map.insert("hello", 1);
/// assert_eq!(map.get("hello"), Some(&1));
/// ```
pub struct BuildMurmur3Hasher<H> {
    seed: u32,
    _hasher: PhantomData<fn() -> H>,
}

impl<H> BuildMurmur3Hasher<H> {
    pub fn new(seed: u32) -> Self {
        Self {
            seed,
            _hasher: PhantomData,
        }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl<H> Clone for BuildMurmur3Hasher<H> {
    fn clone(&self) -> Self {
        Self::new(self.seed)
    }
}

impl<H> Default for BuildMurmur3Hasher<H> {
    fn default() -> Self {
        Self::new(0)
    }
}

impl<H> std::fmt::Debug for BuildMurmur3Hasher<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuildMurmur3Hasher")
            .field("seed", &self.seed)
            .finish()
    }
}

impl<H: SeededHasher + std::hash::Hasher> BuildHasher for BuildMurmur3Hasher<H> {
    type Hasher = H;

    fn build_hasher(&self) -> H {
        H::with_seed(self.seed)
    }
}
