//! Feeding hashers from `std::io` readers and writers.
//!
//! Everything here streams through a fixed size buffer, so inputs of any size
//! are hashed in constant memory.

use std::io::{self, Read, Write};

use crate::digest::Digest;
use crate::hashers::Murmur3Hasher;

/// Read size used when none is given.
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Reads `reader` to the end, feeding everything into `hasher` in chunks of
/// at most `chunk_size` bytes.  Returns the number of bytes hashed.
///
/// On error, the bytes read before the error have already been fed.  Callers
/// that need all-or-nothing behaviour should hash into a clone.
pub fn update_from_reader<H, R>(hasher: &mut H, mut reader: R, chunk_size: usize) -> io::Result<u64>
where
    H: Murmur3Hasher + ?Sized,
    R: Read,
{
    let mut buf = vec![0u8; chunk_size.max(1)];
    let mut total = 0u64;

    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buf[..n]);
        total += n as u64;
        log::trace!("{}: fed {} bytes ({} total)", hasher.name(), n, total);
    }

    log::debug!("{}: hashed {} bytes", hasher.name(), total);
    Ok(total)
}

/// Wraps a reader, hashing every byte that's read through it.
pub struct HashReader<R, H> {
    inner: R,
    hasher: H,
}

impl<R: Read, H: Murmur3Hasher> HashReader<R, H> {
    pub fn new(inner: R, hasher: H) -> Self {
        Self { inner, hasher }
    }

    /// Digest of everything read so far.
    pub fn digest(&self) -> Digest {
        self.hasher.finish()
    }

    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    pub fn into_parts(self) -> (R, H) {
        (self.inner, self.hasher)
    }
}

impl<R: Read, H: Murmur3Hasher> Read for HashReader<R, H> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.hasher.update(&buf[..n]);
        Ok(n)
    }
}

/// Wraps a writer, hashing every byte the inner writer accepted.
pub struct HashWriter<W, H> {
    inner: W,
    hasher: H,
}

impl<W: Write, H: Murmur3Hasher> HashWriter<W, H> {
    pub fn new(inner: W, hasher: H) -> Self {
        Self { inner, hasher }
    }

    /// Digest of everything written so far.
    pub fn digest(&self) -> Digest {
        self.hasher.finish()
    }

    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    pub fn into_parts(self) -> (W, H) {
        (self.inner, self.hasher)
    }
}

impl<W: Write, H: Murmur3Hasher> Write for HashWriter<W, H> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        // Only what was actually written, in case of a short write.
        let n = self.inner.write(buf)?;
        self.hasher.update(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
