use core::fmt;
use digest::{Digest, Output, Reset, Update};

use crate::{Whirlpool, BLOCK_SIZE, DIGEST_SIZE};

#[cfg(feature = "alloc")]
use alloc::{format, string::String};

/// Streaming Whirlpool hasher which can be read without being consumed.
///
/// [`digest`](Hasher::digest) finalizes a scratch copy of the running
/// state, so the hasher stays usable afterwards and further calls to
/// [`update`](Hasher::update) extend the original message.
///
/// Only byte slices are accepted; text has to be encoded by the caller
/// (e.g. with [`str::as_bytes`]).
///
/// Digest and block sizes are fixed and cannot be assigned:
///
/// ```compile_fail
/// let mut hasher = whirlpool::Hasher::new();
/// hasher.digest_size = 32;
/// ```
///
/// ```compile_fail
/// whirlpool::DIGEST_SIZE = 32;
/// ```
#[derive(Clone, Default)]
pub struct Hasher {
    inner: Whirlpool,
}

impl Hasher {
    /// Create an empty hasher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a hasher and feed it `data`.
    pub fn new_with(data: &[u8]) -> Self {
        let mut hasher = Self::new();
        hasher.update(data);
        hasher
    }

    /// Append `data` to the message. Repeated calls are equivalent to a
    /// single call with the concatenation of all the arguments.
    pub fn update(&mut self, data: &[u8]) {
        Update::update(&mut self.inner, data);
    }

    /// Return an independent copy of the hasher.
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Return the digest of all data passed to [`update`](Hasher::update)
    /// so far.
    pub fn digest(&self) -> Output<Whirlpool> {
        self.inner.clone().finalize()
    }

    /// Like [`digest`](Hasher::digest), but as 128 lowercase hex digits.
    #[cfg(feature = "alloc")]
    pub fn hexdigest(&self) -> String {
        format!("{:x}", self.digest())
    }

    /// Digest size in bytes, always 64.
    pub const fn digest_size(&self) -> usize {
        DIGEST_SIZE
    }

    /// Block size in bytes, always 64.
    pub const fn block_size(&self) -> usize {
        BLOCK_SIZE
    }

    /// Canonical algorithm name.
    pub const fn name(&self) -> &'static str {
        "WHIRLPOOL"
    }

    /// Drop all data fed so far.
    pub fn reset(&mut self) {
        Reset::reset(&mut self.inner);
    }
}

impl Update for Hasher {
    fn update(&mut self, data: &[u8]) {
        Update::update(&mut self.inner, data);
    }
}

impl From<Whirlpool> for Hasher {
    fn from(inner: Whirlpool) -> Self {
        Self { inner }
    }
}

impl fmt::Debug for Hasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Hasher { ... }")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_does_not_consume() {
        let mut hasher = Hasher::new_with(b"abc");
        let first = hasher.digest();
        assert_eq!(first, hasher.digest());

        hasher.update(b"");
        assert_eq!(first, hasher.digest());

        hasher.update(b"d");
        assert_ne!(first, hasher.digest());
        assert_eq!(hasher.digest(), Hasher::new_with(b"abcd").digest());
    }

    #[test]
    fn reset_returns_to_empty() {
        let mut hasher = Hasher::new_with(&[0x55; 200]);
        hasher.reset();
        assert_eq!(hasher.digest(), Hasher::new().digest());
    }

    #[test]
    fn from_wrapper_keeps_state() {
        let inner = Whirlpool::new_with_prefix(b"abc");
        let hasher = Hasher::from(inner.clone());
        assert_eq!(hasher.digest(), inner.finalize());
    }

    #[test]
    fn constants() {
        let hasher = Hasher::new_with(&[1; 1000]);
        assert_eq!(hasher.digest_size(), 64);
        assert_eq!(hasher.block_size(), 64);
        assert_eq!(hasher.name(), "WHIRLPOOL");
        assert_eq!(hasher.digest().len(), hasher.digest_size());
    }
}
