//! djb2 string hashing and bucket selection.
//!
//! The dictionary only ever feeds raw key bytes to `Hasher::write`, never
//! `str::hash` (which appends a terminator byte), so `Djb2State` yields the
//! classic `hash * 33 + byte` sequence starting from 5381.

use core::hash::{BuildHasher, Hasher};

/// Number of buckets in every `Dictionary`. Fixed; the table never grows.
pub const BUCKET_COUNT: usize = 1024;

const DJB2_SEED: u64 = 5381;

/// Streaming djb2 hasher with wrapping 64-bit accumulation.
#[derive(Clone, Copy, Debug)]
pub struct Djb2Hasher {
    hash: u64,
}

impl Djb2Hasher {
    pub const fn new() -> Self {
        Self { hash: DJB2_SEED }
    }
}

impl Default for Djb2Hasher {
    fn default() -> Self {
        Self::new()
    }
}

impl Hasher for Djb2Hasher {
    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            // hash * 33 + b
            self.hash = (self.hash << 5)
                .wrapping_add(self.hash)
                .wrapping_add(u64::from(b));
        }
    }

    #[inline]
    fn finish(&self) -> u64 {
        self.hash
    }
}

/// Builder for [`Djb2Hasher`]; the default hasher of `Dictionary`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Djb2State;

impl BuildHasher for Djb2State {
    type Hasher = Djb2Hasher;

    fn build_hasher(&self) -> Self::Hasher {
        Djb2Hasher::new()
    }
}

/// Bucket index of `key` under `state`, in `[0, BUCKET_COUNT)`.
#[inline]
pub(crate) fn bucket_of<S: BuildHasher>(state: &S, key: &str) -> usize {
    let mut h = state.build_hasher();
    h.write(key.as_bytes());
    (h.finish() % BUCKET_COUNT as u64) as usize
}

/// Bucket index of `key` under the default djb2 hasher.
pub fn djb2_bucket(key: &str) -> usize {
    bucket_of(&Djb2State, key)
}
