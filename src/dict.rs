//! Dictionary: fixed bucket array with per-bucket chains of owned entries.

use crate::config::DictConfig;
use crate::error::{DictError, DictResult};
use crate::hasher::{bucket_of, Djb2State, BUCKET_COUNT};
use crate::stats::Stats;
use core::hash::BuildHasher;
use slotmap::{DefaultKey, SlotMap};
use tracing::{debug, trace};

#[derive(Debug)]
struct Entry {
    key: Box<str>,
    value: Box<str>,
    next: Option<DefaultKey>, // next entry in the same bucket
}

/// Accounted bytes of one entry: key and value text plus the node header.
#[inline]
fn footprint(key_len: usize, value_len: usize) -> usize {
    key_len + value_len + core::mem::size_of::<Entry>()
}

/// Copy `s` into freshly owned storage, reporting allocator refusal instead
/// of aborting.
fn copy_text(s: &str) -> DictResult<Box<str>> {
    let mut buf = String::new();
    buf.try_reserve_exact(s.len())
        .map_err(|_| DictError::OutOfMemory { requested: s.len() })?;
    buf.push_str(s);
    Ok(buf.into_boxed_str())
}

/// String-to-string dictionary with `BUCKET_COUNT` chained buckets.
///
/// Entries live in a generational arena; each bucket stores the key of its
/// chain head and each entry the key of its successor. The dictionary is the
/// only owner of entry storage.
pub struct Dictionary<S = Djb2State> {
    hasher: S,
    buckets: Box<[Option<DefaultKey>]>,
    entries: SlotMap<DefaultKey, Entry>,
    // Accounted footprint of all live entries. Tracked even without
    // instrumentation because the memory limit is checked against it.
    bytes: usize,
    memory_limit: Option<usize>,
    stats: Option<Stats>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::with_config(DictConfig::default())
    }

    pub fn with_config(config: DictConfig) -> Self {
        Self::with_config_and_hasher(config, Djb2State)
    }
}

impl Default for Dictionary {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over the `(key, value)` pairs of one bucket, in insertion order.
pub struct Chain<'a> {
    entries: &'a SlotMap<DefaultKey, Entry>,
    cur: Option<DefaultKey>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = (&'a str, &'a str);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let e = self.entries.get(self.cur?)?;
        self.cur = e.next;
        Some((&*e.key, &*e.value))
    }
}

/// Iterator over non-empty buckets in index order.
pub struct Buckets<'a> {
    entries: &'a SlotMap<DefaultKey, Entry>,
    heads: core::iter::Enumerate<core::slice::Iter<'a, Option<DefaultKey>>>,
}

impl<'a> Iterator for Buckets<'a> {
    type Item = (usize, Chain<'a>);

    fn next(&mut self) -> Option<Self::Item> {
        for (index, head) in self.heads.by_ref() {
            if head.is_some() {
                let chain = Chain {
                    entries: self.entries,
                    cur: *head,
                };
                return Some((index, chain));
            }
        }
        None
    }
}

/// Iterator over every `(key, value)` pair, bucket by bucket.
pub struct Iter<'a> {
    buckets: Buckets<'a>,
    chain: Option<Chain<'a>>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(pair) = self.chain.as_mut().and_then(|c| c.next()) {
                return Some(pair);
            }
            let (_, chain) = self.buckets.next()?;
            self.chain = Some(chain);
        }
    }
}

impl<S> core::fmt::Debug for Dictionary<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

// Read surface and teardown; none of these hash.
impl<S> Dictionary<S> {
    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Instrumentation snapshot, or `None` when the dictionary was built
    /// without instrumentation.
    pub fn stats(&self) -> Option<Stats> {
        self.stats
    }

    pub fn memory_limit(&self) -> Option<usize> {
        self.memory_limit
    }

    /// Entries of bucket `index`, head first. Empty for out-of-range indices.
    pub fn chain(&self, index: usize) -> Chain<'_> {
        Chain {
            entries: &self.entries,
            cur: self.buckets.get(index).copied().flatten(),
        }
    }

    pub fn buckets(&self) -> Buckets<'_> {
        Buckets {
            entries: &self.entries,
            heads: self.buckets.iter().enumerate(),
        }
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            buckets: self.buckets(),
            chain: None,
        }
    }

    /// Destroy every entry and reset all counters.
    ///
    /// Buckets are emptied one at a time; each node's link is detached
    /// before the node itself is released. Calling this on an already empty
    /// dictionary is a no-op.
    pub fn clear(&mut self) {
        let mut released = 0usize;
        for head in self.buckets.iter_mut() {
            let mut cur = head.take();
            while let Some(id) = cur {
                cur = self.entries.get_mut(id).and_then(|e| e.next.take());
                if self.entries.remove(id).is_some() {
                    released += 1;
                }
            }
        }
        debug_assert!(self.entries.is_empty(), "entry unreachable from any bucket");
        self.entries.clear();
        self.bytes = 0;
        if let Some(stats) = self.stats.as_mut() {
            stats.reset();
        }
        debug!(released, "dictionary cleared");
    }
}

impl<S> Dictionary<S>
where
    S: BuildHasher,
{
    pub fn with_hasher(hasher: S) -> Self {
        Self::with_config_and_hasher(DictConfig::default(), hasher)
    }

    pub fn with_config_and_hasher(config: DictConfig, hasher: S) -> Self {
        Self {
            hasher,
            buckets: vec![None; BUCKET_COUNT].into_boxed_slice(),
            entries: SlotMap::with_key(),
            bytes: 0,
            memory_limit: config.limit(),
            stats: config.is_instrumented().then(Stats::default),
        }
    }

    /// Bucket that `key` lives in (or would live in).
    pub fn bucket_index(&self, key: &str) -> usize {
        bucket_of(&self.hasher, key)
    }

    fn find_entry(&self, key: &str) -> Option<DefaultKey> {
        if self.entries.is_empty() {
            return None;
        }
        let mut cur = self.buckets[self.bucket_index(key)];
        while let Some(id) = cur {
            let e = self.entries.get(id)?;
            if &*e.key == key {
                return Some(id);
            }
            cur = e.next;
        }
        None
    }

    fn tail_of(&self, bucket: usize) -> Option<DefaultKey> {
        let mut cur = self.buckets[bucket]?;
        while let Some(next) = self.entries.get(cur).and_then(|e| e.next) {
            cur = next;
        }
        Some(cur)
    }

    /// Fail if accounting `extra` more bytes would exceed the memory limit.
    fn check_budget(&self, extra: usize) -> DictResult<()> {
        match self.memory_limit {
            Some(limit) if self.bytes.saturating_add(extra) > limit => {
                debug!(extra, in_use = self.bytes, limit, "memory limit reached");
                Err(DictError::OutOfMemory { requested: extra })
            }
            _ => Ok(()),
        }
    }

    /// Value stored under `key`, borrowed from the dictionary.
    pub fn lookup(&self, key: &str) -> Option<&str> {
        let id = self.find_entry(key)?;
        self.entries.get(id).map(|e| &*e.value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.find_entry(key).is_some()
    }

    /// Insert a copy of `key` -> `value`.
    ///
    /// Duplicate keys are rejected with `DictError::DuplicateKey`. A new
    /// entry goes to the tail of its bucket's chain. On any error the
    /// dictionary is left exactly as it was.
    pub fn insert(&mut self, key: &str, value: &str) -> DictResult<()> {
        if self.find_entry(key).is_some() {
            debug!(key, "insert rejected: duplicate key");
            return Err(DictError::DuplicateKey);
        }
        let size = footprint(key.len(), value.len());
        self.check_budget(size)?;

        // Both copies must succeed before anything becomes reachable.
        let key_copy = copy_text(key)?;
        let value_copy = copy_text(value)?;

        let bucket = self.bucket_index(key);
        let tail = self.tail_of(bucket);
        let id = self.entries.insert(Entry {
            key: key_copy,
            value: value_copy,
            next: None,
        });
        let collided = match tail {
            Some(tail) => {
                if let Some(t) = self.entries.get_mut(tail) {
                    t.next = Some(id);
                }
                true
            }
            None => {
                self.buckets[bucket] = Some(id);
                false
            }
        };

        self.bytes += size;
        if let Some(stats) = self.stats.as_mut() {
            stats.record_insert(size, collided);
        }
        trace!(key, bucket, collided, "inserted entry");
        Ok(())
    }

    /// Remove the entry for `key`, releasing its storage.
    pub fn remove(&mut self, key: &str) -> DictResult<()> {
        if self.entries.is_empty() {
            return Err(DictError::Empty);
        }
        let bucket = self.bucket_index(key);

        let mut prev: Option<DefaultKey> = None;
        let mut cur = self.buckets[bucket];
        let (id, next) = loop {
            let Some(id) = cur else {
                debug!(key, bucket, "remove rejected: key not found");
                return Err(DictError::KeyNotFound);
            };
            let e = self.entries.get(id).ok_or(DictError::KeyNotFound)?;
            if &*e.key == key {
                break (id, e.next);
            }
            prev = Some(id);
            cur = e.next;
        };

        // Relink around the matched entry before releasing it.
        match prev {
            Some(p) => {
                if let Some(pe) = self.entries.get_mut(p) {
                    pe.next = next;
                }
            }
            None => self.buckets[bucket] = next,
        }

        if let Some(entry) = self.entries.remove(id) {
            let size = footprint(entry.key.len(), entry.value.len());
            self.bytes = self.bytes.saturating_sub(size);
            if let Some(stats) = self.stats.as_mut() {
                stats.record_remove(size);
            }
        }
        trace!(key, bucket, "removed entry");
        Ok(())
    }

    /// Replace the value stored under an existing `key`.
    ///
    /// The new value is copied before the old one is released, so a failed
    /// copy leaves the old value in place.
    pub fn update(&mut self, key: &str, value: &str) -> DictResult<()> {
        let Some(id) = self.find_entry(key) else {
            debug!(key, "update rejected: key not found");
            return Err(DictError::KeyNotFound);
        };
        let old_len = self
            .entries
            .get(id)
            .map(|e| e.value.len())
            .ok_or(DictError::KeyNotFound)?;
        if value.len() > old_len {
            self.check_budget(value.len() - old_len)?;
        }

        let new_value = copy_text(value)?;
        let entry = self.entries.get_mut(id).ok_or(DictError::KeyNotFound)?;
        entry.value = new_value;

        self.bytes = (self.bytes + value.len()).saturating_sub(old_len);
        if let Some(stats) = self.stats.as_mut() {
            stats.record_update(old_len, value.len());
        }
        trace!(key, old_len, new_len = value.len(), "updated entry");
        Ok(())
    }
}
