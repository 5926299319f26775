//! Prepared statement cache keyed by statement fingerprint.
//!
//! A fingerprint is the MD5 digest of the JSON encoding of
//! `[sql, options]`, with options sorted by key so that insertion order does
//! not matter. Option values are encoded with their variant name, so `Int(1)`
//! and `UInt(1)` (or `Text("x")` and `Json("x")`) never share a key.
//! Identical `(sql, options)` pairs therefore map to the same prepared handle
//! for the lifetime of the owning adapter.

use crate::error::{DbError, DbResult};
use crate::params::DriverOptions;
use crate::value::Value;
use chrono::NaiveDateTime;
use md5::{Digest, Md5};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

/// Cache key for a prepared statement.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Hex digest.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Variant-tagged view of an option value for fingerprinting.
///
/// Floats are encoded by bit pattern so that NaN and the infinities stay
/// distinct from `Null` and from each other.
#[derive(Serialize)]
enum Tagged<'a> {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(u64),
    Text(&'a str),
    Bytes(&'a [u8]),
    Timestamp(&'a NaiveDateTime),
    Uuid(&'a Uuid),
    Json(&'a serde_json::Value),
    #[cfg(feature = "rust_decimal")]
    Decimal(&'a rust_decimal::Decimal),
}

impl<'a> From<&'a Value> for Tagged<'a> {
    fn from(value: &'a Value) -> Self {
        match value {
            Value::Null => Tagged::Null,
            Value::Bool(v) => Tagged::Bool(*v),
            Value::Int(v) => Tagged::Int(*v),
            Value::UInt(v) => Tagged::UInt(*v),
            Value::Float(v) => Tagged::Float(v.to_bits()),
            Value::Text(v) => Tagged::Text(v),
            Value::Bytes(v) => Tagged::Bytes(v),
            Value::Timestamp(v) => Tagged::Timestamp(v),
            Value::Uuid(v) => Tagged::Uuid(v),
            Value::Json(v) => Tagged::Json(v),
            #[cfg(feature = "rust_decimal")]
            Value::Decimal(v) => Tagged::Decimal(v),
        }
    }
}

/// Compute the fingerprint of `sql` prepared with `options`.
pub fn fingerprint(sql: &str, options: &DriverOptions) -> DbResult<Fingerprint> {
    let sorted: BTreeMap<&str, Tagged<'_>> = options
        .iter()
        .map(|(k, v)| (k.as_str(), Tagged::from(v)))
        .collect();
    let encoded = serde_json::to_vec(&(sql, sorted))
        .map_err(|e| DbError::Serialization(e.to_string()))?;
    Ok(Fingerprint(format!("{:x}", Md5::digest(&encoded))))
}

/// Prepared statements of one adapter instance.
///
/// Unbounded unless a capacity is configured, in which case the least
/// recently used entry is evicted first.
pub struct StatementCache<S> {
    inner: Mutex<StatementCacheInner<S>>,
}

struct StatementCacheInner<S> {
    capacity: Option<usize>,
    map: HashMap<Fingerprint, Arc<S>>,
    order: VecDeque<Fingerprint>,
}

impl<S> StatementCache<S> {
    pub fn new(capacity: Option<usize>) -> Self {
        Self {
            inner: Mutex::new(StatementCacheInner {
                capacity,
                map: HashMap::new(),
                order: VecDeque::new(),
            }),
        }
    }

    pub fn unbounded() -> Self {
        Self::new(None)
    }

    fn lock(&self) -> MutexGuard<'_, StatementCacheInner<S>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn get(&self, key: &Fingerprint) -> Option<Arc<S>> {
        let mut inner = self.lock();
        let stmt = inner.map.get(key).cloned()?;
        inner.touch(key);
        Some(stmt)
    }

    /// Store `stmt` unless another caller got there first.
    ///
    /// Returns the handle that ended up in the cache: either `stmt` or the
    /// one already stored under `key`, in which case `stmt` is dropped.
    pub fn insert_if_absent(&self, key: Fingerprint, stmt: S) -> Arc<S> {
        let mut inner = self.lock();

        if let Some(existing) = inner.map.get(&key).cloned() {
            inner.touch(&key);
            return existing;
        }

        let stmt = Arc::new(stmt);
        inner.map.insert(key.clone(), Arc::clone(&stmt));
        if inner.capacity.is_some() {
            inner.order.push_back(key);
            inner.evict_if_needed();
        }
        stmt
    }

    /// Return the cached handle for `(sql, options)` or prepare and store one.
    ///
    /// `prepare` runs outside the lock. The boolean is `true` on a cache hit.
    pub fn get_or_prepare<F>(
        &self,
        sql: &str,
        options: &DriverOptions,
        prepare: F,
    ) -> DbResult<(Arc<S>, bool)>
    where
        F: FnOnce() -> DbResult<S>,
    {
        let key = fingerprint(sql, options)?;
        if let Some(stmt) = self.get(&key) {
            #[cfg(feature = "tracing")]
            tracing::trace!(target: "rowsql.cache", fingerprint = %key, "statement cache hit");
            return Ok((stmt, true));
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(target: "rowsql.cache", fingerprint = %key, "statement cache miss");
        let stmt = prepare()?;
        Ok((self.insert_if_absent(key, stmt), false))
    }

    pub fn contains(&self, key: &Fingerprint) -> bool {
        self.lock().map.contains_key(key)
    }

    pub fn remove(&self, key: &Fingerprint) -> Option<Arc<S>> {
        let mut inner = self.lock();
        let removed = inner.map.remove(key);
        if removed.is_some() {
            inner.remove_from_order(key);
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.lock().map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().map.is_empty()
    }

    pub fn clear(&self) {
        let mut inner = self.lock();
        inner.map.clear();
        inner.order.clear();
    }
}

impl<S> Default for StatementCache<S> {
    fn default() -> Self {
        Self::unbounded()
    }
}

impl<S> fmt::Debug for StatementCache<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.lock();
        f.debug_struct("StatementCache")
            .field("capacity", &inner.capacity)
            .field("len", &inner.map.len())
            .finish()
    }
}

impl<S> StatementCacheInner<S> {
    fn touch(&mut self, key: &Fingerprint) {
        if self.capacity.is_none() {
            return;
        }
        if let Some(pos) = self.order.iter().position(|k| k == key) {
            if let Some(k) = self.order.remove(pos) {
                self.order.push_back(k);
            }
        }
    }

    fn remove_from_order(&mut self, key: &Fingerprint) {
        if let Some(pos) = self.order.iter().position(|k| k == key) {
            let _ = self.order.remove(pos);
        }
    }

    fn evict_if_needed(&mut self) {
        let Some(capacity) = self.capacity else {
            return;
        };
        while self.map.len() > capacity {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            let _ = self.map.remove(&oldest);
        }
    }
}
