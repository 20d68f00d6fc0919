//! The process-wide resolution cache.
//!
//! Pure memoization: entries are created on first demand, published
//! exactly once, and never mutated, evicted, or retried afterwards. The
//! table is bounded by the finite set of (operator, signature) pairs the
//! process actually exercises.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, LazyLock, OnceLock};

use dashmap::DashMap;

use crate::error::OpError;
use crate::kind::OpKind;
use crate::probe;
use crate::signature::TypeSignature;
use crate::table::OpImpl;

/// Outcome of resolving one (operator, signature) key.
#[derive(Debug, Clone)]
pub(crate) enum Resolution {
    /// The operator exists; the callable is shared by every caller.
    Resolved(OpImpl),
    /// The operator does not exist for this signature. Remembered for the
    /// process lifetime.
    Unsupported(OpError),
}

type Key = (OpKind, TypeSignature);

struct ResolutionCache {
    entries: DashMap<Key, Arc<OnceLock<Resolution>>>,
    attempts: DashMap<Key, Arc<AtomicU64>>,
}

static CACHE: LazyLock<ResolutionCache> = LazyLock::new(|| ResolutionCache {
    entries: DashMap::new(),
    attempts: DashMap::new(),
});

/// Resolve `kind` for `signature`, computing at most once per key.
///
/// Concurrent first callers race to claim the key's cell; the winner runs
/// the prober while the losers block in `get_or_init` and observe the
/// published outcome. The map shard lock is released before probing, so
/// only the per-key cell serializes the build.
///
/// Recursive resolutions (lifting resolves the inner type, coercion
/// resolves a conversion and the homogeneous operator) always target a
/// strictly simpler key, so a cell's initialization never re-enters itself.
pub(crate) fn resolve(kind: OpKind, signature: TypeSignature) -> Resolution {
    let cache = &*CACHE;
    let key = (kind, signature);
    let cell = cache.entries.entry(key).or_default().clone();
    cell.get_or_init(|| {
        cache
            .attempts
            .entry(key)
            .or_default()
            .fetch_add(1, Ordering::Relaxed);
        probe::probe(kind, signature)
    })
    .clone()
}

/// Number of times the prober has actually run for `(kind, signature)`.
///
/// Stays at 1 for any key that has resolved, however many callers raced to
/// the first use; this is the observable form of the memoization
/// guarantee, useful in tests and diagnostics.
pub fn resolution_attempts(kind: OpKind, signature: TypeSignature) -> u64 {
    CACHE
        .attempts
        .get(&(kind, signature))
        .map(|counter| counter.load(Ordering::Relaxed))
        .unwrap_or(0)
}
