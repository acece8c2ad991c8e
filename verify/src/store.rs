//! Replay-protection storage.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Time-bounded set of seen nonces.
///
/// `insert_if_absent` must be atomic: when two requests carrying the
/// same nonce arrive concurrently, exactly one insert may succeed.
/// Multi-node deployments implement this over a shared cache with
/// native expiry (`SET NX EX` style); the TTL passed in equals the
/// verifier's acceptance window.
pub trait NonceStore: Send + Sync {
    /// Record `nonce` for `ttl`. Returns `false` if it was already
    /// present and unexpired.
    fn insert_if_absent(&self, nonce: &str, ttl: Duration) -> bool;
}

/// In-process [`NonceStore`] backed by a mutex-guarded map.
///
/// Expired entries are swept lazily on each insert. Suited to tests and
/// single-process servers.
#[derive(Debug, Default)]
pub struct MemoryNonceStore {
    seen: Mutex<HashMap<String, Instant>>,
}

impl MemoryNonceStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl NonceStore for MemoryNonceStore {
    fn insert_if_absent(&self, nonce: &str, ttl: Duration) -> bool {
        let now = Instant::now();
        let mut seen = self.seen.lock().unwrap_or_else(PoisonError::into_inner);
        seen.retain(|_, expires_at| *expires_at > now);

        match seen.entry(nonce.to_string()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(entry) => {
                entry.insert(now + ttl);
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_if_absent() {
        let store = MemoryNonceStore::new();
        let ttl = Duration::from_secs(900);

        assert!(store.insert_if_absent("abc123", ttl));
        assert!(!store.insert_if_absent("abc123", ttl));
        assert!(store.insert_if_absent("def456", ttl));
    }

    #[test]
    fn test_expired_nonce_can_be_reused() {
        let store = MemoryNonceStore::new();

        // A zero TTL expires immediately, so the sweep on the next
        // insert drops the entry.
        assert!(store.insert_if_absent("abc123", Duration::ZERO));
        assert!(store.insert_if_absent("abc123", Duration::from_secs(900)));
        assert!(!store.insert_if_absent("abc123", Duration::from_secs(900)));
    }

    #[test]
    fn test_store_is_shareable_across_threads() {
        use std::sync::Arc;

        let store = Arc::new(MemoryNonceStore::new());
        let ttl = Duration::from_secs(900);

        let handles = (0..8)
            .map(|_| {
                let store = store.clone();
                std::thread::spawn(move || store.insert_if_absent("abc123", ttl))
            })
            .collect::<Vec<_>>();
        let winners = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|inserted| *inserted)
            .count();

        assert_eq!(winners, 1);
    }
}
