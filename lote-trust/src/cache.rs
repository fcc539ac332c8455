//! Optional caching decorator for [`GetTrustAnchors`].
//!
//! Pure wrapper: the core protocol never depends on it. Concurrent identical
//! queries collapse into one computation, entries are recomputed after the
//! TTL, and the lifetime is explicit through [`CachedTrustAnchors::close`].

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::provision::{AnchorsOutcome, GetTrustAnchors, Purpose};

/// Aborts the wrapped refresh task when dropped.
struct AbortOnDrop(JoinHandle<()>);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        self.0.abort();
    }
}

#[derive(Default)]
struct Entry {
    value: Option<(AnchorsOutcome, Instant)>,
    inflight: Option<Inflight>,
}

struct Inflight {
    rx: watch::Receiver<Option<AnchorsOutcome>>,
    _task: AbortOnDrop,
}

struct Shared {
    inner: Arc<dyn GetTrustAnchors>,
    ttl: Duration,
    entries: Mutex<HashMap<Purpose, Entry>>,
}

/// TTL'd, single-flight view over an anchor source.
pub struct CachedTrustAnchors {
    shared: Arc<Shared>,
    closed: AtomicBool,
}

/// Wrap `inner`, pre-warming one entry per expected query.
pub fn cached(
    inner: Arc<dyn GetTrustAnchors>,
    ttl: Duration,
    expected_queries: &[Purpose],
) -> CachedTrustAnchors {
    let cache = CachedTrustAnchors {
        shared: Arc::new(Shared {
            inner,
            ttl,
            entries: Mutex::new(HashMap::new()),
        }),
        closed: AtomicBool::new(false),
    };

    {
        let mut entries = cache.shared.entries.lock();
        for purpose in expected_queries {
            spawn_refresh(&cache.shared, &mut entries, purpose);
        }
    }

    cache
}

impl CachedTrustAnchors {
    pub async fn get(&self, purpose: &Purpose) -> AnchorsOutcome {
        // A closed cache is released: queries pass straight through.
        if self.closed.load(Ordering::Acquire) {
            return self.shared.inner.get_trust_anchors(purpose).await;
        }

        let mut rx = {
            let mut entries = self.shared.entries.lock();
            let entry = entries.entry(purpose.clone()).or_default();

            if let Some((value, at)) = &entry.value
                && at.elapsed() < self.shared.ttl
            {
                return value.clone();
            }

            match &entry.inflight {
                Some(inflight) => inflight.rx.clone(),
                None => spawn_refresh(&self.shared, &mut entries, purpose),
            }
        };

        let resolved = rx
            .wait_for(Option::is_some)
            .await
            .ok()
            .map(|value| value.as_ref().cloned().expect("guarded by wait_for"));

        match resolved {
            Some(value) => value,
            // The refresh task was aborted by `close`; fall back to the source.
            None => self.shared.inner.get_trust_anchors(purpose).await,
        }
    }

    /// Abort every pending refresh and release the cache.
    ///
    /// Subsequent queries delegate to the wrapped source without caching.
    pub fn close(&self) {
        self.closed.store(true, Ordering::Release);
        self.shared.entries.lock().clear();
    }
}

#[async_trait::async_trait]
impl GetTrustAnchors for CachedTrustAnchors {
    async fn get_trust_anchors(&self, purpose: &Purpose) -> AnchorsOutcome {
        self.get(purpose).await
    }
}

/// Start a refresh for `purpose` and record it as in-flight. Returns a
/// receiver resolved once the refresh lands.
fn spawn_refresh(
    shared: &Arc<Shared>,
    entries: &mut HashMap<Purpose, Entry>,
    purpose: &Purpose,
) -> watch::Receiver<Option<AnchorsOutcome>> {
    let (tx, rx) = watch::channel(None);

    let task_shared = Arc::clone(shared);
    let task_purpose = purpose.clone();

    let handle = tokio::spawn(async move {
        let outcome = task_shared.inner.get_trust_anchors(&task_purpose).await;

        {
            let mut entries = task_shared.entries.lock();
            let entry = entries.entry(task_purpose).or_default();
            entry.value = Some((outcome.clone(), Instant::now()));
            entry.inflight = None;
        }

        let _ = tx.send(Some(outcome));
    });

    let entry = entries.entry(purpose.clone()).or_default();
    entry.inflight = Some(Inflight {
        rx: rx.clone(),
        _task: AbortOnDrop(handle),
    });

    rx
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, reason = "test code can panic on errors")]

    use std::sync::atomic::AtomicUsize;

    use tokio::sync::Notify;

    use super::*;

    struct CountingSource {
        calls: AtomicUsize,
        gate: Option<Arc<Notify>>,
    }

    impl CountingSource {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                gate: None,
            }
        }

        fn gated(gate: Arc<Notify>) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                gate: Some(gate),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait::async_trait]
    impl GetTrustAnchors for CountingSource {
        async fn get_trust_anchors(&self, _purpose: &Purpose) -> AnchorsOutcome {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            AnchorsOutcome::NotFound
        }
    }

    #[tokio::test]
    async fn repeated_queries_hit_the_cache_within_ttl() {
        let source = Arc::new(CountingSource::new());
        let cache = cached(Arc::clone(&source) as _, Duration::from_secs(3600), &[]);

        for _ in 0..5 {
            let outcome = cache.get(&Purpose::Pid).await;
            assert!(matches!(outcome, AnchorsOutcome::NotFound));
        }

        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn expired_entries_are_recomputed() {
        let source = Arc::new(CountingSource::new());
        let cache = cached(Arc::clone(&source) as _, Duration::ZERO, &[]);

        cache.get(&Purpose::Pid).await;
        cache.get(&Purpose::Pid).await;

        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn concurrent_identical_queries_collapse_into_one_computation() {
        let gate = Arc::new(Notify::new());
        let source = Arc::new(CountingSource::gated(Arc::clone(&gate)));
        let cache = Arc::new(cached(Arc::clone(&source) as _, Duration::from_secs(3600), &[]));

        let mut waiters = Vec::new();
        for _ in 0..3 {
            let cache = Arc::clone(&cache);
            waiters.push(tokio::spawn(async move { cache.get(&Purpose::Pid).await }));
        }

        // Give every waiter a chance to subscribe before releasing the source.
        tokio::task::yield_now().await;
        gate.notify_waiters();
        gate.notify_one();

        for waiter in waiters {
            waiter.await.unwrap();
        }

        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn close_aborts_pending_refreshes() {
        let gate = Arc::new(Notify::new());
        let source = Arc::new(CountingSource::gated(Arc::clone(&gate)));
        let cache = Arc::new(cached(
            Arc::clone(&source) as _,
            Duration::from_secs(3600),
            &[Purpose::Pid],
        ));

        // The pre-warmed refresh is parked on the gate; closing must abort it
        // and leave later queries to pass through.
        cache.close();

        let follow_up = {
            let cache = Arc::clone(&cache);
            tokio::spawn(async move { cache.get(&Purpose::Pid).await })
        };

        gate.notify_one();
        let outcome = follow_up.await.unwrap();
        assert!(matches!(outcome, AnchorsOutcome::NotFound));
    }
}
