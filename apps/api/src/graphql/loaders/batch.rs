//! Keyed batching cache
//!
//! [`BatchLoader`] turns many single-key `load` calls into one call of a
//! [`BatchFetch`] per batch window and memoizes every resolved key for the
//! lifetime of the loader.
//!
//! A window closes at the next scheduler turn: the first `load` of a window
//! becomes its dispatcher, yields once (or sleeps the configured delay), and
//! then takes every key registered in the meantime. Resolvers that run as
//! sibling futures of the same task therefore land in the same batch.
//!
//! Keys are handed to the fetch in first-occurrence order and without
//! duplicates. Every caller of a key, including repeated callers inside one
//! window, receives that key's value. Failures reach every caller of the
//! window and are never cached.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use futures_util::future::join_all;
use thiserror::Error;
use tokio::sync::oneshot;

/// A batch fetch function over one access pattern
#[async_trait]
pub trait BatchFetch: Send + Sync + 'static {
    type Key: Clone + Eq + Hash + fmt::Debug + Send + Sync + 'static;
    type Value: Clone + Send + Sync + 'static;
    type Error: Clone + fmt::Display + Send + Sync + 'static;

    /// Fetch the values for a set of distinct keys
    ///
    /// The result must have one entry per key, in the same order as `keys`;
    /// `None` marks a key with no value.
    async fn fetch(&self, keys: &[Self::Key]) -> Result<Vec<Option<Self::Value>>, Self::Error>;
}

/// Why a `load` did not produce a value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BatchError<E> {
    /// The batch fetch itself failed
    #[error("batch fetch failed: {0}")]
    Fetch(E),

    /// The batch fetch broke the one-value-per-key contract
    #[error("batch fetch returned {actual} values for {expected} keys")]
    LengthMismatch { expected: usize, actual: usize },

    /// The future driving the window was dropped before it resolved
    #[error("batch was cancelled before it resolved")]
    Cancelled,
}

/// Outcome of loading one key
pub type LoadResult<F> =
    Result<Option<<F as BatchFetch>::Value>, BatchError<<F as BatchFetch>::Error>>;

type Waiter<F> = oneshot::Sender<LoadResult<F>>;

struct State<F: BatchFetch> {
    cache: HashMap<F::Key, Option<F::Value>>,
    /// Keys of the open window, first-occurrence order
    pending_keys: Vec<F::Key>,
    pending: HashMap<F::Key, Vec<Waiter<F>>>,
    /// Keys handed to a fetch that has not returned yet
    in_flight: HashMap<F::Key, Vec<Waiter<F>>>,
    dispatch_scheduled: bool,
}

impl<F: BatchFetch> Default for State<F> {
    fn default() -> Self {
        Self {
            cache: HashMap::new(),
            pending_keys: Vec::new(),
            pending: HashMap::new(),
            in_flight: HashMap::new(),
            dispatch_scheduled: false,
        }
    }
}

/// Per-request batching and caching wrapper around one [`BatchFetch`]
pub struct BatchLoader<F: BatchFetch> {
    fetcher: F,
    delay: Option<Duration>,
    max_batch_size: Option<usize>,
    state: Mutex<State<F>>,
}

impl<F: BatchFetch> BatchLoader<F> {
    /// Create a loader that closes each window at the next scheduler turn
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            delay: None,
            max_batch_size: None,
            state: Mutex::new(State::default()),
        }
    }

    /// Hold each window open for a fixed delay instead of a single yield
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Split windows larger than `size` keys into several fetches
    pub fn with_max_batch_size(mut self, size: usize) -> Self {
        self.max_batch_size = Some(size.max(1));
        self
    }

    /// The wrapped batch fetch function
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Load the value for one key
    pub async fn load(&self, key: F::Key) -> LoadResult<F> {
        let (receiver, dispatch) = {
            let mut guard = self.lock();
            let state = &mut *guard;

            if let Some(value) = state.cache.get(&key) {
                return Ok(value.clone());
            }

            let (sender, receiver) = oneshot::channel();
            if let Some(waiters) = state.in_flight.get_mut(&key) {
                waiters.push(sender);
                (receiver, false)
            } else {
                match state.pending.entry(key) {
                    Entry::Occupied(mut entry) => entry.get_mut().push(sender),
                    Entry::Vacant(entry) => {
                        state.pending_keys.push(entry.key().clone());
                        entry.insert(vec![sender]);
                    }
                }
                let dispatch = !state.dispatch_scheduled;
                state.dispatch_scheduled = true;
                (receiver, dispatch)
            }
        };

        if dispatch {
            self.dispatch().await;
        }

        receiver.await.unwrap_or(Err(BatchError::Cancelled))
    }

    /// Load several keys; they share one window
    pub async fn load_many<I>(&self, keys: I) -> Result<Vec<Option<F::Value>>, BatchError<F::Error>>
    where
        I: IntoIterator<Item = F::Key>,
    {
        join_all(keys.into_iter().map(|key| self.load(key)))
            .await
            .into_iter()
            .collect()
    }

    /// Seed the cache with a known value; an existing entry wins
    pub fn prime(&self, key: F::Key, value: Option<F::Value>) {
        self.lock().cache.entry(key).or_insert(value);
    }

    /// Forget one cached key so the next load fetches it again
    pub fn clear(&self, key: &F::Key) {
        self.lock().cache.remove(key);
    }

    /// Forget every cached key
    pub fn clear_all(&self) {
        self.lock().cache.clear();
    }

    /// Whether a key has a cached result
    pub fn is_cached(&self, key: &F::Key) -> bool {
        self.lock().cache.contains_key(key)
    }

    fn lock(&self) -> MutexGuard<'_, State<F>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn name(&self) -> &'static str {
        let full = std::any::type_name::<F>();
        full.rsplit("::").next().unwrap_or(full)
    }

    async fn dispatch(&self) {
        let mut guard = DispatchGuard {
            loader: self,
            taken: None,
            done: false,
        };

        match self.delay {
            Some(delay) => tokio::time::sleep(delay).await,
            None => tokio::task::yield_now().await,
        }

        let window = {
            let mut state = self.lock();
            let state = &mut *state;
            state.dispatch_scheduled = false;
            let keys = std::mem::take(&mut state.pending_keys);
            for key in &keys {
                if let Some(waiters) = state.pending.remove(key) {
                    state.in_flight.insert(key.clone(), waiters);
                }
            }
            keys
        };

        let keys: &[F::Key] = guard.taken.insert(window);
        let chunk_size = self.max_batch_size.unwrap_or(keys.len()).max(1);
        for chunk in keys.chunks(chunk_size) {
            self.run_batch(chunk).await;
        }
        guard.done = true;
    }

    async fn run_batch(&self, keys: &[F::Key]) {
        tracing::debug!(loader = self.name(), keys = keys.len(), "Dispatching batch");
        let outcome = self.fetcher.fetch(keys).await;

        let mut guard = self.lock();
        let state = &mut *guard;
        match outcome {
            Ok(values) if values.len() == keys.len() => {
                for (key, value) in keys.iter().zip(values) {
                    for waiter in state.in_flight.remove(key).unwrap_or_default() {
                        let _ = waiter.send(Ok(value.clone()));
                    }
                    state.cache.insert(key.clone(), value);
                }
            }
            Ok(values) => {
                tracing::error!(
                    loader = self.name(),
                    expected = keys.len(),
                    actual = values.len(),
                    "Batch fetch returned the wrong number of values"
                );
                let error = BatchError::LengthMismatch {
                    expected: keys.len(),
                    actual: values.len(),
                };
                fail_waiters(state, keys, error);
            }
            Err(error) => {
                tracing::warn!(loader = self.name(), error = %error, "Batch fetch failed");
                fail_waiters(state, keys, BatchError::Fetch(error));
            }
        }
    }
}

fn fail_waiters<F: BatchFetch>(state: &mut State<F>, keys: &[F::Key], error: BatchError<F::Error>) {
    for key in keys {
        for waiter in state.in_flight.remove(key).unwrap_or_default() {
            let _ = waiter.send(Err(error.clone()));
        }
    }
}

/// Releases a window whose dispatcher was dropped part way
///
/// Dropping the waiters' senders resolves their loads as `Cancelled`, and the
/// released keys are fetched afresh by the next window that asks for them.
struct DispatchGuard<'a, F: BatchFetch> {
    loader: &'a BatchLoader<F>,
    taken: Option<Vec<F::Key>>,
    done: bool,
}

impl<F: BatchFetch> Drop for DispatchGuard<'_, F> {
    fn drop(&mut self) {
        if self.done {
            return;
        }

        tracing::debug!(loader = self.loader.name(), "Batch dispatch cancelled");
        let mut guard = self.loader.lock();
        let state = &mut *guard;
        match &self.taken {
            None => {
                state.dispatch_scheduled = false;
                state.pending_keys.clear();
                state.pending.clear();
            }
            Some(keys) => {
                for key in keys {
                    state.in_flight.remove(key);
                }
            }
        }
    }
}
