/// Bounded buffer pools for match and extraction working sets
///
/// Matching walks over a scratch `Vec` of steps and extraction over a
/// scratch `Vec` of spans. Both are borrowed from a [`Pools`] owned by the
/// store (or built by the caller) and go back on every exit path when the
/// guard drops. Buffers that grew past the configured ceiling are dropped
/// instead of kept.

use std::ops::{Deref, DerefMut};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::pattern::Span;
use crate::store::Step;

/// Capacity ceilings for pooled buffers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Largest match buffer (in steps) kept for reuse
    #[serde(default = "default_max_tokens_capacity")]
    pub max_tokens_capacity: usize,
    /// Largest extraction buffer (in captures) kept for reuse
    #[serde(default = "default_max_params_capacity")]
    pub max_params_capacity: usize,
}

fn default_max_tokens_capacity() -> usize {
    128
}

fn default_max_params_capacity() -> usize {
    32
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_tokens_capacity: default_max_tokens_capacity(),
            max_params_capacity: default_max_params_capacity(),
        }
    }
}

/// Free list of reusable buffers
pub(crate) struct Pool<T> {
    free: Mutex<Vec<Vec<T>>>,
    capacity: usize,
    max_capacity: usize,
    label: &'static str,
}

impl<T> Pool<T> {
    fn new(label: &'static str, capacity: usize, max_capacity: usize) -> Self {
        Self {
            free: Mutex::new(Vec::new()),
            capacity: capacity.min(max_capacity),
            max_capacity,
            label,
        }
    }

    /// Takes an empty buffer with at least the current initial capacity
    pub(crate) fn acquire(&self) -> Pooled<'_, T> {
        let mut buf = self.free.lock().pop().unwrap_or_default();
        buf.reserve(self.capacity);
        Pooled { buf, pool: self }
    }

    /// Grows the initial capacity of new buffers, up to the ceiling
    pub(crate) fn reserve(&mut self, capacity: usize) {
        self.capacity = self.capacity.max(capacity.min(self.max_capacity));
    }

    pub(crate) fn idle(&self) -> usize {
        self.free.lock().len()
    }

    fn release(&self, mut buf: Vec<T>) {
        if buf.capacity() > self.max_capacity {
            tracing::trace!(
                pool = self.label,
                capacity = buf.capacity(),
                max = self.max_capacity,
                "discarding oversized buffer"
            );
            return;
        }
        buf.clear();
        self.free.lock().push(buf);
    }
}

/// Buffer on loan from a [`Pool`], returned on drop
pub(crate) struct Pooled<'p, T> {
    buf: Vec<T>,
    pool: &'p Pool<T>,
}

impl<T> Deref for Pooled<'_, T> {
    type Target = Vec<T>;

    fn deref(&self) -> &Vec<T> {
        &self.buf
    }
}

impl<T> DerefMut for Pooled<'_, T> {
    fn deref_mut(&mut self) -> &mut Vec<T> {
        &mut self.buf
    }
}

impl<T> Drop for Pooled<'_, T> {
    fn drop(&mut self) {
        self.pool.release(std::mem::take(&mut self.buf));
    }
}

/// Working-buffer pools for one store (or one caller)
///
/// Nothing is process-global: each [`Store`](crate::Store) owns its own
/// `Pools`, and standalone extraction can pass any instance to
/// [`Pattern::lookup_in`](crate::Pattern::lookup_in).
pub struct Pools {
    pub(crate) tokens: Pool<Step>,
    pub(crate) params: Pool<Span>,
}

impl Pools {
    pub fn new(config: &PoolConfig) -> Self {
        Self {
            tokens: Pool::new("tokens", 0, config.max_tokens_capacity),
            params: Pool::new("params", 0, config.max_params_capacity),
        }
    }

    /// Idle match buffers
    pub fn idle_tokens(&self) -> usize {
        self.tokens.idle()
    }

    /// Idle extraction buffers
    pub fn idle_params(&self) -> usize {
        self.params.idle()
    }

    /// Initial capacity of new match buffers
    pub fn tokens_capacity(&self) -> usize {
        self.tokens.capacity
    }
}

impl Default for Pools {
    fn default() -> Self {
        Self::new(&PoolConfig::default())
    }
}

impl std::fmt::Debug for Pools {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pools")
            .field("idle_tokens", &self.idle_tokens())
            .field("idle_params", &self.idle_params())
            .field("tokens_capacity", &self.tokens.capacity)
            .finish()
    }
}
