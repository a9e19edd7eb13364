//! Observable state container shared by panels and their views.
//!
//! DESIGN
//! ======
//! A `Store<T>` owns one value behind a mutex plus a `watch` channel carrying
//! a revision counter. Mutations go through `update*` / `replace`; each
//! accepted mutation bumps the revision so every subscriber wakes up. Views
//! never receive the value through the channel, they re-read it on wake.
//! Using a `u64` revision keeps all receivers the same type regardless of
//! `T`, so a session can wait on the stores of any panel uniformly.
//!
//! Clones share the same value. Mutations are serialized by the mutex; a
//! ticker and a user edit can never interleave inside one update.

use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::watch;

pub struct Store<T> {
    inner: Arc<StoreInner<T>>,
}

struct StoreInner<T> {
    value: Mutex<T>,
    revision: watch::Sender<u64>,
}

impl<T> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<T> Store<T> {
    pub fn new(value: T) -> Self {
        let (revision, _) = watch::channel(0);
        Self { inner: Arc::new(StoreInner { value: Mutex::new(value), revision }) }
    }

    /// Read through a borrow without cloning the whole value.
    pub fn read<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let value = self
            .inner
            .value
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        f(&value)
    }

    /// Mutate in place. Always notifies.
    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let out = {
            let mut value = self
                .inner
                .value
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            f(&mut value)
        };
        self.bump();
        out
    }

    /// Mutate in place. Notifies only when `f` returns `Some`.
    pub fn update_if<R>(&self, f: impl FnOnce(&mut T) -> Option<R>) -> Option<R> {
        let out = {
            let mut value = self
                .inner
                .value
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            f(&mut value)
        };
        if out.is_some() {
            self.bump();
        }
        out
    }

    /// Mutate in place. Notifies only when `f` returns `Ok`.
    pub fn try_update<R, E>(&self, f: impl FnOnce(&mut T) -> Result<R, E>) -> Result<R, E> {
        let out = {
            let mut value = self
                .inner
                .value
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            f(&mut value)
        };
        if out.is_ok() {
            self.bump();
        }
        out
    }

    /// Swap in a new value, returning the old one. Always notifies.
    pub fn replace(&self, next: T) -> T {
        let old = {
            let mut value = self
                .inner
                .value
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            std::mem::replace(&mut *value, next)
        };
        self.bump();
        old
    }

    /// Receiver that wakes after every accepted mutation. The current
    /// revision is marked as seen.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.inner.revision.subscribe()
    }

    fn bump(&self) {
        self.inner.revision.send_modify(|rev| *rev = rev.wrapping_add(1));
    }
}

impl<T: Clone> Store<T> {
    /// Clone of the current value.
    pub fn get(&self) -> T {
        self.read(T::clone)
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
