//! Observable state containers.
//!
//! An `Entity<T>` is a shared value plus a version counter published on a
//! watch channel. Every `update` bumps the version, which is how views ask the
//! application loop for a re-render.

use std::sync::{Arc, RwLock, Weak};
use tokio::sync::watch;

/// Shared, observable state.
pub struct Entity<T: Send + Sync> {
    inner: Arc<RwLock<T>>,
    tx: watch::Sender<u64>,
}

/// A weak handle to an entity. Background work holds one of these so that a
/// result arriving after the owner dropped the entity is discarded.
pub struct WeakEntity<T: Send + Sync> {
    inner: Weak<RwLock<T>>,
    tx: watch::Sender<u64>,
}

impl<T: Send + Sync> Entity<T> {
    pub fn new(value: T) -> Self {
        let (tx, _) = watch::channel(0);
        Self {
            inner: Arc::new(RwLock::new(value)),
            tx,
        }
    }

    /// Mutate the value and notify subscribers.
    pub fn update<F, R>(&self, f: F) -> crate::Result<R>
    where
        F: FnOnce(&mut T) -> R,
    {
        let mut guard = self.inner.write().map_err(|_| crate::Error::LockPoisoned)?;
        let res = f(&mut guard);
        drop(guard);
        self.tx.send_modify(|version| *version += 1);
        Ok(res)
    }

    pub fn read<F, R>(&self, f: F) -> crate::Result<R>
    where
        F: FnOnce(&T) -> R,
    {
        let guard = self.inner.read().map_err(|_| crate::Error::LockPoisoned)?;
        Ok(f(&guard))
    }

    /// Number of updates applied so far.
    pub fn version(&self) -> u64 {
        *self.tx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.tx.subscribe()
    }

    pub fn downgrade(&self) -> WeakEntity<T> {
        WeakEntity {
            inner: Arc::downgrade(&self.inner),
            tx: self.tx.clone(),
        }
    }
}

impl<T: Send + Sync + Clone> Entity<T> {
    /// Clone the current value out of the entity.
    pub fn snapshot(&self) -> crate::Result<T> {
        self.read(T::clone)
    }
}

impl<T: Send + Sync> WeakEntity<T> {
    pub fn upgrade(&self) -> Option<Entity<T>> {
        self.inner.upgrade().map(|inner| Entity {
            inner,
            tx: self.tx.clone(),
        })
    }

    /// Update the entity if it is still alive.
    pub fn update<F, R>(&self, f: F) -> Option<crate::Result<R>>
    where
        F: FnOnce(&mut T) -> R,
    {
        self.upgrade().map(|entity| entity.update(f))
    }
}

impl<T: Send + Sync> Clone for Entity<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            tx: self.tx.clone(),
        }
    }
}

impl<T: Send + Sync> Clone for WeakEntity<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Weak::clone(&self.inner),
            tx: self.tx.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_bumps_version() {
        let entity = Entity::new(1);
        assert_eq!(entity.version(), 0);
        entity.update(|v| *v += 1).unwrap();
        entity.update(|v| *v *= 10).unwrap();
        assert_eq!(entity.version(), 2);
        assert_eq!(entity.snapshot().unwrap(), 20);
    }

    #[tokio::test]
    async fn subscribers_see_updates() {
        let entity = Entity::new(String::new());
        let mut rx = entity.subscribe();
        entity.update(|s| s.push_str("ready")).unwrap();
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), 1);
    }

    #[test]
    fn weak_handle_does_not_keep_value_alive() {
        let entity = Entity::new(5);
        let weak = entity.downgrade();
        assert_eq!(weak.update(|v| *v + 1).unwrap().unwrap(), 6);

        drop(entity);
        assert!(weak.upgrade().is_none());
        assert!(weak.update(|v| *v = 0).is_none());
    }
}
