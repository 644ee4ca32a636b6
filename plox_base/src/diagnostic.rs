//! A module for handling the diagnostics reported while processing the source code.

use std::sync::{RwLock, RwLockReadGuard};

/// Represents a trait responsible for handling diagnostics.
///
/// Diagnostics are never fatal to the reporter; it is up to the handler to decide what to do with
/// them.
pub trait Handler<T> {
    /// Receives a diagnostic and handles it.
    fn receive(&self, diagnostic: T);
}

/// Is a struct that implements [`Handler`] trait by storing all diagnostics in a vector.
#[derive(Debug)]
pub struct Storage<T: Send + Sync> {
    diagnostics: RwLock<Vec<T>>,
}

impl<T: Send + Sync> Storage<T> {
    /// Creates a new empty [`Storage`]
    #[must_use]
    pub fn new() -> Self {
        Self {
            diagnostics: RwLock::new(Vec::new()),
        }
    }

    /// Consumes the [`Storage`] and returns the underlying vector of diagnostics.
    pub fn into_vec(self) -> Vec<T> { self.diagnostics.into_inner().unwrap() }

    /// Returns a reference to the underlying vector of diagnostics.
    pub fn as_vec(&self) -> RwLockReadGuard<Vec<T>> { self.diagnostics.read().unwrap() }

    /// Checks if no diagnostic has been received so far.
    pub fn is_empty(&self) -> bool { self.as_vec().is_empty() }

    /// Removes every stored diagnostic.
    pub fn clear(&self) { self.diagnostics.write().unwrap().clear(); }
}

impl<T: Send + Sync> Default for Storage<T> {
    fn default() -> Self { Self::new() }
}

impl<T: Send + Sync, U> Handler<U> for Storage<T>
where
    U: Into<T>,
{
    fn receive(&self, diagnostic: U) { self.diagnostics.write().unwrap().push(diagnostic.into()); }
}

/// Is a struct that implements [`Handler`] trait by doing nothing with the diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Dummy;

impl<T> Handler<T> for Dummy {
    fn receive(&self, _diagnostic: T) {}
}

/// Is a struct that implements [`Handler`] trait by counting the number of diagnostics received.
#[derive(Debug, Default)]
pub struct Counter {
    counter: RwLock<usize>,
}

impl Counter {
    /// Returns the number of diagnostics received.
    #[must_use]
    pub fn count(&self) -> usize { *self.counter.read().unwrap() }

    /// Resets the counter to zero.
    pub fn reset(&self) { *self.counter.write().unwrap() = 0 }
}

impl<T> Handler<T> for Counter {
    fn receive(&self, _diagnostic: T) { *self.counter.write().unwrap() += 1; }
}

#[cfg(test)]
mod tests {
    use super::{Counter, Handler, Storage};

    #[test]
    fn storage_keeps_order() {
        let storage: Storage<String> = Storage::new();
        storage.receive("first");
        storage.receive("second");

        assert_eq!(*storage.as_vec(), vec!["first".to_string(), "second".to_string()]);

        storage.clear();
        assert!(storage.is_empty());
    }

    #[test]
    fn counter_reset() {
        let counter = Counter::default();
        counter.receive(1);
        counter.receive("two");
        assert_eq!(counter.count(), 2);

        counter.reset();
        assert_eq!(counter.count(), 0);
    }
}
