//! In-Flight Fetch Table
//!
//! Collapses concurrent cache misses on the same key into one backing store
//! fetch whose result every waiter receives.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use futures::future::{BoxFuture, FutureExt, Shared};

use crate::error::BackendError;

/// Result of one backing store fetch, shared by all of its waiters.
pub type FetchResult = Result<Option<String>, BackendError>;

/// A pending fetch that any number of waiters can await.
pub type Flight = Shared<BoxFuture<'static, FetchResult>>;

// == In-Flight Table ==
/// Per-key table of backing store fetches that have not finished yet.
///
/// Critical sections never await, so a plain mutex is enough.
#[derive(Default)]
pub struct InFlight {
    flights: Mutex<HashMap<String, Flight>>,
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    // == Join Or Start ==
    /// Returns the pending fetch for `key`, starting one with `start` if there
    /// is none.
    ///
    /// The boolean is true when this call started the fetch.
    pub fn join_or_start<F>(&self, key: &str, start: F) -> (Flight, bool)
    where
        F: FnOnce() -> BoxFuture<'static, FetchResult>,
    {
        let mut flights = self.lock();
        if let Some(flight) = flights.get(key) {
            return (flight.clone(), false);
        }

        let flight = start().shared();
        flights.insert(key.to_string(), flight.clone());
        (flight, true)
    }

    // == Finish ==
    /// Forgets the fetch for `key`. Later misses start a new one.
    pub fn finish(&self, key: &str) {
        self.lock().remove(key);
    }

    /// Number of fetches currently pending.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Flight>> {
        self.flights.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
