//! Proxy Module
//!
//! The cache-aside dispatcher: answers lookups from the bounded cache and
//! falls back to the backing store on a miss.

mod dispatcher;
mod in_flight;

pub use dispatcher::CacheProxy;
pub use in_flight::{FetchResult, Flight, InFlight};
