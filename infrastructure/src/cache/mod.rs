//! Response caching
//!
//! Provides [`FifoResponseCache`], the in-memory implementation of the
//! [`ResponseCache`](council_application::ResponseCache) port.

mod fifo;

pub use fifo::{DEFAULT_CAPACITY, FifoResponseCache};
