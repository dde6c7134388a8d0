//! Expense source implementations backed by the REST backend.
//!
//! - `rest` - `RestSource`, a reqwest client for the backend endpoints
//! - `cached` - `CachedSource`, a moka read-through cache over any source

pub mod cached;
pub mod rest;

pub use cached::CachedSource;
pub use rest::RestSource;
