//! Cache backend implementations.
//!
//! Concrete implementations of `hookbins_core::cache::Cache`.
//!
//! # Feature Flags
//!
//! - (always): In-memory LRU cache
//! - `redis`: Redis cache using the redis crate

pub mod memory;

#[cfg(feature = "redis")]
pub mod redis_impl;

pub use memory::MemoryCache;

#[cfg(feature = "redis")]
pub use redis_impl::RedisCache;
