//! Functional core for hookbins.
//!
//! Pure domain types, the pagination policy, cache key and encoding rules,
//! and the trait seams the imperative shell implements. Nothing in this
//! crate performs I/O.

pub mod bins;
pub mod cache;
pub mod pagination;
pub mod storage;
