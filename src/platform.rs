//! Marker traits and time types shared across the crate.
//!
//! The `Maybe*` traits keep `Send`/`Sync` requirements in one place so that
//! trait signatures in [`http`](crate::http) stay readable.

pub use std::time::{Duration, SystemTime};

/// Marker trait for types that are `Send`.
pub trait MaybeSend: Send {}
impl<T: Send> MaybeSend for T {}

/// Marker trait for types that are `Send + Sync`.
pub trait MaybeSendSync: Send + Sync {}
impl<T: Send + Sync> MaybeSendSync for T {}
