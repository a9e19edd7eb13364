//! Simulated data streams.
//!
//! ARCHITECTURE
//! ============
//! Everything here is synchronous and generic over `R: Rng + ?Sized` so a
//! panel ticker can pass `rand::rng()` while tests pass a seeded `StdRng`.
//! Scheduling lives in `crate::ticker`; these types only know how to take
//! one step.

pub mod alerts;
pub mod metric;
pub mod trend;
pub mod window;
