//! Keyed debouncing for expensive recomputations.
//!
//! [`DebounceScheduler`] keeps at most one pending timer per key. The delay
//! before a key's work runs grows with how long that work took before, so
//! slow recomputations are batched more aggressively than fast ones.

mod average;
mod debounce;

pub use average::MovingAverage;
pub use debounce::{DebounceScheduler, SchedulerConfig};
