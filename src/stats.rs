//! Counters tracking how many geometric tests the queries perform.

use core::cell::Cell;

thread_local! {
    static FRUSTUM_VS_AABB: Cell<u64> = const { Cell::new(0) };
    static RAY_VS_AABB: Cell<u64> = const { Cell::new(0) };
}

/// Facade over the per-thread query counters.
///
/// Every AABB-vs-frustum classification and every AABB-vs-ray cast performed
/// by this crate bumps one of these counters. They exist so callers (and the
/// test suite) can bound the work performed by a query: reset them, run the
/// query, then read them back.
///
/// The counters are thread-local, matching the crate's single-threaded usage
/// model: a query and its counter reads must happen on the same thread.
pub struct Stats;

impl Stats {
    /// Resets both counters to zero.
    pub fn reset() {
        FRUSTUM_VS_AABB.with(|c| c.set(0));
        RAY_VS_AABB.with(|c| c.set(0));
    }

    /// Number of frustum-vs-AABB classifications since the last reset.
    pub fn frustum_vs_aabb() -> u64 {
        FRUSTUM_VS_AABB.with(Cell::get)
    }

    /// Number of ray-vs-AABB casts since the last reset.
    pub fn ray_vs_aabb() -> u64 {
        RAY_VS_AABB.with(Cell::get)
    }

    pub(crate) fn record_frustum_vs_aabb() {
        FRUSTUM_VS_AABB.with(|c| c.set(c.get() + 1));
    }

    pub(crate) fn record_ray_vs_aabb() {
        RAY_VS_AABB.with(|c| c.set(c.get() + 1));
    }
}
