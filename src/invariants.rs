//! Debug assertion macros for channel invariants.
//!
//! These mirror the invariants documented in `spec.md` §3/§5/§8. They are
//! only active in debug builds (`#[cfg(debug_assertions)]` via `debug_assert!`),
//! so there is zero overhead in release builds. Shared by `spsc_single` and
//! `mpsc_bounded`.

// =============================================================================
// INV-OCC-01: Bounded occupancy (MPSC)
// =============================================================================

/// Assert that occupied slots never exceed capacity.
///
/// **Invariant**: `0 <= occupied <= capacity` (spec.md §8, property 3).
macro_rules! debug_assert_bounded_occupancy {
    ($occupied:expr, $capacity:expr) => {
        debug_assert!(
            $occupied <= $capacity,
            "bounded-occupancy violated: {} occupied slots exceeds capacity {}",
            $occupied,
            $capacity
        )
    };
}

// =============================================================================
// INV-LAYOUT-01: Distinct cache lines
// =============================================================================

/// Assert that two hot fields do not alias a cache line.
///
/// Used at construction of `MpscBounded` to check `front`/`back` (spec.md
/// §3: "Asserts that front and back occupy distinct cache lines.").
macro_rules! debug_assert_distinct_cache_lines {
    ($a:expr, $b:expr) => {
        debug_assert!(
            crate::cache_pad::distinct_lines($a, $b),
            "layout violated: fields expected on distinct cache lines alias"
        )
    };
}

// =============================================================================
// INV-SPSC-01: Slot/full coherence
// =============================================================================

/// Assert that `clear()` is only called when the slot is occupied.
///
/// Resolves spec.md §9 Open Question 1: `clear()` is legal only when
/// `full() == true`.
macro_rules! debug_assert_spsc_slot_occupied {
    ($full:expr) => {
        debug_assert!(
            $full,
            "contract violation: clear() called on an empty SPSC-Single channel"
        )
    };
}

// =============================================================================
// INV-DROP-01: No destructor-bearing elements
// =============================================================================

/// Assert that `T` does not need its destructor run for correctness.
///
/// Both channel variants abandon in-flight elements on teardown (spec.md
/// §3); a `T` whose `Drop` impl is load-bearing would leak resources
/// silently, so this catches the mistake in debug builds.
macro_rules! debug_assert_no_drop_glue {
    ($t:ty) => {
        debug_assert!(
            !::std::mem::needs_drop::<$t>(),
            "contract violation: element type requires Drop to run, but the \
             channel may abandon in-flight elements on teardown"
        )
    };
}

pub(crate) use debug_assert_bounded_occupancy;
pub(crate) use debug_assert_distinct_cache_lines;
pub(crate) use debug_assert_no_drop_glue;
pub(crate) use debug_assert_spsc_slot_occupied;
