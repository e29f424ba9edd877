//! Cache-line isolation for the hot atomics in both channel variants.
//!
//! `spec.md` calls for a compile-time `CacheLineSize` (default 64,
//! overridable per platform) and requires that producer-written and
//! consumer-written atomics never share a line. `crossbeam_utils::CachePadded`
//! already does exactly this — it pads to 128 bytes on architectures known
//! to prefetch adjacent lines (x86_64, aarch64-apple) and 64 elsewhere — so
//! this module just re-exports it under the name the rest of the crate uses.

pub use crossbeam_utils::CachePadded;

/// Returns true if two fields are guaranteed not to share a cache line.
///
/// `CachePadded<T>` is itself aligned to (and padded out to) the target's
/// cache-line size, so any two distinct `CachePadded` fields in a struct
/// never overlap a line. This just checks that the caller didn't pass the
/// same field twice by mistake.
///
/// Used by `invariants::debug_assert_distinct_cache_lines!` at construction
/// time.
pub(crate) fn distinct_lines<A, B>(a: &CachePadded<A>, b: &CachePadded<B>) -> bool {
    std::ptr::from_ref(a).cast::<()>() != std::ptr::from_ref(b).cast::<()>()
}
