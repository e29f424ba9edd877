//! Wait-free, capacity-one, single-producer/single-consumer channel.
//!
//! Used to hand off a single task descriptor (e.g. a stolen task from thief
//! to victim, or a steal request) between exactly one producer thread and
//! exactly one consumer thread. See `spec.md` §4.1.

use crate::cache_pad::CachePadded;
use crate::invariants::{debug_assert_no_drop_glue, debug_assert_spsc_slot_occupied};
use std::cell::UnsafeCell;
use std::mem::MaybeUninit;
use std::sync::atomic::{AtomicBool, Ordering};

/// A wait-free, single-slot SPSC channel.
///
/// # Layout (spec.md §3)
///
/// 1. Leading cache-line padding, so an array of `SpscSingle<T>` doesn't
///    false-share with whatever precedes it.
/// 2. The slot itself, padded out to its own cache line.
/// 3. The `full` flag, on its own cache line.
///
/// # Misuse
///
/// Calling `try_send` from two threads concurrently, or `try_recv` from two
/// threads concurrently, is undefined behavior at the specification level —
/// this type assumes exactly one producer and one consumer and does not
/// detect the violation.
#[repr(C)]
pub struct SpscSingle<T> {
    _leading_pad: CachePadded<()>,
    slot: CachePadded<UnsafeCell<MaybeUninit<T>>>,
    full: CachePadded<AtomicBool>,
}

// Safety: exactly one producer thread writes the slot then releases `full`;
// exactly one consumer thread observes `full` via acquire then reads the
// slot. The acquire/release pair on `full` is the only synchronization
// needed — see `try_send`/`try_recv`.
unsafe impl<T: Send> Send for SpscSingle<T> {}
unsafe impl<T: Send> Sync for SpscSingle<T> {}

impl<T> SpscSingle<T> {
    /// Creates an empty channel.
    ///
    /// # Panics (debug builds only)
    ///
    /// Panics if `T` is larger than one cache line, or if `T` needs `Drop`
    /// to run (spec.md §3: elements abandoned on teardown must not leak
    /// resources that require a destructor).
    #[must_use]
    pub fn new() -> Self {
        debug_assert_no_drop_glue!(T);
        debug_assert!(
            std::mem::size_of::<T>() <= std::mem::align_of::<CachePadded<()>>(),
            "SpscSingle element type does not fit within one cache line"
        );
        Self {
            _leading_pad: CachePadded::new(()),
            slot: CachePadded::new(UnsafeCell::new(MaybeUninit::uninit())),
            full: CachePadded::new(AtomicBool::new(false)),
        }
    }

    /// Returns true if the slot currently holds a value.
    #[inline]
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.full.load(Ordering::Acquire)
    }

    /// Attempts to move `value` into the channel.
    ///
    /// Returns `Ok(())` on success. Returns `Err(value)`, handing ownership
    /// of `value` back to the caller, if the slot was already occupied
    /// (spec.md §4.1: "If `full` observed under acquire is true, returns
    /// false and retains ownership").
    ///
    /// Must only be called from the single producer thread.
    #[inline]
    pub fn try_send(&self, value: T) -> Result<(), T> {
        if self.full.load(Ordering::Acquire) {
            return Err(value);
        }
        // SAFETY: `full` was observed false, so no concurrent consumer can
        // be reading the slot (only the producer transitions false->true,
        // only the consumer transitions true->false). We are the sole
        // producer, so no other writer races us either.
        unsafe {
            (*self.slot.get()).write(value);
        }
        self.full.store(true, Ordering::Release);
        Ok(())
    }

    /// Attempts to move the slot's value out into the caller.
    ///
    /// Returns `None` if the slot was empty. Must only be called from the
    /// single consumer thread.
    #[inline]
    pub fn try_recv(&self) -> Option<T> {
        if !self.full.load(Ordering::Acquire) {
            return None;
        }
        // SAFETY: `full` was observed true under acquire, which
        // synchronizes-with the producer's release store, so the slot write
        // is visible. We are the sole consumer, so no other reader races us.
        let value = unsafe { (*self.slot.get()).assume_init_read() };
        self.full.store(false, Ordering::Release);
        Some(value)
    }

    /// Resets an occupied channel for reuse.
    ///
    /// **Not thread-safe.** Precondition: the slot must currently be full —
    /// calling `clear` on an empty channel is a contract violation (spec.md
    /// §9, Open Question 1). Intended for reinitializing a channel while no
    /// producer or consumer thread is active.
    pub fn clear(&mut self) {
        let full = *self.full.get_mut();
        debug_assert_spsc_slot_occupied!(full);
        if full {
            // SAFETY: `full` (read via &mut self, so no concurrent access
            // is possible) confirms the slot holds an initialized value.
            unsafe {
                self.slot.get_mut().assume_init_drop();
            }
            *self.full.get_mut() = false;
        }
    }
}

impl<T> Default for SpscSingle<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn size_is_one_cache_line_plus_two_guard_lines() {
        let ch = SpscSingle::<u64>::new();
        assert!(!ch.is_full());
    }

    #[test]
    fn s1_single_round_trip() {
        let ch = SpscSingle::<u64>::new();
        assert_eq!(ch.try_recv(), None);
        assert!(ch.try_send(42).is_ok());
        assert_eq!(ch.try_recv(), Some(42));
        assert_eq!(ch.try_recv(), None);
    }

    #[test]
    fn send_fails_and_returns_ownership_when_full() {
        let ch = SpscSingle::<u64>::new();
        assert!(ch.try_send(1).is_ok());
        assert_eq!(ch.try_send(2), Err(2));
        assert_eq!(ch.try_recv(), Some(1));
    }

    #[test]
    fn s2_ten_items_sequential_handoff() {
        let ch = Arc::new(SpscSingle::<u64>::new());
        let producer = Arc::clone(&ch);
        let handle = thread::spawn(move || {
            for j in 0..10u64 {
                let value = 42 + 11 * j;
                while producer.try_send(value).is_err() {
                    thread::yield_now();
                }
            }
        });

        let mut received = Vec::new();
        while received.len() < 10 {
            if let Some(v) = ch.try_recv() {
                received.push(v);
            } else {
                thread::yield_now();
            }
        }
        handle.join().unwrap();

        let expected: Vec<u64> = (0..10).map(|j| 42 + 11 * j).collect();
        assert_eq!(received, expected);
    }

    #[test]
    fn clear_resets_an_occupied_channel() {
        let mut ch = SpscSingle::<u64>::new();
        ch.try_send(7).unwrap();
        ch.clear();
        assert!(!ch.is_full());
        assert!(ch.try_send(8).is_ok());
        assert_eq!(ch.try_recv(), Some(8));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "requires Drop")]
    fn drop_bearing_element_type_is_rejected() {
        static DROPS: AtomicUsize = AtomicUsize::new(0);
        struct NoisyDrop;
        impl Drop for NoisyDrop {
            fn drop(&mut self) {
                DROPS.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            }
        }

        let _ = SpscSingle::<NoisyDrop>::new();
    }

    #[test]
    fn channel_dropped_while_occupied_abandons_the_element_without_panicking() {
        let ch = SpscSingle::<u64>::new();
        ch.try_send(99).unwrap();
        drop(ch); // value is abandoned, not dropped in place
    }
}
