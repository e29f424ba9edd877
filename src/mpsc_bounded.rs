//! Bounded, multi-producer/single-consumer channel with a producer-side
//! mutex and a lock-free consumer.
//!
//! Used as a worker's inbound steal-request or task mailbox: any number of
//! threads may call `try_send`, but only one thread may call `try_recv`. See
//! `spec.md` §4.2.

use crate::cache_pad::CachePadded;
use crate::config::Config;
use crate::error::ChannelError;
use crate::invariants::{
    debug_assert_bounded_occupancy, debug_assert_distinct_cache_lines, debug_assert_no_drop_glue,
};
use crate::metrics::Metrics;
use std::cell::UnsafeCell;
use std::mem::MaybeUninit;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

/// A bounded MPSC channel using the `[0, 2*capacity)` double-range index
/// trick (spec.md §3) to distinguish empty from full without a separate
/// counter and without reserving a slot.
pub struct MpscBounded<T> {
    /// Serializes producers. The critical section is a bounded store plus
    /// an index update, so a standard OS mutex is sufficient (spec.md §9).
    back_lock: CachePadded<Mutex<()>>,
    capacity: usize,
    enable_debug_counters: bool,
    buffer: Box<[UnsafeCell<MaybeUninit<T>>]>,
    /// Written by the sole consumer, read by producers.
    front: CachePadded<AtomicUsize>,
    /// Written by producers (serialized by `back_lock`), read by the consumer.
    back: CachePadded<AtomicUsize>,
    counters: Counters,
}

#[derive(Default)]
struct Counters {
    sends_ok: AtomicU64,
    sends_rejected_full: AtomicU64,
    recvs_ok: AtomicU64,
    recvs_rejected_empty: AtomicU64,
}

// Safety: `buffer` slots in [front, back) are written by a producer holding
// `back_lock` and published via the release-store on `back`; they are read
// only by the single consumer after an acquire-load of `back` synchronizes
// with that release. Slots in [back, front) (the unused region) are never
// read. `front`/`back` themselves are plain atomics.
unsafe impl<T: Send> Send for MpscBounded<T> {}
unsafe impl<T: Send> Sync for MpscBounded<T> {}

#[inline]
fn abs_diff(back: usize, front: usize) -> usize {
    (back as isize - front as isize).unsigned_abs()
}

/// Number of occupied slots, correct across the `back`/`front` wrap
/// boundary. Unlike `abs_diff`, this is the true occupancy count, not just
/// a value that happens to coincide with `capacity` exactly when full.
#[inline]
fn occupancy(back: usize, front: usize, two_capacity: usize) -> usize {
    (back as isize - front as isize).rem_euclid(two_capacity as isize) as usize
}

#[inline]
fn slot_index(i: usize, capacity: usize) -> usize {
    if i < capacity {
        i
    } else {
        i - capacity
    }
}

#[inline]
fn advance(i: usize, two_capacity: usize) -> usize {
    let next = i + 1;
    if next == two_capacity {
        0
    } else {
        next
    }
}

impl<T> MpscBounded<T> {
    /// Creates a channel with the given capacity and default configuration
    /// (debug counters disabled).
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError::InvalidCapacity`] if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self, ChannelError> {
        Self::with_config(Config::new(capacity, false))
    }

    /// Creates a channel from an explicit [`Config`].
    ///
    /// # Errors
    ///
    /// Returns [`ChannelError::InvalidCapacity`] if `config.capacity` is zero.
    pub fn with_config(config: Config) -> Result<Self, ChannelError> {
        debug_assert_no_drop_glue!(T);
        if config.capacity == 0 {
            return Err(ChannelError::InvalidCapacity {
                capacity: config.capacity,
            });
        }

        let mut buffer = Vec::with_capacity(config.capacity);
        buffer.resize_with(config.capacity, || UnsafeCell::new(MaybeUninit::uninit()));

        let front = CachePadded::new(AtomicUsize::new(0));
        let back = CachePadded::new(AtomicUsize::new(0));
        debug_assert_distinct_cache_lines!(&front, &back);

        Ok(Self {
            back_lock: CachePadded::new(Mutex::new(())),
            capacity: config.capacity,
            enable_debug_counters: config.enable_debug_counters,
            buffer: buffer.into_boxed_slice(),
            front,
            back,
            counters: Counters::default(),
        })
    }

    #[inline]
    fn two_capacity(&self) -> usize {
        2 * self.capacity
    }

    /// Returns the fixed capacity this channel was constructed with.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the current number of sent-but-not-received elements.
    ///
    /// This is a snapshot; under concurrent producers it may be stale the
    /// instant it's returned.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        let back = self.back.load(Ordering::Acquire);
        let front = self.front.load(Ordering::Acquire);
        occupancy(back, front, self.two_capacity())
    }

    /// Returns true if no elements are currently buffered.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.front.load(Ordering::Acquire) == self.back.load(Ordering::Acquire)
    }

    /// Returns true if the channel is at capacity.
    #[inline]
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.len() == self.capacity
    }

    #[inline]
    fn bump(&self, counter: &AtomicU64) {
        if self.enable_debug_counters {
            counter.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Snapshot of the debug send/recv counters (zeroed if
    /// `enable_debug_counters` was not set).
    #[must_use]
    pub fn metrics(&self) -> Metrics {
        Metrics {
            sends_ok: self.counters.sends_ok.load(Ordering::Relaxed),
            sends_rejected_full: self.counters.sends_rejected_full.load(Ordering::Relaxed),
            recvs_ok: self.counters.recvs_ok.load(Ordering::Relaxed),
            recvs_rejected_empty: self.counters.recvs_rejected_empty.load(Ordering::Relaxed),
        }
    }

    /// Attempts to enqueue `value`. Any number of threads may call this
    /// concurrently.
    ///
    /// Returns `Ok(())` on success. Returns `Err(value)` — retaining
    /// ownership for the caller — if the channel was observably full at the
    /// linearization point (spec.md §4.2).
    pub fn try_send(&self, value: T) -> Result<(), T> {
        // 1. Fast-path fullness check, no lock held.
        let back = self.back.load(Ordering::Relaxed);
        let front = self.front.load(Ordering::Acquire);
        if abs_diff(back, front) == self.capacity {
            self.bump(&self.counters.sends_rejected_full);
            return Err(value);
        }

        // 2. Acquire back_lock, serializing producers.
        let _guard = self
            .back_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        // 3. Re-check fullness under the lock with a fresh read of both
        // indices: `front` can only have advanced since the fast-path read
        // (the sole consumer only moves it forward), so re-reading it can
        // only shrink the observed occupancy, never hide genuine fullness.
        let back = self.back.load(Ordering::Relaxed);
        let front = self.front.load(Ordering::Acquire);
        if abs_diff(back, front) == self.capacity {
            self.bump(&self.counters.sends_rejected_full);
            return Err(value);
        }

        // 4. Move `value` into the slot.
        let idx = slot_index(back, self.capacity);
        // SAFETY: `back_lock` serializes all producers, so we are the only
        // writer. This slot is outside [front, back) (it's the next slot to
        // be published), so the consumer cannot be reading it.
        unsafe {
            (*self.buffer[idx].get()).write(value);
        }

        // 5-6. Advance and publish `back`.
        let next = advance(back, self.two_capacity());
        debug_assert_bounded_occupancy!(occupancy(next, front, self.two_capacity()), self.capacity);
        self.back.store(next, Ordering::Release);

        self.bump(&self.counters.sends_ok);
        // 7. `_guard` releases `back_lock` here.
        Ok(())
    }

    /// Attempts to dequeue the next element. Only the single consumer
    /// thread may call this; it takes no lock.
    ///
    /// Returns `None` if the channel was observably empty at the
    /// linearization point.
    pub fn try_recv(&self) -> Option<T> {
        let front = self.front.load(Ordering::Relaxed);
        let back = self.back.load(Ordering::Acquire);
        if front == back {
            self.bump(&self.counters.recvs_rejected_empty);
            return None;
        }

        let idx = slot_index(front, self.capacity);
        // SAFETY: `front != back` means this slot was published by a
        // producer's release-store on `back`, synchronized-with by the
        // acquire-load above. We are the sole consumer.
        let value = unsafe { (*self.buffer[idx].get()).assume_init_read() };

        let next = advance(front, self.two_capacity());
        self.front.store(next, Ordering::Release);

        self.bump(&self.counters.recvs_ok);
        Some(value)
    }

    /// Resets the channel to empty.
    ///
    /// **Not thread-safe.** Assumes the caller has exclusive access (no
    /// producer or consumer thread is active). In-flight elements, if any,
    /// are abandoned rather than dropped.
    pub fn clear(&mut self) {
        *self.front.get_mut() = 0;
        *self.back.get_mut() = 0;
    }
}
