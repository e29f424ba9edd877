use std::hint;
use std::thread;

/// Adaptive backoff strategy (crossbeam-style) for callers layering a
/// spin/yield retry loop on top of `try_send`/`try_recv`.
///
/// `spec.md` §5 is explicit that the channels themselves expose no blocking
/// primitives: "Callers implementing blocking behavior layer a spin loop,
/// yield, or park on top." `Backoff` is that layer — the channel types never
/// construct or call one internally.
///
/// Progressively increases wait time: spin with PAUSE → yield to OS → give up.
#[derive(Debug)]
pub struct Backoff {
    step: u32,
}

impl Backoff {
    const SPIN_LIMIT: u32 = 6; // 2^6 = 64 spins max before yielding
    const YIELD_LIMIT: u32 = 10; // Then give up

    /// Creates a new backoff instance.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self { step: 0 }
    }

    /// Light spin with PAUSE hints.
    #[inline]
    pub fn spin(&mut self) {
        let spins = 1 << self.step.min(Self::SPIN_LIMIT);
        for _ in 0..spins {
            hint::spin_loop();
        }
        if self.step <= Self::SPIN_LIMIT {
            self.step += 1;
        }
    }

    /// Heavier backoff: spin then yield.
    #[inline]
    pub fn snooze(&mut self) {
        if self.step <= Self::SPIN_LIMIT {
            self.spin();
        } else {
            thread::yield_now();
            if self.step <= Self::YIELD_LIMIT {
                self.step += 1;
            }
        }
    }

    /// Returns true once the backoff has exhausted its patience; callers
    /// typically fall back to parking or give up after this.
    #[inline]
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.step > Self::YIELD_LIMIT
    }

    /// Reset for the next wait cycle.
    #[inline]
    pub fn reset(&mut self) {
        self.step = 0;
    }
}

impl Default for Backoff {
    fn default() -> Self {
        Self::new()
    }
}
