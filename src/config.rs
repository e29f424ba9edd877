/// Configuration for [`crate::MpscBounded`].
///
/// SPSC-Single takes no configuration: its capacity is fixed at one by
/// `spec.md` §1, so there is nothing to tune.
#[derive(Debug, Clone, Copy)]
pub struct Config {
    /// Ring capacity (positive, fixed at initialization — spec.md §3).
    pub capacity: usize,
    /// Whether to maintain the debug-only send/recv counters in
    /// [`crate::Metrics`]. Disabled by default since it is pure overhead for
    /// a hot-path mailbox.
    pub enable_debug_counters: bool,
}

impl Config {
    /// Creates a new configuration.
    #[must_use]
    pub const fn new(capacity: usize, enable_debug_counters: bool) -> Self {
        Self {
            capacity,
            enable_debug_counters,
        }
    }
}

impl Default for Config {
    /// 256 slots, counters disabled — a reasonable default steal-request
    /// mailbox size for a worker pool in the tens of threads.
    fn default() -> Self {
        Self {
            capacity: 256,
            enable_debug_counters: false,
        }
    }
}
