/// Debug-only send/recv counters for [`crate::MpscBounded`].
///
/// Trimmed from `ringmpsc_rs::metrics::Metrics` down to the counters that
/// make sense for a single shared buffer rather than a per-producer ring:
/// there is no `batches_sent`/`reserve_spins` here because this crate has no
/// batch reservation API (spec.md only specifies single-item `try_send`/
/// `try_recv`).
#[derive(Debug, Clone, Copy, Default)]
pub struct Metrics {
    /// Successful `try_send` calls.
    pub sends_ok: u64,
    /// `try_send` calls that observed the channel full.
    pub sends_rejected_full: u64,
    /// Successful `try_recv` calls.
    pub recvs_ok: u64,
    /// `try_recv` calls that observed the channel empty.
    pub recvs_rejected_empty: u64,
}

impl Metrics {
    /// Creates a zeroed counter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}
