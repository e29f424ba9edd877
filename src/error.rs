use thiserror::Error;

/// Errors surfaced by channel construction.
///
/// `spec.md` §7 treats allocation failure as fatal and contract violations
/// (e.g. `capacity <= 0`) as programmer error; both are reported here rather
/// than panicking, mirroring `ringmpsc_rs::channel::ChannelError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ChannelError {
    /// `MpscBounded::new` was called with a non-positive capacity.
    #[error("MPSC-Bounded capacity must be positive, got {capacity}")]
    InvalidCapacity {
        /// The rejected capacity.
        capacity: usize,
    },
}
