//! weave-channels — the inter-thread message-passing substrate for a
//! work-stealing task runtime.
//!
//! Two channel variants, both non-blocking (`try_send`/`try_recv` only —
//! callers layer their own spin/yield/park loop with [`Backoff`] on top):
//!
//! - [`SpscSingle`]: a wait-free, capacity-one handoff between exactly one
//!   producer and one consumer. Used to pass a single stolen task, or a
//!   steal request, between two specific threads.
//! - [`MpscBounded`]: a bounded ring with a producer-side mutex and a
//!   lock-free consumer. Used as a worker's inbound task/steal-request
//!   mailbox, fed by any number of other workers.
//!
//! Out of scope (consumers of these interfaces, not specified here): the
//! task scheduler, work-stealing policy, thread bootstrapping, flowvar/
//! future machinery, parallel-for decomposition, and any public runtime API.
//!
//! # Example
//!
//! ```
//! use weave_channels::{MpscBounded, SpscSingle};
//!
//! // Steal handoff: exactly one thief, one victim.
//! let handoff = SpscSingle::<u64>::new();
//! handoff.try_send(42).unwrap();
//! assert_eq!(handoff.try_recv(), Some(42));
//!
//! // Worker mailbox: any number of senders, one owning worker.
//! let mailbox = MpscBounded::<u64>::new(64).unwrap();
//! mailbox.try_send(7).unwrap();
//! assert_eq!(mailbox.try_recv(), Some(7));
//! ```

mod backoff;
mod cache_pad;
mod config;
mod error;
mod invariants;
mod metrics;
mod mpsc_bounded;
mod spsc_single;

pub use backoff::Backoff;
pub use config::Config;
pub use error::ChannelError;
pub use metrics::Metrics;
pub use mpsc_bounded::MpscBounded;
pub use spsc_single::SpscSingle;
