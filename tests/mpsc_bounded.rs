//! Integration tests for the MPSC-Bounded channel's end-to-end scenarios
//! (spec.md §8, S3-S6). Grounded in the teacher's
//! `tests/integration_tests.rs::test_fifo_ordering_multi_producer`: an
//! `Arc<Channel<T>>` shared across spawned producer threads, drained by a
//! busy-polling consumer on the main thread.

use std::sync::Arc;
use std::thread;
use weave_channels::{ChannelError, MpscBounded};

/// S3: capacity=2, single sender, ten values. At no point are more than 2
/// elements buffered; output preserves send order.
#[test]
fn s3_capacity_two_single_sender_stays_within_bound() {
    let channel = MpscBounded::<u64>::new(2).unwrap();
    let expected: Vec<u64> = (0..10).map(|j| 42 + 11 * j).collect();
    let mut received = Vec::new();
    let mut pending = expected.iter();
    let mut next = pending.next();

    while received.len() < expected.len() {
        if let Some(&value) = next {
            if channel.try_send(value).is_ok() {
                assert!(channel.len() <= 2);
                next = pending.next();
                continue;
            }
        }
        if let Some(v) = channel.try_recv() {
            received.push(v);
        }
    }

    assert_eq!(received, expected);
}

/// S4: capacity=10, single sender, same ten values: send-then-drain works
/// identically to the interleaved S3 case.
#[test]
fn s4_capacity_ten_single_sender() {
    let channel = MpscBounded::<u64>::new(10).unwrap();
    let expected: Vec<u64> = (0..10).map(|j| 42 + 11 * j).collect();
    for &v in &expected {
        assert!(channel.try_send(v).is_ok());
    }

    let mut received = Vec::new();
    while let Some(v) = channel.try_recv() {
        received.push(v);
    }
    assert_eq!(received, expected);
}

/// S5: 4 producers each send 25 values into a capacity-8 channel. The
/// received multiset equals the union of the four ranges, and each
/// producer's values appear in ascending order within the stream.
#[test]
fn s5_multi_producer_merge_preserves_per_producer_order() {
    const PRODUCERS: u64 = 4;
    const PER_PRODUCER: u64 = 25;

    let channel = Arc::new(MpscBounded::<u64>::new(8).unwrap());
    let handles: Vec<_> = (0..PRODUCERS)
        .map(|p| {
            let channel = Arc::clone(&channel);
            thread::spawn(move || {
                for i in 0..PER_PRODUCER {
                    let value = p * 100 + i;
                    while channel.try_send(value).is_err() {
                        thread::yield_now();
                    }
                }
            })
        })
        .collect();

    let mut received = Vec::new();
    while received.len() < (PRODUCERS * PER_PRODUCER) as usize {
        if let Some(v) = channel.try_recv() {
            received.push(v);
        } else {
            thread::yield_now();
        }
    }
    for handle in handles {
        handle.join().unwrap();
    }

    let mut sorted = received.clone();
    sorted.sort_unstable();
    let mut expected: Vec<u64> = (0..PRODUCERS)
        .flat_map(|p| (0..PER_PRODUCER).map(move |i| p * 100 + i))
        .collect();
    expected.sort_unstable();
    assert_eq!(sorted, expected, "received multiset does not match union of sends");

    for p in 0..PRODUCERS {
        let base = p * 100;
        let this_producer: Vec<u64> = received
            .iter()
            .copied()
            .filter(|&v| v >= base && v < base + PER_PRODUCER)
            .collect();
        let mut in_order = this_producer.clone();
        in_order.sort_unstable();
        assert_eq!(this_producer, in_order, "producer {p} values out of send order");
    }
}

/// S6: capacity=3, 20 sends interleaved with 20 receives. All values
/// delivered in order; the index range crosses `2*capacity` at least twice.
#[test]
fn s6_wrap_crosses_double_capacity_boundary_repeatedly() {
    let channel = MpscBounded::<u64>::new(3).unwrap();
    let mut received = Vec::new();

    for i in 0..20u64 {
        assert!(channel.try_send(i).is_ok());
        received.push(channel.try_recv().unwrap());
    }

    assert_eq!(received, (0..20).collect::<Vec<u64>>());
}

/// Edge case: `capacity = 1` is legal and behaves like a single-slot
/// mailbox where producers contend for one lock.
#[test]
fn capacity_one_is_a_legal_single_slot_mailbox() {
    let channel = MpscBounded::<u64>::new(1).unwrap();
    assert!(channel.try_send(1).is_ok());
    assert_eq!(channel.try_send(2), Err(2));
    assert_eq!(channel.try_recv(), Some(1));
}

/// `capacity = 0` is a contract violation reported as a recoverable error,
/// not a panic (spec.md §7: "allocation failure... surfaced to caller").
#[test]
fn capacity_zero_is_rejected_as_invalid() {
    assert_eq!(
        MpscBounded::<u64>::new(0).unwrap_err(),
        ChannelError::InvalidCapacity { capacity: 0 }
    );
}
