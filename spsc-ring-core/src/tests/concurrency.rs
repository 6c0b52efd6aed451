extern crate std;

use std::thread;

use crate::SpscQueue;

/// One producer sends `0..count`, one consumer checks every value arrives
/// exactly once and in order.
fn transfer_in_order<const N: usize>(count: u32) {
    let mut queue = SpscQueue::<u32, N>::new();
    let (producer, consumer) = queue.split();

    thread::scope(|s| {
        let reader = s.spawn(move || {
            let mut expected = 0u32;
            while expected < count {
                match consumer.try_dequeue() {
                    Some(v) => {
                        assert_eq!(v, expected, "gap, duplicate or reorder");
                        expected += 1;
                    }
                    None => std::hint::spin_loop(),
                }
            }
            assert_eq!(consumer.try_dequeue(), None, "extra value after the last one");
        });

        let writer = s.spawn(move || {
            for i in 0..count {
                let mut value = i;
                while let Err(back) = producer.try_enqueue(value) {
                    value = back;
                    thread::yield_now();
                }
            }
        });

        writer.join().expect("producer panicked");
        reader.join().expect("consumer panicked");
    });

    assert!(queue.is_empty());
}

/// Ten million values through a 1024-slot queue.
#[test]
fn no_loss_ten_million() {
    transfer_in_order::<1024>(10_000_000);
}

/// Smallest queue: every enqueue races the full boundary.
#[test]
fn no_loss_two_slots() {
    transfer_in_order::<2>(200_000);
}

#[test]
fn no_loss_small_queue() {
    transfer_in_order::<8>(1_000_000);
}

/// Payloads wider than a machine word must never be observed half-written.
#[test]
fn wide_payload_is_never_torn() {
    let mut queue = SpscQueue::<[u64; 8], 64>::new();
    let (producer, consumer) = queue.split();
    let count = 200_000u64;

    thread::scope(|s| {
        s.spawn(move || {
            for i in 0..count {
                while producer.try_enqueue([i; 8]).is_err() {
                    std::hint::spin_loop();
                }
            }
        });

        s.spawn(move || {
            let mut expected = 0u64;
            while expected < count {
                if let Some(block) = consumer.try_dequeue() {
                    assert!(block.iter().all(|&w| w == expected), "torn read: {block:?}");
                    expected += 1;
                }
            }
        });
    });
}

/// Owned handles moved into plain spawned threads.
#[cfg(feature = "alloc")]
#[test]
fn owned_split_across_spawned_threads() {
    let (producer, consumer) = SpscQueue::<usize, 64>::new().into_split();
    let num_items: usize = 100_000;

    let writer = thread::spawn(move || {
        for i in 0..num_items {
            while producer.try_enqueue(i).is_err() {
                thread::yield_now();
            }
        }
    });

    let reader = thread::spawn(move || {
        let mut received = std::vec::Vec::with_capacity(num_items);
        while received.len() < num_items {
            if let Some(v) = consumer.try_dequeue() {
                received.push(v);
            }
        }
        received
    });

    writer.join().expect("producer panicked");
    let received = reader.join().expect("consumer panicked");
    assert!(received.iter().copied().eq(0..num_items));
}
