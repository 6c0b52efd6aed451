extern crate std;

use std::thread;

use crate::{Dequeue, Enqueue, SpscQueue};

#[test]
fn split_handles_share_one_queue() {
    let mut queue = SpscQueue::<u32, 8>::new();
    let (producer, consumer) = queue.split();

    assert_eq!(producer.capacity(), 7);
    assert!(consumer.is_empty());

    producer.try_enqueue(10).unwrap();
    producer.try_enqueue(11).unwrap();
    assert_eq!(consumer.len(), 2);
    assert_eq!(consumer.try_dequeue(), Some(10));
    assert_eq!(consumer.try_dequeue(), Some(11));
    assert_eq!(consumer.try_dequeue(), None);
}

#[test]
fn queue_usable_again_after_handles_drop() {
    let mut queue = SpscQueue::<u32, 4>::new();
    {
        let (producer, _consumer) = queue.split();
        producer.try_enqueue(1).unwrap();
    }
    assert_eq!(queue.try_dequeue(), Some(1));
}

#[test]
fn concrete_scenario_through_handles() {
    let mut queue = SpscQueue::<i32, 8>::new();
    let (mut producer, mut consumer) = queue.split();

    for v in 1..=7 {
        assert!(Enqueue::try_enqueue(&mut producer, v).is_ok());
    }
    assert!(producer.is_full());
    assert_eq!(producer.try_enqueue(8), Err(8));
    assert_eq!(Dequeue::try_dequeue(&mut consumer), Some(1));
    assert!(producer.try_enqueue(8).is_ok());

    let mut rest = std::vec::Vec::new();
    while let Some(v) = consumer.try_dequeue() {
        rest.push(v);
    }
    assert_eq!(rest, [2, 3, 4, 5, 6, 7, 8]);
}

#[test]
fn scoped_threads_with_borrowed_handles() {
    let mut queue = SpscQueue::<u64, 16>::new();
    let (producer, consumer) = queue.split();
    let total = 10_000u64;

    let sum = thread::scope(|s| {
        s.spawn(move || {
            for i in 0..total {
                while producer.try_enqueue(i).is_err() {
                    std::hint::spin_loop();
                }
            }
        });

        let reader = s.spawn(move || {
            let mut sum = 0u64;
            let mut seen = 0u64;
            while seen < total {
                if let Some(v) = consumer.try_dequeue() {
                    assert_eq!(v, seen);
                    sum += v;
                    seen += 1;
                } else {
                    std::hint::spin_loop();
                }
            }
            sum
        });
        reader.join().expect("consumer panicked")
    });

    assert_eq!(sum, total * (total - 1) / 2);
    assert!(queue.is_empty());
}

#[cfg(feature = "alloc")]
#[test]
fn owned_handles_drop_remaining_values() {
    use std::sync::Arc;

    let tracker = Arc::new(());
    let (producer, consumer) = SpscQueue::<Arc<()>, 8>::new().into_split();
    producer.try_enqueue(Arc::clone(&tracker)).unwrap();
    producer.try_enqueue(Arc::clone(&tracker)).unwrap();
    assert_eq!(Arc::strong_count(&tracker), 3);

    drop(producer);
    assert_eq!(consumer.len(), 2);
    drop(consumer);
    assert_eq!(Arc::strong_count(&tracker), 1);
}
