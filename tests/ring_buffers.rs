use proptest::prelude::*;
use rosu_sr::{Error, LimitedQueue, ReverseQueue};

#[test]
fn reverse_queue_rejects_zero_capacity() {
    let err = ReverseQueue::<f64>::with_capacity(0).unwrap_err();

    assert_eq!(err, Error::InvalidCapacity);
    assert_eq!(err.to_string(), "queue capacity must be greater than zero");
}

#[test]
fn reverse_queue_history() {
    let mut history = ReverseQueue::with_capacity(3).unwrap();
    assert!(history.is_empty());

    for time in [100.0, 200.0, 300.0, 400.0] {
        history.enqueue(time);
    }

    assert!(history.is_full());
    assert_eq!(history.capacity(), 3);
    assert_eq!(history[0], 400.0);
    assert_eq!(history[2], 200.0);
    assert_eq!(
        history.try_get(3),
        Err(Error::IndexOutOfBounds { idx: 3, len: 3 })
    );

    assert_eq!(history.dequeue(), Some(200.0));
    assert_eq!(history.len(), 2);

    history.clear();
    assert_eq!(history.get(0), None);
}

#[test]
#[should_panic(expected = "out of bounds")]
fn reverse_queue_index_panics() {
    let mut history = ReverseQueue::with_capacity(2).unwrap();
    history.enqueue(1);

    let _ = history[1];
}

#[test]
fn limited_queue_keeps_latest() {
    let mut queue = LimitedQueue::<u32, 3>::new();

    for i in 0..5 {
        queue.push(i);
    }

    assert!(queue.is_full());
    assert_eq!(queue.last(), Some(&4));
    assert!(queue.iter().copied().eq([2, 3, 4]));
}

proptest! {
    #[test]
    fn limited_queue_retains_tail(values in prop::collection::vec(any::<u16>(), 0..64)) {
        let mut queue = LimitedQueue::<u16, 8>::new();

        for &value in values.iter() {
            queue.push(value);
        }

        let skip = values.len().saturating_sub(8);

        prop_assert_eq!(queue.len(), values.len() - skip);
        prop_assert!(queue.iter().eq(values[skip..].iter()));

        for (i, value) in values[skip..].iter().enumerate() {
            prop_assert_eq!(queue.get(i), Some(value));
        }
    }

    #[test]
    fn queues_agree(values in prop::collection::vec(any::<u16>(), 1..64)) {
        let mut limited = LimitedQueue::<u16, 5>::new();
        let mut reverse = ReverseQueue::with_capacity(5).unwrap();

        for &value in values.iter() {
            limited.push(value);
            reverse.enqueue(value);
        }

        prop_assert_eq!(limited.len(), reverse.len());
        prop_assert!(limited.iter().rev().eq(reverse.iter()));
        prop_assert_eq!(limited.last(), reverse.get(0));
    }
}
