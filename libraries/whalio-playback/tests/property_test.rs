//! Property-based tests for the queue and transport formatting
//!
//! Uses proptest to verify invariants across many random inputs.

use proptest::prelude::*;
use whalio_playback::{
    format_clock, seek_fraction, Advance, Direction, Queue, TrackId,
};

// ===== Helpers =====

fn arbitrary_ids() -> impl Strategy<Value = Vec<TrackId>> {
    prop::collection::vec((0u32..1000).prop_map(TrackId), 0..40)
}

#[derive(Debug, Clone)]
enum Op {
    Next,
    Prev,
    Jump(usize),
}

fn arbitrary_ops() -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(
        prop_oneof![
            Just(Op::Next),
            Just(Op::Prev),
            (0usize..60).prop_map(Op::Jump),
        ],
        0..100,
    )
}

// ===== Property Tests =====

proptest! {
    /// Property: the cursor is either absent on an empty queue or a valid index
    #[test]
    fn cursor_always_in_bounds(ids in arbitrary_ids(), ops in arbitrary_ops()) {
        let mut queue = Queue::new();
        queue.set_queue(ids.clone());

        for op in ops {
            match op {
                Op::Next => { queue.advance(Direction::Next); }
                Op::Prev => { queue.advance(Direction::Prev); }
                Op::Jump(index) => { queue.play_at(index).ok(); }
            }

            match queue.index() {
                Some(index) => prop_assert!(index < queue.len()),
                None => prop_assert!(queue.is_empty()),
            }
        }

        prop_assert_eq!(queue.items(), ids.as_slice());
    }

    /// Property: a reported move always lands on the id under the new cursor
    #[test]
    fn moves_report_current_id(ids in arbitrary_ids(), ops in arbitrary_ops()) {
        let mut queue = Queue::new();
        queue.set_queue(ids);

        for op in ops {
            let before = queue.index();
            let step = match op {
                Op::Next => queue.advance(Direction::Next),
                Op::Prev => queue.advance(Direction::Prev),
                Op::Jump(_) => continue,
            };

            match step {
                Advance::Moved(id) => prop_assert_eq!(queue.current(), Some(id)),
                Advance::Exhausted | Advance::AtStart => prop_assert_eq!(queue.index(), before),
            }
        }
    }

    /// Property: walking forward visits every item once, in order
    #[test]
    fn forward_walk_visits_queue_in_order(ids in arbitrary_ids()) {
        let mut queue = Queue::new();
        queue.set_queue(ids.clone());

        let mut visited: Vec<TrackId> = queue.current().into_iter().collect();
        while let Advance::Moved(id) = queue.advance(Direction::Next) {
            visited.push(id);
        }

        prop_assert_eq!(visited, ids);
    }

    /// Property: out-of-range jumps never move the cursor
    #[test]
    fn out_of_range_jump_keeps_cursor(ids in arbitrary_ids(), extra in 0usize..10) {
        let mut queue = Queue::new();
        queue.set_queue(ids);
        let before = queue.index();

        let index = queue.len() + extra;
        prop_assert!(queue.play_at(index).is_err());
        prop_assert_eq!(queue.index(), before);
    }

    /// Property: the seek fraction is always a usable slider value
    #[test]
    fn seek_fraction_in_unit_range(
        position in prop::num::f64::ANY,
        duration in proptest::option::of(prop::num::f64::ANY),
    ) {
        let fraction = seek_fraction(position, duration);
        prop_assert!(fraction.is_finite());
        prop_assert!((0.0..=1.0).contains(&fraction));
    }

    /// Property: clock readouts are always `m:ss`
    #[test]
    fn clock_is_minutes_and_two_digit_seconds(seconds in prop::num::f64::ANY) {
        let text = format_clock(seconds);
        let (minutes, secs) = text.split_once(':').expect("colon separator");
        prop_assert!(minutes.parse::<u64>().is_ok());
        prop_assert_eq!(secs.len(), 2);
        prop_assert!(secs.parse::<u8>().map(|s| s < 60).unwrap_or(false));
    }
}
