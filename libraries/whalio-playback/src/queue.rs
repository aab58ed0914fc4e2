//! Play queue
//!
//! Ordered list of track ids plus a cursor. The queue is replaced wholesale on
//! every playback intent (single track or whole album); it never appends.

use crate::error::{PlaybackError, Result};
use crate::types::TrackId;

/// Navigation direction for [`Queue::advance`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Prev,
}

/// Result of a navigation step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Cursor moved; carries the id now under the cursor
    Moved(TrackId),

    /// `Next` on the last item (no wraparound)
    Exhausted,

    /// `Prev` on the first item
    AtStart,
}

/// Play queue
///
/// Structure:
/// ```text
///   items:  [10, 20, 30]
///   cursor:       ^ Some(1)
/// ```
///
/// The cursor is `None` only when no track has been activated, which is
/// always the case for an empty queue.
#[derive(Debug, Clone, Default)]
pub struct Queue {
    items: Vec<TrackId>,
    cursor: Option<usize>,
}

impl Queue {
    /// Create new empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole queue
    ///
    /// The cursor lands on the first item, or `None` when `ids` is empty.
    /// Duplicates and unknown ids are accepted as-is.
    pub fn set_queue(&mut self, ids: Vec<TrackId>) {
        self.cursor = if ids.is_empty() { None } else { Some(0) };
        self.items = ids;
    }

    /// Step the cursor one item forward or backward
    pub fn advance(&mut self, direction: Direction) -> Advance {
        let Some(index) = self.cursor else {
            return match direction {
                Direction::Next => Advance::Exhausted,
                Direction::Prev => Advance::AtStart,
            };
        };

        let candidate = match direction {
            Direction::Next if index + 1 >= self.items.len() => return Advance::Exhausted,
            Direction::Prev if index == 0 => return Advance::AtStart,
            Direction::Next => index + 1,
            Direction::Prev => index - 1,
        };

        self.cursor = Some(candidate);
        Advance::Moved(self.items[candidate])
    }

    /// Jump to `index`
    ///
    /// Fails with [`PlaybackError::OutOfRange`] without touching the cursor.
    pub fn play_at(&mut self, index: usize) -> Result<TrackId> {
        let id = *self.items.get(index).ok_or(PlaybackError::OutOfRange {
            index,
            len: self.items.len(),
        })?;
        self.cursor = Some(index);
        Ok(id)
    }

    /// Current cursor position
    pub fn index(&self) -> Option<usize> {
        self.cursor
    }

    /// Id under the cursor
    pub fn current(&self) -> Option<TrackId> {
        self.cursor.map(|i| self.items[i])
    }

    pub fn items(&self) -> &[TrackId] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[u32]) -> Vec<TrackId> {
        raw.iter().copied().map(TrackId).collect()
    }

    #[test]
    fn new_queue_has_no_cursor() {
        let queue = Queue::new();
        assert!(queue.is_empty());
        assert_eq!(queue.index(), None);
        assert_eq!(queue.current(), None);
    }

    #[test]
    fn set_queue_points_at_first_item() {
        let mut queue = Queue::new();
        queue.set_queue(ids(&[10, 20, 30]));

        assert_eq!(queue.index(), Some(0));
        assert_eq!(queue.current(), Some(TrackId(10)));
    }

    #[test]
    fn set_queue_replaces_instead_of_appending() {
        let mut queue = Queue::new();
        queue.set_queue(ids(&[1, 2, 3]));
        queue.advance(Direction::Next);
        queue.set_queue(ids(&[7]));

        assert_eq!(queue.items(), ids(&[7]).as_slice());
        assert_eq!(queue.index(), Some(0));
    }

    #[test]
    fn set_empty_queue_clears_cursor() {
        let mut queue = Queue::new();
        queue.set_queue(ids(&[1, 2]));
        queue.set_queue(Vec::new());

        assert_eq!(queue.index(), None);
    }

    #[test]
    fn duplicates_are_kept() {
        let mut queue = Queue::new();
        queue.set_queue(ids(&[5, 5, 5]));

        assert_eq!(queue.len(), 3);
        assert_eq!(queue.advance(Direction::Next), Advance::Moved(TrackId(5)));
        assert_eq!(queue.index(), Some(1));
    }

    #[test]
    fn next_walks_to_end_then_reports_exhaustion() {
        let mut queue = Queue::new();
        queue.set_queue(ids(&[10, 20, 30]));

        assert_eq!(queue.advance(Direction::Next), Advance::Moved(TrackId(20)));
        assert_eq!(queue.advance(Direction::Next), Advance::Moved(TrackId(30)));
        assert_eq!(queue.advance(Direction::Next), Advance::Exhausted);
        assert_eq!(queue.index(), Some(2));
    }

    #[test]
    fn prev_at_start_reports_at_start() {
        let mut queue = Queue::new();
        queue.set_queue(ids(&[10, 20]));

        assert_eq!(queue.advance(Direction::Prev), Advance::AtStart);
        assert_eq!(queue.index(), Some(0));

        queue.advance(Direction::Next);
        assert_eq!(queue.advance(Direction::Prev), Advance::Moved(TrackId(10)));
    }

    #[test]
    fn empty_queue_navigation() {
        let mut queue = Queue::new();
        assert_eq!(queue.advance(Direction::Next), Advance::Exhausted);
        assert_eq!(queue.advance(Direction::Prev), Advance::AtStart);
        assert_eq!(queue.index(), None);
    }

    #[test]
    fn play_at_out_of_range_keeps_cursor() {
        let mut queue = Queue::new();
        queue.set_queue(ids(&[10, 20, 30]));
        queue.play_at(1).unwrap();

        let err = queue.play_at(3).unwrap_err();
        assert!(matches!(err, PlaybackError::OutOfRange { index: 3, len: 3 }));
        assert_eq!(queue.index(), Some(1));
    }

    #[test]
    fn play_at_moves_cursor() {
        let mut queue = Queue::new();
        queue.set_queue(ids(&[10, 20, 30]));

        assert_eq!(queue.play_at(2).unwrap(), TrackId(30));
        assert_eq!(queue.index(), Some(2));
    }
}
