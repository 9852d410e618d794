use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use ordered_float::OrderedFloat;

use crate::{Error, Event};

/// Entry type stored in the future event list: the event itself plus the
/// insertion sequence number used to break ties among equal timestamps.
#[derive(Debug)]
struct FelEntry {
    time: Reverse<OrderedFloat<f64>>,
    seq: Reverse<u64>,
    event: Event,
}

impl PartialEq for FelEntry {
    fn eq(&self, other: &Self) -> bool {
        self.time == other.time && self.seq == other.seq
    }
}

impl Eq for FelEntry {}

impl PartialOrd for FelEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FelEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.time
            .cmp(&other.time)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

/// The future event list (FEL): a time-ordered multiset of pending events.
///
/// Ordering is by timestamp ascending; events with equal timestamps come
/// out in insertion order. The FIFO tie-break is part of the contract —
/// changing it changes which statistics a seeded run produces.
///
/// Backed by a binary heap, so insertion and removal are logarithmic in the
/// number of pending events. A linear scan over an unsorted list satisfies
/// the same contract at low event volumes.
#[derive(Debug, Default)]
pub struct FutureEventList {
    heap: BinaryHeap<FelEntry>,
    next_seq: u64,
}

impl FutureEventList {
    /// Inserts a pending event. The event must not be mutated afterwards,
    /// which its by-value ownership enforces.
    pub fn insert(&mut self, event: Event) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(FelEntry {
            time: Reverse(OrderedFloat(event.time)),
            seq: Reverse(seq),
            event,
        });
    }

    /// Returns the pending event with the smallest timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyEventList`] if no events are pending.
    pub fn peek_min(&self) -> Result<&Event, Error> {
        self.heap
            .peek()
            .map(|entry| &entry.event)
            .ok_or(Error::EmptyEventList)
    }

    /// Removes and returns the pending event with the smallest timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyEventList`] if no events are pending.
    pub fn remove_min(&mut self) -> Result<Event, Error> {
        self.heap
            .pop()
            .map(|entry| entry.event)
            .ok_or(Error::EmptyEventList)
    }

    /// Number of pending events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// `true` if no events are pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::EventKind;

    use quickcheck_macros::quickcheck;

    #[test]
    fn test_empty_list_errors() {
        let mut fel = FutureEventList::default();
        assert!(fel.is_empty());
        assert_eq!(fel.peek_min(), Err(Error::EmptyEventList));
        assert_eq!(fel.remove_min(), Err(Error::EmptyEventList));
    }

    #[test]
    fn test_orders_by_time() {
        let mut fel = FutureEventList::default();
        fel.insert(Event::arrival(3.0));
        fel.insert(Event::departure(1.0));
        fel.insert(Event::arrival(2.0));
        assert_eq!(fel.len(), 3);

        assert_eq!(fel.peek_min(), Ok(&Event::departure(1.0)));
        assert_eq!(fel.remove_min(), Ok(Event::departure(1.0)));
        assert_eq!(fel.remove_min(), Ok(Event::arrival(2.0)));
        assert_eq!(fel.remove_min(), Ok(Event::arrival(3.0)));
        assert!(fel.is_empty());
    }

    #[test]
    fn test_equal_timestamps_pop_in_insertion_order() {
        let mut fel = FutureEventList::default();
        fel.insert(Event::departure(1.0));
        fel.insert(Event::arrival(1.0));
        fel.insert(Event::departure(1.0));

        assert_eq!(fel.remove_min().unwrap().kind, EventKind::Departure);
        assert_eq!(fel.remove_min().unwrap().kind, EventKind::Arrival);
        assert_eq!(fel.remove_min().unwrap().kind, EventKind::Departure);
    }

    #[quickcheck]
    fn test_pops_non_decreasing(times: Vec<u32>) -> bool {
        let mut fel = FutureEventList::default();
        for &t in &times {
            fel.insert(Event::arrival(f64::from(t) / 16.0));
        }
        let mut last = f64::NEG_INFINITY;
        while let Ok(event) = fel.remove_min() {
            if event.time < last {
                return false;
            }
            last = event.time;
        }
        fel.is_empty()
    }
}
