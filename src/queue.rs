use std::collections::VecDeque;

use crate::{Error, Event};

/// The waiting line: a strict FIFO of the arrival events of all customers
/// that have entered the system and not yet departed. The head of the line
/// is the customer currently in service.
///
/// This is deliberately a separate type from [`FutureEventList`]: the line
/// preserves arrival order, the event list preserves timestamp order, and
/// neither invariant may leak into the other.
///
/// [`FutureEventList`]: crate::FutureEventList
#[derive(Debug, Default)]
pub struct WaitingLine {
    inner: VecDeque<Event>,
}

impl WaitingLine {
    /// Appends an arriving customer to the back of the line.
    pub fn push(&mut self, event: Event) {
        self.inner.push_back(event);
    }

    /// Removes and returns the customer at the head of the line, i.e. the
    /// one whose service is completing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyWaitingLine`] if the line is empty. The caller
    /// must treat this as a fatal sequencing bug, never as a no-op.
    pub fn pop(&mut self) -> Result<Event, Error> {
        self.inner.pop_front().ok_or(Error::EmptyWaitingLine)
    }

    /// Number of customers in the system (waiting plus in service).
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// `true` if no customer is in the system.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
