//! Time-ordered event scheduling on top of [`DynamicPriorityQueue`].

use std::cmp::Ordering;

use crate::compare::Compare;
use crate::dynamic::{DynamicPriorityQueue, Serial};
use crate::error::QueueError;

/// Handle of a scheduled event. Equal to the serial of its queue entry.
pub type EventId = Serial;

#[derive(Debug)]
struct Scheduled<E> {
    time: f64,
    /// Insertion sequence number; breaks ties between equal times.
    seq: u64,
    event: E,
}

/// Earliest time first; equal times pop in insertion order.
#[derive(Clone, Copy, Debug, Default)]
struct EarliestFirst;

impl<E> Compare<Scheduled<E>> for EarliestFirst {
    fn compare(&self, a: &Scheduled<E>, b: &Scheduled<E>) -> Ordering {
        b.time
            .total_cmp(&a.time)
            .then_with(|| b.seq.cmp(&a.seq))
    }
}

/// A discrete-event scheduler: events are popped in non-decreasing time.
///
/// Events keep their [`EventId`] while rescheduled with
/// [`update`](Self::update), so owners can hold on to the id across
/// reschedules. Ordering is deterministic: ties on time pop in the order
/// the events were first added.
///
/// Event times must not be NaN.
///
/// # Examples
///
/// ```
/// use brume_queue::EventScheduler;
///
/// let mut s = EventScheduler::new();
/// let late = s.add(2.0, "late");
/// s.add(1.0, "early");
/// s.update(late, 0.5).unwrap();
///
/// assert_eq!(s.pop().map(|(_, t, e)| (t, e)), Some((0.5, "late")));
/// assert_eq!(s.next_time(), 1.0);
/// ```
#[derive(Debug)]
pub struct EventScheduler<E> {
    queue: DynamicPriorityQueue<Scheduled<E>, EarliestFirst>,
    next_seq: u64,
}

impl<E> EventScheduler<E> {
    /// Create an empty scheduler.
    pub fn new() -> Self {
        Self {
            queue: DynamicPriorityQueue::with_comparator(EarliestFirst),
            next_seq: 0,
        }
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// True if no event is pending.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Schedule `event` at `time`.
    pub fn add(&mut self, time: f64, event: E) -> EventId {
        debug_assert!(!time.is_nan(), "event time must not be NaN");
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Scheduled { time, seq, event })
    }

    /// Time of the earliest pending event, or `f64::INFINITY` if none.
    pub fn next_time(&self) -> f64 {
        self.queue.peek_top().map_or(f64::INFINITY, |s| s.time)
    }

    /// The earliest pending event without removing it.
    pub fn peek(&self) -> Option<(EventId, f64, &E)> {
        let id = self.queue.top_serial()?;
        let scheduled = self.queue.peek_top()?;
        Some((id, scheduled.time, &scheduled.event))
    }

    /// Remove and return the earliest pending event.
    pub fn pop(&mut self) -> Option<(EventId, f64, E)> {
        let id = self.queue.top_serial()?;
        let scheduled = self.queue.pop_top()?;
        Some((id, scheduled.time, scheduled.event))
    }

    /// The scheduled time and payload of `id`.
    pub fn get(&self, id: EventId) -> Result<(f64, &E), QueueError> {
        let scheduled = self.queue.get_by_serial(id)?;
        Ok((scheduled.time, &scheduled.event))
    }

    /// Reschedule `id` to `time`, keeping its id.
    pub fn update(&mut self, id: EventId, time: f64) -> Result<(), QueueError> {
        debug_assert!(!time.is_nan(), "event time must not be NaN");
        let index = self.queue.get_index(id)?;
        self.queue.get_mut(index)?.time = time;
        self.queue.move_item(index)
    }

    /// Cancel `id` and return its payload.
    pub fn remove(&mut self, id: EventId) -> Result<E, QueueError> {
        self.queue.pop_item(id).map(|s| s.event)
    }

    /// Cancel every pending event.
    pub fn clear(&mut self) {
        self.queue.clear();
    }
}

impl<E> Default for EventScheduler<E> {
    fn default() -> Self {
        Self::new()
    }
}
