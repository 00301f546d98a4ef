//! Indexed priority queue and time-ordered event scheduling.
//!
//! [`DynamicPriorityQueue`] is a binary max-heap whose items can be
//! addressed after insertion, either by a permanent [`Serial`] or by a
//! stable storage [`Index`]. Items can be mutated in place and re-heapified,
//! or removed from arbitrary positions, in O(log n).
//!
//! [`EventScheduler`] layers a min-time ordering on top of the queue for
//! discrete-event loops.
//!
//! # Layout
//!
//! ```text
//! DynamicPriorityQueue
//! ├── slots: Vec<Option<Slot>>     index    → item + serial
//! ├── heap: Vec<Index>             position → index  (tail = free indices)
//! ├── position_map: Vec<usize>     index    → position
//! └── index_map: IndexMap          serial   → index
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod compare;
pub mod dynamic;
pub mod error;
pub mod scheduler;

pub use compare::{Compare, MinOrder, NaturalOrder};
pub use dynamic::{DynamicPriorityQueue, Index, Serial};
pub use error::QueueError;
pub use scheduler::{EventId, EventScheduler};
