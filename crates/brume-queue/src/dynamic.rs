//! The [`DynamicPriorityQueue`] indexed binary heap.

use std::fmt;

use indexmap::IndexMap;

use crate::compare::{Compare, NaturalOrder};
use crate::error::QueueError;

/// Permanent identity of a queued item.
///
/// Issued once per [`push`](DynamicPriorityQueue::push) from a monotonic
/// counter and never reused, not even after [`clear`](DynamicPriorityQueue::clear).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Serial(pub u64);

impl fmt::Display for Serial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Storage slot of a queued item.
///
/// Stable for as long as the item stays queued, independent of its heap
/// position. A slot freed by a pop is recycled by a later push.
pub type Index = usize;

#[derive(Debug)]
struct Slot<T> {
    item: T,
    serial: Serial,
}

/// A binary max-heap addressable by serial and by storage index.
///
/// Items live in an arena of slots; the heap itself stores only slot
/// indices. `position_map` maps each index back to its heap position so
/// that any item can be re-sifted or removed in O(log n).
///
/// The heap order is defined by the comparator `C` (see [`Compare`]).
/// With the default [`NaturalOrder`] the greatest item is on top.
///
/// # Examples
///
/// ```
/// use brume_queue::{DynamicPriorityQueue, MinOrder};
///
/// let mut q = DynamicPriorityQueue::with_comparator(MinOrder);
/// let five = q.push(5);
/// q.push(1);
/// q.push(9);
///
/// // Lower the priority of `5` in place, then restore the heap.
/// let index = q.get_index(five).unwrap();
/// *q.get_mut(index).unwrap() = 0;
/// q.move_item(index).unwrap();
///
/// assert_eq!(q.pop_top(), Some(0));
/// assert_eq!(q.pop_top(), Some(1));
/// assert_eq!(q.pop_top(), Some(9));
/// assert!(q.is_empty());
/// ```
pub struct DynamicPriorityQueue<T, C = NaturalOrder> {
    slots: Vec<Option<Slot<T>>>,
    /// `heap[..size]` is the live heap; `heap[size..]` holds free indices.
    heap: Vec<Index>,
    position_map: Vec<usize>,
    index_map: IndexMap<Serial, Index>,
    next_serial: u64,
    size: usize,
    comp: C,
}

impl<T: Ord> DynamicPriorityQueue<T, NaturalOrder> {
    /// Create an empty max-heap ordered by `T: Ord`.
    pub fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }
}

impl<T: Ord> Default for DynamicPriorityQueue<T, NaturalOrder> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C: Compare<T>> DynamicPriorityQueue<T, C> {
    /// Create an empty queue ordered by `comp`.
    pub fn with_comparator(comp: C) -> Self {
        Self {
            slots: Vec::new(),
            heap: Vec::new(),
            position_map: Vec::new(),
            index_map: IndexMap::new(),
            next_serial: 0,
            size: 0,
            comp,
        }
    }

    /// Number of queued items.
    pub fn len(&self) -> usize {
        self.size
    }

    /// True if no item is queued.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// The comparator this queue was built with.
    pub fn comparator(&self) -> &C {
        &self.comp
    }

    /// Insert `item` and return its freshly issued serial.
    pub fn push(&mut self, item: T) -> Serial {
        let serial = Serial(self.next_serial);
        self.next_serial += 1;

        let position = self.size;
        let index = if position < self.heap.len() {
            // Recycle the free slot parked just past the live heap.
            self.heap[position]
        } else {
            let index = self.slots.len();
            self.slots.push(None);
            self.heap.push(index);
            self.position_map.push(position);
            index
        };
        self.slots[index] = Some(Slot { item, serial });
        self.size += 1;
        self.index_map.insert(serial, index);

        self.sift_up(position);
        serial
    }

    /// The top item, or `None` if the queue is empty.
    pub fn peek_top(&self) -> Option<&T> {
        self.top_index().map(|index| self.item(index))
    }

    /// Storage index of the top item.
    pub fn top_index(&self) -> Option<Index> {
        if self.is_empty() {
            None
        } else {
            Some(self.heap[0])
        }
    }

    /// Serial of the top item.
    pub fn top_serial(&self) -> Option<Serial> {
        self.top_index().map(|index| self.slot(index).serial)
    }

    /// Remove and return the top item, or `None` if the queue is empty.
    pub fn pop_top(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        Some(self.remove_at(0))
    }

    /// Remove the item with the given serial.
    pub fn pop_item(&mut self, serial: Serial) -> Result<T, QueueError> {
        let index = self.get_index(serial)?;
        self.pop_item_by_index(index)
    }

    /// Remove the item stored at `index`.
    pub fn pop_item_by_index(&mut self, index: Index) -> Result<T, QueueError> {
        self.check_index(index)?;
        let position = self.position_map[index];
        Ok(self.remove_at(position))
    }

    /// Storage index of the item with `serial`.
    pub fn get_index(&self, serial: Serial) -> Result<Index, QueueError> {
        self.index_map
            .get(&serial)
            .copied()
            .ok_or(QueueError::UnknownSerial { serial })
    }

    /// Serial of the item stored at `index`.
    pub fn serial_of(&self, index: Index) -> Result<Serial, QueueError> {
        self.check_index(index)?;
        Ok(self.slot(index).serial)
    }

    /// True if an item with `serial` is queued.
    pub fn contains(&self, serial: Serial) -> bool {
        self.index_map.contains_key(&serial)
    }

    /// The item stored at `index`.
    pub fn get(&self, index: Index) -> Result<&T, QueueError> {
        self.check_index(index)?;
        Ok(self.item(index))
    }

    /// Mutable access to the item stored at `index`.
    ///
    /// If the mutation changes the item's priority, call
    /// [`move_item`](Self::move_item) afterwards to restore the heap order.
    pub fn get_mut(&mut self, index: Index) -> Result<&mut T, QueueError> {
        self.check_index(index)?;
        match self.slots[index].as_mut() {
            Some(slot) => Ok(&mut slot.item),
            None => Err(QueueError::InvalidIndex { index }),
        }
    }

    /// The item with `serial`.
    pub fn get_by_serial(&self, serial: Serial) -> Result<&T, QueueError> {
        let index = self.get_index(serial)?;
        Ok(self.item(index))
    }

    /// Replace the payload of the item with `serial` and restore the heap
    /// order. The serial and storage index are unchanged. Returns the old
    /// payload.
    pub fn replace(&mut self, serial: Serial, item: T) -> Result<T, QueueError> {
        let index = self.get_index(serial)?;
        let old = std::mem::replace(self.get_mut(index)?, item);
        self.move_item(index)?;
        Ok(old)
    }

    /// Restore the heap order for the item at `index` after its priority
    /// changed in either direction.
    ///
    /// Tries a sift-down first and falls back to a sift-up only if the item
    /// did not move: a single priority change can break the heap order in
    /// one direction only.
    pub fn move_item(&mut self, index: Index) -> Result<(), QueueError> {
        self.check_index(index)?;
        let position = self.position_map[index];
        self.repair(position);
        Ok(())
    }

    /// Sift the item at `index` towards the root.
    pub fn move_up(&mut self, index: Index) -> Result<(), QueueError> {
        self.check_index(index)?;
        self.sift_up(self.position_map[index]);
        Ok(())
    }

    /// Sift the item at `index` towards the leaves.
    pub fn move_down(&mut self, index: Index) -> Result<(), QueueError> {
        self.check_index(index)?;
        self.sift_down(self.position_map[index]);
        Ok(())
    }

    /// Remove every item. Serials issued afterwards continue the sequence.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.heap.clear();
        self.position_map.clear();
        self.index_map.clear();
        self.size = 0;
    }

    /// Iterate over queued items as `(serial, item)` in heap order.
    pub fn iter(&self) -> impl Iterator<Item = (Serial, &T)> + '_ {
        self.heap[..self.size].iter().map(move |&index| {
            let slot = self.slot(index);
            (slot.serial, &slot.item)
        })
    }

    /// Check every internal invariant: heap order, the index/position
    /// maps, and the serial map. Intended for tests and debug assertions.
    #[doc(hidden)]
    pub fn is_consistent(&self) -> bool {
        if self.index_map.len() != self.size {
            return false;
        }
        for (position, &index) in self.heap.iter().enumerate() {
            if self.position_map[index] != position {
                return false;
            }
            let live = position < self.size;
            if self.slots[index].is_some() != live {
                return false;
            }
        }
        for (&serial, &index) in &self.index_map {
            match &self.slots[index] {
                Some(slot) if slot.serial == serial => {}
                _ => return false,
            }
        }
        (1..self.size).all(|position| {
            let parent = (position - 1) / 2;
            !self.less(self.heap[parent], self.heap[position])
        })
    }

    fn check_index(&self, index: Index) -> Result<(), QueueError> {
        match self.slots.get(index) {
            Some(Some(_)) => Ok(()),
            _ => Err(QueueError::InvalidIndex { index }),
        }
    }

    fn slot(&self, index: Index) -> &Slot<T> {
        // Every index reachable from `heap[..size]` or `index_map` is live.
        self.slots[index]
            .as_ref()
            .expect("heap references a live slot")
    }

    fn item(&self, index: Index) -> &T {
        &self.slot(index).item
    }

    fn less(&self, a: Index, b: Index) -> bool {
        self.comp.compare(self.item(a), self.item(b)).is_lt()
    }

    fn place(&mut self, position: usize, index: Index) {
        self.heap[position] = index;
        self.position_map[index] = position;
    }

    /// Swap the item at `position` with the last live one, shrink the heap,
    /// free the removed slot, and repair the hole.
    fn remove_at(&mut self, position: usize) -> T {
        let last = self.size - 1;
        let removed = self.heap[position];
        let moved = self.heap[last];
        self.place(position, moved);
        self.place(last, removed);
        self.size = last;

        let slot = self.slots[removed]
            .take()
            .expect("removed position holds a live slot");
        self.index_map.swap_remove(&slot.serial);

        if position < self.size {
            self.repair(position);
        }
        slot.item
    }

    fn repair(&mut self, position: usize) {
        if self.sift_down(position) == position {
            self.sift_up(position);
        }
    }

    /// Returns the final position of the sifted item.
    fn sift_up(&mut self, mut position: usize) -> usize {
        let index = self.heap[position];
        while position > 0 {
            let parent = (position - 1) / 2;
            let parent_index = self.heap[parent];
            if !self.less(parent_index, index) {
                break;
            }
            self.place(position, parent_index);
            position = parent;
        }
        self.place(position, index);
        position
    }

    /// Returns the final position of the sifted item.
    fn sift_down(&mut self, mut position: usize) -> usize {
        let index = self.heap[position];
        loop {
            let mut child = 2 * position + 1;
            if child >= self.size {
                break;
            }
            if child + 1 < self.size && self.less(self.heap[child], self.heap[child + 1]) {
                child += 1;
            }
            let child_index = self.heap[child];
            if !self.less(index, child_index) {
                break;
            }
            self.place(position, child_index);
            position = child;
        }
        self.place(position, index);
        position
    }
}

impl<T: fmt::Debug, C> fmt::Debug for DynamicPriorityQueue<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynamicPriorityQueue")
            .field("len", &self.size)
            .field("capacity", &self.slots.len())
            .field("next_serial", &self.next_serial)
            .finish()
    }
}
