use std::cmp::Ordering;

use crate::{Comparator, MinHeap};

struct Prioritized<T> {
    item: T,
    priority: i32,
}

fn by_priority<T>(a: &Prioritized<T>, b: &Prioritized<T>) -> Ordering {
    a.priority.cmp(&b.priority)
}

/// Min-priority queue: lower priority values are served first.
///
/// Items are matched by value through the queue's value comparator.
pub struct PriorityQueue<T> {
    heap: MinHeap<Prioritized<T>>,
    values: Comparator<T>,
}

impl<T: Ord> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> PriorityQueue<T> {
    pub fn new() -> Self {
        Self::with_value_comparator(Comparator::natural())
    }
}

impl<T> PriorityQueue<T> {
    pub fn with_value_comparator(values: Comparator<T>) -> Self {
        Self {
            heap: MinHeap::with_comparator(Comparator::from_fn_ptr(by_priority::<T>)),
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn peek(&self) -> Option<&T> {
        self.heap.peek().map(|entry| &entry.item)
    }

    pub fn peek_priority(&self) -> Option<i32> {
        self.heap.peek().map(|entry| entry.priority)
    }

    pub fn poll(&mut self) -> Option<T> {
        self.heap.poll().map(|entry| entry.item)
    }

    pub fn add(&mut self, item: T, priority: i32) -> &mut Self {
        self.heap.add(Prioritized { item, priority });
        self
    }

    /// Removes every entry whose item equals `item`.
    pub fn remove(&mut self, item: &T) -> &mut Self {
        self.take(item);
        self
    }

    /// Drops every entry holding `item`, then queues `item` once at
    /// `priority`. Returns whether the item was queued before.
    pub fn change_priority(&mut self, item: T, priority: i32) -> bool {
        let found = !self.take(&item).is_empty();
        self.add(item, priority);
        found
    }

    /// Heap indices of the entries holding `item`.
    pub fn find_by_value(&self, item: &T) -> Vec<usize> {
        self.heap.find_by(|entry| self.values.equal(item, &entry.item))
    }

    pub fn has_value(&self, item: &T) -> bool {
        !self.find_by_value(item).is_empty()
    }

    fn take(&mut self, item: &T) -> Vec<Prioritized<T>> {
        let values = &self.values;
        self.heap.remove_by(|entry| values.equal(item, &entry.item))
    }
}
