use std::fmt;

use crate::LinkedList;

/// FIFO queue; enqueue at the tail, dequeue at the head.
pub struct Queue<T> {
    list: LinkedList<T>,
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Queue<T> {
    pub fn new() -> Self {
        Self {
            list: LinkedList::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn peek(&self) -> Option<&T> {
        self.list.head()
    }

    pub fn enqueue(&mut self, value: T) {
        self.list.append(value);
    }

    pub fn dequeue(&mut self) -> Option<T> {
        self.list.delete_head()
    }

    pub fn to_string_with<F>(&self, render: F) -> String
    where
        F: FnMut(&T) -> String,
    {
        self.list.to_string_with(render)
    }
}

impl<T: fmt::Display> fmt::Display for Queue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.list, f)
    }
}

impl<T: fmt::Debug> fmt::Debug for Queue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Queue").field("front_to_back", &self.list).finish()
    }
}
