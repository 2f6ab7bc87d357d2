use std::fmt;

use crate::LinkedList;

/// LIFO stack; the top is the tail of the backing list.
pub struct Stack<T> {
    list: LinkedList<T>,
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Stack<T> {
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
        self.list.tail()
    }

    pub fn push(&mut self, value: T) {
        self.list.append(value);
    }

    pub fn pop(&mut self) -> Option<T> {
        self.list.delete_tail()
    }

    /// Elements from top to bottom.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        let mut values = self.list.to_vec();
        values.reverse();
        values
    }

    /// Bottom-to-top rendering with a custom formatter.
    pub fn to_string_with<F>(&self, render: F) -> String
    where
        F: FnMut(&T) -> String,
    {
        self.list.to_string_with(render)
    }
}

impl<T: fmt::Display> fmt::Display for Stack<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.list, f)
    }
}

impl<T: fmt::Debug> fmt::Debug for Stack<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stack").field("bottom_to_top", &self.list).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::Stack;

    #[test]
    fn push_peek_pop() {
        let mut stack = Stack::new();
        assert!(stack.is_empty());
        assert_eq!(stack.peek(), None);
        assert_eq!(stack.pop(), None);

        stack.push(1);
        stack.push(2);
        assert!(!stack.is_empty());
        assert_eq!(stack.to_string(), "1,2");
        assert_eq!(stack.peek(), Some(&2));
        assert_eq!(stack.peek(), Some(&2));

        assert_eq!(stack.pop(), Some(2));
        assert_eq!(stack.pop(), Some(1));
        assert_eq!(stack.pop(), None);
        assert!(stack.is_empty());
    }

    #[test]
    fn top_first_vec() {
        let mut stack = Stack::new();
        stack.push(1);
        stack.push(2);
        stack.push(3);
        assert_eq!(stack.to_vec(), vec![3, 2, 1]);
        assert_eq!(stack.len(), 3);
    }

    #[test]
    fn pairs_with_custom_rendering() {
        let mut stack = Stack::new();
        stack.push(("key1", "test1"));
        stack.push(("key2", "test2"));
        assert_eq!(stack.to_string_with(|(_, v)| v.to_string()), "test1,test2");
        assert_eq!(stack.pop(), Some(("key2", "test2")));
    }
}
