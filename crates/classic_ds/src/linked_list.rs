use std::fmt;

use crate::Comparator;

const NIL: usize = usize::MAX;

struct Slot<T> {
    value: Option<T>,
    next: usize,
}

/// Singly linked list over a slot arena. Freed slots are reused.
///
/// Equality checks (`find`, `remove`) use the list's comparator when one was
/// supplied and `PartialEq` otherwise.
pub struct LinkedList<T> {
    slots: Vec<Slot<T>>,
    free: Vec<usize>,
    head: usize,
    tail: usize,
    len: usize,
    comparator: Option<Comparator<T>>,
}

impl<T> Default for LinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> LinkedList<T> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            head: NIL,
            tail: NIL,
            len: 0,
            comparator: None,
        }
    }

    pub fn with_comparator(comparator: Comparator<T>) -> Self {
        Self {
            comparator: Some(comparator),
            ..Self::new()
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn head(&self) -> Option<&T> {
        self.value(self.head)
    }

    pub fn tail(&self) -> Option<&T> {
        self.value(self.tail)
    }

    pub fn prepend(&mut self, value: T) -> &mut Self {
        let at = self.alloc(Some(value), self.head);
        self.head = at;
        if self.tail == NIL {
            self.tail = at;
        }
        self.len += 1;
        self
    }

    pub fn append(&mut self, value: T) -> &mut Self {
        self.link_tail(Some(value));
        self
    }

    /// Removes every element equal to `value` and returns the last one removed.
    pub fn remove(&mut self, value: &T) -> Option<T>
    where
        T: PartialEq,
    {
        let comparator = self.comparator.take();
        let removed = self.unlink_where(|item| Self::matches(comparator.as_ref(), item, value), true);
        self.comparator = comparator;
        removed
    }

    /// Removes the first element accepted by `predicate`.
    pub fn remove_first_by<F>(&mut self, predicate: F) -> Option<T>
    where
        F: FnMut(&T) -> bool,
    {
        self.unlink_where(predicate, false)
    }

    pub fn find(&self, value: &T) -> Option<&T>
    where
        T: PartialEq,
    {
        self.iter()
            .find(|item| Self::matches(self.comparator.as_ref(), item, value))
    }

    pub fn find_by<F>(&self, mut predicate: F) -> Option<&T>
    where
        F: FnMut(&T) -> bool,
    {
        self.iter().find(|item| predicate(item))
    }

    pub fn find_by_mut<F>(&mut self, predicate: F) -> Option<&mut T>
    where
        F: FnMut(&T) -> bool,
    {
        let at = self.position_by(predicate)?;
        self.slots[at].value.as_mut()
    }

    /// Returns the first element accepted by `predicate`, appending `make()`
    /// when there is none.
    pub fn find_or_append_with<F, M>(&mut self, predicate: F, make: M) -> &mut T
    where
        F: FnMut(&T) -> bool,
        M: FnOnce() -> T,
    {
        let at = match self.position_by(predicate) {
            Some(at) => at,
            None => self.link_tail(None),
        };
        // A found slot is occupied; a fresh one is filled here.
        self.slots[at].value.get_or_insert_with(make)
    }

    pub fn delete_head(&mut self) -> Option<T> {
        if self.head == NIL {
            return None;
        }
        let at = self.head;
        self.head = self.slots[at].next;
        if self.head == NIL {
            self.tail = NIL;
        }
        self.len -= 1;
        self.release(at)
    }

    pub fn delete_tail(&mut self) -> Option<T> {
        if self.tail == NIL {
            return None;
        }
        let at = self.tail;
        if self.head == at {
            self.head = NIL;
            self.tail = NIL;
        } else {
            let mut prev = self.head;
            while self.slots[prev].next != at {
                prev = self.slots[prev].next;
            }
            self.slots[prev].next = NIL;
            self.tail = prev;
        }
        self.len -= 1;
        self.release(at)
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            at: self.head,
        }
    }

    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    /// Comma-joined rendering with a caller-supplied formatter per element.
    pub fn to_string_with<F>(&self, mut render: F) -> String
    where
        F: FnMut(&T) -> String,
    {
        self.iter().map(|item| render(item)).collect::<Vec<_>>().join(",")
    }

    fn value(&self, at: usize) -> Option<&T> {
        self.slots.get(at)?.value.as_ref()
    }

    fn matches(comparator: Option<&Comparator<T>>, a: &T, b: &T) -> bool
    where
        T: PartialEq,
    {
        match comparator {
            Some(comparator) => comparator.equal(a, b),
            None => a == b,
        }
    }

    fn link_tail(&mut self, value: Option<T>) -> usize {
        let at = self.alloc(value, NIL);
        if self.tail == NIL {
            self.head = at;
        } else {
            self.slots[self.tail].next = at;
        }
        self.tail = at;
        self.len += 1;
        at
    }

    fn alloc(&mut self, value: Option<T>, next: usize) -> usize {
        let slot = Slot { value, next };
        match self.free.pop() {
            Some(at) => {
                self.slots[at] = slot;
                at
            }
            None => {
                self.slots.push(slot);
                self.slots.len() - 1
            }
        }
    }

    fn release(&mut self, at: usize) -> Option<T> {
        let slot = &mut self.slots[at];
        slot.next = NIL;
        self.free.push(at);
        slot.value.take()
    }

    fn position_by<F>(&self, mut predicate: F) -> Option<usize>
    where
        F: FnMut(&T) -> bool,
    {
        let mut at = self.head;
        while at != NIL {
            let slot = &self.slots[at];
            if slot.value.as_ref().is_some_and(&mut predicate) {
                return Some(at);
            }
            at = slot.next;
        }
        None
    }

    fn unlink_where<F>(&mut self, mut predicate: F, all: bool) -> Option<T>
    where
        F: FnMut(&T) -> bool,
    {
        let mut removed = None;
        let mut prev = NIL;
        let mut at = self.head;
        while at != NIL {
            let next = self.slots[at].next;
            if self.slots[at].value.as_ref().is_some_and(&mut predicate) {
                if prev == NIL {
                    self.head = next;
                } else {
                    self.slots[prev].next = next;
                }
                if self.tail == at {
                    self.tail = prev;
                }
                self.len -= 1;
                removed = self.release(at);
                if !all {
                    break;
                }
            } else {
                prev = at;
            }
            at = next;
        }
        removed
    }
}

pub struct Iter<'a, T> {
    list: &'a LinkedList<T>,
    at: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let slot = self.list.slots.get(self.at)?;
        self.at = slot.next;
        slot.value.as_ref()
    }
}

impl<'a, T> IntoIterator for &'a LinkedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> Extend<T> for LinkedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.append(value);
        }
    }
}

impl<T> FromIterator<T> for LinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<T: fmt::Display> fmt::Display for LinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, value) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{value}")?;
        }
        Ok(())
    }
}

impl<T: fmt::Debug> fmt::Debug for LinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
