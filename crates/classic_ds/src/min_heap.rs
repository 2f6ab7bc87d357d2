use std::fmt;

use crate::Comparator;

/// Array-backed binary min-heap ordered by its comparator.
pub struct MinHeap<T> {
    container: Vec<T>,
    comparator: Comparator<T>,
}

impl<T: Ord> Default for MinHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> MinHeap<T> {
    pub fn new() -> Self {
        Self::with_comparator(Comparator::natural())
    }
}

impl<T> MinHeap<T> {
    pub fn with_comparator(comparator: Comparator<T>) -> Self {
        Self {
            container: Vec::new(),
            comparator,
        }
    }

    pub fn len(&self) -> usize {
        self.container.len()
    }

    pub fn is_empty(&self) -> bool {
        self.container.is_empty()
    }

    pub fn peek(&self) -> Option<&T> {
        self.container.first()
    }

    /// Container contents in heap (array) order.
    pub fn as_slice(&self) -> &[T] {
        &self.container
    }

    pub fn poll(&mut self) -> Option<T> {
        if self.container.is_empty() {
            return None;
        }
        let root = self.container.swap_remove(0);
        heapify_down(&mut self.container, &self.comparator, 0);
        Some(root)
    }

    pub fn add(&mut self, item: T) -> &mut Self {
        self.container.push(item);
        let last = self.container.len() - 1;
        heapify_up(&mut self.container, &self.comparator, last);
        self
    }

    /// Removes every element equal to `item`.
    ///
    /// Matching uses `comparator` when it is a custom one and the heap's own
    /// comparator otherwise; the heap order always uses its own.
    pub fn remove(&mut self, item: &T, comparator: Option<&Comparator<T>>) -> &mut Self {
        let Self {
            container,
            comparator: ordering,
        } = self;
        let matcher = Self::pick(comparator, ordering);
        take_where(container, ordering, |candidate| matcher.equal(item, candidate));
        self
    }

    /// Removes and returns every element accepted by `predicate`.
    pub fn remove_by<F>(&mut self, predicate: F) -> Vec<T>
    where
        F: FnMut(&T) -> bool,
    {
        take_where(&mut self.container, &self.comparator, predicate)
    }

    /// Indices of every element equal to `item`, in container order.
    pub fn find(&self, item: &T, comparator: Option<&Comparator<T>>) -> Vec<usize> {
        let matcher = Self::pick(comparator, &self.comparator);
        self.find_by(|candidate| matcher.equal(item, candidate))
    }

    pub fn find_by<F>(&self, predicate: F) -> Vec<usize>
    where
        F: FnMut(&T) -> bool,
    {
        positions(&self.container, predicate)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.container.iter()
    }

    fn pick<'a>(custom: Option<&'a Comparator<T>>, own: &'a Comparator<T>) -> &'a Comparator<T> {
        custom.filter(|c| !c.is_default()).unwrap_or(own)
    }
}

fn parent(index: usize) -> Option<usize> {
    index.checked_sub(1).map(|i| i / 2)
}

fn left_child(index: usize) -> usize {
    2 * index + 1
}

fn right_child(index: usize) -> usize {
    2 * index + 2
}

fn positions<T, F>(container: &[T], mut predicate: F) -> Vec<usize>
where
    F: FnMut(&T) -> bool,
{
    container
        .iter()
        .enumerate()
        .filter(|(_, item)| predicate(item))
        .map(|(i, _)| i)
        .collect()
}

fn heapify_up<T>(container: &mut [T], comparator: &Comparator<T>, start: usize) {
    let mut current = start;
    while let Some(up) = parent(current) {
        if !comparator.less_than(&container[current], &container[up]) {
            break;
        }
        container.swap(current, up);
        current = up;
    }
}

fn heapify_down<T>(container: &mut [T], comparator: &Comparator<T>, start: usize) {
    let mut current = start;
    while left_child(current) < container.len() {
        let left = left_child(current);
        let right = right_child(current);
        let next = if right < container.len()
            && comparator.less_than(&container[right], &container[left])
        {
            right
        } else {
            left
        };
        if comparator.less_than(&container[current], &container[next]) {
            break;
        }
        container.swap(current, next);
        current = next;
    }
}

/// Removes matches one at a time, re-searching after each removal because the
/// re-heapify moves elements around.
fn take_where<T, F>(container: &mut Vec<T>, comparator: &Comparator<T>, mut predicate: F) -> Vec<T>
where
    F: FnMut(&T) -> bool,
{
    let count = positions(container, &mut predicate).len();
    let mut removed = Vec::with_capacity(count);
    for _ in 0..count {
        let Some(&index) = positions(container, &mut predicate).last() else {
            break;
        };
        let item = container.swap_remove(index);
        if index < container.len() {
            let sift_down = left_child(index) < container.len()
                && parent(index)
                    .is_none_or(|up| comparator.less_than(&container[up], &container[index]));
            if sift_down {
                heapify_down(container, comparator, index);
            } else {
                heapify_up(container, comparator, index);
            }
        }
        removed.push(item);
    }
    removed
}

impl<T: fmt::Display> fmt::Display for MinHeap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, item) in self.container.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{item}")?;
        }
        Ok(())
    }
}

impl<T: fmt::Debug> fmt::Debug for MinHeap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.container).finish()
    }
}
