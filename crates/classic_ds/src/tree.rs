use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;

use log::{debug, trace};

use crate::node::{InOrder, Metadata, NodeArena, NodeId, NodeRef, Side};
use crate::{BalancePolicy, Comparator, TreeError, Unbalanced};

/// Binary search tree over a [`NodeArena`], balanced by the policy `P`.
///
/// The root node always exists; an empty tree holds an invalid root that the
/// first insert fills in place. Equal values are stored once.
pub struct Tree<T, P = Unbalanced> {
    arena: NodeArena<T>,
    root: NodeId,
    len: usize,
    comparator: Comparator<T>,
    _policy: PhantomData<P>,
}

impl<T: Ord, P: BalancePolicy> Default for Tree<T, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord, P: BalancePolicy> Tree<T, P> {
    pub fn new() -> Self {
        Self::with_comparator(Comparator::natural())
    }
}

impl<T, P: BalancePolicy> Tree<T, P> {
    pub fn with_comparator(comparator: Comparator<T>) -> Self {
        let mut arena = NodeArena::new();
        let root = arena.create_empty();
        Self {
            arena,
            root,
            len: 0,
            comparator,
            _policy: PhantomData,
        }
    }

    pub fn with_compare_fn<F>(compare: F) -> Self
    where
        F: Fn(&T, &T) -> Ordering + 'static,
    {
        Self::with_comparator(Comparator::from_fn(compare))
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn comparator(&self) -> &Comparator<T> {
        &self.comparator
    }

    pub fn arena(&self) -> &NodeArena<T> {
        &self.arena
    }

    pub fn root_id(&self) -> NodeId {
        self.root
    }

    pub fn root(&self) -> NodeRef<'_, T> {
        self.arena.get(self.root)
    }

    pub fn node(&self, id: NodeId) -> NodeRef<'_, T> {
        self.arena.get(id)
    }

    pub fn value(&self, id: NodeId) -> Option<&T> {
        self.arena.value(id)
    }

    pub fn meta_mut(&mut self, id: NodeId) -> &mut Metadata {
        self.arena.meta_mut(id)
    }

    /// Edges on the longest root-to-leaf path; 0 for a single node or an
    /// empty tree.
    pub fn height(&self) -> u32 {
        self.arena.height(self.root)
    }

    /// Inserts `value` and rebalances. Returns the node holding the value,
    /// which is the existing node when an equal value was already present.
    pub fn insert(&mut self, value: T) -> NodeId {
        let (id, inserted) = self.place(value);
        if inserted {
            self.len += 1;
            P::after_insert(self, id);
        }
        id
    }

    pub fn find(&self, value: &T) -> Option<NodeId> {
        let mut current = Some(self.root);
        while let Some(id) = current {
            let existing = self.arena.value(id)?;
            current = match self.comparator.compare(value, existing) {
                Ordering::Less => self.arena.left(id),
                Ordering::Greater => self.arena.right(id),
                Ordering::Equal => return Some(id),
            };
        }
        None
    }

    pub fn contains(&self, value: &T) -> bool {
        self.find(value).is_some()
    }

    pub fn find_min(&self) -> Option<NodeId> {
        let id = self.arena.leftmost(self.root);
        self.arena.is_valid(id).then_some(id)
    }

    /// Removes `value` and returns it.
    ///
    /// Only trees whose policy supports removal implement this; the others
    /// return [`TreeError::NotImplemented`].
    pub fn remove(&mut self, value: &T) -> Result<T, TreeError> {
        if !P::SUPPORTS_REMOVE {
            return Err(TreeError::NotImplemented {
                operation: "remove",
                tree: P::NAME,
            });
        }
        let target = self.find(value).ok_or(TreeError::ItemNotFound)?;
        let removed = match (self.arena.left(target), self.arena.right(target)) {
            (Some(_), Some(right)) => {
                let successor = self.arena.leftmost(right);
                debug!("remove: {target:?} takes the value of successor {successor:?}");
                let moved = self.unlink(successor).ok_or(TreeError::ItemNotFound)?;
                self.arena.set_value(target, moved)
            }
            _ => self.unlink(target),
        };
        let removed = removed.ok_or(TreeError::ItemNotFound)?;
        self.len -= 1;
        Ok(removed)
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.arena.in_order(self.root).map(|(_, value)| value)
    }

    /// In-order walk yielding node handles with their values.
    pub fn nodes(&self) -> InOrder<'_, T> {
        self.arena.in_order(self.root)
    }

    pub fn traverse_in_order(&self) -> Vec<&T> {
        self.arena.traverse_in_order(self.root)
    }

    /// Rotates `x` above its parent, keeping in-order sequence and values in
    /// place. The parent becomes `x`'s child on the side `x` did not occupy.
    pub(crate) fn rotate_up(&mut self, x: NodeId) {
        let (Some(p), Some(side)) = (self.arena.parent(x), self.arena.side_of(x)) else {
            return;
        };
        let above = self.arena.parent(p).zip(self.arena.side_of(p));
        trace!("rotate {x:?} above {p:?}");

        let inner = self.arena.child(x, side.opposite());
        self.arena.set_child(p, side, inner);
        self.arena.set_child(x, side.opposite(), Some(p));
        match above {
            Some((g, g_side)) => self.arena.set_child(g, g_side, Some(x)),
            None => self.root = x,
        }
    }

    pub(crate) fn meta(&self, id: NodeId) -> &Metadata {
        self.arena.meta(id)
    }

    fn place(&mut self, value: T) -> (NodeId, bool) {
        let mut current = self.root;
        loop {
            let Some(existing) = self.arena.value(current) else {
                self.arena.set_value(current, value);
                return (current, true);
            };
            let side = match self.comparator.compare(&value, existing) {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                Ordering::Equal => return (current, false),
            };
            match self.arena.child(current, side) {
                Some(next) => current = next,
                None => {
                    let leaf = self.arena.create(value);
                    self.arena.set_child(current, side, Some(leaf));
                    return (leaf, true);
                }
            }
        }
    }

    /// Removes a node with at most one child and returns its value.
    fn unlink(&mut self, id: NodeId) -> Option<T> {
        let child = self.arena.left(id).or(self.arena.right(id));
        match (self.arena.parent(id), child) {
            (Some(parent), Some(child)) => {
                self.arena.replace_child(parent, Some(id), Some(child));
                self.arena.release(id)
            }
            (Some(parent), None) => {
                self.arena.remove_child(parent, id);
                self.arena.release(id)
            }
            (None, Some(child)) => {
                let removed = self.arena.take_value(id);
                self.arena.copy_node(child, id);
                self.arena.release(child);
                removed
            }
            (None, None) => self.arena.take_value(id),
        }
    }
}

impl<T: fmt::Display, P> fmt::Display for Tree<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.arena.get(self.root), f)
    }
}

impl<T: fmt::Debug, P> fmt::Debug for Tree<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set()
            .entries(self.arena.in_order(self.root).map(|(_, value)| value))
            .finish()
    }
}

impl<T, P: BalancePolicy> Extend<T> for Tree<T, P> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T: Ord, P: BalancePolicy> FromIterator<T> for Tree<T, P> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}
