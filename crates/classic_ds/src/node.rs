use std::fmt;

use crate::HashTable;

const META_BUCKETS: usize = 4;

/// Handle to a node inside a [`NodeArena`].
///
/// Handles stay valid while the node is alive; a released slot may be handed
/// out again by a later allocation.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    const NIL: Self = Self(u32::MAX);

    #[inline]
    fn is_nil(self) -> bool {
        self.0 == u32::MAX
    }

    #[inline]
    fn idx(self) -> usize {
        self.0 as usize
    }

    #[inline]
    fn get(self) -> Option<Self> {
        (!self.is_nil()).then_some(self)
    }

    #[inline]
    fn or_nil(id: Option<Self>) -> Self {
        id.unwrap_or(Self::NIL)
    }

    pub fn index(self) -> usize {
        self.idx()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    #[inline]
    fn idx(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// String-keyed annotations attached to a node. The table is allocated on
/// first write.
#[derive(Default)]
pub struct Metadata {
    table: Option<Box<HashTable<String, META_BUCKETS>>>,
}

impl Metadata {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.table.as_ref()?.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.table
            .get_or_insert_with(Box::default)
            .set(key, value.into());
    }

    pub fn has(&self, key: &str) -> bool {
        self.table.as_ref().is_some_and(|table| table.has(key))
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.table.as_mut()?.remove(key)
    }

    pub fn keys(&self) -> Vec<&str> {
        self.table.as_ref().map(|table| table.keys()).unwrap_or_default()
    }

    pub fn clear(&mut self) {
        self.table = None;
    }
}

impl fmt::Debug for Metadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.table {
            Some(table) => fmt::Debug::fmt(table, f),
            None => f.write_str("{}"),
        }
    }
}

struct Node<T> {
    value: Option<T>,
    ch: [NodeId; 2],
    p: NodeId,
    // edges on the longest downward path; a leaf has 0
    height: u32,
    meta: Metadata,
}

impl<T> Node<T> {
    fn new(value: Option<T>) -> Self {
        Self {
            value,
            ch: [NodeId::NIL; 2],
            p: NodeId::NIL,
            height: 0,
            meta: Metadata::default(),
        }
    }
}

/// Binary tree nodes stored in one arena.
///
/// Every node owns its children exclusively: installing a node as a child
/// first detaches it from its previous parent. Parent links are plain handles
/// and play no part in lifetime. A node without a value is *invalid*; trees
/// use an invalid root to represent emptiness.
pub struct NodeArena<T> {
    nodes: Vec<Node<T>>,
    free: Vec<NodeId>,
}

impl<T> Default for NodeArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> NodeArena<T> {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            free: Vec::new(),
        }
    }

    /// Number of live nodes, valid or not.
    pub fn len(&self) -> usize {
        self.nodes.len() - self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn create(&mut self, value: T) -> NodeId {
        self.alloc(Some(value))
    }

    pub fn create_empty(&mut self) -> NodeId {
        self.alloc(None)
    }

    /// Unlinks `id` from its parent and children and frees its slot.
    pub fn release(&mut self, id: NodeId) -> Option<T> {
        self.detach(id);
        for side in [Side::Left, Side::Right] {
            self.set_child(id, side, None);
        }
        self.free.push(id);
        let node = self.node_mut(id);
        node.meta.clear();
        node.value.take()
    }

    pub fn get(&self, id: NodeId) -> NodeRef<'_, T> {
        debug_assert!(id.idx() < self.nodes.len());
        NodeRef { arena: self, id }
    }

    pub fn value(&self, id: NodeId) -> Option<&T> {
        self.node(id).value.as_ref()
    }

    pub fn value_mut(&mut self, id: NodeId) -> Option<&mut T> {
        self.node_mut(id).value.as_mut()
    }

    /// Stores `value` and marks the node valid.
    pub fn set_value(&mut self, id: NodeId, value: T) -> Option<T> {
        self.node_mut(id).value.replace(value)
    }

    /// Moves the value out and marks the node invalid.
    pub fn take_value(&mut self, id: NodeId) -> Option<T> {
        self.node_mut(id).value.take()
    }

    pub fn is_valid(&self, id: NodeId) -> bool {
        self.node(id).value.is_some()
    }

    pub fn left(&self, id: NodeId) -> Option<NodeId> {
        self.child(id, Side::Left)
    }

    pub fn right(&self, id: NodeId) -> Option<NodeId> {
        self.child(id, Side::Right)
    }

    pub fn child(&self, id: NodeId, side: Side) -> Option<NodeId> {
        self.node(id).ch[side.idx()].get()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).p.get()
    }

    /// Which slot of its parent `id` occupies.
    pub fn side_of(&self, id: NodeId) -> Option<Side> {
        let p = self.parent(id)?;
        if self.node(p).ch[0] == id {
            Some(Side::Left)
        } else {
            debug_assert_eq!(self.node(p).ch[1], id);
            Some(Side::Right)
        }
    }

    pub fn height(&self, id: NodeId) -> u32 {
        self.node(id).height
    }

    /// 0 without a left child, otherwise the left child's height plus one.
    pub fn left_height(&self, id: NodeId) -> u32 {
        self.left(id).map_or(0, |l| self.height(l) + 1)
    }

    pub fn right_height(&self, id: NodeId) -> u32 {
        self.right(id).map_or(0, |r| self.height(r) + 1)
    }

    pub fn balance_factor(&self, id: NodeId) -> i32 {
        self.left_height(id) as i32 - self.right_height(id) as i32
    }

    /// Sibling of the parent. `None` without a grandparent or when the
    /// grandparent is missing either child.
    pub fn uncle(&self, id: NodeId) -> Option<NodeId> {
        let p = self.parent(id)?;
        let g = self.parent(p)?;
        let (l, r) = (self.left(g)?, self.right(g)?);
        Some(if l == p { r } else { l })
    }

    pub fn set_left(&mut self, id: NodeId, child: Option<NodeId>) {
        self.set_child(id, Side::Left, child);
    }

    pub fn set_right(&mut self, id: NodeId, child: Option<NodeId>) {
        self.set_child(id, Side::Right, child);
    }

    /// Installs `child` in the `side` slot of `id`.
    ///
    /// The previous occupant loses its parent link; `child` is detached from
    /// wherever it was before. When `child` is an ancestor of `id`, `id` is
    /// first cut from its own parent so no cycle forms. A node is never made
    /// its own child; that call does nothing.
    pub fn set_child(&mut self, id: NodeId, side: Side, child: Option<NodeId>) {
        if child == Some(id) {
            return;
        }
        let old = self.node(id).ch[side.idx()];
        if old == NodeId::or_nil(child) {
            return;
        }
        if let Some(c) = child {
            if self.is_ancestor_or_self(c, id) {
                self.detach(id);
            }
        }
        if !old.is_nil() {
            self.node_mut(old).p = NodeId::NIL;
            self.node_mut(id).ch[side.idx()] = NodeId::NIL;
        }
        if let Some(c) = child {
            self.detach(c);
            self.node_mut(id).ch[side.idx()] = c;
            self.node_mut(c).p = id;
        }
        self.refresh_heights(id);
    }

    /// Clears the slot holding `child`. Returns `false` if `child` is not a
    /// child of `id`.
    pub fn remove_child(&mut self, id: NodeId, child: NodeId) -> bool {
        match self.slot_of(id, child) {
            Some(side) => {
                self.set_child(id, side, None);
                true
            }
            None => false,
        }
    }

    /// Puts `new` into the slot currently holding `old`.
    pub fn replace_child(&mut self, id: NodeId, old: Option<NodeId>, new: Option<NodeId>) -> bool {
        let (Some(old), Some(new)) = (old, new) else {
            return false;
        };
        match self.slot_of(id, old) {
            Some(side) => {
                self.set_child(id, side, Some(new));
                true
            }
            None => false,
        }
    }

    /// Moves the value and both children of `source` onto `target`. The
    /// target keeps its own parent and metadata; `source` ends up empty and
    /// childless.
    pub fn copy_node(&mut self, source: NodeId, target: NodeId) {
        match self.take_value(source) {
            Some(value) => {
                self.set_value(target, value);
            }
            None => {
                self.take_value(target);
            }
        }
        let (l, r) = (self.left(source), self.right(source));
        self.set_child(target, Side::Left, l);
        self.set_child(target, Side::Right, r);
    }

    pub fn meta(&self, id: NodeId) -> &Metadata {
        &self.node(id).meta
    }

    pub fn meta_mut(&mut self, id: NodeId) -> &mut Metadata {
        &mut self.node_mut(id).meta
    }

    /// Leftmost node of the subtree rooted at `id`.
    pub fn leftmost(&self, id: NodeId) -> NodeId {
        let mut current = id;
        while let Some(l) = self.left(current) {
            current = l;
        }
        current
    }

    pub fn in_order(&self, id: NodeId) -> InOrder<'_, T> {
        InOrder::new(self, id)
    }

    pub fn traverse_in_order(&self, id: NodeId) -> Vec<&T> {
        self.in_order(id).map(|(_, value)| value).collect()
    }

    fn alloc(&mut self, value: Option<T>) -> NodeId {
        match self.free.pop() {
            Some(id) => {
                self.nodes[id.idx()] = Node::new(value);
                id
            }
            None => {
                let id = NodeId(self.nodes.len() as u32);
                debug_assert!(!id.is_nil());
                self.nodes.push(Node::new(value));
                id
            }
        }
    }

    fn slot_of(&self, id: NodeId, child: NodeId) -> Option<Side> {
        let ch = self.node(id).ch;
        if ch[0] == child {
            Some(Side::Left)
        } else if ch[1] == child {
            Some(Side::Right)
        } else {
            None
        }
    }

    fn detach(&mut self, id: NodeId) {
        let p = self.node(id).p;
        if p.is_nil() {
            return;
        }
        if let Some(side) = self.slot_of(p, id) {
            self.node_mut(p).ch[side.idx()] = NodeId::NIL;
        }
        self.node_mut(id).p = NodeId::NIL;
        self.refresh_heights(p);
    }

    fn is_ancestor_or_self(&self, candidate: NodeId, id: NodeId) -> bool {
        let mut current = id;
        while !current.is_nil() {
            if current == candidate {
                return true;
            }
            current = self.node(current).p;
        }
        false
    }

    // Walks up from `id` until a stored height already matches its children.
    fn refresh_heights(&mut self, id: NodeId) {
        let mut current = id;
        while !current.is_nil() {
            let [l, r] = self.node(current).ch;
            let height = [l, r]
                .into_iter()
                .filter(|c| !c.is_nil())
                .map(|c| self.node(c).height + 1)
                .max()
                .unwrap_or(0);
            let node = self.node_mut(current);
            if node.height == height && current != id {
                break;
            }
            node.height = height;
            current = node.p;
        }
    }

    #[inline]
    fn node(&self, id: NodeId) -> &Node<T> {
        debug_assert!(!id.is_nil());
        &self.nodes[id.idx()]
    }

    #[inline]
    fn node_mut(&mut self, id: NodeId) -> &mut Node<T> {
        debug_assert!(!id.is_nil());
        &mut self.nodes[id.idx()]
    }
}

/// Read-only view of one node.
pub struct NodeRef<'a, T> {
    arena: &'a NodeArena<T>,
    id: NodeId,
}

impl<T> Clone for NodeRef<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for NodeRef<'_, T> {}

impl<'a, T> NodeRef<'a, T> {
    pub fn id(self) -> NodeId {
        self.id
    }

    pub fn value(self) -> Option<&'a T> {
        self.arena.value(self.id)
    }

    pub fn is_valid(self) -> bool {
        self.arena.is_valid(self.id)
    }

    pub fn left(self) -> Option<Self> {
        self.arena.left(self.id).map(|id| self.arena.get(id))
    }

    pub fn right(self) -> Option<Self> {
        self.arena.right(self.id).map(|id| self.arena.get(id))
    }

    pub fn parent(self) -> Option<Self> {
        self.arena.parent(self.id).map(|id| self.arena.get(id))
    }

    pub fn uncle(self) -> Option<Self> {
        self.arena.uncle(self.id).map(|id| self.arena.get(id))
    }

    pub fn height(self) -> u32 {
        self.arena.height(self.id)
    }

    pub fn left_height(self) -> u32 {
        self.arena.left_height(self.id)
    }

    pub fn right_height(self) -> u32 {
        self.arena.right_height(self.id)
    }

    pub fn balance_factor(self) -> i32 {
        self.arena.balance_factor(self.id)
    }

    pub fn meta(self) -> &'a Metadata {
        self.arena.meta(self.id)
    }

    pub fn in_order(self) -> InOrder<'a, T> {
        self.arena.in_order(self.id)
    }

    pub fn traverse_in_order(self) -> Vec<&'a T> {
        self.arena.traverse_in_order(self.id)
    }
}

impl<T: fmt::Debug> fmt::Debug for NodeRef<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id)
            .field("value", &self.value())
            .field("height", &self.height())
            .finish()
    }
}

/// Comma-joined in-order values of the subtree.
impl<T: fmt::Display> fmt::Display for NodeRef<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (_, value)) in self.in_order().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{value}")?;
        }
        Ok(())
    }
}

/// In-order walk over the valid nodes of a subtree, driven by an explicit
/// stack.
pub struct InOrder<'a, T> {
    arena: &'a NodeArena<T>,
    stack: Vec<NodeId>,
}

impl<'a, T> InOrder<'a, T> {
    fn new(arena: &'a NodeArena<T>, root: NodeId) -> Self {
        let mut iter = Self {
            arena,
            stack: Vec::new(),
        };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, from: NodeId) {
        let mut current = Some(from);
        while let Some(id) = current {
            self.stack.push(id);
            current = self.arena.left(id);
        }
    }
}

impl<'a, T> Iterator for InOrder<'a, T> {
    type Item = (NodeId, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(id) = self.stack.pop() {
            if let Some(r) = self.arena.right(id) {
                self.push_left_spine(r);
            }
            if let Some(value) = self.arena.value(id) {
                return Some((id, value));
            }
        }
        None
    }
}
