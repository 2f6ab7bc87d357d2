use log::trace;

use crate::BalancePolicy;
use crate::node::{NodeId, Side};
use crate::tree::Tree;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Black,
}

impl Color {
    /// Metadata key the color is stored under.
    pub const KEY: &'static str = "color";

    pub fn as_str(self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Black => "black",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "red" => Some(Color::Red),
            "black" => Some(Color::Black),
            _ => None,
        }
    }
}

/// Red-black coloring kept in each node's metadata.
#[derive(Clone, Copy, Debug, Default)]
pub struct RedBlack;

pub type RedBlackTree<T> = Tree<T, RedBlack>;

impl BalancePolicy for RedBlack {
    const NAME: &'static str = "red-black";
    const SUPPORTS_REMOVE: bool = false;

    fn after_insert<T>(tree: &mut Tree<T, Self>, node: NodeId) {
        let color = if node == tree.root_id() {
            Color::Black
        } else {
            Color::Red
        };
        tree.paint(node, color);
        Self::balance(tree, node);
    }
}

impl RedBlack {
    fn balance<T>(tree: &mut Tree<T, Self>, mut node: NodeId) {
        loop {
            if node == tree.root_id() || !tree.is_node_red(node) {
                return;
            }
            let arena = tree.arena();
            let Some(parent) = arena.parent(node) else { return };
            if tree.is_node_black(parent) {
                return;
            }
            let Some(grandparent) = arena.parent(parent) else { return };

            if let Some(uncle) = arena.uncle(node).filter(|&u| tree.is_node_red(u)) {
                trace!("red-black: recolor below {grandparent:?}");
                tree.paint(uncle, Color::Black);
                tree.paint(parent, Color::Black);
                if grandparent == tree.root_id() {
                    return;
                }
                tree.paint(grandparent, Color::Red);
                node = grandparent;
                continue;
            }

            // Absent or black uncle: rotate at the grandparent.
            let outer = arena.side_of(parent) == arena.side_of(node);
            let top = if outer {
                trace!("red-black: single rotation at {grandparent:?}");
                tree.rotate_up(parent);
                parent
            } else {
                trace!("red-black: double rotation at {grandparent:?}");
                tree.rotate_up(node);
                tree.rotate_up(node);
                node
            };
            tree.swap_colors(top, grandparent);
            if tree.arena().parent(top).is_none() {
                tree.paint(top, Color::Black);
            }
            node = top;
        }
    }
}

impl<T> Tree<T, RedBlack> {
    /// Color stored for `id`; `None` for a node that was never colored.
    pub fn color(&self, id: NodeId) -> Option<Color> {
        self.meta(id).get(Color::KEY).and_then(Color::from_tag)
    }

    pub fn is_node_red(&self, id: NodeId) -> bool {
        self.color(id) == Some(Color::Red)
    }

    pub fn is_node_black(&self, id: NodeId) -> bool {
        self.color(id) == Some(Color::Black)
    }

    pub fn is_node_colored(&self, id: NodeId) -> bool {
        self.color(id).is_some()
    }

    /// Child of `id` on `side`, as seen by the coloring rules.
    pub fn child_color(&self, id: NodeId, side: Side) -> Color {
        self.arena()
            .child(id, side)
            .and_then(|child| self.color(child))
            .unwrap_or(Color::Black)
    }

    fn paint(&mut self, id: NodeId, color: Color) {
        self.meta_mut(id).set(Color::KEY, color.as_str());
    }

    fn swap_colors(&mut self, a: NodeId, b: NodeId) {
        let (ca, cb) = (self.color(a), self.color(b));
        if let Some(c) = cb {
            self.paint(a, c);
        }
        if let Some(c) = ca {
            self.paint(b, c);
        }
    }
}
