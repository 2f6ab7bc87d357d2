use log::trace;

use crate::BalancePolicy;
use crate::node::NodeId;
use crate::tree::Tree;

/// Height-balanced tree: every balance factor stays within -1..=1.
#[derive(Clone, Copy, Debug, Default)]
pub struct Avl;

pub type AvlTree<T> = Tree<T, Avl>;

impl BalancePolicy for Avl {
    const NAME: &'static str = "AVL";
    const SUPPORTS_REMOVE: bool = false;

    fn after_insert<T>(tree: &mut Tree<T, Self>, node: NodeId) {
        // A rotation at `id` moves it down; its new parent is already
        // balanced and the walk continues above that.
        let mut current = Some(node);
        while let Some(id) = current {
            Self::balance(tree, id);
            current = tree.arena().parent(id);
        }
    }
}

impl Avl {
    fn balance<T>(tree: &mut Tree<T, Self>, id: NodeId) {
        let arena = tree.arena();
        let bf = arena.balance_factor(id);
        if bf > 1 {
            let Some(left) = arena.left(id) else { return };
            if arena.balance_factor(left) > 0 {
                trace!("avl: left-left at {id:?}");
                tree.rotate_up(left);
            } else if let Some(pivot) = arena.right(left) {
                trace!("avl: left-right at {id:?}");
                tree.rotate_up(pivot);
                tree.rotate_up(pivot);
            }
        } else if bf < -1 {
            let Some(right) = arena.right(id) else { return };
            if arena.balance_factor(right) < 0 {
                trace!("avl: right-right at {id:?}");
                tree.rotate_up(right);
            } else if let Some(pivot) = arena.left(right) {
                trace!("avl: right-left at {id:?}");
                tree.rotate_up(pivot);
                tree.rotate_up(pivot);
            }
        }
    }
}
