use crate::BalancePolicy;
use crate::node::NodeId;
use crate::tree::Tree;

/// Plain binary search tree: no rebalancing, removal supported.
#[derive(Clone, Copy, Debug, Default)]
pub struct Unbalanced;

impl BalancePolicy for Unbalanced {
    const NAME: &'static str = "binary search";
    const SUPPORTS_REMOVE: bool = true;

    fn after_insert<T>(_tree: &mut Tree<T, Self>, _node: NodeId) {}
}

pub type BinarySearchTree<T> = Tree<T, Unbalanced>;
