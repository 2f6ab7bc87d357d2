use crate::node::NodeId;
use crate::tree::Tree;

/// Balancing strategy of a [`Tree`].
///
/// The tree performs the plain BST placement and then hands the freshly
/// placed node to the policy, which restores its own invariant with
/// rotations and recoloring.
pub trait BalancePolicy: Sized {
    /// Used in error messages.
    const NAME: &'static str;
    const SUPPORTS_REMOVE: bool;

    /// Called once per structural insert with the node that received the
    /// value. Not called when the value was already present.
    fn after_insert<T>(tree: &mut Tree<T, Self>, node: NodeId);
}
