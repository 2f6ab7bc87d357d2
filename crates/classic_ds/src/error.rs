/// Failures reported by tree operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    #[error("item not found in the tree")]
    ItemNotFound,
    #[error("{operation} is not implemented for {tree} trees")]
    NotImplemented {
        operation: &'static str,
        tree: &'static str,
    },
}
