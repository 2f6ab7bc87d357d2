pub mod avl;
pub mod bst;
pub mod rb;
