//! Classic data structures: lists, heaps, hashing, tries and binary search
//! trees with pluggable balancing.

mod comparator;
mod error;
mod hash_table;
mod linked_list;
mod min_heap;
mod policy;
mod priority_queue;
mod queue;
mod stack;
mod tree;
mod trie;

pub mod impls;
pub mod node;

pub use comparator::Comparator;
pub use error::TreeError;
pub use hash_table::{DEFAULT_BUCKETS, HashTable};
pub use linked_list::{Iter as ListIter, LinkedList};
pub use min_heap::MinHeap;
pub use priority_queue::PriorityQueue;
pub use queue::Queue;
pub use stack::Stack;
pub use trie::{Trie, TrieNode};

pub use impls::{
    avl::{Avl, AvlTree},
    bst::{BinarySearchTree, Unbalanced},
    rb::{Color, RedBlack, RedBlackTree},
};
pub use node::{InOrder, Metadata, NodeArena, NodeId, NodeRef, Side};
pub use policy::BalancePolicy;
pub use tree::Tree;
