use std::fmt;

use crate::HashTable;

/// One character of a [`Trie`]; children are keyed by their character.
pub struct TrieNode {
    character: char,
    is_complete_word: bool,
    children: HashTable<TrieNode>,
}

impl TrieNode {
    pub fn new(character: char, is_complete_word: bool) -> Self {
        Self {
            character,
            is_complete_word,
            children: HashTable::new(),
        }
    }

    pub fn character(&self) -> char {
        self.character
    }

    pub fn is_complete_word(&self) -> bool {
        self.is_complete_word
    }

    pub fn get_child(&self, character: char) -> Option<&TrieNode> {
        self.children.get(key(character).as_str())
    }

    /// Returns the child for `character`, creating it if needed. An existing
    /// child is marked complete when `is_complete_word` is set.
    pub fn add_child(&mut self, character: char, is_complete_word: bool) -> &mut TrieNode {
        let child = self
            .children
            .get_or_insert_with(key(character).as_str(), || TrieNode::new(character, false));
        child.is_complete_word |= is_complete_word;
        child
    }

    pub fn has_child(&self, character: char) -> bool {
        self.children.has(key(character).as_str())
    }

    /// Characters of the children, sorted.
    pub fn suggest_children(&self) -> Vec<char> {
        let mut characters: Vec<char> = self.children.iter().map(|(_, child)| child.character).collect();
        characters.sort_unstable();
        characters
    }
}

fn key(character: char) -> String {
    character.to_string()
}

impl fmt::Display for TrieNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.character)?;
        if self.is_complete_word {
            f.write_str("*")?;
        }
        for (i, character) in self.suggest_children().into_iter().enumerate() {
            f.write_str(if i == 0 { ":" } else { "," })?;
            write!(f, "{character}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for TrieNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TrieNode({self})")
    }
}

/// Character trie rooted at a `*` head node.
#[derive(Debug)]
pub struct Trie {
    head: TrieNode,
}

impl Default for Trie {
    fn default() -> Self {
        Self::new()
    }
}

impl Trie {
    pub const HEAD_CHARACTER: char = '*';

    pub fn new() -> Self {
        Self {
            head: TrieNode::new(Self::HEAD_CHARACTER, false),
        }
    }

    pub fn head(&self) -> &TrieNode {
        &self.head
    }

    pub fn add_word(&mut self, word: &str) {
        let mut current = &mut self.head;
        let mut characters = word.chars().peekable();
        while let Some(character) = characters.next() {
            let is_last = characters.peek().is_none();
            current = current.add_child(character, is_last);
        }
    }

    /// Characters that can follow `prefix`; empty when `prefix` is absent.
    pub fn suggest_next_characters(&self, prefix: &str) -> Vec<char> {
        self.last_node(prefix)
            .map(TrieNode::suggest_children)
            .unwrap_or_default()
    }

    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.last_node(prefix).is_some()
    }

    /// `true` only for words added with [`Trie::add_word`], not their prefixes.
    pub fn does_word_exist(&self, word: &str) -> bool {
        !word.is_empty() && self.last_node(word).is_some_and(TrieNode::is_complete_word)
    }

    fn last_node(&self, word: &str) -> Option<&TrieNode> {
        word.chars()
            .try_fold(&self.head, |node, character| node.get_child(character))
    }
}

#[cfg(test)]
mod tests {
    use super::{Trie, TrieNode};

    #[test]
    fn node_create() {
        let node = TrieNode::new('c', true);
        assert_eq!(node.character(), 'c');
        assert!(node.is_complete_word());
        assert_eq!(node.to_string(), "c*");
    }

    #[test]
    fn node_children() {
        let mut node = TrieNode::new('c', false);
        node.add_child('a', true);
        node.add_child('o', false);
        assert_eq!(node.to_string(), "c:a,o");

        assert_eq!(node.get_child('a').map(ToString::to_string).as_deref(), Some("a*"));
        assert_eq!(node.get_child('o').map(ToString::to_string).as_deref(), Some("o"));
        assert!(node.get_child('b').is_none());

        assert!(node.has_child('a'));
        assert!(node.has_child('o'));
        assert!(!node.has_child('b'));
        assert_eq!(node.suggest_children(), vec!['a', 'o']);
    }

    #[test]
    fn add_child_marks_existing_complete() {
        let mut node = TrieNode::new('c', false);
        node.add_child('a', false);
        node.add_child('a', true);
        assert_eq!(node.suggest_children(), vec!['a']);
        assert!(node.get_child('a').is_some_and(TrieNode::is_complete_word));
    }

    #[test]
    fn empty_trie() {
        let trie = Trie::new();
        assert_eq!(trie.head().to_string(), "*");
    }

    #[test]
    fn add_words() {
        let mut trie = Trie::new();
        trie.add_word("cat");
        assert_eq!(trie.head().to_string(), "*:c");
        let c = trie.head().get_child('c');
        assert_eq!(c.map(ToString::to_string).as_deref(), Some("c:a"));

        trie.add_word("car");
        assert_eq!(trie.head().to_string(), "*:c");
        let a = trie.head().get_child('c').and_then(|c| c.get_child('a'));
        assert_eq!(a.map(ToString::to_string).as_deref(), Some("a:r,t"));
        let t = a.and_then(|a| a.get_child('t'));
        assert_eq!(t.map(ToString::to_string).as_deref(), Some("t*"));
    }

    #[test]
    fn suggest_next_characters() {
        let mut trie = Trie::new();
        for word in ["cat", "cats", "car", "caption"] {
            trie.add_word(word);
        }
        assert_eq!(trie.suggest_next_characters("ca"), vec!['p', 'r', 't']);
        assert_eq!(trie.suggest_next_characters("cat"), vec!['s']);
        assert_eq!(trie.suggest_next_characters("cab"), Vec::<char>::new());
    }

    #[test]
    fn words_and_prefixes() {
        let mut trie = Trie::new();
        for word in ["cat", "cats", "car", "caption"] {
            trie.add_word(word);
        }
        assert!(trie.does_word_exist("cat"));
        assert!(trie.does_word_exist("caption"));
        assert!(!trie.does_word_exist("cap"));
        assert!(!trie.does_word_exist("call"));
        assert!(!trie.does_word_exist(""));

        assert!(trie.has_prefix("cap"));
        assert!(trie.has_prefix(""));
        assert!(!trie.has_prefix("call"));
    }

    #[test]
    fn word_added_after_longer_word() {
        let mut trie = Trie::new();
        trie.add_word("cats");
        assert!(!trie.does_word_exist("cat"));
        trie.add_word("cat");
        assert!(trie.does_word_exist("cat"));
    }
}
