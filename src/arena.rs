//! Node Pool - O(1) slab allocator for trie nodes.
//!
//! The pool pre-allocates a contiguous block of nodes at construction,
//! so building the dictionary never touches the global allocator per
//! letter. Uses an intrusive free list for O(1) allocation and release.

use std::fmt;

use arrayvec::ArrayVec;

/// Sentinel value representing a null/invalid index
pub const NULL_INDEX: u32 = u32::MAX;

/// Index of a node inside the pool. Trie links are indices, never pointers.
pub type NodeIndex = u32;

/// Number of distinct letters a node can branch on (`a..=z`).
pub const ALPHABET_SIZE: usize = 26;

/// A single letter in the trie.
///
/// Children are kept sorted ascending by letter so lookups can binary
/// search. The child table has a fixed capacity of one slot per letter,
/// which keeps every node the same size and avoids a heap allocation
/// per node.
#[repr(C)]
#[repr(align(64))]
#[derive(Clone)]
pub struct LetterNode {
    /// Sorted (letter, child) pairs, no duplicate letters
    children: ArrayVec<(u8, NodeIndex), ALPHABET_SIZE>,

    /// True if the path from the root to this node spells a word
    pub is_word: bool,

    /// Free list link, only meaningful while the node is unallocated
    next_free: NodeIndex,
}

const _: () = assert!(
    std::mem::size_of::<LetterNode>() <= 256,
    "LetterNode must fit in four cache lines"
);

impl LetterNode {
    /// Create an empty node (no children, not a word)
    #[inline]
    pub const fn empty() -> Self {
        Self {
            children: ArrayVec::new_const(),
            is_word: false,
            next_free: NULL_INDEX,
        }
    }

    /// Reset the node for reuse (when returning to free list)
    #[inline]
    pub fn reset(&mut self) {
        self.children.clear();
        self.is_word = false;
        self.next_free = NULL_INDEX;
    }

    /// Look up the child reached by `letter`.
    ///
    /// # Complexity
    /// O(log 26) - binary search over the sorted child table
    #[inline]
    pub fn find_child(&self, letter: u8) -> Option<NodeIndex> {
        self.children
            .binary_search_by_key(&letter, |&(l, _)| l)
            .ok()
            .map(|pos| self.children[pos].1)
    }

    /// Insert a child link, keeping the table sorted.
    ///
    /// Returns `false` (and leaves the table untouched) if `letter`
    /// already has a child: the first insertion wins.
    pub fn insert_child(&mut self, letter: u8, child: NodeIndex) -> bool {
        match self.children.binary_search_by_key(&letter, |&(l, _)| l) {
            Ok(_) => false,
            Err(pos) => {
                debug_assert!(!self.children.is_full(), "Child table overflow");
                self.children.insert(pos, (letter, child));
                true
            }
        }
    }

    /// Sorted child links of this node
    #[inline]
    pub fn children(&self) -> &[(u8, NodeIndex)] {
        &self.children
    }

    /// Letters that continue from this node, ascending
    pub fn child_letters(&self) -> impl Iterator<Item = char> + '_ {
        self.children.iter().map(|&(l, _)| l as char)
    }
}

impl Default for LetterNode {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for LetterNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LetterNode")
            .field("children", &self.child_letters().collect::<String>())
            .field("is_word", &self.is_word)
            .finish()
    }
}

/// Allocation counters for a pool, kept only when asked for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PoolCounters {
    /// Successful allocations
    pub allocations: u64,
    /// Nodes returned to the free list
    pub releases: u64,
    /// Allocation attempts that found the pool exhausted
    pub exhausted: u64,
}

/// Pre-allocated node storage with O(1) allocation and deallocation.
///
/// The free list is threaded through the `next_free` field of unused
/// nodes. Capacity never grows; exhaustion is reported, not recovered.
pub struct NodePool {
    /// Contiguous block of pre-allocated nodes
    nodes: Vec<LetterNode>,

    /// Head of the free list (index of first available node)
    free_head: NodeIndex,

    /// Number of currently allocated nodes
    allocated_count: u32,

    /// Total capacity
    capacity: u32,

    counters: Option<PoolCounters>,
}

impl NodePool {
    /// Create a new pool with the specified capacity.
    ///
    /// # Panics
    /// Panics if capacity is not below `NULL_INDEX` (reserved as the sentinel)
    pub fn new(capacity: u32) -> Self {
        assert!(capacity < NULL_INDEX, "Capacity must be less than NULL_INDEX");

        let mut nodes = vec![LetterNode::empty(); capacity as usize];

        // Each free node points at the following one
        for i in 1..capacity {
            nodes[(i - 1) as usize].next_free = i;
        }

        Self {
            nodes,
            free_head: if capacity > 0 { 0 } else { NULL_INDEX },
            allocated_count: 0,
            capacity,
            counters: None,
        }
    }

    /// Create a pool that also records [`PoolCounters`].
    pub fn with_counters(capacity: u32) -> Self {
        let mut pool = Self::new(capacity);
        pool.counters = Some(PoolCounters::default());
        pool
    }

    /// Allocate a node from the pool.
    ///
    /// Returns `None` if the pool is exhausted. Callers treat that as a
    /// hard capacity error.
    ///
    /// # Complexity
    /// O(1) - pops from head of free list
    #[inline]
    pub fn alloc(&mut self) -> Option<NodeIndex> {
        if self.free_head == NULL_INDEX {
            if let Some(counters) = self.counters.as_mut() {
                counters.exhausted += 1;
            }
            return None;
        }

        let index = self.free_head;
        let node = &mut self.nodes[index as usize];
        self.free_head = node.next_free;
        node.next_free = NULL_INDEX;
        self.allocated_count += 1;

        if let Some(counters) = self.counters.as_mut() {
            counters.allocations += 1;
        }

        Some(index)
    }

    /// Return a node to the pool.
    ///
    /// The node is reset before it goes back on the free list, so a later
    /// `alloc` always hands out a clean node.
    ///
    /// The caller must ensure the index was previously allocated and has
    /// not already been freed (no double-free protection).
    ///
    /// # Complexity
    /// O(1) - pushes to head of free list
    #[inline]
    pub fn free(&mut self, index: NodeIndex) {
        debug_assert!(index < self.capacity, "Index out of bounds");
        debug_assert!(self.allocated_count > 0, "Double free detected");

        let node = &mut self.nodes[index as usize];
        node.reset();
        node.next_free = self.free_head;
        self.free_head = index;
        self.allocated_count -= 1;

        if let Some(counters) = self.counters.as_mut() {
            counters.releases += 1;
        }
    }

    #[inline]
    pub fn get(&self, index: NodeIndex) -> &LetterNode {
        debug_assert!(index < self.capacity, "Index out of bounds");
        &self.nodes[index as usize]
    }

    #[inline]
    pub fn get_mut(&mut self, index: NodeIndex) -> &mut LetterNode {
        debug_assert!(index < self.capacity, "Index out of bounds");
        &mut self.nodes[index as usize]
    }

    /// Returns the number of currently allocated nodes.
    #[inline]
    pub fn allocated(&self) -> u32 {
        self.allocated_count
    }

    /// Returns the number of nodes still available.
    #[inline]
    pub fn free_count(&self) -> u32 {
        self.capacity - self.allocated_count
    }

    /// Returns the total capacity of the pool.
    #[inline]
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Returns true if no node is allocated.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.allocated_count == 0
    }

    /// Returns true if the pool is exhausted.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.free_head == NULL_INDEX
    }

    /// Allocation counters, if the pool was built with them.
    #[inline]
    pub fn counters(&self) -> Option<PoolCounters> {
        self.counters
    }
}

impl fmt::Debug for NodePool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodePool")
            .field("capacity", &self.capacity)
            .field("allocated", &self.allocated_count)
            .field("free_head", &self.free_head)
            .finish()
    }
}
