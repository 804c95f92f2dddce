//! Doubly-linked recency list
//!
//! Nodes live in an arena (`Vec` of slots) and link to each other by slot
//! index, so relinking never aliases mutable references. Every slot carries a
//! generation that is bumped when the slot is released, and every list gets
//! its own instance id. A [`NodeHandle`] from an earlier generation, or from
//! another list, is rejected instead of silently corrupting the chain.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::{Error, Result};

static NEXT_LIST_ID: AtomicU64 = AtomicU64::new(0);

/// Stable reference to a node owned by a [`LinkedList`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeHandle {
    owner: u64,
    index: usize,
    generation: u64,
}

impl NodeHandle {
    /// Arena slot this handle points at
    pub fn index(&self) -> usize {
        self.index
    }
}

/// Node in the doubly-linked list
struct Node<K, V> {
    key: K,
    value: V,
    prev: Option<usize>,
    next: Option<usize>,
}

struct Slot<K, V> {
    generation: u64,
    node: Option<Node<K, V>>,
}

/// Doubly-linked list ordered from most recently pushed (head) to oldest (tail)
pub struct LinkedList<K, V> {
    id: u64,
    slots: Vec<Slot<K, V>>,
    free_list: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl<K, V> Default for LinkedList<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> LinkedList<K, V> {
    /// Create an empty list
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an empty list with room for `capacity` nodes before reallocating
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            id: NEXT_LIST_ID.fetch_add(1, Ordering::Relaxed),
            slots: Vec::with_capacity(capacity),
            free_list: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    /// Insert a new node at the head and return its handle
    ///
    /// If the list was empty the node is also the tail.
    pub fn push(&mut self, key: K, value: V) -> NodeHandle {
        let idx = self.alloc_slot();
        self.slots[idx].node = Some(Node {
            key,
            value,
            prev: None,
            next: None,
        });
        self.link_front(idx);
        self.len += 1;

        NodeHandle {
            owner: self.id,
            index: idx,
            generation: self.slots[idx].generation,
        }
    }

    /// Splice a node out of the list and return its key and value
    ///
    /// # Errors
    /// * `Error::InvalidHandle` - handle is stale or belongs to another list
    pub fn remove(&mut self, handle: NodeHandle) -> Result<(K, V)> {
        let idx = self.resolve(handle)?;
        self.unlink(idx);
        self.release(idx).ok_or(Error::InvalidHandle(idx))
    }

    /// Move a node to the head, keeping its data
    ///
    /// No-op when the node already is the head.
    ///
    /// # Errors
    /// * `Error::InvalidHandle` - handle is stale or belongs to another list
    pub fn move_to_front(&mut self, handle: NodeHandle) -> Result<()> {
        let idx = self.resolve(handle)?;
        if self.head == Some(idx) {
            return Ok(());
        }

        self.unlink(idx);
        self.link_front(idx);
        Ok(())
    }

    /// Remove and return the tail, or `None` if the list is empty
    pub fn remove_last(&mut self) -> Option<(K, V)> {
        let idx = self.tail?;
        self.unlink(idx);
        self.release(idx)
    }

    /// Borrow the key and value behind a handle
    pub fn get(&self, handle: NodeHandle) -> Option<(&K, &V)> {
        let idx = self.resolve(handle).ok()?;
        self.slots[idx].node.as_ref().map(|node| (&node.key, &node.value))
    }

    /// Mutably borrow the value behind a handle
    pub fn get_mut(&mut self, handle: NodeHandle) -> Option<&mut V> {
        let idx = self.resolve(handle).ok()?;
        self.slots[idx].node.as_mut().map(|node| &mut node.value)
    }

    /// Handle of the head (most recent) node
    pub fn head(&self) -> Option<NodeHandle> {
        self.head.map(|idx| self.handle_at(idx))
    }

    /// Handle of the tail (oldest) node
    pub fn tail(&self) -> Option<NodeHandle> {
        self.tail.map(|idx| self.handle_at(idx))
    }

    /// Number of nodes in the list
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the list is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drop every node and invalidate all outstanding handles
    pub fn clear(&mut self) {
        for (idx, slot) in self.slots.iter_mut().enumerate() {
            if slot.node.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
                self.free_list.push(idx);
            }
        }
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    /// Iterate from head to tail
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            list: self,
            cursor: self.head,
            remaining: self.len,
        }
    }

    fn handle_at(&self, idx: usize) -> NodeHandle {
        NodeHandle {
            owner: self.id,
            index: idx,
            generation: self.slots[idx].generation,
        }
    }

    fn resolve(&self, handle: NodeHandle) -> Result<usize> {
        if handle.owner != self.id {
            return Err(Error::InvalidHandle(handle.index));
        }

        match self.slots.get(handle.index) {
            Some(slot) if slot.generation == handle.generation && slot.node.is_some() => {
                Ok(handle.index)
            }
            _ => Err(Error::InvalidHandle(handle.index)),
        }
    }

    fn link_front(&mut self, idx: usize) {
        let old_head = self.head;

        if let Some(node) = &mut self.slots[idx].node {
            node.prev = None;
            node.next = old_head;
        }

        match old_head {
            Some(head_idx) => {
                if let Some(head) = &mut self.slots[head_idx].node {
                    head.prev = Some(idx);
                }
            }
            None => {
                self.tail = Some(idx);
            }
        }

        self.head = Some(idx);
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = if let Some(node) = &mut self.slots[idx].node {
            (node.prev.take(), node.next.take())
        } else {
            return;
        };

        match prev {
            Some(prev_idx) => {
                if let Some(prev_node) = &mut self.slots[prev_idx].node {
                    prev_node.next = next;
                }
            }
            None => {
                self.head = next;
            }
        }

        match next {
            Some(next_idx) => {
                if let Some(next_node) = &mut self.slots[next_idx].node {
                    next_node.prev = prev;
                }
            }
            None => {
                self.tail = prev;
            }
        }
    }

    fn alloc_slot(&mut self) -> usize {
        if let Some(idx) = self.free_list.pop() {
            idx
        } else {
            let idx = self.slots.len();
            self.slots.push(Slot {
                generation: 0,
                node: None,
            });
            idx
        }
    }

    fn release(&mut self, idx: usize) -> Option<(K, V)> {
        let slot = &mut self.slots[idx];
        let node = slot.node.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free_list.push(idx);
        self.len -= 1;
        Some((node.key, node.value))
    }
}

/// Head-to-tail iterator over a [`LinkedList`]
pub struct Iter<'a, K, V> {
    list: &'a LinkedList<K, V>,
    cursor: Option<usize>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.cursor?;
        let node = self.list.slots[idx].node.as_ref()?;
        self.cursor = node.next;
        self.remaining = self.remaining.saturating_sub(1);
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}
