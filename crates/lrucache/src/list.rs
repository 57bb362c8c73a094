//! Recency list
//!
//! Doubly-linked list kept in a flat arena. Links are slot indices rather than
//! pointers, so neighbours never own each other. Vacated slots are recycled
//! through a free list instead of being reallocated.

/// Stable handle to a node in a [`RecencyList`]
///
/// A handle stays valid until its node is removed or the list is cleared.
/// Using it afterwards is a precondition violation: a vacated slot is detected
/// and ignored, but once the slot is reused the handle silently refers to the
/// new occupant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeRef(usize);

/// Node in the recency list
struct Node<T> {
    value: T,
    prev: Option<usize>,
    next: Option<usize>,
}

/// Doubly-linked list ordered front (most recent) to back (least recent)
pub struct RecencyList<T> {
    nodes: Vec<Option<Node<T>>>,
    head: Option<usize>,
    tail: Option<usize>,
    free_list: Vec<usize>,
    len: usize,
}

impl<T> Default for RecencyList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RecencyList<T> {
    /// Create an empty list
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an empty list with room for `capacity` nodes
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            head: None,
            tail: None,
            free_list: Vec::new(),
            len: 0,
        }
    }

    /// Number of linked nodes
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the list is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Most recently used node
    pub fn front(&self) -> Option<NodeRef> {
        self.head.map(NodeRef)
    }

    /// Least recently used node
    pub fn back(&self) -> Option<NodeRef> {
        self.tail.map(NodeRef)
    }

    /// Node after `node`, towards the back
    pub fn next(&self, node: NodeRef) -> Option<NodeRef> {
        self.node(node.0)?.next.map(NodeRef)
    }

    /// Node before `node`, towards the front
    pub fn prev(&self, node: NodeRef) -> Option<NodeRef> {
        self.node(node.0)?.prev.map(NodeRef)
    }

    /// Borrow the value held by `node`
    pub fn get(&self, node: NodeRef) -> Option<&T> {
        self.node(node.0).map(|n| &n.value)
    }

    /// Mutably borrow the value held by `node`
    pub fn get_mut(&mut self, node: NodeRef) -> Option<&mut T> {
        self.node_mut(node.0).map(|n| &mut n.value)
    }

    /// Insert `value` as the new front and return its handle
    pub fn push_front(&mut self, value: T) -> NodeRef {
        let idx = self.alloc_node(value);
        self.link_front(idx);
        self.len += 1;
        NodeRef(idx)
    }

    /// Insert `value` as the new back and return its handle
    pub fn push_back(&mut self, value: T) -> NodeRef {
        let idx = self.alloc_node(value);
        self.link_back(idx);
        self.len += 1;
        NodeRef(idx)
    }

    /// Unlink `node` and hand back its value
    ///
    /// `None` and handles to vacated slots are no-ops.
    pub fn remove(&mut self, node: Option<NodeRef>) -> Option<T> {
        let idx = node?.0;
        self.node(idx)?;

        self.unlink(idx);
        let node = self.nodes[idx].take()?;
        self.free_list.push(idx);
        self.len -= 1;
        Some(node.value)
    }

    /// Remove the back node
    pub fn pop_back(&mut self) -> Option<T> {
        self.remove(self.back())
    }

    /// Relink `node` as the front
    ///
    /// `None`, the current front and vacated slots are no-ops.
    pub fn move_to_front(&mut self, node: Option<NodeRef>) {
        let Some(NodeRef(idx)) = node else {
            return;
        };
        if self.head == Some(idx) || self.node(idx).is_none() {
            return;
        }

        self.unlink(idx);
        self.link_front(idx);
    }

    /// Drop every node
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.free_list.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    /// Iterate values front to back
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            cursor: self.head,
            remaining: self.len,
        }
    }

    fn node(&self, idx: usize) -> Option<&Node<T>> {
        self.nodes.get(idx).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, idx: usize) -> Option<&mut Node<T>> {
        self.nodes.get_mut(idx).and_then(Option::as_mut)
    }

    fn alloc_node(&mut self, value: T) -> usize {
        let node = Node {
            value,
            prev: None,
            next: None,
        };
        if let Some(idx) = self.free_list.pop() {
            self.nodes[idx] = Some(node);
            idx
        } else {
            self.nodes.push(Some(node));
            self.nodes.len() - 1
        }
    }

    fn link_front(&mut self, idx: usize) {
        let old_head = self.head;
        if let Some(node) = self.node_mut(idx) {
            node.prev = None;
            node.next = old_head;
        }

        match old_head {
            Some(head_idx) => {
                if let Some(head) = self.node_mut(head_idx) {
                    head.prev = Some(idx);
                }
            }
            None => {
                self.tail = Some(idx);
            }
        }

        self.head = Some(idx);
    }

    fn link_back(&mut self, idx: usize) {
        let old_tail = self.tail;
        if let Some(node) = self.node_mut(idx) {
            node.prev = old_tail;
            node.next = None;
        }

        match old_tail {
            Some(tail_idx) => {
                if let Some(tail) = self.node_mut(tail_idx) {
                    tail.next = Some(idx);
                }
            }
            None => {
                self.head = Some(idx);
            }
        }

        self.tail = Some(idx);
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = match self.node_mut(idx) {
            Some(node) => (node.prev.take(), node.next.take()),
            None => return,
        };

        match prev {
            Some(prev_idx) => {
                if let Some(prev_node) = self.node_mut(prev_idx) {
                    prev_node.next = next;
                }
            }
            None => {
                self.head = next;
            }
        }

        match next {
            Some(next_idx) => {
                if let Some(next_node) = self.node_mut(next_idx) {
                    next_node.prev = prev;
                }
            }
            None => {
                self.tail = prev;
            }
        }
    }
}

/// Front-to-back iterator over a [`RecencyList`]
pub struct Iter<'a, T> {
    list: &'a RecencyList<T>,
    cursor: Option<usize>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.list.node(self.cursor?)?;
        self.cursor = node.next;
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<'a, T> IntoIterator for &'a RecencyList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(list: &RecencyList<i32>) -> Vec<i32> {
        list.iter().copied().collect()
    }

    fn collect_backwards(list: &RecencyList<i32>) -> Vec<i32> {
        let mut out = Vec::new();
        let mut cursor = list.back();
        while let Some(node) = cursor {
            out.push(*list.get(node).unwrap());
            cursor = list.prev(node);
        }
        out
    }

    #[test]
    fn test_list_empty() {
        let mut list: RecencyList<i32> = RecencyList::new();

        assert_eq!(list.len(), 0);
        assert!(list.is_empty());
        assert_eq!(list.front(), None);
        assert_eq!(list.back(), None);

        list.remove(None);
        list.move_to_front(None);
        assert_eq!(list.pop_back(), None);
        assert_eq!(list.len(), 0);
    }

    #[test]
    fn test_list_complex() {
        let mut list = RecencyList::new();

        list.push_front(10); // [10]
        list.push_back(20); // [10, 20]
        list.push_back(30); // [10, 20, 30]
        assert_eq!(list.len(), 3);

        let middle = list.next(list.front().unwrap());
        assert_eq!(list.remove(middle), Some(20)); // [10, 30]
        assert_eq!(list.len(), 2);

        for (i, v) in [40, 50, 60, 70, 80].into_iter().enumerate() {
            if i % 2 == 0 {
                list.push_front(v);
            } else {
                list.push_back(v);
            }
        } // [80, 60, 40, 10, 30, 50, 70]

        assert_eq!(list.len(), 7);
        assert_eq!(list.get(list.front().unwrap()), Some(&80));
        assert_eq!(list.get(list.back().unwrap()), Some(&70));

        list.move_to_front(list.front()); // [80, 60, 40, 10, 30, 50, 70]
        list.move_to_front(list.back()); // [70, 80, 60, 40, 10, 30, 50]

        assert_eq!(collect(&list), vec![70, 80, 60, 40, 10, 30, 50]);
        assert_eq!(collect_backwards(&list), vec![50, 30, 10, 40, 60, 80, 70]);
    }

    #[test]
    fn test_list_remove_sole_node() {
        let mut list = RecencyList::new();

        let node = list.push_front(1);
        assert_eq!(list.front(), Some(node));
        assert_eq!(list.back(), Some(node));

        assert_eq!(list.remove(Some(node)), Some(1));
        assert_eq!(list.front(), None);
        assert_eq!(list.back(), None);
        assert!(list.is_empty());
    }

    #[test]
    fn test_list_remove_front_and_back() {
        let mut list = RecencyList::new();

        let first = list.push_back(1);
        list.push_back(2);
        let third = list.push_back(3);

        list.remove(Some(first));
        assert_eq!(list.get(list.front().unwrap()), Some(&2));

        list.remove(Some(third));
        assert_eq!(list.get(list.back().unwrap()), Some(&2));
        assert_eq!(list.front(), list.back());
        assert_eq!(collect(&list), vec![2]);
    }

    #[test]
    fn test_list_push_back_into_empty() {
        let mut list = RecencyList::new();

        let node = list.push_back(1);

        assert_eq!(list.front(), Some(node));
        assert_eq!(list.back(), Some(node));
    }

    #[test]
    fn test_list_move_second_to_front() {
        let mut list = RecencyList::new();

        let first = list.push_back(1);
        let second = list.push_back(2);
        let third = list.push_back(3);

        list.move_to_front(Some(second));

        assert_eq!(list.front(), Some(second));
        assert_eq!(list.back(), Some(third));
        assert_eq!(list.next(second), Some(first));
        assert_eq!(list.prev(first), Some(second));
        assert_eq!(list.prev(second), None);
    }

    #[test]
    fn test_list_move_back_to_front() {
        let mut list = RecencyList::new();

        list.push_back(1);
        let second = list.push_back(2);
        let third = list.push_back(3);

        list.move_to_front(Some(third));

        assert_eq!(list.front(), Some(third));
        assert_eq!(list.back(), Some(second));
        assert_eq!(list.next(second), None);
        assert_eq!(collect(&list), vec![3, 1, 2]);
        assert_eq!(collect_backwards(&list), vec![2, 1, 3]);
    }

    #[test]
    fn test_list_move_with_two_nodes() {
        let mut list = RecencyList::new();

        let a = list.push_back(1);
        let b = list.push_back(2);

        list.move_to_front(Some(b));
        assert_eq!(list.front(), Some(b));
        assert_eq!(list.back(), Some(a));

        list.move_to_front(Some(a));
        assert_eq!(list.front(), Some(a));
        assert_eq!(list.back(), Some(b));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_list_reuses_freed_slots() {
        let mut list = RecencyList::new();

        let a = list.push_front(1);
        list.push_front(2);
        list.remove(Some(a));

        let c = list.push_front(3);
        assert_eq!(c, a);
        assert_eq!(list.nodes.len(), 2);
        assert_eq!(collect(&list), vec![3, 2]);
    }

    #[test]
    fn test_list_vacated_handle_is_noop() {
        let mut list = RecencyList::new();

        let a = list.push_front(1);
        list.push_front(2);
        list.remove(Some(a));

        assert_eq!(list.remove(Some(a)), None);
        list.move_to_front(Some(a));
        assert_eq!(list.get(a), None);
        assert_eq!(list.len(), 1);
        assert_eq!(collect(&list), vec![2]);
    }

    #[test]
    fn test_list_get_mut() {
        let mut list = RecencyList::new();

        let a = list.push_front(1);
        *list.get_mut(a).unwrap() = 5;

        assert_eq!(list.get(a), Some(&5));
    }

    #[test]
    fn test_list_clear() {
        let mut list = RecencyList::new();

        list.push_front(1);
        list.push_back(2);
        list.clear();

        assert!(list.is_empty());
        assert_eq!(list.front(), None);
        assert_eq!(list.back(), None);
        assert_eq!(list.iter().len(), 0);

        list.push_front(3);
        assert_eq!(collect(&list), vec![3]);
    }
}
