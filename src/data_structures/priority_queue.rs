use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::fmt::Debug;

/// Min-priority queue keyed on tentative distance.
///
/// No decrease-key: callers push duplicates and skip stale entries on pop.
#[derive(Debug)]
pub struct BinaryHeapWrapper<V, P>
where
    V: Copy + Eq + Debug + Ord,
    P: Copy + Debug + Ord,
{
    heap: BinaryHeap<Reverse<(P, V)>>,
}

impl<V, P> Default for BinaryHeapWrapper<V, P>
where
    V: Copy + Eq + Debug + Ord,
    P: Copy + Debug + Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V, P> BinaryHeapWrapper<V, P>
where
    V: Copy + Eq + Debug + Ord,
    P: Copy + Debug + Ord,
{
    /// Creates a new empty priority queue
    pub fn new() -> Self {
        BinaryHeapWrapper {
            heap: BinaryHeap::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Pushes `vertex` with the given priority
    pub fn push(&mut self, vertex: V, priority: P) {
        self.heap.push(Reverse((priority, vertex)));
    }

    /// Removes the entry with the smallest priority (ties: smallest vertex)
    pub fn pop(&mut self) -> Option<(V, P)> {
        self.heap.pop().map(|Reverse((priority, vertex))| (vertex, priority))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ordered_float::OrderedFloat;

    #[test]
    fn test_pops_in_ascending_priority() {
        let mut queue = BinaryHeapWrapper::new();
        queue.push(3usize, OrderedFloat(9.0));
        queue.push(1usize, OrderedFloat(2.5));
        queue.push(2usize, OrderedFloat(2.5));
        assert_eq!(queue.len(), 3);

        assert_eq!(queue.pop(), Some((1, OrderedFloat(2.5))));
        assert_eq!(queue.pop(), Some((2, OrderedFloat(2.5))));
        assert_eq!(queue.pop(), Some((3, OrderedFloat(9.0))));
        assert!(queue.is_empty());
    }
}
