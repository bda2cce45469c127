/*!
A set over a fixed index range with constant-time insert, remove, and membership tests.

In other words, a presence array: a dense vector of the current members backed by a companion vector which tracks the position of each possible element in the dense vector, or notes its absence.

Capacity is fixed at construction and the structure never reallocates, so membership churn in an inner loop is allocation-free.
Removal followed by reinsertion restores membership exactly, though not necessarily the iteration order, which is unspecified.

```rust
# use gauss_xor::generic::sparse_set::SparseSet;
let mut set = SparseSet::new(8);

set.insert(3);
set.insert(5);
assert!(set.contains(3));

set.remove(3);
assert!(!set.contains(3));
assert_eq!(set.len(), 1);
```
*/

const ABSENT: u32 = u32::MAX;

/// The sparse set struct.
#[derive(Clone)]
pub struct SparseSet {
    /// The current members, in unspecified order.
    dense: Vec<u32>,

    /// For each possible element, its position in `dense`, or [ABSENT].
    sparse: Vec<u32>,
}

impl SparseSet {
    /// An empty set able to hold elements in `[0, capacity)`.
    pub fn new(capacity: usize) -> Self {
        SparseSet {
            dense: Vec::with_capacity(capacity),
            sparse: vec![ABSENT; capacity],
        }
    }

    /// A count of the current members.
    pub fn len(&self) -> usize {
        self.dense.len()
    }

    /// True if the set has no members.
    pub fn is_empty(&self) -> bool {
        self.dense.is_empty()
    }

    /// True if `element` is a member.
    pub fn contains(&self, element: u32) -> bool {
        self.sparse[element as usize] != ABSENT
    }

    /// Inserts `element`, returning true if it was not already a member.
    pub fn insert(&mut self, element: u32) -> bool {
        if self.contains(element) {
            return false;
        }
        self.sparse[element as usize] = self.dense.len() as u32;
        self.dense.push(element);
        true
    }

    /// Removes `element`, returning true if it was a member.
    ///
    /// The last member is swapped into the vacated dense slot, so removal does not shift other members.
    pub fn remove(&mut self, element: u32) -> bool {
        let position = self.sparse[element as usize];
        if position == ABSENT {
            return false;
        }
        let last = self.dense.pop().unwrap_or(element);
        if last != element {
            self.dense[position as usize] = last;
            self.sparse[last as usize] = position;
        }
        self.sparse[element as usize] = ABSENT;
        true
    }

    /// The member at `position` in the dense vector.
    ///
    /// Positions below [len](SparseSet::len) are stable across mutation of *other* elements, which supports indexed traversal while the set is updated.
    pub fn member_at(&self, position: usize) -> u32 {
        self.dense[position]
    }

    /// The current members as a slice, in unspecified order.
    pub fn as_slice(&self) -> &[u32] {
        &self.dense
    }

    /// An iterator over the current members, in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.dense.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_remove_round_trip() {
        let mut set = SparseSet::new(16);
        for element in [1, 4, 9, 15] {
            assert!(set.insert(element));
        }
        assert!(!set.insert(4));
        assert_eq!(set.len(), 4);

        assert!(set.remove(4));
        assert!(!set.remove(4));
        assert!(!set.contains(4));

        assert!(set.insert(4));
        let mut members = set.as_slice().to_vec();
        members.sort_unstable();
        assert_eq!(members, vec![1, 4, 9, 15]);
    }

    #[test]
    fn swap_removal_keeps_dense_packed() {
        let mut set = SparseSet::new(4);
        set.insert(0);
        set.insert(1);
        set.insert(2);
        set.remove(0);
        assert_eq!(set.len(), 2);
        for position in 0..set.len() {
            assert!(set.contains(set.member_at(position)));
        }
    }
}
