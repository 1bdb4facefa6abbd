// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Sets of dense node indices used for adjacency rows and search frames.
//!
//! Graphs with at most [`WORD_BITS`] nodes keep every set in a single `u64`;
//! larger graphs fall back to [`FixedBitSet`]. The search is written once
//! against [`NodeSet`] and monomorphised for both.

use fixedbitset::FixedBitSet;

/// Largest node count for which a single machine word holds a node set.
pub(crate) const WORD_BITS: usize = 64;

/// A set of node indices in `0..capacity`, iterated in ascending order.
pub(crate) trait NodeSet: Clone + Send + Sync {
    /// The empty set over `capacity` nodes.
    fn empty(capacity: usize) -> Self;

    /// The set `{0, 1, .., capacity - 1}`.
    fn full(capacity: usize) -> Self;

    fn is_empty(&self) -> bool;

    fn len(&self) -> usize;

    fn contains(&self, node: u32) -> bool;

    fn insert(&mut self, node: u32);

    fn remove(&mut self, node: u32);

    /// Smallest member, if any.
    fn first(&self) -> Option<u32>;

    fn intersection(&self, other: &Self) -> Self;

    /// Members of `self` that are not in `other`.
    fn difference(&self, other: &Self) -> Self;

    /// Number of members shared with `other`.
    fn intersection_len(&self, other: &Self) -> usize;

    /// Calls `f` for every member, in ascending order.
    fn for_each(&self, f: impl FnMut(u32));
}

impl NodeSet for u64 {
    #[inline]
    fn empty(_capacity: usize) -> Self {
        0
    }

    #[inline]
    fn full(capacity: usize) -> Self {
        debug_assert!(capacity <= WORD_BITS);
        if capacity == WORD_BITS {
            u64::MAX
        } else {
            (1u64 << capacity) - 1
        }
    }

    #[inline]
    fn is_empty(&self) -> bool {
        *self == 0
    }

    #[inline]
    fn len(&self) -> usize {
        self.count_ones() as usize
    }

    #[inline]
    fn contains(&self, node: u32) -> bool {
        (*self & (1u64 << node)) != 0
    }

    #[inline]
    fn insert(&mut self, node: u32) {
        *self |= 1u64 << node;
    }

    #[inline]
    fn remove(&mut self, node: u32) {
        *self &= !(1u64 << node);
    }

    #[inline]
    fn first(&self) -> Option<u32> {
        if *self == 0 {
            None
        } else {
            Some(self.trailing_zeros())
        }
    }

    #[inline]
    fn intersection(&self, other: &Self) -> Self {
        *self & *other
    }

    #[inline]
    fn difference(&self, other: &Self) -> Self {
        *self & !*other
    }

    #[inline]
    fn intersection_len(&self, other: &Self) -> usize {
        (*self & *other).count_ones() as usize
    }

    #[inline]
    fn for_each(&self, mut f: impl FnMut(u32)) {
        let mut mask = *self;
        while mask != 0 {
            let bit = mask.trailing_zeros();
            mask &= !(1u64 << bit);
            f(bit);
        }
    }
}

impl NodeSet for FixedBitSet {
    #[inline]
    fn empty(capacity: usize) -> Self {
        FixedBitSet::with_capacity(capacity)
    }

    #[inline]
    fn full(capacity: usize) -> Self {
        let mut set = FixedBitSet::with_capacity(capacity);
        set.insert_range(..);
        set
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.ones().next().is_none()
    }

    #[inline]
    fn len(&self) -> usize {
        self.count_ones(..)
    }

    #[inline]
    fn contains(&self, node: u32) -> bool {
        FixedBitSet::contains(self, node as usize)
    }

    #[inline]
    fn insert(&mut self, node: u32) {
        FixedBitSet::insert(self, node as usize);
    }

    #[inline]
    fn remove(&mut self, node: u32) {
        self.set(node as usize, false);
    }

    #[inline]
    fn first(&self) -> Option<u32> {
        self.ones().next().map(|bit| bit as u32)
    }

    #[inline]
    fn intersection(&self, other: &Self) -> Self {
        let mut out = self.clone();
        out.intersect_with(other);
        out
    }

    #[inline]
    fn difference(&self, other: &Self) -> Self {
        let mut out = self.clone();
        out.difference_with(other);
        out
    }

    #[inline]
    fn intersection_len(&self, other: &Self) -> usize {
        self.intersection_count(other)
    }

    #[inline]
    fn for_each(&self, mut f: impl FnMut(u32)) {
        for bit in self.ones() {
            f(bit as u32);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{NodeSet, WORD_BITS};
    use fixedbitset::FixedBitSet;

    fn members<S: NodeSet>(set: &S) -> Vec<u32> {
        let mut out = Vec::new();
        set.for_each(|v| out.push(v));
        out
    }

    fn exercise<S: NodeSet>(capacity: usize) {
        let mut a = S::empty(capacity);
        assert!(a.is_empty());
        assert_eq!(a.first(), None);
        for v in [5, 1, 9] {
            a.insert(v);
        }
        assert_eq!(a.len(), 3);
        assert_eq!(a.first(), Some(1));
        assert!(a.contains(9));
        assert!(!a.contains(2));

        let mut b = S::empty(capacity);
        b.insert(9);
        b.insert(3);
        assert_eq!(members(&a.intersection(&b)), vec![9]);
        assert_eq!(a.intersection_len(&b), 1);
        assert_eq!(members(&a.difference(&b)), vec![1, 5]);

        a.remove(1);
        assert_eq!(a.first(), Some(5));
        assert_eq!(members(&a), vec![5, 9]);
    }

    #[test]
    fn word_set_operations() {
        exercise::<u64>(16);
    }

    #[test]
    fn wide_set_operations() {
        exercise::<FixedBitSet>(200);
    }

    #[test]
    fn full_sets_cover_capacity() {
        assert_eq!(<u64 as NodeSet>::full(WORD_BITS).len(), WORD_BITS);
        assert_eq!(<u64 as NodeSet>::full(3), 0b111);
        assert_eq!(<u64 as NodeSet>::full(0), 0);
        let wide = <FixedBitSet as NodeSet>::full(130);
        assert_eq!(NodeSet::len(&wide), 130);
        assert_eq!(members(&wide).last(), Some(&129));
    }
}
