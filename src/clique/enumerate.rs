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
// Bron, C.; Kerbosch, J. (1973). "Algorithm 457: finding all cliques of an undirected graph". Communications of the ACM. 16 (9): 575–577. doi:10.1145/362342.362367.
// Tomita, E.; Tanaka, A.; Takahashi, H. (2006). "The worst-case time complexity for generating all maximal cliques and computational experiments". Theoretical Computer Science. 363 (1): 28–42.

use std::sync::atomic::{AtomicUsize, Ordering};

use fixedbitset::FixedBitSet;
use smallvec::SmallVec;
use tracing::trace;

use crate::clique::Clique;
use crate::config::PivotRule;
use crate::graph::{Adjacency, Graph};
use crate::nodeset::NodeSet;

/// Enumerates every maximal clique of a [`Graph`].
///
/// The enumerator is only a handle: each call to [`iter`](Self::iter) starts
/// a fresh search, so the sequence can be replayed any number of times. With
/// the default [`PivotRule::None`] the order is fully determined by the labels:
/// every frame branches on its smallest remaining candidate first.
///
/// ```
/// use maxclique::{CliqueEnumerator, Graph};
///
/// let graph = Graph::from_edges([("a", "b"), ("b", "c"), ("c", "a"), ("a", "d")]);
/// let cliques: Vec<String> = CliqueEnumerator::new(&graph)
///     .iter()
///     .map(|c| c.to_string())
///     .collect();
/// assert_eq!(cliques, ["a,b,c", "a,d"]);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct CliqueEnumerator<'g, L> {
    graph: &'g Graph<L>,
    pivot: PivotRule,
}

impl<'g, L> CliqueEnumerator<'g, L> {
    pub fn new(graph: &'g Graph<L>) -> Self {
        Self::with_pivot(graph, PivotRule::None)
    }

    pub fn with_pivot(graph: &'g Graph<L>, pivot: PivotRule) -> Self {
        CliqueEnumerator { graph, pivot }
    }

    /// Start a new pass over all maximal cliques.
    pub fn iter(&self) -> Cliques<'g, L> {
        let search = match self.graph.adjacency() {
            Adjacency::Word(rows) => Search::Word(CliqueSearch::new(rows, self.pivot)),
            Adjacency::Wide(rows) => Search::Wide(CliqueSearch::new(rows, self.pivot)),
        };
        Cliques {
            graph: self.graph,
            search,
        }
    }
}

impl<'g, L: Clone> IntoIterator for &CliqueEnumerator<'g, L> {
    type Item = Clique<L>;
    type IntoIter = Cliques<'g, L>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

enum Search<'g> {
    Word(CliqueSearch<'g, u64>),
    Wide(CliqueSearch<'g, FixedBitSet>),
}

/// Lazy sequence of maximal cliques produced by [`CliqueEnumerator::iter`].
pub struct Cliques<'g, L> {
    graph: &'g Graph<L>,
    search: Search<'g>,
}

impl<L> Cliques<'_, L> {
    /// Skip every branch that cannot reach a clique of at least `size` nodes.
    ///
    /// Cliques of `size` or more nodes are still all produced, in the same
    /// relative order. The floor only ever rises.
    pub fn raise_floor(&mut self, size: usize) {
        match &mut self.search {
            Search::Word(search) => search.raise_floor(size),
            Search::Wide(search) => search.raise_floor(size),
        }
    }
}

impl<L: Clone> Iterator for Cliques<'_, L> {
    type Item = Clique<L>;

    fn next(&mut self) -> Option<Self::Item> {
        let indices = match &mut self.search {
            Search::Word(search) => search.next_clique(),
            Search::Wide(search) => search.next_clique(),
        }?;
        let mut indices: SmallVec<[u32; 16]> = SmallVec::from_slice(indices);
        // Index order is label order.
        indices.sort_unstable();
        trace!(size = indices.len(), "maximal clique");
        Some(Clique::from_sorted(
            indices
                .iter()
                .map(|&node| self.graph.label(node).clone())
                .collect(),
        ))
    }
}

/// One level of the search: the candidate set `P`, the excluded set `X`, the
/// nodes this frame still has to branch on, and the node whose branch is
/// currently open (it sits on top of the shared clique stack).
struct Frame<S> {
    candidates: S,
    excluded: S,
    pending: S,
    active: Option<u32>,
}

/// Bron-Kerbosch search over dense node indices, driven by an explicit stack
/// of frames instead of recursion.
pub(crate) struct CliqueSearch<'a, S> {
    adjacency: &'a [S],
    pivot: PivotRule,
    clique: SmallVec<[u32; 16]>,
    stack: Vec<Frame<S>>,
    floor: usize,
    shared_floor: Option<&'a AtomicUsize>,
}

impl<'a, S: NodeSet> CliqueSearch<'a, S> {
    /// Search the whole graph: `R = ∅`, `P = V`, `X = ∅`.
    pub(crate) fn new(adjacency: &'a [S], pivot: PivotRule) -> Self {
        let node_count = adjacency.len();
        let mut search = CliqueSearch {
            adjacency,
            pivot,
            clique: SmallVec::new(),
            stack: Vec::new(),
            floor: 0,
            shared_floor: None,
        };
        // The empty graph has no maximal cliques, not the empty one.
        if node_count > 0 {
            let candidates = S::full(node_count);
            let excluded = S::empty(node_count);
            let pending = branch_set(adjacency, pivot, &candidates, &excluded);
            search.stack.push(Frame {
                candidates,
                excluded,
                pending,
                active: None,
            });
        }
        search
    }

    /// Search only the branch that commits `node` from a top-level frame whose
    /// remaining candidates and exclusions are `candidates` and `excluded`.
    pub(crate) fn branch(
        adjacency: &'a [S],
        pivot: PivotRule,
        candidates: S,
        excluded: S,
        node: u32,
    ) -> Self {
        let mut pending = S::empty(adjacency.len());
        pending.insert(node);
        CliqueSearch {
            adjacency,
            pivot,
            clique: SmallVec::new(),
            stack: vec![Frame {
                candidates,
                excluded,
                pending,
                active: None,
            }],
            floor: 0,
            shared_floor: None,
        }
    }

    /// Also prune against a floor that other searches may raise concurrently.
    pub(crate) fn share_floor(&mut self, floor: &'a AtomicUsize) {
        self.shared_floor = Some(floor);
    }

    pub(crate) fn raise_floor(&mut self, size: usize) {
        self.floor = self.floor.max(size);
    }

    #[inline]
    fn current_floor(&self) -> usize {
        match self.shared_floor {
            Some(shared) => self.floor.max(shared.load(Ordering::Relaxed)),
            None => self.floor,
        }
    }

    /// Advance to the next maximal clique. The returned members are in the
    /// order they were committed, not sorted.
    pub(crate) fn next_clique(&mut self) -> Option<&[u32]> {
        let adjacency = self.adjacency;
        loop {
            let floor = self.current_floor();
            let frame = self.stack.last_mut()?;

            // Close the branch explored last time round: its node may not
            // extend any sibling clique.
            if let Some(v) = frame.active.take() {
                self.clique.pop();
                frame.candidates.remove(v);
                frame.excluded.insert(v);
            }

            let Some(v) = frame.pending.first() else {
                self.stack.pop();
                continue;
            };
            frame.pending.remove(v);

            let neighbors = &adjacency[v as usize];
            let candidates = frame.candidates.intersection(neighbors);
            let excluded = frame.excluded.intersection(neighbors);
            frame.active = Some(v);
            self.clique.push(v);

            if self.clique.len() + candidates.len() < floor {
                continue;
            }
            if candidates.is_empty() {
                if excluded.is_empty() {
                    return Some(self.clique.as_slice());
                }
                continue;
            }
            let pending = branch_set(adjacency, self.pivot, &candidates, &excluded);
            self.stack.push(Frame {
                candidates,
                excluded,
                pending,
                active: None,
            });
        }
    }
}

/// The nodes a frame with candidates `P` and exclusions `X` branches on.
pub(crate) fn branch_set<S: NodeSet>(
    adjacency: &[S],
    pivot: PivotRule,
    candidates: &S,
    excluded: &S,
) -> S {
    match pivot {
        PivotRule::None => candidates.clone(),
        PivotRule::MaxDegree => {
            let mut pivot: Option<u32> = None;
            let mut max_neighbors_in_candidates = 0usize;
            let mut consider = |u: u32| {
                let neighbors_in_candidates = candidates.intersection_len(&adjacency[u as usize]);
                if pivot.is_none() || neighbors_in_candidates > max_neighbors_in_candidates {
                    max_neighbors_in_candidates = neighbors_in_candidates;
                    pivot = Some(u);
                }
            };
            candidates.for_each(&mut consider);
            excluded.for_each(&mut consider);
            match pivot {
                Some(u) => candidates.difference(&adjacency[u as usize]),
                None => candidates.clone(),
            }
        }
    }
}
