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

//! Undirected, unweighted graph over labelled nodes.
//!
//! A [`Graph`] is built once from a stream of edge pairs through
//! [`GraphBuilder`] and is immutable afterwards. Labels are interned to dense
//! `u32` indices assigned in ascending label order, so the smallest index in
//! any node set is always the lexicographically smallest label.

use std::borrow::Borrow;
use std::hash::Hash;

use fixedbitset::FixedBitSet;
use foldhash::{HashMap, HashMapExt};
use indexmap::IndexSet;
use petgraph::graph::UnGraph;
use petgraph::visit::{EdgeRef, IntoEdgeReferences};
use tracing::debug;

use crate::nodeset::{NodeSet, WORD_BITS};

type LabelSet<L> = IndexSet<L, foldhash::fast::RandomState>;

/// Neighbor rows, one per node index.
#[derive(Clone, Debug)]
pub(crate) enum Adjacency {
    /// At most [`WORD_BITS`] nodes: one machine word per row.
    Word(Vec<u64>),
    /// Larger graphs.
    Wide(Vec<FixedBitSet>),
}

/// An immutable undirected graph whose nodes are identified by labels.
///
/// The neighbor relation is symmetric and has no self loops. Every node in the
/// graph appeared in at least one edge pair.
#[derive(Clone, Debug)]
pub struct Graph<L = String> {
    labels: LabelSet<L>,
    adjacency: Adjacency,
    edge_count: usize,
}

/// Accumulates edge pairs and produces a [`Graph`].
///
/// Duplicate edges (in either orientation) collapse to one. Self-pairs are
/// dropped, since a node cannot be adjacent to itself in any clique.
#[derive(Clone, Debug)]
pub struct GraphBuilder<L = String> {
    index: HashMap<L, u32>,
    names: Vec<L>,
    edges: Vec<(u32, u32)>,
    dropped_self_pairs: usize,
}

impl<L: Ord + Hash + Clone> Default for GraphBuilder<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: Ord + Hash + Clone> GraphBuilder<L> {
    pub fn new() -> Self {
        GraphBuilder {
            index: HashMap::new(),
            names: Vec::new(),
            edges: Vec::new(),
            dropped_self_pairs: 0,
        }
    }

    fn intern(&mut self, label: L) -> u32 {
        if let Some(&idx) = self.index.get(&label) {
            return idx;
        }
        let idx = self.names.len() as u32;
        self.names.push(label.clone());
        self.index.insert(label, idx);
        idx
    }

    /// Record an undirected edge between `a` and `b`.
    pub fn add_edge(&mut self, a: L, b: L) -> &mut Self {
        if a == b {
            self.dropped_self_pairs += 1;
            return self;
        }
        let s = self.intern(a);
        let t = self.intern(b);
        self.edges.push((s, t));
        self
    }

    /// Record every pair yielded by `edges`.
    pub fn extend<I: IntoIterator<Item = (L, L)>>(&mut self, edges: I) -> &mut Self {
        for (a, b) in edges {
            self.add_edge(a, b);
        }
        self
    }

    /// Number of distinct labels seen so far.
    pub fn node_count(&self) -> usize {
        self.names.len()
    }

    /// Freeze the accumulated edges into a [`Graph`].
    pub fn build(self) -> Graph<L> {
        let GraphBuilder {
            names,
            edges,
            dropped_self_pairs,
            ..
        } = self;
        let node_count = names.len();

        // Renumber so that index order is label order.
        let mut order: Vec<u32> = (0..node_count as u32).collect();
        order.sort_by(|&a, &b| names[a as usize].cmp(&names[b as usize]));
        let mut rank = vec![0u32; node_count];
        for (new, &old) in order.iter().enumerate() {
            rank[old as usize] = new as u32;
        }
        let mut slots: Vec<Option<L>> = names.into_iter().map(Some).collect();
        let mut labels: LabelSet<L> =
            IndexSet::with_capacity_and_hasher(node_count, Default::default());
        for &old in &order {
            if let Some(label) = slots[old as usize].take() {
                labels.insert(label);
            }
        }

        let adjacency = if node_count <= WORD_BITS {
            Adjacency::Word(fill_rows(node_count, &edges, &rank))
        } else {
            Adjacency::Wide(fill_rows(node_count, &edges, &rank))
        };
        let edge_count = match &adjacency {
            Adjacency::Word(rows) => count_edges(rows),
            Adjacency::Wide(rows) => count_edges(rows),
        };

        debug!(
            nodes = node_count,
            edges = edge_count,
            dropped_self_pairs,
            "built graph"
        );
        Graph {
            labels,
            adjacency,
            edge_count,
        }
    }
}

fn fill_rows<S: NodeSet>(node_count: usize, edges: &[(u32, u32)], rank: &[u32]) -> Vec<S> {
    let mut rows = vec![S::empty(node_count); node_count];
    for &(s, t) in edges {
        let (s, t) = (rank[s as usize], rank[t as usize]);
        rows[s as usize].insert(t);
        rows[t as usize].insert(s);
    }
    rows
}

fn count_edges<S: NodeSet>(rows: &[S]) -> usize {
    rows.iter().map(NodeSet::len).sum::<usize>() / 2
}

impl<L: Ord + Hash + Clone> Graph<L> {
    /// Build a graph directly from a sequence of edge pairs.
    pub fn from_edges<I: IntoIterator<Item = (L, L)>>(edges: I) -> Self {
        let mut builder = GraphBuilder::new();
        builder.extend(edges);
        builder.build()
    }

    /// Import an undirected petgraph graph, using node weights as labels.
    ///
    /// Nodes without incident edges are not imported, and nodes sharing a
    /// weight are merged into one label.
    pub fn from_petgraph<E>(graph: &UnGraph<L, E>) -> Self {
        let mut builder = GraphBuilder::new();
        for edge in graph.edge_references() {
            builder.add_edge(
                graph[edge.source()].clone(),
                graph[edge.target()].clone(),
            );
        }
        builder.build()
    }
}

impl<L> Graph<L> {
    pub fn node_count(&self) -> usize {
        self.labels.len()
    }

    /// Number of distinct undirected edges.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// All labels in ascending order.
    pub fn labels(&self) -> impl Iterator<Item = &L> + '_ {
        self.labels.iter()
    }

    /// Label for a dense node index. Panics if `idx` is out of range.
    pub(crate) fn label(&self, idx: u32) -> &L {
        &self.labels[idx as usize]
    }

    pub(crate) fn adjacency(&self) -> &Adjacency {
        &self.adjacency
    }
}

impl<L: Hash + Eq> Graph<L> {

    pub fn contains<Q>(&self, label: &Q) -> bool
    where
        L: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.labels.contains(label)
    }

    /// Neighbors of `label` in ascending order; empty if the label is unknown.
    pub fn neighbors<Q>(&self, label: &Q) -> Vec<&L>
    where
        L: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let Some(idx) = self.index_of(label) else {
            return Vec::new();
        };
        let mut out = Vec::new();
        self.for_each_neighbor(idx, |n| out.push(self.label(n)));
        out
    }

    pub fn degree<Q>(&self, label: &Q) -> usize
    where
        L: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        match (self.index_of(label), &self.adjacency) {
            (Some(idx), Adjacency::Word(rows)) => NodeSet::len(&rows[idx as usize]),
            (Some(idx), Adjacency::Wide(rows)) => NodeSet::len(&rows[idx as usize]),
            (None, _) => 0,
        }
    }

    pub fn is_adjacent<Q>(&self, a: &Q, b: &Q) -> bool
    where
        L: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        match (self.index_of(a), self.index_of(b)) {
            (Some(a), Some(b)) => self.adjacent(a, b),
            _ => false,
        }
    }

    /// Whether `members` are distinct nodes of this graph that are pairwise adjacent.
    pub fn is_clique(&self, members: &[L]) -> bool {
        let Some(indices) = self.indices_of(members) else {
            return false;
        };
        indices.iter().enumerate().all(|(i, &a)| {
            indices[i + 1..]
                .iter()
                .all(|&b| a != b && self.adjacent(a, b))
        })
    }

    /// Whether `members` form a clique that no other node extends.
    pub fn is_maximal_clique(&self, members: &[L]) -> bool {
        if members.is_empty() || !self.is_clique(members) {
            return false;
        }
        let Some(indices) = self.indices_of(members) else {
            return false;
        };
        (0..self.node_count() as u32)
            .filter(|v| !indices.contains(v))
            .all(|v| indices.iter().any(|&m| !self.adjacent(v, m)))
    }

    pub(crate) fn index_of<Q>(&self, label: &Q) -> Option<u32>
    where
        L: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.labels.get_index_of(label).map(|idx| idx as u32)
    }

    fn indices_of(&self, members: &[L]) -> Option<Vec<u32>> {
        members.iter().map(|m| self.index_of(m)).collect()
    }

    fn adjacent(&self, a: u32, b: u32) -> bool {
        match &self.adjacency {
            Adjacency::Word(rows) => NodeSet::contains(&rows[a as usize], b),
            Adjacency::Wide(rows) => NodeSet::contains(&rows[a as usize], b),
        }
    }

    fn for_each_neighbor(&self, idx: u32, f: impl FnMut(u32)) {
        match &self.adjacency {
            Adjacency::Word(rows) => rows[idx as usize].for_each(f),
            Adjacency::Wide(rows) => rows[idx as usize].for_each(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Adjacency, Graph, GraphBuilder};
    use petgraph::graph::UnGraph;

    fn graph(edges: &[(&str, &str)]) -> Graph {
        Graph::from_edges(edges.iter().map(|&(a, b)| (a.to_string(), b.to_string())))
    }

    fn labels(graph: &Graph) -> Vec<&str> {
        graph.labels().map(String::as_str).collect()
    }

    #[test]
    fn neighbors_are_symmetric() {
        let g = graph(&[("b", "a"), ("c", "b")]);
        assert_eq!(g.node_count(), 3);
        assert_eq!(g.edge_count(), 2);
        assert!(g.is_adjacent("a", "b"));
        assert!(g.is_adjacent("b", "a"));
        assert!(!g.is_adjacent("a", "c"));
        assert_eq!(g.neighbors("b"), vec!["a", "c"]);
        assert_eq!(g.degree("b"), 2);
    }

    #[test]
    fn labels_are_sorted_regardless_of_input_order() {
        let g = graph(&[("zeta", "alpha"), ("mid", "zeta"), ("beta", "alpha")]);
        assert_eq!(labels(&g), vec!["alpha", "beta", "mid", "zeta"]);
    }

    #[test]
    fn duplicate_edges_are_idempotent() {
        let g = graph(&[("a", "b"), ("b", "a"), ("a", "b")]);
        assert_eq!(g.node_count(), 2);
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.neighbors("a"), vec!["b"]);
    }

    #[test]
    fn self_pairs_are_dropped() {
        let g = graph(&[("a", "a"), ("a", "b")]);
        assert_eq!(g.edge_count(), 1);
        assert!(!g.is_adjacent("a", "a"));
        assert_eq!(g.neighbors("a"), vec!["b"]);

        // A label that only ever appears in a self-pair never becomes a node.
        let g = graph(&[("x", "x")]);
        assert!(g.is_empty());
        assert!(!g.contains("x"));
    }

    #[test]
    fn unknown_labels_have_no_neighbors() {
        let g = graph(&[("a", "b")]);
        assert!(!g.contains("q"));
        assert!(g.neighbors("q").is_empty());
        assert_eq!(g.degree("q"), 0);
        assert!(!g.is_adjacent("a", "q"));
    }

    #[test]
    fn clique_checks() {
        let g = graph(&[("a", "b"), ("b", "c"), ("c", "a"), ("a", "d")]);
        let s = |xs: &[&str]| xs.iter().map(|x| x.to_string()).collect::<Vec<_>>();
        assert!(g.is_clique(&s(&["a", "b", "c"])));
        assert!(g.is_clique(&s(&["a", "b"])));
        assert!(!g.is_clique(&s(&["b", "d"])));
        assert!(!g.is_clique(&s(&["a", "a"])));
        assert!(!g.is_clique(&s(&["a", "nope"])));
        assert!(g.is_maximal_clique(&s(&["a", "b", "c"])));
        assert!(g.is_maximal_clique(&s(&["a", "d"])));
        assert!(!g.is_maximal_clique(&s(&["a", "b"])));
        assert!(!g.is_maximal_clique(&[]));
    }

    #[test]
    fn builder_chains_and_counts() {
        let mut builder = GraphBuilder::new();
        builder.add_edge(1u32, 2).add_edge(2, 3).add_edge(3, 3);
        assert_eq!(builder.node_count(), 3);
        let g = builder.build();
        assert_eq!(g.edge_count(), 2);
        assert_eq!(g.labels().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn large_graphs_use_wide_rows() {
        let edges: Vec<(u32, u32)> = (0..100).map(|i| (i, (i + 1) % 100)).collect();
        let g = Graph::from_edges(edges);
        assert_eq!(g.node_count(), 100);
        assert_eq!(g.edge_count(), 100);
        assert!(matches!(g.adjacency(), Adjacency::Wide(_)));
        assert_eq!(g.neighbors(&0u32), vec![&1, &99]);

        let small = graph(&[("a", "b")]);
        assert!(matches!(small.adjacency(), Adjacency::Word(_)));
    }

    #[test]
    fn imports_petgraph_edges() {
        let mut pg: UnGraph<&str, ()> = UnGraph::new_undirected();
        let a = pg.add_node("a");
        let b = pg.add_node("b");
        let c = pg.add_node("c");
        pg.add_node("isolated");
        pg.add_edge(a, b, ());
        pg.add_edge(b, c, ());
        pg.add_edge(c, a, ());
        pg.add_edge(c, c, ());

        let g = Graph::from_petgraph(&pg);
        assert_eq!(g.node_count(), 3);
        assert_eq!(g.edge_count(), 3);
        assert!(!g.contains(&"isolated"));
        assert!(g.is_clique(&["a", "b", "c"]));
    }
}
