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

//! Maximum clique selection.
//!
//! The maximum is the first maximal clique of greatest size in enumeration
//! order. [`select_maximum`] applies that rule to any clique sequence;
//! [`maximum_clique`] runs the search itself and prunes every branch that
//! cannot beat the best clique found so far, which returns the same clique
//! as selecting over the full enumeration.

use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;
use tracing::{debug, info};

use crate::clique::enumerate::{branch_set, CliqueSearch};
use crate::clique::Clique;
use crate::config::{PivotRule, SearchConfig};
use crate::error::{CliqueError, Result};
use crate::graph::{Adjacency, Graph};
use crate::nodeset::NodeSet;

/// Pick the first clique of greatest size from `cliques`.
///
/// Fails with [`CliqueError::EmptyGraph`] when the sequence is empty, which is
/// exactly when the enumerated graph has no nodes.
pub fn select_maximum<L, I>(cliques: I) -> Result<Clique<L>>
where
    I: IntoIterator<Item = Clique<L>>,
{
    let mut best: Option<Clique<L>> = None;
    for clique in cliques {
        if best.as_ref().map_or(true, |b| clique.len() > b.len()) {
            best = Some(clique);
        }
    }
    best.ok_or(CliqueError::EmptyGraph)
}

/// Find the maximum clique of `graph`.
///
/// With [`SearchConfig::parallel`] unset this is equivalent to
/// `select_maximum(CliqueEnumerator::with_pivot(graph, config.pivot).iter())`.
/// The parallel search splits the top-level branches across the rayon pool
/// and returns the same clique.
pub fn maximum_clique<L>(graph: &Graph<L>, config: &SearchConfig) -> Result<Clique<L>>
where
    L: Clone,
{
    if graph.is_empty() {
        return Err(CliqueError::EmptyGraph);
    }
    let mut indices = match (graph.adjacency(), config.parallel) {
        (Adjacency::Word(rows), false) => best_sequential(rows, config.pivot),
        (Adjacency::Wide(rows), false) => best_sequential(rows, config.pivot),
        (Adjacency::Word(rows), true) => best_parallel(rows, config.pivot),
        (Adjacency::Wide(rows), true) => best_parallel(rows, config.pivot),
    }
    .ok_or(CliqueError::EmptyGraph)?;
    indices.sort_unstable();
    info!(
        size = indices.len(),
        nodes = graph.node_count(),
        parallel = config.parallel,
        "selected maximum clique"
    );
    Ok(Clique::from_sorted(
        indices.into_iter().map(|i| graph.label(i).clone()).collect(),
    ))
}

fn best_sequential<S: NodeSet>(adjacency: &[S], pivot: PivotRule) -> Option<Vec<u32>> {
    let mut search = CliqueSearch::new(adjacency, pivot);
    let mut best: Option<Vec<u32>> = None;
    while let Some(clique) = search.next_clique() {
        if best.as_ref().map_or(true, |b| clique.len() > b.len()) {
            let size = clique.len();
            best = Some(clique.to_vec());
            // Ties keep the earlier clique, so only strictly larger ones matter.
            search.raise_floor(size + 1);
        }
    }
    best
}

/// Top-level frame state for every branch of the root, in branch order.
fn root_branches<S: NodeSet>(adjacency: &[S], pivot: PivotRule) -> Vec<(S, S, u32)> {
    let node_count = adjacency.len();
    let mut candidates = S::full(node_count);
    let mut excluded = S::empty(node_count);
    let pending = branch_set(adjacency, pivot, &candidates, &excluded);
    let mut branches = Vec::with_capacity(pending.len());
    pending.for_each(|v| {
        branches.push((candidates.clone(), excluded.clone(), v));
        candidates.remove(v);
        excluded.insert(v);
    });
    branches
}

fn best_parallel<S: NodeSet>(adjacency: &[S], pivot: PivotRule) -> Option<Vec<u32>> {
    let branches = root_branches(adjacency, pivot);
    debug!(branches = branches.len(), "dispatching top-level branches");
    // Largest clique size seen by any branch. Branches prune below it but keep
    // ties, since an earlier branch wins a tie against a later one.
    let best_size = AtomicUsize::new(0);

    branches
        .into_par_iter()
        .enumerate()
        .filter_map(|(position, (candidates, excluded, v))| {
            let mut search = CliqueSearch::branch(adjacency, pivot, candidates, excluded, v);
            search.share_floor(&best_size);
            let mut best: Option<Vec<u32>> = None;
            while let Some(clique) = search.next_clique() {
                if best.as_ref().map_or(true, |b| clique.len() > b.len()) {
                    let size = clique.len();
                    best = Some(clique.to_vec());
                    search.raise_floor(size + 1);
                    best_size.fetch_max(size, Ordering::Relaxed);
                }
            }
            best.map(|clique| (position, clique))
        })
        .reduce_with(|a, b| {
            let a_wins = a.1.len() > b.1.len() || (a.1.len() == b.1.len() && a.0 < b.0);
            if a_wins {
                a
            } else {
                b
            }
        })
        .map(|(_, clique)| clique)
}
