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

//! Exact maximum clique search over undirected, unweighted graphs.
//!
//! A [`Graph`] is built once from edge pairs, a [`CliqueEnumerator`] lazily
//! produces every maximal clique with the Bron-Kerbosch algorithm, and
//! [`maximum_clique`] picks the largest one.
//!
//! ```
//! use maxclique::{maximum_clique, Graph, SearchConfig};
//!
//! let graph = Graph::from_edges([("a", "b"), ("b", "c"), ("c", "a"), ("a", "d")]);
//! let clique = maximum_clique(&graph, &SearchConfig::default()).unwrap();
//! assert_eq!(clique.to_string(), "a,b,c");
//! ```

pub mod clique;
pub mod config;
pub mod error;
pub mod graph;
pub mod io;
mod nodeset;

pub use clique::enumerate::{CliqueEnumerator, Cliques};
pub use clique::select::{maximum_clique, select_maximum};
pub use clique::Clique;
pub use config::{PivotRule, SearchConfig};
pub use error::{CliqueError, Result};
pub use graph::{Graph, GraphBuilder};

/// Parse an edge list and render its maximum clique, e.g. `"a,b,c"`.
pub fn solve_edge_list(input: &str, config: &SearchConfig) -> Result<String> {
    let edges = io::read_edges(input.as_bytes(), io::MalformedPolicy::Reject)?;
    let graph = Graph::from_edges(edges);
    Ok(maximum_clique(&graph, config)?.to_string())
}

#[cfg(test)]
mod tests {
    use super::{solve_edge_list, CliqueError, SearchConfig};

    #[test]
    fn solves_edge_list_text() {
        let input = "kh-tc\nqp-kh\nde-cg\nka-co\nyn-aq\nqp-ub\ncg-tb\nvc-aq\ntb-ka\nwh-tc\n\
                     yn-cg\nkh-ub\nta-co\nde-co\ntc-td\ntb-wq\nwh-td\nta-ka\ntd-qp\naq-cg\n\
                     wq-ub\nub-vc\nde-ta\nwq-aq\nwq-vc\nwh-yn\nka-de\nkh-ta\nco-tc\nwh-qp\n\
                     tb-vc\ntd-yn\n";
        let answer = solve_edge_list(input, &SearchConfig::default()).unwrap();
        assert_eq!(answer, "co,de,ka,ta");
    }

    #[test]
    fn empty_input_has_no_answer() {
        assert!(matches!(
            solve_edge_list("\n\n", &SearchConfig::default()),
            Err(CliqueError::EmptyGraph)
        ));
    }

    #[test]
    fn malformed_input_is_reported() {
        assert!(matches!(
            solve_edge_list("a-b\nb_c\n", &SearchConfig::default()),
            Err(CliqueError::MalformedEdge { line: 2, .. })
        ));
    }
}
