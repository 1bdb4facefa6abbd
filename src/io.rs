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

//! Edge-list ingestion and result reports.
//!
//! The input format is one `<node>-<node>` record per line. Blank lines are
//! ignored and whitespace around labels is trimmed.

use std::io::BufRead;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::clique::Clique;
use crate::error::{CliqueError, Result};

/// What to do with a record that is not exactly two non-empty labels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MalformedPolicy {
    /// Fail the whole read on the first malformed record.
    #[default]
    Reject,
    /// Log the record and carry on.
    Skip,
}

/// Parse one `<node>-<node>` record. `line` is only used for error reporting.
pub fn parse_edge(line: usize, record: &str) -> Result<(String, String)> {
    let malformed = || CliqueError::MalformedEdge {
        line,
        record: record.to_string(),
    };
    let mut parts = record.trim().split('-');
    let (Some(a), Some(b), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(malformed());
    };
    let (a, b) = (a.trim(), b.trim());
    if a.is_empty() || b.is_empty() {
        return Err(malformed());
    }
    Ok((a.to_string(), b.to_string()))
}

/// Read every edge record from `reader`.
pub fn read_edges<R: BufRead>(reader: R, policy: MalformedPolicy) -> Result<Vec<(String, String)>> {
    let mut edges = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match (parse_edge(idx + 1, &line), policy) {
            (Ok(edge), _) => edges.push(edge),
            (Err(err), MalformedPolicy::Skip) => warn!("skipping record: {err}"),
            (Err(err), MalformedPolicy::Reject) => return Err(err),
        }
    }
    Ok(edges)
}

/// Machine-readable summary of a maximum clique search.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaximumReport {
    pub nodes: usize,
    pub edges: usize,
    pub size: usize,
    pub clique: Clique,
}

/// Machine-readable list of every maximal clique, in enumeration order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumerationReport {
    pub nodes: usize,
    pub edges: usize,
    pub cliques: Vec<Clique>,
}
