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

//! Errors surfaced by ingestion and maximum clique selection.

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, CliqueError>;

/// Errors that can occur while reading an edge list or selecting a maximum clique.
///
/// Once a [`Graph`](crate::Graph) has been built the search itself cannot fail;
/// every variant here comes from either the input or an empty graph.
#[derive(Debug, thiserror::Error)]
pub enum CliqueError {
    /// An edge record did not resolve to exactly two non-empty labels.
    #[error("malformed edge record on line {line}: {record:?} (expected \"<node>-<node>\")")]
    MalformedEdge {
        /// 1-based line number of the record in its source.
        line: usize,
        /// The offending record, untrimmed.
        record: String,
    },

    /// Maximum clique selection was requested on a graph with no nodes.
    #[error("graph has no nodes, so no maximum clique exists")]
    EmptyGraph,

    /// Reading the edge list failed.
    #[error("failed to read edge list: {0}")]
    Io(#[from] std::io::Error),

    /// A search config could not be parsed.
    #[error("invalid search config: {0}")]
    Config(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::CliqueError;

    #[test]
    fn malformed_edge_message_names_line_and_record() {
        let err = CliqueError::MalformedEdge {
            line: 7,
            record: "a-b-c".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("line 7"));
        assert!(msg.contains("\"a-b-c\""));
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "eof");
        let err: CliqueError = io.into();
        assert!(matches!(err, CliqueError::Io(_)));
    }
}
