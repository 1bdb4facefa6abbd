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

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// How each search frame chooses the nodes it branches on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PivotRule {
    /// Branch on every candidate, smallest label first.
    #[default]
    None,
    /// Pick the node of `P ∪ X` with the most neighbors in `P` and branch only
    /// on the candidates it is not adjacent to.
    ///
    /// Emits the same set of maximal cliques as [`PivotRule::None`], in a
    /// different order, so ties for the maximum may resolve differently.
    MaxDegree,
}

/// Tuning knobs for enumeration and maximum clique selection.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    pub pivot: PivotRule,
    /// Split the top-level branches across the rayon thread pool.
    pub parallel: bool,
}

impl SearchConfig {
    /// Parse a config from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::{PivotRule, SearchConfig};

    #[test]
    fn default_is_naive_and_sequential() {
        let cfg = SearchConfig::default();
        assert_eq!(cfg.pivot, PivotRule::None);
        assert!(!cfg.parallel);
    }

    #[test]
    fn parses_partial_json() {
        let cfg = SearchConfig::from_json(r#"{"pivot": "max-degree"}"#).unwrap();
        assert_eq!(cfg.pivot, PivotRule::MaxDegree);
        assert!(!cfg.parallel);

        let cfg = SearchConfig::from_json(r#"{"parallel": true}"#).unwrap();
        assert_eq!(cfg.pivot, PivotRule::None);
        assert!(cfg.parallel);
    }

    #[test]
    fn rejects_unknown_fields() {
        assert!(SearchConfig::from_json(r#"{"pivots": "none"}"#).is_err());
        assert!(SearchConfig::from_json(r#"{"pivot": "random"}"#).is_err());
    }
}
