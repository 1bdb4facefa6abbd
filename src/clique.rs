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

pub mod enumerate;
pub mod select;

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A set of pairwise adjacent nodes, stored in ascending label order.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Clique<L = String> {
    members: Vec<L>,
}

impl<L> Clique<L> {
    /// Wrap members that are already sorted and distinct.
    pub(crate) fn from_sorted(members: Vec<L>) -> Self {
        Clique { members }
    }

    /// Members in ascending order.
    pub fn members(&self) -> &[L] {
        &self.members
    }

    pub fn into_members(self) -> Vec<L> {
        self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, L> {
        self.members.iter()
    }
}

impl<L: Ord> Clique<L> {
    pub fn contains(&self, label: &L) -> bool {
        self.members.binary_search(label).is_ok()
    }
}

impl<L: Ord> From<Vec<L>> for Clique<L> {
    fn from(mut members: Vec<L>) -> Self {
        members.sort_unstable();
        members.dedup();
        Clique { members }
    }
}

impl<'a, L> IntoIterator for &'a Clique<L> {
    type Item = &'a L;
    type IntoIter = std::slice::Iter<'a, L>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

/// Comma-delimited members, e.g. `a,b,c`.
impl<L: fmt::Display> fmt::Display for Clique<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, member) in self.members.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{member}")?;
        }
        Ok(())
    }
}

impl<L: Serialize> Serialize for Clique<L> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.members.serialize(serializer)
    }
}

impl<'de, L: Deserialize<'de> + Ord> Deserialize<'de> for Clique<L> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<L>::deserialize(deserializer).map(Clique::from)
    }
}

#[cfg(test)]
mod tests {
    use super::Clique;

    #[test]
    fn renders_comma_delimited() {
        let clique = Clique::from(vec!["c", "a", "b"]);
        assert_eq!(clique.to_string(), "a,b,c");
        assert_eq!(Clique::from(vec!["solo"]).to_string(), "solo");
    }

    #[test]
    fn from_vec_sorts_and_dedups() {
        let clique = Clique::from(vec![3, 1, 3, 2]);
        assert_eq!(clique.members(), &[1, 2, 3]);
        assert_eq!(clique.len(), 3);
        assert!(clique.contains(&2));
        assert!(!clique.contains(&4));
    }

    #[test]
    fn serializes_as_sorted_list() {
        let clique = Clique::from(vec!["b".to_string(), "a".to_string()]);
        assert_eq!(serde_json::to_string(&clique).unwrap(), r#"["a","b"]"#);
        let back: Clique = serde_json::from_str(r#"["z","y","z"]"#).unwrap();
        assert_eq!(back.members(), &["y".to_string(), "z".to_string()]);
    }
}
