use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::ComparisonError;
use crate::model::CorridorMetricSnapshot;

/// Ordered group of corridor snapshots being compared at one time.
///
/// Insertion order is display order. Ids are distinct. A set is never
/// mutated in place: [`ComparisonSet::with_added`] and
/// [`ComparisonSet::without`] return a new set.
///
/// Only structure is checked here. Size bounds and metric values are
/// validated by the operations that consume the set, since a set may be
/// handed over from an uncontrolled source.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<CorridorMetricSnapshot>", into = "Vec<CorridorMetricSnapshot>")]
pub struct ComparisonSet {
    snapshots: Vec<CorridorMetricSnapshot>,
}

impl ComparisonSet {
    pub const MIN_CORRIDORS: usize = 2;
    pub const MAX_CORRIDORS: usize = 4;

    /// Build a set from snapshots in display order.
    ///
    /// Fails with `InvalidInput` on a blank or duplicate id.
    pub fn new(snapshots: Vec<CorridorMetricSnapshot>) -> Result<Self, ComparisonError> {
        let mut seen = HashSet::with_capacity(snapshots.len());

        for s in &snapshots {
            if s.id.trim().is_empty() {
                return Err(ComparisonError::invalid("corridor id must not be empty"));
            }
            if !seen.insert(s.id.as_str()) {
                return Err(ComparisonError::invalid(format!(
                    "duplicate corridor id {}",
                    s.id
                )));
            }
        }

        Ok(Self { snapshots })
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CorridorMetricSnapshot> {
        self.snapshots.iter()
    }

    pub fn snapshots(&self) -> &[CorridorMetricSnapshot] {
        &self.snapshots
    }

    pub fn ids(&self) -> Vec<String> {
        self.snapshots.iter().map(|s| s.id.clone()).collect()
    }

    pub fn get(&self, id: &str) -> Option<&CorridorMetricSnapshot> {
        self.snapshots.iter().find(|s| s.id == id)
    }

    /// New set with `snapshot` appended.
    ///
    /// Refuses to grow past [`Self::MAX_CORRIDORS`].
    pub fn with_added(&self, snapshot: CorridorMetricSnapshot) -> Result<Self, ComparisonError> {
        if self.len() >= Self::MAX_CORRIDORS {
            return Err(ComparisonError::invalid(format!(
                "at most {} corridors can be compared",
                Self::MAX_CORRIDORS
            )));
        }

        let mut next = self.snapshots.clone();
        next.push(snapshot);
        Self::new(next)
    }

    /// New set without the corridor `id`; unknown ids leave the copy unchanged.
    pub fn without(&self, id: &str) -> Self {
        Self {
            snapshots: self
                .snapshots
                .iter()
                .filter(|s| s.id != id)
                .cloned()
                .collect(),
        }
    }
}

impl TryFrom<Vec<CorridorMetricSnapshot>> for ComparisonSet {
    type Error = ComparisonError;

    fn try_from(snapshots: Vec<CorridorMetricSnapshot>) -> Result<Self, Self::Error> {
        Self::new(snapshots)
    }
}

impl From<ComparisonSet> for Vec<CorridorMetricSnapshot> {
    fn from(set: ComparisonSet) -> Self {
        set.snapshots
    }
}

impl<'a> IntoIterator for &'a ComparisonSet {
    type Item = &'a CorridorMetricSnapshot;
    type IntoIter = std::slice::Iter<'a, CorridorMetricSnapshot>;

    fn into_iter(self) -> Self::IntoIter {
        self.snapshots.iter()
    }
}
