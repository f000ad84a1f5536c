use std::collections::BTreeMap;
use thiserror::Error;

use super::sample::{EntityId, Sample};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("invalid entity id: {0:?}")]
    BadRequest(String),
    #[error("entity {0} not found")]
    NotFound(EntityId),
}

/// Per-entity sample history, ordered by timestamp.
///
/// Built once by the normalizer and never mutated afterwards; the server
/// shares it between requests through an `Arc` without locking. Adding any
/// mutation here requires adding synchronization at the call sites.
#[derive(Debug, Default, Clone)]
pub struct SeriesStore {
    series: BTreeMap<EntityId, Vec<Sample>>,
}

impl SeriesStore {
    pub(super) fn from_series(series: BTreeMap<EntityId, Vec<Sample>>) -> Self {
        SeriesStore { series }
    }

    /// Known entity ids, ascending.
    pub fn ids(&self) -> Vec<EntityId> {
        self.series.keys().copied().collect()
    }

    pub fn series(&self, id: EntityId) -> Option<&[Sample]> {
        self.series.get(&id).map(Vec::as_slice)
    }

    /// Looks up a series by an id taken verbatim from a request path.
    pub fn fetch(&self, raw_id: &str) -> Result<&[Sample], QueryError> {
        let id: EntityId = raw_id
            .trim()
            .parse()
            .map_err(|_| QueryError::BadRequest(raw_id.to_string()))?;

        self.series(id).ok_or(QueryError::NotFound(id))
    }

    pub fn entity_count(&self) -> usize {
        self.series.len()
    }

    pub fn sample_count(&self) -> usize {
        self.series.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &[Sample])> {
        self.series.iter().map(|(id, samples)| (*id, samples.as_slice()))
    }
}
