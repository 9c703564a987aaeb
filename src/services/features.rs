//! Binary genre feature vectors for content-based similarity.

use std::collections::{BTreeMap, BTreeSet};

use crate::models::{Item, ItemId};

/// Dense vector indexed by position in the tag vocabulary
pub type FeatureVector = Vec<f64>;

/// Tag vocabulary and per-item feature vectors for one catalog snapshot.
///
/// Built in a single pass and never mutated afterwards. A catalog change
/// means building a new table, which keeps every vector consistent with the
/// vocabulary it was built against.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureTable {
    vocabulary: Vec<String>,
    vectors: BTreeMap<ItemId, FeatureVector>,
}

impl FeatureTable {
    /// Builds the vocabulary and one feature vector per item.
    ///
    /// The vocabulary is the sorted set of distinct tags across the catalog.
    /// Items without usable tags get an all-zero vector. If an id appears
    /// more than once the last item wins.
    pub fn build(items: &[Item]) -> Self {
        let vocabulary: Vec<String> = items
            .iter()
            .flat_map(|item| item.tags())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect();

        let vectors = items
            .iter()
            .map(|item| {
                let mut vector = vec![0.0; vocabulary.len()];
                for tag in item.tags() {
                    if let Ok(idx) = vocabulary.binary_search_by(|probe| probe.as_str().cmp(tag)) {
                        vector[idx] = 1.0;
                    }
                }
                (item.id, vector)
            })
            .collect();

        let table = Self {
            vocabulary,
            vectors,
        };

        tracing::debug!(
            items = table.len(),
            vocabulary = table.vocabulary.len(),
            "Feature table built"
        );

        table
    }

    /// Distinct tags in vector index order
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    /// Feature vector for an item, if it is in the catalog
    pub fn get(&self, item_id: ItemId) -> Option<&[f64]> {
        self.vectors.get(&item_id).map(Vec::as_slice)
    }

    /// All items and their vectors in ascending id order
    pub fn iter(&self) -> impl Iterator<Item = (ItemId, &[f64])> {
        self.vectors.iter().map(|(id, v)| (*id, v.as_slice()))
    }

    pub fn contains(&self, item_id: ItemId) -> bool {
        self.vectors.contains_key(&item_id)
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }
}
