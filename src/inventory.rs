use std::{collections::BTreeMap, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{plate::Plate, rack_error::RackError, weight::Weight};

/// Plates on hand, counted as physical pieces across both sides of the bar.
///
/// Serialized as a map keyed by the plate weight in pounds (`{"45": 8}`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, usize>",
    into = "BTreeMap<String, usize>"
)]
pub struct Inventory {
    counts: BTreeMap<Plate, usize>,
}

impl Inventory {
    #[must_use]
    pub fn new() -> Self {
        Inventory::default()
    }

    /// The default home rack: four pairs of 45s and two pairs of everything
    /// else down to 2.5.
    #[must_use]
    pub fn standard() -> Self {
        Inventory::from(BTreeMap::from([
            (Weight::from_pounds(45), 8),
            (Weight::from_pounds(25), 4),
            (Weight::from_pounds(10), 4),
            (Weight::from_pounds(5), 4),
            (Weight::from_millis(2500), 4),
        ]))
    }

    /// Builds an inventory, summing repeated plates.
    #[must_use]
    pub fn from_counts(counts: impl IntoIterator<Item = (Plate, usize)>) -> Self {
        counts
            .into_iter()
            .fold(Inventory::new(), |mut inventory, (plate, count)| {
                let total = inventory.counts.entry(plate).or_default();
                *total = total.saturating_add(count);
                inventory
            })
    }

    #[must_use]
    pub fn with(mut self, plate: Plate, count: usize) -> Self {
        self.set(plate, count);
        self
    }

    pub fn set(&mut self, plate: Plate, count: usize) {
        self.counts.insert(plate, count);
    }

    #[must_use]
    pub fn count(&self, plate: Plate) -> usize {
        self.counts.get(&plate).copied().unwrap_or(0)
    }

    /// Matched pairs available; an odd plate out can never be loaded.
    #[must_use]
    pub fn pairs(&self, plate: Plate) -> usize {
        self.count(plate) / 2
    }

    /// Every denomination listed, heaviest first, including those with a
    /// zero count.
    #[must_use]
    pub fn denominations(&self) -> Vec<Plate> {
        self.counts.keys().rev().copied().collect()
    }

    #[must_use]
    pub fn total_plates(&self) -> usize {
        self.counts
            .values()
            .fold(0, |total, count| total.saturating_add(*count))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_plates() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (Plate, usize)> + '_ {
        self.counts.iter().map(|(plate, count)| (*plate, *count))
    }
}

impl From<BTreeMap<Weight, usize>> for Inventory {
    fn from(weights_map: BTreeMap<Weight, usize>) -> Self {
        Inventory {
            counts: Plate::from_weights_map(weights_map),
        }
    }
}

impl TryFrom<BTreeMap<String, usize>> for Inventory {
    type Error = RackError;

    fn try_from(map: BTreeMap<String, usize>) -> Result<Self, Self::Error> {
        map.into_iter()
            .map(|(weight, count)| weight.parse::<Plate>().map(|plate| (plate, count)))
            .collect::<Result<Vec<_>, _>>()
            .map(Inventory::from_counts)
    }
}

impl From<Inventory> for BTreeMap<String, usize> {
    fn from(inventory: Inventory) -> Self {
        inventory
            .counts
            .into_iter()
            .map(|(plate, count)| (plate.to_string(), count))
            .collect()
    }
}

/// Parses `45:8,25:4,2.5:4`.
impl FromStr for Inventory {
    type Err = RackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(|entry| {
                let invalid = || RackError::InvalidInventoryEntry(entry.to_string());
                let (weight, count) = entry.split_once(':').ok_or_else(invalid)?;
                let plate = weight.parse::<Plate>().map_err(|_| invalid())?;
                let count = count.trim().parse::<usize>().map_err(|_| invalid())?;
                Ok((plate, count))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Inventory::from_counts)
    }
}
