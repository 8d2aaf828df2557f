use std::{cmp::Reverse, collections::BTreeMap, fmt::Display, iter::Sum, str::FromStr};

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{rack_error::RackError, weight::Weight};

/// One plate denomination. Plates of equal weight are interchangeable.
#[derive(
    Clone, Copy, Debug, PartialEq, PartialOrd, Ord, Eq, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Plate {
    weight: Weight,
}

impl Plate {
    #[must_use]
    pub const fn new(weight: Weight) -> Self {
        Plate { weight }
    }

    #[must_use]
    pub const fn pounds(pounds: u32) -> Self {
        Plate::new(Weight::from_pounds(pounds))
    }

    #[must_use]
    pub fn weight(&self) -> Weight {
        self.weight
    }

    #[must_use]
    pub fn from_weights(weights: Vec<Weight>) -> Vec<Plate> {
        weights.into_iter().map(Plate::new).collect()
    }

    #[must_use]
    pub fn from_weights_map(weights_map: BTreeMap<Weight, usize>) -> BTreeMap<Plate, usize> {
        weights_map
            .into_iter()
            .map(|(weight, count)| (Plate::new(weight), count))
            .collect()
    }

    /// Sorts heaviest first, dropping repeats.
    #[must_use]
    pub fn descending(plates: impl IntoIterator<Item = Plate>) -> Vec<Plate> {
        plates
            .into_iter()
            .sorted_unstable_by_key(|plate| Reverse(*plate))
            .dedup()
            .collect()
    }
}

impl Display for Plate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.weight)
    }
}

impl FromStr for Plate {
    type Err = RackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<Weight>().map(Plate::new)
    }
}

impl<'a> Sum<&'a Plate> for Weight {
    fn sum<I: Iterator<Item = &'a Plate>>(iter: I) -> Self {
        iter.map(Plate::weight).sum()
    }
}
