use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{plate::Plate, weight::Weight};

/// Standard Olympic barbell weight.
pub const STANDARD_BAR_WEIGHT: Weight = Weight::from_pounds(45);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bar {
    pub weight: Weight,
}

impl Bar {
    #[must_use]
    pub const fn new(weight: Weight) -> Self {
        Bar { weight }
    }

    #[must_use]
    pub fn weight(&self) -> Weight {
        self.weight
    }

    /// Total on the bar when `per_side` is threaded on both sleeves.
    #[must_use]
    pub fn loaded_weight(&self, per_side: &[Plate]) -> Weight {
        self.weight + per_side.iter().sum::<Weight>() * 2
    }
}

impl Default for Bar {
    fn default() -> Self {
        Bar::new(STANDARD_BAR_WEIGHT)
    }
}

impl Display for Bar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} lb bar", self.weight)
    }
}
