use std::iter;

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{bar::Bar, inventory::Inventory, plate::Plate, rounding::Rounding, weight::Weight};

/// Result of planning a load for one target.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadPlan {
    target_rounded: Weight,
    achievable_total: Weight,
    per_side: Vec<Plate>,
    exact: bool,
}

impl LoadPlan {
    /// The requested total after rounding; never below the bar.
    #[must_use]
    pub fn target_rounded(&self) -> Weight {
        self.target_rounded
    }

    /// The heaviest total the inventory can build without passing
    /// `target_rounded`.
    #[must_use]
    pub fn achievable_total(&self) -> Weight {
        self.achievable_total
    }

    /// Plates for one sleeve, innermost first.
    #[must_use]
    pub fn per_side(&self) -> &[Plate] {
        &self.per_side
    }

    #[must_use]
    pub fn into_per_side(self) -> Vec<Plate> {
        self.per_side
    }

    #[must_use]
    pub fn exact(&self) -> bool {
        self.exact
    }

    #[must_use]
    pub fn shortfall(&self) -> Weight {
        self.target_rounded.saturating_sub(self.achievable_total)
    }

    /// Pairs loaded per denomination, heaviest first.
    #[must_use]
    pub fn pairs(&self) -> Vec<(Plate, usize)> {
        self.per_side
            .iter()
            .dedup_with_count()
            .map(|(count, plate)| (*plate, count))
            .collect()
    }
}

/// Greedy plate selection for a bar and a rack of plates.
///
/// Denominations are consumed heaviest first, each limited by the pairs on
/// hand. This is optimal for canonical plate sets such as 45/25/10/5/2.5
/// but not for arbitrary ones.
#[derive(Clone, Debug)]
pub struct LoadPlanner<'a> {
    bar: Bar,
    inventory: &'a Inventory,
    denominations: Vec<Plate>,
    rounding: Rounding,
}

impl<'a> LoadPlanner<'a> {
    #[must_use]
    pub fn new(bar: Bar, inventory: &'a Inventory) -> Self {
        LoadPlanner {
            bar,
            inventory,
            denominations: inventory.denominations(),
            rounding: Rounding::default(),
        }
    }

    /// Restricts planning to `denominations` instead of every plate in the
    /// inventory.
    #[must_use]
    pub fn with_denominations(mut self, denominations: &[Plate]) -> Self {
        self.denominations = Plate::descending(denominations.iter().copied());
        self
    }

    #[must_use]
    pub fn with_rounding(mut self, rounding: Rounding) -> Self {
        self.rounding = rounding;
        self
    }

    #[must_use]
    pub fn bar(&self) -> Bar {
        self.bar
    }

    #[must_use]
    pub fn plan(&self, target_total: f64) -> LoadPlan {
        let bar_weight = self.bar.weight();
        let target_rounded = self.rounding.round(target_total, bar_weight);

        // Tracked as a total across both sleeves so odd thousandths never
        // need halving.
        let needed = u64::from(target_rounded.millis() - bar_weight.millis());
        let mut remaining = needed;
        let mut per_side = Vec::new();

        for plate in &self.denominations {
            if remaining == 0 {
                break;
            }

            let pair_weight = 2 * u64::from(plate.weight().millis());
            let pairs_available = self.inventory.pairs(*plate);
            if pair_weight == 0 || pairs_available == 0 {
                continue;
            }

            let pairs_by_weight = usize::try_from(remaining / pair_weight).unwrap_or(usize::MAX);
            let used = pairs_available.min(pairs_by_weight);
            debug!(
                plate = %plate,
                pairs_available,
                pairs_by_weight,
                used,
                "selecting plates"
            );

            per_side.extend(iter::repeat_n(*plate, used));
            remaining -= u64::try_from(used).unwrap_or(u64::MAX) * pair_weight;
        }

        let loaded = u32::try_from(needed - remaining).unwrap_or(u32::MAX);
        let achievable_total = bar_weight + Weight::from_millis(loaded);
        let exact = achievable_total == target_rounded;

        debug!(
            rounded = %target_rounded,
            achievable = %achievable_total,
            exact,
            "planned load"
        );

        LoadPlan {
            target_rounded,
            achievable_total,
            per_side,
            exact,
        }
    }
}

/// Plans a load with the default rounding policy. `denominations` defaults to
/// every plate in `inventory`.
#[must_use]
pub fn plan(
    bar_weight: Weight,
    target_total: f64,
    inventory: &Inventory,
    denominations: Option<&[Plate]>,
) -> LoadPlan {
    let planner = LoadPlanner::new(Bar::new(bar_weight), inventory);
    match denominations {
        Some(denominations) => planner.with_denominations(denominations).plan(target_total),
        None => planner.plan(target_total),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const BAR: Weight = Weight::from_pounds(45);

    fn small_plate() -> Plate {
        Plate::new(Weight::from_millis(2500))
    }

    #[test]
    fn loads_two_plates_for_225() {
        let plan = plan(BAR, 225.0, &Inventory::standard(), None);
        assert_eq!(plan.target_rounded(), Weight::from_pounds(225));
        assert_eq!(plan.per_side(), [Plate::pounds(45), Plate::pounds(45)]);
        assert_eq!(plan.achievable_total(), Weight::from_pounds(225));
        assert!(plan.exact());
    }

    #[test]
    fn falls_short_when_pairs_run_out() {
        let inventory = Inventory::new()
            .with(Plate::pounds(45), 2)
            .with(Plate::pounds(25), 0)
            .with(Plate::pounds(10), 0)
            .with(Plate::pounds(5), 0)
            .with(small_plate(), 0);
        let plan = plan(BAR, 140.0, &inventory, None);
        assert_eq!(plan.target_rounded(), Weight::from_pounds(140));
        assert_eq!(plan.per_side(), [Plate::pounds(45)]);
        assert_eq!(plan.achievable_total(), Weight::from_pounds(135));
        assert_eq!(plan.shortfall(), Weight::from_pounds(5));
        assert!(!plan.exact());
    }

    #[test]
    fn uses_every_denomination_largest_first() {
        let plan = plan(BAR, 210.0, &Inventory::standard(), None);
        assert_eq!(
            plan.per_side(),
            [Plate::pounds(45), Plate::pounds(25), Plate::pounds(10), small_plate()]
        );
        assert!(plan.exact());
        assert_eq!(
            plan.pairs(),
            vec![
                (Plate::pounds(45), 1),
                (Plate::pounds(25), 1),
                (Plate::pounds(10), 1),
                (small_plate(), 1),
            ]
        );
    }

    #[test]
    fn empty_inventory_leaves_bar_empty() {
        let plan = plan(BAR, 225.0, &Inventory::new(), None);
        assert!(plan.per_side().is_empty());
        assert_eq!(plan.achievable_total(), BAR);
        assert!(!plan.exact());
    }

    #[test]
    fn target_below_bar_is_exact_empty_bar() {
        let plan = plan(BAR, 20.0, &Inventory::standard(), None);
        assert_eq!(plan.target_rounded(), BAR);
        assert!(plan.per_side().is_empty());
        assert!(plan.exact());
    }

    #[test]
    fn odd_plate_counts_only_yield_pairs() {
        let inventory = Inventory::new().with(Plate::pounds(45), 3);
        let plan = plan(BAR, 315.0, &inventory, None);
        assert_eq!(plan.per_side(), [Plate::pounds(45)]);
        assert_eq!(plan.achievable_total(), Weight::from_pounds(135));
    }

    #[test]
    fn explicit_denominations_restrict_choice() {
        let restricted = [Plate::pounds(25), Plate::pounds(10)];
        let plan = plan(BAR, 115.0, &Inventory::standard(), Some(&restricted));
        assert_eq!(plan.per_side(), [Plate::pounds(25), Plate::pounds(10)]);
        assert!(plan.exact());
    }

    #[test]
    fn denominations_missing_from_inventory_are_skipped() {
        let extra = [Plate::pounds(100), Plate::pounds(45)];
        let plan = plan(BAR, 135.0, &Inventory::standard(), Some(&extra));
        assert_eq!(plan.per_side(), [Plate::pounds(45)]);
    }

    #[test]
    fn zero_weight_denominations_are_ignored() {
        let inventory = Inventory::new()
            .with(Plate::new(Weight::ZERO), 10)
            .with(Plate::pounds(45), 2);
        let plan = plan(BAR, 135.0, &inventory, None);
        assert_eq!(plan.per_side(), [Plate::pounds(45)]);
        assert!(plan.exact());
    }

    #[test]
    fn rounding_policy_is_pluggable() {
        let inventory = Inventory::standard();
        let plan = LoadPlanner::new(Bar::new(BAR), &inventory)
            .with_rounding(Rounding::new(Weight::ZERO))
            .plan(50.0);
        assert_eq!(plan.target_rounded(), Weight::from_pounds(50));
        assert_eq!(plan.per_side(), [small_plate()]);
        assert!(plan.exact());
    }

    #[test]
    fn greedy_is_not_optimal_for_non_canonical_sets() {
        let inventory = Inventory::new()
            .with(Plate::pounds(25), 2)
            .with(Plate::pounds(20), 4);
        let plan = plan(Weight::ZERO, 80.0, &inventory, None);
        assert_eq!(plan.per_side(), [Plate::pounds(25)]);
        assert_eq!(plan.achievable_total(), Weight::from_pounds(50));
        assert!(!plan.exact());
    }

    #[test]
    fn huge_target_rounds_to_a_multiple_of_five() {
        let plan = plan(BAR, 1e12, &Inventory::standard(), None);
        assert_eq!(plan.target_rounded().millis() % 5000, 0);
        assert_eq!(plan.achievable_total(), Weight::from_pounds(575));
        assert!(!plan.exact());
    }

    #[test]
    fn non_finite_target_plans_empty_bar() {
        let plan = plan(BAR, f64::NAN, &Inventory::standard(), None);
        assert!(plan.per_side().is_empty());
        assert_eq!(plan.achievable_total(), BAR);
    }
}
