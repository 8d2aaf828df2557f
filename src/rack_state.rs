use serde::{Deserialize, Serialize};

use crate::{
    bar::Bar,
    inventory::Inventory,
    load_planner::{LoadPlan, LoadPlanner},
    plate::Plate,
    rounding::Rounding,
    transition::{Transition, diff},
    weight::Weight,
};

/// Everything a front end needs to remember between screens.
///
/// Every operation returns a new state; callers decide where to keep it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RackState {
    pub bar_weight: Bar,
    pub current_total: Weight,
    pub target_total: Weight,
    pub inventory: Inventory,
    pub current_per_side: Vec<Plate>,
    pub target_per_side: Vec<Plate>,
}

impl RackState {
    #[must_use]
    pub fn new(bar: Bar, inventory: Inventory) -> Self {
        RackState {
            bar_weight: bar,
            current_total: bar.weight(),
            target_total: bar.weight(),
            inventory,
            current_per_side: Vec::new(),
            target_per_side: Vec::new(),
        }
    }

    #[must_use]
    pub fn planner(&self) -> LoadPlanner<'_> {
        LoadPlanner::new(self.bar_weight, &self.inventory)
    }

    /// Plans `target` against this rack and records it as the target load.
    #[must_use]
    pub fn retarget(&self, target: Weight, rounding: Rounding) -> (RackState, LoadPlan) {
        let plan = self
            .planner()
            .with_rounding(rounding)
            .plan(target.as_pounds());
        let state = RackState {
            target_total: target,
            target_per_side: plan.per_side().to_vec(),
            ..self.clone()
        };
        (state, plan)
    }

    /// Plate changes from what is on the bar to the target load.
    #[must_use]
    pub fn transition(&self) -> Transition {
        diff(&self.current_per_side, &self.target_per_side)
    }

    /// Records `plan` as what is now on the bar.
    #[must_use]
    pub fn apply(&self, plan: &LoadPlan) -> RackState {
        RackState {
            current_total: plan.achievable_total(),
            current_per_side: plan.per_side().to_vec(),
            ..self.clone()
        }
    }

    /// Records a hand-loaded stack as what is now on the bar.
    #[must_use]
    pub fn load(&self, per_side: Vec<Plate>) -> RackState {
        RackState {
            current_total: self.bar_weight.loaded_weight(&per_side),
            current_per_side: per_side,
            ..self.clone()
        }
    }
}

impl Default for RackState {
    fn default() -> Self {
        RackState {
            bar_weight: Bar::default(),
            current_total: Weight::from_pounds(185),
            target_total: Weight::from_pounds(225),
            inventory: Inventory::standard(),
            current_per_side: vec![Plate::pounds(45), Plate::pounds(25)],
            target_per_side: vec![Plate::pounds(45), Plate::pounds(45)],
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::transition::Entry;

    #[test]
    fn default_state_is_a_25_to_45_swap() {
        let state = RackState::default();
        assert_eq!(
            state.bar_weight.loaded_weight(&state.current_per_side),
            state.current_total
        );
        let transition = state.transition();
        assert_eq!(
            transition.add(),
            [Entry {
                denomination: Plate::pounds(45),
                count: 1
            }]
        );
        assert_eq!(
            transition.remove(),
            [Entry {
                denomination: Plate::pounds(25),
                count: 1
            }]
        );
    }

    #[test]
    fn retarget_then_apply_clears_the_transition() {
        let state = RackState::default();
        let (state, plan) = state.retarget(Weight::from_pounds(275), Rounding::default());
        assert_eq!(state.target_total, Weight::from_pounds(275));
        assert_eq!(
            state.target_per_side,
            vec![Plate::pounds(45), Plate::pounds(45), Plate::pounds(25)]
        );
        assert!(!state.transition().is_empty());

        let state = state.apply(&plan);
        assert_eq!(state.current_total, Weight::from_pounds(275));
        assert!(state.transition().is_empty());
    }

    #[test]
    fn retarget_leaves_original_untouched() {
        let state = RackState::default();
        let _ = state.retarget(Weight::from_pounds(95), Rounding::default());
        assert_eq!(state, RackState::default());
    }

    #[test]
    fn load_recomputes_total() {
        let state = RackState::new(Bar::default(), Inventory::standard())
            .load(vec![Plate::pounds(45), Plate::pounds(10)]);
        assert_eq!(state.current_total, Weight::from_pounds(155));
    }

    #[test]
    fn serializes_as_flat_camel_case_record() {
        let json = serde_json::to_value(RackState::default()).unwrap();
        assert_eq!(json["barWeight"], 45.0);
        assert_eq!(json["currentPerSide"], serde_json::json!([45.0, 25.0]));
        assert_eq!(json["inventory"]["2.5"], 4);

        let partial: RackState =
            serde_json::from_str(r#"{"barWeight": 35, "currentPerSide": []}"#).unwrap();
        assert_eq!(partial.bar_weight, Bar::new(Weight::from_pounds(35)));
        assert!(partial.current_per_side.is_empty());
        assert_eq!(partial.inventory, Inventory::standard());
    }
}
