use crate::inventory::Inventory;
use crate::load_planner::{LoadPlan, plan};
use crate::plate::Plate;
use crate::transition::{Entry, Transition, diff};
use crate::weight::Weight;

#[swift_bridge::bridge]
mod ffi {
    extern "Rust" {
        type LoadPlan;
        type Transition;

        fn plan_load(
            bar_weight: f64,
            target_total: f64,
            denominations: Vec<f64>,
            counts: Vec<u32>,
        ) -> LoadPlan;
        fn diff_stacks(previous: Vec<f64>, next: Vec<f64>) -> Transition;

        fn target_rounded_lb(self: &LoadPlan) -> f64;
        fn achievable_total_lb(self: &LoadPlan) -> f64;
        fn per_side_lb(self: &LoadPlan) -> Vec<f64>;
        fn is_exact(self: &LoadPlan) -> bool;

        fn add_denominations_lb(self: &Transition) -> Vec<f64>;
        fn add_counts(self: &Transition) -> Vec<u32>;
        fn remove_denominations_lb(self: &Transition) -> Vec<f64>;
        fn remove_counts(self: &Transition) -> Vec<u32>;
        fn next_step_text(self: &Transition) -> String;
    }
}

/// Invalid weights from the app are treated as zero; counts pair up with
/// `denominations` by position.
fn plan_load(
    bar_weight: f64,
    target_total: f64,
    denominations: Vec<f64>,
    counts: Vec<u32>,
) -> LoadPlan {
    let inventory = Inventory::from_counts(
        denominations
            .iter()
            .zip(counts)
            .map(|(weight, count)| (to_plate(*weight), count as usize)),
    );
    let bar_weight = Weight::try_from_pounds(bar_weight).unwrap_or_default();
    plan(bar_weight, target_total, &inventory, None)
}

fn diff_stacks(previous: Vec<f64>, next: Vec<f64>) -> Transition {
    diff(&to_stack(&previous), &to_stack(&next))
}

fn to_plate(pounds: f64) -> Plate {
    Plate::new(Weight::try_from_pounds(pounds).unwrap_or_default())
}

fn to_stack(pounds: &[f64]) -> Vec<Plate> {
    pounds.iter().copied().map(to_plate).collect()
}

fn entry_weights(entries: &[Entry]) -> Vec<f64> {
    entries
        .iter()
        .map(|entry| entry.denomination.weight().as_pounds())
        .collect()
}

fn entry_counts(entries: &[Entry]) -> Vec<u32> {
    entries
        .iter()
        .map(|entry| u32::try_from(entry.count).unwrap_or(u32::MAX))
        .collect()
}

impl LoadPlan {
    fn target_rounded_lb(&self) -> f64 {
        self.target_rounded().as_pounds()
    }

    fn achievable_total_lb(&self) -> f64 {
        self.achievable_total().as_pounds()
    }

    fn per_side_lb(&self) -> Vec<f64> {
        self.per_side()
            .iter()
            .map(|plate| plate.weight().as_pounds())
            .collect()
    }

    fn is_exact(&self) -> bool {
        self.exact()
    }
}

impl Transition {
    fn add_denominations_lb(&self) -> Vec<f64> {
        entry_weights(self.add())
    }

    fn add_counts(&self) -> Vec<u32> {
        entry_counts(self.add())
    }

    fn remove_denominations_lb(&self) -> Vec<f64> {
        entry_weights(self.remove())
    }

    fn remove_counts(&self) -> Vec<u32> {
        entry_counts(self.remove())
    }

    fn next_step_text(&self) -> String {
        self.next_step()
            .map_or_else(|| "No plate change needed".to_string(), |step| step.to_string())
    }
}
