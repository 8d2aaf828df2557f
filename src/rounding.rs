use crate::weight::{MILLIS_PER_POUND, Weight};

/// Target totals move in 5 lb steps: one pair of 2.5s.
pub const DEFAULT_INCREMENT: Weight = Weight::from_pounds(5);

/// How a requested total is snapped before plates are chosen.
///
/// The target is rounded to the nearest multiple of `increment` (halves
/// round up) and never drops below the empty bar. A zero increment leaves
/// the target as requested.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rounding {
    increment: Weight,
}

impl Rounding {
    #[must_use]
    pub const fn new(increment: Weight) -> Self {
        Rounding { increment }
    }

    #[must_use]
    pub fn increment(&self) -> Weight {
        self.increment
    }

    /// Non-finite targets collapse to `floor`.
    #[must_use]
    pub fn round(&self, target_pounds: f64, floor: Weight) -> Weight {
        if !target_pounds.is_finite() {
            return floor;
        }
        let millis = target_pounds * f64::from(MILLIS_PER_POUND);
        let rounded = match self.increment.millis() {
            0 => Weight::saturating_from_millis(millis),
            increment => {
                // Largest representable multiple of the increment.
                let ceiling = u32::MAX - u32::MAX % increment;
                let snapped = (millis / f64::from(increment)).round() * f64::from(increment);
                if snapped >= f64::from(ceiling) {
                    Weight::from_millis(ceiling)
                } else {
                    Weight::saturating_from_millis(snapped)
                }
            }
        };
        rounded.max(floor)
    }
}

impl Default for Rounding {
    fn default() -> Self {
        Rounding::new(DEFAULT_INCREMENT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BAR: Weight = Weight::from_pounds(45);

    #[test]
    fn rounds_to_nearest_five() {
        let rounding = Rounding::default();
        assert_eq!(rounding.round(225.0, BAR), Weight::from_pounds(225));
        assert_eq!(rounding.round(222.0, BAR), Weight::from_pounds(220));
        assert_eq!(rounding.round(223.0, BAR), Weight::from_pounds(225));
        assert_eq!(rounding.round(141.9, BAR), Weight::from_pounds(140));
    }

    #[test]
    fn halves_round_up() {
        let rounding = Rounding::default();
        assert_eq!(rounding.round(227.5, BAR), Weight::from_pounds(230));
        assert_eq!(rounding.round(132.5, BAR), Weight::from_pounds(135));
    }

    #[test]
    fn never_below_the_bar() {
        let rounding = Rounding::default();
        assert_eq!(rounding.round(20.0, BAR), BAR);
        assert_eq!(rounding.round(-100.0, BAR), BAR);
        let odd_bar = Weight::from_pounds(33);
        assert_eq!(rounding.round(31.0, odd_bar), odd_bar);
    }

    #[test]
    fn non_finite_targets_collapse_to_bar() {
        let rounding = Rounding::default();
        assert_eq!(rounding.round(f64::NAN, BAR), BAR);
        assert_eq!(rounding.round(f64::INFINITY, BAR), BAR);
    }

    #[test]
    fn huge_targets_stay_on_the_increment() {
        let rounding = Rounding::default();
        let rounded = rounding.round(1e12, BAR);
        assert_eq!(rounded.millis() % DEFAULT_INCREMENT.millis(), 0);
        assert_eq!(rounded, Weight::from_millis(4_294_965_000));

        let fine = Rounding::new(Weight::from_millis(2500));
        assert_eq!(fine.round(1e12, BAR).millis() % 2500, 0);
        assert_eq!(rounding.round(f64::MAX, BAR), rounded);
    }

    #[test]
    fn custom_and_zero_increments() {
        let fine = Rounding::new(Weight::from_millis(2500));
        assert_eq!(fine.round(226.5, BAR), Weight::from_millis(227_500));
        let exact = Rounding::new(Weight::ZERO);
        assert_eq!(exact.round(226.0, BAR), Weight::from_pounds(226));
    }
}
