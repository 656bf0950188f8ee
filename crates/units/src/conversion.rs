//! Cross-unit conversion and display auto-scaling.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use bakery_core::{DomainError, DomainResult};

use crate::catalog::{Unit, units_in};

/// Decimal places kept by [`auto_scale`].
pub const DISPLAY_PRECISION: u32 = 2;

/// A quantity paired with its unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Measure {
    pub quantity: Decimal,
    pub unit: Unit,
}

impl Measure {
    pub fn new(quantity: Decimal, unit: Unit) -> Self {
        Self { quantity, unit }
    }

    pub fn convert_to(self, unit: Unit) -> DomainResult<Measure> {
        convert(self.quantity, self.unit, unit).map(|quantity| Measure::new(quantity, unit))
    }

    pub fn auto_scaled(self) -> Measure {
        auto_scale(self.quantity, self.unit)
    }
}

impl core::fmt::Display for Measure {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} {}", self.quantity.normalize(), self.unit)
    }
}

/// Convert `value` from one unit to another of the same category.
///
/// Computes `value * factor(from) / factor(to)` without rounding.
pub fn convert(value: Decimal, from: Unit, to: Unit) -> DomainResult<Decimal> {
    if from.category() != to.category() {
        return Err(DomainError::incompatible(from.symbol(), to.symbol()));
    }
    if from == to {
        return Ok(value);
    }
    value
        .checked_mul(from.factor())
        .and_then(|base| base.checked_div(to.factor()))
        .ok_or_else(|| DomainError::invalid_input(format!("{value} {from} is out of range")))
}

/// [`convert`] for raw symbols; an unknown symbol has no category and is incompatible.
pub fn convert_symbols(value: Decimal, from: &str, to: &str) -> DomainResult<Decimal> {
    match (from.parse::<Unit>(), to.parse::<Unit>()) {
        (Ok(from), Ok(to)) => convert(value, from, to),
        _ => Err(DomainError::incompatible(from.trim(), to.trim())),
    }
}

/// Pick the largest sensible unit for display.
///
/// Candidates are the units of the same category and measurement system
/// (grams never turn into pounds), scanned from the largest factor down. The
/// first whose single-unit base value does not exceed the quantity wins and
/// the quantity is re-expressed in it, rounded to [`DISPLAY_PRECISION`]
/// places. When nothing fits the input comes back unchanged.
pub fn auto_scale(quantity: Decimal, unit: Unit) -> Measure {
    let unchanged = Measure::new(quantity, unit);
    let Some(base) = quantity.checked_mul(unit.factor()) else {
        return unchanged;
    };

    let mut candidates: Vec<Unit> = units_in(unit.category())
        .iter()
        .copied()
        .filter(|candidate| candidate.system() == unit.system())
        .collect();
    candidates.sort_by(|a, b| b.factor().cmp(&a.factor()));

    candidates
        .into_iter()
        .find(|candidate| base >= candidate.factor())
        .and_then(|candidate| {
            base.checked_div(candidate.factor())
                .map(|scaled| Measure::new(scaled.round_dp(DISPLAY_PRECISION), candidate))
        })
        .unwrap_or(unchanged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Category, all_units};
    use proptest::prelude::*;

    fn dec(num: i64, scale: u32) -> Decimal {
        Decimal::new(num, scale)
    }

    #[test]
    fn converts_within_category() {
        assert_eq!(convert(dec(1, 0), Unit::Kg, Unit::G).unwrap(), dec(1000, 0));
        assert_eq!(convert(dec(1500, 0), Unit::Mg, Unit::G).unwrap(), dec(15, 1));
        assert_eq!(convert(dec(16, 0), Unit::Oz, Unit::Lb).unwrap(), dec(1, 0));
        assert_eq!(convert(dec(2, 0), Unit::L, Unit::Ml).unwrap(), dec(2000, 0));
        assert_eq!(convert(dec(3, 0), Unit::Tsp, Unit::Ml).unwrap(), dec(1_478_676, 5));
        assert_eq!(
            Measure::new(dec(2, 0), Unit::Lb).convert_to(Unit::Oz).unwrap(),
            Measure::new(dec(32, 0), Unit::Oz)
        );
    }

    #[test]
    fn cross_category_conversion_fails() {
        let err = convert(dec(1, 0), Unit::Ml, Unit::G).unwrap_err();
        assert_eq!(err, DomainError::incompatible("ml", "g"));
    }

    #[test]
    fn unknown_symbol_is_incompatible() {
        assert_eq!(convert_symbols(dec(5, 0), "kg", "g").unwrap(), dec(5000, 0));
        assert_eq!(
            convert_symbols(dec(5, 0), "cup", "ml").unwrap_err(),
            DomainError::incompatible("cup", "ml")
        );
        assert_eq!(
            convert_symbols(dec(5, 0), "tbsp", "lb").unwrap_err(),
            DomainError::incompatible("tbsp", "lb")
        );
    }

    #[test]
    fn auto_scale_prefers_largest_fitting_unit() {
        assert_eq!(auto_scale(dec(1500, 0), Unit::G), Measure::new(dec(15, 1), Unit::Kg));
        assert_eq!(auto_scale(dec(2500, 0), Unit::Ml), Measure::new(dec(25, 1), Unit::L));
        assert_eq!(auto_scale(dec(32, 0), Unit::Oz), Measure::new(dec(2, 0), Unit::Lb));
        assert_eq!(auto_scale(dec(6, 0), Unit::Tsp), Measure::new(dec(2, 0), Unit::Tbsp));
        assert_eq!(auto_scale(dec(5, 1), Unit::G), Measure::new(dec(500, 0), Unit::Mg));
    }

    #[test]
    fn auto_scale_keeps_input_when_no_larger_unit_fits() {
        assert_eq!(auto_scale(dec(500, 0), Unit::G), Measure::new(dec(500, 0), Unit::G));
        assert_eq!(auto_scale(Decimal::ZERO, Unit::Kg), Measure::new(Decimal::ZERO, Unit::Kg));
        assert_eq!(auto_scale(dec(5, 1), Unit::Tsp), Measure::new(dec(5, 1), Unit::Tsp));
    }

    #[test]
    fn auto_scale_rounds_to_display_precision() {
        let scaled = auto_scale(dec(1234, 0), Unit::G);
        assert_eq!(scaled.unit, Unit::Kg);
        assert_eq!(scaled.quantity, dec(123, 2));
    }

    #[test]
    fn measure_display_trims_trailing_zeros() {
        assert_eq!(Measure::new(dec(80000, 2), Unit::G).to_string(), "800 g");
        assert_eq!(Measure::new(dec(15, 1), Unit::Kg).to_string(), "1.5 kg");
    }

    fn same_category_pair() -> impl Strategy<Value = (Unit, Unit)> {
        prop_oneof![Just(Category::Mass), Just(Category::Volume)].prop_flat_map(|category| {
            let units = units_in(category).to_vec();
            (
                prop::sample::select(units.clone()),
                prop::sample::select(units),
            )
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 512,
            ..ProptestConfig::default()
        })]

        /// Property: converting there and back returns the original value.
        #[test]
        fn convert_round_trips(
            (from, to) in same_category_pair(),
            raw in 1i64..10_000_000i64,
        ) {
            let value = Decimal::new(raw, 3);
            let there = convert(value, from, to).unwrap();
            let back = convert(there, to, from).unwrap();
            let tolerance = Decimal::new(1, 12);
            prop_assert!((back - value).abs() <= tolerance, "{} -> {} -> {}", value, there, back);
        }

        /// Property: conversion succeeds exactly when both units share a category.
        #[test]
        fn conversion_succeeds_only_within_category(
            from in prop::sample::select(all_units().to_vec()),
            to in prop::sample::select(all_units().to_vec()),
            raw in 1i64..1_000_000i64,
        ) {
            let result = convert(Decimal::new(raw, 2), from, to);
            prop_assert_eq!(result.is_ok(), from.category() == to.category());
        }
    }
}
