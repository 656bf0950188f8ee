//! Static unit table: every supported unit, its category and its base factor.

use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use bakery_core::DomainError;

/// Physical dimension a unit measures. Units only convert within a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Mass,
    Volume,
}

impl Category {
    /// Reference unit all factors of this category are expressed in.
    pub fn base_unit(self) -> Unit {
        match self {
            Category::Mass => Unit::G,
            Category::Volume => Unit::Ml,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Mass => "mass",
            Category::Volume => "volume",
        }
    }
}

impl core::fmt::Display for Category {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Family a unit belongs to inside its category (grams vs ounces, liters vs spoons).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    Metric,
    Customary,
}

/// A supported unit of measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Mg,
    G,
    Kg,
    Oz,
    Lb,
    Ml,
    L,
    Tsp,
    Tbsp,
}

const MASS_UNITS: &[Unit] = &[Unit::Mg, Unit::G, Unit::Kg, Unit::Oz, Unit::Lb];
const VOLUME_UNITS: &[Unit] = &[Unit::Ml, Unit::L, Unit::Tsp, Unit::Tbsp];

/// Catalog order: categories, then units, in table-definition order.
const CATALOG: &[(Category, &[Unit])] = &[
    (Category::Mass, MASS_UNITS),
    (Category::Volume, VOLUME_UNITS),
];

const ALL_UNITS: &[Unit] = &[
    Unit::Mg,
    Unit::G,
    Unit::Kg,
    Unit::Oz,
    Unit::Lb,
    Unit::Ml,
    Unit::L,
    Unit::Tsp,
    Unit::Tbsp,
];

impl Unit {
    pub fn symbol(self) -> &'static str {
        match self {
            Unit::Mg => "mg",
            Unit::G => "g",
            Unit::Kg => "kg",
            Unit::Oz => "oz",
            Unit::Lb => "lb",
            Unit::Ml => "ml",
            Unit::L => "l",
            Unit::Tsp => "tsp",
            Unit::Tbsp => "tbsp",
        }
    }

    pub fn category(self) -> Category {
        match self {
            Unit::Mg | Unit::G | Unit::Kg | Unit::Oz | Unit::Lb => Category::Mass,
            Unit::Ml | Unit::L | Unit::Tsp | Unit::Tbsp => Category::Volume,
        }
    }

    pub fn system(self) -> UnitSystem {
        match self {
            Unit::Mg | Unit::G | Unit::Kg | Unit::Ml | Unit::L => UnitSystem::Metric,
            Unit::Oz | Unit::Lb | Unit::Tsp | Unit::Tbsp => UnitSystem::Customary,
        }
    }

    /// How many base units (gram or milliliter) one of this unit equals.
    pub fn factor(self) -> Decimal {
        match self {
            Unit::Mg => Decimal::new(1, 3),
            Unit::G => Decimal::ONE,
            Unit::Kg => Decimal::new(1000, 0),
            Unit::Oz => Decimal::new(283_495, 4),
            Unit::Lb => Decimal::new(453_592, 3),
            Unit::Ml => Decimal::ONE,
            Unit::L => Decimal::new(1000, 0),
            Unit::Tsp => Decimal::new(492_892, 5),
            Unit::Tbsp => Decimal::new(147_868, 4),
        }
    }
}

impl core::fmt::Display for Unit {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Unit {
    type Err = DomainError;

    /// Case-insensitive, surrounding whitespace ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let symbol = s.trim().to_ascii_lowercase();
        ALL_UNITS
            .iter()
            .copied()
            .find(|unit| unit.symbol() == symbol)
            .ok_or_else(|| {
                DomainError::invalid_input(format!(
                    "unknown unit '{}' (expected one of: {})",
                    s.trim(),
                    unit_list()
                ))
            })
    }
}

/// Every unit: mass units in table order, then volume units in table order.
pub fn all_units() -> &'static [Unit] {
    ALL_UNITS
}

/// Units of one category, in table order.
pub fn units_in(category: Category) -> &'static [Unit] {
    CATALOG
        .iter()
        .find(|(c, _)| *c == category)
        .map(|(_, units)| *units)
        .unwrap_or(&[])
}

/// Category of a raw unit symbol, `None` when the symbol is unknown.
pub fn category_of(symbol: &str) -> Option<Category> {
    symbol.parse::<Unit>().ok().map(Unit::category)
}

/// Factor of `unit` within `category`, `None` when the unit belongs elsewhere.
pub fn factor(category: Category, unit: Unit) -> Option<Decimal> {
    (unit.category() == category).then(|| unit.factor())
}

/// Comma-separated symbols for prompts, e.g. `"mg, g, kg, ..."`.
pub fn unit_list() -> String {
    ALL_UNITS
        .iter()
        .map(|u| u.symbol())
        .collect::<Vec<_>>()
        .join(", ")
}
