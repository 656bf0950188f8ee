use core::borrow::Borrow;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use bakery_core::{DomainError, DomainResult, Entity};
use bakery_units::{Measure, Unit};

/// Normalized ingredient name: trimmed, lowercase, never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IngredientName(String);

impl IngredientName {
    pub fn parse(raw: &str) -> DomainResult<Self> {
        let name = normalize(raw);
        if name.is_empty() {
            return Err(DomainError::invalid_input("ingredient name cannot be empty"));
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

pub(crate) fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

impl core::fmt::Display for IngredientName {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for IngredientName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// One ingredient's holdings.
///
/// `quantity` is never negative and `unit` is always a catalog unit. A
/// zero-quantity entry is still a real record; it is only ever re-based, never
/// removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockEntry {
    name: IngredientName,
    quantity: Decimal,
    unit: Unit,
}

impl StockEntry {
    pub(crate) fn new(name: IngredientName, quantity: Decimal, unit: Unit) -> Self {
        Self {
            name,
            quantity,
            unit,
        }
    }

    pub fn name(&self) -> &IngredientName {
        &self.name
    }

    pub fn quantity(&self) -> Decimal {
        self.quantity
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    pub fn measure(&self) -> Measure {
        Measure::new(self.quantity, self.unit)
    }

    /// Nothing on hand; the next add may switch the unit.
    pub fn is_depleted(&self) -> bool {
        self.quantity.is_zero()
    }

    /// Auto-scaled display alternative, only when it lands on a different unit.
    pub fn scaled(&self) -> Option<Measure> {
        let scaled = self.measure().auto_scaled();
        (scaled.unit != self.unit).then_some(scaled)
    }

    pub(crate) fn set_quantity(&mut self, quantity: Decimal) {
        self.quantity = quantity;
    }

    pub(crate) fn rebase(&mut self, quantity: Decimal, unit: Unit) {
        self.quantity = quantity;
        self.unit = unit;
    }
}

impl Entity for StockEntry {
    type Id = IngredientName;

    fn id(&self) -> &Self::Id {
        &self.name
    }
}
