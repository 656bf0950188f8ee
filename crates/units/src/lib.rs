//! Units of measure for the bakery inventory.
//!
//! A static catalog of mass and volume units plus the conversion engine that
//! moves quantities between them. Everything here is pure and synchronous.

pub mod catalog;
pub mod conversion;

pub use catalog::{
    Category, Unit, UnitSystem, all_units, category_of, factor, unit_list, units_in,
};
pub use conversion::{DISPLAY_PRECISION, Measure, auto_scale, convert, convert_symbols};
