//! Ingredient inventory with unit-aware add/consume.
//!
//! Pure domain logic (no IO, no prompts, no rendering). Mutations go through
//! the `Aggregate` decide/apply split so a rejected command never touches state.

pub mod entry;
pub mod store;

pub use entry::{IngredientName, StockEntry};
pub use store::{
    Ack, AddStock, ConsumeStock, IngredientCreated, Inventory, InventoryCommand, InventoryEvent,
    StockAdded, StockConsumed, StockRebased,
};

pub use bakery_units::{Category, Measure, Unit, all_units, auto_scale, category_of as unit_category};
