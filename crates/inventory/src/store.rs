use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use bakery_core::{Aggregate, DomainError, DomainResult, Entity};
use bakery_units::{Measure, Unit, convert};

use crate::entry::{IngredientName, StockEntry, normalize};

/// Command: AddStock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddStock {
    pub name: IngredientName,
    pub unit: Unit,
    pub quantity: Decimal,
}

/// Command: ConsumeStock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsumeStock {
    pub name: IngredientName,
    pub unit: Unit,
    pub quantity: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InventoryCommand {
    AddStock(AddStock),
    ConsumeStock(ConsumeStock),
}

impl InventoryCommand {
    /// Validate raw caller input into an `AddStock` command.
    pub fn add(name: &str, unit: &str, quantity: Decimal) -> DomainResult<Self> {
        Ok(Self::AddStock(AddStock {
            name: IngredientName::parse(name)?,
            unit: unit.parse()?,
            quantity,
        }))
    }

    /// Validate raw caller input into a `ConsumeStock` command.
    pub fn consume(name: &str, unit: &str, quantity: Decimal) -> DomainResult<Self> {
        Ok(Self::ConsumeStock(ConsumeStock {
            name: IngredientName::parse(name)?,
            unit: unit.parse()?,
            quantity,
        }))
    }
}

/// Event: IngredientCreated (first add of a new name).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientCreated {
    pub name: IngredientName,
    pub unit: Unit,
    pub quantity: Decimal,
}

/// Event: StockRebased (add onto a depleted entry, unit replaced).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockRebased {
    pub name: IngredientName,
    pub unit: Unit,
    pub quantity: Decimal,
}

/// Event: StockAdded. `quantity` and `on_hand` are in the entry's unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockAdded {
    pub name: IngredientName,
    pub unit: Unit,
    pub quantity: Decimal,
    pub on_hand: Decimal,
}

/// Event: StockConsumed. `quantity` and `on_hand` are in the entry's unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockConsumed {
    pub name: IngredientName,
    pub unit: Unit,
    pub quantity: Decimal,
    pub on_hand: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InventoryEvent {
    IngredientCreated(IngredientCreated),
    StockRebased(StockRebased),
    StockAdded(StockAdded),
    StockConsumed(StockConsumed),
}

impl InventoryEvent {
    /// Stable event name (e.g. "inventory.stock.added").
    pub fn event_type(&self) -> &'static str {
        match self {
            InventoryEvent::IngredientCreated(_) => "inventory.ingredient.created",
            InventoryEvent::StockRebased(_) => "inventory.stock.rebased",
            InventoryEvent::StockAdded(_) => "inventory.stock.added",
            InventoryEvent::StockConsumed(_) => "inventory.stock.consumed",
        }
    }

    pub fn name(&self) -> &IngredientName {
        match self {
            InventoryEvent::IngredientCreated(e) => &e.name,
            InventoryEvent::StockRebased(e) => &e.name,
            InventoryEvent::StockAdded(e) => &e.name,
            InventoryEvent::StockConsumed(e) => &e.name,
        }
    }

    /// Quantity on hand once the event is applied.
    pub fn on_hand(&self) -> Measure {
        match self {
            InventoryEvent::IngredientCreated(e) => Measure::new(e.quantity, e.unit),
            InventoryEvent::StockRebased(e) => Measure::new(e.quantity, e.unit),
            InventoryEvent::StockAdded(e) => Measure::new(e.on_hand, e.unit),
            InventoryEvent::StockConsumed(e) => Measure::new(e.on_hand, e.unit),
        }
    }
}

/// Acknowledgement of an accepted mutation: the events that were applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ack {
    pub events: Vec<InventoryEvent>,
}

impl Ack {
    /// Resulting on-hand quantity of the last event.
    pub fn on_hand(&self) -> Option<Measure> {
        self.events.last().map(InventoryEvent::on_hand)
    }
}

/// In-memory ingredient inventory.
///
/// Entries keep insertion order. The caller owns the instance for the life of
/// the program; nothing is persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    entries: Vec<StockEntry>,
    index: HashMap<IngredientName, usize>,
    version: u64,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `quantity` of `unit` to `name`.
    ///
    /// - unknown name: creates the entry as given
    /// - depleted entry: replaces the unit and sets the quantity
    /// - otherwise: converts into the entry's unit and adds
    pub fn add(&mut self, name: &str, unit: &str, quantity: Decimal) -> DomainResult<Ack> {
        let command = InventoryCommand::add(name, unit, quantity)
            .inspect_err(|err| warn!(ingredient = name, unit, %quantity, %err, "add rejected"))?;
        self.dispatch(&command)
    }

    /// Consume `quantity` of `unit` from `name`, converted into the entry's unit.
    pub fn consume(&mut self, name: &str, unit: &str, quantity: Decimal) -> DomainResult<Ack> {
        let command = InventoryCommand::consume(name, unit, quantity)
            .inspect_err(|err| warn!(ingredient = name, unit, %quantity, %err, "consume rejected"))?;
        self.dispatch(&command)
    }

    /// Look up an ingredient by (unnormalized) name.
    pub fn search(&self, name: &str) -> DomainResult<&StockEntry> {
        let name = normalize(name);
        self.index
            .get(name.as_str())
            .and_then(|&i| self.entries.get(i))
            .ok_or_else(|| DomainError::not_found(name))
    }

    /// Every entry in insertion order, zero-quantity entries included.
    pub fn list_all(&self) -> &[StockEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &StockEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Nothing worth displaying: no entries, or all of them depleted.
    pub fn is_effectively_empty(&self) -> bool {
        self.entries.iter().all(StockEntry::is_depleted)
    }

    fn dispatch(&mut self, command: &InventoryCommand) -> DomainResult<Ack> {
        match self.execute(command) {
            Ok(events) => {
                for event in &events {
                    let on_hand = event.on_hand();
                    debug!(
                        event = event.event_type(),
                        ingredient = %event.name(),
                        quantity = %on_hand.quantity,
                        unit = %on_hand.unit,
                        "inventory updated"
                    );
                }
                Ok(Ack { events })
            }
            Err(err) => {
                warn!(?command, %err, "inventory command rejected");
                Err(err)
            }
        }
    }

    fn get(&self, name: &IngredientName) -> Option<&StockEntry> {
        self.index.get(name).and_then(|&i| self.entries.get(i))
    }

    fn get_mut(&mut self, name: &IngredientName) -> Option<&mut StockEntry> {
        match self.index.get(name) {
            Some(&i) => self.entries.get_mut(i),
            None => None,
        }
    }

    fn ensure_positive(quantity: Decimal) -> DomainResult<()> {
        if quantity <= Decimal::ZERO {
            return Err(DomainError::invalid_input("quantity must be greater than zero"));
        }
        Ok(())
    }

    fn handle_add(&self, cmd: &AddStock) -> DomainResult<Vec<InventoryEvent>> {
        Self::ensure_positive(cmd.quantity)?;

        let event = match self.get(&cmd.name) {
            None => InventoryEvent::IngredientCreated(IngredientCreated {
                name: cmd.name.clone(),
                unit: cmd.unit,
                quantity: cmd.quantity,
            }),
            Some(entry) if entry.is_depleted() => InventoryEvent::StockRebased(StockRebased {
                name: cmd.name.clone(),
                unit: cmd.unit,
                quantity: cmd.quantity,
            }),
            Some(entry) => {
                let amount = convert(cmd.quantity, cmd.unit, entry.unit())?;
                let on_hand = entry.quantity().checked_add(amount).ok_or_else(|| {
                    DomainError::invalid_input(format!("{} would overflow", entry.name()))
                })?;
                InventoryEvent::StockAdded(StockAdded {
                    name: cmd.name.clone(),
                    unit: entry.unit(),
                    quantity: amount,
                    on_hand,
                })
            }
        };
        Ok(vec![event])
    }

    fn handle_consume(&self, cmd: &ConsumeStock) -> DomainResult<Vec<InventoryEvent>> {
        Self::ensure_positive(cmd.quantity)?;

        let entry = self
            .get(&cmd.name)
            .ok_or_else(|| DomainError::not_found(cmd.name.as_str()))?;
        let amount = convert(cmd.quantity, cmd.unit, entry.unit())?;
        if amount > entry.quantity() {
            return Err(DomainError::insufficient(
                entry.name().as_str(),
                Measure::new(amount, entry.unit()).to_string(),
                entry.measure().to_string(),
            ));
        }

        Ok(vec![InventoryEvent::StockConsumed(StockConsumed {
            name: cmd.name.clone(),
            unit: entry.unit(),
            quantity: amount,
            on_hand: entry.quantity() - amount,
        })])
    }
}

impl Aggregate for Inventory {
    type Command = InventoryCommand;
    type Event = InventoryEvent;
    type Error = DomainError;

    fn version(&self) -> u64 {
        self.version
    }

    fn apply(&mut self, event: &Self::Event) {
        match event {
            InventoryEvent::IngredientCreated(e) => {
                let entry = StockEntry::new(e.name.clone(), e.quantity, e.unit);
                self.index.insert(entry.id().clone(), self.entries.len());
                self.entries.push(entry);
            }
            InventoryEvent::StockRebased(e) => {
                if let Some(entry) = self.get_mut(&e.name) {
                    entry.rebase(e.quantity, e.unit);
                }
            }
            InventoryEvent::StockAdded(StockAdded { name, on_hand, .. })
            | InventoryEvent::StockConsumed(StockConsumed { name, on_hand, .. }) => {
                if let Some(entry) = self.get_mut(name) {
                    entry.set_quantity(*on_hand);
                }
            }
        }

        // +1 per applied event.
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            InventoryCommand::AddStock(cmd) => self.handle_add(cmd),
            InventoryCommand::ConsumeStock(cmd) => self.handle_consume(cmd),
        }
    }
}
