//! Black-box scenarios driven through the public inventory API.

use bakery_core::DomainError;
use bakery_inventory::{Category, Inventory, Measure, Unit, all_units, auto_scale, unit_category};
use rust_decimal::Decimal;

fn dec(num: i64) -> Decimal {
    Decimal::from(num)
}

#[test]
fn flour_lifecycle_add_convert_consume_rebase() {
    let mut inventory = Inventory::new();

    inventory.add("flour", "g", dec(500)).unwrap();
    inventory.add("flour", "g", dec(300)).unwrap();
    assert_eq!(inventory.search("flour").unwrap().measure(), Measure::new(dec(800), Unit::G));

    let err = inventory.consume("flour", "kg", dec(1)).unwrap_err();
    assert!(matches!(err, DomainError::InsufficientStock { .. }));
    assert_eq!(inventory.search("flour").unwrap().quantity(), dec(800));

    inventory.consume("flour", "g", dec(800)).unwrap();
    let flour = inventory.search("flour").unwrap();
    assert!(flour.is_depleted());
    assert_eq!(flour.unit(), Unit::G);

    inventory.add("flour", "lb", dec(2)).unwrap();
    assert_eq!(inventory.search("flour").unwrap().measure(), Measure::new(dec(2), Unit::Lb));
}

#[test]
fn kilograms_merge_into_grams() {
    let mut inventory = Inventory::new();
    inventory.add("flour", "g", dec(500)).unwrap();
    inventory.add("flour", "g", dec(300)).unwrap();

    let ack = inventory.add("flour", "KG", dec(1)).unwrap();
    assert_eq!(ack.on_hand(), Some(Measure::new(dec(1800), Unit::G)));

    let flour = inventory.search("Flour").unwrap();
    assert_eq!(flour.scaled(), Some(Measure::new(Decimal::new(18, 1), Unit::Kg)));
}

#[test]
fn volume_and_mass_do_not_mix() {
    let mut inventory = Inventory::new();
    inventory.add("milk", "l", dec(1)).unwrap();

    assert_eq!(
        inventory.add("milk", "g", dec(50)).unwrap_err(),
        DomainError::incompatible("g", "l")
    );
    inventory.consume("milk", "tbsp", dec(2)).unwrap();

    let milk = inventory.search("milk").unwrap();
    assert_eq!(milk.unit(), Unit::L);
    assert!(milk.quantity() < dec(1));
    assert!(milk.quantity() > Decimal::new(97, 2));
}

#[test]
fn unknown_names_are_not_found() {
    let mut inventory = Inventory::new();
    assert_eq!(inventory.search("saffron").unwrap_err(), DomainError::not_found("saffron"));
    assert_eq!(
        inventory.consume("saffron", "mg", dec(5)).unwrap_err(),
        DomainError::not_found("saffron")
    );
}

#[test]
fn caller_validation_helpers() {
    let symbols: Vec<&str> = all_units().iter().map(|u| u.symbol()).collect();
    assert_eq!(symbols, vec!["mg", "g", "kg", "oz", "lb", "ml", "l", "tsp", "tbsp"]);
    assert_eq!(unit_category("lb"), Some(Category::Mass));
    assert_eq!(unit_category("l"), Some(Category::Volume));
    assert_eq!(unit_category("cup"), None);
}

#[test]
fn auto_scale_examples() {
    assert_eq!(auto_scale(dec(1500), Unit::G), Measure::new(Decimal::new(15, 1), Unit::Kg));
    assert_eq!(auto_scale(dec(500), Unit::G), Measure::new(dec(500), Unit::G));
}
