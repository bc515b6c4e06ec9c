//! Property-based tests for CartStore operations
//!
//! Uses proptest to verify the cart invariants over arbitrary operation
//! sequences: unique titles, quantity floor, persistence round-trip,
//! self-healing decode, and totals.

use std::collections::HashSet;

use proptest::prelude::*;
use serde_json::json;
use storefront_core::normalize::PLACEHOLDER_TITLE;
use storefront_core::{codec, CartStore, KeyValueStore, LineItem, MemoryStore, ProductCandidate};

// ============================================================================
// Strategy Generators
// ============================================================================

/// Small title pool so operations collide often
fn title_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["Mug", "Cup", "Taza", "Vela", "", "Mug ", PLACEHOLDER_TITLE])
        .prop_map(str::to_string)
}

/// Operations that can be performed on a CartStore
#[derive(Debug, Clone)]
enum CartOp {
    Add {
        title: String,
        price: u32,
        quantity: Option<i64>,
    },
    Remove(String),
    Change(String, i64),
}

fn cart_ops_strategy(max_ops: usize) -> impl Strategy<Value = Vec<CartOp>> {
    prop::collection::vec(
        prop_oneof![
            3 => (title_strategy(), 0..200_000u32, prop::option::of(-3..6i64)).prop_map(
                |(title, price, quantity)| CartOp::Add { title, price, quantity }
            ),
            1 => title_strategy().prop_map(CartOp::Remove),
            2 => (title_strategy(), -10..10i64).prop_map(|(t, d)| CartOp::Change(t, d)),
        ],
        0..max_ops,
    )
}

fn apply(store: &mut CartStore<MemoryStore>, op: &CartOp) {
    match op {
        CartOp::Add {
            title,
            price,
            quantity,
        } => {
            let mut candidate = ProductCandidate::new(title.clone()).with_price(f64::from(*price));
            if let Some(q) = quantity {
                candidate = candidate.with_quantity(*q);
            }
            store.add_item(candidate);
        }
        CartOp::Remove(title) => {
            store.remove_item(title);
        }
        CartOp::Change(title, delta) => {
            store.change_quantity(title, *delta);
        }
    }
}

/// Reference model: the same rules, written as plainly as possible.
fn apply_model(model: &mut Vec<LineItem>, op: &CartOp) {
    match op {
        CartOp::Add {
            title,
            price,
            quantity,
        } => {
            let q = quantity.filter(|q| *q >= 1).unwrap_or(1) as u32;
            if let Some(item) = model.iter_mut().find(|i| &i.title == title) {
                item.quantity += q;
            } else {
                model.push(LineItem {
                    title: title.clone(),
                    image_source: String::new(),
                    unit_price: f64::from(*price),
                    quantity: q,
                });
            }
        }
        CartOp::Remove(title) => model.retain(|i| &i.title != title),
        CartOp::Change(title, delta) => {
            if let Some(item) = model.iter_mut().find(|i| &i.title == title) {
                item.quantity = (i64::from(item.quantity) + delta).max(1) as u32;
            }
        }
    }
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// P1: titles stay unique after every operation
    #[test]
    fn titles_stay_unique(ops in cart_ops_strategy(40)) {
        let mut store = CartStore::new(MemoryStore::new());
        for op in &ops {
            apply(&mut store, op);
            let titles: HashSet<_> = store.items().iter().map(|i| i.title.clone()).collect();
            prop_assert_eq!(titles.len(), store.len());
        }
    }

    /// P2: quantity never drops below 1, whatever the deltas
    #[test]
    fn quantity_floor_holds(deltas in prop::collection::vec(-20..20i64, 1..30)) {
        let mut store = CartStore::new(MemoryStore::new());
        store.add_item(ProductCandidate::new("Mug"));
        for delta in deltas {
            store.change_quantity("Mug", delta);
            prop_assert!(store.get("Mug").unwrap().quantity >= 1);
        }
    }

    /// P3: a new store over the same storage sees exactly the same cart
    #[test]
    fn persistence_round_trip(ops in cart_ops_strategy(30)) {
        let storage = MemoryStore::new();
        let mut store = CartStore::new(storage.clone());
        for op in &ops {
            apply(&mut store, op);
        }

        let reopened = CartStore::new(storage);
        prop_assert_eq!(reopened.items(), store.items());
    }

    /// P4: non-numeric prices, missing quantities and missing titles heal
    #[test]
    fn decode_heals_bad_fields(junk in "[a-zA-Z ]{1,12}", price in 0..100_000u32) {
        let record = json!([
            { "title": "Mug", "price": junk, "quantity": 2 },
            { "title": "Cup", "price": price },
            { "price": price, "quantity": 3 },
        ]);
        let items = codec::decode(record.to_string().as_bytes()).unwrap();

        prop_assert_eq!(items[0].unit_price, 0.0);
        prop_assert_eq!(items[1].quantity, 1);
        prop_assert_eq!(items[1].unit_price, f64::from(price));
        prop_assert_eq!(items[2].title.as_str(), PLACEHOLDER_TITLE);
        prop_assert_eq!(items[2].quantity, 3);
    }

    /// P5: totals match the fold after every operation, and the cart matches
    /// a plain reference model
    #[test]
    fn totals_and_model_agree(ops in cart_ops_strategy(40)) {
        let mut store = CartStore::new(MemoryStore::new());
        let mut model: Vec<LineItem> = Vec::new();

        for op in &ops {
            apply(&mut store, op);
            apply_model(&mut model, op);

            prop_assert_eq!(store.items(), model.as_slice());

            let totals = store.totals();
            let items: u64 = model.iter().map(|i| u64::from(i.quantity)).sum();
            let price: f64 = model.iter().map(|i| i.unit_price * f64::from(i.quantity)).sum();
            prop_assert_eq!(totals.total_items, items);
            prop_assert_eq!(totals.total_price, price);
        }
    }

    /// Storage always holds the encoded in-memory cart after a mutation
    #[test]
    fn storage_mirrors_memory(ops in cart_ops_strategy(30)) {
        let storage = MemoryStore::new();
        let mut store = CartStore::new(storage.clone());
        for op in &ops {
            apply(&mut store, op);
            if let Some(bytes) = storage.get("cart").unwrap() {
                prop_assert_eq!(bytes, store.snapshot().unwrap());
            }
        }
    }
}
