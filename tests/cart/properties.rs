use dishcart::{CartLedger, ItemId};
use proptest::prelude::*;

use crate::{cuisine, dish};

#[derive(Clone, Debug)]
enum Op {
    Add(i64),
    Remove(i64),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![(0i64..6).prop_map(Op::Add), (0i64..6).prop_map(Op::Remove)]
}

fn apply(ledger: &CartLedger, ops: &[Op]) {
    for op in ops {
        match op {
            Op::Add(id) => {
                ledger.add_to_cart(&cuisine(), &dish(*id));
            }
            Op::Remove(id) => {
                ledger.remove_from_cart(ItemId(*id));
            }
        }
    }
}

proptest! {
    #[test]
    fn total_is_sum_of_quantities(ops in prop::collection::vec(op(), 0..64)) {
        let ledger = CartLedger::new();
        apply(&ledger, &ops);

        let view = ledger.snapshot();
        let summed: u32 = (0..6).map(|id| view.quantity_of(ItemId(id))).sum();
        prop_assert_eq!(view.total_item_count(), summed);
        prop_assert!(view.lines().all(|line| line.quantity >= 1));
    }

    #[test]
    fn quantity_matches_a_naive_model(ops in prop::collection::vec(op(), 0..64)) {
        let ledger = CartLedger::new();
        let mut model = [0u32; 6];
        for op in &ops {
            match op {
                Op::Add(id) => model[*id as usize] += 1,
                Op::Remove(id) => model[*id as usize] = model[*id as usize].saturating_sub(1),
            }
        }
        apply(&ledger, &ops);

        for (id, expected) in model.iter().enumerate() {
            prop_assert_eq!(ledger.quantity_of(ItemId(id as i64)), *expected);
        }
    }

    #[test]
    fn removing_the_last_unit_drops_the_line(
        ops in prop::collection::vec(op(), 0..32),
        id in 0i64..6,
    ) {
        let ledger = CartLedger::new();
        apply(&ledger, &ops);
        while ledger.quantity_of(ItemId(id)) > 1 {
            ledger.remove_from_cart(ItemId(id));
        }
        if ledger.quantity_of(ItemId(id)) == 0 {
            ledger.add_to_cart(&cuisine(), &dish(id));
        }
        let total_before = ledger.total_item_count();

        prop_assert_eq!(ledger.remove_from_cart(ItemId(id)), 0);
        prop_assert_eq!(ledger.total_item_count(), total_before - 1);
        prop_assert_eq!(ledger.quantity_of(ItemId(id)), 0);
        prop_assert!(ledger.snapshot().line(ItemId(id)).is_none());
    }

    #[test]
    fn removing_an_absent_item_is_a_no_op(ops in prop::collection::vec(op(), 0..32)) {
        let ledger = CartLedger::new();
        apply(&ledger, &ops);
        let before = ledger.snapshot();

        ledger.remove_from_cart(ItemId(1_000));

        prop_assert_eq!(ledger.snapshot(), before.clone());
        prop_assert_eq!(ledger.version(), before.version());
    }

    #[test]
    fn add_then_remove_round_trips(
        ops in prop::collection::vec(op(), 0..32),
        id in 0i64..8,
        times in 1usize..5,
    ) {
        let ledger = CartLedger::new();
        apply(&ledger, &ops);
        let before = ledger.snapshot();

        for _ in 0..times {
            ledger.add_to_cart(&cuisine(), &dish(id));
        }
        for _ in 0..times {
            ledger.remove_from_cart(ItemId(id));
        }

        prop_assert_eq!(ledger.snapshot(), before);
    }
}
