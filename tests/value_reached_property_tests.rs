// Copyright 2025 Cowboy AI, LLC.

use cim_progress::{ConstantValue, CurrentValue, PropertyFactory, ReachValue, ValueType, Values};
use proptest::prelude::*;

proptest! {
    #[test]
    fn reached_is_reflexive(v in any::<i64>()) {
        let property = PropertyFactory::new().create_with_value("n", 0i64).unwrap();
        for kind in ValueType::ALL {
            prop_assert!(kind.create(&property, v).reached(&v));
        }
    }

    #[test]
    fn reached_is_reflexive_for_text(v in ".{0,16}") {
        let property = PropertyFactory::new().create::<String>("label", None).unwrap();
        prop_assert!(ConstantValue::new(property, v.clone()).reached(&v));
    }

    #[test]
    fn reached_is_monotonic(mut triple in proptest::array::uniform3(any::<i32>())) {
        triple.sort_unstable();
        let [low, mid, high] = triple;
        let property = PropertyFactory::new().create_with_value("n", 0i32).unwrap();
        let held = CurrentValue::new(property, mid);

        prop_assert!(held.reached(&low));
        prop_assert_eq!(held.reached(&high), mid == high);
    }

    #[test]
    fn value_type_round_trips(v in any::<u16>()) {
        let property = PropertyFactory::new().create_with_value("n", 0u16).unwrap();
        for kind in ValueType::ALL {
            let value = kind.create(&property, v);
            prop_assert_eq!(value.value_type(), kind);
            prop_assert_eq!(value.get(), v);
        }
    }

    #[test]
    fn equal_declarations_are_one_property(name in "[a-z]{1,12}", default in any::<i32>()) {
        let factory = PropertyFactory::new();
        let first = factory.create_with_value(name.clone(), default).unwrap();
        let second = factory.create_with_value(name.clone(), default).unwrap();

        prop_assert!(first.ptr_eq(&second));
        prop_assert_eq!(factory.len(), 1);
    }

    #[test]
    fn completion_is_an_and_over_targets(
        targets in proptest::collection::vec(0u32..1_000, 1..8),
        shortfall in any::<prop::sample::Index>(),
    ) {
        let factory = PropertyFactory::new();
        let properties: Vec<_> = (0..targets.len())
            .map(|i| factory.create_with_value(format!("p{i}"), 0u32).unwrap())
            .collect();

        let reach = Values::of(
            properties
                .iter()
                .zip(&targets)
                .map(|(property, target)| ReachValue::new(property.clone(), *target)),
        )
        .unwrap();
        let current = reach.create_current_values().unwrap();

        // Reach every target exactly
        for (property, target) in properties.iter().zip(&targets) {
            current.get_current_value(property).unwrap().apply(|n| n + target);
        }
        prop_assert!(current.is_complete(&reach));

        // Under-increment one target
        let lagging = shortfall.index(targets.len());
        let target = targets[lagging];
        prop_assume!(target > 0);
        current.get_current_value(&properties[lagging]).unwrap().apply(|n| n - 1);
        prop_assert!(!current.is_complete(&reach));
        prop_assert_eq!(
            current.missing_targets(&reach),
            vec![properties[lagging].name()]
        );
    }

    #[test]
    fn dead_chains_stay_dead(
        held in any::<bool>(),
        probes in proptest::collection::vec(any::<bool>(), 0..8),
    ) {
        let factory = PropertyFactory::new();
        let flag = factory.create::<bool>("flag", None).unwrap();
        let values = Values::builder()
            .with(ConstantValue::new(flag.clone(), held))
            .build()
            .unwrap();

        // false < true, so the negation is only reached when holding true
        let mut chain = values.optional().match_constant(&flag, &!held);
        prop_assert_eq!(chain.is_alive(), held);

        for probe in probes {
            let was_dead = chain.is_dead();
            chain = chain.match_constant(&flag, &probe);
            if was_dead {
                prop_assert!(chain.is_dead());
                prop_assert!(chain.get_constant_value(&flag).is_none());
            }
        }
    }
}
