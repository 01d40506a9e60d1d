/// Property-based tests for binding and resolution behavior
///
/// These tests verify that resolution invariants hold regardless of the
/// specific payloads or registration sequences used.
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use proptest::prelude::*;
use wrought_di::{BindingRegistry, TypeCatalog, TypeShape};

#[derive(Debug, Clone, PartialEq)]
struct Payload {
    value: String,
}

#[derive(Debug, Clone, PartialEq)]
struct Numbered {
    number: u64,
}

proptest! {
    // Instance bindings always hand back the identical stored value.
    #[test]
    fn instance_resolution_consistency(value in "\\PC{0,50}") {
        let mut registry = BindingRegistry::new();
        registry.bind_instance(Payload { value: value.clone() }).unwrap();

        let injector = registry.freeze(TypeCatalog::new()).unwrap();

        let a = injector.resolve::<Payload>().unwrap();
        let b = injector.resolve::<Payload>().unwrap();
        let c = injector.resolve::<Payload>().unwrap();

        prop_assert!(Arc::ptr_eq(&a, &b));
        prop_assert!(Arc::ptr_eq(&b, &c));
        prop_assert_eq!(&a.value, &value);
    }
}

proptest! {
    // However many registrations happen for one key, the last one wins.
    #[test]
    fn last_registration_wins(values in prop::collection::vec(any::<u64>(), 1..16)) {
        let mut registry = BindingRegistry::new();
        for number in &values {
            registry.bind_instance(Numbered { number: *number }).unwrap();
        }

        let injector = registry.freeze(TypeCatalog::new()).unwrap();
        let resolved = injector.resolve::<Numbered>().unwrap();

        prop_assert_eq!(resolved.number, *values.last().unwrap());
    }
}

proptest! {
    // Resolution outcome mirrors registration state.
    #[test]
    fn optional_resolution_behavior(register in any::<bool>()) {
        let mut registry = BindingRegistry::new();

        if register {
            registry.bind_instance(Numbered { number: 42 }).unwrap();
        }

        let injector = registry.freeze(TypeCatalog::new()).unwrap();
        let result = injector.resolve::<Numbered>();

        if register {
            prop_assert_eq!(result.unwrap().number, 42);
        } else {
            prop_assert!(result.is_err());
        }
    }
}

proptest! {
    // Transient bindings never reuse an instance, whatever the request count.
    #[test]
    fn transients_are_always_fresh(count in 1usize..8) {
        struct Stamp {
            serial: usize,
        }

        static SERIAL: AtomicUsize = AtomicUsize::new(0);

        let mut catalog = TypeCatalog::new();
        catalog.register(TypeShape::<Stamp>::new().plain_constructor(&[], |_| {
            Ok(Stamp {
                serial: SERIAL.fetch_add(1, Ordering::SeqCst),
            })
        }));

        let mut registry = BindingRegistry::new();
        registry.bind_transient::<Stamp>().unwrap();
        let injector = registry.freeze(catalog).unwrap();

        let mut serials: Vec<usize> = (0..count)
            .map(|_| injector.resolve::<Stamp>().unwrap().serial)
            .collect();
        serials.sort_unstable();
        serials.dedup();

        prop_assert_eq!(serials.len(), count);
    }
}
