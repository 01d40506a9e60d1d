use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use wrought_di::{BindingRegistry, DiError, ServiceKey, TypeCatalog, TypeShape};

struct Config {
    url: String,
}

struct Gadget {
    config: Arc<Config>,
    serial: usize,
}

static SERIAL: AtomicUsize = AtomicUsize::new(0);

fn gadget_catalog() -> TypeCatalog {
    let mut catalog = TypeCatalog::new();
    catalog.register(
        TypeShape::<Gadget>::new()
            .named("Gadget")
            .marked_constructor(&[ServiceKey::of::<Config>()], |args| {
                Ok(Gadget {
                    config: args.take::<Config>()?,
                    serial: SERIAL.fetch_add(1, Ordering::SeqCst),
                })
            }),
    );
    catalog
}

#[test]
fn test_resolve_by_alias() {
    let mut registry = BindingRegistry::new();
    registry
        .bind_instance(Config {
            url: "postgres://localhost".to_string(),
        })
        .unwrap();

    let injector = registry.freeze(gadget_catalog()).unwrap();
    let gadget = injector.resolve_by_name_as::<Gadget>("Gadget").unwrap();

    assert_eq!(gadget.config.url, "postgres://localhost");
}

#[test]
fn test_resolve_by_full_type_path() {
    let mut registry = BindingRegistry::new();
    registry
        .bind_instance(Config {
            url: "postgres://localhost".to_string(),
        })
        .unwrap();

    let injector = registry.freeze(gadget_catalog()).unwrap();
    let gadget = injector
        .resolve_by_name_as::<Gadget>(std::any::type_name::<Gadget>())
        .unwrap();

    assert_eq!(gadget.config.url, "postgres://localhost");
}

#[test]
fn test_unknown_name() {
    let injector = BindingRegistry::new().freeze(TypeCatalog::new()).unwrap();

    match injector.resolve_by_name("nowhere::Phantom") {
        Err(DiError::UnknownType(name)) => assert_eq!(name, "nowhere::Phantom"),
        other => panic!("Expected UnknownType, got {:?}", other.err()),
    }
}

#[test]
fn test_name_lookup_bypasses_bindings() {
    let mut registry = BindingRegistry::new();
    registry
        .bind_instance(Config {
            url: "postgres://localhost".to_string(),
        })
        .unwrap();
    // Gadget itself is deliberately not bound.

    let injector = registry.freeze(gadget_catalog()).unwrap();

    assert!(matches!(
        injector.resolve::<Gadget>(),
        Err(DiError::Unbound(_))
    ));

    // Name-based construction works anyway, and builds fresh each call.
    let a = injector.resolve_by_name_as::<Gadget>("Gadget").unwrap();
    let b = injector.resolve_by_name_as::<Gadget>("Gadget").unwrap();
    assert_ne!(a.serial, b.serial);
}

#[test]
fn test_typed_lookup_rejects_wrong_type() {
    let mut registry = BindingRegistry::new();
    registry
        .bind_instance(Config {
            url: "postgres://localhost".to_string(),
        })
        .unwrap();

    let injector = registry.freeze(gadget_catalog()).unwrap();

    match injector.resolve_by_name_as::<Config>("Gadget") {
        Err(DiError::TypeMismatch(name)) => assert!(name.contains("Config")),
        other => panic!("Expected TypeMismatch, got {:?}", other.err()),
    }
}

#[test]
fn test_name_construction_detects_cycles() {
    struct Loop {
        #[allow(dead_code)]
        inner: Arc<Loop>,
    }

    let mut catalog = TypeCatalog::new();
    catalog.register(
        TypeShape::<Loop>::new()
            .named("Loop")
            .marked_constructor(&[ServiceKey::of::<Loop>()], |args| {
                Ok(Loop {
                    inner: args.take::<Loop>()?,
                })
            }),
    );

    let mut registry = BindingRegistry::new();
    registry.bind_transient::<Loop>().unwrap();

    let injector = registry.freeze(catalog).unwrap();

    assert!(matches!(
        injector.resolve_by_name("Loop"),
        Err(DiError::Circular(_))
    ));
}
