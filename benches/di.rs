use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::sync::Arc;
use wrought_di::{BindingRegistry, Injector, ServiceKey, TypeCatalog, TypeShape};

// ===== Micro Benchmarks =====

struct Config {
    value: u64,
}

struct Service {
    config: Arc<Config>,
}

fn service_catalog() -> TypeCatalog {
    let mut catalog = TypeCatalog::new();
    catalog.register(TypeShape::<Service>::new().marked_constructor(
        &[ServiceKey::of::<Config>()],
        |args| {
            Ok(Service {
                config: args.take::<Config>()?,
            })
        },
    ));
    catalog
}

fn bench_singleton_hit(c: &mut Criterion) {
    let mut registry = BindingRegistry::new();
    registry.bind_instance(Config { value: 42 }).unwrap();
    registry.bind_singleton::<Service>().unwrap();
    let injector = registry.freeze(service_catalog()).unwrap();

    // Prime the singleton
    let _ = injector.resolve::<Service>().unwrap();

    c.bench_function("singleton_hit", |b| {
        b.iter(|| {
            let service = injector.resolve::<Service>().unwrap();
            black_box(service.config.value);
        })
    });
}

fn bench_singleton_cold(c: &mut Criterion) {
    c.bench_function("singleton_cold", |b| {
        b.iter_batched(
            || {
                let mut registry = BindingRegistry::new();
                registry.bind_instance(Config { value: 42 }).unwrap();
                registry.bind_singleton::<Service>().unwrap();
                registry.freeze(service_catalog()).unwrap()
            },
            |injector: Injector| {
                let service = injector.resolve::<Service>().unwrap();
                black_box(service.config.value);
            },
            criterion::BatchSize::SmallInput,
        )
    });
}

fn bench_transient_construction(c: &mut Criterion) {
    let mut registry = BindingRegistry::new();
    registry.bind_instance(Config { value: 42 }).unwrap();
    registry.bind_transient::<Service>().unwrap();
    let injector = registry.freeze(service_catalog()).unwrap();

    c.bench_function("transient_construction", |b| {
        b.iter(|| {
            let service = injector.resolve::<Service>().unwrap();
            black_box(service.config.value);
        })
    });
}

fn bench_deep_graph(c: &mut Criterion) {
    struct L0;
    struct L1 {
        _inner: Arc<L0>,
    }
    struct L2 {
        _inner: Arc<L1>,
    }
    struct L3 {
        _inner: Arc<L2>,
    }

    let mut catalog = TypeCatalog::new();
    catalog.register(TypeShape::<L0>::new().plain_constructor(&[], |_| Ok(L0)));
    catalog.register(TypeShape::<L1>::new().marked_constructor(
        &[ServiceKey::of::<L0>()],
        |args| {
            Ok(L1 {
                _inner: args.take::<L0>()?,
            })
        },
    ));
    catalog.register(TypeShape::<L2>::new().marked_constructor(
        &[ServiceKey::of::<L1>()],
        |args| {
            Ok(L2 {
                _inner: args.take::<L1>()?,
            })
        },
    ));
    catalog.register(TypeShape::<L3>::new().marked_constructor(
        &[ServiceKey::of::<L2>()],
        |args| {
            Ok(L3 {
                _inner: args.take::<L2>()?,
            })
        },
    ));

    let mut registry = BindingRegistry::new();
    registry.bind_transient::<L0>().unwrap();
    registry.bind_transient::<L1>().unwrap();
    registry.bind_transient::<L2>().unwrap();
    registry.bind_transient::<L3>().unwrap();
    let injector = registry.freeze(catalog).unwrap();

    c.bench_function("transient_graph_depth_4", |b| {
        b.iter(|| {
            let root = injector.resolve::<L3>().unwrap();
            black_box(root);
        })
    });
}

fn bench_by_name(c: &mut Criterion) {
    struct Probe;

    let mut catalog = TypeCatalog::new();
    catalog.register(
        TypeShape::<Probe>::new()
            .named("Probe")
            .plain_constructor(&[], |_| Ok(Probe)),
    );

    let injector = BindingRegistry::new().freeze(catalog).unwrap();

    c.bench_function("resolve_by_name", |b| {
        b.iter(|| {
            let probe = injector.resolve_by_name("Probe").unwrap();
            black_box(probe);
        })
    });
}

criterion_group!(
    benches,
    bench_singleton_hit,
    bench_singleton_cold,
    bench_transient_construction,
    bench_deep_graph,
    bench_by_name
);
criterion_main!(benches);
