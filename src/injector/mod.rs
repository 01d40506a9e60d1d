//! The resolution engine.
//!
//! The injector consumes a frozen binding snapshot plus a type catalog
//! and produces fully wired instances on demand: binding-precedence
//! lookup, recursive parameter resolution, cycle detection, singleton
//! memoization and post-construction method injection all live here.

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use crate::binding::{BindingTables, ClassTarget, SingletonBinding};
use crate::catalog::{AnyShared, Args, ShapeData, TypeCatalog};
use crate::error::{DiError, DiResult};
use crate::key::ServiceKey;
use crate::observer::Observers;

mod context;
mod plan;

use context::ResolutionContext;
use plan::ConstructionPlan;

/// Resolution engine over a frozen binding snapshot.
///
/// Built once by [`BindingRegistry::freeze`](crate::BindingRegistry::freeze)
/// and shared for the life of the process. All caches grow
/// monotonically and are never cleared; the injector is fully
/// thread-safe and callable from any number of threads concurrently.
///
/// Resolution precedence for a key, first match wins: instance binding,
/// singleton binding, transient binding. A key with no binding of any
/// kind fails with [`DiError::Unbound`].
///
/// # Examples
///
/// ```rust
/// use wrought_di::{BindingRegistry, ServiceKey, TypeCatalog, TypeShape};
/// use std::sync::Arc;
///
/// struct Config {
///     url: String,
/// }
///
/// struct Repository {
///     config: Arc<Config>,
/// }
///
/// let mut catalog = TypeCatalog::new();
/// catalog.register(
///     TypeShape::<Repository>::new().marked_constructor(
///         &[ServiceKey::of::<Config>()],
///         |args| {
///             Ok(Repository {
///                 config: args.take::<Config>()?,
///             })
///         },
///     ),
/// );
///
/// let mut registry = BindingRegistry::new();
/// registry
///     .bind_instance(Config {
///         url: "postgres://localhost".to_string(),
///     })
///     .unwrap();
/// registry.bind_singleton::<Repository>().unwrap();
///
/// let injector = registry.freeze(catalog).unwrap();
/// let repo = injector.resolve::<Repository>().unwrap();
/// assert_eq!(repo.config.url, "postgres://localhost");
/// ```
pub struct Injector {
    instances: HashMap<ServiceKey, AnyShared>,
    singletons: HashMap<ServiceKey, SingletonBinding>,
    transients: HashMap<ServiceKey, ClassTarget>,
    catalog: TypeCatalog,
    plans: Mutex<HashMap<TypeId, Arc<ConstructionPlan>>>,
    observers: Observers,
}

impl std::fmt::Debug for Injector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Injector")
            .field("instances", &self.instances.len())
            .field("singletons", &self.singletons.len())
            .field("transients", &self.transients.len())
            .finish_non_exhaustive()
    }
}

impl Injector {
    pub(crate) fn new(tables: BindingTables, catalog: TypeCatalog, observers: Observers) -> Self {
        Self {
            instances: tables.instances,
            singletons: tables
                .singletons
                .into_iter()
                .map(|(key, target)| (key, SingletonBinding::new(target)))
                .collect(),
            transients: tables.transients,
            catalog,
            plans: Mutex::new(HashMap::new()),
            observers,
        }
    }

    /// Resolves a concrete key to a shared instance.
    pub fn resolve<T: Send + Sync + 'static>(&self) -> DiResult<Arc<T>> {
        let any = self.resolve_key(&ServiceKey::of::<T>())?;
        any.downcast::<T>()
            .map_err(|_| DiError::TypeMismatch(std::any::type_name::<T>()))
    }

    /// Resolves a trait-object key to a shared instance.
    pub fn resolve_trait<T: ?Sized + Send + Sync + 'static>(&self) -> DiResult<Arc<T>> {
        let any = self.resolve_key(&ServiceKey::of::<T>())?;
        any.downcast::<Arc<T>>()
            .map(|wrapped| (*wrapped).clone())
            .map_err(|_| DiError::TypeMismatch(std::any::type_name::<T>()))
    }

    /// Type-erased resolution entry point.
    pub fn resolve_key(&self, key: &ServiceKey) -> DiResult<AnyShared> {
        self.entry(*key, |cx| self.lookup(key, cx))
    }

    /// Constructs a type looked up by name, bypassing the binding
    /// tables entirely.
    ///
    /// Used when the caller already knows the concrete type and only
    /// wants construction plus injection, not binding lookup. The name
    /// is either the full `std::any::type_name` path or an alias
    /// registered via [`TypeShape::named`](crate::TypeShape::named).
    /// Fails with [`DiError::UnknownType`] when the catalog has no such
    /// name.
    pub fn resolve_by_name(&self, type_name: &str) -> DiResult<AnyShared> {
        let shape = self
            .catalog
            .shape_by_name(type_name)
            .ok_or_else(|| DiError::UnknownType(type_name.to_string()))?;
        let key = ServiceKey::from_parts(shape.id, shape.type_name);
        self.entry(key, |cx| self.construct(&shape, cx))
    }

    /// Typed variant of [`resolve_by_name`](Injector::resolve_by_name).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use wrought_di::{BindingRegistry, TypeCatalog, TypeShape};
    ///
    /// struct Probe {
    ///     label: &'static str,
    /// }
    ///
    /// let mut catalog = TypeCatalog::new();
    /// catalog.register(
    ///     TypeShape::<Probe>::new()
    ///         .named("Probe")
    ///         .plain_constructor(&[], |_| Ok(Probe { label: "fresh" })),
    /// );
    ///
    /// let injector = BindingRegistry::new().freeze(catalog).unwrap();
    /// let probe = injector.resolve_by_name_as::<Probe>("Probe").unwrap();
    /// assert_eq!(probe.label, "fresh");
    /// ```
    pub fn resolve_by_name_as<T: Send + Sync + 'static>(&self, type_name: &str) -> DiResult<Arc<T>> {
        self.resolve_by_name(type_name)?
            .downcast::<T>()
            .map_err(|_| DiError::TypeMismatch(std::any::type_name::<T>()))
    }

    /// Wraps one logical request: fresh cycle-tracking context plus
    /// observer notification at the boundary.
    fn entry<F>(&self, key: ServiceKey, run: F) -> DiResult<AnyShared>
    where
        F: FnOnce(&mut ResolutionContext) -> DiResult<AnyShared>,
    {
        let mut cx = ResolutionContext::new();
        if self.observers.is_empty() {
            return run(&mut cx);
        }

        let start = Instant::now();
        self.observers.resolving(&key);
        let result = run(&mut cx);
        match &result {
            Ok(_) => self.observers.resolved(&key, start.elapsed()),
            Err(error) => self.observers.failed(&key, error),
        }
        result
    }

    fn lookup(&self, key: &ServiceKey, cx: &mut ResolutionContext) -> DiResult<AnyShared> {
        if let Some(value) = self.instances.get(key) {
            return Ok(value.clone());
        }

        if let Some(binding) = self.singletons.get(key) {
            if let Some(value) = binding.cell.get() {
                return Ok(value.clone());
            }
            // Build outside the cell: under a cold-cache race both
            // threads may construct, but exactly one result is retained
            // and a failed construction never populates the cell.
            let built = self.construct_target(&binding.target, cx)?;
            return Ok(binding.cell.get_or_init(|| built.clone()).clone());
        }

        if let Some(target) = self.transients.get(key) {
            return self.construct_target(target, cx);
        }

        Err(DiError::Unbound(key.display_name()))
    }

    fn construct_target(
        &self,
        target: &ClassTarget,
        cx: &mut ResolutionContext,
    ) -> DiResult<AnyShared> {
        let shape = self
            .catalog
            .shape(target.id)
            .ok_or_else(|| DiError::UnknownType(target.type_name.to_string()))?;
        let built = self.construct(&shape, cx)?;
        (target.recast)(built)
    }

    fn construct(&self, shape: &Arc<ShapeData>, cx: &mut ResolutionContext) -> DiResult<AnyShared> {
        let plan = self.plan_for(shape)?;
        cx.enter(shape.id, shape.type_name)?;
        let result = self.run_plan(&plan, cx);
        cx.exit();
        result
    }

    fn plan_for(&self, shape: &Arc<ShapeData>) -> DiResult<Arc<ConstructionPlan>> {
        {
            let plans = self.plans.lock().unwrap();
            if let Some(existing) = plans.get(&shape.id) {
                return Ok(existing.clone());
            }
        }

        // Selection runs without holding the lock; concurrent first
        // computations converge on the same deterministic choice and
        // the first insert wins.
        let fresh = Arc::new(plan::select(shape.clone())?);
        let mut plans = self.plans.lock().unwrap();
        Ok(plans.entry(shape.id).or_insert(fresh).clone())
    }

    fn run_plan(&self, plan: &ConstructionPlan, cx: &mut ResolutionContext) -> DiResult<AnyShared> {
        let shape = &plan.shape;
        let ctor = match plan.ctor {
            Some(index) => &shape.constructors[index],
            None => return Err(DiError::NoUsableConstructor(shape.type_name)),
        };

        let mut args = self.resolve_params(&ctor.params, cx)?;
        let instance = (ctor.invoke)(&mut args).map_err(|source| DiError::Construction {
            type_name: shape.type_name,
            source: source.into(),
        })?;

        for method in &shape.methods {
            let mut args = self.resolve_params(&method.params, cx)?;
            (method.invoke)(&instance, &mut args).map_err(|source| DiError::Injection {
                type_name: shape.type_name,
                method: method.name,
                source: source.into(),
            })?;
        }

        Ok(instance)
    }

    /// Resolves each parameter key through the full binding-precedence
    /// rule; any failure propagates unchanged.
    fn resolve_params(&self, params: &[ServiceKey], cx: &mut ResolutionContext) -> DiResult<Args> {
        let mut values = Vec::with_capacity(params.len());
        for key in params {
            values.push(self.lookup(key, cx)?);
        }
        Ok(Args::new(values))
    }

    /// Renders the frozen binding tables for debugging.
    #[cfg(feature = "diagnostics")]
    pub fn debug_dump(&self) -> String {
        let mut s = String::new();
        s.push_str("=== Injector Bindings ===\n");
        s.push_str("Instances:\n");
        for key in self.instances.keys() {
            s.push_str(&format!("  {}\n", key.display_name()));
        }
        s.push_str("Singletons:\n");
        for (key, binding) in &self.singletons {
            s.push_str(&format!(
                "  {} -> {}\n",
                key.display_name(),
                binding.target.type_name
            ));
        }
        s.push_str("Transients:\n");
        for (key, target) in &self.transients {
            s.push_str(&format!("  {} -> {}\n", key.display_name(), target.type_name));
        }
        s
    }
}
