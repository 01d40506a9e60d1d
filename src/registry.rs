//! Binding registry: the mutable configuration surface.
//!
//! Bindings are accumulated here and frozen exactly once into an
//! [`Injector`]. The freeze consumes the accumulated state, so a frozen
//! registry rejects every further operation with
//! [`DiError::AlreadyFrozen`].

use std::sync::Arc;

use crate::binding::{BindingTables, ClassTarget};
use crate::catalog::{AnyShared, TypeCatalog};
use crate::error::{DiError, DiResult};
use crate::injector::Injector;
use crate::key::ServiceKey;
use crate::observer::{DiObserver, Observers};

/// Accumulates bindings and produces an [`Injector`].
///
/// Three binding kinds exist, each keyed by service key, with at most
/// one binding per key per kind; a later registration for the same key
/// overwrites the earlier one. Registration order between kinds is
/// free; resolution precedence is fixed (instance, then singleton, then
/// transient).
///
/// # Examples
///
/// ```rust
/// use wrought_di::{BindingRegistry, TypeCatalog, TypeShape};
///
/// struct Greeter {
///     greeting: String,
/// }
///
/// let mut catalog = TypeCatalog::new();
/// catalog.register(TypeShape::<Greeter>::new().plain_constructor(&[], |_| {
///     Ok(Greeter {
///         greeting: "hello".to_string(),
///     })
/// }));
///
/// let mut registry = BindingRegistry::new();
/// registry.bind_transient::<Greeter>().unwrap();
///
/// let injector = registry.freeze(catalog).unwrap();
/// let greeter = injector.resolve::<Greeter>().unwrap();
/// assert_eq!(greeter.greeting, "hello");
/// ```
pub struct BindingRegistry {
    state: Option<RegistryState>,
}

#[derive(Default)]
struct RegistryState {
    tables: BindingTables,
    observers: Observers,
}

impl BindingRegistry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self {
            state: Some(RegistryState::default()),
        }
    }

    fn state_mut(&mut self) -> DiResult<&mut RegistryState> {
        self.state.as_mut().ok_or(DiError::AlreadyFrozen)
    }

    /// Binds key `C` to concrete type `C`, built fresh on every
    /// resolution.
    pub fn bind_transient<C: Send + Sync + 'static>(&mut self) -> DiResult<&mut Self> {
        let state = self.state_mut()?;
        state
            .tables
            .transients
            .insert(ServiceKey::of::<C>(), ClassTarget::identity::<C>());
        Ok(self)
    }

    /// Binds an abstract key `T` to concrete type `C`, built fresh on
    /// every resolution.
    ///
    /// The `recast` closure witnesses that `C` satisfies `T` and is how
    /// the engine coerces the constructed instance into the key's
    /// representation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use wrought_di::{BindingRegistry, TypeCatalog, TypeShape};
    /// use std::sync::Arc;
    ///
    /// trait Sink: Send + Sync {
    ///     fn kind(&self) -> &'static str;
    /// }
    ///
    /// struct ConsoleSink;
    /// impl Sink for ConsoleSink {
    ///     fn kind(&self) -> &'static str {
    ///         "console"
    ///     }
    /// }
    ///
    /// let mut catalog = TypeCatalog::new();
    /// catalog.register(TypeShape::<ConsoleSink>::new().plain_constructor(&[], |_| Ok(ConsoleSink)));
    ///
    /// let mut registry = BindingRegistry::new();
    /// registry
    ///     .bind_transient_as::<dyn Sink, ConsoleSink, _>(|sink| sink as Arc<dyn Sink>)
    ///     .unwrap();
    ///
    /// let injector = registry.freeze(catalog).unwrap();
    /// let sink = injector.resolve_trait::<dyn Sink>().unwrap();
    /// assert_eq!(sink.kind(), "console");
    /// ```
    pub fn bind_transient_as<T, C, F>(&mut self, recast: F) -> DiResult<&mut Self>
    where
        T: ?Sized + Send + Sync + 'static,
        C: Send + Sync + 'static,
        F: Fn(Arc<C>) -> Arc<T> + Send + Sync + 'static,
    {
        let state = self.state_mut()?;
        state
            .tables
            .transients
            .insert(ServiceKey::of::<T>(), ClassTarget::casting::<T, C, F>(recast));
        Ok(self)
    }

    /// Binds key `C` to concrete type `C` with singleton memoization:
    /// the first resolution builds the instance, every later one
    /// returns the same instance.
    pub fn bind_singleton<C: Send + Sync + 'static>(&mut self) -> DiResult<&mut Self> {
        let state = self.state_mut()?;
        state
            .tables
            .singletons
            .insert(ServiceKey::of::<C>(), ClassTarget::identity::<C>());
        Ok(self)
    }

    /// Binds an abstract key `T` to concrete type `C` with singleton
    /// memoization.
    pub fn bind_singleton_as<T, C, F>(&mut self, recast: F) -> DiResult<&mut Self>
    where
        T: ?Sized + Send + Sync + 'static,
        C: Send + Sync + 'static,
        F: Fn(Arc<C>) -> Arc<T> + Send + Sync + 'static,
    {
        let state = self.state_mut()?;
        state
            .tables
            .singletons
            .insert(ServiceKey::of::<T>(), ClassTarget::casting::<T, C, F>(recast));
        Ok(self)
    }

    /// Binds key `C` to a pre-built instance, always returned as-is.
    pub fn bind_instance<C: Send + Sync + 'static>(&mut self, value: C) -> DiResult<&mut Self> {
        let state = self.state_mut()?;
        state
            .tables
            .instances
            .insert(ServiceKey::of::<C>(), Arc::new(value) as AnyShared);
        Ok(self)
    }

    /// Binds an abstract key `T` to a pre-built shared instance.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use wrought_di::{BindingRegistry, TypeCatalog};
    /// use std::sync::Arc;
    ///
    /// trait Clock: Send + Sync {
    ///     fn now(&self) -> u64;
    /// }
    ///
    /// struct FixedClock(u64);
    /// impl Clock for FixedClock {
    ///     fn now(&self) -> u64 {
    ///         self.0
    ///     }
    /// }
    ///
    /// let mut registry = BindingRegistry::new();
    /// registry
    ///     .bind_instance_as::<dyn Clock>(Arc::new(FixedClock(7)))
    ///     .unwrap();
    ///
    /// let injector = registry.freeze(TypeCatalog::new()).unwrap();
    /// let clock = injector.resolve_trait::<dyn Clock>().unwrap();
    /// assert_eq!(clock.now(), 7);
    /// ```
    pub fn bind_instance_as<T>(&mut self, value: Arc<T>) -> DiResult<&mut Self>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let state = self.state_mut()?;
        state
            .tables
            .instances
            .insert(ServiceKey::of::<T>(), Arc::new(value) as AnyShared);
        Ok(self)
    }

    /// Attaches a diagnostic observer, carried into the injector.
    pub fn with_observer(&mut self, observer: Arc<dyn DiObserver>) -> DiResult<&mut Self> {
        let state = self.state_mut()?;
        state.observers.push(observer);
        Ok(self)
    }

    /// Consumes the accumulated bindings and produces the [`Injector`].
    ///
    /// The mutable state is moved out, never copied: the registry keeps
    /// only an empty shell behind, and every later call, including a
    /// second `freeze`, fails with [`DiError::AlreadyFrozen`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use wrought_di::{BindingRegistry, DiError, TypeCatalog};
    ///
    /// struct Widget;
    ///
    /// let mut registry = BindingRegistry::new();
    /// let _injector = registry.freeze(TypeCatalog::new()).unwrap();
    ///
    /// assert!(matches!(
    ///     registry.freeze(TypeCatalog::new()),
    ///     Err(DiError::AlreadyFrozen)
    /// ));
    /// assert!(matches!(
    ///     registry.bind_transient::<Widget>(),
    ///     Err(DiError::AlreadyFrozen)
    /// ));
    /// ```
    pub fn freeze(&mut self, catalog: TypeCatalog) -> DiResult<Injector> {
        let state = self.state.take().ok_or(DiError::AlreadyFrozen)?;
        Ok(Injector::new(state.tables, catalog, state.observers))
    }
}

impl Default for BindingRegistry {
    fn default() -> Self {
        Self::new()
    }
}
