//! Type catalog: the describe-constructible-type capability.
//!
//! Rust has no runtime constructor enumeration, so the catalog is the
//! explicit registration counterpart: for each concrete type the caller
//! declares its constructors (optionally carrying the inject marker),
//! its injection methods, and the ordered parameter keys of each. The
//! engine consumes these descriptors; it never invents wiring on its own.

use std::any::TypeId;
use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::error::{DiError, DiResult};
use crate::key::ServiceKey;

/// Type-erased shared instance, the currency of the resolution engine.
pub type AnyShared = Arc<dyn std::any::Any + Send + Sync>;

/// Error type produced by constructor and injection-method closures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

type CtorFn = dyn Fn(&mut Args) -> Result<AnyShared, BoxError> + Send + Sync;
type MethodFn = dyn Fn(&AnyShared, &mut Args) -> Result<(), BoxError> + Send + Sync;

/// Ordered, already-resolved arguments handed to an invoke closure.
///
/// Arguments are consumed positionally, in the same order as the
/// parameter keys the constructor or method was declared with. Use
/// [`take`](Args::take) for concrete parameters and
/// [`take_trait`](Args::take_trait) for trait-object parameters.
pub struct Args {
    values: Vec<AnyShared>,
    next: usize,
}

impl Args {
    pub(crate) fn new(values: Vec<AnyShared>) -> Self {
        Self { values, next: 0 }
    }

    fn pop(&mut self, wanted: &'static str) -> Result<AnyShared, DiError> {
        let value = self
            .values
            .get(self.next)
            .cloned()
            .ok_or(DiError::TypeMismatch(wanted))?;
        self.next += 1;
        Ok(value)
    }

    /// Takes the next argument as a concrete `Arc<T>`.
    ///
    /// Fails with [`DiError::TypeMismatch`] when the declared parameter
    /// keys and the take calls do not line up.
    pub fn take<T: Send + Sync + 'static>(&mut self) -> DiResult<Arc<T>> {
        let name = std::any::type_name::<T>();
        self.pop(name)?
            .downcast::<T>()
            .map_err(|_| DiError::TypeMismatch(name))
    }

    /// Takes the next argument as a trait object `Arc<T>`.
    pub fn take_trait<T: ?Sized + Send + Sync + 'static>(&mut self) -> DiResult<Arc<T>> {
        let name = std::any::type_name::<T>();
        self.pop(name)?
            .downcast::<Arc<T>>()
            .map(|wrapped| (*wrapped).clone())
            .map_err(|_| DiError::TypeMismatch(name))
    }
}

pub(crate) struct ConstructorDescriptor {
    pub(crate) marked: bool,
    pub(crate) params: Vec<ServiceKey>,
    pub(crate) invoke: Box<CtorFn>,
}

pub(crate) struct MethodDescriptor {
    pub(crate) name: &'static str,
    pub(crate) params: Vec<ServiceKey>,
    pub(crate) invoke: Box<MethodFn>,
}

pub(crate) struct ShapeData {
    pub(crate) id: TypeId,
    pub(crate) type_name: &'static str,
    pub(crate) alias: Option<&'static str>,
    pub(crate) constructors: Vec<ConstructorDescriptor>,
    pub(crate) methods: Vec<MethodDescriptor>,
}

/// Describes how one concrete type is constructed and injected.
///
/// A shape lists the type's constructors in declaration order, each
/// either marked for injection or plain, plus zero or more injection
/// methods invoked right after construction. Constructor selection
/// follows the engine's fixed rule: the marked constructor wins, else
/// the first zero-parameter plain constructor; two marked constructors
/// are a configuration error. Plain constructors with parameters may be
/// declared but are never selected.
///
/// # Examples
///
/// ```rust
/// use wrought_di::{ServiceKey, TypeShape};
/// use std::sync::Arc;
///
/// trait Formatter: Send + Sync {
///     fn format(&self, input: &str) -> String;
/// }
///
/// struct Writer {
///     formatter: Arc<dyn Formatter>,
/// }
///
/// let shape = TypeShape::<Writer>::new()
///     .marked_constructor(&[ServiceKey::of::<dyn Formatter>()], |args| {
///         Ok(Writer {
///             formatter: args.take_trait::<dyn Formatter>()?,
///         })
///     });
/// ```
pub struct TypeShape<C> {
    data: ShapeData,
    _marker: PhantomData<fn() -> C>,
}

impl<C: Send + Sync + 'static> TypeShape<C> {
    /// Starts describing the concrete type `C`.
    pub fn new() -> Self {
        Self {
            data: ShapeData {
                id: TypeId::of::<C>(),
                type_name: std::any::type_name::<C>(),
                alias: None,
                constructors: Vec::new(),
                methods: Vec::new(),
            },
            _marker: PhantomData,
        }
    }

    /// Registers a short alias for name-based resolution, in addition
    /// to the full `std::any::type_name` path.
    pub fn named(mut self, alias: &'static str) -> Self {
        self.data.alias = Some(alias);
        self
    }

    /// Declares the constructor marked for injection.
    ///
    /// `params` are the service keys of the constructor's parameters in
    /// order; `build` receives the resolved arguments and produces the
    /// instance.
    pub fn marked_constructor<F>(self, params: &[ServiceKey], build: F) -> Self
    where
        F: Fn(&mut Args) -> Result<C, BoxError> + Send + Sync + 'static,
    {
        self.constructor(true, params, build)
    }

    /// Declares an unmarked constructor.
    ///
    /// Only a zero-parameter plain constructor is ever selected; plain
    /// constructors with parameters exist for documentation parity with
    /// the type's real surface and are skipped by selection.
    pub fn plain_constructor<F>(self, params: &[ServiceKey], build: F) -> Self
    where
        F: Fn(&mut Args) -> Result<C, BoxError> + Send + Sync + 'static,
    {
        self.constructor(false, params, build)
    }

    fn constructor<F>(mut self, marked: bool, params: &[ServiceKey], build: F) -> Self
    where
        F: Fn(&mut Args) -> Result<C, BoxError> + Send + Sync + 'static,
    {
        self.data.constructors.push(ConstructorDescriptor {
            marked,
            params: params.to_vec(),
            invoke: Box::new(move |args: &mut Args| {
                build(args).map(|instance| Arc::new(instance) as AnyShared)
            }),
        });
        self
    }

    /// Declares a method marked for post-construction injection.
    ///
    /// Methods run in declaration order right after the constructor.
    /// The order among multiple methods carries no semantic guarantee,
    /// so they must be independent of one another. Setters typically
    /// take `&self` and use interior mutability.
    pub fn inject_method<F>(mut self, name: &'static str, params: &[ServiceKey], apply: F) -> Self
    where
        F: Fn(&C, &mut Args) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        self.data.methods.push(MethodDescriptor {
            name,
            params: params.to_vec(),
            invoke: Box::new(move |instance: &AnyShared, args: &mut Args| {
                let me = instance
                    .downcast_ref::<C>()
                    .ok_or(DiError::TypeMismatch(std::any::type_name::<C>()))?;
                apply(me, args)
            }),
        });
        self
    }
}

impl<C: Send + Sync + 'static> Default for TypeShape<C> {
    fn default() -> Self {
        Self::new()
    }
}

/// Registry of type shapes, indexed by type identity and by name.
///
/// The catalog is assembled by the caller and handed to
/// [`BindingRegistry::freeze`](crate::BindingRegistry::freeze); it is
/// read-only from that point on. Registering a shape for a type that
/// already has one overwrites the earlier entry.
pub struct TypeCatalog {
    by_id: HashMap<TypeId, Arc<ShapeData>>,
    by_name: HashMap<&'static str, TypeId>,
}

impl TypeCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self {
            by_id: HashMap::new(),
            by_name: HashMap::new(),
        }
    }

    /// Registers the shape of one concrete type.
    pub fn register<C: Send + Sync + 'static>(&mut self, shape: TypeShape<C>) -> &mut Self {
        let data = Arc::new(shape.data);
        self.by_name.insert(data.type_name, data.id);
        if let Some(alias) = data.alias {
            self.by_name.insert(alias, data.id);
        }
        self.by_id.insert(data.id, data);
        self
    }

    pub(crate) fn shape(&self, id: TypeId) -> Option<Arc<ShapeData>> {
        self.by_id.get(&id).cloned()
    }

    pub(crate) fn shape_by_name(&self, name: &str) -> Option<Arc<ShapeData>> {
        let id = self.by_name.get(name)?;
        self.by_id.get(id).cloned()
    }
}

impl Default for TypeCatalog {
    fn default() -> Self {
        Self::new()
    }
}
