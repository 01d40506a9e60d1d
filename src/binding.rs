//! Binding storage shared between the registry and the injector.

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::catalog::AnyShared;
use crate::error::{DiError, DiResult};
use crate::key::ServiceKey;

/// Converts a freshly constructed, type-erased concrete instance into
/// the representation the binding's key promises to callers.
pub(crate) type RecastFn = Arc<dyn Fn(AnyShared) -> DiResult<AnyShared> + Send + Sync>;

/// Concrete target of a class binding.
pub(crate) struct ClassTarget {
    pub(crate) id: TypeId,
    pub(crate) type_name: &'static str,
    pub(crate) recast: RecastFn,
}

impl ClassTarget {
    /// Target for a key bound to itself: the erased instance already is
    /// the key's representation.
    pub(crate) fn identity<C: Send + Sync + 'static>() -> Self {
        Self {
            id: TypeId::of::<C>(),
            type_name: std::any::type_name::<C>(),
            recast: Arc::new(|erased| Ok(erased)),
        }
    }

    /// Target for an abstract key bound to concrete `C`. The supplied
    /// coercion witnesses assignability at the bind call site; trait
    /// values are stored double-wrapped (`Arc<Arc<dyn T>>`) so they can
    /// be recovered through `Any`.
    pub(crate) fn casting<T, C, F>(recast: F) -> Self
    where
        T: ?Sized + Send + Sync + 'static,
        C: Send + Sync + 'static,
        F: Fn(Arc<C>) -> Arc<T> + Send + Sync + 'static,
    {
        Self {
            id: TypeId::of::<C>(),
            type_name: std::any::type_name::<C>(),
            recast: Arc::new(move |erased: AnyShared| {
                let concrete = erased
                    .downcast::<C>()
                    .map_err(|_| DiError::TypeMismatch(std::any::type_name::<C>()))?;
                Ok(Arc::new(recast(concrete)) as AnyShared)
            }),
        }
    }
}

/// Singleton class binding: target plus its populate-once cell.
pub(crate) struct SingletonBinding {
    pub(crate) target: ClassTarget,
    pub(crate) cell: OnceCell<AnyShared>,
}

impl SingletonBinding {
    pub(crate) fn new(target: ClassTarget) -> Self {
        Self {
            target,
            cell: OnceCell::new(),
        }
    }
}

/// The three binding tables accumulated before the freeze.
#[derive(Default)]
pub(crate) struct BindingTables {
    pub(crate) instances: HashMap<ServiceKey, AnyShared>,
    pub(crate) singletons: HashMap<ServiceKey, ClassTarget>,
    pub(crate) transients: HashMap<ServiceKey, ClassTarget>,
}
