//! Service key types for binding lookup.

use std::any::TypeId;

/// Key identifying a service in the binding tables.
///
/// A key pairs the `TypeId` of the requested type with its
/// `std::any::type_name` for diagnostics. Equality is type identity:
/// two keys are equal exactly when they name the same Rust type, so the
/// name string never participates in comparison or hashing.
///
/// Trait-object keys work the same way as concrete ones, since
/// `TypeId::of::<dyn Trait>()` is well-defined for `'static` traits.
///
/// # Examples
///
/// ```rust
/// use wrought_di::ServiceKey;
///
/// trait Formatter: Send + Sync {}
///
/// let concrete = ServiceKey::of::<String>();
/// let abstract_ = ServiceKey::of::<dyn Formatter>();
///
/// assert_eq!(concrete, ServiceKey::of::<String>());
/// assert_ne!(concrete, abstract_);
/// assert!(concrete.display_name().contains("String"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ServiceKey {
    id: TypeId,
    name: &'static str,
}

impl ServiceKey {
    /// Builds the key for type `T` (concrete or trait object).
    #[inline(always)]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// The human-readable type name, for error messages and tracing.
    pub fn display_name(&self) -> &'static str {
        self.name
    }

    pub(crate) fn from_parts(id: TypeId, name: &'static str) -> Self {
        Self { id, name }
    }
}

// Identity semantics: TypeId only, the name string is diagnostic payload.
impl PartialEq for ServiceKey {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ServiceKey {}

impl std::hash::Hash for ServiceKey {
    #[inline(always)]
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
