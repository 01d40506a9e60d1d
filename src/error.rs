//! Error types for binding registration and resolution.

use std::fmt;
use std::sync::Arc;

/// Failure cause carried by the wrapping error variants.
///
/// `Arc` rather than `Box` so the error type stays `Clone`.
pub type Cause = Arc<dyn std::error::Error + Send + Sync + 'static>;

/// Resolution and registration errors
///
/// Every failure surfaces synchronously to the caller of the resolve
/// entry point that triggered it; the engine performs no retries and
/// leaves no partial state behind.
///
/// # Examples
///
/// ```rust
/// use wrought_di::{BindingRegistry, TypeCatalog, DiError};
///
/// struct Widget;
///
/// let mut registry = BindingRegistry::new();
/// let injector = registry.freeze(TypeCatalog::new()).unwrap();
///
/// match injector.resolve::<Widget>() {
///     Err(DiError::Unbound(name)) => assert!(name.contains("Widget")),
///     _ => unreachable!(),
/// }
/// ```
#[derive(Debug, Clone)]
pub enum DiError {
    /// Registry mutated or re-frozen after `freeze`
    AlreadyFrozen,
    /// No binding of any kind for the requested key
    Unbound(&'static str),
    /// Name-based lookup given a type name the catalog does not know
    UnknownType(String),
    /// Concrete type has neither a marked nor a zero-parameter constructor
    NoUsableConstructor(&'static str),
    /// Concrete type declares more than one marked constructor
    AmbiguousConstructor(&'static str),
    /// A type was reached again while already under construction
    /// on the same call chain (includes the ordered chain)
    Circular(Vec<&'static str>),
    /// The selected constructor itself failed
    Construction {
        /// Concrete type whose constructor failed
        type_name: &'static str,
        /// The original failure
        source: Cause,
    },
    /// An injection method failed after construction
    Injection {
        /// Concrete type whose method failed
        type_name: &'static str,
        /// Name of the failing method
        method: &'static str,
        /// The original failure
        source: Cause,
    },
    /// Type downcast failed at a typed API boundary
    TypeMismatch(&'static str),
}

impl fmt::Display for DiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiError::AlreadyFrozen => {
                write!(f, "Binding registry is frozen and can no longer be used")
            }
            DiError::Unbound(name) => write!(f, "No binding registered for: {}", name),
            DiError::UnknownType(name) => write!(f, "Unknown type name: {}", name),
            DiError::NoUsableConstructor(name) => {
                write!(f, "No usable constructor for: {}", name)
            }
            DiError::AmbiguousConstructor(name) => {
                write!(f, "More than one marked constructor for: {}", name)
            }
            DiError::Circular(chain) => {
                write!(f, "Circular dependency: {}", chain.join(" -> "))
            }
            DiError::Construction { type_name, source } => {
                write!(f, "Constructor of {} failed: {}", type_name, source)
            }
            DiError::Injection { type_name, method, source } => {
                write!(
                    f,
                    "Injection method {} on {} failed: {}",
                    method, type_name, source
                )
            }
            DiError::TypeMismatch(name) => write!(f, "Type mismatch for: {}", name),
        }
    }
}

impl std::error::Error for DiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DiError::Construction { source, .. } | DiError::Injection { source, .. } => {
                Some(source.as_ref())
            }
            _ => None,
        }
    }
}

/// Result type for DI operations
///
/// Crate-specific `Result` alias used throughout wrought-di.
pub type DiResult<T> = Result<T, DiError>;
