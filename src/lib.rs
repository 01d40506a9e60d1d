//! # wrought-di
//!
//! Binding-driven object graph construction for Rust: declare what each
//! service key maps to, describe how each concrete type is built, and
//! let the injector wire the whole graph on demand.
//!
//! ## Features
//!
//! - **Three binding kinds**: fixed instances, memoized singletons and
//!   per-request transients, with fixed resolution precedence
//! - **Constructor and setter injection**: a marked constructor wins,
//!   else the zero-parameter one; marked methods run right after
//!   construction
//! - **Trait support**: abstract keys bound to concrete implementations
//! - **Thread-safe**: Arc-based sharing, first-writer-wins singleton
//!   publication, lock-free reads on warm caches
//! - **Circular dependency detection**: per-request tracking with the
//!   full ordered chain in the error
//! - **Name-based construction**: build a cataloged type from its
//!   stringified name, bypassing the binding tables
//!
//! ## Quick Start
//!
//! ```rust
//! use wrought_di::{BindingRegistry, ServiceKey, TypeCatalog, TypeShape};
//! use std::sync::Arc;
//!
//! // Define your services
//! trait Formatter: Send + Sync {
//!     fn format(&self, input: &str) -> String;
//! }
//!
//! struct UpperFormatter;
//! impl Formatter for UpperFormatter {
//!     fn format(&self, input: &str) -> String {
//!         input.to_uppercase()
//!     }
//! }
//!
//! struct Console {
//!     formatter: Arc<dyn Formatter>,
//! }
//!
//! impl Console {
//!     fn write(&self, message: &str) -> String {
//!         self.formatter.format(message)
//!     }
//! }
//!
//! // Describe how Console is constructed
//! let mut catalog = TypeCatalog::new();
//! catalog.register(
//!     TypeShape::<Console>::new().marked_constructor(
//!         &[ServiceKey::of::<dyn Formatter>()],
//!         |args| {
//!             Ok(Console {
//!                 formatter: args.take_trait::<dyn Formatter>()?,
//!             })
//!         },
//!     ),
//! );
//!
//! // Declare the bindings and freeze them into an injector
//! let mut registry = BindingRegistry::new();
//! registry
//!     .bind_instance_as::<dyn Formatter>(Arc::new(UpperFormatter))
//!     .unwrap();
//! registry.bind_singleton::<Console>().unwrap();
//!
//! let injector = registry.freeze(catalog).unwrap();
//! let console = injector.resolve::<Console>().unwrap();
//! assert_eq!(console.write("hello"), "HELLO");
//! ```
//!
//! ## Binding kinds
//!
//! - **Instance**: a pre-built value, always returned as-is
//! - **Singleton**: built on first resolution, then shared forever
//! - **Transient**: built fresh on every resolution
//!
//! Resolution checks the kinds in that order and the first match wins;
//! a key with no binding at all is an error, never an implicit
//! construction.

// Module declarations
pub mod catalog;
pub mod error;
pub mod injector;
pub mod key;
pub mod observer;
pub mod registry;

// Internal modules
mod binding;

// Re-export core types
pub use catalog::{AnyShared, Args, BoxError, TypeCatalog, TypeShape};
pub use error::{Cause, DiError, DiResult};
pub use injector::Injector;
pub use key::ServiceKey;
pub use observer::{DiObserver, LoggingObserver};
pub use registry::BindingRegistry;
