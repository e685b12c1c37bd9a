//! Type aliases for commonly used complex types.
//!
//! The host embedding API hands the editor a handful of boxed closures; these
//! aliases give them readable names and keep the bounds identical everywhere
//! they are stored.

// =============================================================================
// CALLBACK TYPES
// =============================================================================

/// A simple callback with no parameters or return value.
///
/// Thread-safe so an editor can be moved to a worker thread together with
/// its host hooks.
pub type Callback = Box<dyn Fn() + Send + Sync>;

/// A callback that receives a single parameter.
pub type DataCallback<T> = Box<dyn Fn(T) + Send + Sync>;
