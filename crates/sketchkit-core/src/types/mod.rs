//! Shared type aliases.
//!
//! - [`aliases`]: boxed host hooks stored by the editor facade.

pub mod aliases;

pub use aliases::{Callback, DataCallback};
