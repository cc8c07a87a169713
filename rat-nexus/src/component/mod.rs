//! Component module.
//!
//! Defines the `Component` trait and its dyn-compatible `AnyComponent` form.

pub mod traits;

pub use traits::{Action, AnyComponent, Component, Event};
