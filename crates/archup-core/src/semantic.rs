//! Model types for entity/relationship workspaces.
//!
//! These types are produced by `archup-parser` from a validated document and
//! consumed read-only by the diagram and document generators.
//!
//! # Organization
//!
//! - [`entity`] - [`Entity`], [`Property`] and [`Relation`]
//! - [`diagram`] - [`DiagramSpec`], [`DiagramKind`], [`Content`] and the [`Layout`] hints
//! - [`direction`] - [`Direction`] tokens for relation arrows

pub mod diagram;
pub mod direction;
pub mod entity;

pub use diagram::*;
pub use direction::*;
pub use entity::*;
