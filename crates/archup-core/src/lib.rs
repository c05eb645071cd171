//! Archup Core Types
//!
//! This crate provides the foundational types shared by the archup crates:
//!
//! - **Identifiers**: string-interned entity identifiers ([`identifier::Id`])
//! - **Semantic**: entities, relations, diagram declarations and direction
//!   hints ([`semantic`] module)
//! - **Workspace**: the validated, read-only model a document is generated
//!   from ([`workspace::Workspace`])

pub mod identifier;
pub mod semantic;
pub mod workspace;
