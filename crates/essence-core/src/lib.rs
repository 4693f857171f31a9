//! Essence Core - Composition and view-resolution kernel
//!
//! This crate implements the read-side semantics of the OMG Essence
//! metamodel over an in-memory element graph:
//! - Language element, group, state, extension, and merge-resolution models
//! - An insertion-ordered, versioned element Store
//! - Structural graph validation with a full violation report
//! - Composition resolution (`allElements`) with identity-based merging
//! - Successor chain traversal for states
//! - Extension application producing effective attribute values
//! - View/feature projection of resolved element sets
//!
//! Everything here is pure and synchronous: the engine never mutates the
//! graph, performs no I/O, and returns immutable snapshots.

pub mod errors;
pub mod extension;
pub mod logging;
pub mod model;
pub mod ops;
pub mod resolve;
pub mod rules;
pub mod traversal;
pub mod view;

// Re-export commonly used types
pub use errors::{EssenceError, Result};
pub use extension::effective_attributes;
pub use model::{
    Attributes, BasicKind, Checkpoint, Element, ElementKind, ElementPayload, ExtensionData,
    FeatureSelection, GroupData, MergeResolutionData, StateData, ViewSelection,
};
pub use ops::Store;
pub use resolve::resolve_elements;
pub use rules::{validate, ValidationReport, Violation, ViolationKind};
pub use traversal::all_successors;
pub use view::{project, ProjectedElement};
