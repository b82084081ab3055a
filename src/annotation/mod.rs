//! # Annotation Module
//!
//! The annotation module provides the tree model that the rest of the crate
//! operates on. Annotation trees are produced by an external annotation
//! parser (out of scope here) and consumed by the template, binder, and
//! emitter layers.
//!
//! ## Overview
//!
//! Three building blocks:
//!
//! - [`AnnotationNode`] - a tagged tree value: scalars, placeholder-bearing
//!   text, ordered sequences, keyed mappings, or opaque annotation objects.
//! - [`AnnotationObject`] - an annotation object: a type tag plus named
//!   fields, carrying an optional parent-context back-reference.
//! - [`Context`] - a provenance record chained to its parent. Context links
//!   point strictly upward and are never traversed when walking a tree, so
//!   annotation trees stay acyclic.
//!
//! Locations inside a tree are addressed with [`NodePath`] - an explicit
//! sequence of map-key / sequence-index / object-field steps resolved to a
//! mutable reference at bind time. The placeholder index records these paths
//! instead of holding aliasing references into the tree.

mod node;
mod object;

pub use node::{AnnotationNode, NodePath, PathStep};
pub use object::{AnnotationObject, Context};
