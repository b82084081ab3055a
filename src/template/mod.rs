//! # Template Module
//!
//! Reusable annotation-tree templates for controller operations.
//!
//! ## Overview
//!
//! A [`MethodTemplate`] is an annotation-tree skeleton for one HTTP verb,
//! parameterized by `{{id}}` placeholder tokens. At construction the template
//! builds a [`PlaceholderIndex`] over its data: a map from every token id to
//! every location containing it, in depth-first pre-order discovery order.
//!
//! ## Binding semantics
//!
//! Binding a value through the index is context-sensitive:
//!
//! - a scalar that is exactly the bare token (`"{{model}}"`) is replaced
//!   wholesale, preserving the bound value's type - a schema reference or a
//!   nested structure survives as such;
//! - a scalar with surrounding literal text (`"Widgets for {{model}}"`) gets
//!   textual substitution of every token occurrence, the rest of the literal
//!   preserved.
//!
//! The distinction matters because later-bound values are not always strings,
//! and a typed value can only stand in for the *entire* content of a field.
//!
//! Templates are cloned per route match; binding mutates the clone's tree in
//! place and the declared prototype is never shared.

mod index;
mod method;

pub use index::PlaceholderIndex;
pub use method::MethodTemplate;
