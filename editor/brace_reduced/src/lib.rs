//! Incremental reduced model for C-family editor buffers.
//!
//! The reduced model knows, for every byte of the buffer, whether it is free
//! code, inside a comment, or inside a string literal. It is kept current by
//! [`ReducedModel::apply_edit`], which re-scans only around the edit.
//!
//! # Modules
//!
//! - [`model`]: [`ReducedModel`], the span sequence and its point queries
//! - [`navigate`]: [`DelimiterNavigator`], brace matching that ignores
//!   shadowed braces
//! - [`lines`]: [`LineBounds`] and [`LineClassifier`], line-oriented facts
//!   for the indent engine

pub mod lines;
pub mod model;
pub mod navigate;

pub use brace_lexer_core::{Brace, BraceKind, LexicalState, SpanKind};
pub use lines::{LineBounds, LineClassifier, LineFlags};
pub use model::{BraceMark, EditStats, ReducedModel, Span};
pub use navigate::{BraceMatch, DelimiterNavigator};
