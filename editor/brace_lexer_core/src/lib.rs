//! Low-level lexical state scanner for C-family editor buffers.
//!
//! This crate is standalone: syntax highlighters and other editor tools can
//! depend on it without pulling in the reduced model.
//!
//! # Modules
//!
//! - [`cursor`]: byte cursor with memchr-accelerated skips
//! - [`state`]: [`LexicalState`], [`SpanKind`] and the transition table
//! - [`scanner`]: [`StateScanner`], splitting text into classified spans
//! - [`classify`]: stateless predicates (numeric literal shape, identifiers,
//!   whitespace, brace bytes)

pub mod classify;
pub mod cursor;
pub mod scanner;
pub mod state;

pub use classify::{is_num, number_shape, NumberShape};
pub use cursor::Cursor;
pub use scanner::{RawSpan, StateScanner};
pub use state::{Brace, BraceKind, LexicalState, Quote, SpanKind};
