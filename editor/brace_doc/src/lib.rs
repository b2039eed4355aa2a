//! Editor document service.
//!
//! A [`Document`] pairs a text buffer with the reduced model that describes
//! it and keeps the two in step under a readers/writer lock. On top of that
//! it tracks elastic positions ([`Anchor`]), value-compared ranges
//! ([`Region`]) and notifies listeners of every change.
//!
//! ```
//! use brace_doc::Document;
//!
//! let doc = Document::new("f() {\nx;\n}\n");
//! doc.indent_lines(0, doc.len(), None).unwrap();
//! assert_eq!(doc.text(), "f() {\n  x;\n}\n");
//! assert!(!doc.read(|view| view.is_inside_comment(3)));
//! ```

pub mod anchor;
pub mod buffer;
pub mod commands;
pub mod document;
pub mod error;
pub mod event;
mod logging;
pub mod region;

pub use anchor::{Anchor, AnchorArena, Bias};
pub use buffer::{StringBuffer, TextBuffer};
pub use document::{Document, DocumentView};
pub use error::DocumentError;
pub use event::{DocumentEvent, ListenerId, Listeners};
pub use logging::init_tracing;
pub use region::{Region, RegionManager};

pub use brace_indent::{CancelFlag, IndentConfig};
