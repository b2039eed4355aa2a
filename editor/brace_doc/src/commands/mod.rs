//! Command handlers for the `brace` CLI.
//!
//! Each handler takes the source text and writes its report to `out`, so
//! the binary passes stdout and tests pass a `Vec<u8>`.

use std::io::Write;
use std::path::{Path, PathBuf};

use brace_indent::IndentConfig;
use brace_reduced::SpanKind;

use crate::document::Document;
use crate::error::DocumentError;

/// Failures of a CLI command.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("cannot read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write output: {0}")]
    Output(#[from] std::io::Error),

    #[error("{0}")]
    Usage(String),

    #[error("invalid offset '{arg}': {reason}")]
    BadOffset { arg: String, reason: String },

    #[error(transparent)]
    Document(#[from] DocumentError),
}

/// Read a source file.
pub fn read_source(path: &Path) -> Result<String, CommandError> {
    std::fs::read_to_string(path).map_err(|source| CommandError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse a byte offset into a document of length `len`.
pub fn parse_offset(arg: &str, len: u32) -> Result<u32, CommandError> {
    let bad = |reason: String| CommandError::BadOffset {
        arg: arg.to_owned(),
        reason,
    };
    let offset: u32 = arg.parse().map_err(|e| bad(format!("{e}")))?;
    if offset > len {
        return Err(bad(format!("past the end of the file ({len} bytes)")));
    }
    Ok(offset)
}

/// Build the indent configuration from `--indent=N` options.
pub fn parse_indent_options(args: &[String]) -> Result<IndentConfig, CommandError> {
    let mut config = IndentConfig::default();
    for arg in args {
        if let Some(size) = arg.strip_prefix("--indent=") {
            let Ok(size) = size.parse::<usize>() else {
                return Err(CommandError::Usage(format!("invalid indent size '{size}'")));
            };
            config = IndentConfig::with_indent_size(size);
        } else if arg.starts_with('-') {
            return Err(CommandError::Usage(format!("unknown option '{arg}'")));
        }
    }
    Ok(config)
}

/// Dump the span sequence: start, length, entering state and kind.
pub fn classify(text: &str, out: &mut impl Write) -> Result<(), CommandError> {
    let doc = Document::new(text);
    doc.read(|view| -> Result<(), CommandError> {
        let model = view.model();
        writeln!(out, "{} bytes, {} spans", view.len(), model.span_count())?;
        for span in model.spans() {
            let kind = match span.kind {
                SpanKind::Brace(brace) => format!("brace {}", char::from(brace.byte())),
                kind => kind.name().to_owned(),
            };
            writeln!(
                out,
                "{:>6} {:>5}  {:<13} {kind}",
                span.start,
                span.len,
                span.state.name()
            )?;
        }
        writeln!(out, "end state: {}", model.end_state().name())?;
        Ok(())
    })
}

/// Re-indent every line and write the result.
pub fn indent(text: &str, config: IndentConfig, out: &mut impl Write) -> Result<(), CommandError> {
    let doc = Document::new(text);
    doc.set_config(config);
    let lines = doc.indent_lines(0, doc.len(), None)?;
    tracing::debug!(lines, "re-indented file");
    out.write_all(doc.text().as_bytes())?;
    Ok(())
}

/// Report the bracket match for a caret at `arg`.
pub fn match_brace(text: &str, arg: &str, out: &mut impl Write) -> Result<(), CommandError> {
    let doc = Document::new(text);
    let offset = parse_offset(arg, doc.len())?;
    let found = doc.read(|view| view.navigator().brace_match_at(offset));
    match found {
        Some(m) => writeln!(out, "{} {}", m.open, m.close)?,
        None => writeln!(out, "no match")?,
    }
    Ok(())
}

/// Report the lexical state and shadowing at `arg`.
pub fn state(text: &str, arg: &str, out: &mut impl Write) -> Result<(), CommandError> {
    let doc = Document::new(text);
    let offset = parse_offset(arg, doc.len())?;
    doc.read(|view| -> Result<(), CommandError> {
        writeln!(out, "state: {}", view.state_at(offset).name())?;
        writeln!(out, "shadowed: {}", view.is_shadowed(offset))?;
        writeln!(out, "weakly shadowed: {}", view.is_weakly_shadowed(offset))?;
        Ok(())
    })
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
mod tests;
