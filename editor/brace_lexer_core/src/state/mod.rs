//! Lexical states and the span kinds that move between them.
//!
//! The scanner splits a buffer into spans. Every span records the
//! [`LexicalState`] in effect when it starts; the state after it is
//! [`SpanKind::next_state`] applied to that entering state. Only the
//! delimiter kinds change state, so a run of ordinary text never does.

/// Lexical state in effect at a buffer offset.
///
/// The state at offset `n` is the state after consuming bytes `[0, n)`.
/// Offset 0 is always [`FreeCode`](LexicalState::FreeCode).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum LexicalState {
    /// Ordinary code: braces count, comments and literals may open.
    #[default]
    FreeCode = 0,
    /// After `//`, up to the end of the line.
    LineComment = 1,
    /// After `/*`, up to the matching `*/`.
    BlockComment = 2,
    /// After an opening `'`.
    SingleQuoteString = 3,
    /// After an opening `"`.
    DoubleQuoteString = 4,
}

impl LexicalState {
    /// Returns `true` for every state other than free code.
    #[inline]
    pub fn is_shadowed(self) -> bool {
        self != LexicalState::FreeCode
    }

    /// Returns `true` inside a line or block comment.
    #[inline]
    pub fn is_comment(self) -> bool {
        matches!(
            self,
            LexicalState::LineComment | LexicalState::BlockComment
        )
    }

    /// Returns `true` inside a single- or double-quoted literal.
    #[inline]
    pub fn is_string(self) -> bool {
        matches!(
            self,
            LexicalState::SingleQuoteString | LexicalState::DoubleQuoteString
        )
    }

    /// The quote byte that closes this string state, if it is one.
    #[inline]
    pub fn closing_quote(self) -> Option<u8> {
        match self {
            LexicalState::SingleQuoteString => Some(b'\''),
            LexicalState::DoubleQuoteString => Some(b'"'),
            _ => None,
        }
    }

    /// Short lowercase name, used by the CLI span dump.
    pub fn name(self) -> &'static str {
        match self {
            LexicalState::FreeCode => "free",
            LexicalState::LineComment => "line-comment",
            LexicalState::BlockComment => "block-comment",
            LexicalState::SingleQuoteString => "single-quote",
            LexicalState::DoubleQuoteString => "double-quote",
        }
    }
}

/// One of the three brace-class delimiter pairs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum BraceKind {
    /// `(` `)`
    Paren,
    /// `[` `]`
    Bracket,
    /// `{` `}`
    Curly,
}

impl BraceKind {
    /// Opening byte of the pair.
    #[inline]
    pub fn open(self) -> u8 {
        match self {
            BraceKind::Paren => b'(',
            BraceKind::Bracket => b'[',
            BraceKind::Curly => b'{',
        }
    }

    /// Closing byte of the pair.
    #[inline]
    pub fn close(self) -> u8 {
        match self {
            BraceKind::Paren => b')',
            BraceKind::Bracket => b']',
            BraceKind::Curly => b'}',
        }
    }
}

/// A single brace character: which pair, and which side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Brace {
    pub kind: BraceKind,
    pub is_open: bool,
}

impl Brace {
    /// Classify a byte as a brace, if it is one.
    pub fn from_byte(b: u8) -> Option<Brace> {
        let (kind, is_open) = match b {
            b'(' => (BraceKind::Paren, true),
            b')' => (BraceKind::Paren, false),
            b'[' => (BraceKind::Bracket, true),
            b']' => (BraceKind::Bracket, false),
            b'{' => (BraceKind::Curly, true),
            b'}' => (BraceKind::Curly, false),
            _ => return None,
        };
        Some(Brace { kind, is_open })
    }

    /// The byte this brace is written as.
    #[inline]
    pub fn byte(self) -> u8 {
        if self.is_open {
            self.kind.open()
        } else {
            self.kind.close()
        }
    }
}

/// Quote character of a literal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Quote {
    /// `'`
    Single,
    /// `"`
    Double,
}

impl Quote {
    /// The string state this quote opens.
    #[inline]
    pub fn string_state(self) -> LexicalState {
        match self {
            Quote::Single => LexicalState::SingleQuoteString,
            Quote::Double => LexicalState::DoubleQuoteString,
        }
    }

    /// The quote byte.
    #[inline]
    pub fn byte(self) -> u8 {
        match self {
            Quote::Single => b'\'',
            Quote::Double => b'"',
        }
    }
}

/// Category of a classified span.
///
/// Delimiter kinds have a fixed length (1 or 2 bytes); `Text` covers a run
/// of any length that does not change state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpanKind {
    /// Ordinary content in whatever state is active.
    Text,
    /// A `\n`. Ends line comments and unterminated literals.
    Newline,
    /// A brace character in free code.
    Brace(Brace),
    /// `//` in free code.
    LineCommentStart,
    /// `/*` in free code.
    BlockCommentStart,
    /// `*/` inside a block comment.
    BlockCommentEnd,
    /// A quote that opens (in free code) or closes (in its own literal).
    Quote(Quote),
    /// `\\`, `\"` or `\'` inside a literal.
    Escape,
}

impl SpanKind {
    /// State after a span of this kind, given the state entering it.
    pub fn next_state(self, entering: LexicalState) -> LexicalState {
        match self {
            SpanKind::Text | SpanKind::Brace(_) | SpanKind::Escape => entering,
            SpanKind::Newline => match entering {
                LexicalState::BlockComment => LexicalState::BlockComment,
                _ => LexicalState::FreeCode,
            },
            SpanKind::LineCommentStart => LexicalState::LineComment,
            SpanKind::BlockCommentStart => LexicalState::BlockComment,
            SpanKind::BlockCommentEnd => LexicalState::FreeCode,
            SpanKind::Quote(quote) => {
                if entering == LexicalState::FreeCode {
                    quote.string_state()
                } else {
                    LexicalState::FreeCode
                }
            }
        }
    }

    /// Returns `true` if a span of this kind entered in `entering` opens a
    /// comment or literal.
    #[inline]
    pub fn opens_shadow(self, entering: LexicalState) -> bool {
        entering == LexicalState::FreeCode
            && matches!(
                self,
                SpanKind::LineCommentStart | SpanKind::BlockCommentStart | SpanKind::Quote(_)
            )
    }

    /// Short lowercase name, used by the CLI span dump.
    pub fn name(self) -> &'static str {
        match self {
            SpanKind::Text => "text",
            SpanKind::Newline => "newline",
            SpanKind::Brace(_) => "brace",
            SpanKind::LineCommentStart => "line-comment-start",
            SpanKind::BlockCommentStart => "block-comment-start",
            SpanKind::BlockCommentEnd => "block-comment-end",
            SpanKind::Quote(_) => "quote",
            SpanKind::Escape => "escape",
        }
    }
}
