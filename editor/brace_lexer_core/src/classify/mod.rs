//! Stateless character and literal classification.
//!
//! Nothing here knows about comments or strings: these are pure predicates
//! over bytes, chars and short strings, used by the scanner, the delimiter
//! navigator and the indentation rules.
//!
//! # Numeric Literals
//!
//! [`number_shape`] checks the *lexical shape* of a C-family numeric
//! literal. It never evaluates the value, so a 17-digit hex literal still
//! looks like a number even though it overflows 64 bits.
//!
//! ```text
//! hex      = ("0x" | "0X") hexdigit+ ("l" | "L")?
//! decimal  = digit* ("." digit*)? exponent? suffix?      -- at least one digit
//! exponent = ("e" | "E") ("+" | "-")? digit+
//! suffix   = "l" | "L" | "f" | "F" | "d" | "D"           -- no "l"/"L" after "." or exponent
//! ```

/// Lexical category of a numeric literal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NumberShape {
    /// Decimal digits, optionally with any suffix.
    Integer,
    /// `0x`/`0X` prefix, optionally with an `l`/`L` suffix.
    Hex,
    /// Has a fractional part or an exponent.
    Float,
}

/// Returns `true` if `text` has the lexical shape of a numeric literal.
pub fn is_num(text: &str) -> bool {
    number_shape(text).is_some()
}

/// Classify the lexical shape of a numeric literal.
///
/// Returns `None` when `text` is not a complete literal.
pub fn number_shape(text: &str) -> Option<NumberShape> {
    let bytes = text.as_bytes();
    match bytes {
        [b'0', b'x' | b'X', rest @ ..] => is_hex_body(rest).then_some(NumberShape::Hex),
        _ => decimal_shape(bytes),
    }
}

fn is_hex_body(body: &[u8]) -> bool {
    let digits = match body {
        [digits @ .., b'l' | b'L'] => digits,
        _ => body,
    };
    !digits.is_empty() && digits.iter().all(u8::is_ascii_hexdigit)
}

fn decimal_shape(bytes: &[u8]) -> Option<NumberShape> {
    let digit_run = |from: usize| {
        bytes[from..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut i = digit_run(0);
    let mut mantissa_digits = i;
    let mut is_float = false;

    if bytes.get(i) == Some(&b'.') {
        is_float = true;
        i += 1;
        let frac = digit_run(i);
        mantissa_digits += frac;
        i += frac;
    }
    if mantissa_digits == 0 {
        return None;
    }

    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        is_float = true;
        i += 1;
        if matches!(bytes.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        let exp = digit_run(i);
        if exp == 0 {
            return None;
        }
        i += exp;
    }

    let shape = if is_float {
        NumberShape::Float
    } else {
        NumberShape::Integer
    };
    match &bytes[i..] {
        [] => Some(shape),
        [b'f' | b'F' | b'd' | b'D'] => Some(shape),
        [b'l' | b'L'] if !is_float => Some(shape),
        _ => None,
    }
}

/// Whitespace as far as indentation and line classification care.
#[inline]
pub fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\u{000C}')
}

/// Horizontal whitespace byte (space or tab).
#[inline]
pub fn is_indent_byte(b: u8) -> bool {
    b == b' ' || b == b'\t'
}

/// First character of an identifier.
#[inline]
pub fn is_ident_start(c: char) -> bool {
    c == '_' || c == '$' || c.is_alphabetic()
}

/// Any later character of an identifier.
#[inline]
pub fn is_ident_continue(c: char) -> bool {
    is_ident_start(c) || c.is_numeric()
}

/// Returns `true` if `text` is a single identifier.
pub fn is_ident(text: &str) -> bool {
    let mut chars = text.chars();
    chars.next().is_some_and(is_ident_start) && chars.all(is_ident_continue)
}

/// Brace-class delimiter: `{ } ( ) [ ]`.
#[inline]
pub fn is_brace_byte(b: u8) -> bool {
    matches!(b, b'{' | b'}' | b'(' | b')' | b'[' | b']')
}
