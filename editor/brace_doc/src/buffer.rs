//! Text storage behind a document.

/// Storage for document text.
///
/// The document validates every edit before calling [`replace`]; an
/// implementation may assume offsets are in range and on character
/// boundaries.
///
/// [`replace`]: TextBuffer::replace
pub trait TextBuffer {
    /// The whole text.
    fn as_str(&self) -> &str;

    /// Replace `removed_len` bytes at `offset` with `inserted`.
    fn replace(&mut self, offset: u32, removed_len: u32, inserted: &str);

    /// Length in bytes.
    fn len(&self) -> usize {
        self.as_str().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bytes `[start, end)`.
    fn slice(&self, start: u32, end: u32) -> &str {
        &self.as_str()[start as usize..end as usize]
    }
}

/// A [`TextBuffer`] backed by one contiguous `String`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StringBuffer {
    text: String,
}

impl StringBuffer {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

impl TextBuffer for StringBuffer {
    #[inline]
    fn as_str(&self) -> &str {
        &self.text
    }

    fn replace(&mut self, offset: u32, removed_len: u32, inserted: &str) {
        let start = offset as usize;
        self.text
            .replace_range(start..start + removed_len as usize, inserted);
    }
}

#[cfg(test)]
mod tests {
    use super::{StringBuffer, TextBuffer};
    use pretty_assertions::assert_eq;

    #[test]
    fn replace_and_slice() {
        let mut buf = StringBuffer::new("hello world");
        buf.replace(6, 5, "there");
        assert_eq!(buf.as_str(), "hello there");
        buf.replace(0, 0, ">> ");
        assert_eq!(buf.slice(0, 8), ">> hello");
        buf.replace(2, 1, "");
        assert_eq!(buf.len(), 13);
        assert!(!buf.is_empty());
        assert_eq!(buf.into_string(), ">>hello there");
    }
}
