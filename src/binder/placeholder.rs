//! Placeholder scanning for `@name` style statement parameters.
//!
//! A placeholder is an `@` followed by a run of identifier characters: ASCII
//! alphanumerics, `_`, `$` and any non-ASCII character, the same set SQLite
//! accepts in parameter names. Any other character ends the name, so commas,
//! parentheses and operators never merge two placeholders into one.
//! A lone `@` with no identifier after it is not a placeholder.

/// Character that introduces a placeholder.
pub const PLACEHOLDER_PREFIX: char = '@';

/// A placeholder occurrence in statement text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder<'a> {
    /// Name including the leading `@`.
    pub name: &'a str,
    /// Byte offset of the `@` in the statement.
    pub offset: usize,
}

/// Iterator over the placeholders of a statement, in order of appearance.
///
/// The scan does not track SQL quoting: an `@` inside a string literal or
/// comment, as in `'a@b.com'`, is reported like any other placeholder.
#[derive(Debug, Clone)]
pub struct Placeholders<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Placeholders<'a> {
    /// Creates a scanner over `text`.
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        Placeholders { text, pos: 0 }
    }
}

impl<'a> Iterator for Placeholders<'a> {
    type Item = Placeholder<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let start = self.pos + self.text.get(self.pos..)?.find(PLACEHOLDER_PREFIX)?;
            let ident_start = start + PLACEHOLDER_PREFIX.len_utf8();
            let ident_len = self.text[ident_start..]
                .char_indices()
                .find(|&(_, c)| !is_identifier_char(c))
                .map_or(self.text.len() - ident_start, |(i, _)| i);

            self.pos = ident_start + ident_len;
            if ident_len > 0 {
                return Some(Placeholder {
                    name: &self.text[start..self.pos],
                    offset: start,
                });
            }
        }
    }
}

/// Returns true for characters allowed in a placeholder name.
#[must_use]
pub fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$' || !c.is_ascii()
}

/// Extracts placeholder names (with their `@`) in order of appearance.
#[must_use]
pub fn placeholder_names(statement: &str) -> Vec<&str> {
    Placeholders::new(statement).map(|p| p.name).collect()
}
