//! SQL identifier quoting.
//!
//! Table and column names are always emitted quoted. An embedded quote
//! character is doubled (`` a`b `` → `` `a``b` ``), nothing else is touched:
//! names are passed through as a single identifier, dots included.

/// Identifier quote style of a dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Quoting {
    /// `` `name` `` (MySQL, also accepted by SQLite)
    #[default]
    Backtick,
    /// `"name"` (ANSI)
    DoubleQuote,
}

impl Quoting {
    pub fn quote_char(self) -> char {
        match self {
            Quoting::Backtick => '`',
            Quoting::DoubleQuote => '"',
        }
    }

    /// Quote `name` into a new string.
    pub fn quote(self, name: &str) -> String {
        let mut out = String::with_capacity(name.len() + 2);
        self.write_quoted(&mut out, name);
        out
    }

    pub(crate) fn write_quoted(self, out: &mut String, name: &str) {
        let q = self.quote_char();
        out.push(q);
        for ch in name.chars() {
            if ch == q {
                out.push(q);
            }
            out.push(ch);
        }
        out.push(q);
    }
}
