//! Ordered column → value mappings used for SET and WHERE clauses.

use crate::wrap::{Literal, Wrapped};
use indexmap::IndexMap;

/// Left-hand side of a SET/WHERE entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Column {
    /// Identifier, quoted by the dialect.
    Name(String),
    /// Raw SQL token inserted unquoted, e.g. `` `counter` `` inside an expression.
    Raw(Literal),
}

impl Column {
    pub fn is_raw(&self) -> bool {
        matches!(self, Column::Raw(_))
    }
}

impl From<&str> for Column {
    fn from(name: &str) -> Self {
        Column::Name(name.to_string())
    }
}

impl From<String> for Column {
    fn from(name: String) -> Self {
        Column::Name(name)
    }
}

impl From<&String> for Column {
    fn from(name: &String) -> Self {
        Column::Name(name.clone())
    }
}

impl From<Literal> for Column {
    fn from(token: Literal) -> Self {
        Column::Raw(token)
    }
}

/// An ordered mapping of columns to wrapped values.
///
/// Iteration order is insertion order. Re-inserting an existing column
/// replaces its value but keeps its original position.
///
/// # Example
/// ```ignore
/// use rowsql::{Fields, literal, op};
///
/// let values = Fields::new()
///     .field("name", "alice")
///     .field("updated_at", literal("NOW()"));
/// let filter = Fields::new().field("age", op(">=", 18));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fields {
    entries: IndexMap<Column, Wrapped>,
}

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity(capacity),
        }
    }

    /// Builder-style insert.
    pub fn field(mut self, column: impl Into<Column>, value: impl Into<Wrapped>) -> Self {
        self.insert(column, value);
        self
    }

    /// Insert or replace a column, returning the previous value.
    pub fn insert(
        &mut self,
        column: impl Into<Column>,
        value: impl Into<Wrapped>,
    ) -> Option<Wrapped> {
        self.entries.insert(column.into(), value.into())
    }

    pub fn get(&self, column: &Column) -> Option<&Wrapped> {
        self.entries.get(column)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Column, &Wrapped)> {
        self.entries.iter()
    }
}

impl<K: Into<Column>, V: Into<Wrapped>> FromIterator<(K, V)> for Fields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut fields = Fields::new();
        for (k, v) in iter {
            fields.insert(k, v);
        }
        fields
    }
}

impl<K: Into<Column>, V: Into<Wrapped>, const N: usize> From<[(K, V); N]> for Fields {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl<'a> IntoIterator for &'a Fields {
    type Item = (&'a Column, &'a Wrapped);
    type IntoIter = indexmap::map::Iter<'a, Column, Wrapped>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Build a [`Fields`] mapping inline.
///
/// ```ignore
/// let f = rowsql::fields! { "foo" => "bar", "n" => rowsql::op(">", 3) };
/// ```
#[macro_export]
macro_rules! fields {
    () => {
        $crate::Fields::new()
    };
    ($($column:expr => $value:expr),+ $(,)?) => {{
        let mut __rowsql_fields = $crate::Fields::new();
        $(
            __rowsql_fields.insert($column, $value);
        )+
        __rowsql_fields
    }};
}
