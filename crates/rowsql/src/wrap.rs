//! Value wrappers: plain values, raw SQL literals and custom operators.
//!
//! Every right-hand side handed to the compiler is a [`Wrapped`] value:
//!
//! - [`Wrapped::Plain`] is bound through a named placeholder.
//! - [`Wrapped::Literal`] is pasted into the statement verbatim. It is never
//!   escaped; the caller vouches for its safety.
//! - [`Wrapped::Operator`] swaps the default `=` for another operator and
//!   carries either a plain value or a literal.
//!
//! # Example
//! ```ignore
//! use rowsql::{fields, literal, op};
//!
//! let set = fields! { "updated_at" => literal("NOW()") };
//! let filter = fields! { "status" => op("!=", "archived"), "id" => 42 };
//! ```

use crate::value::Value;
use std::fmt;

/// Default comparison/assignment operator.
pub const DEFAULT_OPERATOR: &str = "=";

/// Raw SQL text inserted into a statement without escaping or binding.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Literal(String);

impl Literal {
    pub fn new(sql: impl Into<String>) -> Self {
        Self(sql.into())
    }

    /// The raw SQL text.
    pub fn as_sql(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The value carried by an [`OperatorValue`].
///
/// Has no operator variant, so operator values cannot nest.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Plain(Value),
    Literal(Literal),
}

impl From<Literal> for Operand {
    fn from(v: Literal) -> Self {
        Operand::Literal(v)
    }
}

/// A value paired with a non-default operator, e.g. `!=`, `>`, `LIKE`.
#[derive(Debug, Clone, PartialEq)]
pub struct OperatorValue {
    operator: String,
    value: Operand,
}

impl OperatorValue {
    pub fn new(operator: impl Into<String>, value: impl Into<Operand>) -> Self {
        Self {
            operator: operator.into(),
            value: value.into(),
        }
    }

    pub fn operator(&self) -> &str {
        &self.operator
    }

    pub fn set_operator(&mut self, operator: impl Into<String>) -> &mut Self {
        self.operator = operator.into();
        self
    }

    pub fn value(&self) -> &Operand {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<Operand>) -> &mut Self {
        self.value = value.into();
        self
    }
}

/// A right-hand side as seen by the compiler.
#[derive(Debug, Clone, PartialEq)]
pub enum Wrapped {
    Plain(Value),
    Literal(Literal),
    Operator(OperatorValue),
}

/// What ends up on the right of the operator once a [`Wrapped`] is classified.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rhs<'a> {
    /// Bind through a placeholder.
    Bind(&'a Value),
    /// Paste the SQL text as-is.
    Raw(&'a str),
}

impl Wrapped {
    /// Split into `(operator, right-hand side)`.
    ///
    /// Operator wrappers are unwrapped first; the inner value is then either
    /// a literal (raw text) or a plain value (to be bound).
    pub fn classify(&self) -> (&str, Rhs<'_>) {
        match self {
            Wrapped::Plain(v) => (DEFAULT_OPERATOR, Rhs::Bind(v)),
            Wrapped::Literal(l) => (DEFAULT_OPERATOR, Rhs::Raw(l.as_sql())),
            Wrapped::Operator(o) => match &o.value {
                Operand::Plain(v) => (o.operator(), Rhs::Bind(v)),
                Operand::Literal(l) => (o.operator(), Rhs::Raw(l.as_sql())),
            },
        }
    }

    /// Whether this is a plain value bound with `=`.
    pub fn is_plain(&self) -> bool {
        matches!(self, Wrapped::Plain(_))
    }
}

macro_rules! impl_from_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Operand {
                fn from(v: $ty) -> Self {
                    Operand::Plain(v.into())
                }
            }

            impl From<$ty> for Wrapped {
                fn from(v: $ty) -> Self {
                    Wrapped::Plain(v.into())
                }
            }
        )*
    };
}

crate::value::with_scalar_types!(impl_from_scalar);

#[cfg(feature = "rust_decimal")]
impl_from_scalar!(rust_decimal::Decimal);

impl<T: Into<Value>> From<Option<T>> for Operand {
    fn from(v: Option<T>) -> Self {
        Operand::Plain(v.into())
    }
}

impl<T: Into<Value>> From<Option<T>> for Wrapped {
    fn from(v: Option<T>) -> Self {
        Wrapped::Plain(v.into())
    }
}

impl From<Literal> for Wrapped {
    fn from(v: Literal) -> Self {
        Wrapped::Literal(v)
    }
}

impl From<OperatorValue> for Wrapped {
    fn from(v: OperatorValue) -> Self {
        Wrapped::Operator(v)
    }
}

impl From<Operand> for Wrapped {
    fn from(v: Operand) -> Self {
        match v {
            Operand::Plain(v) => Wrapped::Plain(v),
            Operand::Literal(l) => Wrapped::Literal(l),
        }
    }
}

/// Shorthand for [`Literal::new`].
pub fn literal(sql: impl Into<String>) -> Literal {
    Literal::new(sql)
}

/// Shorthand for [`OperatorValue::new`].
pub fn op(operator: impl Into<String>, value: impl Into<Operand>) -> OperatorValue {
    OperatorValue::new(operator, value)
}
