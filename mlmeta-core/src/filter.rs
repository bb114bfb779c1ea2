//! Filter expression types
//!
//! The metadata service accepts a textual filter on its list endpoints.
//! Expressions are built as a tree of predicates and rendered into that
//! syntax with `Display`:
//!
//! - `attr="value"` — attribute equality
//! - `in_context("ctx")` — membership in a context
//! - `parent_contexts: "ctx"` — the record's context has the given parent
//! - `(a AND b)`, `(a OR b)` — parenthesized conjunction / disjunction
//!
//! Rendering is purely structural. Values are emitted verbatim (no quote
//! escaping) and nothing is validated; a malformed filter is rejected by
//! the service itself.

use std::fmt;

/// A predicate in the metadata filter language
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// Attribute equality: `attr="value"`
    Equals { attribute: String, value: String },
    /// Context membership: `in_context("ctx")`
    InContext { context: String },
    /// Parent context match: `parent_contexts: "ctx"`
    HasParentContext { context: String },
    /// Conjunction: `(a AND b AND ...)`
    And(Vec<Expr>),
    /// Disjunction: `(a OR b OR ...)`
    Or(Vec<Expr>),
}

impl Expr {
    /// Combine two expressions with `AND`
    ///
    /// Always produces a fresh two-element conjunction, so chained calls
    /// nest: `a.and(b).and(c)` renders `((a AND b) AND c)`.
    pub fn and(self, other: Expr) -> Expr {
        Expr::And(vec![self, other])
    }

    /// Combine two expressions with `OR`
    pub fn or(self, other: Expr) -> Expr {
        Expr::Or(vec![self, other])
    }

    /// N-ary conjunction over any number of expressions
    pub fn all(exprs: impl IntoIterator<Item = Expr>) -> Expr {
        Expr::And(exprs.into_iter().collect())
    }

    /// N-ary disjunction over any number of expressions
    pub fn any(exprs: impl IntoIterator<Item = Expr>) -> Expr {
        Expr::Or(exprs.into_iter().collect())
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Equals { attribute, value } => write!(f, "{}=\"{}\"", attribute, value),
            Expr::InContext { context } => write!(f, "in_context(\"{}\")", context),
            Expr::HasParentContext { context } => write!(f, "parent_contexts: \"{}\"", context),
            Expr::And(exprs) => write_group(f, exprs, " AND "),
            Expr::Or(exprs) => write_group(f, exprs, " OR "),
        }
    }
}

fn write_group(f: &mut fmt::Formatter<'_>, exprs: &[Expr], separator: &str) -> fmt::Result {
    f.write_str("(")?;
    for (i, expr) in exprs.iter().enumerate() {
        if i > 0 {
            f.write_str(separator)?;
        }
        write!(f, "{}", expr)?;
    }
    f.write_str(")")
}

/// Equality predicate on an attribute
pub fn equals(attribute: impl Into<String>, value: impl Into<String>) -> Expr {
    Expr::Equals {
        attribute: attribute.into(),
        value: value.into(),
    }
}

/// Membership predicate for records associated with a context
pub fn in_context(context: impl Into<String>) -> Expr {
    Expr::InContext {
        context: context.into(),
    }
}

/// Predicate for contexts that have the given parent context
pub fn has_parent_context(context: impl Into<String>) -> Expr {
    Expr::HasParentContext {
        context: context.into(),
    }
}

/// Equality predicate on the `schema_title` attribute
///
/// The service types its records through schema titles such as
/// `system.Pipeline` or `system.Model`, so this shows up in most queries.
pub fn schema_title(name: impl Into<String>) -> Expr {
    equals("schema_title", name)
}

/// A rendered filter string, as sent to the list endpoints
///
/// Converts from [`Expr`] by rendering it, and from strings verbatim, so
/// APIs taking `Filter` accept either a built expression or raw query text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter(String);

impl Filter {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<Expr> for Filter {
    fn from(expr: Expr) -> Self {
        Filter(expr.to_string())
    }
}

impl From<String> for Filter {
    fn from(raw: String) -> Self {
        Filter(raw)
    }
}

impl From<&str> for Filter {
    fn from(raw: &str) -> Self {
        Filter(raw.to_string())
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
