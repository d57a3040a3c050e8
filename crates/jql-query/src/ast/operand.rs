//! Operands: the right-hand side of clauses and predicates.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::AstError;

/// A value, list, function call or `EMPTY`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operand {
    /// `EMPTY` or `NULL`.
    Empty,
    /// A single literal.
    Single(Literal),
    /// A parenthesized list.
    Multi(MultiValueOperand),
    /// A function call.
    Function(FunctionOperand),
}

impl Operand {
    /// A string literal.
    pub fn string(value: impl Into<String>) -> Self {
        Self::Single(Literal::String(value.into()))
    }

    /// An integer literal.
    pub fn integer(value: i64) -> Self {
        Self::Single(Literal::Integer(value))
    }

    /// A decimal literal.
    pub fn decimal(value: Decimal) -> Self {
        Self::Single(Literal::Decimal(value))
    }

    /// A list of operands. Lists cannot contain lists.
    pub fn list(values: Vec<Self>) -> Result<Self, AstError> {
        MultiValueOperand::new(values).map(Self::Multi)
    }

    /// A function call.
    pub fn function(name: impl Into<String>, args: Vec<String>) -> Result<Self, AstError> {
        FunctionOperand::new(name, args).map(Self::Function)
    }

    /// Appends every function call in this operand to `out`.
    pub(crate) fn collect_functions<'a>(&'a self, out: &mut Vec<&'a FunctionOperand>) {
        match self {
            Self::Function(function) => out.push(function),
            Self::Multi(multi) => multi.values().iter().for_each(|v| v.collect_functions(out)),
            Self::Empty | Self::Single(_) => {}
        }
    }
}

/// A literal value. Numbers are kept apart from strings so `12` and `"12"` differ.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum Literal {
    /// Quoted or unquoted text.
    String(String),
    /// An unquoted integer.
    Integer(i64),
    /// An unquoted decimal.
    Decimal(Decimal),
}

/// An ordered list of non-list operands.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct MultiValueOperand {
    /// Members in source order.
    values: Vec<Operand>,
}

impl MultiValueOperand {
    /// Creates a list, rejecting nested lists.
    pub fn new(values: Vec<Operand>) -> Result<Self, AstError> {
        if values.iter().any(|v| matches!(v, Operand::Multi(_))) {
            return Err(AstError::NestedMultiValue);
        }
        Ok(Self { values })
    }

    /// Members in source order.
    pub fn values(&self) -> &[Operand] {
        &self.values
    }
}

/// `name(arg, ...)`. Arguments keep their source text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FunctionOperand {
    /// Function name.
    name: String,
    /// Argument text in source order.
    args: Vec<String>,
}

impl FunctionOperand {
    /// Creates a function call, rejecting a blank name.
    pub fn new(name: impl Into<String>, args: Vec<String>) -> Result<Self, AstError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(AstError::BlankName { what: "function" });
        }
        Ok(Self { name, args })
    }

    /// Function name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Argument text.
    pub fn args(&self) -> &[String] {
        &self.args
    }
}
