//! Canonical JQL rendering and the indented tree view.

use std::fmt;

use super::{
    Clause, HistoryPredicate, Literal, Operand, Operator, OrderBy, PredicateKind, Property,
    Query, SearchSort, SortOrder,
};
use crate::strings;

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for PredicateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(&strings::encode_value(s)),
            Self::Integer(i) => write!(f, "{i}"),
            // A decimal without a fraction would read back as an integer.
            Self::Decimal(d) if d.scale() == 0 => write!(f, "{d}.0"),
            Self::Decimal(d) => write!(f, "{d}"),
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("EMPTY"),
            Self::Single(literal) => write!(f, "{literal}"),
            Self::Multi(multi) => {
                f.write_str("(")?;
                write_separated(f, multi.values(), ", ")?;
                f.write_str(")")
            }
            Self::Function(function) => {
                let args: Vec<String> = function
                    .args()
                    .iter()
                    .map(|a| strings::encode_word(a))
                    .collect();
                write!(
                    f,
                    "{}({})",
                    strings::encode_word(function.name()),
                    args.join(", ")
                )
            }
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", strings::encode_word(&self.key_path()))?;
        for reference in self.references() {
            write!(f, ".{reference}")?;
        }
        Ok(())
    }
}

impl fmt::Display for HistoryPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::By(o) => write!(f, "BY {o}"),
            Self::During(start, end) => write!(f, "DURING ({start}, {end})"),
            Self::Before(o) => write!(f, "BEFORE {o}"),
            Self::After(o) => write!(f, "AFTER {o}"),
            Self::On(o) => write!(f, "ON {o}"),
            Self::From(o) => write!(f, "FROM {o}"),
            Self::To(o) => write!(f, "TO {o}"),
            Self::And(group) => write_separated(f, group.predicates(), " "),
        }
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::And(and) => {
                for (i, child) in and.children().iter().enumerate() {
                    if i > 0 {
                        f.write_str(" AND ")?;
                    }
                    write_child(f, child, matches!(child, Self::And(_) | Self::Or(_)))?;
                }
                Ok(())
            }
            Self::Or(or) => {
                for (i, child) in or.children().iter().enumerate() {
                    if i > 0 {
                        f.write_str(" OR ")?;
                    }
                    write_child(f, child, matches!(child, Self::Or(_)))?;
                }
                Ok(())
            }
            Self::Not(not) => {
                f.write_str("NOT ")?;
                let child = not.child();
                write_child(f, child, matches!(child, Self::And(_) | Self::Or(_)))
            }
            Self::Terminal(t) => {
                f.write_str(&strings::encode_field(t.field()))?;
                if let Some(property) = t.property() {
                    write!(f, "{property}")?;
                }
                write!(f, " {} {}", t.operator(), t.operand())
            }
            Self::Was(w) => {
                write!(
                    f,
                    "{} {} {}",
                    strings::encode_field(w.field()),
                    w.operator(),
                    w.operand()
                )?;
                if let Some(predicate) = w.predicate() {
                    write!(f, " {predicate}")?;
                }
                Ok(())
            }
            Self::Changed(c) => {
                write!(f, "{} CHANGED", strings::encode_field(c.field()))?;
                if let Some(predicate) = c.predicate() {
                    write!(f, " {predicate}")?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for SearchSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&strings::encode_field(self.field()))?;
        if let Some(property) = self.property() {
            write!(f, "{property}")?;
        }
        write!(f, " {}", self.order())
    }
}

impl fmt::Display for OrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return Ok(());
        }
        f.write_str("ORDER BY ")?;
        write_separated(f, self.sorts(), ", ")
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.clause(), self.order_by().is_empty()) {
            (Some(clause), true) => write!(f, "{clause}"),
            (Some(clause), false) => write!(f, "{clause} {}", self.order_by()),
            (None, _) => write!(f, "{}", self.order_by()),
        }
    }
}

/// Writes `items` joined by `separator`.
fn write_separated<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    items: &[T],
    separator: &str,
) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(separator)?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

/// Writes a child clause, parenthesized when asked.
fn write_child(f: &mut fmt::Formatter<'_>, child: &Clause, parenthesize: bool) -> fmt::Result {
    if parenthesize {
        write!(f, "({child})")
    } else {
        write!(f, "{child}")
    }
}

/// Indented, one-node-per-line rendering of a [`Query`].
pub struct TreeView<'a> {
    /// The query to render.
    query: &'a Query,
}

impl<'a> TreeView<'a> {
    /// Wraps a query.
    pub(crate) fn new(query: &'a Query) -> Self {
        Self { query }
    }
}

impl fmt::Display for TreeView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.query.clause() {
            Some(clause) => clause.fmt_tree(f, 0)?,
            None => writeln!(f, "MatchAll")?,
        }
        let order_by = self.query.order_by();
        if !order_by.is_empty() {
            writeln!(f, "OrderBy")?;
            for sort in order_by.sorts() {
                writeln!(f, "  {sort}")?;
            }
        }
        Ok(())
    }
}

impl Clause {
    /// Formats the clause as a tree with the given indentation level.
    fn fmt_tree(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        let prefix = "  ".repeat(indent);
        match self {
            Self::And(and) => {
                writeln!(f, "{prefix}And")?;
                for child in and.children() {
                    child.fmt_tree(f, indent + 1)?;
                }
                Ok(())
            }
            Self::Or(or) => {
                writeln!(f, "{prefix}Or")?;
                for child in or.children() {
                    child.fmt_tree(f, indent + 1)?;
                }
                Ok(())
            }
            Self::Not(not) => {
                writeln!(f, "{prefix}Not")?;
                not.child().fmt_tree(f, indent + 1)
            }
            Self::Terminal(_) => writeln!(f, "{prefix}Terminal({self})"),
            Self::Was(w) => {
                writeln!(
                    f,
                    "{prefix}Was({} {} {})",
                    strings::encode_field(w.field()),
                    w.operator(),
                    w.operand()
                )?;
                fmt_predicate_tree(f, w.predicate(), indent + 1)
            }
            Self::Changed(c) => {
                writeln!(f, "{prefix}Changed({})", strings::encode_field(c.field()))?;
                fmt_predicate_tree(f, c.predicate(), indent + 1)
            }
        }
    }
}

/// Writes each simple predicate on its own line.
fn fmt_predicate_tree(
    f: &mut fmt::Formatter<'_>,
    predicate: Option<&HistoryPredicate>,
    indent: usize,
) -> fmt::Result {
    let prefix = "  ".repeat(indent);
    match predicate {
        None => Ok(()),
        Some(HistoryPredicate::And(group)) => {
            for member in group.predicates() {
                writeln!(f, "{prefix}{member}")?;
            }
            Ok(())
        }
        Some(simple) => writeln!(f, "{prefix}{simple}"),
    }
}
