//! Query abstract syntax tree.
//!
//! Every node is an immutable value with structural equality. Constructors that can be
//! misused return [`AstError`](crate::AstError), so a tree built by hand satisfies the same
//! invariants as one produced by the parser. `Display` renders canonical JQL that parses back
//! to an equal tree.

mod clause;
mod history;
mod operand;
mod order;
mod print;
mod property;

use serde::Serialize;

pub use self::{
    clause::{AndClause, ChangedClause, Clause, NotClause, Operator, OrClause, TerminalClause, WasClause},
    history::{HistoryPredicate, PredicateGroup, PredicateKind},
    operand::{FunctionOperand, Literal, MultiValueOperand, Operand},
    order::{OrderBy, SearchSort, SortOrder},
    print::TreeView,
    property::Property,
};

/// A parsed query: an optional where-clause and a sort specification.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Query {
    /// Root clause. `None` matches everything.
    clause: Option<Clause>,
    /// Sort specification, possibly empty.
    order_by: OrderBy,
}

impl Query {
    /// Creates a query.
    pub fn new(clause: Option<Clause>, order_by: OrderBy) -> Self {
        Self { clause, order_by }
    }

    /// The canonical empty query: no clause, no sorts.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Root clause.
    pub fn clause(&self) -> Option<&Clause> {
        self.clause.as_ref()
    }

    /// Sort specification.
    pub fn order_by(&self) -> &OrderBy {
        &self.order_by
    }

    /// Returns true for the canonical empty query.
    pub fn is_empty(&self) -> bool {
        self.clause.is_none() && self.order_by.is_empty()
    }

    /// Indented tree rendering, one node per line.
    pub fn tree(&self) -> TreeView<'_> {
        TreeView::new(self)
    }
}
