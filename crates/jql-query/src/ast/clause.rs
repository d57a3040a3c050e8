//! Clauses and operators.

use serde::Serialize;

use super::{FunctionOperand, HistoryPredicate, Operand, PredicateKind, Property};
use crate::error::AstError;

/// Comparison, membership, emptiness and history operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Operator {
    /// `=`
    Equals,
    /// `!=`
    NotEquals,
    /// `~`
    Like,
    /// `!~`
    NotLike,
    /// `<`
    LessThan,
    /// `<=`
    LessThanEquals,
    /// `>`
    GreaterThan,
    /// `>=`
    GreaterThanEquals,
    /// `IN`
    In,
    /// `NOT IN`
    NotIn,
    /// `IS`
    Is,
    /// `IS NOT`
    IsNot,
    /// `WAS`
    Was,
    /// `WAS NOT`
    WasNot,
    /// `WAS IN`
    WasIn,
    /// `WAS NOT IN`
    WasNotIn,
    /// `CHANGED`
    Changed,
}

impl Operator {
    /// Canonical spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Equals => "=",
            Self::NotEquals => "!=",
            Self::Like => "~",
            Self::NotLike => "!~",
            Self::LessThan => "<",
            Self::LessThanEquals => "<=",
            Self::GreaterThan => ">",
            Self::GreaterThanEquals => ">=",
            Self::In => "IN",
            Self::NotIn => "NOT IN",
            Self::Is => "IS",
            Self::IsNot => "IS NOT",
            Self::Was => "WAS",
            Self::WasNot => "WAS NOT",
            Self::WasIn => "WAS IN",
            Self::WasNotIn => "WAS NOT IN",
            Self::Changed => "CHANGED",
        }
    }

    /// Operators that take a list or a function.
    pub fn takes_list(self) -> bool {
        matches!(self, Self::In | Self::NotIn | Self::WasIn | Self::WasNotIn)
    }

    /// `IS` and `IS NOT`.
    pub fn is_emptiness(self) -> bool {
        matches!(self, Self::Is | Self::IsNot)
    }

    /// Operators that query field history.
    pub fn is_history(self) -> bool {
        matches!(
            self,
            Self::Was | Self::WasNot | Self::WasIn | Self::WasNotIn | Self::Changed
        )
    }

    /// Checks that `operand` is acceptable for this operator.
    fn check_operand(self, operand: &Operand) -> Result<(), AstError> {
        let fits = if self.takes_list() {
            matches!(operand, Operand::Multi(_) | Operand::Function(_))
        } else if self.is_emptiness() {
            matches!(operand, Operand::Empty)
        } else {
            !matches!(operand, Operand::Multi(_))
        };
        if fits {
            return Ok(());
        }
        let expected = if self.takes_list() {
            "a list or a function"
        } else if self.is_emptiness() {
            "EMPTY"
        } else {
            "a single value, EMPTY or a function"
        };
        Err(AstError::OperandMismatch {
            operator: self,
            expected,
        })
    }
}

/// A node of the where-clause tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Clause {
    /// All children must match.
    And(AndClause),
    /// Any child must match.
    Or(OrClause),
    /// The child must not match.
    Not(NotClause),
    /// A field compared with an operand.
    Terminal(TerminalClause),
    /// A field's past values compared with an operand.
    Was(WasClause),
    /// A field changed.
    Changed(ChangedClause),
}

impl Clause {
    /// Builds an `AND` of at least two children.
    pub fn and(children: Vec<Self>) -> Result<Self, AstError> {
        AndClause::new(children).map(Self::And)
    }

    /// Builds an `OR` of at least two children.
    pub fn or(children: Vec<Self>) -> Result<Self, AstError> {
        OrClause::new(children).map(Self::Or)
    }

    /// Negates a clause.
    pub fn not(child: Self) -> Self {
        Self::Not(NotClause::new(child))
    }

    /// Builds a terminal clause.
    pub fn terminal(
        field: impl Into<String>,
        operator: Operator,
        operand: Operand,
    ) -> Result<Self, AstError> {
        TerminalClause::new(field, operator, operand).map(Self::Terminal)
    }

    /// Field names referenced by this clause and its descendants, in source order.
    pub fn fields(&self) -> Vec<&str> {
        let mut fields = Vec::new();
        self.walk(&mut |clause| match clause {
            Self::Terminal(t) => fields.push(t.field()),
            Self::Was(w) => fields.push(w.field()),
            Self::Changed(c) => fields.push(c.field()),
            Self::And(_) | Self::Or(_) | Self::Not(_) => {}
        });
        fields
    }

    /// Function calls in operands and history predicates, in source order.
    pub fn functions(&self) -> Vec<&FunctionOperand> {
        let mut functions = Vec::new();
        self.walk(&mut |clause| match clause {
            Self::Terminal(t) => t.operand().collect_functions(&mut functions),
            Self::Was(w) => {
                w.operand().collect_functions(&mut functions);
                if let Some(predicate) = w.predicate() {
                    predicate.collect_functions(&mut functions);
                }
            }
            Self::Changed(c) => {
                if let Some(predicate) = c.predicate() {
                    predicate.collect_functions(&mut functions);
                }
            }
            Self::And(_) | Self::Or(_) | Self::Not(_) => {}
        });
        functions
    }

    /// Visits this clause and its descendants, parents first.
    fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Self)) {
        visit(self);
        match self {
            Self::And(and) => and.children().iter().for_each(|c| c.walk(visit)),
            Self::Or(or) => or.children().iter().for_each(|c| c.walk(visit)),
            Self::Not(not) => not.child().walk(visit),
            Self::Terminal(_) | Self::Was(_) | Self::Changed(_) => {}
        }
    }
}

/// Checks that a combinator has at least two children.
fn check_children(combinator: &'static str, children: &[Clause]) -> Result<(), AstError> {
    if children.len() < 2 {
        return Err(AstError::TooFewChildren {
            combinator,
            count: children.len(),
        });
    }
    Ok(())
}

/// Checks that a name is not blank.
fn check_name(what: &'static str, name: &str) -> Result<(), AstError> {
    if name.trim().is_empty() {
        return Err(AstError::BlankName { what });
    }
    Ok(())
}

/// Conjunction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct AndClause {
    /// Two or more children.
    children: Vec<Clause>,
}

impl AndClause {
    /// Creates a conjunction of at least two children.
    pub fn new(children: Vec<Clause>) -> Result<Self, AstError> {
        check_children("AND", &children)?;
        Ok(Self { children })
    }

    /// Children in source order.
    pub fn children(&self) -> &[Clause] {
        &self.children
    }
}

/// Disjunction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct OrClause {
    /// Two or more children.
    children: Vec<Clause>,
}

impl OrClause {
    /// Creates a disjunction of at least two children.
    pub fn new(children: Vec<Clause>) -> Result<Self, AstError> {
        check_children("OR", &children)?;
        Ok(Self { children })
    }

    /// Children in source order.
    pub fn children(&self) -> &[Clause] {
        &self.children
    }
}

/// Negation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct NotClause {
    /// Negated clause.
    child: Box<Clause>,
}

impl NotClause {
    /// Negates `child`.
    pub fn new(child: Clause) -> Self {
        Self {
            child: Box::new(child),
        }
    }

    /// Negated clause.
    pub fn child(&self) -> &Clause {
        &self.child
    }
}

/// `field [property] operator operand`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TerminalClause {
    /// Field name.
    field: String,
    /// Non-history operator.
    operator: Operator,
    /// Right-hand side.
    operand: Operand,
    /// Entity property addressed on the field.
    #[serde(skip_serializing_if = "Option::is_none")]
    property: Option<Property>,
}

impl TerminalClause {
    /// Creates a terminal clause, checking that the operand suits the operator.
    pub fn new(
        field: impl Into<String>,
        operator: Operator,
        operand: Operand,
    ) -> Result<Self, AstError> {
        let field = field.into();
        check_name("field", &field)?;
        if operator.is_history() {
            return Err(AstError::WrongClauseOperator {
                operator,
                clause: "terminal",
            });
        }
        operator.check_operand(&operand)?;
        Ok(Self {
            field,
            operator,
            operand,
            property: None,
        })
    }

    /// Attaches an entity property.
    #[must_use]
    pub fn with_property(mut self, property: Property) -> Self {
        self.property = Some(property);
        self
    }

    /// Field name.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Operator.
    pub fn operator(&self) -> Operator {
        self.operator
    }

    /// Right-hand side.
    pub fn operand(&self) -> &Operand {
        &self.operand
    }

    /// Entity property, if any.
    pub fn property(&self) -> Option<&Property> {
        self.property.as_ref()
    }
}

/// `field WAS [NOT] [IN] operand predicate*`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct WasClause {
    /// Field name.
    field: String,
    /// One of the `WAS` operators.
    operator: Operator,
    /// Right-hand side.
    operand: Operand,
    /// History predicate.
    #[serde(skip_serializing_if = "Option::is_none")]
    predicate: Option<HistoryPredicate>,
}

impl WasClause {
    /// Creates a `WAS` clause. `FROM` and `TO` predicates are rejected.
    pub fn new(
        field: impl Into<String>,
        operator: Operator,
        operand: Operand,
        predicate: Option<HistoryPredicate>,
    ) -> Result<Self, AstError> {
        let field = field.into();
        check_name("field", &field)?;
        if !matches!(
            operator,
            Operator::Was | Operator::WasNot | Operator::WasIn | Operator::WasNotIn
        ) {
            return Err(AstError::WrongClauseOperator {
                operator,
                clause: "WAS",
            });
        }
        operator.check_operand(&operand)?;
        if let Some(predicate) = &predicate {
            predicate.check_operands(operator)?;
            for kind in [PredicateKind::From, PredicateKind::To] {
                if predicate.contains(kind) {
                    return Err(AstError::UnsupportedPredicate {
                        predicate: kind.keyword(),
                        operator,
                    });
                }
            }
        }
        Ok(Self {
            field,
            operator,
            operand,
            predicate,
        })
    }

    /// Field name.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Operator.
    pub fn operator(&self) -> Operator {
        self.operator
    }

    /// Right-hand side.
    pub fn operand(&self) -> &Operand {
        &self.operand
    }

    /// History predicate, if any.
    pub fn predicate(&self) -> Option<&HistoryPredicate> {
        self.predicate.as_ref()
    }
}

/// `field CHANGED predicate*`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ChangedClause {
    /// Field name.
    field: String,
    /// History predicate.
    #[serde(skip_serializing_if = "Option::is_none")]
    predicate: Option<HistoryPredicate>,
}

impl ChangedClause {
    /// Creates a `CHANGED` clause.
    pub fn new(
        field: impl Into<String>,
        predicate: Option<HistoryPredicate>,
    ) -> Result<Self, AstError> {
        let field = field.into();
        check_name("field", &field)?;
        if let Some(predicate) = &predicate {
            predicate.check_operands(Operator::Changed)?;
        }
        Ok(Self { field, predicate })
    }

    /// Field name.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Always [`Operator::Changed`].
    pub fn operator(&self) -> Operator {
        Operator::Changed
    }

    /// History predicate, if any.
    pub fn predicate(&self) -> Option<&HistoryPredicate> {
        self.predicate.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eq(field: &str, value: &str) -> Clause {
        Clause::terminal(field, Operator::Equals, Operand::string(value)).unwrap()
    }

    #[test]
    fn combinators_need_two_children() {
        assert_eq!(
            Clause::and(vec![eq("a", "1")]),
            Err(AstError::TooFewChildren {
                combinator: "AND",
                count: 1
            })
        );
        assert!(Clause::or(vec![]).is_err());
        assert!(Clause::and(vec![eq("a", "1"), eq("b", "2")]).is_ok());
    }

    #[test]
    fn terminal_rejects_blank_field() {
        assert_eq!(
            Clause::terminal("  ", Operator::Equals, Operand::Empty),
            Err(AstError::BlankName { what: "field" })
        );
    }

    #[test]
    fn operand_shape_follows_operator() {
        let list = Operand::list(vec![Operand::integer(1)]).unwrap();
        assert!(Clause::terminal("a", Operator::In, list.clone()).is_ok());
        assert!(Clause::terminal("a", Operator::In, Operand::string("x")).is_err());
        assert!(Clause::terminal("a", Operator::Equals, list).is_err());
        assert!(Clause::terminal("a", Operator::Is, Operand::Empty).is_ok());
        assert!(Clause::terminal("a", Operator::IsNot, Operand::string("x")).is_err());
        let function = Operand::function("membersOf", vec!["dev".into()]).unwrap();
        assert!(Clause::terminal("a", Operator::NotIn, function.clone()).is_ok());
        assert!(Clause::terminal("a", Operator::Equals, function).is_ok());
    }

    #[test]
    fn terminal_rejects_history_operators() {
        assert!(matches!(
            Clause::terminal("a", Operator::Was, Operand::string("x")),
            Err(AstError::WrongClauseOperator { .. })
        ));
    }

    #[test]
    fn was_rejects_from_and_to() {
        let err = WasClause::new(
            "status",
            Operator::Was,
            Operand::string("Open"),
            Some(HistoryPredicate::From(Operand::string("a"))),
        );
        assert_eq!(
            err,
            Err(AstError::UnsupportedPredicate {
                predicate: "FROM",
                operator: Operator::Was
            })
        );
        assert!(
            ChangedClause::new(
                "status",
                Some(HistoryPredicate::To(Operand::string("a")))
            )
            .is_ok()
        );
    }

    #[test]
    fn predicates_reject_lists() {
        let list = Operand::list(vec![Operand::string("a"), Operand::string("b")]).unwrap();
        let mismatch = |operator| AstError::OperandMismatch {
            operator,
            expected: "single-valued history predicates",
        };
        assert_eq!(
            WasClause::new(
                "status",
                Operator::Was,
                Operand::string("Open"),
                Some(HistoryPredicate::By(list.clone())),
            ),
            Err(mismatch(Operator::Was))
        );
        let during = HistoryPredicate::During(Operand::string("x"), list.clone());
        assert_eq!(
            ChangedClause::new("status", Some(during)),
            Err(mismatch(Operator::Changed))
        );
        let grouped = HistoryPredicate::all(vec![
            HistoryPredicate::On(Operand::Empty),
            HistoryPredicate::To(list),
        ])
        .unwrap();
        assert_eq!(
            ChangedClause::new("status", Some(grouped)),
            Err(mismatch(Operator::Changed))
        );
        let function = Operand::function("currentUser", vec![]).unwrap();
        assert!(
            WasClause::new(
                "assignee",
                Operator::Was,
                Operand::Empty,
                Some(HistoryPredicate::By(function))
            )
            .is_ok()
        );
    }

    #[test]
    fn was_in_needs_list() {
        assert!(WasClause::new("s", Operator::WasIn, Operand::string("x"), None).is_err());
        let list = Operand::list(vec![Operand::string("x")]).unwrap();
        assert!(WasClause::new("s", Operator::WasNotIn, list.clone(), None).is_ok());
        assert!(WasClause::new("s", Operator::Was, list, None).is_err());
        assert!(WasClause::new("s", Operator::Equals, Operand::Empty, None).is_err());
    }

    #[test]
    fn fields_in_source_order() {
        let clause = Clause::or(vec![
            Clause::not(eq("a", "1")),
            Clause::and(vec![eq("b", "2"), eq("c", "3")]).unwrap(),
            Clause::Changed(ChangedClause::new("d", None).unwrap()),
        ])
        .unwrap();
        assert_eq!(clause.fields(), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn functions_include_predicates() {
        let clause = Clause::and(vec![
            Clause::terminal(
                "assignee",
                Operator::Equals,
                Operand::function("currentUser", vec![]).unwrap(),
            )
            .unwrap(),
            Clause::Changed(
                ChangedClause::new(
                    "status",
                    Some(HistoryPredicate::After(
                        Operand::function("startOfDay", vec!["-1".into()]).unwrap(),
                    )),
                )
                .unwrap(),
            ),
        ])
        .unwrap();
        let names: Vec<&str> = clause.functions().iter().map(|f| f.name()).collect();
        assert_eq!(names, vec!["currentUser", "startOfDay"]);
    }
}
