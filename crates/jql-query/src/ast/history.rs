//! History predicates for `WAS` and `CHANGED` clauses.

use serde::Serialize;

use super::{FunctionOperand, Operand, Operator};
use crate::error::AstError;

/// Kinds of history predicate. A clause carries at most one of each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PredicateKind {
    /// `BY`
    By,
    /// `DURING`
    During,
    /// `BEFORE`
    Before,
    /// `AFTER`
    After,
    /// `ON`
    On,
    /// `FROM`
    From,
    /// `TO`
    To,
}

impl PredicateKind {
    /// Canonical keyword.
    pub fn keyword(self) -> &'static str {
        match self {
            Self::By => "BY",
            Self::During => "DURING",
            Self::Before => "BEFORE",
            Self::After => "AFTER",
            Self::On => "ON",
            Self::From => "FROM",
            Self::To => "TO",
        }
    }
}

/// A constraint on when or by whom a field held or changed a value.
///
/// Operands are single values, `EMPTY` or function calls.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryPredicate {
    /// `BY user`
    By(Operand),
    /// `DURING (start, end)`
    During(Operand, Operand),
    /// `BEFORE date`
    Before(Operand),
    /// `AFTER date`
    After(Operand),
    /// `ON date`
    On(Operand),
    /// `FROM value`
    From(Operand),
    /// `TO value`
    To(Operand),
    /// Several predicates of distinct kinds, in source order.
    And(PredicateGroup),
}

impl HistoryPredicate {
    /// Combines predicates. A single predicate is returned unchanged.
    pub fn all(mut predicates: Vec<Self>) -> Result<Self, AstError> {
        if predicates.len() == 1
            && let Some(predicate) = predicates.pop()
        {
            return Ok(predicate);
        }
        PredicateGroup::new(predicates).map(Self::And)
    }

    /// Kind of a simple predicate; `None` for a group.
    pub fn kind(&self) -> Option<PredicateKind> {
        let kind = match self {
            Self::By(_) => PredicateKind::By,
            Self::During(..) => PredicateKind::During,
            Self::Before(_) => PredicateKind::Before,
            Self::After(_) => PredicateKind::After,
            Self::On(_) => PredicateKind::On,
            Self::From(_) => PredicateKind::From,
            Self::To(_) => PredicateKind::To,
            Self::And(_) => return None,
        };
        Some(kind)
    }

    /// Returns true if this predicate is, or contains, one of `kind`.
    pub fn contains(&self, kind: PredicateKind) -> bool {
        match self {
            Self::And(group) => group.predicates().iter().any(|p| p.kind() == Some(kind)),
            other => other.kind() == Some(kind),
        }
    }

    /// Operands of a simple predicate, in source order.
    pub fn operands(&self) -> Vec<&Operand> {
        match self {
            Self::By(o)
            | Self::Before(o)
            | Self::After(o)
            | Self::On(o)
            | Self::From(o)
            | Self::To(o) => vec![o],
            Self::During(start, end) => vec![start, end],
            Self::And(group) => group.predicates().iter().flat_map(Self::operands).collect(),
        }
    }

    /// Rejects list operands, which predicates cannot hold.
    pub(crate) fn check_operands(&self, operator: Operator) -> Result<(), AstError> {
        if self.operands().iter().any(|o| matches!(o, Operand::Multi(_))) {
            return Err(AstError::OperandMismatch {
                operator,
                expected: "single-valued history predicates",
            });
        }
        Ok(())
    }

    /// Appends every function call in this predicate to `out`.
    pub(crate) fn collect_functions<'a>(&'a self, out: &mut Vec<&'a FunctionOperand>) {
        for operand in self.operands() {
            operand.collect_functions(out);
        }
    }
}

/// Two or more simple predicates of distinct kinds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PredicateGroup {
    /// Members in source order.
    predicates: Vec<HistoryPredicate>,
}

impl PredicateGroup {
    /// Creates a group. Members must be simple, distinct in kind, and at least two.
    pub fn new(predicates: Vec<HistoryPredicate>) -> Result<Self, AstError> {
        if predicates.len() < 2 {
            return Err(AstError::InvalidPredicateGroup);
        }
        let mut seen = Vec::with_capacity(predicates.len());
        for predicate in &predicates {
            let kind = predicate.kind().ok_or(AstError::InvalidPredicateGroup)?;
            if seen.contains(&kind) {
                return Err(AstError::DuplicatePredicate {
                    predicate: kind.keyword(),
                });
            }
            seen.push(kind);
        }
        Ok(Self { predicates })
    }

    /// Members in source order.
    pub fn predicates(&self) -> &[HistoryPredicate] {
        &self.predicates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn by(user: &str) -> HistoryPredicate {
        HistoryPredicate::By(Operand::string(user))
    }

    #[test]
    fn single_predicate_is_not_grouped() {
        assert_eq!(HistoryPredicate::all(vec![by("admin")]), Ok(by("admin")));
    }

    #[test]
    fn groups_keep_order() {
        let during = HistoryPredicate::During(Operand::string("a"), Operand::string("b"));
        let group = HistoryPredicate::all(vec![by("admin"), during.clone()]).unwrap();
        let HistoryPredicate::And(group) = group else {
            panic!("expected a group");
        };
        assert_eq!(group.predicates(), [by("admin"), during]);
    }

    #[test]
    fn duplicate_kinds_rejected() {
        assert_eq!(
            PredicateGroup::new(vec![by("a"), by("b")]),
            Err(AstError::DuplicatePredicate { predicate: "BY" })
        );
    }

    #[test]
    fn groups_do_not_nest() {
        let inner = HistoryPredicate::all(vec![
            by("a"),
            HistoryPredicate::On(Operand::string("2011-01-01")),
        ])
        .unwrap();
        assert_eq!(
            PredicateGroup::new(vec![inner, HistoryPredicate::To(Operand::string("x"))]),
            Err(AstError::InvalidPredicateGroup)
        );
        assert_eq!(
            HistoryPredicate::all(vec![]),
            Err(AstError::InvalidPredicateGroup)
        );
    }

    #[test]
    fn contains_looks_inside_groups() {
        let group = HistoryPredicate::all(vec![
            by("a"),
            HistoryPredicate::From(Operand::string("Open")),
        ])
        .unwrap();
        assert!(group.contains(PredicateKind::From));
        assert!(!group.contains(PredicateKind::To));
    }
}
