//! Clause families: `such that`, `with` and `pattern`.
//!
//! Generators return typed clauses; rendering lives in the `Display` impls so
//! the query assembler and the tests share one textual form.

pub mod pattern;
pub mod such_that;
pub mod with;

use std::fmt;

use crate::attr::AttrRef;
use crate::entity::{Operand, Synonym};

pub use pattern::{PatternCandidates, PatternKind};
pub use such_that::{Relation, SuchThatCandidates};
pub use with::{WithCandidates, WithRef};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClauseFamily {
    SuchThat,
    With,
    Pattern,
}

impl ClauseFamily {
    pub const ALL: [ClauseFamily; 3] = [
        ClauseFamily::SuchThat,
        ClauseFamily::With,
        ClauseFamily::Pattern,
    ];

    pub fn keyword(self) -> &'static str {
        match self {
            ClauseFamily::SuchThat => "such that",
            ClauseFamily::With => "with",
            ClauseFamily::Pattern => "pattern",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Clause {
    SuchThat {
        relation: Relation,
        transitive: bool,
        left: Operand,
        right: Operand,
    },
    With {
        left: WithRef,
        right: WithRef,
    },
    Pattern {
        kind: PatternKind,
        entity: Synonym,
        lhs: Operand,
    },
}

impl Clause {
    pub fn family(&self) -> ClauseFamily {
        match self {
            Clause::SuchThat { .. } => ClauseFamily::SuchThat,
            Clause::With { .. } => ClauseFamily::With,
            Clause::Pattern { .. } => ClauseFamily::Pattern,
        }
    }

    /// Synonyms referenced by this clause, attribute operands included.
    pub fn synonyms(&self) -> Vec<&Synonym> {
        fn operand(op: &Operand) -> Option<&Synonym> {
            match op {
                Operand::Synonym(syn) => Some(syn),
                _ => None,
            }
        }
        match self {
            Clause::SuchThat { left, right, .. } => {
                operand(left).into_iter().chain(operand(right)).collect()
            }
            Clause::With { left, right } => {
                left.synonym().into_iter().chain(right.synonym()).collect()
            }
            Clause::Pattern { entity, lhs, .. } => {
                std::iter::once(entity).chain(operand(lhs)).collect()
            }
        }
    }

    /// Attribute references used by this clause.
    pub fn attr_refs(&self) -> Vec<&AttrRef> {
        match self {
            Clause::With { left, right } => [left, right]
                .into_iter()
                .filter_map(|side| match side {
                    WithRef::Attr(attr_ref) => Some(attr_ref),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        }
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Clause::SuchThat {
                relation,
                transitive,
                left,
                right,
            } => {
                let star = if *transitive { "*" } else { "" };
                write!(f, "{}{star}({left}, {right})", relation.as_str())
            }
            Clause::With { left, right } => write!(f, "{left} = {right}"),
            Clause::Pattern { kind, entity, lhs } => match kind {
                PatternKind::If => write!(f, "{entity}({lhs}, _, _)"),
                PatternKind::Assign | PatternKind::While => write!(f, "{entity}({lhs}, _)"),
            },
        }
    }
}

/// One family keyword followed by `and`-joined clauses of that family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClauseChain {
    pub family: ClauseFamily,
    pub clauses: Vec<Clause>,
}

impl fmt::Display for ClauseChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.family.keyword())?;
        for (i, clause) in self.clauses.iter().enumerate() {
            if i > 0 {
                f.write_str(" and")?;
            }
            write!(f, " {clause}")?;
        }
        Ok(())
    }
}
