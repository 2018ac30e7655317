//! Design entities, synonyms and literal operands.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The eleven design-entity kinds a query can declare synonyms for.
///
/// Declaration order in generated queries follows [`EntityKind::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Procedure,
    ProgLine,
    Stmt,
    Read,
    Print,
    Call,
    While,
    If,
    Assign,
    Variable,
    Constant,
}

impl EntityKind {
    pub const ALL: [EntityKind; 11] = [
        EntityKind::Procedure,
        EntityKind::ProgLine,
        EntityKind::Stmt,
        EntityKind::Read,
        EntityKind::Print,
        EntityKind::Call,
        EntityKind::While,
        EntityKind::If,
        EntityKind::Assign,
        EntityKind::Variable,
        EntityKind::Constant,
    ];

    /// Keyword used in the declaration line.
    pub fn keyword(self) -> &'static str {
        match self {
            EntityKind::Procedure => "procedure",
            EntityKind::ProgLine => "prog_line",
            EntityKind::Stmt => "stmt",
            EntityKind::Read => "read",
            EntityKind::Print => "print",
            EntityKind::Call => "call",
            EntityKind::While => "while",
            EntityKind::If => "if",
            EntityKind::Assign => "assign",
            EntityKind::Variable => "variable",
            EntityKind::Constant => "constant",
        }
    }

    /// Prefix prepended to every synonym of this kind when rendered.
    pub fn prefix(self) -> &'static str {
        match self {
            EntityKind::Procedure => "proc",
            EntityKind::ProgLine => "prog",
            EntityKind::Stmt => "s",
            EntityKind::Read => "r",
            EntityKind::Print => "prnt",
            EntityKind::Call => "call",
            EntityKind::While => "w",
            EntityKind::If => "i",
            EntityKind::Assign => "a",
            EntityKind::Variable => "v",
            EntityKind::Constant => "cons",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<EntityKind> {
        EntityKind::ALL
            .into_iter()
            .find(|kind| kind.keyword() == keyword)
    }

    /// Position of this kind in [`EntityKind::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A declared synonym: a pool name bound to the kind it was drawn from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Synonym {
    pub kind: EntityKind,
    pub name: String,
}

impl Synonym {
    pub fn new(kind: EntityKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }
}

impl fmt::Display for Synonym {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind.prefix(), self.name)
    }
}

/// A clause operand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    Synonym(Synonym),
    /// Procedure or variable name, rendered in double quotes.
    Name(String),
    /// Constant value, rendered bare.
    Integer(String),
    Wildcard,
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Synonym(syn) => syn.fmt(f),
            Operand::Name(name) => write!(f, "\"{name}\""),
            Operand::Integer(value) => f.write_str(value),
            Operand::Wildcard => f.write_str("_"),
        }
    }
}

/// Literal identifiers supplied from outside the generator.
///
/// These are usable directly in clauses and are never declared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Literals {
    pub procedures: Vec<String>,
    pub variables: Vec<String>,
    pub constants: Vec<String>,
}

impl Literals {
    pub fn is_empty(&self) -> bool {
        self.procedures.is_empty() && self.variables.is_empty() && self.constants.is_empty()
    }

    pub fn procedure_operands(&self) -> impl Iterator<Item = Operand> + '_ {
        self.procedures.iter().cloned().map(Operand::Name)
    }

    pub fn variable_operands(&self) -> impl Iterator<Item = Operand> + '_ {
        self.variables.iter().cloned().map(Operand::Name)
    }

    pub fn constant_operands(&self) -> impl Iterator<Item = Operand> + '_ {
        self.constants.iter().cloned().map(Operand::Integer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_roundtrip() {
        for kind in EntityKind::ALL {
            assert_eq!(EntityKind::from_keyword(kind.keyword()), Some(kind));
        }
        assert_eq!(EntityKind::from_keyword("stmt#"), None);
    }

    #[test]
    fn index_matches_declaration_order() {
        for (i, kind) in EntityKind::ALL.into_iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }

    #[test]
    fn operands_render_like_pql_tokens() {
        assert_eq!(Operand::Synonym(Synonym::new(EntityKind::Print, "x1")).to_string(), "prntx1");
        assert_eq!(Operand::Name("main".into()).to_string(), "\"main\"");
        assert_eq!(Operand::Integer("42".into()).to_string(), "42");
        assert_eq!(Operand::Wildcard.to_string(), "_");
    }
}
