//! `such that` relation clauses.

use rand::Rng;

use super::Clause;
use crate::declaration::DeclaredSynonyms;
use crate::entity::{EntityKind, Literals, Operand};
use crate::error::Result;
use crate::sample::{mask, pick_uniform, pick_weighted};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    Modifies,
    Uses,
    Calls,
    Parent,
    Follows,
    Next,
    Affects,
}

impl Relation {
    pub const ALL: [Relation; 7] = [
        Relation::Modifies,
        Relation::Uses,
        Relation::Calls,
        Relation::Parent,
        Relation::Follows,
        Relation::Next,
        Relation::Affects,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Relation::Modifies => "Modifies",
            Relation::Uses => "Uses",
            Relation::Calls => "Calls",
            Relation::Parent => "Parent",
            Relation::Follows => "Follows",
            Relation::Next => "Next",
            Relation::Affects => "Affects",
        }
    }

    pub fn supports_transitive(self) -> bool {
        !matches!(self, Relation::Modifies | Relation::Uses)
    }
}

/// Synonym kinds allowed where a container statement is expected.
const PARENT_KINDS: &[EntityKind] = &[
    EntityKind::Stmt,
    EntityKind::While,
    EntityKind::If,
];

/// Kinds that can stand for any statement.
const CHILD_EXTRA_KINDS: &[EntityKind] = &[
    EntityKind::Read,
    EntityKind::Print,
    EntityKind::Call,
    EntityKind::Assign,
];

/// Kinds shared by the left side of Modifies and Uses.
const MODIFIER_USER_KINDS: &[EntityKind] = &[
    EntityKind::Procedure,
    EntityKind::Stmt,
    EntityKind::Call,
    EntityKind::While,
    EntityKind::If,
    EntityKind::Assign,
];

/// Left/right operand candidates for every relation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuchThatCandidates {
    sides: [(Vec<Operand>, Vec<Operand>); 7],
}

impl SuchThatCandidates {
    /// `line_refs` also admits `prog_line` synonyms wherever a statement
    /// reference is expected.
    pub fn build(declared: &DeclaredSynonyms, literals: &Literals, line_refs: bool) -> Self {
        let synonyms = |kinds: &[EntityKind]| -> Vec<Operand> {
            declared
                .of_kinds(kinds)
                .into_iter()
                .map(Operand::Synonym)
                .collect()
        };
        let line_refs = if line_refs {
            synonyms(&[EntityKind::ProgLine])
        } else {
            Vec::new()
        };

        let mut modifier_user = synonyms(MODIFIER_USER_KINDS);
        modifier_user.extend(line_refs.iter().cloned());
        modifier_user.extend(literals.procedure_operands());
        let mut modifier = modifier_user.clone();
        modifier.extend(synonyms(&[EntityKind::Read]));
        let mut user = modifier_user;
        user.extend(synonyms(&[EntityKind::Print]));

        let mut modified_used = synonyms(&[EntityKind::Variable]);
        modified_used.extend(literals.variable_operands());
        modified_used.push(Operand::Wildcard);

        let mut caller_called = synonyms(&[EntityKind::Procedure]);
        caller_called.extend(literals.procedure_operands());
        caller_called.push(Operand::Wildcard);

        let mut parent = synonyms(PARENT_KINDS);
        parent.extend(line_refs);
        parent.push(Operand::Wildcard);
        let mut child = parent.clone();
        child.extend(synonyms(CHILD_EXTRA_KINDS));

        Self {
            sides: [
                (modifier, modified_used.clone()),
                (user, modified_used),
                (caller_called.clone(), caller_called),
                (parent, child.clone()),
                (child.clone(), child.clone()),
                (child.clone(), child.clone()),
                (child.clone(), child),
            ],
        }
    }

    pub fn left(&self, relation: Relation) -> &[Operand] {
        &self.sides[relation as usize].0
    }

    pub fn right(&self, relation: Relation) -> &[Operand] {
        &self.sides[relation as usize].1
    }

    fn has_operands(&self, relation: Relation) -> bool {
        !self.left(relation).is_empty() && !self.right(relation).is_empty()
    }
}

/// Generate one relation clause. Relations with an empty operand side are
/// never chosen.
pub fn generate<R: Rng + ?Sized>(
    rng: &mut R,
    relation_weights: &[u32],
    transitive_weights: &[u32],
    candidates: &SuchThatCandidates,
) -> Result<Clause> {
    let options: Vec<(Relation, u32)> = Relation::ALL
        .into_iter()
        .zip(relation_weights.iter().copied())
        .collect();
    let options = mask(&options, |relation| candidates.has_operands(relation));
    let relation = pick_weighted(rng, "relation", &options)?;

    let transitive = if relation.supports_transitive() {
        let options: Vec<(bool, u32)> = [false, true]
            .into_iter()
            .zip(transitive_weights.iter().copied())
            .collect();
        pick_weighted(rng, "transitive", &options)?
    } else {
        false
    };

    let left = pick_uniform(rng, "relation left operand", candidates.left(relation))?.clone();
    let right = pick_uniform(rng, "relation right operand", candidates.right(relation))?.clone();
    tracing::trace!(relation = relation.as_str(), transitive, "such-that clause");
    Ok(Clause::SuchThat {
        relation,
        transitive,
        left,
        right,
    })
}
