//! `pattern` clauses over assign, if and while synonyms.

use rand::Rng;

use super::Clause;
use crate::declaration::DeclaredSynonyms;
use crate::entity::{EntityKind, Literals, Operand, Synonym};
use crate::error::{GenError, Result};
use crate::sample::{pick_uniform, pick_weighted};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternKind {
    Assign,
    If,
    While,
}

impl PatternKind {
    pub const ALL: [PatternKind; 3] = [PatternKind::Assign, PatternKind::If, PatternKind::While];

    pub fn entity(self) -> EntityKind {
        match self {
            PatternKind::Assign => EntityKind::Assign,
            PatternKind::If => EntityKind::If,
            PatternKind::While => EntityKind::While,
        }
    }

    fn missing(self) -> GenError {
        let what = match self {
            PatternKind::Assign => "pattern-assign synonym",
            PatternKind::If => "pattern-if synonym",
            PatternKind::While => "pattern-while synonym",
        };
        GenError::EmptyCandidates { what }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternCandidates {
    lhs: Vec<Operand>,
    entities: [Vec<Synonym>; 3],
}

impl PatternCandidates {
    /// `allow_error` admits procedure literals on the left-hand side, which
    /// yields semantically invalid clauses on purpose.
    pub fn build(declared: &DeclaredSynonyms, literals: &Literals, allow_error: bool) -> Self {
        let mut lhs: Vec<Operand> = declared
            .of(EntityKind::Variable)
            .iter()
            .cloned()
            .map(Operand::Synonym)
            .collect();
        lhs.extend(literals.variable_operands());
        if allow_error {
            lhs.extend(literals.procedure_operands());
        }
        if lhs.is_empty() {
            lhs.push(Operand::Wildcard);
        }
        Self {
            lhs,
            entities: PatternKind::ALL.map(|kind| declared.of(kind.entity()).to_vec()),
        }
    }

    pub fn entities(&self, kind: PatternKind) -> &[Synonym] {
        &self.entities[kind as usize]
    }
}

/// Generate one pattern clause. Fails when the chosen pattern kind has no
/// declared synonym instead of silently picking another kind.
pub fn generate<R: Rng + ?Sized>(
    rng: &mut R,
    weights: &[u32],
    candidates: &PatternCandidates,
) -> Result<Clause> {
    let options: Vec<(PatternKind, u32)> = PatternKind::ALL
        .into_iter()
        .zip(weights.iter().copied())
        .collect();
    let kind = pick_weighted(rng, "pattern", &options)?;
    let entities = candidates.entities(kind);
    if entities.is_empty() {
        return Err(kind.missing());
    }
    let entity = pick_uniform(rng, "pattern synonym", entities)?.clone();
    let lhs = pick_uniform(rng, "pattern left-hand side", &candidates.lhs)?.clone();
    Ok(Clause::Pattern { kind, entity, lhs })
}
