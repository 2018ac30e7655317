//! `with` equality clauses.
//!
//! The first side is chosen freely; the second side is then restricted to
//! the same value type, so a name is never compared with an integer.

use rand::Rng;
use std::fmt;

use super::Clause;
use crate::attr::{AttrCandidates, AttrFilter, AttrRef};
use crate::declaration::DeclaredSynonyms;
use crate::entity::{EntityKind, Literals, Operand, Synonym};
use crate::error::Result;
use crate::sample::{mask, pick_uniform, pick_weighted};

/// One side of a `with` clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WithRef {
    /// A literal identifier: a quoted name or an integer.
    Iden(Operand),
    Attr(AttrRef),
    /// A `prog_line` synonym.
    Synonym(Synonym),
}

impl WithRef {
    pub fn is_name(&self) -> bool {
        match self {
            WithRef::Iden(op) => matches!(op, Operand::Name(_)),
            WithRef::Attr(attr_ref) => attr_ref.is_name(),
            WithRef::Synonym(_) => false,
        }
    }

    pub fn synonym(&self) -> Option<&Synonym> {
        match self {
            WithRef::Iden(_) => None,
            WithRef::Attr(attr_ref) => Some(&attr_ref.synonym),
            WithRef::Synonym(syn) => Some(syn),
        }
    }
}

impl fmt::Display for WithRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WithRef::Iden(op) => op.fmt(f),
            WithRef::Attr(attr_ref) => attr_ref.fmt(f),
            WithRef::Synonym(syn) => syn.fmt(f),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RefKind {
    Iden,
    Attr,
    Synonym,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WithCandidates {
    name_literals: Vec<Operand>,
    integer_literals: Vec<Operand>,
    attrs: AttrCandidates,
    prog_lines: Vec<Synonym>,
}

impl WithCandidates {
    pub fn build(declared: &DeclaredSynonyms, literals: &Literals) -> Self {
        Self {
            name_literals: literals
                .procedure_operands()
                .chain(literals.variable_operands())
                .collect(),
            integer_literals: literals.constant_operands().collect(),
            attrs: AttrCandidates::from_declared(declared),
            prog_lines: declared.of(EntityKind::ProgLine).to_vec(),
        }
    }

    fn all_literals(&self) -> Vec<Operand> {
        self.name_literals
            .iter()
            .chain(&self.integer_literals)
            .cloned()
            .collect()
    }
}

/// Generate one `with` clause.
///
/// `ref_weights` weighs IDEN, attribute reference and synonym; when no
/// literal identifiers exist the IDEN weight moves to the synonym path.
pub fn generate<R: Rng + ?Sized>(
    rng: &mut R,
    ref_weights: &[u32],
    attr_weights: &[u32],
    candidates: &WithCandidates,
) -> Result<Clause> {
    let left = first_ref(rng, ref_weights, attr_weights, candidates)?;
    let right = if left.is_name() {
        name_ref(rng, ref_weights, attr_weights, candidates)?
    } else {
        number_ref(rng, ref_weights, attr_weights, candidates)?
    };
    tracing::trace!(name_typed = left.is_name(), "with clause");
    Ok(Clause::With { left, right })
}

fn weights_of(ref_weights: &[u32]) -> [(RefKind, u32); 3] {
    let at = |i: usize| ref_weights.get(i).copied().unwrap_or(0);
    [
        (RefKind::Iden, at(0)),
        (RefKind::Attr, at(1)),
        (RefKind::Synonym, at(2)),
    ]
}

fn first_ref<R: Rng + ?Sized>(
    rng: &mut R,
    ref_weights: &[u32],
    attr_weights: &[u32],
    candidates: &WithCandidates,
) -> Result<WithRef> {
    let mut options = weights_of(ref_weights);
    let literals = candidates.all_literals();
    if literals.is_empty() {
        options[2].1 = options[2].1.saturating_add(options[0].1);
        options[0].1 = 0;
    }
    let options = mask(&options, |kind| match kind {
        RefKind::Iden => !literals.is_empty(),
        RefKind::Attr => candidates.attrs.can_build(attr_weights, AttrFilter::Any),
        RefKind::Synonym => !candidates.prog_lines.is_empty(),
    });
    match pick_weighted(rng, "with_ref", &options)? {
        RefKind::Iden => Ok(WithRef::Iden(
            pick_uniform(rng, "with literal", &literals)?.clone(),
        )),
        RefKind::Attr => Ok(WithRef::Attr(candidates.attrs.build(
            rng,
            attr_weights,
            AttrFilter::Any,
        )?)),
        RefKind::Synonym => Ok(WithRef::Synonym(
            pick_uniform(rng, "prog_line synonym", &candidates.prog_lines)?.clone(),
        )),
    }
}

/// Second side for a name-typed first side: a name literal or a
/// `procName`/`varName` reference.
fn name_ref<R: Rng + ?Sized>(
    rng: &mut R,
    ref_weights: &[u32],
    attr_weights: &[u32],
    candidates: &WithCandidates,
) -> Result<WithRef> {
    let options = weights_of(ref_weights);
    let options = mask(&options[..2], |kind| match kind {
        RefKind::Iden => !candidates.name_literals.is_empty(),
        RefKind::Attr => candidates.attrs.can_build(attr_weights, AttrFilter::Name),
        RefKind::Synonym => false,
    });
    match pick_weighted(rng, "with_ref", &options)? {
        RefKind::Iden => Ok(WithRef::Iden(
            pick_uniform(rng, "name literal", &candidates.name_literals)?.clone(),
        )),
        _ => Ok(WithRef::Attr(candidates.attrs.build(
            rng,
            attr_weights,
            AttrFilter::Name,
        )?)),
    }
}

/// Second side for a number-typed first side: an integer literal, a
/// `value`/`stmt#` reference or a `prog_line` synonym.
fn number_ref<R: Rng + ?Sized>(
    rng: &mut R,
    ref_weights: &[u32],
    attr_weights: &[u32],
    candidates: &WithCandidates,
) -> Result<WithRef> {
    let options = weights_of(ref_weights);
    let options = mask(&options, |kind| match kind {
        RefKind::Iden => !candidates.integer_literals.is_empty(),
        RefKind::Attr => candidates.attrs.can_build(attr_weights, AttrFilter::Number),
        RefKind::Synonym => !candidates.prog_lines.is_empty(),
    });
    match pick_weighted(rng, "with_ref", &options)? {
        RefKind::Iden => Ok(WithRef::Iden(
            pick_uniform(rng, "integer literal", &candidates.integer_literals)?.clone(),
        )),
        RefKind::Attr => Ok(WithRef::Attr(candidates.attrs.build(
            rng,
            attr_weights,
            AttrFilter::Number,
        )?)),
        RefKind::Synonym => Ok(WithRef::Synonym(
            pick_uniform(rng, "prog_line synonym", &candidates.prog_lines)?.clone(),
        )),
    }
}
