//! The result clause of `Select`.

use rand::Rng;
use std::fmt;

use crate::attr::{AttrCandidates, AttrFilter, AttrRef};
use crate::config::WeightConfig;
use crate::entity::Synonym;
use crate::error::Result;
use crate::sample::{mask, pick_uniform, pick_weighted};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Elem {
    Synonym(Synonym),
    Attr(AttrRef),
}

impl Elem {
    pub fn synonym(&self) -> &Synonym {
        match self {
            Elem::Synonym(syn) => syn,
            Elem::Attr(attr_ref) => &attr_ref.synonym,
        }
    }
}

impl fmt::Display for Elem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Elem::Synonym(syn) => syn.fmt(f),
            Elem::Attr(attr_ref) => attr_ref.fmt(f),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectResult {
    Boolean,
    Single(Elem),
    Tuple(Vec<Elem>),
}

impl SelectResult {
    pub fn elems(&self) -> &[Elem] {
        match self {
            SelectResult::Boolean => &[],
            SelectResult::Single(elem) => std::slice::from_ref(elem),
            SelectResult::Tuple(elems) => elems,
        }
    }
}

impl fmt::Display for SelectResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectResult::Boolean => f.write_str("BOOLEAN"),
            SelectResult::Single(elem) => elem.fmt(f),
            SelectResult::Tuple(elems) => {
                f.write_str("<")?;
                for (i, elem) in elems.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{elem}")?;
                }
                f.write_str(">")
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ResultShape {
    Tuple,
    Boolean,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TupleShape {
    Single,
    Bracketed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ElemKind {
    Synonym,
    Attr,
}

/// Compose a select result from the query's reference list and attribute
/// candidates.
pub fn compose<R: Rng + ?Sized>(
    rng: &mut R,
    weights: &WeightConfig,
    select_limit: usize,
    references: &[Synonym],
    attrs: &AttrCandidates,
) -> Result<SelectResult> {
    let shape = pick_weighted(
        rng,
        "result",
        &[
            (ResultShape::Tuple, weights.result[0]),
            (ResultShape::Boolean, weights.result[1]),
        ],
    )?;
    if shape == ResultShape::Boolean {
        return Ok(SelectResult::Boolean);
    }

    let tuple = pick_weighted(
        rng,
        "tuple",
        &[
            (TupleShape::Single, weights.tuple[0]),
            (TupleShape::Bracketed, weights.tuple[1]),
        ],
    )?;
    match tuple {
        TupleShape::Single => Ok(SelectResult::Single(elem(rng, weights, references, attrs)?)),
        TupleShape::Bracketed => {
            let len = rng.gen_range(1..=select_limit.max(1));
            let elems = (0..len)
                .map(|_| elem(rng, weights, references, attrs))
                .collect::<Result<Vec<_>>>()?;
            Ok(SelectResult::Tuple(elems))
        }
    }
}

fn elem<R: Rng + ?Sized>(
    rng: &mut R,
    weights: &WeightConfig,
    references: &[Synonym],
    attrs: &AttrCandidates,
) -> Result<Elem> {
    let options = mask(
        &[
            (ElemKind::Synonym, weights.elem[0]),
            (ElemKind::Attr, weights.elem[1]),
        ],
        |kind| match kind {
            ElemKind::Synonym => !references.is_empty(),
            ElemKind::Attr => attrs.can_build(&weights.attr_name, AttrFilter::Any),
        },
    );
    match pick_weighted(rng, "elem", &options)? {
        ElemKind::Synonym => Ok(Elem::Synonym(
            pick_uniform(rng, "select synonym", references)?.clone(),
        )),
        ElemKind::Attr => Ok(Elem::Attr(attrs.build(
            rng,
            &weights.attr_name,
            AttrFilter::Any,
        )?)),
    }
}
