//! Per-query synonym declarations.

use rand::seq::index;
use rand::Rng;
use std::fmt;

use crate::entity::{EntityKind, Synonym};
use crate::error::{GenError, Result};
use crate::pool::IdentifierPool;

/// Draw a uniformly sized, uniformly chosen subset of `names`.
///
/// An empty pool yields an empty subset; otherwise the subset size is drawn
/// from `1..=names.len()` and elements are taken without replacement.
pub fn sample_subset<R: Rng + ?Sized>(
    rng: &mut R,
    kind: EntityKind,
    names: &[String],
) -> Vec<Synonym> {
    if names.is_empty() {
        return Vec::new();
    }
    let amount = rng.gen_range(1..=names.len());
    index::sample(rng, names.len(), amount)
        .into_iter()
        .map(|i| Synonym::new(kind, names[i].clone()))
        .collect()
}

/// The synonyms declared by one query, grouped by kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclaredSynonyms {
    by_kind: [Vec<Synonym>; 11],
}

impl DeclaredSynonyms {
    pub fn sample<R: Rng + ?Sized>(rng: &mut R, pool: &IdentifierPool) -> Self {
        let mut declared = DeclaredSynonyms::default();
        for kind in EntityKind::ALL {
            declared.by_kind[kind.index()] = sample_subset(rng, kind, pool.names(kind));
        }
        declared
    }

    pub fn of(&self, kind: EntityKind) -> &[Synonym] {
        &self.by_kind[kind.index()]
    }

    /// Synonyms of several kinds, concatenated in the given order.
    pub fn of_kinds(&self, kinds: &[EntityKind]) -> Vec<Synonym> {
        kinds
            .iter()
            .flat_map(|kind| self.of(*kind).iter().cloned())
            .collect()
    }

    /// Every declared synonym in declaration order.
    pub fn reference_list(&self) -> Vec<Synonym> {
        self.by_kind.iter().flatten().cloned().collect()
    }

    pub fn contains(&self, synonym: &Synonym) -> bool {
        self.of(synonym.kind).contains(synonym)
    }

    pub fn is_empty(&self) -> bool {
        self.by_kind.iter().all(Vec::is_empty)
    }
}

/// Renders the declaration line body, e.g. `stmt s1, s2; variable vx; `.
impl fmt::Display for DeclaredSynonyms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for kind in EntityKind::ALL {
            let synonyms = self.of(kind);
            if synonyms.is_empty() {
                continue;
            }
            write!(f, "{} ", kind.keyword())?;
            for (i, syn) in synonyms.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{syn}")?;
            }
            f.write_str("; ")?;
        }
        Ok(())
    }
}

/// Split a rendered declaration line back into `(kind, rendered synonym)`
/// pairs, in order of appearance.
pub fn parse_declaration_line(line: &str) -> Result<Vec<(EntityKind, String)>> {
    let mut out = Vec::new();
    for group in line.split(';') {
        let group = group.trim();
        if group.is_empty() {
            continue;
        }
        let (keyword, rest) = group
            .split_once(char::is_whitespace)
            .ok_or_else(|| GenError::Declaration(format!("missing synonyms in `{group}`")))?;
        let kind = EntityKind::from_keyword(keyword)
            .ok_or_else(|| GenError::Declaration(format!("unknown design entity `{keyword}`")))?;
        for name in rest.split(',') {
            let name = name.trim();
            if name.is_empty() {
                return Err(GenError::Declaration(format!(
                    "empty synonym in `{group}`"
                )));
            }
            out.push((kind, name.to_string()));
        }
    }
    Ok(out)
}
