//! Attribute references (`syn.attrName`).

use rand::Rng;
use std::fmt;

use crate::declaration::DeclaredSynonyms;
use crate::entity::{EntityKind, Synonym};
use crate::error::Result;
use crate::sample::{mask, pick_uniform, pick_weighted};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttrName {
    ProcName,
    VarName,
    Value,
    StmtNo,
}

impl AttrName {
    pub const ALL: [AttrName; 4] = [
        AttrName::ProcName,
        AttrName::VarName,
        AttrName::Value,
        AttrName::StmtNo,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AttrName::ProcName => "procName",
            AttrName::VarName => "varName",
            AttrName::Value => "value",
            AttrName::StmtNo => "stmt#",
        }
    }

    /// `procName` and `varName` compare as names; `value` and `stmt#` as
    /// integers.
    pub fn is_name(self) -> bool {
        matches!(self, AttrName::ProcName | AttrName::VarName)
    }

    /// Entity kinds that carry this attribute.
    pub fn owners(self) -> &'static [EntityKind] {
        match self {
            AttrName::ProcName => &[EntityKind::Procedure, EntityKind::Call],
            AttrName::VarName => &[EntityKind::Variable, EntityKind::Read, EntityKind::Print],
            AttrName::Value => &[EntityKind::Constant],
            AttrName::StmtNo => &[
                EntityKind::Stmt,
                EntityKind::Read,
                EntityKind::Print,
                EntityKind::Call,
                EntityKind::While,
                EntityKind::If,
                EntityKind::Assign,
            ],
        }
    }

    pub fn from_name(name: &str) -> Option<AttrName> {
        AttrName::ALL.into_iter().find(|attr| attr.as_str() == name)
    }
}

/// Restricts which half of the attribute names may be chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrFilter {
    Any,
    Name,
    Number,
}

impl AttrFilter {
    fn admits(self, attr: AttrName) -> bool {
        match self {
            AttrFilter::Any => true,
            AttrFilter::Name => attr.is_name(),
            AttrFilter::Number => !attr.is_name(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttrRef {
    pub synonym: Synonym,
    pub attr: AttrName,
}

impl AttrRef {
    pub fn is_name(&self) -> bool {
        self.attr.is_name()
    }
}

impl fmt::Display for AttrRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.synonym, self.attr.as_str())
    }
}

/// Declared synonyms grouped by the attribute they can project onto.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttrCandidates {
    lists: [Vec<Synonym>; 4],
}

impl AttrCandidates {
    pub fn from_declared(declared: &DeclaredSynonyms) -> Self {
        Self {
            lists: AttrName::ALL.map(|attr| declared.of_kinds(attr.owners())),
        }
    }

    pub fn of(&self, attr: AttrName) -> &[Synonym] {
        &self.lists[attr as usize]
    }

    /// Whether an attribute passing `filter` with a positive weight has any
    /// candidate.
    pub fn can_build(&self, weights: &[u32], filter: AttrFilter) -> bool {
        AttrName::ALL.into_iter().zip(weights).any(|(attr, weight)| {
            *weight > 0 && filter.admits(attr) && !self.of(attr).is_empty()
        })
    }

    /// Choose an attribute by weight among those admitted by `filter` that
    /// have candidates, then one of its synonyms uniformly.
    pub fn build<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        weights: &[u32],
        filter: AttrFilter,
    ) -> Result<AttrRef> {
        let options: Vec<(AttrName, u32)> = AttrName::ALL
            .into_iter()
            .zip(weights.iter().copied())
            .collect();
        let options = mask(&options, |attr| filter.admits(attr) && !self.of(attr).is_empty());
        let attr = pick_weighted(rng, "attr_name", &options)?;
        let synonym = pick_uniform(rng, "attribute operand", self.of(attr))?.clone();
        Ok(AttrRef { synonym, attr })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::IdentifierPool;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn declared(kinds: &[EntityKind]) -> DeclaredSynonyms {
        let pool = IdentifierPool::from_names(
            kinds
                .iter()
                .map(|kind| (*kind, vec!["A".to_string(), "B".to_string()])),
        );
        DeclaredSynonyms::sample(&mut StdRng::seed_from_u64(1), &pool)
    }

    #[test]
    fn operands_always_own_the_chosen_attribute() {
        let candidates = AttrCandidates::from_declared(&declared(&EntityKind::ALL));
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..1000 {
            let attr_ref = candidates.build(&mut rng, &[1, 1, 1, 1], AttrFilter::Any).unwrap();
            assert!(attr_ref.attr.owners().contains(&attr_ref.synonym.kind));
        }
    }

    #[test]
    fn filters_restrict_to_one_half() {
        let candidates = AttrCandidates::from_declared(&declared(&EntityKind::ALL));
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..300 {
            assert!(candidates.build(&mut rng, &[1, 1, 1, 1], AttrFilter::Name).unwrap().is_name());
            assert!(!candidates.build(&mut rng, &[1, 1, 1, 1], AttrFilter::Number).unwrap().is_name());
        }
    }

    #[test]
    fn attributes_without_candidates_are_skipped() {
        let candidates = AttrCandidates::from_declared(&declared(&[EntityKind::Constant]));
        let mut rng = StdRng::seed_from_u64(4);
        for _ in 0..100 {
            let attr_ref = candidates.build(&mut rng, &[5, 5, 1, 5], AttrFilter::Any).unwrap();
            assert_eq!(attr_ref.attr, AttrName::Value);
        }
        assert!(!candidates.can_build(&[1, 1, 1, 1], AttrFilter::Name));
        assert!(candidates.build(&mut rng, &[1, 1, 1, 1], AttrFilter::Name).is_err());
    }

    #[test]
    fn renders_with_attribute_suffix() {
        let attr_ref = AttrRef {
            synonym: Synonym::new(EntityKind::Call, "x"),
            attr: AttrName::StmtNo,
        };
        assert_eq!(attr_ref.to_string(), "callx.stmt#");
        assert_eq!(AttrName::from_name("stmt#"), Some(AttrName::StmtNo));
    }
}
