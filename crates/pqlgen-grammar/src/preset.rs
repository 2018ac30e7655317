//! Presets: named overrides that steer generation toward one select shape
//! and one clause family.
//!
//! A preset is a pair `(select, family)`. The select half picks the result
//! shape and shrinks the run to small, readable queries; the family half
//! narrows the clause weights. Select preset `0` disables presets entirely.

use crate::clause::Relation;
use crate::config::GeneratorConfig;
use crate::error::{GenError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectPreset {
    None,
    Boolean,
    Tuple,
    Single,
}

impl TryFrom<u8> for SelectPreset {
    type Error = GenError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(SelectPreset::None),
            1 => Ok(SelectPreset::Boolean),
            2 => Ok(SelectPreset::Tuple),
            3 => Ok(SelectPreset::Single),
            other => Err(GenError::InvalidSelectPreset(other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FamilyPreset {
    IterationMix,
    Follows,
    FollowsT,
    Parent,
    ParentT,
    Calls,
    CallsT,
    Uses,
    Modifies,
    Next,
    NextT,
    Affects,
    AffectsT,
    PatternAssign,
    PatternIf,
    PatternWhile,
    With,
}

impl FamilyPreset {
    pub const ALL: [FamilyPreset; 17] = [
        FamilyPreset::IterationMix,
        FamilyPreset::Follows,
        FamilyPreset::FollowsT,
        FamilyPreset::Parent,
        FamilyPreset::ParentT,
        FamilyPreset::Calls,
        FamilyPreset::CallsT,
        FamilyPreset::Uses,
        FamilyPreset::Modifies,
        FamilyPreset::Next,
        FamilyPreset::NextT,
        FamilyPreset::Affects,
        FamilyPreset::AffectsT,
        FamilyPreset::PatternAssign,
        FamilyPreset::PatternIf,
        FamilyPreset::PatternWhile,
        FamilyPreset::With,
    ];
}

impl TryFrom<u8> for FamilyPreset {
    type Error = GenError;

    fn try_from(value: u8) -> Result<Self> {
        FamilyPreset::ALL
            .get(value as usize)
            .copied()
            .ok_or(GenError::InvalidFamilyPreset(value))
    }
}

/// Weight vectors a family preset replaces. `None` keeps the current value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FamilyOverride {
    pub label: &'static str,
    pub clause_family: Option<[u32; 3]>,
    pub relation: Option<[u32; 7]>,
    pub transitive: Option<[u32; 2]>,
    pub pattern: Option<[u32; 3]>,
}

const SUCH_THAT_ONLY: Option<[u32; 3]> = Some([1, 0, 0]);
const PLAIN: Option<[u32; 2]> = Some([1, 0]);
const STAR: Option<[u32; 2]> = Some([0, 1]);

/// Relation weights in `Relation::ALL` order with only `relation` enabled.
const fn relation_only(relation: Relation) -> Option<[u32; 7]> {
    let mut weights = [0; 7];
    weights[relation as usize] = 1;
    Some(weights)
}

const fn such_that(
    label: &'static str,
    relation: Relation,
    transitive: Option<[u32; 2]>,
) -> FamilyOverride {
    FamilyOverride {
        label,
        clause_family: SUCH_THAT_ONLY,
        relation: relation_only(relation),
        transitive,
        pattern: None,
    }
}

const fn pattern(label: &'static str, pattern: [u32; 3]) -> FamilyOverride {
    FamilyOverride {
        label,
        clause_family: Some([0, 0, 1]),
        relation: None,
        transitive: None,
        pattern: Some(pattern),
    }
}

impl FamilyPreset {
    pub fn overrides(self) -> FamilyOverride {
        match self {
            FamilyPreset::IterationMix => FamilyOverride {
                label: "iter2 queries",
                clause_family: None,
                relation: Some([1, 1, 1, 0, 0, 1, 1]),
                transitive: None,
                pattern: Some([0, 1, 1]),
            },
            FamilyPreset::Follows => such_that("Follows", Relation::Follows, PLAIN),
            FamilyPreset::FollowsT => such_that("Follows*", Relation::Follows, STAR),
            FamilyPreset::Parent => such_that("Parent", Relation::Parent, PLAIN),
            FamilyPreset::ParentT => such_that("Parent*", Relation::Parent, STAR),
            FamilyPreset::Calls => such_that("Calls", Relation::Calls, PLAIN),
            FamilyPreset::CallsT => such_that("Calls*", Relation::Calls, STAR),
            FamilyPreset::Uses => such_that("UsesP/S", Relation::Uses, None),
            FamilyPreset::Modifies => such_that("ModifiesP/S", Relation::Modifies, None),
            FamilyPreset::Next => such_that("Next", Relation::Next, PLAIN),
            FamilyPreset::NextT => such_that("Next*", Relation::Next, STAR),
            FamilyPreset::Affects => such_that("Affects", Relation::Affects, PLAIN),
            FamilyPreset::AffectsT => such_that("Affects*", Relation::Affects, STAR),
            FamilyPreset::PatternAssign => pattern("pattern assign", [1, 0, 0]),
            FamilyPreset::PatternIf => pattern("pattern if", [0, 1, 0]),
            FamilyPreset::PatternWhile => pattern("pattern while", [0, 0, 1]),
            FamilyPreset::With => FamilyOverride {
                label: "with",
                clause_family: Some([0, 1, 0]),
                relation: None,
                transitive: None,
                pattern: None,
            },
        }
    }
}

/// Result-shape override of a select preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectOverride {
    pub label: &'static str,
    pub result: [u32; 2],
    pub tuple: Option<[u32; 2]>,
}

impl SelectPreset {
    pub fn overrides(self) -> Option<SelectOverride> {
        match self {
            SelectPreset::None => None,
            SelectPreset::Boolean => Some(SelectOverride {
                label: "BOOLEAN SELECT",
                result: [0, 1],
                tuple: None,
            }),
            SelectPreset::Tuple => Some(SelectOverride {
                label: "tuple SELECT",
                result: [1, 0],
                tuple: Some([0, 1]),
            }),
            SelectPreset::Single => Some(SelectOverride {
                label: "single SELECT",
                result: [1, 0],
                tuple: Some([1, 0]),
            }),
        }
    }
}

/// Sizes every active preset uses.
pub const PRESET_NUM_QUERIES: usize = 20;
pub const PRESET_LEN_QUERIES: usize = 2;
pub const PRESET_NUM_SYN: usize = 5;
pub const PRESET_IDEN_LEN: usize = 2;
pub const PRESET_AND_LIMIT: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Preset {
    pub select: SelectPreset,
    pub family: FamilyPreset,
}

impl Preset {
    pub fn from_indices(select: u8, family: u8) -> Result<Self> {
        Ok(Self {
            select: SelectPreset::try_from(select)?,
            family: FamilyPreset::try_from(family)?,
        })
    }

    pub fn is_active(self) -> bool {
        self.select != SelectPreset::None
    }

    /// Comment written on the header line of every query, e.g.
    /// `BOOLEAN SELECT - ModifiesP/S`.
    pub fn comment(self) -> Option<String> {
        let select = self.select.overrides()?;
        Some(format!("{} - {}", select.label, self.family.overrides().label))
    }

    /// Apply this preset on top of `base`. Inactive presets return `base`
    /// unchanged.
    pub fn apply(self, base: GeneratorConfig) -> GeneratorConfig {
        let (Some(select), Some(comment)) = (self.select.overrides(), self.comment()) else {
            return base;
        };
        let family = self.family.overrides();

        let mut config = base;
        config.num_queries = PRESET_NUM_QUERIES;
        config.len_queries = PRESET_LEN_QUERIES;
        config.pools.default = PRESET_NUM_SYN;
        config.iden_len = PRESET_IDEN_LEN;
        config.and_limit = PRESET_AND_LIMIT;
        config.comment = comment;

        let weights = &mut config.weights;
        weights.result = select.result.to_vec();
        if let Some(tuple) = select.tuple {
            weights.tuple = tuple.to_vec();
        }
        if let Some(clause_family) = family.clause_family {
            weights.clause_family = clause_family.to_vec();
        }
        if let Some(relation) = family.relation {
            weights.relation = relation.to_vec();
        }
        if let Some(transitive) = family.transitive {
            weights.transitive = transitive.to_vec();
        }
        if let Some(pattern) = family.pattern {
            weights.pattern = pattern.to_vec();
        }
        tracing::debug!(comment = %config.comment, "applied preset");
        config
    }
}

impl Default for Preset {
    fn default() -> Self {
        Self {
            select: SelectPreset::None,
            family: FamilyPreset::IterationMix,
        }
    }
}
