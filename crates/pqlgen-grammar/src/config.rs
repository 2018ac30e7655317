//! Generator configuration: weight vectors, pool sizes and run scalars.
//!
//! `GeneratorConfig::default()` is the plain (no preset) configuration. TOML
//! files use `#[serde(default)]`, so they only need the fields that differ.

use serde::{Deserialize, Serialize};

use crate::entity::EntityKind;
use crate::error::{GenError, Result};

/// Named weight vectors, one per grammar decision.
///
/// Vectors are stored as plain lists so that config files and CLI flags can
/// carry them verbatim; [`WeightConfig::validate`] enforces the arities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightConfig {
    /// tuple, BOOLEAN
    pub result: Vec<u32>,
    /// single element, `<...>`
    pub tuple: Vec<u32>,
    /// synonym, attribute reference
    pub elem: Vec<u32>,
    /// such that, with, pattern
    pub clause_family: Vec<u32>,
    /// Modifies, Uses, Calls, Parent, Follows, Next, Affects
    pub relation: Vec<u32>,
    /// plain, transitive
    pub transitive: Vec<u32>,
    /// IDEN, attribute reference, synonym
    pub with_ref: Vec<u32>,
    /// procName, varName, value, stmt#
    pub attr_name: Vec<u32>,
    /// assign, if, while
    pub pattern: Vec<u32>,
}

impl Default for WeightConfig {
    fn default() -> Self {
        Self {
            result: vec![4, 1],
            tuple: vec![1, 3],
            elem: vec![1, 1],
            clause_family: vec![1, 1, 1],
            relation: vec![1; 7],
            transitive: vec![1, 1],
            with_ref: vec![1, 1, 1],
            attr_name: vec![1; 4],
            pattern: vec![1, 1, 1],
        }
    }
}

impl WeightConfig {
    pub fn validate(&self) -> Result<()> {
        let groups: [(&'static str, &[u32], usize); 9] = [
            ("result", &self.result, 2),
            ("tuple", &self.tuple, 2),
            ("elem", &self.elem, 2),
            ("clause_family", &self.clause_family, 3),
            ("relation", &self.relation, 7),
            ("transitive", &self.transitive, 2),
            ("with_ref", &self.with_ref, 3),
            ("attr_name", &self.attr_name, 4),
            ("pattern", &self.pattern, 3),
        ];
        for (group, weights, expected) in groups {
            if weights.len() != expected {
                return Err(GenError::WeightArity {
                    group,
                    expected,
                    actual: weights.len(),
                });
            }
            // Masking can move one weight onto another, so the group total
            // must itself fit in a u32.
            if weights
                .iter()
                .try_fold(0u32, |total, &weight| total.checked_add(weight))
                .is_none()
            {
                return Err(GenError::InvalidSetting {
                    name: group,
                    message: format!("weights must sum to at most {}", u32::MAX),
                });
            }
        }
        Ok(())
    }
}

/// Per-kind pool sizes. A missing or negative override falls back to
/// `default`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolSizes {
    pub default: usize,
    pub procedure: Option<i64>,
    pub prog_line: Option<i64>,
    pub stmt: Option<i64>,
    pub read: Option<i64>,
    pub print: Option<i64>,
    pub call: Option<i64>,
    #[serde(rename = "while")]
    pub while_: Option<i64>,
    #[serde(rename = "if")]
    pub if_: Option<i64>,
    pub assign: Option<i64>,
    pub variable: Option<i64>,
    pub constant: Option<i64>,
}

impl Default for PoolSizes {
    fn default() -> Self {
        Self {
            default: 10,
            procedure: None,
            prog_line: None,
            stmt: None,
            read: None,
            print: None,
            call: None,
            while_: None,
            if_: None,
            assign: None,
            variable: None,
            constant: None,
        }
    }
}

impl PoolSizes {
    pub fn override_for(&self, kind: EntityKind) -> Option<i64> {
        match kind {
            EntityKind::Procedure => self.procedure,
            EntityKind::ProgLine => self.prog_line,
            EntityKind::Stmt => self.stmt,
            EntityKind::Read => self.read,
            EntityKind::Print => self.print,
            EntityKind::Call => self.call,
            EntityKind::While => self.while_,
            EntityKind::If => self.if_,
            EntityKind::Assign => self.assign,
            EntityKind::Variable => self.variable,
            EntityKind::Constant => self.constant,
        }
    }

    pub fn set_override(&mut self, kind: EntityKind, count: Option<i64>) {
        let slot = match kind {
            EntityKind::Procedure => &mut self.procedure,
            EntityKind::ProgLine => &mut self.prog_line,
            EntityKind::Stmt => &mut self.stmt,
            EntityKind::Read => &mut self.read,
            EntityKind::Print => &mut self.print,
            EntityKind::Call => &mut self.call,
            EntityKind::While => &mut self.while_,
            EntityKind::If => &mut self.if_,
            EntityKind::Assign => &mut self.assign,
            EntityKind::Variable => &mut self.variable,
            EntityKind::Constant => &mut self.constant,
        };
        *slot = count;
    }

    /// Number of names to generate for `kind`.
    pub fn count_for(&self, kind: EntityKind) -> usize {
        match self.override_for(kind) {
            Some(count) if count >= 0 => count as usize,
            _ => self.default,
        }
    }
}

/// Everything a generation run reads. Immutable once resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub weights: WeightConfig,
    pub pools: PoolSizes,
    /// Maximum synthetic identifier length.
    pub iden_len: usize,
    /// Maximum number of `and` continuations per clause chain.
    pub and_limit: usize,
    /// Multiplier applied to the continuation probability after each `and`.
    /// `1.0` keeps the probability static.
    pub and_decay: f64,
    /// Maximum number of elements in a `<...>` select tuple.
    pub select_limit: usize,
    pub num_queries: usize,
    /// Upper bound on clause chains per query.
    pub len_queries: usize,
    pub comment: String,
    /// Echoed verbatim as the last line of every query.
    pub timeout: String,
    /// Let pattern clauses use procedure literals on the left-hand side.
    pub allow_error: bool,
    /// Admit `prog_line` synonyms as statement references in such-that
    /// clauses.
    pub line_refs: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            weights: WeightConfig::default(),
            pools: PoolSizes::default(),
            iden_len: 10,
            and_limit: 5,
            and_decay: 1.0,
            select_limit: 5,
            num_queries: 50,
            len_queries: 10,
            comment: "NIL".to_string(),
            timeout: "5000".to_string(),
            allow_error: false,
            line_refs: false,
        }
    }
}

impl GeneratorConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|err| GenError::ConfigParse(err.to_string()))
    }

    pub fn validate(&self) -> Result<()> {
        self.weights.validate()?;
        if self.iden_len == 0 {
            return Err(GenError::InvalidSetting {
                name: "iden_len",
                message: "must be >= 1".to_string(),
            });
        }
        if self.select_limit == 0 {
            return Err(GenError::InvalidSetting {
                name: "select_limit",
                message: "must be >= 1".to_string(),
            });
        }
        if !(0.0..=1.0).contains(&self.and_decay) {
            return Err(GenError::InvalidSetting {
                name: "and_decay",
                message: format!("must be within [0, 1], got {}", self.and_decay),
            });
        }
        Ok(())
    }
}
