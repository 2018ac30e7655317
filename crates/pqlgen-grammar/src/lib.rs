//! pqlgen grammar: weighted sampling of PQL test queries.
//!
//! The engine draws queries from a weighted context-free grammar while keeping
//! each query internally consistent:
//! 1. **Pools**: synthetic identifier names per entity kind, built once per run
//! 2. **Declarations**: a random non-empty subset of every pool, per query
//! 3. **Clauses**: `such that`, `with` and `pattern` generators that only
//!    reference declared synonyms or supplied literals
//! 4. **Presets**: declarative weight overrides that focus a run on one
//!    select shape and one clause family
//!
//! All randomness flows through a caller-supplied [`rand::Rng`], so a fixed
//! seed reproduces a run byte for byte.

pub mod attr;
pub mod chain;
pub mod clause;
pub mod config;
pub mod declaration;
pub mod entity;
pub mod error;
pub mod pool;
pub mod preset;
pub mod query;
pub mod sample;
pub mod select;

pub use attr::{AttrCandidates, AttrFilter, AttrName, AttrRef};
pub use chain::{chain, ChainPolicy, CONTINUE_PROBABILITY};
pub use clause::{Clause, ClauseChain, ClauseFamily, PatternKind, Relation, WithRef};
pub use config::{GeneratorConfig, PoolSizes, WeightConfig};
pub use declaration::{parse_declaration_line, DeclaredSynonyms};
pub use entity::{EntityKind, Literals, Operand, Synonym};
pub use error::{GenError, Result, WriteError};
pub use pool::IdentifierPool;
pub use preset::{FamilyPreset, Preset, SelectPreset};
pub use query::{write_queries, Query, QueryGenerator};
pub use select::{Elem, SelectResult};
