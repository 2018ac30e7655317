//! Query assembly: declarations, select result, clause chains, trailer.

use rand::Rng;
use std::fmt;
use std::io::Write;

use crate::attr::AttrCandidates;
use crate::chain::{chain, ChainPolicy};
use crate::clause::{
    pattern, such_that, with, ClauseChain, ClauseFamily, PatternCandidates, SuchThatCandidates,
    WithCandidates,
};
use crate::config::GeneratorConfig;
use crate::declaration::DeclaredSynonyms;
use crate::entity::Literals;
use crate::error::{Result, WriteError};
use crate::pool::IdentifierPool;
use crate::sample::pick_weighted;
use crate::select::{self, SelectResult};

/// One generated query, rendered by its `Display` impl.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub index: usize,
    pub comment: String,
    pub declarations: DeclaredSynonyms,
    pub select: SelectResult,
    pub clauses: Vec<ClauseChain>,
    pub timeout: String,
}

impl Query {
    /// The `Select ...` line without its trailing newline.
    pub fn select_line(&self) -> String {
        let mut line = format!("Select {}", self.select);
        for chain in &self.clauses {
            line.push(' ');
            line.push_str(&chain.to_string());
        }
        line
    }
}

/// Five lines: header, declarations, select, an empty expected-result line
/// and the timeout.
impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} - {}", self.index, self.comment)?;
        writeln!(f, "{}", self.declarations)?;
        writeln!(f, "{}", self.select_line())?;
        writeln!(f)?;
        writeln!(f, "{}", self.timeout)
    }
}

/// Generates queries against one identifier pool and configuration.
#[derive(Debug)]
pub struct QueryGenerator<'a> {
    config: &'a GeneratorConfig,
    pool: &'a IdentifierPool,
    literals: &'a Literals,
}

impl<'a> QueryGenerator<'a> {
    pub fn new(
        config: &'a GeneratorConfig,
        pool: &'a IdentifierPool,
        literals: &'a Literals,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            pool,
            literals,
        })
    }

    pub fn config(&self) -> &GeneratorConfig {
        self.config
    }

    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R, index: usize) -> Result<Query> {
        let config = self.config;
        let weights = &config.weights;

        let declarations = DeclaredSynonyms::sample(rng, self.pool);
        let references = declarations.reference_list();
        let attrs = AttrCandidates::from_declared(&declarations);
        let select = select::compose(rng, weights, config.select_limit, &references, &attrs)?;

        let such_that_candidates =
            SuchThatCandidates::build(&declarations, self.literals, config.line_refs);
        let with_candidates = WithCandidates::build(&declarations, self.literals);
        let pattern_candidates =
            PatternCandidates::build(&declarations, self.literals, config.allow_error);
        let policy = ChainPolicy::new(config.and_limit, config.and_decay);

        let families: Vec<(ClauseFamily, u32)> = ClauseFamily::ALL
            .into_iter()
            .zip(weights.clause_family.iter().copied())
            .collect();
        let len = rng.gen_range(0..=config.len_queries);
        tracing::debug!(index, len, "generating query");

        let mut clauses = Vec::with_capacity(len);
        for _ in 0..len {
            let family = pick_weighted(rng, "clause_family", &families)?;
            tracing::trace!(family = family.keyword(), "picked clause family");
            let chained = match family {
                ClauseFamily::SuchThat => chain(rng, policy, |rng| {
                    such_that::generate(rng, &weights.relation, &weights.transitive, &such_that_candidates)
                })?,
                ClauseFamily::With => chain(rng, policy, |rng| {
                    with::generate(rng, &weights.with_ref, &weights.attr_name, &with_candidates)
                })?,
                ClauseFamily::Pattern => chain(rng, policy, |rng| {
                    pattern::generate(rng, &weights.pattern, &pattern_candidates)
                })?,
            };
            clauses.push(ClauseChain {
                family,
                clauses: chained,
            });
        }

        Ok(Query {
            index,
            comment: config.comment.clone(),
            declarations,
            select,
            clauses,
            timeout: config.timeout.clone(),
        })
    }
}

/// Generate `config.num_queries` queries, numbered from 1, into `out`.
///
/// Stops at the first failure; queries already written stay in `out`.
pub fn write_queries<W: Write, R: Rng + ?Sized>(
    out: &mut W,
    rng: &mut R,
    generator: &QueryGenerator<'_>,
) -> std::result::Result<usize, WriteError> {
    let mut written = 0;
    for index in 1..=generator.config().num_queries {
        let query = generator
            .generate(rng, index)
            .map_err(|source| WriteError::Generate { index, source })?;
        write!(out, "{query}")?;
        written += 1;
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PoolSizes;
    use crate::entity::EntityKind;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn small_config() -> GeneratorConfig {
        GeneratorConfig {
            pools: PoolSizes {
                default: 4,
                ..PoolSizes::default()
            },
            iden_len: 3,
            num_queries: 5,
            ..GeneratorConfig::default()
        }
    }

    #[test]
    fn rendered_query_has_five_lines() {
        let config = small_config();
        let mut rng = StdRng::seed_from_u64(42);
        let pool = IdentifierPool::generate(&mut rng, &config.pools, config.iden_len).unwrap();
        let literals = Literals::default();
        let generator = QueryGenerator::new(&config, &pool, &literals).unwrap();
        let query = generator.generate(&mut rng, 7).unwrap();
        let text = query.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5, "{text}");
        assert_eq!(lines[0], "7 - NIL");
        assert!(lines[1].ends_with("; "));
        assert!(lines[2].starts_with("Select "));
        assert_eq!(lines[3], "");
        assert_eq!(lines[4], "5000");
    }

    #[test]
    fn clause_count_stays_within_len_queries() {
        let config = GeneratorConfig {
            len_queries: 3,
            ..small_config()
        };
        let mut rng = StdRng::seed_from_u64(1);
        let pool = IdentifierPool::generate(&mut rng, &config.pools, config.iden_len).unwrap();
        let literals = Literals::default();
        let generator = QueryGenerator::new(&config, &pool, &literals).unwrap();
        for index in 1..=200 {
            let query = generator.generate(&mut rng, index).unwrap();
            assert!(query.clauses.len() <= 3);
            for chain in &query.clauses {
                assert!(chain.clauses.len() <= config.and_limit + 1);
                assert!(chain.clauses.iter().all(|c| c.family() == chain.family));
            }
        }
    }

    #[test]
    fn write_queries_is_deterministic() {
        let config = small_config();
        let literals = Literals {
            variables: vec!["x".into()],
            ..Literals::default()
        };
        let run = || {
            let mut rng = StdRng::seed_from_u64(2024);
            let pool = IdentifierPool::generate(&mut rng, &config.pools, config.iden_len).unwrap();
            let generator = QueryGenerator::new(&config, &pool, &literals).unwrap();
            let mut out = Vec::new();
            let written = write_queries(&mut out, &mut rng, &generator).unwrap();
            assert_eq!(written, 5);
            String::from_utf8(out).unwrap()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn zero_queries_writes_nothing() {
        let config = GeneratorConfig {
            num_queries: 0,
            ..small_config()
        };
        let mut rng = StdRng::seed_from_u64(0);
        let pool = IdentifierPool::generate(&mut rng, &config.pools, config.iden_len).unwrap();
        let literals = Literals::default();
        let generator = QueryGenerator::new(&config, &pool, &literals).unwrap();
        let mut out = Vec::new();
        assert_eq!(write_queries(&mut out, &mut rng, &generator).unwrap(), 0);
        assert!(out.is_empty());
    }

    #[test]
    fn generation_failure_is_not_an_io_error() {
        let mut config = small_config();
        config.weights.clause_family = vec![0, 0, 1];
        config.weights.pattern = vec![0, 1, 0];
        config.len_queries = 4;
        config.num_queries = 50;
        config.pools.set_override(EntityKind::If, Some(0));
        let mut rng = StdRng::seed_from_u64(5);
        let pool = IdentifierPool::generate(&mut rng, &config.pools, config.iden_len).unwrap();
        let literals = Literals::default();
        let generator = QueryGenerator::new(&config, &pool, &literals).unwrap();
        let mut out = Vec::new();
        let err = write_queries(&mut out, &mut rng, &generator).unwrap_err();
        assert!(
            matches!(
                err,
                WriteError::Generate {
                    source: crate::error::GenError::EmptyCandidates { .. },
                    ..
                }
            ),
            "{err:?}"
        );
    }

    #[test]
    fn empty_pools_never_appear() {
        let mut config = small_config();
        config.pools.set_override(EntityKind::Constant, Some(0));
        config.pools.set_override(EntityKind::ProgLine, Some(0));
        let mut rng = StdRng::seed_from_u64(77);
        let pool = IdentifierPool::generate(&mut rng, &config.pools, config.iden_len).unwrap();
        let literals = Literals::default();
        let generator = QueryGenerator::new(&config, &pool, &literals).unwrap();
        for index in 1..=200 {
            let query = generator.generate(&mut rng, index).unwrap();
            let text = query.to_string();
            assert!(!text.contains("constant "), "{text}");
            assert!(!text.contains("prog_line "), "{text}");
            assert!(!text.contains(".value"), "{text}");
        }
    }

    #[test]
    fn invalid_config_is_rejected_up_front() {
        let mut config = small_config();
        config.weights.pattern = vec![1];
        let pool = IdentifierPool::default();
        let literals = Literals::default();
        assert!(QueryGenerator::new(&config, &pool, &literals).is_err());
    }
}
