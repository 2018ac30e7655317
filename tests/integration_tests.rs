//! Integration tests for complete generation runs
//!
//! These tests drive the grammar crate the way the CLI does:
//! - preset resolution → pool building → query rendering
//! - seeded runs written to files, compared byte for byte
//!
//! Run with: cargo test --test integration_tests

use pqlgen_grammar::{
    write_queries, Clause, GeneratorConfig, IdentifierPool, Literals, Preset, QueryGenerator,
    Relation, SelectResult,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;
use std::io::Write;
use tempfile::tempdir;

fn preset_config(select: u8, family: u8) -> GeneratorConfig {
    Preset::from_indices(select, family)
        .expect("valid preset")
        .apply(GeneratorConfig::default())
}

// ============================================================================
// Presets
// ============================================================================

#[test]
fn test_boolean_modifies_preset() {
    let config = preset_config(1, 8);
    let mut rng = StdRng::seed_from_u64(42);
    let pool = IdentifierPool::generate(&mut rng, &config.pools, config.iden_len).unwrap();
    let literals = Literals::default();
    let generator = QueryGenerator::new(&config, &pool, &literals).unwrap();

    let mut clause_count = 0;
    for index in 1..=config.num_queries {
        let query = generator.generate(&mut rng, index).unwrap();
        assert_eq!(query.select, SelectResult::Boolean);
        assert!(query.select_line().starts_with("Select BOOLEAN"));
        assert!(query.comment.ends_with("ModifiesP/S"));
        for chain in &query.clauses {
            for clause in &chain.clauses {
                clause_count += 1;
                assert!(
                    matches!(
                        clause,
                        Clause::SuchThat {
                            relation: Relation::Modifies,
                            transitive: false,
                            ..
                        }
                    ),
                    "unexpected clause {clause}"
                );
                assert!(clause.to_string().starts_with("Modifies("));
            }
        }
    }
    assert!(clause_count > 0);
}

#[test]
fn test_single_follows_preset() {
    let config = preset_config(3, 1);
    let mut rng = StdRng::seed_from_u64(7);
    let pool = IdentifierPool::generate(&mut rng, &config.pools, config.iden_len).unwrap();
    let literals = Literals::default();
    let generator = QueryGenerator::new(&config, &pool, &literals).unwrap();

    for index in 1..=config.num_queries {
        let query = generator.generate(&mut rng, index).unwrap();
        assert!(matches!(query.select, SelectResult::Single(_)));
        let line = query.select_line();
        assert!(!line.contains('<'), "{line}");
        assert!(!line.contains("BOOLEAN"), "{line}");
        assert!(!line.contains('*'), "{line}");
        for chain in &query.clauses {
            assert_eq!(chain.family.keyword(), "such that");
            for clause in &chain.clauses {
                assert!(clause.to_string().starts_with("Follows("), "{clause}");
            }
        }
    }
}

#[test]
fn test_pattern_if_preset_fails_fast_without_ifs() {
    let mut config = preset_config(1, 14);
    config
        .pools
        .set_override(pqlgen_grammar::EntityKind::If, Some(0));
    let mut rng = StdRng::seed_from_u64(3);
    let pool = IdentifierPool::generate(&mut rng, &config.pools, config.iden_len).unwrap();
    let literals = Literals::default();
    let generator = QueryGenerator::new(&config, &pool, &literals).unwrap();

    let failures = (1..=config.num_queries)
        .filter_map(|index| generator.generate(&mut rng, index).err())
        .collect::<Vec<_>>();
    assert!(!failures.is_empty());
    assert!(failures.iter().all(|err| err.to_string().contains("pattern-if")));
}

// ============================================================================
// Determinism and files
// ============================================================================

fn run_to_file(path: &std::path::Path, seed: u64, config: &GeneratorConfig) -> usize {
    let mut rng = StdRng::seed_from_u64(seed);
    let pool = IdentifierPool::generate(&mut rng, &config.pools, config.iden_len).unwrap();
    let literals = Literals {
        procedures: vec!["main".into()],
        variables: vec!["x".into(), "count".into()],
        constants: vec!["0".into(), "42".into()],
    };
    let generator = QueryGenerator::new(config, &pool, &literals).unwrap();
    let mut file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .unwrap();
    let written = write_queries(&mut file, &mut rng, &generator).unwrap();
    file.flush().unwrap();
    written
}

#[test]
fn test_seeded_runs_are_byte_identical() {
    let dir = tempdir().unwrap();
    let config = GeneratorConfig {
        num_queries: 25,
        iden_len: 4,
        ..GeneratorConfig::default()
    };
    let a = dir.path().join("a.txt");
    let b = dir.path().join("b.txt");
    assert_eq!(run_to_file(&a, 1234, &config), 25);
    assert_eq!(run_to_file(&b, 1234, &config), 25);
    let a = fs::read(a).unwrap();
    assert!(!a.is_empty());
    assert_eq!(a, fs::read(b).unwrap());
}

#[test]
fn test_every_query_has_five_lines() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("queries_1.txt");
    let config = preset_config(2, 0);
    run_to_file(&path, 99, &config);

    let text = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), config.num_queries * 5);
    for (i, query) in lines.chunks(5).enumerate() {
        assert_eq!(query[0], format!("{} - tuple SELECT - iter2 queries", i + 1));
        assert!(query[2].starts_with("Select <"), "{}", query[2]);
        assert!(!query[2].contains("Parent"), "{}", query[2]);
        assert!(!query[2].contains("Follows"), "{}", query[2]);
        assert_eq!(query[3], "");
        assert_eq!(query[4], config.timeout);
    }
}
