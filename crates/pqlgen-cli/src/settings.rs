//! Configuration flags shared by `generate` and `config`.
//!
//! Resolution order: built-in defaults, then the `--config` TOML file, then
//! any flag given on the command line, then the preset.

use anyhow::{anyhow, Context, Result};
use clap::Args;
use pqlgen_grammar::{EntityKind, GeneratorConfig, Preset};
use std::fs;
use std::path::PathBuf;

#[derive(Args, Debug, Clone, Default)]
pub(crate) struct ConfigArgs {
    /// TOML file with generator settings; flags override its values
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Queries per output file [default: 50]
    #[arg(long)]
    pub num_queries: Option<usize>,
    /// Maximum clause chains per query [default: 10]
    #[arg(long)]
    pub len_queries: Option<usize>,

    /// Pool size for every kind without its own count [default: 10]
    #[arg(long)]
    pub num_syn: Option<usize>,
    /// Procedure pool size (negative: use --num-syn)
    #[arg(long, allow_negative_numbers = true)]
    pub num_proc: Option<i64>,
    /// prog_line pool size (negative: use --num-syn)
    #[arg(long, allow_negative_numbers = true)]
    pub num_progl: Option<i64>,
    /// stmt pool size (negative: use --num-syn)
    #[arg(long, allow_negative_numbers = true)]
    pub num_stmt: Option<i64>,
    /// read pool size (negative: use --num-syn)
    #[arg(long, allow_negative_numbers = true)]
    pub num_read: Option<i64>,
    /// print pool size (negative: use --num-syn)
    #[arg(long, allow_negative_numbers = true)]
    pub num_print: Option<i64>,
    /// call pool size (negative: use --num-syn)
    #[arg(long, allow_negative_numbers = true)]
    pub num_call: Option<i64>,
    /// while pool size (negative: use --num-syn)
    #[arg(long, allow_negative_numbers = true)]
    pub num_while: Option<i64>,
    /// if pool size (negative: use --num-syn)
    #[arg(long, allow_negative_numbers = true)]
    pub num_if: Option<i64>,
    /// assign pool size (negative: use --num-syn)
    #[arg(long, allow_negative_numbers = true)]
    pub num_assign: Option<i64>,
    /// variable pool size (negative: use --num-syn)
    #[arg(long, allow_negative_numbers = true)]
    pub num_var: Option<i64>,
    /// constant pool size (negative: use --num-syn)
    #[arg(long, allow_negative_numbers = true)]
    pub num_const: Option<i64>,

    /// Weights of tuple vs BOOLEAN results [default: 4 1]
    #[arg(long, num_args = 1.., value_name = "W")]
    pub weight_result: Option<Vec<u32>>,
    /// Weights of a single element vs a `<...>` tuple [default: 1 3]
    #[arg(long, num_args = 1.., value_name = "W")]
    pub weight_tuple: Option<Vec<u32>>,
    /// Weights of synonym vs attribute reference elements [default: 1 1]
    #[arg(long, num_args = 1.., value_name = "W")]
    pub weight_elem: Option<Vec<u32>>,
    /// Weights of such that, with and pattern clauses [default: 1 1 1]
    #[arg(long, num_args = 1.., value_name = "W")]
    pub weight_select: Option<Vec<u32>>,
    /// Weights of IDEN, attribute reference and synonym with-refs [default: 1 1 1]
    #[arg(long, num_args = 1.., value_name = "W")]
    pub weight_with: Option<Vec<u32>>,
    /// Weights of procName, varName, value and stmt# [default: 1 1 1 1]
    #[arg(long, num_args = 1.., value_name = "W")]
    pub weight_attr: Option<Vec<u32>>,
    /// Weights of Modifies, Uses, Calls, Parent, Follows, Next, Affects [default: 1 1 1 1 1 1 1]
    #[arg(long, num_args = 1.., value_name = "W")]
    pub weight_suchthat: Option<Vec<u32>>,
    /// Weights of plain vs transitive relations [default: 1 1]
    #[arg(long, num_args = 1.., value_name = "W")]
    pub weight_transitive: Option<Vec<u32>>,
    /// Weights of assign, if and while patterns [default: 1 1 1]
    #[arg(long, num_args = 1.., value_name = "W")]
    pub weight_pattern: Option<Vec<u32>>,

    /// Maximum synthetic identifier length [default: 10]
    #[arg(long)]
    pub iden_len: Option<usize>,
    /// Maximum `and` continuations per clause chain [default: 5]
    #[arg(long)]
    pub and_limit: Option<usize>,
    /// Continuation probability multiplier after each `and` [default: 1.0]
    #[arg(long)]
    pub and_decay: Option<f64>,
    /// Maximum elements in a select tuple [default: 5]
    #[arg(long)]
    pub select_limit: Option<usize>,
    /// Timeout written after every query [default: 5000]
    #[arg(long)]
    pub timing: Option<String>,
    /// Allow procedure names on the left-hand side of patterns
    #[arg(long)]
    pub allow_error: bool,
    /// Use prog_line synonyms as statement references in such-that clauses
    #[arg(long)]
    pub line_refs: bool,
    /// Comment on every query header line [default: NIL]
    #[arg(long, num_args = 1..)]
    pub comment: Option<Vec<String>>,

    /// Preset as `<select 0-3> <family 0-16>`; select 0 disables presets
    #[arg(long, num_args = 2, value_names = ["SELECT", "FAMILY"])]
    pub preset: Option<Vec<u8>>,
}

impl ConfigArgs {
    fn pool_overrides(&self) -> [(EntityKind, Option<i64>); 11] {
        [
            (EntityKind::Procedure, self.num_proc),
            (EntityKind::ProgLine, self.num_progl),
            (EntityKind::Stmt, self.num_stmt),
            (EntityKind::Read, self.num_read),
            (EntityKind::Print, self.num_print),
            (EntityKind::Call, self.num_call),
            (EntityKind::While, self.num_while),
            (EntityKind::If, self.num_if),
            (EntityKind::Assign, self.num_assign),
            (EntityKind::Variable, self.num_var),
            (EntityKind::Constant, self.num_const),
        ]
    }

    pub(crate) fn preset(&self) -> Result<Preset> {
        match self.preset.as_deref() {
            None => Ok(Preset::default()),
            Some([select, family]) => Ok(Preset::from_indices(*select, *family)?),
            Some(other) => Err(anyhow!(
                "--preset expects two values, got {}",
                other.len()
            )),
        }
    }
}

fn load_base(args: &ConfigArgs) -> Result<GeneratorConfig> {
    let Some(path) = &args.config else {
        return Ok(GeneratorConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let config = GeneratorConfig::from_toml_str(&text)
        .with_context(|| format!("invalid config file {}", path.display()))?;
    tracing::debug!(path = %path.display(), "loaded config file");
    Ok(config)
}

/// Build the final, validated configuration for a run.
pub(crate) fn resolve(args: &ConfigArgs) -> Result<GeneratorConfig> {
    let mut config = load_base(args)?;

    fn set<T: Clone>(slot: &mut T, value: &Option<T>) {
        if let Some(value) = value {
            *slot = value.clone();
        }
    }

    set(&mut config.num_queries, &args.num_queries);
    set(&mut config.len_queries, &args.len_queries);
    set(&mut config.pools.default, &args.num_syn);
    for (kind, count) in args.pool_overrides() {
        if count.is_some() {
            config.pools.set_override(kind, count);
        }
    }

    let weights = &mut config.weights;
    set(&mut weights.result, &args.weight_result);
    set(&mut weights.tuple, &args.weight_tuple);
    set(&mut weights.elem, &args.weight_elem);
    set(&mut weights.clause_family, &args.weight_select);
    set(&mut weights.with_ref, &args.weight_with);
    set(&mut weights.attr_name, &args.weight_attr);
    set(&mut weights.relation, &args.weight_suchthat);
    set(&mut weights.transitive, &args.weight_transitive);
    set(&mut weights.pattern, &args.weight_pattern);

    set(&mut config.iden_len, &args.iden_len);
    set(&mut config.and_limit, &args.and_limit);
    set(&mut config.and_decay, &args.and_decay);
    set(&mut config.select_limit, &args.select_limit);
    set(&mut config.timeout, &args.timing);
    if args.allow_error {
        config.allow_error = true;
    }
    if args.line_refs {
        config.line_refs = true;
    }
    if let Some(words) = &args.comment {
        config.comment = words.join(" ");
    }

    let config = args.preset()?.apply(config);
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn flags_override_defaults() {
        let args = ConfigArgs {
            num_queries: Some(3),
            num_const: Some(0),
            comment: Some(vec!["edge".into(), "cases".into()]),
            weight_result: Some(vec![0, 1]),
            ..ConfigArgs::default()
        };
        let config = resolve(&args).unwrap();
        assert_eq!(config.num_queries, 3);
        assert_eq!(config.pools.count_for(EntityKind::Constant), 0);
        assert_eq!(config.pools.count_for(EntityKind::Stmt), 10);
        assert_eq!(config.comment, "edge cases");
        assert_eq!(config.weights.result, vec![0, 1]);
    }

    #[test]
    fn weight_sum_past_u32_is_reported() {
        let args = ConfigArgs {
            weight_result: Some(vec![u32::MAX, 1]),
            ..ConfigArgs::default()
        };
        let err = resolve(&args).unwrap_err();
        assert!(err.to_string().contains("result"), "{err}");
    }

    #[test]
    fn line_refs_flag_reaches_the_config() {
        assert!(!resolve(&ConfigArgs::default()).unwrap().line_refs);
        let args = ConfigArgs {
            line_refs: true,
            ..ConfigArgs::default()
        };
        assert!(resolve(&args).unwrap().line_refs);
    }

    #[test]
    fn wrong_arity_is_reported() {
        let args = ConfigArgs {
            weight_suchthat: Some(vec![1, 1, 1]),
            ..ConfigArgs::default()
        };
        let err = resolve(&args).unwrap_err();
        assert!(err.to_string().contains("relation"), "{err}");
    }

    #[test]
    fn preset_wins_over_flags() {
        let args = ConfigArgs {
            num_queries: Some(3),
            preset: Some(vec![1, 8]),
            ..ConfigArgs::default()
        };
        let config = resolve(&args).unwrap();
        assert_eq!(config.num_queries, 20);
        assert_eq!(config.comment, "BOOLEAN SELECT - ModifiesP/S");
    }

    #[test]
    fn out_of_range_preset_fails() {
        let args = ConfigArgs {
            preset: Some(vec![4, 0]),
            ..ConfigArgs::default()
        };
        assert!(resolve(&args).is_err());
    }

    #[test]
    fn toml_file_sits_between_defaults_and_flags() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "num_queries = 7\nlen_queries = 1\n[pools]\ndefault = 3").unwrap();
        let args = ConfigArgs {
            config: Some(file.path().to_path_buf()),
            len_queries: Some(4),
            ..ConfigArgs::default()
        };
        let config = resolve(&args).unwrap();
        assert_eq!(config.num_queries, 7);
        assert_eq!(config.len_queries, 4);
        assert_eq!(config.pools.default, 3);
    }
}
