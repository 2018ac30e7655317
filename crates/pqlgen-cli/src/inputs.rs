//! Literal identifier files (`--proc`, `--var`, `--const`).

use anyhow::{anyhow, Context, Result};
use pqlgen_grammar::Literals;
use std::fs;
use std::path::Path;

/// Split every line of `text` on `delim`, trimming entries and dropping empty
/// ones.
pub(crate) fn split_entries(text: &str, delim: &str) -> Vec<String> {
    text.lines()
        .flat_map(|line| {
            if delim.is_empty() {
                vec![line]
            } else {
                line.split(delim).collect()
            }
        })
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

fn read_entries(path: Option<&Path>, delim: &str, what: &str) -> Result<Vec<String>> {
    let Some(path) = path else {
        tracing::debug!(what, "no identifier file provided");
        return Ok(Vec::new());
    };
    if !path.exists() {
        return Err(anyhow!(
            "{what} identifier file does not exist: {}",
            path.display()
        ));
    }
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {what} identifiers from {}", path.display()))?;
    let entries = split_entries(&text, delim);
    tracing::debug!(what, path = %path.display(), count = entries.len(), "parsed identifier file");
    Ok(entries)
}

/// Load all literal identifier files. Runs before any generation so a
/// missing file aborts the run with nothing written.
pub(crate) fn load_literals(
    procedures: Option<&Path>,
    variables: Option<&Path>,
    constants: Option<&Path>,
    delim: &str,
) -> Result<Literals> {
    Ok(Literals {
        procedures: read_entries(procedures, delim, "procedure")?,
        variables: read_entries(variables, delim, "variable")?,
        constants: read_entries(constants, delim, "constant")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_delimiter_and_trims() {
        assert_eq!(
            split_entries("main  helper\nrun\n\n", " "),
            vec!["main", "helper", "run"]
        );
        assert_eq!(split_entries("x, y,z\r\n", ","), vec!["x", "y", "z"]);
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = load_literals(Some(Path::new("/definitely/not/here.txt")), None, None, " ")
            .unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.txt"));
    }

    #[test]
    fn absent_paths_give_no_literals() {
        assert!(load_literals(None, None, None, " ").unwrap().is_empty());
    }
}
