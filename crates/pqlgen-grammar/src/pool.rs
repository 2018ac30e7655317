//! Synthetic identifier pools, one per entity kind.

use rand::Rng;
use std::collections::HashSet;

use crate::config::PoolSizes;
use crate::entity::EntityKind;
use crate::error::{GenError, Result};

const NAME_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Bare synthetic names per kind. Prefixes are attached when a name is
/// rendered as a synonym.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentifierPool {
    names: [Vec<String>; 11],
}

impl IdentifierPool {
    /// Build every kind's pool. Collisions are resampled until each pool
    /// holds its requested number of distinct names.
    pub fn generate<R: Rng + ?Sized>(
        rng: &mut R,
        sizes: &PoolSizes,
        iden_len: usize,
    ) -> Result<Self> {
        if iden_len == 0 {
            return Err(GenError::InvalidSetting {
                name: "iden_len",
                message: "must be >= 1".to_string(),
            });
        }

        let mut pool = IdentifierPool::default();
        for kind in EntityKind::ALL {
            let count = sizes.count_for(kind);
            if count > name_capacity(iden_len) {
                return Err(GenError::InvalidSetting {
                    name: "iden_len",
                    message: format!(
                        "{count} distinct {kind} names do not fit in identifiers of length <= {iden_len}"
                    ),
                });
            }
            pool.names[kind.index()] = generate_names(rng, count, iden_len);
            tracing::debug!(kind = %kind, count, "generated identifier pool");
        }
        Ok(pool)
    }

    /// Build a pool from explicit names, e.g. for tests or replaying a run.
    pub fn from_names(entries: impl IntoIterator<Item = (EntityKind, Vec<String>)>) -> Self {
        let mut pool = IdentifierPool::default();
        for (kind, names) in entries {
            let mut seen = HashSet::new();
            pool.names[kind.index()] = names
                .into_iter()
                .filter(|name| seen.insert(name.clone()))
                .collect();
        }
        pool
    }

    pub fn names(&self, kind: EntityKind) -> &[String] {
        &self.names[kind.index()]
    }

    pub fn len(&self, kind: EntityKind) -> usize {
        self.names[kind.index()].len()
    }
}

fn generate_names<R: Rng + ?Sized>(rng: &mut R, count: usize, iden_len: usize) -> Vec<String> {
    let mut seen = HashSet::with_capacity(count);
    let mut names = Vec::with_capacity(count);
    while names.len() < count {
        let len = rng.gen_range(1..=iden_len);
        let name: String = (0..len)
            .map(|_| NAME_ALPHABET[rng.gen_range(0..NAME_ALPHABET.len())] as char)
            .collect();
        if seen.insert(name.clone()) {
            names.push(name);
        }
    }
    names
}

/// Number of distinct names of length `1..=iden_len`, saturating.
fn name_capacity(iden_len: usize) -> usize {
    let base = NAME_ALPHABET.len();
    let mut total: usize = 0;
    let mut per_len: usize = 1;
    for _ in 0..iden_len {
        per_len = per_len.saturating_mul(base);
        total = total.saturating_add(per_len);
        if total == usize::MAX {
            break;
        }
    }
    total
}
