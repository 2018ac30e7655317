//! `and`-chaining for any single-clause generator.

use rand::Rng;

use crate::error::Result;

/// Starting probability of appending one more `and` clause.
pub const CONTINUE_PROBABILITY: f64 = 0.5;

/// Continuation policy for a clause chain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChainPolicy {
    /// Maximum number of clauses appended after the first one.
    pub and_limit: usize,
    /// Factor applied to the continuation probability after every `and`.
    /// `1.0` keeps it at [`CONTINUE_PROBABILITY`].
    pub decay: f64,
}

impl ChainPolicy {
    pub fn new(and_limit: usize, decay: f64) -> Self {
        Self { and_limit, decay }
    }
}

/// Produce one clause, then keep flipping a coin to append more, up to
/// `policy.and_limit` extra clauses.
pub fn chain<T, R, F>(rng: &mut R, policy: ChainPolicy, mut generate: F) -> Result<Vec<T>>
where
    R: Rng + ?Sized,
    F: FnMut(&mut R) -> Result<T>,
{
    let mut clauses = vec![generate(rng)?];
    let mut probability = CONTINUE_PROBABILITY;
    while clauses.len() <= policy.and_limit && rng.gen_bool(probability) {
        clauses.push(generate(rng)?);
        probability = (probability * policy.decay).clamp(0.0, 1.0);
    }
    tracing::trace!(len = clauses.len(), "generated clause chain");
    Ok(clauses)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GenError;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn never_exceeds_the_and_limit() {
        let mut rng = StdRng::seed_from_u64(17);
        for limit in 0..4 {
            let mut longest = 0;
            for _ in 0..500 {
                let clauses = chain(&mut rng, ChainPolicy::new(limit, 1.0), |_| Ok(())).unwrap();
                assert!(!clauses.is_empty());
                assert!(clauses.len() <= limit + 1);
                longest = longest.max(clauses.len());
            }
            assert_eq!(longest, limit + 1, "limit {limit} should be reachable");
        }
    }

    #[test]
    fn zero_decay_stops_after_one_continuation() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            let clauses = chain(&mut rng, ChainPolicy::new(5, 0.0), |_| Ok(1)).unwrap();
            assert!(clauses.len() <= 2);
        }
    }

    #[test]
    fn generator_errors_propagate() {
        let mut rng = StdRng::seed_from_u64(3);
        let err = chain(&mut rng, ChainPolicy::new(5, 1.0), |_| -> Result<()> {
            Err(GenError::EmptyCandidates { what: "pattern-if synonym" })
        })
        .unwrap_err();
        assert_eq!(err, GenError::EmptyCandidates { what: "pattern-if synonym" });
    }
}
