//! Randomized test case generation.

use rand::Rng;
use sortcheck_schema::{Direction, Field, SortKey, TestCase, DELIMITERS};

use crate::config::GenerationError;

/// Default upper bound on sort keys per test case.
pub const DEFAULT_MAX_KEYS: usize = 2;

/// How repeated fields among the random key draws are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicateKeyPolicy {
    /// Redraw the whole key list until no field repeats.
    Reject,
    /// Draw each key from the fields not yet chosen.
    #[default]
    Dedupe,
    /// Keep repeated fields and pass them to the program under test.
    Allow,
}

/// Generate `count` independent test cases.
pub fn generate_cases<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    max_keys: usize,
    policy: DuplicateKeyPolicy,
) -> Result<Vec<TestCase>, GenerationError> {
    (0..count)
        .map(|_| generate_case(rng, max_keys, policy))
        .collect()
}

/// Generate a single test case with between 1 and `max_keys` sort keys.
///
/// Without `Allow`, `max_keys` is capped at the number of fields.
pub fn generate_case<R: Rng + ?Sized>(
    rng: &mut R,
    max_keys: usize,
    policy: DuplicateKeyPolicy,
) -> Result<TestCase, GenerationError> {
    if max_keys == 0 {
        return Err(GenerationError::InvalidMaxKeys(max_keys));
    }

    let upper = match policy {
        DuplicateKeyPolicy::Allow => max_keys,
        _ => max_keys.min(Field::ALL.len()),
    };
    let key_count = rng.gen_range(1..=upper);

    let sort_keys = match policy {
        DuplicateKeyPolicy::Dedupe => distinct_keys(rng, key_count),
        DuplicateKeyPolicy::Reject => loop {
            let keys = naive_keys(rng, key_count);
            if !has_repeat(&keys) {
                break keys;
            }
        },
        DuplicateKeyPolicy::Allow => naive_keys(rng, key_count),
    };

    let delimiter = DELIMITERS[rng.gen_range(0..DELIMITERS.len())];
    let has_header = rng.gen_bool(0.5);

    let case = match policy {
        DuplicateKeyPolicy::Allow => TestCase::new_unchecked(sort_keys, delimiter, has_header)?,
        _ => TestCase::new(sort_keys, delimiter, has_header)?,
    };
    Ok(case)
}

fn random_direction<R: Rng + ?Sized>(rng: &mut R) -> Direction {
    Direction::ALL[rng.gen_range(0..Direction::ALL.len())]
}

fn naive_keys<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<SortKey> {
    (0..count)
        .map(|_| {
            let field = Field::ALL[rng.gen_range(0..Field::ALL.len())];
            SortKey::new(field, random_direction(rng))
        })
        .collect()
}

fn distinct_keys<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<SortKey> {
    let mut remaining = Field::ALL.to_vec();
    (0..count)
        .map(|_| {
            let field = remaining.swap_remove(rng.gen_range(0..remaining.len()));
            SortKey::new(field, random_direction(rng))
        })
        .collect()
}

fn has_repeat(keys: &[SortKey]) -> bool {
    keys.iter()
        .enumerate()
        .any(|(i, key)| keys[..i].iter().any(|k| k.field == key.field))
}
