// Seeded train/test split.

use anyhow::Result;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Seed used when the caller doesn't pick one.
pub const DEFAULT_SEED: u64 = 42;

/// Row indices for each side of a split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Shuffle `0..n` with a seeded RNG and hold out `ceil(test_fraction · n)`
/// rows for testing. The same `n`, fraction and seed always give the same
/// split. Both sides are guaranteed non-empty.
pub fn train_test_split(n: usize, test_fraction: f64, seed: u64) -> Result<Split> {
    if n < 2 {
        anyhow::bail!("Need at least 2 rows to split, got {n}");
    }
    if !(test_fraction > 0.0 && test_fraction < 1.0) {
        anyhow::bail!("Test fraction must be between 0 and 1, got {test_fraction}");
    }

    let test_size = ((test_fraction * n as f64).ceil() as usize).clamp(1, n - 1);

    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let train = indices.split_off(test_size);
    Ok(Split {
        train,
        test: indices,
    })
}
