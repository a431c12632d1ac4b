//! Process-wide random number generator used by [`random`](crate::random()).
//!
//! The generator is created lazily on first use. If the `NDARRAY_SEED`
//! environment variable holds a `u64` it is used as the seed, otherwise the
//! generator is seeded from OS entropy. [`seed`] and [`reseed_from_entropy`]
//! reset it at any time; every draw goes through [`with_global_rng`], which
//! serializes access across threads.
//!
//! Code that needs reproducibility without touching shared state should pass
//! its own generator to [`random_with`](crate::random_with) instead.

use std::sync::{Mutex, OnceLock, PoisonError};

use log::{debug, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::SEED_ENV_VAR;

static GLOBAL_RNG: OnceLock<Mutex<StdRng>> = OnceLock::new();

fn global_rng() -> &'static Mutex<StdRng> {
    GLOBAL_RNG.get_or_init(|| Mutex::new(initial_rng()))
}

fn initial_rng() -> StdRng {
    match std::env::var(SEED_ENV_VAR) {
        Ok(value) => match value.trim().parse::<u64>() {
            Ok(seed) => {
                debug!("global rng seeded from {SEED_ENV_VAR}={seed}");
                StdRng::seed_from_u64(seed)
            }
            Err(_) => {
                warn!("ignoring {SEED_ENV_VAR}={value:?}: not a u64, seeding from entropy");
                StdRng::from_entropy()
            }
        },
        Err(_) => StdRng::from_entropy(),
    }
}

/// Run `f` with exclusive access to the process-wide generator.
///
/// A lock poisoned by a panicking caller is recovered; the generator state
/// itself cannot be left inconsistent by a panic.
pub fn with_global_rng<T>(f: impl FnOnce(&mut StdRng) -> T) -> T {
    let mut guard = global_rng()
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    f(&mut guard)
}

/// Reset the process-wide generator to a deterministic state.
pub fn seed(seed: u64) {
    debug!("global rng reseeded with {seed}");
    with_global_rng(|rng| *rng = StdRng::seed_from_u64(seed));
}

/// Reset the process-wide generator from OS entropy.
pub fn reseed_from_entropy() {
    debug!("global rng reseeded from entropy");
    with_global_rng(|rng| *rng = StdRng::from_entropy());
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_reseeding_reproduces_sequence() {
        // Both draws happen under one lock so other tests cannot interleave.
        let (first, second) = with_global_rng(|rng| {
            *rng = StdRng::seed_from_u64(7);
            let first: Vec<u64> = (0..4).map(|_| rng.gen()).collect();
            *rng = StdRng::seed_from_u64(7);
            let second: Vec<u64> = (0..4).map(|_| rng.gen()).collect();
            (first, second)
        });
        assert_eq!(first, second);
    }

    #[test]
    fn test_recovers_from_poisoned_lock() {
        let result = std::thread::spawn(|| {
            with_global_rng(|_| panic!("poison the lock"));
        })
        .join();
        assert!(result.is_err());
        let x: f64 = with_global_rng(|rng| rng.gen());
        assert!((0.0..1.0).contains(&x));
    }
}
