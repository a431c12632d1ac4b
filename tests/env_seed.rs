//! Initial seeding of the process-wide generator from `NDARRAY_SEED`.
//! The variable is read once, on the first draw, so this binary holds a
//! single test that sets it before anything touches the generator.

use rand::rngs::StdRng;
use rand::SeedableRng;
use strided_ndarray::{random, random_with, SEED_ENV_VAR};

#[test]
fn test_seed_env_var_sets_initial_state() {
    let _ = env_logger::builder().is_test(true).try_init();
    std::env::set_var(SEED_ENV_VAR, "123");

    let from_global = random(&[4], 0.0, 1.0).unwrap();
    let expected = random_with(&mut StdRng::seed_from_u64(123), &[4], 0.0, 1.0).unwrap();
    assert_eq!(from_global, expected);
}
