//! Seeding the process-wide generator. Kept in its own test binary so no
//! other test draws from the generator concurrently.

use strided_ndarray::random::{reseed_from_entropy, seed};
use strided_ndarray::random;

#[test]
fn test_seed_reproduces_global_sequence() {
    let _ = env_logger::builder().is_test(true).try_init();

    seed(2024);
    let a = random(&[3, 3], 0.0, 1.0).unwrap();
    seed(2024);
    let b = random(&[3, 3], 0.0, 1.0).unwrap();
    assert_eq!(a, b);

    reseed_from_entropy();
    let c = random(&[3, 3], 0.0, 1.0).unwrap();
    assert!(c.iter().all(|&x| (0.0..1.0).contains(&x)));
}
