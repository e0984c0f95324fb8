use rand::Rng;

use std::sync::Mutex;

/// A source of uniformly distributed values in `[0, 1)`.
///
/// Sampling only borrows the source immutably, so a sampler can be shared
/// between threads whenever its source is `Sync`.
pub trait RandomSource {
    fn random(&self) -> f64;
}

/// Draws from `rand::thread_rng()`.
///
/// Every thread has its own generator, so this source may be used from
/// any number of threads at once. It cannot be seeded.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn random(&self) -> f64 {
        rand::thread_rng().gen::<f64>()
    }
}

impl<F> RandomSource for F
where
    F: Fn() -> f64,
{
    fn random(&self) -> f64 {
        self()
    }
}

/// Adapts any `rand::Rng`, e.g. a seeded `ChaCha8Rng` for reproducible runs.
///
/// Concurrent callers are serialized on an internal lock, which keeps the
/// sequence well-defined but makes the interleaving across threads arbitrary.
#[derive(Debug)]
pub struct RngSource<R> {
    rng: Mutex<R>,
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        RngSource {
            rng: Mutex::new(rng),
        }
    }

    pub fn into_inner(self) -> R {
        self.rng
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn random(&self) -> f64 {
        // A panic while holding the lock cannot leave the generator half-updated
        let mut rng = self
            .rng
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        rng.gen::<f64>()
    }
}

/// Replays a fixed sequence of values, cycling when exhausted. An empty
/// sequence always yields zero.
///
/// Handy to pin down exactly which face and which point a sample lands on.
#[derive(Debug)]
pub struct Sequence {
    values: Vec<f64>,
    next: Mutex<usize>,
}

impl Sequence {
    pub fn new(values: Vec<f64>) -> Self {
        Sequence {
            values,
            next: Mutex::new(0),
        }
    }
}

impl RandomSource for Sequence {
    fn random(&self) -> f64 {
        let mut next = self
            .next
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[*next % self.values.len()];
        *next += 1;
        value
    }
}
