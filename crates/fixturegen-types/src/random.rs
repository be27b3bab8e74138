//! UUID sources for generated literals.
//!
//! Each generation pass owns one source. UUIDs baked into fixture text are
//! drawn once per field per pass, so a literal is stable within a pass and
//! only changes between passes (unless the run is seeded).

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use uuid::Uuid;

/// Supplier of UUIDs for one generation pass.
pub trait UuidSource: Send {
    /// Draw the next UUID.
    fn next_uuid(&mut self) -> Uuid;
}

/// Fresh random v4 UUIDs.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomUuids;

impl UuidSource for RandomUuids {
    fn next_uuid(&mut self) -> Uuid {
        Uuid::new_v4()
    }
}

/// Reproducible v4 UUIDs from a seeded generator.
#[derive(Debug, Clone)]
pub struct SeededUuids {
    rng: StdRng,
}

impl SeededUuids {
    /// Seed directly from a run seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seed for one pass: the run seed mixed with the target type name, so
    /// passes are independent of scheduling order.
    pub fn for_pass(seed: u64, type_name: &str) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&seed.to_le_bytes());
        hasher.update(type_name.as_bytes());
        Self {
            rng: StdRng::from_seed(*hasher.finalize().as_bytes()),
        }
    }
}

impl UuidSource for SeededUuids {
    fn next_uuid(&mut self) -> Uuid {
        let mut bytes = [0u8; 16];
        self.rng.fill_bytes(&mut bytes);
        uuid::Builder::from_random_bytes(bytes).into_uuid()
    }
}

/// The source a pass for `type_name` should use.
pub fn uuid_source(seed: Option<u64>, type_name: &str) -> Box<dyn UuidSource> {
    match seed {
        Some(seed) => Box::new(SeededUuids::for_pass(seed, type_name)),
        None => Box::new(RandomUuids),
    }
}
