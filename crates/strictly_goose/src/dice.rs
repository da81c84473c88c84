//! The six-sided die, the only source of chance in a game.

use crate::error::ConfigError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{instrument, trace};

/// Lowest face.
pub const MIN_FACE: u8 = 1;
/// Highest face.
pub const MAX_FACE: u8 = 6;

/// Something that produces die faces in `1..=6`.
pub trait Dice {
    /// Rolls once.
    fn roll(&mut self) -> u8;
}

impl<D: Dice + ?Sized> Dice for &mut D {
    fn roll(&mut self) -> u8 {
        (**self).roll()
    }
}

/// Uniform die backed by a seedable generator.
#[derive(Debug, Clone)]
pub struct RandomDice {
    rng: StdRng,
}

impl RandomDice {
    /// A die seeded from OS entropy.
    #[instrument]
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// A reproducible die.
    #[instrument]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seeded when `seed` is given, entropy otherwise.
    pub fn from_seed(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::seeded)
    }
}

impl Dice for RandomDice {
    fn roll(&mut self) -> u8 {
        let face = self.rng.random_range(MIN_FACE..=MAX_FACE);
        trace!(face, "Rolled");
        face
    }
}

/// Replays a fixed sequence of faces, starting over when it runs out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptedDice {
    faces: Vec<u8>,
    next: usize,
}

impl ScriptedDice {
    /// Creates a scripted die, rejecting empty scripts and impossible faces.
    pub fn new(faces: impl Into<Vec<u8>>) -> Result<Self, ConfigError> {
        let faces = faces.into();
        if faces.is_empty() {
            return Err(ConfigError::new("dice script is empty"));
        }
        if let Some(bad) = faces.iter().find(|f| !(MIN_FACE..=MAX_FACE).contains(*f)) {
            return Err(ConfigError::new(format!("dice face {} is not in 1..=6", bad)));
        }
        Ok(Self { faces, next: 0 })
    }

    /// Number of rolls made so far.
    pub fn rolls(&self) -> usize {
        self.next
    }
}

impl Dice for ScriptedDice {
    fn roll(&mut self) -> u8 {
        let face = self.faces[self.next % self.faces.len()];
        self.next += 1;
        face
    }
}
