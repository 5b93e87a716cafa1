use crate::Generator;
use rand::{CryptoRng, Rng};
use snapshare_core::ShareId;

/// 57 URL-safe symbols: digits and letters minus the lookalikes
/// `0`, `O`, `1`, `l` and `I`.
pub const ALPHABET: &[u8; 57] = b"23456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Number of symbols in a generated id (about 46.7 bits of entropy).
pub const ID_LENGTH: usize = 8;

/// Draws ids uniformly from [`ALPHABET`] using the thread-local CSPRNG.
///
/// Each symbol is sampled independently, so ids are unguessable as long as
/// the underlying generator is. There is no counter and no state.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomGenerator;

impl RandomGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Generates an id from a caller-supplied cryptographic RNG.
    pub fn generate_with<R: CryptoRng + ?Sized>(rng: &mut R) -> ShareId {
        let id: String = (0..ID_LENGTH)
            .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
            .collect();
        ShareId::new_unchecked(id)
    }
}

impl Generator for RandomGenerator {
    type Output = ShareId;

    fn generate(&self) -> Self::Output {
        Self::generate_with(&mut rand::rng())
    }
}
