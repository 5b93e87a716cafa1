pub mod random;

pub use random::{RandomGenerator, ALPHABET, ID_LENGTH};

use snapshare_core::ShareId;

/// Trait for generating share ids.
///
/// Implementations are pure generators that don't interact with storage.
/// Nothing checks a generated id against existing keys, so an
/// implementation must make collisions negligible on its own.
pub trait Generator: Send + Sync + 'static {
    type Output: Into<ShareId>;

    /// Generates a value that converts into a fresh share id.
    fn generate(&self) -> Self::Output;
}
